use serde::Serialize;

use crate::address::AddressRecord;
use crate::constants::{A4_LONG_MM, A4_SHORT_MM, GRID_COLUMNS, SHEET_PAD_MM, SLOT_COUNT, SLOT_GAP_MM};

/// Move one element from `from` to `to`, shifting everything in between by
/// one toward the vacated index. Returns false (and leaves `items` alone)
/// when either index is out of range.
pub fn move_item<T>(items: &mut [T], from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    if from < to {
        items[from..=to].rotate_left(1);
    } else if from > to {
        items[to..=from].rotate_right(1);
    }
    true
}

/// One position-independent cell of the label sheet. `id` is fixed at
/// construction and travels with the address when the slot is moved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub id: usize,
    pub address: Option<AddressRecord>,
}

impl Slot {
    pub fn is_empty(&self) -> bool {
        self.address.is_none()
    }
}

/// Axis-aligned rectangle in sheet millimeters, origin top-left, y down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl SlotRect {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.w && y >= self.y && y <= self.y + self.h
    }
}

/// Exactly four slots laid out 2 x 2 on a landscape A4 sheet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LabelGrid {
    slots: [Slot; SLOT_COUNT],
}

impl LabelGrid {
    /// Slot `i` takes record `i`; records past the fourth are not shown.
    pub fn from_records(records: &[AddressRecord]) -> Self {
        if records.len() > SLOT_COUNT {
            tracing::debug!(
                hidden = records.len() - SLOT_COUNT,
                "addresses beyond the label sheet are not shown"
            );
        }
        LabelGrid {
            slots: std::array::from_fn(|i| Slot {
                id: i,
                address: records.get(i).cloned(),
            }),
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }

    /// Apply a finished drag. A drop with no destination leaves the grid
    /// untouched. Returns whether the order changed.
    pub fn move_slot(&mut self, source: usize, destination: Option<usize>) -> bool {
        let Some(dest) = destination else {
            return false;
        };
        if source == dest {
            return false;
        }
        let moved = move_item(&mut self.slots, source, dest);
        if moved {
            tracing::debug!(source, dest, "slot moved");
        }
        moved
    }

    /// Sheet rectangle of grid position `index`.
    pub fn position_rect(index: usize) -> Option<SlotRect> {
        if index >= SLOT_COUNT {
            return None;
        }
        let rows = SLOT_COUNT / GRID_COLUMNS;
        let w = (A4_LONG_MM - 2.0 * SHEET_PAD_MM - SLOT_GAP_MM * (GRID_COLUMNS - 1) as f64)
            / GRID_COLUMNS as f64;
        let h = (A4_SHORT_MM - 2.0 * SHEET_PAD_MM - SLOT_GAP_MM * (rows - 1) as f64) / rows as f64;
        let col = (index % GRID_COLUMNS) as f64;
        let row = (index / GRID_COLUMNS) as f64;
        Some(SlotRect {
            x: SHEET_PAD_MM + col * (w + SLOT_GAP_MM),
            y: SHEET_PAD_MM + row * (h + SLOT_GAP_MM),
            w,
            h,
        })
    }

    /// Grid position under a sheet point, if any. Gaps and padding are
    /// outside every position.
    pub fn position_at(x_mm: f64, y_mm: f64) -> Option<usize> {
        (0..SLOT_COUNT).find(|&i| {
            LabelGrid::position_rect(i)
                .map(|r| r.contains(x_mm, y_mm))
                .unwrap_or(false)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::AddressDraft;

    fn rec(t: &str) -> AddressRecord {
        AddressDraft {
            name: "A".into(),
            house_number: "1".into(),
            address_line1: "Main St".into(),
            city: "X".into(),
            state: "Gujarat".into(),
            zip_code: "123456".into(),
            phone: "1234567890".into(),
            tracking_id: t.into(),
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    fn order(g: &LabelGrid) -> Vec<usize> {
        g.slots().iter().map(|s| s.id).collect()
    }

    #[test]
    fn move_item_is_a_single_element_move() {
        let mut v = ['A', 'B', 'C', 'D'];
        assert!(move_item(&mut v, 0, 2));
        assert_eq!(v, ['B', 'C', 'A', 'D']);

        let mut v = ['A', 'B', 'C', 'D'];
        assert!(move_item(&mut v, 3, 1));
        assert_eq!(v, ['A', 'D', 'B', 'C']);

        let mut v = ['A', 'B'];
        assert!(!move_item(&mut v, 0, 2));
        assert_eq!(v, ['A', 'B']);
    }

    #[test]
    fn grid_always_has_four_slots() {
        for k in 0..=6 {
            let records: Vec<_> = (0..k).map(|i| rec(&format!("T{i}"))).collect();
            let g = LabelGrid::from_records(&records);
            assert_eq!(g.slots().len(), 4);
            assert_eq!(g.occupied(), k.min(4));
            for (i, s) in g.slots().iter().enumerate() {
                assert_eq!(s.address.as_ref(), records.get(i));
            }
        }
    }

    #[test]
    fn moving_carries_id_and_address_together() {
        let records = vec![rec("T0"), rec("T1"), rec("T2")];
        let mut g = LabelGrid::from_records(&records);
        let before: Vec<_> = g.slots().to_vec();
        assert!(g.move_slot(0, Some(2)));
        assert_eq!(order(&g), [1, 2, 0, 3]);
        assert_eq!(g.slots()[2], before[0]);
        let mut after: Vec<_> = g.slots().iter().map(|s| s.id).collect();
        after.sort();
        assert_eq!(after, [0, 1, 2, 3]);
    }

    #[test]
    fn cancelled_drop_is_a_no_op() {
        let mut g = LabelGrid::from_records(&[rec("T0"), rec("T1")]);
        let before = g.clone();
        assert!(!g.move_slot(1, None));
        assert!(!g.move_slot(1, Some(1)));
        assert!(!g.move_slot(7, Some(0)));
        assert_eq!(g, before);
    }

    #[test]
    fn empty_slots_can_be_moved_too() {
        let mut g = LabelGrid::from_records(&[rec("T0")]);
        assert!(g.move_slot(3, Some(0)));
        assert!(g.slots()[0].is_empty());
        assert_eq!(g.slots()[1].address.as_ref().unwrap().tracking_id(), "T0");
    }

    #[test]
    fn positions_resolve_from_sheet_points() {
        assert_eq!(LabelGrid::position_at(20.0, 20.0), Some(0));
        assert_eq!(LabelGrid::position_at(280.0, 20.0), Some(1));
        assert_eq!(LabelGrid::position_at(20.0, 190.0), Some(2));
        assert_eq!(LabelGrid::position_at(280.0, 190.0), Some(3));
        // padding and the centre gap belong to no position
        assert_eq!(LabelGrid::position_at(2.0, 2.0), None);
        assert_eq!(LabelGrid::position_at(148.5, 50.0), None);
        assert!(LabelGrid::position_rect(4).is_none());
    }
}
