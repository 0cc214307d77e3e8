use serde::Serialize;

use crate::address::{AddressDraft, AddressRecord};
use crate::error::{FlowError, ValidationErrors};
use crate::grid::LabelGrid;

/// Ordered list of submitted addresses. Insertion order is kept and
/// duplicates are allowed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AddressCollection {
    records: Vec<AddressRecord>,
}

impl AddressCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: AddressRecord) {
        self.records.push(record);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[AddressRecord] {
        &self.records
    }
}

/// Session-scoped owner of the address collection and the address form
/// draft. The preview only ever sees snapshots taken from here.
#[derive(Clone, Debug, Default)]
pub struct Session {
    collection: AddressCollection,
    pub draft: AddressDraft,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collection(&self) -> &AddressCollection {
        &self.collection
    }

    pub fn count(&self) -> usize {
        self.collection.count()
    }

    /// Validate `draft` and append it. The stored draft is reset on success
    /// and left as typed on failure so the operator can fix it.
    pub fn submit_address(&mut self, draft: AddressDraft) -> Result<usize, ValidationErrors> {
        match draft.validate() {
            Ok(record) => {
                tracing::debug!(tracking_id = record.tracking_id(), "address appended");
                self.collection.append(record);
                self.draft = AddressDraft::default();
                Ok(self.collection.count())
            }
            Err(errs) => {
                self.draft = draft;
                Err(errs)
            }
        }
    }

    /// Drop every address and reset the form.
    pub fn clear(&mut self) {
        self.collection.clear();
        self.draft = AddressDraft::default();
    }

    pub fn can_preview(&self) -> bool {
        !self.collection.is_empty()
    }

    pub fn can_clear(&self) -> bool {
        !self.collection.is_empty()
    }

    /// Build a fresh grid from the current snapshot.
    pub fn open_preview(&self) -> Result<LabelGrid, FlowError> {
        if !self.can_preview() {
            return Err(FlowError::Empty);
        }
        Ok(LabelGrid::from_records(self.collection.records()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(tracking: &str) -> AddressDraft {
        AddressDraft {
            name: "A".into(),
            house_number: "1".into(),
            address_line1: "Main St".into(),
            city: "X".into(),
            state: "Gujarat".into(),
            zip_code: "123456".into(),
            phone: "1234567890".into(),
            tracking_id: tracking.into(),
            ..Default::default()
        }
    }

    #[test]
    fn append_grows_by_one_and_keeps_order() {
        let mut c = AddressCollection::new();
        for (i, t) in ["T1", "T2", "T3"].iter().enumerate() {
            let before = c.count();
            c.append(draft(t).validate().unwrap());
            assert_eq!(c.count(), before + 1);
            assert_eq!(c.records()[i].tracking_id(), *t);
        }
        let ids: Vec<&str> = c.records().iter().map(|r| r.tracking_id()).collect();
        assert_eq!(ids, ["T1", "T2", "T3"]);
    }

    #[test]
    fn identical_addresses_are_kept() {
        let mut c = AddressCollection::new();
        let rec = draft("T1").validate().unwrap();
        c.append(rec.clone());
        c.append(rec);
        assert_eq!(c.count(), 2);
    }

    #[test]
    fn clear_always_empties() {
        for n in [0, 1, 5] {
            let mut s = Session::new();
            for i in 0..n {
                s.submit_address(draft(&format!("T{i}"))).unwrap();
            }
            s.draft.name = "half typed".into();
            s.clear();
            assert_eq!(s.count(), 0);
            assert_eq!(s.draft, AddressDraft::default());
            assert!(!s.can_preview());
            assert!(!s.can_clear());
        }
    }

    #[test]
    fn failed_submission_keeps_draft_and_collection() {
        let mut s = Session::new();
        let mut bad = draft("T1");
        bad.phone = "123".into();
        assert!(s.submit_address(bad.clone()).is_err());
        assert_eq!(s.count(), 0);
        assert_eq!(s.draft, bad);
    }

    #[test]
    fn preview_is_gated_on_empty_collection() {
        let mut s = Session::new();
        assert_eq!(s.open_preview().unwrap_err(), FlowError::Empty);
        s.submit_address(draft("T1")).unwrap();
        assert!(s.open_preview().is_ok());
    }
}
