use serde::Serialize;

use crate::error::FlowError;

/// Where a preview dialog is in its lifecycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum PreviewPhase {
    Closed,
    Rendering,
    Ready,
    Exporting,
}

/// How the last export ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "message", rename_all = "snake_case")]
pub enum ExportOutcome {
    Done,
    Failed(String),
}

/// Preview/export state for one letter instance.
///
/// Closed -> Rendering -> Ready -> (print | Exporting -> Ready) -> Closed.
/// A second export cannot start while one is in flight, and both a finished
/// and a failed export leave the dialog open.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewFlow {
    phase: PreviewPhase,
    last_outcome: Option<ExportOutcome>,
    /// Id of the most recently started export.
    export_id: u64,
}

impl Default for PreviewFlow {
    fn default() -> Self {
        PreviewFlow {
            phase: PreviewPhase::Closed,
            last_outcome: None,
            export_id: 0,
        }
    }
}

impl PreviewFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &PreviewPhase {
        &self.phase
    }

    pub fn last_outcome(&self) -> Option<&ExportOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.phase != PreviewPhase::Closed
    }

    /// Whether the Download button should be enabled.
    pub fn can_export(&self) -> bool {
        self.phase == PreviewPhase::Ready
    }

    pub fn open(&mut self) {
        if self.phase == PreviewPhase::Closed {
            self.phase = PreviewPhase::Rendering;
            self.last_outcome = None;
        }
    }

    pub fn rendered(&mut self) -> Result<(), FlowError> {
        match self.phase {
            PreviewPhase::Rendering => {
                self.phase = PreviewPhase::Ready;
                Ok(())
            }
            PreviewPhase::Ready | PreviewPhase::Exporting => Ok(()),
            PreviewPhase::Closed => Err(FlowError::Closed),
        }
    }

    pub fn print(&self) -> Result<(), FlowError> {
        self.require_ready()
    }

    /// Start an export and return its id, to be passed back to
    /// [`finish_export`](Self::finish_export).
    pub fn begin_export(&mut self) -> Result<u64, FlowError> {
        self.require_ready()?;
        self.phase = PreviewPhase::Exporting;
        self.export_id += 1;
        Ok(self.export_id)
    }

    /// Whether `id` is the export currently in flight.
    pub fn is_current_export(&self, id: u64) -> bool {
        self.phase == PreviewPhase::Exporting && self.export_id == id
    }

    /// Record the end of export `id`. Returns false and changes nothing when
    /// that export is no longer the one in flight (the dialog was closed, or
    /// closed and reopened since it started).
    pub fn finish_export(&mut self, id: u64, outcome: ExportOutcome) -> bool {
        if !self.is_current_export(id) {
            tracing::debug!(id, current = self.export_id, ?outcome, "stale export result dropped");
            return false;
        }
        if let ExportOutcome::Failed(msg) = &outcome {
            tracing::warn!(%msg, "export failed; preview stays open for retry");
        }
        self.phase = PreviewPhase::Ready;
        self.last_outcome = Some(outcome);
        true
    }

    pub fn close(&mut self) {
        self.phase = PreviewPhase::Closed;
    }

    fn require_ready(&self) -> Result<(), FlowError> {
        match self.phase {
            PreviewPhase::Ready => Ok(()),
            PreviewPhase::Rendering => Err(FlowError::NotReady),
            PreviewPhase::Exporting => Err(FlowError::ExportInFlight),
            PreviewPhase::Closed => Err(FlowError::Closed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready() -> PreviewFlow {
        let mut f = PreviewFlow::new();
        f.open();
        f.rendered().unwrap();
        f
    }

    #[test]
    fn export_requires_rendered_preview() {
        let mut f = PreviewFlow::new();
        assert_eq!(f.begin_export(), Err(FlowError::Closed));
        f.open();
        assert_eq!(f.begin_export(), Err(FlowError::NotReady));
        f.rendered().unwrap();
        assert!(f.begin_export().is_ok());
    }

    #[test]
    fn second_export_is_refused_while_in_flight() {
        let mut f = ready();
        let id = f.begin_export().unwrap();
        assert!(!f.can_export());
        assert_eq!(f.begin_export(), Err(FlowError::ExportInFlight));
        assert_eq!(f.print(), Err(FlowError::ExportInFlight));
        assert!(f.finish_export(id, ExportOutcome::Done));
        assert!(f.can_export());
    }

    #[test]
    fn failed_export_returns_to_ready() {
        let mut f = ready();
        let id = f.begin_export().unwrap();
        f.finish_export(id, ExportOutcome::Failed("decode".into()));
        assert_eq!(f.phase(), &PreviewPhase::Ready);
        assert_eq!(f.last_outcome(), Some(&ExportOutcome::Failed("decode".into())));
        assert!(f.begin_export().is_ok());
    }

    #[test]
    fn late_result_after_close_is_ignored() {
        let mut f = ready();
        let id = f.begin_export().unwrap();
        f.close();
        assert!(!f.finish_export(id, ExportOutcome::Done));
        assert_eq!(f.phase(), &PreviewPhase::Closed);
        assert!(f.last_outcome().is_none());
    }

    #[test]
    fn result_from_previous_dialog_does_not_end_current_export() {
        let mut f = ready();
        let first = f.begin_export().unwrap();
        f.close();
        f.open();
        f.rendered().unwrap();
        let second = f.begin_export().unwrap();
        assert_ne!(first, second);

        assert!(!f.finish_export(first, ExportOutcome::Done));
        assert!(!f.can_export());
        assert_eq!(f.phase(), &PreviewPhase::Exporting);
        assert!(f.is_current_export(second));
        assert_eq!(f.begin_export(), Err(FlowError::ExportInFlight));

        assert!(f.finish_export(second, ExportOutcome::Done));
        assert!(f.can_export());
        assert_eq!(f.last_outcome(), Some(&ExportOutcome::Done));
    }
}
