//! Pending I/O state machine (import/export).
//!
//! While an import or export is in flight it holds exclusive intent over the
//! event store: no other mutation may be applied to the same snapshot until
//! the operation completes or fails. Navigation is never gated.

/// Operation state for serializing import, export and store mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpState {
    #[default]
    Idle,
    BusyImport,
    BusyExport,
}

impl OpState {
    /// True if a store mutation (submit, delete, replace) can be applied.
    pub fn can_mutate(self) -> bool {
        matches!(self, OpState::Idle)
    }

    /// True if a new import can be started.
    pub fn can_start_import(self) -> bool {
        matches!(self, OpState::Idle)
    }

    /// True if a new export can be started.
    pub fn can_start_export(self) -> bool {
        matches!(self, OpState::Idle)
    }

    /// Short label of the pending operation, for errors and logs.
    pub fn label(self) -> &'static str {
        match self {
            OpState::Idle => "nothing",
            OpState::BusyImport => "import",
            OpState::BusyExport => "export",
        }
    }

    /// State after an import finished, successfully or not.
    pub fn on_import_done(self) -> Self {
        OpState::Idle
    }

    /// State after an export finished, successfully or not.
    pub fn on_export_done(self) -> Self {
        OpState::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_allows_all_ops() {
        let s = OpState::Idle;
        assert!(s.can_mutate());
        assert!(s.can_start_import());
        assert!(s.can_start_export());
    }

    #[test]
    fn busy_import_blocks_ops() {
        let s = OpState::BusyImport;
        assert!(!s.can_mutate());
        assert!(!s.can_start_import());
        assert!(!s.can_start_export());
        assert_eq!(s.label(), "import");
    }

    #[test]
    fn busy_export_blocks_ops() {
        let s = OpState::BusyExport;
        assert!(!s.can_mutate());
        assert!(!s.can_start_import());
        assert!(!s.can_start_export());
        assert_eq!(s.label(), "export");
    }

    #[test]
    fn done_returns_to_idle() {
        assert_eq!(OpState::BusyImport.on_import_done(), OpState::Idle);
        assert_eq!(OpState::BusyExport.on_export_done(), OpState::Idle);
    }
}
