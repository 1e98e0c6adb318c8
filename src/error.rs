use crate::model::DockOperation;

/// Contract violations reported by [`crate::Factory`].
///
/// Recoverable input problems (unknown ids, unowned dockables, ambiguous pin state) are not
/// errors: those operations are no-ops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DockError {
    /// Only `Left`, `Right`, `Top` and `Bottom` can split a dock.
    UnsupportedSplit(DockOperation),
}

impl std::fmt::Display for DockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedSplit(operation) => {
                write!(f, "not supported split operation: {operation:?}")
            }
        }
    }
}

impl std::error::Error for DockError {}
