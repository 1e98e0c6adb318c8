use crate::model::Dockable;

/// Application hooks consulted by [`crate::Factory`] operations that need a decision
/// from the embedding application.
pub trait DockBehavior<Ctx> {
    /// Called by [`crate::Factory::close_dockable`] before anything is removed.
    ///
    /// Return `false` to veto the close (e.g. a document with unsaved changes).
    fn on_close(&mut self, dockable: &Dockable<Ctx>) -> bool {
        let _ = dockable;
        true
    }
}

/// A [`DockBehavior`] that permits every close.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysClose;

impl<Ctx> DockBehavior<Ctx> for AlwaysClose {}
