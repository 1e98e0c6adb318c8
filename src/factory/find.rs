use super::Factory;
use crate::model::{DockId, Dockable, RootDock};

impl<Ctx> Factory<Ctx> {
    /// Walk the owner chain upward from `dockable` and return the first root dock accepted by
    /// `predicate`. The dockable itself is never tested.
    pub fn find_root(
        &self,
        dockable: DockId,
        predicate: impl Fn(&Dockable<Ctx>, &RootDock) -> bool,
    ) -> Option<DockId> {
        let mut current = dockable;
        loop {
            let owner = self.owner(current)?;
            let node = self.get(owner)?;
            if let Some(root) = node.as_root() {
                if predicate(node, root) {
                    return Some(owner);
                }
            }
            current = owner;
        }
    }

    /// True if `ancestor` is `id` itself or appears on its owner chain.
    ///
    /// Structural operations use this to refuse edits that would put a node under itself.
    pub fn is_within(&self, id: DockId, ancestor: DockId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.owner(node);
        }
        false
    }

    /// Depth-first search of `dock`, its visible descendants and, for root docks, the layouts
    /// of their floating windows. Returns the first match.
    pub fn find_dockable(
        &self,
        dock: DockId,
        predicate: impl Fn(DockId, &Dockable<Ctx>) -> bool,
    ) -> Option<DockId> {
        self.find_dockable_impl(dock, &predicate)
    }

    fn find_dockable_impl(
        &self,
        id: DockId,
        predicate: &dyn Fn(DockId, &Dockable<Ctx>) -> bool,
    ) -> Option<DockId> {
        let node = self.get(id)?;
        if predicate(id, node) {
            return Some(id);
        }

        for &child in self.visible(id) {
            if let Some(found) = self.find_dockable_impl(child, predicate) {
                return Some(found);
            }
        }

        for &window_id in self.windows_of(id) {
            let layout = self.window(window_id).and_then(|window| window.layout());
            if let Some(found) =
                layout.and_then(|layout| self.find_dockable_impl(layout, predicate))
            {
                return Some(found);
            }
        }

        None
    }

    /// Make `dockable` the active child of its owner. No focus side effects.
    pub fn set_active_dockable(&mut self, dockable: DockId) {
        let Some(owner) = self.owner(dockable) else {
            return;
        };
        if self.dock(owner).is_some_and(|dock| dock.contains(dockable)) {
            self.set_active(owner, Some(dockable));
        }
    }

    /// Move the focus of the focusable root enclosing `dock` to `dockable`.
    ///
    /// The root is found from the active child of `dock`. The container of the previously
    /// focused dockable is deactivated and the container of the newly focused one activated.
    /// With `dockable = None`, the current focus owner is re-activated.
    pub fn set_focused_dockable(&mut self, dock: DockId, dockable: Option<DockId>) {
        let Some(active) = self.active(dock) else {
            self.debug_log_event(format!("set_focused_dockable: {dock:?} has no active child"));
            return;
        };
        let Some(root) = self.find_root(active, |_, root| root.is_focusable_root) else {
            self.debug_log_event(format!("set_focused_dockable: no focusable root for {dock:?}"));
            return;
        };

        if let Some(previous_owner) = self.focused(root).and_then(|f| self.owner(f)) {
            self.set_is_active(previous_owner, false);
        }

        if let Some(dockable) = dockable {
            if let Some(root) = self.get_mut(root).and_then(Dockable::as_root_mut) {
                root.focused = Some(dockable);
            }
        }

        if let Some(focused_owner) = self.focused(root).and_then(|f| self.owner(f)) {
            self.set_is_active(focused_owner, true);
        }
    }

    fn set_is_active(&mut self, dock: DockId, is_active: bool) {
        if let Some(dock) = self.dock_mut(dock) {
            dock.is_active = is_active;
        }
    }
}
