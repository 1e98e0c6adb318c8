use ahash::HashSet;

use super::Factory;
use crate::behavior::DockBehavior;
use crate::model::{DockId, DockWindow, Dockable, WindowId};

impl<Ctx> Factory<Ctx> {
    /// Detach `dockable` from its owner's visible list.
    ///
    /// The owner's active child becomes the item now sitting just before the removed one (or
    /// the first item), unless that item is a splitter, in which case the owner has no active
    /// child. Splitters left dangling in a one- or two-item list are removed too. With
    /// `collapse`, an owner left empty is removed from the layout as well.
    pub fn remove_dockable(&mut self, dockable: DockId, collapse: bool) {
        let Some(owner) = self.owner(dockable) else {
            self.debug_log_event(format!("remove_dockable: {dockable:?} has no owner"));
            return;
        };
        let Some(index) = self.dock(owner).and_then(|dock| dock.index_of(dockable)) else {
            self.debug_log_event(format!(
                "remove_dockable: {dockable:?} is not visible in {owner:?}"
            ));
            return;
        };

        let remaining: Vec<DockId> = match self.dock_mut(owner) {
            Some(dock) => {
                dock.visible.remove(index);
                dock.visible.clone()
            }
            None => return,
        };
        self.set_owner(dockable, None);

        let next_active = remaining
            .get(index.saturating_sub(1))
            .copied()
            .filter(|&candidate| !self.is_splitter(candidate));
        self.set_active(owner, next_active);
        self.debug_log_event(format!(
            "remove_dockable: {dockable:?} from {owner:?} at {index}, active={next_active:?}"
        ));

        match remaining.as_slice() {
            &[only] if self.is_splitter(only) => self.remove_dockable(only, false),
            &[first, second] => {
                for splitter in [first, second] {
                    if self.is_splitter(splitter) {
                        self.remove_dockable(splitter, false);
                    }
                }
            }
            _ => {}
        }

        if collapse {
            self.collapse(owner);
        }

        self.debug_check_integrity("remove_dockable");
    }

    /// Remove an empty collapsable dock along with the splitters on either side of it.
    ///
    /// The root of a floating window is not removed: its window is closed instead.
    fn collapse(&mut self, dock: DockId) {
        let Some(state) = self.dock(dock) else {
            return;
        };
        if !state.is_collapsable || !state.visible.is_empty() {
            return;
        }

        if let Some(owner) = self.owner(dock) {
            let siblings = self.visible(owner);
            if let Some(index) = siblings.iter().position(|&s| s == dock) {
                let previous = index.checked_sub(1).and_then(|i| siblings.get(i)).copied();
                let next = siblings.get(index + 1).copied();
                let splitters: Vec<DockId> = [previous, next]
                    .into_iter()
                    .flatten()
                    .filter(|&s| self.is_splitter(s))
                    .collect();

                for splitter in splitters {
                    self.remove_dockable(splitter, true);
                }
            }
        }

        let window = self
            .get(dock)
            .and_then(Dockable::as_root)
            .and_then(|root| root.window);
        match window {
            Some(window) => {
                self.debug_log_event(format!("collapse: {dock:?} closes {window:?}"));
                self.remove_window(window);
            }
            None => {
                self.debug_log_event(format!("collapse: {dock:?}"));
                self.remove_dockable(dock, true);
            }
        }
    }

    /// Free every node and window that no top-level layout reaches.
    ///
    /// Live nodes are those under [`Self::top_level_roots`], following visible and pinned lists
    /// and the layouts of registered floating windows. Everything else is dropped: splitters and
    /// containers left behind by removal and collapse, closed windows together with their host
    /// surface, and also detached nodes the caller has not attached yet. Returns the number of
    /// nodes freed.
    pub fn remove_unreachable(&mut self) -> usize {
        let mut live_nodes: HashSet<DockId> = HashSet::default();
        let mut live_windows: HashSet<WindowId> = HashSet::default();
        let mut stack = self.top_level_roots();

        while let Some(id) = stack.pop() {
            if !live_nodes.insert(id) {
                continue;
            }
            stack.extend(self.visible(id).iter().copied());
            stack.extend(self.pinned(id).iter().copied());
            for &window in self.windows_of(id) {
                if live_windows.insert(window) {
                    stack.extend(self.window(window).and_then(DockWindow::layout));
                }
            }
        }

        let nodes_before = self.nodes.len();
        let windows_before = self.windows.len();
        self.nodes.retain(|id, _| live_nodes.contains(id));
        self.windows.retain(|id, _| live_windows.contains(id));

        let freed = nodes_before - self.nodes.len();
        let freed_windows = windows_before - self.windows.len();
        if freed > 0 || freed_windows > 0 {
            self.debug_log_event(format!(
                "remove_unreachable: freed {freed} nodes and {freed_windows} windows"
            ));
        }
        freed
    }

    /// Remove `dockable` (collapsing its owner if it empties) unless `behavior` vetoes the close.
    pub fn close_dockable(&mut self, behavior: &mut dyn DockBehavior<Ctx>, dockable: DockId) {
        let Some(node) = self.get(dockable) else {
            return;
        };
        if behavior.on_close(node) {
            self.remove_dockable(dockable, true);
        } else {
            self.debug_log_event(format!("close_dockable: {dockable:?} vetoed"));
        }
    }
}
