use egui::{Pos2, Rect, Vec2};

use super::Factory;
use crate::error::DockError;
use crate::model::{DockId, DockOperation, Dockable, DockableKind, SplitDirection, WindowId};

impl<Ctx> Factory<Ctx> {
    /// Build the proportional dock that replaces `dock` when `dockable` is split off to `dir`.
    ///
    /// A leaf `dockable` is wrapped in its own proportional dock so both sides are containers.
    /// The new layout takes over the proportion of `dock`, which becomes unconstrained. The
    /// layout holds `[new, splitter, dock]` for left/top and `[dock, splitter, new]` for
    /// right/bottom. Nothing is attached to the tree; see [`Self::split_to_dock`].
    pub fn create_split_layout(
        &mut self,
        dock: DockId,
        dockable: DockId,
        dir: SplitDirection,
    ) -> DockId {
        let split = if self.kind(dockable).is_some_and(DockableKind::is_container) {
            dockable
        } else {
            let wrapper = self.create_proportional_dock();
            if let Some(state) = self.dock_mut(wrapper) {
                state.visible.push(dockable);
                state.active = Some(dockable);
            }
            wrapper
        };

        let container_proportion = match self.dock_mut(dock) {
            Some(state) => std::mem::replace(&mut state.proportion, f64::NAN),
            None => f64::NAN,
        };

        let layout = self.create_proportional_dock_with(dir.orientation());
        let splitter = self.create_splitter_dock();

        let (first, second) = if dir.new_content_first() {
            (split, dock)
        } else {
            (dock, split)
        };

        if let Some(state) = self.dock_mut(layout) {
            state.proportion = container_proportion;
            state.visible = vec![first, splitter, second];
            state.active = Some(second);
        }

        layout
    }

    /// Replace `dock` in its owner with a split layout holding `dock` and `dockable`.
    ///
    /// # Errors
    /// [`DockError::UnsupportedSplit`] if `operation` is not one of the four directions.
    /// That is a bug in the caller, not a runtime condition.
    pub fn split_to_dock(
        &mut self,
        dock: DockId,
        dockable: DockId,
        operation: DockOperation,
    ) -> Result<(), DockError> {
        let dir = operation
            .split_direction()
            .ok_or(DockError::UnsupportedSplit(operation))?;

        if self.is_within(dock, dockable) {
            self.debug_log_event(format!("split_to_dock: {dock:?} lies inside {dockable:?}"));
            return Ok(());
        }
        let Some(owner) = self.owner(dock) else {
            self.debug_log_event(format!("split_to_dock: {dock:?} has no owner"));
            return Ok(());
        };
        let Some(index) = self.dock(owner).and_then(|state| state.index_of(dock)) else {
            self.debug_log_event(format!("split_to_dock: {dock:?} is not visible in {owner:?}"));
            return Ok(());
        };

        let layout = self.create_split_layout(dock, dockable, dir);
        if let Some(state) = self.dock_mut(owner) {
            state.visible[index] = layout;
        }
        self.update_dockable(layout, Some(owner));
        self.set_active(owner, Some(layout));

        self.debug_log_event(format!(
            "split_to_dock: {dockable:?} {dir:?} of {dock:?} -> {layout:?}"
        ));
        self.debug_check_integrity("split_to_dock");
        Ok(())
    }

    /// Wrap `dockable` into a floating window: `window -> root -> container -> dockable`.
    ///
    /// Tools get a fresh tool dock and documents a fresh document dock; containers are used as
    /// they are, and a root dock contributes its active child. Returns `None` for anything that
    /// cannot float (splitters). The window is not registered on any root.
    pub fn create_window_from(&mut self, dockable: DockId) -> Option<WindowId> {
        let kind = self.kind(dockable)?;
        let (target, topmost) = match kind {
            DockableKind::Tool => (Some(self.wrap_leaf(DockableKind::ToolDock, dockable)), true),
            DockableKind::Document => {
                (Some(self.wrap_leaf(DockableKind::DocumentDock, dockable)), false)
            }
            DockableKind::ToolDock => (Some(dockable), true),
            DockableKind::DocumentDock | DockableKind::ProportionalDock => (Some(dockable), false),
            DockableKind::RootDock => {
                let active = self.active(dockable);
                if let Some(active) = active {
                    self.remove_dockable(active, false);
                }
                (active, false)
            }
            DockableKind::Splitter => {
                self.debug_log_event(format!("create_window_from: cannot float {dockable:?}"));
                return None;
            }
        };

        let root = self.create_root_dock();
        if let (Some(target), Some(state)) = (target, self.dock_mut(root)) {
            state.visible.push(target);
            state.active = Some(target);
            state.default = Some(target);
        }

        let window = self.create_dock_window();
        if let Some(w) = self.window_mut(window) {
            w.title = String::new();
            w.size = Vec2::splat(f32::NAN);
            w.topmost = topmost;
            w.layout = Some(root);
        }
        if let Some(root_dock) = self.get_mut(root).and_then(Dockable::as_root_mut) {
            root_dock.window = Some(window);
        }

        Some(window)
    }

    fn wrap_leaf(&mut self, kind: DockableKind, leaf: DockId) -> DockId {
        let container = self.insert(Dockable::with_default_name(kind));
        if let Some(state) = self.dock_mut(container) {
            state.visible.push(leaf);
            state.active = Some(leaf);
        }
        container
    }

    /// Float `dockable` out of the layout containing `dock` into a new window at `rect`.
    ///
    /// The window is registered on the nearest root dock above `dock` and presented
    /// non-modally. Does nothing if `dock` has no enclosing root, or if `dockable` is owned
    /// but not visible (a pinned tool).
    pub fn split_to_window(&mut self, dock: DockId, dockable: DockId, rect: Rect) {
        let Some(root) = self.find_root(dock, |_, _| true) else {
            self.debug_log_event(format!("split_to_window: no root above {dock:?}"));
            return;
        };

        if let Some(owner) = self.owner(dockable) {
            if !self.dock(owner).is_some_and(|state| state.contains(dockable)) {
                self.debug_log_event(format!(
                    "split_to_window: {dockable:?} is not visible in {owner:?}"
                ));
                return;
            }
        }

        self.remove_dockable(dockable, true);

        let Some(window) = self.create_window_from(dockable) else {
            return;
        };
        self.add_window(root, window);

        if let Some(w) = self.window_mut(window) {
            w.position = rect.min;
            w.size = rect.size();
            w.present(false);
        }

        self.debug_log_event(format!("split_to_window: {dockable:?} -> {window:?} on {root:?}"));
        self.debug_check_integrity("split_to_window");
    }

    /// Float `dockable` into a new window at [`super::FactoryOptions::default_float_rect`].
    pub fn float_dockable(&mut self, dockable: DockId) {
        let Some(owner) = self.owner(dockable) else {
            return;
        };
        let rect = self.options.default_float_rect;
        self.split_to_window(owner, dockable, rect);
    }

    /// Float `dockable` at `pos` with `size`.
    pub fn float_dockable_at(&mut self, dockable: DockId, pos: Pos2, size: Vec2) {
        let Some(owner) = self.owner(dockable) else {
            return;
        };
        self.split_to_window(owner, dockable, Rect::from_min_size(pos, size));
    }
}

#[cfg(test)]
mod tests {
    use egui::{Pos2, Vec2};

    use crate::error::DockError;
    use crate::factory::Factory;
    use crate::model::{DockOperation, DockableKind, Orientation};

    #[test]
    fn split_right_puts_new_content_last() {
        let mut factory = Factory::<()>::default();
        let root = factory.create_root_dock();
        let docs = factory.create_document_dock();
        factory.add_dockable(root, docs);
        factory.dock_mut(docs).unwrap().proportion = 0.25;
        let x = factory.create_document("X", "X");

        factory.split_to_dock(docs, x, DockOperation::Right).unwrap();

        let layout = factory.visible(root)[0];
        assert_eq!(factory.active(root), Some(layout));
        let prop = factory.get(layout).unwrap().as_proportional().unwrap();
        assert_eq!(prop.orientation, Orientation::Horizontal);
        assert_eq!(prop.dock.proportion, 0.25);

        let children = factory.visible(layout).to_vec();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0], docs);
        assert!(factory.is_splitter(children[1]));
        assert_eq!(factory.kind(children[2]), Some(DockableKind::ProportionalDock));
        assert_eq!(factory.visible(children[2]), [x]);
        assert!(factory.dock(docs).unwrap().proportion.is_nan());

        assert_eq!(factory.owner(docs), Some(layout));
        assert_eq!(factory.owner(x), Some(children[2]));
        assert!(factory.integrity_issues().is_empty());
    }

    #[test]
    fn split_top_puts_container_first() {
        let mut factory = Factory::<()>::default();
        let root = factory.create_root_dock();
        let docs = factory.create_document_dock();
        let tools = factory.create_tool_dock();
        factory.add_dockable(root, docs);

        factory.split_to_dock(docs, tools, DockOperation::Top).unwrap();

        let layout = factory.visible(root)[0];
        let prop = factory.get(layout).unwrap().as_proportional().unwrap();
        assert_eq!(prop.orientation, Orientation::Vertical);
        let children = factory.visible(layout);
        assert_eq!(children[0], tools);
        assert_eq!(children[2], docs);
        assert_eq!(factory.active(layout), Some(docs));
    }

    #[test]
    fn split_with_non_directional_operation_fails() {
        let mut factory = Factory::<()>::default();
        let root = factory.create_root_dock();
        let docs = factory.create_document_dock();
        factory.add_dockable(root, docs);
        let x = factory.create_document("X", "X");

        for op in [DockOperation::Fill, DockOperation::Window] {
            assert_eq!(
                factory.split_to_dock(docs, x, op),
                Err(DockError::UnsupportedSplit(op))
            );
        }
        assert_eq!(factory.visible(root), [docs]);
    }

    #[test]
    fn split_of_unowned_dock_is_a_no_op() {
        let mut factory = Factory::<()>::default();
        let docs = factory.create_document_dock();
        let x = factory.create_document("X", "X");
        assert_eq!(factory.split_to_dock(docs, x, DockOperation::Left), Ok(()));
        assert_eq!(factory.owner(x), None);
    }

    #[test]
    fn split_with_an_enclosing_container_is_a_no_op() {
        let mut factory = Factory::<()>::default();
        let root = factory.create_root_dock();
        let outer = factory.create_proportional_dock();
        let docs = factory.create_document_dock();
        factory.add_dockable(outer, docs);
        factory.add_dockable(root, outer);

        assert_eq!(factory.split_to_dock(docs, outer, DockOperation::Right), Ok(()));
        assert_eq!(factory.split_to_dock(docs, docs, DockOperation::Left), Ok(()));

        assert_eq!(factory.visible(root), [outer]);
        assert_eq!(factory.visible(outer), [docs]);
        assert!(factory.tree_integrity_issues(root).is_empty());
    }

    #[test]
    fn window_from_tool_wraps_in_tool_dock() {
        let mut factory = Factory::<()>::default();
        let tool = factory.create_tool("Files", "Files");

        let window = factory.create_window_from(tool).unwrap();

        let w = factory.window(window).unwrap();
        assert!(w.topmost);
        let root = w.layout().unwrap();
        assert_eq!(factory.kind(root), Some(DockableKind::RootDock));
        let container = factory.visible(root)[0];
        assert_eq!(factory.kind(container), Some(DockableKind::ToolDock));
        assert_eq!(factory.dock(root).unwrap().default, Some(container));
        assert_eq!(factory.visible(container), [tool]);
        assert_eq!(factory.active(container), Some(tool));
    }

    #[test]
    fn window_from_document_and_containers() {
        let mut factory = Factory::<()>::default();
        let doc = factory.create_document("Readme", "README.md");
        let window = factory.create_window_from(doc).unwrap();
        let w = factory.window(window).unwrap();
        assert!(!w.topmost);
        let container = factory.visible(w.layout().unwrap())[0];
        assert_eq!(factory.kind(container), Some(DockableKind::DocumentDock));

        let prop = factory.create_proportional_dock();
        let window = factory.create_window_from(prop).unwrap();
        let layout = factory.window(window).unwrap().layout().unwrap();
        assert_eq!(factory.visible(layout), [prop]);
    }

    #[test]
    fn window_from_root_takes_active_child() {
        let mut factory = Factory::<()>::default();
        let old_root = factory.create_root_dock();
        let docs = factory.create_document_dock();
        factory.add_dockable(old_root, docs);
        factory.set_active_dockable(docs);

        let window = factory.create_window_from(old_root).unwrap();
        let layout = factory.window(window).unwrap().layout().unwrap();
        assert_eq!(factory.visible(layout), [docs]);
        assert!(factory.visible(old_root).is_empty());
    }

    #[test]
    fn window_from_splitter_is_none() {
        let mut factory = Factory::<()>::default();
        let splitter = factory.create_splitter_dock();
        assert!(factory.create_window_from(splitter).is_none());
    }

    #[test]
    fn float_moves_tool_into_registered_window() {
        let mut factory = Factory::<()>::default();
        let root = factory.create_root_dock();
        let tools = factory.create_tool_dock();
        let a = factory.create_tool("A", "A");
        let b = factory.create_tool("B", "B");
        factory.add_dockable(tools, a);
        factory.add_dockable(tools, b);
        factory.add_dockable(root, tools);

        factory.float_dockable_at(b, Pos2::new(10.0, 20.0), Vec2::new(640.0, 480.0));

        assert_eq!(factory.visible(tools), [a]);
        let windows = factory.windows_of(root).to_vec();
        assert_eq!(windows.len(), 1);
        let w = factory.window(windows[0]).unwrap();
        assert_eq!(w.owner(), Some(root));
        assert_eq!(w.position, Pos2::new(10.0, 20.0));
        assert_eq!(w.size, Vec2::new(640.0, 480.0));
        let layout = w.layout().unwrap();
        let container = factory.visible(layout)[0];
        assert_eq!(factory.owner(container), Some(layout));
        assert_eq!(factory.owner(b), Some(container));
        assert!(factory.integrity_issues().is_empty());
    }

    #[test]
    fn float_without_root_is_a_no_op() {
        let mut factory = Factory::<()>::default();
        let tools = factory.create_tool_dock();
        let a = factory.create_tool("A", "A");
        factory.add_dockable(tools, a);
        factory.float_dockable(a);
        assert_eq!(factory.visible(tools), [a]);
        assert_eq!(factory.window_ids().count(), 0);
    }

    #[test]
    fn emptying_floating_window_closes_it() {
        let mut factory = Factory::<()>::default();
        let root = factory.create_root_dock();
        let tools = factory.create_tool_dock();
        let a = factory.create_tool("A", "A");
        let b = factory.create_tool("B", "B");
        factory.add_dockable(tools, a);
        factory.add_dockable(tools, b);
        factory.add_dockable(root, tools);

        factory.float_dockable(b);
        assert_eq!(factory.windows_of(root).len(), 1);

        factory.remove_dockable(b, true);
        assert!(factory.windows_of(root).is_empty());
        assert!(factory.integrity_issues().is_empty());
    }

    #[test]
    fn float_of_pinned_tool_is_a_no_op() {
        let mut factory = Factory::<()>::default();
        let root = factory.create_root_dock();
        let tools = factory.create_tool_dock();
        let a = factory.create_tool("A", "A");
        let b = factory.create_tool("B", "B");
        factory.add_dockable(tools, a);
        factory.add_dockable(tools, b);
        factory.add_dockable(root, tools);
        factory.pin_dockable(b);

        factory.float_dockable(b);

        assert_eq!(factory.pinned(tools), [b]);
        assert_eq!(factory.owner(b), Some(tools));
        assert!(factory.windows_of(root).is_empty());
        assert!(factory.integrity_issues().is_empty());
    }
}
