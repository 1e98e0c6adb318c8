use super::Factory;
use crate::model::{DockId, Dockable, WindowId};

impl<Ctx> Factory<Ctx> {
    /// Prepare a freshly built layout: propagate ownership and context, activate default
    /// children and views, and present the floating windows of a root.
    pub fn init_layout(&mut self, layout: DockId) {
        self.update_dockable(layout, None);

        if let Some(dock) = self.dock_mut(layout) {
            if dock.default.is_some() {
                dock.active = dock.default;
            }
        }

        if let Some(root) = self.get_mut(layout).and_then(Dockable::as_root_mut) {
            if root.default_view.is_some() {
                root.current_view = root.default_view;
            }
        }

        self.show_windows(layout);
        self.debug_check_integrity("init_layout");
    }

    /// Ownership/context pass over a subtree.
    ///
    /// Resolves the node's context, points it at `owner`, and recurses into visible children,
    /// pinned children, and (for root docks) the layouts of registered floating windows.
    /// Re-running it on an unchanged tree changes nothing.
    pub fn update_dockable(&mut self, id: DockId, owner: Option<DockId>) {
        let Some(node) = self.nodes.get(&id) else {
            self.debug_log_event(format!("update_dockable: unknown {id:?}"));
            return;
        };

        let context = self.locator.resolve_context(&node.id);
        let children: Vec<DockId> = node
            .dock()
            .map(|dock| dock.visible.clone())
            .unwrap_or_default();
        let pinned: Vec<DockId> = self.pinned(id).to_vec();
        let windows: Vec<WindowId> = self.windows_of(id).to_vec();

        if let Some(node) = self.nodes.get_mut(&id) {
            if let Some(context) = context {
                node.context = Some(context);
            }
            node.owner = owner;
        }

        for child in children {
            self.update_dockable(child, Some(id));
        }

        for child in pinned {
            self.update_dockable(child, Some(id));
        }

        for window in windows {
            self.update_dock_window(window, Some(id));
        }
    }

    /// Attach a host surface to `window`, point it at `owner`, and propagate into its layout.
    pub fn update_dock_window(&mut self, window_id: WindowId, owner: Option<DockId>) {
        let Some(window) = self.windows.get(&window_id) else {
            self.debug_log_event(format!("update_dock_window: unknown {window_id:?}"));
            return;
        };

        let mut host = self.locator.resolve_host_window(&window.id);
        if let Some(host) = &mut host {
            host.set_window(window_id);
        }

        let layout = window.layout;
        if let Some(window) = self.windows.get_mut(&window_id) {
            window.host = host;
            window.owner = owner;
        }

        if let Some(layout) = layout {
            let layout_owner = self.owner(layout);
            if let Some(root) = self.get_mut(layout).and_then(Dockable::as_root_mut) {
                root.window = Some(window_id);
            }
            self.update_dockable(layout, layout_owner);
        }
    }

    /// Append `dockable` to the visible children of `dock`.
    pub fn add_dockable(&mut self, dock: DockId, dockable: DockId) {
        if self.dock(dock).is_none() {
            self.debug_log_event(format!("add_dockable: {dock:?} is not a container"));
            return;
        }
        if self.is_within(dock, dockable) {
            self.debug_log_event(format!("add_dockable: {dock:?} lies inside {dockable:?}"));
            return;
        }

        self.update_dockable(dockable, Some(dock));
        if let Some(dock) = self.dock_mut(dock) {
            dock.visible.push(dockable);
        }
        self.debug_check_integrity("add_dockable");
    }

    /// Insert `dockable` among the visible children of `dock`. An index past the end is a no-op.
    pub fn insert_dockable(&mut self, dock: DockId, dockable: DockId, index: usize) {
        let Some(len) = self.dock(dock).map(|d| d.visible.len()) else {
            self.debug_log_event(format!("insert_dockable: {dock:?} is not a container"));
            return;
        };
        if index > len {
            self.debug_log_event(format!(
                "insert_dockable: index {index} out of range for {dock:?} (len {len})"
            ));
            return;
        }
        if self.is_within(dock, dockable) {
            self.debug_log_event(format!("insert_dockable: {dock:?} lies inside {dockable:?}"));
            return;
        }

        self.update_dockable(dockable, Some(dock));
        if let Some(dock) = self.dock_mut(dock) {
            dock.visible.insert(index, dockable);
        }
        self.debug_check_integrity("insert_dockable");
    }

    /// Register a floating window on a root dock.
    pub fn add_window(&mut self, root: DockId, window: WindowId) {
        if !self.windows.contains_key(&window) {
            self.debug_log_event(format!("add_window: unknown {window:?}"));
            return;
        }
        let Some(root_dock) = self.get_mut(root).and_then(Dockable::as_root_mut) else {
            self.debug_log_event(format!("add_window: {root:?} is not a root dock"));
            return;
        };
        if root_dock.windows.contains(&window) {
            return;
        }
        root_dock.windows.push(window);

        self.update_dock_window(window, Some(root));
        self.debug_check_integrity("add_window");
    }

    /// Close the host surface of `window` and unregister it from its root.
    ///
    /// Windows that are not registered on a root dock are left alone.
    pub fn remove_window(&mut self, window_id: WindowId) {
        let Some(owner) = self.window(window_id).and_then(|w| w.owner) else {
            self.debug_log_event(format!("remove_window: {window_id:?} has no owner"));
            return;
        };
        if self.get(owner).and_then(Dockable::as_root).is_none() {
            self.debug_log_event(format!("remove_window: owner {owner:?} is not a root dock"));
            return;
        }

        if let Some(window) = self.windows.get_mut(&window_id) {
            window.exit();
        }
        if let Some(root) = self.get_mut(owner).and_then(Dockable::as_root_mut) {
            root.windows.retain(|&w| w != window_id);
        }
        self.debug_log_event(format!("remove_window: {window_id:?} from {owner:?}"));
        self.debug_check_integrity("remove_window");
    }

    /// Present every floating window registered on `root`.
    pub fn show_windows(&mut self, root: DockId) {
        for window_id in self.windows_of(root).to_vec() {
            if let Some(window) = self.windows.get_mut(&window_id) {
                window.present(false);
            }
        }
    }

    /// Close the host surface of every floating window registered on `root`.
    pub fn exit_windows(&mut self, root: DockId) {
        for window_id in self.windows_of(root).to_vec() {
            if let Some(window) = self.windows.get_mut(&window_id) {
                window.exit();
            }
        }
    }
}
