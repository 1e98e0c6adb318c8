use std::collections::{BTreeMap, VecDeque};

use crate::locator::Locator;
use crate::model::{Dock, DockId, DockWindow, Dockable, DockableKind, Orientation, WindowId};

mod debug;
mod find;
mod integrity;
mod moves;
mod options;
mod remove;
mod split;
mod update;


pub use options::FactoryOptions;

/// The dock-tree mutation engine.
///
/// Owns every node and floating window of one or more layouts in an arena, and exposes the
/// structural operations (add, remove, move, swap, split, float, pin, focus) as the only way to
/// mutate them. Every operation runs to completion before returning and either applies fully or
/// is a no-op.
///
/// Nodes refer to their container through [`Dockable::owner`], which is only ever a handle
/// lookup: the container whose visible (or pinned) list holds a node is its sole owner.
#[derive(Debug)]
pub struct Factory<Ctx> {
    pub options: FactoryOptions,
    pub locator: Locator<Ctx>,

    nodes: BTreeMap<DockId, Dockable<Ctx>>,
    windows: BTreeMap<WindowId, DockWindow>,
    next_dock_serial: u64,
    next_window_serial: u64,

    debug_log: VecDeque<String>,
}

impl<Ctx> Default for Factory<Ctx> {
    fn default() -> Self {
        Self::new(Locator::default())
    }
}

impl<Ctx> Factory<Ctx> {
    pub fn new(locator: Locator<Ctx>) -> Self {
        Self::new_with_options(locator, FactoryOptions::default())
    }

    pub fn new_with_options(locator: Locator<Ctx>, options: FactoryOptions) -> Self {
        Self {
            options,
            locator,
            nodes: BTreeMap::new(),
            windows: BTreeMap::new(),
            next_dock_serial: 1,
            next_window_serial: 1,
            debug_log: VecDeque::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Arena access

    /// Add a detached node to the arena.
    pub fn insert(&mut self, dockable: Dockable<Ctx>) -> DockId {
        let id = DockId(self.next_dock_serial);
        self.next_dock_serial = self.next_dock_serial.saturating_add(1);
        self.nodes.insert(id, dockable);
        id
    }

    /// Add a window to the arena without registering it on any root.
    pub fn insert_window(&mut self, window: DockWindow) -> WindowId {
        let id = WindowId(self.next_window_serial);
        self.next_window_serial = self.next_window_serial.saturating_add(1);
        self.windows.insert(id, window);
        id
    }

    pub fn get(&self, id: DockId) -> Option<&Dockable<Ctx>> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: DockId) -> Option<&mut Dockable<Ctx>> {
        self.nodes.get_mut(&id)
    }

    pub fn window(&self, id: WindowId) -> Option<&DockWindow> {
        self.windows.get(&id)
    }

    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut DockWindow> {
        self.windows.get_mut(&id)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = DockId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn window_ids(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.windows.keys().copied()
    }

    pub fn kind(&self, id: DockId) -> Option<DockableKind> {
        self.get(id).map(Dockable::kind)
    }

    pub fn owner(&self, id: DockId) -> Option<DockId> {
        self.get(id).and_then(Dockable::owner)
    }

    pub fn dock(&self, id: DockId) -> Option<&Dock> {
        self.get(id).and_then(Dockable::dock)
    }

    pub fn dock_mut(&mut self, id: DockId) -> Option<&mut Dock> {
        self.get_mut(id).and_then(Dockable::dock_mut)
    }

    /// Visible children of a container; empty for leaves and unknown ids.
    pub fn visible(&self, id: DockId) -> &[DockId] {
        self.dock(id)
            .map(|dock| dock.visible.as_slice())
            .unwrap_or_default()
    }

    pub fn active(&self, id: DockId) -> Option<DockId> {
        self.dock(id).and_then(|dock| dock.active)
    }

    /// Pinned children of a tool dock; empty for every other node.
    pub fn pinned(&self, id: DockId) -> &[DockId] {
        self.get(id)
            .and_then(Dockable::as_tool_dock)
            .map(|tool| tool.pinned.as_slice())
            .unwrap_or_default()
    }

    /// Floating windows registered on a root dock.
    pub fn windows_of(&self, root: DockId) -> &[WindowId] {
        self.get(root)
            .and_then(Dockable::as_root)
            .map(|root| root.windows.as_slice())
            .unwrap_or_default()
    }

    pub fn focused(&self, root: DockId) -> Option<DockId> {
        self.get(root)
            .and_then(Dockable::as_root)
            .and_then(|root| root.focused)
    }

    /// Root docks with no owner that are not the layout of a floating window.
    pub fn top_level_roots(&self) -> Vec<DockId> {
        self.nodes
            .iter()
            .filter(|(_, node)| {
                node.owner.is_none() && node.as_root().is_some_and(|root| root.window.is_none())
            })
            .map(|(&id, _)| id)
            .collect()
    }

    pub fn is_splitter(&self, id: DockId) -> bool {
        self.get(id).is_some_and(Dockable::is_splitter)
    }

    fn set_owner(&mut self, id: DockId, owner: Option<DockId>) {
        if let Some(node) = self.get_mut(id) {
            node.owner = owner;
        }
    }

    fn set_active(&mut self, dock: DockId, active: Option<DockId>) {
        if let Some(dock) = self.dock_mut(dock) {
            dock.active = active;
        }
    }

    // ------------------------------------------------------------------------
    // Creation

    fn create(&mut self, kind: DockableKind) -> DockId {
        self.insert(Dockable::with_default_name(kind))
    }

    pub fn create_root_dock(&mut self) -> DockId {
        self.create(DockableKind::RootDock)
    }

    pub fn create_proportional_dock(&mut self) -> DockId {
        self.create(DockableKind::ProportionalDock)
    }

    pub fn create_splitter_dock(&mut self) -> DockId {
        self.create(DockableKind::Splitter)
    }

    pub fn create_tool_dock(&mut self) -> DockId {
        self.create(DockableKind::ToolDock)
    }

    pub fn create_document_dock(&mut self) -> DockId {
        self.create(DockableKind::DocumentDock)
    }

    pub fn create_dock_window(&mut self) -> WindowId {
        self.insert_window(DockWindow::default())
    }

    pub fn create_tool(&mut self, id: impl Into<String>, title: impl Into<String>) -> DockId {
        self.insert(Dockable::tool(id, title))
    }

    pub fn create_document(&mut self, id: impl Into<String>, title: impl Into<String>) -> DockId {
        self.insert(Dockable::document(id, title))
    }

    /// A proportional dock with the given orientation and no children.
    pub fn create_proportional_dock_with(&mut self, orientation: Orientation) -> DockId {
        let id = self.create_proportional_dock();
        if let Some(prop) = self.get_mut(id).and_then(Dockable::as_proportional_mut) {
            prop.orientation = orientation;
        }
        id
    }

    // ------------------------------------------------------------------------
    // Locator glue

    pub fn get_context(&self, id: &str) -> Option<Ctx> {
        self.locator.resolve_context(id)
    }

    pub fn get_host_window(&self, id: &str) -> Option<Box<dyn crate::model::HostWindow>> {
        self.locator.resolve_host_window(id)
    }

    /// Resolve a dockable through the locator and add it (detached) to the arena.
    pub fn get_dockable(&mut self, id: &str) -> Option<DockId> {
        let dockable = self.locator.resolve_dockable(id)?;
        Some(self.insert(dockable))
    }
}
