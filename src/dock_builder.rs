use crate::factory::Factory;
use crate::model::{DockId, Dockable, DockableKind, Orientation, SplitDirection};

/// A small convenience builder for constructing layouts from code.
///
/// Every call goes through the [`Factory`] operations, so ownership and context are already
/// propagated when [`DockBuilder::build`] returns. Splitters are interposed automatically.
///
/// ```
/// use dock_tree::{DockBuilder, Factory, SplitDirection};
///
/// let mut factory = Factory::<()>::default();
/// let mut builder = DockBuilder::new(&mut factory);
/// let files = builder.tool("Files", "Files");
/// let readme = builder.document("Readme", "README.md");
/// let tools = builder.tool_dock([files]);
/// let docs = builder.document_dock([readme]);
/// let main = builder.split(docs, SplitDirection::Left, 0.25, tools);
/// let root = builder.root(main);
/// let root = builder.build(root);
///
/// assert_eq!(factory.visible(root), [main]);
/// ```
pub struct DockBuilder<'a, Ctx> {
    factory: &'a mut Factory<Ctx>,
}

impl<'a, Ctx> DockBuilder<'a, Ctx> {
    pub fn new(factory: &'a mut Factory<Ctx>) -> Self {
        Self { factory }
    }

    /// Access the underlying factory for advanced customization.
    pub fn factory_mut(&mut self) -> &mut Factory<Ctx> {
        self.factory
    }

    /// Insert a tool leaf.
    #[must_use]
    pub fn tool(&mut self, id: impl Into<String>, title: impl Into<String>) -> DockId {
        self.factory.create_tool(id, title)
    }

    /// Insert a document leaf.
    #[must_use]
    pub fn document(&mut self, id: impl Into<String>, title: impl Into<String>) -> DockId {
        self.factory.create_document(id, title)
    }

    /// A tool dock showing `children`, the first one active.
    #[must_use]
    pub fn tool_dock(&mut self, children: impl IntoIterator<Item = DockId>) -> DockId {
        let dock = self.factory.create_tool_dock();
        self.fill(dock, children);
        dock
    }

    /// A document dock showing `children`, the first one active.
    #[must_use]
    pub fn document_dock(&mut self, children: impl IntoIterator<Item = DockId>) -> DockId {
        let dock = self.factory.create_document_dock();
        self.fill(dock, children);
        dock
    }

    /// A tool dock with `visible` shown and `pinned` auto-hidden.
    #[must_use]
    pub fn tool_dock_with_pinned(
        &mut self,
        visible: impl IntoIterator<Item = DockId>,
        pinned: impl IntoIterator<Item = DockId>,
    ) -> DockId {
        let dock = self.tool_dock(visible);
        for tool in pinned {
            self.factory.add_dockable(dock, tool);
            self.factory.pin_dockable(tool);
        }
        dock
    }

    /// A proportional dock laying out `children` along `orientation`, with a splitter between
    /// every pair of neighbours.
    #[must_use]
    pub fn proportional(
        &mut self,
        orientation: Orientation,
        children: impl IntoIterator<Item = DockId>,
    ) -> DockId {
        let dock = self.factory.create_proportional_dock_with(orientation);
        let mut first = None;
        for (i, child) in children.into_iter().enumerate() {
            if i > 0 {
                let splitter = self.factory.create_splitter_dock();
                self.factory.add_dockable(dock, splitter);
            }
            self.factory.add_dockable(dock, child);
            first.get_or_insert(child);
        }
        if let Some(state) = self.factory.dock_mut(dock) {
            state.active = first;
        }
        dock
    }

    /// Create a binary split.
    ///
    /// - `main`: the existing content
    /// - `dir`: where to place `side` relative to `main`
    /// - `side_proportion`: share of the parent given to `side` (0.0..=1.0)
    /// - `side`: the new side node
    ///
    /// Returns a new proportional dock that becomes the parent of both.
    #[must_use]
    pub fn split(
        &mut self,
        main: DockId,
        dir: SplitDirection,
        side_proportion: f64,
        side: DockId,
    ) -> DockId {
        debug_assert!(
            (0.0..=1.0).contains(&side_proportion),
            "side_proportion must be in 0.0..=1.0"
        );

        let (first, second) = if dir.new_content_first() {
            (side, main)
        } else {
            (main, side)
        };
        for (id, proportion) in [(side, side_proportion), (main, 1.0 - side_proportion)] {
            if let Some(state) = self.factory.dock_mut(id) {
                state.proportion = proportion;
            }
        }

        self.proportional(dir.orientation(), [first, second])
    }

    /// A root dock showing `child`, which also becomes its default.
    #[must_use]
    pub fn root(&mut self, child: DockId) -> DockId {
        let root = self.factory.create_root_dock();
        self.factory.add_dockable(root, child);
        if let Some(state) = self.factory.dock_mut(root) {
            state.active = Some(child);
            state.default = Some(child);
        }
        root
    }

    /// Insert a fully custom node.
    #[must_use]
    pub fn node(&mut self, dockable: Dockable<Ctx>) -> DockId {
        self.factory.insert(dockable)
    }

    /// Finish building: run [`Factory::init_layout`] on `root` and return it.
    pub fn build(self, root: DockId) -> DockId {
        if self.factory.kind(root) != Some(DockableKind::RootDock) {
            log::debug!("DockBuilder::build: {root:?} is not a root dock");
        }
        self.factory.init_layout(root);
        root
    }

    fn fill(&mut self, dock: DockId, children: impl IntoIterator<Item = DockId>) {
        let mut first = None;
        for child in children {
            self.factory.add_dockable(dock, child);
            first.get_or_insert(child);
        }
        if let Some(state) = self.factory.dock_mut(dock) {
            state.active = first;
        }
    }
}
