use egui::{Pos2, Vec2};

/// Handle of a node in the dock arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DockId(pub(crate) u64);

impl DockId {
    pub fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Handle of a floating window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct WindowId(pub(crate) u64);

impl WindowId {
    pub fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// The tag of [`Content`]: which kind of node a [`Dockable`] is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum DockableKind {
    Tool,
    Document,
    Splitter,
    ToolDock,
    DocumentDock,
    ProportionalDock,
    RootDock,
}

impl DockableKind {
    /// Default identifier and title given to nodes created by the factory constructors.
    pub fn default_name(self) -> &'static str {
        match self {
            Self::Tool => "Tool",
            Self::Document => "Document",
            Self::Splitter => "SplitterDock",
            Self::ToolDock => "ToolDock",
            Self::DocumentDock => "DocumentDock",
            Self::ProportionalDock => "ProportionalDock",
            Self::RootDock => "RootDock",
        }
    }

    pub fn is_container(self) -> bool {
        matches!(
            self,
            Self::ToolDock | Self::DocumentDock | Self::ProportionalDock | Self::RootDock
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Where a side node goes relative to the dock being split.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum SplitDirection {
    Left,
    Right,
    Top,
    Bottom,
}

impl SplitDirection {
    pub fn orientation(self) -> Orientation {
        match self {
            Self::Left | Self::Right => Orientation::Horizontal,
            Self::Top | Self::Bottom => Orientation::Vertical,
        }
    }

    /// `true` if the new content is placed before the existing dock.
    pub fn new_content_first(self) -> bool {
        matches!(self, Self::Left | Self::Top)
    }
}

/// A docking gesture, as produced by drop targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum DockOperation {
    Fill,
    Left,
    Right,
    Top,
    Bottom,
    Window,
}

impl DockOperation {
    /// The split direction for the four directional operations, `None` otherwise.
    pub fn split_direction(self) -> Option<SplitDirection> {
        match self {
            Self::Left => Some(SplitDirection::Left),
            Self::Right => Some(SplitDirection::Right),
            Self::Top => Some(SplitDirection::Top),
            Self::Bottom => Some(SplitDirection::Bottom),
            Self::Fill | Self::Window => None,
        }
    }
}

impl From<SplitDirection> for DockOperation {
    fn from(dir: SplitDirection) -> Self {
        match dir {
            SplitDirection::Left => Self::Left,
            SplitDirection::Right => Self::Right,
            SplitDirection::Top => Self::Top,
            SplitDirection::Bottom => Self::Bottom,
        }
    }
}

// ----------------------------------------------------------------------------

/// State shared by every container variant.
#[derive(Clone, Debug, PartialEq)]
pub struct Dock {
    /// Ordered, visible children. Membership is unique.
    pub visible: Vec<DockId>,

    /// `None` or a member of `visible`.
    pub active: Option<DockId>,

    pub default: Option<DockId>,

    /// Share of the parent's extent. `NaN` means unconstrained.
    pub proportion: f64,

    /// If true, the dock removes itself once its last child is gone.
    pub is_collapsable: bool,

    /// Set while the focused dockable of the enclosing root lives in this dock.
    pub is_active: bool,
}

impl Default for Dock {
    fn default() -> Self {
        Self {
            visible: Vec::new(),
            active: None,
            default: None,
            proportion: f64::NAN,
            is_collapsable: true,
            is_active: false,
        }
    }
}

impl Dock {
    pub fn index_of(&self, id: DockId) -> Option<usize> {
        self.visible.iter().position(|&child| child == id)
    }

    pub fn contains(&self, id: DockId) -> bool {
        self.visible.contains(&id)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToolDock {
    pub dock: Dock,

    /// Auto-hidden tools. Disjoint from `dock.visible`.
    pub pinned: Vec<DockId>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProportionalDock {
    pub dock: Dock,
    pub orientation: Orientation,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RootDock {
    pub dock: Dock,

    /// Floating windows registered on this root. Peers of the visible list, not children.
    pub windows: Vec<WindowId>,

    pub focused: Option<DockId>,
    pub is_focusable_root: bool,

    /// The floating window whose layout this root is, if any.
    pub window: Option<WindowId>,

    pub current_view: Option<DockId>,
    pub default_view: Option<DockId>,
}

impl Default for RootDock {
    fn default() -> Self {
        Self {
            dock: Dock::default(),
            windows: Vec::new(),
            focused: None,
            is_focusable_root: true,
            window: None,
            current_view: None,
            default_view: None,
        }
    }
}

/// Variant-specific payload of a [`Dockable`].
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    Tool,
    Document,
    Splitter,
    ToolDock(ToolDock),
    DocumentDock(Dock),
    ProportionalDock(ProportionalDock),
    RootDock(RootDock),
}

impl Content {
    pub fn kind(&self) -> DockableKind {
        match self {
            Self::Tool => DockableKind::Tool,
            Self::Document => DockableKind::Document,
            Self::Splitter => DockableKind::Splitter,
            Self::ToolDock(_) => DockableKind::ToolDock,
            Self::DocumentDock(_) => DockableKind::DocumentDock,
            Self::ProportionalDock(_) => DockableKind::ProportionalDock,
            Self::RootDock(_) => DockableKind::RootDock,
        }
    }

    pub fn new(kind: DockableKind) -> Self {
        match kind {
            DockableKind::Tool => Self::Tool,
            DockableKind::Document => Self::Document,
            DockableKind::Splitter => Self::Splitter,
            DockableKind::ToolDock => Self::ToolDock(ToolDock::default()),
            DockableKind::DocumentDock => Self::DocumentDock(Dock::default()),
            DockableKind::ProportionalDock => Self::ProportionalDock(ProportionalDock::default()),
            DockableKind::RootDock => Self::RootDock(RootDock::default()),
        }
    }

    pub fn dock(&self) -> Option<&Dock> {
        match self {
            Self::Tool | Self::Document | Self::Splitter => None,
            Self::ToolDock(tool) => Some(&tool.dock),
            Self::DocumentDock(dock) => Some(dock),
            Self::ProportionalDock(prop) => Some(&prop.dock),
            Self::RootDock(root) => Some(&root.dock),
        }
    }

    pub fn dock_mut(&mut self) -> Option<&mut Dock> {
        match self {
            Self::Tool | Self::Document | Self::Splitter => None,
            Self::ToolDock(tool) => Some(&mut tool.dock),
            Self::DocumentDock(dock) => Some(dock),
            Self::ProportionalDock(prop) => Some(&mut prop.dock),
            Self::RootDock(root) => Some(&mut root.dock),
        }
    }
}

/// A node of the layout tree: a leaf panel, a splitter, or a container.
#[derive(Clone, Debug)]
pub struct Dockable<Ctx> {
    /// Unique within a loaded layout. Also the key used for locator lookups.
    pub id: String,
    pub title: String,

    /// Resolved through the context locator on every ownership pass.
    pub context: Option<Ctx>,

    pub(crate) owner: Option<DockId>,
    pub content: Content,
}

impl<Ctx> Dockable<Ctx> {
    pub fn new(kind: DockableKind, id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            context: None,
            owner: None,
            content: Content::new(kind),
        }
    }

    pub fn tool(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(DockableKind::Tool, id, title)
    }

    pub fn document(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(DockableKind::Document, id, title)
    }

    /// A node of `kind` named after its variant.
    pub fn with_default_name(kind: DockableKind) -> Self {
        Self::new(kind, kind.default_name(), kind.default_name())
    }

    pub fn kind(&self) -> DockableKind {
        self.content.kind()
    }

    /// The container this node currently sits in.
    pub fn owner(&self) -> Option<DockId> {
        self.owner
    }

    pub fn is_splitter(&self) -> bool {
        matches!(self.content, Content::Splitter)
    }

    pub fn dock(&self) -> Option<&Dock> {
        self.content.dock()
    }

    pub fn dock_mut(&mut self) -> Option<&mut Dock> {
        self.content.dock_mut()
    }

    pub fn as_root(&self) -> Option<&RootDock> {
        match &self.content {
            Content::RootDock(root) => Some(root),
            _ => None,
        }
    }

    pub fn as_root_mut(&mut self) -> Option<&mut RootDock> {
        match &mut self.content {
            Content::RootDock(root) => Some(root),
            _ => None,
        }
    }

    pub fn as_tool_dock(&self) -> Option<&ToolDock> {
        match &self.content {
            Content::ToolDock(tool) => Some(tool),
            _ => None,
        }
    }

    pub fn as_tool_dock_mut(&mut self) -> Option<&mut ToolDock> {
        match &mut self.content {
            Content::ToolDock(tool) => Some(tool),
            _ => None,
        }
    }

    pub fn as_proportional(&self) -> Option<&ProportionalDock> {
        match &self.content {
            Content::ProportionalDock(prop) => Some(prop),
            _ => None,
        }
    }

    pub fn as_proportional_mut(&mut self) -> Option<&mut ProportionalDock> {
        match &mut self.content {
            Content::ProportionalDock(prop) => Some(prop),
            _ => None,
        }
    }
}

// ----------------------------------------------------------------------------

/// The native surface presenting a [`DockWindow`]. Supplied by the embedding application.
pub trait HostWindow {
    fn present(&mut self, is_dialog: bool);

    fn exit(&mut self);

    /// Point the surface back at the window it presents.
    fn set_window(&mut self, window: WindowId);
}

/// A floating top-level window whose layout is a full root dock subtree.
pub struct DockWindow {
    pub id: String,
    pub title: String,
    pub position: Pos2,

    /// `NaN` components mean "let the host decide".
    pub size: Vec2,
    pub topmost: bool,

    pub(crate) owner: Option<DockId>,
    pub(crate) layout: Option<DockId>,
    pub(crate) host: Option<Box<dyn HostWindow>>,
}

impl std::fmt::Debug for DockWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DockWindow")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("position", &self.position)
            .field("size", &self.size)
            .field("topmost", &self.topmost)
            .field("owner", &self.owner)
            .field("layout", &self.layout)
            .field("has_host", &self.host.is_some())
            .finish()
    }
}

impl Default for DockWindow {
    fn default() -> Self {
        Self {
            id: "DockWindow".to_owned(),
            title: String::new(),
            position: Pos2::ZERO,
            size: Vec2::splat(f32::NAN),
            topmost: false,
            owner: None,
            layout: None,
            host: None,
        }
    }
}

impl DockWindow {
    /// The root dock this window is registered on.
    pub fn owner(&self) -> Option<DockId> {
        self.owner
    }

    /// The root dock laid out inside this window.
    pub fn layout(&self) -> Option<DockId> {
        self.layout
    }

    pub fn has_host(&self) -> bool {
        self.host.is_some()
    }

    pub fn present(&mut self, is_dialog: bool) {
        if let Some(host) = &mut self.host {
            host.present(is_dialog);
        }
    }

    pub fn exit(&mut self) {
        if let Some(host) = &mut self.host {
            host.exit();
        }
    }
}
