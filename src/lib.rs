#![forbid(unsafe_code)]

//! An arena-backed dock layout engine.
//!
//! A layout is a tree of [`Dockable`] nodes (tools, documents, splitters and the containers that
//! hold them) plus the floating [`DockWindow`]s registered on root docks. All structural
//! mutation goes through [`Factory`], which keeps owner links, active children, focus and
//! splitter placement consistent after every call.

pub mod behavior;
pub mod dock_builder;
pub mod error;
pub mod factory;
pub mod locator;
pub mod model;

pub use behavior::{AlwaysClose, DockBehavior};
pub use dock_builder::DockBuilder;
pub use error::DockError;
pub use factory::{Factory, FactoryOptions};
pub use locator::Locator;
pub use model::{
    Content, Dock, DockId, DockOperation, DockWindow, Dockable, DockableKind, HostWindow,
    Orientation, ProportionalDock, RootDock, SplitDirection, ToolDock, WindowId,
};
