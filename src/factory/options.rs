use egui::{Pos2, Rect, Vec2};

/// Options for [`super::Factory`].
#[derive(Clone, Debug)]
pub struct FactoryOptions {
    /// Where [`super::Factory::float_dockable`] places the new window.
    pub default_float_rect: Rect,

    /// If true, record engine events (mutations, no-ops, integrity checks) in a small ring buffer.
    pub debug_event_log: bool,

    /// Maximum number of debug log lines to keep (ring buffer).
    pub debug_event_log_capacity: usize,

    /// If true, run tree integrity checks after each mutation.
    pub debug_integrity: bool,

    /// If true, panic on integrity issues (debug-only).
    pub debug_integrity_panic: bool,
}

impl Default for FactoryOptions {
    fn default() -> Self {
        Self {
            default_float_rect: Rect::from_min_size(Pos2::ZERO, Vec2::new(300.0, 400.0)),
            debug_event_log: false,
            debug_event_log_capacity: 200,
            debug_integrity: false,
            debug_integrity_panic: false,
        }
    }
}
