use itertools::Itertools as _;

use super::Factory;
use crate::model::DockId;

impl<Ctx> Factory<Ctx> {
    pub(super) fn debug_log_event(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::debug!("{message}");
        if !self.options.debug_event_log {
            return;
        }
        self.push_debug_log_line(message);
    }

    fn push_debug_log_line(&mut self, message: String) {
        let cap = self.options.debug_event_log_capacity.clamp(1, 10_000);
        while self.debug_log.len() >= cap {
            self.debug_log.pop_front();
        }
        self.debug_log.push_back(message);
    }

    /// Recorded engine events, oldest first. Empty unless `options.debug_event_log` is set.
    pub fn debug_log_lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.debug_log.iter().map(String::as_str)
    }

    pub fn debug_log_clear(&mut self) {
        self.debug_log.clear();
    }

    /// Run the integrity checks after a mutation, if enabled.
    pub(super) fn debug_check_integrity(&mut self, operation: &str) {
        if !self.options.debug_integrity {
            return;
        }

        let issues = self.integrity_issues();
        if issues.is_empty() {
            return;
        }

        let text = issues.iter().join("\n");
        log::warn!("integrity issues after {operation}:\n{text}");
        if self.options.debug_event_log {
            self.push_debug_log_line(format!("integrity FAILED after {operation}"));
            for issue in issues {
                self.push_debug_log_line(issue);
            }
        }

        if self.options.debug_integrity_panic && cfg!(debug_assertions) {
            panic!("dock tree integrity failed after {operation}:\n{text}");
        }
    }

    /// One line per node of the subtree under `root`, depth-first, for diagnostics.
    pub fn debug_tree_summary(&self, root: DockId) -> String {
        let mut lines = Vec::new();
        self.summarize_into(root, 0, &mut lines);
        lines.join("\n")
    }

    fn summarize_into(&self, id: DockId, depth: usize, lines: &mut Vec<String>) {
        let indent = "  ".repeat(depth);
        let Some(node) = self.get(id) else {
            lines.push(format!("{indent}{id:?} MISSING"));
            return;
        };

        match node.dock() {
            None => lines.push(format!("{indent}{id:?} {:?} {:?}", node.kind(), node.id)),
            Some(dock) => {
                lines.push(format!(
                    "{indent}{id:?} {:?} {:?} active={:?}",
                    node.kind(),
                    node.id,
                    dock.active
                ));
                for &child in &dock.visible {
                    self.summarize_into(child, depth + 1, lines);
                }
            }
        }

        for &pinned in self.pinned(id) {
            lines.push(format!("{indent}  (pinned) {pinned:?}"));
        }

        for &window_id in self.windows_of(id) {
            lines.push(format!("{indent}  window {window_id:?}"));
            if let Some(layout) = self.window(window_id).and_then(|w| w.layout()) {
                self.summarize_into(layout, depth + 2, lines);
            }
        }
    }
}
