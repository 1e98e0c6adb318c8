use ahash::{HashMap, HashSet};

use super::Factory;
use crate::model::{DockId, Dockable};

impl<Ctx> Factory<Ctx> {
    /// Integrity issues of every top-level layout (root docks with no owner that are not the
    /// layout of a floating window). Window layouts are checked through their roots.
    pub fn integrity_issues(&self) -> Vec<String> {
        self.top_level_roots()
            .into_iter()
            .flat_map(|root| self.tree_integrity_issues(root))
            .collect()
    }

    /// Human-readable descriptions of every broken invariant in the tree under `root`,
    /// including the layouts of its floating windows.
    pub fn tree_integrity_issues(&self, root: DockId) -> Vec<String> {
        let mut issues: Vec<String> = Vec::new();

        if self.get(root).is_none() {
            issues.push(format!("integrity: root {root:?} missing"));
            return issues;
        }

        let mut visited: HashSet<DockId> = HashSet::default();
        let mut parent_of: HashMap<DockId, DockId> = HashMap::default();
        let mut window_seen = HashSet::default();
        let mut stack: Vec<DockId> = vec![root];

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                issues.push(format!("integrity: {id:?} reached twice"));
                continue;
            }

            let Some(node) = self.get(id) else {
                issues.push(format!("integrity: missing node {id:?} (reachable)"));
                continue;
            };

            let Some(dock) = node.dock() else {
                continue;
            };

            if let Some(active) = dock.active {
                if !dock.contains(active) {
                    issues.push(format!(
                        "integrity: dock {id:?} active {active:?} not in visible={:?}",
                        dock.visible
                    ));
                }
            }

            if !dock.visible.is_empty() && dock.visible.iter().all(|&c| self.is_splitter(c)) {
                issues.push(format!(
                    "integrity: dock {id:?} holds only splitters {:?}",
                    dock.visible
                ));
            }

            let mut children: Vec<DockId> = dock.visible.clone();
            if let Some(tool) = node.as_tool_dock() {
                for pinned in &tool.pinned {
                    if dock.contains(*pinned) {
                        issues.push(format!(
                            "integrity: tool dock {id:?} has {pinned:?} both visible and pinned"
                        ));
                    }
                }
                children.extend(tool.pinned.iter().copied());
            }

            let mut local_set: HashSet<DockId> = HashSet::default();
            for &child in &children {
                if !local_set.insert(child) {
                    issues.push(format!(
                        "integrity: parent {id:?} contains duplicate child {child:?}"
                    ));
                    continue;
                }

                let Some(child_node) = self.get(child) else {
                    issues.push(format!(
                        "integrity: parent {id:?} references missing child {child:?}"
                    ));
                    continue;
                };

                if child_node.owner != Some(id) {
                    issues.push(format!(
                        "integrity: child {child:?} of {id:?} has owner {:?}",
                        child_node.owner
                    ));
                }

                if let Some(prev_parent) = parent_of.insert(child, id) {
                    issues.push(format!(
                        "integrity: child {child:?} has multiple parents {prev_parent:?} and {id:?}"
                    ));
                }

                stack.push(child);
            }

            if let Some(root_dock) = node.as_root() {
                for &window_id in &root_dock.windows {
                    if !window_seen.insert(window_id) {
                        issues.push(format!(
                            "integrity: window {window_id:?} registered more than once"
                        ));
                        continue;
                    }
                    let Some(window) = self.window(window_id) else {
                        issues.push(format!(
                            "integrity: root {id:?} lists missing window {window_id:?}"
                        ));
                        continue;
                    };
                    if window.owner() != Some(id) {
                        issues.push(format!(
                            "integrity: window {window_id:?} on {id:?} has owner {:?}",
                            window.owner()
                        ));
                    }
                    if let Some(layout) = window.layout() {
                        let back = self
                            .get(layout)
                            .and_then(Dockable::as_root)
                            .and_then(|layout_root| layout_root.window);
                        if back != Some(window_id) {
                            issues.push(format!(
                                "integrity: layout {layout:?} of {window_id:?} points at {back:?}"
                            ));
                        }
                        stack.push(layout);
                    }
                }
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use crate::factory::Factory;

    #[test]
    fn healthy_tree_has_no_issues() {
        let mut factory = Factory::<()>::default();
        let root = factory.create_root_dock();
        let tools = factory.create_tool_dock();
        let tool = factory.create_tool("Files", "Files");
        factory.add_dockable(tools, tool);
        factory.add_dockable(root, tools);
        assert!(factory.integrity_issues().is_empty());
    }

    #[test]
    fn detects_active_outside_visible_and_wrong_owner() {
        let mut factory = Factory::<()>::default();
        let root = factory.create_root_dock();
        let tools = factory.create_tool_dock();
        let stray = factory.create_tool("Stray", "Stray");
        factory.add_dockable(root, tools);
        factory.dock_mut(tools).unwrap().active = Some(stray);
        factory.dock_mut(root).unwrap().visible.push(stray);

        let issues = factory.tree_integrity_issues(root);
        assert!(issues.iter().any(|i| i.contains("not in visible")), "{issues:?}");
        assert!(issues.iter().any(|i| i.contains("has owner")), "{issues:?}");
    }

    #[test]
    fn detects_lists_of_only_splitters() {
        let mut factory = Factory::<()>::default();
        let root = factory.create_root_dock();
        let splitter = factory.create_splitter_dock();
        factory.add_dockable(root, splitter);
        let issues = factory.tree_integrity_issues(root);
        assert!(issues.iter().any(|i| i.contains("only splitters")), "{issues:?}");
    }
}
