use super::Factory;
use crate::model::{DockId, Dockable};

impl<Ctx> Factory<Ctx> {
    /// Reorder within one container: `source` takes the index of `target`.
    pub fn move_dockable(&mut self, dock: DockId, source: DockId, target: DockId) {
        let Some(state) = self.dock_mut(dock) else {
            return;
        };
        let (Some(source_index), Some(target_index)) =
            (state.index_of(source), state.index_of(target))
        else {
            return;
        };
        if source_index == target_index {
            return;
        }

        state.visible.remove(source_index);
        state.visible.insert(target_index, source);
        state.active = Some(source);

        self.debug_log_event(format!(
            "move_dockable: {source:?} {source_index}->{target_index} in {dock:?}"
        ));
        self.debug_check_integrity("move_dockable");
    }

    /// Move `source` next to `target` (or to the end when `target` is `None`).
    ///
    /// Within one container, `source` lands after `target` when moving forward and before it
    /// when moving backward. Across containers, `source` is removed from `source_dock` (which
    /// may collapse), inserted right after `target` in `target_dock`, and becomes its active
    /// child.
    pub fn move_dockable_to(
        &mut self,
        source_dock: DockId,
        target_dock: DockId,
        source: DockId,
        target: Option<DockId>,
    ) {
        if self.dock(source_dock).is_none() || self.dock(target_dock).is_none() {
            self.debug_log_event("move_dockable_to: source or target is not a container");
            return;
        }
        let Some(source_index) = self.dock(source_dock).and_then(|d| d.index_of(source)) else {
            self.debug_log_event(format!(
                "move_dockable_to: {source:?} is not visible in {source_dock:?}"
            ));
            return;
        };

        if source_dock == target_dock {
            self.move_within(source_dock, source, source_index, target);
        } else if self.is_within(target_dock, source) {
            self.debug_log_event(format!(
                "move_dockable_to: {target_dock:?} lies inside {source:?}"
            ));
        } else {
            self.move_across(target_dock, source, target);
        }
    }

    fn move_within(
        &mut self,
        dock: DockId,
        source: DockId,
        source_index: usize,
        target: Option<DockId>,
    ) {
        let Some(state) = self.dock_mut(dock) else {
            return;
        };
        let target_index = match target {
            Some(target) => match state.index_of(target) {
                Some(index) => index,
                None => return,
            },
            None => state.visible.len() - 1,
        };
        if source_index == target_index {
            return;
        }

        // Insert first, then drop the old occurrence wherever the insert shifted it to.
        if source_index < target_index {
            state.visible.insert(target_index + 1, source);
            state.visible.remove(source_index);
        } else {
            state.visible.insert(target_index, source);
            state.visible.remove(source_index + 1);
        }

        self.debug_log_event(format!(
            "move_dockable_to: {source:?} {source_index}->{target_index} in {dock:?}"
        ));
        self.debug_check_integrity("move_dockable_to");
    }

    fn move_across(&mut self, target_dock: DockId, source: DockId, target: Option<DockId>) {
        self.remove_dockable(source, true);

        let Some(state) = self.dock(target_dock) else {
            return;
        };
        let len = state.visible.len();
        let index = target
            .and_then(|target| state.index_of(target))
            .map_or(len, |index| index + 1);

        if let Some(state) = self.dock_mut(target_dock) {
            state.visible.insert(index, source);
        }
        self.update_dockable(source, Some(target_dock));
        self.set_active(target_dock, Some(source));

        self.debug_log_event(format!(
            "move_dockable_to: {source:?} into {target_dock:?} at {index}"
        ));
        self.debug_check_integrity("move_dockable_to");
    }

    /// Exchange two children of one container in place. `target` becomes active.
    pub fn swap_dockable(&mut self, dock: DockId, source: DockId, target: DockId) {
        let Some(state) = self.dock_mut(dock) else {
            return;
        };
        let (Some(source_index), Some(target_index)) =
            (state.index_of(source), state.index_of(target))
        else {
            return;
        };
        if source_index == target_index {
            return;
        }

        state.visible.swap(source_index, target_index);
        state.active = Some(target);

        self.debug_log_event(format!("swap_dockable: {source:?}<->{target:?} in {dock:?}"));
        self.debug_check_integrity("swap_dockable");
    }

    /// Exchange `source` (in `source_dock`) and `target` (in `target_dock`) in place.
    ///
    /// Each container ends up with the dockable it received as its active child.
    pub fn swap_dockable_between(
        &mut self,
        source_dock: DockId,
        target_dock: DockId,
        source: DockId,
        target: DockId,
    ) {
        if source_dock == target_dock {
            self.swap_dockable(source_dock, source, target);
            return;
        }
        if self.is_within(target_dock, source) || self.is_within(source_dock, target) {
            self.debug_log_event(format!(
                "swap_dockable_between: {source:?} and {target:?} are nested"
            ));
            return;
        }

        let source_index = self.dock(source_dock).and_then(|d| d.index_of(source));
        let target_index = self.dock(target_dock).and_then(|d| d.index_of(target));
        let (Some(source_index), Some(target_index)) = (source_index, target_index) else {
            self.debug_log_event(format!(
                "swap_dockable_between: {source:?} or {target:?} not found"
            ));
            return;
        };

        if let Some(state) = self.dock_mut(source_dock) {
            state.visible[source_index] = target;
        }
        if let Some(state) = self.dock_mut(target_dock) {
            state.visible[target_index] = source;
        }

        self.update_dockable(source, Some(target_dock));
        self.update_dockable(target, Some(source_dock));

        self.set_active(source_dock, Some(target));
        self.set_active(target_dock, Some(source));

        self.debug_log_event(format!(
            "swap_dockable_between: {source:?}@{source_dock:?} <-> {target:?}@{target_dock:?}"
        ));
        self.debug_check_integrity("swap_dockable_between");
    }

    /// Toggle a tool between the visible and pinned (auto-hidden) lists of its tool dock.
    pub fn pin_dockable(&mut self, dockable: DockId) {
        let Some(owner) = self.owner(dockable) else {
            return;
        };
        let Some(tool_dock) = self.get_mut(owner).and_then(Dockable::as_tool_dock_mut) else {
            return;
        };

        let visible_index = tool_dock.dock.index_of(dockable);
        let pinned_index = tool_dock.pinned.iter().position(|&p| p == dockable);

        match (visible_index, pinned_index) {
            (Some(index), None) => {
                tool_dock.dock.visible.remove(index);
                tool_dock.pinned.push(dockable);
                if tool_dock.dock.active == Some(dockable) {
                    let remaining = tool_dock.dock.visible.clone();
                    let next_active = remaining
                        .get(index.saturating_sub(1))
                        .copied()
                        .filter(|&candidate| !self.is_splitter(candidate));
                    self.set_active(owner, next_active);
                }
                self.debug_log_event(format!("pin_dockable: pinned {dockable:?} in {owner:?}"));
            }
            (None, Some(index)) => {
                tool_dock.pinned.remove(index);
                tool_dock.dock.visible.push(dockable);
                self.debug_log_event(format!("pin_dockable: unpinned {dockable:?} in {owner:?}"));
            }
            (visible, pinned) => {
                self.debug_log_event(format!(
                    "pin_dockable: {dockable:?} in {owner:?} has ambiguous state \
                     visible={visible:?} pinned={pinned:?}"
                ));
            }
        }

        self.debug_check_integrity("pin_dockable");
    }
}

#[cfg(test)]
mod tests {
    use crate::factory::Factory;
    use crate::model::DockId;

    fn docs_with(factory: &mut Factory<()>, names: &[&str]) -> (DockId, Vec<DockId>) {
        let docs = factory.create_document_dock();
        let ids = names
            .iter()
            .map(|name| {
                let id = factory.create_document(*name, *name);
                factory.add_dockable(docs, id);
                id
            })
            .collect();
        (docs, ids)
    }

    #[test]
    fn move_within_reorders_and_activates() {
        let mut factory = Factory::<()>::default();
        let (docs, ids) = docs_with(&mut factory, &["A", "B", "C"]);
        let [a, b, c] = [ids[0], ids[1], ids[2]];

        factory.move_dockable(docs, a, c);
        assert_eq!(factory.visible(docs), [b, c, a]);
        assert_eq!(factory.active(docs), Some(a));

        factory.move_dockable(docs, a, a);
        assert_eq!(factory.visible(docs), [b, c, a]);
    }

    #[test]
    fn move_round_trip_on_two_items() {
        let mut factory = Factory::<()>::default();
        let (docs, ids) = docs_with(&mut factory, &["A", "B"]);
        let [a, b] = [ids[0], ids[1]];

        factory.move_dockable(docs, a, b);
        assert_eq!(factory.visible(docs), [b, a]);
        factory.move_dockable(docs, b, a);
        assert_eq!(factory.visible(docs), [a, b]);
    }

    #[test]
    fn move_to_same_owner_forward_lands_after_target() {
        let mut factory = Factory::<()>::default();
        let (docs, ids) = docs_with(&mut factory, &["A", "B", "C", "D"]);
        let [a, b, c, d] = [ids[0], ids[1], ids[2], ids[3]];

        factory.move_dockable_to(docs, docs, a, Some(c));
        assert_eq!(factory.visible(docs), [b, c, a, d]);

        factory.move_dockable_to(docs, docs, d, Some(b));
        assert_eq!(factory.visible(docs), [d, b, c, a]);

        factory.move_dockable_to(docs, docs, d, None);
        assert_eq!(factory.visible(docs), [b, c, a, d]);

        // Already last.
        factory.move_dockable_to(docs, docs, d, None);
        assert_eq!(factory.visible(docs), [b, c, a, d]);
    }

    #[test]
    fn move_to_same_owner_with_missing_target_is_a_no_op() {
        let mut factory = Factory::<()>::default();
        let (docs, ids) = docs_with(&mut factory, &["A", "B"]);
        let stray = factory.create_document("X", "X");
        factory.move_dockable_to(docs, docs, ids[0], Some(stray));
        assert_eq!(factory.visible(docs), ids.as_slice());
    }

    #[test]
    fn move_across_inserts_after_target_and_activates() {
        let mut factory = Factory::<()>::default();
        let (left, l) = docs_with(&mut factory, &["A", "B"]);
        let (right, r) = docs_with(&mut factory, &["C", "D"]);

        factory.move_dockable_to(left, right, l[1], Some(r[0]));

        assert_eq!(factory.visible(left), [l[0]]);
        assert_eq!(factory.active(left), Some(l[0]));
        assert_eq!(factory.visible(right), [r[0], l[1], r[1]]);
        assert_eq!(factory.active(right), Some(l[1]));
        assert_eq!(factory.owner(l[1]), Some(right));
    }

    #[test]
    fn move_across_without_target_appends() {
        let mut factory = Factory::<()>::default();
        let (left, l) = docs_with(&mut factory, &["A", "B"]);
        let (right, r) = docs_with(&mut factory, &["C", "D"]);

        factory.move_dockable_to(left, right, l[0], None);
        assert_eq!(factory.visible(right), [r[0], r[1], l[0]]);
    }

    #[test]
    fn move_across_into_empty_dock() {
        let mut factory = Factory::<()>::default();
        let (left, l) = docs_with(&mut factory, &["A", "B"]);
        let right = factory.create_document_dock();

        factory.move_dockable_to(left, right, l[0], None);
        assert_eq!(factory.visible(right), [l[0]]);
        assert_eq!(factory.active(right), Some(l[0]));
    }

    #[test]
    fn move_of_foreign_source_is_a_no_op() {
        let mut factory = Factory::<()>::default();
        let (left, _) = docs_with(&mut factory, &["A"]);
        let (right, r) = docs_with(&mut factory, &["B"]);
        let stray = factory.create_document("X", "X");

        factory.move_dockable_to(left, right, stray, None);
        assert_eq!(factory.visible(right), r.as_slice());
        assert_eq!(factory.owner(stray), None);
    }

    fn nested(factory: &mut Factory<()>) -> (DockId, DockId, DockId, DockId) {
        let root = factory.create_root_dock();
        let outer = factory.create_proportional_dock();
        let inner = factory.create_proportional_dock();
        let (docs, ids) = docs_with(factory, &["D"]);
        factory.add_dockable(inner, docs);
        factory.add_dockable(outer, inner);
        factory.add_dockable(root, outer);
        (root, outer, inner, ids[0])
    }

    #[test]
    fn move_into_own_descendant_is_a_no_op() {
        let mut factory = Factory::<()>::default();
        let (root, outer, inner, _) = nested(&mut factory);

        factory.move_dockable_to(root, inner, outer, None);
        factory.move_dockable_to(root, outer, outer, None);

        assert_eq!(factory.visible(root), [outer]);
        assert_eq!(factory.visible(outer), [inner]);
        assert_eq!(factory.owner(outer), Some(root));
        assert!(factory.tree_integrity_issues(root).is_empty());
    }

    #[test]
    fn swap_with_own_descendant_is_a_no_op() {
        let mut factory = Factory::<()>::default();
        let (root, outer, inner, d) = nested(&mut factory);
        let docs = factory.owner(d).unwrap();

        factory.swap_dockable_between(root, docs, outer, d);
        factory.swap_dockable_between(docs, root, d, outer);

        assert_eq!(factory.visible(root), [outer]);
        assert_eq!(factory.visible(docs), [d]);
        assert_eq!(factory.owner(inner), Some(outer));
        assert!(factory.tree_integrity_issues(root).is_empty());
    }

    #[test]
    fn swap_within_keeps_other_positions() {
        let mut factory = Factory::<()>::default();
        let (docs, ids) = docs_with(&mut factory, &["A", "B", "C"]);
        let [a, b, c] = [ids[0], ids[1], ids[2]];

        factory.swap_dockable(docs, a, c);
        assert_eq!(factory.visible(docs), [c, b, a]);
        assert_eq!(factory.active(docs), Some(c));
    }

    #[test]
    fn swap_between_exchanges_owners() {
        let mut factory = Factory::<()>::default();
        let (left, l) = docs_with(&mut factory, &["A", "B"]);
        let (right, r) = docs_with(&mut factory, &["C", "D"]);

        factory.swap_dockable_between(left, right, l[0], r[1]);

        assert_eq!(factory.visible(left), [r[1], l[1]]);
        assert_eq!(factory.visible(right), [r[0], l[0]]);
        assert_eq!(factory.owner(l[0]), Some(right));
        assert_eq!(factory.owner(r[1]), Some(left));
        assert_eq!(factory.active(left), Some(r[1]));
        assert_eq!(factory.active(right), Some(l[0]));
    }

    #[test]
    fn pin_toggles_between_lists() {
        let mut factory = Factory::<()>::default();
        let tools = factory.create_tool_dock();
        let t1 = factory.create_tool("T1", "T1");
        factory.add_dockable(tools, t1);

        factory.pin_dockable(t1);
        assert!(factory.visible(tools).is_empty());
        assert_eq!(factory.pinned(tools), [t1]);
        assert_eq!(factory.owner(t1), Some(tools));

        factory.pin_dockable(t1);
        assert_eq!(factory.visible(tools), [t1]);
        assert!(factory.pinned(tools).is_empty());
    }

    #[test]
    fn pinning_active_tool_reselects_active() {
        let mut factory = Factory::<()>::default();
        let tools = factory.create_tool_dock();
        let t1 = factory.create_tool("T1", "T1");
        let t2 = factory.create_tool("T2", "T2");
        factory.add_dockable(tools, t1);
        factory.add_dockable(tools, t2);
        factory.set_active_dockable(t2);

        factory.pin_dockable(t2);
        assert_eq!(factory.active(tools), Some(t1));
    }

    #[test]
    fn pin_outside_tool_dock_is_a_no_op() {
        let mut factory = Factory::<()>::default();
        let (docs, ids) = docs_with(&mut factory, &["A"]);
        factory.pin_dockable(ids[0]);
        assert_eq!(factory.visible(docs), ids.as_slice());
    }

    #[test]
    fn pin_in_ambiguous_state_is_a_no_op() {
        let mut factory = Factory::<()>::default();
        let tools = factory.create_tool_dock();
        let t1 = factory.create_tool("T1", "T1");
        factory.add_dockable(tools, t1);
        factory
            .get_mut(tools)
            .unwrap()
            .as_tool_dock_mut()
            .unwrap()
            .pinned
            .push(t1);

        factory.pin_dockable(t1);
        assert_eq!(factory.visible(tools), [t1]);
        assert_eq!(factory.pinned(tools), [t1]);
    }
}
