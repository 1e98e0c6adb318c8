use ahash::HashMap;

use crate::model::{Dockable, HostWindow};

type ContextFn<Ctx> = Box<dyn Fn() -> Ctx>;
type HostWindowFn = Box<dyn Fn() -> Box<dyn HostWindow>>;
type DockableFn<Ctx> = Box<dyn Fn() -> Dockable<Ctx>>;

/// Maps identifiers to the resources the engine resolves while it mutates the tree.
///
/// Design goals:
/// - The embedding application owns the mapping; the engine only consults it.
/// - A missing entry is never fatal: lookups return `None` and the engine carries on.
/// - One registry per [`crate::Factory`], so independent layouts can coexist in one process.
pub struct Locator<Ctx> {
    contexts: HashMap<String, ContextFn<Ctx>>,
    host_windows: HashMap<String, HostWindowFn>,
    dockables: HashMap<String, DockableFn<Ctx>>,
}

impl<Ctx> Default for Locator<Ctx> {
    fn default() -> Self {
        Self {
            contexts: HashMap::default(),
            host_windows: HashMap::default(),
            dockables: HashMap::default(),
        }
    }
}

impl<Ctx> std::fmt::Debug for Locator<Ctx> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut contexts: Vec<&String> = self.contexts.keys().collect();
        contexts.sort();
        let mut host_windows: Vec<&String> = self.host_windows.keys().collect();
        host_windows.sort();
        let mut dockables: Vec<&String> = self.dockables.keys().collect();
        dockables.sort();
        f.debug_struct("Locator")
            .field("contexts", &contexts)
            .field("host_windows", &host_windows)
            .field("dockables", &dockables)
            .finish()
    }
}

impl<Ctx> Locator<Ctx> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_context(&mut self, id: impl Into<String>, f: impl Fn() -> Ctx + 'static) {
        self.contexts.insert(id.into(), Box::new(f));
    }

    pub fn register_host_window(
        &mut self,
        id: impl Into<String>,
        f: impl Fn() -> Box<dyn HostWindow> + 'static,
    ) {
        self.host_windows.insert(id.into(), Box::new(f));
    }

    pub fn register_dockable(
        &mut self,
        id: impl Into<String>,
        f: impl Fn() -> Dockable<Ctx> + 'static,
    ) {
        self.dockables.insert(id.into(), Box::new(f));
    }

    /// Builder-style [`Self::register_context`].
    #[must_use]
    pub fn with_context(mut self, id: impl Into<String>, f: impl Fn() -> Ctx + 'static) -> Self {
        self.register_context(id, f);
        self
    }

    /// Builder-style [`Self::register_host_window`].
    #[must_use]
    pub fn with_host_window(
        mut self,
        id: impl Into<String>,
        f: impl Fn() -> Box<dyn HostWindow> + 'static,
    ) -> Self {
        self.register_host_window(id, f);
        self
    }

    /// Builder-style [`Self::register_dockable`].
    #[must_use]
    pub fn with_dockable(
        mut self,
        id: impl Into<String>,
        f: impl Fn() -> Dockable<Ctx> + 'static,
    ) -> Self {
        self.register_dockable(id, f);
        self
    }

    pub fn resolve_context(&self, id: &str) -> Option<Ctx> {
        lookup(&self.contexts, id, "Context").map(|f| f())
    }

    pub fn resolve_host_window(&self, id: &str) -> Option<Box<dyn HostWindow>> {
        lookup(&self.host_windows, id, "Host window").map(|f| f())
    }

    pub fn resolve_dockable(&self, id: &str) -> Option<Dockable<Ctx>> {
        lookup(&self.dockables, id, "Dockable").map(|f| f())
    }
}

fn lookup<'a, F>(map: &'a HashMap<String, F>, id: &str, what: &str) -> Option<&'a F> {
    let found = if id.is_empty() { None } else { map.get(id) };
    if found.is_none() {
        log::debug!("{what} with provided id={id:?} is not registered.");
    }
    found
}
