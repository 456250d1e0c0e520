//! Component auto-registration.
//!
//! Turns file-path keyed component tables into named registrations:
//! `components/Button.vue` with prefix `"I"` registers as `IButton`.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::collections::BTreeMap;

/// Anything that accepts named components.
pub trait ComponentHost<C> {
    fn register_component(&mut self, name: String, component: C);
}

/// Components keyed by source path, registered under `prefix`.
#[derive(Clone, Debug)]
pub struct ComponentPattern<C> {
    pub files: BTreeMap<String, C>,
    pub prefix: String,
}

impl<C> ComponentPattern<C> {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { files: BTreeMap::new(), prefix: prefix.into() }
    }

    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, component: C) -> Self {
        self.files.insert(path.into(), component);
        self
    }
}

/// Registration name for `path`: basename, last extension dropped, prefixed.
/// `None` when nothing is left of the basename.
#[must_use]
pub fn component_name(path: &str, prefix: &str) -> Option<String> {
    let base = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let stem = match base.rsplit_once('.') {
        Some((stem, _ext)) => stem,
        None => base,
    };
    if stem.is_empty() {
        return None;
    }
    Some(format!("{prefix}{stem}"))
}

/// Installer over a list of patterns.
#[derive(Clone, Debug)]
pub struct AutoComponent<C> {
    patterns: Vec<ComponentPattern<C>>,
}

impl<C: Clone> AutoComponent<C> {
    pub fn new(patterns: impl IntoIterator<Item = ComponentPattern<C>>) -> Self {
        Self { patterns: patterns.into_iter().collect() }
    }

    /// Register every named component on `host`. Returns how many were registered.
    pub fn install(&self, host: &mut impl ComponentHost<C>) -> usize {
        let mut count = 0;
        for pattern in &self.patterns {
            for (path, component) in &pattern.files {
                let Some(name) = component_name(path, &pattern.prefix) else {
                    continue;
                };
                host.register_component(name, component.clone());
                count += 1;
            }
        }
        count
    }
}

/// Name-to-component table implementing `ComponentHost`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentRegistry<C> {
    components: BTreeMap<String, C>,
}

impl<C> Default for ComponentRegistry<C> {
    fn default() -> Self {
        Self { components: BTreeMap::new() }
    }
}

impl<C> ComponentRegistry<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&C> {
        self.components.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl<C> ComponentHost<C> for ComponentRegistry<C> {
    fn register_component(&mut self, name: String, component: C) {
        self.components.insert(name, component);
    }
}
