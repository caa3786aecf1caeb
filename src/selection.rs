//! Selection: which components of an element a detachment captures.
//!
//! Three components exist: `properties`, `outE` and `inE`. Each one is
//! either absent (never captured), present with an empty key set (capture
//! everything), or present with named keys (property keys for `properties`,
//! edge labels for `outE` / `inE`).
//!
//! ```text
//! {}                                   → identity only
//! {"properties": []}                   → every property
//! {"properties": ["name"], "outE": []} → `name` plus every outgoing edge
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A selectable component of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Component {
    Properties,
    OutEdges,
    InEdges,
}

impl Component {
    pub const ALL: [Component; 3] = [Component::Properties, Component::OutEdges, Component::InEdges];

    /// The fixed wire name of the component.
    pub fn name(self) -> &'static str {
        match self {
            Component::Properties => "properties",
            Component::OutEdges => "outE",
            Component::InEdges => "inE",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Component {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Component::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| Error::InvalidSelection(format!(
                "unknown component '{s}', expected one of properties, outE, inE"
            )))
    }
}

/// Caller-supplied selection of components and sub-keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Selection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    properties: Option<BTreeSet<String>>,
    #[serde(rename = "outE", default, skip_serializing_if = "Option::is_none")]
    out_edges: Option<BTreeSet<String>>,
    #[serde(rename = "inE", default, skip_serializing_if = "Option::is_none")]
    in_edges: Option<BTreeSet<String>>,
}

impl Selection {
    /// Nothing selected: detached copies carry identity only.
    pub fn none() -> Self {
        Self::default()
    }

    /// Every component, every key.
    pub fn all() -> Self {
        Self {
            properties: Some(BTreeSet::new()),
            out_edges: Some(BTreeSet::new()),
            in_edges: Some(BTreeSet::new()),
        }
    }

    /// Build from `(component name, keys)` pairs. Repeated components merge
    /// their keys.
    pub fn from_components<N, K, I>(components: impl IntoIterator<Item = (N, I)>) -> Result<Self>
    where
        N: AsRef<str>,
        K: Into<String>,
        I: IntoIterator<Item = K>,
    {
        let mut selection = Self::none();
        for (name, keys) in components {
            let component: Component = name.as_ref().parse()?;
            let slot = selection.slot_mut(component).get_or_insert_with(BTreeSet::new);
            slot.extend(keys.into_iter().map(Into::into));
        }
        Ok(selection)
    }

    /// Parse the JSON form, e.g. `{"properties": ["name"], "outE": []}`.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidSelection(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Select `component`, restricted to `keys` (empty means all).
    pub fn with<K: Into<String>>(mut self, component: Component, keys: impl IntoIterator<Item = K>) -> Self {
        *self.slot_mut(component) = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_properties<K: Into<String>>(self, keys: impl IntoIterator<Item = K>) -> Self {
        self.with(Component::Properties, keys)
    }

    pub fn with_out_edges<K: Into<String>>(self, labels: impl IntoIterator<Item = K>) -> Self {
        self.with(Component::OutEdges, labels)
    }

    pub fn with_in_edges<K: Into<String>>(self, labels: impl IntoIterator<Item = K>) -> Self {
        self.with(Component::InEdges, labels)
    }

    /// The key set of `component`, `None` when it is not selected.
    pub fn get(&self, component: Component) -> Option<&BTreeSet<String>> {
        match component {
            Component::Properties => self.properties.as_ref(),
            Component::OutEdges => self.out_edges.as_ref(),
            Component::InEdges => self.in_edges.as_ref(),
        }
    }

    pub fn includes(&self, component: Component) -> bool {
        self.get(component).is_some()
    }

    pub fn is_empty(&self) -> bool {
        Component::ALL.into_iter().all(|c| !self.includes(c))
    }

    /// Keys of `component` as a slice-ready list; empty means all.
    pub(crate) fn keys(&self, component: Component) -> Option<Vec<&str>> {
        self.get(component).map(|keys| keys.iter().map(String::as_str).collect())
    }

    fn slot_mut(&mut self, component: Component) -> &mut Option<BTreeSet<String>> {
        match component {
            Component::Properties => &mut self.properties,
            Component::OutEdges => &mut self.out_edges,
            Component::InEdges => &mut self.in_edges,
        }
    }
}

/// Whether `key` passes a key filter where an empty filter admits everything.
pub(crate) fn admits(keys: &[&str], key: &str) -> bool {
    keys.is_empty() || keys.contains(&key)
}
