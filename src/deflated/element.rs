//! Identity plus filtered property storage shared by every detached element.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::model::ElementId;
use crate::selection::{admits, Component, Selection};
use crate::structure::Element;

/// A captured property that knows its own key.
pub(crate) trait Keyed {
    fn key(&self) -> &str;
}

/// Captured per key; most keys hold exactly one property.
pub(crate) type PropertyList<P> = SmallVec<[P; 1]>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ElementBase<P> {
    pub(crate) id: ElementId,
    pub(crate) label: String,
    #[serde(default = "HashMap::new", skip_serializing_if = "HashMap::is_empty")]
    pub(crate) properties: HashMap<String, PropertyList<P>>,
}

impl<P: Keyed> ElementBase<P> {
    /// Capture identity, and properties when the selection asks for them.
    ///
    /// `fetch` receives the requested keys (empty means all) and yields the
    /// already-detached properties of the live element.
    pub(crate) fn capture<I>(
        element: &dyn Element,
        selection: &Selection,
        fetch: impl FnOnce(&[&str]) -> I,
    ) -> Self
    where
        I: IntoIterator<Item = P>,
    {
        let mut base = Self {
            id: element.id(),
            label: element.label(),
            properties: HashMap::new(),
        };
        if let Some(keys) = selection.keys(Component::Properties) {
            for property in fetch(&keys) {
                if admits(&keys, property.key()) {
                    base.properties
                        .entry(property.key().to_owned())
                        .or_default()
                        .push(property);
                }
            }
        }
        base
    }

    /// Captured properties whose key is in `keys` (all captured when empty).
    ///
    /// Keys that were never captured stay invisible, whatever the live element
    /// held.
    pub(crate) fn properties<'a>(&'a self, keys: &'a [&str]) -> impl Iterator<Item = &'a P> + 'a {
        self.properties
            .iter()
            .filter(move |(key, _)| admits(keys, key))
            .flat_map(|(_, list)| list.iter())
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.properties.keys().map(String::as_str)
    }

    pub(crate) fn property_count(&self) -> usize {
        self.properties.values().map(|list| list.len()).sum()
    }
}
