//! Detached path: an ordered sequence of detached objects with label sets.

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::selection::Selection;
use crate::structure::{Iter, MutablePath, Path, PathObject, Step};
use crate::Result;
use super::{factory, Deflated};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct DeflatedStep {
    object: Deflated,
    labels: IndexSet<String>,
}

/// A detached path.
///
/// Elements, properties and nested paths are detached with the path's
/// selection; any other value is carried as-is. Every step owns a fresh
/// label set in the live path's insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeflatedPath {
    steps: Vec<DeflatedStep>,
}

impl DeflatedPath {
    pub fn new(path: &dyn Path, selection: &Selection) -> Result<Self> {
        let mut steps = Vec::new();
        for step in path.steps() {
            steps.push(DeflatedStep {
                object: factory::detach(step.object, selection)?,
                labels: step.labels.iter().map(|l| (*l).to_owned()).collect(),
            });
        }
        tracing::debug!(steps = steps.len(), "detached path");
        Ok(Self { steps })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps in order as `(object, labels)`.
    pub fn iter(&self) -> impl Iterator<Item = (&Deflated, &IndexSet<String>)> + '_ {
        self.steps.iter().map(|step| (&step.object, &step.labels))
    }

    pub fn objects(&self) -> impl Iterator<Item = &Deflated> + '_ {
        self.steps.iter().map(|step| &step.object)
    }

    pub fn object(&self, index: usize) -> Option<&Deflated> {
        self.steps.get(index).map(|step| &step.object)
    }

    pub fn labels(&self, index: usize) -> Option<&IndexSet<String>> {
        self.steps.get(index).map(|step| &step.labels)
    }

    /// Objects of every step carrying `label`, in path order.
    pub fn objects_labeled<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a Deflated> + 'a {
        self.steps
            .iter()
            .filter(move |step| step.labels.contains(label))
            .map(|step| &step.object)
    }

    /// Rebuild a live path.
    ///
    /// `method` maps each detached element or property back to a live
    /// object; values are carried through unchanged and nested paths are
    /// re-attached recursively with the same `method`. Step order and label
    /// sets are preserved.
    pub fn attach<'g, F>(&self, mut method: F) -> Result<MutablePath<'g>>
    where
        F: FnMut(&Deflated) -> Result<PathObject<'g>>,
    {
        self.attach_with(&mut method)
    }

    fn attach_with<'g>(
        &self,
        method: &mut dyn FnMut(&Deflated) -> Result<PathObject<'g>>,
    ) -> Result<MutablePath<'g>> {
        let mut path = MutablePath::new();
        for step in &self.steps {
            let object = match &step.object {
                Deflated::Value(value) => PathObject::Value(value.clone()),
                Deflated::Path(nested) => PathObject::Path(Box::new(nested.attach_with(method)?)),
                attachable => method(attachable)?,
            };
            path.extend(object, step.labels.iter().cloned());
        }
        Ok(path)
    }
}

impl Path for DeflatedPath {
    fn steps(&self) -> Iter<'_, Step<'_>> {
        Box::new(self.steps.iter().map(|step| Step {
            object: step.object.as_graph_object(),
            labels: step.labels.iter().map(String::as_str).collect(),
        }))
    }
}

impl fmt::Display for DeflatedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "path[")?;
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 { write!(f, ", ")?; }
            write!(f, "{}", step.object)?;
        }
        write!(f, "]")
    }
}
