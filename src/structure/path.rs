//! Path: an ordered sequence of labelled objects from one traversal result.

use std::fmt;

use crate::model::Value;
use super::{Element, GraphObject, Iter, Path, Property};

/// One step of a path as seen through the `Path` trait.
#[derive(Debug)]
pub struct Step<'a> {
    pub object: GraphObject<'a>,
    /// Step labels in insertion order.
    pub labels: Vec<&'a str>,
}

/// An owned path object. Live graphs hand out views borrowing the graph,
/// hence the lifetime.
pub enum PathObject<'g> {
    Element(Box<dyn Element + 'g>),
    Property(Box<dyn Property + 'g>),
    Path(Box<dyn Path + 'g>),
    Value(Value),
}

impl<'g> PathObject<'g> {
    pub fn as_graph_object(&self) -> GraphObject<'_> {
        match self {
            PathObject::Element(e) => GraphObject::Element(e.as_ref()),
            PathObject::Property(p) => GraphObject::Property(p.as_ref()),
            PathObject::Path(p) => GraphObject::Path(p.as_ref()),
            PathObject::Value(v) => GraphObject::Value(v),
        }
    }
}

impl fmt::Debug for PathObject<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.as_graph_object(), f)
    }
}

impl From<Value> for PathObject<'_> {
    fn from(value: Value) -> Self {
        PathObject::Value(value)
    }
}

/// A growable live path: `extend` appends one step at a time, the way a
/// traversal records where it has been.
#[derive(Debug, Default)]
pub struct MutablePath<'g> {
    steps: Vec<(PathObject<'g>, Vec<String>)>,
}

impl<'g> MutablePath<'g> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step. Duplicate labels are dropped, first occurrence wins.
    pub fn extend<L>(&mut self, object: PathObject<'g>, labels: impl IntoIterator<Item = L>) -> &mut Self
    where
        L: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for label in labels {
            let label = label.into();
            if !unique.contains(&label) {
                unique.push(label);
            }
        }
        self.steps.push((object, unique));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn object(&self, index: usize) -> Option<&PathObject<'g>> {
        self.steps.get(index).map(|(object, _)| object)
    }

    pub fn labels(&self, index: usize) -> Option<&[String]> {
        self.steps.get(index).map(|(_, labels)| labels.as_slice())
    }
}

impl Path for MutablePath<'_> {
    fn steps(&self) -> Iter<'_, Step<'_>> {
        Box::new(self.steps.iter().map(|(object, labels)| Step {
            object: object.as_graph_object(),
            labels: labels.iter().map(String::as_str).collect(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_keeps_order_and_dedups_labels() {
        let mut path = MutablePath::new();
        path.extend(Value::from(1).into(), ["a", "b", "a"])
            .extend(Value::from(2).into(), Vec::<String>::new());

        assert_eq!(path.len(), 2);
        assert_eq!(path.labels(0), Some(&["a".to_string(), "b".to_string()][..]));
        assert!(path.labels(1).is_some_and(|l| l.is_empty()));

        let values: Vec<String> = path
            .steps()
            .map(|step| match step.object {
                GraphObject::Value(v) => v.to_string(),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(values, ["1", "2"]);
    }
}
