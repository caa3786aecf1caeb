//! Detached scalar property, a leaf key/value pair.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Value;
use crate::structure::{Mutation, Property, PropertyWrite};
use crate::{Error, Result};
use super::element::Keyed;

/// A detached key/value property with no identity and no nested data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeflatedProperty {
    key: String,
    value: Value,
}

impl DeflatedProperty {
    pub fn new(property: &dyn Property) -> Self {
        Self {
            key: property.key(),
            value: property.value(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Keyed for DeflatedProperty {
    fn key(&self) -> &str {
        &self.key
    }
}

impl Property for DeflatedProperty {
    fn key(&self) -> String {
        self.key.clone()
    }

    fn value(&self) -> Value {
        self.value.clone()
    }
}

impl PropertyWrite for DeflatedProperty {
    fn remove(&mut self) -> Result<()> {
        Err(Error::UnsupportedMutation(Mutation::PropertyRemoval))
    }
}

impl fmt::Display for DeflatedProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p[{}->{}]", self.key, self.value)
    }
}
