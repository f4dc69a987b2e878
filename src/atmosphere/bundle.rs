//! String-keyed parameter bundles for the day and night endpoints.
//!
//! Bundles are what configuration files provide. They are checked against
//! each other and against the known schema once, when the controller is
//! built; after that the controller works on typed [`AtmosphereParams`].
//!
//! [`AtmosphereParams`]: super::params::AtmosphereParams

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// One bundle entry: a scalar or an RGB / direction triple.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Scalar(f32),
    Vector([f32; 3]),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Scalar(_) => ParamKind::Scalar,
            ParamValue::Vector(_) => ParamKind::Vector,
        }
    }
}

/// Shape of a bundle entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    Scalar,
    Vector,
}

impl ParamKind {
    pub fn name(self) -> &'static str {
        match self {
            ParamKind::Scalar => "scalar",
            ParamKind::Vector => "vector",
        }
    }
}

/// Named set of interpolatable values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterBundle {
    values: BTreeMap<String, ParamValue>,
}

impl ParameterBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scalar(mut self, name: &str, value: f32) -> Self {
        self.insert(name, ParamValue::Scalar(value));
        self
    }

    pub fn with_vector(mut self, name: &str, value: [f32; 3]) -> Self {
        self.insert(name, ParamValue::Vector(value));
        self
    }

    pub fn insert(&mut self, name: &str, value: ParamValue) -> Option<ParamValue> {
        self.values.insert(name.to_string(), value)
    }

    pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
        self.values.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Check that two endpoint bundles name the same fields with the same kinds.
pub fn validate_pair(day: &ParameterBundle, night: &ParameterBundle) -> Result<()> {
    let missing_in_night: Vec<String> =
        day.keys().filter(|k| !night.contains(k)).map(str::to_string).collect();
    let missing_in_day: Vec<String> =
        night.keys().filter(|k| !day.contains(k)).map(str::to_string).collect();

    if !missing_in_day.is_empty() || !missing_in_night.is_empty() {
        return Err(Error::BundleMismatch { missing_in_day, missing_in_night });
    }

    for (name, value) in &day.values {
        if let Some(other) = night.values.get(name) {
            if value.kind() != other.kind() {
                return Err(Error::ParameterKind {
                    field: name.clone(),
                    day: value.kind().name(),
                    night: other.kind().name(),
                });
            }
        }
    }
    Ok(())
}
