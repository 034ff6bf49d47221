//! Opaque key-value parameter sets.
//!
//! The host configuration system supplies commit-time configuration through
//! a [`ParamSet`]; this subsystem only reads typed values back out. Sets are
//! serde-serializable so a host can ship them across a process or
//! config-file boundary.

use std::collections::HashMap;

use glam::IVec3;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single named parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    IVec3(IVec3),
    Text(String),
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<IVec3> for ParamValue {
    fn from(v: IVec3) -> Self {
        Self::IVec3(v)
    }
}

impl From<[i32; 3]> for ParamValue {
    fn from(v: [i32; 3]) -> Self {
        Self::IVec3(IVec3::from_array(v))
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// An opaque set of named parameters.
///
/// Typed getters return `None` both when the name is absent and when the
/// stored value has a different type; callers decide whether absence is an
/// error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParamSet {
    values: HashMap<String, ParamValue>,
}

impl ParamSet {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, replacing any prior value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Removes a parameter, returning the prior value if any.
    pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
        self.values.remove(name)
    }

    /// Gets the raw value of a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Gets a boolean parameter.
    #[must_use]
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(ParamValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    /// Gets an integer parameter.
    #[must_use]
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(ParamValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Gets a float parameter.
    #[must_use]
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        match self.values.get(name) {
            Some(ParamValue::Float(v)) => Some(*v),
            _ => None,
        }
    }

    /// Gets an integer-triple parameter.
    #[must_use]
    pub fn get_ivec3(&self, name: &str) -> Option<IVec3> {
        match self.values.get(name) {
            Some(ParamValue::IVec3(v)) => Some(*v),
            _ => None,
        }
    }

    /// Gets a text parameter.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ParamValue::Text(v)) => Some(v),
            _ => None,
        }
    }

    /// Returns whether a parameter with the given name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of parameters in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the set holds no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Serializes the set to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserializes a set from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
