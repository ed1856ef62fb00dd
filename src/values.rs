//! Chart value-override assembly
//!
//! Packaged charts are parameterized by override values rather than by
//! editing their templates. This module assembles a flat list of
//! `name`/`value` override parameters into the single nested mapping a
//! chart client expects, serialized as YAML:
//!
//! - a name containing `.` produces nested maps (`image.tag` becomes
//!   `image: {tag: ...}`);
//! - a value wrapped in `[...]` is unwrapped as a JSON array;
//! - maps from all parameters are merged together, later parameters
//!   overwriting earlier ones on conflict.
//!
//! This is a plain, non-streaming merge; it shares nothing with the
//! multi-document pipeline beyond the YAML stack.
//!
//! # Examples
//!
//! ```rust
//! use driftwood::values::{ValueOverride, collect_values};
//!
//! let params = vec![
//!     ValueOverride::new("image.tag", "1.2.3"),
//!     ValueOverride::new("replicas", "2"),
//! ];
//! let yaml = collect_values(&params).unwrap();
//! assert!(yaml.contains("tag: 1.2.3"));
//! ```

use anyhow::{Context, Result, bail};
use regex::Regex;
use serde_yaml::{Mapping, Value};
use tracing::debug;

/// One override parameter for a packaged chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueOverride {
    /// Parameter name; `.` separates nesting levels.
    pub name: String,
    /// Parameter value; `[...]` is treated as a JSON array.
    pub value: String,
}

impl ValueOverride {
    /// Creates an override parameter.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Assembles override parameters into one merged mapping, serialized as
/// YAML suitable for passing to a chart client.
///
/// Parameters with empty names (after trimming) are skipped. With no
/// parameters at all the result is an empty mapping (`{}`).
///
/// # Errors
///
/// Fails when a `[...]` value is not valid JSON array syntax, or when the
/// merged structure cannot be serialized.
pub fn collect_values(params: &[ValueOverride]) -> Result<String> {
    let mut base = Mapping::new();
    if params.is_empty() {
        return serialize(base);
    }

    let array = Regex::new(r"^\[.*\]$").context("compiling array value pattern")?;

    for param in params {
        let name = param.name.trim();
        let value = param.value.trim();
        if name.is_empty() {
            continue;
        }

        let value = if array.is_match(value) {
            unwrap_array(value)?
        } else {
            Value::String(value.to_string())
        };

        merge_values(&mut base, nested_override(name, value));
    }

    debug!(?base, "assembled override parameters");
    serialize(base)
}

/// Merges `src` into `dest` recursively: maps merge with maps, anything
/// else overwrites whatever was there.
pub fn merge_values(dest: &mut Mapping, src: Mapping) {
    for (key, value) in src {
        match value {
            Value::Mapping(incoming) => {
                if let Some(Value::Mapping(existing)) = dest.get_mut(&key) {
                    merge_values(existing, incoming);
                } else {
                    // Missing, or present but not a map: the incoming map
                    // wins either way.
                    dest.insert(key, Value::Mapping(incoming));
                }
            }
            other => {
                dest.insert(key, other);
            }
        }
    }
}

/// Builds the nested single-leaf mapping for one dotted parameter name.
fn nested_override(name: &str, value: Value) -> Mapping {
    let mut map = Mapping::new();
    let mut parts = name.split('.').rev();
    if let Some(leaf) = parts.next() {
        map.insert(Value::String(leaf.to_string()), value);
        for part in parts {
            let mut outer = Mapping::new();
            outer.insert(Value::String(part.to_string()), Value::Mapping(map));
            map = outer;
        }
    }
    map
}

fn unwrap_array(value: &str) -> Result<Value> {
    let json: serde_json::Value = serde_json::from_str(value)
        .with_context(|| format!("parsing array value {value:?}"))?;
    if !json.is_array() {
        bail!("value {value:?} is not an array");
    }
    serde_yaml::to_value(json).context("converting array value to YAML")
}

fn serialize(base: Mapping) -> Result<String> {
    serde_yaml::to_string(&Value::Mapping(base)).context("serializing override values")
}
