//! Attribute-driven configuration overrides.
//!
//! Widgets carry compiled-in defaults. A host page can override any subset of
//! fields with a JSON object stored in a `data-*` attribute; the object is
//! merged field by field over the defaults before deserializing.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{WidgetError, WidgetResult};

/// Merge a JSON object of overrides onto `base`.
///
/// Unknown keys are rejected so typos in markup do not pass silently.
pub fn apply_overrides<T>(base: &T, overrides: &str) -> WidgetResult<T>
where
    T: Serialize + DeserializeOwned,
{
    let mut merged = serde_json::to_value(base)?;
    let patch: Value = serde_json::from_str(overrides)?;

    let (Value::Object(target), Value::Object(patch)) = (&mut merged, patch) else {
        return Err(WidgetError::Config(
            "overrides must be a JSON object".to_string(),
        ));
    };

    for (key, value) in patch {
        if !target.contains_key(&key) {
            return Err(WidgetError::Config(format!("unknown field `{}`", key)));
        }
        target.insert(key, value);
    }

    Ok(serde_json::from_value(merged)?)
}
