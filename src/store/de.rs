// Lenient field decoders for loosely-shaped documents.
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode the field, or fall back to `T::default()` when it is null or the wrong shape.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

pub fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "1" | "yes"),
        _ => false,
    })
}

/// Team ids show up as numbers (100/200) or numeric strings.
pub fn team_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Accepts a plain string id or Mongo extended JSON (`{"$oid": "..."}`).
pub fn document_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Object(map) => map
            .get("$oid")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_default(),
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "document_id")]
        id: String,
        #[serde(deserialize_with = "team_id")]
        team: Option<i64>,
        #[serde(deserialize_with = "truthy")]
        flag: bool,
    }

    #[test]
    fn decodes_loose_shapes() {
        let probe: Probe =
            serde_json::from_value(json!({"id": 42, "team": 200.0, "flag": "true"})).unwrap();
        assert_eq!(probe.id, "42");
        assert_eq!(probe.team, Some(200));
        assert!(probe.flag);

        let probe: Probe =
            serde_json::from_value(json!({"id": [], "team": "red", "flag": null})).unwrap();
        assert_eq!(probe.id, "");
        assert_eq!(probe.team, None);
        assert!(!probe.flag);
    }
}
