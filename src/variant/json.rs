use super::{Dictionary, Variant};
use serde_json::{Map, Number, Value};

impl Variant {
    /// Builds a variant tree from parsed JSON. Object key order is preserved.
    pub fn from_json(value: &Value) -> Variant {
        match value {
            Value::Null => Variant::Nil,
            Value::Bool(b) => Variant::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(int) => Variant::Int(int),
                None => Variant::Float(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => Variant::String(s.clone()),
            Value::Array(items) => Variant::Array(items.iter().map(Variant::from_json).collect()),
            Value::Object(map) => Variant::Dictionary(
                map.iter().map(|(key, value)| (Variant::String(key.clone()), Variant::from_json(value))).collect(),
            ),
        }
    }

    pub fn parse_json(text: &str) -> anyhow::Result<Variant> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Variant::from_json(&value))
    }

    /// Lossy conversion back to JSON. Kinds without a JSON shape use their display text;
    /// non-finite floats become `null`.
    pub fn to_json(&self) -> Value {
        match self {
            Variant::Nil => Value::Null,
            Variant::Bool(b) => Value::Bool(*b),
            Variant::Int(v) => Value::Number((*v).into()),
            Variant::Float(v) => float_json(*v),
            Variant::String(s) | Variant::StringName(s) => Value::String(s.clone()),
            Variant::Dictionary(dict) => dictionary_json(dict),
            Variant::Array(items) => Value::Array(items.iter().map(Variant::to_json).collect()),
            Variant::PackedByteArray(items) => Value::Array(items.iter().map(|v| Value::from(*v)).collect()),
            Variant::PackedInt32Array(items) => Value::Array(items.iter().map(|v| Value::from(*v)).collect()),
            Variant::PackedInt64Array(items) => Value::Array(items.iter().map(|v| Value::from(*v)).collect()),
            Variant::PackedFloat32Array(items) => Value::Array(items.iter().map(|v| float_json(*v as f64)).collect()),
            Variant::PackedFloat64Array(items) => Value::Array(items.iter().map(|v| float_json(*v)).collect()),
            Variant::PackedStringArray(items) => Value::Array(items.iter().cloned().map(Value::String).collect()),
            other => Value::String(other.to_string()),
        }
    }
}

fn float_json(value: f64) -> Value {
    Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
}

fn dictionary_json(dict: &Dictionary) -> Value {
    let mut map = Map::new();
    for (key, value) in dict.iter() {
        let key = match key {
            Variant::String(s) | Variant::StringName(s) => s.clone(),
            other => other.to_string(),
        };
        map.insert(key, value.to_json());
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lossy_kinds_fall_back_to_text() {
        assert_eq!(Variant::Float(f64::NAN).to_json(), Value::Null);
        assert_eq!(Variant::Vector2(glam::Vec2::new(1.0, 2.0)).to_json(), Value::String("(1, 2)".into()));
        let dict: Dictionary = [(Variant::Int(3), Variant::Bool(true))].into_iter().collect();
        assert_eq!(Variant::Dictionary(dict).to_json(), serde_json::json!({ "3": true }));
    }
}
