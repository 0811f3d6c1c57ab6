use anyhow::Context;
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;

/// Unix seconds as a UTC timestamp column value.
pub fn naive_timestamp(seconds: i64) -> anyhow::Result<NaiveDateTime> {
    chrono::DateTime::from_timestamp(seconds, 0)
        .map(|datetime| datetime.naive_utc())
        .with_context(|| format!("Invalid timestamp {seconds}"))
}

/// Postgres text and jsonb columns reject U+0000.
pub fn pg_text(value: &str) -> String {
    value.replace('\0', "")
}

pub fn pg_text_array<'a>(
    values: impl IntoIterator<Item = &'a String>,
) -> Vec<String> {
    values.into_iter().map(|value| pg_text(value)).collect()
}

/// Serializes `value` for a jsonb column, dropping U+0000 from every string
/// and key.
pub fn pg_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<Value> {
    let value = serde_json::to_value(value)?;
    Ok(strip_nul(value))
}

fn strip_nul(value: Value) -> Value {
    match value {
        Value::String(text) => Value::String(pg_text(&text)),
        Value::Array(items) => {
            Value::Array(items.into_iter().map(strip_nul).collect())
        }
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(key, value)| (pg_text(&key), strip_nul(value)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::*;

    #[test]
    fn converts_unix_seconds() {
        let timestamp = naive_timestamp(1_600_000_000).unwrap();
        assert_eq!(timestamp.and_utc().timestamp(), 1_600_000_000);
    }

    #[test]
    fn rejects_out_of_range_seconds() {
        assert!(naive_timestamp(i64::MAX).is_err());
    }

    #[test]
    fn text_drops_nul() {
        assert_eq!(pg_text("hello\0world"), "helloworld");
        assert_eq!(
            pg_text_array(&["iaa1\0a".to_owned(), "iaa1b".to_owned()]),
            vec!["iaa1a".to_owned(), "iaa1b".to_owned()]
        );
    }

    #[test]
    fn json_drops_nul_in_nested_strings_and_keys() {
        let value = BTreeMap::from([(
            "da\0ta",
            vec![json!({ "memo": "a\0b", "amount": 5 })],
        )]);

        assert_eq!(
            pg_json(&value).unwrap(),
            json!({ "data": [{ "memo": "ab", "amount": 5 }] })
        );
    }
}
