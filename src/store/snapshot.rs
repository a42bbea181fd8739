use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decodes an object snapshot into `(key, record)` pairs in store order.
///
/// Anything that is not an object reads as empty, and entries that fail to
/// decode are skipped, so a half-written or foreign record never aborts a pass.
pub fn records<T>(snapshot: Option<Value>) -> Vec<(String, T)>
where
    T: DeserializeOwned,
{
    match snapshot {
        Some(Value::Object(map)) => map
            .into_iter()
            .filter_map(|(key, value)| match serde_json::from_value::<T>(value) {
                Ok(record) => Some((key, record)),
                Err(e) => {
                    log::warn!("skipping malformed record {}: {}", key, e);
                    None
                }
            })
            .collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            log::warn!("expected object snapshot, found {}", other);
            Vec::new()
        }
    }
}

/// Decodes a single record, treating absence and malformed values alike.
pub fn record<T>(snapshot: Option<Value>) -> Option<T>
where
    T: DeserializeOwned,
{
    snapshot
        .filter(|v| !v.is_null())
        .and_then(|v| serde_json::from_value::<T>(v).inspect_err(|e| log::warn!("{}", e)).ok())
}
