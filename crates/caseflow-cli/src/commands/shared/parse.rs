use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse an optional JSON document argument, defaulting to `{}`.
pub fn parse_json_arg(raw: Option<&str>, field: &str) -> anyhow::Result<serde_json::Value> {
    raw.map_or_else(
        || Ok(serde_json::json!({})),
        |raw| {
            serde_json::from_str(raw)
                .map_err(|error| anyhow::anyhow!("invalid {field} JSON: {error}"))
        },
    )
}
