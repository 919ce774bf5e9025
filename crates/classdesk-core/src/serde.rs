use serde::{Deserialize, Deserializer};

/// Trims an optional string and treats a blank value the same as a missing one.
pub fn deserialize_optional_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Accepts a small integer sent either as a JSON number or as a numeric string
/// (HTML select inputs post `"2"` rather than `2`). Blank strings become `None`.
pub fn deserialize_optional_lenient_u8<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u8),
        Text(String),
    }

    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::Text(s)) => s
            .trim()
            .parse::<u8>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
        name: Option<String>,
        #[serde(default, deserialize_with = "deserialize_optional_lenient_u8")]
        year: Option<u8>,
    }

    #[test]
    fn test_trimmed_blank_is_none() {
        let sample: Sample = serde_json::from_str(r#"{"name":"   "}"#).unwrap();
        assert_eq!(sample.name, None);

        let sample: Sample = serde_json::from_str(r#"{"name":"  jdoe "}"#).unwrap();
        assert_eq!(sample.name.as_deref(), Some("jdoe"));
    }

    #[test]
    fn test_lenient_u8_accepts_number_and_string() {
        let sample: Sample = serde_json::from_str(r#"{"year":3}"#).unwrap();
        assert_eq!(sample.year, Some(3));

        let sample: Sample = serde_json::from_str(r#"{"year":"2"}"#).unwrap();
        assert_eq!(sample.year, Some(2));

        let sample: Sample = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(sample.year, None);
    }

    #[test]
    fn test_lenient_u8_rejects_garbage() {
        assert!(serde_json::from_str::<Sample>(r#"{"year":"second"}"#).is_err());
    }
}
