use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// JSON body used for every non-movie response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ResponseMessage {
    pub message: String,
}

impl ResponseMessage {
    pub fn new(message: impl Into<String>) -> Self {
        ResponseMessage {
            message: message.into(),
        }
    }
}

/// Parses an integer or boolean query flag. Any non-zero integer is true,
/// as are `true`, `yes` and `on`.
pub fn parse_flag(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value != 0);
    }
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" => Some(true),
        "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_flag(value).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "`{}` is not a valid flag, use an integer or true/false",
                value
            ))
        }),
    }
}

/// Treats a blank query value the same as an absent one.
pub fn deserialize_non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|value| !value.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accept_integers_and_booleans() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("no"), Some(false));
        assert_eq!(parse_flag("2"), Some(true));
        assert_eq!(parse_flag("-1"), Some(true));
        assert_eq!(parse_flag("00"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
        assert_eq!(parse_flag("1.5"), None);
    }
}
