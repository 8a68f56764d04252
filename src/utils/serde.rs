//! Custom serde helpers shared by request DTOs.

use serde::{Deserialize, Deserializer};

/// Deserialize a string list from either a JSON array or a comma-separated
/// string. Multipart form fields arrive as plain text, so `skills` and
/// `teaching_subjects` may be submitted as `"rust, sql"` instead of
/// `["rust", "sql"]`.
pub fn deserialize_string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrString {
        List(Vec<String>),
        Text(String),
    }

    let value = Option::<ListOrString>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        ListOrString::List(list) => list,
        ListOrString::Text(text) => text
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    }))
}

/// Deserialize `Option<Option<T>>` so a PATCH body can distinguish "field
/// absent" (`None`) from "field set to null" (`Some(None)`), e.g. unassigning
/// a course's faculty.
pub fn deserialize_double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
