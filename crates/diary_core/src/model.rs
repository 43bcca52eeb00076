use serde::{Deserialize, Deserializer};

/// Account resolved from a profile URL. Immutable once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub host: String,
    pub username: String,
    pub id: String,
}

/// A status as returned by `/api/v1/accounts/{id}/statuses`.
///
/// Only the fields the diary needs are kept; everything else in the
/// server payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RawPost {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    /// Empty when the server sent `null` or a non-string; formatting then
    /// falls back to the invalid-date sentinels for this post only.
    #[serde(default, deserialize_with = "text_or_empty")]
    pub created_at: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub content: String,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub in_reply_to_id: Option<String>,
}

impl RawPost {
    pub fn is_reply(&self) -> bool {
        self.in_reply_to_id
            .as_deref()
            .is_some_and(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryEntry {
    /// `DD/MM/YYYY` in the target zone, or [`crate::INVALID_DATE`].
    pub date: String,
    /// `HH:MM AM/PM` in the target zone, or [`crate::INVALID_TIME`].
    pub time: String,
    pub text: String,
}

/// Unit of formatted output handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    DateHeader(String),
    Divider,
    Entry { time: String, text: String },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Int(i64),
    Uint(u64),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::Str(s) => s,
            StringOrNumber::Int(n) => n.to_string(),
            StringOrNumber::Uint(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrOther {
    Text(String),
    Other(serde::de::IgnoredAny),
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match TextOrOther::deserialize(deserializer)? {
        TextOrOther::Text(text) => text,
        TextOrOther::Other(_) => String::new(),
    })
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?
        .map(String::from)
        .unwrap_or_default())
}

fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(String::from))
}
