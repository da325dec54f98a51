//! Mail model as returned by the Axigen REST API

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Unique identifier for a mail (opaque server string)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MailId(pub String);

impl MailId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MailId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MailId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// "Importance" header value
///
/// Values the connector does not know are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Importance {
    #[default]
    Normal,
    Low,
    High,
    Other(String),
}

impl From<String> for Importance {
    fn from(s: String) -> Self {
        match s.as_str() {
            "normal" => Importance::Normal,
            "low" => Importance::Low,
            "high" => Importance::High,
            _ => Importance::Other(s),
        }
    }
}

impl From<Importance> for String {
    fn from(importance: Importance) -> Self {
        match importance {
            Importance::Normal => "normal".to_string(),
            Importance::Low => "low".to_string(),
            Importance::High => "high".to_string(),
            Importance::Other(s) => s,
        }
    }
}

/// Replied / forwarded flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RefwFlags {
    #[default]
    None,
    Replied,
    Forwarded,
    RepliedAndForwarded,
    Other(String),
}

impl From<String> for RefwFlags {
    fn from(s: String) -> Self {
        match s.as_str() {
            "" => RefwFlags::None,
            "re" => RefwFlags::Replied,
            "fw" => RefwFlags::Forwarded,
            "refw" => RefwFlags::RepliedAndForwarded,
            _ => RefwFlags::Other(s),
        }
    }
}

impl From<RefwFlags> for String {
    fn from(flags: RefwFlags) -> Self {
        match flags {
            RefwFlags::None => String::new(),
            RefwFlags::Replied => "re".to_string(),
            RefwFlags::Forwarded => "fw".to_string(),
            RefwFlags::RepliedAndForwarded => "refw".to_string(),
            RefwFlags::Other(s) => s,
        }
    }
}

/// An attachment descriptor embedded in a mail record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attachment {
    #[serde(deserialize_with = "nullable")]
    pub id: u64,
    #[serde(deserialize_with = "nullable")]
    pub mail_id: MailId,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub content_type: String,
    /// Size in bytes
    #[serde(deserialize_with = "nullable")]
    pub size: u64,
    /// Set only for parts of multipart/related messages referenced by cid
    #[serde(deserialize_with = "nullable")]
    pub is_inline: bool,
}

/// A mail record
///
/// Owned by the server; the connector only reads it, patches the
/// unread/flagged state or relocates it. Every field defaults when the
/// server omits it or sends `null`, and fields not modelled here are kept
/// in `extra` so the record serializes back with them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Mail {
    #[serde(deserialize_with = "nullable")]
    pub id: MailId,
    #[serde(deserialize_with = "nullable")]
    pub folder_id: String,
    /// Size in bytes
    #[serde(deserialize_with = "nullable")]
    pub size: u64,
    #[serde(deserialize_with = "nullable")]
    pub from: String,
    #[serde(deserialize_with = "nullable")]
    pub to: String,
    #[serde(deserialize_with = "nullable")]
    pub cc: String,
    #[serde(deserialize_with = "nullable")]
    pub bcc: String,
    /// Reply-To header if present, otherwise From
    #[serde(deserialize_with = "nullable")]
    pub reply_to: String,
    /// Merged To and Cc headers
    #[serde(deserialize_with = "nullable")]
    pub reply_to_all: String,
    #[serde(deserialize_with = "nullable")]
    pub sender: String,
    #[serde(deserialize_with = "nullable")]
    pub message_id: String,
    #[serde(deserialize_with = "nullable")]
    pub subject: String,
    #[serde(deserialize_with = "nullable")]
    pub snippet: String,
    /// Internal server date (UTC), usually Unix seconds
    #[serde(deserialize_with = "string_or_number")]
    pub date: String,
    #[serde(deserialize_with = "nullable")]
    pub is_unread: bool,
    #[serde(deserialize_with = "nullable")]
    pub is_flagged: bool,
    #[serde(deserialize_with = "nullable")]
    pub is_draft: bool,
    #[serde(deserialize_with = "nullable")]
    pub refw_flags: RefwFlags,
    /// Drafts only. "refw" is never valid here.
    #[serde(deserialize_with = "nullable")]
    pub refw_type: RefwFlags,
    #[serde(deserialize_with = "nullable")]
    pub refw_mail_id: String,
    /// Set by IMAP clients until the folder is expunged
    #[serde(deserialize_with = "nullable")]
    pub is_deleted: bool,
    #[serde(deserialize_with = "nullable")]
    pub has_attachments: bool,
    #[serde(deserialize_with = "nullable")]
    pub is_itip: bool,
    #[serde(deserialize_with = "nullable")]
    pub return_receipt: bool,
    #[serde(deserialize_with = "nullable")]
    pub importance: Importance,
    #[serde(deserialize_with = "nullable")]
    pub original_folder_id: String,
    #[serde(deserialize_with = "nullable")]
    pub original_mail_id: String,
    #[serde(deserialize_with = "nullable")]
    pub attachments: Vec<Attachment>,
    #[serde(deserialize_with = "nullable")]
    pub label_ids: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub bimi_location: String,
    /// Server fields without a typed counterpart
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Treat `null` like a missing field
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept `"1744407421"`, `1744407421` or `null` for string fields
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_record() {
        let mail: Mail = serde_json::from_value(json!({
            "id": "ODBfMTE0XzEzNTZ",
            "folderId": "80_114",
            "subject": "Some test email",
            "date": "1744407421",
            "isUnread": true,
            "hasAttachments": true,
            "importance": "high",
            "refwFlags": "refw",
            "attachments": [{
                "id": 0,
                "mailId": "ODBfMTE0XzEzNTZ",
                "name": "some_image.png",
                "contentType": "image/png",
                "size": 49331,
                "isInline": false
            }]
        }))
        .unwrap();

        assert_eq!(mail.id.as_str(), "ODBfMTE0XzEzNTZ");
        assert_eq!(mail.folder_id, "80_114");
        assert_eq!(mail.date, "1744407421");
        assert!(mail.is_unread);
        assert!(!mail.is_flagged);
        assert_eq!(mail.importance, Importance::High);
        assert_eq!(mail.refw_flags, RefwFlags::RepliedAndForwarded);
        assert_eq!(mail.attachments.len(), 1);
        assert_eq!(mail.attachments[0].content_id, None);
    }

    #[test]
    fn test_numeric_date() {
        let mail: Mail = serde_json::from_value(json!({ "id": "m1", "date": 1744407421 })).unwrap();
        assert_eq!(mail.date, "1744407421");
    }

    #[test]
    fn test_empty_refw_flags_serialize_as_empty_string() {
        let mail = Mail::default();
        let value = serde_json::to_value(&mail).unwrap();
        assert_eq!(value["refwFlags"], "");
        assert_eq!(value["importance"], "normal");
        assert_eq!(value["folderId"], "");
    }

    #[test]
    fn test_unknown_enum_values_are_kept() {
        let mail: Mail = serde_json::from_value(json!({
            "id": "m1",
            "importance": "urgent",
            "refwFlags": "bounced"
        }))
        .unwrap();
        assert_eq!(mail.importance, Importance::Other("urgent".to_string()));
        assert_eq!(mail.refw_flags, RefwFlags::Other("bounced".to_string()));

        let value = serde_json::to_value(&mail).unwrap();
        assert_eq!(value["importance"], "urgent");
        assert_eq!(value["refwFlags"], "bounced");
    }

    #[test]
    fn test_null_fields_default() {
        let mail: Mail = serde_json::from_value(json!({
            "id": "m1",
            "subject": null,
            "size": null,
            "isUnread": null,
            "importance": null,
            "attachments": null,
            "date": null
        }))
        .unwrap();
        assert_eq!(mail.subject, "");
        assert_eq!(mail.size, 0);
        assert!(!mail.is_unread);
        assert_eq!(mail.importance, Importance::Normal);
        assert!(mail.attachments.is_empty());
        assert!(mail.extra.is_empty());
    }

    #[test]
    fn test_unmodelled_fields_survive_round_trip() {
        let mail: Mail = serde_json::from_value(json!({
            "id": "m1",
            "folderId": "f2",
            "threadId": "t-9",
            "headers": { "x-priority": "1" }
        }))
        .unwrap();
        assert_eq!(mail.extra.get("threadId"), Some(&json!("t-9")));

        let value = serde_json::to_value(&mail).unwrap();
        assert_eq!(value["threadId"], "t-9");
        assert_eq!(value["headers"]["x-priority"], "1");
        assert_eq!(value["folderId"], "f2");
    }
}
