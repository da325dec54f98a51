//! Folder model as returned by the Axigen REST API

use serde::{Deserialize, Serialize};

/// Special role of a folder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderRole {
    #[default]
    #[serde(rename = "")]
    None,
    Inbox,
    Drafts,
    Sent,
    Trash,
    Junk,
    Archive,
    Filtered,
    #[serde(other)]
    Other,
}

/// Type of items a folder contains
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderType {
    #[default]
    Mails,
    Events,
    Tasks,
    Notes,
    Contacts,
    PublicContainer,
    SharedNamespace,
    SharedContainer,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    #[default]
    Local,
    Public,
    Shared,
    #[serde(other)]
    Other,
}

/// Folder ACL right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FolderPermission {
    /// Folder is visible in lists
    #[serde(rename = "l")]
    Lookup,
    /// Folder can be loaded
    #[serde(rename = "r")]
    Read,
    /// Items can be marked as seen / unseen
    #[serde(rename = "s")]
    Seen,
    /// Flags other than seen and deleted can be changed
    #[serde(rename = "w")]
    WriteFlags,
    #[serde(rename = "i")]
    Insert,
    #[serde(rename = "k")]
    CreateSubfolder,
    #[serde(rename = "x")]
    DeleteFolder,
    #[serde(rename = "t")]
    MarkDeleted,
    #[serde(rename = "e")]
    Expunge,
    #[serde(rename = "a")]
    Administer,
    #[serde(other)]
    Unknown,
}

/// A mail server folder
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub parent_id: String,
    pub role: FolderRole,
    pub owner_username: String,
    pub owner_fullname: String,
    /// Size in bytes
    pub folder_size: u64,
    pub folder_type: FolderType,
    pub access_mode: AccessMode,
    pub total_items: u64,
    pub unread_items: u64,
    pub permissions: Vec<FolderPermission>,
}

impl Folder {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_role(mut self, role: FolderRole) -> Self {
        self.role = role;
        self
    }

    pub fn can(&self, permission: FolderPermission) -> bool {
        self.permissions.contains(&permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_folder() {
        let folder: Folder = serde_json::from_value(json!({
            "id": "80_114",
            "name": "Inbox",
            "parentId": "",
            "role": "inbox",
            "folderType": "mails",
            "accessMode": "local",
            "totalItems": 12,
            "unreadItems": 3,
            "permissions": ["l", "r", "s", "w"]
        }))
        .unwrap();

        assert_eq!(folder.role, FolderRole::Inbox);
        assert_eq!(folder.unread_items, 3);
        assert!(folder.can(FolderPermission::Seen));
        assert!(!folder.can(FolderPermission::Expunge));
    }

    #[test]
    fn test_unknown_values_are_tolerated() {
        let folder: Folder = serde_json::from_value(json!({
            "id": "1",
            "name": "Odd",
            "role": "scheduled",
            "folderType": "journal",
            "permissions": ["z"]
        }))
        .unwrap();

        assert_eq!(folder.role, FolderRole::Other);
        assert_eq!(folder.folder_type, FolderType::Other);
        assert_eq!(folder.permissions, vec![FolderPermission::Unknown]);
    }

    #[test]
    fn test_empty_role() {
        let folder: Folder = serde_json::from_value(json!({ "id": "2", "role": "" })).unwrap();
        assert_eq!(folder.role, FolderRole::None);
    }
}
