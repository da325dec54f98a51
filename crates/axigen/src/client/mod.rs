//! Axigen REST API integration
//!
//! This module provides:
//! - A pluggable HTTP transport (ureq in production)
//! - Session bootstrap and auth headers
//! - The mail operations client

mod client;
mod session;
mod transport;

pub use client::{AttachmentContent, AxigenClient, MailPatch};
pub use session::{SESSION_HEADER, SessionManager};
pub use transport::{
    DEFAULT_TIMEOUT_SECS, HttpRequest, HttpResponse, Method, Transport, UreqTransport,
};

/// Axigen API response types
pub mod api {
    use serde::{Deserialize, Serialize};

    use crate::models::{Folder, Mail, nullable};

    /// Response from `POST /login`
    #[derive(Debug, Clone, Deserialize)]
    pub struct LoginResponse {
        /// New session ID
        pub sessid: String,
    }

    /// Response from `GET /folders`
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct ListFoldersResponse {
        /// Changes whenever the folder list changes
        #[serde(deserialize_with = "nullable")]
        pub sync_token: String,
        #[serde(deserialize_with = "nullable")]
        pub items: Vec<Folder>,
    }

    /// Response from `GET /mails?folderId=`
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct ListMailsResponse {
        #[serde(deserialize_with = "nullable")]
        pub sync_token: String,
        /// Total number of items in the folder
        #[serde(deserialize_with = "nullable")]
        pub total_items: u64,
        #[serde(deserialize_with = "nullable")]
        pub sort_info: SortInfo,
        #[serde(deserialize_with = "nullable")]
        pub items: Vec<Mail>,
    }

    /// Current sorting of a mail listing
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct SortInfo {
        /// subject, from, to, date, size, isUnread, isFlagged, importance,
        /// hasAttachments or folderName
        #[serde(deserialize_with = "nullable")]
        pub field: String,
        #[serde(deserialize_with = "nullable")]
        pub direction: SortDirection,
        /// Row index of the active mail, if one was requested
        #[serde(deserialize_with = "nullable")]
        pub active_row_index: i64,
    }

    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(from = "String", into = "String")]
    pub enum SortDirection {
        Asc,
        #[default]
        Desc,
        Other(String),
    }

    impl From<String> for SortDirection {
        fn from(s: String) -> Self {
            match s.as_str() {
                "ASC" => SortDirection::Asc,
                "DESC" => SortDirection::Desc,
                _ => SortDirection::Other(s),
            }
        }
    }

    impl From<SortDirection> for String {
        fn from(direction: SortDirection) -> Self {
            match direction {
                SortDirection::Asc => "ASC".to_string(),
                SortDirection::Desc => "DESC".to_string(),
                SortDirection::Other(s) => s,
            }
        }
    }

    /// Body of copy and move requests
    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DestinationRequest<'a> {
        pub destination_folder_id: &'a str,
    }
}
