//! Axigen mail operations client
//!
//! Every operation makes sure a session exists, then issues exactly one
//! request carrying the Basic and session headers. Nothing is retried;
//! non-2xx responses surface as [`crate::AxigenError::Request`].

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::info;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::api::{DestinationRequest, ListFoldersResponse, ListMailsResponse, LoginResponse};
use super::session::SessionManager;
use super::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::config::AxigenCredentials;
use crate::error::Result;
use crate::models::{Mail, MailId};

/// Partial update of a mail's flags
///
/// `None` means "leave unchanged" and is omitted from the request body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MailPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_unread: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_flagged: Option<bool>,
}

impl MailPatch {
    pub fn new(is_unread: Option<bool>, is_flagged: Option<bool>) -> Self {
        Self {
            is_unread,
            is_flagged,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.is_unread.is_none() && self.is_flagged.is_none()
    }
}

/// Raw attachment bytes as served by the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentContent {
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl AttachmentContent {
    /// Standard base64 (with padding) of the attachment bytes
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }
}

/// Axigen REST API client
///
/// Holds its own session; build one per invocation.
pub struct AxigenClient {
    transport: Arc<dyn Transport>,
    session: SessionManager,
}

impl AxigenClient {
    /// Create a new client with no session yet
    pub fn new(credentials: AxigenCredentials, transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self {
            transport,
            session: SessionManager::new(credentials)?,
        })
    }

    /// Base URL of the REST API (`{server}/api/v1`)
    pub fn base_url(&self) -> &str {
        self.session.base_url()
    }

    /// Basic auth headers, without the session header
    pub fn auth_headers(&self) -> Vec<(String, String)> {
        self.session.auth_headers()
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Log in without caching the session (credential validation)
    pub fn start_session(&self) -> Result<LoginResponse> {
        self.session.start_session(self.transport.as_ref())
    }

    /// Log in now unless a session is already cached
    pub fn ensure_session(&mut self) -> Result<()> {
        self.session.ensure_session(self.transport.as_ref())
    }

    // === Mail operations ===

    /// Copy a mail into another folder
    pub fn copy_mail(&mut self, mail_id: &MailId, destination_folder_id: &str) -> Result<Mail> {
        info!("Copying mail {} to folder {}", mail_id.as_str(), destination_folder_id);
        let body = DestinationRequest {
            destination_folder_id,
        };
        let path = format!("/mails/{}/copy", encode(mail_id.as_str()));
        self.request_json(Method::Post, &path, &[], Some(serde_json::to_value(body)?))
    }

    /// Move a mail into another folder
    pub fn move_mail(&mut self, mail_id: &MailId, destination_folder_id: &str) -> Result<Mail> {
        info!("Moving mail {} to folder {}", mail_id.as_str(), destination_folder_id);
        let body = DestinationRequest {
            destination_folder_id,
        };
        let path = format!("/mails/{}/move", encode(mail_id.as_str()));
        self.request_json(Method::Post, &path, &[], Some(serde_json::to_value(body)?))
    }

    /// Delete a mail
    ///
    /// Returns the server's confirmation record, or `None` when it replies
    /// with an empty body.
    pub fn delete_mail(&mut self, mail_id: &MailId) -> Result<Option<Mail>> {
        info!("Deleting mail {}", mail_id.as_str());
        let path = format!("/mails/{}", encode(mail_id.as_str()));
        let response = self.request(Method::Delete, &path, &[], None)?;
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        Ok(Some(response.json()?))
    }

    /// Change the unread and/or flagged state of a mail
    ///
    /// Only the fields set in `patch` are sent; an empty patch sends `{}`.
    pub fn update_mail(&mut self, mail_id: &MailId, patch: MailPatch) -> Result<Mail> {
        info!("Updating mail {} with {:?}", mail_id.as_str(), patch);
        let path = format!("/mails/{}", encode(mail_id.as_str()));
        self.request_json(Method::Patch, &path, &[], Some(serde_json::to_value(patch)?))
    }

    /// Download the raw bytes of an attachment
    pub fn download_attachment(
        &mut self,
        mail_id: &MailId,
        attachment_id: u64,
    ) -> Result<AttachmentContent> {
        let path = format!(
            "/mails/{}/attachments/{}",
            encode(mail_id.as_str()),
            attachment_id
        );
        let response = self.request(Method::Get, &path, &[], None)?;
        Ok(AttachmentContent {
            content_type: response.content_type,
            data: response.body,
        })
    }

    // === Listing ===

    /// List all folders of the account
    pub fn list_folders(&mut self) -> Result<ListFoldersResponse> {
        self.request_json(Method::Get, "/folders", &[], None)
    }

    /// List the mails of a folder
    pub fn list_mails(&mut self, folder_id: &str) -> Result<ListMailsResponse> {
        self.request_json(Method::Get, "/mails", &[("folderId", folder_id)], None)
    }

    // === Plumbing ===

    fn request_json<T: DeserializeOwned>(
        &mut self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        self.request(method, path, query, body)?.json()
    }

    /// Send one authenticated request, bootstrapping the session first
    fn request(
        &mut self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse> {
        self.ensure_session()?;

        let mut request = HttpRequest::new(method, format!("{}{}", self.base_url(), path))
            .headers(self.session.request_headers());
        for (key, value) in query {
            request = request.query(*key, *value);
        }
        request.body = body;

        self.transport.send(request)?.error_for_status()
    }
}

/// Percent-encode a single path segment
fn encode(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SESSION_HEADER;
    use crate::client::api::SortDirection;
    use crate::error::AxigenError;
    use crate::models::Importance;
    use crate::testing::ScriptedTransport;
    use serde_json::json;

    fn client_with(transport: &Arc<ScriptedTransport>) -> AxigenClient {
        transport.respond(Method::Post, "/login", 200, json!({ "sessid": "sess-1" }));
        let credentials =
            AxigenCredentials::new("https://mail.example.com", "john@example.com", "secret");
        AxigenClient::new(credentials, transport.clone()).unwrap()
    }

    #[test]
    fn test_move_mail_logs_in_then_moves() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(
            Method::Post,
            "/mails/m1/move",
            200,
            json!({ "id": "m1", "folderId": "f2" }),
        );
        let mut client = client_with(&transport);

        let mail = client.move_mail(&MailId::new("m1"), "f2").unwrap();
        assert_eq!(mail.folder_id, "f2");

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, Method::Post);
        assert!(requests[0].url.ends_with("/api/v1/login"));
        assert_eq!(requests[1].url, "https://mail.example.com/api/v1/mails/m1/move");
        assert_eq!(requests[1].body, Some(json!({ "destinationFolderId": "f2" })));
        assert_eq!(requests[1].header_value(SESSION_HEADER), Some("sess-1"));
        assert!(requests[1].header_value("Authorization").is_some());
    }

    #[test]
    fn test_copy_mail_body() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Post, "/mails/m1/copy", 200, json!({ "id": "m9", "folderId": "f3" }));
        let mut client = client_with(&transport);

        let mail = client.copy_mail(&MailId::new("m1"), "f3").unwrap();
        assert_eq!(mail.id.as_str(), "m9");

        let copies = transport.requests_to(Method::Post, "/mails/m1/copy");
        assert_eq!(copies[0].body, Some(json!({ "destinationFolderId": "f3" })));
    }

    #[test]
    fn test_update_mail_sends_only_set_fields() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Patch, "/mails/m1", 200, json!({ "id": "m1" }));
        let mut client = client_with(&transport);
        let id = MailId::new("m1");

        client.update_mail(&id, MailPatch::new(None, None)).unwrap();
        client.update_mail(&id, MailPatch::new(Some(true), None)).unwrap();
        client.update_mail(&id, MailPatch::new(None, Some(false))).unwrap();
        client.update_mail(&id, MailPatch::new(Some(false), Some(true))).unwrap();

        let bodies: Vec<_> = transport
            .requests_to(Method::Patch, "/mails/m1")
            .into_iter()
            .map(|r| r.body.unwrap())
            .collect();
        assert_eq!(
            bodies,
            vec![
                json!({}),
                json!({ "isUnread": true }),
                json!({ "isFlagged": false }),
                json!({ "isUnread": false, "isFlagged": true }),
            ]
        );
        assert_eq!(transport.count(Method::Post, "/login"), 1);
    }

    #[test]
    fn test_delete_mail() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Delete, "/mails/m1", 200, json!({ "id": "m1", "isDeleted": true }));
        transport.respond_bytes(Method::Delete, "/mails/m2", 204, b"", "text/plain");
        let mut client = client_with(&transport);

        let deleted = client.delete_mail(&MailId::new("m1")).unwrap().unwrap();
        assert!(deleted.is_deleted);
        assert!(client.delete_mail(&MailId::new("m2")).unwrap().is_none());
    }

    #[test]
    fn test_download_attachment() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond_bytes(Method::Get, "/mails/m1/attachments/3", 200, b"\x89PNG\r\n", "image/png");
        let mut client = client_with(&transport);

        let content = client.download_attachment(&MailId::new("m1"), 3).unwrap();
        assert_eq!(content.data, b"\x89PNG\r\n".to_vec());
        assert_eq!(content.content_type.as_deref(), Some("image/png"));
        assert_eq!(content.to_base64(), "iVBORw0K");
    }

    #[test]
    fn test_list_mails_uses_folder_query() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(
            Method::Get,
            "/mails",
            200,
            json!({
                "syncToken": "t1",
                "totalItems": 1,
                "sortInfo": { "field": "date", "direction": "DESC", "activeRowIndex": 0 },
                "items": [{ "id": "m1", "folderId": "80_114" }]
            }),
        );
        let mut client = client_with(&transport);

        let list = client.list_mails("80_114").unwrap();
        assert_eq!(list.total_items, 1);
        assert_eq!(list.items[0].id.as_str(), "m1");

        let listing = &transport.requests_to(Method::Get, "/mails")[0];
        assert_eq!(listing.query, vec![("folderId".to_string(), "80_114".to_string())]);
    }

    #[test]
    fn test_listing_bootstraps_session_once() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Get, "/folders", 200, json!({ "syncToken": "s", "items": [] }));
        transport.respond(Method::Get, "/mails", 200, json!({ "items": [] }));
        let mut client = client_with(&transport);

        client.list_folders().unwrap();
        assert_eq!(transport.count(Method::Post, "/login"), 1);
        client.list_mails("f1").unwrap();
        client.list_folders().unwrap();
        assert_eq!(transport.count(Method::Post, "/login"), 1);
    }

    #[test]
    fn test_non_success_is_request_error() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Delete, "/mails/m1", 403, json!({ "error": "forbidden" }));
        let mut client = client_with(&transport);

        let err = client.delete_mail(&MailId::new("m1")).unwrap_err();
        assert!(matches!(err, AxigenError::Request { status: 403, .. }));
        // No retry
        assert_eq!(transport.count(Method::Delete, "/mails/m1"), 1);
    }

    #[test]
    fn test_mail_id_is_path_encoded() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Patch, "/mails/a%2Fb%3D", 200, json!({ "id": "a/b=" }));
        let mut client = client_with(&transport);

        let mail = client
            .update_mail(&MailId::new("a/b="), MailPatch::new(Some(true), None))
            .unwrap();
        assert_eq!(mail.id.as_str(), "a/b=");
    }

    #[test]
    fn test_failed_login_aborts_operation() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Post, "/login", 401, json!({}));
        let credentials = AxigenCredentials::new("https://mail.example.com", "john@example.com", "bad");
        let mut client = AxigenClient::new(credentials, transport.clone()).unwrap();

        let err = client.list_folders().unwrap_err();
        assert!(err.is_authentication());
        assert_eq!(transport.count(Method::Get, "/folders"), 0);
        assert!(client.session().current_token().is_none());
    }

    #[test]
    fn test_move_succeeds_with_unknown_importance() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(
            Method::Post,
            "/mails/m1/move",
            200,
            json!({ "id": "m1", "folderId": "f2", "importance": "urgent" }),
        );
        let mut client = client_with(&transport);

        let mail = client.move_mail(&MailId::new("m1"), "f2").unwrap();
        assert_eq!(mail.folder_id, "f2");
        assert_eq!(mail.importance, Importance::Other("urgent".to_string()));
    }

    #[test]
    fn test_list_mails_tolerates_null_fields() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(
            Method::Get,
            "/mails",
            200,
            json!({
                "syncToken": null,
                "sortInfo": { "field": "date", "direction": "RANDOM" },
                "items": [
                    { "id": "m1", "subject": null, "date": "1744407421" },
                    { "id": "m2", "subject": "ok", "date": "1744407422" }
                ]
            }),
        );
        let mut client = client_with(&transport);

        let list = client.list_mails("inbox").unwrap();
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.items[0].subject, "");
        assert_eq!(list.sort_info.direction, SortDirection::Other("RANDOM".to_string()));
    }

    #[test]
    fn test_copy_keeps_unmodelled_fields() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(
            Method::Post,
            "/mails/m1/copy",
            200,
            json!({ "id": "m2", "folderId": "f9", "threadId": "t-9" }),
        );
        let mut client = client_with(&transport);

        let mail = client.copy_mail(&MailId::new("m1"), "f9").unwrap();
        let value = serde_json::to_value(&mail).unwrap();
        assert_eq!(value["threadId"], "t-9");
    }
}
