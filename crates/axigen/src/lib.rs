//! Axigen crate - Connector for the Axigen Mail Server REST API
//!
//! This crate provides host-independent connector functionality including:
//! - Domain models (Mail, Folder, Watermark)
//! - Axigen API client with session bootstrap
//! - Actions (copy, move, delete, update, download attachment, raw API call)
//! - Time-based polling trigger for new mails
//! - Key/value store abstractions for trigger state
//! - Folder dropdown and credential validation
//!
//! The HTTP layer sits behind the [`Transport`] trait so hosts and tests can
//! swap it out.

pub mod actions;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod fields;
pub mod models;
pub mod piece;
pub mod polling;
pub mod props;
pub mod store;
pub mod triggers;

#[cfg(test)]
pub(crate) mod testing;

pub use actions::{Action, ActionOutput, OutputFormat, TriState};
pub use auth::{AuthValidation, validate_credentials};
pub use client::{
    AttachmentContent, AxigenClient, HttpRequest, HttpResponse, MailPatch, Method, SessionManager,
    Transport, UreqTransport, api::ListFoldersResponse, api::ListMailsResponse,
};
pub use config::AxigenCredentials;
pub use error::{AxigenError, Result};
pub use models::{Attachment, Folder, Mail, MailId, Watermark};
pub use piece::{OperationInfo, OperationKind, Piece, PieceContext};
pub use polling::{PolledItem, Polling};
pub use props::{DropdownOption, DropdownSource, DropdownState, PropertyDef, PropertyKind, Props};
pub use store::{InMemoryStore, JsonFileStore, KeyValueStore, KeyValueStoreExt};
pub use triggers::Trigger;
