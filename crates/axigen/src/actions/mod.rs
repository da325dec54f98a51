//! Connector actions
//!
//! One-shot operations a workflow can run against the mail server: copy,
//! move, delete and update mails, download attachments, and a raw API call
//! passthrough.

mod custom_api_call;
mod mail;

pub use custom_api_call::CustomApiCall;
pub use mail::{CopyMail, DeleteMail, DownloadAttachment, MoveMail, OutputFormat, TriState, UpdateMail};

use serde::Serialize;
use serde_json::{Value, json};

use crate::error::Result;
use crate::piece::PieceContext;
use crate::props::{PropertyDef, Props};

/// Result of an action run
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutput {
    Json(Value),
    Text(String),
    Binary {
        content_type: Option<String>,
        data: Vec<u8>,
    },
}

impl ActionOutput {
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        Ok(ActionOutput::Json(serde_json::to_value(value)?))
    }

    /// JSON view of the output; binary content is summarized, not embedded
    pub fn to_json(&self) -> Value {
        match self {
            ActionOutput::Json(value) => value.clone(),
            ActionOutput::Text(text) => Value::String(text.clone()),
            ActionOutput::Binary { content_type, data } => json!({
                "contentType": content_type,
                "size": data.len(),
            }),
        }
    }
}

/// An operation exposed to the host
pub trait Action: Send + Sync {
    /// Stable identifier used by hosts
    fn name(&self) -> &'static str;
    fn display_name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn props(&self) -> Vec<PropertyDef>;
    fn run(&self, ctx: &PieceContext, props: &Props) -> Result<ActionOutput>;
}

/// All actions, in registration order
pub fn all() -> Vec<Box<dyn Action>> {
    vec![
        Box::new(CopyMail),
        Box::new(DeleteMail),
        Box::new(DownloadAttachment),
        Box::new(MoveMail),
        Box::new(UpdateMail),
        Box::new(CustomApiCall),
    ]
}
