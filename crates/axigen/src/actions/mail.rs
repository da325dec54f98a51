//! Mail actions: copy, move, delete, update, download attachment

use serde::{Deserialize, Deserializer};

use super::{Action, ActionOutput};
use crate::client::MailPatch;
use crate::error::{AxigenError, Result};
use crate::fields::folder_dropdown;
use crate::models::MailId;
use crate::piece::PieceContext;
use crate::props::{DropdownOption, PropertyDef, Props, parse_props};

/// "Do not change" / "yes" / "no" selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TriState {
    #[default]
    Unchanged,
    SetTrue,
    SetFalse,
}

impl TriState {
    /// Wire value used by the dropdown
    pub fn as_str(&self) -> &'static str {
        match self {
            TriState::Unchanged => "",
            TriState::SetTrue => "yes",
            TriState::SetFalse => "no",
        }
    }

    pub fn to_option(self) -> Option<bool> {
        match self {
            TriState::Unchanged => None,
            TriState::SetTrue => Some(true),
            TriState::SetFalse => Some(false),
        }
    }
}

impl<'de> Deserialize<'de> for TriState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        match value.as_deref() {
            None | Some("") => Ok(TriState::Unchanged),
            Some("yes") => Ok(TriState::SetTrue),
            Some("no") => Ok(TriState::SetFalse),
            Some(other) => Err(serde::de::Error::unknown_variant(other, &["", "yes", "no"])),
        }
    }
}

/// Output format of a downloaded attachment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Original,
    Base64,
}

fn mail_id_prop(description: &'static str) -> PropertyDef {
    PropertyDef::short_text("mailId", "Mail ID", description).required()
}

/// Reject blank ids before they turn into a `/mails/` request
fn non_empty_mail_id(raw: String) -> Result<MailId> {
    if raw.trim().is_empty() {
        return Err(AxigenError::InvalidInput("mailId must not be empty".to_string()));
    }
    Ok(MailId::new(raw))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RelocateInput {
    mail_id: String,
    destination_folder_id: String,
}

pub struct CopyMail;

impl Action for CopyMail {
    fn name(&self) -> &'static str {
        "copyMail"
    }

    fn display_name(&self) -> &'static str {
        "Copy Mail"
    }

    fn description(&self) -> &'static str {
        "Copy an email from one folder to another"
    }

    fn props(&self) -> Vec<PropertyDef> {
        vec![
            mail_id_prop("The ID of the mail to copy"),
            folder_dropdown(
                "destinationFolderId",
                "Destination Folder ID",
                "The ID of the folder to copy the mail to",
            ),
        ]
    }

    fn run(&self, ctx: &PieceContext, props: &Props) -> Result<ActionOutput> {
        let input: RelocateInput = parse_props(props)?;
        let mail_id = non_empty_mail_id(input.mail_id)?;
        let mut client = ctx.client()?;
        let mail = client.copy_mail(&mail_id, &input.destination_folder_id)?;
        ActionOutput::json(&mail)
    }
}

pub struct MoveMail;

impl Action for MoveMail {
    fn name(&self) -> &'static str {
        "moveMail"
    }

    fn display_name(&self) -> &'static str {
        "Move Mail"
    }

    fn description(&self) -> &'static str {
        "Move an email from one folder to another"
    }

    fn props(&self) -> Vec<PropertyDef> {
        vec![
            mail_id_prop("The ID of the mail to move"),
            folder_dropdown(
                "destinationFolderId",
                "Destination Folder ID",
                "The ID of the folder to move the mail to",
            ),
        ]
    }

    fn run(&self, ctx: &PieceContext, props: &Props) -> Result<ActionOutput> {
        let input: RelocateInput = parse_props(props)?;
        let mail_id = non_empty_mail_id(input.mail_id)?;
        let mut client = ctx.client()?;
        let mail = client.move_mail(&mail_id, &input.destination_folder_id)?;
        ActionOutput::json(&mail)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteInput {
    mail_id: String,
}

pub struct DeleteMail;

impl Action for DeleteMail {
    fn name(&self) -> &'static str {
        "deleteMail"
    }

    fn display_name(&self) -> &'static str {
        "Delete Mail"
    }

    fn description(&self) -> &'static str {
        "Delete an email"
    }

    fn props(&self) -> Vec<PropertyDef> {
        vec![mail_id_prop("The ID of the mail to delete")]
    }

    fn run(&self, ctx: &PieceContext, props: &Props) -> Result<ActionOutput> {
        let input: DeleteInput = parse_props(props)?;
        let mail_id = non_empty_mail_id(input.mail_id)?;
        let mut client = ctx.client()?;
        let deleted = client.delete_mail(&mail_id)?;
        ActionOutput::json(&deleted)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateInput {
    mail_id: String,
    #[serde(default)]
    read_status: TriState,
    #[serde(default)]
    flagged: TriState,
}

impl UpdateInput {
    /// "Read" means not unread, so the read selector is inverted
    fn patch(&self) -> MailPatch {
        MailPatch::new(
            self.read_status.to_option().map(|read| !read),
            self.flagged.to_option(),
        )
    }
}

fn tri_state_options(yes: &str, no: &str) -> Vec<DropdownOption> {
    vec![
        DropdownOption::new("Do not change", TriState::Unchanged.as_str()),
        DropdownOption::new(yes, TriState::SetTrue.as_str()),
        DropdownOption::new(no, TriState::SetFalse.as_str()),
    ]
}

pub struct UpdateMail;

impl Action for UpdateMail {
    fn name(&self) -> &'static str {
        "updateMail"
    }

    fn display_name(&self) -> &'static str {
        "Update Mail"
    }

    fn description(&self) -> &'static str {
        "Update an email read status and flagging"
    }

    fn props(&self) -> Vec<PropertyDef> {
        vec![
            mail_id_prop("The ID of the mail to update"),
            PropertyDef::static_dropdown(
                "readStatus",
                "Set read status",
                "Set the read status of the mail",
                tri_state_options("Read", "Unread"),
            )
            .required()
            .with_default(""),
            PropertyDef::static_dropdown(
                "flagged",
                "Set flagged status",
                "Set the flagged status of the mail",
                tri_state_options("Flagged", "Not flagged"),
            )
            .required()
            .with_default(""),
        ]
    }

    fn run(&self, ctx: &PieceContext, props: &Props) -> Result<ActionOutput> {
        let input: UpdateInput = parse_props(props)?;
        let patch = input.patch();
        let mail_id = non_empty_mail_id(input.mail_id)?;
        let mut client = ctx.client()?;
        let mail = client.update_mail(&mail_id, patch)?;
        ActionOutput::json(&mail)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DownloadInput {
    mail_id: String,
    attachment_id: u64,
    #[serde(default)]
    output_format: OutputFormat,
}

pub struct DownloadAttachment;

impl Action for DownloadAttachment {
    fn name(&self) -> &'static str {
        "downloadAttachment"
    }

    fn display_name(&self) -> &'static str {
        "Download Attachment"
    }

    fn description(&self) -> &'static str {
        "Download an attachment from an email"
    }

    fn props(&self) -> Vec<PropertyDef> {
        vec![
            mail_id_prop("The ID of the mail to download the attachment from"),
            PropertyDef::number("attachmentId", "Attachment ID", "The ID of the attachment to download").required(),
            PropertyDef::static_dropdown(
                "outputFormat",
                "Output Format",
                "The format of the output",
                vec![
                    DropdownOption::new("Original", "original"),
                    DropdownOption::new("Base64", "base64"),
                ],
            )
            .required()
            .with_default("original"),
        ]
    }

    fn run(&self, ctx: &PieceContext, props: &Props) -> Result<ActionOutput> {
        let input: DownloadInput = parse_props(props)?;
        let mail_id = non_empty_mail_id(input.mail_id)?;
        let mut client = ctx.client()?;
        let content = client.download_attachment(&mail_id, input.attachment_id)?;

        Ok(match input.output_format {
            OutputFormat::Original => ActionOutput::Binary {
                content_type: content.content_type,
                data: content.data,
            },
            OutputFormat::Base64 => ActionOutput::Text(content.to_base64()),
        })
    }
}
