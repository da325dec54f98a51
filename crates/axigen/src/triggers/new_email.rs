//! New email trigger
//!
//! Polls one folder and emits every mail whose date is newer than the
//! last poll.

use chrono::DateTime;
use log::warn;
use serde::Deserialize;
use serde_json::{Value, json};

use super::Trigger;
use crate::error::Result;
use crate::fields::folder_dropdown;
use crate::models::Mail;
use crate::piece::PieceContext;
use crate::polling::{self, PolledItem, Polling};
use crate::props::{PropertyDef, Props, parse_props};
use crate::store::KeyValueStore;

/// Digit strings at least this long are already milliseconds
const MILLIS_DIGITS: usize = 13;

/// Convert a mail date to epoch milliseconds
///
/// Accepts Unix seconds or milliseconds as a digit string, RFC 3339 and
/// RFC 2822 dates. Returns `None` for anything else.
pub fn parse_mail_date(date: &str) -> Option<i64> {
    let date = date.trim();
    if date.is_empty() {
        return None;
    }

    if date.bytes().all(|b| b.is_ascii_digit()) {
        let value: i64 = date.parse().ok()?;
        return if date.len() >= MILLIS_DIGITS {
            Some(value)
        } else {
            value.checked_mul(1000)
        };
    }

    DateTime::parse_from_rfc3339(date)
        .or_else(|_| DateTime::parse_from_rfc2822(date))
        .ok()
        .map(|d| d.timestamp_millis())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewEmailInput {
    folder_id: String,
}

/// Mail listing of one folder as polling items
pub struct NewEmailPolling;

impl Polling for NewEmailPolling {
    type Item = Mail;

    fn items(&self, ctx: &PieceContext, props: &Props) -> Result<Vec<PolledItem<Mail>>> {
        let input: NewEmailInput = parse_props(props)?;
        let mut client = ctx.client()?;
        let listing = client.list_mails(&input.folder_id)?;

        let items = listing
            .items
            .into_iter()
            .filter_map(|mail| match parse_mail_date(&mail.date) {
                Some(ms) => Some(PolledItem::new(ms, mail)),
                None => {
                    warn!("Skipping mail {} with unreadable date {:?}", mail.id.as_str(), mail.date);
                    None
                }
            })
            .collect();
        Ok(items)
    }
}

fn to_values(mails: Vec<Mail>) -> Result<Vec<Value>> {
    mails.iter().map(|m| Ok(serde_json::to_value(m)?)).collect()
}

pub struct NewEmailReceived;

impl Trigger for NewEmailReceived {
    fn name(&self) -> &'static str {
        "newEmailReceived"
    }

    fn display_name(&self) -> &'static str {
        "New Email"
    }

    fn description(&self) -> &'static str {
        "Triggers when a new email is received"
    }

    fn props(&self) -> Vec<PropertyDef> {
        vec![folder_dropdown("folderId", "Folder", "The folder to watch for new emails")]
    }

    fn sample_data(&self) -> Value {
        json!({
            "attachments": [
                {
                    "contentId": "Z_BqFTQNcXMyvFveQJahSxKvaW7O8gJEWWzGpWr21Bw=",
                    "contentType": "image/png",
                    "id": 0,
                    "isInline": false,
                    "mailId": "ODBfMTE0XzEzNTQ",
                    "name": "some_image.png",
                    "size": 49331
                }
            ],
            "bcc": "",
            "bimiLocation": "",
            "cc": "",
            "date": "1744407421",
            "folderId": "80_114",
            "from": "Jane Doe <jane.dow@test.com>",
            "hasAttachments": true,
            "id": "ODBfMTE0XzEzNTZ",
            "importance": "normal",
            "isDeleted": false,
            "isDraft": false,
            "isFlagged": false,
            "isItip": false,
            "isUnread": true,
            "labelIds": [],
            "messageId": "<20250411213700.1.b'EEB3DB10AB563856'@mailing.test.com>",
            "originalFolderId": "80_114",
            "originalMailId": "ODBfMTE0XzEzNTZ",
            "refwFlags": "",
            "refwMailId": "",
            "refwType": "",
            "replyTo": "Jane Doe <jane.dow@test.com>",
            "replyToAll": "john.doe@test.com",
            "returnReceipt": false,
            "sender": "",
            "size": 71607,
            "snippet": "Hi there\r\nHow do you do?",
            "subject": "Some test email",
            "to": "john.doe@test.com"
        })
    }

    fn on_enable(&self, _ctx: &PieceContext, _props: &Props, store: &dyn KeyValueStore) -> Result<()> {
        polling::on_enable(store).map(|_| ())
    }

    fn on_disable(&self, _ctx: &PieceContext, _props: &Props, store: &dyn KeyValueStore) -> Result<()> {
        polling::on_disable(store)
    }

    fn run(&self, ctx: &PieceContext, props: &Props, store: &dyn KeyValueStore) -> Result<Vec<Value>> {
        to_values(polling::poll(&NewEmailPolling, ctx, props, store)?)
    }

    fn test(&self, ctx: &PieceContext, props: &Props, _store: &dyn KeyValueStore) -> Result<Vec<Value>> {
        to_values(polling::test(&NewEmailPolling, ctx, props)?)
    }
}
