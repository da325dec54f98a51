//! Shared field declarations

use log::warn;
use std::sync::Arc;

use crate::client::{AxigenClient, Transport};
use crate::config::AxigenCredentials;
use crate::props::{DropdownOption, DropdownSource, DropdownState, PropertyDef};

pub const AUTHENTICATE_FIRST: &str = "Please authenticate first";
pub const FOLDERS_UNAVAILABLE: &str = "Error fetching folders. Please check credentials.";

/// Required folder picker filled from the account's folders
pub fn folder_dropdown(name: &'static str, display_name: &'static str, description: &'static str) -> PropertyDef {
    PropertyDef::dropdown(name, display_name, description, DropdownSource::Folders).required()
}

/// List folders as dropdown options
///
/// Any failure degrades to a disabled, empty dropdown.
pub fn folder_options(credentials: Option<&AxigenCredentials>, transport: Arc<dyn Transport>) -> DropdownState {
    let Some(credentials) = credentials else {
        return DropdownState::unavailable(AUTHENTICATE_FIRST);
    };

    let folders = AxigenClient::new(credentials.clone(), transport).and_then(|mut client| client.list_folders());

    match folders {
        Ok(list) => DropdownState::ready(
            list.items
                .into_iter()
                .map(|folder| DropdownOption::new(folder.name, folder.id))
                .collect(),
        ),
        Err(e) => {
            warn!("Error listing folders: {}", e);
            DropdownState::unavailable(FOLDERS_UNAVAILABLE)
        }
    }
}
