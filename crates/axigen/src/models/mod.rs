//! Domain models for Axigen entities

mod folder;
mod mail;
mod watermark;

pub use folder::{AccessMode, Folder, FolderPermission, FolderRole, FolderType};
pub use mail::{Attachment, Importance, Mail, MailId, RefwFlags};
pub(crate) use mail::nullable;
pub use watermark::Watermark;
