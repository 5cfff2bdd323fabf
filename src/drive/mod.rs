//! Google Drive v3 items and the calls drivelock makes on them

use core::fmt;

use axum::async_trait;
use serde::{Deserialize, Serialize};

pub mod client;
pub mod url;

pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

#[derive(Debug, Clone)]
pub struct DriveError
{
    pub status: Option<u16>,
    pub why: String
}

impl DriveError
{
    pub fn new(status: Option<u16>, why: String) -> DriveError
    {
        DriveError { status, why }
    }
}

impl fmt::Display for DriveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.status
        {
            Some(s) => write!(f, "HTTP {}, {}", s, self.why),
            None => write!(f, "{}", self.why)
        }
    }
}

/// Permissions of the current credential on an [Item]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities
{
    #[serde(default)]
    pub can_edit: bool,
    #[serde(default)]
    pub can_modify_editor_content_restriction: bool
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRestriction
{
    #[serde(default)]
    pub read_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>
}

impl ContentRestriction
{
    pub fn read_only(reason: &str) -> ContentRestriction
    {
        ContentRestriction { read_only: true, reason: Some(reason.to_string()) }
    }
}

/// A file or folder as returned by the Drive API, missing
///   flags deserialise as false and missing lists as empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item
{
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub trashed: bool,
    #[serde(default)]
    pub capabilities: Capabilities,
    #[serde(default)]
    pub content_restrictions: Vec<ContentRestriction>
}

impl Item
{
    pub fn is_container(&self) -> bool
    {
        self.mime_type == FOLDER_MIME_TYPE
    }

    pub fn is_read_only(&self) -> bool
    {
        self.content_restrictions.iter().any(|r| r.read_only)
    }
}

/// One page of a children listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPage
{
    #[serde(default, rename = "files")]
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>
}

/// The three Drive operations drivelock needs, see [client::DriveClient]
#[async_trait]
pub trait DriveApi
{
    /// Metadata of a single item
    async fn get_item(&self, id: &str) -> Result<Item, DriveError>;
    /// A page of non-trashed children of parent_id
    async fn list_children(&self, parent_id: &str, page_token: Option<&str>) -> Result<ItemPage, DriveError>;
    /// Replace the content restrictions of id with one read-only restriction,
    ///   returns the item as updated by the provider
    async fn set_read_only(&self, id: &str, reason: &str) -> Result<Item, DriveError>;
}
