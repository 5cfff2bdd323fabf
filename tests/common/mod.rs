#![allow(dead_code)]

use std::{collections::{HashMap, HashSet}, sync::Mutex};

use axum::{async_trait, Router};
use drivelock::drive::{Capabilities, ContentRestriction, DriveApi, DriveError, Item, ItemPage, FOLDER_MIME_TYPE};

pub const DOCUMENT: &str = "application/vnd.google-apps.document";
pub const SPREADSHEET: &str = "application/vnd.google-apps.spreadsheet";
pub const FORM: &str = "application/vnd.google-apps.form";
pub const PDF: &str = "application/pdf";

pub fn folder(id: &str) -> Item
{
    Item
    {
        id: id.to_string(),
        name: format!("folder {}", id),
        mime_type: FOLDER_MIME_TYPE.to_string(),
        ..Default::default()
    }
}

/// An editable, unrestricted file
pub fn file(id: &str, mime_type: &str) -> Item
{
    Item
    {
        id: id.to_string(),
        name: format!("file {}", id),
        mime_type: mime_type.to_string(),
        trashed: false,
        capabilities: Capabilities { can_edit: true, can_modify_editor_content_restriction: true },
        content_restrictions: vec![]
    }
}

pub fn locked_file(id: &str) -> Item
{
    let mut item = file(id, DOCUMENT);
    item.content_restrictions = vec![ContentRestriction::read_only("already")];
    item
}

pub fn trashed_file(id: &str) -> Item
{
    let mut item = file(id, DOCUMENT);
    item.trashed = true;
    item
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LockBehaviour
{
    Apply,
    Ignore,
    Fail(u16)
}

/// In memory drive, children are paged page_size at a time and
///   trashed children are returned too
pub struct FakeDrive
{
    items: HashMap<String, Item>,
    children: HashMap<String, Vec<String>>,
    page_size: usize,
    failing_pages: HashSet<(String, usize)>,
    lock_behaviour: HashMap<String, LockBehaviour>,
    pub lock_calls: Mutex<Vec<String>>,
    pub list_calls: Mutex<usize>
}

impl FakeDrive
{
    pub fn new(page_size: usize) -> FakeDrive
    {
        FakeDrive
        {
            items: HashMap::new(),
            children: HashMap::new(),
            page_size,
            failing_pages: HashSet::new(),
            lock_behaviour: HashMap::new(),
            lock_calls: Mutex::new(vec![]),
            list_calls: Mutex::new(0)
        }
    }

    pub fn add(&mut self, parent: Option<&str>, item: Item) -> &mut FakeDrive
    {
        if let Some(p) = parent
        {
            self.children.entry(p.to_string()).or_default().push(item.id.clone());
        }
        self.items.insert(item.id.clone(), item);
        self
    }

    /// Link an existing item under another parent as well
    pub fn link(&mut self, parent: &str, id: &str) -> &mut FakeDrive
    {
        self.children.entry(parent.to_string()).or_default().push(id.to_string());
        self
    }

    pub fn fail_page(&mut self, parent: &str, page: usize) -> &mut FakeDrive
    {
        self.failing_pages.insert((parent.to_string(), page));
        self
    }

    pub fn on_lock(&mut self, id: &str, behaviour: LockBehaviour) -> &mut FakeDrive
    {
        self.lock_behaviour.insert(id.to_string(), behaviour);
        self
    }

    pub fn locked_ids(&self) -> Vec<String>
    {
        self.lock_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DriveApi for FakeDrive
{
    async fn get_item(&self, id: &str) -> Result<Item, DriveError>
    {
        match self.items.get(id)
        {
            Some(item) => Ok(item.clone()),
            None => Err(DriveError::new(Some(404), format!("File not found: {}", id)))
        }
    }

    async fn list_children(&self, parent_id: &str, page_token: Option<&str>) -> Result<ItemPage, DriveError>
    {
        *self.list_calls.lock().unwrap() += 1;

        let page: usize = match page_token
        {
            Some(t) => t.parse().unwrap(),
            None => 0
        };

        if self.failing_pages.contains(&(parent_id.to_string(), page))
        {
            return Err(DriveError::new(Some(500), "Internal Error".to_string()))
        }

        let ids = self.children.get(parent_id).cloned().unwrap_or_default();
        let start = page * self.page_size;
        let end = std::cmp::min(start + self.page_size, ids.len());
        let items = ids[start.min(end)..end].iter().map(|id| self.items[id].clone()).collect();

        Ok(ItemPage
        {
            items,
            next_page_token: if end < ids.len() { Some((page + 1).to_string()) } else { None }
        })
    }

    async fn set_read_only(&self, id: &str, reason: &str) -> Result<Item, DriveError>
    {
        self.lock_calls.lock().unwrap().push(id.to_string());

        let mut item = match self.items.get(id)
        {
            Some(i) => i.clone(),
            None => return Err(DriveError::new(Some(404), format!("File not found: {}", id)))
        };

        match self.lock_behaviour.get(id).copied().unwrap_or(LockBehaviour::Apply)
        {
            LockBehaviour::Apply =>
            {
                item.content_restrictions = vec![ContentRestriction::read_only(reason)];
                Ok(item)
            },
            LockBehaviour::Ignore => Ok(item),
            LockBehaviour::Fail(status) => Err(DriveError::new(Some(status), "refused".to_string()))
        }
    }
}

/// Serve app on an ephemeral local port, returns its base url
pub async fn serve(app: Router) -> String
{
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{}", addr)
}
