use std::collections::{HashSet, VecDeque};

use crate::drive::{DriveApi, DriveError, Item};

/// A container being listed: its buffered page and where to continue
struct Frame
{
    container_id: String,
    pending: VecDeque<Item>,
    page_token: Option<String>,
    listed: bool
}

impl Frame
{
    fn new(container_id: String) -> Frame
    {
        Frame { container_id, pending: VecDeque::new(), page_token: None, listed: false }
    }

    fn has_more_pages(&self) -> bool
    {
        !self.listed || self.page_token.is_some()
    }
}

/// Collect every non-container, non-trashed item under root_id in
///   depth first discovery order. A root that is not a container
///   is returned on its own.
///
/// Only a failure to fetch the root is returned as an error, a failed
///   page ends the listing of that container and keeps what was found.
pub async fn collect_items<D: DriveApi + ?Sized>(drive: &D, root_id: &str) -> Result<Vec<Item>, DriveError>
{
    let root = drive.get_item(root_id).await?;

    if !root.is_container()
    {
        crate::debug(format!("{} is a single {}", root.name, root.mime_type), Some("WALK"));
        return Ok(vec![root]);
    }

    let mut items: Vec<Item> = vec![];
    let mut visited: HashSet<String> = HashSet::from([root.id.clone()]);
    let mut stack: Vec<Frame> = vec![Frame::new(root.id)];

    while let Some(frame) = stack.last_mut()
    {
        if let Some(child) = frame.pending.pop_front()
        {
            if child.trashed
            {
                continue
            }

            if child.is_container()
            {
                if visited.insert(child.id.clone())
                {
                    crate::debug(format!("Descending into folder '{}'", child.name), Some("WALK"));
                    stack.push(Frame::new(child.id));
                }
                else
                {
                    crate::debug(format!("Folder '{}' already visited", child.name), Some("WALK"));
                }
            }
            else
            {
                items.push(child);
            }
            continue
        }

        if !frame.has_more_pages()
        {
            stack.pop();
            continue
        }

        let listed = drive.list_children(&frame.container_id, frame.page_token.as_deref()).await;

        match listed
        {
            Ok(page) =>
            {
                crate::debug(format!("Found {} items in folder {}", page.items.len(), frame.container_id), Some("WALK"));
                frame.listed = true;
                frame.page_token = page.next_page_token;
                frame.pending = page.items.into();
            },
            Err(e) =>
            {
                crate::log(format!("Listing folder {} failed, {}", frame.container_id, e), Some("ERROR"));
                stack.pop();
            }
        }
    }

    Ok(items)
}
