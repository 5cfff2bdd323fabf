use axum::async_trait;
use reqwest::RequestBuilder;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::{ContentRestriction, DriveApi, DriveError, Item, ItemPage};

pub const ITEM_FIELDS: &str = "id,name,mimeType,trashed,capabilities(canEdit,canModifyEditorContentRestriction),contentRestrictions";
pub const UPDATE_FIELDS: &str = "id,name,contentRestrictions";

#[derive(Deserialize)]
struct ErrorBody
{
    error: ErrorDetail
}

#[derive(Deserialize)]
struct ErrorDetail
{
    message: String
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RestrictionUpdate
{
    content_restrictions: Vec<ContentRestriction>
}

/// [DriveApi] over https with a bearer token
pub struct DriveClient
{
    client: reqwest::Client,
    api_url: String,
    access_token: String
}

impl DriveClient
{
    pub fn new(api_url: &str, access_token: &str) -> DriveClient
    {
        DriveClient
        {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string()
        }
    }

    pub fn api_url(&self) -> String
    {
        self.api_url.clone()
    }

    /// Send with auth, non 2xx statuses become a [DriveError] carrying the
    ///   status and the provider's message when it sent one
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, DriveError>
    {
        let response = match request.bearer_auth(&self.access_token).send().await
        {
            Ok(r) => r,
            Err(e) => return Err(DriveError::new(e.status().map(|s| s.as_u16()), format!("{}", e)))
        };

        let status = response.status();

        if !status.is_success()
        {
            let body = response.text().await.unwrap_or_default();
            let why = match serde_json::from_str::<ErrorBody>(&body)
            {
                Ok(b) => b.error.message,
                Err(_) => body
            };
            return Err(DriveError::new(Some(status.as_u16()), why));
        }

        match response.json::<T>().await
        {
            Ok(t) => Ok(t),
            Err(e) => Err(DriveError::new(None, format!("could not decode response, {}", e)))
        }
    }
}

pub fn children_query(parent_id: &str) -> String
{
    format!("'{}' in parents and trashed = false", parent_id.replace('\'', "\\'"))
}

#[async_trait]
impl DriveApi for DriveClient
{
    async fn get_item(&self, id: &str) -> Result<Item, DriveError>
    {
        crate::debug(format!("GET metadata {}", id), Some("DRIVE"));
        let request = self.client
            .get(format!("{}/files/{}", self.api_url, id))
            .query(&[("fields", ITEM_FIELDS)]);

        self.send(request).await
    }

    async fn list_children(&self, parent_id: &str, page_token: Option<&str>) -> Result<ItemPage, DriveError>
    {
        crate::debug(format!("LIST {} page {:?}", parent_id, page_token), Some("DRIVE"));
        let fields = format!("nextPageToken,files({})", ITEM_FIELDS);
        let mut request = self.client
            .get(format!("{}/files", self.api_url))
            .query(&[("q", children_query(parent_id).as_str()), ("spaces", "drive"), ("fields", fields.as_str())]);

        if let Some(token) = page_token
        {
            request = request.query(&[("pageToken", token)]);
        }

        self.send(request).await
    }

    async fn set_read_only(&self, id: &str, reason: &str) -> Result<Item, DriveError>
    {
        crate::debug(format!("PATCH restrictions {}", id), Some("DRIVE"));
        let body = RestrictionUpdate { content_restrictions: vec![ContentRestriction::read_only(reason)] };
        let request = self.client
            .patch(format!("{}/files/{}", self.api_url, id))
            .query(&[("fields", UPDATE_FIELDS)])
            .json(&body);

        self.send(request).await
    }
}
