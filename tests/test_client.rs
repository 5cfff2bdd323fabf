mod common;

#[cfg(test)]
mod client
{
    use std::collections::HashMap;

    use axum::{extract::{Path, Query}, http::{HeaderMap, StatusCode}, response::{IntoResponse, Response}, routing::get, Json, Router};
    use drivelock::drive::{client::{children_query, DriveClient}, DriveApi};
    use serde_json::{json, Value};

    use crate::common::serve;

    fn authorised(headers: &HeaderMap) -> bool
    {
        headers.get("authorization").map(|v| v.as_bytes()) == Some("Bearer test-token".as_bytes())
    }

    fn error(status: StatusCode, message: &str) -> Response
    {
        (status, Json(json!({"error": {"code": status.as_u16(), "message": message}}))).into_response()
    }

    async fn get_file(headers: HeaderMap, Path(id): Path<String>, Query(params): Query<HashMap<String, String>>) -> Response
    {
        if !authorised(&headers) { return error(StatusCode::UNAUTHORIZED, "Invalid Credentials") }
        if id == "missing" { return error(StatusCode::NOT_FOUND, "File not found: missing.") }
        assert!(params["fields"].contains("contentRestrictions"));

        Json(json!({
            "id": id,
            "name": "Report.pdf",
            "mimeType": "application/pdf",
            "capabilities": {"canEdit": true, "canModifyEditorContentRestriction": false},
            "contentRestrictions": [{"readOnly": false}]
        })).into_response()
    }

    async fn patch_file(headers: HeaderMap, Path(id): Path<String>, Json(body): Json<Value>) -> Response
    {
        if !authorised(&headers) { return error(StatusCode::UNAUTHORIZED, "Invalid Credentials") }
        match id.as_str()
        {
            "forbidden" => error(StatusCode::FORBIDDEN, "The user does not have sufficient permissions for this file."),
            "bad" => error(StatusCode::BAD_REQUEST, "Invalid value"),
            "garbled" => (StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>").into_response(),
            "ignored" => Json(json!({"id": id, "name": "ignored"})).into_response(),
            _ => Json(json!({"id": id, "name": "locked", "contentRestrictions": body["contentRestrictions"]})).into_response()
        }
    }

    async fn list_files(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Response
    {
        if !authorised(&headers) { return error(StatusCode::UNAUTHORIZED, "Invalid Credentials") }
        if params["q"] != children_query("parent") { return error(StatusCode::BAD_REQUEST, "Invalid query") }
        assert_eq!(params["spaces"], "drive");
        assert!(params["fields"].starts_with("nextPageToken,files("));

        match params.get("pageToken").map(|s| s.as_str())
        {
            None => Json(json!({
                "nextPageToken": "page-2",
                "files": [
                    {"id": "a", "name": "a", "mimeType": "application/vnd.google-apps.folder"},
                    {"id": "b", "name": "b", "mimeType": "application/vnd.google-apps.document", "capabilities": {"canEdit": true}}
                ]
            })).into_response(),
            Some("page-2") => Json(json!({"files": [{"id": "c", "name": "c", "mimeType": "text/plain"}]})).into_response(),
            Some(_) => error(StatusCode::BAD_REQUEST, "Invalid page token")
        }
    }

    async fn drive_server() -> String
    {
        let app = Router::new()
            .route("/files", get(list_files))
            .route("/files/:id", get(get_file).patch(patch_file));
        serve(app).await
    }

    #[tokio::test]
    async fn test_get_item()
    {
        let client = DriveClient::new(&drive_server().await, "test-token");

        let item = client.get_item("xyz").await.unwrap();

        assert_eq!(item.id, "xyz");
        assert_eq!(item.name, "Report.pdf");
        assert_eq!(item.mime_type, "application/pdf");
        assert!(!item.trashed);
        assert!(item.capabilities.can_edit);
        assert!(!item.capabilities.can_modify_editor_content_restriction);
        assert!(!item.is_read_only());
        assert!(!item.is_container());
    }

    #[tokio::test]
    async fn test_get_item_errors()
    {
        let url = drive_server().await;

        let missing = DriveClient::new(&url, "test-token").get_item("missing").await.unwrap_err();
        assert_eq!(missing.status, Some(404));
        assert_eq!(missing.why, "File not found: missing.");

        let unauthorised = DriveClient::new(&url, "wrong").get_item("xyz").await.unwrap_err();
        assert_eq!(unauthorised.status, Some(401));

        let unreachable = DriveClient::new("http://127.0.0.1:1", "test-token").get_item("xyz").await.unwrap_err();
        assert_eq!(unreachable.status, None);
    }

    #[tokio::test]
    async fn test_list_children_pages()
    {
        let client = DriveClient::new(&(drive_server().await + "/"), "test-token");

        let first = client.list_children("parent", None).await.unwrap();
        assert_eq!(first.items.len(), 2);
        assert!(first.items[0].is_container());
        assert!(first.items[1].capabilities.can_edit);
        assert!(!first.items[1].capabilities.can_modify_editor_content_restriction);
        assert_eq!(first.next_page_token, Some("page-2".to_string()));

        let second = client.list_children("parent", first.next_page_token.as_deref()).await.unwrap();
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].id, "c");
        assert_eq!(second.next_page_token, None);

        let other = client.list_children("other", None).await.unwrap_err();
        assert_eq!(other.status, Some(400));
    }

    #[tokio::test]
    async fn test_set_read_only()
    {
        let client = DriveClient::new(&drive_server().await, "test-token");

        let locked = client.set_read_only("ok", "Locked by test").await.unwrap();
        assert!(locked.is_read_only());
        assert_eq!(locked.content_restrictions.len(), 1);
        assert_eq!(locked.content_restrictions[0].reason, Some("Locked by test".to_string()));

        let ignored = client.set_read_only("ignored", "Locked by test").await.unwrap();
        assert!(!ignored.is_read_only());

        let forbidden = client.set_read_only("forbidden", "Locked by test").await.unwrap_err();
        assert_eq!(forbidden.status, Some(403));
        assert!(forbidden.why.contains("sufficient permissions"));

        assert_eq!(client.set_read_only("bad", "r").await.unwrap_err().status, Some(400));

        let garbled = client.set_read_only("garbled", "r").await.unwrap_err();
        assert_eq!(garbled.status, Some(500));
        assert_eq!(garbled.why, "<html>oops</html>");
    }

    #[test]
    fn test_children_query()
    {
        assert_eq!(children_query("abc"), "'abc' in parents and trashed = false");
        assert_eq!(children_query("a'b"), "'a\\'b' in parents and trashed = false");
    }
}
