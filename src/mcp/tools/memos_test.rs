//! Tests for memo MCP tools

use serde_json::json;

use crate::mcp::tools::memos::*;
use crate::memos::MemosError;
use crate::memos::test_support::FakeMemos;

const MEMO_JSON: &str = r#"{"name":"memos/abc","uid":"abc","creator":"users/1","content":"hello","visibility":"PUBLIC","pinned":true,"tags":["work"],"createTime":"2025-01-01T00:00:00Z"}"#;

#[test]
fn test_search_params_decode_float_numbers() {
    let params: SearchMemosParams =
        serde_json::from_value(json!({"creator_id": 7.0, "limit": 5.0, "offset": 10})).unwrap();
    assert_eq!(params.creator_id, Some(7));
    assert_eq!(params.limit, Some(5));
    assert_eq!(params.offset, Some(10));
    assert_eq!(params.show_deleted, None);
}

#[test]
fn test_memo_summary_omits_empty_fields() {
    let summary = MemoSummary {
        uid: "abc".to_string(),
        ..Default::default()
    };
    assert_eq!(
        serde_json::to_value(&summary).unwrap(),
        json!({"uid": "abc", "pinned": false})
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_memos_reports_count_and_token() {
    let server = FakeMemos::ok(&format!(
        r#"{{"memos":[{MEMO_JSON},{MEMO_JSON}],"nextPageToken":"offset=12"}}"#
    ))
    .await;

    let result = search_memos(
        &server.client(),
        SearchMemosParams {
            tag: Some("work".to_string()),
            limit: Some(2),
            offset: Some(10),
            page_token: Some("explicit".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(result.count, 2);
    assert_eq!(result.memos[0].uid, "abc");
    assert_eq!(result.memos[0].tags, vec!["work".to_string()]);
    assert_eq!(result.next_page_token.as_deref(), Some("offset=12"));

    let request = server.single_request();
    assert_eq!(request.query_param("pageToken"), Some("explicit"));
    assert_eq!(request.query_param("pageSize"), Some("2"));
    assert_eq!(request.query_param("filter"), Some(r#"tag in ["work"]"#));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_memos_empty_result_serializes_without_token() {
    let server = FakeMemos::ok(r#"{"memos":[]}"#).await;

    let result = search_memos(&server.client(), SearchMemosParams::default())
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"count": 0, "memos": []})
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_memo_accepts_resource_name() {
    let server = FakeMemos::ok(MEMO_JSON).await;

    let summary = get_memo(
        &server.client(),
        GetMemoParams {
            memo_uid: Some("memos/abc".to_string()),
        },
    )
    .await
    .unwrap();

    assert_eq!(summary.uid, "abc");
    assert_eq!(summary.creator, "users/1");
    assert_eq!(server.single_request().path, "/api/v1/memos/abc");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_memo_missing_uid_makes_no_request() {
    let server = FakeMemos::ok(MEMO_JSON).await;

    let err = get_memo(
        &server.client(),
        GetMemoParams {
            memo_uid: Some(String::new()),
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "memo_uid is required");
    assert!(server.requests().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_memo_not_found() {
    let server = FakeMemos::start(404, "memo not found").await;

    let err = get_memo(
        &server.client(),
        GetMemoParams {
            memo_uid: Some("nope".to_string()),
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "memo not found");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_memo_success() {
    let server = FakeMemos::ok(MEMO_JSON).await;

    let result = create_memo(
        &server.client(),
        CreateMemoParams {
            content: Some("hello".to_string()),
            visibility: None,
            pinned: None,
        },
    )
    .await
    .unwrap();

    assert!(result.success);
    assert_eq!(result.memo.uid, "abc");

    let body = server.single_request().body.unwrap();
    assert_eq!(body["visibility"], "PRIVATE");
    assert!(body.get("pinned").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_memo_empty_content_makes_no_request() {
    let server = FakeMemos::ok(MEMO_JSON).await;

    let err = create_memo(
        &server.client(),
        CreateMemoParams {
            content: Some(String::new()),
            visibility: None,
            pinned: None,
        },
    )
    .await
    .unwrap_err();

    assert!(err.is_validation());
    assert!(server.requests().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_memo_without_fields_fails_fast() {
    let server = FakeMemos::ok(MEMO_JSON).await;

    let err = update_memo(
        &server.client(),
        UpdateMemoParams {
            memo_uid: Some("abc".to_string()),
            content: None,
            visibility: None,
            pinned: None,
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, MemosError::NothingToUpdate));
    assert!(server.requests().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_memo_empty_strings_are_not_changes() {
    let server = FakeMemos::ok(MEMO_JSON).await;

    let err = update_memo(
        &server.client(),
        UpdateMemoParams {
            memo_uid: Some("abc".to_string()),
            content: Some(String::new()),
            visibility: Some(String::new()),
            pinned: None,
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, MemosError::NothingToUpdate));
    assert!(server.requests().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_memo_sends_only_supplied_fields() {
    let server = FakeMemos::ok(MEMO_JSON).await;

    let result = update_memo(
        &server.client(),
        UpdateMemoParams {
            memo_uid: Some("memos/abc".to_string()),
            content: Some("edited".to_string()),
            visibility: Some("protected".to_string()),
            pinned: Some(false),
        },
    )
    .await
    .unwrap();
    assert!(result.success);

    let request = server.single_request();
    assert_eq!(request.path, "/api/v1/memos/abc");
    assert_eq!(
        request.body,
        Some(json!({
            "state": "STATE_UNSPECIFIED",
            "content": "edited",
            "visibility": "PROTECTED",
            "pinned": false
        }))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_memo_echoes_uid_and_force() {
    let server = FakeMemos::ok("{}").await;

    let result = delete_memo(
        &server.client(),
        DeleteMemoParams {
            memo_uid: Some("memos/abc".to_string()),
            force: Some(true),
        },
    )
    .await
    .unwrap();

    assert_eq!(
        result,
        DeleteResult {
            success: true,
            uid: "abc".to_string(),
            force: true,
        }
    );
    assert_eq!(server.single_request().query_param("force"), Some("true"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_memo_force_defaults_to_false() {
    let server = FakeMemos::ok("").await;

    let result = delete_memo(
        &server.client(),
        DeleteMemoParams {
            memo_uid: Some("abc".to_string()),
            force: None,
        },
    )
    .await
    .unwrap();

    assert!(!result.force);
    assert!(server.single_request().query.is_empty());
}
