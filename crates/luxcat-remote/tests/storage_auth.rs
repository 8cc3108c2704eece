//! Integration tests for object storage and the auth RPC.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use luxcat_remote::{storage, RemoteClient, RemoteError};

fn test_client(server: &MockServer) -> RemoteClient {
    RemoteClient::new(&server.uri(), "test-key", 5, 5, "luxcat-test/0.1")
        .expect("failed to build test RemoteClient")
}

// ---------------------------------------------------------------------------
// storage
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_object_posts_bytes_with_content_type() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(
            "/storage/v1/object/product-images/products/SPL-LED-700/1712_front.jpg",
        ))
        .and(header("content-type", "image/jpeg"))
        .and(header("x-upsert", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({"Key": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    storage::upload_object(
        &client,
        storage::buckets::IMAGES,
        "products/SPL-LED-700/1712_front.jpg",
        vec![0xFF, 0xD8],
        "image/jpeg",
    )
    .await
    .expect("upload");
}

#[tokio::test]
async fn upload_object_rejection_carries_backend_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(413).set_body_json(&json!({"message": "payload too large"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = storage::upload_object(
        &client,
        storage::buckets::VIDEOS,
        "products/SPL-LED-700/1712_demo.mp4",
        vec![0u8; 8],
        "video/mp4",
    )
    .await
    .expect_err("expected rejection");

    match err {
        RemoteError::Rejected {
            status, message, ..
        } => {
            assert_eq!(status, 413);
            assert_eq!(message, "payload too large");
        }
        other => panic!("expected Rejected, got: {other:?}"),
    }
}

#[tokio::test]
async fn remove_objects_sends_the_path_list() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/storage/v1/object/product-content"))
        .and(body_partial_json(
            json!({"prefixes": ["products/SPL-LED-700/content/documents/1712_spec.pdf"]}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    storage::remove_objects(
        &client,
        storage::buckets::CONTENT,
        &["products/SPL-LED-700/content/documents/1712_spec.pdf".to_string()],
    )
    .await
    .expect("remove");
}

// ---------------------------------------------------------------------------
// auth
// ---------------------------------------------------------------------------

#[tokio::test]
async fn authenticate_parses_a_single_object_row() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/authenticate_user"))
        .and(body_partial_json(json!({"username": "ana"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&json!({"username": "ana", "role": "admin"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let user = luxcat_remote::authenticate(&client, "ana", "s3cret")
        .await
        .expect("authenticate")
        .expect("user row");
    assert_eq!(user.username, "ana");
    assert!(user.is_admin());
}

#[tokio::test]
async fn authenticate_parses_a_setof_array_row() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/authenticate_user"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&json!([{"username": "bo", "role": "viewer"}])),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let user = luxcat_remote::authenticate(&client, "bo", "pw")
        .await
        .expect("authenticate")
        .expect("user row");
    assert!(!user.is_admin());
}

#[tokio::test]
async fn authenticate_maps_null_to_none() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/authenticate_user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&serde_json::Value::Null))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let user = luxcat_remote::authenticate(&client, "nobody", "pw")
        .await
        .expect("authenticate");
    assert!(user.is_none());
}

#[tokio::test]
async fn authenticate_maps_empty_array_to_none() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/authenticate_user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!([])))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let user = luxcat_remote::authenticate(&client, "nobody", "pw")
        .await
        .expect("authenticate");
    assert!(user.is_none());
}
