//! Integration tests for the table operations.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made. Covers the happy paths and the rejection paths
//! that carry backend messages back to the caller.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use luxcat_remote::{ProductChanges, ProductInsert, RemoteClient, RemoteError};

fn test_client(server: &MockServer) -> RemoteClient {
    RemoteClient::new(&server.uri(), "test-key", 5, 5, "luxcat-test/0.1")
        .expect("failed to build test RemoteClient")
}

fn joined_product_json(id: i64, model: &str) -> serde_json::Value {
    json!({
        "id": id,
        "model": model,
        "description": "700W moving head wash",
        "technical_description": null,
        "category_id": 1,
        "images": ["https://cdn.example.com/a.jpg"],
        "contents": [],
        "videos": null,
        "new": true,
        "created_at": "2025-11-02T10:00:00Z",
        "updated_at": null,
        "category": {"id": 1, "name": "Moving Head"}
    })
}

fn draft_insert(model: &str) -> ProductInsert {
    ProductInsert {
        model: model.to_string(),
        description: "700W moving head wash".to_string(),
        technical_description: None,
        category_id: 1,
        images: vec![],
        contents: vec![],
        videos: vec![],
        is_new: true,
    }
}

// ---------------------------------------------------------------------------
// list_products
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_products_orders_newest_first_and_normalizes_the_join() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .and(query_param("select", "*,category:categories(id,name)"))
        .and(query_param("order", "created_at.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!([
            joined_product_json(2, "SPL-LED-681"),
            joined_product_json(1, "SPL-LED-700"),
        ])))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let products = luxcat_remote::list_products(&client)
        .await
        .expect("list_products");

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].model, "SPL-LED-681");
    assert_eq!(products[0].category_name.as_deref(), Some("Moving Head"));
    // null videos column becomes an empty list
    assert!(products[0].videos.is_empty());
}

#[tokio::test]
async fn list_products_propagates_rejection_with_backend_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(&json!({"message": "connection pool exhausted"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = luxcat_remote::list_products(&client)
        .await
        .expect_err("expected rejection");

    match err {
        RemoteError::Rejected {
            status, message, ..
        } => {
            assert_eq!(status, 500);
            assert_eq!(message, "connection pool exhausted");
        }
        other => panic!("expected Rejected, got: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// insert_product
// ---------------------------------------------------------------------------

#[tokio::test]
async fn insert_product_returns_the_stored_representation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/products"))
        .and(body_partial_json(json!([{"model": "SPL-LED-700", "new": true}])))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(&json!([joined_product_json(9, "SPL-LED-700")])),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let product = luxcat_remote::insert_product(&client, &draft_insert("SPL-LED-700"))
        .await
        .expect("insert_product");

    assert_eq!(product.id, Some(9));
    assert_eq!(product.category_name.as_deref(), Some("Moving Head"));
}

#[tokio::test]
async fn insert_product_surfaces_duplicate_model_rejection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/products"))
        .respond_with(ResponseTemplate::new(409).set_body_json(&json!({
            "code": "23505",
            "message": "duplicate key value violates unique constraint \"products_model_key\""
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = luxcat_remote::insert_product(&client, &draft_insert("SPL-LED-700"))
        .await
        .expect_err("expected rejection");

    match err {
        RemoteError::Rejected { message, .. } => {
            assert!(message.contains("products_model_key"), "got: {message}");
        }
        other => panic!("expected Rejected, got: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// update_product
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_product_patches_only_supplied_fields() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/products"))
        .and(query_param("id", "eq.9"))
        .and(body_partial_json(json!({"new": false})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&json!([joined_product_json(9, "SPL-LED-700")])),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let changes = ProductChanges {
        is_new: Some(false),
        ..ProductChanges::default()
    };
    let product = luxcat_remote::update_product(&client, 9, &changes)
        .await
        .expect("update_product");
    assert_eq!(product.id, Some(9));
}

#[tokio::test]
async fn update_product_missing_row_when_id_does_not_exist() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/products"))
        .and(query_param("id", "eq.404"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!([])))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let changes = ProductChanges {
        description: Some("x".to_string()),
        ..ProductChanges::default()
    };
    let err = luxcat_remote::update_product(&client, 404, &changes)
        .await
        .expect_err("expected MissingRow");
    assert!(
        matches!(err, RemoteError::MissingRow { .. }),
        "expected MissingRow, got: {err:?}"
    );
}

// ---------------------------------------------------------------------------
// deletes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_product_by_id_targets_the_primary_key() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/products"))
        .and(query_param("id", "eq.9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    luxcat_remote::delete_product_by_id(&client, 9)
        .await
        .expect("delete by id");
}

#[tokio::test]
async fn delete_product_by_model_targets_the_model_column() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/products"))
        .and(query_param("model", "eq.SPL-MHL-420 IP"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    luxcat_remote::delete_product_by_model(&client, "SPL-MHL-420 IP")
        .await
        .expect("delete by model");
}

// ---------------------------------------------------------------------------
// categories
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_categories_orders_by_name_ascending() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/categories"))
        .and(query_param("order", "name.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!([
            {"id": 2, "name": "Laser"},
            {"id": 1, "name": "Moving Head"},
        ])))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let categories = luxcat_remote::list_categories(&client)
        .await
        .expect("list_categories");
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].name, "Laser");
}

#[tokio::test]
async fn insert_category_returns_the_stored_record() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/categories"))
        .and(body_partial_json(json!([{"name": "Strobe"}])))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(&json!([{"id": 5, "name": "Strobe"}])),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let category = luxcat_remote::insert_category(&client, "Strobe")
        .await
        .expect("insert_category");
    assert_eq!(category.id, 5);
    assert_eq!(category.name, "Strobe");
}

#[tokio::test]
async fn category_has_products_reflects_reference_count() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .and(query_param("category_id", "eq.1"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!([{"id": 3}])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .and(query_param("category_id", "eq.2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!([])))
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert!(luxcat_remote::category_has_products(&client, 1)
        .await
        .expect("check 1"));
    assert!(!luxcat_remote::category_has_products(&client, 2)
        .await
        .expect("check 2"));
}
