//! Catalog, review, user and order endpoints over a live server.

#![allow(clippy::expect_used)]

use lustre_integration_tests::TestServer;
use serde_json::{Value, json};

async fn get_json(server: &TestServer, path: &str) -> Value {
    let response = server
        .client
        .get(server.url(path))
        .send()
        .await
        .expect("request failed");
    assert!(response.status().is_success(), "GET {path} failed");
    response.json().await.expect("invalid JSON body")
}

#[tokio::test]
async fn test_health() {
    let server = TestServer::spawn().await;
    let response = server
        .client
        .get(server.url("/health"))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_product_listing_returns_seeded_catalog() {
    let server = TestServer::spawn().await;
    let body = get_json(&server, "/api/products").await;

    assert_eq!(body["total"], 8);
    assert_eq!(body["limit"], 20);
    assert_eq!(body["offset"], 0);
    let products = body["products"].as_array().expect("products array");
    assert_eq!(products.len(), 8);
    // Categories come embedded.
    assert!(products.iter().all(|p| p["category"]["name"].is_string()));
}

#[tokio::test]
async fn test_product_listing_paging() {
    let server = TestServer::spawn().await;

    let body = get_json(&server, "/api/products?limit=3").await;
    assert_eq!(body["products"].as_array().expect("array").len(), 3);
    assert_eq!(body["total"], 8);

    let body = get_json(&server, "/api/products?limit=3&offset=6").await;
    assert_eq!(body["products"].as_array().expect("array").len(), 2);
    assert_eq!(body["offset"], 6);
}

#[tokio::test]
async fn test_product_listing_filters() {
    let server = TestServer::spawn().await;

    let body = get_json(&server, "/api/products?category_id=1").await;
    assert_eq!(body["total"], 2);

    let body = get_json(&server, "/api/products?has_discount=true").await;
    assert_eq!(body["total"], 4);

    let body = get_json(&server, "/api/products?price_from=50000").await;
    assert_eq!(body["total"], 2);

    let body = get_json(&server, "/api/products?search=necklace").await;
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn test_product_listing_by_ids() {
    let server = TestServer::spawn().await;

    let body = get_json(&server, "/api/products?ids=1,3").await;
    assert_eq!(body["total"], 2);

    // Unknown ids are skipped, malformed ids are rejected.
    let body = get_json(&server, "/api/products?ids=1,999").await;
    assert_eq!(body["total"], 1);

    let response = server
        .client
        .get(server.url("/api/products?ids=1,x"))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_product_detail_and_missing_product() {
    let server = TestServer::spawn().await;

    let body = get_json(&server, "/api/products/1").await;
    assert_eq!(body["product"]["name"], "Lira Earrings");
    assert_eq!(body["reviews"], json!([]));

    let response = server
        .client
        .get(server.url("/api/products/999"))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("invalid JSON body");
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
async fn test_review_lifecycle() {
    let server = TestServer::spawn().await;

    let response = server
        .client
        .post(server.url("/api/products/1/reviews"))
        .json(&json!({ "name": "Anna", "text": "Lovely earrings.", "rating": 5 }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), 201);

    let body = get_json(&server, "/api/products/1").await;
    let reviews = body["reviews"].as_array().expect("reviews array");
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["rating"], 5);
}

#[tokio::test]
async fn test_review_validation() {
    let server = TestServer::spawn().await;

    for body in [
        json!({ "name": "", "text": "t", "rating": 5 }),
        json!({ "name": "n", "text": "  ", "rating": 5 }),
        json!({ "name": "n", "text": "t", "rating": 6 }),
        json!({ "name": "n", "text": "t", "rating": 0 }),
        json!({ "name": "n", "text": "t" }),
    ] {
        let response = server
            .client
            .post(server.url("/api/products/1/reviews"))
            .json(&body)
            .send()
            .await
            .expect("request failed");
        assert_eq!(response.status(), 400, "body {body} should be rejected");
    }

    let response = server
        .client
        .post(server.url("/api/products/999/reviews"))
        .json(&json!({ "name": "n", "text": "t", "rating": 4 }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_categories_sorted_by_name() {
    let server = TestServer::spawn().await;
    let body = get_json(&server, "/api/categories").await;
    let names: Vec<&str> = body["categories"]
        .as_array()
        .expect("categories array")
        .iter()
        .map(|c| c["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["Bracelets", "Earrings", "Necklaces", "Rings"]);
}

#[tokio::test]
async fn test_banners_embed_products_in_position_order() {
    let server = TestServer::spawn().await;
    let body = get_json(&server, "/api/banners").await;
    let banners = body["banners"].as_array().expect("banners array");
    assert_eq!(banners.len(), 3);
    assert!(banners.iter().all(|b| b["product"]["name"].is_string()));
    let positions: Vec<i64> = banners
        .iter()
        .map(|b| b["position"].as_i64().expect("position"))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn test_news_listing() {
    let server = TestServer::spawn().await;
    let body = get_json(&server, "/api/news").await;
    assert_eq!(body.as_array().expect("news array").len(), 2);
}

#[tokio::test]
async fn test_registration_and_duplicates() {
    let server = TestServer::spawn().await;

    let response = server
        .client
        .post(server.url("/api/auth/register"))
        .json(&json!({ "email": "anna@example.com", "name": "Anna" }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("invalid JSON body");
    assert_eq!(body["user"]["email"], "anna@example.com");

    let response = server
        .client
        .post(server.url("/api/auth/register"))
        .json(&json!({ "email": "anna@example.com" }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("invalid JSON body");
    assert_eq!(body["error"], "User already exists");

    let response = server
        .client
        .post(server.url("/api/auth/register"))
        .json(&json!({ "email": "not-an-email" }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_order_placement_registers_user_and_embeds_products() {
    let server = TestServer::spawn().await;

    let response = server
        .client
        .post(server.url("/api/orders"))
        .json(&json!({
            "email": "boris@example.com",
            "product_ids": [1, 2],
            "name": "Boris",
            "delivery_address": "1 Jewel St"
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("invalid JSON body");
    assert_eq!(body["order"]["status"], "new");
    assert_eq!(body["order"]["products"].as_array().expect("array").len(), 2);

    // The order lands in the user's history.
    let body = get_json(&server, "/api/orders?email=boris@example.com").await;
    assert_eq!(body["orders"].as_array().expect("array").len(), 1);
}

#[tokio::test]
async fn test_order_validation() {
    let server = TestServer::spawn().await;

    let response = server
        .client
        .post(server.url("/api/orders"))
        .json(&json!({ "email": "anna@example.com", "product_ids": [] }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), 400);

    let response = server
        .client
        .get(server.url("/api/orders"))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("invalid JSON body");
    assert_eq!(body["error"], "Email is required");

    let response = server
        .client
        .get(server.url("/api/orders?email=nobody@example.com"))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), 404);
}
