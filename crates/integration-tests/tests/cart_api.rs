//! Server-side cart contract: POST / GET / DELETE on `/cart`.

#![allow(clippy::expect_used)]

use lustre_integration_tests::TestServer;
use serde_json::{Value, json};

const EMAIL: &str = "anna@example.com";

fn line(product_id: i64, quantity: i64) -> Value {
    json!({ "email": EMAIL, "productID": product_id, "quantity": quantity })
}

async fn cart_of(server: &TestServer, email: &str) -> Vec<Value> {
    let response = server
        .client
        .get(server.url("/cart"))
        .query(&[("email", email)])
        .send()
        .await
        .expect("request failed");
    assert!(response.status().is_success());
    response.json().await.expect("invalid JSON body")
}

#[tokio::test]
async fn test_save_requires_known_user_and_product() {
    let server = TestServer::spawn().await;

    let response = server
        .client
        .post(server.url("/cart"))
        .json(&line(1, 2))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("invalid JSON body");
    assert_eq!(body["error"], "User not found");

    server.register_user(EMAIL).await;

    let response = server
        .client
        .post(server.url("/cart"))
        .json(&line(999, 2))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("invalid JSON body");
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let server = TestServer::spawn().await;
    server.register_user(EMAIL).await;

    let response = server
        .client
        .post(server.url("/cart"))
        .json(&json!({ "email": EMAIL, "productID": 1 }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("invalid JSON body");
    assert_eq!(body["error"], "Invalid cart data");
}

#[tokio::test]
async fn test_save_overwrites_quantity() {
    let server = TestServer::spawn().await;
    server.register_user(EMAIL).await;

    for quantity in [2, 5] {
        let response = server
            .client
            .post(server.url("/cart"))
            .json(&line(1, quantity))
            .send()
            .await
            .expect("request failed");
        assert!(response.status().is_success());
    }

    let lines = cart_of(&server, EMAIL).await;
    assert_eq!(lines.len(), 1);
    // Stored verbatim, not aggregated.
    assert_eq!(lines[0]["quantity"], 5);
    assert_eq!(lines[0]["product"]["name"], "Lira Earrings");
}

#[tokio::test]
async fn test_fetch_requires_email_and_known_user() {
    let server = TestServer::spawn().await;

    let response = server
        .client
        .get(server.url("/cart"))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("invalid JSON body");
    assert_eq!(body["error"], "Email is required");

    let response = server
        .client
        .get(server.url("/cart"))
        .query(&[("email", "nobody@example.com")])
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_remove_line_and_remove_missing() {
    let server = TestServer::spawn().await;
    server.register_user(EMAIL).await;

    let response = server
        .client
        .post(server.url("/cart"))
        .json(&line(1, 2))
        .send()
        .await
        .expect("request failed");
    assert!(response.status().is_success());

    // Removing a line the user never had still acknowledges.
    let response = server
        .client
        .delete(server.url("/cart"))
        .json(&json!({ "email": EMAIL, "productID": 999 }))
        .send()
        .await
        .expect("request failed");
    assert!(response.status().is_success());
    assert_eq!(cart_of(&server, EMAIL).await.len(), 1);

    let response = server
        .client
        .delete(server.url("/cart"))
        .json(&json!({ "email": EMAIL, "productID": 1 }))
        .send()
        .await
        .expect("request failed");
    assert!(response.status().is_success());
    assert!(cart_of(&server, EMAIL).await.is_empty());
}

#[tokio::test]
async fn test_carts_are_isolated_per_user() {
    let server = TestServer::spawn().await;
    server.register_user(EMAIL).await;
    server.register_user("boris@example.com").await;

    let response = server
        .client
        .post(server.url("/cart"))
        .json(&line(1, 1))
        .send()
        .await
        .expect("request failed");
    assert!(response.status().is_success());

    assert_eq!(cart_of(&server, EMAIL).await.len(), 1);
    assert!(cart_of(&server, "boris@example.com").await.is_empty());
}
