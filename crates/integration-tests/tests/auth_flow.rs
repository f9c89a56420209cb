//! Integration tests for login, logout, and access control.
//!
//! Each test spawns its own in-process server backed by a throwaway
//! `SQLite` file, so no external setup is required.
//!
//! Run with: cargo test -p stockroom-integration-tests

use reqwest::StatusCode;
use stockroom_integration_tests::{TestServer, client, login, login_as_admin};

// ============================================================================
// Login Page Tests
// ============================================================================

#[tokio::test]
async fn test_login_page_renders_form() {
    let server = TestServer::spawn().await;
    let client = client();

    let resp = client
        .get(server.url("/login"))
        .send()
        .await
        .expect("Failed to get login page");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");

    assert!(body.contains("<title>Login</title>"));
    assert!(body.contains(r#"id="username""#));
    assert!(body.contains(r#"id="password""#));
}

#[tokio::test]
async fn test_login_page_redirects_when_already_signed_in() {
    let server = TestServer::spawn().await;
    let client = client();
    login_as_admin(&client, &server).await;

    let resp = client
        .get(server.url("/login"))
        .send()
        .await
        .expect("Failed to get login page");

    // No point showing the form again; straight back to the list.
    assert_eq!(resp.url().path(), "/products");
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_with_seeded_credentials() {
    let server = TestServer::spawn().await;
    let client = client();

    let resp = login(&client, &server, "admin", "admin").await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.url().path(), "/products");

    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("<title>Products List</title>"));
    assert!(body.contains("Signed in as admin"));
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let server = TestServer::spawn().await;
    let client = client();

    let resp = login(&client, &server, "admin", "letmein").await;

    assert_eq!(resp.url().path(), "/login");
    assert_eq!(resp.url().query(), Some("error=credentials"));

    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Invalid username or password."));
}

#[tokio::test]
async fn test_login_with_unknown_username() {
    let server = TestServer::spawn().await;
    let client = client();

    let resp = login(&client, &server, "mallory", "admin").await;

    // Indistinguishable from a wrong password.
    assert_eq!(resp.url().path(), "/login");
    assert_eq!(resp.url().query(), Some("error=credentials"));

    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Invalid username or password."));
}

#[tokio::test]
async fn test_password_is_case_sensitive() {
    let server = TestServer::spawn().await;
    let client = client();

    let resp = login(&client, &server, "admin", "Admin").await;

    assert_eq!(resp.url().path(), "/login");
    assert_eq!(resp.url().query(), Some("error=credentials"));
}

// ============================================================================
// Access Control Tests
// ============================================================================

#[tokio::test]
async fn test_products_page_requires_login() {
    let server = TestServer::spawn().await;
    let client = client();

    let resp = client
        .get(server.url("/products"))
        .send()
        .await
        .expect("Failed to get products page");

    assert_eq!(resp.url().path(), "/login");
}

#[tokio::test]
async fn test_home_follows_session_state() {
    let server = TestServer::spawn().await;
    let client = client();

    // Anonymous: / -> /products -> /login.
    let resp = client
        .get(server.url("/"))
        .send()
        .await
        .expect("Failed to get home page");
    assert_eq!(resp.url().path(), "/login");

    // Signed in: / -> /products.
    login_as_admin(&client, &server).await;
    let resp = client
        .get(server.url("/"))
        .send()
        .await
        .expect("Failed to get home page");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.url().path(), "/products");
}

#[tokio::test]
async fn test_logout_ends_session() {
    let server = TestServer::spawn().await;
    let client = client();
    login_as_admin(&client, &server).await;

    let resp = client
        .post(server.url("/logout"))
        .send()
        .await
        .expect("Failed to log out");
    assert_eq!(resp.url().path(), "/login");

    // The old session cookie no longer opens the products page.
    let resp = client
        .get(server.url("/products"))
        .send()
        .await
        .expect("Failed to get products page");
    assert_eq!(resp.url().path(), "/login");
}
