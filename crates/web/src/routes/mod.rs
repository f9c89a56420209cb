//! HTTP route handlers for the product management app.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Redirect to the products list
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database probe)
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! POST /logout                 - Logout action
//!
//! # Products (require auth)
//! GET  /products               - Products list
//! POST /products               - Create product
//! GET  /products/new           - New product form
//! GET  /products/edit/{id}     - Edit product form
//! POST /products/edit/{id}     - Update product
//! POST /products/delete/{id}   - Delete product
//! ```
//!
//! The health endpoints are wired up by the application builder in
//! [`crate::app`].

pub mod auth;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/new", get(products::new_form))
        .route("/edit/{id}", get(products::edit_form).post(products::update))
        .route("/delete/{id}", post(products::delete))
}

/// Create all routes for the application.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home redirects to the products list
        .route("/", get(products::home))
        // Product routes
        .nest("/products", product_routes())
        // Auth routes
        .merge(auth_routes())
}
