//! Product route handlers.
//!
//! Server-rendered CRUD pages for the product catalog. Every page requires
//! a logged-in user.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use stockroom_core::{Price, ProductId};

use crate::db::{ProductRepository, RepositoryError};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::product::{Product, ProductDraft};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Product form data, as submitted.
///
/// All fields arrive as strings so a rejected submission can be re-rendered
/// exactly as the user typed it.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub quantity: String,
}

impl ProductForm {
    /// Validate the submitted fields and build a draft.
    ///
    /// Returns a message suitable for display when any field is rejected.
    fn to_draft(&self) -> Result<ProductDraft, String> {
        let price = Price::parse(self.price.trim()).map_err(|e| e.to_string())?;

        let quantity: i64 = self
            .quantity
            .trim()
            .parse()
            .map_err(|_| "quantity must be a whole number".to_owned())?;

        ProductDraft::new(self.name.clone(), self.description.clone(), price, quantity)
            .map_err(|e| e.to_string())
    }

    /// Turn the submitted fields back into a form page with an error banner.
    fn into_template(self, title: &str, action: &str, error: String) -> ProductFormTemplate {
        ProductFormTemplate {
            title: title.to_owned(),
            action: action.to_owned(),
            error: Some(error),
            name: self.name,
            description: self.description,
            price: self.price,
            quantity: self.quantity,
        }
    }
}

// =============================================================================
// View Types
// =============================================================================

/// Product display data for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: String,
    pub quantity: i64,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i64(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            quantity: product.quantity,
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Products list page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub username: String,
    pub products: Vec<ProductView>,
}

/// Product form page template, shared by the add and edit pages.
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub title: String,
    pub action: String,
    pub error: Option<String>,
    pub name: String,
    pub description: String,
    pub price: String,
    pub quantity: String,
}

// =============================================================================
// List Routes
// =============================================================================

/// Redirect the bare root to the products list.
pub async fn home() -> Redirect {
    Redirect::to("/products")
}

/// Display the products list.
pub async fn index(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ProductRepository::new(state.pool());
    let products = repo.list().await?;

    Ok(ProductsIndexTemplate {
        username: user.username.to_string(),
        products: products.iter().map(ProductView::from).collect(),
    })
}

// =============================================================================
// Create Routes
// =============================================================================

/// Display the blank product form.
pub async fn new_form(RequireAuth(_user): RequireAuth) -> impl IntoResponse {
    ProductFormTemplate {
        title: "Add Product".to_owned(),
        action: "/products".to_owned(),
        error: None,
        name: String::new(),
        description: String::new(),
        price: String::new(),
        quantity: String::new(),
    }
}

/// Handle new product form submission.
///
/// A rejected submission re-renders the form with a message and the entered
/// values; nothing is written in that case.
pub async fn create(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Response, AppError> {
    let draft = match form.to_draft() {
        Ok(draft) => draft,
        Err(message) => {
            return Ok(form
                .into_template("Add Product", "/products", message)
                .into_response());
        }
    };

    let repo = ProductRepository::new(state.pool());
    let product = repo.create(&draft).await?;
    tracing::info!("Created product {} ({})", product.id, product.name);

    Ok(Redirect::to("/products").into_response())
}

// =============================================================================
// Edit Routes
// =============================================================================

/// Display the product form pre-filled with an existing product.
pub async fn edit_form(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ProductRepository::new(state.pool());
    let product = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(ProductFormTemplate {
        title: "Edit Product".to_owned(),
        action: format!("/products/edit/{id}"),
        error: None,
        name: product.name,
        description: product.description,
        price: product.price.to_string(),
        quantity: product.quantity.to_string(),
    })
}

/// Handle edit product form submission.
pub async fn update(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Form(form): Form<ProductForm>,
) -> Result<Response, AppError> {
    let draft = match form.to_draft() {
        Ok(draft) => draft,
        Err(message) => {
            let action = format!("/products/edit/{id}");
            return Ok(form
                .into_template("Edit Product", &action, message)
                .into_response());
        }
    };

    let repo = ProductRepository::new(state.pool());
    let product = match repo.update(id, &draft).await {
        Ok(product) => product,
        Err(RepositoryError::NotFound) => {
            return Err(AppError::NotFound(format!("product {id}")));
        }
        Err(e) => return Err(e.into()),
    };
    tracing::info!("Updated product {} ({})", product.id, product.name);

    Ok(Redirect::to("/products").into_response())
}

// =============================================================================
// Delete Routes
// =============================================================================

/// Handle product deletion.
pub async fn delete(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Response, AppError> {
    let repo = ProductRepository::new(state.pool());
    match repo.delete(id).await {
        Ok(()) => {
            tracing::info!("Deleted product {}", id);
            Ok(Redirect::to("/products").into_response())
        }
        Err(RepositoryError::NotFound) => Err(AppError::NotFound(format!("product {id}"))),
        Err(e) => Err(e.into()),
    }
}
