//! Integration tests for Stockroom.
//!
//! Each test spawns the full web app in-process on an ephemeral port with
//! its own temporary SQLite file, then drives it over HTTP the way a
//! browser would: cookie jar on, forms posted, redirects followed, HTML
//! inspected.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p stockroom-integration-tests
//! ```

use std::net::SocketAddr;
use std::time::Duration;

use secrecy::SecretString;
use sqlx::SqlitePool;
use tempfile::TempDir;

use stockroom_web::config::AppConfig;
use stockroom_web::services::auth::Argon2PasswordHasher;
use stockroom_web::state::AppState;
use stockroom_web::{db, seed};

/// A running application instance for one test.
///
/// The temporary directory holding the SQLite file lives as long as this
/// struct; dropping it deletes the database.
pub struct TestServer {
    addr: SocketAddr,
    pool: SqlitePool,
    _tempdir: TempDir,
}

impl TestServer {
    /// Spawn the app on an ephemeral port with a fresh, seeded database.
    ///
    /// # Panics
    ///
    /// Panics if any part of the setup fails; no test can proceed without
    /// a running server.
    pub async fn spawn() -> Self {
        let tempdir = tempfile::tempdir().expect("Failed to create tempdir");
        let db_path = tempdir.path().join("stockroom.db");
        let database_url = SecretString::from(format!("sqlite://{}", db_path.display()));

        let config = AppConfig {
            database_url: database_url.clone(),
            host: [127, 0, 0, 1].into(),
            port: 0,
            base_url: "http://localhost".to_owned(),
            seed_password: SecretString::from("admin"),
        };

        let pool = db::create_pool(&database_url)
            .await
            .expect("Failed to create pool");
        db::MIGRATOR.run(&pool).await.expect("Failed to migrate");

        seed::run(&pool, &Argon2PasswordHasher, &config.seed_password)
            .await
            .expect("Failed to seed");

        let state = AppState::new(config, pool.clone(), Argon2PasswordHasher);
        let app = stockroom_web::app(state)
            .await
            .expect("Failed to build app");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to read local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        let server = Self {
            addr,
            pool,
            _tempdir: tempdir,
        };
        server.wait_until_healthy().await;
        server
    }

    /// Absolute URL for a path on the running server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Direct handle on the server's database, for assertions that HTML
    /// cannot answer.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Poll the health endpoint until the server answers.
    async fn wait_until_healthy(&self) {
        let client = reqwest::Client::new();
        for _ in 0..50 {
            if let Ok(resp) = client.get(self.url("/health")).send().await {
                if resp.status().is_success() {
                    return;
                }
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        panic!("Server did not become healthy in time");
    }
}

/// A browser-like HTTP client: cookie jar on, redirects followed.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Post the login form with the given credentials.
///
/// # Panics
///
/// Panics if the request cannot be sent.
pub async fn login(
    client: &reqwest::Client,
    server: &TestServer,
    username: &str,
    password: &str,
) -> reqwest::Response {
    client
        .post(server.url("/login"))
        .form(&[("username", username), ("password", password)])
        .send()
        .await
        .expect("Failed to post login form")
}

/// Log in with the seeded default credentials.
///
/// # Panics
///
/// Panics if the request cannot be sent or the login does not land on the
/// products list.
pub async fn login_as_admin(client: &reqwest::Client, server: &TestServer) {
    let resp = login(client, server, "admin", "admin").await;
    assert_eq!(resp.url().path(), "/products", "seeded login should work");
}

/// Fetch the products list page and return its HTML.
///
/// # Panics
///
/// Panics if the page cannot be fetched.
pub async fn products_page(client: &reqwest::Client, server: &TestServer) -> String {
    let resp = client
        .get(server.url("/products"))
        .send()
        .await
        .expect("Failed to get products page");
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    resp.text().await.expect("Failed to read products page")
}

/// Extract product ids from a products list page via its edit links.
///
/// Returns the ids in the order the rows appear.
#[must_use]
pub fn product_ids(body: &str) -> Vec<i64> {
    const MARKER: &str = "/products/edit/";

    body.split(MARKER)
        .skip(1)
        .filter_map(|rest| {
            let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        })
        .collect()
}
