//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::{Value, json};
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use netshare_auth::JwtEncoder;
use netshare_core::config::AppConfig;
use netshare_database::DatabasePool;
use netshare_database::repositories::UserRepository;
use netshare_entity::user::CreateUser;
use netshare_storage::LocalStorageProvider;

const BOUNDARY: &str = "netshare-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum app for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Application config
    pub config: AppConfig,
    _storage_dir: TempDir,
}

/// A provisioned user and a bearer token for them.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub token: String,
}

impl TestApp {
    /// Create a test application, or `None` when no test database is configured.
    ///
    /// Tests never clean tables; every user gets a unique name instead so
    /// tests can run in parallel against one database.
    pub async fn new() -> Option<Self> {
        let url = std::env::var("NETSHARE_TEST_DATABASE_URL").ok()?;

        let storage_dir = tempfile::tempdir().expect("Failed to create storage dir");
        let mut config = AppConfig::with_database_url(url);
        config.database.max_connections = 5;
        config.database.min_connections = 0;
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.storage.root_path = storage_dir
            .path()
            .to_str()
            .expect("utf8 temp path")
            .to_string();
        config.storage.max_upload_size_bytes = 64 * 1024;

        let db_pool = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database")
            .into_pool();

        netshare_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        let storage = LocalStorageProvider::new(&config.storage.root_path)
            .await
            .expect("Failed to init storage");

        let state = netshare_api::build_state(config.clone(), db_pool.clone(), Arc::new(storage));
        let router = netshare_api::build_app(state);

        Some(Self {
            router,
            db_pool,
            config,
            _storage_dir: storage_dir,
        })
    }

    /// Provision a user with a unique name and issue a token for them.
    pub async fn create_user(&self, prefix: &str) -> TestUser {
        let username = format!("{prefix}_{}", Uuid::new_v4().simple());
        let user = UserRepository::new(self.db_pool.clone())
            .create(&CreateUser {
                username: username.clone(),
                email: None,
                display_name: None,
            })
            .await
            .expect("Failed to create test user");

        let token = JwtEncoder::new(&self.config.auth)
            .issue(user.id, &user.username)
            .expect("Failed to issue token")
            .token;

        TestUser {
            id: user.id,
            username,
            token,
        }
    }

    /// Register a device for `user` and return its ID.
    pub async fn create_device(&self, user: &TestUser, mac: &str) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/devices",
                Some(json!({
                    "device_name": "Laptop",
                    "device_type": "laptop",
                    "mac_address": mac,
                    "ip_address": "192.168.1.20",
                })),
                Some(&user.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.id()
    }

    /// Register a device and publish a WPA2 network from it.
    pub async fn create_network(&self, owner: &TestUser, max_devices: i32) -> Uuid {
        let device_id = self.create_device(owner, &random_mac()).await;
        let response = self
            .request(
                "POST",
                "/api/networks",
                Some(json!({
                    "source_device_id": device_id,
                    "network_name": format!("Net-{}", &Uuid::new_v4().simple().to_string()[..8]),
                    "password": "correct-horse",
                    "security_type": "wpa2",
                    "frequency_band": "5GHz",
                    "channel": 36,
                    "signal_strength": -50,
                    "max_devices": max_devices,
                })),
                Some(&owner.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.id()
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        self.send(req.body(Body::from(body_str)).expect("Failed to build request"))
            .await
    }

    /// Upload a file through the multipart endpoint.
    pub async fn upload(
        &self,
        token: &str,
        filename: &str,
        content_type: &str,
        data: &[u8],
        is_public: bool,
    ) -> TestResponse {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"is_public\"\r\n\r\n{is_public}\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/api/files")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Fetch a raw (non-JSON) response body.
    pub async fn get_raw(&self, path: &str, token: &str) -> RawResponse {
        let req = Request::builder()
            .method("GET")
            .uri(path)
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body")
            .to_vec();

        RawResponse {
            status,
            headers,
            body,
        }
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a JSON test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// `data.id` parsed as a UUID.
    pub fn id(&self) -> Uuid {
        self.data()["id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| panic!("No id in response: {:?}", self.body))
    }

    /// The `error` code of an error body.
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or("")
    }
}

/// Response with an unparsed body.
#[derive(Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// A random, well-formed MAC address in upper case.
pub fn random_mac() -> String {
    let bytes = *Uuid::new_v4().as_bytes();
    bytes[..6]
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(":")
}
