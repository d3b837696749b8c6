//! In-process marketplace backend for view tests.
//!
//! Download behaviour is picked by product id:
//! - `p-ok`: fresh download
//! - `p-again`: redownload
//! - `p-daily` / `p-monthly`: 429 with that period exhausted
//! - `p-both`: 429 with both periods exhausted
//! - `p-unauth`: 401, as for an expired session
//! - `p-nolimits`: 429 without a limits object
//! - `p-gone`: 404
//! - `p-boom`: 500 with a backend message
//! - `p-slow`: fresh download after a delay

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::{Value, json};

pub use xeriwo::downloads::{Downloader, RecordingOpener};
pub use xeriwo::sdk::storage::keys;
pub use xeriwo::sdk::{Client, ClientConfig, MemoryStorage, Navigator, StorageAdapter, View};

pub const ADMIN_TOKEN: &str = "admin-token";
pub const USER_TOKEN: &str = "user-token";

#[derive(Default)]
pub struct Hits {
    pub downloads: AtomicUsize,
    pub chat: AtomicUsize,
    pub stats: AtomicUsize,
    pub products: AtomicUsize,
    pub admin: AtomicUsize,
    pub saves: AtomicUsize,
}

pub fn count(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}

#[derive(Clone)]
struct Backend {
    hits: Arc<Hits>,
    /// Reject every admin call with 500 instead of serving it
    admin_broken: bool,
}

pub fn product(id: &str, title: &str, category: &str, downloads: u64) -> Value {
    json!({
        "_id": id,
        "title": title,
        "category": category,
        "description": format!("{} for WordPress", title),
        "tags": ["wordpress"],
        "imageUrl": format!("https://cdn.example.com/{}.png", id),
        "previewUrl": format!("https://demo.example.com/{}", id),
        "downloadUrl": format!("https://files.example.com/{}.zip", id),
        "downloads": downloads
    })
}

fn catalog() -> Vec<Value> {
    vec![
        product("p-ok", "Astra Starter", "wordpress-themes", 10),
        product("p-again", "Rank Booster SEO", "wordpress-plugins", 4),
        product("p-slow", "Forms Deluxe", "wordpress-plugins", 0),
    ]
}

fn limits(daily: (u32, u32), monthly: (u32, u32)) -> Value {
    json!({
        "daily": { "used": daily.0, "limit": daily.1, "remaining": daily.1.saturating_sub(daily.0) },
        "monthly": { "used": monthly.0, "limit": monthly.1, "remaining": monthly.1.saturating_sub(monthly.0) }
    })
}

fn error(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers.get("authorization").and_then(|v| v.to_str().ok())
}

async fn download(State(backend): State<Backend>, Path(id): Path<String>) -> Response {
    backend.hits.downloads.fetch_add(1, Ordering::SeqCst);
    let granted = |redownload: bool, message: &str| {
        Json(json!({
            "success": true,
            "message": message,
            "downloadUrl": format!("https://files.example.com/{}.zip", id),
            "isRedownload": redownload,
            "limits": limits((3, 15), (40, 350))
        }))
        .into_response()
    };

    match id.as_str() {
        "p-ok" => granted(false, "Download started"),
        "p-again" => granted(true, "You already own this, downloading again"),
        "p-slow" => {
            tokio::time::sleep(Duration::from_millis(300)).await;
            granted(false, "Download started")
        }
        "p-daily" => error(
            StatusCode::TOO_MANY_REQUESTS,
            json!({
                "success": false,
                "limitReached": true,
                "message": "Daily download limit reached",
                "limits": limits((15, 15), (40, 350))
            }),
        ),
        "p-monthly" => error(
            StatusCode::TOO_MANY_REQUESTS,
            json!({
                "success": false,
                "limitReached": true,
                "message": "Monthly download limit reached",
                "limits": limits((2, 15), (350, 350))
            }),
        ),
        "p-both" => error(
            StatusCode::TOO_MANY_REQUESTS,
            json!({
                "success": false,
                "limitReached": true,
                "message": "Download limit reached",
                "limits": limits((15, 15), (350, 350))
            }),
        ),
        "p-unauth" => error(
            StatusCode::UNAUTHORIZED,
            json!({ "success": false, "message": "Token expired" }),
        ),
        "p-nolimits" => error(StatusCode::TOO_MANY_REQUESTS, json!({ "success": false })),
        "p-boom" => error(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "success": false, "message": "Storage offline" }),
        ),
        _ => error(
            StatusCode::NOT_FOUND,
            json!({ "success": false, "message": "Product not found" }),
        ),
    }
}

async fn stats(State(backend): State<Backend>) -> Json<Value> {
    backend.hits.stats.fetch_add(1, Ordering::SeqCst);
    let used = backend.hits.downloads.load(Ordering::SeqCst) as u32;
    Json(json!({
        "success": true,
        "stats": {
            "daily": { "used": used, "limit": 15 },
            "monthly": { "used": used + 40, "limit": 350 },
            "total": 120,
            "subscription": "free"
        }
    }))
}

async fn chat(State(backend): State<Backend>, Json(body): Json<Value>) -> Response {
    backend.hits.chat.fetch_add(1, Ordering::SeqCst);
    let message = body["message"].as_str().unwrap_or_default().to_string();
    if message == "fail" {
        return error(StatusCode::INTERNAL_SERVER_ERROR, json!({ "success": false }));
    }
    if message == "my stats" {
        return Json(json!({
            "success": true,
            "response": { "text": "📊 Your stats", "showStats": true }
        }))
        .into_response();
    }
    Json(json!({
        "success": true,
        "response": {
            "text": format!("You said: {}", message),
            "products": [product("p-ok", "Astra Starter", "wordpress-themes", 10)],
            "quickActions": [{ "text": "🎨 Themes", "action": "show_themes" }],
            "loggedIn": body["context"]["isLoggedIn"]
        }
    }))
    .into_response()
}

/// `?category=broken` answers 500.
async fn products(
    State(backend): State<Backend>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    backend.hits.products.fetch_add(1, Ordering::SeqCst);
    if params.get("category").map(String::as_str) == Some("broken") {
        return error(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "success": false, "message": "Index rebuilding" }),
        );
    }
    Json(json!({
        "success": true,
        "products": catalog(),
        "pagination": { "currentPage": 1, "totalPages": 4, "totalProducts": 90 }
    }))
    .into_response()
}

fn admin_gate(backend: &Backend, headers: &HeaderMap) -> Option<Response> {
    backend.hits.admin.fetch_add(1, Ordering::SeqCst);
    if backend.admin_broken {
        return Some(error(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "success": false, "message": "Database unavailable" }),
        ));
    }
    if bearer(headers) != Some(ADMIN_TOKEN) {
        return Some(error(
            StatusCode::UNAUTHORIZED,
            json!({ "success": false, "message": "Admin token required" }),
        ));
    }
    None
}

async fn admin_products(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    if let Some(denied) = admin_gate(&backend, &headers) {
        return denied;
    }
    Json(json!({ "success": true, "products": catalog() })).into_response()
}

async fn admin_categories(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    if let Some(denied) = admin_gate(&backend, &headers) {
        return denied;
    }
    let seo = json!({
        "_id": "c2", "name": "SEO", "productCount": 5,
        "parent": { "_id": "c1", "name": "Plugins" }
    });
    let plugins = json!({ "_id": "c1", "name": "Plugins", "children": [seo.clone()] });
    let themes = json!({ "_id": "c3", "name": "Themes", "isActive": false });
    Json(json!({
        "success": true,
        "categories": [plugins.clone(), themes.clone()],
        "flatCategories": [plugins, seo, themes]
    }))
    .into_response()
}

async fn parent_categories(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    if let Some(denied) = admin_gate(&backend, &headers) {
        return denied;
    }
    Json(json!({ "success": true, "categories": [{ "_id": "c1", "name": "Plugins" }] }))
        .into_response()
}

async fn save(State(backend): State<Backend>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Some(denied) = admin_gate(&backend, &headers) {
        return denied;
    }
    backend.hits.saves.fetch_add(1, Ordering::SeqCst);
    if body["title"] == "Duplicate" {
        return error(
            StatusCode::BAD_REQUEST,
            json!({ "success": false, "message": "A product with this title already exists" }),
        );
    }
    Json(json!({ "success": true, "message": "saved" })).into_response()
}

async fn remove(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    if let Some(denied) = admin_gate(&backend, &headers) {
        return denied;
    }
    Json(json!({ "success": true })).into_response()
}

fn user() -> Value {
    json!({ "_id": "u1", "name": "Ada", "email": "ada@example.com", "isVerified": true })
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] == "secret" {
        return Json(json!({ "success": true, "token": USER_TOKEN, "user": user() })).into_response();
    }
    error(
        StatusCode::UNAUTHORIZED,
        json!({ "success": false, "message": "Invalid email or password" }),
    )
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["email"] == "taken@example.com" {
        return error(
            StatusCode::BAD_REQUEST,
            json!({ "success": false, "message": "Email already registered" }),
        );
    }
    Json(json!({ "success": true, "message": "OTP sent" })).into_response()
}

async fn verify_otp(Json(body): Json<Value>) -> Response {
    if body["otp"] == "123456" {
        return Json(json!({ "success": true, "token": USER_TOKEN, "user": user() })).into_response();
    }
    error(
        StatusCode::BAD_REQUEST,
        json!({ "success": false, "message": "OTP expired" }),
    )
}

async fn admin_login(Json(body): Json<Value>) -> Response {
    if body["password"] == "root" {
        return Json(json!({ "success": true, "token": ADMIN_TOKEN, "admin": { "email": body["email"] } }))
            .into_response();
    }
    error(
        StatusCode::UNAUTHORIZED,
        json!({ "success": false, "message": "Invalid admin credentials" }),
    )
}

pub struct TestBackend {
    pub base_url: String,
    pub hits: Arc<Hits>,
}

pub async fn spawn_backend() -> TestBackend {
    spawn(false).await
}

/// A backend whose admin routes all fail with 500.
pub async fn spawn_broken_admin_backend() -> TestBackend {
    spawn(true).await
}

async fn spawn(admin_broken: bool) -> TestBackend {
    let hits = Arc::new(Hits::default());
    let backend = Backend {
        hits: hits.clone(),
        admin_broken,
    };

    let app = Router::new()
        .route("/api/download/{id}", post(download))
        .route("/api/chatbot/download/{id}", post(download))
        .route("/api/chatbot/stats", get(stats))
        .route("/api/chatbot/chat", post(chat))
        .route("/api/products", get(products).post(save))
        .route(
            "/api/products/featured",
            get(|| async { Json(json!({ "success": true, "products": [] })) }),
        )
        .route(
            "/api/products/stats",
            get(|| async {
                Json(json!({ "success": true, "stats": { "totalProducts": 0, "totalDownloads": 812 } }))
            }),
        )
        .route("/api/products/admin", get(admin_products))
        .route("/api/products/{id}", put(save).delete(remove))
        .route("/api/categories/admin", get(admin_categories))
        .route("/api/categories/parents", get(parent_categories))
        .route("/api/categories", post(save))
        .route("/api/categories/{id}", put(save).delete(remove))
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/verify-otp", post(verify_otp))
        .route("/api/admin/login", post(admin_login))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestBackend {
        base_url: format!("http://{}/api", addr),
        hits,
    }
}

pub struct Harness {
    pub client: Client,
    pub storage: Arc<MemoryStorage>,
    pub navigator: Navigator,
    pub opener: Arc<RecordingOpener>,
    pub downloader: Downloader,
}

pub fn harness(backend: &TestBackend, start: View) -> Harness {
    let storage = Arc::new(MemoryStorage::new());
    let navigator = Navigator::new(start);
    let client = Client::new(
        ClientConfig::new(&backend.base_url),
        storage.clone(),
        navigator.clone(),
    )
    .unwrap();
    let opener = Arc::new(RecordingOpener::new());
    let downloader = Downloader::new(client.clone(), opener.clone());
    Harness {
        client,
        storage,
        navigator,
        opener,
        downloader,
    }
}

pub fn sign_in(storage: &MemoryStorage) {
    storage.set(keys::TOKEN, USER_TOKEN);
    storage.set(keys::USER, &user().to_string());
}
