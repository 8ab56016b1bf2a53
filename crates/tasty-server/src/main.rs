//! Tasty Server
//!
//! Serves the restaurant catalog API, the database-backed account API, the
//! in-memory item demos and the websocket echo chat from one process.
//!
//! Uses SQLite (embedded) for everything that outlives a restart.

mod config;
mod error;
mod extractors;
mod handlers;
mod services;
mod storage;

#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tasty_core::ports::ItemRepository;
use tasty_core::RestaurantSummary;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use config::ServerConfig;
use services::AuthService;
use storage::{Database, FruitShelf, Inventory, MemberDirectory, MemoryItemStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub items: Arc<dyn ItemRepository>,
    pub inventory: Arc<Inventory>,
    pub fruits: Arc<FruitShelf>,
    pub listings: Arc<Vec<RestaurantSummary>>,
    pub members: Arc<MemberDirectory>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    /// State with freshly seeded in-memory stores around `db`
    pub fn new(db: Database, auth_service: AuthService) -> Self {
        Self {
            db: Arc::new(db),
            items: Arc::new(MemoryItemStore::new()),
            inventory: Arc::new(Inventory::seeded()),
            fruits: Arc::new(FruitShelf::seeded()),
            listings: Arc::new(storage::seeded_restaurants()),
            members: Arc::new(MemberDirectory::new()),
            auth_service: Arc::new(auth_service),
        }
    }
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Tasty Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = ServerConfig::load().context("Failed to load configuration")?;
    info!(
        "Config loaded: bind={}, db={}",
        config.bind_address, config.database_path
    );

    let db = Database::new(&config.database_path)
        .await
        .context("Failed to initialize database")?;

    let auth_service = AuthService::new(config.jwt_secret.clone(), config.session_ttl_secs);
    let state = AppState::new(db, auth_service);

    let app = app(state);

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Server listening on {}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Full router with layers applied
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        // Chat page and websocket echo
        .route("/", get(handlers::ws::chat_page))
        .route("/ws", get(handlers::ws::handler))
        .merge(demo_routes())
        .nest("/db", db_routes())
        .nest("/api/v1", api_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// In-memory demos: positional items, listings, search, cookies, sign-up
fn demo_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/items/",
            get(handlers::items::list).post(handlers::items::create),
        )
        .route(
            "/items/:id",
            get(handlers::items::get)
                .put(handlers::items::update)
                .delete(handlers::items::delete),
        )
        .route("/restaurants/", get(handlers::listings::list))
        .route("/search/", get(handlers::search::search))
        .route("/cookies/set-cookie/", get(handlers::cookies::set_cookie))
        .route("/cookies/items/", get(handlers::cookies::read))
        .route("/fruits/:name", get(handlers::fruits::get))
        .route(
            "/inventory/:item_id",
            get(handlers::inventory::get).put(handlers::inventory::upsert),
        )
        .route("/signup", post(handlers::auth::signup))
        .route("/me", get(handlers::auth::me))
        .route("/api/info", get(handlers::info::info))
}

/// Database-backed users and their items
fn db_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/",
            get(handlers::users::list).post(handlers::users::create),
        )
        .route("/users/:id", get(handlers::users::get))
        .route("/users/:id/items/", post(handlers::users::create_item))
        .route("/items/", get(handlers::users::list_items))
}

/// Restaurant catalog and its admin-style views
fn api_routes() -> Router<AppState> {
    use handlers::{articles, catalog, restaurants, reviews};

    Router::new()
        .route(
            "/cuisine-types",
            get(catalog::list_cuisine_types).post(catalog::create_cuisine_type),
        )
        .route(
            "/cuisine-types/:id",
            axum::routing::delete(catalog::delete_cuisine_type),
        )
        .route(
            "/categories",
            get(catalog::list_categories).post(catalog::create_category),
        )
        .route(
            "/categories/:id",
            axum::routing::delete(catalog::delete_category),
        )
        .route(
            "/regions",
            get(catalog::list_regions).post(catalog::create_region),
        )
        .route("/regions/:id", axum::routing::delete(catalog::delete_region))
        .route("/tags", get(catalog::list_tags).post(catalog::create_tag))
        .route("/tags/:id", axum::routing::delete(catalog::delete_tag))
        .route(
            "/social-channels",
            get(catalog::list_social_channels).post(catalog::create_social_channel),
        )
        .route(
            "/social-channels/:id",
            axum::routing::delete(catalog::delete_social_channel),
        )
        .route(
            "/restaurants",
            get(restaurants::list).post(restaurants::create),
        )
        .route(
            "/restaurants/:id",
            get(restaurants::get)
                .put(restaurants::update)
                .delete(restaurants::delete),
        )
        .route(
            "/restaurants/:id/images",
            get(restaurants::list_images).post(restaurants::create_image),
        )
        .route(
            "/images/:id",
            put(restaurants::update_image).delete(restaurants::delete_image),
        )
        .route(
            "/restaurants/:id/menus",
            get(restaurants::list_menus).post(restaurants::create_menu),
        )
        .route("/menus/:id", axum::routing::delete(restaurants::delete_menu))
        .route(
            "/restaurants/:id/reviews",
            get(reviews::list_for_restaurant).post(reviews::create),
        )
        .route("/reviews", get(reviews::list))
        .route("/reviews/:id", get(reviews::get).delete(reviews::delete))
        .route("/reviews/:id/images", post(reviews::add_image))
        .route("/articles", get(articles::list).post(articles::create))
        .route("/articles/:id", put(articles::update))
        .route("/articles/publish", post(articles::publish))
}
