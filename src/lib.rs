//! CobraAmigo: register informal debts owed by friends, share a public link
//! with a PIX QR code, and remind the debtor with a cheeky banner.
//!
//! Debts are owner-scoped for listing and deletion. The public debt page is
//! addressed by `?debtId=` and is readable by anyone holding the id.

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{delete, get, post},
};
use tokio::{signal, sync::RwLock};
use tower_http::cors::CorsLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, cookie::Key};
use tracing::info;

pub mod auth;
pub mod cache;
pub mod config;
pub mod constants;
pub mod database;
pub mod debts;
pub mod detail;
pub mod error;
pub mod form;
pub mod messages;
pub mod models;
pub mod qr;
pub mod routes;
pub mod utils;

use auth::AuthEvents;
use cache::DebtCache;
use config::Config;
use constants::{SESSION_EXPIRY_DAYS, SESSION_NAME};
use database::Db;
use debts::DebtStore;
use messages::{MessageTicker, SharedTicker};

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub store: DebtStore,
    pub cache: DebtCache,
    pub ticker: SharedTicker,
    pub auth_events: AuthEvents,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wires shared state and starts the background cache invalidation task.
    /// Must be called from within a tokio runtime.
    pub fn new(db: Db, config: Config) -> Self {
        let cache = DebtCache::new();
        let auth_events = AuthEvents::new();
        cache::spawn_invalidation(cache.clone(), auth_events.subscribe());

        Self {
            store: DebtStore::new(db.clone()),
            db,
            cache,
            ticker: Arc::new(RwLock::new(MessageTicker::new())),
            auth_events,
            config: Arc::new(config),
        }
    }
}

pub fn app(state: AppState) -> anyhow::Result<Router> {
    let key = Key::try_from(state.config.session_secret.as_bytes())
        .map_err(|e| anyhow::anyhow!("Invalid session key: {:?}", e))?;
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_name(SESSION_NAME)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(SESSION_EXPIRY_DAYS)))
        .with_signed(key);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Ok(Router::new()
        .route("/", get(routes::root))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/debts", get(routes::list_debts).post(routes::create_debt))
        .route("/debts/{id}", delete(routes::delete_debt))
        .route("/debt", get(routes::debt_page))
        .route("/debt/qr", get(routes::debt_qr))
        .route("/messages", get(routes::banner))
        .layer(session_layer)
        .layer(cors)
        .with_state(state))
}

pub async fn start_server(config: Config) -> anyhow::Result<()> {
    info!("Initializing database at {}...", config.data_path);
    let db = database::init_db(&config.data_path).await?;

    let bind_address = config.bind_address();
    let state = AppState::new(db, config);
    messages::spawn_rotation(state.ticker.clone());
    let app = app(state)?;

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Server running on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
