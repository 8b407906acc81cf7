use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use url::Url;

use rotomdex_auth::{AuthState, require_auth};
use rotomdex_db_memory::create_storage;
use rotomdex_storage::{DynStorage, PokedexStorage};
use rotomdex_upstream::{DynPokeApi, ImageBases, PokeApiClient, UpstreamConfig};

use crate::{
    config::{AppConfig, StorageBackend},
    handlers,
    middleware as app_middleware,
    pokedex::Pokedex,
};

/// Shared state behind every handler.
#[derive(Clone)]
pub struct AppState {
    pub pokedex: Arc<Pokedex>,
    pub storage: DynStorage,
    pub auth: AuthState,
}

impl AppState {
    #[must_use]
    pub fn new(pokedex: Arc<Pokedex>, storage: DynStorage, auth: AuthState) -> Self {
        Self {
            pokedex,
            storage,
            auth,
        }
    }

    /// Wires the real upstream client and the configured backend.
    pub fn from_config(cfg: &AppConfig) -> anyhow::Result<Self> {
        let base_url: Url = cfg
            .upstream
            .base_url
            .parse()
            .with_context(|| format!("invalid upstream.base_url: {}", cfg.upstream.base_url))?;

        let api: DynPokeApi = Arc::new(PokeApiClient::new(
            UpstreamConfig::new()
                .with_base_url(base_url)
                .with_request_timeout(cfg.upstream.request_timeout()),
        ));

        let storage = match cfg.storage.backend {
            StorageBackend::Memory => create_storage(),
        };
        tracing::info!(backend = storage.backend_name(), "storage initialized");

        let images = ImageBases::new(
            cfg.images.primary_base.as_str(),
            cfg.images.alternate_base.as_str(),
        );
        let pokedex = Arc::new(Pokedex::new(
            api,
            storage.clone(),
            images,
            cfg.upstream.list_limit,
        ));
        let auth = AuthState::from_secret(&cfg.auth.secret);

        Ok(Self::new(pokedex, storage, auth))
    }
}

pub struct RotomdexServer {
    addr: SocketAddr,
    app: Router,
}

pub fn build_app(cfg: &AppConfig, state: AppState) -> Router {
    let body_limit = cfg.server.body_limit_bytes;

    // Mutating routes sit behind the token check; reads and login are open.
    let protected = Router::new()
        .route("/pokemon/add", post(handlers::pokemon_add))
        .route(
            "/pokemon/{id}",
            axum::routing::put(handlers::pokemon_update).delete(handlers::pokemon_delete),
        )
        .route("/games/add", post(handlers::game_add))
        .route(
            "/games/{id}",
            axum::routing::put(handlers::game_update).delete(handlers::game_delete),
        )
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            require_auth,
        ));

    let open = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/pokemon", get(handlers::pokemon_index))
        .route("/pokemon/{id}", get(handlers::pokemon_detail))
        .route("/user/login", post(handlers::user_login))
        .route("/games", get(handlers::games_index))
        .route("/games/{id}", get(handlers::game_detail));

    // Middleware stack (request path: request id -> trace -> cors ->
    // compression -> body limit -> routes)
    Router::new()
        .merge(open)
        .merge(protected)
        .layer(axum::extract::DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    use tracing::field::Empty;
                    let req_id = req
                        .extensions()
                        .get::<axum::http::HeaderValue>()
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("")
                        .to_string();
                    tracing::info_span!(
                        "http.request",
                        http.method = %req.method(),
                        http.target = %req.uri(),
                        http.status_code = Empty,
                        request_id = %req_id
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        span.record(
                            "http.status_code",
                            tracing::field::display(res.status().as_u16()),
                        );
                        tracing::info!(
                            http.status = %res.status().as_u16(),
                            elapsed_ms = %latency.as_millis(),
                            "request handled"
                        );
                    },
                ),
        )
        .layer(middleware::from_fn(app_middleware::request_id))
        .with_state(state)
}

pub struct ServerBuilder {
    addr: SocketAddr,
    config: AppConfig,
}

impl ServerBuilder {
    #[must_use]
    pub fn new() -> Self {
        let cfg = AppConfig::default();
        Self {
            addr: cfg.addr(),
            config: cfg,
        }
    }

    #[must_use]
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    #[must_use]
    pub fn with_config(mut self, cfg: AppConfig) -> Self {
        self.addr = cfg.addr();
        self.config = cfg;
        self
    }

    pub fn build(self) -> anyhow::Result<RotomdexServer> {
        let state = AppState::from_config(&self.config)?;
        let app = build_app(&self.config, state);

        Ok(RotomdexServer {
            addr: self.addr,
            app,
        })
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RotomdexServer {
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    // Wait for Ctrl+C
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
