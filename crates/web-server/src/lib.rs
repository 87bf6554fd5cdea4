use analytics::{AnalyticsEngine, VolumeGuides};
use axum::{routing::get, Router};
use configuration::Config;
use dataset::TradeStore;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
///
/// The trade table is loaded once before the server starts and shared
/// immutably; every request re-derives its views from the same records.
pub struct AppState {
    pub store: TradeStore,
    pub engine: AnalyticsEngine,
    /// Sample mean/median of per-day total volume, fixed for the lifetime of
    /// the loaded table.
    pub guides: VolumeGuides,
    /// How many of the day's largest trades the top-trades view shows.
    pub top_trades: usize,
}

/// The main function to configure and run the web server.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let store = dataset::load_trades(&config.data.path)?;
    let engine = AnalyticsEngine::new();
    let guides = engine.volume_guides(store.records())?;

    let app_state = Arc::new(AppState {
        store,
        engine,
        guides,
        top_trades: config.dashboard.top_trades,
    });

    let addr = config.server.socket_addr()?;
    let app = router(app_state);

    tracing::info!("Dashboard listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the application router. Split out of `run_server` so tests can
/// drive the routes without binding a socket.
pub fn router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    // --- DEFINE THE APPLICATION ROUTES ---
    Router::new()
        .route("/", get(handlers::dashboard_page))
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/filters", get(handlers::get_filters))
        .route("/api/daily/:date", get(handlers::get_daily_report))
        .route("/api/daily/:date/timeline.svg", get(handlers::get_timeline_chart))
        .route("/api/daily/:date/cumulative.svg", get(handlers::get_cumulative_chart))
        .route(
            "/api/positions/:product/:expiration",
            get(handlers::get_position_breakdown),
        )
        .route(
            "/api/positions/:product/:expiration/pie.svg",
            get(handlers::get_position_pie),
        )
        .route(
            "/api/expirations/:expiration/positions",
            get(handlers::get_positions_by_product),
        )
        .route(
            "/api/expirations/:expiration/positions.svg",
            get(handlers::get_position_bars),
        )
        .with_state(app_state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}
