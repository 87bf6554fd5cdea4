use crate::{error::AppError, AppState};
use analytics::{
    DailySummary, PositionBreakdown, ProductPosition, TimelinePoint, TopTrade, VolumeBucket,
    VolumeGuides,
};
use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

/// The selector values of the dashboard, derived from the loaded table
/// instead of being hard-coded.
#[derive(Debug, Serialize)]
pub struct FiltersResponse {
    pub dates: Vec<NaiveDate>,
    pub products: Vec<String>,
    pub expirations: Vec<NaiveDate>,
}

/// Everything the daily view shows for one selected date.
#[derive(Debug, Serialize)]
pub struct DailyReport {
    pub summary: DailySummary,
    pub guides: VolumeGuides,
    pub timeline: Vec<TimelinePoint>,
    pub top_trades: Vec<TopTrade>,
    pub volume_by_product: Vec<VolumeBucket>,
    pub volume_by_expiration: Vec<VolumeBucket>,
}

/// The position view for one product and expiration pair.
#[derive(Debug, Serialize)]
pub struct PositionReport {
    pub product: String,
    pub expiration: NaiveDate,
    pub breakdown: PositionBreakdown,
}

/// # GET /
/// The dashboard page itself; selectors and charts are driven by the API.
pub async fn dashboard_page() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

/// # GET /api/filters
pub async fn get_filters(State(state): State<Arc<AppState>>) -> Json<FiltersResponse> {
    Json(FiltersResponse {
        dates: state.store.dates(),
        products: state.store.products(),
        expirations: state.store.expirations(),
    })
}

/// # GET /api/daily/:date
/// The five daily views (summary, timeline, top trades, volume by product,
/// volume by expiration) as one JSON document.
pub async fn get_daily_report(
    Path(date): Path<NaiveDate>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<DailyReport>, AppError> {
    let day = state.store.day(date)?;
    let summary = state.engine.daily_summary(date, &day)?;

    Ok(Json(DailyReport {
        summary,
        guides: state.guides,
        timeline: state.engine.timeline(&day),
        top_trades: state.engine.top_trades(&day, state.top_trades),
        volume_by_product: state.engine.volume_by_product(&day),
        volume_by_expiration: state.engine.volume_by_expiration(&day),
    }))
}

/// # GET /api/daily/:date/timeline.svg
pub async fn get_timeline_chart(
    Path(date): Path<NaiveDate>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let day = state.store.day(date)?;
    let timeline = state.engine.timeline(&day);
    let svg = charts::timeline_chart(&format!("Trading Throughout {date}"), &timeline);
    Ok(svg_response(svg))
}

/// # GET /api/daily/:date/cumulative.svg
pub async fn get_cumulative_chart(
    Path(date): Path<NaiveDate>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let day = state.store.day(date)?;
    let timeline = state.engine.timeline(&day);
    let svg = charts::cumulative_chart(
        &format!("Cumulative Trading Volume on {date}"),
        &timeline,
        &state.guides,
    );
    Ok(svg_response(svg))
}

/// # GET /api/positions/:product/:expiration
pub async fn get_position_breakdown(
    Path((product, expiration)): Path<(String, NaiveDate)>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<PositionReport>, AppError> {
    let rows = state.store.position(&product, expiration)?;
    Ok(Json(PositionReport {
        product,
        expiration,
        breakdown: state.engine.position_breakdown(&rows),
    }))
}

/// # GET /api/positions/:product/:expiration/pie.svg
pub async fn get_position_pie(
    Path((product, expiration)): Path<(String, NaiveDate)>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let rows = state.store.position(&product, expiration)?;
    let breakdown = state.engine.position_breakdown(&rows);
    let svg = charts::position_pie(
        &format!("Overall Position for {product} Expiring on {expiration}"),
        &breakdown,
    );
    Ok(svg_response(svg))
}

/// # GET /api/expirations/:expiration/positions
/// Per-product position breakdowns for every trade expiring on the date.
pub async fn get_positions_by_product(
    Path(expiration): Path<NaiveDate>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProductPosition>>, AppError> {
    let rows = state.store.expiring(expiration)?;
    Ok(Json(state.engine.positions_by_product(&rows)))
}

/// # GET /api/expirations/:expiration/positions.svg
pub async fn get_position_bars(
    Path(expiration): Path<NaiveDate>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let rows = state.store.expiring(expiration)?;
    let positions = state.engine.positions_by_product(&rows);
    let svg = charts::position_bars(
        &format!("Position by Product Expiring on {expiration}"),
        &positions,
    );
    Ok(svg_response(svg))
}

fn svg_response(svg: String) -> Response {
    ([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response()
}
