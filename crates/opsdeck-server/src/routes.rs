//! The HTTP surface: health and freshness probes, the overview roll-up,
//! named report projections, chart reshapes, and infrastructure fan-out.

use std::collections::BTreeMap;

use axum::Json;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use serde_json::json;

use opsdeck_reports::{
    OverviewSnapshot, ReportDescriptor, ReportOutput, all_reports, describe, find_report, run,
};
use opsdeck_types::{GpuSnapshot, ModelServerStatus, Topology};

use crate::charts::{ChartSeries, SeriesColumns, series_from_rows};
use crate::error::ApiError;
use crate::state::SharedState;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/freshness", get(freshness))
        .route("/api/overview", get(overview))
        .route("/api/reports", get(report_index))
        .route("/api/reports/{name}", get(report))
        .route("/api/charts/cron-duration/{job}", get(cron_duration_chart))
        .route("/api/charts/daily-spend", get(daily_spend_chart))
        .route("/api/charts/model-spend", get(model_spend_chart))
        .route("/api/charts/skill-spend", get(skill_spend_chart))
        .route("/api/charts/publishing-pace", get(publishing_pace_chart))
        .route("/api/infra/topology", get(infra_topology))
        .route("/api/infra/gpu", get(infra_gpu))
        .route("/api/infra/nodes", get(infra_nodes))
        .route("/api/infra/models", get(infra_models))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn freshness(State(state): State<SharedState>) -> Json<serde_json::Value> {
    Json(json!({ "minutes": state.reader.freshness() }))
}

async fn overview(
    State(state): State<SharedState>,
) -> Result<Json<OverviewSnapshot>, ApiError> {
    Ok(Json(opsdeck_reports::overview(&state.reader)?))
}

async fn report_index() -> Json<Vec<ReportDescriptor>> {
    Json(all_reports().iter().map(|spec| describe(spec)).collect())
}

async fn report(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    Query(args): Query<BTreeMap<String, String>>,
) -> Result<Json<ReportOutput>, ApiError> {
    let spec =
        find_report(&name).ok_or_else(|| opsdeck_reports::Error::UnknownReport(name.clone()))?;
    Ok(Json(run(&state.reader, spec, &args)?))
}

/// Shared chart body: run a registered report with fixed arguments and
/// reshape its rows into label/value arrays.
fn chart(
    state: &SharedState,
    report: &str,
    args: &BTreeMap<String, String>,
    columns: &SeriesColumns,
) -> Result<ChartSeries, ApiError> {
    let spec =
        find_report(report).ok_or_else(|| opsdeck_reports::Error::UnknownReport(report.into()))?;
    match run(&state.reader, spec, args)? {
        ReportOutput::Rows(rows) => Ok(series_from_rows(&rows, columns)),
        _ => Ok(ChartSeries::default()),
    }
}

async fn cron_duration_chart(
    State(state): State<SharedState>,
    Path(job): Path<String>,
) -> Result<Json<ChartSeries>, ApiError> {
    let args = BTreeMap::from([("job_name".to_string(), job)]);
    let series = chart(
        &state,
        "cron.duration_history",
        &args,
        &SeriesColumns {
            label: "started_at",
            value: "duration_seconds",
            count: None,
            round: None,
        },
    )?;
    Ok(Json(series))
}

async fn daily_spend_chart(
    State(state): State<SharedState>,
) -> Result<Json<ChartSeries>, ApiError> {
    let series = chart(
        &state,
        "costs.daily_spend",
        &BTreeMap::new(),
        &SeriesColumns {
            label: "day",
            value: "total_cost",
            count: None,
            round: Some(4),
        },
    )?;
    Ok(Json(series))
}

async fn model_spend_chart(
    State(state): State<SharedState>,
) -> Result<Json<ChartSeries>, ApiError> {
    let series = chart(
        &state,
        "costs.model_breakdown",
        &BTreeMap::new(),
        &SeriesColumns {
            label: "model",
            value: "total_cost",
            count: Some("call_count"),
            round: Some(4),
        },
    )?;
    Ok(Json(series))
}

async fn skill_spend_chart(
    State(state): State<SharedState>,
) -> Result<Json<ChartSeries>, ApiError> {
    let series = chart(
        &state,
        "costs.skill_breakdown",
        &BTreeMap::new(),
        &SeriesColumns {
            label: "skill",
            value: "total_cost",
            count: Some("call_count"),
            round: Some(4),
        },
    )?;
    Ok(Json(series))
}

async fn publishing_pace_chart(
    State(state): State<SharedState>,
) -> Result<Json<ChartSeries>, ApiError> {
    let series = chart(
        &state,
        "content.publishing_pace",
        &BTreeMap::new(),
        &SeriesColumns {
            label: "week",
            value: "count",
            count: None,
            round: None,
        },
    )?;
    Ok(Json(series))
}

async fn infra_topology(State(state): State<SharedState>) -> Json<Topology> {
    Json(state.probes.topology().await)
}

async fn infra_gpu(State(state): State<SharedState>) -> Json<GpuSnapshot> {
    Json(state.probes.gpu().snapshot().await)
}

async fn infra_nodes(State(state): State<SharedState>) -> Json<serde_json::Value> {
    let (nodes, metrics) = tokio::join!(
        state.probes.cluster().nodes(),
        state.probes.metrics().node_metrics(),
    );
    Json(json!({ "nodes": nodes.unwrap_or_default(), "metrics": metrics }))
}

async fn infra_models(State(state): State<SharedState>) -> Json<ModelServerStatus> {
    Json(state.probes.models().status().await)
}
