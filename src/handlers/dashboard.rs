// src/handlers/dashboard.rs

use axum::{extract::State, Json};
use chrono::Utc;

use crate::{config::AppState, models::dashboard::DashboardMetrics};

// GET /api/dashboard/metrics
#[utoipa::path(
    get,
    path = "/api/dashboard/metrics",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Visitas, cliques e agendamentos dos últimos 30 dias, com variação frente aos 30 anteriores", body = DashboardMetrics),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_metrics(State(app_state): State<AppState>) -> Json<DashboardMetrics> {
    // Falhas parciais já foram absorvidas pelo agregador; aqui nunca é erro.
    Json(app_state.dashboard_service.aggregate(Utc::now()).await)
}
