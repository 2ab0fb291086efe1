// src/handlers/schedule.rs

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    db::EventKind,
    models::schedule::{AppointmentRequest, ScheduleResponse},
    services::schedule::compose_whatsapp_link,
};

// POST /api/public/schedule
#[utoipa::path(
    post,
    path = "/api/public/schedule",
    tag = "Público",
    request_body = AppointmentRequest,
    responses(
        (status = 200, description = "Deep link do WhatsApp com a mensagem pré-preenchida", body = ScheduleResponse),
        (status = 400, description = "Campos inválidos ou data irreconhecível")
    )
)]
pub async fn request_appointment(
    State(app_state): State<AppState>,
    Json(payload): Json<AppointmentRequest>,
) -> Result<Json<ScheduleResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let whatsapp_url = compose_whatsapp_link(&payload)?;

    // O pedido em si nunca é persistido; só o evento de contagem, e em
    // segundo plano.
    app_state.analytics.record(EventKind::Appointment);

    Ok(Json(ScheduleResponse { whatsapp_url }))
}
