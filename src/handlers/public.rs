// src/handlers/public.rs

use std::convert::Infallible;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use serde::Deserialize;
use tokio_stream::{wrappers::WatchStream, Stream, StreamExt};
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    config::AppState,
    db::EventKind,
    models::profile::RenderedCard,
    services::carousel::{Ticker, CAROUSEL_IMAGES, ROTATION_INTERVAL},
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ProfileQuery {
    /// Id do modelo a renderizar; ausente ou irreconhecível cai no padrão.
    pub tid: Option<String>,
}

// GET /api/public/profile
#[utoipa::path(
    get,
    path = "/api/public/profile",
    tag = "Público",
    params(ProfileQuery),
    responses(
        (status = 200, description = "Cartão resolvido e renderizado", body = RenderedCard)
    )
)]
pub async fn get_profile(
    State(app_state): State<AppState>,
    Query(query): Query<ProfileQuery>,
) -> Json<RenderedCard> {
    // `tid` malformado não é erro do visitante: vale como ausente.
    let template_id = query.tid.as_deref().and_then(|s| Uuid::parse_str(s).ok());
    Json(app_state.profile_service.render(template_id).await)
}

// POST /api/public/events/whatsapp-click
#[utoipa::path(
    post,
    path = "/api/public/events/whatsapp-click",
    tag = "Público",
    responses(
        (status = 202, description = "Clique registrado em segundo plano")
    )
)]
pub async fn record_whatsapp_click(State(app_state): State<AppState>) -> StatusCode {
    app_state.analytics.record(EventKind::WhatsappClick);
    StatusCode::ACCEPTED
}

// GET /api/public/carousel/stream
//
// Avanço automático do carrossel via SSE. O ticker fica escopado ao stream:
// quando o cliente desconecta, o stream é dropado e a tarefa abortada.
pub async fn carousel_stream() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (ticker, rx) = Ticker::spawn(CAROUSEL_IMAGES.len(), ROTATION_INTERVAL);

    let stream = WatchStream::from_changes(rx).map(move |index| {
        let _mounted = &ticker;
        Ok(Event::default().event("rotate").data(index.to_string()))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
