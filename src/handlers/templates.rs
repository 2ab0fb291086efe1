// src/handlers/templates.rs

use std::convert::Infallible;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::profile::{CreateTemplatePayload, Template, UpdateTemplateContent},
    services::storage::ImageStorage,
};

// GET /api/templates
#[utoipa::path(
    get,
    path = "/api/templates",
    tag = "Modelos",
    responses(
        (status = 200, description = "Galeria de modelos, mais antigos primeiro", body = Vec<Template>),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_templates(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Template>>, AppError> {
    let templates = app_state.template_repo.list().await?;
    Ok(Json(templates))
}

// GET /api/templates/{id}
#[utoipa::path(
    get,
    path = "/api/templates/{id}",
    tag = "Modelos",
    params(("id" = Uuid, Path, description = "Id do modelo")),
    responses(
        (status = 200, description = "Modelo para edição", body = Template),
        (status = 404, description = "Modelo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_template(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Template>, AppError> {
    let template = app_state
        .template_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::TemplateNotFound)?;
    Ok(Json(template))
}

// POST /api/templates
#[utoipa::path(
    post,
    path = "/api/templates",
    tag = "Modelos",
    request_body = CreateTemplatePayload,
    responses(
        (status = 201, description = "Modelo criado", body = Template)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_template(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateTemplatePayload>,
) -> Result<(StatusCode, Json<Template>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let template = app_state.template_repo.insert(payload).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

// PUT /api/templates/{id}
#[utoipa::path(
    put,
    path = "/api/templates/{id}",
    tag = "Modelos",
    params(("id" = Uuid, Path, description = "Id do modelo")),
    request_body = UpdateTemplateContent,
    responses(
        (status = 200, description = "Conteúdo sobrescrito", body = Template),
        (status = 404, description = "Modelo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_template(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTemplateContent>,
) -> Result<Json<Template>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let updated = app_state.template_repo.update_content(id, payload).await?;

    // O preview só é avisado depois que a mutação persistiu. Um salvamento
    // que falhou retorna acima pelo `?` e não dispara recarga nenhuma.
    app_state
        .preview_hub
        .notify(updated.id, updated.updated_at.timestamp_millis());

    Ok(Json(updated))
}

// POST /api/templates/{id}/image
//
// Sequência estrita, cada passo aguardado antes do próximo: bytes → URL
// pública → persistência da URL → recarga do preview. Erro em qualquer
// passo aborta os restantes.
#[utoipa::path(
    post,
    path = "/api/templates/{id}/image",
    tag = "Modelos",
    params(("id" = Uuid, Path, description = "Id do modelo")),
    responses(
        (status = 200, description = "Imagem de perfil atualizada", body = Template),
        (status = 400, description = "Arquivo ausente ou vazio"),
        (status = 404, description = "Modelo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn upload_template_image(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<Template>, AppError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|_| AppError::InvalidImageUpload)?
        .ok_or(AppError::InvalidImageUpload)?;

    let original_name = field.file_name().unwrap_or("upload.png").to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|_| AppError::InvalidImageUpload)?;
    if bytes.is_empty() {
        return Err(AppError::InvalidImageUpload);
    }

    let relative_path = ImageStorage::profile_image_path(&original_name);
    app_state.storage.store(&relative_path, &bytes).await?;
    let public_url = app_state.storage.public_url(&relative_path);

    let updated = app_state
        .template_repo
        .update_image_url(id, &public_url)
        .await?;

    app_state
        .preview_hub
        .notify(updated.id, updated.updated_at.timestamp_millis());

    Ok(Json(updated))
}

// GET /api/templates/{id}/preview/events
//
// Canal do sincronizador de preview: o preview embutido do editor assina e
// re-busca o cartão em /api/public/profile?tid={id} a cada evento. A
// revisão serve de cache-buster para quem preferir recarregar a URL.
pub async fn preview_events(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = app_state.preview_hub.subscribe(id);

    let stream = BroadcastStream::new(rx).filter_map(|message| {
        let reload = message.ok()?;
        let payload = serde_json::to_string(&reload).unwrap_or_default();
        Some(Ok(Event::default().event("reload").data(payload)))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
