// src/db/template_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::profile::{
        CreateTemplatePayload, ProfileConfig, SiteSettings, Template, UpdateTemplateContent,
    },
};

// Id fixo da linha única de configuração padrão do site.
const SITE_SETTINGS_ID: i64 = 1;

const TEMPLATE_COLUMNS: &str = "id, name, description, thumbnail_url, professional_name, \
     specialty, location, whatsapp_number, profile_image_url, theme_color, created_at, updated_at";

/// Leituras que o resolver de perfil precisa. O trait decodifica as linhas
/// dinâmicas do banco para um `ProfileConfig` estritamente tipado, de modo
/// que o renderizador nunca vê campos faltando.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn template_config(&self, id: Uuid) -> Result<Option<ProfileConfig>, AppError>;
    async fn default_config(&self) -> Result<Option<ProfileConfig>, AppError>;
}

#[derive(Clone)]
pub struct TemplateRepository {
    pool: PgPool,
}

impl TemplateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Template>, AppError> {
        let templates = sqlx::query_as::<_, Template>(&format!(
            "SELECT {TEMPLATE_COLUMNS} FROM templates ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(templates)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Template>, AppError> {
        let template = sqlx::query_as::<_, Template>(&format!(
            "SELECT {TEMPLATE_COLUMNS} FROM templates WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(template)
    }

    // Campos de conteúdo omitidos herdam o cartão embutido, para que um
    // modelo recém-criado já renderize algo apresentável.
    pub async fn insert(&self, payload: CreateTemplatePayload) -> Result<Template, AppError> {
        let defaults = ProfileConfig::fallback();
        let template = sqlx::query_as::<_, Template>(&format!(
            r#"
            INSERT INTO templates (
                name, description, thumbnail_url,
                professional_name, specialty, location,
                whatsapp_number, profile_image_url, theme_color
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {TEMPLATE_COLUMNS}
            "#
        ))
        .bind(payload.name)
        .bind(payload.description)
        .bind(payload.thumbnail_url)
        .bind(payload.professional_name.unwrap_or(defaults.professional_name))
        .bind(payload.specialty.unwrap_or(defaults.specialty))
        .bind(payload.location.unwrap_or(defaults.location))
        .bind(payload.whatsapp_number.unwrap_or(defaults.whatsapp_number))
        .bind(payload.profile_image_url.unwrap_or(defaults.profile_image_url))
        .bind(payload.theme_color.unwrap_or(defaults.theme_color))
        .fetch_one(&self.pool)
        .await?;
        Ok(template)
    }

    // Sobrescrita completa do conteúdo. `name` fica de fora de propósito.
    pub async fn update_content(
        &self,
        id: Uuid,
        content: UpdateTemplateContent,
    ) -> Result<Template, AppError> {
        let template = sqlx::query_as::<_, Template>(&format!(
            r#"
            UPDATE templates SET
                professional_name = $2,
                specialty = $3,
                location = $4,
                whatsapp_number = $5,
                profile_image_url = $6,
                theme_color = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {TEMPLATE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(content.professional_name)
        .bind(content.specialty)
        .bind(content.location)
        .bind(content.whatsapp_number)
        .bind(content.profile_image_url)
        .bind(content.theme_color)
        .fetch_optional(&self.pool)
        .await?;

        template.ok_or(AppError::TemplateNotFound)
    }

    // Caminho do upload de imagem: sobrescreve apenas a URL do perfil.
    pub async fn update_image_url(&self, id: Uuid, url: &str) -> Result<Template, AppError> {
        let template = sqlx::query_as::<_, Template>(&format!(
            r#"
            UPDATE templates SET
                profile_image_url = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {TEMPLATE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(url)
        .fetch_optional(&self.pool)
        .await?;

        template.ok_or(AppError::TemplateNotFound)
    }

    pub async fn site_settings(&self) -> Result<Option<SiteSettings>, AppError> {
        let settings = sqlx::query_as::<_, SiteSettings>(
            "SELECT id, professional_name, specialty, location, whatsapp_number, \
             profile_image_url, theme_color, updated_at \
             FROM site_settings WHERE id = $1",
        )
        .bind(SITE_SETTINGS_ID)
        .fetch_optional(&self.pool)
        .await?;
        Ok(settings)
    }
}

#[async_trait]
impl SettingsStore for TemplateRepository {
    async fn template_config(&self, id: Uuid) -> Result<Option<ProfileConfig>, AppError> {
        Ok(self.find_by_id(id).await?.map(ProfileConfig::from))
    }

    async fn default_config(&self) -> Result<Option<ProfileConfig>, AppError> {
        Ok(self.site_settings().await?.map(ProfileConfig::from))
    }
}
