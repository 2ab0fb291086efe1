// src/models/profile.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A unidade de configuração de apresentação do cartão.
///
/// `id` ausente significa "padrão do site"; presente, um modelo nomeado.
/// Valores que saem do resolver já passaram por [`ProfileConfig::normalized`],
/// então o renderizador nunca encontra campos obrigatórios vazios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileConfig {
    pub id: Option<Uuid>,

    #[schema(example = "Dra. Iêsa Pinhão")]
    pub professional_name: String,

    #[schema(example = "Fisioterapeuta | CREFITO 259070-F")]
    pub specialty: String,

    #[schema(example = "Putumuju")]
    pub location: String,

    #[schema(example = "5577998141406")]
    pub whatsapp_number: String,

    #[schema(example = "/iesa.png")]
    pub profile_image_url: String,

    #[schema(example = "#0A4D33")]
    pub theme_color: String,
}

impl ProfileConfig {
    /// Cartão embutido no binário. Último recurso do resolver: se nem o
    /// registro padrão puder ser lido, a página pública ainda renderiza isto.
    pub fn fallback() -> Self {
        Self {
            id: None,
            professional_name: "Dra. Iêsa Pinhão".to_string(),
            specialty: "Fisioterapeuta | CREFITO 259070-F".to_string(),
            location: "Putumuju".to_string(),
            whatsapp_number: "5577998141406".to_string(),
            profile_image_url: "/iesa.png".to_string(),
            theme_color: "#0A4D33".to_string(),
        }
    }

    /// Preenche campos obrigatórios vazios com os valores do cartão embutido.
    /// Garante o invariante "nome e imagem de perfil nunca vazios".
    pub fn normalized(mut self) -> Self {
        let fallback = Self::fallback();
        if self.professional_name.trim().is_empty() {
            self.professional_name = fallback.professional_name;
        }
        if self.profile_image_url.trim().is_empty() {
            self.profile_image_url = fallback.profile_image_url;
        }
        if self.theme_color.trim().is_empty() {
            self.theme_color = fallback.theme_color;
        }
        self
    }

    /// Forma normalizada do número para o deep link: apenas dígitos.
    /// Não insere código de país; só remove pontuação de formatação.
    pub fn whatsapp_digits(&self) -> String {
        self.whatsapp_number
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect()
    }
}

// Linha única de `site_settings` (id fixo = 1).
#[derive(Debug, Clone, FromRow)]
pub struct SiteSettings {
    pub id: i64,
    pub professional_name: String,
    pub specialty: String,
    pub location: String,
    pub whatsapp_number: String,
    pub profile_image_url: String,
    pub theme_color: String,
    pub updated_at: DateTime<Utc>,
}

impl From<SiteSettings> for ProfileConfig {
    fn from(row: SiteSettings) -> Self {
        Self {
            id: None,
            professional_name: row.professional_name,
            specialty: row.specialty,
            location: row.location,
            whatsapp_number: row.whatsapp_number,
            profile_image_url: row.profile_image_url,
            theme_color: row.theme_color,
        }
    }
}

/// Modelo nomeado da galeria: metadados de listagem + conteúdo do cartão.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: Uuid,

    // Metadados da galeria; `name` nunca participa da mutação de conteúdo.
    #[schema(example = "Clássico Esmeralda")]
    pub name: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,

    pub professional_name: String,
    pub specialty: String,
    pub location: String,
    pub whatsapp_number: String,
    pub profile_image_url: String,
    pub theme_color: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Template> for ProfileConfig {
    fn from(tpl: Template) -> Self {
        Self {
            id: Some(tpl.id),
            professional_name: tpl.professional_name,
            specialty: tpl.specialty,
            location: tpl.location,
            whatsapp_number: tpl.whatsapp_number,
            profile_image_url: tpl.profile_image_url,
            theme_color: tpl.theme_color,
        }
    }
}

// Dados para criação de um modelo na galeria. Campos de conteúdo omitidos
// herdam os valores do cartão embutido.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplatePayload {
    #[validate(length(min = 1, message = "O nome do modelo é obrigatório."))]
    #[schema(example = "Clássico Esmeralda")]
    pub name: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,

    pub professional_name: Option<String>,
    pub specialty: Option<String>,
    pub location: Option<String>,
    pub whatsapp_number: Option<String>,
    pub profile_image_url: Option<String>,
    pub theme_color: Option<String>,
}

// Sobrescrita completa do conteúdo de um modelo.
// `name` está deliberadamente ausente: é metadado da galeria, não conteúdo.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplateContent {
    #[validate(length(min = 1, message = "O nome profissional é obrigatório."))]
    pub professional_name: String,
    pub specialty: String,
    pub location: String,
    pub whatsapp_number: String,
    pub profile_image_url: String,
    pub theme_color: String,
}

/// Saída do renderizador público: função pura de `ProfileConfig` + carrossel.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenderedCard {
    pub template_id: Option<Uuid>,

    // Tratamento compacto do logo: só os dois primeiros tokens do nome e o
    // trecho da especialidade antes do primeiro '|'.
    #[schema(example = "Dra. Iêsa")]
    pub logo_name: String,
    #[schema(example = "Fisioterapeuta")]
    pub logo_credential: String,

    pub professional_name: String,
    pub specialty: String,
    pub location: String,

    #[schema(example = "5577998141406")]
    pub whatsapp_display: String,
    #[schema(example = "https://wa.me/5577998141406")]
    pub whatsapp_url: String,

    pub profile_image_url: String,
    pub theme_color: String,

    pub carousel_images: Vec<String>,
    pub carousel_interval_secs: u64,
}

impl RenderedCard {
    pub fn render(config: &ProfileConfig, carousel_images: Vec<String>, interval_secs: u64) -> Self {
        let logo_name = config
            .professional_name
            .split_whitespace()
            .take(2)
            .collect::<Vec<_>>()
            .join(" ");

        let logo_credential = config
            .specialty
            .split('|')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();

        Self {
            template_id: config.id,
            logo_name,
            logo_credential,
            professional_name: config.professional_name.clone(),
            specialty: config.specialty.clone(),
            location: config.location.clone(),
            whatsapp_display: config.whatsapp_number.clone(),
            whatsapp_url: format!("https://wa.me/{}", config.whatsapp_digits()),
            profile_image_url: config.profile_image_url.clone(),
            theme_color: config.theme_color.clone(),
            carousel_images,
            carousel_interval_secs: interval_secs,
        }
    }
}
