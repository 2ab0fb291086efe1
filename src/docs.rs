// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Público ---
        handlers::public::get_profile,
        handlers::public::record_whatsapp_click,
        handlers::schedule::request_appointment,

        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Modelos ---
        handlers::templates::list_templates,
        handlers::templates::get_template,
        handlers::templates::create_template,
        handlers::templates::update_template,
        handlers::templates::upload_template_image,

        // --- Dashboard ---
        handlers::dashboard::get_metrics,
    ),
    components(
        schemas(
            // --- Perfil ---
            models::profile::ProfileConfig,
            models::profile::Template,
            models::profile::CreateTemplatePayload,
            models::profile::UpdateTemplateContent,
            models::profile::RenderedCard,

            // --- Agendamento ---
            models::schedule::ServiceKind,
            models::schedule::AppointmentRequest,
            models::schedule::ScheduleResponse,

            // --- Dashboard ---
            models::dashboard::MetricsWindow,
            models::dashboard::DashboardMetrics,

            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
        )
    ),
    tags(
        (name = "Público", description = "Cartão digital público e agendamento via WhatsApp"),
        (name = "Modelos", description = "Galeria e editor de modelos do cartão"),
        (name = "Auth", description = "Autenticação do painel administrativo"),
        (name = "Dashboard", description = "Indicadores do cartão e da clínica")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
