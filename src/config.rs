// src/config.rs

use std::{env, path::PathBuf, sync::Arc, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{AnalyticsRepository, EventStore, SettingsStore, TemplateRepository, UserRepository},
    services::{
        AnalyticsService, AuthService, DashboardService, ImageStorage, PreviewHub, ProfileService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub template_repo: TemplateRepository,
    pub analytics: AnalyticsService,
    pub profile_service: ProfileService,
    pub dashboard_service: DashboardService,
    pub preview_hub: PreviewHub,
    pub storage: ImageStorage,
    pub bind_addr: String,
    pub uploads_dir: PathBuf,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");
        let public_base_url =
            env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let uploads_dir =
            PathBuf::from(env::var("UPLOADS_DIR").unwrap_or_else(|_| "uploads".to_string()));
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        tokio::fs::create_dir_all(&uploads_dir).await?;

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let auth_service = AuthService::new(user_repo, jwt_secret);

        let template_repo = TemplateRepository::new(db_pool.clone());
        let event_store: Arc<dyn EventStore> = Arc::new(AnalyticsRepository::new(db_pool.clone()));

        let analytics = AnalyticsService::new(Arc::clone(&event_store));
        let settings_store: Arc<dyn SettingsStore> = Arc::new(template_repo.clone());
        let profile_service = ProfileService::new(settings_store, analytics.clone());
        let dashboard_service = DashboardService::new(event_store);

        let storage = ImageStorage::new(uploads_dir.clone(), &public_base_url);
        let preview_hub = PreviewHub::new();

        Ok(Self {
            db_pool,
            auth_service,
            template_repo,
            analytics,
            profile_service,
            dashboard_service,
            preview_hub,
            storage,
            bind_addr,
            uploads_dir,
        })
    }
}
