// src/db/analytics_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::common::error::AppError;

// As três coleções de eventos do cartão. Cada uma vira uma tabela
// append-only; o nome da tabela é fixo, nunca vem de entrada do usuário.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PageView,
    WhatsappClick,
    Appointment,
}

impl EventKind {
    pub fn table(&self) -> &'static str {
        match self {
            EventKind::PageView => "page_views",
            EventKind::WhatsappClick => "whatsapp_clicks",
            EventKind::Appointment => "appointments",
        }
    }
}

/// Fronteira com as coleções de eventos. Trait para que o resolver e o
/// agregador possam ser testados sem um Postgres de verdade.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Anexa um evento vazio (só o timestamp importa).
    async fn append(&self, kind: EventKind) -> Result<(), AppError>;

    /// Conta eventos com `created_at` em `[from, to)`.
    async fn count_between(
        &self,
        kind: EventKind,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64, AppError>;
}

#[derive(Clone)]
pub struct AnalyticsRepository {
    pool: PgPool,
}

impl AnalyticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for AnalyticsRepository {
    async fn append(&self, kind: EventKind) -> Result<(), AppError> {
        let sql = format!("INSERT INTO {} DEFAULT VALUES", kind.table());
        sqlx::query(&sql).execute(&self.pool).await?;
        Ok(())
    }

    async fn count_between(
        &self,
        kind: EventKind,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        // Limite inferior inclusivo, superior exclusivo.
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE created_at >= $1 AND created_at < $2",
            kind.table()
        );
        let count = sqlx::query_scalar::<_, i64>(&sql)
            .bind(from)
            .bind(to)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
