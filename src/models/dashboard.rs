// src/models/dashboard.rs

use serde::Serialize;
use utoipa::ToSchema;

// Contagem de uma coleção de eventos na janela atual de 30 dias,
// acompanhada da variação percentual frente aos 30 dias anteriores.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricsWindow {
    #[schema(example = 128)]
    pub total: i64,
    #[schema(example = "+12.5%")]
    pub change: String,
}

impl Default for MetricsWindow {
    fn default() -> Self {
        // Estado "último valor conhecido" quando uma coleção falha na leitura.
        Self {
            total: 0,
            change: "+0%".to_string(),
        }
    }
}

// Os três cards do painel.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub views: MetricsWindow,
    pub clicks: MetricsWindow,
    pub appointments: MetricsWindow,
}
