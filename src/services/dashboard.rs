// src/services/dashboard.rs

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::{
    db::{EventKind, EventStore},
    models::dashboard::{DashboardMetrics, MetricsWindow},
};

/// Agrega as três coleções de eventos em duas janelas contíguas de 30 dias:
/// "atual" = [agora − 30d, agora) e "anterior" = [agora − 60d, agora − 30d).
#[derive(Clone)]
pub struct DashboardService {
    events: Arc<dyn EventStore>,
}

impl DashboardService {
    pub fn new(events: Arc<dyn EventStore>) -> Self {
        Self { events }
    }

    // As coleções são consultadas de forma independente: a falha de uma
    // delas loga um aviso e entrega a janela zerada, nunca derruba o painel.
    pub async fn aggregate(&self, now: DateTime<Utc>) -> DashboardMetrics {
        DashboardMetrics {
            views: self.window(EventKind::PageView, now).await,
            clicks: self.window(EventKind::WhatsappClick, now).await,
            appointments: self.window(EventKind::Appointment, now).await,
        }
    }

    async fn window(&self, kind: EventKind, now: DateTime<Utc>) -> MetricsWindow {
        let current_start = now - Duration::days(30);
        let previous_start = now - Duration::days(60);

        let counts = async {
            let current = self.events.count_between(kind, current_start, now).await?;
            let previous = self
                .events
                .count_between(kind, previous_start, current_start)
                .await?;
            Ok::<_, crate::common::error::AppError>((current, previous))
        }
        .await;

        match counts {
            Ok((current, previous)) => MetricsWindow {
                total: current,
                change: percent_change(current, previous),
            },
            Err(e) => {
                tracing::warn!("Falha ao agregar {}: {}", kind.table(), e);
                MetricsWindow::default()
            }
        }
    }
}

/// Variação percentual com sinal explícito e uma casa decimal.
/// `previous == 0` é tratado como crescimento pleno (`+100%`): qualquer
/// crescimento a partir do nada vale 100%, em vez de divisão por zero.
pub fn percent_change(current: i64, previous: i64) -> String {
    if previous == 0 {
        return "+100%".to_string();
    }
    let p = (current - previous) as f64 / previous as f64 * 100.0;
    if p >= 0.0 {
        format!("+{p:.1}%")
    } else {
        format!("{p:.1}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::AppError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[test]
    fn crescimento_a_partir_do_zero_vale_cem_por_cento() {
        assert_eq!(percent_change(5, 0), "+100%");
        assert_eq!(percent_change(0, 0), "+100%");
    }

    #[test]
    fn queda_leva_sinal_negativo_com_uma_casa() {
        assert_eq!(percent_change(8, 10), "-20.0%");
    }

    #[test]
    fn crescimento_e_estabilidade_levam_sinal_positivo() {
        assert_eq!(percent_change(15, 10), "+50.0%");
        assert_eq!(percent_change(10, 10), "+0.0%");
    }

    // Loja de eventos em memória que também grava as janelas consultadas.
    struct FakeEvents {
        counts: HashMap<&'static str, (i64, i64)>, // (atual, anterior)
        fail: Option<EventKind>,
        ranges: Mutex<Vec<(EventKind, DateTime<Utc>, DateTime<Utc>)>>,
        now: DateTime<Utc>,
    }

    #[async_trait]
    impl EventStore for FakeEvents {
        async fn append(&self, _kind: EventKind) -> Result<(), AppError> {
            Ok(())
        }

        async fn count_between(
            &self,
            kind: EventKind,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> Result<i64, AppError> {
            if self.fail == Some(kind) {
                return Err(AppError::InternalServerError(anyhow::anyhow!("coleção fora do ar")));
            }
            self.ranges.lock().expect("lock").push((kind, from, to));
            let (current, previous) = self.counts.get(kind.table()).copied().unwrap_or((0, 0));
            // A janela atual termina em `now`; a anterior, 30 dias antes.
            if to == self.now {
                Ok(current)
            } else {
                Ok(previous)
            }
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .expect("timestamp de teste")
            .with_timezone(&Utc)
    }

    #[tokio::test]
    async fn agrega_as_tres_colecoes_com_variacao() {
        let now = fixed_now();
        let service = DashboardService::new(Arc::new(FakeEvents {
            counts: HashMap::from([
                ("page_views", (5, 0)),
                ("whatsapp_clicks", (8, 10)),
                ("appointments", (3, 2)),
            ]),
            fail: None,
            ranges: Mutex::new(Vec::new()),
            now,
        }));

        let metrics = service.aggregate(now).await;
        assert_eq!(metrics.views, MetricsWindow { total: 5, change: "+100%".to_string() });
        assert_eq!(metrics.clicks, MetricsWindow { total: 8, change: "-20.0%".to_string() });
        assert_eq!(metrics.appointments, MetricsWindow { total: 3, change: "+50.0%".to_string() });
    }

    #[tokio::test]
    async fn janelas_sao_contiguas_e_disjuntas() {
        let now = fixed_now();
        let events = Arc::new(FakeEvents {
            counts: HashMap::new(),
            fail: None,
            ranges: Mutex::new(Vec::new()),
            now,
        });
        let service = DashboardService::new(events.clone());

        service.aggregate(now).await;

        let ranges = events.ranges.lock().expect("lock");
        for chunk in ranges.chunks(2) {
            let (_, current_from, current_to) = chunk[0];
            let (_, previous_from, previous_to) = chunk[1];
            assert_eq!(current_to, now);
            assert_eq!(current_from, now - Duration::days(30));
            assert_eq!(previous_to, current_from);
            assert_eq!(previous_from, now - Duration::days(60));
        }
    }

    #[tokio::test]
    async fn colecao_com_falha_entrega_janela_zerada_sem_derrubar_o_painel() {
        let now = fixed_now();
        let service = DashboardService::new(Arc::new(FakeEvents {
            counts: HashMap::from([("page_views", (7, 7)), ("appointments", (1, 1))]),
            fail: Some(EventKind::WhatsappClick),
            ranges: Mutex::new(Vec::new()),
            now,
        }));

        let metrics = service.aggregate(now).await;
        assert_eq!(metrics.views.total, 7);
        assert_eq!(metrics.clicks, MetricsWindow::default());
        assert_eq!(metrics.appointments.total, 1);
    }
}
