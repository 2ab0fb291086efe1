// src/services/analytics.rs

use std::sync::Arc;

use crate::db::{EventKind, EventStore};

/// Registro de eventos "dispare e esqueça": a tarefa roda desacoplada da
/// requisição e o único canal de erro é o log. Nenhum caminho que serve
/// página pode esperar ou falhar por causa de analytics.
#[derive(Clone)]
pub struct AnalyticsService {
    sink: Arc<dyn EventStore>,
}

impl AnalyticsService {
    pub fn new(sink: Arc<dyn EventStore>) -> Self {
        Self { sink }
    }

    pub fn record(&self, kind: EventKind) {
        let sink = Arc::clone(&self.sink);
        tokio::spawn(async move {
            if let Err(e) = sink.append(kind).await {
                tracing::warn!("Falha ao registrar evento em {}: {}", kind.table(), e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::AppError;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::time::Duration;
    use tokio::sync::mpsc;

    struct ChannelSink {
        tx: mpsc::UnboundedSender<EventKind>,
        fail: bool,
    }

    #[async_trait]
    impl EventStore for ChannelSink {
        async fn append(&self, kind: EventKind) -> Result<(), AppError> {
            if self.fail {
                return Err(AppError::InternalServerError(anyhow::anyhow!("indisponível")));
            }
            let _ = self.tx.send(kind);
            Ok(())
        }

        async fn count_between(
            &self,
            _kind: EventKind,
            _from: DateTime<Utc>,
            _to: DateTime<Utc>,
        ) -> Result<i64, AppError> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn record_anexa_o_evento_em_segundo_plano() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let service = AnalyticsService::new(Arc::new(ChannelSink { tx, fail: false }));

        service.record(EventKind::PageView);

        let received = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("evento não chegou a tempo");
        assert_eq!(received, Some(EventKind::PageView));
    }

    #[tokio::test]
    async fn falha_no_sink_nao_propaga_para_o_chamador() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let service = AnalyticsService::new(Arc::new(ChannelSink { tx, fail: true }));

        // Só loga; nada a observar além de não entrar em pânico.
        service.record(EventKind::WhatsappClick);
        tokio::task::yield_now().await;
    }
}
