// src/services/preview.rs

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

// Capacidade folgada: o editor é operado por uma pessoa só.
const CHANNEL_CAPACITY: usize = 16;

/// Evento de recarga enviado ao preview embutido do editor.
/// `revision` cresce a cada salvamento e serve de parâmetro cache-buster
/// para clientes que preferem recarregar a URL em vez de ouvir o canal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewReload {
    pub template_id: Uuid,
    pub revision: i64,
}

/// Ponte única entre "o editor persistiu conteúdo novo" e "o que o preview
/// mostra". Não existe canal direto em memória entre o estado do editor e o
/// renderizador embutido: o fluxo é sempre persistir e então forçar o
/// consumidor a re-resolver a configuração pela loja.
#[derive(Clone, Default)]
pub struct PreviewHub {
    channels: Arc<Mutex<HashMap<Uuid, broadcast::Sender<PreviewReload>>>>,
}

impl PreviewHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, template_id: Uuid) -> broadcast::Receiver<PreviewReload> {
        let mut channels = self.channels.lock().expect("lock do hub de preview envenenado");
        channels
            .entry(template_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Chamado apenas depois que a mutação persistiu com sucesso: o preview
    /// nunca pode mostrar conteúdo de um salvamento que falhou.
    pub fn notify(&self, template_id: Uuid, revision: i64) {
        let channels = self.channels.lock().expect("lock do hub de preview envenenado");
        if let Some(tx) = channels.get(&template_id) {
            // Sem assinante conectado o envio falha; não é um erro.
            let _ = tx.send(PreviewReload { template_id, revision });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn um_evento_por_salvamento_bem_sucedido() {
        let hub = PreviewHub::new();
        let id = Uuid::new_v4();
        let mut rx = hub.subscribe(id);

        hub.notify(id, 1);

        let reload = rx.recv().await.expect("evento de recarga");
        assert_eq!(reload, PreviewReload { template_id: id, revision: 1 });
        // Exatamente um: não há segundo evento pendente.
        assert!(matches!(rx.try_recv(), Err(broadcast::error::TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn dois_salvamentos_geram_dois_eventos_em_ordem() {
        let hub = PreviewHub::new();
        let id = Uuid::new_v4();
        let mut rx = hub.subscribe(id);

        hub.notify(id, 1);
        hub.notify(id, 2);

        assert_eq!(rx.recv().await.expect("primeiro").revision, 1);
        assert_eq!(rx.recv().await.expect("segundo").revision, 2);
    }

    #[tokio::test]
    async fn notificacao_sem_assinante_e_inofensiva() {
        let hub = PreviewHub::new();
        hub.notify(Uuid::new_v4(), 7);
    }

    #[tokio::test]
    async fn canais_sao_isolados_por_modelo() {
        let hub = PreviewHub::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut rx_a = hub.subscribe(a);
        let mut rx_b = hub.subscribe(b);

        hub.notify(a, 1);

        assert_eq!(rx_a.recv().await.expect("evento de a").template_id, a);
        assert!(matches!(rx_b.try_recv(), Err(broadcast::error::TryRecvError::Empty)));
    }
}
