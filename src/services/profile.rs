// src/services/profile.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{EventKind, SettingsStore},
    models::profile::{ProfileConfig, RenderedCard},
    services::{
        analytics::AnalyticsService,
        carousel::{CAROUSEL_IMAGES, ROTATION_INTERVAL},
    },
};

/// Resolve qual configuração de cartão renderizar para a navegação atual.
///
/// Ordem: modelo pedido via `tid` → registro padrão do site → cartão embutido
/// no binário. Nenhuma falha de leitura atravessa esta fronteira; o pior caso
/// é a página pública renderizar o cartão embutido.
#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn SettingsStore>,
    analytics: AnalyticsService,
}

impl ProfileService {
    pub fn new(store: Arc<dyn SettingsStore>, analytics: AnalyticsService) -> Self {
        Self { store, analytics }
    }

    /// Resolução de carga de página: além de resolver, registra uma visita.
    /// O registro é independente do desfecho da resolução e nunca a bloqueia.
    pub async fn resolve(&self, template_id: Option<Uuid>) -> ProfileConfig {
        self.analytics.record(EventKind::PageView);
        self.lookup(template_id).await
    }

    /// Carga de página completa: configuração resolvida já renderizada.
    pub async fn render(&self, template_id: Option<Uuid>) -> RenderedCard {
        let config = self.resolve(template_id).await;
        let images = CAROUSEL_IMAGES.iter().map(|s| s.to_string()).collect();
        RenderedCard::render(&config, images, ROTATION_INTERVAL.as_secs())
    }

    // Sem retries: uma leitura falhada vale como "use o padrão", não como
    // erro a recuperar.
    async fn lookup(&self, template_id: Option<Uuid>) -> ProfileConfig {
        if let Some(id) = template_id {
            match self.store.template_config(id).await {
                Ok(Some(config)) => return config.normalized(),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("Falha ao ler o modelo {}: {}; usando o padrão", id, e);
                }
            }
        }

        match self.store.default_config().await {
            Ok(Some(config)) => config.normalized(),
            Ok(None) => ProfileConfig::fallback(),
            Err(e) => {
                tracing::warn!("Falha ao ler a configuração padrão: {}; usando o cartão embutido", e);
                ProfileConfig::fallback()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::AppError;
    use crate::db::EventStore;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::collections::HashMap;

    struct FakeStore {
        templates: HashMap<Uuid, ProfileConfig>,
        default: Option<ProfileConfig>,
        fail_reads: bool,
    }

    #[async_trait]
    impl SettingsStore for FakeStore {
        async fn template_config(&self, id: Uuid) -> Result<Option<ProfileConfig>, AppError> {
            if self.fail_reads {
                return Err(AppError::InternalServerError(anyhow::anyhow!("loja fora do ar")));
            }
            Ok(self.templates.get(&id).cloned())
        }

        async fn default_config(&self) -> Result<Option<ProfileConfig>, AppError> {
            if self.fail_reads {
                return Err(AppError::InternalServerError(anyhow::anyhow!("loja fora do ar")));
            }
            Ok(self.default.clone())
        }
    }

    struct NullSink;

    #[async_trait]
    impl EventStore for NullSink {
        async fn append(&self, _kind: EventKind) -> Result<(), AppError> {
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

    fn config(name: &str, id: Option<Uuid>) -> ProfileConfig {
        ProfileConfig {
            id,
            professional_name: name.to_string(),
            specialty: "Fisioterapeuta | CREFITO 1".to_string(),
            location: "Salvador".to_string(),
            whatsapp_number: "5571990000000".to_string(),
            profile_image_url: "/foto.png".to_string(),
            theme_color: "#123456".to_string(),
        }
    }

    fn service(store: FakeStore) -> ProfileService {
        ProfileService::new(Arc::new(store), AnalyticsService::new(Arc::new(NullSink)))
    }

    #[tokio::test]
    async fn resolve_com_id_presente_devolve_o_modelo_inalterado() {
        let id = Uuid::new_v4();
        let tpl = config("Dra. Modelo", Some(id));
        let svc = service(FakeStore {
            templates: HashMap::from([(id, tpl.clone())]),
            default: Some(config("Padrão", None)),
            fail_reads: false,
        });

        assert_eq!(svc.resolve(Some(id)).await, tpl);
    }

    #[tokio::test]
    async fn id_desconhecido_cai_no_padrao() {
        let default = config("Padrão", None);
        let svc = service(FakeStore {
            templates: HashMap::new(),
            default: Some(default.clone()),
            fail_reads: false,
        });

        assert_eq!(svc.resolve(Some(Uuid::new_v4())).await, default);
    }

    #[tokio::test]
    async fn resolve_sem_id_equivale_ao_caminho_padrao() {
        let default = config("Padrão", None);
        let svc = service(FakeStore {
            templates: HashMap::new(),
            default: Some(default.clone()),
            fail_reads: false,
        });

        let none = svc.resolve(None).await;
        let unknown = svc.resolve(Some(Uuid::new_v4())).await;
        assert_eq!(none, default);
        assert_eq!(none, unknown);
    }

    #[tokio::test]
    async fn falha_total_de_leitura_devolve_o_cartao_embutido() {
        let svc = service(FakeStore {
            templates: HashMap::new(),
            default: None,
            fail_reads: true,
        });

        let resolved = svc.resolve(Some(Uuid::new_v4())).await;
        assert_eq!(resolved, ProfileConfig::fallback());
        // Invariante: campos obrigatórios nunca vazios, haja o que houver.
        assert!(!resolved.professional_name.is_empty());
        assert!(!resolved.profile_image_url.is_empty());
    }

    #[tokio::test]
    async fn padrao_ausente_tambem_cai_no_cartao_embutido() {
        let svc = service(FakeStore {
            templates: HashMap::new(),
            default: None,
            fail_reads: false,
        });

        assert_eq!(svc.resolve(None).await, ProfileConfig::fallback());
    }

    #[tokio::test]
    async fn registro_invalido_e_normalizado_antes_de_sair() {
        let id = Uuid::new_v4();
        let mut tpl = config("", Some(id));
        tpl.profile_image_url = String::new();
        let svc = service(FakeStore {
            templates: HashMap::from([(id, tpl)]),
            default: None,
            fail_reads: false,
        });

        let resolved = svc.resolve(Some(id)).await;
        assert!(!resolved.professional_name.is_empty());
        assert!(!resolved.profile_image_url.is_empty());
    }

    #[tokio::test]
    async fn render_monta_o_cartao_com_o_carrossel_fixo() {
        let svc = service(FakeStore {
            templates: HashMap::new(),
            default: Some(config("Padrão Site", None)),
            fail_reads: false,
        });

        let card = svc.render(None).await;
        assert_eq!(card.professional_name, "Padrão Site");
        assert_eq!(card.carousel_images.len(), CAROUSEL_IMAGES.len());
        assert_eq!(card.carousel_interval_secs, 5);
    }
}
