// src/models/schedule.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Conjunto fixo de serviços oferecidos no formulário de agendamento.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ServiceKind {
    #[default]
    #[serde(rename = "Avaliação Fisioterapêutica")]
    AvaliacaoFisioterapeutica,
    #[serde(rename = "Atendimento Domiciliar")]
    AtendimentoDomiciliar,
    #[serde(rename = "Liberação Miofascial")]
    LiberacaoMiofascial,
    #[serde(rename = "Sessão de Pilates")]
    SessaoDePilates,
    #[serde(rename = "Outro")]
    Outro,
}

impl ServiceKind {
    pub fn label(&self) -> &'static str {
        match self {
            ServiceKind::AvaliacaoFisioterapeutica => "Avaliação Fisioterapêutica",
            ServiceKind::AtendimentoDomiciliar => "Atendimento Domiciliar",
            ServiceKind::LiberacaoMiofascial => "Liberação Miofascial",
            ServiceKind::SessaoDePilates => "Sessão de Pilates",
            ServiceKind::Outro => "Outro",
        }
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Pedido de agendamento. Efêmero: existe só para compor a mensagem do
/// WhatsApp e nunca é persistido por este sistema.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Maria da Silva")]
    pub name: String,

    #[validate(length(min = 1, message = "O telefone é obrigatório."))]
    #[schema(example = "(77) 90000-0000")]
    pub phone: String,

    #[serde(default)]
    pub service: ServiceKind,

    // Data no formato do input HTML (YYYY-MM-DD)
    #[validate(length(min = 1, message = "A data é obrigatória."))]
    #[schema(example = "2024-03-15")]
    pub date: String,

    #[validate(length(min = 1, message = "O horário é obrigatório."))]
    #[schema(example = "14:30")]
    pub time: String,

    pub notes: Option<String>,
}

// Resposta com o deep link pronto para abrir o WhatsApp.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    #[schema(example = "https://wa.me/5577998141406?text=...")]
    pub whatsapp_url: String,
}
