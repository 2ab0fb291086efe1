// src/services/schedule.rs

use chrono::NaiveDate;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::{common::error::AppError, models::schedule::AppointmentRequest};

// Número de destino da clínica, fixo no deep link.
const CLINIC_WHATSAPP: &str = "5577998141406";

// Mesmo conjunto de escape do encodeURIComponent: tudo que não for
// alfanumérico ou um destes marcadores vira %XX.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Serializa o pedido de agendamento em um deep link do WhatsApp com a
/// mensagem pré-preenchida. Transformação pura; nada é persistido aqui.
///
/// A data chega como data de calendário (`YYYY-MM-DD`) e é reformatada para
/// `DD/MM/YYYY` sem passar por fuso horário, então nunca desloca um dia em
/// relação ao que o usuário digitou.
pub fn compose_whatsapp_link(request: &AppointmentRequest) -> Result<String, AppError> {
    let date = NaiveDate::parse_from_str(request.date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidAppointmentDate(request.date.clone()))?;
    let formatted_date = date.format("%d/%m/%Y").to_string();

    let notes = request
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("Nenhuma");

    let message = format!(
        "Olá Dra. Iêsa! Gostaria de pré-agendar uma consulta.\n\n\
         *Nome:* {}\n\
         *Telefone:* {}\n\
         *Serviço:* {}\n\
         *Data Preferencial:* {}\n\
         *Horário Preferencial:* {}\n\
         *Observações:* {}",
        request.name, request.phone, request.service, formatted_date, request.time, notes
    );

    Ok(format!(
        "https://wa.me/{}?text={}",
        CLINIC_WHATSAPP,
        utf8_percent_encode(&message, COMPONENT)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedule::ServiceKind;

    fn request() -> AppointmentRequest {
        AppointmentRequest {
            name: "Maria da Silva".to_string(),
            phone: "(77) 90000-0000".to_string(),
            service: ServiceKind::SessaoDePilates,
            date: "2024-03-15".to_string(),
            time: "14:30".to_string(),
            notes: None,
        }
    }

    #[test]
    fn data_e_formatada_no_padrao_brasileiro() {
        let url = compose_whatsapp_link(&request()).expect("composição falhou");
        // 15/03/2024, com as barras percent-codificadas.
        assert!(url.contains("15%2F03%2F2024"));
    }

    #[test]
    fn deep_link_aponta_para_o_numero_da_clinica() {
        let url = compose_whatsapp_link(&request()).expect("composição falhou");
        assert!(url.starts_with("https://wa.me/5577998141406?text="));
    }

    #[test]
    fn observacoes_vazias_viram_nenhuma() {
        let mut req = request();
        req.notes = None;
        let url = compose_whatsapp_link(&req).expect("composição falhou");
        assert!(url.contains("Nenhuma"));

        req.notes = Some("   ".to_string());
        let url = compose_whatsapp_link(&req).expect("composição falhou");
        assert!(url.contains("Nenhuma"));
    }

    #[test]
    fn observacoes_preenchidas_entram_na_mensagem() {
        let mut req = request();
        req.notes = Some("Dor no joelho".to_string());
        let url = compose_whatsapp_link(&req).expect("composição falhou");
        assert!(url.contains("Dor%20no%20joelho"));
        assert!(!url.contains("Nenhuma"));
    }

    #[test]
    fn asteriscos_de_negrito_sobrevivem_a_codificacao() {
        // encodeURIComponent preserva '*'; o negrito do WhatsApp depende disso.
        let url = compose_whatsapp_link(&request()).expect("composição falhou");
        assert!(url.contains("*Nome%3A*"));
        assert!(url.contains("*Servi%C3%A7o%3A*"));
    }

    #[test]
    fn servico_usa_o_rotulo_por_extenso() {
        let url = compose_whatsapp_link(&request()).expect("composição falhou");
        assert!(url.contains("Sess%C3%A3o%20de%20Pilates"));
    }

    #[test]
    fn data_invalida_falha_antes_de_montar_a_mensagem() {
        let mut req = request();
        req.date = "15/03/2024".to_string();
        let err = compose_whatsapp_link(&req).expect_err("deveria rejeitar");
        assert!(matches!(err, AppError::InvalidAppointmentDate(_)));

        req.date = "2024-02-30".to_string();
        assert!(compose_whatsapp_link(&req).is_err());
    }
}
