//! services/template_service.rs
//! Arma el email de consulta de débitos a partir de un registro.
//! Nunca falla: los campos ausentes quedan como "N/A" o se omiten.

use crate::models::{email_model::OutgoingEmail, record_model::Record};

pub const PLACEHOLDER: &str = "N/A";

/// "calle, número - complemento", solo con las partes presentes.
pub fn full_address(
    address_line: Option<&str>,
    number: Option<&str>,
    complement: Option<&str>,
) -> String {
    let mut full = address_line.unwrap_or_default().to_string();
    if let Some(number) = number {
        if full.is_empty() {
            full.push_str(number);
        } else {
            full.push_str(&format!(", {}", number));
        }
    }
    if let Some(complement) = complement {
        if full.is_empty() {
            full.push_str(complement);
        } else {
            full.push_str(&format!(" - {}", complement));
        }
    }
    full
}

pub fn render_body(record: &Record) -> String {
    let d = &record.display;
    let address = full_address(
        d.address_line.as_deref(),
        d.number.as_deref(),
        d.complement.as_deref(),
    );
    let address = if address.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        address
    };

    format!(
        "Olá, boa tarde, tudo bem?\n\
         Poderia por gentileza me informar se constam débitos de condomínio em aberto relacionados ao imóvel abaixo?\n\
         {}\n\
         \n\
         Obrigada!\n\
         \n\
         {}\n\
         {}",
        record.reference(),
        d.building.as_deref().unwrap_or(PLACEHOLDER),
        address
    )
}

pub fn render_subject(record: &Record) -> String {
    format!(
        "Consulta de Débitos - {}",
        record.display.building.as_deref().unwrap_or(PLACEHOLDER)
    )
}

/// Email completo; el destinatario puede faltar (el dispatcher lo valida).
pub fn render_email(record: &Record) -> OutgoingEmail {
    OutgoingEmail {
        recipient: record.recipient().unwrap_or_default().to_string(),
        subject: render_subject(record),
        body: render_body(record),
    }
}
