//! models/record_model.rs
//! Registro leído del store (ocurrencia o fila de planilla) y su estado de email.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Ciclo de vida del envío. Los literales son los que guarda el backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmailStatus {
    #[serde(rename = "Não enviado")]
    NaoEnviado,
    #[serde(rename = "Aguardando Retorno")]
    AguardandoRetorno,
    #[serde(rename = "Enviado")]
    Enviado,
    #[serde(rename = "Erro no Envio")]
    ErroNoEnvio,
}

impl EmailStatus {
    pub const ALL: [EmailStatus; 4] = [
        EmailStatus::NaoEnviado,
        EmailStatus::AguardandoRetorno,
        EmailStatus::Enviado,
        EmailStatus::ErroNoEnvio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmailStatus::NaoEnviado => "Não enviado",
            EmailStatus::AguardandoRetorno => "Aguardando Retorno",
            EmailStatus::Enviado => "Enviado",
            EmailStatus::ErroNoEnvio => "Erro no Envio",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw.trim())
    }
}

impl fmt::Display for EmailStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Campos que se muestran en el cuerpo del email.
/// Todos son opcionales: el template pone "N/A" u omite el segmento.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordDisplay {
    /// Identificador de negocio (contrato, nº de ocurrencia...)
    pub reference: Option<String>,
    pub building: Option<String>,
    pub address_line: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub recipient: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: String,
    pub status: EmailStatus,
    pub sent_at: Option<String>,
    pub error: Option<String>,
    pub display: RecordDisplay,
}

impl Record {
    /// Identificador que va en el cuerpo del email.
    pub fn reference(&self) -> &str {
        self.display.reference.as_deref().unwrap_or(&self.id)
    }

    pub fn recipient(&self) -> Option<&str> {
        self.display.recipient.as_deref()
    }

    pub fn is_eligible(&self) -> bool {
        self.status == EmailStatus::NaoEnviado && self.recipient().is_some()
    }
}

/// Lee un campo como texto. Acepta strings no vacíos y números
/// (los ids de la planilla pueden venir como bigint).
pub fn json_text(row: &Value, key: &str) -> Option<String> {
    match row.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
