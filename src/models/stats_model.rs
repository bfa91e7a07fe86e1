//! models/stats_model.rs

use serde::{Deserialize, Serialize};

use crate::models::record_model::EmailStatus;

/// Conteo de registros por estado de email.
/// Mismas claves que devuelve la RPC `get_email_stats`; `total` es obligatorio
/// para no confundir una respuesta de error con un conteo vacío.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusStats {
    #[serde(default)]
    pub nao_enviado: u64,
    #[serde(default)]
    pub aguardando_retorno: u64,
    #[serde(default)]
    pub enviado: u64,
    #[serde(default)]
    pub erro_no_envio: u64,
    pub total: u64,
}

impl StatusStats {
    pub fn count(&mut self, status: EmailStatus) {
        match status {
            EmailStatus::NaoEnviado => self.nao_enviado += 1,
            EmailStatus::AguardandoRetorno => self.aguardando_retorno += 1,
            EmailStatus::Enviado => self.enviado += 1,
            EmailStatus::ErroNoEnvio => self.erro_no_envio += 1,
        }
    }
}
