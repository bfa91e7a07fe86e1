//! services/status_service.rs
//! Escritura del estado de email y reset administrativo.

use chrono::Utc;
use std::sync::Arc;

use crate::{
    config::source_config::SourceProfile,
    models::{record_model::EmailStatus, summary_model::ResetReport},
    services::record_store::RecordStore,
};

#[derive(Clone)]
pub struct StatusService {
    store: Arc<dyn RecordStore>,
    profile: SourceProfile,
}

impl StatusService {
    pub fn new(store: Arc<dyn RecordStore>, profile: SourceProfile) -> Self {
        Self { store, profile }
    }

    /// Actualiza estado, fecha de envío y error. Cualquier fallo queda en el log
    /// y se devuelve como `false`.
    pub async fn write_status(
        &self,
        record_id: &str,
        status: EmailStatus,
        error: Option<&str>,
    ) -> bool {
        let patch = self.profile.status_patch(status, error, Utc::now());

        match self.store.update_by_id(record_id, &patch).await {
            Ok(rows) => {
                if rows == 0 {
                    log::warn!(
                        "(write_status) PATCH de {} no devolvió filas (¿registro inexistente?)",
                        record_id
                    );
                }
                log::debug!("(write_status) {} -> '{}'", record_id, status);
                true
            }
            Err(e) => {
                log::error!(
                    "(write_status) Erro ao atualizar status do registro {}: {:?}",
                    record_id,
                    e
                );
                false
            }
        }
    }

    /// Vuelve a "Não enviado" los ids dados o, sin ids, todos los que están
    /// en "Erro no Envio". Limpia fecha y error.
    pub async fn reset(&self, ids: &[String]) -> ResetReport {
        let patch = self
            .profile
            .status_patch(EmailStatus::NaoEnviado, None, Utc::now());
        let mut report = ResetReport::default();

        if ids.is_empty() {
            log::info!("(reset) Reseteando todos los registros en '{}'", EmailStatus::ErroNoEnvio);
            match self.store.update_failed(&patch).await {
                Ok(rows) => report.reset_count = rows,
                Err(e) => {
                    log::error!("(reset) Fallo al resetear registros con error: {:?}", e);
                    report.error = Some(e.to_string());
                }
            }
            return report;
        }

        for id in ids {
            match self.store.update_by_id(id, &patch).await {
                Ok(rows) => report.reset_count += rows,
                Err(e) => {
                    log::error!("(reset) Erro ao resetar registro {}: {:?}", id, e);
                    report.failed_ids.push(id.clone());
                }
            }
        }
        report
    }
}
