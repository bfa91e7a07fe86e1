//! services/batch_service.rs
//! Pasada secuencial: buscar elegibles -> renderizar -> enviar -> escribir estado.
//! El fallo de un registro nunca corta el batch.

use anyhow::Result;
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use uuid::Uuid;

use crate::{
    config::source_config::SourceProfile,
    models::{
        email_model::OutgoingEmail,
        record_model::{json_text, EmailStatus, Record},
        summary_model::{BatchSummary, OutcomeStatus, RecordOutcome},
    },
    services::{
        dispatch_service::Dispatcher, record_store::RecordStore, status_service::StatusService,
        template_service,
    },
};

pub const MSG_SENT: &str = "Email enviado com sucesso";
pub const MSG_SEND_FAILED: &str = "Falha no envio do email";
pub const MSG_STATUS_UPDATE_FAILED: &str = "Falha ao atualizar status";

#[derive(Clone)]
pub struct BatchService {
    store: Arc<dyn RecordStore>,
    profile: SourceProfile,
    dispatcher: Dispatcher,
    status: StatusService,
    pause: Duration,
}

impl BatchService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        profile: SourceProfile,
        dispatcher: Dispatcher,
        pause: Duration,
    ) -> Self {
        let status = StatusService::new(store.clone(), profile.clone());
        Self {
            store,
            profile,
            dispatcher,
            status,
            pause,
        }
    }

    /// Registros elegibles en el orden del store. El filtro se vuelve a
    /// aplicar aquí por si el store devuelve filas de más.
    pub async fn fetch_eligible(&self) -> Result<Vec<Value>> {
        let rows = self.store.fetch_eligible().await?;
        let fetched = rows.len();
        let eligible: Vec<Value> = rows
            .into_iter()
            .filter(|row| self.profile.row_is_eligible(row))
            .collect();
        if eligible.len() != fetched {
            log::warn!(
                "(fetch_eligible) {} filas descartadas por no ser elegibles",
                fetched - eligible.len()
            );
        }
        Ok(eligible)
    }

    /// Procesa hasta `limit` registros (`None` o 0 = todos).
    pub async fn process(&self, limit: Option<usize>) -> BatchSummary {
        let mode = self.dispatcher.mode();
        let mut summary = BatchSummary::empty(Uuid::new_v4(), mode.is_test());

        println!("🚀 Iniciando processamento de emails ({})...", self.profile.table);
        println!("   Modo: {}", mode.label());
        println!(
            "   Limite: {}",
            limit
                .filter(|n| *n > 0)
                .map_or("Todos".to_string(), |n| n.to_string())
        );
        println!();
        log::info!(
            "(process) batch_id={} table={} mode={:?} limit={:?}",
            summary.batch_id,
            self.profile.table,
            mode,
            limit
        );

        let mut rows = match self.fetch_eligible().await {
            Ok(rows) => rows,
            Err(e) => {
                log::error!("(process) Erro ao buscar registros: {:?}", e);
                println!("❌ Erro ao buscar registros: {}", e);
                summary.fetch_error = Some(e.to_string());
                return summary;
            }
        };

        if rows.is_empty() {
            println!("ℹ️  Nenhum registro encontrado para envio");
            return summary;
        }

        if let Some(n) = limit.filter(|n| *n > 0) {
            rows.truncate(n);
        }

        let total = rows.len();
        println!("📊 Encontrados {} registros para processar", total);
        println!();

        for (i, row) in rows.iter().enumerate() {
            if i > 0 && !mode.is_test() && !self.pause.is_zero() {
                tokio::time::sleep(self.pause).await;
            }

            let outcome = match self.process_row(i + 1, total, row).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    println!("   ❌ Erro ao processar: {}", e);
                    self.record_failure(row, &e.to_string()).await
                }
            };
            summary.record(outcome);
            println!();
        }

        println!("📊 Processamento concluído:");
        println!("   ✅ Sucessos: {}", summary.success_count);
        println!("   ❌ Erros: {}", summary.error_count);
        println!("   📧 Total processado: {}", summary.processed);
        log::info!(
            "(process) batch_id={} processed={} success={} error={}",
            summary.batch_id,
            summary.processed,
            summary.success_count,
            summary.error_count
        );

        summary
    }

    /// Envía el primer registro elegible a `address` en lugar de su destinatario.
    /// `None` si no hay registros.
    pub async fn send_test_email(&self, address: &str) -> Option<RecordOutcome> {
        println!("🧪 Enviando email de teste para: {}", address);

        let rows = match self.fetch_eligible().await {
            Ok(rows) => rows,
            Err(e) => {
                log::error!("(send_test_email) Erro ao buscar registros: {:?}", e);
                println!("❌ Erro ao buscar registros: {}", e);
                return None;
            }
        };
        let Some(row) = rows.first() else {
            println!("❌ Nenhum registro encontrado");
            return None;
        };

        let mut record = match self.profile.parse_record(row) {
            Ok(record) => record,
            Err(e) => return Some(self.record_failure(row, &e.to_string()).await),
        };
        record.display.recipient = Some(address.to_string());

        println!("📋 Usando registro: {}", record.reference());
        println!(
            "🏢 Edifício: {}",
            record
                .display
                .building
                .as_deref()
                .unwrap_or(template_service::PLACEHOLDER)
        );

        let email = template_service::render_email(&record);
        Some(self.deliver(&record, &email).await)
    }

    async fn process_row(&self, position: usize, total: usize, row: &Value) -> Result<RecordOutcome> {
        let record = self.profile.parse_record(row)?;

        println!("📧 [{}/{}] Processando: {}", position, total, record.reference());
        println!("   Email: {}", record.recipient().unwrap_or_default());
        println!(
            "   Edifício: {}",
            record
                .display
                .building
                .as_deref()
                .unwrap_or(template_service::PLACEHOLDER)
        );

        let email = template_service::render_email(&record);
        Ok(self.deliver(&record, &email).await)
    }

    /// Envío + escritura de estado de un registro ya renderizado.
    async fn deliver(&self, record: &Record, email: &OutgoingEmail) -> RecordOutcome {
        if !self.dispatcher.dispatch(email).await {
            println!("   ❌ {}", MSG_SEND_FAILED);
            if !self
                .status
                .write_status(&record.id, EmailStatus::ErroNoEnvio, Some(MSG_SEND_FAILED))
                .await
            {
                log::warn!("(deliver) Registro {} queda en su estado anterior", record.id);
            }
            return outcome(record, OutcomeStatus::Error, MSG_SEND_FAILED);
        }

        if self
            .status
            .write_status(&record.id, EmailStatus::AguardandoRetorno, None)
            .await
        {
            println!("   ✅ Status atualizado para '{}'", EmailStatus::AguardandoRetorno);
            outcome(record, OutcomeStatus::Success, MSG_SENT)
        } else {
            println!("   ⚠️  Email enviado mas falha ao atualizar status");
            if !self
                .status
                .write_status(
                    &record.id,
                    EmailStatus::ErroNoEnvio,
                    Some(MSG_STATUS_UPDATE_FAILED),
                )
                .await
            {
                log::warn!("(deliver) Registro {} queda en su estado anterior", record.id);
            }
            outcome(record, OutcomeStatus::Error, MSG_STATUS_UPDATE_FAILED)
        }
    }

    /// Cuenta el error y, si la fila tiene id, intenta dejarla en "Erro no Envio".
    async fn record_failure(&self, row: &Value, message: &str) -> RecordOutcome {
        let record_id = json_text(row, "id");
        match &record_id {
            Some(id) => {
                if !self
                    .status
                    .write_status(id, EmailStatus::ErroNoEnvio, Some(message))
                    .await
                {
                    log::warn!("(record_failure) Registro {} queda en su estado anterior", id);
                }
            }
            None => log::error!("(record_failure) Fila sin id, no se puede marcar: {}", row),
        }

        RecordOutcome {
            record_id,
            reference: None,
            email: self.profile.read_recipient(row),
            status: OutcomeStatus::Error,
            message: message.to_string(),
        }
    }
}

fn outcome(record: &Record, status: OutcomeStatus, message: &str) -> RecordOutcome {
    RecordOutcome {
        record_id: Some(record.id.clone()),
        reference: Some(record.reference().to_string()),
        email: record.recipient().map(str::to_string),
        status,
        message: message.to_string(),
    }
}
