//! models/summary_model.rs
//! Resumen de una pasada del batch.

use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Error,
}

/// Resultado de un registro dentro del batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordOutcome {
    pub record_id: Option<String>,
    pub reference: Option<String>,
    pub email: Option<String>,
    pub status: OutcomeStatus,
    pub message: String,
}

impl RecordOutcome {
    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub batch_id: Uuid,
    pub test_mode: bool,
    pub processed: usize,
    pub success_count: usize,
    pub error_count: usize,
    pub results: Vec<RecordOutcome>,
    /// Presente cuando la lectura falló; con `processed == 0` en ambos casos
    /// permite distinguir "sin registros" de "error al buscar".
    pub fetch_error: Option<String>,
}

impl BatchSummary {
    pub fn empty(batch_id: Uuid, test_mode: bool) -> Self {
        Self {
            batch_id,
            test_mode,
            processed: 0,
            success_count: 0,
            error_count: 0,
            results: Vec::new(),
            fetch_error: None,
        }
    }

    /// Agrega el resultado y actualiza los contadores.
    pub fn record(&mut self, outcome: RecordOutcome) {
        self.processed += 1;
        if outcome.is_success() {
            self.success_count += 1;
        } else {
            self.error_count += 1;
        }
        self.results.push(outcome);
    }
}

/// Resultado de un reset de estado.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResetReport {
    pub reset_count: usize,
    pub failed_ids: Vec<String>,
    /// Error del reset masivo (sin ids)
    pub error: Option<String>,
}

impl ResetReport {
    pub fn is_success(&self) -> bool {
        self.failed_ids.is_empty() && self.error.is_none()
    }
}
