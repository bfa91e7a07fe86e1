//! services/stats_service.rs
//! Conteo de registros por estado de email.

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{
    config::source_config::SourceProfile, models::stats_model::StatusStats,
    services::record_store::RecordStore,
};

#[derive(Clone)]
pub struct StatsService {
    store: Arc<dyn RecordStore>,
    profile: SourceProfile,
}

impl StatsService {
    pub fn new(store: Arc<dyn RecordStore>, profile: SourceProfile) -> Self {
        Self { store, profile }
    }

    /// Primero la RPC del perfil, si tiene; si falla, se cuentan las filas a mano.
    pub async fn stats(&self) -> Result<StatusStats> {
        let Some(rpc_name) = &self.profile.stats_rpc else {
            return self.stats_fallback().await;
        };
        match self.store.call_rpc(rpc_name, &json!({})).await {
            Ok(value) => match serde_json::from_value::<StatusStats>(value) {
                Ok(stats) => return Ok(stats),
                Err(e) => log::warn!("(stats) Respuesta RPC inesperada, usando fallback: {}", e),
            },
            Err(e) => log::warn!("(stats) RPC {} no disponible, usando fallback: {}", rpc_name, e),
        }
        self.stats_fallback().await
    }

    pub async fn stats_fallback(&self) -> Result<StatusStats> {
        let rows = self
            .store
            .fetch_statuses()
            .await
            .context("Erro ao buscar estatísticas")?;
        Ok(count_statuses(&self.profile, &rows))
    }
}

/// Estados desconocidos suman al total pero a ningún estado.
pub fn count_statuses(profile: &SourceProfile, rows: &[Value]) -> StatusStats {
    let mut stats = StatusStats {
        total: rows.len() as u64,
        ..StatusStats::default()
    };
    for row in rows {
        match profile.read_status(row) {
            Some(status) => stats.count(status),
            None => log::debug!("(count_statuses) Estado desconocido: {}", row),
        }
    }
    stats
}
