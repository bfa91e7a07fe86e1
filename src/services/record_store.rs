//! services/record_store.rs
//! Acceso al store externo de registros. El esquema es del backend;
//! aquí solo se lee y se actualiza parcialmente.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Filas que cumplen los filtros de elegibilidad del perfil, en el orden del store.
    async fn fetch_eligible(&self) -> Result<Vec<Value>>;

    /// PATCH parcial de un registro. Devuelve cuántas filas cambió.
    async fn update_by_id(&self, id: &str, patch: &Value) -> Result<usize>;

    /// PATCH de todos los registros en "Erro no Envio".
    async fn update_failed(&self, patch: &Value) -> Result<usize>;

    /// Columnas de estado de todas las filas (para estadísticas).
    async fn fetch_statuses(&self) -> Result<Vec<Value>>;

    async fn insert(&self, row: &Value) -> Result<Value>;

    async fn call_rpc(&self, name: &str, payload: &Value) -> Result<Value>;
}
