//! services/rest_store.rs
//! `RecordStore` sobre la API REST (PostgREST) del backend.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, Response};
use serde_json::Value;

use crate::{
    config::{app_config::AppConfig, source_config::SourceProfile},
    services::record_store::RecordStore,
};

#[derive(Clone)]
pub struct SupabaseStore {
    http_client: Client,
    rest_url: String,
    anon_key: String,
    bearer_token: String,
    profile: SourceProfile,
}

impl SupabaseStore {
    pub fn new(config: &AppConfig, profile: SourceProfile) -> Self {
        Self {
            http_client: Client::new(),
            rest_url: config.rest_url(),
            anon_key: config.anon_key.clone(),
            bearer_token: config.bearer_token.clone(),
            profile,
        }
    }

    pub fn profile(&self) -> &SourceProfile {
        &self.profile
    }

    /// Headers fijos: apikey + bearer, sin refresco de token.
    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("apikey", &self.anon_key)
            .bearer_auth(&self.bearer_token)
            .header(header::CONTENT_TYPE, "application/json")
    }

    fn table_url(&self, table: &str, filters: &[(String, String)]) -> String {
        let query = build_query(filters);
        if query.is_empty() {
            format!("{}/{}", self.rest_url, table)
        } else {
            format!("{}/{}?{}", self.rest_url, table, query)
        }
    }

    async fn get_rows(&self, filters: &[(String, String)]) -> Result<Vec<Value>> {
        let url = self.table_url(&self.profile.table, filters);
        log::debug!("(get_rows) GET {}", url);

        let resp = self
            .authorized(self.http_client.get(&url))
            .send()
            .await
            .context("Fallo al hacer GET en el store")?;
        let resp = ensure_success(resp, "GET").await?;

        resp.json::<Vec<Value>>()
            .await
            .context("Respuesta del store no es un array JSON")
    }

    /// PATCH sobre cualquier tabla. Pide la representación para contar filas.
    pub async fn patch_table(
        &self,
        table: &str,
        filters: &[(String, String)],
        patch: &Value,
    ) -> Result<usize> {
        let url = self.table_url(table, filters);
        log::debug!("(patch_table) PATCH {} body={}", url, patch);

        let resp = self
            .authorized(self.http_client.patch(&url))
            .header("Prefer", "return=representation")
            .json(patch)
            .send()
            .await
            .context("Fallo al hacer PATCH en el store")?;
        let resp = ensure_success(resp, "PATCH").await?;

        // 204 sin cuerpo: el store no devolvió representación
        let body = resp.text().await.unwrap_or_default();
        if body.trim().is_empty() {
            return Ok(0);
        }
        let rows: Value = serde_json::from_str(&body).context("Respuesta PATCH inválida")?;
        Ok(rows.as_array().map(Vec::len).unwrap_or(1))
    }
}

#[async_trait]
impl RecordStore for SupabaseStore {
    async fn fetch_eligible(&self) -> Result<Vec<Value>> {
        let mut filters = vec![("select".to_string(), self.profile.select.clone())];
        filters.extend(self.profile.eligibility_filters());
        self.get_rows(&filters).await
    }

    async fn update_by_id(&self, id: &str, patch: &Value) -> Result<usize> {
        let filters = [("id".to_string(), format!("eq.{}", id))];
        self.patch_table(&self.profile.table, &filters, patch).await
    }

    async fn update_failed(&self, patch: &Value) -> Result<usize> {
        let filters = self.profile.failed_filters();
        self.patch_table(&self.profile.table, &filters, patch).await
    }

    async fn fetch_statuses(&self) -> Result<Vec<Value>> {
        let filters = [("select".to_string(), self.profile.stats_select())];
        self.get_rows(&filters).await
    }

    async fn insert(&self, row: &Value) -> Result<Value> {
        let url = self.table_url(&self.profile.table, &[]);
        log::info!("(insert) POST {}", url);

        let resp = self
            .authorized(self.http_client.post(&url))
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await
            .context("Fallo al hacer POST en el store")?;
        let resp = ensure_success(resp, "POST").await?;

        let created: Value = resp.json().await.context("Respuesta POST inválida")?;
        // PostgREST devuelve un array con las filas creadas
        Ok(match created {
            Value::Array(mut rows) if !rows.is_empty() => rows.swap_remove(0),
            other => other,
        })
    }

    async fn call_rpc(&self, name: &str, payload: &Value) -> Result<Value> {
        let url = format!("{}/rpc/{}", self.rest_url, name);
        log::debug!("(call_rpc) POST {}", url);

        let resp = self
            .authorized(self.http_client.post(&url))
            .json(payload)
            .send()
            .await
            .with_context(|| format!("Fallo al llamar RPC {}", name))?;
        let resp = ensure_success(resp, "RPC").await?;

        resp.json().await.context("Respuesta RPC inválida")
    }
}

/// Convierte una respuesta no-2xx en error con el cuerpo incluido.
pub async fn ensure_success(resp: Response, what: &str) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body_txt = resp.text().await.unwrap_or_default();
    log::error!("({}) Respuesta NO exitosa: status={} body='{}'", what, status, body_txt);
    Err(anyhow!("Erro HTTP {}: {}", status.as_u16(), body_txt))
}

/// Query string `k=v&...` con los valores codificados.
pub fn build_query(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
