//! services/remote_service.rs
//! Invoca la función remota que hace el envío masivo del lado del backend.

use anyhow::{anyhow, Context, Result};
use reqwest::{header, Client};
use std::time::Duration;

use crate::{
    config::{app_config::AppConfig, source_config::SourceProfile},
    models::remote_model::{RemoteBatchRequest, RemoteBatchResponse},
    services::rest_store::ensure_success,
};

#[derive(Clone)]
pub struct RemoteBatchService {
    http_client: Client,
    function_url: String,
    anon_key: String,
    bearer_token: String,
    timeout: Duration,
}

impl RemoteBatchService {
    pub fn new(config: &AppConfig, profile: &SourceProfile) -> Self {
        Self {
            http_client: Client::new(),
            function_url: format!("{}/{}", config.functions_url(), profile.remote_function),
            anon_key: config.anon_key.clone(),
            bearer_token: config.bearer_token.clone(),
            timeout: config.remote_function_timeout,
        }
    }

    pub fn function_url(&self) -> &str {
        &self.function_url
    }

    pub async fn run(&self, limit: usize, test_mode: bool) -> Result<RemoteBatchResponse> {
        let payload = RemoteBatchRequest { limit, test_mode };
        log::info!(
            "(remote_batch) POST {} limit={} testMode={}",
            self.function_url,
            limit,
            test_mode
        );

        let resp = self
            .http_client
            .post(&self.function_url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.bearer_token)
            .header(header::CONTENT_TYPE, "application/json")
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    anyhow!(
                        "Timeout - Processamento demorou mais que {} minutos",
                        self.timeout.as_secs() / 60
                    )
                } else {
                    anyhow!(e).context("Fallo al invocar la función remota")
                }
            })?;
        let resp = ensure_success(resp, "remote_batch").await?;

        resp.json::<RemoteBatchResponse>()
            .await
            .context("Respuesta de la función remota inválida")
    }
}
