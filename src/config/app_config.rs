//! config/app_config.rs
//! Configuración del proceso leída de variables de entorno (o `.env`).

use anyhow::{anyhow, bail, Context, Result};
use std::time::Duration;

/// Transporte de correo a usar en modo real.
#[derive(Debug, Clone, PartialEq)]
pub enum MailTransportConfig {
    /// No entrega nada; solo registra el envío (comportamiento histórico)
    None,
    Smtp {
        host: String,
        port: u16,
        user: String,
        pass: String,
    },
    SendGrid {
        api_key: String,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub anon_key: String,
    pub bearer_token: String,
    pub mail_from: Option<String>,
    pub mail_from_name: String,
    pub transport: MailTransportConfig,
    /// Pausa entre registros en modo real
    pub batch_pause: Duration,
    pub remote_function_name: String,
    pub spreadsheet_function_name: String,
    pub remote_function_timeout: Duration,
    pub stats_rpc_name: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Igual que `from_env` pero con cualquier fuente de claves.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| get(key).ok_or_else(|| anyhow!("{} no está definida", key));

        let supabase_url = require("SUPABASE_URL")?.trim_end_matches('/').to_string();
        let anon_key = require("SUPABASE_ANON_KEY")?;
        let bearer_token = get("SUPABASE_BEARER_TOKEN").unwrap_or_else(|| anon_key.clone());

        let transport = match get("MAIL_TRANSPORT")
            .unwrap_or_else(|| "none".to_string())
            .to_lowercase()
            .as_str()
        {
            "none" | "noop" | "" => MailTransportConfig::None,
            "smtp" => MailTransportConfig::Smtp {
                host: require("SMTP_HOST")?,
                port: match get("SMTP_PORT") {
                    Some(p) => p.parse().context("SMTP_PORT inválido")?,
                    None => 587,
                },
                user: require("SMTP_USER")?,
                pass: require("SMTP_PASS")?,
            },
            "sendgrid" => MailTransportConfig::SendGrid {
                api_key: require("SENDGRID_API_KEY")?,
            },
            other => bail!("MAIL_TRANSPORT desconocido: {}", other),
        };

        let mail_from = get("MAIL_FROM").or_else(|| match &transport {
            MailTransportConfig::Smtp { user, .. } => Some(user.clone()),
            _ => None,
        });
        if matches!(transport, MailTransportConfig::SendGrid { .. }) && mail_from.is_none() {
            bail!("MAIL_FROM es obligatorio con MAIL_TRANSPORT=sendgrid");
        }

        let batch_pause = match get("BATCH_PAUSE_MS") {
            Some(ms) => Duration::from_millis(ms.parse().context("BATCH_PAUSE_MS inválido")?),
            None => Duration::from_secs(1),
        };
        let remote_function_timeout = match get("REMOTE_FUNCTION_TIMEOUT_SECS") {
            Some(s) => Duration::from_secs(
                s.parse()
                    .context("REMOTE_FUNCTION_TIMEOUT_SECS inválido")?,
            ),
            None => Duration::from_secs(300),
        };

        Ok(AppConfig {
            supabase_url,
            anon_key,
            bearer_token,
            mail_from,
            mail_from_name: get("MAIL_FROM_NAME").unwrap_or_else(|| "Sistema de Gestão".to_string()),
            transport,
            batch_pause,
            remote_function_name: get("REMOTE_FUNCTION_NAME")
                .unwrap_or_else(|| "send-bulk-emails".to_string()),
            spreadsheet_function_name: get("SPREADSHEET_FUNCTION_NAME")
                .unwrap_or_else(|| "send-spreadsheet-emails".to_string()),
            remote_function_timeout,
            stats_rpc_name: get("STATS_RPC_NAME").unwrap_or_else(|| "get_email_stats".to_string()),
        })
    }

    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.supabase_url)
    }

    pub fn functions_url(&self) -> String {
        format!("{}/functions/v1", self.supabase_url)
    }
}
