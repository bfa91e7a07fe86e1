//! services/mail_transport.rs
//! Capacidad de entrega de correo. El batch solo conoce el trait;
//! la implementación concreta la elige la configuración del despliegue.

use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

use crate::{
    config::app_config::{AppConfig, MailTransportConfig},
    models::email_model::OutgoingEmail,
    services::rest_store::ensure_success,
};

const SMTP_SEND_TIMEOUT: Duration = Duration::from_secs(30);
const SENDGRID_URL: &str = "https://api.sendgrid.com/v3/mail/send";

#[async_trait]
pub trait MailTransport: Send + Sync {
    fn name(&self) -> &'static str;

    /// Entrega un email con destinatario ya validado.
    async fn send(&self, email: &OutgoingEmail) -> Result<()>;
}

/// Construye el transporte configurado.
pub fn from_config(config: &AppConfig) -> Result<Box<dyn MailTransport>> {
    let transport: Box<dyn MailTransport> = match &config.transport {
        MailTransportConfig::None => Box::new(NoopTransport),
        MailTransportConfig::Smtp {
            host,
            port,
            user,
            pass,
        } => {
            let from_addr = config.mail_from.clone().unwrap_or_else(|| user.clone());
            let from: Mailbox = format!("{} <{}>", config.mail_from_name, from_addr)
                .parse()
                .context("Invalid from address")?;
            Box::new(SmtpMailTransport::new(host, *port, user, pass, from)?)
        }
        MailTransportConfig::SendGrid { api_key } => Box::new(SendGridTransport {
            http_client: Client::new(),
            api_key: api_key.clone(),
            from_email: config.mail_from.clone().unwrap_or_default(),
            from_name: config.mail_from_name.clone(),
        }),
    };
    log::info!("(from_config) Transporte de correo: {}", transport.name());
    Ok(transport)
}

/// No entrega nada y reporta éxito.
pub struct NoopTransport;

#[async_trait]
impl MailTransport for NoopTransport {
    fn name(&self) -> &'static str {
        "noop"
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<()> {
        log::warn!(
            "(NoopTransport) Sin transporte configurado, email para {} no entregado",
            email.recipient
        );
        Ok(())
    }
}

pub struct SmtpMailTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailTransport {
    pub fn new(host: &str, port: u16, user: &str, pass: &str, from: Mailbox) -> Result<Self> {
        let tls_params = TlsParameters::new(host.to_string())?;
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
            .port(port)
            .credentials(Credentials::new(user.to_string(), pass.to_string()))
            .tls(Tls::Required(tls_params))
            .build();
        Ok(Self { mailer, from })
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    fn name(&self) -> &'static str {
        "smtp"
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<()> {
        let to: Mailbox = email
            .recipient
            .parse()
            .context("Invalid recipient address")?;
        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&email.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())?;

        tokio::time::timeout(SMTP_SEND_TIMEOUT, self.mailer.send(message))
            .await
            .context("Timeout enviando por SMTP")??;
        Ok(())
    }
}

/// API HTTP de SendGrid (v3 mail/send).
pub struct SendGridTransport {
    http_client: Client,
    api_key: String,
    from_email: String,
    from_name: String,
}

#[async_trait]
impl MailTransport for SendGridTransport {
    fn name(&self) -> &'static str {
        "sendgrid"
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<()> {
        let payload = json!({
            "personalizations": [{ "to": [{ "email": email.recipient }] }],
            "from": { "email": self.from_email, "name": self.from_name },
            "subject": email.subject,
            "content": [{ "type": "text/plain", "value": email.body }],
        });

        let resp = self
            .http_client
            .post(SENDGRID_URL)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .context("Fallo al POST en SendGrid")?;
        ensure_success(resp, "SendGrid").await?;
        Ok(())
    }
}
