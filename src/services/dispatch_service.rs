//! services/dispatch_service.rs
//! Decide qué hacer con un email renderizado según el modo de ejecución.

use lettre::Address;
use std::sync::Arc;

use crate::{models::email_model::OutgoingEmail, services::mail_transport::MailTransport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// Solo imprime el email; se considera enviado
    Test,
    /// Entrega por el transporte configurado
    Production,
}

impl DispatchMode {
    pub fn is_test(&self) -> bool {
        *self == DispatchMode::Test
    }

    pub fn label(&self) -> &'static str {
        match self {
            DispatchMode::Test => "TESTE",
            DispatchMode::Production => "REAL",
        }
    }
}

#[derive(Clone)]
pub struct Dispatcher {
    mode: DispatchMode,
    transport: Arc<dyn MailTransport>,
}

impl Dispatcher {
    pub fn new(mode: DispatchMode, transport: Arc<dyn MailTransport>) -> Self {
        Self { mode, transport }
    }

    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// `true` si el email se considera enviado. Nunca propaga errores.
    pub async fn dispatch(&self, email: &OutgoingEmail) -> bool {
        if self.mode.is_test() {
            println!("📧 [MODO TESTE] Email simulado para: {}", email.recipient);
            println!("   Assunto: {}", email.subject);
            println!("   Conteúdo:");
            for line in email.body.lines() {
                println!("   {}", line);
            }
            println!("   {}", "=".repeat(50));
            return true;
        }

        println!(
            "📧 [MODO REAL] Enviando email para: {} (transporte={})",
            email.recipient,
            self.transport.name()
        );

        if let Err(e) = email.recipient.parse::<Address>() {
            log::error!(
                "(dispatch) Destinatario inválido '{}': {}",
                email.recipient,
                e
            );
            return false;
        }

        match self.transport.send(email).await {
            Ok(()) => {
                log::info!("(dispatch) Email entregado a {}", email.recipient);
                true
            }
            Err(e) => {
                log::error!("(dispatch) Fallo al enviar a {}: {:?}", email.recipient, e);
                false
            }
        }
    }
}
