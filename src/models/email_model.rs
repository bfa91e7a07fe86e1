//! models/email_model.rs
//! Email ya renderizado, listo para entregar al transporte.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingEmail {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}
