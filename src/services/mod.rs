//! services/mod.rs
//! Módulo que agrupa los servicios del batch de emails.

pub mod batch_service;
pub mod dispatch_service;
pub mod mail_transport;
pub mod record_store;
pub mod remote_service;
pub mod rest_store;
pub mod stats_service;
pub mod status_service;
pub mod template_service;
