//! models/mod.rs
//! Módulo raíz para modelos/estructuras compartidas.

pub mod email_model;
pub mod record_model;
pub mod remote_model;
pub mod stats_model;
pub mod summary_model;
