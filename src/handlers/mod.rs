//! handlers/mod.rs
//! Un handler por comando de la CLI; imprimen el reporte para el operador.

pub mod admin_handler;
pub mod batch_handler;
pub mod remote_handler;
