//! config/mod.rs
//! Configuración global: entorno del proceso y perfiles de fuente.

pub mod app_config;
pub mod source_config;
