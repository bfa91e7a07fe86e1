//! tests/mod.rs

mod config_tests;
mod remote_tests;
mod source_config_tests;
mod template_tests;
