use clap::Parser;
use dotenv::dotenv;

use crate::app::Cli;
use crate::config::app_config::AppConfig;
use crate::logger::init_logger;

mod app;
mod config;
mod handlers;
mod logger;
mod models;
mod services;

#[cfg(test)]
mod tests;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok(); // Cargar .env al inicio
    let cli = Cli::parse();
    init_logger(cli.verbose);

    // Credenciales y transporte desde el entorno, nunca en el código
    let config = AppConfig::from_env()?;
    log::info!(
        "Usando store en {} (fuente={:?})",
        config.supabase_url,
        cli.source
    );

    println!("{}", "=".repeat(60));
    println!("📧 SISTEMA DE ENVIO DE EMAILS");
    println!("{}", "=".repeat(60));
    println!();

    app::run(cli, config).await?;

    println!();
    println!("{}", "=".repeat(60));
    println!("✅ PROCESSAMENTO FINALIZADO");
    println!("{}", "=".repeat(60));
    Ok(())
}
