//! handlers/batch_handler.rs
//! Comando `process`: batch local o envío de prueba a una sola dirección.

use anyhow::Result;

use crate::{models::summary_model::BatchSummary, services::batch_service::BatchService};

pub async fn process_command(
    batch: &BatchService,
    limit: Option<usize>,
    test_email: Option<&str>,
) -> Result<()> {
    if let Some(address) = test_email {
        match batch.send_test_email(address).await {
            Some(outcome) if outcome.is_success() => {
                println!("✅ Email de teste enviado com sucesso para {}", address)
            }
            Some(outcome) => println!("❌ Falha no envio do email de teste: {}", outcome.message),
            None => println!("❌ Falha no envio do email de teste"),
        }
        return Ok(());
    }

    let summary = batch.process(limit).await;
    print_failures(&summary);
    Ok(())
}

fn print_failures(summary: &BatchSummary) {
    if let Some(err) = &summary.fetch_error {
        log::warn!("(process_command) El batch terminó sin leer registros: {}", err);
        return;
    }
    let failures: Vec<_> = summary.results.iter().filter(|r| !r.is_success()).collect();
    if failures.is_empty() {
        return;
    }
    println!();
    println!("📋 FALHAS:");
    for f in failures {
        println!(
            "   ❌ {} -> {}: {}",
            f.record_id.as_deref().unwrap_or("?"),
            f.email.as_deref().unwrap_or("?"),
            f.message
        );
    }
}
