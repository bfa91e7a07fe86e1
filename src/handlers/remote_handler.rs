//! handlers/remote_handler.rs
//! Comando `remote`: delega el envío masivo a la función del backend.

use anyhow::Result;

use crate::{models::remote_model::RemoteBatchResponse, services::remote_service::RemoteBatchService};

pub async fn remote_command(remote: &RemoteBatchService, limit: usize, test_mode: bool) -> Result<()> {
    println!("🚀 Iniciando processamento de emails...");
    println!("   🔗 Função: {}", remote.function_url());
    println!("   📊 Limite: {} emails", limit);
    println!("   🧪 Modo teste: {}", if test_mode { "Sim" } else { "Não" });
    println!();

    match remote.run(limit, test_mode).await {
        Ok(resp) => print_results(&resp),
        Err(e) => {
            log::error!("(remote_command) {:?}", e);
            println!("❌ ERRO NO PROCESSAMENTO:");
            println!("   {}", e);
        }
    }
    Ok(())
}

pub fn print_results(resp: &RemoteBatchResponse) {
    println!("✅ PROCESSAMENTO CONCLUÍDO!");
    println!("   📧 Emails processados: {}", resp.processed);
    println!("   🧪 Modo teste: {}", if resp.test_mode { "Sim" } else { "Não" });
    println!("   💬 Mensagem: {}", resp.message);

    if resp.results.is_empty() {
        return;
    }
    println!("\n📋 DETALHES:");
    for res in &resp.results {
        let icon = if res.is_success() { "✅" } else { "❌" };
        println!(
            "   {} {} -> {}",
            icon,
            res.record_id,
            res.email.as_deref().unwrap_or("?")
        );
        if !res.is_success() {
            println!("      Erro: {}", res.message.as_deref().unwrap_or_default());
        }
    }
}
