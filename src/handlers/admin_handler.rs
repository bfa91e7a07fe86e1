//! handlers/admin_handler.rs
//! Comandos administrativos: estadísticas, reset y datos de prueba.

use anyhow::{Context, Result};
use serde_json::json;

use crate::{
    config::source_config::SourceKind,
    models::{record_model::json_text, stats_model::StatusStats},
    services::{
        record_store::RecordStore, rest_store::SupabaseStore, stats_service::StatsService,
        status_service::StatusService,
    },
};

pub async fn stats_command(stats_service: &StatsService) -> Result<()> {
    println!("📊 Buscando estatísticas...");
    match stats_service.stats().await {
        Ok(stats) => print_stats(&stats),
        Err(e) => {
            log::error!("(stats_command) {:?}", e);
            println!("❌ Erro: {}", e);
        }
    }
    Ok(())
}

pub fn print_stats(stats: &StatusStats) {
    println!("📊 ESTATÍSTICAS ATUAIS:");
    println!("   🔴 Não enviado: {}", stats.nao_enviado);
    println!("   🟡 Aguardando Retorno: {}", stats.aguardando_retorno);
    println!("   🟢 Enviado: {}", stats.enviado);
    println!("   ❌ Erro no Envio: {}", stats.erro_no_envio);
    println!("   📈 Total: {}", stats.total);
}

pub async fn reset_command(status_service: &StatusService, ids: &[String]) -> Result<()> {
    let report = status_service.reset(ids).await;
    if report.is_success() {
        println!(
            "✅ Status resetado com sucesso! ({} registros)",
            report.reset_count
        );
    } else {
        if let Some(err) = &report.error {
            println!("❌ Erro: {}", err);
        }
        for id in &report.failed_ids {
            println!("❌ Erro ao resetar registro {}", id);
        }
    }
    Ok(())
}

/// Crea un registro de prueba en "Não enviado". Para ocurrencias, además
/// apunta el imóvel al destinatario dado.
pub async fn seed_command(
    store: &SupabaseStore,
    recipient: &str,
    building: &str,
    property_id: Option<&str>,
) -> Result<()> {
    let profile = store.profile();

    if profile.kind == SourceKind::Occurrences {
        let property_id = property_id
            .context("--property-id é obrigatório para a fonte 'occurrences'")?;
        let filters = [("id".to_string(), format!("eq.{}", property_id))];
        let patch = json!({
            "admin_email": recipient,
            "name": building,
            "address": "Rua Teste, 123\nApto 45",
        });
        match store.patch_table("properties", &filters, &patch).await {
            Ok(_) => println!("✅ Propriedade atualizada"),
            Err(e) => println!("⚠️  Aviso ao atualizar propriedade: {}", e),
        }
    }

    let row = profile.seed_row(recipient, building, property_id);
    let created = store
        .insert(&row)
        .await
        .context("Erro ao criar registro de teste")?;
    println!(
        "✅ Registro de teste criado com ID: {}",
        json_text(&created, "id").unwrap_or_else(|| "?".to_string())
    );
    Ok(())
}
