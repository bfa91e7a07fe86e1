//! app.rs
//! Definición de la CLI y ruteo de comandos a los handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;

use crate::{
    config::{
        app_config::AppConfig,
        source_config::{SourceKind, SourceProfile},
    },
    handlers::{admin_handler, batch_handler, remote_handler},
    services::{
        batch_service::BatchService,
        dispatch_service::{DispatchMode, Dispatcher},
        mail_transport::{self, MailTransport, NoopTransport},
        record_store::RecordStore,
        remote_service::RemoteBatchService,
        rest_store::SupabaseStore,
        stats_service::StatsService,
        status_service::StatusService,
    },
};

#[derive(Parser, Debug)]
#[command(name = "cobranca_mailer")]
#[command(about = "Envio de emails de consulta de débitos condominiais")]
#[command(version)]
pub struct Cli {
    /// Fonte dos registros
    #[arg(long, value_enum, default_value = "occurrences", global = true)]
    pub source: SourceKind,

    /// Log em nível debug
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estatísticas por status de email
    Stats,

    /// Processa os registros "Não enviado" (modo teste por padrão)
    Process {
        /// Envio real pelo transporte configurado
        #[arg(long)]
        real: bool,
        /// Confirma o modo real
        #[arg(long, requires = "real")]
        yes: bool,
        /// Máximo de registros nesta execução (0 = todos)
        #[arg(long)]
        limit: Option<usize>,
        /// Envia apenas o primeiro registro para este endereço
        #[arg(long)]
        test_email: Option<String>,
    },

    /// Volta para "Não enviado" os ids dados ou todos com "Erro no Envio"
    Reset {
        #[arg(long = "id")]
        ids: Vec<String>,
    },

    /// Executa o envio em massa na função remota do backend
    Remote {
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long)]
        real: bool,
        #[arg(long, requires = "real")]
        yes: bool,
    },

    /// Cria um registro de teste em "Não enviado"
    Seed {
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "Edifício Teste")]
        building: String,
        /// Imóvel ao qual a ocorrência fica vinculada (fonte occurrences)
        #[arg(long)]
        property_id: Option<String>,
    },
}

/// Modo real exige `--yes` explícito.
fn confirmed(real: bool, yes: bool) -> bool {
    if !real {
        println!("🧪 MODO TESTE ATIVO - Emails não serão enviados realmente");
        println!("   Use --real --yes para envio real");
        println!();
        return true;
    }
    if yes {
        println!("⚠️  MODO REAL ATIVO - Emails serão enviados de verdade!");
        println!();
        return true;
    }
    println!("⚠️  MODO REAL requer confirmação com --yes");
    println!("❌ Operação cancelada");
    false
}

pub async fn run(cli: Cli, config: AppConfig) -> Result<()> {
    let profile = SourceProfile::configured(cli.source, &config);
    let supabase = Arc::new(SupabaseStore::new(&config, profile.clone()));
    let store: Arc<dyn RecordStore> = supabase.clone();

    match cli.command {
        Commands::Stats => {
            let stats_service = StatsService::new(store, profile);
            admin_handler::stats_command(&stats_service).await
        }
        Commands::Process {
            real,
            yes,
            limit,
            test_email,
        } => {
            if !confirmed(real, yes) {
                return Ok(());
            }
            let transport: Arc<dyn MailTransport> = if real {
                Arc::from(mail_transport::from_config(&config)?)
            } else {
                Arc::new(NoopTransport)
            };
            let mode = if real {
                DispatchMode::Production
            } else {
                DispatchMode::Test
            };
            let batch = BatchService::new(
                store,
                profile,
                Dispatcher::new(mode, transport),
                config.batch_pause,
            );
            batch_handler::process_command(&batch, limit, test_email.as_deref()).await
        }
        Commands::Reset { ids } => {
            let status_service = StatusService::new(store, profile);
            admin_handler::reset_command(&status_service, &ids).await
        }
        Commands::Remote { limit, real, yes } => {
            if !confirmed(real, yes) {
                return Ok(());
            }
            let remote = RemoteBatchService::new(&config, &profile);
            remote_handler::remote_command(&remote, limit, !real).await
        }
        Commands::Seed {
            email,
            building,
            property_id,
        } => {
            admin_handler::seed_command(&supabase, &email, &building, property_id.as_deref())
                .await
        }
    }
}
