use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trends_core::models::{ClinicalTrial, Disease, Gene, Patent, Publication, Trend};
use trends_core::{CoreConfig, DocumentId, DocumentStore, Entity, EntityService};

#[derive(Parser)]
#[command(name = "trends")]
#[command(about = "Biomedical trends store CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EntityKind {
    Disease,
    Gene,
    Patent,
    Publication,
    Trial,
    Trend,
}

#[derive(Subcommand)]
enum Commands {
    /// List every record of one type
    List { entity: EntityKind },
    /// Print one record
    Get {
        entity: EntityKind,
        /// Record id
        id: String,
    },
    /// List records tagged with a keyword (exact match)
    Keyword { entity: EntityKind, keyword: String },
    /// Insert every record from a JSON array file
    Import {
        entity: EntityKind,
        /// Path to a JSON file holding an array of records
        file: PathBuf,
    },
}

enum Action {
    List,
    Get(String),
    Keyword(String),
    Import(PathBuf),
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("trends_cli=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("Use --help to see available commands");
        return Ok(());
    };

    let cfg = CoreConfig::from_env_values(
        std::env::var("TRENDS_DATA_DIR").ok(),
        std::env::var("TRENDS_STORE").ok(),
    )?;
    let store = cfg.open_store()?;

    let (entity, action) = match command {
        Commands::List { entity } => (entity, Action::List),
        Commands::Get { entity, id } => (entity, Action::Get(id)),
        Commands::Keyword { entity, keyword } => (entity, Action::Keyword(keyword)),
        Commands::Import { entity, file } => (entity, Action::Import(file)),
    };

    let stdout = std::io::stdout();
    execute(store, entity, action, &mut stdout.lock())
}

fn execute(
    store: Arc<dyn DocumentStore>,
    entity: EntityKind,
    action: Action,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match entity {
        EntityKind::Disease => run::<Disease>(store, action, out),
        EntityKind::Gene => run::<Gene>(store, action, out),
        EntityKind::Patent => run::<Patent>(store, action, out),
        EntityKind::Publication => run::<Publication>(store, action, out),
        EntityKind::Trial => run::<ClinicalTrial>(store, action, out),
        EntityKind::Trend => run::<Trend>(store, action, out),
    }
}

fn run<E: Entity>(
    store: Arc<dyn DocumentStore>,
    action: Action,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let service = EntityService::<E>::new(store);

    match action {
        Action::List => print_json(out, &service.find_all()?),
        Action::Get(id) => {
            let id = DocumentId::parse(&id)?;
            print_json(out, &service.find_by_id(&id)?)
        }
        Action::Keyword(keyword) => print_json(out, &service.find_by_keyword(&keyword)?),
        Action::Import(file) => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let records: Vec<E> = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a JSON array of {}", file.display(), E::PLURAL))?;
            let saved = service.save_all(records)?;
            tracing::info!("imported {} {} from {}", saved.len(), E::PLURAL, file.display());
            writeln!(out, "Imported {} {}", saved.len(), E::PLURAL)?;
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
