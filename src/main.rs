use clap::{Args as ClapArgs, Parser, Subcommand};
use reception::equalization::CourseCatalog;
use reception::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Campus reception assistant
#[derive(Parser, Debug)]
#[command(name = "reception")]
#[command(about = "Keyword-matching answer service for campus questions", long_about = None)]
struct Args {
    /// Path to the data directory
    #[arg(short, long, default_value = "./data", global = true)]
    data_dir: PathBuf,

    /// Category precedence, comma separated
    #[arg(long, env = "RECEPTION_CATEGORIES", global = true)]
    categories: Option<String>,

    /// Log level (RUST_LOG takes precedence)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(flatten)]
    serve: ServeArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(ClapArgs, Debug)]
struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// HTTP API port, the first one tried
    #[arg(long, env = "PORT", default_value_t = 3000)]
    http_port: u16,

    /// How many consecutive ports to try when one is busy
    #[arg(long, default_value_t = 10)]
    port_attempts: u16,

    /// Directory of static pages served at /
    #[arg(long, default_value = "./Public")]
    public_dir: PathBuf,

    /// Answer from a JSON FAQ document instead of the data directory
    #[arg(long)]
    faq_document: Option<PathBuf>,

    /// Reply when nothing matches
    #[arg(long, default_value = "Sorry, I don't know the answer to that.")]
    fallback: String,

    /// Reply to blank questions (defaults to the fallback)
    #[arg(long)]
    empty_reply: Option<String>,

    /// Reply when resolution fails unexpectedly
    #[arg(long, default_value = "Server error. Try again later.")]
    error_reply: String,

    /// JSON array of equalization target courses replacing the built-in catalog
    #[arg(long)]
    course_catalog: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import `{category}.csv` files into the data directory
    InitDb {
        /// Source directory (defaults to `<data-dir>/excel_sheets`)
        #[arg(long)]
        csv_dir: Option<PathBuf>,
    },
    /// Write every stored record as a JSON FAQ document
    Export {
        #[arg(long, default_value = "faq-data.json")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let order = match &args.categories {
        Some(list) => list.parse::<CategoryOrder>()?,
        None => CategoryOrder::default(),
    };

    match args.command {
        Some(Command::InitDb { csv_dir }) => {
            let csv_dir = csv_dir_or_default(&args.data_dir, csv_dir);
            init_db(&args.data_dir, &order, &csv_dir)
        }
        Some(Command::Export { out }) => export(&args.data_dir, &order, &out),
        None => serve(&args.data_dir, order, args.serve).await,
    }
}

fn csv_dir_or_default(data_dir: &Path, csv_dir: Option<PathBuf>) -> PathBuf {
    csv_dir.unwrap_or_else(|| data_dir.join("excel_sheets"))
}

fn init_db(data_dir: &Path, order: &CategoryOrder, csv_dir: &Path) -> anyhow::Result<()> {
    let storage = StorageManager::new(data_dir)?;
    if !csv_dir.exists() {
        std::fs::create_dir_all(csv_dir)?;
        info!("Created {:?}; add category CSV files there and re-run init-db", csv_dir);
        return Ok(());
    }

    let reports = storage.ingest_dir(order, csv_dir)?;
    let imported: usize = reports.iter().map(|r| r.imported).sum();
    let skipped: usize = reports.iter().map(|r| r.skipped).sum();
    info!(
        "Import complete: {} categories, {} records, {} blank rows skipped",
        reports.len(),
        imported,
        skipped
    );
    Ok(())
}

fn export(data_dir: &Path, order: &CategoryOrder, out: &Path) -> anyhow::Result<()> {
    let storage = StorageManager::new(data_dir)?;
    let written = storage.export_document(order, out)?;
    info!("Wrote {} entries to {:?}", written, out);
    Ok(())
}

async fn serve(data_dir: &Path, order: CategoryOrder, args: ServeArgs) -> anyhow::Result<()> {
    info!("Starting reception v{}", env!("CARGO_PKG_VERSION"));
    info!("Category order: {}", order.names().join(", "));

    let store: Arc<dyn RecordStore> = match &args.faq_document {
        Some(path) => {
            let document = MemoryStore::from_reader(std::io::BufReader::new(std::fs::File::open(path)?))?;
            info!("Loaded {} records from {:?}", document.len(), path);
            Arc::new(document)
        }
        None => {
            let storage = StorageManager::new(data_dir)?;
            info!("Data directory: {:?}", storage.data_dir());
            let ingested = storage.list_categories()?;
            for category in &order {
                if !ingested.iter().any(|c| c == category.name()) {
                    warn!(category = %category, "category has no ingested records");
                }
            }
            for name in ingested.iter().filter(|name| !order.contains(name)) {
                info!(category = %name, "ingested category is not in the order and will not be consulted");
            }
            storage.store()
        }
    };

    let replies = ReplyConfig {
        fallback: args.fallback,
        empty_input: args.empty_reply,
        server_error: args.error_reply,
    };
    let mut state = AppState::new(Resolver::new(order), store, replies);
    if let Some(path) = &args.course_catalog {
        let catalog = CourseCatalog::from_json(&std::fs::read_to_string(path)?)?;
        info!("Loaded {} equalization courses from {:?}", catalog.courses().len(), path);
        state = state.with_catalog(catalog);
    }
    let state = Arc::new(state);

    let listener = RestApi::bind_with_retry(&args.host, args.http_port, args.port_attempts)?;
    let addr = listener.local_addr()?;
    info!("HTTP API: http://localhost:{}/", addr.port());

    let public_dir = Some(args.public_dir);
    let http_handle = std::thread::spawn(move || {
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(state, public_dir, listener).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
