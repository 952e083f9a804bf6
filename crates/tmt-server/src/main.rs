//! `tmt` — translation management server.

use std::path::PathBuf;
use std::sync::Arc;

use tmt_core::{TmtConfig, DB_FILE};
use tmt_server::{build_router, AppState};
use tmt_store::SqliteStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn resolve_data_dir() -> PathBuf {
    std::env::var("TMT_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let exe_dir = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()));
            if let Some(dir) = exe_dir {
                let parent_data = dir.join("../data");
                if parent_data.exists() {
                    return parent_data;
                }
            }
            PathBuf::from("data")
        })
}

/// Open the existing store under `data_dir` and print its counts.
/// Nothing is created when the directory or database is missing.
fn check(data_dir: PathBuf) -> bool {
    let db_path = data_dir.join(DB_FILE);
    match SqliteStore::open_existing(&db_path).and_then(|store| store.get_stats()) {
        Ok(stats) => {
            println!("Database:     {}", stats.db_path);
            println!("Size:         {:.2} MB", stats.db_size_mb);
            println!("Translations: {}", stats.total_translations);
            println!("Users:        {}", stats.total_users);
            println!("Sessions:     {}", stats.active_sessions);
            true
        }
        Err(e) => {
            eprintln!("Failed to open store at {}: {}", db_path.display(), e);
            false
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--check" | "check" => {
                let data_dir = if args.len() > 2 {
                    PathBuf::from(&args[2])
                } else {
                    resolve_data_dir()
                };
                std::process::exit(if check(data_dir) { 0 } else { 1 });
            }
            "--help" | "-h" | "help" => {
                println!("tmt — translation management server");
                println!();
                println!("Usage: tmt [command]");
                println!();
                println!("Commands:");
                println!("  (none)                   Start the server");
                println!("  check [data-dir]         Open the database and print counts");
                println!("  help                     Show this help message");
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'tmt help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    let config = TmtConfig::from_env(&data_dir)?;
    let port = config.port;
    info!(
        "Translator: {:?} (timeout={}s), require_auth={}",
        config.translator.kind,
        config.translator.timeout.as_secs(),
        config.require_auth
    );

    let store = SqliteStore::open(&config.db_path)
        .map_err(|e| anyhow::anyhow!("Failed to open store: {}", e))?;
    let stats = store.get_stats()?;
    info!(
        "Store ready: {} translations, {} users",
        stats.total_translations, stats.total_users
    );

    let state = Arc::new(AppState::new(config, store));
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("TMT server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
