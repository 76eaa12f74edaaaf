//! To-do Shell Entry Point

mod app;
mod commands;
mod components;
mod context;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use todo_sync_lib::{
    GraphQlService, InMemoryService, Item, RemoteDataService, ServiceConfig, TodoView,
};

use app::App;
use context::UserContext;

#[derive(Parser, Debug)]
#[command(name = "todo-shell", about = "Line-oriented client for a shared to-do list")]
struct Args {
    /// Service configuration (Amplify-style JSON)
    #[arg(long, default_value = "amplifyconfiguration.json")]
    config: PathBuf,

    /// Run against an in-process store instead of the remote service
    #[arg(long)]
    offline: bool,

    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_path = rolling_logger::init_logger(&args.log_dir, "TodoShell")
        .context("Failed to initialize logger")?;
    let _ = rolling_logger::info(&format!("Logging to {}", log_path.display()));

    let (service, user): (Arc<dyn RemoteDataService>, UserContext) = if args.offline {
        let config = ServiceConfig::from_file_and_env(&args.config).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring unreadable config in offline mode");
            ServiceConfig::default()
        });
        let store = InMemoryService::with_items(vec![
            Item::new("1", "Buy milk", "Semi-skimmed"),
            Item::new("2", "Water plants", ""),
        ]);
        (Arc::new(store) as Arc<dyn RemoteDataService>, UserContext::new(config.user_email))
    } else {
        let config = ServiceConfig::from_file_and_env(&args.config)
            .with_context(|| format!("Failed to load {}", args.config.display()))?;
        let service = GraphQlService::new(&config).context("Invalid service configuration")?;
        (Arc::new(service) as Arc<dyn RemoteDataService>, UserContext::new(config.user_email))
    };

    let app = App::new(TodoView::new(service), user);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let result = app.run(stdin, &mut stdout).await;

    match &result {
        Ok(()) => {
            let _ = rolling_logger::info("Session ended");
        }
        Err(e) => {
            let _ = rolling_logger::error(&format!("Shell failed: {:#}", e));
        }
    }
    result
}
