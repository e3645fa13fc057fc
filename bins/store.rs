use std::process::ExitCode;

use dotenvy::dotenv;
use tracing::{error, info};

fn init_logging() {
    // Load .env first so RUST_LOG and HBNB_* are visible.
    dotenv().ok();
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f == "json") {
        common::utils::logging::init_logging_json();
    } else {
        common::utils::logging::init_logging_default();
    }
    info!(service = "hbnb-store", event = "logger_init", "tracing subscriber initialized");
}

/// Open the configured store, report what it holds per class, close it.
async fn run() -> anyhow::Result<()> {
    let cfg = configs::AppConfig::load_and_validate()?;
    info!(
        service = "hbnb-store",
        event = "config_loaded",
        backend = ?cfg.storage.backend,
        test_mode = cfg.database.test_mode,
        "configuration loaded"
    );

    let store = storage::init(&cfg).await?;
    let mut storage = store.lock().await;

    let counted: anyhow::Result<()> = async {
        for descriptor in models::registry::descriptors() {
            let count = storage.count(Some(descriptor.name)).await?;
            info!(service = "hbnb-store", event = "count", class = descriptor.name, count, "objects stored");
        }
        let total = storage.count(None).await?;
        info!(service = "hbnb-store", event = "count", total, "objects stored");
        Ok(())
    }
    .await;

    storage.close().await?;
    counted
}

fn main() -> ExitCode {
    init_logging();

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "hbnb-store", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(run()) {
        Ok(()) => {
            info!(service = "hbnb-store", event = "stop", "store closed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "hbnb-store", event = "run_failed", error = %e, "store could not be served");
            ExitCode::FAILURE
        }
    }
}
