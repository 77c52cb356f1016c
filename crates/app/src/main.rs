use std::io;

use anyhow::Context;
use toystore_app::{AppConfig, Session, ToyStoreApp, report_skipped};
use toystore_infra::{CatalogStore, FileCatalogStore};

fn main() -> anyhow::Result<()> {
    toystore_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let store = FileCatalogStore::new(&config.catalog_path);
    let loaded = store
        .load()
        .with_context(|| format!("failed to load catalog {}", config.catalog_path.display()))?;

    tracing::info!(
        path = %config.catalog_path.display(),
        policy = ?config.save_policy,
        "Starting toy store"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock());
    report_skipped(&mut session, &loaded.errors)?;

    let mut app = ToyStoreApp::new(loaded.inventory, store, config.save_policy);
    app.run(&mut session)?;
    Ok(())
}
