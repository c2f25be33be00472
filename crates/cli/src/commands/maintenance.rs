//! Whole-cache commands

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tonearm_cache::{AsyncSpreadFs, ReloadOptions};

pub async fn reload(store: &AsyncSpreadFs, timeout_secs: Option<u64>) -> eyre::Result<()> {
    let cancel = Arc::new(AtomicBool::new(false));
    let mut options = ReloadOptions::new().with_cancel_flag(Arc::clone(&cancel));
    if let Some(secs) = timeout_secs {
        options = options.with_timeout(Duration::from_secs(secs));
    }

    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.store(true, Ordering::Relaxed);
        }
    });

    let result = store.reload_paths(options).await;
    interrupt.abort();

    let (paths, summary) = result?;
    for path in &paths {
        println!("{}", path.display());
    }
    tracing::info!(
        entries = summary.visited,
        skipped = summary.skipped,
        errors = summary.errors,
        "reload finished"
    );
    Ok(())
}

pub async fn purge(store: &AsyncSpreadFs, confirmed: bool) -> eyre::Result<()> {
    if !confirmed {
        eyre::bail!(
            "refusing to purge {} without --yes",
            store.store().root().display()
        );
    }
    store.remove_all().await?;
    Ok(())
}
