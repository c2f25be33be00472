//! Single-entry commands

use chrono::{DateTime, Utc};
use eyre::WrapErr;
use std::path::PathBuf;
use std::time::SystemTime;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tonearm_cache::AsyncSpreadFs;

pub fn map(store: &AsyncSpreadFs, key: &str) -> eyre::Result<()> {
    println!("{}", store.map(key).display());
    Ok(())
}

pub async fn put(store: &AsyncSpreadFs, key: &str, file: Option<PathBuf>) -> eyre::Result<()> {
    let data = match file {
        Some(path) => tokio::fs::read(&path)
            .await
            .wrap_err_with(|| format!("reading {}", path.display()))?,
        None => {
            let mut data = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut data)
                .await
                .wrap_err("reading stdin")?;
            data
        }
    };

    let path = store.map(key);
    let len = data.len();
    store.write(path.clone(), data).await?;
    tracing::info!(key, bytes = len, "stored cache entry");
    println!("{}", path.display());
    Ok(())
}

pub async fn get(store: &AsyncSpreadFs, key: &str) -> eyre::Result<()> {
    let data = store.read(store.map(key)).await?;
    let mut stdout = tokio::io::stdout();
    stdout.write_all(&data).await?;
    stdout.flush().await?;
    Ok(())
}

pub async fn stat(store: &AsyncSpreadFs, key: &str) -> eyre::Result<()> {
    let info = store.stat(store.map(key)).await?;
    println!("path:     {}", info.path.display());
    println!("size:     {}", info.len);
    println!("modified: {}", format_time(info.modified));
    println!("accessed: {}", format_time(info.accessed));
    Ok(())
}

pub async fn remove(store: &AsyncSpreadFs, key: &str) -> eyre::Result<()> {
    let path = store.map(key);
    store.remove(path.clone()).await?;
    tracing::info!(path = %path.display(), "removed cache entry");
    Ok(())
}

fn format_time(time: Option<SystemTime>) -> String {
    match time {
        Some(time) => DateTime::<Utc>::from(time).to_rfc3339(),
        None => "unknown".to_string(),
    }
}
