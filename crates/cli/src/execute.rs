use crate::commands::{entry, maintenance, Commands};
use tonearm_cache::AsyncSpreadFs;

pub async fn execute_command(command: Commands, store: &AsyncSpreadFs) -> eyre::Result<()> {
    match command {
        Commands::Map { key } => entry::map(store, &key),
        Commands::Put { key, file } => entry::put(store, &key, file).await,
        Commands::Get { key } => entry::get(store, &key).await,
        Commands::Stat { key } => entry::stat(store, &key).await,
        Commands::Remove { key } => entry::remove(store, &key).await,
        Commands::Reload { timeout_secs } => maintenance::reload(store, timeout_secs).await,
        Commands::Purge { yes } => maintenance::purge(store, yes).await,
    }
}
