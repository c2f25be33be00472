use clap::Parser;
use eyre::WrapErr;
use std::path::PathBuf;
use tonearm_cache::{config::parse_mode, AsyncSpreadFs, SpreadFsConfig, SpreadFsConfigBuilder};
use tonearm_utils::xdg::XdgPaths;

mod commands;
mod execute;

use commands::Commands;

#[derive(Parser)]
#[command(name = "tonearm")]
#[command(about = "Inspect and manage the tonearm file cache", long_about = None)]
#[command(version)]
struct Cli {
    /// Cache root directory (overrides config file and TONEARM_CACHE_DIR)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Directory permission bits in octal, e.g. 0755
    #[arg(long, global = true, value_parser = parse_mode_arg)]
    mode: Option<u32>,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

fn parse_mode_arg(value: &str) -> Result<u32, String> {
    parse_mode(value).map_err(|e| e.to_string())
}

/// Resolve the effective configuration: flags > environment > file > defaults
fn resolve_config(cli: &Cli) -> eyre::Result<SpreadFsConfig> {
    let file = cli.config.clone().or_else(|| {
        let default = XdgPaths::cache_config_file();
        default.is_file().then_some(default)
    });

    let mut builder = match file {
        Some(path) => SpreadFsConfigBuilder::from_file(&path)
            .wrap_err_with(|| format!("loading {}", path.display()))?,
        None => SpreadFsConfigBuilder::new(),
    };
    builder = builder.with_env()?;

    if let Some(root) = &cli.root {
        builder = builder.with_root(root.clone());
    }
    if let Some(mode) = cli.mode {
        builder = builder.with_dir_mode(mode);
    }

    Ok(builder.build()?)
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    tonearm_utils::tracing::init(tonearm_utils::tracing::level_for_verbosity(cli.verbose))
        .map_err(|e| eyre::eyre!("failed to initialize logging: {e}"))?;

    let config = resolve_config(&cli)?;
    tracing::debug!(
        root = %config.root.display(),
        source = ?config.source,
        "resolved cache configuration"
    );

    let store = AsyncSpreadFs::open_root(config.root, config.dir_mode)
        .await
        .wrap_err("opening cache root")?;

    execute::execute_command(cli.command, &store).await
}
