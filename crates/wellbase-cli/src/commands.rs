use super::args::{Cli, Commands};
use super::handlers;
use anyhow::{Context, Result};
use log::debug;
use std::path::Path;
use wellbase_runtime::{Config, Workspace, resolve_workspace_path};

pub fn run(cli: Cli) -> Result<()> {
    init_logging(&cli);

    let data_dir = resolve_workspace_path(cli.data_dir.as_deref())?;
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| data_dir.join("config.toml"));
    let config = load_config(&cli, &config_path, &data_dir)?;
    debug!("Using data directory {}", data_dir.display());

    let format = cli.format;
    match cli.command {
        Commands::Tree => handlers::tree::handle(&Workspace::new(config), format),
        Commands::Find { name } => handlers::find::handle(&Workspace::new(config), &name, format),
        Commands::Fields { folder, unmatched } => {
            let mut config = config;
            if let Some(policy) = unmatched {
                config.aggregate.unmatched_stage = policy.into();
            }
            let workspace = Workspace::new(config);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(handlers::fields::handle(&workspace, &folder, format))
        }
        Commands::Wells { path } => handlers::wells::handle(&Workspace::new(config), &path, format),
        Commands::File { name } => handlers::file::handle(&Workspace::new(config), &name, format),
        Commands::Page { data, wells } => {
            handlers::page::handle(&Workspace::new(config), data, wells, format)
        }
        Commands::Stages { folder } => {
            handlers::stages::handle(&Workspace::new(config), &folder, format)
        }
    }
}

/// `RUST_LOG` takes precedence over `--log-level` when set.
fn init_logging(cli: &Cli) {
    let env = env_logger::Env::default().default_filter_or(cli.log_level.to_string());
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

fn load_config(cli: &Cli, config_path: &Path, data_dir: &Path) -> Result<Config> {
    let mut config = Config::load_from(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?
        .rooted_at(data_dir);

    if let Some(root) = &cli.reservoirs_root {
        config.roots.reservoirs = root.clone();
    }
    if let Some(root) = &cli.files_root {
        config.roots.files = root.clone();
    }
    if let Some(root) = &cli.data_root {
        config.roots.data = root.clone();
    }
    Ok(config)
}

/// Process exit code for a failed command: 2 when the requested data does
/// not exist, 1 otherwise.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    let not_found = err.chain().any(|cause| {
        if let Some(e) = cause.downcast_ref::<wellbase_runtime::Error>() {
            e.is_not_found()
        } else if let Some(e) = cause.downcast_ref::<wellbase_engine::Error>() {
            e.is_not_found()
        } else {
            false
        }
    });
    if not_found { 2 } else { 1 }
}
