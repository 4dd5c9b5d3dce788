/// Terminal frontend entry point for native builds
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(e) = native::run() {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;
    use photoviews::Controller;
    use photoviews::config::{AppConfig, LogLevel};
    use photoviews::ingest::IngestPool;
    use photoviews::shell::Shell;
    use photoviews::storage::{FileStore, ViewStorage};

    #[derive(Parser)]
    #[command(
        name = "photoviews",
        author,
        version,
        about = "Photo albums in the terminal"
    )]
    struct Cli {
        /// Directory holding the stored views
        #[arg(long)]
        store_dir: Option<PathBuf>,
        /// Path to config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override log level (error, warn, info, debug, trace)
        #[arg(long)]
        log_level: Option<LogLevel>,
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let cli = Cli::parse();
        let config = AppConfig::load_or_default(cli.config.as_deref());
        let prefs = &config.preferences;

        let level = cli.log_level.unwrap_or(prefs.log_level);
        env_logger::Builder::new()
            .filter_level(level.to_level_filter())
            .parse_default_env()
            .init();

        let store_dir = cli
            .store_dir
            .or_else(|| (!prefs.storage_dir.is_empty()).then(|| PathBuf::from(&prefs.storage_dir)))
            .or_else(FileStore::default_dir)
            .ok_or("Could not determine a storage directory, pass --store-dir")?;

        let storage = ViewStorage::new(FileStore::open(store_dir)?);
        let controller =
            Controller::new(storage).with_placeholder_thumbnail(&prefs.placeholder_thumbnail);
        let pool = IngestPool::new(prefs.ingest_settings());

        let stdin = std::io::stdin();
        let mut shell = Shell::new(controller, pool, stdin.lock(), std::io::stdout());
        shell.run()?;
        Ok(())
    }
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}
