use std::fs::{self, File};
use std::path::PathBuf;

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use arbor_app::paths::AppDirs;
use arbor_app::{app, AppError, Catalog, Config, ConfigSource, MainView};

fn main() {
    if let Err(e) = run() {
        log::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let (config, source) = Config::load()?;
    let dirs = AppDirs::locate();

    let rotated = dirs.as_ref().map(|dirs| dirs.log_rotation().rotate());
    init_logging(dirs.as_ref(), &config)?;
    match rotated {
        Some(Ok(Some(archive))) => log::debug!("previous log moved to {}", archive.display()),
        Some(Err(e)) => log::warn!("log rotation failed: {e}"),
        _ => {}
    }

    match source {
        ConfigSource::File(path) => log::info!("config loaded from {}", path.display()),
        ConfigSource::Defaults { looked_in: Some(path) } => {
            log::warn!("no config at {}, using defaults", path.display())
        }
        ConfigSource::Defaults { looked_in: None } => {
            log::warn!("no config directory, using defaults")
        }
    }

    // A catalog path on the command line overrides the config.
    let catalog = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => Catalog::load(&path)?,
        None => match config.catalog_path() {
            Some(path) if path.exists() => Catalog::load(&path)?,
            _ => {
                log::warn!("no catalog file found, using the built-in sample");
                Catalog::sample()?
            }
        },
    };

    app::run(MainView::new(catalog, &config))
}

fn init_logging(dirs: Option<&AppDirs>, config: &Config) -> Result<(), AppError> {
    let log_path = match dirs {
        Some(dirs) => {
            fs::create_dir_all(dirs.log_dir())?;
            dirs.log_file()
        }
        None => PathBuf::from("arbor.log"),
    };

    let mut builder = ConfigBuilder::new();
    if !config.log_timestamp {
        builder.set_time_level(LevelFilter::Off);
    }

    WriteLogger::init(config.level_filter(), builder.build(), File::create(log_path)?)?;
    Ok(())
}
