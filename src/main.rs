use chatbox::core::config::{self, CliOverrides};
use clap::{Parser, ValueEnum};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chatbox", about = "Terminal chat input widget")]
struct Args {
    /// Config file (defaults to ~/.chatbox/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file to write to
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // Log settings come from the config, so a load failure is reported once the logger is up
    let (file_config, config_error) = match config::load_config(args.config.as_deref()) {
        Ok(c) => (c, None),
        Err(e) => (config::ChatboxConfig::default(), Some(e)),
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            log_level: args.log_level.map(LevelFilter::from),
            log_file: args.log_file,
        },
    );

    // Initialize file logger - the terminal belongs to the UI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!("Chatbox starting up (log level {})", resolved.log_level);
    if let Some(e) = config_error {
        log::warn!("{e}; using defaults");
    }
    log::debug!("Resolved config: {:?}", resolved);

    chatbox::tui::run(resolved)
}
