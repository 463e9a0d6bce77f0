// 📝 Logging - tracing subscriber setup for the CLI
// Logs go to stderr so the report on stdout stays clean for copying/piping

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-field output
    #[default]
    Pretty,
    /// Single-line output
    Compact,
    /// JSON lines for machine parsing
    Json,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,

    /// Let `RUST_LOG` override `level`
    pub use_env_filter: bool,

    pub format: LogFormat,
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: Level::WARN,
            use_env_filter: true,
            format: LogFormat::default(),
            with_ansi: true,
        }
    }
}

impl LogConfig {
    /// -q → error, nothing → warn, -v → info, -vv → debug, -vvv → trace
    pub fn from_verbosity(verbose: u8, quiet: bool) -> Self {
        let level = if quiet {
            Level::ERROR
        } else {
            match verbose {
                0 => Level::WARN,
                1 => Level::INFO,
                2 => Level::DEBUG,
                _ => Level::TRACE,
            }
        };

        LogConfig {
            level,
            use_env_filter: verbose == 0 && !quiet,
            ..Default::default()
        }
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    fn filter(&self) -> EnvFilter {
        let directive = format!(
            "warn,gabarito_check={level}",
            level = self.level.as_str().to_lowercase()
        );

        if self.use_env_filter {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directive))
        } else {
            EnvFilter::new(&directive)
        }
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    let registry = tracing_subscriber::registry().with(config.filter());

    let result = match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .without_time()
                    .with_ansi(config.with_ansi)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .without_time()
                    .with_target(false)
                    .with_ansi(config.with_ansi)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))
}
