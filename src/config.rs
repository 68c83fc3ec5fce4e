use clap::{Parser, ValueEnum};

/// How `GET /books` combines several supplied filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FilterMode {
    /// Each filter is evaluated against the full collection and the last
    /// supplied one (name, then reading, then finished) decides the result.
    #[default]
    LastWins,
    /// Books must satisfy every supplied filter.
    All,
}

/// Server configuration
///
/// Every option can also be provided through its environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "bookshelf_api")]
#[command(about = "In-memory bookshelf REST service")]
pub struct AppConfig {
    /// Interface to bind
    #[arg(long, env = "BOOKSHELF_HOST", default_value = "localhost")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "BOOKSHELF_PORT", default_value_t = 9000)]
    pub port: u16,

    /// Combination rule for list filters
    #[arg(long, env = "BOOKSHELF_FILTER_MODE", value_enum, default_value_t = FilterMode::LastWins)]
    pub filter_mode: FilterMode,

    /// Allow cross-origin requests from any origin
    #[arg(
        long,
        env = "BOOKSHELF_CORS_ANY_ORIGIN",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub cors_any_origin: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 9000,
            filter_mode: FilterMode::default(),
            cors_any_origin: true,
        }
    }
}

impl AppConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
