//! routewatch domain layer
pub mod config;
pub mod connection_entry;
pub mod destination;
pub mod errors;
pub mod identity;

pub use config::{
    CliOverrides, Config, ConfigError, LoggingConfig, MonitorConfig, OutputConfig, OutputFormat,
    ResolverConfig, RouterConfig,
};
pub use connection_entry::ConnectionEntry;
pub use destination::normalize_destination;
pub use errors::DomainError;
pub use identity::Identity;
