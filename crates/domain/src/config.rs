mod errors;
mod logging;
mod monitor;
mod output;
mod resolver;
mod root;
mod router;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use monitor::MonitorConfig;
pub use output::{OutputConfig, OutputFormat};
pub use resolver::ResolverConfig;
pub use root::{CliOverrides, Config};
pub use router::RouterConfig;
