pub mod hostname_resolver;
pub mod whois_command;

pub use hostname_resolver::SystemHostnameResolver;
pub use whois_command::WhoisCommand;
