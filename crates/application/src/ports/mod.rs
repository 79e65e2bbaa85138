mod connection_source;
mod hostname_resolver;
mod resolution_sink;
mod whois_client;

pub use connection_source::ConnectionSource;
pub use hostname_resolver::HostnameResolver;
pub use resolution_sink::ResolutionSink;
pub use whois_client::WhoisClient;
