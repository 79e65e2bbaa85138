use routewatch_domain::Identity;

/// Receives every finished resolution, in completion order.
pub trait ResolutionSink: Send + Sync {
    fn emit(&self, ip: &str, identity: &Identity);
}
