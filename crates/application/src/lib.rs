//! routewatch application layer: ports, the resolution cache, the dispatch
//! engine and the use cases driving them.
pub mod ports;
pub mod services;
pub mod use_cases;
