pub mod dispatch_engine;
pub mod identity_cache;
pub mod whois_parser;

pub use dispatch_engine::{DispatchEngine, DispatchStats, SubmitOutcome, DEFAULT_MAX_CONCURRENCY};
pub use identity_cache::{IdentityCache, IdentityCacheStats};
pub use whois_parser::extract_org_info;
