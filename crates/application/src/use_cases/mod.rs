pub mod poll_connections;
pub mod resolve_identity;

pub use poll_connections::{PollConnectionsUseCase, PollSummary};
pub use resolve_identity::ResolveIdentityUseCase;
