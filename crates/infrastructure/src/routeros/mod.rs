pub mod client;
pub mod codec;
pub mod reply;
pub mod source;

pub use client::{CommandResponse, RouterOsClient};
pub use reply::{Attributes, Reply};
pub use source::RouterOsConnectionSource;
