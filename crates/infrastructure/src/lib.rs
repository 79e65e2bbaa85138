pub mod output;
pub mod routeros;
pub mod system;
