pub mod console_sink;

pub use console_sink::{format_line, ConsoleSink};
