mod monitor;

pub use monitor::MonitorServices;
