use routewatch_application::ports::ResolutionSink;
use routewatch_domain::{Identity, OutputFormat};
use serde::Serialize;
use std::io::Write;
use std::sync::Mutex;
use tracing::warn;

#[derive(Serialize)]
struct ResolutionRecord<'a> {
    ip: &'a str,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<&'a str>,
}

/// Renders one line per resolution.
pub fn format_line(format: OutputFormat, ip: &str, identity: &Identity) -> String {
    match format {
        OutputFormat::Text => format!("{:>15} -> {}", ip, identity),
        OutputFormat::Json => {
            let record = ResolutionRecord {
                ip,
                kind: identity.kind(),
                value: identity.value(),
            };
            serde_json::to_string(&record).unwrap_or_else(|e| {
                warn!(ip, error = %e, "Failed to serialize resolution");
                format!("{{\"ip\":\"{}\",\"kind\":\"{}\"}}", ip, identity.kind())
            })
        }
    }
}

/// Writes resolutions to stdout (or any writer), one whole line at a time.
pub struct ConsoleSink {
    format: OutputFormat,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSink {
    pub fn stdout(format: OutputFormat) -> Self {
        Self::with_writer(format, std::io::stdout())
    }

    pub fn with_writer(format: OutputFormat, writer: impl Write + Send + 'static) -> Self {
        Self {
            format,
            out: Mutex::new(Box::new(writer)),
        }
    }
}

impl ResolutionSink for ConsoleSink {
    fn emit(&self, ip: &str, identity: &Identity) {
        let line = format_line(self.format, ip, identity);

        let mut out = match self.out.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
            warn!(ip, error = %e, "Failed to write resolution");
        }
    }
}
