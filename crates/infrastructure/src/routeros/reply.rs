use routewatch_domain::DomainError;
use std::collections::HashMap;

pub type Attributes = HashMap<String, String>;

/// One reply sentence from the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// `!re`: a data row
    Row(Attributes),
    /// `!empty`: the command matched nothing; `!done` still follows
    Empty,
    /// `!done`: end of the command's output
    Done(Attributes),
    /// `!trap`: the command failed; `!done` still follows
    Trap(Attributes),
    /// `!fatal`: the router is closing the session
    Fatal(String),
}

impl Reply {
    pub fn parse(words: Vec<String>) -> Result<Self, DomainError> {
        let mut words = words.into_iter();
        let head = words
            .next()
            .ok_or_else(|| DomainError::ProtocolError("Empty reply sentence".to_string()))?;

        match head.as_str() {
            "!re" => Ok(Reply::Row(parse_attributes(words))),
            "!empty" => Ok(Reply::Empty),
            "!done" => Ok(Reply::Done(parse_attributes(words))),
            "!trap" => Ok(Reply::Trap(parse_attributes(words))),
            "!fatal" => Ok(Reply::Fatal(words.collect::<Vec<_>>().join(" "))),
            other => Err(DomainError::ProtocolError(format!(
                "Unknown reply type '{}'",
                other
            ))),
        }
    }
}

/// `=key=value` words become map entries; the value keeps any further `=`.
/// API words such as `.tag=1` are dropped.
fn parse_attributes(words: impl Iterator<Item = String>) -> Attributes {
    words
        .filter_map(|word| {
            let rest = word.strip_prefix('=')?;
            let (key, value) = rest.split_once('=').unwrap_or((rest, ""));
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

pub fn trap_message(attrs: &Attributes) -> String {
    attrs
        .get("message")
        .cloned()
        .unwrap_or_else(|| "unspecified error".to_string())
}
