/// One row of the router's active connection table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionEntry {
    pub destination_address: Option<String>,
    pub protocol: Option<String>,
}

impl ConnectionEntry {
    pub fn new(destination_address: impl Into<String>) -> Self {
        Self {
            destination_address: Some(destination_address.into()),
            protocol: None,
        }
    }
}
