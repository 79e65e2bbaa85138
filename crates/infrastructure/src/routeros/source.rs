use super::client::RouterOsClient;
use async_trait::async_trait;
use routewatch_application::ports::ConnectionSource;
use routewatch_domain::{ConnectionEntry, DomainError, RouterConfig};
use tokio::sync::Mutex;
use tracing::{info, warn};

const CONNECTION_PRINT: &str = "/ip/firewall/connection/print";
const CONNECTION_PROPLIST: &str = "=.proplist=dst-address,protocol";

/// `/ip/firewall/connection` as a [`ConnectionSource`].
///
/// The first connect happens in [`RouterOsConnectionSource::connect`] and its
/// failure is returned to the caller. After that, a poll that breaks the
/// session drops it and the next poll logs in again.
pub struct RouterOsConnectionSource {
    config: RouterConfig,
    session: Mutex<Option<RouterOsClient>>,
}

impl RouterOsConnectionSource {
    pub async fn connect(config: RouterConfig) -> Result<Self, DomainError> {
        let client = RouterOsClient::connect(&config).await?;
        info!(host = %client.host(), "Connected to RouterOS API");

        Ok(Self {
            config,
            session: Mutex::new(Some(client)),
        })
    }
}

#[async_trait]
impl ConnectionSource for RouterOsConnectionSource {
    async fn poll(&self) -> Result<Vec<ConnectionEntry>, DomainError> {
        let mut session = self.session.lock().await;

        if session.is_none() {
            let client = RouterOsClient::connect(&self.config).await?;
            info!(host = %client.host(), "Reconnected to RouterOS API");
            *session = Some(client);
        }

        let Some(client) = session.as_mut() else {
            return Err(DomainError::PollFailed("No router session".to_string()));
        };

        let response = match client.command(&[CONNECTION_PRINT, CONNECTION_PROPLIST]).await {
            Ok(response) => response,
            Err(e) => {
                if e.is_session_fatal() {
                    warn!(error = %e, "Dropping broken RouterOS session");
                    *session = None;
                }
                return Err(e);
            }
        };

        if let Some(message) = response.trap {
            return Err(DomainError::PollFailed(message));
        }

        Ok(response
            .rows
            .into_iter()
            .map(|mut row| ConnectionEntry {
                destination_address: row.remove("dst-address"),
                protocol: row.remove("protocol"),
            })
            .collect())
    }
}
