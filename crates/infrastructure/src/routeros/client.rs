use super::codec::{read_sentence, write_sentence};
use super::reply::{trap_message, Attributes, Reply};
use routewatch_domain::{DomainError, RouterConfig};
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::debug;

/// Rows and optional `!trap` message collected up to `!done`.
#[derive(Debug, Default)]
pub struct CommandResponse {
    pub rows: Vec<Attributes>,
    pub done: Attributes,
    pub trap: Option<String>,
}

/// Authenticated RouterOS API session over plain TCP.
pub struct RouterOsClient {
    stream: TcpStream,
    host: String,
    io_timeout: Duration,
}

impl RouterOsClient {
    /// Connect and log in with the plaintext `/login` method (RouterOS 6.43+).
    pub async fn connect(config: &RouterConfig) -> Result<Self, DomainError> {
        let address = config.address();
        let io_timeout = Duration::from_secs(config.timeout);

        let stream = tokio::time::timeout(io_timeout, TcpStream::connect(&address))
            .await
            .map_err(|_| DomainError::ConnectionFailed {
                host: address.clone(),
                reason: format!("timed out after {}s", config.timeout),
            })?
            .map_err(|e| DomainError::ConnectionFailed {
                host: address.clone(),
                reason: e.to_string(),
            })?;

        stream
            .set_nodelay(true)
            .map_err(|e| DomainError::ConnectionFailed {
                host: address.clone(),
                reason: format!("failed to set TCP_NODELAY: {}", e),
            })?;

        let mut client = Self {
            stream,
            host: address,
            io_timeout,
        };
        client.login(&config.username, &config.password).await?;

        Ok(client)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    async fn login(&mut self, username: &str, password: &str) -> Result<(), DomainError> {
        let name = format!("=name={}", username);
        let pass = format!("=password={}", password);
        let response = self.command(&["/login", name.as_str(), pass.as_str()]).await?;

        if let Some(message) = response.trap {
            return Err(DomainError::AuthenticationFailed(message));
        }

        // Pre-6.43 routers answer the plaintext login with an MD5 challenge.
        if response.done.contains_key("ret") {
            return Err(DomainError::AuthenticationFailed(
                "router requires legacy challenge login (RouterOS < 6.43)".to_string(),
            ));
        }

        debug!(host = %self.host, user = username, "RouterOS login accepted");
        Ok(())
    }

    /// Send one command and read replies until `!done`.
    pub async fn command<S: AsRef<str>>(
        &mut self,
        words: &[S],
    ) -> Result<CommandResponse, DomainError> {
        let io_timeout = self.io_timeout;
        match tokio::time::timeout(io_timeout, self.exchange(words)).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::IoError(format!(
                "No reply from {} within {}s",
                self.host,
                io_timeout.as_secs()
            ))),
        }
    }

    async fn exchange<S: AsRef<str>>(
        &mut self,
        words: &[S],
    ) -> Result<CommandResponse, DomainError> {
        write_sentence(&mut self.stream, words).await?;

        let mut response = CommandResponse::default();
        loop {
            let sentence = read_sentence(&mut self.stream).await?;
            match Reply::parse(sentence)? {
                Reply::Row(attrs) => response.rows.push(attrs),
                Reply::Empty => {}
                Reply::Trap(attrs) => response.trap = Some(trap_message(&attrs)),
                Reply::Done(attrs) => {
                    response.done = attrs;
                    return Ok(response);
                }
                Reply::Fatal(message) => {
                    return Err(DomainError::ProtocolError(format!(
                        "Router closed the session: {}",
                        message
                    )));
                }
            }
        }
    }
}
