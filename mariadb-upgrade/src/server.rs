//! The seam between the advisor and a running server.

use std::fmt;

use crate::checks::SchemaCheck;
use crate::error::Error;

/// Default client-protocol port for MariaDB.
pub const DEFAULT_PORT: u16 = 3306;

/// Where and as whom to connect.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
}

impl ConnectionSettings {
    pub fn new(host: impl Into<String>, user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            user: user.into(),
            password: password.into(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

// Keeps the password out of logs and panic messages.
impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// An open session to one server. Dropping it closes the session.
pub trait Session {
    /// The server's `VERSION()` string, verbatim (e.g. `10.5.21-MariaDB`).
    fn server_version(&mut self) -> Result<String, Error>;

    /// Table names matched by a [SchemaCheck], in the order the server returns them.
    fn table_names(&mut self, check: SchemaCheck) -> Result<Vec<String>, Error>;
}

/// Opens [Session]s to the same server with the same credentials.
pub trait Connector {
    type Session: Session;

    fn connect(&self) -> Result<Self::Session, Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_password() {
        let settings = ConnectionSettings::new("db1", "admin", "hunter2").with_port(3307);
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("db1"));
        assert!(debug.contains("3307"));
    }

    #[test]
    fn port_defaults_to_3306() {
        assert_eq!(ConnectionSettings::new("h", "u", "p").port, 3306);
    }
}
