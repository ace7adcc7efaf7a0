//!
//! # MariaDB / MySQL protocol support
//!
//! [MysqlConnector] opens synchronous [mysql::Conn] sessions. Every statement is
//! issued over that connection with bound parameters; nothing is passed through a
//! shell or an external client.
//!

use crate::checks::SchemaCheck;
use crate::error::Error;
use crate::server::{ConnectionSettings, Connector, Session};
use mysql::prelude::*;
use mysql::{Conn, OptsBuilder};

/// Opens sessions to a MariaDB server using the given [ConnectionSettings].
#[derive(Debug, Clone)]
pub struct MysqlConnector {
    settings: ConnectionSettings,
}

impl MysqlConnector {
    pub fn new(settings: ConnectionSettings) -> Self {
        Self { settings }
    }

    fn opts(&self) -> OptsBuilder {
        OptsBuilder::new()
            .ip_or_hostname(Some(self.settings.host.as_str()))
            .tcp_port(self.settings.port)
            .user(Some(self.settings.user.as_str()))
            .pass(Some(self.settings.password.as_str()))
    }
}

impl Connector for MysqlConnector {
    type Session = MysqlSession;

    fn connect(&self) -> Result<MysqlSession, Error> {
        tracing::debug!(
            host = %self.settings.host,
            port = self.settings.port,
            user = %self.settings.user,
            "Opening session"
        );
        let conn = Conn::new(self.opts()).map_err(|e| Error::Connection(e.to_string()))?;
        Ok(MysqlSession { conn })
    }
}

pub(crate) fn missing_version() -> Error {
    Error::Mysql("SELECT VERSION() returned no row".to_string())
}

/// A single live session. The connection is closed when this is dropped.
pub struct MysqlSession {
    conn: Conn,
}

impl MysqlSession {
    /// Borrow the underlying connection, e.g. to prepare fixtures in tests.
    pub fn conn(&mut self) -> &mut Conn {
        &mut self.conn
    }
}

impl Session for MysqlSession {
    fn server_version(&mut self) -> Result<String, Error> {
        let version: Option<String> = self.conn.query_first("SELECT VERSION()")?;
        version.ok_or_else(missing_version)
    }

    fn table_names(&mut self, check: SchemaCheck) -> Result<Vec<String>, Error> {
        tracing::debug!(sql = check.sql(), parameter = check.parameter(), "Running schema check");
        let tables: Vec<String> = self.conn.exec(check.sql(), (check.parameter(),))?;
        Ok(tables)
    }
}
