//! Testing utilities for code built on the advisor.
//!
//! [FakeServer] is an in-memory [Connector] that answers the version probe and the
//! schema checks from fixed data, and counts sessions so tests can assert that
//! every session was released.
//!
//! # Example
//!
//! ```
//! use mariadb_upgrade::testing::FakeServer;
//! use mariadb_upgrade::Advisor;
//!
//! let server = FakeServer::new("10.6.0-MariaDB");
//! let mut out = Vec::new();
//! let plan = Advisor::new(&server).run("10.11", &mut out).unwrap();
//!
//! assert_eq!(plan.transitions().len(), 1);
//! assert_eq!(server.sessions_open(), 0);
//! ```

use std::cell::Cell;
use std::rc::Rc;

use crate::checks::SchemaCheck;
use crate::error::Error;
use crate::mysql::missing_version;
use crate::server::{Connector, Session};

/// An in-memory stand-in for a MariaDB server.
#[derive(Debug, Clone)]
pub struct FakeServer {
    version: Option<String>,
    offset_tables: Vec<String>,
    compressed_tables: Vec<String>,
    max_connections: Option<usize>,
    fail_checks: bool,
    fail_probe: bool,
    opened: Rc<Cell<usize>>,
    open: Rc<Cell<usize>>,
}

impl FakeServer {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: Some(version.into()),
            offset_tables: vec![],
            compressed_tables: vec![],
            max_connections: None,
            fail_checks: false,
            fail_probe: false,
            opened: Rc::new(Cell::new(0)),
            open: Rc::new(Cell::new(0)),
        }
    }

    /// Tables returned by [SchemaCheck::ReservedWordOffset].
    pub fn with_offset_tables<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.offset_tables = tables.into_iter().map(Into::into).collect();
        self
    }

    /// Tables returned by [SchemaCheck::CompressedRowFormat].
    pub fn with_compressed_tables<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.compressed_tables = tables.into_iter().map(Into::into).collect();
        self
    }

    /// Refuse every connection attempt.
    pub fn refusing_connections(self) -> Self {
        self.refusing_connections_after(0)
    }

    /// Accept the first `n` connection attempts and refuse the rest.
    pub fn refusing_connections_after(mut self, n: usize) -> Self {
        self.max_connections = Some(n);
        self
    }

    /// Make every schema check query fail.
    pub fn failing_checks(mut self) -> Self {
        self.fail_checks = true;
        self
    }

    /// Make `SELECT VERSION()` come back without a row.
    pub fn without_version(mut self) -> Self {
        self.version = None;
        self
    }

    /// Make the version probe fail.
    pub fn failing_probe(mut self) -> Self {
        self.fail_probe = true;
        self
    }

    /// Total sessions successfully opened so far.
    pub fn sessions_opened(&self) -> usize {
        self.opened.get()
    }

    /// Sessions currently open (opened and not yet dropped).
    pub fn sessions_open(&self) -> usize {
        self.open.get()
    }
}

impl Connector for FakeServer {
    type Session = FakeSession;

    fn connect(&self) -> Result<FakeSession, Error> {
        if let Some(max) = self.max_connections {
            if self.opened.get() >= max {
                return Err(Error::Connection(format!(
                    "Access denied (connection {} refused)",
                    self.opened.get() + 1
                )));
            }
        }
        self.opened.set(self.opened.get() + 1);
        self.open.set(self.open.get() + 1);
        Ok(FakeSession {
            server: self.clone(),
        })
    }
}

/// A session opened on a [FakeServer].
#[derive(Debug)]
pub struct FakeSession {
    server: FakeServer,
}

impl Session for FakeSession {
    fn server_version(&mut self) -> Result<String, Error> {
        if self.server.fail_probe {
            return Err(Error::Mysql("Lost connection to server during query".to_string()));
        }
        self.server.version.clone().ok_or_else(missing_version)
    }

    fn table_names(&mut self, check: SchemaCheck) -> Result<Vec<String>, Error> {
        if self.server.fail_checks {
            return Err(Error::Mysql(format!(
                "SELECT command denied for {}",
                check.parameter()
            )));
        }
        Ok(match check {
            SchemaCheck::ReservedWordOffset => self.server.offset_tables.clone(),
            SchemaCheck::CompressedRowFormat => self.server.compressed_tables.clone(),
        })
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        self.server.open.set(self.server.open.get() - 1);
    }
}
