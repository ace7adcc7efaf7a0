//! `mariadb-upgrade` helps plan an upgrade of a MariaDB server from 10.4, 10.5 or 10.6
//! to 10.11.
//!
//! It connects to a running server, reads its version, and prints one advisory
//! report per major-version transition still ahead of it: server variables whose
//! defaults changed, deprecated variables, and removed or renamed variables. The
//! 10.5 to 10.6 report also runs two read-only checks against
//! `information_schema.tables`, flagging tables whose names collide with the newly
//! reserved word `OFFSET` and tables using `ROW_FORMAT=COMPRESSED`.
//!
//! ## Example
//!
//! ```no_run
//! use mariadb_upgrade::{Advisor, ConnectionSettings, MysqlConnector};
//!
//! let connector = MysqlConnector::new(ConnectionSettings::new("db1.internal", "admin", "secret"));
//! let mut stdout = std::io::stdout();
//! let plan = Advisor::new(&connector).run("10.11", &mut stdout)?;
//! println!("{} transition report(s) printed", plan.transitions().len());
//! # Ok::<(), mariadb_upgrade::Error>(())
//! ```
//!
//! Nothing here modifies the server. The knowledge base is fixed at compile time;
//! see [Transition] for the supported steps.

mod advisor;
pub use advisor::Advisor;

pub mod checks;
pub use checks::{CheckOutcome, SchemaCheck};

mod dispatch;
pub use dispatch::{plan_upgrade, UpgradePlan, SUPPORTED_TARGET};

mod error;
pub use error::Error;

pub mod knowledge;
pub use knowledge::{NotedOption, OptionChange, Transition, TransitionReport};

pub mod mysql;
pub use crate::mysql::{MysqlConnector, MysqlSession};

pub mod render;

mod server;
pub use server::{ConnectionSettings, Connector, Session, DEFAULT_PORT};

#[cfg(any(test, feature = "testing"))]
pub mod testing;

#[cfg(all(test, feature = "integration"))]
pub(crate) mod test_mysql;
