//!
//! # Live schema checks
//!
//! Read-only lookups against `information_schema.tables` that flag tables affected
//! by behaviour changes in the target release. Each check opens its own session
//! through the [Connector], so a failing check never disturbs the main session or
//! the checks that follow it.
//!

use crate::error::Error;
use crate::server::{Connector, Session};

/// A read-only query against `information_schema.tables` returning table names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaCheck {
    /// Tables whose name contains `offset`, which is a reserved word from 10.6 on.
    ReservedWordOffset,
    /// Tables stored with `ROW_FORMAT=COMPRESSED`.
    CompressedRowFormat,
}

impl SchemaCheck {
    /// Prepared statement text. The match value is bound, never interpolated.
    pub fn sql(self) -> &'static str {
        match self {
            SchemaCheck::ReservedWordOffset => {
                "SELECT table_name FROM information_schema.tables WHERE table_name LIKE ?"
            }
            SchemaCheck::CompressedRowFormat => {
                "SELECT table_name FROM information_schema.tables WHERE row_format = ?"
            }
        }
    }

    /// Value bound to the single placeholder in [SchemaCheck::sql].
    pub fn parameter(self) -> &'static str {
        match self {
            SchemaCheck::ReservedWordOffset => "%offset%",
            SchemaCheck::CompressedRowFormat => "COMPRESSED",
        }
    }

    pub(crate) fn announcement(self) -> &'static str {
        match self {
            SchemaCheck::ReservedWordOffset => {
                "Checking for usage of the reserved word 'OFFSET' in names..."
            }
            SchemaCheck::CompressedRowFormat => "Listing tables with COMPRESSED row format...",
        }
    }

    pub(crate) fn none_found(self) -> &'static str {
        match self {
            SchemaCheck::ReservedWordOffset => "No tables found using 'OFFSET' in their names.",
            SchemaCheck::CompressedRowFormat => "No tables found using COMPRESSED row format.",
        }
    }

    pub(crate) fn found_heading(self) -> &'static str {
        match self {
            SchemaCheck::ReservedWordOffset => "Tables using 'OFFSET' in their names:",
            SchemaCheck::CompressedRowFormat => "COMPRESSED tables:",
        }
    }
}

/// The result of running one [SchemaCheck].
#[derive(Debug, PartialEq)]
pub enum CheckOutcome {
    /// The query ran; the affected tables, possibly none.
    Found(Vec<String>),
    /// The session could not be opened or the query failed. Treated as no results.
    Failed(Error),
}

impl CheckOutcome {
    /// Affected tables, empty when the check failed.
    pub fn tables(&self) -> &[String] {
        match self {
            CheckOutcome::Found(tables) => tables,
            CheckOutcome::Failed(_) => &[],
        }
    }
}

/// Run a single check on a fresh session, which is released before this returns.
pub fn run_check<C: Connector>(connector: &C, check: SchemaCheck) -> CheckOutcome {
    let result = connector
        .connect()
        .and_then(|mut session| session.table_names(check));

    match result {
        Ok(tables) => {
            tracing::debug!(check = ?check, found = tables.len(), "Schema check completed");
            CheckOutcome::Found(tables)
        }
        Err(error) => {
            tracing::warn!(check = ?check, error = %error, "Schema check failed");
            CheckOutcome::Failed(error)
        }
    }
}

/// Run every check in order, pairing each with its outcome.
pub fn run_checks<C: Connector>(
    connector: &C,
    checks: &[SchemaCheck],
) -> Vec<(SchemaCheck, CheckOutcome)> {
    checks
        .iter()
        .map(|&check| (check, run_check(connector, check)))
        .collect()
}
