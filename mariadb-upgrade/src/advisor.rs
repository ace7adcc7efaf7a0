//! The end-to-end advisory run: connect, probe, plan, check, render.

use std::io::Write;

use crate::checks::run_checks;
use crate::dispatch::{plan_upgrade, UpgradePlan};
use crate::error::Error;
use crate::render::render_report;
use crate::server::{Connector, Session};

/// Runs the upgrade advisory against whatever server `connector` reaches.
#[derive(Debug)]
pub struct Advisor<'c, C> {
    connector: &'c C,
}

impl<'c, C: Connector> Advisor<'c, C> {
    pub fn new(connector: &'c C) -> Self {
        Self { connector }
    }

    /// Print the reports needed to take the server to `target_version`.
    ///
    /// Fails without writing anything if the main session cannot be opened. The main
    /// session is held for the whole run and closed before returning; each live
    /// check opens and closes its own session. Returns the plan that was executed,
    /// which is empty (after a notice) when no upgrade path applies.
    pub fn run<W: Write>(&self, target_version: &str, out: &mut W) -> Result<UpgradePlan, Error> {
        let mut session = self.connector.connect()?;
        tracing::debug!("Main session opened");

        let current_version = session.server_version()?;
        writeln!(out, "Current MariaDB version: {}", current_version)?;

        let plan = plan_upgrade(&current_version, target_version);
        if plan.is_empty() {
            tracing::warn!(
                current_version = %current_version,
                target_version = %target_version,
                "No upgrade path"
            );
            writeln!(
                out,
                "No upgrade path from {} to {}; nothing to report.",
                current_version, target_version
            )?;
        } else {
            tracing::info!(
                current_version = %current_version,
                target_version = %target_version,
                transitions = ?plan.transitions().iter().map(|t| t.to_string()).collect::<Vec<_>>(),
                "Planned upgrade reports"
            );
        }

        for transition in plan.transitions() {
            let report = transition.report();
            let checks = run_checks(self.connector, report.schema_checks);
            render_report(out, report, &checks)?;
        }

        drop(session);
        tracing::debug!("Main session closed");

        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::knowledge::Transition;
    use crate::testing::FakeServer;

    fn run(server: &FakeServer, target: &str) -> (Result<UpgradePlan, Error>, String) {
        let mut out = Vec::new();
        let result = Advisor::new(server).run(target, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    fn section_headers(output: &str) -> Vec<&str> {
        output
            .lines()
            .filter(|l| l.starts_with("Upgrading dependencies from "))
            .collect()
    }

    #[test]
    fn from_10_4_prints_three_reports_in_order() {
        let server = FakeServer::new("10.4.2-MariaDB");

        let (result, output) = run(&server, "10.11");

        assert_eq!(result.unwrap().transitions().len(), 3);
        assert!(output.starts_with("Current MariaDB version: 10.4.2-MariaDB\n"));
        assert_eq!(
            section_headers(&output),
            vec![
                "Upgrading dependencies from 10.4 to 10.5",
                "Upgrading dependencies from 10.5 to 10.6",
                "Upgrading dependencies from 10.6 to 10.11",
            ]
        );
        // main session plus one per live check in the 10.5 to 10.6 report
        assert_eq!(server.sessions_opened(), 3);
        assert_eq!(server.sessions_open(), 0);
    }

    #[test]
    fn from_10_6_prints_one_report_without_checks() {
        let server = FakeServer::new("10.6.0-MariaDB");

        let (result, output) = run(&server, "10.11");

        assert_eq!(
            result.unwrap().transitions(),
            &[Transition::From10_6To10_11]
        );
        assert_eq!(
            section_headers(&output),
            vec!["Upgrading dependencies from 10.6 to 10.11"]
        );
        assert!(!output.contains("OFFSET"));
        assert_eq!(server.sessions_opened(), 1);
    }

    #[test]
    fn unsupported_version_prints_notice_and_no_sections() {
        let server = FakeServer::new("10.7.0-MariaDB");

        let (result, output) = run(&server, "10.11");

        assert!(result.unwrap().is_empty());
        assert_eq!(
            output,
            "Current MariaDB version: 10.7.0-MariaDB\n\
             No upgrade path from 10.7.0-MariaDB to 10.11; nothing to report.\n"
        );
        assert!(section_headers(&output).is_empty());
        assert_eq!(server.sessions_open(), 0);
    }

    #[test]
    fn connection_failure_writes_nothing() {
        let server = FakeServer::new("10.4.2-MariaDB").refusing_connections();

        let (result, output) = run(&server, "10.11");

        assert!(matches!(result, Err(Error::Connection(_))));
        assert_eq!(output, "");
    }

    #[test]
    fn probe_failure_releases_main_session() {
        let server = FakeServer::new("10.4.2-MariaDB").failing_probe();

        let (result, output) = run(&server, "10.11");

        assert!(matches!(result, Err(Error::Mysql(_))));
        assert_eq!(output, "");
        assert_eq!(server.sessions_opened(), 1);
        assert_eq!(server.sessions_open(), 0);
    }

    #[test]
    fn missing_version_row_is_a_query_error() {
        let server = FakeServer::new("10.4.2-MariaDB").without_version();

        let (result, output) = run(&server, "10.11");

        assert_eq!(
            result,
            Err(Error::Mysql("SELECT VERSION() returned no row".to_string()))
        );
        assert_eq!(output, "");
        assert_eq!(server.sessions_opened(), 1);
        assert_eq!(server.sessions_open(), 0);
    }

    #[test]
    fn failing_checks_do_not_stop_later_reports() {
        // only the main session may connect; both checks are refused
        let server = FakeServer::new("10.5.21-MariaDB").refusing_connections_after(1);

        let (result, output) = run(&server, "10.11");

        assert_eq!(result.unwrap().transitions().len(), 2);
        assert!(output.contains("No tables found using 'OFFSET' in their names."));
        assert!(output.contains("No tables found using COMPRESSED row format."));
        assert_eq!(output.matches("  Check failed: ").count(), 2);
        assert!(output.contains("Upgrading dependencies from 10.6 to 10.11"));
        assert_eq!(server.sessions_open(), 0);
    }

    #[test]
    fn live_check_findings_appear_in_the_10_5_report() {
        let server = FakeServer::new("10.5.21-MariaDB")
            .with_offset_tables(["t_offset_test"])
            .with_compressed_tables(["archive_2019", "archive_2020"]);

        let (_, output) = run(&server, "10.11");

        assert!(output.contains("Tables using 'OFFSET' in their names:\n  - t_offset_test\n"));
        assert!(output.contains("COMPRESSED tables:\n  - archive_2019\n  - archive_2020\n"));
        assert_eq!(server.sessions_opened(), 3);
    }

    #[test]
    fn missing_upgrade_path_is_logged() {
        let events = Arc::new(Mutex::new(Vec::<u8>::new()));
        let events_clone = Arc::clone(&events);

        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .without_time()
            .with_target(false)
            .with_ansi(false)
            .with_writer(move || {
                struct W(Arc<Mutex<Vec<u8>>>);
                impl std::io::Write for W {
                    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                        self.0.lock().unwrap().extend_from_slice(buf);
                        Ok(buf.len())
                    }
                    fn flush(&mut self) -> std::io::Result<()> {
                        Ok(())
                    }
                }
                W(Arc::clone(&events_clone))
            })
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let server = FakeServer::new("10.3.39-MariaDB");
            let _ = run(&server, "10.11");
        });

        let logged = String::from_utf8(events.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("WARN"));
        assert!(logged.contains("No upgrade path"));
        assert!(logged.contains("current_version=10.3.39-MariaDB"));
        assert!(logged.contains("target_version=10.11"));
    }
}
