//! Plain-text rendering of transition reports.
//!
//! Everything here writes to a caller-supplied [Write] and has no other effects.

use std::io::Write;

use crate::checks::{CheckOutcome, SchemaCheck};
use crate::knowledge::{NotedOption, OptionChange, TransitionReport};

const RULE: &str = "========================================";

pub fn render_header<W: Write>(out: &mut W, report: &TransitionReport) -> std::io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Upgrading dependencies from {}", report.label())?;
    writeln!(out, "{}", RULE)
}

pub fn render_option_change<W: Write>(out: &mut W, change: &OptionChange) -> std::io::Result<()> {
    writeln!(out, "Option: {}", change.name)?;
    writeln!(out, "  Old Default: {}", change.old_default)?;
    writeln!(out, "  New Default: {}", change.new_default)?;
    writeln!(out, "  Description: {}", change.description)
}

pub fn render_list<W: Write>(
    out: &mut W,
    heading: &str,
    options: &[NotedOption],
) -> std::io::Result<()> {
    writeln!(out, "{}", heading)?;
    if options.is_empty() {
        return writeln!(out, "  (none)");
    }
    for option in options {
        writeln!(out, "  - {}", option)?;
    }
    Ok(())
}

/// Render the result of one live check. A failed check prints its diagnostic and
/// then reads as "no tables found".
pub fn render_check<W: Write>(
    out: &mut W,
    check: SchemaCheck,
    outcome: &CheckOutcome,
) -> std::io::Result<()> {
    writeln!(out, "{}", check.announcement())?;
    if let CheckOutcome::Failed(error) = outcome {
        writeln!(out, "  Check failed: {}", error)?;
    }
    let tables = outcome.tables();
    if tables.is_empty() {
        return writeln!(out, "{}", check.none_found());
    }
    writeln!(out, "{}", check.found_heading())?;
    for table in tables {
        writeln!(out, "  - {}", table)?;
    }
    Ok(())
}

/// Render a full transition report: header, live check results, option changes,
/// then the deprecated and removed/renamed lists.
pub fn render_report<W: Write>(
    out: &mut W,
    report: &TransitionReport,
    checks: &[(SchemaCheck, CheckOutcome)],
) -> std::io::Result<()> {
    render_header(out, report)?;
    for (check, outcome) in checks {
        render_check(out, *check, outcome)?;
    }
    for change in report.option_changes {
        render_option_change(out, change)?;
    }
    render_list(out, "Listing deprecated options:", report.deprecated)?;
    render_list(
        out,
        "Listing options that have been removed or renamed:",
        report.removed_or_renamed,
    )
}
