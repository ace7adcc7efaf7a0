//! Static knowledge of what changes between consecutive MariaDB major versions.
//!
//! Each [Transition] owns one [TransitionReport]: the server variables whose
//! defaults changed, the variables deprecated in the newer release, and the
//! variables removed or renamed outright. Every option change is a single
//! [OptionChange] record, so a name can never drift away from its defaults or
//! description.

use std::fmt;

use crate::checks::SchemaCheck;

/// A server variable whose default value changed between two releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionChange {
    pub name: &'static str,
    pub old_default: &'static str,
    pub new_default: &'static str,
    pub description: &'static str,
}

impl OptionChange {
    pub const fn new(
        name: &'static str,
        old_default: &'static str,
        new_default: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            old_default,
            new_default,
            description,
        }
    }
}

/// A deprecated, removed or renamed variable, optionally with advice on what replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotedOption {
    pub name: &'static str,
    pub note: Option<&'static str>,
}

impl NotedOption {
    pub const fn new(name: &'static str) -> Self {
        Self { name, note: None }
    }

    pub const fn with_note(name: &'static str, note: &'static str) -> Self {
        Self {
            name,
            note: Some(note),
        }
    }
}

impl fmt::Display for NotedOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.note {
            Some(note) => write!(f, "{}: {}", self.name, note),
            None => f.write_str(self.name),
        }
    }
}

/// Everything an administrator should review when moving across one version boundary.
#[derive(Debug, PartialEq)]
pub struct TransitionReport {
    /// Servers whose `VERSION()` starts with this prefix are on the "from" side.
    pub from_version_prefix: &'static str,
    pub to_version: &'static str,
    pub option_changes: &'static [OptionChange],
    pub deprecated: &'static [NotedOption],
    pub removed_or_renamed: &'static [NotedOption],
    /// Live checks to run against the server before rendering this report.
    pub schema_checks: &'static [SchemaCheck],
}

impl TransitionReport {
    /// Human readable label, e.g. `10.5 to 10.6`.
    pub fn label(&self) -> String {
        format!("{} to {}", self.from_version_prefix, self.to_version)
    }
}

/// One step of the supported upgrade chain, in ascending version order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Transition {
    From10_4To10_5,
    From10_5To10_6,
    From10_6To10_11,
}

impl Transition {
    /// Every supported transition, in the order they must be applied.
    pub const ALL: [Transition; 3] = [
        Transition::From10_4To10_5,
        Transition::From10_5To10_6,
        Transition::From10_6To10_11,
    ];

    pub fn report(self) -> &'static TransitionReport {
        match self {
            Transition::From10_4To10_5 => &FROM_10_4_TO_10_5,
            Transition::From10_5To10_6 => &FROM_10_5_TO_10_6,
            Transition::From10_6To10_11 => &FROM_10_6_TO_10_11,
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report().label())
    }
}

/// Check the structural invariants of the built-in tables.
///
/// Transitions must chain (each one starts where the previous one ended), option
/// names must be unique within a transition, and no record may carry an empty field.
pub fn validate() -> Result<(), String> {
    for pair in Transition::ALL.windows(2) {
        let (prev, next) = (pair[0].report(), pair[1].report());
        if prev.to_version != next.from_version_prefix {
            return Err(format!(
                "Transitions must be contiguous. {} is followed by {}",
                prev.label(),
                next.label()
            ));
        }
    }

    for transition in Transition::ALL {
        let report = transition.report();
        for (i, change) in report.option_changes.iter().enumerate() {
            if [
                change.name,
                change.old_default,
                change.new_default,
                change.description,
            ]
            .iter()
            .any(|field| field.is_empty())
            {
                return Err(format!(
                    "Option change {} in {} has an empty field",
                    i,
                    report.label()
                ));
            }
            if report.option_changes[..i]
                .iter()
                .any(|earlier| earlier.name == change.name)
            {
                return Err(format!(
                    "Duplicate option {} in {}",
                    change.name,
                    report.label()
                ));
            }
        }
        if let Some(empty) = report
            .deprecated
            .iter()
            .chain(report.removed_or_renamed)
            .find(|option| option.name.is_empty() || option.note == Some(""))
        {
            return Err(format!(
                "Listed option '{}' in {} is incomplete",
                empty,
                report.label()
            ));
        }
    }

    Ok(())
}

static FROM_10_4_TO_10_5: TransitionReport = TransitionReport {
    from_version_prefix: "10.4",
    to_version: "10.5",
    option_changes: &[
        OptionChange::new(
            "innodb_adaptive_hash_index",
            "ON",
            "OFF",
            "Controls the use of the adaptive hash index, reducing potential overhead.",
        ),
        OptionChange::new(
            "innodb_checksum_algorithm",
            "crc32",
            "full_crc32",
            "Switches to a more comprehensive checksum algorithm.",
        ),
        OptionChange::new(
            "innodb_log_optimize_ddl",
            "ON",
            "OFF",
            "Disables optimization in the logging of DDL statements.",
        ),
        OptionChange::new(
            "slave_parallel_mode",
            "conservative",
            "optimistic",
            "Changes parallel slave execution mode to a more aggressive approach.",
        ),
        OptionChange::new(
            "performance_schema_max_cond_classes",
            "80",
            "90",
            "Increases the number of condition classes available in the performance schema.",
        ),
        OptionChange::new(
            "performance_schema_max_file_classes",
            "50",
            "80",
            "Expands the number of file classes for performance monitoring.",
        ),
        OptionChange::new(
            "performance_schema_max_mutex_classes",
            "200",
            "210",
            "Boosts the count of mutex classes in performance data collection.",
        ),
        OptionChange::new(
            "performance_schema_max_rwlock_classes",
            "40",
            "50",
            "Enhances the tracking of read-write lock classes in the performance schema.",
        ),
        OptionChange::new(
            "performance_schema_setup_actors_size",
            "100",
            "-1",
            "Sets the setup actors size, if not explicitly defined, to unlimited.",
        ),
        OptionChange::new(
            "performance_schema_setup_objects_size",
            "100",
            "-1",
            "Defines setup objects size to unlimited, optimizing storage.",
        ),
    ],
    deprecated: &[
        NotedOption::new("innodb_adaptive_max_sleep_delay"),
        NotedOption::new("innodb_background_scrub_data_check_interval"),
        NotedOption::new("innodb_background_scrub_data_interval"),
        NotedOption::new("innodb_background_scrub_data_compressed"),
        NotedOption::new("innodb_background_scrub_data_uncompressed"),
        NotedOption::new("innodb_buffer_pool_instances"),
        NotedOption::new("innodb_commit_concurrency"),
        NotedOption::new("innodb_concurrency_tickets"),
        NotedOption::new("innodb_log_files_in_group"),
        NotedOption::new("innodb_log_optimize_ddl"),
        NotedOption::new("innodb_page_cleaners"),
        NotedOption::new("innodb_replication_delay"),
        NotedOption::new("innodb_scrub_log"),
        NotedOption::new("innodb_scrub_log_speed"),
        NotedOption::new("innodb_thread_concurrency"),
        NotedOption::new("innodb_thread_sleep_delay"),
        NotedOption::new("innodb_undo_logs"),
        NotedOption::new("large_page_size"),
    ],
    removed_or_renamed: &[],
    schema_checks: &[],
};

static FROM_10_5_TO_10_6: TransitionReport = TransitionReport {
    from_version_prefix: "10.5",
    to_version: "10.6",
    option_changes: &[
        OptionChange::new(
            "character_set_client",
            "utf8",
            "utf8mb3",
            "Sets the client's character set to utf8mb3 by default.",
        ),
        OptionChange::new(
            "character_set_connection",
            "utf8",
            "utf8mb3",
            "Changes the connection's character set to utf8mb3.",
        ),
        OptionChange::new(
            "character_set_results",
            "utf8",
            "utf8mb3",
            "Results are now utf8mb3 coded by default.",
        ),
        OptionChange::new(
            "character_set_system",
            "utf8",
            "utf8mb3",
            "System character set set to utf8mb3 for backward compatibility.",
        ),
        OptionChange::new(
            "innodb_flush_method",
            "fsync",
            "O_DIRECT",
            "Flush method switched to O_DIRECT for direct disk access.",
        ),
        OptionChange::new(
            "old_mode",
            "Empty",
            "UTF8_IS_UTF8MB3",
            "Defines default character set behavior for utf8 aliases.",
        ),
    ],
    deprecated: &[
        NotedOption::with_note("wsrep_replicate_myisam", "Use wsrep_mode instead."),
        NotedOption::with_note("wsrep_strict_ddl", "Use wsrep_mode instead."),
    ],
    removed_or_renamed: &[
        NotedOption::with_note("innodb_checksum_algorithm", "The variable is still present, but the *innodb and *none options have been removed."),
        NotedOption::new("innodb_commit_concurrency"),
        NotedOption::new("innodb_concurrency_tickets"),
        NotedOption::new("innodb_file_format"),
        NotedOption::new("innodb_large_prefix"),
    ],
    // OFFSET became a reserved word in 10.6 and COMPRESSED tables became read-only by default.
    schema_checks: &[SchemaCheck::ReservedWordOffset, SchemaCheck::CompressedRowFormat],
};

static FROM_10_6_TO_10_11: TransitionReport = TransitionReport {
    from_version_prefix: "10.6",
    to_version: "10.11",
    option_changes: &[
        OptionChange::new(
            "innodb_buffer_pool_chunk_size",
            "134217728",
            "Autosized",
            "Controls size of memory chunks allocated to the InnoDB buffer pool, now autosized for optimization.",
        ),
        OptionChange::new(
            "spider_auto_increment_mode",
            "-1",
            "0",
            "Sets behavior for auto-increment columns; ensuring reliability.",
        ),
        OptionChange::new(
            "spider_bgs_first_read",
            "-1",
            "2",
            "Adjusts the batch reading strategy to enhance query performance under Spider engine.",
        ),
        OptionChange::new(
            "spider_bgs_mode",
            "-1",
            "0",
            "Manages batch processing for Spider engine operations, improving speed.",
        ),
        OptionChange::new(
            "spider_bgs_second_read",
            "-1",
            "100",
            "Configures secondary batch read parameters for Spider to handle queries efficiently.",
        ),
        OptionChange::new(
            "spider_bka_mode",
            "-1",
            "1",
            "Determines mode for batch key access hence optimizing indexing.",
        ),
        OptionChange::new(
            "spider_bka_table_name_type",
            "-1",
            "1",
            "Specifies how table names are processed in BKA, enabling better compatibility.",
        ),
        OptionChange::new(
            "spider_buffer_size",
            "-1",
            "16000",
            "Defines buffer size for Spider operations, crucial for handling large data transfers.",
        ),
        OptionChange::new(
            "spider_bulk_size",
            "-1",
            "16000",
            "Adjusts the bulk processing size for better handling of large payloads.",
        ),
        OptionChange::new(
            "spider_bulk_update_mode",
            "-1",
            "0",
            "Sets mode for bulk update operations to facilitate batch changes.",
        ),
        OptionChange::new(
            "spider_bulk_update_size",
            "-1",
            "16000",
            "Determines bulk update size for processing, enhancing batch update efficiency.",
        ),
        OptionChange::new(
            "spider_casual_read",
            "-1",
            "0",
            "Optimizes casual read performance for Spider queries.",
        ),
        OptionChange::new(
            "spider_connect_timeout",
            "-1",
            "6",
            "Adjusts timeout for connection attempts under Spider engine, enhancing reliability.",
        ),
        OptionChange::new(
            "spider_crd_bg_mode",
            "-1",
            "2",
            "Configures background mode for CRD operations, improving asynchronous tasks.",
        ),
        OptionChange::new(
            "spider_crd_interval",
            "-1",
            "51",
            "Sets intervals for CRD processes, crucial for periodic updates.",
        ),
        OptionChange::new(
            "spider_crd_mode",
            "-1",
            "1",
            "Establishes mode for CRD operations, optimizing consistency.",
        ),
        OptionChange::new(
            "spider_crd_sync",
            "-1",
            "0",
            "Syncs CRD processes, ensuring data integrity.",
        ),
        OptionChange::new(
            "spider_crd_type",
            "-1",
            "2",
            "Determines the processing type for CRD, enhancing data tasks.",
        ),
        OptionChange::new(
            "spider_crd_weight",
            "-1",
            "2",
            "Weights CRD procedure execution, allowing prioritization.",
        ),
        OptionChange::new(
            "spider_delete_all_rows_type",
            "-1",
            "1",
            "Defines types for deleting rows in Spider, optimizing space management.",
        ),
        OptionChange::new(
            "spider_direct_dup_insert",
            "-1",
            "0",
            "Manages direct duplicate insert handling, reducing collision errors.",
        ),
        OptionChange::new(
            "spider_direct_order_limit",
            "-1",
            "9223372036854775807",
            "Limits direct ordering, enhancing result handling.",
        ),
        OptionChange::new(
            "spider_error_read_mode",
            "-1",
            "0",
            "Sets error handling for read operations, ensuring robustness.",
        ),
        OptionChange::new(
            "spider_error_write_mode",
            "-1",
            "0",
            "Defines error handling mode for writes, ensuring reliability.",
        ),
        OptionChange::new(
            "spider_first_read",
            "-1",
            "0",
            "Configures initial parameters for single read operations, improving efficiency.",
        ),
        OptionChange::new(
            "spider_init_sql_alloc_size",
            "-1",
            "1024",
            "Specifies allocation size for SQL initialization, optimizing setup.",
        ),
        OptionChange::new(
            "spider_internal_limit",
            "-1",
            "9223372036854775807",
            "Establishes limits for internal Spider operations, handling large results.",
        ),
        OptionChange::new(
            "spider_internal_offset",
            "-1",
            "0",
            "Adjusts internal offset strategies for Spider, improving query handling.",
        ),
        OptionChange::new(
            "spider_internal_optimize",
            "-1",
            "0",
            "Optimizes internal Spider behaviors for better local execution.",
        ),
        OptionChange::new(
            "spider_internal_optimize_local",
            "-1",
            "0",
            "Helps optimize local data handling during Spider queries.",
        ),
        OptionChange::new(
            "spider_load_crd_at_startup",
            "-1",
            "1",
            "Ensures CRD data is loaded at startup for prompt readiness.",
        ),
        OptionChange::new(
            "spider_load_sts_at_startup",
            "-1",
            "1",
            "Ensures stateful data (STS) loads for Spider operations during startup.",
        ),
        OptionChange::new(
            "spider_low_mem_read",
            "-1",
            "1",
            "Improves memory efficiency for Spider reads, optimizing resource usage.",
        ),
        OptionChange::new(
            "spider_max_order",
            "-1",
            "32767",
            "Sets max order processing volume for Spider, high-performant configurations.",
        ),
        OptionChange::new(
            "spider_multi_split_read",
            "-1",
            "100",
            "Optimizes split reading processes in multi-node Spider setups.",
        ),
        OptionChange::new(
            "spider_net_read_timeout",
            "-1",
            "600",
            "Determines network read timeout for Spider transactions, critical for reliability.",
        ),
        OptionChange::new(
            "spider_net_write_timeout",
            "-1",
            "600",
            "Adjusts network write timeout settings under Spider, enhancing stability.",
        ),
        OptionChange::new(
            "spider_quick_mode",
            "-1",
            "3",
            "Optimizes quick mode for transferring Spider data rapidly.",
        ),
        OptionChange::new(
            "spider_quick_page_byte",
            "-1",
            "10485760",
            "Defines byte size for quick processing pages, customizing efficiency.",
        ),
        OptionChange::new(
            "spider_quick_page_size",
            "-1",
            "1024",
            "Decides page size for Spider queries, optimizing storage.",
        ),
        OptionChange::new(
            "spider_read_only_mode",
            "-1",
            "0",
            "Configures read-only mode under Spider, restricting write operations.",
        ),
        OptionChange::new(
            "spider_reset_sql_alloc",
            "-1",
            "1",
            "Resets SQL allocation, tailoring query resource usage.",
        ),
        OptionChange::new(
            "spider_second_read",
            "-1",
            "0",
            "Controls secondary read setups for Spider, streamlining access.",
        ),
        OptionChange::new(
            "spider_selupd_lock_mode",
            "-1",
            "1",
            "Adjusts locking strategies, maintaining data integrity.",
        ),
        OptionChange::new(
            "spider_semi_split_read",
            "-1",
            "2",
            "Optimizes semi-split reads, balancing resource utilization.",
        ),
        OptionChange::new(
            "spider_semi_split_read_limit",
            "-1",
            "1",
            "Defines limit for semi-split tasks, optimizing splits.",
        ),
        OptionChange::new(
            "spider_semi_table_lock_connection",
            "-1",
            "1",
            "Manages lock connections for semi-table access, ensuring order.",
        ),
        // Old default is 1, not -1; earlier copies of this table had one -1 too many.
        OptionChange::new(
            "spider_semi_table_lock",
            "1",
            "0",
            "Adjusts locking strategies under Spider, promoting concurrency.",
        ),
    ],
    deprecated: &[
        NotedOption::with_note("keep_files_on_create", "MariaDB now deletes orphan files, so this setting should never be necessary."),
    ],
    removed_or_renamed: &[
        NotedOption::with_note("innodb_log_write_ahead_size", "On Linux and Windows, the physical block size of the underlying storage is instead detected and used."),
        NotedOption::with_note("innodb_version", "Redundant."),
        NotedOption::with_note("wsrep_replicate_myisam", "Use wsrep_mode instead."),
    ],
    schema_checks: &[],
};
