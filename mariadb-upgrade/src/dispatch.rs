//! Choosing which transition reports apply to a server.

use crate::knowledge::Transition;

/// The only target release the advisor plans for.
pub const SUPPORTED_TARGET: &str = "10.11";

/// The ordered transitions to report on for one (current, target) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradePlan {
    transitions: Vec<Transition>,
}

impl UpgradePlan {
    /// Transitions in ascending version order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

/// Plan the reports for a server reporting `current_version` (verbatim `VERSION()`
/// output) being upgraded to `target_version`.
///
/// The target must be exactly [SUPPORTED_TARGET]. The chain starts at the first
/// transition whose "from" prefix the current version starts with and runs to the
/// end. Any other combination yields an empty plan.
pub fn plan_upgrade(current_version: &str, target_version: &str) -> UpgradePlan {
    if target_version != SUPPORTED_TARGET {
        return UpgradePlan {
            transitions: vec![],
        };
    }

    let transitions = Transition::ALL
        .iter()
        .position(|t| current_version.starts_with(t.report().from_version_prefix))
        .map(|start| Transition::ALL[start..].to_vec())
        .unwrap_or_default();

    UpgradePlan { transitions }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_10_4_runs_every_transition() {
        assert_eq!(
            plan_upgrade("10.4.2-MariaDB", "10.11").transitions(),
            &[
                Transition::From10_4To10_5,
                Transition::From10_5To10_6,
                Transition::From10_6To10_11
            ]
        );
    }

    #[test]
    fn from_10_5_skips_the_first_transition() {
        assert_eq!(
            plan_upgrade("10.5.21-MariaDB", "10.11").transitions(),
            &[Transition::From10_5To10_6, Transition::From10_6To10_11]
        );
    }

    #[test]
    fn from_10_6_runs_only_the_last_transition() {
        assert_eq!(
            plan_upgrade("10.6.0-MariaDB", "10.11").transitions(),
            &[Transition::From10_6To10_11]
        );
    }

    #[test]
    fn unsupported_current_versions_plan_nothing() {
        for current in ["10.7.0-MariaDB", "10.3.39-MariaDB", "10.11.6-MariaDB", "8.0.36", ""] {
            assert!(plan_upgrade(current, "10.11").is_empty(), "{current}");
        }
    }

    #[test]
    fn other_targets_plan_nothing() {
        for target in ["10.6", "11.4", "10.11 ", ""] {
            assert!(plan_upgrade("10.4.2-MariaDB", target).is_empty(), "{target:?}");
        }
    }
}
