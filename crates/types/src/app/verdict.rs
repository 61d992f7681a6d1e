// Path: crates/types/src/app/verdict.rs
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The result of searching one window for a heartbeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Whether a heartbeat was found.
    pub found: bool,
    /// How many heights were fetched before the search stopped.
    pub heights_scanned: u32,
    /// The height holding the heartbeat, when found.
    pub matched_height: Option<u64>,
    /// The search budget ran past the chain tip before a heartbeat was seen,
    /// so the window cannot be judged yet.
    #[serde(default)]
    pub reached_tip: bool,
}

impl SearchOutcome {
    /// A search that ended at `height` after `heights_scanned` fetches.
    pub fn found_at(height: u64, heights_scanned: u32) -> Self {
        Self {
            found: true,
            heights_scanned,
            matched_height: Some(height),
            reached_tip: false,
        }
    }

    /// A search that exhausted its budget.
    pub fn not_found(heights_scanned: u32) -> Self {
        Self {
            found: false,
            heights_scanned,
            matched_height: None,
            reached_tip: false,
        }
    }

    /// A search that stopped at the chain tip after `heights_scanned` fetches.
    pub fn pending(heights_scanned: u32) -> Self {
        Self {
            found: false,
            heights_scanned,
            matched_height: None,
            reached_tip: true,
        }
    }
}

/// The aggregated heartbeat liveness result of one invocation.
///
/// Invariant: `missed <= windows_checked` and `status == (missed < miss_threshold)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LivenessVerdict {
    /// Number of windows (or indexer records) evaluated.
    pub windows_checked: u32,
    /// Number of those without a valid heartbeat.
    pub missed: u32,
    /// The threshold the verdict was computed against.
    pub miss_threshold: u32,
    /// True while misses stay strictly below the threshold.
    pub status: bool,
}

impl LivenessVerdict {
    /// Builds a verdict, deriving `status` from the threshold.
    pub fn new(windows_checked: u32, missed: u32, miss_threshold: u32) -> Self {
        let missed = missed.min(windows_checked);
        Self {
            windows_checked,
            missed,
            miss_threshold,
            status: missed < miss_threshold,
        }
    }

    /// Windows that did carry a heartbeat.
    pub fn succeeded(&self) -> u32 {
        self.windows_checked - self.missed
    }

    /// The `missed / checked` rendering used in alerts and the status page.
    pub fn summary(&self) -> String {
        format!("{} / {}", self.missed, self.windows_checked)
    }
}

/// The aggregated maintainer-set membership result of one invocation.
///
/// Invariant: `status` is the conjunction of every `per_chain` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintainerVerdict {
    /// Membership per chain name; excepted chains are recorded `true`.
    pub per_chain: BTreeMap<String, bool>,
    /// Chains recorded `true` without a lookup.
    #[serde(default)]
    pub excepted: BTreeSet<String>,
    /// True iff the validator maintains every recorded chain.
    pub status: bool,
}

impl MaintainerVerdict {
    /// Builds a verdict from per-chain results.
    pub fn from_results(per_chain: BTreeMap<String, bool>) -> Self {
        let status = per_chain.values().all(|v| *v);
        Self {
            per_chain,
            excepted: BTreeSet::new(),
            status,
        }
    }

    /// Marks `excepted` as chains that were skipped rather than looked up.
    pub fn with_excepted(mut self, excepted: BTreeSet<String>) -> Self {
        self.excepted = excepted;
        self
    }

    /// Chains whose membership was actually looked up, with the result.
    pub fn audited(&self) -> impl Iterator<Item = (&str, bool)> {
        self.per_chain
            .iter()
            .filter(|(chain, _)| !self.excepted.contains(*chain))
            .map(|(chain, ok)| (chain.as_str(), *ok))
    }

    /// `(chain: bool)` pairs in chain order, for alerts and logs.
    pub fn summary(&self) -> String {
        self.per_chain
            .iter()
            .map(|(chain, ok)| format!("({chain}: {ok})"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Chains the validator is absent from.
    pub fn missing_chains(&self) -> impl Iterator<Item = &str> {
        self.per_chain
            .iter()
            .filter(|(_, ok)| !**ok)
            .map(|(chain, _)| chain.as_str())
    }
}

/// The shared status surface read by the HTTP server and written by the publisher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorStatus {
    /// The last published liveness verdict.
    #[serde(default)]
    pub heartbeat: Option<LivenessVerdict>,
    /// The last published maintainer verdict.
    #[serde(default)]
    pub maintainers: Option<MaintainerVerdict>,
    /// The most recent error per check, cleared on the next successful cycle.
    #[serde(default)]
    pub last_errors: BTreeMap<String, String>,
    /// Completed publish cycles since start.
    #[serde(default)]
    pub cycles: u64,
}

impl MonitorStatus {
    /// True once at least one verdict has been published.
    pub fn is_ready(&self) -> bool {
        self.heartbeat.is_some() || self.maintainers.is_some()
    }
}
