//! Typed records returned by the graph query layer, plus the pure
//! aggregation helpers that turn raw counts and flags into dashboard
//! figures. Everything here is store-independent and unit-testable.

use serde::Serialize;

/// Default result-size caps, one per capped operation.
#[derive(Debug, Clone, Copy)]
pub struct QueryLimits {
    /// Plain per-entity listings.
    pub listing: i64,
    /// Ranked participation stats.
    pub participation: i64,
    /// Per-group cap for decisions grouped by contributor type.
    pub per_type: usize,
    /// Outcome records fed to the summarizer.
    pub summary_outcomes: i64,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            listing: 100,
            participation: 50,
            per_type: 4,
            summary_outcomes: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionRecord {
    pub name: Option<String>,
    pub description: Option<String>,
    pub ai_influence: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeRecord {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonRecord {
    pub name: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentRecord {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRecord {
    pub name: Option<String>,
}

/// One row of the ranked people participation stats.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonStats {
    pub name: Option<String>,
    pub role: Option<String>,
    pub decision_count: i64,
}

/// One row of the ranked agent participation stats.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentStats {
    pub name: Option<String>,
    pub description: Option<String>,
    pub decision_count: i64,
}

/// Counts of decisions tagged with a high/low `ai_influence` label, with
/// percentage rates over the classified total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct InfluenceStats {
    pub high: i64,
    pub low: i64,
    pub total: i64,
    pub high_rate: f64,
    pub low_rate: f64,
}

impl InfluenceStats {
    pub fn from_counts(high: i64, low: i64) -> Self {
        let total = high + low;
        Self {
            high,
            low,
            total,
            high_rate: percentage(high, total),
            low_rate: percentage(low, total),
        }
    }
}

/// The headline dashboard aggregate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_decisions: i64,
    pub good_outcomes: i64,
    pub bad_outcomes: i64,
    pub good_rate: f64,
    pub bad_rate: f64,
    pub human_decisions: i64,
    pub ai_decisions: i64,
}

impl DashboardStats {
    /// Good/bad rates are shares of (good + bad), not of the decision total;
    /// a decision with no outcome influences neither rate.
    pub fn from_counts(total: i64, good: i64, bad: i64, human: i64, ai: i64) -> Self {
        let concluded = good + bad;
        Self {
            total_decisions: total,
            good_outcomes: good,
            bad_outcomes: bad,
            good_rate: percentage(good, concluded),
            bad_rate: percentage(bad, concluded),
            human_decisions: human,
            ai_decisions: ai,
        }
    }
}

/// Derived contributor classification for a decision or an outcome.
///
/// Computed from two independent existence checks (any Person participant,
/// any Agent participant) so the four-way branch stays exhaustive; the tag
/// is never stored in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Contribution {
    Both,
    Human,
    Ai,
    /// No participant of either kind. Rendered as "unknown" in the grouped
    /// decision listing and counted as "none" in the contribution split.
    #[serde(rename = "unknown")]
    None,
}

impl Contribution {
    /// Fixed presentation order: both, human, ai, unknown.
    pub const ALL: [Contribution; 4] = [
        Contribution::Both,
        Contribution::Human,
        Contribution::Ai,
        Contribution::None,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Contribution::Both => "both",
            Contribution::Human => "human",
            Contribution::Ai => "ai",
            Contribution::None => "unknown",
        }
    }

    pub fn classify(has_human: bool, has_ai: bool) -> Self {
        match (has_human, has_ai) {
            (true, true) => Contribution::Both,
            (true, false) => Contribution::Human,
            (false, true) => Contribution::Ai,
            (false, false) => Contribution::None,
        }
    }
}

/// A decision annotated with its participants, at most one reachable
/// outcome, and its derived contributor class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionByType {
    pub decision: String,
    pub description: Option<String>,
    /// First outcome reachable through the contribution chain; which one
    /// wins when several are reachable is up to the store's traversal order.
    pub outcome: Option<String>,
    pub people: Vec<String>,
    pub agents: Vec<String>,
    pub influence_type: Contribution,
}

/// Group decisions by contributor class, cap each group, and flatten back
/// into one sequence. Group order is fixed (both, human, ai, unknown);
/// within a group decisions are ordered by name ascending.
pub fn group_by_influence(mut rows: Vec<DecisionByType>, per_type: usize) -> Vec<DecisionByType> {
    rows.sort_by(|a, b| a.decision.cmp(&b.decision));
    let mut grouped = Vec::new();
    for kind in Contribution::ALL {
        grouped.extend(
            rows.iter()
                .filter(|r| r.influence_type == kind)
                .take(per_type)
                .cloned(),
        );
    }
    grouped
}

/// Class counts and zero-safe shares for one entity kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SplitStats {
    pub human_only: i64,
    pub ai_only: i64,
    pub both: i64,
    pub none: i64,
    pub total: i64,
    pub human_only_rate: f64,
    pub ai_only_rate: f64,
    pub both_rate: f64,
    pub none_rate: f64,
}

impl SplitStats {
    pub fn from_counts(human_only: i64, ai_only: i64, both: i64, none: i64) -> Self {
        let total = human_only + ai_only + both + none;
        Self {
            human_only,
            ai_only,
            both,
            none,
            total,
            human_only_rate: percentage(human_only, total),
            ai_only_rate: percentage(ai_only, total),
            both_rate: percentage(both, total),
            none_rate: percentage(none, total),
        }
    }

    /// Fold `(has_human, has_ai, count)` rows, as returned by the split
    /// queries, into class counts.
    pub fn tally(rows: &[(bool, bool, i64)]) -> Self {
        let mut human_only = 0;
        let mut ai_only = 0;
        let mut both = 0;
        let mut none = 0;
        for &(has_human, has_ai, count) in rows {
            match Contribution::classify(has_human, has_ai) {
                Contribution::Both => both += count,
                Contribution::Human => human_only += count,
                Contribution::Ai => ai_only += count,
                Contribution::None => none += count,
            }
        }
        Self::from_counts(human_only, ai_only, both, none)
    }
}

/// Human/AI contribution split over decisions and, via causality chains,
/// over outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ContributionSplit {
    pub decisions: SplitStats,
    pub outcomes: SplitStats,
}

/// An outcome with everything that led to it, ready for the summarizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutcomeSummary {
    pub outcome: Option<String>,
    pub description: Option<String>,
    pub decisions: Vec<String>,
    pub people: Vec<String>,
    pub agents: Vec<String>,
}

/// Node count per label. A label with no nodes is simply 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TopologyStats {
    pub decisions: i64,
    pub events: i64,
    pub outcomes: i64,
    pub people: i64,
    pub agents: i64,
    pub tasks: i64,
}

fn percentage(part: i64, whole: i64) -> f64 {
    if whole > 0 {
        part as f64 / whole as f64 * 100.0
    } else {
        0.0
    }
}
