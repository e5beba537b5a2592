//! Graph query layer: a fixed set of read-only aggregation operations over
//! the decision graph.
//!
//! The store handle is constructed explicitly by the composition root and
//! passed down; nothing in this module reaches for ambient global state.
//! All operations re-query the store on every call and treat an empty
//! result as a zero-valued aggregate, never as an error.

pub mod client;
pub mod cypher;
pub mod types;

pub use client::Neo4jGraph;
pub use types::{
    AgentRecord, AgentStats, Contribution, ContributionSplit, DashboardStats, DecisionByType,
    DecisionRecord, EventRecord, InfluenceStats, OutcomeRecord, OutcomeSummary, PersonRecord,
    PersonStats, QueryLimits, SplitStats, TaskRecord, TopologyStats,
};

use async_trait::async_trait;

use crate::errors::GraphError;

/// The aggregation operations exposed to the web layer.
///
/// Implemented by [`Neo4jGraph`] against a live store and by in-memory
/// fakes in tests.
#[async_trait]
pub trait DecisionGraph: Send + Sync {
    async fn decisions(&self, limit: i64) -> Result<Vec<DecisionRecord>, GraphError>;
    async fn events(&self, limit: i64) -> Result<Vec<EventRecord>, GraphError>;
    async fn outcomes(&self, limit: i64) -> Result<Vec<OutcomeRecord>, GraphError>;
    async fn people(&self, limit: i64) -> Result<Vec<PersonRecord>, GraphError>;
    async fn agents(&self, limit: i64) -> Result<Vec<AgentRecord>, GraphError>;
    async fn tasks(&self, limit: i64) -> Result<Vec<TaskRecord>, GraphError>;

    /// People ranked by the number of decisions they participated in,
    /// descending; zero-participation people appear with count 0.
    async fn people_with_stats(&self, limit: i64) -> Result<Vec<PersonStats>, GraphError>;

    /// Agents ranked the same way as [`Self::people_with_stats`].
    async fn agents_with_stats(&self, limit: i64) -> Result<Vec<AgentStats>, GraphError>;

    /// Counts and rates of decisions tagged `ai_influence` high/low.
    async fn influence_stats(&self) -> Result<InfluenceStats, GraphError>;

    /// The headline aggregate: decision total, good/bad outcome counts and
    /// rates, and human/AI participation counts.
    async fn dashboard_stats(&self) -> Result<DashboardStats, GraphError>;

    /// Decisions grouped by contributor class (both, human, ai, unknown),
    /// at most `per_type` per group, ordered by name within a group.
    async fn decisions_by_type(&self, per_type: usize) -> Result<Vec<DecisionByType>, GraphError>;

    /// Outcomes with their contributing decisions and participants, the
    /// input of the summarization adapter.
    async fn outcomes_for_summary(&self, limit: i64) -> Result<Vec<OutcomeSummary>, GraphError>;

    /// Human/AI contribution split over decisions and outcomes.
    async fn contribution_split(&self) -> Result<ContributionSplit, GraphError>;

    /// Node count per label; absent labels count 0.
    async fn topology_stats(&self) -> Result<TopologyStats, GraphError>;
}
