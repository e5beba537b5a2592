//! Neo4j-backed implementation of the query layer.

use async_trait::async_trait;
use neo4rs::{query, Graph, Query, Row};

use crate::config::GraphConfig;
use crate::errors::GraphError;

use super::cypher;
use super::types::{
    group_by_influence, AgentRecord, AgentStats, Contribution, ContributionSplit, DashboardStats,
    DecisionByType, DecisionRecord, EventRecord, InfluenceStats, OutcomeRecord, OutcomeSummary,
    PersonRecord, PersonStats, SplitStats, TaskRecord, TopologyStats,
};
use super::DecisionGraph;

/// Owns the driver connection for the process lifetime. The connection is
/// shared by value (the driver pools internally), holds no per-call state,
/// and is released when the value is dropped.
pub struct Neo4jGraph {
    graph: Graph,
}

impl Neo4jGraph {
    /// Connect to the store described by `config`. The one constructor is
    /// the composition root's job; everything else borrows the handle.
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        let neo_config = neo4rs::ConfigBuilder::default()
            .uri(config.uri.as_str())
            .user(config.user.as_str())
            .password(config.password.as_str())
            .db(config.database.as_str())
            .build()
            .map_err(GraphError::query)?;
        let graph = Graph::connect(neo_config).await.map_err(GraphError::query)?;
        tracing::debug!(uri = %config.uri, database = %config.database, "connected to graph store");
        Ok(Self { graph })
    }

    async fn run(&self, q: Query) -> Result<Vec<Row>, GraphError> {
        let mut stream = self.graph.execute(q).await.map_err(GraphError::query)?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await.map_err(GraphError::query)? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Run a query returning a single `count` column; no rows means 0.
    async fn count_one(&self, q: Query) -> Result<i64, GraphError> {
        let rows = self.run(q).await?;
        match rows.first() {
            Some(row) => row.get::<i64>("count").map_err(GraphError::query),
            None => Ok(0),
        }
    }

    async fn split_flags(&self, cypher_text: &str) -> Result<Vec<(bool, bool, i64)>, GraphError> {
        let rows = self.run(query(cypher_text)).await?;
        let mut flags = Vec::with_capacity(rows.len());
        for row in &rows {
            flags.push((
                get_bool(row, "has_human")?,
                get_bool(row, "has_ai")?,
                get_i64(row, "count")?,
            ));
        }
        Ok(flags)
    }
}

fn get_opt(row: &Row, key: &str) -> Result<Option<String>, GraphError> {
    row.get::<Option<String>>(key).map_err(GraphError::query)
}

fn get_string(row: &Row, key: &str) -> Result<String, GraphError> {
    row.get::<String>(key).map_err(GraphError::query)
}

fn get_i64(row: &Row, key: &str) -> Result<i64, GraphError> {
    row.get::<i64>(key).map_err(GraphError::query)
}

fn get_bool(row: &Row, key: &str) -> Result<bool, GraphError> {
    row.get::<bool>(key).map_err(GraphError::query)
}

fn get_names(row: &Row, key: &str) -> Result<Vec<String>, GraphError> {
    row.get::<Vec<String>>(key).map_err(GraphError::query)
}

#[async_trait]
impl DecisionGraph for Neo4jGraph {
    async fn decisions(&self, limit: i64) -> Result<Vec<DecisionRecord>, GraphError> {
        let rows = self
            .run(query(cypher::LIST_DECISIONS).param("limit", limit))
            .await?;
        rows.iter()
            .map(|row| {
                Ok(DecisionRecord {
                    name: get_opt(row, "name")?,
                    description: get_opt(row, "description")?,
                    ai_influence: get_opt(row, "ai_influence")?,
                })
            })
            .collect()
    }

    async fn events(&self, limit: i64) -> Result<Vec<EventRecord>, GraphError> {
        let rows = self
            .run(query(cypher::LIST_EVENTS).param("limit", limit))
            .await?;
        rows.iter()
            .map(|row| {
                Ok(EventRecord {
                    name: get_opt(row, "name")?,
                    description: get_opt(row, "description")?,
                })
            })
            .collect()
    }

    async fn outcomes(&self, limit: i64) -> Result<Vec<OutcomeRecord>, GraphError> {
        let rows = self
            .run(query(cypher::LIST_OUTCOMES).param("limit", limit))
            .await?;
        rows.iter()
            .map(|row| {
                Ok(OutcomeRecord {
                    name: get_opt(row, "name")?,
                    description: get_opt(row, "description")?,
                    kind: get_opt(row, "type")?,
                })
            })
            .collect()
    }

    async fn people(&self, limit: i64) -> Result<Vec<PersonRecord>, GraphError> {
        let rows = self
            .run(query(cypher::LIST_PEOPLE).param("limit", limit))
            .await?;
        rows.iter()
            .map(|row| {
                Ok(PersonRecord {
                    name: get_opt(row, "name")?,
                    role: get_opt(row, "role")?,
                })
            })
            .collect()
    }

    async fn agents(&self, limit: i64) -> Result<Vec<AgentRecord>, GraphError> {
        let rows = self
            .run(query(cypher::LIST_AGENTS).param("limit", limit))
            .await?;
        rows.iter()
            .map(|row| {
                Ok(AgentRecord {
                    name: get_opt(row, "name")?,
                    description: get_opt(row, "description")?,
                })
            })
            .collect()
    }

    async fn tasks(&self, limit: i64) -> Result<Vec<TaskRecord>, GraphError> {
        let rows = self
            .run(query(cypher::LIST_TASKS).param("limit", limit))
            .await?;
        rows.iter()
            .map(|row| {
                Ok(TaskRecord {
                    name: get_opt(row, "name")?,
                })
            })
            .collect()
    }

    async fn people_with_stats(&self, limit: i64) -> Result<Vec<PersonStats>, GraphError> {
        let rows = self
            .run(query(cypher::PEOPLE_WITH_STATS).param("limit", limit))
            .await?;
        rows.iter()
            .map(|row| {
                Ok(PersonStats {
                    name: get_opt(row, "name")?,
                    role: get_opt(row, "role")?,
                    decision_count: get_i64(row, "decision_count")?,
                })
            })
            .collect()
    }

    async fn agents_with_stats(&self, limit: i64) -> Result<Vec<AgentStats>, GraphError> {
        let rows = self
            .run(query(cypher::AGENTS_WITH_STATS).param("limit", limit))
            .await?;
        rows.iter()
            .map(|row| {
                Ok(AgentStats {
                    name: get_opt(row, "name")?,
                    description: get_opt(row, "description")?,
                    decision_count: get_i64(row, "decision_count")?,
                })
            })
            .collect()
    }

    async fn influence_stats(&self) -> Result<InfluenceStats, GraphError> {
        let high = self
            .count_one(query(cypher::COUNT_BY_INFLUENCE).param("influence", "high"))
            .await?;
        let low = self
            .count_one(query(cypher::COUNT_BY_INFLUENCE).param("influence", "low"))
            .await?;
        Ok(InfluenceStats::from_counts(high, low))
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, GraphError> {
        let rows = self.run(query(cypher::DASHBOARD_STATS)).await?;
        match rows.first() {
            Some(row) => Ok(DashboardStats::from_counts(
                get_i64(row, "total_decisions")?,
                get_i64(row, "good_outcomes")?,
                get_i64(row, "bad_outcomes")?,
                get_i64(row, "human_decisions")?,
                get_i64(row, "ai_decisions")?,
            )),
            None => Ok(DashboardStats::default()),
        }
    }

    async fn decisions_by_type(&self, per_type: usize) -> Result<Vec<DecisionByType>, GraphError> {
        let rows = self.run(query(cypher::DECISIONS_BY_TYPE)).await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            let has_human = get_bool(row, "has_human")?;
            let has_ai = get_bool(row, "has_ai")?;
            items.push(DecisionByType {
                decision: get_string(row, "decision")?,
                description: get_opt(row, "description")?,
                outcome: get_opt(row, "outcome")?,
                people: get_names(row, "people")?,
                agents: get_names(row, "agents")?,
                influence_type: Contribution::classify(has_human, has_ai),
            });
        }
        Ok(group_by_influence(items, per_type))
    }

    async fn outcomes_for_summary(&self, limit: i64) -> Result<Vec<OutcomeSummary>, GraphError> {
        let rows = self
            .run(query(cypher::OUTCOMES_FOR_SUMMARY).param("limit", limit))
            .await?;
        rows.iter()
            .map(|row| {
                Ok(OutcomeSummary {
                    outcome: get_opt(row, "outcome")?,
                    description: get_opt(row, "description")?,
                    decisions: get_names(row, "decisions")?,
                    people: get_names(row, "people")?,
                    agents: get_names(row, "agents")?,
                })
            })
            .collect()
    }

    async fn contribution_split(&self) -> Result<ContributionSplit, GraphError> {
        let decision_flags = self.split_flags(cypher::DECISION_SPLIT).await?;
        let outcome_flags = self.split_flags(cypher::OUTCOME_SPLIT).await?;
        Ok(ContributionSplit {
            decisions: SplitStats::tally(&decision_flags),
            outcomes: SplitStats::tally(&outcome_flags),
        })
    }

    async fn topology_stats(&self) -> Result<TopologyStats, GraphError> {
        Ok(TopologyStats {
            decisions: self.count_one(query(cypher::COUNT_DECISIONS)).await?,
            events: self.count_one(query(cypher::COUNT_EVENTS)).await?,
            outcomes: self.count_one(query(cypher::COUNT_OUTCOMES)).await?,
            people: self.count_one(query(cypher::COUNT_PEOPLE)).await?,
            agents: self.count_one(query(cypher::COUNT_AGENTS)).await?,
            tasks: self.count_one(query(cypher::COUNT_TASKS)).await?,
        })
    }
}
