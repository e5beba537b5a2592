//! Route-level tests over an in-memory fake graph, so no store is needed.

use std::sync::Arc;

use async_trait::async_trait;

use decilens::errors::{GraphError, SummaryError};
use decilens::graph::{
    AgentRecord, AgentStats, Contribution, ContributionSplit, DashboardStats, DecisionByType,
    DecisionGraph, DecisionRecord, EventRecord, InfluenceStats, OutcomeRecord, OutcomeSummary,
    PersonRecord, PersonStats, SplitStats, TaskRecord, TopologyStats,
};
use decilens::summary::TextGenerator;
use decilens::web;

/// Canned-answer graph. `fail` flips every operation into the opaque
/// query error, mirroring an unreachable store.
#[derive(Default)]
struct FakeGraph {
    dashboard: DashboardStats,
    influence: InfluenceStats,
    split: ContributionSplit,
    topology: TopologyStats,
    by_type: Vec<DecisionByType>,
    summaries: Vec<OutcomeSummary>,
    people: Vec<PersonStats>,
    fail: bool,
}

impl FakeGraph {
    fn check(&self) -> Result<(), GraphError> {
        if self.fail {
            Err(GraphError::Query("store unreachable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DecisionGraph for FakeGraph {
    async fn decisions(&self, _limit: i64) -> Result<Vec<DecisionRecord>, GraphError> {
        self.check()?;
        Ok(vec![])
    }
    async fn events(&self, _limit: i64) -> Result<Vec<EventRecord>, GraphError> {
        self.check()?;
        Ok(vec![])
    }
    async fn outcomes(&self, _limit: i64) -> Result<Vec<OutcomeRecord>, GraphError> {
        self.check()?;
        Ok(vec![])
    }
    async fn people(&self, _limit: i64) -> Result<Vec<PersonRecord>, GraphError> {
        self.check()?;
        Ok(vec![])
    }
    async fn agents(&self, _limit: i64) -> Result<Vec<AgentRecord>, GraphError> {
        self.check()?;
        Ok(vec![])
    }
    async fn tasks(&self, _limit: i64) -> Result<Vec<TaskRecord>, GraphError> {
        self.check()?;
        Ok(vec![])
    }
    async fn people_with_stats(&self, limit: i64) -> Result<Vec<PersonStats>, GraphError> {
        self.check()?;
        Ok(self.people.iter().take(limit as usize).cloned().collect())
    }
    async fn agents_with_stats(&self, _limit: i64) -> Result<Vec<AgentStats>, GraphError> {
        self.check()?;
        Ok(vec![])
    }
    async fn influence_stats(&self) -> Result<InfluenceStats, GraphError> {
        self.check()?;
        Ok(self.influence)
    }
    async fn dashboard_stats(&self) -> Result<DashboardStats, GraphError> {
        self.check()?;
        Ok(self.dashboard)
    }
    async fn decisions_by_type(&self, _per_type: usize) -> Result<Vec<DecisionByType>, GraphError> {
        self.check()?;
        Ok(self.by_type.clone())
    }
    async fn outcomes_for_summary(&self, _limit: i64) -> Result<Vec<OutcomeSummary>, GraphError> {
        self.check()?;
        Ok(self.summaries.clone())
    }
    async fn contribution_split(&self) -> Result<ContributionSplit, GraphError> {
        self.check()?;
        Ok(self.split)
    }
    async fn topology_stats(&self) -> Result<TopologyStats, GraphError> {
        self.check()?;
        Ok(self.topology)
    }
}

struct EchoGenerator;

#[async_trait]
impl TextGenerator for EchoGenerator {
    async fn generate(&self, _: &str, user: &str, _: u32) -> Result<String, SummaryError> {
        Ok(format!("summary of: {}", user.lines().count()))
    }
}

struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _: &str, _: &str, _: u32) -> Result<String, SummaryError> {
        Err(SummaryError::MissingApiKey)
    }
}

fn scenario_graph() -> FakeGraph {
    // Two decisions, one human-only and one agent-only, one good outcome
    // linked to the human decision.
    FakeGraph {
        dashboard: DashboardStats::from_counts(2, 1, 0, 1, 1),
        influence: InfluenceStats::from_counts(1, 1),
        split: ContributionSplit {
            decisions: SplitStats::from_counts(1, 1, 0, 0),
            outcomes: SplitStats::from_counts(1, 0, 0, 0),
        },
        topology: TopologyStats {
            decisions: 2,
            outcomes: 1,
            people: 1,
            agents: 1,
            ..Default::default()
        },
        by_type: vec![DecisionByType {
            decision: "Adopt CI".to_string(),
            description: None,
            outcome: Some("Faster releases".to_string()),
            people: vec!["Ada".to_string()],
            agents: vec![],
            influence_type: Contribution::Human,
        }],
        summaries: vec![OutcomeSummary {
            outcome: Some("Faster releases".to_string()),
            description: Some("Cycle time dropped".to_string()),
            decisions: vec!["Adopt CI".to_string()],
            people: vec!["Ada".to_string()],
            agents: vec![],
        }],
        people: vec![PersonStats {
            name: Some("Ada".to_string()),
            role: Some("Engineer".to_string()),
            decision_count: 1,
        }],
        fail: false,
    }
}

fn routes_with(
    graph: FakeGraph,
    generator: impl TextGenerator + 'static,
) -> impl warp::Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    web::routes(Arc::new(graph), Arc::new(generator))
}

#[tokio::test]
async fn test_dashboard_endpoint_reports_scenario_figures() {
    let routes = routes_with(scenario_graph(), EchoGenerator);
    let response = warp::test::request()
        .path("/api/dashboard")
        .reply(&routes)
        .await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(body["total_decisions"], 2);
    assert_eq!(body["good_outcomes"], 1);
    assert_eq!(body["bad_outcomes"], 0);
    assert_eq!(body["good_rate"], 100.0);
    assert_eq!(body["human_decisions"], 1);
    assert_eq!(body["ai_decisions"], 1);
}

#[tokio::test]
async fn test_store_failure_maps_to_bad_gateway() {
    let graph = FakeGraph {
        fail: true,
        ..Default::default()
    };
    let routes = routes_with(graph, EchoGenerator);
    let response = warp::test::request()
        .path("/api/topology")
        .reply(&routes)
        .await;
    assert_eq!(response.status(), 502);

    let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
    assert!(body["error"].as_str().unwrap().contains("graph query failed"));
}

#[tokio::test]
async fn test_summary_degrades_when_generator_fails() {
    let routes = routes_with(scenario_graph(), FailingGenerator);
    let response = warp::test::request()
        .path("/api/summary")
        .reply(&routes)
        .await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(body["available"], false);
    assert_eq!(body["summary"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_summary_returns_generated_text() {
    let routes = routes_with(scenario_graph(), EchoGenerator);
    let response = warp::test::request()
        .path("/api/summary")
        .reply(&routes)
        .await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(body["available"], true);
    assert!(body["summary"].as_str().unwrap().starts_with("summary of:"));
}

#[tokio::test]
async fn test_index_page_renders_html() {
    let routes = routes_with(scenario_graph(), EchoGenerator);
    let response = warp::test::request().path("/").reply(&routes).await;
    assert_eq!(response.status(), 200);

    let body = String::from_utf8(response.body().to_vec()).unwrap();
    assert!(body.contains("Decision Graph Dashboard"));
    assert!(body.contains("Adopt CI"));
}

#[tokio::test]
async fn test_people_stats_respects_limit_param() {
    let mut graph = scenario_graph();
    graph.people.push(PersonStats {
        name: Some("Grace".to_string()),
        role: None,
        decision_count: 0,
    });
    let routes = routes_with(graph, EchoGenerator);
    let response = warp::test::request()
        .path("/api/people/stats?limit=1")
        .reply(&routes)
        .await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_listing_routes_answer() {
    let routes = routes_with(scenario_graph(), EchoGenerator);
    for path in [
        "/api/decisions",
        "/api/events",
        "/api/outcomes",
        "/api/people",
        "/api/agents",
        "/api/tasks",
        "/api/decisions/by-type",
        "/api/agents/stats",
        "/api/influence",
        "/api/split",
    ] {
        let response = warp::test::request().path(path).reply(&routes).await;
        assert_eq!(response.status(), 200, "route {path}");
    }
}
