//! Thin HTTP layer: request -> query -> serialize, nothing else.
//!
//! Store faults surface as 502 responses; a summarization failure degrades
//! the summary route to an "unavailable" payload instead of failing it.

pub mod render;

use std::convert::Infallible;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use warp::http::StatusCode;
use warp::reply::{Json, WithStatus};
use warp::{Filter, Rejection, Reply};

use crate::errors::GraphError;
use crate::graph::{DecisionGraph, QueryLimits};
use crate::summary::{summarize_outcomes, TextGenerator};

#[derive(Debug, Deserialize)]
struct LimitQuery {
    limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct PerTypeQuery {
    per_type: Option<usize>,
}

#[derive(Debug, Serialize)]
struct SummaryReply {
    summary: Option<String>,
    available: bool,
}

/// Assemble the full route tree over injected handles.
pub fn routes(
    graph: Arc<dyn DecisionGraph>,
    generator: Arc<dyn TextGenerator>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let index = warp::path::end()
        .and(warp::get())
        .and(with_graph(graph.clone()))
        .and_then(index_handler);

    let dashboard = warp::path!("api" / "dashboard")
        .and(warp::get())
        .and(with_graph(graph.clone()))
        .and_then(|g: Graph| async move { reply_json(g.dashboard_stats().await) });

    let influence = warp::path!("api" / "influence")
        .and(warp::get())
        .and(with_graph(graph.clone()))
        .and_then(|g: Graph| async move { reply_json(g.influence_stats().await) });

    let split = warp::path!("api" / "split")
        .and(warp::get())
        .and(with_graph(graph.clone()))
        .and_then(|g: Graph| async move { reply_json(g.contribution_split().await) });

    let topology = warp::path!("api" / "topology")
        .and(warp::get())
        .and(with_graph(graph.clone()))
        .and_then(|g: Graph| async move { reply_json(g.topology_stats().await) });

    let decisions_by_type = warp::path!("api" / "decisions" / "by-type")
        .and(warp::get())
        .and(warp::query::<PerTypeQuery>())
        .and(with_graph(graph.clone()))
        .and_then(|q: PerTypeQuery, g: Graph| async move {
            let per_type = q.per_type.unwrap_or(QueryLimits::default().per_type);
            reply_json(g.decisions_by_type(per_type).await)
        });

    let decisions = listing(graph.clone(), "decisions", |g, limit| async move {
        reply_json(g.decisions(limit).await)
    });
    let events = listing(graph.clone(), "events", |g, limit| async move {
        reply_json(g.events(limit).await)
    });
    let outcomes = listing(graph.clone(), "outcomes", |g, limit| async move {
        reply_json(g.outcomes(limit).await)
    });
    let people = listing(graph.clone(), "people", |g, limit| async move {
        reply_json(g.people(limit).await)
    });
    let agents = listing(graph.clone(), "agents", |g, limit| async move {
        reply_json(g.agents(limit).await)
    });
    let tasks = listing(graph.clone(), "tasks", |g, limit| async move {
        reply_json(g.tasks(limit).await)
    });

    let people_stats = warp::path!("api" / "people" / "stats")
        .and(warp::get())
        .and(warp::query::<LimitQuery>())
        .and(with_graph(graph.clone()))
        .and_then(|q: LimitQuery, g: Graph| async move {
            let limit = q.limit.unwrap_or(QueryLimits::default().participation);
            reply_json(g.people_with_stats(limit).await)
        });

    let agent_stats = warp::path!("api" / "agents" / "stats")
        .and(warp::get())
        .and(warp::query::<LimitQuery>())
        .and(with_graph(graph.clone()))
        .and_then(|q: LimitQuery, g: Graph| async move {
            let limit = q.limit.unwrap_or(QueryLimits::default().participation);
            reply_json(g.agents_with_stats(limit).await)
        });

    let summary = warp::path!("api" / "summary")
        .and(warp::get())
        .and(with_graph(graph))
        .and(with_generator(generator))
        .and_then(summary_handler);

    index
        .or(dashboard)
        .or(influence)
        .or(split)
        .or(topology)
        .or(decisions_by_type)
        .or(people_stats)
        .or(agent_stats)
        .or(summary)
        .or(decisions)
        .or(events)
        .or(outcomes)
        .or(people)
        .or(agents)
        .or(tasks)
}

type Graph = Arc<dyn DecisionGraph>;

fn with_graph(graph: Graph) -> impl Filter<Extract = (Graph,), Error = Infallible> + Clone {
    warp::any().map(move || graph.clone())
}

fn with_generator(
    generator: Arc<dyn TextGenerator>,
) -> impl Filter<Extract = (Arc<dyn TextGenerator>,), Error = Infallible> + Clone {
    warp::any().map(move || generator.clone())
}

/// A `/api/<name>?limit=N` listing route.
fn listing<F, Fut>(
    graph: Graph,
    name: &'static str,
    handler: F,
) -> impl Filter<Extract = (WithStatus<Json>,), Error = Rejection> + Clone
where
    F: Fn(Graph, i64) -> Fut + Clone + Send,
    Fut: std::future::Future<Output = Result<WithStatus<Json>, Infallible>> + Send,
{
    warp::path("api")
        .and(warp::path(name))
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<LimitQuery>())
        .and(with_graph(graph))
        .and_then(move |q: LimitQuery, g: Graph| {
            let handler = handler.clone();
            let limit = q.limit.unwrap_or(QueryLimits::default().listing);
            async move { handler(g, limit).await }
        })
}

fn reply_json<T: Serialize>(result: Result<T, GraphError>) -> Result<WithStatus<Json>, Infallible> {
    match result {
        Ok(value) => Ok(warp::reply::with_status(
            warp::reply::json(&value),
            StatusCode::OK,
        )),
        Err(err) => {
            tracing::error!(error = %err, "graph query failed");
            Ok(warp::reply::with_status(
                warp::reply::json(&serde_json::json!({ "error": err.to_string() })),
                StatusCode::BAD_GATEWAY,
            ))
        }
    }
}

async fn index_handler(graph: Graph) -> Result<warp::reply::Response, Infallible> {
    let limits = QueryLimits::default();
    let data = futures_util::try_join!(
        graph.dashboard_stats(),
        graph.influence_stats(),
        graph.contribution_split(),
        graph.topology_stats(),
        graph.decisions_by_type(limits.per_type),
    );
    let response = match data {
        Ok((dashboard, influence, split, topology, decisions)) => warp::reply::with_status(
            warp::reply::html(render::dashboard_page(
                &dashboard, &influence, &split, &topology, &decisions,
            )),
            StatusCode::OK,
        )
        .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "dashboard page failed");
            warp::reply::with_status(
                warp::reply::html(render::error_page(&err.to_string())),
                StatusCode::BAD_GATEWAY,
            )
            .into_response()
        }
    };
    Ok(response)
}

async fn summary_handler(
    graph: Graph,
    generator: Arc<dyn TextGenerator>,
) -> Result<WithStatus<Json>, Infallible> {
    let limit = QueryLimits::default().summary_outcomes;
    let outcomes = match graph.outcomes_for_summary(limit).await {
        Ok(outcomes) => outcomes,
        Err(err) => return reply_json::<SummaryReply>(Err(err)),
    };

    // A summarization failure is not a page failure: degrade to an
    // unavailable payload and let the client decide what to show.
    let reply = match summarize_outcomes(generator.as_ref(), &outcomes).await {
        Ok(text) => SummaryReply {
            summary: Some(text),
            available: true,
        },
        Err(err) => {
            tracing::warn!(error = %err, "summarization unavailable");
            SummaryReply {
                summary: None,
                available: false,
            }
        }
    };
    Ok(warp::reply::with_status(
        warp::reply::json(&reply),
        StatusCode::OK,
    ))
}
