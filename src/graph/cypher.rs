//! Cypher text for every operation of the query layer.
//!
//! The variable-length hop bounds (`*0..2`, `*1..3`, `*0..1`) are part of
//! the contract; widening or narrowing them changes the reported figures.

pub const LIST_DECISIONS: &str = "\
MATCH (d:Decision)
RETURN d.name AS name, d.description AS description, d.ai_influence AS ai_influence
LIMIT $limit";

pub const LIST_EVENTS: &str = "\
MATCH (e:Event)
RETURN e.name AS name, e.description AS description
LIMIT $limit";

pub const LIST_OUTCOMES: &str = "\
MATCH (o:Outcome)
RETURN o.name AS name, o.description AS description, o.type AS type
LIMIT $limit";

pub const LIST_PEOPLE: &str = "\
MATCH (p:Person)
RETURN p.name AS name, p.role AS role
LIMIT $limit";

pub const LIST_AGENTS: &str = "\
MATCH (a:Agent)
RETURN a.name AS name, a.description AS description
LIMIT $limit";

pub const LIST_TASKS: &str = "\
MATCH (t:Task)
RETURN t.name AS name
LIMIT $limit";

// The OPTIONAL MATCH keeps zero-participation entities in the result with
// a count of 0 instead of dropping them, and the ORDER BY must stay in the
// store: LIMIT applies after it, so sorting client-side would cap an
// arbitrary subset instead of the top entries.
pub const PEOPLE_WITH_STATS: &str = "\
MATCH (p:Person)
OPTIONAL MATCH (p)-[:PARTICIPATED_IN]->(d:Decision)
WITH p, count(d) AS decision_count
RETURN p.name AS name, p.role AS role, decision_count
ORDER BY decision_count DESC
LIMIT $limit";

pub const AGENTS_WITH_STATS: &str = "\
MATCH (a:Agent)
OPTIONAL MATCH (a)-[:PARTICIPATED_IN]->(d:Decision)
WITH a, count(d) AS decision_count
RETURN a.name AS name, a.description AS description, decision_count
ORDER BY decision_count DESC
LIMIT $limit";

pub const COUNT_BY_INFLUENCE: &str = "\
MATCH (d:Decision)
WHERE d.ai_influence = $influence
RETURN count(d) AS count";

// Single pass over the decision set; each WITH carries the accumulated
// aggregates through the next OPTIONAL MATCH.
pub const DASHBOARD_STATS: &str = "\
MATCH (d:Decision)
WITH count(d) AS total_decisions
OPTIONAL MATCH (d2:Decision)-[:LED_TO]->(o:Outcome)
WHERE o.type = 'good'
WITH total_decisions, count(DISTINCT d2) AS good_outcomes
OPTIONAL MATCH (d3:Decision)-[:LED_TO]->(o2:Outcome)
WHERE o2.type = 'bad'
WITH total_decisions, good_outcomes, count(DISTINCT d3) AS bad_outcomes
OPTIONAL MATCH (p:Person)-[:PARTICIPATED_IN]->(d4:Decision)
WITH total_decisions, good_outcomes, bad_outcomes, count(DISTINCT d4) AS human_decisions
OPTIONAL MATCH (a:Agent)-[:PARTICIPATED_IN]->(d5:Decision)
RETURN total_decisions, good_outcomes, bad_outcomes, human_decisions,
       count(DISTINCT d5) AS ai_decisions";

// Participant flags come back as independent booleans; the four-way
// classification happens in Rust. `collect(DISTINCT o.name)[0]` picks an
// arbitrary reachable outcome, which is all the contract promises.
pub const DECISIONS_BY_TYPE: &str = "\
MATCH (d:Decision)
WHERE d.name IS NOT NULL
OPTIONAL MATCH (p:Person)-[:PARTICIPATED_IN]->(d)
OPTIONAL MATCH (a:Agent)-[:PARTICIPATED_IN]->(d)
OPTIONAL MATCH (d)-[:CONTRIBUTED_TO*0..2]->(x)-[:CAUSED_BY]->(o:Outcome)
WHERE x:Task OR x:Event OR x:Decision
WITH d,
     count(DISTINCT p) > 0 AS has_human,
     count(DISTINCT a) > 0 AS has_ai,
     [n IN collect(DISTINCT p.name) WHERE n IS NOT NULL] AS people,
     [n IN collect(DISTINCT a.name) WHERE n IS NOT NULL] AS agents,
     collect(DISTINCT o.name)[0] AS outcome
RETURN d.name AS decision, d.description AS description, outcome,
       people, agents, has_human, has_ai";

pub const OUTCOMES_FOR_SUMMARY: &str = "\
MATCH (o:Outcome)
OPTIONAL MATCH (o)<-[:CAUSED_BY*1..3]-(x)
WHERE x:Task OR x:Event OR x:Decision
OPTIONAL MATCH (d:Decision)-[:CONTRIBUTED_TO*0..2]->(x)
OPTIONAL MATCH (p:Person)-[:PARTICIPATED_IN]->(d)
OPTIONAL MATCH (a:Agent)-[:PARTICIPATED_IN]->(d)
WITH o,
     [n IN collect(DISTINCT d.name) WHERE n IS NOT NULL] AS decisions,
     [n IN collect(DISTINCT p.name) WHERE n IS NOT NULL] AS people,
     [n IN collect(DISTINCT a.name) WHERE n IS NOT NULL] AS agents
RETURN o.name AS outcome, o.description AS description, decisions, people, agents
LIMIT $limit";

pub const DECISION_SPLIT: &str = "\
MATCH (d:Decision)
OPTIONAL MATCH (p:Person)-[:PARTICIPATED_IN]->(d)
OPTIONAL MATCH (a:Agent)-[:PARTICIPATED_IN]->(d)
WITH d, count(DISTINCT p) > 0 AS has_human, count(DISTINCT a) > 0 AS has_ai
RETURN has_human, has_ai, count(d) AS count";

// Outcomes inherit their class from contributing decisions, reached through
// CAUSED_BY and at most one CONTRIBUTED_TO hop. The outer MATCH keeps
// unreachable outcomes in the result so they classify as "none" and the
// class counts always reconcile with the outcome total.
pub const OUTCOME_SPLIT: &str = "\
MATCH (o:Outcome)
OPTIONAL MATCH (o)<-[:CAUSED_BY]-(x)<-[:CONTRIBUTED_TO*0..1]-(d:Decision)
WHERE x:Task OR x:Event OR x:Decision
OPTIONAL MATCH (p:Person)-[:PARTICIPATED_IN]->(d)
OPTIONAL MATCH (a:Agent)-[:PARTICIPATED_IN]->(d)
WITH o, count(DISTINCT p) > 0 AS has_human, count(DISTINCT a) > 0 AS has_ai
RETURN has_human, has_ai, count(o) AS count";

// One count per label, issued separately: a chained-MATCH version drops all
// rows as soon as one label has no nodes.
pub const COUNT_DECISIONS: &str = "MATCH (n:Decision) RETURN count(n) AS count";
pub const COUNT_EVENTS: &str = "MATCH (n:Event) RETURN count(n) AS count";
pub const COUNT_OUTCOMES: &str = "MATCH (n:Outcome) RETURN count(n) AS count";
pub const COUNT_PEOPLE: &str = "MATCH (n:Person) RETURN count(n) AS count";
pub const COUNT_AGENTS: &str = "MATCH (n:Agent) RETURN count(n) AS count";
pub const COUNT_TASKS: &str = "MATCH (n:Task) RETURN count(n) AS count";

#[cfg(test)]
mod tests {
    use super::*;

    // CAUSED_BY always points from a Task/Event/Decision into the Outcome.
    // A reversed arrow matches nothing on schema-conformant data, which
    // silently nulls out every resolved outcome instead of failing loudly.
    #[test]
    fn test_caused_by_edges_point_into_the_outcome() {
        assert!(DECISIONS_BY_TYPE.contains("(x)-[:CAUSED_BY]->(o:Outcome)"));
        assert!(!DECISIONS_BY_TYPE.contains("<-[:CAUSED_BY]-(o:Outcome)"));
        assert!(OUTCOMES_FOR_SUMMARY.contains("(o)<-[:CAUSED_BY*1..3]-(x)"));
        assert!(OUTCOME_SPLIT.contains("(o)<-[:CAUSED_BY]-(x)"));
    }

    #[test]
    fn test_traversal_hop_bounds_are_preserved() {
        assert!(DECISIONS_BY_TYPE.contains("[:CONTRIBUTED_TO*0..2]"));
        assert!(OUTCOMES_FOR_SUMMARY.contains("[:CAUSED_BY*1..3]"));
        assert!(OUTCOMES_FOR_SUMMARY.contains("[:CONTRIBUTED_TO*0..2]"));
        assert!(OUTCOME_SPLIT.contains("[:CONTRIBUTED_TO*0..1]"));
    }

    // Participation stats lean on the store for both named properties:
    // OPTIONAL MATCH keeps zero-participation entities, ORDER BY ranks
    // before LIMIT caps.
    #[test]
    fn test_participation_stats_rank_in_the_store() {
        for stats in [PEOPLE_WITH_STATS, AGENTS_WITH_STATS] {
            assert!(stats.contains("OPTIONAL MATCH"));
            assert!(stats.contains("ORDER BY decision_count DESC"));
            let order = stats.find("ORDER BY").unwrap();
            let limit = stats.find("LIMIT").unwrap();
            assert!(order < limit);
        }
    }
}
