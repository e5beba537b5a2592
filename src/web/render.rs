//! Static HTML rendering for the dashboard index page. Deliberately plain:
//! no template engine, one page, tables only.

use crate::graph::{
    ContributionSplit, DashboardStats, DecisionByType, InfluenceStats, SplitStats, TopologyStats,
};

pub fn dashboard_page(
    dashboard: &DashboardStats,
    influence: &InfluenceStats,
    split: &ContributionSplit,
    topology: &TopologyStats,
    decisions: &[DecisionByType],
) -> String {
    let decision_rows: String = decisions
        .iter()
        .map(|d| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&d.decision),
                escape(d.outcome.as_deref().unwrap_or("-")),
                d.influence_type.label(),
                escape(&d.people.join(", ")),
                escape(&d.agents.join(", ")),
            )
        })
        .collect();

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
<title>Decision Graph Dashboard</title>\n\
<style>body{{font-family:sans-serif;margin:2rem}}table{{border-collapse:collapse;margin-bottom:2rem}}\
td,th{{border:1px solid #ccc;padding:0.4rem 0.8rem;text-align:left}}</style>\n\
</head>\n<body>\n<h1>Decision Graph Dashboard</h1>\n\
<h2>Overview</h2>\n<table>\n\
<tr><th>Total decisions</th><td>{total}</td></tr>\n\
<tr><th>Good outcomes</th><td>{good} ({good_rate:.0}%)</td></tr>\n\
<tr><th>Bad outcomes</th><td>{bad} ({bad_rate:.0}%)</td></tr>\n\
<tr><th>Decisions with human participants</th><td>{human}</td></tr>\n\
<tr><th>Decisions with AI participants</th><td>{ai}</td></tr>\n\
<tr><th>High AI influence</th><td>{high} ({high_rate:.0}%)</td></tr>\n\
<tr><th>Low AI influence</th><td>{low} ({low_rate:.0}%)</td></tr>\n\
</table>\n\
<h2>Contribution split</h2>\n<table>\n\
<tr><th></th><th>Human only</th><th>AI only</th><th>Both</th><th>None</th><th>Total</th></tr>\n\
{decision_split}\n{outcome_split}\n</table>\n\
<h2>Graph topology</h2>\n<table>\n\
<tr><th>Decisions</th><th>Events</th><th>Outcomes</th><th>People</th><th>Agents</th><th>Tasks</th></tr>\n\
<tr><td>{t_decisions}</td><td>{t_events}</td><td>{t_outcomes}</td><td>{t_people}</td><td>{t_agents}</td><td>{t_tasks}</td></tr>\n\
</table>\n\
<h2>Decisions by contributor type</h2>\n<table>\n\
<tr><th>Decision</th><th>Outcome</th><th>Type</th><th>People</th><th>Agents</th></tr>\n\
{decision_rows}\n</table>\n</body>\n</html>\n",
        total = dashboard.total_decisions,
        good = dashboard.good_outcomes,
        good_rate = dashboard.good_rate,
        bad = dashboard.bad_outcomes,
        bad_rate = dashboard.bad_rate,
        human = dashboard.human_decisions,
        ai = dashboard.ai_decisions,
        high = influence.high,
        high_rate = influence.high_rate,
        low = influence.low,
        low_rate = influence.low_rate,
        decision_split = split_row("Decisions", &split.decisions),
        outcome_split = split_row("Outcomes", &split.outcomes),
        t_decisions = topology.decisions,
        t_events = topology.events,
        t_outcomes = topology.outcomes,
        t_people = topology.people,
        t_agents = topology.agents,
        t_tasks = topology.tasks,
        decision_rows = decision_rows,
    )
}

pub fn error_page(message: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<body>\n<h1>Dashboard unavailable</h1>\n<p>{}</p>\n</body>\n</html>\n",
        escape(message)
    )
}

fn split_row(label: &str, stats: &SplitStats) -> String {
    format!(
        "<tr><th>{}</th><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
        label, stats.human_only, stats.ai_only, stats.both, stats.none, stats.total
    )
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
