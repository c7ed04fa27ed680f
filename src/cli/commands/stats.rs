//! stats command - Aggregate counts for the current project

use anyhow::Result;
use serde_json::Value;

use crate::cli::context::Session;
use crate::core::types::Stats;
use crate::transport::Operation;
use crate::ui::format::color_status;
use crate::ui::output;

pub async fn stats(session: &mut Session) -> Result<()> {
    let stats: Stats = session.fetch(Operation::Stats).await?;
    output::print(session.render(&stats, stats_table)?);
    Ok(())
}

fn stats_table(stats: &Stats) -> String {
    let groups = [
        ("work", &stats.work),
        ("agents", &stats.agents),
        ("targets", &stats.targets),
    ];

    let rows: Vec<Vec<String>> = groups
        .iter()
        .flat_map(|(category, counts)| {
            counts.iter().map(move |(status, count)| {
                vec![category.to_string(), color_status(status), count_cell(count)]
            })
        })
        .collect();

    output::render_table(&["CATEGORY", "STATUS", "COUNT"], &rows)
}

fn count_cell(count: &Value) -> String {
    match count {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_grouped_by_category() {
        let mut stats = Stats::default();
        stats.work.insert("running".into(), Value::from(3));
        stats.work.insert("queued".into(), Value::from(1));
        stats.agents.insert("idle".into(), Value::from(2));

        let rendered = stats_table(&stats);
        let work = rendered.find("work").unwrap();
        let agents = rendered.find("agents").unwrap();
        assert!(work < agents);
        assert!(rendered.contains('3'));
        assert!(!rendered.contains("targets"));
    }

    #[test]
    fn non_integer_counts_are_shown_as_sent() {
        let mut stats = Stats::default();
        stats.targets.insert("healthy".into(), Value::from("unknown"));
        stats.work.insert("ratio".into(), Value::from(0.5));

        let rendered = stats_table(&stats);
        assert!(rendered.contains("unknown"));
        assert!(!rendered.contains("\"unknown\""));
        assert!(rendered.contains("0.5"));
    }
}
