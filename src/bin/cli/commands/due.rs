use anyhow::Result;
use chrono::Utc;

use lexi::scheduler::{format_interval, select_due, CardStateStore};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, max: usize, format: &OutputFormat) -> Result<()> {
    let now = Utc::now();
    let states = app.store.load_states(&app.learner)?;
    let due = select_due(&app.catalog, &states, now, max)?;

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = due
                .iter()
                .map(|id| {
                    let item = app.catalog.get(id);
                    let state = states.get(id);
                    serde_json::json!({
                        "id": id.to_string(),
                        "prompt": item.map(|i| i.prompt.clone()),
                        "level": item.map(|i| i.level.to_string()),
                        "box": state.map_or(1, |s| s.box_no),
                        "dueAt": state.and_then(|s| s.due_at).map(|d| d.to_rfc3339()),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if due.is_empty() {
                println!("Nothing is due right now.");
                return Ok(());
            }
            println!("{} item(s) due:", due.len());
            for id in &due {
                let item = app.catalog.require(id)?;
                let box_no = states.get(id).map_or(1, |s| s.box_no);
                let overdue = states
                    .get(id)
                    .and_then(|s| s.due_at)
                    .map_or(0, |d| (now - d).num_days());
                let staleness = if overdue > 0 {
                    format!(", overdue {}", format_interval(overdue))
                } else {
                    String::new()
                };
                println!(
                    "  [box {}] {} ({}{})",
                    box_no, item.prompt, item.level, staleness
                );
            }
        }
    }

    Ok(())
}
