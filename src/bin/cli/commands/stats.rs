use anyhow::Result;
use chrono::Utc;

use lexi::scheduler::{summarize, CardStateStore, BOX_COUNT};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat) -> Result<()> {
    let now = Utc::now();
    let mut states = app.store.load_states(&app.learner)?;
    // Scope the summary to the loaded catalog (level filter applies here too)
    states.retain(|id, _| app.catalog.get(id).is_some());

    let summary = summarize(&states, now);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Plain => {
            println!("Progress for learner '{}':", app.learner);
            println!(
                "  Tracked: {} of {} item(s)",
                summary.tracked_count,
                app.catalog.len()
            );
            for box_no in 1..=BOX_COUNT {
                let count = summary.count_in_box(box_no);
                println!("  Box {}: {:3}  {}", box_no, count, "#".repeat(count.min(40)));
            }
            match summary.accuracy_estimate {
                Some(accuracy) => println!("  Accuracy: {:.0}%", accuracy * 100.0),
                None => println!("  Accuracy: no reviews yet"),
            }
            println!("  Due now: {}", summary.due_now_count);
        }
    }

    Ok(())
}
