use std::io::{self, BufRead, Write};

use anyhow::Result;
use chrono::Utc;

use lexi::scheduler::{format_interval, ReviewSession};

use crate::app::App;

/// Interactive review loop: show the prompt, reveal the answer, let the
/// learner grade themselves. Grading a card wrong sends it back to box 1.
pub fn run(app: &mut App, max: usize) -> Result<()> {
    let mut session = ReviewSession::new(
        app.learner.clone(),
        &app.catalog,
        &mut app.store,
        app.config.clone(),
    );

    let batch_len = session.start(Utc::now(), max)?;
    if batch_len == 0 {
        println!("Nothing is due right now. Come back later!");
        return Ok(());
    }
    println!("{} card(s) due.\n", batch_len);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut answered = 0usize;
    let mut correct_total = 0usize;

    while let Some(item_id) = session.current_item().cloned() {
        let item = app.catalog.require(&item_id)?;

        println!("[{}/{}] {}", answered + 1, batch_len, item.prompt);
        if !item.options.is_empty() {
            for option in &item.options {
                println!("    - {}", option);
            }
        }
        print!("Press Enter to reveal the answer...");
        io::stdout().flush()?;
        lines.next();

        println!("Answer: {}", item.answer);
        if let Some(explanation) = &item.explanation {
            println!("Note: {}", explanation);
        }

        print!("Did you get it right? [y/n] ");
        io::stdout().flush()?;
        let reply = lines.next().transpose()?.unwrap_or_default();
        let correct = matches!(reply.trim().to_lowercase().as_str(), "y" | "yes");

        let now = Utc::now();
        let state = session.submit_answer(&item_id, correct, now)?;
        answered += 1;
        if correct {
            correct_total += 1;
        }

        let next_in = state.due_at.map_or(0, |due| (due - now).num_days());
        println!(
            "-> box {}, next review {}\n",
            state.box_no,
            if next_in <= 0 {
                "next session".to_string()
            } else {
                format!("in {}", format_interval(next_in))
            }
        );
    }

    println!("Session complete: {}/{} correct.", correct_total, answered);
    Ok(())
}
