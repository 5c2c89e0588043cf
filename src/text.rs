//! Plain text skin - renders a frame for non-interactive output

use std::fmt::Write;

use crate::frame::{CardFrame, Frame};
use crate::timer::TimerPhase;

pub fn render(frame: &Frame) -> String {
    match frame {
        Frame::Waiting => "Loading workout plan...\n".to_string(),
        Frame::EmptyPlan { name } => format!("{}\n\nNo exercises in this plan.\n", name),
        Frame::Plan(plan) => {
            let h = &plan.header;
            let mut out = String::new();
            let _ = writeln!(out, "{}  ({})", h.name, h.date.format("%Y-%m-%d"));
            let _ = writeln!(out, "{}/{} exercises", h.completed, h.total);
            let _ = writeln!(
                out,
                "Total sets: {} | Est. time: {} | Progress: {}%",
                h.total_sets, h.est_rest, h.percent
            );
            let _ = writeln!(out, "{:-<60}", "");
            for card in &plan.cards {
                render_card(&mut out, card);
            }
            out
        }
    }
}

fn render_card(out: &mut String, card: &CardFrame) {
    let mark = if card.completed { "[x]" } else { "[ ]" };
    let _ = writeln!(out, "{} {:>5}  {}", mark, card.index_label, card.key.name);

    let stats: Vec<String> = [
        card.sets_reps.clone(),
        card.weight.clone(),
        card.rest.as_ref().map(|r| format!("rest {}", r)),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !stats.is_empty() {
        let _ = writeln!(out, "           {}", stats.join(" | "));
    }

    if card.expanded {
        if let Some(notes) = &card.notes {
            let _ = writeln!(out, "           {}", notes);
        }
        if card.timer.usable {
            let _ = writeln!(
                out,
                "           timer {} ({})",
                card.timer.display,
                phase_label(card.timer.phase)
            );
        }
    }
}

pub fn phase_label(phase: TimerPhase) -> &'static str {
    match phase {
        TimerPhase::Idle => "ready",
        TimerPhase::Running => "resting",
        TimerPhase::Paused => "paused",
        TimerPhase::Expired => "go!",
    }
}
