//! Terminal rendering of a plan

use colored::*;

use crate::pipeline::Plan;
use crate::timeline::Segment;

/// Widest bar drawn for a single segment, in characters
const MAX_BAR: usize = 30;

/// Text bar one cell per minute, capped at [`MAX_BAR`]
pub fn minute_bar(segment: &Segment) -> String {
  let cell = if segment.explicit { "█" } else { "░" };
  cell.repeat((segment.interval as usize).clamp(1, MAX_BAR))
}

/// One uncolored table row: step, minutes, action text and until clause
pub fn format_row(segment: &Segment) -> String {
  let minutes = if segment.explicit { format!("{} min", segment.interval) } else { "~".to_string() };
  let mut row = format!("{:>3}  {:>4}-{:<4} {:>7}  {}", segment.updated_step, segment.start, segment.end, minutes, segment.text);
  if let Some(until) = &segment.until {
    row.push_str(&format!(" ({until})"));
  }
  row
}

pub fn display_plan(plan: &Plan) {
  println!("Check out the following plan for {}:", plan.title.yellow().bold());
  println!();

  if plan.segments.is_empty() {
    println!("No cooking actions found.");
    return;
  }

  for segment in &plan.segments {
    let bar = if segment.explicit { minute_bar(segment).truecolor(0xf4, 0x65, 0x24) } else { minute_bar(segment).dimmed() };
    println!("{}  {bar}", format_row(segment));
  }

  let total = plan.segments.last().map(|s| s.end).unwrap_or(0);
  println!();
  println!("{} {} min across {} actions", "Total:".bold(), total.to_string().cyan(), plan.segments.len());
}
