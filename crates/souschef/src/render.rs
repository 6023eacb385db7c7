//! SVG rendering of a cooking timeline
//!
//! One horizontal band per segment, bars laid end to end along a minute
//! axis, followed by a two-entry legend and a closing marker.

use crate::timeline::{total_minutes, Segment};

pub const WIDTH: f64 = 1280.0;
pub const ROW_HEIGHT: f64 = 51.2;
pub const EXPLICIT_FILL: &str = "#f46524";
pub const IMPUTED_FILL: &str = "#ffdccc";
const UNTIL_FILL: &str = "#757575";
const FONT: &str = "font-family=\"sans-serif\" font-size=\"13\"";
/// Room to the right of the last bar for its labels, in minutes
const X_PADDING: u32 = 4;
const LABEL_OFFSET: f64 = 3.0;
const LEGEND: [(&str, &str); 2] = [("unspecified time", IMPUTED_FILL), ("specified time in min", EXPLICIT_FILL)];

struct Scale {
  minutes: f64,
}

impl Scale {
  fn x(&self, minute: f64) -> f64 {
    minute / self.minutes * WIDTH
  }

  fn band(row: usize, fraction: f64) -> f64 {
    ROW_HEIGHT * (row as f64 + fraction)
  }
}

/// Render segments as a standalone SVG document
pub fn render_svg(segments: &[Segment]) -> String {
  let scale = Scale { minutes: f64::from(total_minutes(segments).saturating_add(X_PADDING)) };
  let rows = segments.len() + LEGEND.len() + 1;
  let height = ROW_HEIGHT * rows as f64;

  let mut svg = format!(
    "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{height:.1}\" viewBox=\"0 0 {WIDTH} {height:.1}\">\n"
  );
  svg.push_str(&format!("<rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n<g {FONT}>\n"));

  for (row, segment) in segments.iter().enumerate() {
    let fill = if segment.explicit { EXPLICIT_FILL } else { IMPUTED_FILL };
    svg.push_str(&bar(&scale, row, f64::from(segment.start), f64::from(segment.interval), fill));

    let label_x = scale.x(f64::from(segment.end)) + LABEL_OFFSET;
    svg.push_str(&text(label_x, Scale::band(row, 0.25), "start", "", &segment.text));
    if let Some(until) = &segment.until {
      let style = format!(" fill=\"{UNTIL_FILL}\" font-style=\"italic\"");
      svg.push_str(&text(label_x, Scale::band(row, 0.75), "start", &style, until));
    }
    if segment.explicit {
      svg.push_str(&text(scale.x(segment.mid), Scale::band(row, 0.5), "middle", "", &segment.interval.to_string()));
    }
  }

  for (i, (label, fill)) in LEGEND.iter().enumerate() {
    let row = segments.len() + i;
    svg.push_str(&bar(&scale, row, 0.0, 2.0, fill));
    svg.push_str(&text(scale.x(2.0) + LABEL_OFFSET, Scale::band(row, 0.75), "start", "", label));
  }

  let marker_row = segments.len() + LEGEND.len();
  svg.push_str(&text(scale.x(1.0), Scale::band(marker_row, 0.5), "middle", "", "X"));

  svg.push_str("</g>\n</svg>\n");
  svg
}

fn bar(scale: &Scale, row: usize, start: f64, length: f64, fill: &str) -> String {
  format!(
    "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{ROW_HEIGHT}\" fill=\"{fill}\"/>\n",
    scale.x(start),
    Scale::band(row, 0.0),
    scale.x(length),
  )
}

fn text(x: f64, y: f64, anchor: &str, style: &str, content: &str) -> String {
  format!(
    "<text x=\"{x:.1}\" y=\"{y:.1}\" text-anchor=\"{anchor}\" dominant-baseline=\"middle\"{style}>{}</text>\n",
    escape(content)
  )
}

pub(crate) fn escape(content: &str) -> String {
  let mut out = String::with_capacity(content.len());
  for c in content.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&apos;"),
      _ => out.push(c),
    }
  }
  out
}
