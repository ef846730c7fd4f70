//! Output formatting for the CLI.

use atelier_commerce::order::{OrderStatus, StatusTrack, StepState};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
    term: Term,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self {
            verbose,
            json,
            term: Term::stderr(),
        }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a blank line.
    pub fn blank(&self) {
        if !self.json {
            println!();
        }
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| pad(col, *width))
            .collect();
        println!("  {}", formatted.join("  ").trim_end());
    }

    /// Print a table header and its rule.
    pub fn table_header(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        self.table_row(cols, widths);
        let width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        println!("  {}", style("-".repeat(width.min(self.term_width()))).dim());
    }

    /// Render an order's progress track on one line.
    pub fn track(&self, track: &StatusTrack) {
        if self.json {
            return;
        }
        let mut line = String::new();
        for (i, step) in track.steps.iter().enumerate() {
            if i > 0 {
                let filled = track.connectors.get(i - 1).copied().unwrap_or(false);
                let rule = if filled {
                    style(" ━━ ").green()
                } else {
                    style(" ── ").dim()
                };
                line.push_str(&rule.to_string());
            }
            line.push_str(&step_marker(step.state, step.label));
        }
        println!("  {}", line);
    }

    /// Create a spinner for a backend call.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json || !self.term.is_term() {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Get terminal width.
    pub fn term_width(&self) -> usize {
        self.term.size().1 as usize
    }
}

/// Pad to `width` columns, ignoring ANSI styling.
fn pad(col: &str, width: usize) -> String {
    let visible = console::measure_text_width(col);
    format!("{}{}", col, " ".repeat(width.saturating_sub(visible)))
}

/// Colored badge for an order status.
pub fn status_badge(status: OrderStatus) -> String {
    let name = status.display_name();
    match status {
        OrderStatus::Completed => style(name).green().to_string(),
        OrderStatus::Accepted => style(name).cyan().to_string(),
        OrderStatus::Pending => style(name).yellow().to_string(),
        OrderStatus::Rejected => style(name).red().to_string(),
        OrderStatus::Cancelled => style(name).dim().to_string(),
    }
}

fn step_marker(state: StepState, label: &str) -> String {
    match state {
        StepState::Completed => format!("{} {}", style("●").green(), label),
        StepState::Current => format!("{} {}", style("◉").yellow(), style(label).bold()),
        StepState::Error => format!("{} {}", style("✗").red(), style(label).red()),
        StepState::Pending => style(format!("○ {}", label)).dim().to_string(),
    }
}

/// Shorten text to `max` characters, marking the cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}
