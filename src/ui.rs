// UI layer: status lines, banners, the confirmation prompt and the
// probe spinner. The seeder writes through the `Report` trait so tests
// can capture the transcript instead of printing it.

use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const RULE_WIDTH: usize = 60;

/// Marker in front of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Ok,
    Warn,
    Fail,
    /// Plain text, no marker.
    Note,
}

impl Mark {
    fn symbol(self) -> &'static str {
        match self {
            Mark::Ok => "✓",
            Mark::Warn => "⚠",
            Mark::Fail => "✗",
            Mark::Note => "",
        }
    }
}

/// Sink for human-readable progress.
pub trait Report {
    /// A status line. `depth` indents lines that belong to the previous one
    /// (image uploads under their menu item, response bodies under a failure).
    fn line(&mut self, mark: Mark, depth: usize, text: &str);

    /// Start of a phase, preceded by a blank line.
    fn section(&mut self, title: &str);

    fn blank(&mut self);
}

/// Writes to stdout with colored markers.
#[derive(Debug, Default)]
pub struct ConsoleReport;

impl Report for ConsoleReport {
    fn line(&mut self, mark: Mark, depth: usize, text: &str) {
        let indent = "  ".repeat(depth);
        let symbol = mark.symbol();
        match mark {
            Mark::Ok => println!("{indent}{} {text}", symbol.green()),
            Mark::Warn => println!("{indent}{} {text}", symbol.yellow()),
            Mark::Fail => println!("{indent}{} {text}", symbol.red()),
            Mark::Note => println!("{indent}{text}"),
        }
    }

    fn section(&mut self, title: &str) {
        println!();
        println!("{}", title.bold());
    }

    fn blank(&mut self) {
        println!();
    }
}

/// Opening banner with the target URL.
pub fn banner(report: &mut dyn Report, target: &str) {
    rule(report);
    report.line(Mark::Note, 0, "UniBytes Menu Seeding Script");
    rule(report);
    report.line(Mark::Note, 0, &format!("Target API: {target}"));
    report.blank();
}

pub fn closing_banner(report: &mut dyn Report) {
    report.blank();
    rule(report);
    report.line(Mark::Note, 0, "Seeding complete!");
    rule(report);
}

fn rule(report: &mut dyn Report) {
    report.line(Mark::Note, 0, &"=".repeat(RULE_WIDTH));
}

/// Ask before writing to the backend. Skipped (treated as yes) when
/// `assume_yes` is set or stdin is not a terminal.
pub fn confirm_seed(target: &str, assume_yes: bool) -> Result<bool> {
    use std::io::IsTerminal;
    if assume_yes || !std::io::stdin().is_terminal() {
        return Ok(true);
    }
    let answer = Confirm::new()
        .with_prompt(format!("Seed the built-in menu into {target}?"))
        .default(true)
        .interact()?;
    Ok(answer)
}

/// Spinner shown while the reachability probe is in flight.
pub fn probe_spinner(target: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Contacting {target}..."));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Forwards to another report, clearing a spinner before the first
/// output so the two do not interleave.
pub struct AfterSpinner<'a> {
    spinner: Option<ProgressBar>,
    inner: &'a mut dyn Report,
}

impl<'a> AfterSpinner<'a> {
    pub fn new(spinner: ProgressBar, inner: &'a mut dyn Report) -> Self {
        AfterSpinner { spinner: Some(spinner), inner }
    }

    fn clear(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl Report for AfterSpinner<'_> {
    fn line(&mut self, mark: Mark, depth: usize, text: &str) {
        self.clear();
        self.inner.line(mark, depth, text);
    }

    fn section(&mut self, title: &str) {
        self.clear();
        self.inner.section(title);
    }

    fn blank(&mut self) {
        self.clear();
        self.inner.blank();
    }
}

/// Records every line; used by the seeder tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct Transcript {
    pub lines: Vec<(Mark, usize, String)>,
}

#[cfg(test)]
impl Transcript {
    pub fn contains(&self, mark: Mark, needle: &str) -> bool {
        self.lines.iter().any(|(m, _, t)| *m == mark && t.contains(needle))
    }
}

#[cfg(test)]
impl Report for Transcript {
    fn line(&mut self, mark: Mark, depth: usize, text: &str) {
        self.lines.push((mark, depth, text.to_string()));
    }

    fn section(&mut self, title: &str) {
        self.lines.push((Mark::Note, 0, String::new()));
        self.lines.push((Mark::Note, 0, title.to_string()));
    }

    fn blank(&mut self) {
        self.lines.push((Mark::Note, 0, String::new()));
    }
}
