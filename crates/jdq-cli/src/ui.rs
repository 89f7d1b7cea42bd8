//! Terminal rendering of quality views

use colored::*;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType, size};
use jdq_core::{
    DashboardView, HighlightColor, HighlightReport, PresentationContext, QualityColor, ViewModel,
};
use jdq_session::SessionView;
use std::fmt::Write;
use std::io::{self, IsTerminal};

const DEFAULT_WIDTH: usize = 80;
const NAME_WIDTH: usize = 14;

fn terminal_width() -> usize {
    size().map(|(w, _)| w as usize).unwrap_or(DEFAULT_WIDTH)
}

/// Display startup banner
pub fn display_banner(source: &str) {
    let width = std::cmp::min(60, terminal_width().saturating_sub(4)).max(20);
    let border = "─".repeat(width - 2);

    println!();
    println!("{}", format!("┌{}┐", border).blue());
    println!("  {}", "JDQ - Job Description Quality".blue().bold());
    println!("  {}", source.dimmed());
    println!("{}", format!("└{}┘", border).blue());
    println!();
}

fn paint_badge(text: &str, color: QualityColor) -> ColoredString {
    match color {
        QualityColor::Green => text.green().bold(),
        QualityColor::Blue => text.blue().bold(),
        QualityColor::Yellow => text.yellow().bold(),
        QualityColor::Red => text.red().bold(),
    }
}

fn paint_highlight(text: &str, color: HighlightColor) -> ColoredString {
    match color {
        HighlightColor::Yellow => text.black().on_yellow(),
        HighlightColor::Orange => text.black().on_truecolor(249, 115, 22),
        HighlightColor::Red => text.white().on_red(),
        HighlightColor::DeepRed => text.white().bold().on_truecolor(153, 27, 27),
    }
}

/// Horizontal bar for a value in [0, 1]
pub fn score_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn render_dashboard(out: &mut String, dashboard: &DashboardView, ctx: &PresentationContext, bar_width: usize) {
    let badge = &dashboard.badge;
    let _ = writeln!(
        out,
        "{} {}",
        paint_badge(&format!("{}/100", badge.score), badge.color),
        paint_badge(&badge.label, badge.color)
    );
    let _ = writeln!(out);

    for bar in &dashboard.dimensions {
        let score = match bar.score {
            Some(score) => format!("{:>3}", score),
            None => "n/a".dimmed().to_string(),
        };
        let _ = writeln!(
            out,
            "{} {:<width$} {} {}",
            bar.icon,
            bar.name,
            score_bar(bar.fraction, bar_width),
            score,
            width = NAME_WIDTH
        );
    }

    if let Some(notice) = &dashboard.notice {
        let _ = writeln!(out);
        let _ = writeln!(out, "{} {}", "⚠".yellow(), notice.yellow());
    }

    if !dashboard.priorities.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", ctx.priority_heading().bold());
        for priority in &dashboard.priorities {
            let _ = writeln!(out, "  {}. {} ({})", priority.rank, priority.name, priority.score);
        }
    }

    if !dashboard.recommendations.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", ctx.recommendations_heading().bold());
        for recommendation in &dashboard.recommendations {
            let _ = writeln!(out, "  {} {}", "•".cyan(), recommendation);
        }
    }
}

/// Render a view model as terminal text
pub fn render_view(view: &ViewModel, ctx: &PresentationContext, bar_width: usize) -> String {
    let mut out = String::new();
    match view {
        ViewModel::NoData { message } => {
            let _ = writeln!(out, "{}", message.dimmed());
        }
        ViewModel::Dashboard(dashboard) => render_dashboard(&mut out, dashboard, ctx, bar_width),
    }
    out
}

/// Color of each character: the most severe span covering it
fn char_colors(len: usize, report: &HighlightReport) -> Vec<Option<HighlightColor>> {
    let mut colors = vec![None; len];
    for span in &report.spans {
        for slot in colors.iter_mut().take(span.end).skip(span.start) {
            *slot = (*slot).max(Some(span.color));
        }
    }
    colors
}

/// Render the text with flagged spans colored by severity, followed by a
/// list of the issues. Overlapping spans show the most severe color.
pub fn render_highlights(text: &str, report: &HighlightReport, ctx: &PresentationContext) -> String {
    let chars: Vec<char> = text.chars().collect();
    let colors = char_colors(chars.len(), report);

    let mut out = String::new();
    let mut start = 0;
    while start < chars.len() {
        let color = colors[start];
        let end = (start..chars.len())
            .find(|i| colors[*i] != color)
            .unwrap_or(chars.len());
        let segment: String = chars[start..end].iter().collect();
        match color {
            Some(color) => {
                let _ = write!(out, "{}", paint_highlight(&segment, color));
            }
            None => out.push_str(&segment),
        }
        start = end;
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }

    if !report.spans.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", ctx.flagged_heading().bold());
        for span in &report.spans {
            let issue = &span.issue;
            let mut line = format!(
                "  [{}] {} ({})",
                issue.severity,
                paint_highlight(&issue.problematic_text, span.color),
                issue.bias_type.label()
            );
            if !issue.suggested_alternatives.is_empty() {
                let _ = write!(line, " -> {}", issue.suggested_alternatives.join(", "));
            }
            let _ = writeln!(out, "{}", line);
        }
    }
    if report.dropped > 0 {
        let _ = writeln!(out, "  {}", ctx.unlocated_issues(report.dropped).dimmed());
    }
    out
}

/// Render a session view: status line, dashboard and highlights
pub fn render_session_view(
    view: &SessionView,
    text: &str,
    ctx: &PresentationContext,
    show_highlights: bool,
    bar_width: usize,
) -> String {
    match view {
        SessionView::Empty { view } => render_view(view, ctx, bar_width),
        SessionView::Loading { request, message } => {
            format!("{} {} {}\n", "⏳".yellow(), message, request.to_string().dimmed())
        }
        SessionView::Error {
            request,
            message,
            detail,
            can_retry,
        } => {
            let mut out = format!("{} {} {}\n", "❌".red(), message.red(), request.to_string().dimmed());
            let _ = writeln!(out, "  {}", detail.dimmed());
            if *can_retry {
                let _ = writeln!(out, "  {}", ctx.retry_hint().dimmed());
            }
            out
        }
        SessionView::Ready {
            request,
            view,
            highlights,
            analyzed_at,
        } => {
            let mut out = format!(
                "{}\n\n",
                ctx.analysis_stamp(request, analyzed_at.format("%H:%M:%S")).dimmed()
            );
            out.push_str(&render_view(view, ctx, bar_width));
            if show_highlights {
                out.push('\n');
                out.push_str(&render_highlights(text, highlights, ctx));
            }
            out
        }
    }
}

/// Clear the terminal before redrawing. No-op when stdout is not a terminal.
pub fn clear_screen() -> jdq_core::Result<()> {
    let mut stdout = io::stdout();
    if stdout.is_terminal() {
        execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
    }
    Ok(())
}

/// Bar width that fits the current terminal
pub fn bar_width() -> usize {
    terminal_width().saturating_sub(NAME_WIDTH + 12).clamp(10, 30)
}

pub fn print_session_view(view: &SessionView, text: &str, ctx: &PresentationContext, show_highlights: bool) {
    print!("{}", render_session_view(view, text, ctx, show_highlights, bar_width()));
}
