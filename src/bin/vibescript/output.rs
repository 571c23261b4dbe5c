//! Terminal rendering for results and views.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use vibescript::{GenerationResult, RenderedView, Segment};

const RULE_WIDTH: usize = 48;

/// Spinner shown while the gateway call is outstanding.
pub fn spinner(message: &str) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed}] {msg}")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

pub fn heading(title: &str) {
    println!();
    println!("{}", style(title).bold().cyan());
    println!("{}", "=".repeat(console::measure_text_width(title).max(RULE_WIDTH)));
}

fn list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("{}", style(title).bold());
    for (i, item) in items.iter().enumerate() {
        println!("  {}. {}", i + 1, item);
    }
}

/// Prints the auxiliary fields of a result.
pub fn print_result_details(result: &GenerationResult) {
    heading("Summary");
    println!("{}", result.summary);
    println!(
        "{} {}s",
        style("Estimated runtime:").dim(),
        result.estimated_time
    );
    list("Shot list", &result.shot_list);
    list("Background music", &result.bgm_suggestions);
    list("Calls to action", &result.cta_variants);
}

fn print_segments(segments: &[Segment]) {
    let mut line = String::new();
    for segment in segments {
        if segment.is_annotation {
            line.push_str(&style(&segment.text).yellow().bold().to_string());
        } else {
            line.push_str(&segment.text);
        }
    }
    println!("{}", line);
}

/// Prints a rendered view; annotations are highlighted.
pub fn print_view(rendered: &RenderedView) {
    match rendered {
        RenderedView::Text(text) if text.is_empty() => {
            println!("{}", style("(nothing to show)").dim());
        }
        RenderedView::Text(text) => println!("{}", text),
        RenderedView::Segments(segments) => print_segments(segments),
    }
}

pub fn success(message: &str) {
    println!("{} {}", style("OK:").green().bold(), message);
}

pub fn warn(message: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), message);
}
