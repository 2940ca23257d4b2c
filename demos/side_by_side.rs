//! Example printing a two-column diff of two in-memory documents
//!
//! Run with: cargo run --example side_by_side

use paper_diff::backend::CompareBackend;
use paper_diff::config::Config;
use paper_diff::logging;
use paper_diff::render::{LineBody, RenderedLine, SpanStyle};

const COLUMN_WIDTH: usize = 36;

fn cell(line: &RenderedLine) -> String {
    let number = line
        .line_number
        .map(|n| format!("{:>3}", n))
        .unwrap_or_else(|| "   ".to_string());
    let text = match &line.body {
        LineBody::Plain(text) => text.clone(),
        LineBody::Spans(spans) => spans
            .iter()
            .map(|span| match span.style {
                SpanStyle::Plain => span.content.clone(),
                SpanStyle::Removed => format!("[-{}-]", span.content),
                SpanStyle::Added => format!("{{+{}+}}", span.content),
            })
            .collect(),
    };
    format!("{} {:<width$}", number, text, width = COLUMN_WIDTH)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    logging::init(&config.settings);

    let mut settings = config.settings.clone();
    settings.live_compare = false;
    let mut backend = CompareBackend::with_settings(settings);

    backend.set_left("# Notes\nThe cat sat.\nSecond line\nbye\n");
    backend.set_right("# Notes\nThe cot sat.\nbye\nP.S. new line\n");

    let rendered = backend.compare_now()?;
    for (left, right) in rendered.rows() {
        println!("{} | {}", cell(left), cell(right));
    }

    println!();
    if let Some(status) = backend.status() {
        println!("{}", status);
    }

    Ok(())
}
