// src/report.rs
//! Rendering of evaluation diagnostics with source context.

use miette::{GraphicalReportHandler, GraphicalTheme, NamedSource, ThemeCharacters, ThemeStyles};

use nomos_runtime::EvalError;

/// Handler for terminal output (unicode + colors).
pub fn terminal_handler() -> GraphicalReportHandler {
    GraphicalReportHandler::new_themed(GraphicalTheme {
        characters: ThemeCharacters::unicode(),
        styles: ThemeStyles::ansi(),
    })
}

/// Handler for plain output (ascii, no colors), stable enough to assert on.
pub fn plain_handler() -> GraphicalReportHandler {
    GraphicalReportHandler::new_themed(GraphicalTheme {
        characters: ThemeCharacters::ascii(),
        styles: ThemeStyles::none(),
    })
}

fn render(handler: &GraphicalReportHandler, err: &EvalError, name: &str, source: &str) -> String {
    let report = miette::Report::new(err.clone())
        .with_source_code(NamedSource::new(name, source.to_string()));
    let mut output = String::new();
    let _ = handler.render_report(&mut output, report.as_ref());
    output
}

/// Render `err` against the source it points into, without colors.
pub fn render_to_string(err: &EvalError, name: &str, source: &str) -> String {
    render(&plain_handler(), err, name, source)
}

/// Render `err` to stderr with unicode and colors.
pub fn render_to_stderr(err: &EvalError, name: &str, source: &str) {
    eprint!("{}", render(&terminal_handler(), err, name, source));
}
