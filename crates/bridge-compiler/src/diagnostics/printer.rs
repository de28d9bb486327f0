//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;

use annotate_snippets::{Group, Level, Renderer};

use super::Diagnostics;
use super::message::{DiagnosticMessage, Severity};

/// Renders one block per diagnostic:
///
/// ```text
/// warning: unresolved reference `models.Team`
///   --> users.json
///   = hint: declare the type or pass the file that declares it
/// ```
///
/// Colored output goes through `annotate-snippets` with a title group per
/// diagnostic, a note for its location and a help group per hint.
pub struct DiagnosticsPrinter<'d> {
    diagnostics: &'d Diagnostics,
    colored: bool,
}

impl<'d> DiagnosticsPrinter<'d> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            colored: false,
        }
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.format(&mut out);
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        if !self.colored {
            return self.format_plain(w);
        }

        let renderer = Renderer::styled();
        for (i, diag) in self.diagnostics.sorted().into_iter().enumerate() {
            let location = diag.location.as_ref().map(|at| format!("in {at}"));

            let title = severity_to_level(diag.severity()).primary_title(&diag.message);
            let mut report: Vec<Group> = vec![Group::with_title(title)];
            if let Some(location) = &location {
                report.push(Group::with_title(Level::NOTE.secondary_title(location)));
            }
            for hint in &diag.hints {
                report.push(Group::with_title(Level::HELP.secondary_title(hint)));
            }

            if i > 0 {
                w.write_char('\n')?;
            }
            writeln!(w, "{}", renderer.render(&report))?;
        }
        Ok(())
    }

    fn format_plain(&self, w: &mut impl Write) -> std::fmt::Result {
        for (i, diag) in self.diagnostics.sorted().into_iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            format_one(diag, w)?;
        }
        Ok(())
    }
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

fn format_one(diag: &DiagnosticMessage, w: &mut impl Write) -> std::fmt::Result {
    writeln!(w, "{}: {}", diag.severity(), diag.message)?;
    if let Some(location) = &diag.location {
        writeln!(w, "  --> {location}")?;
    }
    for hint in &diag.hints {
        writeln!(w, "  = hint: {hint}")?;
    }
    Ok(())
}
