use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

use apidoc::diagnostic::{Diagnostic, Severity, has_errors};

/// Prints per-page results and keeps the pass/fail tally for the summary line.
pub struct Reporter {
    writer: StandardStream,
    config: term::Config,
    no_color: bool,
    /// Show `Note` diagnostics (page metadata, attachments).
    show_messages: bool,
    passed: usize,
    failed: usize,
}

impl Reporter {
    pub fn new(no_color: bool, show_messages: bool) -> Self {
        let color_choice = if no_color {
            ColorChoice::Never
        } else {
            ColorChoice::Auto
        };
        Reporter {
            writer: StandardStream::stderr(color_choice),
            config: term::Config::default(),
            no_color,
            show_messages,
            passed: 0,
            failed: 0,
        }
    }

    /// Report one page. It passes when none of its diagnostics is an error.
    pub fn page(&mut self, name: &str, diagnostics: &[Diagnostic], files: &SimpleFiles<String, String>) {
        if has_errors(diagnostics) {
            self.failed += 1;
            eprintln!("  {}  {}", fail_label(self.no_color), name);
        } else {
            self.passed += 1;
            eprintln!("  {}  {}", pass_label(self.no_color), name);
        }

        for diagnostic in diagnostics {
            if diagnostic.severity == Severity::Note && !self.show_messages {
                continue;
            }
            self.emit(diagnostic, files);
        }
    }

    /// Report a failure that is not tied to a single page.
    pub fn fatal(&mut self, diagnostic: &Diagnostic, files: &SimpleFiles<String, String>) {
        self.failed += 1;
        self.emit(diagnostic, files);
    }

    pub fn emit(&self, diagnostic: &Diagnostic, files: &SimpleFiles<String, String>) {
        let report = diagnostic.to_report();
        if term::emit_to_write_style(&mut self.writer.lock(), &self.config, files, &report).is_err() {
            eprintln!("{}", diagnostic);
        }
    }

    /// Print the summary line. Returns the process exit code.
    pub fn finish(&self) -> i32 {
        eprintln!();
        if self.failed == 0 {
            eprintln!(
                "check result: {}. {} passed, 0 failed",
                if self.no_color { "ok" } else { "\x1b[32mok\x1b[0m" },
                self.passed
            );
            0
        } else {
            eprintln!(
                "check result: {}. {} passed, {} failed (of {})",
                if self.no_color { "FAILED" } else { "\x1b[31mFAILED\x1b[0m" },
                self.passed,
                self.failed,
                self.passed + self.failed
            );
            1
        }
    }
}

fn pass_label(no_color: bool) -> &'static str {
    if no_color { "PASS" } else { "\x1b[32mPASS\x1b[0m" }
}

fn fail_label(no_color: bool) -> &'static str {
    if no_color { "FAIL" } else { "\x1b[31mFAIL\x1b[0m" }
}

pub fn bold(s: &str, no_color: bool) -> String {
    if no_color {
        s.to_string()
    } else {
        format!("\x1b[1m{}\x1b[0m", s)
    }
}
