//! replacement diagnostics
//!
//! With `debug` enabled every replaced token is reported as one line:
//!
//! ```text
//! AWS Pseudo Parameter: Resources::Bucket::Properties::BucketName Replaced AWS::Region with ${AWS::Region}
//! ```
//!
//! Lines are handed to a [DiagnosticsSink] owned by the caller.
use crate::config::Options;
use crate::walk::PathLabel;
use colored::Colorize;

pub const HEADER: &str = "AWS Pseudo Parameters";
pub const SKIPPING_REGION_REPLACE: &str =
    "Skipping automatic replacement of regions with account region!";

/// Receiver of finished diagnostic lines
pub trait DiagnosticsSink {
    fn line(&mut self, line: &str);
}

// blanket impl for FnMut
impl<F> DiagnosticsSink for F
where
    F: FnMut(&str),
{
    fn line(&mut self, line: &str) {
        self(line)
    }
}

/// Emits each line as a `tracing` event
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn line(&mut self, line: &str) {
        tracing::info!(target: "pseudoparam::diagnostics", "{line}");
    }
}

/// Prints each line to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl DiagnosticsSink for ConsoleSink {
    fn line(&mut self, line: &str) {
        eprintln!("{line}");
    }
}

pub struct Diagnostics<'s> {
    enabled: bool,
    color: bool,
    sink: &'s mut dyn DiagnosticsSink,
}

impl<'s> Diagnostics<'s> {
    pub fn new(options: &Options, sink: &'s mut dyn DiagnosticsSink) -> Self {
        Self {
            enabled: options.debug,
            color: options.color,
            sink,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn header(&mut self) {
        if !self.enabled {
            return;
        }

        let header = if self.color {
            HEADER.underline().yellow().to_string()
        } else {
            HEADER.to_string()
        };
        self.sink.line(&header);
    }

    pub fn notice(&mut self, message: &str) {
        if self.enabled {
            self.sink.line(message);
        }
    }

    pub fn replaced(&mut self, path: &PathLabel, key: &str, name: &str) {
        if !self.enabled {
            return;
        }

        let line = format!(
            "AWS Pseudo Parameter: {path}::{key} Replaced {} with {}",
            self.highlight(name),
            self.highlight(&format!("${{{name}}}")),
        );
        self.sink.line(&line);
    }

    fn highlight(&self, text: &str) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }
}

impl std::fmt::Debug for Diagnostics<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics")
            .field("enabled", &self.enabled)
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}
