//! Progress echo lines
//!
//! The pipeline narrates what it touches: every subprocess, file copy,
//! download and archive extraction gets one line on stdout. `--quiet`
//! suppresses all of them; the summary table and final message still print.

use std::path::Path;

use console::Style;

#[derive(Debug, Clone, Copy)]
pub struct Echo {
    quiet: bool,
}

impl Echo {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Subprocess invocation, shell-quoted
    pub fn run(&self, command: &str) {
        self.line("RUN:", command);
    }

    pub fn copy(&self, src: &Path, dst: &Path) {
        self.line("COPY:", &format!("{} -> {}", src.display(), dst.display()));
    }

    pub fn download(&self, url: &str) {
        self.line("DOWNLOAD:", url);
    }

    pub fn unzip(&self, entry: &str, dst: &Path) {
        self.line("UNZIP:", &format!("{} -> {}", entry, dst.display()));
    }

    /// Tag the per-version pass now runs against
    pub fn checkout(&self, tag: &str) {
        self.line("CPYTHON:", tag);
    }

    fn line(&self, label: &str, rest: &str) {
        if !self.quiet {
            println!("{} {}", Style::new().bold().apply_to(label), rest);
        }
    }
}
