//! Output management and formatting.

use std::io;

use console::Term;
use owo_colors::OwoColorize;

use crate::cli::global::GlobalArgs;
use crate::config::AppConfig;

/// Writes user-facing lines to stdout.
pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let term = Term::stdout();
        Self {
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color || !term.is_term(),
            term,
        }
    }

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.marked(Mark::Success, msg)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.marked(Mark::Warning, msg)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.marked(Mark::Info, msg)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    fn marked(&self, mark: Mark, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&mark.line(msg, !self.no_color))
    }
}

#[derive(Debug, Clone, Copy)]
enum Mark {
    Success,
    Warning,
    Info,
}

impl Mark {
    fn line(self, msg: &str, color: bool) -> String {
        let symbol = match self {
            Self::Success => "\u{2713}", // ✓
            Self::Warning => "\u{26a0}", // ⚠
            Self::Info => "\u{2139}",    // ℹ
        };
        if !color {
            return format!("{symbol} {msg}");
        }
        match self {
            Self::Success => format!("{} {}", symbol.green().bold(), msg.green()),
            Self::Warning => format!("{} {}", symbol.yellow().bold(), msg.yellow()),
            Self::Info => format!("{} {}", symbol.blue().bold(), msg.blue()),
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager(quiet: bool) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color: true,
            config: None,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn plain_lines_carry_the_symbol() {
        assert_eq!(Mark::Success.line("done", false), "\u{2713} done");
        assert_eq!(Mark::Warning.line("hm", false), "\u{26a0} hm");
        assert_eq!(Mark::Info.line("fyi", false), "\u{2139} fyi");
    }

    #[test]
    fn colored_lines_keep_the_text() {
        let line = Mark::Success.line("done", true);
        assert!(line.contains("done"));
        assert!(line.contains('\u{1b}'));
    }

    #[test]
    fn quiet_suppresses_everything() {
        let out = make_manager(true);
        assert!(out.print("hello").is_ok());
        assert!(out.header("hello").is_ok());
        assert!(out.warning("hello").is_ok());
    }
}
