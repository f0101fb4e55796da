//! Console messages printed around the live area.
//!
//! Messages are tagged lines (`[OK] ...`). Info and success go to stdout
//! after the live area has been released; warnings and errors go to stderr.

use std::time::Duration;

use console::style;

/// Kind of a console message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

impl Tone {
    fn tag(self) -> &'static str {
        match self {
            Tone::Info => "[==]",
            Tone::Success => "[OK]",
            Tone::Warning => "[WARN]",
            Tone::Error => "[ERROR]",
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Tone::Warning | Tone::Error)
    }
}

/// Whether colored output is wanted: `NO_COLOR` unset and the console
/// supports colors.
#[must_use]
pub fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && console::colors_enabled()
}

/// Format a message line, with a colored tag when `color` is set.
#[must_use]
pub fn format_message(tone: Tone, text: &str, color: bool) -> String {
    if !color {
        return format!("{} {text}", tone.tag());
    }
    let tag = style(tone.tag()).bold().force_styling(true);
    let tag = match tone {
        Tone::Info => tag.cyan(),
        Tone::Success => tag.green(),
        Tone::Warning => tag.yellow(),
        Tone::Error => tag.red(),
    };
    format!("{tag} {text}")
}

/// Summary line printed once every worker is done.
#[must_use]
pub fn summary(finished: usize, bars: usize, elapsed: Duration) -> String {
    format!("{finished}/{bars} bar(s) finished in {elapsed:.1?}")
}

/// Print a message to stdout or stderr depending on its tone.
pub fn print(tone: Tone, text: &str) {
    let line = format_message(tone, text, color_enabled());
    if tone.to_stderr() {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}
