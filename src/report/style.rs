//! Console vs Markdown text styling
//!
//! Each color helper takes `console_only`: when set, Markdown output leaves
//! the text untouched instead of adding an emoji prefix.

const GREEN: &str = "\x1b[92m";
const RED: &str = "\x1b[91m";
const ORANGE: &str = "\x1b[93m";
const GRAY: &str = "\x1b[90m";
const RESET: &str = "\x1b[0m";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputStyle {
    #[default]
    Console,
    Markdown,
}

impl OutputStyle {
    pub fn from_markdown_flag(markdown: bool) -> Self {
        if markdown {
            OutputStyle::Markdown
        } else {
            OutputStyle::Console
        }
    }

    pub fn is_markdown(self) -> bool {
        self == OutputStyle::Markdown
    }

    fn paint(self, text: &str, color: &str, emoji: &str, console_only: bool) -> String {
        match self {
            OutputStyle::Markdown if console_only => text.to_string(),
            OutputStyle::Markdown => format!("{emoji}{text}"),
            OutputStyle::Console => format!("{color}{text}{RESET}"),
        }
    }

    pub fn green(self, text: &str, console_only: bool) -> String {
        self.paint(text, GREEN, "✅", console_only)
    }

    pub fn orange(self, text: &str, console_only: bool) -> String {
        self.paint(text, ORANGE, "⚠️", console_only)
    }

    pub fn red(self, text: &str, console_only: bool) -> String {
        self.paint(text, RED, "❌", console_only)
    }

    /// Gray never gets an emoji
    pub fn gray(self, text: &str) -> String {
        self.paint(text, GRAY, "", true)
    }

    pub fn h2(self) -> &'static str {
        if self.is_markdown() {
            "## "
        } else {
            ""
        }
    }

    pub fn h3(self) -> &'static str {
        if self.is_markdown() {
            "### "
        } else {
            ""
        }
    }
}
