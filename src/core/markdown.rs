//! Markdown rendering for the summary pane.
//!
//! [MarkdownRenderer] is the seam the summarizer renders through. [AnsiMarkdown] walks
//! pulldown-cmark events and produces word-wrapped text with ANSI SGR styling, which the UI
//! turns back into styled ratatui text with `ansi-to-tui`.

use crate::core::error::RenderError;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use unicode_width::UnicodeWidthStr;

/// Anything that can turn markdown into wrapped, possibly styled, text.
pub trait MarkdownRenderer {
    fn render(&self, text: &str, width: usize) -> Result<String, RenderError>;
}

/// Default renderer emitting ANSI escape sequences.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiMarkdown;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "1";
const DIM: &str = "2";
const ITALIC: &str = "3";
const UNDERLINE: &str = "4";
const STRIKE: &str = "9";
const CODE: &str = "33";
const QUOTE_BAR: &str = "│ ";
const CODE_INDENT: &str = "    ";

fn heading_style(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "1;35",
        HeadingLevel::H2 => "1;36",
        HeadingLevel::H3 => "1;34",
        _ => BOLD,
    }
}

fn heading_depth(level: HeadingLevel) -> usize {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Accumulates styled words into lines no wider than `width`.
struct Writer {
    width: usize,
    out: Vec<String>,
    line: String,
    line_width: usize,
    lead_width: usize,
    started: bool,
    need_space: bool,
    styles: Vec<&'static str>,
    prefixes: Vec<String>,
    marker: Option<String>,
    lists: Vec<Option<u64>>,
    in_code_block: bool,
}

impl Writer {
    fn new(width: usize) -> Self {
        Self {
            width,
            out: Vec::new(),
            line: String::new(),
            line_width: 0,
            lead_width: 0,
            started: false,
            need_space: false,
            styles: Vec::new(),
            prefixes: Vec::new(),
            marker: None,
            lists: Vec::new(),
            in_code_block: false,
        }
    }

    fn sgr(&self) -> String {
        if self.styles.is_empty() {
            RESET.to_string()
        } else {
            format!("{}\x1b[{}m", RESET, self.styles.join(";"))
        }
    }

    fn push_style(&mut self, style: &'static str) {
        self.styles.push(style);
        if self.started {
            let sgr = self.sgr();
            self.line.push_str(&sgr);
        }
    }

    fn pop_style(&mut self) {
        self.styles.pop();
        if self.started {
            let sgr = self.sgr();
            self.line.push_str(&sgr);
        }
    }

    /// Starts a line with the quote bars, list indentation and a pending list marker.
    fn ensure_started(&mut self) {
        if self.started {
            return;
        }
        let lead = match self.marker.take() {
            Some(marker) => {
                let keep = self.prefixes.len().saturating_sub(1);
                format!("{}{}", self.prefixes[..keep].concat(), marker)
            }
            None => self.prefixes.concat(),
        };
        self.lead_width = lead.width();
        self.line_width = self.lead_width;
        self.line = lead;
        if !self.styles.is_empty() {
            let sgr = self.sgr();
            self.line.push_str(&sgr);
        }
        self.started = true;
    }

    fn flush(&mut self) {
        self.need_space = false;
        if !self.started {
            return;
        }
        let mut line = std::mem::take(&mut self.line);
        if line.contains('\x1b') {
            line.push_str(RESET);
        }
        self.out.push(line);
        self.started = false;
        self.line_width = 0;
    }

    fn blank(&mut self) {
        self.flush();
        if self.out.last().is_some_and(|l| !l.is_empty()) {
            self.out.push(String::new());
        }
    }

    fn word(&mut self, word: &str) {
        let w = word.width();
        self.ensure_started();
        let has_content = self.line_width > self.lead_width;
        if has_content && self.need_space {
            if self.line_width + 1 + w > self.width {
                self.flush();
                self.ensure_started();
            } else {
                self.line.push(' ');
                self.line_width += 1;
            }
        }
        self.line.push_str(word);
        self.line_width += w;
        self.need_space = false;
    }

    fn text(&mut self, text: &str) {
        if self.in_code_block {
            self.code(text);
            return;
        }
        if text.starts_with(char::is_whitespace) {
            self.need_space = true;
        }
        for (i, word) in text.split_whitespace().enumerate() {
            if i > 0 {
                self.need_space = true;
            }
            self.word(word);
        }
        if text.ends_with(char::is_whitespace) {
            self.need_space = true;
        }
    }

    /// Code blocks keep their lines as they are, indented and never wrapped.
    fn code(&mut self, text: &str) {
        for (i, raw) in text.split('\n').enumerate() {
            if i > 0 {
                if self.started {
                    self.flush();
                } else {
                    self.out.push(String::new());
                }
            }
            if raw.is_empty() {
                continue;
            }
            self.ensure_started();
            self.line.push_str(CODE_INDENT);
            self.line.push_str(raw);
            self.line_width += CODE_INDENT.len() + raw.width();
        }
    }

    fn rule(&mut self) {
        self.flush();
        let rule = "─".repeat(self.width.saturating_sub(self.prefixes.concat().width()));
        self.out.push(format!("\x1b[{}m{}{}", DIM, rule, RESET));
        self.out.push(String::new());
    }

    fn start_item(&mut self) {
        self.flush();
        let marker = match self.lists.last_mut() {
            Some(Some(n)) => {
                let m = format!("{}. ", n);
                *n += 1;
                m
            }
            _ => "• ".to_string(),
        };
        self.prefixes.push(" ".repeat(marker.width()));
        self.marker = Some(marker);
    }

    fn finish(mut self) -> String {
        self.flush();
        while self.out.last().is_some_and(|l| l.is_empty()) {
            self.out.pop();
        }
        self.out.join("\n")
    }
}

impl MarkdownRenderer for AnsiMarkdown {
    fn render(&self, text: &str, width: usize) -> Result<String, RenderError> {
        if width == 0 {
            return Err(RenderError::ZeroWidth);
        }

        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        let mut w = Writer::new(width);

        for event in Parser::new_ext(text, options) {
            match event {
                Event::Start(tag) => match tag {
                    Tag::Heading { level, .. } => {
                        w.blank();
                        w.push_style(heading_style(level));
                        w.word(&"#".repeat(heading_depth(level)));
                        w.need_space = true;
                    }
                    Tag::BlockQuote { .. } => {
                        w.flush();
                        w.prefixes.push(QUOTE_BAR.to_string());
                    }
                    Tag::CodeBlock { .. } => {
                        w.flush();
                        w.in_code_block = true;
                        w.push_style(CODE);
                    }
                    Tag::List(start) => {
                        w.flush();
                        w.lists.push(start);
                    }
                    Tag::Item => w.start_item(),
                    Tag::Emphasis => w.push_style(ITALIC),
                    Tag::Strong => w.push_style(BOLD),
                    Tag::Strikethrough => w.push_style(STRIKE),
                    Tag::Link { .. } => w.push_style(UNDERLINE),
                    _ => {}
                },
                Event::End(end) => match end {
                    TagEnd::Heading { .. } => {
                        w.pop_style();
                        w.blank();
                    }
                    TagEnd::Paragraph => w.blank(),
                    TagEnd::BlockQuote { .. } => {
                        w.flush();
                        w.prefixes.pop();
                        w.blank();
                    }
                    TagEnd::CodeBlock => {
                        w.flush();
                        w.in_code_block = false;
                        w.pop_style();
                        w.blank();
                    }
                    TagEnd::List { .. } => {
                        w.flush();
                        w.lists.pop();
                        if w.lists.is_empty() {
                            w.blank();
                        }
                    }
                    TagEnd::Item => {
                        w.flush();
                        w.prefixes.pop();
                        w.marker = None;
                    }
                    TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link => {
                        w.pop_style()
                    }
                    _ => {}
                },
                Event::Text(t) => w.text(&t),
                Event::Code(t) => {
                    w.push_style(CODE);
                    w.text(&t);
                    w.pop_style();
                }
                Event::Html(t) | Event::InlineHtml(t) => {
                    w.push_style(DIM);
                    w.text(&t);
                    w.pop_style();
                }
                Event::TaskListMarker(done) => w.text(if done { "[x] " } else { "[ ] " }),
                Event::SoftBreak => w.need_space = true,
                Event::HardBreak => w.flush(),
                Event::Rule => w.rule(),
                _ => {}
            }
        }

        Ok(w.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn plain(rendered: &str) -> Result<String, Box<dyn std::error::Error>> {
        let sgr = Regex::new(r"\x1b\[[0-9;]*m")?;
        Ok(sgr.replace_all(rendered, "").into_owned())
    }

    #[test]
    fn zero_width_is_rejected() {
        assert!(AnsiMarkdown.render("# hi", 0).is_err());
    }

    #[test]
    fn headings_keep_their_hashes_and_get_styled() -> Result<(), Box<dyn std::error::Error>> {
        let out = AnsiMarkdown.render("# Title\n\nHello *world*.\n", 80)?;
        assert!(out.contains('\x1b'));
        let text = plain(&out)?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["# Title", "", "Hello world."]);
        Ok(())
    }

    #[test]
    fn paragraphs_wrap_to_width() -> Result<(), Box<dyn std::error::Error>> {
        let para = "lorem ipsum dolor sit amet consectetur adipiscing elit sed do eiusmod tempor";
        let text = plain(&AnsiMarkdown.render(para, 20)?)?;
        assert!(text.lines().count() > 1);
        for line in text.lines() {
            assert!(line.width() <= 20, "line too wide: {:?}", line);
        }
        assert_eq!(text.split_whitespace().collect::<Vec<_>>().join(" "), para);
        Ok(())
    }

    #[test]
    fn lists_quotes_and_code_blocks() -> Result<(), Box<dyn std::error::Error>> {
        let src = "- one\n- two\n\n1. first\n2. second\n\n> quoted\n\n```\nlet x = 1;\n\nlet y = 2;\n```\n";
        let text = plain(&AnsiMarkdown.render(src, 40)?)?;
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines.contains(&"• one"));
        assert!(lines.contains(&"• two"));
        assert!(lines.contains(&"1. first"));
        assert!(lines.contains(&"2. second"));
        assert!(lines.contains(&"│ quoted"));
        assert!(lines.contains(&"    let x = 1;"));
        assert!(lines.contains(&"    let y = 2;"));
        Ok(())
    }

    #[test]
    fn inline_code_glues_to_punctuation() -> Result<(), Box<dyn std::error::Error>> {
        let text = plain(&AnsiMarkdown.render("Call `run()`, then stop.", 80)?)?;
        assert_eq!(text, "Call run(), then stop.");
        Ok(())
    }
}
