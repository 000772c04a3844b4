//! Summarizer dispatch for parsec.
//!
//! [Summarizer::summarize] stats a file, classifies it and runs exactly one extraction
//! strategy, producing a [Summary]. It never fails: read and parse errors end up in
//! [Summary::error_message] and the extraction fields stay empty.
//!
//! Strategies are picked from a static extension table ([Strategy::for_extension]).
//! Executables short-circuit the table and get a help probe instead.
//!
//! Submodules:
//! - [source]: per-language regex outlines
//! - [structured]: JSON keys, INI/ENV keys and plain text previews
//! - [markup]: markdown headers, links and rendering
//! - [exec]: help probing for executables

pub mod exec;
pub mod markup;
pub mod source;
pub mod structured;

use crate::core::classify::{Kind, classify, classify_file};
use crate::core::error::SummaryError;
use crate::core::fm::extension_of;
use crate::core::markdown::{AnsiMarkdown, MarkdownRenderer};

use phf::phf_map;

use std::fs;
use std::path::Path;
use std::time::Duration;

/// Function, import, type and struct names of a source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceOutline {
    pub functions: Vec<String>,
    pub imports: Vec<String>,
    pub types: Vec<String>,
    pub structs: Vec<String>,
}

impl SourceOutline {
    #[inline]
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }
}

/// Headers and links of a markdown file, plus either its rendering or a raw preview.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupOutline {
    pub headers: Vec<String>,
    pub links: Vec<String>,
    pub rendered: Option<String>,
    pub preview: Vec<String>,
}

/// Keys of a configuration file. INI and ENV files also keep a raw preview.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOutline {
    pub keys: Vec<String>,
    pub preview: Vec<String>,
}

/// The extraction result. Exactly one shape per summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SummaryBody {
    #[default]
    Empty,
    Source(SourceOutline),
    Markup(MarkupOutline),
    Config(ConfigOutline),
    Text(Vec<String>),
    Executable(String),
}

/// Result of summarizing one file.
///
/// Built fresh for every request and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    path: String,
    language: &'static str,
    line_count: usize,
    size_bytes: u64,
    body: SummaryBody,
    error_message: Option<String>,
}

impl Summary {
    fn new(path: &str, language: &'static str) -> Self {
        Self {
            path: path.to_string(),
            language,
            line_count: 0,
            size_bytes: 0,
            body: SummaryBody::Empty,
            error_message: None,
        }
    }

    fn failed(mut self, err: SummaryError) -> Self {
        log::debug!("summary of {} failed: {}", self.path, err);
        self.body = SummaryBody::Empty;
        self.error_message = Some(err.to_string());
        self
    }

    // Accessors

    /// Name relative to the directory the file was listed from.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    pub fn language(&self) -> &'static str {
        self.language
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    #[inline]
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    #[inline]
    pub fn body(&self) -> &SummaryBody {
        &self.body
    }

    #[inline]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn function_count(&self) -> usize {
        match &self.body {
            SummaryBody::Source(o) => o.function_count(),
            _ => 0,
        }
    }
}

/// What a strategy hands back to the dispatcher.
#[derive(Debug)]
pub(crate) struct Extracted {
    pub(crate) line_count: usize,
    pub(crate) body: SummaryBody,
}

/// One entry per extraction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Strategy {
    Markdown,
    Json,
    Ini,
    Env,
    Text,
    /// Language rules when the extension has them, text otherwise.
    Source,
}

static STRATEGIES: phf::Map<&'static str, Strategy> = phf_map! {
    ".md" => Strategy::Markdown,
    ".markdown" => Strategy::Markdown,
    ".json" => Strategy::Json,
    // YAML has no structured extraction, only a preview.
    ".yaml" => Strategy::Text,
    ".yml" => Strategy::Text,
    ".ini" => Strategy::Ini,
    ".cfg" => Strategy::Ini,
    ".conf" => Strategy::Ini,
    ".env" => Strategy::Env,
    ".txt" => Strategy::Text,
    ".log" => Strategy::Text,
    ".rst" => Strategy::Text,
    ".xml" => Strategy::Text,
    ".csv" => Strategy::Text,
};

impl Strategy {
    pub(crate) fn for_extension(ext: &str) -> Strategy {
        STRATEGIES.get(ext).copied().unwrap_or(Strategy::Source)
    }
}

/// Tunables for the summarizer.
#[derive(Debug, Clone)]
pub struct SummaryOptions {
    pub max_text_lines: usize,
    pub max_ini_lines: usize,
    pub max_env_lines: usize,
    pub max_help_lines: usize,
    pub probe_timeout: Duration,
    pub markdown_width: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            max_text_lines: 50,
            max_ini_lines: 40,
            max_env_lines: 30,
            max_help_lines: 25,
            probe_timeout: Duration::from_secs(3),
            markdown_width: 80,
        }
    }
}

/// Produces [Summary] values. Shared by the summary worker thread.
pub struct Summarizer {
    options: SummaryOptions,
    renderer: Box<dyn MarkdownRenderer + Send + Sync>,
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new(SummaryOptions::default())
    }
}

impl Summarizer {
    pub fn new(options: SummaryOptions) -> Self {
        Self::with_renderer(options, Box::new(AnsiMarkdown))
    }

    pub fn with_renderer(
        options: SummaryOptions,
        renderer: Box<dyn MarkdownRenderer + Send + Sync>,
    ) -> Self {
        Self { options, renderer }
    }

    #[inline]
    pub fn options(&self) -> &SummaryOptions {
        &self.options
    }

    /// Summarizes the file `name` inside `dir`.
    pub fn summarize(&self, dir: &Path, name: &str) -> Summary {
        self.summarize_until(dir, name, &|| false)
    }

    /// Like [Summarizer::summarize], but stops probing an executable once `superseded`
    /// returns true. The summary is still returned, the caller is expected to discard it.
    pub fn summarize_until(
        &self,
        dir: &Path,
        name: &str,
        superseded: &dyn Fn() -> bool,
    ) -> Summary {
        let path = dir.join(name);
        let summary = Summary::new(name, classify(name).label());

        let meta = match fs::metadata(&path) {
            Ok(meta) => meta,
            Err(source) => return summary.failed(SummaryError::Stat { path, source }),
        };

        let mut summary = summary;
        summary.size_bytes = meta.len();

        let class = classify_file(&path, &meta);
        summary.language = class.label();

        if class.kind() == Kind::Executable {
            summary.body = SummaryBody::Executable(exec::help_text(
                &path,
                meta.len(),
                self.options.probe_timeout,
                self.options.max_help_lines,
                superseded,
            ));
            return summary;
        }

        let content = match fs::read(&path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => return summary.failed(e.into()),
        };

        match self.run(Strategy::for_extension(&extension_of(name)), &content, name) {
            Ok(Extracted { line_count, body }) => {
                summary.line_count = line_count;
                summary.body = body;
                summary
            }
            Err(e) => summary.failed(e),
        }
    }

    fn run(&self, strategy: Strategy, content: &str, name: &str) -> Result<Extracted, SummaryError> {
        let opts = &self.options;
        let extracted = match strategy {
            Strategy::Markdown => markup::markdown(
                content,
                self.renderer.as_ref(),
                opts.markdown_width,
                opts.max_text_lines,
            ),
            Strategy::Json => structured::json(content)?,
            Strategy::Ini => structured::ini(content, opts.max_ini_lines),
            Strategy::Env => structured::env(content, opts.max_env_lines),
            Strategy::Text => structured::text(content, opts.max_text_lines),
            Strategy::Source => match source::rules_for(&extension_of(name)) {
                Some(rules) => {
                    log::debug!("outlining {} with {} rules", name, rules.label());
                    source::extract(content, rules)
                }
                None => structured::text(content, opts.max_text_lines),
            },
        };
        Ok(extracted)
    }
}
