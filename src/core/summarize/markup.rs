//! Markdown summaries: headers, links and a rendered copy of the document.

use crate::core::markdown::MarkdownRenderer;
use crate::core::summarize::structured::newline_count;
use crate::core::summarize::{Extracted, MarkupOutline, SummaryBody};

use once_cell::sync::Lazy;
use regex::Regex;

static HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+)").expect("markdown header pattern"));
static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("markdown link pattern"));

const TRUNCATED: &str = "... (truncated)";

pub(crate) fn markdown(
    content: &str,
    renderer: &dyn MarkdownRenderer,
    width: usize,
    max_preview: usize,
) -> Extracted {
    let mut outline = MarkupOutline::default();

    for raw in content.split('\n') {
        let line = raw.trim();

        if let Some(caps) = HEADER.captures(line) {
            outline.headers.push(format!("{} {}", &caps[1], &caps[2]));
        }

        for caps in LINK.captures_iter(line) {
            outline.links.push(format!("[{}]({})", &caps[1], &caps[2]));
        }
    }

    match renderer.render(content, width) {
        Ok(rendered) => outline.rendered = Some(rendered),
        Err(e) => {
            log::debug!("markdown rendering failed, falling back to plain lines: {}", e);
            let lines: Vec<&str> = content.split('\n').collect();
            outline.preview = lines
                .iter()
                .take(max_preview)
                .map(|l| l.trim_end_matches('\r').to_string())
                .collect();
            if lines.len() > max_preview {
                outline.preview.push(TRUNCATED.to_string());
            }
        }
    }

    Extracted {
        line_count: newline_count(content),
        body: SummaryBody::Markup(outline),
    }
}
