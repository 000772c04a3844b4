//! Regex-driven outline extraction for source files.
//!
//! Each language gets one [LanguageRules] entry: a pattern per category (functions, imports,
//! types, structs) plus its comment syntax. The table is built once on first use and never
//! mutated. Extensions without an entry fall back to a plain text preview.

use crate::core::summarize::{Extracted, SourceOutline, SummaryBody};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use std::collections::HashMap;

/// How a language spells multi-line comments (or docstrings, which we skip the same way).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockComment {
    /// `/* ... */`
    Slashed,
    /// `"""` or `'''`, toggled by each line with an odd number of markers.
    TripleQuoted,
}

/// What to record from an import match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ImportStyle {
    FirstCapture,
    /// `from pkg import a, b` is recorded as `pkg.a, b`.
    FromImport,
}

/// Parenthesised import groups such as Go's `import ( ... )`.
#[derive(Debug, Clone)]
pub(crate) struct ImportGroup {
    open: &'static str,
    item: Regex,
}

#[derive(Debug, Clone)]
pub(crate) struct LanguageRules {
    label: &'static str,
    line_comment: &'static str,
    block: BlockComment,
    function: Regex,
    import: Regex,
    types: Regex,
    structs: Regex,
    import_style: ImportStyle,
    import_group: Option<ImportGroup>,
}

fn pattern(src: &str) -> Regex {
    Regex::new(src).expect("built-in source pattern must compile")
}

impl LanguageRules {
    fn new(label: &'static str, function: &str, import: &str, types: &str, structs: &str) -> Self {
        Self {
            label,
            line_comment: "//",
            block: BlockComment::Slashed,
            function: pattern(function),
            import: pattern(import),
            types: pattern(types),
            structs: pattern(structs),
            import_style: ImportStyle::FirstCapture,
            import_group: None,
        }
    }

    fn with_line_comment(mut self, marker: &'static str) -> Self {
        self.line_comment = marker;
        self
    }

    fn with_block(mut self, block: BlockComment) -> Self {
        self.block = block;
        self
    }

    fn with_import_style(mut self, style: ImportStyle) -> Self {
        self.import_style = style;
        self
    }

    fn with_import_group(mut self, open: &'static str, item: &str) -> Self {
        self.import_group = Some(ImportGroup {
            open,
            item: pattern(item),
        });
        self
    }

    #[inline]
    pub(crate) fn label(&self) -> &'static str {
        self.label
    }

    fn import_name(&self, caps: &Captures<'_>) -> Option<String> {
        match self.import_style {
            ImportStyle::FirstCapture => first_capture(caps),
            ImportStyle::FromImport => {
                let names = caps.get(2)?.as_str();
                match caps.get(1) {
                    Some(module) => Some(format!("{}.{}", module.as_str(), names)),
                    None => Some(names.to_string()),
                }
            }
        }
    }
}

static LANGUAGES: Lazy<HashMap<&'static str, LanguageRules>> = Lazy::new(|| {
    let go = LanguageRules::new(
        "Go",
        r"^func\s+(\w+)",
        r#"^import\s+["']([^"']+)["']|^\s+["']([^"']+)["']"#,
        r"^type\s+(\w+)\s+",
        r"^type\s+(\w+)\s+struct",
    )
    .with_import_group("import (", r#"^(?:\w+\s+)?"([^"]+)""#);

    let python = LanguageRules::new(
        "Python",
        r"^def\s+(\w+)",
        r"^(?:from\s+(\S+)\s+)?import\s+(.+)",
        r"^class\s+(\w+)",
        r"^class\s+(\w+)",
    )
    .with_line_comment("#")
    .with_block(BlockComment::TripleQuoted)
    .with_import_style(ImportStyle::FromImport);

    let js_function = r"^(?:function\s+(\w+)|const\s+(\w+)\s*=.*=>|(\w+)\s*:\s*function)";
    let javascript = LanguageRules::new(
        "JavaScript",
        js_function,
        r#"^import.*from\s+['"]([^'"]+)['"]|^const\s+.*=\s+require\(['"]([^'"]+)['"]\)"#,
        r"^(?:class\s+(\w+)|interface\s+(\w+))",
        r"^(?:class\s+(\w+)|interface\s+(\w+))",
    );
    let typescript = LanguageRules::new(
        "TypeScript",
        js_function,
        r#"^import.*from\s+['"]([^'"]+)['"]"#,
        r"^(?:class\s+(\w+)|interface\s+(\w+)|type\s+(\w+))",
        r"^(?:class\s+(\w+)|interface\s+(\w+))",
    );

    let rust = LanguageRules::new(
        "Rust",
        r"^(?:pub\s+)?fn\s+(\w+)",
        r"^use\s+([^;]+);",
        r"^(?:pub\s+)?(?:struct\s+(\w+)|enum\s+(\w+)|type\s+(\w+))",
        r"^(?:pub\s+)?struct\s+(\w+)",
    );

    let cpp = LanguageRules::new(
        "C++",
        r"^(?:[a-zA-Z_][a-zA-Z0-9_]*\s+)?(?:[a-zA-Z_][a-zA-Z0-9_]*::)?\w+\s+(\w+)\s*\(",
        r#"^#include\s+[<"]([^>"]+)[>"]"#,
        r"^(?:class|struct|enum|union)\s+(\w+)",
        r"^(?:class|struct)\s+(\w+)",
    );

    let mut table = HashMap::new();
    table.insert(".go", go);
    table.insert(".py", python);
    table.insert(".js", javascript.clone());
    table.insert(".jsx", javascript);
    table.insert(".ts", typescript.clone());
    table.insert(".tsx", typescript);
    table.insert(".rs", rust);
    table.insert(".cpp", cpp.clone());
    table.insert(".cc", cpp);
    table
});

/// Returns the rules registered for an extension (lower-cased, with dot).
pub(crate) fn rules_for(ext: &str) -> Option<&'static LanguageRules> {
    LANGUAGES.get(ext)
}

/// First non-empty capture group of a match.
fn first_capture(caps: &Captures<'_>) -> Option<String> {
    caps.iter()
        .skip(1)
        .flatten()
        .map(|m| m.as_str())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn capture_into(re: &Regex, line: &str, out: &mut Vec<String>) {
    if let Some(name) = re.captures(line).as_ref().and_then(first_capture) {
        out.push(name);
    }
}

/// Scans `content` line by line and collects the outline.
///
/// Blank lines and line comments are skipped. A line that opens a block comment starts a
/// skipped span which lasts up to and including the line that closes it.
pub(crate) fn extract(content: &str, rules: &LanguageRules) -> Extracted {
    let mut outline = SourceOutline::default();
    let mut line_count = 0;
    let mut in_block = false;
    let mut in_group = false;

    for raw in content.lines() {
        line_count += 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with(rules.line_comment) {
            continue;
        }

        match rules.block {
            BlockComment::Slashed => {
                if line.contains("/*") {
                    in_block = true;
                }
                if in_block {
                    if line.contains("*/") {
                        in_block = false;
                    }
                    continue;
                }
            }
            BlockComment::TripleQuoted => {
                let markers = line.matches(r#"""""#).count() + line.matches("'''").count();
                if markers > 0 {
                    if markers % 2 == 1 {
                        in_block = !in_block;
                    }
                    continue;
                }
                if in_block {
                    continue;
                }
            }
        }

        if let Some(group) = &rules.import_group {
            if in_group {
                if line.starts_with(')') {
                    in_group = false;
                } else {
                    capture_into(&group.item, line, &mut outline.imports);
                }
                continue;
            }
            if line.starts_with(group.open) {
                in_group = true;
                continue;
            }
        }

        capture_into(&rules.function, line, &mut outline.functions);

        if let Some(name) = rules
            .import
            .captures(line)
            .and_then(|caps| rules.import_name(&caps))
        {
            outline.imports.push(name);
        }

        capture_into(&rules.types, line, &mut outline.types);
        capture_into(&rules.structs, line, &mut outline.structs);
    }

    Extracted {
        line_count,
        body: SummaryBody::Source(outline),
    }
}
