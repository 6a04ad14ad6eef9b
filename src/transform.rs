//! Strip module syntax so a module can be concatenated into a script.
//!
//! Import and export declarations are located with the parser and
//! removed by byte range; everything else in the module is copied
//! verbatim. Afterwards full line comments and blank lines outside of
//! string, template and regex literals are dropped.
use std::ops::Range;
use std::path::PathBuf;

use anyhow::{Context, Result};

use swc_common::Span;
use swc_ecma_ast::*;
use swc_ecma_visit::{Node, Visit, VisitWith};

use crate::swc_utils::{
    apply_edits, parse_module, skip_whitespace, Edit, ParsedModule,
};

/// Sources that may be transformed
#[derive(Debug)]
pub enum TransformSource {
    /// Load a file from disc for the transformation.
    File(PathBuf),
    /// Load from a string.
    Str {
        /// The module source.
        content: String,
        /// The file name for the module.
        file_name: String,
    },
}

/// Transform a module to script text.
///
/// The result is trimmed and may be empty when the module only
/// consisted of module syntax and comments.
pub fn transform(source: TransformSource) -> Result<String> {
    let (file_name, content) = match source {
        TransformSource::File(path) => {
            let content = std::fs::read_to_string(&path)
                .context(format!("Failed to read module {}", path.display()))?;
            (path.to_string_lossy().to_string(), content)
        }
        TransformSource::Str { content, file_name } => (file_name, content),
    };

    let parsed = parse_module(&file_name, &content)?;
    let edits = module_syntax_edits(&parsed, &file_name);
    let literals = literal_ranges(&parsed, &edits);
    let stripped = apply_edits(parsed.src(), edits);
    let compacted = compact_lines(&stripped, &literals);
    Ok(compacted.trim().to_string())
}

/// Edits that remove import and export declarations and rewrite
/// forwarding super calls.
fn module_syntax_edits(parsed: &ParsedModule, file_name: &str) -> Vec<Edit> {
    let source = parsed.src();
    let mut edits = Vec::new();

    for item in parsed.module.body.iter() {
        let decl = match item {
            ModuleItem::ModuleDecl(decl) => decl,
            ModuleItem::Stmt(_) => continue,
        };
        match decl {
            ModuleDecl::Import(ImportDecl { span, .. })
            | ModuleDecl::ExportNamed(NamedExport { span, .. })
            | ModuleDecl::ExportAll(ExportAll { span, .. }) => {
                edits.push(Edit::remove(statement_range(parsed, *span)));
            }
            ModuleDecl::ExportDecl(ExportDecl { span, .. }) => {
                let start = parsed.range(*span).start;
                if let Some(range) = keyword_prefix(source, start, &["export"])
                {
                    edits.push(Edit::remove(range));
                }
            }
            ModuleDecl::ExportDefaultDecl(ExportDefaultDecl { span, .. })
            | ModuleDecl::ExportDefaultExpr(ExportDefaultExpr {
                span, ..
            }) => {
                let start = parsed.range(*span).start;
                if let Some(range) =
                    keyword_prefix(source, start, &["export", "default"])
                {
                    edits.push(Edit::remove(range));
                }
            }
            _ => {
                log::debug!("Unsupported module declaration in {}", file_name);
            }
        }
    }

    let mut forwarding = SuperForwarding::default();
    parsed.module.visit_children_with(&mut forwarding);
    for span in forwarding.spans {
        edits.push(Edit::replace(parsed.range(span), String::from("super()")));
    }
    edits
}

/// Ranges of the string, template and regex literals once the edits
/// are applied. Literals inside a removed range are dropped.
fn literal_ranges(parsed: &ParsedModule, edits: &[Edit]) -> Vec<Range<usize>> {
    let mut literals = LiteralSpans::default();
    parsed.module.visit_children_with(&mut literals);
    literals
        .spans
        .into_iter()
        .filter_map(|span| shift_range(parsed.range(span), edits))
        .collect()
}

/// Move a range by the length change of the edits preceding it.
fn shift_range(range: Range<usize>, edits: &[Edit]) -> Option<Range<usize>> {
    let mut start = range.start as isize;
    for edit in edits {
        if edit.range.end <= range.start {
            start += edit.replacement.len() as isize - edit.range.len() as isize;
        } else if edit.range.start < range.end {
            return None;
        }
    }
    let start = start as usize;
    Some(start..start + range.len())
}

/// Range of a statement including a trailing semicolon the span does
/// not cover and the whitespace that follows it.
fn statement_range(parsed: &ParsedModule, span: Span) -> Range<usize> {
    let source = parsed.src();
    let range = parsed.range(span);
    let mut end = range.end;
    if !source[..end].ends_with(';') {
        let next = skip_whitespace(source, end);
        if source[next..].starts_with(';') {
            end = next + 1;
        }
    }
    range.start..skip_whitespace(source, end)
}

/// Range covering the leading keywords of a declaration and the
/// whitespace after each of them.
fn keyword_prefix(
    source: &str,
    start: usize,
    keywords: &[&str],
) -> Option<Range<usize>> {
    let mut end = start;
    for keyword in keywords {
        if !source[end..].starts_with(keyword) {
            return None;
        }
        end = skip_whitespace(source, end + keyword.len());
    }
    Some(start..end)
}

/// Drop full line comments and blank lines.
///
/// Lines that start inside a literal belong to the literal value and
/// are kept.
fn compact_lines(content: &str, literals: &[Range<usize>]) -> String {
    let mut lines = Vec::new();
    let mut offset = 0;
    for line in content.split('\n') {
        let start = offset;
        offset += line.len() + 1;

        let in_literal = literals.iter().any(|r| r.start < start && start < r.end);
        if !in_literal {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with("//") {
                continue;
            }
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// Collects calls of the form `super(...arguments)`.
#[derive(Default)]
struct SuperForwarding {
    spans: Vec<Span>,
}

impl Visit for SuperForwarding {
    fn visit_call_expr(&mut self, n: &CallExpr, _: &dyn Node) {
        if let ExprOrSuper::Super(_) = &n.callee {
            if let [arg] = &n.args[..] {
                let forwards = match &*arg.expr {
                    Expr::Ident(ident) => &*ident.sym == "arguments",
                    _ => false,
                };
                if arg.spread.is_some() && forwards {
                    self.spans.push(n.span);
                }
            }
        }
        n.visit_children_with(self);
    }
}

/// Collects the spans of string, template and regex literals.
#[derive(Default)]
struct LiteralSpans {
    spans: Vec<Span>,
}

impl Visit for LiteralSpans {
    fn visit_str(&mut self, n: &Str, _: &dyn Node) {
        self.spans.push(n.span);
    }

    fn visit_tpl_element(&mut self, n: &TplElement, _: &dyn Node) {
        self.spans.push(n.span);
    }

    fn visit_regex(&mut self, n: &Regex, _: &dyn Node) {
        self.spans.push(n.span);
    }
}
