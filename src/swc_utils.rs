//! Helpers to get a handler or parser and to edit source text by span.
use std::ops::Range;

use anyhow::{anyhow, Result};

use swc_common::{
    errors::{emitter::ColorConfig, Handler},
    sync::Lrc,
    FileName, SourceFile, SourceMap, Span,
};
use swc_ecma_ast::{EsVersion, Module};
use swc_ecma_parser::{lexer::Lexer, Parser, StringInput, Syntax, TsConfig};

/// Module source parsed into an AST.
pub(crate) struct ParsedModule {
    pub source_file: Lrc<SourceFile>,
    pub module: Module,
}

impl ParsedModule {
    /// Byte range in the source text covered by a span.
    pub fn range(&self, span: Span) -> Range<usize> {
        let start = self.source_file.start_pos.0;
        (span.lo.0 - start) as usize..(span.hi.0 - start) as usize
    }

    /// The source text.
    pub fn src(&self) -> &str {
        &self.source_file.src
    }
}

pub(crate) fn get_handler() -> (Lrc<SourceMap>, Handler) {
    let sm: Lrc<SourceMap> = Default::default();
    let handler = Handler::with_tty_emitter(
        ColorConfig::Auto,
        true,
        false,
        Some(sm.clone()),
    );
    (sm, handler)
}

pub(crate) fn get_parser<'a>(
    fm: &'a SourceFile,
) -> Parser<Lexer<'a, StringInput<'a>>> {
    let lexer = Lexer::new(
        // Accepts compiled javascript as well as typescript
        Syntax::Typescript(TsConfig::default()),
        EsVersion::Es2020,
        StringInput::from(fm),
        None,
    );
    Parser::new_from(lexer)
}

/// Parse module source text.
///
/// Parser diagnostics are emitted to the terminal before the error is
/// returned.
pub(crate) fn parse_module(name: &str, source: &str) -> Result<ParsedModule> {
    let (sm, handler) = get_handler();
    let fm = sm.new_source_file(
        FileName::Custom(name.to_string()),
        source.to_string(),
    );

    let (result, errors) = {
        let mut parser = get_parser(&*fm);
        let result = parser.parse_module();
        (result, parser.take_errors())
    };
    for e in errors {
        e.into_diagnostic(&handler).emit();
    }

    let module = result.map_err(|e| {
        let message = format!("Failed to parse module {}: {:?}", name, e);
        e.into_diagnostic(&handler).emit();
        anyhow!(message)
    })?;

    Ok(ParsedModule {
        source_file: fm,
        module,
    })
}

/// Replacement of a byte range in a source text.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct Edit {
    pub range: Range<usize>,
    pub replacement: String,
}

impl Edit {
    pub fn remove(range: Range<usize>) -> Self {
        Self {
            range,
            replacement: String::new(),
        }
    }

    pub fn replace(range: Range<usize>, replacement: String) -> Self {
        Self { range, replacement }
    }
}

/// Apply non-overlapping edits, text outside them is copied verbatim.
pub(crate) fn apply_edits(source: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by_key(|e| e.range.start);
    let mut output = String::with_capacity(source.len());
    let mut position = 0;
    for edit in edits {
        if edit.range.start < position {
            log::trace!("Skipped overlapping edit at {}", edit.range.start);
            continue;
        }
        output.push_str(&source[position..edit.range.start]);
        output.push_str(&edit.replacement);
        position = edit.range.end;
    }
    output.push_str(&source[position..]);
    output
}

/// Offset just past any whitespace following `offset`.
pub(crate) fn skip_whitespace(source: &str, offset: usize) -> usize {
    let rest = &source[offset..];
    offset + (rest.len() - rest.trim_start().len())
}
