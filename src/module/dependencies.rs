//! Extract the dependency specifiers declared by a module.
use swc_ecma_ast::{Module, ModuleDecl, ModuleItem};

/// Collect the specifiers of import and re-export declarations in
/// source order.
///
/// Dynamic `import()` expressions are not declarations and are ignored.
pub fn analyze_dependencies(module: &Module) -> Vec<String> {
    module
        .body
        .iter()
        .filter_map(|item| match item {
            ModuleItem::ModuleDecl(decl) => match decl {
                ModuleDecl::Import(import) => Some(&import.src),
                ModuleDecl::ExportNamed(export) => export.src.as_ref(),
                ModuleDecl::ExportAll(export) => Some(&export.src),
                _ => None,
            },
            _ => None,
        })
        .map(|src| src.value.to_string())
        .collect()
}
