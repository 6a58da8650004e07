use apidoc::definition::{Definition, TableBlockType, TableDefinition};
use apidoc::diagnostic::{Diagnostic, DiagnosticCode};

/// Merge the page's error and parameter tables into its method.
///
/// Only pages with exactly one method are handled. With zero or several
/// methods there is no way to tell which method a table belongs to, and
/// nothing is attached or reported.
pub fn attach(definitions: &mut [Definition], page: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let methods: Vec<usize> = definitions
        .iter()
        .enumerate()
        .filter_map(|(i, d)| d.as_method().map(|_| i))
        .collect();
    let &[method_index] = methods.as_slice() else {
        log::debug!("{}: {} methods, skipping table attachment", page, methods.len());
        return diagnostics;
    };

    let tables: Vec<TableDefinition> = definitions
        .iter()
        .filter_map(Definition::as_table)
        .filter(|t| {
            t.table_type == TableBlockType::ErrorCodes || t.table_type.parameter_location().is_some()
        })
        .cloned()
        .collect();

    let Some(method) = definitions[method_index].as_method_mut() else {
        return diagnostics;
    };

    for table in tables {
        let attached = if table.table_type == TableBlockType::ErrorCodes {
            method.errors = table.errors().cloned().collect();
            method.errors.len()
        } else {
            let before = method.parameters.len();
            method.parameters.extend(table.parameters().cloned());
            method.parameters.len() - before
        };

        diagnostics.push(Diagnostic::message(
            DiagnosticCode::DefinitionAttached,
            page,
            format!(
                "attached {} rows from \"{}\" to {}",
                attached, table.title, method.identifier
            ),
        ));
    }

    diagnostics
}
