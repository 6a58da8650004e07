use apidoc::block::{Block, TableBlock};
use apidoc::definition::{
    EnumValueDefinition, ErrorDefinition, ParameterDefinition, ParameterLocation,
    PropertyDefinition, Row, TableBlockType, TableDefinition,
};
use apidoc::diagnostic::{Diagnostic, DiagnosticCode};

/// Page state that decides what an ambiguous `Properties` heading means.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableContext {
    /// A resource definition was registered earlier in the page.
    pub has_resource: bool,
    /// A request method is open for responses.
    pub has_request: bool,
}

/// Classify a table from the text of its preceding header.
pub fn classify(header: &str, context: TableContext) -> TableBlockType {
    match normalize_header(header).as_str() {
        "error responses" | "error codes" => TableBlockType::ErrorCodes,
        "path parameters" => TableBlockType::PathParameters,
        "query string parameters" | "query parameters" | "optional query parameters" => {
            TableBlockType::QueryStringParameters
        }
        "http request headers" | "request headers" => TableBlockType::HttpHeaders,
        "request body" => TableBlockType::RequestObjectProperties,
        "response body" => TableBlockType::ResponseObjectProperties,
        "properties" if context.has_request && !context.has_resource => {
            TableBlockType::ResponseObjectProperties
        }
        "properties" => TableBlockType::ResourcePropertyDescriptions,
        "enumeration values" | "enumerated values" => TableBlockType::EnumerationValues,
        _ => TableBlockType::Unknown,
    }
}

/// Convert a table block into a typed table definition.
///
/// Problems are reported and never abort the conversion: unknown headers keep
/// raw rows, and short rows are padded with empty cells.
pub fn parse_table_spec(
    table_block: &Block,
    table: &TableBlock,
    header: &Block,
    context: TableContext,
    page: &str,
) -> (TableDefinition, Vec<Diagnostic>) {
    let table_type = classify(&header.content, context);
    let columns = table_type.columns();
    let mut diagnostics = Vec::new();

    if table_type == TableBlockType::Unknown {
        diagnostics.push(
            Diagnostic::warning(
                DiagnosticCode::UnknownTableType,
                page,
                format!("cannot classify table under header \"{}\"", header.content),
            )
            .with_span(table_block.span.clone()),
        );
    } else if table.headers.len() != columns.len() {
        diagnostics.push(
            Diagnostic::error(
                DiagnosticCode::TableColumnMismatch,
                page,
                format!(
                    "\"{}\" table has {} columns, expected {} ({})",
                    header.content,
                    table.headers.len(),
                    columns.len(),
                    columns.join(", ")
                ),
            )
            .with_span(table_block.span.clone()),
        );
    }

    let mut rows = Vec::with_capacity(table.rows.len());
    for (n, cells) in table.rows.iter().enumerate() {
        if !columns.is_empty() && cells.len() != columns.len() {
            diagnostics.push(
                Diagnostic::error(
                    DiagnosticCode::TableColumnMismatch,
                    page,
                    format!(
                        "row {} of \"{}\" table has {} cells, expected {}",
                        n + 1,
                        header.content,
                        cells.len(),
                        columns.len()
                    ),
                )
                .with_span(table_block.span.clone()),
            );
        }
        rows.push(build_row(table_type, cells));
    }

    log::debug!(
        "{}: table \"{}\" classified as {:?} with {} rows",
        page,
        header.content,
        table_type,
        rows.len()
    );

    let definition = TableDefinition {
        table_type,
        title: header.content.clone(),
        headers: table.headers.clone(),
        rows,
    };
    (definition, diagnostics)
}

fn build_row(table_type: TableBlockType, cells: &[String]) -> Row {
    let cell = |i: usize| cells.get(i).cloned().unwrap_or_default();

    match table_type {
        TableBlockType::ErrorCodes => Row::Error(ErrorDefinition {
            http_status_code: cell(0),
            error_code: cell(1),
            description: cell(2),
        }),
        TableBlockType::PathParameters | TableBlockType::QueryStringParameters => {
            let description = cell(2);
            let location = if table_type == TableBlockType::PathParameters {
                ParameterLocation::Path
            } else {
                ParameterLocation::QueryString
            };
            Row::Parameter(ParameterDefinition {
                name: cell(0),
                type_name: cell(1),
                required: location == ParameterLocation::Path || is_required(&description),
                description,
                location,
            })
        }
        TableBlockType::HttpHeaders => {
            let description = cell(1);
            Row::Parameter(ParameterDefinition {
                name: cell(0),
                type_name: "string".to_string(),
                required: is_required(&description),
                description,
                location: ParameterLocation::Header,
            })
        }
        TableBlockType::RequestObjectProperties
        | TableBlockType::ResponseObjectProperties
        | TableBlockType::ResourcePropertyDescriptions => Row::Property(PropertyDefinition {
            name: cell(0),
            type_name: cell(1),
            description: cell(2),
        }),
        TableBlockType::EnumerationValues => Row::EnumValue(EnumValueDefinition {
            value: cell(0),
            description: cell(1),
        }),
        TableBlockType::Unknown => Row::Raw(cells.to_vec()),
    }
}

fn normalize_header(header: &str) -> String {
    header
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end_matches(':')
        .trim_end()
        .to_lowercase()
}

fn is_required(description: &str) -> bool {
    description.to_lowercase().starts_with("required")
}
