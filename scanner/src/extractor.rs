use apidoc::annotation::{Annotation, BlockType};
use apidoc::block::{Block, BlockKind, TableBlock};
use apidoc::definition::{
    Definition, ExampleDefinition, MethodDefinition, ResourceDefinition, TableDefinition,
};
use apidoc::diagnostic::{Diagnostic, DiagnosticCode, has_errors};

use crate::attachment;
use crate::table_spec::{self, TableContext};

/// Definitions found in one page, plus everything worth reporting about them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Extraction {
    pub definitions: Vec<Definition>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Extraction {
    /// No diagnostic of error severity was produced.
    pub fn is_ok(&self) -> bool {
        !has_errors(&self.diagnostics)
    }

    pub fn resources(&self) -> impl Iterator<Item = &ResourceDefinition> {
        self.definitions.iter().filter_map(Definition::as_resource)
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDefinition> {
        self.definitions.iter().filter_map(Definition::as_method)
    }

    pub fn examples(&self) -> impl Iterator<Item = &ExampleDefinition> {
        self.definitions.iter().filter_map(Definition::as_example)
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableDefinition> {
        self.definitions.iter().filter_map(Definition::as_table)
    }
}

/// Interpret a page's blocks in a single forward pass, then attach tables to
/// the page's method.
///
/// `page` is the display name used as definition owner and in synthesized
/// method identifiers. `file_id` is stamped on every diagnostic.
pub fn extract(blocks: &[Block], page: &str, file_id: usize) -> Extraction {
    let mut state = ScanState::new(page);

    let mut i = 0;
    while i < blocks.len() {
        i = state.step(blocks, i);
    }

    let mut extraction = state.finish();
    let attached = attachment::attach(&mut extraction.definitions, page);
    extraction.diagnostics.extend(attached);
    for diagnostic in &mut extraction.diagnostics {
        diagnostic.file_id = file_id;
    }

    log::info!(
        "{}: {} definitions, {} diagnostics",
        page,
        extraction.definitions.len(),
        extraction.diagnostics.len()
    );
    extraction
}

// ---------------------------------------------------------------------------
// Scan state
// ---------------------------------------------------------------------------

struct ScanState<'a> {
    page: &'a str,
    /// First heading of the page. Never overwritten.
    page_title: Option<String>,
    /// First paragraph of the page. Never overwritten.
    page_description: Option<String>,
    /// Nearest header-like block seen so far, used to classify tables.
    previous_header: Option<&'a Block>,
    /// Index in `definitions` of the most recently registered request.
    open_request: Option<usize>,
    request_count: usize,
    definitions: Vec<Definition>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> ScanState<'a> {
    fn new(page: &'a str) -> Self {
        ScanState {
            page,
            page_title: None,
            page_description: None,
            previous_header: None,
            open_request: None,
            request_count: 0,
            definitions: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Interpret the block at `i` and return the index of the next unread block.
    fn step(&mut self, blocks: &'a [Block], i: usize) -> usize {
        let block = &blocks[i];
        let mut next = i + 1;

        match &block.kind {
            BlockKind::Heading(_) if self.page_title.is_none() => {
                self.diagnostics.push(
                    Diagnostic::message(
                        DiagnosticCode::PageMetadata,
                        self.page,
                        format!("found page title: {}", block.content),
                    )
                    .with_span(block.span.clone()),
                );
                self.page_title = Some(block.content.clone());
            }

            BlockKind::Paragraph { .. } if self.page_description.is_none() => {
                self.diagnostics.push(
                    Diagnostic::message(
                        DiagnosticCode::PageMetadata,
                        self.page,
                        format!("found page description: {}", block.content),
                    )
                    .with_span(block.span.clone()),
                );
                self.page_description = Some(block.content.clone());
            }

            BlockKind::Comment => {
                if let Some(code) = blocks.get(i + 1).filter(|b| b.is_code_block()) {
                    self.process_annotated_code(block, code);
                    next = i + 2;
                }
            }

            BlockKind::Table(table) => match self.previous_header {
                Some(header) => self.process_table(block, table, header),
                None => log::debug!(
                    "{}: dropping table at block {} with no header above it",
                    self.page,
                    block.index
                ),
            },

            _ => {}
        }

        if block.is_header() {
            self.previous_header = Some(block);
        }
        next
    }

    fn process_annotated_code(&mut self, comment: &Block, code: &Block) {
        let annotation = match Annotation::from_comment(&comment.content) {
            Ok(annotation) => annotation,
            Err(err) => {
                self.diagnostics.push(
                    Diagnostic::error(DiagnosticCode::MalformedAnnotation, self.page, err.to_string())
                        .with_span(comment.span.clone()),
                );
                return;
            }
        };

        log::debug!(
            "{}: {:?} annotation at block {}",
            self.page,
            annotation.block_type,
            comment.index
        );

        match &annotation.block_type {
            BlockType::Resource => self.register_resource(comment, code, &annotation),
            BlockType::Request => self.register_request(code, &annotation),
            BlockType::Response => self.attach_response(comment, code, &annotation),
            BlockType::Example => self.register_example(code, &annotation),
            BlockType::Ignored => {}
            BlockType::Unsupported(name) => {
                self.diagnostics.push(
                    Diagnostic::error(
                        DiagnosticCode::UnsupportedAnnotationBlockType,
                        self.page,
                        format!("unsupported annotation block type \"{}\"", name),
                    )
                    .with_span(comment.span.clone()),
                );
            }
        }
    }

    fn register_resource(&mut self, comment: &Block, code: &Block, annotation: &Annotation) {
        let Some(resource_type) = annotation.resource_type.clone() else {
            self.diagnostics.push(
                Diagnostic::error(
                    DiagnosticCode::MissingAnnotationField,
                    self.page,
                    "resource annotation has no @odata.type",
                )
                .with_span(comment.span.clone()),
            );
            return;
        };

        self.definitions.push(Definition::Resource(ResourceDefinition {
            title: annotation.title.clone().or_else(|| self.page_title.clone()),
            description: annotation
                .description
                .clone()
                .or_else(|| self.page_description.clone()),
            resource_type,
            key_property: annotation.key_property.clone(),
            optional_properties: annotation.optional_properties.clone(),
            raw_body: code.content.clone(),
            owner: self.page.to_string(),
        }));
    }

    fn register_request(&mut self, code: &Block, annotation: &Annotation) {
        let identifier = annotation
            .method
            .clone()
            .unwrap_or_else(|| format!("{} #{}", self.page, self.request_count));
        self.request_count += 1;

        let method = MethodDefinition::from_request(identifier, &code.content, annotation, self.page);
        self.open_request = Some(self.definitions.len());
        self.definitions.push(Definition::Method(method));
    }

    fn attach_response(&mut self, comment: &Block, code: &Block, annotation: &Annotation) {
        let method = self
            .open_request
            .and_then(|index| self.definitions.get_mut(index))
            .and_then(Definition::as_method_mut);

        match method {
            Some(method) => method.add_expected_response(&code.content, annotation),
            None => {
                self.diagnostics.push(
                    Diagnostic::error(
                        DiagnosticCode::OrphanedResponse,
                        self.page,
                        "response block has no preceding request in this page",
                    )
                    .with_span(comment.span.clone()),
                );
            }
        }
    }

    fn register_example(&mut self, code: &Block, annotation: &Annotation) {
        self.definitions.push(Definition::Example(ExampleDefinition {
            title: annotation.title.clone(),
            description: annotation.description.clone(),
            language: code.language().map(str::to_string),
            raw_body: code.content.clone(),
            owner: self.page.to_string(),
        }));
    }

    fn process_table(&mut self, block: &Block, table: &TableBlock, header: &Block) {
        let context = TableContext {
            has_resource: self
                .definitions
                .iter()
                .any(|d| matches!(d, Definition::Resource(_))),
            has_request: self.open_request.is_some(),
        };
        let (definition, diagnostics) =
            table_spec::parse_table_spec(block, table, header, context, self.page);
        self.diagnostics.extend(diagnostics);
        self.definitions.push(Definition::Table(definition));
    }

    fn finish(self) -> Extraction {
        Extraction {
            definitions: self.definitions,
            diagnostics: self.diagnostics,
        }
    }
}
