use std::ops::Range;

use pulldown_cmark::{
    BrokenLink, CodeBlockKind, Event, HeadingLevel, LinkType, Options, Parser as CmarkParser,
    Tag, TagEnd,
};

use crate::Document;
use crate::block::{Block, BlockKind, LinkRef, TableBlock};
use crate::diagnostic::{Diagnostic, DiagnosticCode};

type Events<'a> = [(Event<'a>, Range<usize>)];

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Tokenize Markdown source text into top-level blocks plus every link.
pub fn parse_document(source: &str, file_id: usize) -> Result<Document, Vec<Diagnostic>> {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES;

    // Shortcut references (`[text]`) are ordinary prose when undefined; only
    // explicit `[text][id]` and `[text][]` forms count as dangling links.
    let mut dangling = Vec::new();
    let events: Vec<(Event<'_>, Range<usize>)> = CmarkParser::new_with_broken_link_callback(
        source,
        options,
        Some(|link: BrokenLink<'_>| {
            if matches!(link.link_type, LinkType::Reference | LinkType::Collapsed) {
                dangling.push(LinkRef::dangling(
                    reference_text(&source[link.span.clone()]),
                    link.reference.to_string(),
                    link.span.clone(),
                ));
            }
            None
        }),
    )
    .into_offset_iter()
    .collect();

    let mut state = ParseState::new(source, file_id);
    state.process_events(&events);
    state.links = collect_links(&events);
    state.finalize(dangling)
}

/// Link text of a `[text][id]` or `[text][]` source slice.
fn reference_text(raw: &str) -> &str {
    let inner = raw.strip_prefix('[').unwrap_or(raw);
    match inner.rfind("][") {
        Some(end) => &inner[..end],
        None => inner.strip_suffix(']').unwrap_or(inner),
    }
}

// ---------------------------------------------------------------------------
// Parse state
// ---------------------------------------------------------------------------

struct ParseState<'a> {
    source: &'a str,
    file_id: usize,
    blocks: Vec<Block>,
    links: Vec<LinkRef>,
    errors: Vec<Diagnostic>,
}

impl<'a> ParseState<'a> {
    fn new(source: &'a str, file_id: usize) -> Self {
        ParseState {
            source,
            file_id,
            blocks: Vec::new(),
            links: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn push(&mut self, kind: BlockKind, content: String, span: Range<usize>) {
        let index = self.blocks.len();
        self.blocks.push(Block {
            kind,
            content,
            index,
            span,
        });
    }

    fn process_events(&mut self, events: &Events<'_>) {
        let mut i = 0;

        while i < events.len() {
            let (ref ev, ref range) = events[i];

            match ev {
                Event::Start(Tag::Heading { level, .. }) => {
                    let level = heading_level_to_u8(level);
                    i += 1;
                    let (text, _) =
                        collect_inline_text(events, &mut i, |e| matches!(e, TagEnd::Heading(_)));
                    self.push(BlockKind::Heading(level), normalize_text(&text), range.clone());
                }

                Event::Start(Tag::Paragraph) => {
                    i += 1;
                    let (text, strong) =
                        collect_inline_text(events, &mut i, |e| matches!(e, TagEnd::Paragraph));
                    self.push(
                        BlockKind::Paragraph { strong },
                        normalize_text(&text),
                        range.clone(),
                    );
                }

                Event::Start(Tag::CodeBlock(kind)) => {
                    let language = match kind {
                        CodeBlockKind::Fenced(lang) => {
                            let lang = lang.trim().to_string();
                            if lang.is_empty() { None } else { Some(lang) }
                        }
                        CodeBlockKind::Indented => None,
                    };
                    i += 1;
                    let content = collect_text_until(events, &mut i, |e| {
                        matches!(e, TagEnd::CodeBlock)
                    });
                    self.push(BlockKind::CodeBlock { language }, content, range.clone());
                }

                Event::Start(Tag::HtmlBlock) => {
                    i += 1;
                    let html = collect_html(events, &mut i);
                    let trimmed = html.trim_start();
                    if trimmed.starts_with("<!--") {
                        if !trimmed.contains("-->") {
                            self.errors.push(
                                Diagnostic::error(
                                    DiagnosticCode::MarkdownParserError,
                                    "markdown",
                                    "unterminated HTML comment",
                                )
                                .with_span(range.clone())
                                .with_file(self.file_id),
                            );
                        }
                        self.push(BlockKind::Comment, html, range.clone());
                    }
                }

                Event::Start(Tag::Table(_)) => {
                    i += 1;
                    let table = collect_table(events, &mut i);
                    let content = self.source[range.clone()].to_string();
                    self.push(BlockKind::Table(table), content, range.clone());
                }

                // Lists, block quotes and footnotes are containers; their inner
                // blocks are not top-level and are skipped wholesale.
                Event::Start(_) => {
                    i += 1;
                    skip_container(events, &mut i);
                }

                _ => {
                    i += 1;
                }
            }
        }
    }

    fn finalize(mut self, dangling: Vec<LinkRef>) -> Result<Document, Vec<Diagnostic>> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }

        self.links.extend(dangling);
        self.links.sort_by_key(|link| link.span.start);

        log::debug!(
            "tokenized {} blocks and {} links",
            self.blocks.len(),
            self.links.len()
        );

        Ok(Document {
            blocks: self.blocks,
            links: self.links,
            source_id: self.file_id,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn heading_level_to_u8(level: &HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Collapse interior whitespace and strip the ends.
fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Flatten inline events up to the matching end tag.
///
/// The flag is true when the text is non-empty and every visible character
/// sits inside `**strong**` emphasis.
fn collect_inline_text(
    events: &Events<'_>,
    i: &mut usize,
    is_end: impl Fn(&TagEnd) -> bool,
) -> (String, bool) {
    let mut text = String::new();
    let mut strong_depth = 0u32;
    let mut all_strong = true;

    while *i < events.len() {
        let (ref ev, _) = events[*i];
        *i += 1;
        match ev {
            Event::End(tag_end) if is_end(tag_end) => break,
            Event::Start(Tag::Strong) => strong_depth += 1,
            Event::End(TagEnd::Strong) => strong_depth = strong_depth.saturating_sub(1),
            Event::Text(s) | Event::Code(s) => {
                if strong_depth == 0 && !s.trim().is_empty() {
                    all_strong = false;
                }
                text.push_str(s);
            }
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }

    let strong = all_strong && !text.trim().is_empty();
    (text, strong)
}

/// Collect all text content until a matching End tag.
fn collect_text_until(
    events: &Events<'_>,
    i: &mut usize,
    is_end: impl Fn(&TagEnd) -> bool,
) -> String {
    let mut text = String::new();
    while *i < events.len() {
        let (ref ev, _) = events[*i];
        *i += 1;
        match ev {
            Event::End(tag_end) if is_end(tag_end) => break,
            Event::Text(s) => text.push_str(s),
            _ => {}
        }
    }
    text
}

fn collect_html(events: &Events<'_>, i: &mut usize) -> String {
    let mut html = String::new();
    while *i < events.len() {
        let (ref ev, _) = events[*i];
        *i += 1;
        match ev {
            Event::End(TagEnd::HtmlBlock) => break,
            Event::Html(s) | Event::Text(s) => html.push_str(s),
            _ => {}
        }
    }
    html
}

/// Collect table headers and rows as trimmed cell text.
fn collect_table(events: &Events<'_>, i: &mut usize) -> TableBlock {
    let mut table = TableBlock::default();
    let mut in_head = false;
    let mut current_row: Vec<String> = Vec::new();

    while *i < events.len() {
        let (ref ev, _) = events[*i];
        match ev {
            Event::End(TagEnd::Table) => {
                *i += 1;
                break;
            }
            Event::Start(Tag::TableHead) => {
                in_head = true;
                *i += 1;
            }
            Event::End(TagEnd::TableHead) => {
                in_head = false;
                table.headers = std::mem::take(&mut current_row);
                *i += 1;
            }
            Event::Start(Tag::TableRow) => {
                current_row = Vec::new();
                *i += 1;
            }
            Event::End(TagEnd::TableRow) => {
                if !in_head {
                    table.rows.push(std::mem::take(&mut current_row));
                }
                *i += 1;
            }
            Event::Start(Tag::TableCell) => {
                *i += 1;
                let (cell, _) =
                    collect_inline_text(events, i, |e| matches!(e, TagEnd::TableCell));
                current_row.push(normalize_text(&cell));
            }
            _ => {
                *i += 1;
            }
        }
    }

    table
}

/// Advance past the end of a container whose start tag was just consumed.
fn skip_container(events: &Events<'_>, i: &mut usize) {
    let mut depth = 1u32;
    while *i < events.len() && depth > 0 {
        match events[*i].0 {
            Event::Start(_) => depth += 1,
            Event::End(_) => depth -= 1,
            _ => {}
        }
        *i += 1;
    }
}

/// Every resolved link in the document, wherever it is nested.
fn collect_links(events: &Events<'_>) -> Vec<LinkRef> {
    let mut links = Vec::new();
    let mut i = 0;

    while i < events.len() {
        let (ref ev, ref range) = events[i];
        i += 1;
        if let Event::Start(Tag::Link {
            link_type,
            dest_url,
            id,
            ..
        }) = ev
        {
            let (text, _) = collect_inline_text(events, &mut i, |e| matches!(e, TagEnd::Link));
            let url = match link_type {
                LinkType::Email => format!("mailto:{}", dest_url),
                _ => dest_url.to_string(),
            };
            let mut link = LinkRef::new(normalize_text(&text), url, range.clone());
            if !id.is_empty() {
                link.reference = Some(id.to_string());
            }
            links.push(link);
        }
    }

    links
}
