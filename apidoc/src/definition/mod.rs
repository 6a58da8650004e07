pub mod table;

pub use table::{
    EnumValueDefinition, ErrorDefinition, ParameterDefinition, ParameterLocation,
    PropertyDefinition, Row, TableBlockType, TableDefinition,
};

use crate::annotation::Annotation;

/// An API concept materialized from one or two blocks of a page.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Resource(ResourceDefinition),
    Method(MethodDefinition),
    Example(ExampleDefinition),
    Table(TableDefinition),
}

impl Definition {
    pub fn as_resource(&self) -> Option<&ResourceDefinition> {
        match self {
            Definition::Resource(resource) => Some(resource),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&MethodDefinition> {
        match self {
            Definition::Method(method) => Some(method),
            _ => None,
        }
    }

    pub fn as_method_mut(&mut self) -> Option<&mut MethodDefinition> {
        match self {
            Definition::Method(method) => Some(method),
            _ => None,
        }
    }

    pub fn as_example(&self) -> Option<&ExampleDefinition> {
        match self {
            Definition::Example(example) => Some(example),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&TableDefinition> {
        match self {
            Definition::Table(table) => Some(table),
            _ => None,
        }
    }
}

/// A resource type described by a JSON code block.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDefinition {
    pub title: Option<String>,
    pub description: Option<String>,
    /// The `@odata.type` of the resource.
    pub resource_type: String,
    pub key_property: Option<String>,
    pub optional_properties: Vec<String>,
    pub raw_body: String,
    /// Display name of the page that defined it.
    pub owner: String,
}

/// An HTTP request and the responses the documentation promises for it.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDefinition {
    /// Annotation `name`, or `"<page> #<n>"` when the annotation has none.
    /// Not guaranteed to be unique across pages.
    pub identifier: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub http_method: Option<String>,
    pub request_url: Option<String>,
    pub request_body: String,
    pub expected_responses: Vec<ExpectedResponse>,
    pub parameters: Vec<ParameterDefinition>,
    pub errors: Vec<ErrorDefinition>,
    pub owner: String,
}

impl MethodDefinition {
    pub fn from_request(
        identifier: String,
        request_body: &str,
        annotation: &Annotation,
        owner: &str,
    ) -> Self {
        let (http_method, request_url) = match parse_request_line(request_body) {
            Some((method, url)) => (Some(method), Some(url)),
            None => (None, None),
        };
        MethodDefinition {
            identifier,
            title: annotation.title.clone(),
            description: annotation.description.clone(),
            http_method,
            request_url,
            request_body: request_body.to_string(),
            expected_responses: Vec::new(),
            parameters: Vec::new(),
            errors: Vec::new(),
            owner: owner.to_string(),
        }
    }

    pub fn add_expected_response(&mut self, body: &str, annotation: &Annotation) {
        self.expected_responses.push(ExpectedResponse {
            status_code: parse_status_code(body),
            resource_type: annotation.resource_type.clone(),
            is_collection: annotation.is_collection,
            truncated: annotation.truncated,
            raw_body: body.to_string(),
        });
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedResponse {
    pub status_code: Option<u16>,
    pub resource_type: Option<String>,
    pub is_collection: bool,
    pub truncated: bool,
    pub raw_body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExampleDefinition {
    pub title: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub raw_body: String,
    pub owner: String,
}

/// Split `GET /users/{id} HTTP/1.1` into method and URL.
fn parse_request_line(body: &str) -> Option<(String, String)> {
    let line = body.lines().find(|l| !l.trim().is_empty())?;
    let mut parts = line.split_whitespace();
    let method = parts.next()?;
    let url = parts.next()?;
    if !method.chars().all(|c| c.is_ascii_uppercase()) {
        return None;
    }
    Some((method.to_string(), url.to_string()))
}

/// Read the status code from an `HTTP/1.1 200 OK` status line.
fn parse_status_code(body: &str) -> Option<u16> {
    let line = body.lines().find(|l| !l.trim().is_empty())?;
    let mut parts = line.split_whitespace();
    if !parts.next()?.starts_with("HTTP/") {
        return None;
    }
    parts.next()?.parse().ok()
}
