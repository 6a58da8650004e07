use apidoc::Document;
use apidoc::definition::{ParameterLocation, Row, TableBlockType};
use apidoc::diagnostic::{DiagnosticCode, Severity};
use pretty_assertions::assert_eq;
use scanner::extractor::{Extraction, extract};

fn parse(source: &str) -> Document {
    apidoc::parser::Parser::new(source.to_string(), 0)
        .parse()
        .expect("parse failed")
}

fn run(source: &str, page: &str) -> Extraction {
    let doc = parse(source);
    extract(&doc.blocks, page, doc.source_id)
}

fn codes(extraction: &Extraction, severity: Severity) -> Vec<DiagnosticCode> {
    extraction
        .diagnostics
        .iter()
        .filter(|d| d.severity == severity)
        .map(|d| d.code)
        .collect()
}

const RESOURCE_PAGE: &str = r#"# user resource type

Represents an Azure AD user account.

<!-- { "blockType": "resource", "@odata.type": "microsoft.graph.user", "keyProperty": "id" } -->
```json
{
  "id": "string",
  "displayName": "string"
}
```

## Properties

| Property | Type | Description |
|:---------|:-----|:------------|
| id | String | The unique identifier for the user. |
| displayName | String | The name displayed in the address book. |
"#;

const METHOD_PAGE: &str = r#"# Get user

Retrieve the properties and relationships of a user.

<!-- { "blockType": "request", "name": "get_user" } -->
```http
GET https://graph.microsoft.com/v1.0/users/{id}
```

## Path parameters

| Name | Type | Description |
|:-----|:-----|:------------|
| id | string | The user id. |

## Optional query parameters

| Name | Type | Description |
|:-----|:-----|:------------|
| $select | string | Properties to return. |

## Request headers

| Name | Description |
|:-----|:------------|
| Authorization | Required. Bearer {token}. |

## Error responses

| HTTP status code | Error code | Description |
|:-----------------|:-----------|:------------|
| 404 | itemNotFound | The user does not exist. |

<!-- { "blockType": "response", "@odata.type": "microsoft.graph.user", "truncated": true } -->
```http
HTTP/1.1 200 OK
Content-type: application/json

{ "id": "1" }
```
"#;

#[test]
fn resource_takes_page_title_and_description() {
    let extraction = run(RESOURCE_PAGE, "resources/user.md");
    assert!(extraction.is_ok(), "{:?}", extraction.diagnostics);

    let resources: Vec<_> = extraction.resources().collect();
    assert_eq!(resources.len(), 1);
    let user = resources[0];
    assert_eq!(user.resource_type, "microsoft.graph.user");
    assert_eq!(user.title.as_deref(), Some("user resource type"));
    assert_eq!(
        user.description.as_deref(),
        Some("Represents an Azure AD user account.")
    );
    assert_eq!(user.key_property.as_deref(), Some("id"));
    assert_eq!(user.owner, "resources/user.md");
    assert!(user.raw_body.contains("displayName"));

    let tables: Vec<_> = extraction.tables().collect();
    assert_eq!(tables.len(), 1);
    assert_eq!(
        tables[0].table_type,
        TableBlockType::ResourcePropertyDescriptions
    );
    let names: Vec<_> = tables[0]
        .properties()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["id", "displayName"]);
}

#[test]
fn page_metadata_is_reported_as_messages() {
    let extraction = run(RESOURCE_PAGE, "user.md");
    let metadata: Vec<_> = extraction
        .diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::PageMetadata)
        .collect();
    assert_eq!(metadata.len(), 2);
    assert!(metadata.iter().all(|d| d.severity == Severity::Note));
}

#[test]
fn request_and_response_make_one_method() {
    let extraction = run(METHOD_PAGE, "api/user-get.md");
    assert!(extraction.is_ok(), "{:?}", extraction.diagnostics);

    let methods: Vec<_> = extraction.methods().collect();
    assert_eq!(methods.len(), 1);
    let method = methods[0];
    assert_eq!(method.identifier, "get_user");
    assert_eq!(method.http_method.as_deref(), Some("GET"));
    assert_eq!(
        method.request_url.as_deref(),
        Some("https://graph.microsoft.com/v1.0/users/{id}")
    );

    assert_eq!(method.expected_responses.len(), 1);
    let response = &method.expected_responses[0];
    assert_eq!(response.status_code, Some(200));
    assert_eq!(response.resource_type.as_deref(), Some("microsoft.graph.user"));
    assert!(response.truncated);
    assert!(!response.is_collection);
}

#[test]
fn tables_attach_to_the_only_method() {
    let extraction = run(METHOD_PAGE, "api/user-get.md");
    let method = extraction.methods().next().expect("no method");

    let locations: Vec<_> = method
        .parameters
        .iter()
        .map(|p| (p.name.as_str(), p.location, p.required))
        .collect();
    assert_eq!(
        locations,
        vec![
            ("id", ParameterLocation::Path, true),
            ("$select", ParameterLocation::QueryString, false),
            ("Authorization", ParameterLocation::Header, true),
        ]
    );
    assert_eq!(method.parameters[2].type_name, "string");

    assert_eq!(method.errors.len(), 1);
    assert_eq!(method.errors[0].http_status_code, "404");
    assert_eq!(method.errors[0].error_code, "itemNotFound");

    let attached = extraction
        .diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::DefinitionAttached)
        .count();
    assert_eq!(attached, 4);
}

#[test]
fn error_table_leaves_parameters_alone() {
    let src = r#"# Delete user

<!-- { "blockType": "request" } -->
```http
DELETE /users/{id}
```

## Error codes

| HTTP status code | Error code | Description |
|:--|:--|:--|
| 403 | accessDenied | Not allowed. |
| 404 | itemNotFound | Missing. |
"#;
    let extraction = run(src, "user-delete.md");
    let method = extraction.methods().next().expect("no method");
    assert_eq!(method.errors.len(), 2);
    assert!(method.parameters.is_empty());
}

#[test]
fn several_methods_get_no_tables() {
    let src = r#"# Users

<!-- { "blockType": "request" } -->
```http
GET /users
```

<!-- { "blockType": "request" } -->
```http
POST /users
```

## Error responses

| HTTP status code | Error code | Description |
|:--|:--|:--|
| 400 | badRequest | Bad input. |
"#;
    let extraction = run(src, "users.md");
    let methods: Vec<_> = extraction.methods().collect();
    assert_eq!(methods.len(), 2);
    for method in methods {
        assert!(method.errors.is_empty());
        assert!(method.parameters.is_empty());
    }
    assert!(extraction.is_ok());
    assert!(
        !extraction
            .diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::DefinitionAttached)
    );
}

#[test]
fn default_identifiers_count_requests_in_the_page() {
    let src = r#"# Users

<!-- { "blockType": "request" } -->
```http
GET /users
```

<!-- { "blockType": "request", "name": "create_user" } -->
```http
POST /users
```

<!-- { "blockType": "request" } -->
```http
GET /users/delta
```
"#;
    let extraction = run(src, "users.md");
    let ids: Vec<_> = extraction
        .methods()
        .map(|m| m.identifier.as_str())
        .collect();
    assert_eq!(ids, vec!["users.md #0", "create_user", "users.md #2"]);
}

#[test]
fn orphaned_response_is_an_error() {
    let src = r#"# Nothing requested

<!-- { "blockType": "response" } -->
```http
HTTP/1.1 204 No Content
```
"#;
    let extraction = run(src, "orphan.md");
    assert!(!extraction.is_ok());
    assert_eq!(
        codes(&extraction, Severity::Error),
        vec![DiagnosticCode::OrphanedResponse]
    );
    assert_eq!(extraction.methods().count(), 0);
}

#[test]
fn responses_attach_to_the_latest_request() {
    let src = r#"# Users

<!-- { "blockType": "request", "name": "first" } -->
```http
GET /users
```

<!-- { "blockType": "request", "name": "second" } -->
```http
GET /groups
```

<!-- { "blockType": "response", "isCollection": true } -->
```http
HTTP/1.1 200 OK
```
"#;
    let extraction = run(src, "users.md");
    let methods: Vec<_> = extraction.methods().collect();
    assert!(methods[0].expected_responses.is_empty());
    assert_eq!(methods[1].expected_responses.len(), 1);
    assert!(methods[1].expected_responses[0].is_collection);
}

#[test]
fn malformed_annotation_does_not_stop_the_page() {
    let src = r#"# Broken

<!-- { "blockType": -->
```json
{}
```

<!-- { "blockType": "request" } -->
```http
GET /me
```
"#;
    let extraction = run(src, "broken.md");
    assert_eq!(
        codes(&extraction, Severity::Error),
        vec![DiagnosticCode::MalformedAnnotation]
    );
    assert_eq!(extraction.methods().count(), 1);
}

#[test]
fn unsupported_block_type_is_reported() {
    let src = r#"# Odd

<!-- { "blockType": "sample" } -->
```json
{}
```
"#;
    let extraction = run(src, "odd.md");
    assert_eq!(
        codes(&extraction, Severity::Error),
        vec![DiagnosticCode::UnsupportedAnnotationBlockType]
    );
    assert!(extraction.definitions.is_empty());
}

#[test]
fn resource_without_type_is_not_registered() {
    let src = r#"# Untyped

<!-- { "blockType": "resource" } -->
```json
{}
```
"#;
    let extraction = run(src, "untyped.md");
    assert_eq!(
        codes(&extraction, Severity::Error),
        vec![DiagnosticCode::MissingAnnotationField]
    );
    assert_eq!(extraction.resources().count(), 0);
}

#[test]
fn ignored_and_example_blocks() {
    let src = r#"# Samples

<!-- { "blockType": "ignored" } -->
```json
{ "skip": true }
```

<!-- { "blockType": "example", "title": "Create a user" } -->
```csharp
var user = new User();
```
"#;
    let extraction = run(src, "samples.md");
    assert!(extraction.is_ok());
    let examples: Vec<_> = extraction.examples().collect();
    assert_eq!(examples.len(), 1);
    assert_eq!(examples[0].title.as_deref(), Some("Create a user"));
    assert_eq!(examples[0].language.as_deref(), Some("csharp"));
    assert_eq!(extraction.definitions.len(), 1);
}

#[test]
fn unknown_table_keeps_raw_rows() {
    let src = r#"# Notes

## Permissions

| Permission type | Permissions |
|:--|:--|
| Delegated | User.Read |
"#;
    let extraction = run(src, "notes.md");
    assert!(extraction.is_ok());
    assert_eq!(
        codes(&extraction, Severity::Warning),
        vec![DiagnosticCode::UnknownTableType]
    );
    let table = extraction.tables().next().expect("no table");
    assert_eq!(table.table_type, TableBlockType::Unknown);
    assert_eq!(
        table.rows,
        vec![Row::Raw(vec!["Delegated".to_string(), "User.Read".to_string()])]
    );
}

#[test]
fn bold_paragraph_classifies_a_table() {
    let src = r#"# Colors

**Enumeration values**

| Value | Description |
|:--|:--|
| red | Warm. |
| blue | Cool. |
"#;
    let extraction = run(src, "colors.md");
    let table = extraction.tables().next().expect("no table");
    assert_eq!(table.table_type, TableBlockType::EnumerationValues);
    let values: Vec<_> = table.enum_values().map(|v| v.value.as_str()).collect();
    assert_eq!(values, vec!["red", "blue"]);
}

#[test]
fn properties_after_request_describe_the_response() {
    let src = r#"# Get stats

<!-- { "blockType": "request" } -->
```http
GET /stats
```

## Properties

| Name | Type | Description |
|:--|:--|:--|
| count | Int32 | Number of things. |
"#;
    let extraction = run(src, "stats.md");
    let table = extraction.tables().next().expect("no table");
    assert_eq!(table.table_type, TableBlockType::ResponseObjectProperties);
}

#[test]
fn column_mismatch_is_an_error() {
    let src = r#"# Get user

## Path parameters

| Name | Description |
|:--|:--|
| id | The user id. |
"#;
    let extraction = run(src, "user.md");
    assert!(!extraction.is_ok());
    let mismatches = codes(&extraction, Severity::Error);
    assert!(!mismatches.is_empty());
    assert!(
        mismatches
            .iter()
            .all(|c| *c == DiagnosticCode::TableColumnMismatch)
    );
    let table = extraction.tables().next().expect("no table");
    let param = table.parameters().next().expect("no parameter");
    assert_eq!(param.name, "id");
    assert_eq!(param.description, "");
}

#[test]
fn table_without_a_header_is_dropped() {
    let src = r#"| Name | Type | Description |
|:--|:--|:--|
| id | string | Id. |
"#;
    let extraction = run(src, "bare.md");
    assert_eq!(extraction.tables().count(), 0);
    assert!(extraction.diagnostics.is_empty());
}

#[test]
fn extraction_is_repeatable() {
    let doc = parse(METHOD_PAGE);
    let first = extract(&doc.blocks, "user-get.md", 7);
    let second = extract(&doc.blocks, "user-get.md", 7);
    assert_eq!(first, second);
    assert!(first.diagnostics.iter().all(|d| d.file_id == 7));
}
