use apidoc::definition::TableBlockType;
use pretty_assertions::assert_eq;
use scanner::table_spec::{TableContext, classify};

const NO_CONTEXT: TableContext = TableContext {
    has_resource: false,
    has_request: false,
};

#[test]
fn every_vocabulary_header_classifies() {
    let cases = [
        ("Error responses", TableBlockType::ErrorCodes),
        ("Error codes", TableBlockType::ErrorCodes),
        ("Path parameters", TableBlockType::PathParameters),
        ("Query String Parameters", TableBlockType::QueryStringParameters),
        ("Query parameters", TableBlockType::QueryStringParameters),
        ("Optional query parameters", TableBlockType::QueryStringParameters),
        ("HTTP Request Headers", TableBlockType::HttpHeaders),
        ("Request headers", TableBlockType::HttpHeaders),
        ("Request Body", TableBlockType::RequestObjectProperties),
        ("Response body", TableBlockType::ResponseObjectProperties),
        ("Properties", TableBlockType::ResourcePropertyDescriptions),
        ("Enumeration values", TableBlockType::EnumerationValues),
        ("Enumerated values", TableBlockType::EnumerationValues),
    ];
    for (header, expected) in cases {
        assert_eq!(classify(header, NO_CONTEXT), expected, "{}", header);
        assert_eq!(
            classify(&header.to_uppercase(), NO_CONTEXT),
            expected,
            "{}",
            header
        );
        assert_eq!(
            classify(&format!("{}:", header), NO_CONTEXT),
            expected,
            "{}:",
            header
        );
    }
}

#[test]
fn header_whitespace_is_collapsed() {
    assert_eq!(
        classify("  Path   parameters :", NO_CONTEXT),
        TableBlockType::PathParameters
    );
}

#[test]
fn unlisted_headers_are_unknown() {
    for header in ["Permissions", "Parameters", "Path", "Response", ""] {
        assert_eq!(classify(header, NO_CONTEXT), TableBlockType::Unknown, "{}", header);
    }
}

#[test]
fn properties_depend_on_page_context() {
    let cases = [
        (false, false, TableBlockType::ResourcePropertyDescriptions),
        (true, false, TableBlockType::ResourcePropertyDescriptions),
        (false, true, TableBlockType::ResponseObjectProperties),
        (true, true, TableBlockType::ResourcePropertyDescriptions),
    ];
    for (has_resource, has_request, expected) in cases {
        let context = TableContext {
            has_resource,
            has_request,
        };
        assert_eq!(
            classify("Properties", context),
            expected,
            "resource={} request={}",
            has_resource,
            has_request
        );
    }
}
