/// Classification of a documentation table, decided by the heading above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableBlockType {
    ErrorCodes,
    PathParameters,
    QueryStringParameters,
    HttpHeaders,
    RequestObjectProperties,
    ResponseObjectProperties,
    ResourcePropertyDescriptions,
    EnumerationValues,
    /// The heading matched nothing; rows are kept raw.
    Unknown,
}

impl TableBlockType {
    /// Expected columns, in order. Empty for `Unknown`, which accepts any shape.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            TableBlockType::ErrorCodes => &["HTTP status code", "Error code", "Description"],
            TableBlockType::PathParameters | TableBlockType::QueryStringParameters => {
                &["Name", "Type", "Description"]
            }
            TableBlockType::HttpHeaders => &["Name", "Description"],
            TableBlockType::RequestObjectProperties
            | TableBlockType::ResponseObjectProperties
            | TableBlockType::ResourcePropertyDescriptions => &["Name", "Type", "Description"],
            TableBlockType::EnumerationValues => &["Value", "Description"],
            TableBlockType::Unknown => &[],
        }
    }

    /// Where the parameters described by this table travel, if it describes parameters.
    pub fn parameter_location(&self) -> Option<ParameterLocation> {
        match self {
            TableBlockType::PathParameters => Some(ParameterLocation::Path),
            TableBlockType::QueryStringParameters => Some(ParameterLocation::QueryString),
            TableBlockType::HttpHeaders => Some(ParameterLocation::Header),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterLocation {
    Path,
    QueryString,
    Header,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDefinition {
    pub name: String,
    pub type_name: String,
    pub description: String,
    pub required: bool,
    pub location: ParameterLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDefinition {
    pub http_status_code: String,
    pub error_code: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDefinition {
    pub name: String,
    pub type_name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValueDefinition {
    pub value: String,
    pub description: String,
}

/// One table row, typed by the table's `TableBlockType`.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Parameter(ParameterDefinition),
    Error(ErrorDefinition),
    Property(PropertyDefinition),
    EnumValue(EnumValueDefinition),
    Raw(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition {
    pub table_type: TableBlockType,
    /// Text of the heading the table was classified from.
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl TableDefinition {
    pub fn parameters(&self) -> impl Iterator<Item = &ParameterDefinition> {
        self.rows.iter().filter_map(|row| match row {
            Row::Parameter(parameter) => Some(parameter),
            _ => None,
        })
    }

    pub fn errors(&self) -> impl Iterator<Item = &ErrorDefinition> {
        self.rows.iter().filter_map(|row| match row {
            Row::Error(error) => Some(error),
            _ => None,
        })
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertyDefinition> {
        self.rows.iter().filter_map(|row| match row {
            Row::Property(property) => Some(property),
            _ => None,
        })
    }

    pub fn enum_values(&self) -> impl Iterator<Item = &EnumValueDefinition> {
        self.rows.iter().filter_map(|row| match row {
            Row::EnumValue(value) => Some(value),
            _ => None,
        })
    }
}
