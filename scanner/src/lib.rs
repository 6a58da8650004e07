pub mod attachment;
pub mod config;
pub mod doc_file;
pub mod doc_set;
pub mod error;
pub mod extractor;
pub mod links;
pub mod table_spec;

pub use config::{ConfigError, DocSetConfig};
pub use doc_file::DocFile;
pub use doc_set::DocSet;
pub use error::ScanError;
pub use extractor::{Extraction, extract};
pub use links::{LinkReport, LinkValidation, classify, validate};
