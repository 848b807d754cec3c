//! loading templates and service descriptions
//!
//! Documents are read from JSON or YAML. The format is picked by file extension
//! (`.json` is JSON, everything else is YAML) and converted into a [Value] tree.
use crate::value::{ConversionError, Value};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

pub fn parse(contents: &str, format: Format) -> Result<Value, LoadError> {
    let value = match format {
        Format::Json => serde_json::from_str::<serde_json::Value>(contents)?.into(),
        Format::Yaml => Value::try_from(serde_yaml::from_str::<serde_yaml::Value>(contents)?)?,
    };

    Ok(value)
}

pub fn load_file(file_path: &Path) -> Result<Value, LoadError> {
    let file_path = file_path.canonicalize()?;
    tracing::info!(path=%file_path.display(), "loading file");

    let file_contents = std::fs::read_to_string(&file_path)?;
    parse(&file_contents, Format::from_path(&file_path))
}

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("IO error")]
    IoError(#[from] std::io::Error),
    #[error("Unable to parse json document")]
    JsonParseFailed(#[from] serde_json::Error),
    #[error("Unable to parse yaml document")]
    YamlParseFailed(#[from] serde_yaml::Error),
    #[error("Unable to convert yaml document")]
    YamlConversionFailed(#[from] ConversionError),
}

/// Utility macro to create a [Value] from yaml source
///
/// ```
/// # use pseudoparam::yaml_document;
/// let document = yaml_document!("provider: { region: eu-west-1 }");
/// assert!(document.is_container());
/// ```
///
/// # Panic
/// Panics on invalid input
///
/// ```should_panic
/// # use pseudoparam::yaml_document;
/// yaml_document!("not: valid: yaml");
/// ```
#[macro_export]
macro_rules! yaml_document {
    { $expr:expr } => {
        $crate::document::parse($expr, $crate::document::Format::Yaml).expect("document must parse")
    };
}
