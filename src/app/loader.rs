use crate::app::error::ConvertError;
use crate::app::models::SourceConfiguration;
use serde_json::{Map, Value};

/// Generators containing this are the only ones translated.
pub const VISUAL_STUDIO_MARKER: &str = "Visual Studio";

/// Parses comment-free settings JSON and returns the Visual Studio
/// configurations in file order.
///
/// Every element is validated, including the ones that are dropped for
/// targeting another generator.
pub fn load_configurations(json: &str) -> Result<Vec<SourceConfiguration>, ConvertError> {
    let document: Value = serde_json::from_str(json)?;

    let entries = document
        .get("configurations")
        .and_then(Value::as_array)
        .ok_or(ConvertError::MissingConfigurations)?;

    let mut configs = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let config = parse_entry(index, entry)?;

        if config.generator.contains(VISUAL_STUDIO_MARKER) {
            configs.push(config);
        } else {
            log::debug!(
                "Skipping '{}': generator '{}' is not Visual Studio",
                config.name,
                config.generator
            );
        }
    }

    Ok(configs)
}

fn parse_entry(index: usize, entry: &Value) -> Result<SourceConfiguration, ConvertError> {
    let empty = Map::new();
    let fields = entry.as_object().unwrap_or(&empty);
    // Best effort, only used to label errors
    let name = fields.get("name").and_then(Value::as_str).map(str::to_string);

    let field = |key: &'static str| -> Result<String, ConvertError> {
        match fields.get(key) {
            None => Err(ConvertError::MissingField {
                index,
                name: name.clone(),
                field: key,
            }),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(ConvertError::InvalidField {
                index,
                name: name.clone(),
                field: key,
            }),
        }
    };

    Ok(SourceConfiguration {
        name: field("name")?,
        generator: field("generator")?,
        configuration_type: field("configurationType")?,
        build_root: field("buildRoot")?,
        cmake_command_args: field("cmakeCommandArgs")?,
    })
}
