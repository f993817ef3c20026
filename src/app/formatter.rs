use crate::app::error::ConvertError;
use crate::app::models::TargetConfiguration;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const INDENT: &str = "  ";

/// Minimal element tree; attributes keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attributes.push((key.to_string(), value.into()));
        self
    }

    pub fn child(mut self, element: XmlElement) -> Self {
        self.children.push(element);
        self
    }

    fn write_to(&self, out: &mut String, depth: usize) {
        out.push_str(&INDENT.repeat(depth));
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            out.push_str(&format!(" {}=\"{}\"", key, escape_attribute(value)));
        }

        if self.children.is_empty() {
            out.push_str(" />\n");
            return;
        }

        out.push_str(">\n");
        for child in &self.children {
            child.write_to(out, depth + 1);
        }
        out.push_str(&INDENT.repeat(depth));
        out.push_str(&format!("</{}>\n", self.name));
    }
}

pub struct OutputGenerator;

impl OutputGenerator {
    /// `<project>/<component name="CMakeSharedSettings">/<configurations>` with
    /// one child per configuration, in the given order.
    pub fn cmake_document(configs: &[TargetConfiguration]) -> XmlElement {
        let configurations = configs
            .iter()
            .map(Self::configuration_element)
            .fold(XmlElement::new("configurations"), XmlElement::child);

        XmlElement::new("project").attr("version", "4").child(
            XmlElement::new("component")
                .attr("name", "CMakeSharedSettings")
                .child(configurations),
        )
    }

    pub fn misc_document() -> XmlElement {
        XmlElement::new("project").attr("version", "4").child(
            XmlElement::new("component")
                .attr("name", "CMakeWorkspace")
                .attr("PROJECT_DIR", "$ProjectFileDir$"),
        )
    }

    fn configuration_element(config: &TargetConfiguration) -> XmlElement {
        let element = XmlElement::new("configuration")
            .attr("PROFILE_NAME", &config.profile_name)
            .attr("ENABLED", config.enabled.to_string())
            .attr("GENERATION_DIR", &config.generation_dir)
            .attr("CONFIG_NAME", &config.config_name)
            .attr("TOOLCHAIN_NAME", &config.toolchain_name)
            .attr("GENERATION_OPTIONS", &config.generation_options);

        match &config.build_options {
            Some(options) => element.attr("BUILD_OPTIONS", options),
            None => element,
        }
    }

    /// Serializes with a declaration and two spaces per nesting level.
    pub fn render(root: &XmlElement) -> String {
        let mut out = String::from(XML_DECLARATION);
        out.push('\n');
        root.write_to(&mut out, 0);
        out
    }

    /// Stages every file next to its destination before renaming any of
    /// them into place. A failure while staging leaves all destinations
    /// untouched.
    pub fn write_all_atomic(files: &[(PathBuf, String)]) -> Result<(), ConvertError> {
        let staged = files
            .iter()
            .map(|(path, contents)| Self::stage(path, contents).map(|file| (file, path)))
            .collect::<Result<Vec<_>, _>>()?;

        for (file, path) in staged {
            file.persist(path).map_err(|e| ConvertError::io(path, e.error))?;
            log::debug!("Wrote {}", path.display());
        }
        Ok(())
    }

    fn stage(path: &Path, contents: &str) -> Result<NamedTempFile, ConvertError> {
        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut staged = NamedTempFile::new_in(parent).map_err(|e| ConvertError::io(parent, e))?;
        staged
            .write_all(contents.as_bytes())
            .and_then(|_| staged.as_file().sync_all())
            .map_err(|e| ConvertError::io(staged.path(), e))?;
        Ok(staged)
    }
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\t' => escaped.push_str("&#09;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
