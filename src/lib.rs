//! Redfish Tools
//!
//! Maintenance utilities for the Redfish management service:
//! upgrading legacy JSON service configuration to the flattened schema and
//! generating `ENUM(...)` declarations from Redfish/OData CSDL metadata.

use std::path::Path;

pub mod cli;
pub mod config;
pub mod enums;
pub mod migration;

/// Application-wide error types with context preservation
#[derive(Debug, thiserror::Error)]
pub enum ToolsError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unexpected configuration shape: {message}")]
    ConfigShape { message: String, path: Option<String> },

    #[error("<{element}> element is missing required attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },

    #[error("Malformed XML document: {message}")]
    MalformedXml { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    #[error("XML error: {source}")]
    Xml {
        #[from]
        source: quick_xml::Error,
    },

    #[error("XML attribute error: {source}")]
    XmlAttribute {
        #[from]
        source: quick_xml::events::attributes::AttrError,
    },

    #[error("Settings file error: {source}")]
    Toml {
        #[from]
        source: toml::de::Error,
    },
}

impl ToolsError {
    /// Create a file-not-found error for a path
    pub fn file_not_found(path: &Path) -> Self {
        Self::FileNotFound(path.display().to_string())
    }

    /// Create a configuration shape error with optional path
    pub fn config_shape(message: impl Into<String>, path: Option<String>) -> Self {
        Self::ConfigShape {
            message: message.into(),
            path,
        }
    }

    /// Create a missing attribute error
    pub fn missing_attribute(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Create a malformed XML structure error
    pub fn malformed_xml(message: impl Into<String>) -> Self {
        Self::MalformedXml {
            message: message.into(),
        }
    }

    /// Create a tool settings error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ToolsError::FileNotFound(path) => {
                format!("Error: {} does not exist", path)
            }
            ToolsError::ConfigShape { message, path } => {
                if let Some(p) = path {
                    format!("Invalid configuration file ({}): {}", p, message)
                } else {
                    format!("Invalid configuration file: {}", message)
                }
            }
            ToolsError::MissingAttribute { element, attribute } => {
                format!("Malformed metadata: <{}> has no {} attribute", element, attribute)
            }
            ToolsError::MalformedXml { message } => {
                format!("Malformed metadata: {}", message)
            }
            ToolsError::Configuration { message } => {
                format!("Settings issue: {}", message)
            }
            ToolsError::Io { source } => {
                format!("File system error: {}", source)
            }
            ToolsError::Serialization { source } => {
                format!("JSON format error: {}", source)
            }
            ToolsError::Xml { source } => {
                format!("XML format error: {}", source)
            }
            ToolsError::XmlAttribute { source } => {
                format!("XML format error: {}", source)
            }
            ToolsError::Toml { source } => {
                format!("Settings file format error: {}", source)
            }
        }
    }
}

/// Convenience type alias for Results
pub type ToolsResult<T> = Result<T, ToolsError>;

/// Extension trait for attaching the offending file to shape errors
pub trait ResultExt<T> {
    fn with_path_context(self, path: &Path) -> ToolsResult<T>;
}

impl<T> ResultExt<T> for ToolsResult<T> {
    fn with_path_context(self, path: &Path) -> ToolsResult<T> {
        self.map_err(|e| match e {
            ToolsError::ConfigShape { message, path: None } => {
                ToolsError::config_shape(message, Some(path.display().to_string()))
            }
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_message() {
        let err = ToolsError::file_not_found(Path::new("/etc/missing.json"));
        assert_eq!(err.user_message(), "Error: /etc/missing.json does not exist");
    }

    #[test]
    fn test_config_shape_with_path() {
        let err = ToolsError::config_shape("connectors is empty", Some("cfg.json".to_string()));
        assert!(err.user_message().contains("cfg.json"));
        assert!(err.user_message().contains("connectors is empty"));
    }

    #[test]
    fn test_result_extension() {
        let result: ToolsResult<()> = Err(ToolsError::config_shape("bad", None));

        let with_path = result.with_path_context(Path::new("/tmp/config.json"));

        if let Err(ToolsError::ConfigShape { path, .. }) = with_path {
            assert_eq!(path, Some("/tmp/config.json".to_string()));
        } else {
            panic!("Expected ConfigShape error");
        }
    }

    #[test]
    fn test_result_extension_keeps_other_errors() {
        let result: ToolsResult<()> = Err(ToolsError::missing_attribute("EnumType", "Name"));

        let with_path = result.with_path_context(Path::new("/tmp/metadata.xml"));

        assert!(matches!(with_path, Err(ToolsError::MissingAttribute { .. })));
    }
}
