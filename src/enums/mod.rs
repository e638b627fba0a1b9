//! Enumeration extraction from Redfish/OData CSDL metadata.
//!
//! Every `EnumType` in the EDM namespace becomes one `enum_builder` line:
//!
//! ```text
//! ENUM(Status, uint32_t, Enabled, Disabled);
//! ```

mod parser;

use std::fmt;
use std::path::Path;
use tracing::info;

use crate::{ToolsError, ToolsResult};

pub use parser::parse_enums;

/// OData Common Schema Definition Language namespace
pub const EDM_NAMESPACE: &str = "http://docs.oasis-open.org/odata/ns/edm";

/// Underlying type written into every declaration
pub const UNDERLYING_TYPE: &str = "uint32_t";

/// An `EnumType` and its member names in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    pub name: String,
    pub members: Vec<String>,
}

impl EnumType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }
}

/// Renders the `ENUM(...)` declaration. An enum without members keeps the
/// separator: `ENUM(Name, uint32_t, );`
impl fmt::Display for EnumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ENUM({}, {}, {});",
            self.name,
            UNDERLYING_TYPE,
            self.members.join(", ")
        )
    }
}

/// Declaration lines for the given enums, one per enum, in order
pub fn declarations(enums: &[EnumType]) -> impl Iterator<Item = String> + '_ {
    enums.iter().map(ToString::to_string)
}

/// Read and parse a metadata file
///
/// The whole document is parsed before returning, so a malformed file never
/// yields a partial list.
pub fn extract_enums(path: &Path) -> ToolsResult<Vec<EnumType>> {
    if !path.exists() {
        return Err(ToolsError::file_not_found(path));
    }

    let xml = std::fs::read_to_string(path)?;
    let enums = parse_enums(&xml)?;

    info!("Found {} enum types in {}", enums.len(), path.display());
    Ok(enums)
}
