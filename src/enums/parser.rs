use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use tracing::{debug, trace};

use super::{EnumType, EDM_NAMESPACE};
use crate::{ToolsError, ToolsResult};

const ENUM_TYPE: &[u8] = b"EnumType";
const MEMBER: &[u8] = b"Member";
const NAME_ATTRIBUTE: &str = "Name";

/// An `EnumType` whose end tag has not been reached yet
struct OpenEnum {
    index: usize,
    depth: usize,
}

/// Collects enum types while the document is streamed
#[derive(Default)]
struct Collector {
    enums: Vec<EnumType>,
    open: Vec<OpenEnum>,
}

impl Collector {
    /// Handle an EDM element found at `depth` (root is 0).
    /// `has_children` is false for self-closing elements.
    fn element(&mut self, element: &BytesStart<'_>, depth: usize, has_children: bool) -> ToolsResult<()> {
        match element.local_name().as_ref() {
            // The root itself is never matched, only its descendants
            ENUM_TYPE if depth > 0 => {
                let name = name_attribute(element, "EnumType")?;
                trace!("EnumType {} at depth {}", name, depth);

                self.enums.push(EnumType::new(name));
                if has_children {
                    self.open.push(OpenEnum {
                        index: self.enums.len() - 1,
                        depth,
                    });
                }
            }
            MEMBER => {
                let parent = match self.open.last() {
                    Some(open) if open.depth + 1 == depth => open.index,
                    _ => return Ok(()),
                };
                let name = name_attribute(element, "Member")?;
                self.enums[parent].members.push(name);
            }
            _ => {}
        }
        Ok(())
    }

    /// Close whatever enum started at `depth`
    fn end(&mut self, depth: usize) {
        if self.open.last().is_some_and(|open| open.depth == depth) {
            self.open.pop();
        }
    }
}

/// Parse CSDL metadata and collect every EDM `EnumType` in document order
///
/// `EnumType` elements are matched at any depth below the root, including
/// ones nested in another `EnumType`. Only direct `Member` children count.
/// Any well-formedness violation fails the whole parse.
pub fn parse_enums(xml: &str) -> ToolsResult<Vec<EnumType>> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut collector = Collector::default();
    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        let (resolved, event) = reader.read_resolved_event()?;
        let in_edm = matches!(
            resolved,
            ResolveResult::Bound(Namespace(ns)) if ns == EDM_NAMESPACE.as_bytes()
        );
        let unknown_prefix = match resolved {
            ResolveResult::Unknown(prefix) => Some(String::from_utf8_lossy(&prefix).into_owned()),
            _ => None,
        };

        match event {
            Event::Start(ref element) | Event::Empty(ref element) => {
                if depth == 0 {
                    if seen_root {
                        return Err(ToolsError::malformed_xml(
                            "content after the document element",
                        ));
                    }
                    seen_root = true;
                }
                if let Some(prefix) = unknown_prefix {
                    return Err(ToolsError::malformed_xml(format!(
                        "unbound namespace prefix '{}'",
                        prefix
                    )));
                }
                check_attributes(&reader, element)?;

                let has_children = matches!(event, Event::Start(_));
                if in_edm {
                    collector.element(element, depth, has_children)?;
                }
                if has_children {
                    depth += 1;
                }
            }
            Event::End(_) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| ToolsError::malformed_xml("unexpected end tag"))?;
                collector.end(depth);
            }
            Event::Text(ref text) => {
                // Bare `&` and unknown entities fail here
                let content = text.unescape()?;
                if depth == 0 && !content.trim().is_empty() {
                    return Err(ToolsError::malformed_xml(
                        "text outside the document element",
                    ));
                }
            }
            Event::CData(_) if depth == 0 => {
                return Err(ToolsError::malformed_xml(
                    "CDATA outside the document element",
                ));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(ToolsError::malformed_xml("no document element found"));
    }
    if depth != 0 {
        return Err(ToolsError::malformed_xml(format!(
            "document ended with {} unclosed element(s)",
            depth
        )));
    }

    debug!("Parsed {} enum types", collector.enums.len());
    Ok(collector.enums)
}

/// Reject duplicate attributes, bad attribute values and unbound attribute prefixes
fn check_attributes(reader: &NsReader<&[u8]>, element: &BytesStart<'_>) -> ToolsResult<()> {
    for attribute in element.attributes() {
        let attribute = attribute?;
        attribute.unescape_value()?;

        let key = attribute.key.as_ref();
        if key == b"xmlns" || key.starts_with(b"xmlns:") {
            continue;
        }
        if let (ResolveResult::Unknown(prefix), _) = reader.resolve_attribute(attribute.key) {
            return Err(ToolsError::malformed_xml(format!(
                "unbound namespace prefix '{}' on attribute",
                String::from_utf8_lossy(&prefix)
            )));
        }
    }
    Ok(())
}

fn name_attribute(element: &BytesStart<'_>, element_name: &str) -> ToolsResult<String> {
    match element.try_get_attribute(NAME_ATTRIBUTE)? {
        Some(attribute) => Ok(attribute.unescape_value()?.into_owned()),
        None => Err(ToolsError::missing_attribute(element_name, NAME_ATTRIBUTE)),
    }
}
