//! Parser for Xcode project files (project.pbxproj)
//!
//! Xcode writes project files as OpenStep-style ASCII property lists; XML and
//! binary property lists decode the same way. A project file holds a flat
//! `objects` table keyed by identifier. The Swift language version is found
//! by following references:
//!
//! ```text
//! rootObject -> objects[root].buildConfigurationList
//!            -> objects[list].buildConfigurations (last entry)
//!            -> objects[config].buildSettings.SWIFT_VERSION
//! ```
//!
//! The last configuration in the list is taken as the Release configuration.
//! Xcode writes Debug before Release, but nothing checks the configuration's
//! `name`, so a project that reorders its configurations reports whatever
//! comes last.

use std::collections::BTreeMap;
use std::io::Cursor;

use tracing::debug;

use super::{Entries, NormalizedResult, Parser};
use crate::error::ParseFailure;
use crate::file_types::FormatKind;
use crate::value::Value;

/// Entry key in the normalized result
pub const SWIFT_VERSION_ENTRY: &str = "swift_version";

const ROOT_OBJECT: &str = "rootObject";
const OBJECTS: &str = "objects";
const BUILD_CONFIGURATION_LIST: &str = "buildConfigurationList";
const BUILD_CONFIGURATIONS: &str = "buildConfigurations";
const BUILD_SETTINGS: &str = "buildSettings";
const SWIFT_VERSION_SETTING: &str = "SWIFT_VERSION";

type Objects = BTreeMap<String, Value>;

/// Parser for Xcode project property lists (ASCII, XML or binary)
#[derive(Debug, Default)]
pub struct XcodeProjectParser;

impl XcodeProjectParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for XcodeProjectParser {
    fn format(&self) -> FormatKind {
        FormatKind::XcodeProject
    }

    fn parse(&self, content: &[u8]) -> Result<NormalizedResult, ParseFailure> {
        let project = decode_plist(content)?;
        let version = swift_version(&project)?;

        debug!("Found {} = {}", SWIFT_VERSION_SETTING, version);
        let mut entries = Entries::new();
        entries.insert(SWIFT_VERSION_ENTRY.to_string(), version.to_string());
        Ok(NormalizedResult::new(FormatKind::XcodeProject, entries))
    }
}

/// Decode property-list bytes from memory.
fn decode_plist(content: &[u8]) -> Result<Value, ParseFailure> {
    plist::Value::from_reader(Cursor::new(content))
        .map(Value::from)
        .map_err(|e| {
            debug!("project.pbxproj is not a valid property list: {}", e);
            ParseFailure::malformed(FormatKind::XcodeProject)
        })
}

/// Walk the object graph from `rootObject` to the last configuration's
/// `SWIFT_VERSION`.
fn swift_version(project: &Value) -> Result<&str, ParseFailure> {
    let root_id = project
        .get(ROOT_OBJECT)
        .and_then(Value::as_str)
        .ok_or_else(|| missing(ROOT_OBJECT))?;
    let objects = project
        .get(OBJECTS)
        .and_then(Value::as_map)
        .ok_or_else(|| missing(OBJECTS))?;
    debug!("Root object {} among {} objects", root_id, objects.len());

    let root = lookup(objects, root_id)?;
    let list_id = root
        .get(BUILD_CONFIGURATION_LIST)
        .and_then(Value::as_str)
        .ok_or_else(|| missing(format!("{OBJECTS}.{root_id}.{BUILD_CONFIGURATION_LIST}")))?;

    let list = lookup(objects, list_id)?;
    let configurations = list
        .get(BUILD_CONFIGURATIONS)
        .and_then(Value::as_array)
        .ok_or_else(|| missing(format!("{OBJECTS}.{list_id}.{BUILD_CONFIGURATIONS}")))?;
    let configuration_ids = configurations
        .iter()
        .map(Value::as_str)
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| missing(format!("{OBJECTS}.{list_id}.{BUILD_CONFIGURATIONS}")))?;

    let release_id = configuration_ids
        .last()
        .ok_or_else(|| missing(format!("{OBJECTS}.{list_id}.{BUILD_CONFIGURATIONS}")))?;
    let release = lookup(objects, release_id)?;
    let name = release
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("unnamed");
    debug!("Using build configuration {} ({})", release_id, name);

    let settings = release
        .get(BUILD_SETTINGS)
        .filter(|settings| settings.as_map().is_some())
        .ok_or_else(|| missing(format!("{OBJECTS}.{release_id}.{BUILD_SETTINGS}")))?;

    settings
        .get(SWIFT_VERSION_SETTING)
        .and_then(Value::as_str)
        .ok_or_else(|| {
            missing(format!(
                "{OBJECTS}.{release_id}.{BUILD_SETTINGS}.{SWIFT_VERSION_SETTING}"
            ))
        })
}

/// Resolve an object identifier; dangling references and non-map objects
/// both count as a missing section.
fn lookup<'a>(objects: &'a Objects, id: &str) -> Result<&'a Value, ParseFailure> {
    objects
        .get(id)
        .filter(|object| object.as_map().is_some())
        .ok_or_else(|| missing(format!("{OBJECTS}.{id}")))
}

fn missing(section: impl Into<String>) -> ParseFailure {
    ParseFailure::missing(FormatKind::XcodeProject, section)
}
