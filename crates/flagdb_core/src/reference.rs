//! Access to stock game data.
//!
//! Reconciliation compares modded map units against their stock
//! counterparts. Implementations of [`ReferenceData`] supply those stock
//! documents; a missing file simply means there is no stock version, not
//! an error.

use crate::error::CoreResult;
use flagdb_codec::{from_document_bytes, Archive, Value};
use std::io;
use std::path::{Path, PathBuf};

/// Which half of a map unit a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// Fixed placements.
    Static,
    /// Respawning placements.
    Dynamic,
}

impl UnitKind {
    /// The suffix used in unit file names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            UnitKind::Static => "Static",
            UnitKind::Dynamic => "Dynamic",
        }
    }

    /// Parses a unit file name suffix.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "Static" => Some(UnitKind::Static),
            "Dynamic" => Some(UnitKind::Dynamic),
            _ => None,
        }
    }
}

/// Identifies one stock map unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapId {
    /// An overworld section such as `E-3`.
    MainField {
        /// Grid section name.
        section: String,
        /// Static or dynamic half.
        unit: UnitKind,
    },
    /// A dungeon, stored inside its own pack.
    Dungeon {
        /// Dungeon pack name such as `Dungeon042`.
        pack: String,
        /// Static or dynamic half.
        unit: UnitKind,
    },
}

impl MapId {
    /// Identifies an overworld unit.
    pub fn main_field(section: impl Into<String>, unit: UnitKind) -> Self {
        MapId::MainField {
            section: section.into(),
            unit,
        }
    }

    /// Identifies a dungeon unit.
    pub fn dungeon(pack: impl Into<String>, unit: UnitKind) -> Self {
        MapId::Dungeon {
            pack: pack.into(),
            unit,
        }
    }
}

/// Supplies stock world data for reconciliation.
pub trait ReferenceData {
    /// The stock version of a map unit, or `None` if the base game has
    /// none.
    fn stock_map(&self, map: &MapId) -> CoreResult<Option<Value>>;

    /// The stock-merged actor info document, or `None` when unavailable.
    fn actor_info(&self) -> CoreResult<Option<Value>>;
}

/// A reference source with no data at all.
///
/// Useful for tests and for runs where every object should be treated
/// as new.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReference;

impl ReferenceData for NullReference {
    fn stock_map(&self, _map: &MapId) -> CoreResult<Option<Value>> {
        Ok(None)
    }

    fn actor_info(&self) -> CoreResult<Option<Value>> {
        Ok(None)
    }
}

/// Stock data laid out on disk under a game dump root.
///
/// Overworld units live at
/// `content/Map/MainField/{section}/{section}_{unit}.mubin`, dungeons
/// inside `content/Pack/{pack}.pack`, and actor info at
/// `content/Actor/ActorInfo.product.byml`.
#[derive(Debug, Clone)]
pub struct DirReference {
    root: PathBuf,
}

impl DirReference {
    /// Creates a reference over a dump directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The dump root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ReferenceData for DirReference {
    fn stock_map(&self, map: &MapId) -> CoreResult<Option<Value>> {
        match map {
            MapId::MainField { section, unit } => {
                let path = self
                    .root
                    .join("content")
                    .join("Map")
                    .join("MainField")
                    .join(section)
                    .join(format!("{section}_{}.mubin", unit.as_str()));
                let Some(bytes) = read_optional(&path)? else {
                    return Ok(None);
                };
                let (value, _) = from_document_bytes(&bytes)?;
                Ok(Some(value))
            }
            MapId::Dungeon { pack, unit } => {
                let path = self
                    .root
                    .join("content")
                    .join("Pack")
                    .join(format!("{pack}.pack"));
                let Some(bytes) = read_optional(&path)? else {
                    return Ok(None);
                };
                let archive = Archive::from_bytes(&bytes)?;
                let member = format!("Map/CDungeon/{pack}/{pack}_{}.mubin", unit.as_str());
                match archive.get(&member) {
                    None => Ok(None),
                    Some(member_bytes) => {
                        let (value, _) = from_document_bytes(member_bytes)?;
                        Ok(Some(value))
                    }
                }
            }
        }
    }

    fn actor_info(&self) -> CoreResult<Option<Value>> {
        let path = self
            .root
            .join("content")
            .join("Actor")
            .join("ActorInfo.product.byml");
        let Some(bytes) = read_optional(&path)? else {
            return Ok(None);
        };
        let (value, _) = from_document_bytes(&bytes)?;
        Ok(Some(value))
    }
}

fn read_optional(path: &Path) -> CoreResult<Option<Vec<u8>>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagdb_codec::{to_document_bytes, ArchiveWriter, Endian};
    use std::fs;

    fn sample_unit(label: &str) -> Value {
        Value::map(vec![(
            "Objs",
            Value::Array(vec![Value::map(vec![
                ("HashId", Value::U32(1)),
                ("UnitConfigName", Value::Str(label.to_string())),
            ])]),
        )])
    }

    #[test]
    fn null_reference_has_nothing() {
        let reference = NullReference;
        assert!(reference
            .stock_map(&MapId::main_field("A-1", UnitKind::Static))
            .unwrap()
            .is_none());
        assert!(reference.actor_info().unwrap().is_none());
    }

    #[test]
    fn missing_files_resolve_to_none() {
        let dir = tempfile::tempdir().unwrap();
        let reference = DirReference::new(dir.path());
        assert!(reference
            .stock_map(&MapId::main_field("Z-9", UnitKind::Dynamic))
            .unwrap()
            .is_none());
        assert!(reference.actor_info().unwrap().is_none());
    }

    #[test]
    fn reads_overworld_units_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let unit_dir = dir.path().join("content/Map/MainField/E-3");
        fs::create_dir_all(&unit_dir).unwrap();
        let doc = sample_unit("Enemy_Bokoblin_Junior");
        let bytes = to_document_bytes(&doc, Endian::Little).unwrap();
        fs::write(unit_dir.join("E-3_Static.mubin"), bytes).unwrap();

        let reference = DirReference::new(dir.path());
        let loaded = reference
            .stock_map(&MapId::main_field("E-3", UnitKind::Static))
            .unwrap()
            .expect("unit should load");
        assert_eq!(loaded, doc);
        // The other half is still absent.
        assert!(reference
            .stock_map(&MapId::main_field("E-3", UnitKind::Dynamic))
            .unwrap()
            .is_none());
    }

    #[test]
    fn reads_dungeon_units_from_their_pack() {
        let dir = tempfile::tempdir().unwrap();
        let pack_dir = dir.path().join("content/Pack");
        fs::create_dir_all(&pack_dir).unwrap();
        let doc = sample_unit("TBox_Dungeon_Stone");
        let mut writer = ArchiveWriter::new(Endian::Little);
        writer.insert(
            "Map/CDungeon/Dungeon042/Dungeon042_Static.mubin",
            to_document_bytes(&doc, Endian::Little).unwrap(),
        );
        fs::write(pack_dir.join("Dungeon042.pack"), writer.to_bytes().unwrap()).unwrap();

        let reference = DirReference::new(dir.path());
        let loaded = reference
            .stock_map(&MapId::dungeon("Dungeon042", UnitKind::Static))
            .unwrap()
            .expect("dungeon unit should load");
        assert_eq!(loaded, doc);
        assert!(reference
            .stock_map(&MapId::dungeon("Dungeon042", UnitKind::Dynamic))
            .unwrap()
            .is_none());
    }

    #[test]
    fn reads_actor_info() {
        let dir = tempfile::tempdir().unwrap();
        let actor_dir = dir.path().join("content/Actor");
        fs::create_dir_all(&actor_dir).unwrap();
        let info = Value::map(vec![(
            "Actors",
            Value::Array(vec![Value::map(vec![
                ("name", Value::Str("Enemy_Custom".to_string())),
                ("generalLife", Value::I32(10)),
            ])]),
        )]);
        fs::write(
            actor_dir.join("ActorInfo.product.byml"),
            to_document_bytes(&info, Endian::Little).unwrap(),
        )
        .unwrap();

        let reference = DirReference::new(dir.path());
        assert_eq!(reference.actor_info().unwrap(), Some(info));
    }

    #[test]
    fn unit_kind_parsing() {
        assert_eq!(UnitKind::parse("Static"), Some(UnitKind::Static));
        assert_eq!(UnitKind::parse("Dynamic"), Some(UnitKind::Dynamic));
        assert_eq!(UnitKind::parse("static"), None);
    }
}
