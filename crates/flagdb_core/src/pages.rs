//! Paginated container serialization.
//!
//! Flag databases ship as two archives inside the bootup pack: the game
//! data container, whose members page each partition in 4096-entry
//! documents, and the save data format, whose members page every saved
//! flag in 8192-entry documents followed by two opaque trailer members
//! the game supplies. Writers here always emit pages in canonical order
//! with records sorted by signed hash, so identical stores produce
//! identical bytes.

use crate::error::{CoreError, CoreResult};
use crate::flag::FlagType;
use crate::hash::hash_name;
use crate::store::FlagStore;
use flagdb_codec::{from_document_bytes, to_document_bytes, Archive, ArchiveWriter, Endian, Value};
use std::collections::HashSet;

/// Records per game data page.
pub const GAME_DATA_PAGE: usize = 4096;

/// Records per save data page.
pub const SAVE_DATA_PAGE: usize = 8192;

/// Revision stamped into every save data page.
pub const SAVE_FORMAT_REVISION: i32 = 18203;

/// File name declared by the save page descriptor.
pub const SAVE_FILE_NAME: &str = "game_data.sav";

/// Bootup pack member holding the game data container.
pub const GAME_DATA_MEMBER: &str = "GameData/gamedata.sarc";

/// Bootup pack member holding the save data format.
pub const SAVE_FORMAT_MEMBER: &str = "GameData/savedataformat.sarc";

/// Saved flags that never enter the save data format.
const SAVE_DATA_EXCLUDE: [&str; 7] = [
    "AlbumPictureIndex",
    "AoC_HardMode_Enabled",
    "CaptionPictSize",
    "FamousPictureIndex",
    "IsGet_Obj_AmiiboItem",
    "LatestAoCVerPlayed",
    "SeakSensorPictureIndex",
];

/// Which slice of a partition a container member holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Split {
    All,
    Ordinary,
    Revival,
}

/// Container member prefixes in emission order, with the partition and
/// split each serializes. The boolean and integer partitions are written
/// twice, split by the revival marker.
const MEMBER_PREFIXES: [(&str, FlagType, Split); 18] = [
    ("bool_array_data", FlagType::BoolArray, Split::All),
    ("bool_data", FlagType::Bool, Split::Ordinary),
    ("f32_array_data", FlagType::F32Array, Split::All),
    ("f32_data", FlagType::F32, Split::All),
    ("revival_bool_data", FlagType::Bool, Split::Revival),
    ("revival_s32_data", FlagType::S32, Split::Revival),
    ("s32_array_data", FlagType::S32Array, Split::All),
    ("s32_data", FlagType::S32, Split::Ordinary),
    ("string256_array_data", FlagType::String256Array, Split::All),
    ("string256_data", FlagType::String256, Split::All),
    ("string32_data", FlagType::String32, Split::All),
    ("string64_array_data", FlagType::String64Array, Split::All),
    ("string64_data", FlagType::String64, Split::All),
    ("vector2f_array_data", FlagType::Vector2Array, Split::All),
    ("vector2f_data", FlagType::Vector2, Split::All),
    ("vector3f_array_data", FlagType::Vector3Array, Split::All),
    ("vector3f_data", FlagType::Vector3, Split::All),
    ("vector4f_data", FlagType::Vector4, Split::All),
];

/// The two opaque members that close the save data format.
///
/// The game appends a pair of members after the paginated records; their
/// contents are preserved verbatim across rebuilds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveDataTrailer {
    /// Bytes of the first trailer member.
    pub first: Vec<u8>,
    /// Bytes of the second trailer member.
    pub second: Vec<u8>,
}

/// Serializes the working flags into a game data container.
///
/// Empty partitions emit no members at all.
pub fn build_game_data(store: &FlagStore, endian: Endian) -> CoreResult<Vec<u8>> {
    let mut writer = ArchiveWriter::new(endian);
    let mut members = 0usize;
    for (prefix, ftype, split) in MEMBER_PREFIXES {
        let records = partition_records(store, ftype, split);
        for (idx, chunk) in records.chunks(GAME_DATA_PAGE).enumerate() {
            let doc = Value::map(vec![(ftype.as_str(), Value::Array(chunk.to_vec()))]);
            writer.insert(game_member_name(prefix, idx), to_document_bytes(&doc, endian)?);
            members += 1;
        }
    }
    tracing::debug!("game data container holds {} members", members);
    Ok(writer.to_bytes()?)
}

/// Serializes every saved flag into a save data format archive.
///
/// Flags named in the exclusion table stay out even when marked saved.
/// The trailer members are appended after the last record page.
pub fn build_save_data(
    store: &FlagStore,
    endian: Endian,
    trailer: &SaveDataTrailer,
) -> CoreResult<Vec<u8>> {
    let exclude = save_data_exclude_hashes();
    let mut entries: Vec<(i32, Value)> = Vec::new();
    for ftype in FlagType::ALL {
        for flag in store.working_flags(ftype) {
            if !flag.is_save || exclude.contains(&flag.hash()) {
                continue;
            }
            entries.push((flag.hash(), flag.to_save_record()));
        }
    }
    entries.sort_by_key(|(hash, _)| *hash);
    let records: Vec<Value> = entries.into_iter().map(|(_, record)| record).collect();

    let num_pages = records.len().div_ceil(SAVE_DATA_PAGE);
    let mut writer = ArchiveWriter::new(endian);
    for (idx, chunk) in records.chunks(SAVE_DATA_PAGE).enumerate() {
        let doc = save_page(chunk.to_vec(), num_pages);
        writer.insert(save_member_name(idx), to_document_bytes(&doc, endian)?);
    }
    writer.insert(save_member_name(num_pages), trailer.first.clone());
    writer.insert(save_member_name(num_pages + 1), trailer.second.clone());
    tracing::debug!("save data format holds {} record pages", num_pages);
    Ok(writer.to_bytes()?)
}

/// Pulls the two trailer members out of an existing save data archive.
///
/// The trailer starts after the last index whose second successor still
/// exists, which is how record pages and trailers are told apart without
/// decoding anything.
pub fn extract_save_trailer(archive: &Archive) -> CoreResult<SaveDataTrailer> {
    let mut idx = 0usize;
    while archive.contains(&save_member_name(idx + 2)) {
        idx += 1;
    }
    match (
        archive.get(&save_member_name(idx)),
        archive.get(&save_member_name(idx + 1)),
    ) {
        (Some(first), Some(second)) => Ok(SaveDataTrailer {
            first: first.to_vec(),
            second: second.to_vec(),
        }),
        _ => Err(CoreError::TruncatedSaveData),
    }
}

/// Loads every flag member of a game data container into a store.
///
/// Returns the number of members read.
pub fn load_game_data(archive: &Archive, store: &mut FlagStore) -> CoreResult<usize> {
    let mut members = 0usize;
    for name in archive.names() {
        if !name.ends_with(".bgdata") {
            continue;
        }
        let bytes = archive
            .get(name)
            .ok_or_else(|| CoreError::missing_member(name))?;
        let (doc, _) = from_document_bytes(bytes)?;
        store.load_member(name, &doc)?;
        members += 1;
    }
    Ok(members)
}

fn partition_records(store: &FlagStore, ftype: FlagType, split: Split) -> Vec<Value> {
    let mut entries: Vec<(i32, Value)> = store
        .working_flags(ftype)
        .filter(|flag| match split {
            Split::All => true,
            Split::Ordinary => !flag.is_revival,
            Split::Revival => flag.is_revival,
        })
        .map(|flag| (flag.hash(), flag.to_record()))
        .collect();
    entries.sort_by_key(|(hash, _)| *hash);
    entries.into_iter().map(|(_, record)| record).collect()
}

fn game_member_name(prefix: &str, idx: usize) -> String {
    format!("{prefix}_{idx}.bgdata")
}

fn save_member_name(idx: usize) -> String {
    format!("saveformat_{idx}.bgsvdata")
}

fn save_page(records: Vec<Value>, num_pages: usize) -> Value {
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let directory_num = (num_pages + 2) as i32;
    let descriptor = Value::map(vec![
        ("IsCommon", Value::Bool(false)),
        ("IsCommonAtSameAccount", Value::Bool(false)),
        ("IsSaveSecureCode", Value::Bool(true)),
        ("file_name", Value::Str(SAVE_FILE_NAME.to_string())),
    ]);
    let save_info = Value::map(vec![
        ("directory_num", Value::I32(directory_num)),
        ("is_build_machine", Value::Bool(true)),
        ("revision", Value::I32(SAVE_FORMAT_REVISION)),
    ]);
    Value::map(vec![
        (
            "file_list",
            Value::Array(vec![descriptor, Value::Array(records)]),
        ),
        ("save_info", Value::Array(vec![save_info])),
    ])
}

fn save_data_exclude_hashes() -> HashSet<i32> {
    SAVE_DATA_EXCLUDE.iter().map(|name| hash_name(name)).collect()
}
