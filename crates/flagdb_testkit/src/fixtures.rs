//! Test fixtures and mod directory helpers.
//!
//! Provides convenience functions for building disposable mod
//! directories, map documents, and pre-populated flag stores.

use flagdb_codec::{to_document_bytes, ArchiveWriter, Endian, Value};
use flagdb_core::{
    build_game_data, build_save_data, extract_save_trailer, load_game_data, Flag, FlagStore,
    FlagType, FlagValues, SaveDataTrailer, UnitKind, GAME_DATA_MEMBER, SAVE_FORMAT_MEMBER,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A disposable mod directory with automatic cleanup.
///
/// Files land in the same layout the command-line tools scan: the
/// bootup pack under `content/Pack`, map units under
/// `content/Map/MainField`, and actor packs anywhere under `content`.
pub struct TestMod {
    dir: TempDir,
    endian: Endian,
}

impl TestMod {
    /// Creates a mod directory whose containers use little-endian byte order.
    pub fn new() -> Self {
        Self::with_endian(Endian::Little)
    }

    /// Creates a mod directory with the given container byte order.
    pub fn with_endian(endian: Endian) -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir_all(dir.path().join("content")).expect("Failed to create content directory");
        Self { dir, endian }
    }

    /// Returns the mod root.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Returns the byte order used for written containers.
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Writes a bootup pack holding `store` with an empty save trailer.
    pub fn write_bootup(&self, store: &FlagStore) -> PathBuf {
        self.write_bootup_with_trailer(store, &SaveDataTrailer::default())
    }

    /// Writes a bootup pack holding `store` and the given save trailer.
    pub fn write_bootup_with_trailer(
        &self,
        store: &FlagStore,
        trailer: &SaveDataTrailer,
    ) -> PathBuf {
        let game = build_game_data(store, self.endian).expect("Failed to build game data");
        let save =
            build_save_data(store, self.endian, trailer).expect("Failed to build save data");
        let mut writer = ArchiveWriter::new(self.endian);
        writer.insert(GAME_DATA_MEMBER, game);
        writer.insert(SAVE_FORMAT_MEMBER, save);
        let path = self.path().join("content").join("Pack").join("Bootup.pack");
        self.write_file(&path, writer.to_bytes().expect("Failed to encode bootup pack"));
        path
    }

    /// Reads the bootup pack back into a fresh store plus its trailer.
    pub fn read_bootup(&self) -> (FlagStore, SaveDataTrailer) {
        let path = self.path().join("content").join("Pack").join("Bootup.pack");
        let bytes = fs::read(&path).expect("Failed to read bootup pack");
        let pack =
            flagdb_codec::Archive::from_bytes(&bytes).expect("Failed to parse bootup pack");

        let mut store = FlagStore::new();
        let game = pack.get(GAME_DATA_MEMBER).expect("Bootup pack has no game data");
        let game =
            flagdb_codec::Archive::from_bytes(game).expect("Failed to parse game data member");
        load_game_data(&game, &mut store).expect("Failed to load game data");

        let save = pack
            .get(SAVE_FORMAT_MEMBER)
            .expect("Bootup pack has no save data");
        let save =
            flagdb_codec::Archive::from_bytes(save).expect("Failed to parse save data member");
        let trailer = extract_save_trailer(&save).expect("Failed to extract save trailer");
        (store, trailer)
    }

    /// Writes an overworld map unit document for `section`.
    pub fn write_map_unit(&self, section: &str, kind: UnitKind, doc: &Value) -> PathBuf {
        let path = self
            .path()
            .join("content")
            .join("Map")
            .join("MainField")
            .join(section)
            .join(format!("{section}_{}.mubin", kind.as_str()));
        self.write_file(
            &path,
            to_document_bytes(doc, self.endian).expect("Failed to encode map unit"),
        );
        path
    }

    /// Writes the expansion overworld static document.
    pub fn write_aoc_static(&self, doc: &Value) -> PathBuf {
        let path = self
            .path()
            .join("aoc")
            .join("0010")
            .join("Map")
            .join("MainField")
            .join("Static.mubin");
        self.write_file(
            &path,
            to_document_bytes(doc, self.endian).expect("Failed to encode static document"),
        );
        path
    }

    /// Writes a dungeon pack holding one map unit document per entry.
    pub fn write_dungeon_pack(&self, name: &str, units: &[(UnitKind, Value)]) -> PathBuf {
        let mut writer = ArchiveWriter::new(self.endian);
        for (kind, doc) in units {
            let member = format!("Map/CDungeon/{name}/{name}_{}.mubin", kind.as_str());
            writer.insert(
                member,
                to_document_bytes(doc, self.endian).expect("Failed to encode dungeon unit"),
            );
        }
        let path = self
            .path()
            .join("content")
            .join("Pack")
            .join(format!("{name}.pack"));
        self.write_file(&path, writer.to_bytes().expect("Failed to encode dungeon pack"));
        path
    }

    /// Writes an empty actor pack for `actor`.
    pub fn write_actor_pack(&self, actor: &str) -> PathBuf {
        let writer = ArchiveWriter::new(self.endian);
        let path = self.actor_pack_path(actor);
        self.write_file(&path, writer.to_bytes().expect("Failed to encode actor pack"));
        path
    }

    /// Writes an actor pack carrying a shop table selling `items`.
    pub fn write_shop_pack(&self, actor: &str, items: &[&str]) -> PathBuf {
        let table = Value::map(vec![(
            "ShopItems",
            Value::Array(
                items
                    .iter()
                    .map(|item| Value::Str((*item).to_string()))
                    .collect(),
            ),
        )]);
        let mut writer = ArchiveWriter::new(self.endian);
        writer.insert(
            format!("Actor/ShopData/{actor}.bshopdata"),
            to_document_bytes(&table, self.endian).expect("Failed to encode shop table"),
        );
        let path = self.actor_pack_path(actor);
        self.write_file(&path, writer.to_bytes().expect("Failed to encode actor pack"));
        path
    }

    fn actor_pack_path(&self, actor: &str) -> PathBuf {
        self.path()
            .join("content")
            .join("Actor")
            .join("Pack")
            .join(format!("{actor}.bactorpack"))
    }

    fn write_file(&self, path: &Path, bytes: Vec<u8>) {
        let parent = path.parent().expect("File path has no parent");
        fs::create_dir_all(parent).expect("Failed to create parent directory");
        fs::write(path, bytes).expect("Failed to write file");
    }
}

impl Default for TestMod {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a map object entry with a hash id and config name.
pub fn map_object(name: &str, id: u32) -> Value {
    Value::map(vec![
        ("HashId", Value::U32(id)),
        ("UnitConfigName", Value::Str(name.to_string())),
    ])
}

/// Builds a map object entry with extra parameters merged in.
pub fn map_object_with(name: &str, id: u32, extra: Vec<(&str, Value)>) -> Value {
    let mut fields = vec![
        ("HashId", Value::U32(id)),
        ("UnitConfigName", Value::Str(name.to_string())),
    ];
    fields.extend(extra);
    Value::map(fields)
}

/// Builds a map unit document around an object list.
pub fn map_unit(objs: Vec<Value>) -> Value {
    Value::map(vec![("Objs", Value::Array(objs))])
}

/// Builds a three-component translation array.
pub fn translate(x: f32, y: f32, z: f32) -> Value {
    Value::Array(vec![Value::F32(x), Value::F32(y), Value::F32(z)])
}

/// Builds a location marker entry.
pub fn location_marker(icon: &str, message_id: &str, save_flag: Option<&str>) -> Value {
    let mut fields = vec![
        ("Icon", Value::Str(icon.to_string())),
        ("MessageID", Value::Str(message_id.to_string())),
    ];
    if let Some(name) = save_flag {
        fields.push(("SaveFlag", Value::Str(name.to_string())));
    }
    Value::map(fields)
}

/// Builds an overworld static document around a marker list.
pub fn overworld_static(markers: Vec<Value>) -> Value {
    Value::map(vec![("LocationMarker", Value::Array(markers))])
}

/// Builds a saved boolean flag.
pub fn saved_bool(name: &str) -> Flag {
    let mut flag = Flag::new(name, FlagValues::default_for(FlagType::Bool));
    flag.is_save = true;
    flag
}

/// Builds a saved revival boolean flag with the overworld reset type.
pub fn revival_bool(name: &str) -> Flag {
    let mut flag = Flag::new_bool(true);
    flag.set_name(name);
    flag.is_save = true;
    flag.reset_type = 1;
    flag
}

/// Builds a saved counter flag.
pub fn saved_s32(name: &str) -> Flag {
    let mut flag = Flag::new_s32(false);
    flag.set_name(name);
    flag.is_save = true;
    flag
}

/// A small store covering the common flag kinds, with the snapshot taken.
///
/// Holds two stock revival flags, one quest flag, and one counter so
/// that both game data and save data pages come out non-empty.
pub fn sample_store() -> FlagStore {
    let mut store = FlagStore::new();
    store.add(
        FlagType::Bool,
        revival_bool("MainField_Enemy_Bokoblin_Junior_101"),
    );
    store.add(
        FlagType::Bool,
        revival_bool("MainField_Weapon_Sword_001_202"),
    );
    store.add(FlagType::Bool, saved_bool("BarrelErrand_Intro"));
    store.add(FlagType::S32, saved_s32("PictureBookSize_Item_Fruit_A"));
    store.reset_snapshot();
    store
}

/// A store holding `count` revival flags, with the snapshot taken.
///
/// Names follow the overworld convention and are collision-free for
/// any count the page serializer will see in practice.
pub fn populated_store(count: usize) -> FlagStore {
    let mut store = FlagStore::new();
    for i in 0..count {
        store.add(
            FlagType::Bool,
            revival_bool(&format!("MainField_Enemy_Golem_{i}_{}", 100_000 + i)),
        );
    }
    store.reset_snapshot();
    store
}
