//! End-to-end tests for the flag pipeline.
//!
//! Each test builds stock containers in memory, loads them into a store,
//! reconciles against modded map data, and reads the serialized output
//! back the way the game would.

use flagdb_codec::{from_document_bytes, Archive, Endian, Value};
use flagdb_core::{
    build_game_data, build_save_data, extract_save_trailer, hash_name, load_game_data, ActorEntry,
    ActorRun, CoreResult, Flag, FlagStore, FlagType, FlagValues, GeneratorConfig, MapId,
    NullReference, ReferenceData, RevivalRun, SaveDataTrailer, UnitKind,
};

/// Stock world data served from memory.
struct StockWorld {
    unit: Value,
}

impl ReferenceData for StockWorld {
    fn stock_map(&self, _map: &MapId) -> CoreResult<Option<Value>> {
        Ok(Some(self.unit.clone()))
    }

    fn actor_info(&self) -> CoreResult<Option<Value>> {
        Ok(None)
    }
}

fn object(name: &str, id: u32) -> Value {
    Value::map(vec![
        ("HashId", Value::U32(id)),
        ("UnitConfigName", Value::Str(name.to_string())),
    ])
}

fn unit(objs: Vec<Value>) -> Value {
    Value::map(vec![("Objs", Value::Array(objs))])
}

fn revival_bool(name: &str) -> Flag {
    let mut flag = Flag::new_bool(true);
    flag.set_name(name);
    flag.is_save = true;
    flag.reset_type = 1;
    flag
}

/// A store holding two revival flags and one ordinary quest flag, with
/// the snapshot already taken.
fn stock_store() -> FlagStore {
    let mut store = FlagStore::new();
    store.add(
        FlagType::Bool,
        revival_bool("MainField_Enemy_Bokoblin_Junior_101"),
    );
    store.add(
        FlagType::Bool,
        revival_bool("MainField_Weapon_Sword_001_202"),
    );
    let mut quest = Flag::new("BarrelErrand_Intro", FlagValues::default_for(FlagType::Bool));
    quest.is_save = true;
    store.add(FlagType::Bool, quest);
    store.reset_snapshot();
    store
}

fn stock_trailer() -> SaveDataTrailer {
    SaveDataTrailer {
        first: vec![0xAA, 0xBB, 0xCC],
        second: vec![0xDD],
    }
}

#[test]
fn loading_a_serialized_container_reports_no_changes() {
    let store = stock_store();
    let game = build_game_data(&store, Endian::Little).unwrap();

    let archive = Archive::from_bytes(&game).unwrap();
    let mut reloaded = FlagStore::new();
    let members = load_game_data(&archive, &mut reloaded).unwrap();

    // One ordinary bool member, one revival bool member.
    assert_eq!(members, 2);
    assert_eq!(reloaded.total_changes(), 0);
    let sword = reloaded
        .find(FlagType::Bool, hash_name("MainField_Weapon_Sword_001_202"))
        .unwrap();
    assert!(sword.is_revival);
    assert!(sword.is_save);

    // Serializing the reloaded store reproduces the container byte for byte.
    let again = build_game_data(&reloaded, Endian::Little).unwrap();
    assert_eq!(again, game);
}

#[test]
fn modded_map_reconciles_and_round_trips() {
    let mut store = stock_store();
    let stock = StockWorld {
        unit: unit(vec![
            object("Enemy_Bokoblin_Junior", 101),
            object("Weapon_Sword_001", 202),
        ]),
    };
    let stock_save = build_save_data(&store, Endian::Little, &stock_trailer()).unwrap();

    // The mod keeps the bokoblin, drops the sword, and places a chest.
    let config = GeneratorConfig::new()
        .with_main_field_reset(1)
        .with_dungeon_reset(2);
    let mods = unit(vec![
        object("Enemy_Bokoblin_Junior", 101),
        object("TBox_Field_Wood", 303),
    ]);

    let mut run = RevivalRun::new(&mut store, &config, &stock, None).unwrap();
    run.reconcile_unit(&MapId::main_field("C-4", UnitKind::Static), &mods)
        .unwrap();
    let removed = run.finish();
    assert_eq!(removed, 1);

    // The mod also ships a custom item actor.
    let mut actors = ActorRun::new(&mut store, &config);
    actors.process(&ActorEntry::classify("Item_Fruit_CustomBerry").unwrap());
    assert_eq!(actors.finish(), 0);

    let bools = store.change_set(FlagType::Bool);
    assert!(bools.added.contains(&hash_name("MainField_TBox_Field_Wood_303")));
    assert!(bools.added.contains(&hash_name("IsGet_Item_Fruit_CustomBerry")));
    assert!(bools.deleted.contains(&hash_name("MainField_Weapon_Sword_001_202")));
    let ints = store.change_set(FlagType::S32);
    assert!(ints
        .added
        .contains(&hash_name("PictureBookSize_Item_Fruit_CustomBerry")));

    // Rebuild both containers, carrying the stock trailer across.
    let game = build_game_data(&store, Endian::Little).unwrap();
    let trailer = extract_save_trailer(&Archive::from_bytes(&stock_save).unwrap()).unwrap();
    assert_eq!(trailer, stock_trailer());
    let save = build_save_data(&store, Endian::Little, &trailer).unwrap();

    let mut reloaded = FlagStore::new();
    load_game_data(&Archive::from_bytes(&game).unwrap(), &mut reloaded).unwrap();
    assert!(reloaded
        .find(FlagType::Bool, hash_name("MainField_TBox_Field_Wood_303"))
        .is_some());
    assert!(reloaded
        .find(FlagType::Bool, hash_name("MainField_Weapon_Sword_001_202"))
        .is_none());
    let kept = reloaded
        .find(FlagType::Bool, hash_name("MainField_Enemy_Bokoblin_Junior_101"))
        .unwrap();
    assert_eq!(kept.reset_type, 1);

    let preserved = extract_save_trailer(&Archive::from_bytes(&save).unwrap()).unwrap();
    assert_eq!(preserved, stock_trailer());
}

#[test]
fn marker_flags_reach_the_save_pages() {
    let mut store = FlagStore::new();
    let config = GeneratorConfig::new().with_main_field_reset(1);
    let static_doc = Value::map(vec![(
        "LocationMarker",
        Value::Array(vec![Value::map(vec![
            ("Icon", Value::Str("Dungeon".to_string())),
            ("MessageID", Value::Str("Dungeon900".to_string())),
            ("SaveFlag", Value::Str("Location_Dungeon900".to_string())),
        ])]),
    )]);

    let mut run = RevivalRun::new(&mut store, &config, &NullReference, None).unwrap();
    run.reconcile_markers(&static_doc);
    run.finish();

    let save = build_save_data(&store, Endian::Little, &SaveDataTrailer::default()).unwrap();
    let archive = Archive::from_bytes(&save).unwrap();
    let (page, _) = from_document_bytes(archive.get("saveformat_0.bgsvdata").unwrap()).unwrap();
    let file_list = page.get("file_list").and_then(Value::as_array).unwrap();
    let records = file_list[1].as_array().unwrap();
    let names: Vec<&str> = records
        .iter()
        .filter_map(|record| record.get("DataName").and_then(Value::as_str))
        .collect();

    assert_eq!(records.len(), 3);
    assert!(names.contains(&"Location_Dungeon900"));
    assert!(names.contains(&"Enter_Dungeon900"));
    assert!(names.contains(&"CompleteTreasure_Dungeon900"));
}

#[test]
fn big_endian_containers_carry_their_byte_order() {
    let store = stock_store();
    let game = build_game_data(&store, Endian::Big).unwrap();

    let archive = Archive::from_bytes(&game).unwrap();
    assert_eq!(archive.endian(), Endian::Big);
    let mut reloaded = FlagStore::new();
    load_game_data(&archive, &mut reloaded).unwrap();
    assert_eq!(reloaded.total_changes(), 0);
}
