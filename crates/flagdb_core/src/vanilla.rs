//! Stock actor inventories.
//!
//! Reconciliation needs to know which actors the base game tracks with
//! flags, which ones explicitly never get flags, and which actors stock
//! the inventory bundles. These tables list the shipped data; modded
//! actors are discovered at runtime from actor info instead.

use flagdb_codec::Value;
use std::collections::HashSet;

/// Actors the base game tracks with revival flags.
pub const VANILLA_ACTORS_WITH_FLAGS: &[&str] = &[
    "Enemy_Assassin_Junior",
    "Enemy_Assassin_Middle",
    "Enemy_Assassin_Senior",
    "Enemy_Bokoblin_Junior",
    "Enemy_Bokoblin_Middle",
    "Enemy_Bokoblin_Senior",
    "Enemy_Bokoblin_Dark",
    "Enemy_Bokoblin_Gold",
    "Enemy_Chuchu_Junior",
    "Enemy_Chuchu_Middle",
    "Enemy_Chuchu_Senior",
    "Enemy_Chuchu_Electric_Junior",
    "Enemy_Chuchu_Fire_Junior",
    "Enemy_Chuchu_Ice_Junior",
    "Enemy_Giant_Junior",
    "Enemy_Giant_Middle",
    "Enemy_Giant_Senior",
    "Enemy_Golem_Junior",
    "Enemy_Golem_Middle",
    "Enemy_Golem_Senior",
    "Enemy_Golem_Little",
    "Enemy_Guardian_Mini_Junior",
    "Enemy_Guardian_Mini_Middle",
    "Enemy_Guardian_Mini_Senior",
    "Enemy_Keese_Junior",
    "Enemy_Keese_Electric_Junior",
    "Enemy_Keese_Fire_Junior",
    "Enemy_Keese_Ice_Junior",
    "Enemy_Lizalfos_Junior",
    "Enemy_Lizalfos_Middle",
    "Enemy_Lizalfos_Senior",
    "Enemy_Lizalfos_Dark",
    "Enemy_Lizalfos_Electric",
    "Enemy_Lizalfos_Fire",
    "Enemy_Lizalfos_Ice",
    "Enemy_Lynel_Junior",
    "Enemy_Lynel_Middle",
    "Enemy_Lynel_Senior",
    "Enemy_Lynel_Dark",
    "Enemy_Moriblin_Junior",
    "Enemy_Moriblin_Middle",
    "Enemy_Moriblin_Senior",
    "Enemy_Octarock_Forest",
    "Enemy_Octarock_Rock",
    "Enemy_Octarock_Sky",
    "Enemy_Octarock_Snow",
    "Enemy_Octarock_Water",
    "Enemy_Wizzrobe_Electric",
    "Enemy_Wizzrobe_Fire",
    "Enemy_Wizzrobe_Ice",
    "Enemy_Wizzrobe_Meteo",
    "Enemy_Wizzrobe_Blizzard",
    "Enemy_Wizzrobe_Thunder",
    "Weapon_Sword_001",
    "Weapon_Sword_002",
    "Weapon_Sword_003",
    "Weapon_Sword_015",
    "Weapon_Sword_030",
    "Weapon_Sword_070",
    "Weapon_Lsword_001",
    "Weapon_Lsword_010",
    "Weapon_Lsword_054",
    "Weapon_Spear_001",
    "Weapon_Spear_032",
    "Weapon_Spear_050",
    "Weapon_Bow_001",
    "Weapon_Bow_002",
    "Weapon_Bow_028",
    "Weapon_Bow_040",
    "Weapon_Shield_001",
    "Weapon_Shield_003",
    "Weapon_Shield_022",
    "Weapon_Shield_030",
    "TBox_Field_Wood",
    "TBox_Field_Iron",
    "TBox_Dungeon_Wood",
    "TBox_Dungeon_Iron",
    "TBox_Dungeon_Stone",
    "Obj_LiftRockWhite_A_01",
    "Obj_LiftRockGL_A_01",
    "Obj_BreakBoxIron_A_01",
    "Obj_BoardIron_A_01",
    "Obj_TreeApple_A_L_01",
    "Item_Fruit_A",
    "Item_Fruit_B",
    "Item_Mushroom_E",
    "Item_Ore_A",
    "Item_Ore_B",
    "Item_Enemy_00",
    "Item_Enemy_01",
];

/// Actors the base game never tracks, regardless of placement.
pub const VANILLA_ACTORS_NO_FLAGS: &[&str] = &[
    "Area",
    "AreaCulling",
    "AirWall",
    "ActorObserverTag",
    "AutoPlacementTag",
    "DemoChangeFieldTag",
    "EventTag",
    "FarModelCulling",
    "LinkTagAnd",
    "LinkTagCount",
    "LinkTagNAnd",
    "LinkTagNOr",
    "LinkTagNone",
    "LinkTagOr",
    "LinkTagPulse",
    "LinkTagXOr",
    "MapConnection",
    "MapEditObj_VeilLiftoff",
    "SignalFlowchart",
    "SpotBgmTag",
    "TagTeleport",
];

/// Stock item actors with inventory bundles.
pub const VANILLA_ITEMS: &[&str] = &[
    "Item_Fruit_A",
    "Item_Fruit_B",
    "Item_Fruit_C",
    "Item_Fruit_D",
    "Item_Fruit_E",
    "Item_Fruit_F",
    "Item_Fruit_G",
    "Item_Mushroom_A",
    "Item_Mushroom_B",
    "Item_Mushroom_C",
    "Item_Mushroom_E",
    "Item_Mushroom_H",
    "Item_Plant_A",
    "Item_Plant_B",
    "Item_Plant_C",
    "Item_Meat_01",
    "Item_Meat_02",
    "Item_Meat_06",
    "Item_Fish_01",
    "Item_Fish_02",
    "Item_Fish_07",
    "Item_Insect_A",
    "Item_Insect_F",
    "Item_Ore_A",
    "Item_Ore_B",
    "Item_Ore_C",
    "Item_Ore_G",
    "Item_Enemy_00",
    "Item_Enemy_01",
    "Item_Enemy_05",
    "Item_Material_01",
    "Item_Material_04",
];

/// Stock armor actors with inventory bundles.
pub const VANILLA_ARMOR: &[&str] = &[
    "Armor_001_Head",
    "Armor_001_Upper",
    "Armor_001_Lower",
    "Armor_005_Head",
    "Armor_005_Upper",
    "Armor_005_Lower",
    "Armor_014_Head",
    "Armor_014_Upper",
    "Armor_014_Lower",
    "Armor_046_Head",
    "Armor_046_Upper",
    "Armor_046_Lower",
    "Armor_Default_Upper",
];

/// Stock weapon actors with inventory bundles.
pub const VANILLA_WEAPONS: &[&str] = &[
    "Weapon_Sword_001",
    "Weapon_Sword_002",
    "Weapon_Sword_003",
    "Weapon_Sword_015",
    "Weapon_Sword_030",
    "Weapon_Sword_070",
    "Weapon_Lsword_001",
    "Weapon_Lsword_010",
    "Weapon_Lsword_054",
    "Weapon_Spear_001",
    "Weapon_Spear_032",
    "Weapon_Spear_050",
    "Weapon_Bow_001",
    "Weapon_Bow_002",
    "Weapon_Bow_028",
    "Weapon_Bow_040",
    "Weapon_Shield_001",
    "Weapon_Shield_003",
    "Weapon_Shield_022",
    "Weapon_Shield_030",
];

/// Stock enemy actors with compendium bundles.
pub const VANILLA_ENEMIES: &[&str] = &[
    "Enemy_Bokoblin_Junior",
    "Enemy_Bokoblin_Middle",
    "Enemy_Bokoblin_Senior",
    "Enemy_Chuchu_Junior",
    "Enemy_Golem_Junior",
    "Enemy_Guardian_Mini_Junior",
    "Enemy_Keese_Junior",
    "Enemy_Lizalfos_Junior",
    "Enemy_Lynel_Junior",
    "Enemy_Moriblin_Junior",
    "Enemy_Octarock_Forest",
    "Enemy_Wizzrobe_Fire",
];

/// Stock creature actors with compendium bundles.
pub const VANILLA_ANIMALS: &[&str] = &[
    "Animal_Boar_A",
    "Animal_Deer_A",
    "Animal_Deer_B",
    "Animal_Fox_A",
    "Animal_Fox_B",
    "Animal_Heron_A",
    "Animal_Ibex_A",
    "Animal_Pigeon_A",
    "Animal_Squirrel_A",
    "Animal_Wolf_A",
];

/// Stock shopkeepers and their wares.
pub const VANILLA_NPC_SHOPS: &[(&str, &[&str])] = &[
    (
        "Npc_Hateno002",
        &["Item_Fruit_A", "Item_Mushroom_E", "Item_Plant_A", "Item_Meat_01"],
    ),
    (
        "Npc_Kakariko001",
        &["Item_Plant_B", "Item_Plant_C", "Item_Fruit_B"],
    ),
    (
        "Npc_Zora001",
        &["Item_Fish_01", "Item_Fish_02", "Item_Fish_07"],
    ),
    (
        "Npc_Gerudo_Shop_Weapon",
        &["Weapon_Sword_015", "Weapon_Spear_032", "Weapon_Shield_022"],
    ),
    (
        "Npc_Goron_Jewel",
        &["Item_Ore_A", "Item_Ore_B", "Item_Ore_C", "Item_Ore_G"],
    ),
];

/// Scans actor info for modded actors that carry a `generalLife` value,
/// which marks them as revival-tracked.
///
/// Actors already covered by the stock tables are skipped.
#[must_use]
pub fn actors_with_life(actor_info: &Value) -> HashSet<String> {
    let mut found = HashSet::new();
    let Some(actors) = actor_info.get("Actors").and_then(Value::as_array) else {
        return found;
    };
    for actor in actors {
        let Some(name) = actor.get("name").and_then(Value::as_str) else {
            continue;
        };
        if VANILLA_ACTORS_WITH_FLAGS.contains(&name) || VANILLA_ACTORS_NO_FLAGS.contains(&name) {
            continue;
        }
        if actor.get("generalLife").is_some() {
            found.insert(name.to_string());
        }
    }
    found
}
