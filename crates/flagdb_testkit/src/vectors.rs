//! Pinned test vectors for flag identity.
//!
//! Flags are addressed by the signed CRC-32 of their name everywhere a
//! container stores them. These vectors pin that mapping so editors in
//! other languages produce byte-identical output.

use serde::{Deserialize, Serialize};

/// A test vector that can be shared across languages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// The flag name to hash.
    pub name: String,
    /// Expected signed hash of the name.
    pub expected: i32,
}

/// Flag name hash vectors.
pub fn flag_hash_vectors() -> Vec<TestVector> {
    vec![
        TestVector {
            id: "hash_empty".into(),
            description: "Empty name hashes to zero".into(),
            name: "".into(),
            expected: 0,
        },
        TestVector {
            id: "hash_check".into(),
            description: "Standard CRC-32 check string".into(),
            name: "123456789".into(),
            expected: 0xCBF4_3926_u32 as i32,
        },
        TestVector {
            id: "hash_pangram".into(),
            description: "Long name spanning several words".into(),
            name: "The quick brown fox jumps over the lazy dog".into(),
            expected: 0x414F_A339_u32 as i32,
        },
        TestVector {
            id: "hash_revival_enemy".into(),
            description: "Stock revival flag for an overworld enemy".into(),
            name: "MainField_Enemy_Bokoblin_Junior_101".into(),
            expected: 0x4766_4D6C_u32 as i32,
        },
        TestVector {
            id: "hash_treasure_chest".into(),
            description: "Generated treasure chest flag".into(),
            name: "MainField_TBox_Field_Wood_9".into(),
            expected: 0xDA87_5363_u32 as i32,
        },
        TestVector {
            id: "hash_shrine_open".into(),
            description: "Shrine discovery flag".into(),
            name: "Open_Dungeon120".into(),
            expected: 0x4A81_0366_u32 as i32,
        },
        TestVector {
            id: "hash_shrine_clear".into(),
            description: "Shrine completion flag".into(),
            name: "Clear_Dungeon000".into(),
            expected: 0xF7A9_CD64_u32 as i32,
        },
        TestVector {
            id: "hash_item_get".into(),
            description: "Generated item acquisition flag".into(),
            name: "IsGet_Item_Fruit_A".into(),
            expected: 0xE144_36D9_u32 as i32,
        },
        TestVector {
            id: "hash_shop_stock".into(),
            description: "Generated shop stock counter".into(),
            name: "ShopStock_Npc_Trader_Item_Fruit_A".into(),
            expected: 0x5F61_D9D2_u32 as i32,
        },
        TestVector {
            id: "hash_treasure_complete".into(),
            description: "Generated dungeon treasure completion flag".into(),
            name: "CompleteTreasure_Dungeon900".into(),
            expected: 0x5C43_8EAD_u32 as i32,
        },
    ]
}

/// Save exclusion hash vectors.
///
/// These names stay in game data but are skipped when the save format
/// pages are built. The skip is keyed on the hash, so the mapping must
/// agree across implementations.
pub fn save_exclusion_vectors() -> Vec<TestVector> {
    vec![
        TestVector {
            id: "exclude_album_picture_index".into(),
            description: "Album picture index".into(),
            name: "AlbumPictureIndex".into(),
            expected: 0x8054_3223_u32 as i32,
        },
        TestVector {
            id: "exclude_aoc_hard_mode".into(),
            description: "Expansion hard mode toggle".into(),
            name: "AoC_HardMode_Enabled".into(),
            expected: 0xE512_56E2_u32 as i32,
        },
        TestVector {
            id: "exclude_caption_pict_size".into(),
            description: "Caption picture size".into(),
            name: "CaptionPictSize".into(),
            expected: 0xA067_8286_u32 as i32,
        },
        TestVector {
            id: "exclude_famous_picture_index".into(),
            description: "Famous picture index".into(),
            name: "FamousPictureIndex".into(),
            expected: 0xA875_BB3B_u32 as i32,
        },
        TestVector {
            id: "exclude_amiibo_item".into(),
            description: "Amiibo item acquisition marker".into(),
            name: "IsGet_Obj_AmiiboItem".into(),
            expected: 0x89EB_CAE4_u32 as i32,
        },
        TestVector {
            id: "exclude_latest_aoc_version".into(),
            description: "Latest expansion version played".into(),
            name: "LatestAoCVerPlayed".into(),
            expected: 0x86F1_C752_u32 as i32,
        },
        TestVector {
            id: "exclude_seak_sensor_index".into(),
            description: "Sensor picture index".into(),
            name: "SeakSensorPictureIndex".into(),
            expected: 0xA089_830C_u32 as i32,
        },
    ]
}

/// Generate all test vectors as JSON for cross-language use.
pub fn all_vectors_json() -> String {
    let vectors = AllTestVectors {
        flag_hash: flag_hash_vectors(),
        save_exclusion: save_exclusion_vectors(),
    };

    serde_json::to_string_pretty(&vectors).expect("Failed to serialize vectors")
}

#[derive(Debug, Serialize, Deserialize)]
struct AllTestVectors {
    flag_hash: Vec<TestVector>,
    save_exclusion: Vec<TestVector>,
}
