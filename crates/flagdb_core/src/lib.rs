//! # flagdb Core
//!
//! Flag database engine for flagdb.
//!
//! This crate provides:
//! - the typed flag model with CRC-32 name identity
//! - the snapshot/working flag store with functional change accounting
//! - deterministic flag naming for world objects and actor bundles
//! - the revival and actor reconciliation passes
//! - paginated container serialization for game data and save data
//!
//! ## Architecture
//!
//! A [`FlagStore`] is loaded from the game-data members of a bootup
//! archive, mutated by the reconciliation passes, and serialized back
//! out through [`build_game_data`] and [`build_save_data`]. The store
//! keeps the loaded state as an immutable snapshot next to the working
//! copy, so the change report at the end of a run is computed rather
//! than tracked.
//!
//! The reconciliation passes ([`RevivalRun`] and [`ActorRun`]) never
//! talk to the filesystem directly. Stock map units and actor metadata
//! come in through the [`ReferenceData`] trait, which keeps the passes
//! testable against in-memory fixtures.
//!
//! ## Key Invariants
//!
//! - A flag's hash is always the signed CRC-32 of its current name
//! - Renames move the flag to its new hash; the old entry disappears
//! - Serialized containers are deterministic: records sort by signed
//!   hash and split into fixed-size pages
//! - Save-data serialization preserves the two format members it does
//!   not understand
//!
//! ## Usage
//!
//! ```
//! use flagdb_core::{Flag, FlagStore, FlagType, FlagValues};
//!
//! let mut store = FlagStore::new();
//! let mut flag = Flag::new(
//!     "MainField_Weapon_Sword_001_12345678",
//!     FlagValues::default_for(FlagType::Bool),
//! );
//! flag.is_save = true;
//! store.add(FlagType::Bool, flag);
//!
//! let changes = store.change_set(FlagType::Bool);
//! assert_eq!(changes.added.len(), 1);
//! assert!(changes.deleted.is_empty());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Version of the core crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod error;
mod flag;
mod generator;
mod hash;
mod naming;
mod pages;
mod reference;
mod shrine;
mod store;
mod vanilla;
mod vector;
mod world;

pub use config::GeneratorConfig;
pub use error::{CoreError, CoreResult};
pub use flag::{Flag, FlagType, FlagValues};
pub use generator::{ActorCategory, ActorEntry, ActorRun, RevivalRun};
pub use hash::hash_name;
pub use naming::{actor_flag_name, default_object_flag_name, world_object_flag_name, MapContext};
pub use pages::{
    build_game_data, build_save_data, extract_save_trailer, load_game_data, SaveDataTrailer,
    GAME_DATA_MEMBER, GAME_DATA_PAGE, SAVE_DATA_PAGE, SAVE_FILE_NAME, SAVE_FORMAT_MEMBER,
    SAVE_FORMAT_REVISION,
};
pub use reference::{DirReference, MapId, NullReference, ReferenceData, UnitKind};
pub use shrine::{is_vanilla_shrine, ShrineLocator, VANILLA_SHRINES};
pub use store::{ChangeSet, FlagStore};
pub use vanilla::{
    actors_with_life, VANILLA_ACTORS_NO_FLAGS, VANILLA_ACTORS_WITH_FLAGS, VANILLA_ANIMALS,
    VANILLA_ARMOR, VANILLA_ENEMIES, VANILLA_ITEMS, VANILLA_NPC_SHOPS, VANILLA_WEAPONS,
};
pub use vector::{Vec2, Vec3, Vec4};
pub use world::{location_markers, map_objects, LocationMarker, MapObject};
