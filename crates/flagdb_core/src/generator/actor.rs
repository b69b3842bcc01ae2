//! Actor bookkeeping flag generation.
//!
//! Every handled actor carries a fixed bundle of flags: compendium
//! tracking for things the camera can register, acquisition and timing
//! flags for equipment, and shop stock counters for vendors. An
//! [`ActorRun`] emits those bundles for the actors a mod ships and then
//! prunes managed flags whose actor no longer exists.

use super::commit_flag;
use crate::config::GeneratorConfig;
use crate::flag::{Flag, FlagType, FlagValues};
use crate::hash::hash_name;
use crate::naming::actor_flag_name;
use crate::store::FlagStore;
use crate::vanilla::{
    VANILLA_ANIMALS, VANILLA_ARMOR, VANILLA_ENEMIES, VANILLA_ITEMS, VANILLA_NPC_SHOPS,
    VANILLA_WEAPONS,
};
use std::collections::{BTreeSet, HashSet};

/// Bool flag kinds whose population the actor pass owns.
const MANAGED_BOOL_KINDS: [&str; 4] = [
    "IsNewPictureBook_",
    "IsRegisteredPictureBook_",
    "IsGet_",
    "IsShopSoldOut_",
];

/// Integer flag kinds whose population the actor pass owns.
const MANAGED_S32_KINDS: [&str; 4] = [
    "PictureBookSize_",
    "EquipTime_",
    "PorchTime_",
    "ShopStock_",
];

/// The bundle an actor receives, decided by its name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorCategory {
    /// Collectible items: compendium plus acquisition.
    Item,
    /// Armor: acquisition plus wear timers.
    Armor,
    /// Weapons: compendium, acquisition, and wear timers.
    Weapon,
    /// Enemies: compendium only.
    Enemy,
    /// Animals: compendium only.
    Animal,
    /// Shopkeepers: sold-out marker and per-item stock counters.
    Npc,
}

impl ActorCategory {
    /// Classifies an actor by its name prefix.
    #[must_use]
    pub fn classify(name: &str) -> Option<Self> {
        if name.starts_with("Item_") {
            Some(ActorCategory::Item)
        } else if name.starts_with("Armor_") {
            Some(ActorCategory::Armor)
        } else if name.starts_with("Weapon_") {
            Some(ActorCategory::Weapon)
        } else if name.starts_with("Enemy_") {
            Some(ActorCategory::Enemy)
        } else if name.starts_with("Animal_") {
            Some(ActorCategory::Animal)
        } else if name.starts_with("Npc_") {
            Some(ActorCategory::Npc)
        } else {
            None
        }
    }

    /// A lowercase label for reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ActorCategory::Item => "item",
            ActorCategory::Armor => "armor",
            ActorCategory::Weapon => "weapon",
            ActorCategory::Enemy => "enemy",
            ActorCategory::Animal => "animal",
            ActorCategory::Npc => "npc",
        }
    }
}

/// One actor to emit bundle flags for.
#[derive(Debug, Clone)]
pub struct ActorEntry {
    /// Actor name, also the flag name suffix.
    pub name: String,
    /// Bundle selector.
    pub category: ActorCategory,
    /// Wares sold by this actor. Only meaningful for NPCs.
    pub shop_items: Vec<String>,
}

impl ActorEntry {
    /// Builds an entry for a named actor, or `None` when its prefix is
    /// not a handled category.
    pub fn classify(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        let category = ActorCategory::classify(&name)?;
        Some(Self {
            name,
            category,
            shop_items: Vec::new(),
        })
    }

    /// Attaches the actor's shop inventory.
    #[must_use]
    pub fn with_shop_items(mut self, items: Vec<String>) -> Self {
        self.shop_items = items;
        self
    }
}

/// One actor flag pass over a store.
pub struct ActorRun<'a> {
    store: &'a mut FlagStore,
    config: &'a GeneratorConfig,
    exception_hashes: HashSet<i32>,
    emitted_bool: HashSet<i32>,
    emitted_s32: HashSet<i32>,
}

impl<'a> ActorRun<'a> {
    /// Prepares a run over `store`.
    pub fn new(store: &'a mut FlagStore, config: &'a GeneratorConfig) -> Self {
        let exception_hashes = config.exception_hashes();
        Self {
            store,
            config,
            exception_hashes,
            emitted_bool: HashSet::new(),
            emitted_s32: HashSet::new(),
        }
    }

    /// Emits the flag bundle for one actor.
    ///
    /// NPC entries without shop items produce nothing; an NPC that sells
    /// gets the sold-out marker plus one stock counter per distinct item.
    pub fn process(&mut self, entry: &ActorEntry) {
        let actor = entry.name.as_str();
        match entry.category {
            ActorCategory::Item => {
                self.emit_bool("IsNewPictureBook", actor, None);
                self.emit_bool("IsRegisteredPictureBook", actor, Some(4));
                self.emit_bool("IsGet", actor, None);
                self.emit_s32("PictureBookSize", actor);
            }
            ActorCategory::Armor => {
                self.emit_bool("IsGet", actor, None);
                self.emit_s32("EquipTime", actor);
                self.emit_s32("PorchTime", actor);
            }
            ActorCategory::Weapon => {
                self.emit_bool("IsNewPictureBook", actor, None);
                self.emit_bool("IsRegisteredPictureBook", actor, Some(5));
                self.emit_bool("IsGet", actor, None);
                self.emit_s32("PictureBookSize", actor);
                self.emit_s32("EquipTime", actor);
                self.emit_s32("PorchTime", actor);
            }
            ActorCategory::Enemy => {
                self.emit_bool("IsNewPictureBook", actor, None);
                self.emit_bool("IsRegisteredPictureBook", actor, Some(3));
                self.emit_s32("PictureBookSize", actor);
            }
            ActorCategory::Animal => {
                self.emit_bool("IsNewPictureBook", actor, None);
                self.emit_bool("IsRegisteredPictureBook", actor, Some(2));
                self.emit_s32("PictureBookSize", actor);
            }
            ActorCategory::Npc => {
                if entry.shop_items.is_empty() {
                    return;
                }
                self.emit_bool("IsShopSoldOut", actor, None);
                let items: BTreeSet<&str> =
                    entry.shop_items.iter().map(String::as_str).collect();
                for item in items {
                    self.emit_s32("ShopStock", &format!("{actor}_{item}"));
                }
            }
        }
    }

    /// Prunes managed flags no processed actor claimed and ends the run.
    ///
    /// Stock bundle flags and configured exceptions survive. Does nothing
    /// when pruning is disabled. Returns the number of entries removed.
    pub fn finish(self) -> usize {
        if !self.config.prune_actor_flags {
            return 0;
        }
        let vanilla = vanilla_actor_flag_hashes();
        let mut removed = 0;

        let mut bool_managed: HashSet<i32> = HashSet::new();
        for kind in MANAGED_BOOL_KINDS {
            bool_managed.extend(self.store.find_all_hashes(FlagType::Bool, kind));
        }
        for hash in bool_managed {
            if self.emitted_bool.contains(&hash)
                || vanilla.contains(&hash)
                || self.exception_hashes.contains(&hash)
            {
                continue;
            }
            removed += usize::from(self.store.remove(FlagType::Bool, hash));
        }

        let mut s32_managed: HashSet<i32> = HashSet::new();
        for kind in MANAGED_S32_KINDS {
            s32_managed.extend(self.store.find_all_hashes(FlagType::S32, kind));
        }
        for hash in s32_managed {
            if self.emitted_s32.contains(&hash)
                || vanilla.contains(&hash)
                || self.exception_hashes.contains(&hash)
            {
                continue;
            }
            removed += usize::from(self.store.remove(FlagType::S32, hash));
        }

        tracing::debug!("actor prune removed {} unclaimed flag entries", removed);
        removed
    }

    fn emit_bool(&mut self, kind: &str, actor: &str, category: Option<i32>) {
        let name = actor_flag_name(kind, actor);
        let hash = hash_name(&name);
        let mut flag = match self.store.find(FlagType::Bool, hash) {
            Some(existing) => existing.clone(),
            None => Flag::new_bool(false),
        };
        flag.set_name(&name);
        flag.is_save = true;
        if category.is_some() {
            flag.category = category;
        }
        if kind == "IsGet" {
            flag.is_one_trigger = true;
        }
        commit_flag(self.store, FlagType::Bool, hash, flag);
        self.emitted_bool.insert(hash);
    }

    fn emit_s32(&mut self, kind: &str, actor: &str) {
        let name = actor_flag_name(kind, actor);
        let hash = hash_name(&name);
        let mut flag = match self.store.find(FlagType::S32, hash) {
            Some(existing) => existing.clone(),
            None => Flag::new_s32(false),
        };
        flag.set_name(&name);
        flag.is_save = true;
        // Counters keep their initial value but always get the managed
        // range back.
        if let FlagValues::S32 { min, max, .. } = &mut flag.values {
            *min = 0;
            *max = i32::MAX;
        }
        commit_flag(self.store, FlagType::S32, hash, flag);
        self.emitted_s32.insert(hash);
    }
}

/// Hashes of every bundle flag the stock inventories produce.
fn vanilla_actor_flag_hashes() -> HashSet<i32> {
    fn insert(hashes: &mut HashSet<i32>, kind: &str, actor: &str) {
        hashes.insert(hash_name(&actor_flag_name(kind, actor)));
    }

    let mut hashes = HashSet::new();
    for item in VANILLA_ITEMS {
        insert(&mut hashes, "IsNewPictureBook", item);
        insert(&mut hashes, "IsRegisteredPictureBook", item);
        insert(&mut hashes, "IsGet", item);
        insert(&mut hashes, "PictureBookSize", item);
    }
    for armor in VANILLA_ARMOR {
        insert(&mut hashes, "IsGet", armor);
        insert(&mut hashes, "EquipTime", armor);
        insert(&mut hashes, "PorchTime", armor);
    }
    for weapon in VANILLA_WEAPONS {
        insert(&mut hashes, "IsNewPictureBook", weapon);
        insert(&mut hashes, "IsRegisteredPictureBook", weapon);
        insert(&mut hashes, "IsGet", weapon);
        insert(&mut hashes, "PictureBookSize", weapon);
        insert(&mut hashes, "EquipTime", weapon);
        insert(&mut hashes, "PorchTime", weapon);
    }
    for enemy in VANILLA_ENEMIES {
        insert(&mut hashes, "IsNewPictureBook", enemy);
        insert(&mut hashes, "IsRegisteredPictureBook", enemy);
        insert(&mut hashes, "PictureBookSize", enemy);
    }
    for animal in VANILLA_ANIMALS {
        insert(&mut hashes, "IsNewPictureBook", animal);
        insert(&mut hashes, "IsRegisteredPictureBook", animal);
        insert(&mut hashes, "PictureBookSize", animal);
    }
    for (npc, wares) in VANILLA_NPC_SHOPS {
        insert(&mut hashes, "IsShopSoldOut", npc);
        for item in *wares {
            hashes.insert(hash_name(&format!("ShopStock_{npc}_{item}")));
        }
    }
    hashes
}
