//! Revival flag reconciliation.
//!
//! A [`RevivalRun`] walks modded map units, compares each placed object
//! against its stock counterpart, and drives the store toward the flag
//! set the modded world needs: new objects gain flags, renamed objects
//! carry their flag to the new name, and objects removed from stock maps
//! lose theirs. Location markers for custom dungeons produce their entry
//! and completion flags in the same pass.
//!
//! Call [`RevivalRun::reconcile_markers`] for every modded overworld
//! static before reconciling units, so marker-derived shrines are known
//! when object names are derived. Finish with [`RevivalRun::finish`] to
//! apply the deletion sweep.

use super::commit_flag;
use crate::config::GeneratorConfig;
use crate::error::{CoreError, CoreResult};
use crate::flag::{Flag, FlagType, FlagValues};
use crate::hash::hash_name;
use crate::naming::{default_object_flag_name, world_object_flag_name, MapContext};
use crate::reference::{MapId, ReferenceData};
use crate::shrine::{is_vanilla_shrine, ShrineLocator};
use crate::store::FlagStore;
use crate::vanilla::{actors_with_life, VANILLA_ACTORS_WITH_FLAGS};
use crate::world::{location_markers, map_objects, MapObject};
use flagdb_codec::Value;
use std::collections::{HashMap, HashSet};

/// One revival reconciliation pass over a set of modded maps.
pub struct RevivalRun<'a> {
    store: &'a mut FlagStore,
    config: &'a GeneratorConfig,
    reference: &'a dyn ReferenceData,
    shrines: ShrineLocator,
    /// Hashes shielded from the deletion sweep because the mod still
    /// places the object.
    ignore: HashSet<i32>,
    /// Default-form hashes of stock objects the mod no longer places.
    delete: HashSet<i32>,
    exception_hashes: HashSet<i32>,
    /// Actor names that carry revival flags when placed.
    flag_bearing: HashSet<String>,
}

impl<'a> RevivalRun<'a> {
    /// Prepares a run over `store`.
    ///
    /// `aoc_static` is the DLC overworld static, used only to seed the
    /// shrine locator with DLC shrine positions. Actor info from
    /// `reference` extends the set of flag-bearing actors with every
    /// actor that declares a life value.
    pub fn new(
        store: &'a mut FlagStore,
        config: &'a GeneratorConfig,
        reference: &'a dyn ReferenceData,
        aoc_static: Option<&Value>,
    ) -> CoreResult<Self> {
        let mut shrines = ShrineLocator::vanilla();
        if let Some(static_doc) = aoc_static {
            shrines.discover_from_static(static_doc);
        }
        let mut flag_bearing: HashSet<String> = VANILLA_ACTORS_WITH_FLAGS
            .iter()
            .map(|name| (*name).to_string())
            .collect();
        if let Some(info) = reference.actor_info()? {
            flag_bearing.extend(actors_with_life(&info));
        }
        let exception_hashes = config.exception_hashes();
        Ok(Self {
            store,
            config,
            reference,
            shrines,
            ignore: HashSet::new(),
            delete: HashSet::new(),
            exception_hashes,
            flag_bearing,
        })
    }

    /// Harvests custom dungeon markers from an overworld static.
    ///
    /// Each marker with a `Dungeon` icon and a non-stock message id adds
    /// its position to the shrine locator. Markers that also carry a
    /// `SaveFlag` produce the location counter plus the one-trigger
    /// `Enter_` and `CompleteTreasure_` flags.
    pub fn reconcile_markers(&mut self, static_doc: &Value) {
        for marker in location_markers(static_doc) {
            if marker.icon() != Some("Dungeon") {
                continue;
            }
            let Some(message_id) = marker.message_id() else {
                continue;
            };
            if is_vanilla_shrine(message_id) {
                continue;
            }
            if let Some(position) = marker.location() {
                self.shrines.add(message_id, position);
            }
            let Some(save_flag) = marker.save_flag() else {
                continue;
            };
            self.emit_location_counter(save_flag);
            self.emit_visit_flag(&format!("Enter_{message_id}"));
            self.emit_visit_flag(&format!("CompleteTreasure_{message_id}"));
        }
    }

    /// Reconciles one modded map unit against its stock counterpart.
    ///
    /// Objects are matched by placement id. A flag is (re)written when
    /// the object is new to the map, renamed, or changed its object
    /// links; stock objects the mod dropped are queued for the deletion
    /// sweep. The pass is skipped entirely when no reset type is
    /// configured for the unit's map category.
    pub fn reconcile_unit(&mut self, map: &MapId, unit: &Value) -> CoreResult<()> {
        let ctx = match map {
            MapId::MainField { .. } => MapContext::MainField,
            MapId::Dungeon { pack, .. } => MapContext::Dungeon { name: pack.clone() },
        };
        let Some(reset_type) = self.reset_type_for(&ctx) else {
            return Ok(());
        };
        let stock_doc = self.reference.stock_map(map)?;
        let mut stock_by_id: HashMap<u32, MapObject<'_>> = HashMap::new();
        if let Some(doc) = stock_doc.as_ref() {
            // Duplicate ids occur in shipped maps; the first placement wins.
            for stock_obj in map_objects(doc) {
                if let Some(id) = stock_obj.hash_id() {
                    stock_by_id.entry(id).or_insert(stock_obj);
                }
            }
        }

        let mut seen: HashSet<u32> = HashSet::new();
        for obj in map_objects(unit) {
            let name = obj.unit_config_name().ok_or_else(|| {
                let label = obj
                    .hash_id()
                    .map_or_else(|| "unknown object".to_string(), |id| format!("0x{id:08x}"));
                CoreError::missing_parameter(label, "UnitConfigName")
            })?;
            let id = obj
                .hash_id()
                .ok_or_else(|| CoreError::missing_parameter(name, "HashId"))?;
            seen.insert(id);
            self.ignore
                .insert(hash_name(&default_object_flag_name(&ctx, name, id)));
            if obj.is_link_tag() && obj.params().is_none() {
                continue;
            }
            match stock_by_id.get(&id) {
                None => self.reconcile_object(&obj, &obj, &ctx, reset_type)?,
                Some(stock_obj) => {
                    let changed = stock_obj.unit_config_name() != obj.unit_config_name()
                        || stock_obj.has_object_links() != obj.has_object_links();
                    if changed {
                        self.reconcile_object(&obj, stock_obj, &ctx, reset_type)?;
                    }
                }
            }
        }

        if let Some(doc) = stock_doc.as_ref() {
            for stock_obj in map_objects(doc) {
                let Some(id) = stock_obj.hash_id() else {
                    continue;
                };
                if seen.contains(&id) {
                    continue;
                }
                let Some(name) = stock_obj.unit_config_name() else {
                    continue;
                };
                self.delete
                    .insert(hash_name(&default_object_flag_name(&ctx, name, id)));
            }
        }
        Ok(())
    }

    /// Applies the deletion sweep and ends the run.
    ///
    /// Every queued hash that no surviving placement shields, and that is
    /// not configured as an exception, is removed from both the boolean
    /// and integer partitions. Returns the number of entries removed.
    pub fn finish(self) -> usize {
        let mut removed = 0;
        for hash in &self.delete {
            if self.ignore.contains(hash) || self.exception_hashes.contains(hash) {
                continue;
            }
            removed += usize::from(self.store.remove(FlagType::Bool, *hash));
            removed += usize::from(self.store.remove(FlagType::S32, *hash));
        }
        tracing::debug!("revival sweep removed {} stale flag entries", removed);
        removed
    }

    fn reset_type_for(&self, ctx: &MapContext) -> Option<i32> {
        match ctx {
            MapContext::MainField => self.config.main_field_reset,
            MapContext::Dungeon { .. } => self.config.dungeon_reset,
        }
    }

    fn reconcile_object(
        &mut self,
        new_obj: &MapObject<'_>,
        old_obj: &MapObject<'_>,
        ctx: &MapContext,
        reset_type: i32,
    ) -> CoreResult<()> {
        let link_tag = new_obj.is_link_tag();
        let old_name = world_object_flag_name(old_obj, ctx, &self.shrines)?;
        let new_name = world_object_flag_name(new_obj, ctx, &self.shrines)?;
        if self.config.is_reconcile_excepted(&old_name, link_tag)
            || self.config.is_reconcile_excepted(&new_name, link_tag)
        {
            return Ok(());
        }
        let use_counter = link_tag && new_obj.increments_save();
        let ftype = if use_counter { FlagType::S32 } else { FlagType::Bool };
        let old_hash = hash_name(&old_name);
        let new_hash = hash_name(&new_name);
        if !self.should_make_flag(new_obj) {
            self.store.remove(ftype, old_hash);
            self.store.remove(ftype, new_hash);
            return Ok(());
        }
        let mut flag = match self.store.find(ftype, old_hash) {
            Some(existing) => existing.clone(),
            None if use_counter => Flag::new_s32(false),
            None => Flag::new_bool(!link_tag),
        };
        flag.set_name(&new_name);
        flag.is_event_associated = new_obj.has_object_links();
        flag.is_save = true;
        flag.reset_type = reset_type;
        commit_flag(self.store, ftype, old_hash, flag);
        Ok(())
    }

    /// Whether a placed object earns a flag at all.
    fn should_make_flag(&self, obj: &MapObject<'_>) -> bool {
        if let Some(forced) = obj.force_flag() {
            return forced;
        }
        if obj.is_link_tag() {
            // Tags in naming mode 0 without an explicit flag name have
            // nothing to point at.
            return !(obj.save_flag_mode() == 0 && obj.save_flag_name().is_none());
        }
        if obj.is_treasure_chest() {
            return obj.revival_enabled().unwrap_or(true);
        }
        obj.unit_config_name()
            .is_some_and(|name| self.flag_bearing.contains(name))
    }

    fn emit_location_counter(&mut self, name: &str) {
        if self.config.is_reconcile_excepted(name, false) {
            return;
        }
        let mut flag = Flag::new(
            name,
            FlagValues::S32 {
                init: 0,
                min: i32::MIN,
                max: i32::MAX,
            },
        );
        flag.is_save = true;
        commit_flag(self.store, FlagType::S32, flag.hash(), flag);
    }

    fn emit_visit_flag(&mut self, name: &str) {
        if self.config.is_reconcile_excepted(name, false) {
            return;
        }
        let mut flag = Flag::new(name, FlagValues::default_for(FlagType::Bool));
        flag.is_save = true;
        flag.is_one_trigger = true;
        commit_flag(self.store, FlagType::Bool, flag.hash(), flag);
    }
}
