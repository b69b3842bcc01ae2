//! Flag name derivation.
//!
//! World objects get their flag names from their map context, their actor
//! name and placement id, and optionally a save-flag naming mode carried
//! in their parameters. Actor bundle flags are simply `{kind}_{actor}`.

use crate::error::{CoreError, CoreResult};
use crate::shrine::ShrineLocator;
use crate::world::MapObject;

/// Where the objects currently being processed live.
///
/// The overworld and dungeons name their flags with different prefixes,
/// and two of the naming modes are only valid on one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapContext {
    /// The overworld.
    MainField,
    /// A dungeon, carrying its identifier.
    Dungeon {
        /// Dungeon identifier, e.g. `Dungeon042`.
        name: String,
    },
}

impl MapContext {
    /// The prefix used in default-form flag names.
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            MapContext::MainField => "MainField",
            MapContext::Dungeon { .. } => "CDungeon",
        }
    }

    /// The dungeon identifier, when inside one.
    #[must_use]
    pub fn dungeon_name(&self) -> Option<&str> {
        match self {
            MapContext::MainField => None,
            MapContext::Dungeon { name } => Some(name),
        }
    }

    /// A human-readable name for error messages.
    #[must_use]
    pub fn map_name(&self) -> &str {
        match self {
            MapContext::MainField => "MainField",
            MapContext::Dungeon { name } => name,
        }
    }
}

/// The default-form flag name of a world object.
#[must_use]
pub fn default_object_flag_name(ctx: &MapContext, unit_config_name: &str, hash_id: u32) -> String {
    format!("{}_{}_{}", ctx.prefix(), unit_config_name, hash_id)
}

/// The flag name of an actor bundle entry.
#[must_use]
pub fn actor_flag_name(kind: &str, actor: &str) -> String {
    format!("{kind}_{actor}")
}

/// Derives the flag name of a world object.
///
/// Objects with parameters may select a naming mode through
/// `MakeSaveFlag`:
///
/// - mode 0 uses the explicit `SaveFlag` parameter when present;
/// - mode 1 names the flag `Clear_{dungeon}` and is only valid inside a
///   dungeon;
/// - mode 2 names the flag `Open_{shrine}` after the nearest shrine and
///   is only valid on the overworld.
///
/// Everything else, including mode 0 without a `SaveFlag`, falls back to
/// the default form `{prefix}_{actor}_{id}`.
pub fn world_object_flag_name(
    obj: &MapObject<'_>,
    ctx: &MapContext,
    shrines: &ShrineLocator,
) -> CoreResult<String> {
    if obj.params().is_some() {
        match obj.save_flag_mode() {
            0 => {
                if let Some(save_flag) = obj.save_flag_name() {
                    return Ok(save_flag.to_string());
                }
            }
            1 => {
                let Some(dungeon) = ctx.dungeon_name() else {
                    return Err(CoreError::InvalidSaveFlagMode {
                        mode: 1,
                        map: ctx.map_name().to_string(),
                    });
                };
                return Ok(format!("Clear_{dungeon}"));
            }
            2 => {
                if ctx.dungeon_name().is_some() {
                    return Err(CoreError::InvalidSaveFlagMode {
                        mode: 2,
                        map: ctx.map_name().to_string(),
                    });
                }
                let position = obj
                    .translate()
                    .ok_or_else(|| CoreError::missing_parameter(object_label(obj), "Translate"))?;
                if let Some(shrine) = shrines.nearest(position) {
                    return Ok(format!("Open_{shrine}"));
                }
            }
            _ => {}
        }
    }
    let name = obj
        .unit_config_name()
        .ok_or_else(|| CoreError::missing_parameter(object_label(obj), "UnitConfigName"))?;
    let id = obj
        .hash_id()
        .ok_or_else(|| CoreError::missing_parameter(name, "HashId"))?;
    Ok(default_object_flag_name(ctx, name, id))
}

fn object_label(obj: &MapObject<'_>) -> String {
    match obj.hash_id() {
        Some(id) => format!("0x{id:08x}"),
        None => "unknown object".to_string(),
    }
}
