//! Typed views over decoded world documents.
//!
//! Map units and location statics are loosely structured documents.
//! These views wrap references to them and expose the handful of fields
//! the generators care about, without copying anything.

use crate::vector::Vec3;
use flagdb_codec::Value;

/// A single object placed on a map unit.
#[derive(Debug, Clone, Copy)]
pub struct MapObject<'a> {
    data: &'a Value,
}

impl<'a> MapObject<'a> {
    /// Wraps a decoded object entry.
    #[must_use]
    pub const fn new(data: &'a Value) -> Self {
        Self { data }
    }

    /// The object's placement id, unique within its map.
    #[must_use]
    pub fn hash_id(&self) -> Option<u32> {
        self.data.get("HashId").and_then(uint_of)
    }

    /// The actor name this object instantiates.
    #[must_use]
    pub fn unit_config_name(&self) -> Option<&'a str> {
        self.data.get("UnitConfigName").and_then(Value::as_str)
    }

    /// World position, when present.
    #[must_use]
    pub fn translate(&self) -> Option<Vec3> {
        self.data.get("Translate").and_then(vec3_of)
    }

    /// Whether the object links to other objects, which ties its flag to
    /// an event.
    #[must_use]
    pub fn has_object_links(&self) -> bool {
        self.data.get("LinksToObj").is_some()
    }

    /// The object's parameter block.
    #[must_use]
    pub fn params(&self) -> Option<&'a Value> {
        self.data.get("!Parameters")
    }

    /// Looks up one parameter.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&'a Value> {
        self.params().and_then(|params| params.get(key))
    }

    /// The `ForceFlag` override, when present.
    #[must_use]
    pub fn force_flag(&self) -> Option<bool> {
        self.param("ForceFlag").map(truthy)
    }

    /// The save-flag naming mode, defaulting to 0.
    #[must_use]
    pub fn save_flag_mode(&self) -> i32 {
        self.param("MakeSaveFlag").and_then(int_of).unwrap_or(0)
    }

    /// The explicit save-flag name used by naming mode 0.
    #[must_use]
    pub fn save_flag_name(&self) -> Option<&'a str> {
        self.param("SaveFlag").and_then(Value::as_str)
    }

    /// Whether the object's counter advances the save counter.
    #[must_use]
    pub fn increments_save(&self) -> bool {
        self.param("IncrementSave").is_some_and(truthy)
    }

    /// The `EnableRevival` toggle carried by treasure chests.
    #[must_use]
    pub fn revival_enabled(&self) -> Option<bool> {
        self.param("EnableRevival").map(truthy)
    }

    /// Whether this object is a link tag.
    #[must_use]
    pub fn is_link_tag(&self) -> bool {
        self.unit_config_name()
            .is_some_and(|name| name.contains("LinkTag"))
    }

    /// Whether this object is a treasure chest.
    #[must_use]
    pub fn is_treasure_chest(&self) -> bool {
        self.unit_config_name()
            .is_some_and(|name| name.contains("TBox"))
    }
}

/// A location marker from a map's static data.
#[derive(Debug, Clone, Copy)]
pub struct LocationMarker<'a> {
    data: &'a Value,
}

impl<'a> LocationMarker<'a> {
    /// Wraps a decoded marker entry.
    #[must_use]
    pub const fn new(data: &'a Value) -> Self {
        Self { data }
    }

    /// The marker's icon class.
    #[must_use]
    pub fn icon(&self) -> Option<&'a str> {
        self.data.get("Icon").and_then(Value::as_str)
    }

    /// The marker's message id, which doubles as a location identifier.
    #[must_use]
    pub fn message_id(&self) -> Option<&'a str> {
        self.data.get("MessageID").and_then(Value::as_str)
    }

    /// The save flag attached to the marker, when present.
    #[must_use]
    pub fn save_flag(&self) -> Option<&'a str> {
        self.data.get("SaveFlag").and_then(Value::as_str)
    }

    /// The marker's position.
    #[must_use]
    pub fn location(&self) -> Option<Vec3> {
        self.data.get("Translate").and_then(vec3_of)
    }
}

/// Iterates over the objects of a decoded map unit.
///
/// Units without an object list yield nothing.
pub fn map_objects(unit: &Value) -> impl Iterator<Item = MapObject<'_>> {
    unit.get("Objs")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .map(MapObject::new)
}

/// Iterates over the location markers of a decoded static document.
pub fn location_markers(static_doc: &Value) -> impl Iterator<Item = LocationMarker<'_>> {
    static_doc
        .get("LocationMarker")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .map(LocationMarker::new)
}

/// Reads an unsigned id stored as either an unsigned or a non-negative
/// signed integer.
#[allow(clippy::cast_sign_loss)]
fn uint_of(value: &Value) -> Option<u32> {
    match value {
        Value::U32(n) => Some(*n),
        Value::I32(n) if *n >= 0 => Some(*n as u32),
        _ => None,
    }
}

/// Reads a signed integer stored as either a signed or a small unsigned
/// integer.
#[allow(clippy::cast_possible_wrap)]
fn int_of(value: &Value) -> Option<i32> {
    match value {
        Value::I32(n) => Some(*n),
        Value::U32(n) if *n <= i32::MAX as u32 => Some(*n as i32),
        _ => None,
    }
}

/// Interprets a parameter as a truth value the way the game does, where
/// nonzero integers count as true.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::I32(n) => *n != 0,
        Value::U32(n) => *n != 0,
        _ => false,
    }
}

/// Reads a position from either an array of three floats or a map with
/// `X`, `Y`, and `Z` keys. Both shapes occur in world data.
fn vec3_of(value: &Value) -> Option<Vec3> {
    if let Some(v) = Vec3::from_value(value) {
        return Some(v);
    }
    let x = value.get("X")?.as_f32()?;
    let y = value.get("Y")?.as_f32()?;
    let z = value.get("Z")?.as_f32()?;
    Some(Vec3::new(x, y, z))
}
