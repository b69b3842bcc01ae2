//! The typed flag model.
//!
//! A flag is a named, typed game variable. Its identity is the CRC-32 hash
//! of its name, stored signed, and that hash is always derived from the
//! name rather than carried independently. Sixteen flag kinds exist, one
//! per game-data container type.

use crate::error::{CoreError, CoreResult};
use crate::hash::hash_name;
use crate::vector::{Vec2, Vec3, Vec4};
use flagdb_codec::Value;

/// The sixteen logical flag kinds.
///
/// Variants are ordered the way their containers appear in a compiled
/// game-data archive, so iteration over [`FlagType::ALL`] matches the
/// on-disk member order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FlagType {
    /// Arrays of booleans.
    BoolArray,
    /// Single booleans.
    Bool,
    /// Arrays of floats.
    F32Array,
    /// Single floats.
    F32,
    /// Arrays of signed integers.
    S32Array,
    /// Single signed integers.
    S32,
    /// Arrays of 256-byte strings.
    String256Array,
    /// Single 256-byte strings.
    String256,
    /// Single 32-byte strings.
    String32,
    /// Arrays of 64-byte strings.
    String64Array,
    /// Single 64-byte strings.
    String64,
    /// Arrays of 2-component vectors.
    Vector2Array,
    /// Single 2-component vectors.
    Vector2,
    /// Arrays of 3-component vectors.
    Vector3Array,
    /// Single 3-component vectors.
    Vector3,
    /// Single 4-component vectors.
    Vector4,
}

impl FlagType {
    /// Every flag type, in container member order.
    pub const ALL: [FlagType; 16] = [
        FlagType::BoolArray,
        FlagType::Bool,
        FlagType::F32Array,
        FlagType::F32,
        FlagType::S32Array,
        FlagType::S32,
        FlagType::String256Array,
        FlagType::String256,
        FlagType::String32,
        FlagType::String64Array,
        FlagType::String64,
        FlagType::Vector2Array,
        FlagType::Vector2,
        FlagType::Vector3Array,
        FlagType::Vector3,
        FlagType::Vector4,
    ];

    /// The identifier used for this type inside container documents.
    ///
    /// Note that 32-byte strings are identified as plain `string_data`;
    /// the `32` only appears in container member names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FlagType::BoolArray => "bool_array_data",
            FlagType::Bool => "bool_data",
            FlagType::F32Array => "f32_array_data",
            FlagType::F32 => "f32_data",
            FlagType::S32Array => "s32_array_data",
            FlagType::S32 => "s32_data",
            FlagType::String256Array => "string256_array_data",
            FlagType::String256 => "string256_data",
            FlagType::String32 => "string_data",
            FlagType::String64Array => "string64_array_data",
            FlagType::String64 => "string64_data",
            FlagType::Vector2Array => "vector2f_array_data",
            FlagType::Vector2 => "vector2f_data",
            FlagType::Vector3Array => "vector3f_array_data",
            FlagType::Vector3 => "vector3f_data",
            FlagType::Vector4 => "vector4f_data",
        }
    }

    /// Parses a document identifier back to a flag type.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == name)
    }
}

impl std::fmt::Display for FlagType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The typed payload of a flag: its initial value and permitted range.
///
/// Boolean and string kinds have fixed ranges, so only the initial value
/// is carried for them. Equality compares floats bitwise.
#[derive(Debug, Clone)]
pub enum FlagValues {
    /// Boolean payload. The initial value is stored as an integer.
    Bool {
        /// Initial value, 0 or 1.
        init: i32,
    },
    /// Boolean array payload.
    BoolArray {
        /// Initial elements.
        init: Vec<bool>,
    },
    /// Signed integer payload.
    S32 {
        /// Initial value.
        init: i32,
        /// Smallest permitted value.
        min: i32,
        /// Largest permitted value.
        max: i32,
    },
    /// Signed integer array payload.
    S32Array {
        /// Initial elements.
        init: Vec<i32>,
        /// Smallest permitted element.
        min: i32,
        /// Largest permitted element.
        max: i32,
    },
    /// Float payload.
    F32 {
        /// Initial value.
        init: f32,
        /// Smallest permitted value.
        min: f32,
        /// Largest permitted value.
        max: f32,
    },
    /// Float array payload.
    F32Array {
        /// Initial elements.
        init: Vec<f32>,
        /// Smallest permitted element.
        min: f32,
        /// Largest permitted element.
        max: f32,
    },
    /// String payload, shared by all three string widths.
    String {
        /// Initial value.
        init: String,
    },
    /// String array payload.
    StringArray {
        /// Initial elements.
        init: Vec<String>,
    },
    /// 2-component vector payload.
    Vector2 {
        /// Initial value.
        init: Vec2,
        /// Componentwise minimum.
        min: Vec2,
        /// Componentwise maximum.
        max: Vec2,
    },
    /// 2-component vector array payload.
    Vector2Array {
        /// Initial elements.
        init: Vec<Vec2>,
        /// Componentwise minimum.
        min: Vec2,
        /// Componentwise maximum.
        max: Vec2,
    },
    /// 3-component vector payload.
    Vector3 {
        /// Initial value.
        init: Vec3,
        /// Componentwise minimum.
        min: Vec3,
        /// Componentwise maximum.
        max: Vec3,
    },
    /// 3-component vector array payload.
    Vector3Array {
        /// Initial elements.
        init: Vec<Vec3>,
        /// Componentwise minimum.
        min: Vec3,
        /// Componentwise maximum.
        max: Vec3,
    },
    /// 4-component vector payload.
    Vector4 {
        /// Initial value.
        init: Vec4,
        /// Componentwise minimum.
        min: Vec4,
        /// Componentwise maximum.
        max: Vec4,
    },
}

impl FlagValues {
    /// The default payload for a given flag type.
    ///
    /// Integer flags default to the full 32-bit range so revival counters
    /// can grow without clamping.
    #[must_use]
    pub fn default_for(ftype: FlagType) -> Self {
        match ftype {
            FlagType::Bool => FlagValues::Bool { init: 0 },
            FlagType::BoolArray => FlagValues::BoolArray { init: Vec::new() },
            FlagType::S32 => FlagValues::S32 {
                init: 0,
                min: i32::MIN,
                max: i32::MAX,
            },
            FlagType::S32Array => FlagValues::S32Array {
                init: Vec::new(),
                min: i32::MIN,
                max: i32::MAX,
            },
            FlagType::F32 => FlagValues::F32 {
                init: 0.0,
                min: f32::MIN,
                max: f32::MAX,
            },
            FlagType::F32Array => FlagValues::F32Array {
                init: Vec::new(),
                min: f32::MIN,
                max: f32::MAX,
            },
            FlagType::String32 | FlagType::String64 | FlagType::String256 => FlagValues::String {
                init: String::new(),
            },
            FlagType::String64Array | FlagType::String256Array => FlagValues::StringArray {
                init: Vec::new(),
            },
            FlagType::Vector2 => FlagValues::Vector2 {
                init: Vec2::default(),
                min: Vec2::default(),
                max: Vec2::default(),
            },
            FlagType::Vector2Array => FlagValues::Vector2Array {
                init: Vec::new(),
                min: Vec2::default(),
                max: Vec2::default(),
            },
            FlagType::Vector3 => FlagValues::Vector3 {
                init: Vec3::default(),
                min: Vec3::default(),
                max: Vec3::default(),
            },
            FlagType::Vector3Array => FlagValues::Vector3Array {
                init: Vec::new(),
                min: Vec3::default(),
                max: Vec3::default(),
            },
            FlagType::Vector4 => FlagValues::Vector4 {
                init: Vec4::default(),
                min: Vec4::default(),
                max: Vec4::default(),
            },
        }
    }

    /// Reads the payload fields of a record for the given type.
    ///
    /// Missing fields fall back to [`FlagValues::default_for`]; fields
    /// present with the wrong shape are an error.
    pub fn from_record(ftype: FlagType, record: &Value) -> CoreResult<Self> {
        let init = record.get("InitValue");
        let min = record.get("MinValue");
        let max = record.get("MaxValue");
        let defaults = Self::default_for(ftype);
        let values = match defaults {
            FlagValues::Bool { init: d } => FlagValues::Bool {
                init: read_i32(init, d, ftype, "InitValue")?,
            },
            FlagValues::BoolArray { init: d } => FlagValues::BoolArray {
                init: read_bool_array(init, d, ftype)?,
            },
            FlagValues::S32 {
                init: di,
                min: dn,
                max: dx,
            } => FlagValues::S32 {
                init: read_i32(init, di, ftype, "InitValue")?,
                min: read_i32(min, dn, ftype, "MinValue")?,
                max: read_i32(max, dx, ftype, "MaxValue")?,
            },
            FlagValues::S32Array {
                init: di,
                min: dn,
                max: dx,
            } => FlagValues::S32Array {
                init: read_i32_array(init, di, ftype)?,
                min: read_i32(min, dn, ftype, "MinValue")?,
                max: read_i32(max, dx, ftype, "MaxValue")?,
            },
            FlagValues::F32 {
                init: di,
                min: dn,
                max: dx,
            } => FlagValues::F32 {
                init: read_f32(init, di, ftype, "InitValue")?,
                min: read_f32(min, dn, ftype, "MinValue")?,
                max: read_f32(max, dx, ftype, "MaxValue")?,
            },
            FlagValues::F32Array {
                init: di,
                min: dn,
                max: dx,
            } => FlagValues::F32Array {
                init: read_f32_array(init, di, ftype)?,
                min: read_f32(min, dn, ftype, "MinValue")?,
                max: read_f32(max, dx, ftype, "MaxValue")?,
            },
            FlagValues::String { init: d } => FlagValues::String {
                init: read_string(init, d, ftype)?,
            },
            FlagValues::StringArray { init: d } => FlagValues::StringArray {
                init: read_string_array(init, d, ftype)?,
            },
            FlagValues::Vector2 {
                init: di,
                min: dn,
                max: dx,
            } => FlagValues::Vector2 {
                init: read_vec2(init, di, ftype, "InitValue")?,
                min: read_vec2(min, dn, ftype, "MinValue")?,
                max: read_vec2(max, dx, ftype, "MaxValue")?,
            },
            FlagValues::Vector2Array {
                init: di,
                min: dn,
                max: dx,
            } => FlagValues::Vector2Array {
                init: read_vec2_array(init, di, ftype)?,
                min: read_vec2(min, dn, ftype, "MinValue")?,
                max: read_vec2(max, dx, ftype, "MaxValue")?,
            },
            FlagValues::Vector3 {
                init: di,
                min: dn,
                max: dx,
            } => FlagValues::Vector3 {
                init: read_vec3(init, di, ftype, "InitValue")?,
                min: read_vec3(min, dn, ftype, "MinValue")?,
                max: read_vec3(max, dx, ftype, "MaxValue")?,
            },
            FlagValues::Vector3Array {
                init: di,
                min: dn,
                max: dx,
            } => FlagValues::Vector3Array {
                init: read_vec3_array(init, di, ftype)?,
                min: read_vec3(min, dn, ftype, "MinValue")?,
                max: read_vec3(max, dx, ftype, "MaxValue")?,
            },
            FlagValues::Vector4 {
                init: di,
                min: dn,
                max: dx,
            } => FlagValues::Vector4 {
                init: read_vec4(init, di, ftype, "InitValue")?,
                min: read_vec4(min, dn, ftype, "MinValue")?,
                max: read_vec4(max, dx, ftype, "MaxValue")?,
            },
        };
        Ok(values)
    }

    /// Projects this payload to its record fields, as
    /// `(InitValue, MinValue, MaxValue)`.
    #[must_use]
    pub fn to_record_fields(&self) -> (Value, Value, Value) {
        match self {
            FlagValues::Bool { init } => {
                (Value::I32(*init), Value::Bool(false), Value::Bool(true))
            }
            FlagValues::BoolArray { init } => (
                Value::Array(init.iter().map(|b| Value::Bool(*b)).collect()),
                Value::Bool(false),
                Value::Bool(true),
            ),
            FlagValues::S32 { init, min, max } => {
                (Value::I32(*init), Value::I32(*min), Value::I32(*max))
            }
            FlagValues::S32Array { init, min, max } => (
                Value::Array(init.iter().map(|n| Value::I32(*n)).collect()),
                Value::I32(*min),
                Value::I32(*max),
            ),
            FlagValues::F32 { init, min, max } => {
                (Value::F32(*init), Value::F32(*min), Value::F32(*max))
            }
            FlagValues::F32Array { init, min, max } => (
                Value::Array(init.iter().map(|x| Value::F32(*x)).collect()),
                Value::F32(*min),
                Value::F32(*max),
            ),
            FlagValues::String { init } => (
                Value::Str(init.clone()),
                Value::Str(String::new()),
                Value::Str(String::new()),
            ),
            FlagValues::StringArray { init } => (
                Value::Array(init.iter().map(|s| Value::Str(s.clone())).collect()),
                Value::Str(String::new()),
                Value::Str(String::new()),
            ),
            FlagValues::Vector2 { init, min, max } => {
                (init.to_value(), min.to_value(), max.to_value())
            }
            FlagValues::Vector2Array { init, min, max } => (
                Value::Array(init.iter().map(|v| v.to_value()).collect()),
                min.to_value(),
                max.to_value(),
            ),
            FlagValues::Vector3 { init, min, max } => {
                (init.to_value(), min.to_value(), max.to_value())
            }
            FlagValues::Vector3Array { init, min, max } => (
                Value::Array(init.iter().map(|v| v.to_value()).collect()),
                min.to_value(),
                max.to_value(),
            ),
            FlagValues::Vector4 { init, min, max } => {
                (init.to_value(), min.to_value(), max.to_value())
            }
        }
    }
}

impl PartialEq for FlagValues {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FlagValues::Bool { init: a }, FlagValues::Bool { init: b }) => a == b,
            (FlagValues::BoolArray { init: a }, FlagValues::BoolArray { init: b }) => a == b,
            (
                FlagValues::S32 {
                    init: a,
                    min: c,
                    max: e,
                },
                FlagValues::S32 {
                    init: b,
                    min: d,
                    max: f,
                },
            ) => a == b && c == d && e == f,
            (
                FlagValues::S32Array {
                    init: a,
                    min: c,
                    max: e,
                },
                FlagValues::S32Array {
                    init: b,
                    min: d,
                    max: f,
                },
            ) => a == b && c == d && e == f,
            (
                FlagValues::F32 {
                    init: a,
                    min: c,
                    max: e,
                },
                FlagValues::F32 {
                    init: b,
                    min: d,
                    max: f,
                },
            ) => f32_eq(*a, *b) && f32_eq(*c, *d) && f32_eq(*e, *f),
            (
                FlagValues::F32Array {
                    init: a,
                    min: c,
                    max: e,
                },
                FlagValues::F32Array {
                    init: b,
                    min: d,
                    max: f,
                },
            ) => {
                a.len() == b.len()
                    && a.iter().zip(b.iter()).all(|(x, y)| f32_eq(*x, *y))
                    && f32_eq(*c, *d)
                    && f32_eq(*e, *f)
            }
            (FlagValues::String { init: a }, FlagValues::String { init: b }) => a == b,
            (FlagValues::StringArray { init: a }, FlagValues::StringArray { init: b }) => a == b,
            (
                FlagValues::Vector2 {
                    init: a,
                    min: c,
                    max: e,
                },
                FlagValues::Vector2 {
                    init: b,
                    min: d,
                    max: f,
                },
            ) => a == b && c == d && e == f,
            (
                FlagValues::Vector2Array {
                    init: a,
                    min: c,
                    max: e,
                },
                FlagValues::Vector2Array {
                    init: b,
                    min: d,
                    max: f,
                },
            ) => a == b && c == d && e == f,
            (
                FlagValues::Vector3 {
                    init: a,
                    min: c,
                    max: e,
                },
                FlagValues::Vector3 {
                    init: b,
                    min: d,
                    max: f,
                },
            ) => a == b && c == d && e == f,
            (
                FlagValues::Vector3Array {
                    init: a,
                    min: c,
                    max: e,
                },
                FlagValues::Vector3Array {
                    init: b,
                    min: d,
                    max: f,
                },
            ) => a == b && c == d && e == f,
            (
                FlagValues::Vector4 {
                    init: a,
                    min: c,
                    max: e,
                },
                FlagValues::Vector4 {
                    init: b,
                    min: d,
                    max: f,
                },
            ) => a == b && c == d && e == f,
            _ => false,
        }
    }
}

impl Eq for FlagValues {}

fn f32_eq(a: f32, b: f32) -> bool {
    a.to_bits() == b.to_bits()
}

/// A single flag entry.
///
/// The name and hash are kept private so the hash can never drift from the
/// name; use [`Flag::set_name`] to rename. All other attributes are plain
/// data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    data_name: String,
    hash_value: i32,
    /// Deletion revision, `-1` when the flag has never been deleted.
    pub delete_rev: i32,
    /// Whether the flag is tied to an event through object links.
    pub is_event_associated: bool,
    /// Whether the flag latches after its first transition.
    pub is_one_trigger: bool,
    /// Whether game code may read the flag.
    pub is_program_readable: bool,
    /// Whether game code may write the flag.
    pub is_program_writable: bool,
    /// Whether the flag participates in save data.
    pub is_save: bool,
    /// Reset behavior selector.
    pub reset_type: i32,
    /// Optional UI category.
    pub category: Option<i32>,
    /// Whether the flag was loaded from, or belongs in, a revival container.
    pub is_revival: bool,
    /// Typed payload.
    pub values: FlagValues,
}

impl Flag {
    /// Creates a flag with the given name and payload, and neutral
    /// attributes: readable and writable, not saved, reset type 0.
    #[must_use]
    pub fn new(name: &str, values: FlagValues) -> Self {
        Self {
            data_name: name.to_string(),
            hash_value: hash_name(name),
            delete_rev: -1,
            is_event_associated: false,
            is_one_trigger: false,
            is_program_readable: true,
            is_program_writable: true,
            is_save: false,
            reset_type: 0,
            category: None,
            is_revival: false,
            values,
        }
    }

    /// Creates an unnamed boolean flag.
    #[must_use]
    pub fn new_bool(revival: bool) -> Self {
        let mut flag = Self::new("", FlagValues::default_for(FlagType::Bool));
        flag.is_revival = revival;
        flag
    }

    /// Creates an unnamed integer flag with the full 32-bit range.
    #[must_use]
    pub fn new_s32(revival: bool) -> Self {
        let mut flag = Self::new("", FlagValues::default_for(FlagType::S32));
        flag.is_revival = revival;
        flag
    }

    /// The flag's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.data_name
    }

    /// The signed CRC-32 hash of the flag's name.
    #[must_use]
    pub const fn hash(&self) -> i32 {
        self.hash_value
    }

    /// Renames the flag, recomputing its hash.
    pub fn set_name(&mut self, name: &str) {
        self.data_name.clear();
        self.data_name.push_str(name);
        self.hash_value = hash_name(name);
    }

    /// Reads a flag from a container record.
    ///
    /// `revival` marks whether the record came from a revival container.
    /// `DataName` is required; a stored `HashValue` must match the hash of
    /// the name; everything else falls back to defaults when absent.
    pub fn from_record(ftype: FlagType, record: &Value, revival: bool) -> CoreResult<Self> {
        let data_name = match record.get("DataName") {
            Some(Value::Str(s)) => s.clone(),
            Some(_) => {
                return Err(CoreError::malformed_record(
                    ftype.as_str(),
                    "DataName must be a string",
                ))
            }
            None => {
                return Err(CoreError::malformed_record(
                    ftype.as_str(),
                    "record has no DataName",
                ))
            }
        };
        let computed = hash_name(&data_name);
        if let Some(stored) = record.get("HashValue") {
            let stored = stored.as_i32().ok_or_else(|| {
                CoreError::malformed_record(ftype.as_str(), "HashValue must be an integer")
            })?;
            if stored != computed {
                return Err(CoreError::malformed_record(
                    ftype.as_str(),
                    format!("HashValue {stored} does not match DataName {data_name:?}"),
                ));
            }
        }
        Ok(Self {
            data_name,
            hash_value: computed,
            delete_rev: field_i32(record, "DeleteRev", -1, ftype)?,
            is_event_associated: field_bool(record, "IsEventAssociated", false, ftype)?,
            is_one_trigger: field_bool(record, "IsOneTrigger", false, ftype)?,
            is_program_readable: field_bool(record, "IsProgramReadable", true, ftype)?,
            is_program_writable: field_bool(record, "IsProgramWritable", true, ftype)?,
            is_save: field_bool(record, "IsSave", false, ftype)?,
            reset_type: field_i32(record, "ResetType", 0, ftype)?,
            category: field_optional_i32(record, "Category", ftype)?,
            is_revival: revival,
            values: FlagValues::from_record(ftype, record)?,
        })
    }

    /// Projects the flag to its full game-data record.
    #[must_use]
    pub fn to_record(&self) -> Value {
        let (init, min, max) = self.values.to_record_fields();
        let mut fields = vec![
            ("DataName", Value::Str(self.data_name.clone())),
            ("DeleteRev", Value::I32(self.delete_rev)),
            ("HashValue", Value::I32(self.hash_value)),
            ("InitValue", init),
            ("IsEventAssociated", Value::Bool(self.is_event_associated)),
            ("IsOneTrigger", Value::Bool(self.is_one_trigger)),
            ("IsProgramReadable", Value::Bool(self.is_program_readable)),
            ("IsProgramWritable", Value::Bool(self.is_program_writable)),
            ("IsSave", Value::Bool(self.is_save)),
            ("MaxValue", max),
            ("MinValue", min),
            ("ResetType", Value::I32(self.reset_type)),
        ];
        if let Some(category) = self.category {
            fields.push(("Category", Value::I32(category)));
        }
        Value::map(fields)
    }

    /// Projects the flag to its reduced save-data record, which carries
    /// only the name and hash.
    #[must_use]
    pub fn to_save_record(&self) -> Value {
        Value::map(vec![
            ("DataName", Value::Str(self.data_name.clone())),
            ("HashValue", Value::I32(self.hash_value)),
        ])
    }
}

fn field_bool(record: &Value, key: &str, default: bool, ftype: FlagType) -> CoreResult<bool> {
    match record.get(key) {
        None => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(CoreError::malformed_record(
            ftype.as_str(),
            format!("field {key} must be a boolean"),
        )),
    }
}

fn field_i32(record: &Value, key: &str, default: i32, ftype: FlagType) -> CoreResult<i32> {
    match record.get(key) {
        None => Ok(default),
        Some(Value::I32(n)) => Ok(*n),
        Some(_) => Err(CoreError::malformed_record(
            ftype.as_str(),
            format!("field {key} must be an integer"),
        )),
    }
}

fn field_optional_i32(record: &Value, key: &str, ftype: FlagType) -> CoreResult<Option<i32>> {
    match record.get(key) {
        None => Ok(None),
        Some(Value::I32(n)) => Ok(Some(*n)),
        Some(_) => Err(CoreError::malformed_record(
            ftype.as_str(),
            format!("field {key} must be an integer"),
        )),
    }
}

fn read_i32(value: Option<&Value>, default: i32, ftype: FlagType, key: &str) -> CoreResult<i32> {
    match value {
        None => Ok(default),
        Some(Value::I32(n)) => Ok(*n),
        Some(_) => Err(CoreError::malformed_record(
            ftype.as_str(),
            format!("field {key} must be an integer"),
        )),
    }
}

fn read_f32(value: Option<&Value>, default: f32, ftype: FlagType, key: &str) -> CoreResult<f32> {
    match value {
        None => Ok(default),
        Some(Value::F32(x)) => Ok(*x),
        Some(_) => Err(CoreError::malformed_record(
            ftype.as_str(),
            format!("field {key} must be a float"),
        )),
    }
}

fn read_string(value: Option<&Value>, default: String, ftype: FlagType) -> CoreResult<String> {
    match value {
        None => Ok(default),
        Some(Value::Str(s)) => Ok(s.clone()),
        Some(_) => Err(CoreError::malformed_record(
            ftype.as_str(),
            "InitValue must be a string",
        )),
    }
}

fn read_vec2(value: Option<&Value>, default: Vec2, ftype: FlagType, key: &str) -> CoreResult<Vec2> {
    match value {
        None => Ok(default),
        Some(v) => Vec2::from_value(v).ok_or_else(|| {
            CoreError::malformed_record(ftype.as_str(), format!("field {key} must be a 2-vector"))
        }),
    }
}

fn read_vec3(value: Option<&Value>, default: Vec3, ftype: FlagType, key: &str) -> CoreResult<Vec3> {
    match value {
        None => Ok(default),
        Some(v) => Vec3::from_value(v).ok_or_else(|| {
            CoreError::malformed_record(ftype.as_str(), format!("field {key} must be a 3-vector"))
        }),
    }
}

fn read_vec4(value: Option<&Value>, default: Vec4, ftype: FlagType, key: &str) -> CoreResult<Vec4> {
    match value {
        None => Ok(default),
        Some(v) => Vec4::from_value(v).ok_or_else(|| {
            CoreError::malformed_record(ftype.as_str(), format!("field {key} must be a 4-vector"))
        }),
    }
}

fn read_bool_array(
    value: Option<&Value>,
    default: Vec<bool>,
    ftype: FlagType,
) -> CoreResult<Vec<bool>> {
    let Some(value) = value else {
        return Ok(default);
    };
    let elements = value.as_array().ok_or_else(|| {
        CoreError::malformed_record(ftype.as_str(), "InitValue must be an array")
    })?;
    elements
        .iter()
        .map(|v| {
            v.as_bool().ok_or_else(|| {
                CoreError::malformed_record(ftype.as_str(), "InitValue elements must be booleans")
            })
        })
        .collect()
}

fn read_i32_array(
    value: Option<&Value>,
    default: Vec<i32>,
    ftype: FlagType,
) -> CoreResult<Vec<i32>> {
    let Some(value) = value else {
        return Ok(default);
    };
    let elements = value.as_array().ok_or_else(|| {
        CoreError::malformed_record(ftype.as_str(), "InitValue must be an array")
    })?;
    elements
        .iter()
        .map(|v| {
            v.as_i32().ok_or_else(|| {
                CoreError::malformed_record(ftype.as_str(), "InitValue elements must be integers")
            })
        })
        .collect()
}

fn read_f32_array(
    value: Option<&Value>,
    default: Vec<f32>,
    ftype: FlagType,
) -> CoreResult<Vec<f32>> {
    let Some(value) = value else {
        return Ok(default);
    };
    let elements = value.as_array().ok_or_else(|| {
        CoreError::malformed_record(ftype.as_str(), "InitValue must be an array")
    })?;
    elements
        .iter()
        .map(|v| {
            v.as_f32().ok_or_else(|| {
                CoreError::malformed_record(ftype.as_str(), "InitValue elements must be floats")
            })
        })
        .collect()
}

fn read_string_array(
    value: Option<&Value>,
    default: Vec<String>,
    ftype: FlagType,
) -> CoreResult<Vec<String>> {
    let Some(value) = value else {
        return Ok(default);
    };
    let elements = value.as_array().ok_or_else(|| {
        CoreError::malformed_record(ftype.as_str(), "InitValue must be an array")
    })?;
    elements
        .iter()
        .map(|v| {
            v.as_str().map(str::to_string).ok_or_else(|| {
                CoreError::malformed_record(ftype.as_str(), "InitValue elements must be strings")
            })
        })
        .collect()
}

fn read_vec2_array(
    value: Option<&Value>,
    default: Vec<Vec2>,
    ftype: FlagType,
) -> CoreResult<Vec<Vec2>> {
    let Some(value) = value else {
        return Ok(default);
    };
    let elements = value.as_array().ok_or_else(|| {
        CoreError::malformed_record(ftype.as_str(), "InitValue must be an array")
    })?;
    elements
        .iter()
        .map(|v| {
            Vec2::from_value(v).ok_or_else(|| {
                CoreError::malformed_record(ftype.as_str(), "InitValue elements must be 2-vectors")
            })
        })
        .collect()
}

fn read_vec3_array(
    value: Option<&Value>,
    default: Vec<Vec3>,
    ftype: FlagType,
) -> CoreResult<Vec<Vec3>> {
    let Some(value) = value else {
        return Ok(default);
    };
    let elements = value.as_array().ok_or_else(|| {
        CoreError::malformed_record(ftype.as_str(), "InitValue must be an array")
    })?;
    elements
        .iter()
        .map(|v| {
            Vec3::from_value(v).ok_or_else(|| {
                CoreError::malformed_record(ftype.as_str(), "InitValue elements must be 3-vectors")
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_parses_its_own_identifier() {
        for ftype in FlagType::ALL {
            assert_eq!(FlagType::parse(ftype.as_str()), Some(ftype));
        }
        assert_eq!(FlagType::parse("revival_bool_data"), None);
        assert_eq!(FlagType::parse("bool"), None);
    }

    #[test]
    fn string32_identifier_has_no_width_suffix() {
        assert_eq!(FlagType::String32.as_str(), "string_data");
        assert_eq!(FlagType::parse("string_data"), Some(FlagType::String32));
        assert_eq!(FlagType::parse("string32_data"), None);
    }

    #[test]
    fn new_flag_hash_matches_name() {
        let flag = Flag::new(
            "MainField_TBox_Field_Iron_12345",
            FlagValues::default_for(FlagType::Bool),
        );
        assert_eq!(flag.hash(), hash_name("MainField_TBox_Field_Iron_12345"));
    }

    #[test]
    fn rename_recomputes_hash() {
        let mut flag = Flag::new_bool(true);
        assert_eq!(flag.hash(), 0);
        flag.set_name("Open_Dungeon042");
        assert_eq!(flag.name(), "Open_Dungeon042");
        assert_eq!(flag.hash(), hash_name("Open_Dungeon042"));
    }

    #[test]
    fn default_bool_flag_attributes() {
        let flag = Flag::new_bool(false);
        assert_eq!(flag.delete_rev, -1);
        assert!(flag.is_program_readable);
        assert!(flag.is_program_writable);
        assert!(!flag.is_save);
        assert!(!flag.is_one_trigger);
        assert_eq!(flag.reset_type, 0);
        assert!(flag.category.is_none());
        assert!(!flag.is_revival);
    }

    #[test]
    fn default_s32_flag_has_full_range() {
        let flag = Flag::new_s32(true);
        assert!(flag.is_revival);
        match flag.values {
            FlagValues::S32 { init, min, max } => {
                assert_eq!(init, 0);
                assert_eq!(min, i32::MIN);
                assert_eq!(max, i32::MAX);
            }
            other => panic!("expected an s32 payload, got {other:?}"),
        }
    }

    #[test]
    fn bool_record_shape() {
        let mut flag = Flag::new_bool(false);
        flag.set_name("IsGet_Weapon_Sword_001");
        flag.is_save = true;
        flag.is_one_trigger = true;
        let record = flag.to_record();
        let map = record.as_map().unwrap();
        assert_eq!(map.len(), 12);
        assert_eq!(
            record.get("DataName").unwrap().as_str(),
            Some("IsGet_Weapon_Sword_001")
        );
        assert_eq!(
            record.get("HashValue").unwrap().as_i32(),
            Some(hash_name("IsGet_Weapon_Sword_001"))
        );
        assert_eq!(record.get("InitValue").unwrap().as_i32(), Some(0));
        assert_eq!(record.get("MinValue").unwrap().as_bool(), Some(false));
        assert_eq!(record.get("MaxValue").unwrap().as_bool(), Some(true));
        assert_eq!(record.get("IsSave").unwrap().as_bool(), Some(true));
    }

    #[test]
    fn category_is_written_only_when_present() {
        let mut flag = Flag::new_bool(false);
        flag.set_name("IsRegisteredPictureBook_Animal_Fox");
        assert!(flag.to_record().get("Category").is_none());
        flag.category = Some(2);
        assert_eq!(flag.to_record().get("Category").unwrap().as_i32(), Some(2));
    }

    #[test]
    fn record_roundtrip_preserves_flag() {
        let mut flag = Flag::new_s32(true);
        flag.set_name("MainField_LinkTagAnd_55443322");
        flag.is_save = true;
        flag.reset_type = 1;
        flag.is_event_associated = true;
        let record = flag.to_record();
        let restored = Flag::from_record(FlagType::S32, &record, true).unwrap();
        assert_eq!(flag, restored);
    }

    #[test]
    fn string_record_roundtrip() {
        let flag = Flag::new(
            "Cook_LatestRecipe",
            FlagValues::String {
                init: "Item_Cook_A_01".to_string(),
            },
        );
        let record = flag.to_record();
        assert_eq!(record.get("MinValue").unwrap().as_str(), Some(""));
        let restored = Flag::from_record(FlagType::String64, &record, false).unwrap();
        assert_eq!(flag, restored);
    }

    #[test]
    fn vector3_record_roundtrip() {
        let flag = Flag::new(
            "PlayerSavePos",
            FlagValues::Vector3 {
                init: Vec3::new(-1181.0, 237.5, 1916.0),
                min: Vec3::new(-6000.0, -4000.0, -6000.0),
                max: Vec3::new(6000.0, 4000.0, 6000.0),
            },
        );
        let record = flag.to_record();
        let restored = Flag::from_record(FlagType::Vector3, &record, false).unwrap();
        assert_eq!(flag, restored);
    }

    #[test]
    fn from_record_requires_data_name() {
        let record = Value::map(vec![("InitValue", Value::I32(0))]);
        let err = Flag::from_record(FlagType::Bool, &record, false).unwrap_err();
        assert!(err.to_string().contains("DataName"));
    }

    #[test]
    fn from_record_rejects_mismatched_hash() {
        let record = Value::map(vec![
            ("DataName", Value::Str("Flag_A".to_string())),
            ("HashValue", Value::I32(12345)),
        ]);
        let err = Flag::from_record(FlagType::Bool, &record, false).unwrap_err();
        assert!(matches!(err, CoreError::MalformedRecord { .. }));
    }

    #[test]
    fn from_record_accepts_matching_hash() {
        let record = Value::map(vec![
            ("DataName", Value::Str("Flag_A".to_string())),
            ("HashValue", Value::I32(hash_name("Flag_A"))),
        ]);
        let flag = Flag::from_record(FlagType::Bool, &record, false).unwrap();
        assert_eq!(flag.name(), "Flag_A");
    }

    #[test]
    fn from_record_defaults_missing_attributes() {
        let record = Value::map(vec![("DataName", Value::Str("Sparse".to_string()))]);
        let flag = Flag::from_record(FlagType::S32, &record, false).unwrap();
        assert_eq!(flag.delete_rev, -1);
        assert!(flag.is_program_readable);
        assert!(!flag.is_save);
        assert_eq!(
            flag.values,
            FlagValues::S32 {
                init: 0,
                min: i32::MIN,
                max: i32::MAX
            }
        );
    }

    #[test]
    fn from_record_rejects_wrong_field_shape() {
        let record = Value::map(vec![
            ("DataName", Value::Str("Bad".to_string())),
            ("IsSave", Value::I32(1)),
        ]);
        assert!(Flag::from_record(FlagType::Bool, &record, false).is_err());
    }

    #[test]
    fn bool_array_init_roundtrip() {
        let flag = Flag::new(
            "BarrelErrand_Progress",
            FlagValues::BoolArray {
                init: vec![true, false, true],
            },
        );
        let restored = Flag::from_record(FlagType::BoolArray, &flag.to_record(), false).unwrap();
        assert_eq!(flag, restored);
    }

    #[test]
    fn save_record_carries_only_name_and_hash() {
        let mut flag = Flag::new_bool(false);
        flag.set_name("Open_Dungeon000");
        let record = flag.to_save_record();
        let map = record.as_map().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(record.get("DataName").unwrap().as_str(), Some("Open_Dungeon000"));
        assert_eq!(
            record.get("HashValue").unwrap().as_i32(),
            Some(hash_name("Open_Dungeon000"))
        );
    }

    #[test]
    fn float_payload_equality_is_bitwise() {
        let a = FlagValues::F32 {
            init: 0.0,
            min: 0.0,
            max: 1.0,
        };
        let b = FlagValues::F32 {
            init: -0.0,
            min: 0.0,
            max: 1.0,
        };
        assert_ne!(a, b);
        assert_eq!(a.clone(), a);
    }

    #[test]
    fn payloads_of_different_kinds_never_compare_equal() {
        let bool_payload = FlagValues::Bool { init: 0 };
        let s32_payload = FlagValues::S32 {
            init: 0,
            min: i32::MIN,
            max: i32::MAX,
        };
        assert_ne!(bool_payload, s32_payload);
    }
}
