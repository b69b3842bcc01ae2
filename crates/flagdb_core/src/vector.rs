//! Small vector types used by flag payloads and map geometry.
//!
//! Equality on these types compares raw bit patterns rather than IEEE
//! semantics, so two vectors are equal exactly when they would serialize
//! to the same bytes. This keeps change detection deterministic.

use flagdb_codec::Value;

/// A 2-component float vector.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vec2 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
}

/// A 3-component float vector.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vec3 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
}

/// A 4-component float vector.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vec4 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
    /// W component.
    pub w: f32,
}

impl Vec2 {
    /// Creates a vector from components.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Converts to a structured value (an array of floats).
    #[must_use]
    pub fn to_value(self) -> Value {
        Value::Array(vec![Value::F32(self.x), Value::F32(self.y)])
    }

    /// Reads a vector from an array of two floats.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value.as_array()? {
            [Value::F32(x), Value::F32(y)] => Some(Self::new(*x, *y)),
            _ => None,
        }
    }
}

impl Vec3 {
    /// Creates a vector from components.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Converts to a structured value (an array of floats).
    #[must_use]
    pub fn to_value(self) -> Value {
        Value::Array(vec![
            Value::F32(self.x),
            Value::F32(self.y),
            Value::F32(self.z),
        ])
    }

    /// Reads a vector from an array of three floats.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value.as_array()? {
            [Value::F32(x), Value::F32(y), Value::F32(z)] => Some(Self::new(*x, *y, *z)),
            _ => None,
        }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl Vec4 {
    /// Creates a vector from components.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Converts to a structured value (an array of floats).
    #[must_use]
    pub fn to_value(self) -> Value {
        Value::Array(vec![
            Value::F32(self.x),
            Value::F32(self.y),
            Value::F32(self.z),
            Value::F32(self.w),
        ])
    }

    /// Reads a vector from an array of four floats.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value.as_array()? {
            [Value::F32(x), Value::F32(y), Value::F32(z), Value::F32(w)] => {
                Some(Self::new(*x, *y, *z, *w))
            }
            _ => None,
        }
    }
}

impl PartialEq for Vec2 {
    fn eq(&self, other: &Self) -> bool {
        self.x.to_bits() == other.x.to_bits() && self.y.to_bits() == other.y.to_bits()
    }
}

impl Eq for Vec2 {}

impl PartialEq for Vec3 {
    fn eq(&self, other: &Self) -> bool {
        self.x.to_bits() == other.x.to_bits()
            && self.y.to_bits() == other.y.to_bits()
            && self.z.to_bits() == other.z.to_bits()
    }
}

impl Eq for Vec3 {}

impl PartialEq for Vec4 {
    fn eq(&self, other: &Self) -> bool {
        self.x.to_bits() == other.x.to_bits()
            && self.y.to_bits() == other.y.to_bits()
            && self.z.to_bits() == other.z.to_bits()
            && self.w.to_bits() == other.w.to_bits()
    }
}

impl Eq for Vec4 {}
