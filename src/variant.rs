//! Dynamically-typed value model shared by the editor and the object walker.
//!
//! A [`Variant`] is a closed tagged union; its payload type is fully determined by
//! its [`VariantKind`]. Composite kinds own their contents by value.

use crate::reflection::ObjectId;
use crate::scene_tree::NodePath;
use glam::{IVec2, IVec3, IVec4, Quat, Vec2, Vec3, Vec4};
use std::fmt;

mod convert;
mod geometry;
mod json;

pub use convert::{FromVariant, ToVariant};
pub use geometry::{Aabb, Basis, Color, CompositeFields, Plane, Projection, Rect2, Rect2i, Transform2D, Transform3D};

/// Opaque engine resource id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rid(pub u64);

/// A bound method reference. Only displayed, never edited.
#[derive(Debug, Clone, PartialEq)]
pub struct Callable {
    pub object: Option<ObjectId>,
    pub method: String,
}

/// A signal reference. Only displayed, never edited.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub object: Option<ObjectId>,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
    Nil,
    Bool,
    Int,
    Float,
    String,
    StringName,
    NodePath,
    Vector2,
    Vector2i,
    Vector3,
    Vector3i,
    Vector4,
    Vector4i,
    Rect2,
    Rect2i,
    Transform2D,
    Plane,
    Quaternion,
    Aabb,
    Basis,
    Transform3D,
    Projection,
    Color,
    Rid,
    Object,
    Callable,
    Signal,
    Dictionary,
    Array,
    PackedByteArray,
    PackedInt32Array,
    PackedInt64Array,
    PackedFloat32Array,
    PackedFloat64Array,
    PackedStringArray,
    PackedVector2Array,
    PackedVector3Array,
    PackedVector4Array,
    PackedColorArray,
}

impl VariantKind {
    pub const ALL: [VariantKind; 39] = [
        VariantKind::Nil,
        VariantKind::Bool,
        VariantKind::Int,
        VariantKind::Float,
        VariantKind::String,
        VariantKind::StringName,
        VariantKind::NodePath,
        VariantKind::Vector2,
        VariantKind::Vector2i,
        VariantKind::Vector3,
        VariantKind::Vector3i,
        VariantKind::Vector4,
        VariantKind::Vector4i,
        VariantKind::Rect2,
        VariantKind::Rect2i,
        VariantKind::Transform2D,
        VariantKind::Plane,
        VariantKind::Quaternion,
        VariantKind::Aabb,
        VariantKind::Basis,
        VariantKind::Transform3D,
        VariantKind::Projection,
        VariantKind::Color,
        VariantKind::Rid,
        VariantKind::Object,
        VariantKind::Callable,
        VariantKind::Signal,
        VariantKind::Dictionary,
        VariantKind::Array,
        VariantKind::PackedByteArray,
        VariantKind::PackedInt32Array,
        VariantKind::PackedInt64Array,
        VariantKind::PackedFloat32Array,
        VariantKind::PackedFloat64Array,
        VariantKind::PackedStringArray,
        VariantKind::PackedVector2Array,
        VariantKind::PackedVector3Array,
        VariantKind::PackedVector4Array,
        VariantKind::PackedColorArray,
    ];

    pub fn label(self) -> &'static str {
        match self {
            VariantKind::Nil => "Nil",
            VariantKind::Bool => "bool",
            VariantKind::Int => "int",
            VariantKind::Float => "float",
            VariantKind::String => "String",
            VariantKind::StringName => "StringName",
            VariantKind::NodePath => "NodePath",
            VariantKind::Vector2 => "Vector2",
            VariantKind::Vector2i => "Vector2i",
            VariantKind::Vector3 => "Vector3",
            VariantKind::Vector3i => "Vector3i",
            VariantKind::Vector4 => "Vector4",
            VariantKind::Vector4i => "Vector4i",
            VariantKind::Rect2 => "Rect2",
            VariantKind::Rect2i => "Rect2i",
            VariantKind::Transform2D => "Transform2D",
            VariantKind::Plane => "Plane",
            VariantKind::Quaternion => "Quaternion",
            VariantKind::Aabb => "AABB",
            VariantKind::Basis => "Basis",
            VariantKind::Transform3D => "Transform3D",
            VariantKind::Projection => "Projection",
            VariantKind::Color => "Color",
            VariantKind::Rid => "RID",
            VariantKind::Object => "Object",
            VariantKind::Callable => "Callable",
            VariantKind::Signal => "Signal",
            VariantKind::Dictionary => "Dictionary",
            VariantKind::Array => "Array",
            VariantKind::PackedByteArray => "PackedByteArray",
            VariantKind::PackedInt32Array => "PackedInt32Array",
            VariantKind::PackedInt64Array => "PackedInt64Array",
            VariantKind::PackedFloat32Array => "PackedFloat32Array",
            VariantKind::PackedFloat64Array => "PackedFloat64Array",
            VariantKind::PackedStringArray => "PackedStringArray",
            VariantKind::PackedVector2Array => "PackedVector2Array",
            VariantKind::PackedVector3Array => "PackedVector3Array",
            VariantKind::PackedVector4Array => "PackedVector4Array",
            VariantKind::PackedColorArray => "PackedColorArray",
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Variant {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    StringName(String),
    NodePath(NodePath),
    Vector2(Vec2),
    Vector2i(IVec2),
    Vector3(Vec3),
    Vector3i(IVec3),
    Vector4(Vec4),
    Vector4i(IVec4),
    Rect2(Rect2),
    Rect2i(Rect2i),
    Transform2D(Transform2D),
    Plane(Plane),
    Quaternion(Quat),
    Aabb(Aabb),
    Basis(Basis),
    Transform3D(Transform3D),
    Projection(Projection),
    Color(Color),
    Rid(Rid),
    Object(Option<ObjectId>),
    Callable(Callable),
    Signal(Signal),
    Dictionary(Dictionary),
    Array(Vec<Variant>),
    PackedByteArray(Vec<u8>),
    PackedInt32Array(Vec<i32>),
    PackedInt64Array(Vec<i64>),
    PackedFloat32Array(Vec<f32>),
    PackedFloat64Array(Vec<f64>),
    PackedStringArray(Vec<String>),
    PackedVector2Array(Vec<Vec2>),
    PackedVector3Array(Vec<Vec3>),
    PackedVector4Array(Vec<Vec4>),
    PackedColorArray(Vec<Color>),
}

impl Variant {
    pub fn kind(&self) -> VariantKind {
        match self {
            Variant::Nil => VariantKind::Nil,
            Variant::Bool(_) => VariantKind::Bool,
            Variant::Int(_) => VariantKind::Int,
            Variant::Float(_) => VariantKind::Float,
            Variant::String(_) => VariantKind::String,
            Variant::StringName(_) => VariantKind::StringName,
            Variant::NodePath(_) => VariantKind::NodePath,
            Variant::Vector2(_) => VariantKind::Vector2,
            Variant::Vector2i(_) => VariantKind::Vector2i,
            Variant::Vector3(_) => VariantKind::Vector3,
            Variant::Vector3i(_) => VariantKind::Vector3i,
            Variant::Vector4(_) => VariantKind::Vector4,
            Variant::Vector4i(_) => VariantKind::Vector4i,
            Variant::Rect2(_) => VariantKind::Rect2,
            Variant::Rect2i(_) => VariantKind::Rect2i,
            Variant::Transform2D(_) => VariantKind::Transform2D,
            Variant::Plane(_) => VariantKind::Plane,
            Variant::Quaternion(_) => VariantKind::Quaternion,
            Variant::Aabb(_) => VariantKind::Aabb,
            Variant::Basis(_) => VariantKind::Basis,
            Variant::Transform3D(_) => VariantKind::Transform3D,
            Variant::Projection(_) => VariantKind::Projection,
            Variant::Color(_) => VariantKind::Color,
            Variant::Rid(_) => VariantKind::Rid,
            Variant::Object(_) => VariantKind::Object,
            Variant::Callable(_) => VariantKind::Callable,
            Variant::Signal(_) => VariantKind::Signal,
            Variant::Dictionary(_) => VariantKind::Dictionary,
            Variant::Array(_) => VariantKind::Array,
            Variant::PackedByteArray(_) => VariantKind::PackedByteArray,
            Variant::PackedInt32Array(_) => VariantKind::PackedInt32Array,
            Variant::PackedInt64Array(_) => VariantKind::PackedInt64Array,
            Variant::PackedFloat32Array(_) => VariantKind::PackedFloat32Array,
            Variant::PackedFloat64Array(_) => VariantKind::PackedFloat64Array,
            Variant::PackedStringArray(_) => VariantKind::PackedStringArray,
            Variant::PackedVector2Array(_) => VariantKind::PackedVector2Array,
            Variant::PackedVector3Array(_) => VariantKind::PackedVector3Array,
            Variant::PackedVector4Array(_) => VariantKind::PackedVector4Array,
            Variant::PackedColorArray(_) => VariantKind::PackedColorArray,
        }
    }

    /// Zero value of the given kind.
    pub fn default_for(kind: VariantKind) -> Variant {
        match kind {
            VariantKind::Nil => Variant::Nil,
            VariantKind::Bool => Variant::Bool(false),
            VariantKind::Int => Variant::Int(0),
            VariantKind::Float => Variant::Float(0.0),
            VariantKind::String => Variant::String(String::new()),
            VariantKind::StringName => Variant::StringName(String::new()),
            VariantKind::NodePath => Variant::NodePath(NodePath::default()),
            VariantKind::Vector2 => Variant::Vector2(Vec2::ZERO),
            VariantKind::Vector2i => Variant::Vector2i(IVec2::ZERO),
            VariantKind::Vector3 => Variant::Vector3(Vec3::ZERO),
            VariantKind::Vector3i => Variant::Vector3i(IVec3::ZERO),
            VariantKind::Vector4 => Variant::Vector4(Vec4::ZERO),
            VariantKind::Vector4i => Variant::Vector4i(IVec4::ZERO),
            VariantKind::Rect2 => Variant::Rect2(Rect2::default()),
            VariantKind::Rect2i => Variant::Rect2i(Rect2i::default()),
            VariantKind::Transform2D => Variant::Transform2D(Transform2D::IDENTITY),
            VariantKind::Plane => Variant::Plane(Plane::default()),
            VariantKind::Quaternion => Variant::Quaternion(Quat::IDENTITY),
            VariantKind::Aabb => Variant::Aabb(Aabb::default()),
            VariantKind::Basis => Variant::Basis(Basis::IDENTITY),
            VariantKind::Transform3D => Variant::Transform3D(Transform3D::IDENTITY),
            VariantKind::Projection => Variant::Projection(Projection::IDENTITY),
            VariantKind::Color => Variant::Color(Color::WHITE),
            VariantKind::Rid => Variant::Rid(Rid::default()),
            VariantKind::Object => Variant::Object(None),
            VariantKind::Callable => Variant::Callable(Callable { object: None, method: String::new() }),
            VariantKind::Signal => Variant::Signal(Signal { object: None, name: String::new() }),
            VariantKind::Dictionary => Variant::Dictionary(Dictionary::new()),
            VariantKind::Array => Variant::Array(Vec::new()),
            VariantKind::PackedByteArray => Variant::PackedByteArray(Vec::new()),
            VariantKind::PackedInt32Array => Variant::PackedInt32Array(Vec::new()),
            VariantKind::PackedInt64Array => Variant::PackedInt64Array(Vec::new()),
            VariantKind::PackedFloat32Array => Variant::PackedFloat32Array(Vec::new()),
            VariantKind::PackedFloat64Array => Variant::PackedFloat64Array(Vec::new()),
            VariantKind::PackedStringArray => Variant::PackedStringArray(Vec::new()),
            VariantKind::PackedVector2Array => Variant::PackedVector2Array(Vec::new()),
            VariantKind::PackedVector3Array => Variant::PackedVector3Array(Vec::new()),
            VariantKind::PackedVector4Array => Variant::PackedVector4Array(Vec::new()),
            VariantKind::PackedColorArray => Variant::PackedColorArray(Vec::new()),
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Variant::Nil)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Variant::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Variant::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Variant::Float(v) => Some(*v),
            Variant::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Variant::String(s) | Variant::StringName(s) => Some(s.as_str()),
            Variant::NodePath(p) => Some(p.as_str()),
            _ => None,
        }
    }

    /// Object handle carried by an `Object` variant. `None` for null handles and
    /// for every other kind.
    pub fn as_object(&self) -> Option<ObjectId> {
        match self {
            Variant::Object(handle) => *handle,
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Variant::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Variant]> {
        match self {
            Variant::Array(items) => Some(items),
            _ => None,
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    f.write_str("[")?;
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

fn fmt_object(handle: &Option<ObjectId>) -> String {
    match handle {
        Some(id) => format!("<Object#{}>", id.index()),
        None => "<null>".to_string(),
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Nil => f.write_str("<null>"),
            Variant::Bool(v) => write!(f, "{v}"),
            Variant::Int(v) => write!(f, "{v}"),
            Variant::Float(v) => write!(f, "{v}"),
            Variant::String(s) | Variant::StringName(s) => f.write_str(s),
            Variant::NodePath(p) => f.write_str(p.as_str()),
            Variant::Vector2(v) => write!(f, "({}, {})", v.x, v.y),
            Variant::Vector2i(v) => write!(f, "({}, {})", v.x, v.y),
            Variant::Vector3(v) => write!(f, "({}, {}, {})", v.x, v.y, v.z),
            Variant::Vector3i(v) => write!(f, "({}, {}, {})", v.x, v.y, v.z),
            Variant::Vector4(v) => write!(f, "({}, {}, {}, {})", v.x, v.y, v.z, v.w),
            Variant::Vector4i(v) => write!(f, "({}, {}, {}, {})", v.x, v.y, v.z, v.w),
            Variant::Rect2(r) => write!(f, "[P: ({}, {}), S: ({}, {})]", r.position.x, r.position.y, r.size.x, r.size.y),
            Variant::Rect2i(r) => write!(f, "[P: ({}, {}), S: ({}, {})]", r.position.x, r.position.y, r.size.x, r.size.y),
            Variant::Transform2D(t) => write!(f, "[X: {:?}, Y: {:?}, O: {:?}]", t.x, t.y, t.origin),
            Variant::Plane(p) => write!(f, "[N: {:?}, D: {}]", p.normal, p.d),
            Variant::Quaternion(q) => write!(f, "({}, {}, {}, {})", q.x, q.y, q.z, q.w),
            Variant::Aabb(a) => write!(f, "[P: {:?}, S: {:?}]", a.position, a.size),
            Variant::Basis(b) => write!(f, "[X: {:?}, Y: {:?}, Z: {:?}]", b.x, b.y, b.z),
            Variant::Transform3D(t) => {
                write!(f, "[X: {:?}, Y: {:?}, Z: {:?}, O: {:?}]", t.basis.x, t.basis.y, t.basis.z, t.origin)
            }
            Variant::Projection(p) => write!(f, "[X: {:?}, Y: {:?}, Z: {:?}, W: {:?}]", p.x, p.y, p.z, p.w),
            Variant::Color(c) => write!(f, "({}, {}, {}, {})", c.r, c.g, c.b, c.a),
            Variant::Rid(rid) => write!(f, "RID({})", rid.0),
            Variant::Object(handle) => f.write_str(&fmt_object(handle)),
            Variant::Callable(c) => write!(f, "{}::{}", fmt_object(&c.object), c.method),
            Variant::Signal(s) => write!(f, "{}::[signal]{}", fmt_object(&s.object), s.name),
            Variant::Dictionary(dict) => {
                f.write_str("{")?;
                for (index, (key, value)) in dict.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Variant::Array(items) => write_list(f, items),
            Variant::PackedByteArray(items) => write_list(f, items),
            Variant::PackedInt32Array(items) => write_list(f, items),
            Variant::PackedInt64Array(items) => write_list(f, items),
            Variant::PackedFloat32Array(items) => write_list(f, items),
            Variant::PackedFloat64Array(items) => write_list(f, items),
            Variant::PackedStringArray(items) => write_list(f, items),
            Variant::PackedVector2Array(items) => write!(f, "{items:?}"),
            Variant::PackedVector3Array(items) => write!(f, "{items:?}"),
            Variant::PackedVector4Array(items) => write!(f, "{items:?}"),
            Variant::PackedColorArray(items) => write!(f, "{items:?}"),
        }
    }
}

/// Insertion-ordered map keyed by arbitrary variants.
///
/// Keys are compared by value; iteration order is the order keys were first inserted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dictionary {
    entries: Vec<(Variant, Variant)>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &Variant) -> Option<&Variant> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &Variant) -> Option<&mut Variant> {
        self.entries.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Inserts or replaces. Replacing keeps the key's original position.
    pub fn insert(&mut self, key: Variant, value: Variant) -> Option<Variant> {
        if let Some(slot) = self.get_mut(&key) {
            return Some(std::mem::replace(slot, value));
        }
        self.entries.push((key, value));
        None
    }

    pub fn remove(&mut self, key: &Variant) -> Option<Variant> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn contains_key(&self, key: &Variant) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variant, &Variant)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Values are mutable; keys are not.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Variant, &mut Variant)> {
        self.entries.iter_mut().map(|(k, v)| (&*k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Variant> {
        self.entries.iter().map(|(k, _)| k)
    }
}

impl FromIterator<(Variant, Variant)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (Variant, Variant)>>(iter: I) -> Self {
        let mut dict = Dictionary::new();
        for (key, value) in iter {
            dict.insert(key, value);
        }
        dict
    }
}
