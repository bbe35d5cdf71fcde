use super::Variant;
use glam::{IVec2, Quat, Vec2, Vec3, Vec4};

/// Named sub-field access for composite value kinds.
///
/// The editor renders one nested edit per entry in `FIELDS` and writes edited
/// fields back through [`CompositeFields::set_field`], leaving the other fields
/// untouched.
pub trait CompositeFields {
    const FIELDS: &'static [&'static str];

    fn field(&self, index: usize) -> Variant;

    /// Returns `false` when the index is out of range or the value has the wrong kind.
    fn set_field(&mut self, index: usize, value: &Variant) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_array(rgba: [f32; 4]) -> Self {
        Self { r: rgba[0], g: rgba[1], b: rgba[2], a: rgba[3] }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect2 {
    pub position: Vec2,
    pub size: Vec2,
}

impl Rect2 {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    pub fn end(&self) -> Vec2 {
        self.position + self.size
    }

    /// Moves the far corner, keeping `position`.
    pub fn set_end(&mut self, end: Vec2) {
        self.size = end - self.position;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect2i {
    pub position: IVec2,
    pub size: IVec2,
}

impl Rect2i {
    pub fn new(position: IVec2, size: IVec2) -> Self {
        Self { position, size }
    }

    pub fn end(&self) -> IVec2 {
        self.position + self.size
    }

    pub fn set_end(&mut self, end: IVec2) {
        self.size = end - self.position;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub position: Vec3,
    pub size: Vec3,
}

impl Aabb {
    pub fn new(position: Vec3, size: Vec3) -> Self {
        Self { position, size }
    }

    pub fn end(&self) -> Vec3 {
        self.position + self.size
    }

    pub fn set_end(&mut self, end: Vec3) {
        self.size = end - self.position;
    }
}

/// 2D affine transform stored as two basis columns plus origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub x: Vec2,
    pub y: Vec2,
    pub origin: Vec2,
}

impl Transform2D {
    pub const IDENTITY: Transform2D = Transform2D { x: Vec2::X, y: Vec2::Y, origin: Vec2::ZERO };
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub d: f32,
}

impl Plane {
    pub fn new(normal: Vec3, d: f32) -> Self {
        Self { normal, d }
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self { normal: Vec3::Y, d: 0.0 }
    }
}

/// 3x3 matrix stored as three columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    pub x: Vec3,
    pub y: Vec3,
    pub z: Vec3,
}

impl Basis {
    pub const IDENTITY: Basis = Basis { x: Vec3::X, y: Vec3::Y, z: Vec3::Z };
}

impl Default for Basis {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform3D {
    pub basis: Basis,
    pub origin: Vec3,
}

impl Transform3D {
    pub const IDENTITY: Transform3D = Transform3D { basis: Basis::IDENTITY, origin: Vec3::ZERO };
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// 4x4 projection matrix stored as four columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub x: Vec4,
    pub y: Vec4,
    pub z: Vec4,
    pub w: Vec4,
}

impl Projection {
    pub const IDENTITY: Projection = Projection { x: Vec4::X, y: Vec4::Y, z: Vec4::Z, w: Vec4::W };
}

impl Default for Projection {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl CompositeFields for Rect2 {
    const FIELDS: &'static [&'static str] = &["position", "end", "size"];

    fn field(&self, index: usize) -> Variant {
        match index {
            0 => Variant::Vector2(self.position),
            1 => Variant::Vector2(self.end()),
            2 => Variant::Vector2(self.size),
            _ => Variant::Nil,
        }
    }

    fn set_field(&mut self, index: usize, value: &Variant) -> bool {
        let Variant::Vector2(v) = value else {
            return false;
        };
        match index {
            0 => self.position = *v,
            1 => self.set_end(*v),
            2 => self.size = *v,
            _ => return false,
        }
        true
    }
}

impl CompositeFields for Rect2i {
    const FIELDS: &'static [&'static str] = &["position", "end", "size"];

    fn field(&self, index: usize) -> Variant {
        match index {
            0 => Variant::Vector2i(self.position),
            1 => Variant::Vector2i(self.end()),
            2 => Variant::Vector2i(self.size),
            _ => Variant::Nil,
        }
    }

    fn set_field(&mut self, index: usize, value: &Variant) -> bool {
        let Variant::Vector2i(v) = value else {
            return false;
        };
        match index {
            0 => self.position = *v,
            1 => self.set_end(*v),
            2 => self.size = *v,
            _ => return false,
        }
        true
    }
}

impl CompositeFields for Aabb {
    const FIELDS: &'static [&'static str] = &["position", "end", "size"];

    fn field(&self, index: usize) -> Variant {
        match index {
            0 => Variant::Vector3(self.position),
            1 => Variant::Vector3(self.end()),
            2 => Variant::Vector3(self.size),
            _ => Variant::Nil,
        }
    }

    fn set_field(&mut self, index: usize, value: &Variant) -> bool {
        let Variant::Vector3(v) = value else {
            return false;
        };
        match index {
            0 => self.position = *v,
            1 => self.set_end(*v),
            2 => self.size = *v,
            _ => return false,
        }
        true
    }
}

impl CompositeFields for Transform2D {
    const FIELDS: &'static [&'static str] = &["x", "y", "origin"];

    fn field(&self, index: usize) -> Variant {
        match index {
            0 => Variant::Vector2(self.x),
            1 => Variant::Vector2(self.y),
            2 => Variant::Vector2(self.origin),
            _ => Variant::Nil,
        }
    }

    fn set_field(&mut self, index: usize, value: &Variant) -> bool {
        let Variant::Vector2(v) = value else {
            return false;
        };
        match index {
            0 => self.x = *v,
            1 => self.y = *v,
            2 => self.origin = *v,
            _ => return false,
        }
        true
    }
}

impl CompositeFields for Plane {
    const FIELDS: &'static [&'static str] = &["normal", "d"];

    fn field(&self, index: usize) -> Variant {
        match index {
            0 => Variant::Vector3(self.normal),
            1 => Variant::Float(self.d as f64),
            _ => Variant::Nil,
        }
    }

    fn set_field(&mut self, index: usize, value: &Variant) -> bool {
        match (index, value) {
            (0, Variant::Vector3(v)) => self.normal = *v,
            (1, Variant::Float(d)) => self.d = *d as f32,
            _ => return false,
        }
        true
    }
}

impl CompositeFields for Quat {
    const FIELDS: &'static [&'static str] = &["x", "y", "z", "w"];

    fn field(&self, index: usize) -> Variant {
        match index {
            0 => Variant::Float(self.x as f64),
            1 => Variant::Float(self.y as f64),
            2 => Variant::Float(self.z as f64),
            3 => Variant::Float(self.w as f64),
            _ => Variant::Nil,
        }
    }

    fn set_field(&mut self, index: usize, value: &Variant) -> bool {
        let Variant::Float(component) = value else {
            return false;
        };
        if index > 3 {
            return false;
        }
        let mut parts = self.to_array();
        parts[index] = *component as f32;
        *self = Quat::from_array(parts);
        true
    }
}

impl CompositeFields for Basis {
    const FIELDS: &'static [&'static str] = &["x", "y", "z"];

    fn field(&self, index: usize) -> Variant {
        match index {
            0 => Variant::Vector3(self.x),
            1 => Variant::Vector3(self.y),
            2 => Variant::Vector3(self.z),
            _ => Variant::Nil,
        }
    }

    fn set_field(&mut self, index: usize, value: &Variant) -> bool {
        let Variant::Vector3(v) = value else {
            return false;
        };
        match index {
            0 => self.x = *v,
            1 => self.y = *v,
            2 => self.z = *v,
            _ => return false,
        }
        true
    }
}

impl CompositeFields for Transform3D {
    const FIELDS: &'static [&'static str] = &["basis", "origin"];

    fn field(&self, index: usize) -> Variant {
        match index {
            0 => Variant::Basis(self.basis),
            1 => Variant::Vector3(self.origin),
            _ => Variant::Nil,
        }
    }

    fn set_field(&mut self, index: usize, value: &Variant) -> bool {
        match (index, value) {
            (0, Variant::Basis(b)) => self.basis = *b,
            (1, Variant::Vector3(v)) => self.origin = *v,
            _ => return false,
        }
        true
    }
}

impl CompositeFields for Projection {
    const FIELDS: &'static [&'static str] = &["x", "y", "z", "w"];

    fn field(&self, index: usize) -> Variant {
        match index {
            0 => Variant::Vector4(self.x),
            1 => Variant::Vector4(self.y),
            2 => Variant::Vector4(self.z),
            3 => Variant::Vector4(self.w),
            _ => Variant::Nil,
        }
    }

    fn set_field(&mut self, index: usize, value: &Variant) -> bool {
        let Variant::Vector4(v) = value else {
            return false;
        };
        match index {
            0 => self.x = *v,
            1 => self.y = *v,
            2 => self.z = *v,
            3 => self.w = *v,
            _ => return false,
        }
        true
    }
}
