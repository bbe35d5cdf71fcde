use super::{Aabb, Basis, Color, Dictionary, Plane, Projection, Rect2, Rect2i, Transform2D, Transform3D, Variant};
use glam::{IVec2, IVec3, IVec4, Quat, Vec2, Vec3, Vec4};

pub trait ToVariant {
    fn to_variant(&self) -> Variant;
}

/// Converts back from a variant. Integer targets narrower than `i64` saturate at
/// their own bounds instead of wrapping.
pub trait FromVariant: Sized {
    fn from_variant(variant: &Variant) -> Option<Self>;
}

macro_rules! variant_conversions {
    ($ty:ty, $kind:ident) => {
        impl ToVariant for $ty {
            fn to_variant(&self) -> Variant {
                Variant::$kind(self.clone())
            }
        }

        impl FromVariant for $ty {
            fn from_variant(variant: &Variant) -> Option<Self> {
                match variant {
                    Variant::$kind(value) => Some(value.clone()),
                    _ => None,
                }
            }
        }

        impl From<$ty> for Variant {
            fn from(value: $ty) -> Self {
                Variant::$kind(value)
            }
        }
    };
}

variant_conversions!(bool, Bool);
variant_conversions!(i64, Int);
variant_conversions!(f64, Float);
variant_conversions!(String, String);
variant_conversions!(Vec2, Vector2);
variant_conversions!(IVec2, Vector2i);
variant_conversions!(Vec3, Vector3);
variant_conversions!(IVec3, Vector3i);
variant_conversions!(Vec4, Vector4);
variant_conversions!(IVec4, Vector4i);
variant_conversions!(Rect2, Rect2);
variant_conversions!(Rect2i, Rect2i);
variant_conversions!(Transform2D, Transform2D);
variant_conversions!(Plane, Plane);
variant_conversions!(Quat, Quaternion);
variant_conversions!(Aabb, Aabb);
variant_conversions!(Basis, Basis);
variant_conversions!(Transform3D, Transform3D);
variant_conversions!(Projection, Projection);
variant_conversions!(Color, Color);
variant_conversions!(Dictionary, Dictionary);
variant_conversions!(Vec<Variant>, Array);

macro_rules! narrow_int_conversions {
    ($($ty:ty),*) => {
        $(
            impl ToVariant for $ty {
                fn to_variant(&self) -> Variant {
                    Variant::Int(i64::from(*self))
                }
            }

            impl FromVariant for $ty {
                fn from_variant(variant: &Variant) -> Option<Self> {
                    let value = variant.as_int()?;
                    Some(value.clamp(<$ty>::MIN as i64, <$ty>::MAX as i64) as $ty)
                }
            }

            impl From<$ty> for Variant {
                fn from(value: $ty) -> Self {
                    Variant::Int(i64::from(value))
                }
            }
        )*
    };
}

narrow_int_conversions!(u8, i8, u16, i16, i32, u32);

impl ToVariant for f32 {
    fn to_variant(&self) -> Variant {
        Variant::Float(f64::from(*self))
    }
}

impl FromVariant for f32 {
    fn from_variant(variant: &Variant) -> Option<Self> {
        variant.as_float().map(|v| v as f32)
    }
}

impl From<f32> for Variant {
    fn from(value: f32) -> Self {
        Variant::Float(f64::from(value))
    }
}

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Variant::String(value.to_string())
    }
}

impl ToVariant for Variant {
    fn to_variant(&self) -> Variant {
        self.clone()
    }
}

impl FromVariant for Variant {
    fn from_variant(variant: &Variant) -> Option<Self> {
        Some(variant.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_ints_saturate() {
        assert_eq!(u8::from_variant(&Variant::Int(300)), Some(255));
        assert_eq!(u8::from_variant(&Variant::Int(-4)), Some(0));
        assert_eq!(i32::from_variant(&Variant::Int(i64::MAX)), Some(i32::MAX));
        assert_eq!(i32::from_variant(&Variant::Float(1.0)), None);
    }
}
