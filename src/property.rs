//! Property metadata: descriptors, editor hints and hint-argument parsing.

use crate::variant::VariantKind;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PropertyHint {
    #[default]
    None,
    /// `min,max[,step][,extra...]`
    Range,
    /// `A,B,C` or `A:1,B:4`
    Enum,
    /// Named bit flags, `A,B,C` maps to bits 0..3.
    Flags,
    Layers2DRender,
    Layers2DPhysics,
    Layers2DNavigation,
    Layers3DRender,
    Layers3DPhysics,
    Layers3DNavigation,
    MultilineText,
}

impl PropertyHint {
    /// Bit count of a layer-mask hint, `None` for every other hint.
    pub fn layer_bits(self) -> Option<u32> {
        match self {
            PropertyHint::Layers2DPhysics
            | PropertyHint::Layers3DPhysics
            | PropertyHint::Layers2DNavigation
            | PropertyHint::Layers3DNavigation => Some(32),
            PropertyHint::Layers2DRender | PropertyHint::Layers3DRender => Some(20),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PropertyHint::None => "None",
            PropertyHint::Range => "Range",
            PropertyHint::Enum => "Enum",
            PropertyHint::Flags => "Flags",
            PropertyHint::Layers2DRender => "Layers2DRender",
            PropertyHint::Layers2DPhysics => "Layers2DPhysics",
            PropertyHint::Layers2DNavigation => "Layers2DNavigation",
            PropertyHint::Layers3DRender => "Layers3DRender",
            PropertyHint::Layers3DPhysics => "Layers3DPhysics",
            PropertyHint::Layers3DNavigation => "Layers3DNavigation",
            PropertyHint::MultilineText => "MultilineText",
        }
    }
}

impl fmt::Display for PropertyHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PropertyUsage {
    #[default]
    Normal,
    Group,
    Subgroup,
    Category,
    /// Serialized but not shown in the property sheet.
    Storage,
}

impl PropertyUsage {
    /// Group-like entries carry no value and open a new disclosure scope.
    pub fn opens_scope(self) -> bool {
        matches!(self, PropertyUsage::Group | PropertyUsage::Subgroup | PropertyUsage::Category)
    }

    pub fn label(self) -> &'static str {
        match self {
            PropertyUsage::Normal => "Normal",
            PropertyUsage::Group => "Group",
            PropertyUsage::Subgroup => "Subgroup",
            PropertyUsage::Category => "Category",
            PropertyUsage::Storage => "Storage",
        }
    }
}

impl fmt::Display for PropertyUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    pub name: String,
    pub kind: VariantKind,
    pub hint: PropertyHint,
    pub hint_args: String,
    pub usage: PropertyUsage,
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<String>, kind: VariantKind) -> Self {
        Self {
            name: name.into(),
            kind,
            hint: PropertyHint::None,
            hint_args: String::new(),
            usage: PropertyUsage::Normal,
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, VariantKind::Nil).with_usage(PropertyUsage::Group)
    }

    pub fn category(name: impl Into<String>) -> Self {
        Self::new(name, VariantKind::Nil).with_usage(PropertyUsage::Category)
    }

    pub fn with_hint(mut self, hint: PropertyHint, hint_args: impl Into<String>) -> Self {
        self.hint = hint;
        self.hint_args = hint_args.into();
        self
    }

    pub fn with_usage(mut self, usage: PropertyUsage) -> Self {
        self.usage = usage;
        self
    }

    /// Multi-line summary shown when hovering a property name.
    pub fn tooltip(&self) -> String {
        format!("{}\n{}\n{}\n{}\n{}", self.name, self.hint, self.hint_args, self.usage, self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HintError {
    #[error("range hint needs `min,max`, got {0:?}")]
    MissingBounds(String),
    #[error("hint token {token:?} is not a number")]
    InvalidNumber { token: String },
    #[error("enum hint has no entries")]
    EmptyEnum,
    #[error("enum entry {entry:?} has a non-integer value")]
    InvalidEnumValue { entry: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeHint {
    pub min: f64,
    pub max: f64,
    pub step: Option<f64>,
    pub radians_as_degrees: bool,
    pub exp: bool,
    pub suffix: Option<String>,
}

impl RangeHint {
    /// Parses `min,max[,step][,extra...]`. Bounds given in the wrong order are swapped.
    pub fn parse(args: &str) -> Result<Self, HintError> {
        let mut tokens = args.split(',').map(str::trim);
        let (Some(min), Some(max)) = (tokens.next(), tokens.next()) else {
            return Err(HintError::MissingBounds(args.to_string()));
        };
        let mut min = parse_number(min)?;
        let mut max = parse_number(max)?;
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        let mut hint = RangeHint { min, max, step: None, radians_as_degrees: false, exp: false, suffix: None };
        for (position, token) in tokens.enumerate() {
            if position == 0 {
                if let Ok(step) = token.parse::<f64>() {
                    hint.step = (step.is_finite() && step > 0.0).then_some(step);
                    continue;
                }
            }
            match token {
                "radians" | "radians_as_degrees" => hint.radians_as_degrees = true,
                "exp" => hint.exp = true,
                _ => {
                    if let Some(suffix) = token.strip_prefix("suffix:") {
                        hint.suffix = Some(suffix.to_string());
                    }
                }
            }
        }
        Ok(hint)
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn clamp_int(&self, value: i64) -> i64 {
        let min = self.min.ceil() as i64;
        let max = (self.max.floor() as i64).max(min);
        value.clamp(min, max)
    }
}

fn parse_number(token: &str) -> Result<f64, HintError> {
    match token.parse::<f64>() {
        Ok(value) if !value.is_nan() => Ok(value),
        _ => Err(HintError::InvalidNumber { token: token.to_string() }),
    }
}

/// True when the comma-separated hint arguments carry the angle-in-degrees marker.
pub fn wants_degrees(args: &str) -> bool {
    args.split(',').map(str::trim).any(|token| token == "radians_as_degrees" || token == "radians")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumOption {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumHint {
    pub options: Vec<EnumOption>,
}

impl EnumHint {
    /// Parses `A,B,C` (values 0,1,2) or `A:4,B,C:9` (explicit values; implicit
    /// entries continue from the previous value).
    pub fn parse(args: &str) -> Result<Self, HintError> {
        if args.trim().is_empty() {
            return Err(HintError::EmptyEnum);
        }
        let mut options = Vec::new();
        let mut next = 0i64;
        for entry in args.split(',') {
            let entry = entry.trim();
            let (name, value) = match entry.rsplit_once(':') {
                Some((name, value)) => {
                    let value = value
                        .trim()
                        .parse::<i64>()
                        .map_err(|_| HintError::InvalidEnumValue { entry: entry.to_string() })?;
                    (name.trim(), value)
                }
                None => (entry, next),
            };
            options.push(EnumOption { name: name.to_string(), value });
            next = value.saturating_add(1);
        }
        Ok(Self { options })
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn index_of(&self, value: i64) -> Option<usize> {
        self.options.iter().position(|option| option.value == value)
    }

    pub fn value_at(&self, index: usize) -> Option<i64> {
        self.options.get(index).map(|option| option.value)
    }

    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(|option| option.name.as_str())
    }
}

/// Sets or clears one bit of a 32-bit layer mask stored in an `i64`.
pub fn set_layer_bit(mask: i64, bit: u32, enabled: bool) -> i64 {
    // Only the low 32 bits are layers; anything above is carried through.
    let flag = 1i64 << (bit & 31);
    if enabled {
        mask | flag
    } else {
        mask & !flag
    }
}

pub fn layer_bit_set(mask: i64, bit: u32) -> bool {
    mask & (1i64 << (bit & 31)) != 0
}
