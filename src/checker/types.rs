use crate::error::SlimError;
use polars::prelude::{DataType, PlSmallStr, Schema};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Signed integer widths, narrowest first.
#[derive(Clone, Copy, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum IntWidth {
    W8,
    W16,
    W32,
    W64,
}

impl IntWidth {
    pub const ALL: [Self; 4] = [Self::W8, Self::W16, Self::W32, Self::W64];

    pub fn bits(self) -> u32 {
        match self {
            Self::W8 => 8,
            Self::W16 => 16,
            Self::W32 => 32,
            Self::W64 => 64,
        }
    }

    /// Smallest representable value, `-2^(w-1)`.
    pub fn min_value(self) -> i64 {
        match self {
            Self::W8 => i64::from(i8::MIN),
            Self::W16 => i64::from(i16::MIN),
            Self::W32 => i64::from(i32::MIN),
            Self::W64 => i64::MIN,
        }
    }

    /// Largest representable value, `2^(w-1) - 1`.
    pub fn max_value(self) -> i64 {
        match self {
            Self::W8 => i64::from(i8::MAX),
            Self::W16 => i64::from(i16::MAX),
            Self::W32 => i64::from(i32::MAX),
            Self::W64 => i64::MAX,
        }
    }

    /// Both bounds inclusive.
    pub fn holds(self, min: i64, max: i64) -> bool {
        min >= self.min_value() && max <= self.max_value()
    }

    /// Narrowest width whose range contains `[min, max]`. Every `i64` range fits `W64`.
    pub fn narrowest_for(min: i64, max: i64) -> Self {
        Self::ALL
            .into_iter()
            .find(|w| w.holds(min, max))
            .unwrap_or(Self::W64)
    }
}

/// Float widths a column can be stored in or narrowed to.
#[derive(Clone, Copy, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[serde(try_from = "u32", into = "u32")]
pub enum FloatWidth {
    F16,
    F32,
    F64,
}

impl FloatWidth {
    pub fn bits(self) -> u32 {
        match self {
            Self::F16 => 16,
            Self::F32 => 32,
            Self::F64 => 64,
        }
    }
}

impl TryFrom<u32> for FloatWidth {
    type Error = SlimError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            16 => Ok(Self::F16),
            32 => Ok(Self::F32),
            64 => Ok(Self::F64),
            other => Err(SlimError::Config {
                field: "float_target_width",
                value: other.to_string(),
                expected: "one of 16, 32 or 64",
            }),
        }
    }
}

impl From<FloatWidth> for u32 {
    fn from(width: FloatWidth) -> Self {
        width.bits()
    }
}

/// The logical kind of a column, as far as narrowing is concerned.
#[derive(Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Debug)]
pub enum ColumnKind {
    Integer(IntWidth),
    Float(FloatWidth),
    Boolean,
    Text,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        self.family().as_str()
    }

    pub fn family(&self) -> KindFamily {
        match self {
            Self::Integer(_) => KindFamily::Integer,
            Self::Float(_) => KindFamily::Float,
            Self::Boolean => KindFamily::Boolean,
            Self::Text => KindFamily::Text,
        }
    }
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(w) => write!(f, "Integer({} bit)", w.bits()),
            Self::Float(w) => write!(f, "Float({} bit)", w.bits()),
            Self::Boolean | Self::Text => write!(f, "{}", self.as_str()),
        }
    }
}

/// Column kinds without their widths, used to group columns.
#[derive(Clone, Copy, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum KindFamily {
    Float,
    Integer,
    Text,
    Boolean,
}

impl KindFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Float => "Float",
            Self::Integer => "Integer",
            Self::Text => "Text",
            Self::Boolean => "Boolean",
        }
    }
}

/// A storage representation a column can be recast into.
#[derive(Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Representation {
    Int8,
    Int16,
    Int32,
    Int64,
    Float16,
    Float32,
    Float64,
    #[serde(rename = "category")]
    Categorical,
}

impl Representation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float16 => "float16",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Categorical => "category",
        }
    }

    /// Bit width of one value, or `None` for dictionary-encoded columns.
    pub fn bits(&self) -> Option<u32> {
        match self {
            Self::Int8 => Some(8),
            Self::Int16 | Self::Float16 => Some(16),
            Self::Int32 | Self::Float32 => Some(32),
            Self::Int64 | Self::Float64 => Some(64),
            Self::Categorical => None,
        }
    }

    /// The polars type a column is stored as after the cast.
    ///
    /// polars has no half-precision type, so `Float16` values live in a
    /// `Float32` container after being rounded to binary16 precision.
    pub fn to_dtype(&self) -> DataType {
        match self {
            Self::Int8 => DataType::Int8,
            Self::Int16 => DataType::Int16,
            Self::Int32 => DataType::Int32,
            Self::Int64 => DataType::Int64,
            Self::Float16 | Self::Float32 => DataType::Float32,
            Self::Float64 => DataType::Float64,
            Self::Categorical => DataType::Categorical(None, Default::default()),
        }
    }
}

impl From<IntWidth> for Representation {
    fn from(width: IntWidth) -> Self {
        match width {
            IntWidth::W8 => Self::Int8,
            IntWidth::W16 => Self::Int16,
            IntWidth::W32 => Self::Int32,
            IntWidth::W64 => Self::Int64,
        }
    }
}

impl From<FloatWidth> for Representation {
    fn from(width: FloatWidth) -> Self {
        match width {
            FloatWidth::F16 => Self::Float16,
            FloatWidth::F32 => Self::Float32,
            FloatWidth::F64 => Self::Float64,
        }
    }
}

impl std::fmt::Display for Representation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Column name to recommended representation. Only columns that can shrink appear.
#[derive(Clone, Default, Deserialize, Serialize, PartialEq, Eq, Debug)]
#[serde(transparent)]
pub struct RecommendationSet {
    entries: BTreeMap<String, Representation>,
}

impl RecommendationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, column: impl Into<String>, repr: Representation) {
        self.entries.insert(column.into(), repr);
    }

    pub fn get(&self, column: &str) -> Option<Representation> {
        self.entries.get(column).copied()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.entries.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Representation)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Target dtypes as a polars schema, usable as a dtype overwrite when reading files.
    pub fn to_schema(&self) -> Schema {
        self.entries
            .iter()
            .map(|(name, repr)| (PlSmallStr::from(name.as_str()), repr.to_dtype()))
            .collect()
    }
}

impl FromIterator<(String, Representation)> for RecommendationSet {
    fn from_iter<I: IntoIterator<Item = (String, Representation)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
