//! Core data model types for dentition.
//!
//! These are the record types the catalog is built from and that every
//! other component (search, timeline, chart, study) reads.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

/// A single tooth in the reference catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToothRecord {
    /// Unique identifier (e.g. "primary-51").
    pub id: String,
    /// Primary (deciduous) or permanent dentition.
    #[serde(rename = "type")]
    pub tooth_type: ToothType,
    /// Anatomical category.
    pub category: Category,
    /// Upper or lower arch.
    pub position: Position,
    /// Patient's left or right.
    pub side: Side,
    /// English display name (e.g. "Central Incisor").
    pub name: String,
    /// Localization key for the name (e.g. "centralIncisor").
    pub name_key: String,
    /// Codes in the three numbering systems.
    pub notation: Notation,
    /// When the tooth appears in the mouth.
    pub eruption: AgeSpan,
    /// When the tooth is shed. Primary teeth only.
    #[serde(default)]
    pub shedding: Option<AgeSpan>,
    /// When root formation completes.
    #[serde(default)]
    pub root_completion: Option<AgeSpan>,
    /// When crown formation completes.
    #[serde(default)]
    pub crown_completion: Option<AgeSpan>,
}

impl ToothRecord {
    /// The `"{position} {side} {name}"` label used in listings and events.
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.position, self.side, self.name)
    }

    pub fn is_primary(&self) -> bool {
        self.tooth_type == ToothType::Primary
    }

    pub fn is_permanent(&self) -> bool {
        self.tooth_type == ToothType::Permanent
    }
}

/// Codes for one tooth in each numbering system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notation {
    /// Universal (ADA) code: "1"–"32" or "A"–"T".
    pub universal: String,
    /// Palmer code, quadrant prefix plus position (e.g. "UR6", "LLC").
    pub palmer: String,
    /// Two-digit FDI (ISO 3950) code.
    pub fdi: String,
}

impl Notation {
    /// Quadrant and position digits of the FDI code.
    ///
    /// Returns `None` when the code is not two ASCII digits.
    pub fn fdi_digits(&self) -> Option<(u8, u8)> {
        let bytes = self.fdi.as_bytes();
        if bytes.len() < 2 || !bytes[0].is_ascii_digit() || !bytes[1].is_ascii_digit() {
            return None;
        }
        Some((bytes[0] - b'0', bytes[1] - b'0'))
    }
}

/// A developmental age: an average in months plus a display range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeSpan {
    pub age_months: u32,
    /// Human-readable range (e.g. "6-10 months").
    pub age_range: String,
}

impl AgeSpan {
    pub fn new(age_months: u32, age_range: impl Into<String>) -> Self {
        Self {
            age_months,
            age_range: age_range.into(),
        }
    }
}

/// Primary (deciduous) or permanent dentition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToothType {
    Primary,
    Permanent,
}

impl fmt::Display for ToothType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToothType::Primary => write!(f, "primary"),
            ToothType::Permanent => write!(f, "permanent"),
        }
    }
}

impl FromStr for ToothType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "primary" | "deciduous" | "baby" => Ok(ToothType::Primary),
            "permanent" | "adult" => Ok(ToothType::Permanent),
            other => Err(CatalogError::InvalidValue {
                field: "type",
                value: other.to_string(),
            }),
        }
    }
}

/// Anatomical tooth category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Incisor,
    Canine,
    Premolar,
    Molar,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Incisor => write!(f, "incisor"),
            Category::Canine => write!(f, "canine"),
            Category::Premolar => write!(f, "premolar"),
            Category::Molar => write!(f, "molar"),
        }
    }
}

/// Upper (maxillary) or lower (mandibular) arch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Maxillary,
    Mandibular,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Maxillary => write!(f, "maxillary"),
            Position::Mandibular => write!(f, "mandibular"),
        }
    }
}

impl FromStr for Position {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "maxillary" | "upper" => Ok(Position::Maxillary),
            "mandibular" | "lower" => Ok(Position::Mandibular),
            other => Err(CatalogError::InvalidValue {
                field: "position",
                value: other.to_string(),
            }),
        }
    }
}

/// Patient's left or right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Format an age in months the way the reference tables show averages.
///
/// Under a year stays in months; whole years drop the month part.
pub fn format_age(months: u32) -> String {
    if months < 12 {
        return format!("{months} months");
    }
    let years = months / 12;
    let remaining = months % 12;
    if remaining == 0 {
        format!("{years} years")
    } else {
        format!("{years}y {remaining}m")
    }
}
