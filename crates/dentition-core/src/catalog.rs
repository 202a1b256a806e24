//! The static reference catalog.
//!
//! Built once on first access from per-arch tables and expanded to both sides
//! of each arch. Order is primary teeth then permanent teeth, each walking the
//! FDI quadrants in ascending order, which is also the tie-break order of the
//! timeline.

use std::sync::LazyLock;

use crate::error::CatalogError;
use crate::model::{AgeSpan, Category, Notation, Position, Side, ToothRecord, ToothType};

/// One row of an arch table: a tooth position and its ages.
struct ArchRow {
    /// Position digit within the FDI quadrant.
    pos: u8,
    category: Category,
    name: &'static str,
    name_key: &'static str,
    eruption: (u32, &'static str),
    shedding: Option<(u32, &'static str)>,
    root: (u32, &'static str),
    crown: (u32, &'static str),
}

#[allow(clippy::too_many_arguments)]
const fn row(
    pos: u8,
    category: Category,
    name: &'static str,
    name_key: &'static str,
    eruption: (u32, &'static str),
    shedding: Option<(u32, &'static str)>,
    root: (u32, &'static str),
    crown: (u32, &'static str),
) -> ArchRow {
    ArchRow {
        pos,
        category,
        name,
        name_key,
        eruption,
        shedding,
        root,
        crown,
    }
}

use Category::{Canine, Incisor, Molar, Premolar};

#[rustfmt::skip]
const PRIMARY_MAXILLARY: &[ArchRow] = &[
    row(1, Incisor, "Central Incisor", "centralIncisor", (10, "8-12 months"), Some((78, "6-7 years")), (18, "1.5 years"), (2, "1.5 months")),
    row(2, Incisor, "Lateral Incisor", "lateralIncisor", (11, "9-13 months"), Some((90, "7-8 years")), (24, "2 years"), (3, "2.5 months")),
    row(3, Canine, "Canine", "canine", (19, "16-22 months"), Some((132, "10-12 years")), (39, "3.25 years"), (9, "9 months")),
    row(4, Molar, "First Molar", "firstMolar", (16, "13-19 months"), Some((120, "9-11 years")), (30, "2.5 years"), (6, "6 months")),
    row(5, Molar, "Second Molar", "secondMolar", (29, "25-33 months"), Some((132, "10-12 years")), (36, "3 years"), (11, "11 months")),
];

#[rustfmt::skip]
const PRIMARY_MANDIBULAR: &[ArchRow] = &[
    row(1, Incisor, "Central Incisor", "centralIncisor", (8, "6-10 months"), Some((72, "6-7 years")), (18, "1.5 years"), (3, "2.5 months")),
    row(2, Incisor, "Lateral Incisor", "lateralIncisor", (13, "10-16 months"), Some((84, "7-8 years")), (18, "1.5 years"), (3, "3 months")),
    row(3, Canine, "Canine", "canine", (20, "17-23 months"), Some((126, "9-12 years")), (39, "3.25 years"), (9, "9 months")),
    row(4, Molar, "First Molar", "firstMolar", (16, "14-18 months"), Some((120, "9-11 years")), (27, "2.25 years"), (6, "5.5 months")),
    row(5, Molar, "Second Molar", "secondMolar", (27, "23-31 months"), Some((132, "10-12 years")), (36, "3 years"), (10, "10 months")),
];

#[rustfmt::skip]
const PERMANENT_MAXILLARY: &[ArchRow] = &[
    row(1, Incisor, "Central Incisor", "centralIncisor", (90, "7-8 years"), None, (120, "10 years"), (54, "4-5 years")),
    row(2, Incisor, "Lateral Incisor", "lateralIncisor", (102, "8-9 years"), None, (132, "11 years"), (60, "4-5 years")),
    row(3, Canine, "Canine", "canine", (138, "11-12 years"), None, (168, "13-15 years"), (78, "6-7 years")),
    row(4, Premolar, "First Premolar", "firstPremolar", (126, "10-11 years"), None, (150, "12-13 years"), (66, "5-6 years")),
    row(5, Premolar, "Second Premolar", "secondPremolar", (132, "10-12 years"), None, (162, "12-14 years"), (78, "6-7 years")),
    row(6, Molar, "First Molar", "firstMolar", (78, "6-7 years"), None, (114, "9-10 years"), (33, "2.5-3 years")),
    row(7, Molar, "Second Molar", "secondMolar", (150, "12-13 years"), None, (180, "14-16 years"), (90, "7-8 years")),
    row(8, Molar, "Third Molar", "thirdMolar", (228, "17-21 years"), None, (258, "18-25 years"), (150, "12-16 years")),
];

#[rustfmt::skip]
const PERMANENT_MANDIBULAR: &[ArchRow] = &[
    row(1, Incisor, "Central Incisor", "centralIncisor", (78, "6-7 years"), None, (108, "9 years"), (54, "4-5 years")),
    row(2, Incisor, "Lateral Incisor", "lateralIncisor", (90, "7-8 years"), None, (120, "10 years"), (54, "4-5 years")),
    row(3, Canine, "Canine", "canine", (114, "9-10 years"), None, (156, "12-14 years"), (72, "6-7 years")),
    row(4, Premolar, "First Premolar", "firstPremolar", (132, "10-12 years"), None, (150, "12-13 years"), (72, "5-6 years")),
    row(5, Premolar, "Second Premolar", "secondPremolar", (138, "11-12 years"), None, (162, "13-14 years"), (84, "6-7 years")),
    row(6, Molar, "First Molar", "firstMolar", (72, "6-7 years"), None, (114, "9-10 years"), (33, "2.5-3 years")),
    row(7, Molar, "Second Molar", "secondMolar", (144, "11-13 years"), None, (180, "14-15 years"), (90, "7-8 years")),
    row(8, Molar, "Third Molar", "thirdMolar", (228, "17-21 years"), None, (258, "18-25 years"), (150, "12-16 years")),
];

/// FDI quadrant layout: (permanent quadrant, arch, side).
const QUADRANTS: [(u8, Position, Side); 4] = [
    (1, Position::Maxillary, Side::Right),
    (2, Position::Maxillary, Side::Left),
    (3, Position::Mandibular, Side::Left),
    (4, Position::Mandibular, Side::Right),
];

static CATALOG: LazyLock<Vec<ToothRecord>> = LazyLock::new(build_catalog);

/// All records, primary first.
pub fn catalog() -> &'static [ToothRecord] {
    &CATALOG
}

/// The 20 primary records.
pub fn primary_teeth() -> impl Iterator<Item = &'static ToothRecord> {
    catalog().iter().filter(|t| t.is_primary())
}

/// The 32 permanent records.
pub fn permanent_teeth() -> impl Iterator<Item = &'static ToothRecord> {
    catalog().iter().filter(|t| t.is_permanent())
}

/// Records of one dentition, or all of them.
pub fn by_type(tooth_type: Option<ToothType>) -> Vec<&'static ToothRecord> {
    catalog()
        .iter()
        .filter(|t| tooth_type.is_none_or(|ty| t.tooth_type == ty))
        .collect()
}

/// Look a record up by id (`"permanent-36"`) or bare FDI code (`"36"`).
pub fn find(key: &str) -> Result<&'static ToothRecord, CatalogError> {
    find_in(catalog(), key)
}

/// Same as [`find`] over an arbitrary record slice.
pub fn find_in<'a>(records: &'a [ToothRecord], key: &str) -> Result<&'a ToothRecord, CatalogError> {
    let key = key.trim();
    records
        .iter()
        .find(|t| t.id == key)
        .or_else(|| records.iter().find(|t| t.notation.fdi == key))
        .ok_or_else(|| CatalogError::UnknownTooth(key.to_string()))
}

fn build_catalog() -> Vec<ToothRecord> {
    let mut records = Vec::with_capacity(52);
    expand(
        &mut records,
        ToothType::Primary,
        PRIMARY_MAXILLARY,
        PRIMARY_MANDIBULAR,
    );
    expand(
        &mut records,
        ToothType::Permanent,
        PERMANENT_MAXILLARY,
        PERMANENT_MANDIBULAR,
    );
    tracing::debug!(count = records.len(), "built tooth catalog");
    records
}

fn expand(
    records: &mut Vec<ToothRecord>,
    tooth_type: ToothType,
    maxillary: &[ArchRow],
    mandibular: &[ArchRow],
) {
    for (perm_quadrant, position, side) in QUADRANTS {
        let quadrant = match tooth_type {
            ToothType::Primary => perm_quadrant + 4,
            ToothType::Permanent => perm_quadrant,
        };
        let rows = match position {
            Position::Maxillary => maxillary,
            Position::Mandibular => mandibular,
        };
        for r in rows {
            let fdi = format!("{quadrant}{}", r.pos);
            records.push(ToothRecord {
                id: format!("{tooth_type}-{fdi}"),
                tooth_type,
                category: r.category,
                position,
                side,
                name: r.name.to_string(),
                name_key: r.name_key.to_string(),
                notation: Notation {
                    universal: universal_code(tooth_type, perm_quadrant, r.pos),
                    palmer: palmer_code(tooth_type, perm_quadrant, r.pos),
                    fdi,
                },
                eruption: AgeSpan::new(r.eruption.0, r.eruption.1),
                shedding: r.shedding.map(|(m, s)| AgeSpan::new(m, s)),
                root_completion: Some(AgeSpan::new(r.root.0, r.root.1)),
                crown_completion: Some(AgeSpan::new(r.crown.0, r.crown.1)),
            });
        }
    }
}

/// Universal numbering walks the upper arch right to left, then the lower
/// arch left to right.
fn universal_code(tooth_type: ToothType, perm_quadrant: u8, pos: u8) -> String {
    match tooth_type {
        ToothType::Permanent => {
            let n = match perm_quadrant {
                1 => 9 - pos,
                2 => 8 + pos,
                3 => 25 - pos,
                _ => 24 + pos,
            };
            n.to_string()
        }
        ToothType::Primary => {
            let ordinal = match perm_quadrant {
                1 => 6 - pos,
                2 => 5 + pos,
                3 => 16 - pos,
                _ => 15 + pos,
            };
            char::from(b'A' + ordinal - 1).to_string()
        }
    }
}

fn palmer_code(tooth_type: ToothType, perm_quadrant: u8, pos: u8) -> String {
    let prefix = match perm_quadrant {
        1 => "UR",
        2 => "UL",
        3 => "LL",
        _ => "LR",
    };
    match tooth_type {
        ToothType::Permanent => format!("{prefix}{pos}"),
        ToothType::Primary => format!("{prefix}{}", char::from(b'A' + pos - 1)),
    }
}
