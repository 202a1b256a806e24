//! Arch ordering for chart display.
//!
//! Each arch is laid out from the patient's right to left, which is the
//! viewer's left to right when facing the patient.

use crate::model::{Position, Side, ToothRecord, ToothType};

/// Ordering key along the Universal numbering walk.
///
/// Permanent teeth use their number, primary teeth the letter ordinal
/// (`A` = 1). Unparsable codes sort last.
pub fn universal_order(tooth: &ToothRecord) -> u32 {
    let code = tooth.notation.universal.trim();
    match tooth.tooth_type {
        ToothType::Permanent => code.parse().unwrap_or(u32::MAX),
        ToothType::Primary => code
            .chars()
            .next()
            .filter(char::is_ascii_uppercase)
            .map(|c| u32::from(c) - u32::from('A') + 1)
            .unwrap_or(u32::MAX),
    }
}

/// Records of one arch in display order.
///
/// Maxillary: right side then left side, both ascending (`1→8 | 9→16`,
/// `A→E | F→J`). Mandibular: right side then left side, both descending
/// (`32→25 | 24→17`, `T→P | O→K`).
pub fn arch<'a, I>(records: I, position: Position) -> Vec<&'a ToothRecord>
where
    I: IntoIterator<Item = &'a ToothRecord>,
{
    let teeth: Vec<&ToothRecord> = records
        .into_iter()
        .filter(|t| t.position == position)
        .collect();

    let half_arch = |side: Side| {
        let mut half: Vec<&ToothRecord> =
            teeth.iter().copied().filter(|t| t.side == side).collect();
        match position {
            Position::Maxillary => half.sort_by_key(|t| universal_order(t)),
            Position::Mandibular => {
                half.sort_by_key(|t| std::cmp::Reverse(universal_order(t)))
            }
        }
        half
    };

    let mut ordered = half_arch(Side::Right);
    ordered.extend(half_arch(Side::Left));
    ordered
}
