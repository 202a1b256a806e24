//! Column sorting for the reference table.

use std::fmt;
use std::str::FromStr;

use crate::chart::universal_order;
use crate::error::CatalogError;
use crate::model::{ToothRecord, ToothType};

/// A sortable reference-table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Crown,
    Eruption,
    Shedding,
    Root,
    Fdi,
    Universal,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Crown => write!(f, "crown"),
            SortKey::Eruption => write!(f, "eruption"),
            SortKey::Shedding => write!(f, "shedding"),
            SortKey::Root => write!(f, "root"),
            SortKey::Fdi => write!(f, "fdi"),
            SortKey::Universal => write!(f, "universal"),
        }
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "crown" => Ok(SortKey::Crown),
            "eruption" => Ok(SortKey::Eruption),
            "shedding" => Ok(SortKey::Shedding),
            "root" => Ok(SortKey::Root),
            "fdi" => Ok(SortKey::Fdi),
            "universal" => Ok(SortKey::Universal),
            other => Err(CatalogError::InvalidValue {
                field: "sort key",
                value: other.to_string(),
            }),
        }
    }
}

impl SortKey {
    /// Ascending key; records without a value sort after all others.
    fn key(self, tooth: &ToothRecord) -> (bool, u32) {
        let value = match self {
            SortKey::Crown => tooth.crown_completion.as_ref().map(|s| s.age_months),
            SortKey::Eruption => Some(tooth.eruption.age_months),
            SortKey::Shedding => tooth.shedding.as_ref().map(|s| s.age_months),
            SortKey::Root => tooth.root_completion.as_ref().map(|s| s.age_months),
            SortKey::Fdi => tooth.notation.fdi.trim().parse().ok(),
            // letters (primary) before numbers (permanent)
            SortKey::Universal => {
                let offset = match tooth.tooth_type {
                    ToothType::Primary => 0,
                    ToothType::Permanent => 100,
                };
                Some(offset + universal_order(tooth).min(99))
            }
        };
        (value.is_none(), value.unwrap_or(0))
    }
}

/// Stable ascending sort by `key`.
pub fn sort_records(records: &mut [&ToothRecord], key: SortKey) {
    records.sort_by_key(|t| key.key(t));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{by_type, catalog};

    fn sorted(key: SortKey) -> Vec<&'static ToothRecord> {
        let mut records: Vec<_> = catalog().iter().collect();
        sort_records(&mut records, key);
        records
    }

    #[test]
    fn eruption_ascending() {
        let records = sorted(SortKey::Eruption);
        assert_eq!(records[0].notation.fdi, "71");
        assert!(records
            .windows(2)
            .all(|w| w[0].eruption.age_months <= w[1].eruption.age_months));
        assert_eq!(records.last().map(|t| t.name.as_str()), Some("Third Molar"));
    }

    #[test]
    fn missing_shedding_sorts_last() {
        let records = sorted(SortKey::Shedding);
        assert!(records[..20].iter().all(|t| t.shedding.is_some()));
        assert!(records[20..].iter().all(|t| t.shedding.is_none()));
        assert_eq!(records[0].notation.fdi, "71");
    }

    #[test]
    fn fdi_and_universal_codes() {
        let fdi: Vec<_> = sorted(SortKey::Fdi)
            .iter()
            .map(|t| t.notation.fdi.clone())
            .collect();
        assert_eq!(fdi.first().map(String::as_str), Some("11"));
        assert_eq!(fdi.last().map(String::as_str), Some("85"));

        let mut permanent = by_type(Some(ToothType::Permanent));
        sort_records(&mut permanent, SortKey::Universal);
        let codes: Vec<_> = permanent.iter().map(|t| t.notation.universal.as_str()).collect();
        assert_eq!(codes[..3], ["1", "2", "3"]);
        assert_eq!(codes[31], "32");

        let all = sorted(SortKey::Universal);
        assert_eq!(all[0].notation.universal, "A");
        assert_eq!(all[20].notation.universal, "1");
    }

    #[test]
    fn parse_sort_key() {
        assert_eq!("Root".parse::<SortKey>().unwrap(), SortKey::Root);
        assert_eq!(SortKey::Shedding.to_string(), "shedding");
        assert!("name".parse::<SortKey>().is_err());
    }
}
