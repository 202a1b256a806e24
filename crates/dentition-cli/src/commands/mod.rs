pub mod chart;
pub mod init;
pub mod play;
pub mod search;
pub mod show;
pub mod study;
pub mod timeline;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use dentition_core::model::{AgeSpan, ToothRecord, ToothType};

/// Parse an optional `--type` argument.
pub(crate) fn parse_tooth_type(raw: Option<&str>) -> Result<Option<ToothType>> {
    raw.map(|s| s.parse::<ToothType>().context("bad --type"))
        .transpose()
}

/// Age range of an optional stage, `n/a` when the tooth has none.
pub(crate) fn age_range(span: Option<&AgeSpan>) -> &str {
    span.map_or("n/a", |s| s.age_range.as_str())
}

/// One row per record with the reference columns.
pub(crate) fn tooth_table<'a>(records: impl IntoIterator<Item = &'a ToothRecord>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "ID",
        "Tooth",
        "Universal",
        "Palmer",
        "FDI",
        "Crown",
        "Eruption",
        "Shedding",
        "Root",
    ]);
    for tooth in records {
        table.add_row(vec![
            Cell::new(&tooth.id),
            Cell::new(tooth.display_name()),
            Cell::new(&tooth.notation.universal),
            Cell::new(&tooth.notation.palmer),
            Cell::new(&tooth.notation.fdi),
            Cell::new(age_range(tooth.crown_completion.as_ref())),
            Cell::new(&tooth.eruption.age_range),
            Cell::new(age_range(tooth.shedding.as_ref())),
            Cell::new(age_range(tooth.root_completion.as_ref())),
        ]);
    }
    table
}
