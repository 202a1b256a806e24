//! The `dentition chart` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use dentition_core::catalog::by_type;
use dentition_core::chart::arch;
use dentition_core::model::{Position, ToothType};

use super::parse_tooth_type;

pub fn execute(tooth_type: Option<String>) -> Result<()> {
    let types = match parse_tooth_type(tooth_type.as_deref())? {
        Some(t) => vec![t],
        None => vec![ToothType::Primary, ToothType::Permanent],
    };

    for (i, ty) in types.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        let records = by_type(Some(ty));
        println!("{ty} dentition (patient's right on the left)");

        let mut table = Table::new();
        for (label, position) in [("Upper", Position::Maxillary), ("Lower", Position::Mandibular)] {
            let mut row = vec![Cell::new(label)];
            row.extend(
                arch(records.iter().copied(), position)
                    .into_iter()
                    .map(|t| Cell::new(format!("{}\n{}", t.notation.universal, t.notation.fdi))),
            );
            table.add_row(row);
        }
        println!("{table}");
    }
    Ok(())
}
