//! The `dentition timeline` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use dentition_core::catalog::catalog;
use dentition_core::timeline::Timeline;

pub fn execute(step: usize, list: bool, shedding: bool) -> Result<()> {
    let timeline = if shedding {
        Timeline::with_shedding(catalog())
    } else {
        Timeline::new(catalog())
    };

    if list {
        let mut table = Table::new();
        table.set_header(vec!["Step", "Age", "Events", "Description"]);
        for (i, s) in timeline.steps().iter().enumerate() {
            table.add_row(vec![
                Cell::new(i),
                Cell::new(&s.age_display),
                Cell::new(s.events.len()),
                Cell::new(&s.description),
            ]);
        }
        println!("{table}");
        return Ok(());
    }

    print_step(&timeline, step);
    Ok(())
}

/// Age heading, status line and the teeth present at `index`.
pub(crate) fn print_step(timeline: &Timeline<'_>, index: usize) {
    let index = timeline.clamp(index);
    let recent = timeline.recently_erupted(index);
    let visible = timeline.visible_teeth(index);

    println!(
        "Step {index}/{}: {} ({:.0}%)",
        timeline.last_index(),
        timeline.age_display(index),
        timeline.progress(index) * 100.0
    );
    println!("{}", timeline.status_description(index));
    println!("Visible teeth: {}", visible.len());
    for tooth in visible {
        let marker = if recent.contains(tooth.id.as_str()) { "*" } else { " " };
        println!("  {marker} {:<4} {}", tooth.notation.fdi, tooth.display_name());
    }
}
