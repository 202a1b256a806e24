//! The `dentition show` command.

use anyhow::Result;

use dentition_core::catalog::find;
use dentition_core::model::{format_age, AgeSpan};

pub fn execute(key: String, json: bool) -> Result<()> {
    let tooth = find(&key)?;

    if json {
        println!("{}", serde_json::to_string_pretty(tooth)?);
        return Ok(());
    }

    println!("{} ({})", tooth.display_name(), tooth.tooth_type);
    println!("  id:        {}", tooth.id);
    println!("  category:  {}", tooth.category);
    println!("  universal: {}", tooth.notation.universal);
    println!("  palmer:    {}", tooth.notation.palmer);
    println!("  fdi:       {}", tooth.notation.fdi);

    let ages = [
        ("eruption", Some(&tooth.eruption)),
        ("shedding", tooth.shedding.as_ref()),
        ("crown", tooth.crown_completion.as_ref()),
        ("root", tooth.root_completion.as_ref()),
    ];
    for (label, span) in ages {
        println!("  {:<10} {}", format!("{label}:"), age_line(span));
    }
    Ok(())
}

fn age_line(span: Option<&AgeSpan>) -> String {
    match span {
        Some(span) => format!("{} (average {})", span.age_range, format_age(span.age_months)),
        None => "n/a".to_string(),
    }
}
