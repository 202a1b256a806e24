//! The `dentition search` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use dentition_core::catalog::by_type;
use dentition_core::search::{filter, SearchMode};
use dentition_core::table::{sort_records, SortKey};
use dentition_study::load_config_from;

use super::{parse_tooth_type, tooth_table};

pub fn execute(
    query: Option<String>,
    mode: Option<String>,
    tooth_type: Option<String>,
    sort: Option<String>,
    json: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mode = match mode {
        Some(m) => m.parse::<SearchMode>().context("bad --mode")?,
        None => load_config_from(config_path.as_deref())?.default_search_mode,
    };
    let tooth_type = parse_tooth_type(tooth_type.as_deref())?;
    let sort = sort
        .map(|s| s.parse::<SortKey>().context("bad --sort"))
        .transpose()?;
    let query = query.unwrap_or_default();

    // fuzzy results stay in rank order unless a column sort is asked for
    let mut matches = filter(by_type(tooth_type), &query, mode);
    if let Some(key) = sort {
        sort_records(&mut matches, key);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!("No teeth match \"{query}\".");
        return Ok(());
    }

    println!("{}", tooth_table(matches.iter().copied()));
    println!(
        "{} match{}",
        matches.len(),
        if matches.len() == 1 { "" } else { "es" }
    );
    Ok(())
}
