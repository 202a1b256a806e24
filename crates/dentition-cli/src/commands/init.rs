//! The `dentition init` command.

use anyhow::Result;

use dentition_study::config::SAMPLE_CONFIG;

pub fn execute() -> Result<()> {
    if std::path::Path::new("dentition.toml").exists() {
        println!("dentition.toml already exists, skipping.");
    } else {
        std::fs::write("dentition.toml", SAMPLE_CONFIG)?;
        println!("Created dentition.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: dentition search molar");
    println!("  2. Run: dentition timeline --list");
    println!("  3. Run: dentition study show");

    Ok(())
}
