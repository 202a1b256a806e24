//! The `dentition study` commands.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use dentition_core::catalog::catalog;
use dentition_study::load_config_from;
use dentition_study::session::StudyType;
use dentition_study::study::NextOutcome;
use dentition_study::{FileStore, StudyMode};

use crate::StudyAction;

type Mode = StudyMode<'static, FileStore>;

pub fn execute(
    action: StudyAction,
    data_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let data_dir = data_dir.unwrap_or_else(|| config.data_dir.clone());
    tracing::debug!(data_dir = %data_dir.display(), "opening study state");

    let mut mode = StudyMode::open(
        catalog(),
        FileStore::new(data_dir),
        config.default_study_type,
        config.random_source(),
    );

    match action {
        StudyAction::Start => {
            mode.start_new_session();
            println!(
                "Started a {} session with {} cards.",
                mode.session().study_type,
                mode.session().len()
            );
            print_card(&mode);
        }
        StudyAction::Show => print_card(&mode),
        StudyAction::Correct => answer(&mut mode, true),
        StudyAction::Incorrect => answer(&mut mode, false),
        StudyAction::Skip => {
            mode.skip();
            println!("Skipped.");
            print_card(&mode);
        }
        StudyAction::Next => match mode.next_card() {
            NextOutcome::Moved => print_card(&mode),
            NextOutcome::Completed(summary) => {
                println!(
                    "Session complete: {}/{} correct ({:.0}%).",
                    summary.correct_answers,
                    summary.total_questions,
                    summary.accuracy()
                );
                println!("Best score: {:.0}%", mode.stats().best_score);
            }
        },
        StudyAction::Previous => {
            if !mode.previous_card() {
                println!("Already at the first card.");
            }
            print_card(&mode);
        }
        StudyAction::Stats => print_stats(&mode),
        StudyAction::Mode { study_type } => {
            let study_type: StudyType = study_type.parse()?;
            mode.set_study_type(study_type);
            println!("Study type set to {study_type}.");
            print_card(&mode);
        }
    }
    Ok(())
}

fn answer(mode: &mut Mode, correct: bool) {
    let recorded = if correct {
        mode.mark_correct()
    } else {
        mode.mark_incorrect()
    };
    if recorded {
        println!("Recorded as {}.", if correct { "correct" } else { "incorrect" });
    } else {
        println!("This card is already answered. Run `dentition study next`.");
    }
    print_card(mode);
}

fn print_card(mode: &Mode) {
    let session = mode.session();
    let Some(card) = mode.current_card() else {
        println!("No card to show.");
        return;
    };

    println!(
        "Card {}/{} ({:.0}%) · {} · score {}/{}",
        session.current_index + 1,
        session.len(),
        session.progress(),
        session.study_type,
        session.correct_answers,
        session.total_answered
    );
    println!("{}", card.title);
    println!("Q: {}", card.question);
    if let Some(hint) = &card.hint {
        println!("   ({hint})");
    }

    if session.show_answer {
        for (label, value) in &card.answer {
            println!("  {label}: {value}");
        }
    } else {
        println!("Answer with `dentition study correct|incorrect|skip`.");
    }
}

fn print_stats(mode: &Mode) {
    let stats = mode.stats();
    println!("Best score: {:.0}%", stats.best_score);
    println!(
        "Sessions: {} ({} questions)",
        stats.sessions(),
        stats.total_questions()
    );
    if stats.study_history.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Finished", "Type", "Correct", "Total", "Accuracy"]);
    for s in &stats.study_history {
        let finished = s
            .id
            .parse::<i64>()
            .ok()
            .and_then(chrono::DateTime::from_timestamp_millis)
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| s.id.clone());
        table.add_row(vec![
            Cell::new(finished),
            Cell::new(s.study_type),
            Cell::new(s.correct_answers),
            Cell::new(s.total_questions),
            Cell::new(format!("{:.0}%", s.accuracy())),
        ]);
    }
    println!("{table}");
}
