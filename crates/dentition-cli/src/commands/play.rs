//! The `dentition timeline-play` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use dentition_core::catalog::catalog;
use dentition_core::navigator::{Navigation, TimelineNavigator};
use dentition_core::timeline::Timeline;
use dentition_study::load_config_from;

use super::timeline::print_step;

/// Key that pauses for one guard delay instead of navigating.
const WAIT_KEY: &str = "wait";

pub async fn execute(
    from: usize,
    to: Option<usize>,
    delay_ms: Option<u64>,
    keys: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let delay = match delay_ms {
        Some(ms) => Duration::from_millis(ms),
        None => load_config_from(config_path.as_deref())?.animation_delay(),
    };

    let nav = TimelineNavigator::with_delay(Timeline::new(catalog()), delay).starting_at(from);
    print_step(nav.timeline(), nav.current_step());

    match keys {
        Some(keys) => replay(nav, &keys, delay).await,
        None => autoplay(nav, to, delay).await,
    }
}

/// Step forward until `to`, pausing one delay between steps.
async fn autoplay(mut nav: TimelineNavigator<'_>, to: Option<usize>, delay: Duration) -> Result<()> {
    let last = nav.timeline().clamp(to.unwrap_or(usize::MAX));
    while nav.current_step() < last {
        tokio::time::sleep(delay).await;
        if !nav.forward() {
            tracing::warn!(step = nav.current_step(), "navigation still locked, retrying");
            continue;
        }
        println!();
        print_step(nav.timeline(), nav.current_step());
    }
    Ok(())
}

/// Apply comma-separated keys back to back, reporting each one.
///
/// Keys arrive without pauses, so moves inside the guard delay are dropped
/// unless a `wait` key comes first.
async fn replay(mut nav: TimelineNavigator<'_>, keys: &str, delay: Duration) -> Result<()> {
    for key in keys.split(',').map(str::trim).filter(|k| !k.is_empty()) {
        if key.eq_ignore_ascii_case(WAIT_KEY) {
            tokio::time::sleep(delay).await;
            println!("\nwait: {}ms", delay.as_millis());
            continue;
        }

        let request: Navigation = key
            .parse()
            .with_context(|| format!("bad key {key:?}"))?;
        let locked = nav.is_animating();
        let from = nav.current_step();

        println!();
        if nav.navigate(request) {
            println!("{request}: step {from} -> {}", nav.current_step());
            print_step(nav.timeline(), nav.current_step());
        } else if locked {
            println!("{request}: dropped while animating (step {from})");
        } else {
            println!("{request}: no move (step {from})");
        }
    }
    Ok(())
}
