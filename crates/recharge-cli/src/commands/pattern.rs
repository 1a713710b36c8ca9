//! Weekly pattern analysis commands.

use clap::Subcommand;

use recharge_core::{analyze_weekly, Trend};

use super::common::{self, Error};

/// Days of history fed into the weekly analyzer.
const ANALYSIS_WINDOW: usize = 14;

#[derive(Subcommand)]
pub enum PatternAction {
    /// Analyze the recent daily history
    Weekly,
    /// Dump the raw analysis as JSON
    Json,
}

pub fn run(action: PatternAction) -> Result<(), Error> {
    let state = common::open_state()?;
    let history = state.load_history();
    let window_start = history.len().saturating_sub(ANALYSIS_WINDOW);
    let analysis = analyze_weekly(&history[window_start..]);

    match action {
        PatternAction::Weekly => {
            let arrow = match analysis.trend {
                Trend::Improving => "↓ improving",
                Trend::Stable => "→ stable",
                Trend::Worsening => "↑ worsening",
            };
            println!("Trend: {arrow}");
            println!("  {}", analysis.trend_description);
            if analysis.avg_fatigue > 0.0 {
                println!("  Average fatigue: {:.0}", analysis.avg_fatigue);
            }
            if let Some(worst) = analysis.worst_day {
                println!(
                    "  Hardest day: {:?} (mean {:.0})",
                    worst.weekday, worst.mean_fatigue
                );
            }
            if let Some(best) = analysis.best_day {
                println!(
                    "  Easiest day: {:?} (mean {:.0})",
                    best.weekday, best.mean_fatigue
                );
            }
            if !analysis.insights.is_empty() {
                println!("\nInsights:");
                for insight in &analysis.insights {
                    println!("  {} {}", insight.emoji, insight.title);
                    println!("     {}", insight.description);
                }
            }
        }
        PatternAction::Json => {
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
    }
    Ok(())
}
