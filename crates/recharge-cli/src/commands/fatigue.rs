//! Fatigue score commands.

use clap::Subcommand;

use super::common::{self, Error};

#[derive(Subcommand)]
pub enum FatigueAction {
    /// Current score, message and recommendation
    Show,
    /// Full report including the per-type contribution breakdown
    Report,
}

pub fn run(action: FatigueAction) -> Result<(), Error> {
    let config = common::load_config()?;
    let state = common::open_state()?;
    let session = common::roll_to_today(&state, &config);
    let report = session.report();

    match action {
        FatigueAction::Show => {
            println!("Fatigue for {}:", session.date());
            println!("  {}", common::gauge(report.score));
            println!("  {}", report.message);
            println!("  Tip: {}", report.recommendation);
        }
        FatigueAction::Report => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
