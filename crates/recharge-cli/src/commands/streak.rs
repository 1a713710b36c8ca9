//! Streak commands.

use clap::Subcommand;

use super::common::{self, Error};

#[derive(Subcommand)]
pub enum StreakAction {
    /// Show the current and longest streak
    Show,
}

pub fn run(action: StreakAction) -> Result<(), Error> {
    match action {
        StreakAction::Show => {
            let state = common::open_state()?;
            let streak = state.load_streak();

            println!("🔥 Current streak: {} days", streak.current_streak);
            println!("   Longest streak: {} days", streak.longest_streak);
            if let Some(last) = streak.last_completed_date {
                println!("   Last completion: {last}");
            }
            if streak.bonus_percent() > 0 {
                println!("   Exp bonus: +{}%", streak.bonus_percent());
            }
        }
    }
    Ok(())
}
