//! Ppoom character commands.

use clap::Subcommand;

use recharge_core::character::{costume_catalog, required_exp};
use recharge_core::MAX_LEVEL;

use super::common::{self, Error};

#[derive(Subcommand)]
pub enum CharacterAction {
    /// Show level, experience and equipped costume
    Show,
    /// Equip an unlocked costume
    Equip {
        /// Costume id (see `character costumes`)
        id: String,
    },
    /// List costumes and their unlock levels
    Costumes,
}

pub fn run(action: CharacterAction) -> Result<(), Error> {
    let state = common::open_state()?;

    match action {
        CharacterAction::Show => {
            let character = state.load_character();
            let costume = costume_catalog()
                .iter()
                .find(|c| c.id == character.equipped_costume_id);
            let emoji = costume.map(|c| c.emoji).unwrap_or("🐻");

            println!("{emoji} Ppoom -- level {}", character.level);
            if character.level >= MAX_LEVEL {
                println!("  Max level reached!");
            } else {
                println!(
                    "  Exp: {}/{} ({:.0}%)",
                    character.exp,
                    required_exp(character.level),
                    character.exp_progress() * 100.0
                );
            }
            println!(
                "  Costumes unlocked: {}/{}",
                character.unlocked_costume_ids.len(),
                costume_catalog().len()
            );
        }
        CharacterAction::Equip { id } => {
            let character = state.load_character().equip_costume(&id)?;
            state.save_character(&character);
            println!("Equipped '{id}'.");
        }
        CharacterAction::Costumes => {
            let character = state.load_character();
            for costume in costume_catalog() {
                let status = if character.unlocked_costume_ids.contains(costume.id) {
                    if character.equipped_costume_id == costume.id {
                        "equipped"
                    } else {
                        "unlocked"
                    }
                } else {
                    "locked"
                };
                println!(
                    "  {} {:<16} (level {:>2})  {status}  --  id: {}",
                    costume.emoji, costume.name, costume.unlock_level, costume.id
                );
            }
        }
    }
    Ok(())
}
