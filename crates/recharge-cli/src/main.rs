use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;

#[derive(Parser)]
#[command(name = "recharge-cli", version, about = "Recharge CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Activity logging
    Activity {
        #[command(subcommand)]
        action: commands::activity::ActivityAction,
    },
    /// Fatigue score and report
    Fatigue {
        #[command(subcommand)]
        action: commands::fatigue::FatigueAction,
    },
    /// Daily missions
    Mission {
        #[command(subcommand)]
        action: commands::mission::MissionAction,
    },
    /// Ppoom companion character
    Character {
        #[command(subcommand)]
        action: commands::character::CharacterAction,
    },
    /// Completion streak
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// Weekly pattern analysis
    Pattern {
        #[command(subcommand)]
        action: commands::pattern::PatternAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Activity { action } => commands::activity::run(action),
        Commands::Fatigue { action } => commands::fatigue::run(action),
        Commands::Mission { action } => commands::mission::run(action),
        Commands::Character { action } => commands::character::run(action),
        Commands::Streak { action } => commands::streak::run(action),
        Commands::Pattern { action } => commands::pattern::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "recharge-cli",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
