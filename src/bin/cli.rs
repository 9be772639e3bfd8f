use clap::{Parser, Subcommand};
use counterpick_engine::CounterpickEngine;

#[derive(Parser)]
#[command(name = "counterpick")]
#[command(about = "Counter-pick recommendations for competitive Unmatched", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Matchup dataset path
    #[arg(long, default_value = "data/winrates.json")]
    data: String,

    /// Ban database path
    #[arg(long, default_value = "counterpick.db")]
    db: String,

    /// User id for bans and sessions
    #[arg(short, long, default_value = "0")]
    user: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank counter-picks against an opponent roster
    Recommend {
        /// Opponent roster, comma or space separated (partial names allowed)
        roster: String,

        /// Maximum picks to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Per-opponent breakdown for one candidate against a roster
    Details {
        /// Candidate character (partial name allowed)
        character: String,

        /// Opponent roster, comma or space separated
        roster: String,
    },

    /// List every character in the dataset
    Characters,

    /// Ban a character from recommendations
    Ban { character: String },

    /// Lift a ban
    Unban { character: String },

    /// Show the current ban list
    Bans,

    /// Drop the entire ban list
    ClearBans,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let engine = CounterpickEngine::new(&cli.data, &cli.db)?;

    match cli.command {
        Commands::Recommend { roster, limit } => {
            let rec = engine.recommend(cli.user, &roster, Some(limit)).await?;

            println!("🎯 Opponent roster: {}", rec.roster.join(", "));
            if !rec.unresolved.is_empty() {
                println!("⚠️  Not found: {}", rec.unresolved.join(", "));
            }

            println!("\n🏆 Best counter-picks:");
            for (i, pick) in rec.picks.iter().enumerate() {
                println!("{:2}. {:<20} {}", i + 1, pick.character, pick.score_pct());
            }
        }

        Commands::Details { character, roster } => {
            // Seed the session the same way a roster submission would
            let rec = engine.recommend(cli.user, &roster, Some(0)).await?;
            let details = engine.candidate_details(cli.user, &character).await?;

            println!("📊 {} vs {}", details.character, rec.roster.join(", "));
            println!(
                "📈 Average winrate: {:.1}%\n",
                details.average_winrate * 100.0
            );

            println!("⚔️  Matchups:");
            for m in &details.matchups {
                println!(
                    "   vs {:<20} {:.1}% ({} games)",
                    m.opponent,
                    m.winrate * 100.0,
                    m.games
                );
            }

            if let Some(best) = &details.best_matchup {
                println!(
                    "\n✅ Best:  vs {} ({:.1}%)",
                    best.opponent,
                    best.winrate * 100.0
                );
            }
            if let Some(worst) = &details.worst_matchup {
                println!(
                    "❌ Worst: vs {} ({:.1}%)",
                    worst.opponent,
                    worst.winrate * 100.0
                );
            }
        }

        Commands::Characters => {
            println!("📋 {} characters:", engine.characters().len());
            for name in engine.characters() {
                println!("   • {}", name);
            }
        }

        Commands::Ban { character } => {
            let size = engine.ban(cli.user, &character).await?;
            println!("🚫 Banned. {} character(s) on your ban list.", size);
        }

        Commands::Unban { character } => {
            let size = engine.unban(cli.user, &character).await?;
            println!("✅ Unbanned. {} character(s) on your ban list.", size);
        }

        Commands::Bans => {
            let banned = engine.bans(cli.user).await?;
            if banned.is_empty() {
                println!("✅ Your ban list is empty.");
            } else {
                println!("🚫 Banned characters:");
                for name in banned {
                    println!("   • {}", name);
                }
            }
        }

        Commands::ClearBans => {
            engine.clear_bans(cli.user).await?;
            println!("✅ Ban list cleared.");
        }
    }

    Ok(())
}
