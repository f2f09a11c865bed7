use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use moodmelody::config::{Config, load_config, parse_search_limit};
use moodmelody::feedback::new_session_id;
use moodmelody::mood::{MoodPresentation, SearchTerms};
use moodmelody::{
    Analysis, FeedbackRecorder, JsonFileStore, Mood, MoodResultCache, OfflineCatalog, Track,
    TrackFinder,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "moodmelody")]
#[command(about = "Find music that matches how you feel")]
#[command(version)]
struct Args {
    /// JSON file holding cached results, likes and feedback
    #[arg(short = 's', long = "store", global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the mood detected in some text and the phrase it searches for
    Infer { text: Vec<String> },

    /// Find tracks for some text, using cached results when fresh
    Search {
        text: Vec<String>,

        /// Number of tracks to request
        #[arg(short = 'l', long = "limit", value_parser = parse_limit_arg)]
        limit: Option<usize>,

        /// Ignore cached results and search again
        #[arg(short = 'r', long = "refresh")]
        refresh: bool,
    },

    /// Like or unlike a track for a mood
    Like {
        track_id: String,
        #[arg(short = 'm', long = "mood")]
        mood: String,
    },

    /// List liked tracks among the cached results for a mood
    Liked {
        #[arg(short = 'm', long = "mood")]
        mood: String,
    },

    /// Drop cached results for a mood (likes are kept)
    Clear {
        #[arg(short = 'm', long = "mood")]
        mood: String,
    },

    /// Record how well a detected mood matched
    Feedback {
        #[command(subcommand)]
        action: FeedbackCommand,

        /// Session the feedback belongs to (a new one when omitted)
        #[arg(long = "session", global = true)]
        session: Option<String>,
    },

    /// Summarise recorded feedback
    Insights {
        /// Print the full feedback log as JSON
        #[arg(long = "export")]
        export: bool,
    },
}

#[derive(Subcommand)]
enum FeedbackCommand {
    /// The detected mood was right
    Accept { text: Vec<String> },
    /// The detected mood was wrong; record the intended one
    Correct {
        text: Vec<String>,
        #[arg(long = "to")]
        to: String,
    },
    /// Search again for the same text
    Again { text: Vec<String> },
    /// The tracks did not fit the mood
    NotGood { text: Vec<String> },
}

fn parse_limit_arg(raw: &str) -> Result<usize, String> {
    parse_search_limit(raw).map_err(|e| e.to_string())
}

fn parse_mood(raw: &str) -> Result<Mood> {
    raw.parse::<Mood>()
        .with_context(|| format!("Invalid mood '{raw}'"))
}

fn print_tracks(tracks: &[Track]) {
    if tracks.is_empty() {
        println!("No tracks found.");
        return;
    }
    for (i, track) in tracks.iter().enumerate() {
        let liked_indicator = if track.is_liked { " ♥" } else { "" };
        println!(
            "  {}. \"{}\" by {}{}",
            i + 1,
            track.title,
            track.artist,
            liked_indicator
        );
        println!("     ID: {}", track.id);
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // Load configuration from .env, then let flags override it
    let mut config: Config = load_config()?;
    if let Some(store) = args.store {
        config.store_path = store;
    }

    let store = Arc::new(
        JsonFileStore::open(&config.store_path)
            .with_context(|| format!("Failed to open store {}", config.store_path.display()))?,
    );
    log::info!("Using store at {}", store.path().display());
    let finder = TrackFinder::new(MoodResultCache::new(Arc::clone(&store)), OfflineCatalog::new());
    let feedback = FeedbackRecorder::new(Arc::clone(&store));

    match args.command {
        Command::Infer { text } => {
            let analysis = Analysis::of(&text.join(" "));
            println!("Mood: {}", analysis.label());
            println!("Search phrase: {}", analysis.search_term());
            if let Analysis::Fusion(fusion) = &analysis {
                println!(
                    "Fusion: {} ({} intensity)",
                    fusion.display_name(),
                    fusion.intensity()
                );
                println!("Color: {}", MoodPresentation::fusion_color(fusion));
            } else {
                println!("Color: {}", MoodPresentation::mood_color(&analysis.detected_mood()));
            }
        }
        Command::Search {
            text,
            limit,
            refresh,
        } => {
            let analysis = Analysis::of(&text.join(" "));
            let limit = limit.unwrap_or(config.search_limit);

            println!("Detected mood: {}", analysis.label());
            let tracks = if refresh {
                finder.refresh(&analysis, limit)?
            } else {
                finder.find_tracks(&analysis, limit)?
            };
            println!("\n{} tracks for '{}':", tracks.len(), analysis.search_term());
            print_tracks(&tracks);
            println!("\nCached under mood: {}", analysis.cache_mood());
        }
        Command::Like { track_id, mood } => {
            let mood = parse_mood(&mood)?;
            if !finder.cache().toggle_like(&track_id, &mood) {
                anyhow::bail!("Failed to update liked tracks for {mood}");
            }
            if finder.cache().is_liked(&track_id, &mood) {
                println!("♥ Liked {track_id} for {}", MoodPresentation::label(&mood));
            } else {
                println!("Removed {track_id} from liked tracks for {}", MoodPresentation::label(&mood));
            }
        }
        Command::Liked { mood } => {
            let mood = parse_mood(&mood)?;
            let tracks = finder.cache().get_liked_tracks(&mood);
            println!("Liked tracks for {}:", MoodPresentation::label(&mood));
            print_tracks(&tracks);
        }
        Command::Clear { mood } => {
            let mood = parse_mood(&mood)?;
            if !finder.cache().clear_cache(&mood) {
                anyhow::bail!("Failed to clear cached tracks for {mood}");
            }
            println!("Cleared cached tracks for {}", MoodPresentation::label(&mood));
        }
        Command::Feedback { action, session } => {
            let session = session.unwrap_or_else(new_session_id);
            let recorded = match action {
                FeedbackCommand::Accept { text } => {
                    let input = text.join(" ");
                    let analysis = Analysis::of(&input);
                    feedback.record_mood_accepted(&input, analysis.detected_mood(), &session)
                }
                FeedbackCommand::Correct { text, to } => {
                    let input = text.join(" ");
                    let analysis = Analysis::of(&input);
                    let corrected = parse_mood(&to)?;
                    println!(
                        "Corrected search phrase: {}",
                        SearchTerms::for_mood(&corrected, None)
                    );
                    feedback.record_mood_corrected(
                        &input,
                        analysis.detected_mood(),
                        corrected,
                        &session,
                    )
                }
                FeedbackCommand::Again { text } => {
                    let input = text.join(" ");
                    let analysis = Analysis::of(&input);
                    let recorded =
                        feedback.record_search_again(&input, analysis.detected_mood(), &session);
                    let tracks = finder.refresh(&analysis, config.search_limit)?;
                    print_tracks(&tracks);
                    recorded
                }
                FeedbackCommand::NotGood { text } => {
                    let input = text.join(" ");
                    let analysis = Analysis::of(&input);
                    feedback.record_results_not_good(&input, analysis.detected_mood(), &session)
                }
            };

            if recorded {
                println!("✓ Feedback recorded (session {session})");
            } else {
                eprintln!("✗ Failed to record feedback");
            }
        }
        Command::Insights { export } => {
            if export {
                println!("{}", feedback.export_json()?);
                return Ok(());
            }

            let insights = feedback.insights();
            println!("=== FEEDBACK INSIGHTS ===");
            println!("Events: {} | Sessions: {}", feedback.count(), insights.total_sessions);
            println!(
                "Accepted: {} | Corrected: {} | Search again: {} | Not good: {}",
                insights.accepted_count,
                insights.corrections_count,
                insights.search_again_count,
                insights.not_good_count
            );
            println!("Accuracy: {:.1}%", insights.accuracy_rate);

            let stats = feedback.mood_correction_stats();
            if !stats.is_empty() {
                println!("\nMood corrections:");
                for (correction, count) in &stats {
                    println!("   {correction}: {count}");
                }
            }
        }
    }

    Ok(())
}
