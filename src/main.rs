use clap::{Parser, Subcommand};
use std::path::PathBuf;

const EXIT_SUCCESS: i32 = 0;
const EXIT_QUIZ: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a quiz interactively
    Run {
        /// Path to the quiz YAML file
        quiz: PathBuf,
    },
    /// Show recorded scores (default if no subcommand)
    Results {
        /// Show only this unit
        unit: Option<String>,
    },
    /// Write a starter quiz file to try out
    Sample {
        /// Where to write the sample quiz
        path: PathBuf,
    },
}

#[derive(Parser, Debug)]
#[command(name = "quizdeck")]
#[command(about = "Terminal quiz runner with a local gradebook", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/quizdeck/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Results { unit: None });

    let config_path = cli.config.map(PathBuf::from);
    let config = match quizdeck::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if cli.verbose {
        eprintln!(
            "Grading delay: {}ms",
            config.grading_delay().as_millis()
        );
    }

    // Score book failures are soft: a broken state file should not block
    // taking a quiz, so fall back to an empty book with a warning.
    let scores_path = quizdeck::results::get_scores_path();
    let score_book = match quizdeck::results::load_score_book(&scores_path) {
        Ok(book) => book,
        Err(e) => {
            eprintln!("Warning: could not load score book: {}", e);
            quizdeck::results::ScoreBook::new()
        }
    };

    match command {
        Commands::Run { quiz } => {
            let deck = match quizdeck::quiz::load_deck(&quiz) {
                Ok(d) => d,
                Err(e) => {
                    eprintln!("Quiz error: {}", e);
                    std::process::exit(EXIT_QUIZ);
                }
            };

            if cli.verbose {
                eprintln!(
                    "Loaded {} questions for unit {} from {}",
                    deck.total(),
                    deck.unit,
                    quiz.display()
                );
            }

            let theme = quizdeck::tui::resolve_theme(score_book.theme.as_deref());
            let app = quizdeck::tui::App::new(
                deck,
                config,
                score_book,
                scores_path,
                theme,
                cli.verbose,
            );

            match quizdeck::tui::run_tui(app).await {
                Ok(Some(report)) => {
                    let use_colors = quizdeck::output::should_use_colors();
                    println!(
                        "{}",
                        quizdeck::output::format_grade_report(&report, use_colors)
                    );
                }
                Ok(None) => {
                    if cli.verbose {
                        eprintln!("Quit without submitting");
                    }
                }
                Err(e) => {
                    eprintln!("TUI error: {}", e);
                    std::process::exit(EXIT_QUIZ);
                }
            }
        }
        Commands::Results { unit } => {
            let use_colors = quizdeck::output::should_use_colors();
            match unit {
                Some(unit) => match score_book.get(&unit) {
                    Some(rec) => {
                        println!(
                            "Unit {}: {}/{} ({}%), recorded {}",
                            unit,
                            rec.score,
                            rec.total,
                            rec.percent(),
                            rec.recorded_at.to_rfc3339()
                        );
                    }
                    None => {
                        eprintln!("No score recorded for unit {}", unit);
                    }
                },
                None => {
                    println!(
                        "{}",
                        quizdeck::output::format_results_table(&score_book, use_colors)
                    );
                }
            }
        }
        Commands::Sample { path } => {
            if path.exists() {
                eprintln!("Refusing to overwrite existing file at {}", path.display());
                std::process::exit(EXIT_QUIZ);
            }
            if let Err(e) = std::fs::write(&path, quizdeck::quiz::loader::SAMPLE_QUIZ) {
                eprintln!("Failed to write sample quiz: {}", e);
                std::process::exit(EXIT_QUIZ);
            }
            println!("Wrote sample quiz to {}", path.display());
            println!("Try it: quizdeck run {}", path.display());
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
