use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod render;

use commands::Output;

#[derive(Parser)]
#[command(name = "studyroom", version, about = "Learning progress tracker")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Roadmap(commands::roadmap::RoadmapCommand),
    #[command(flatten)]
    Progress(commands::progress::ProgressCommand),
    #[command(flatten)]
    Flashcards(commands::flashcards::FlashcardCommand),
    #[command(flatten)]
    Resources(commands::resources::ResourceCommand),
    #[command(flatten)]
    Projects(commands::projects::ProjectCommand),
    #[command(flatten)]
    Coach(commands::coach::CoachCommand),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Coaching API key management
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Print a shell completion script
    Completions { shell: Shell },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("STUDYROOM_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let out = Output { json: cli.json };
    tracing::debug!(json = out.json, "dispatching command");
    let result = match cli.command {
        Commands::Roadmap(cmd) => commands::roadmap::run(cmd, out),
        Commands::Progress(cmd) => commands::progress::run(cmd, out),
        Commands::Flashcards(cmd) => commands::flashcards::run(cmd, out),
        Commands::Resources(cmd) => commands::resources::run(cmd, out),
        Commands::Projects(cmd) => commands::projects::run(cmd, out),
        Commands::Coach(cmd) => commands::coach::run(cmd, out),
        Commands::Config { action } => commands::config::run(action, out),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "studyroom", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
