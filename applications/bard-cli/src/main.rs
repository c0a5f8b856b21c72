/// Bard - campaign asset store and ambient mixer tool
use bard_cli::{commands, AppState, BardConfig};
use bard_core::AssetClass;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bard")]
#[command(about = "Campaign asset store and ambient audio mixer", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./bard.toml when present)
    #[arg(short, long, global = true, env = "BARD_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a zip archive, replacing each class it contains
    Import {
        /// Archive path
        archive: PathBuf,
    },
    /// Export every asset to a zip archive
    Export {
        /// Output path
        archive: PathBuf,
    },
    /// List stored assets
    List {
        /// Only this class (audio, images or data)
        class: Option<AssetClass>,
    },
    /// Show entry counts per class
    Status,
    /// Store a file as an asset
    Add {
        /// Asset class (audio, images or data)
        class: AssetClass,
        /// File to store
        file: PathBuf,
        /// Entry name (defaults to the file name)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Delete an asset
    Remove {
        class: AssetClass,
        name: String,
    },
    /// Delete every asset of a class
    Clear {
        /// Class to clear
        #[arg(required_unless_present = "all")]
        class: Option<AssetClass>,
        /// Clear every class
        #[arg(long, conflicts_with = "class")]
        all: bool,
    },
    /// Print an asset's data URL
    Url {
        class: AssetClass,
        name: String,
    },
    /// Print a JSON document from the data class
    ShowData {
        /// Document name, e.g. locations.json
        name: String,
    },
    /// Show which tracks would play while walking through locations
    Walk {
        /// Location ids, in visiting order
        #[arg(required = true)]
        route: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = BardConfig::load(cli.config.as_deref())?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    config.validate()?;

    let state = AppState::open(config).await?;
    let result = run(&state, cli.command).await;
    state.close().await;
    result
}

async fn run(state: &AppState, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Import { archive } => {
            let summary = commands::import(state, &archive).await?;
            println!("Imported {} files", summary.total());
            for class in AssetClass::ALL {
                println!("{:<7}{}", class.partition(), summary.count(class));
            }
            for failure in &summary.failures {
                println!("  {} not imported: {}", failure.class, failure.message);
            }
        }
        Commands::Export { archive } => {
            let bytes = commands::export(state, &archive).await?;
            println!("Exported {} bytes to {}", bytes, archive.display());
        }
        Commands::List { class } => {
            for (class, entry) in commands::list(state, class).await? {
                println!(
                    "{}/{}\t{}\t{}",
                    class,
                    entry.name,
                    entry.mime_type,
                    entry.last_modified.format("%Y-%m-%d %H:%M:%S")
                );
            }
        }
        Commands::Status => {
            let counts = commands::status(state).await?;
            for class in AssetClass::ALL {
                println!("{:<7}{}", class.partition(), counts.get(class));
            }
        }
        Commands::Add { class, file, name } => {
            let entry = commands::add(state, class, &file, name.as_deref()).await?;
            println!("Stored {}/{} ({})", class, entry.name, entry.mime_type);
        }
        Commands::Remove { class, name } => {
            commands::remove(state, class, &name).await?;
            println!("Removed {}/{}", class, name);
        }
        Commands::Clear { class, all } => {
            let classes = if all {
                AssetClass::ALL.to_vec()
            } else {
                class.into_iter().collect()
            };
            commands::clear(state, &classes).await?;
            for class in classes {
                println!("Cleared {}", class);
            }
        }
        Commands::Url { class, name } => match commands::url(state, class, &name).await {
            Some(url) => println!("{}", url),
            None => anyhow::bail!("no {} asset named '{}'", class, name),
        },
        Commands::ShowData { name } => match commands::show_data(state, &name).await? {
            Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
            None => anyhow::bail!("document '{}' is missing or unreadable", name),
        },
        Commands::Walk { route } => {
            let steps = commands::walk(state, &route).await?;
            for (location_id, tracks) in route.iter().zip(steps) {
                let playing: Vec<&str> = tracks.iter().map(|track| track.id.as_str()).collect();
                println!("{}: {}", location_id, playing.join(", "));
            }
        }
    }

    Ok(())
}
