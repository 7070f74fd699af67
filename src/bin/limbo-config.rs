use std::path::PathBuf;

use clap::{Parser, Subcommand};

use limbo::config::loader::{load_config, load_config_observed, save_config};
use limbo::config::node::describe;
use limbo::config::{default_of, LimboConfig, ResolutionTrace, Source};

#[derive(Parser)]
#[command(name = "limbo-config")]
#[command(about = "Inspect and maintain limbo config files", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the file and report relocated and defaulted fields
    Check {
        /// Print the source of every resolved field
        #[arg(long)]
        trace: bool,
    },
    /// Rewrite the file under the current schema
    Migrate,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// List every config field
    Schema {
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { trace } => {
            let mut observed = ResolutionTrace::new();
            let config = load_config_observed(&cli.config, &mut observed)?;

            println!(
                "{}: ok, {} listener(s)",
                cli.config.display(),
                config.all_listeners().count()
            );
            for entry in observed.relocated() {
                if let Source::Relocated { from } = &entry.source {
                    println!("  relocated: {} (found at {})", entry.path, from);
                }
            }
            println!("  defaulted: {} field(s)", observed.defaulted().count());

            if trace {
                println!("{}", serde_json::to_string_pretty(&observed)?);
            }
        }
        Commands::Migrate => {
            let config = load_config(&cli.config)?;
            save_config(&cli.config, &config)?;
            println!("{}: rewritten", cli.config.display());
        }
        Commands::Init { force } => {
            if cli.config.exists() && !force {
                eprintln!(
                    "Error: {} already exists (use --force to overwrite)",
                    cli.config.display()
                );
                std::process::exit(1);
            }
            save_config(&cli.config, &default_of::<LimboConfig>())?;
            println!("{}: written", cli.config.display());
        }
        Commands::Schema { json } => {
            let fields = describe::<LimboConfig>();
            if json {
                println!("{}", serde_json::to_string_pretty(&fields)?);
                return Ok(());
            }
            for field in fields {
                print!("{} ({})", field.path, field.kind);
                if let Some(default) = &field.default {
                    print!(" = {}", default);
                }
                println!();
                if !field.relocated_from.is_empty() {
                    println!("    was: {}", field.relocated_from.join(", "));
                }
                for line in &field.description {
                    println!("    {}", line);
                }
            }
        }
    }

    Ok(())
}
