use anyhow::{Context, Result};
use bridge_session::io::pbn::import_reader;
use bridge_session::options::ImportOptions;
use bridge_session::session::Session;
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use pbn_cli::summary::{format_session, SessionStats};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about = "Read, inspect and deal PBN bridge sessions", long_about = None)]
struct Args {
    /// Enable verbose logging (use -vv for trace output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import a PBN file and summarize it
    Inspect {
        /// PBN file to read
        file: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Print every deal as a hand diagram (text output only)
        #[arg(long)]
        hands: bool,

        /// YAML file with import options
        #[arg(short, long, value_name = "FILE", env = "PBN_IMPORT_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Deal fresh boards and print them as PBN
    Generate {
        /// Number of boards
        #[arg(short = 'n', long, default_value_t = 16)]
        count: u32,

        /// Seed for a reproducible deal
        #[arg(long)]
        seed: Option<u64>,

        /// Event name for the generated session
        #[arg(long)]
        event: Option<String>,

        /// Write to FILE instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    /// Counts only, as JSON
    Stats,
    Json,
    Yaml,
}

fn load_options(config: Option<&Path>) -> Result<ImportOptions> {
    match config {
        Some(path) => {
            debug!("Import options from {:?}", path);
            ImportOptions::from_yaml_file(path)
                .with_context(|| format!("Failed to load import options from {:?}", path))
        }
        None => Ok(ImportOptions::default()),
    }
}

fn inspect(file: &Path, format: Format, hands: bool, config: Option<&Path>) -> Result<()> {
    let options = load_options(config)?;
    let reader = File::open(file).with_context(|| format!("Failed to open {:?}", file))?;
    let session = import_reader(BufReader::new(reader), &options)
        .with_context(|| format!("Failed to import {:?}", file))?;

    let out = match format {
        Format::Text => format_session(&session, hands),
        Format::Stats => serde_json::to_string_pretty(&SessionStats::new(&session))? + "\n",
        Format::Json => serde_json::to_string_pretty(&session)? + "\n",
        Format::Yaml => serde_yaml::to_string(&session)?,
    };
    print!("{}", out);
    Ok(())
}

fn generate(
    count: u32,
    seed: Option<u64>,
    event: Option<String>,
    output: Option<&Path>,
) -> Result<()> {
    let mut session = match seed {
        Some(seed) => Session::generate_boards_with(count, &mut StdRng::seed_from_u64(seed)),
        None => Session::generate_boards(count),
    };
    if let Some(event) = event {
        session.competition.name = event;
    }
    let pbn = session.to_pbn();
    match output {
        Some(path) => {
            fs::write(path, pbn).with_context(|| format!("Failed to write {:?}", path))?;
            info!("Wrote {} boards to {:?}", count, path);
        }
        None => print!("{}", pbn),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    match args.command {
        Command::Inspect {
            file,
            format,
            hands,
            config,
        } => inspect(&file, format, hands, config.as_deref()),
        Command::Generate {
            count,
            seed,
            event,
            output,
        } => generate(count, seed, event, output.as_deref()),
    }
}
