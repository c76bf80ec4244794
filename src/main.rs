#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

use pakres::fs::{copy_file, load_file, save_file};
use pakres::{pak, Crc16, Lexer, LoadedBuffer, ResourceConfig, ResourceError, ResourceLayer};

#[derive(Debug, Parser)]
#[command(name = "pakres", version, about = "Pak archive and resource file tools")]
struct Cli {
    /// Print debug diagnostics.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Look a name up in the pak0.pak, pak1.pak, ... chain under a directory.
    Lookup {
        /// Directory holding the pak files.
        #[arg(long)]
        root: PathBuf,
        /// Entry name, e.g. "gfx/palette.lmp" (case and slash direction ignored).
        name: String,
        /// Write the entry here instead of printing its size.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Resolve a name relative to a source file's mod directory.
    Load {
        /// Source file the mod/game directories are derived from.
        #[arg(long)]
        source: String,
        name: String,
        /// Fall back to the pak chain in the game directory.
        #[arg(long, default_value_t = false)]
        archives: bool,
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the tokens of a definition file, one per line.
    Tokens { file: PathBuf },

    /// Print the CRC-16 of a file.
    Crc { file: PathBuf },

    /// Copy a file, creating the destination directories.
    Copy { from: PathBuf, to: PathBuf },
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().compact().without_time())
        .with(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        );
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("warning: tracing subscriber already set");
    }
}

fn emit(
    name: &str,
    buf: Option<LoadedBuffer>,
    output: Option<&Path>,
) -> Result<(), ResourceError> {
    let Some(buf) = buf else {
        println!("{name}: not found");
        return Ok(());
    };
    match output {
        Some(out) => save_file(out, buf.as_bytes()),
        None => {
            println!("{name}: {} bytes", buf.len());
            Ok(())
        }
    }
}

fn run(cmd: Command) -> Result<(), ResourceError> {
    match cmd {
        Command::Lookup { root, name, output } => {
            emit(&name, pak::lookup(&root, &name)?, output.as_deref())
        }
        Command::Load {
            source,
            name,
            archives,
            output,
        } => {
            let layer = ResourceLayer::new(ResourceConfig::from_source_path(&source)?);
            emit(&name, layer.load(&name, archives)?, output.as_deref())
        }
        Command::Tokens { file } => {
            let buf = load_file(&file)?;
            let text = buf.as_text();
            let mut lexer = Lexer::new(&text);
            while let Some(tok) = lexer.next_token() {
                println!("{tok}");
            }
            Ok(())
        }
        Command::Crc { file } => {
            let buf = load_file(&file)?;
            println!("{:04x}", Crc16::checksum(buf.as_bytes()));
            Ok(())
        }
        Command::Copy { from, to } => {
            copy_file(&from, &to)?;
            info!("copied {} -> {}", from.display(), to.display());
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.cmd) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
