use blockpad::cli::{
    check_file, default_pad_output, default_unpad_output, pad_file, unpad_file, CheckOptions,
    PadOptions, UnpadOptions,
};
use blockpad::stream::DEFAULT_CHUNK_SIZE;
use blockpad::Pkcs7;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Version info from build.rs
const VERSION: &str = env!("BLOCKPAD_VERSION");
const PROFILE: &str = env!("BLOCKPAD_PROFILE");
const GIT_HASH: &str = env!("BLOCKPAD_GIT_HASH");

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} build ({})", PROFILE, VERSION, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "blockpad")]
#[command(author, about = "Streaming PKCS#7 padding for block ciphers", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pad a file to a whole number of blocks
    #[command(alias = "p")]
    Pad {
        /// Block size in bits (multiple of 8, 8-248)
        #[arg(long, default_value = "128", value_parser = parse_scheme)]
        block_size: Pkcs7,

        /// Read size in bytes
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Write the output hex-encoded
        #[arg(long)]
        hex: bool,

        /// Input file
        input: PathBuf,

        /// Output file (defaults to INPUT.pad)
        output: Option<PathBuf>,
    },

    /// Validate and strip the padding of a file
    #[command(alias = "u")]
    Unpad {
        /// Block size in bits (multiple of 8, 8-248)
        #[arg(long, default_value = "128", value_parser = parse_scheme)]
        block_size: Pkcs7,

        /// Read size in bytes
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Input file is hex-encoded
        #[arg(long)]
        hex: bool,

        /// Input file
        input: PathBuf,

        /// Output file (defaults to INPUT without .pad)
        output: Option<PathBuf>,
    },

    /// Validate the padding of a file without writing anything
    #[command(alias = "c")]
    Check {
        /// Block size in bits (multiple of 8, 8-248)
        #[arg(long, default_value = "128", value_parser = parse_scheme)]
        block_size: Pkcs7,

        /// Show the final block hex-encoded
        #[arg(long)]
        hex: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// File to check
        file: PathBuf,
    },
}

fn parse_scheme(s: &str) -> Result<Pkcs7, String> {
    let bits: usize = s.parse().map_err(|e| format!("{}", e))?;
    Pkcs7::new(bits).map_err(|e| format!("{}", e))
}

fn init_logging(verbose: bool) {
    let mut log_builder = env_logger::Builder::from_default_env();
    if verbose {
        log_builder.filter(None, log::LevelFilter::Debug);
    } else if std::env::var_os("RUST_LOG").is_none() {
        log_builder.filter(None, log::LevelFilter::Warn);
    }
    log_builder.target(env_logger::Target::Stderr);
    log_builder.init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        println!("blockpad {}", get_version());
        return ExitCode::SUCCESS;
    }

    init_logging(cli.verbose);

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            use clap::CommandFactory;
            if let Err(e) = Cli::command().print_help() {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
            println!();
            return ExitCode::SUCCESS;
        }
    };

    let result = match command {
        Commands::Pad {
            block_size,
            chunk_size,
            hex,
            input,
            output,
        } => {
            let output = output.unwrap_or_else(|| default_pad_output(&input));
            let options = PadOptions {
                scheme: block_size,
                chunk_size,
                hex,
            };
            pad_file(&input, &output, &options).map(|written| {
                println!("Padded {} bytes to {}", written, output.display());
            })
        }

        Commands::Unpad {
            block_size,
            chunk_size,
            hex,
            input,
            output,
        } => {
            let output = output.unwrap_or_else(|| default_unpad_output(&input));
            let options = UnpadOptions {
                scheme: block_size,
                chunk_size,
                hex,
            };
            unpad_file(&input, &output, &options).map(|written| {
                println!("Unpadded {} bytes to {}", written, output.display());
            })
        }

        Commands::Check {
            block_size,
            hex,
            json,
            file,
        } => {
            let options = CheckOptions {
                scheme: block_size,
                hex,
                json,
            };
            check_file(&file, &options)
                .and_then(|report| report.render(options.json))
                .map(|text| print!("{}", text))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("command failed: {:?}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
