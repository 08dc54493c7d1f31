use clap::{Parser, Subcommand};
use log::{info, warn};
use std::{fmt::Display, fmt::Formatter};

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// Map the numeric -v level onto a verbosity. 0 is silent, 5 and up is everything.
    pub fn from_level(v: u8) -> Self {
        match v {
            0 => Verbosity::Quiet,
            1 => Verbosity::Errors,
            2 => Verbosity::Warnings,
            3 => Verbosity::Info,
            4 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        match self {
            Verbosity::Quiet => log::LevelFilter::Off,
            Verbosity::Errors => log::LevelFilter::Error,
            Verbosity::Warnings => log::LevelFilter::Warn,
            Verbosity::Info => log::LevelFilter::Info,
            Verbosity::Debug => log::LevelFilter::Debug,
            Verbosity::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Huffman statistics or LZ78 encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Huffman,
    Lz78,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// All user settable options that control program behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LzOpts {
    /// Which coder to run
    pub op_mode: Mode,
    /// Name of the file to read for input
    pub file: String,
    /// Bytes per Huffman symbol
    pub group: usize,
    /// Count line breaks as symbols instead of stripping them
    pub keep_newlines: bool,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl LzOpts {
    pub fn new() -> Self {
        Self {
            op_mode: Mode::Huffman,
            file: String::new(),
            group: 1,
            keep_newlines: false,
            verbose: Verbosity::Info,
        }
    }
}

impl Default for LzOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Huffman and LZ78 coding statistics for a file",
    long_about = "
    Builds a static Huffman code from the symbol frequencies of a file and reports the
    expected code length, entropy and compression ratio, or runs the file through an online
    LZ78 encoder over its bits and reports the encoded size."
)]
struct Args {
    #[clap(subcommand)]
    command: Command,

    /// Sets verbosity. -v0 is silent, -v5 is chatty
    #[clap(short = 'v', long = "verbose", default_value_t = 3, global = true)]
    v: u8,

    /// Turn off all log output
    #[clap(short = 'q', long = "quiet", global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Huffman code the symbol frequencies of a file
    Huffman {
        /// Filename of file to process
        file: String,
        /// Bytes per symbol, e.g. 3 to code DNA codons
        #[clap(short = 'g', long = "group", default_value_t = 1)]
        group: usize,
        /// Keep line breaks instead of stripping them
        #[clap(long = "keep-newlines")]
        keep_newlines: bool,
    },
    /// LZ78 encode the bits of a file
    Lz78 {
        /// Filename of file to process
        file: String,
    },
}

/// Put command line information from CLAP into our internal structure.
fn opts_from(args: Args) -> LzOpts {
    let mut opts = LzOpts::new();
    match args.command {
        Command::Huffman {
            file,
            group,
            keep_newlines,
        } => {
            opts.op_mode = Mode::Huffman;
            opts.file = file;
            opts.group = group;
            opts.keep_newlines = keep_newlines;
        }
        Command::Lz78 { file } => {
            opts.op_mode = Mode::Lz78;
            opts.file = file;
        }
    }
    if opts.group == 0 {
        warn!("A group of 0 bytes makes no sense, using 1");
        opts.group = 1;
    }
    opts.verbose = if args.quiet {
        Verbosity::Quiet
    } else {
        Verbosity::from_level(args.v)
    };
    opts
}

/// Parse an explicit argument list (the first item is the program name).
pub fn lzopts_from_args<I, T>(args: I) -> Result<LzOpts, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Args::try_parse_from(args).map(opts_from)
}

/// Parse the process arguments, set the log level and report what we are going to do.
/// Exits with a usage message on bad arguments.
pub fn lzopts_init() -> LzOpts {
    let opts = opts_from(Args::parse());

    // Set the log level
    log::set_max_level(opts.verbose.level_filter());

    // Below we report initialization status to the user
    info!("---- lzhuff Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Getting input from the file {}", opts.file);
    if opts.op_mode == Mode::Huffman {
        info!("Symbol size set to {} byte(s)", opts.group);
        if opts.keep_newlines {
            info!("Keeping line breaks")
        };
    }
    info!("---- lzhuff Initialization End ----\n");
    opts
}
