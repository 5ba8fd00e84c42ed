use std::path::PathBuf;

use clap::Parser;
use log::{info, LevelFilter};

/// Input used when nothing else is given on the command line.
pub const DEFAULT_TEXT: &str = "This is a test string!!!";

/// Where the demo reads its input from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Text(String),
    File(PathBuf),
}

/// Options for the demo driver.
#[derive(Debug)]
pub struct DemoOpts {
    /// Data to encode
    pub input: Input,
    /// Log level for the terminal logger
    pub log_level: LevelFilter,
    /// Allocate codec handles from jemalloc instead of the system allocator
    pub jemalloc: bool,
    /// Print the codeword table after building the codec
    pub show_codes: bool,
}

impl DemoOpts {
    pub fn new() -> Self {
        Self {
            input: Input::Text(DEFAULT_TEXT.to_string()),
            log_level: LevelFilter::Info,
            jemalloc: false,
            show_codes: false,
        }
    }
}

impl Default for DemoOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Huffman encode and decode a buffer, printing hex dumps of each step",
    long_about = None
)]
pub struct Args {
    /// Text to encode
    #[clap()]
    text: Option<String>,

    /// Read the data to encode from a file instead
    #[clap(short = 'f', long = "file", conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Sets verbosity. -v0 is silent, -v5 traces every codeword
    #[clap(short = 'v', default_value_t = 3)]
    v: u8,

    /// Allocate codec handles from jemalloc
    #[clap(long = "jemalloc")]
    jemalloc: bool,

    /// Print the codeword table
    #[clap(short = 'c', long = "codes")]
    codes: bool,
}

/// Map a -v value to a log level.
pub fn level_from_verbosity(v: u8) -> LevelFilter {
    match v {
        0 => LevelFilter::Off,
        1 => LevelFilter::Error,
        2 => LevelFilter::Warn,
        3 => LevelFilter::Info,
        4 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

impl From<Args> for DemoOpts {
    fn from(args: Args) -> Self {
        let mut opts = DemoOpts::new();
        if let Some(file) = args.file {
            opts.input = Input::File(file);
        } else if let Some(text) = args.text {
            opts.input = Input::Text(text);
        }
        opts.log_level = level_from_verbosity(args.v);
        opts.jemalloc = args.jemalloc;
        opts.show_codes = args.codes;
        opts
    }
}

/// Parse the command line into demo options.
pub fn demo_opts_init() -> DemoOpts {
    DemoOpts::from(Args::parse())
}

/// Report the options in use. Call after the logger is up.
pub fn report(opts: &DemoOpts) {
    info!("Verbosity set to {}", opts.log_level);
    match &opts.input {
        Input::Text(_) => info!("Encoding text from the command line"),
        Input::File(path) => info!("Encoding the file {}", path.display()),
    }
    if opts.jemalloc {
        info!("Codec handles allocated from jemalloc");
    }
}
