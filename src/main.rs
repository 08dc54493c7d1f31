//Enable more cargo lint tests
#![warn(rust_2018_idioms)]

use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use lzhuff::tools::cli::{lzopts_init, Mode};
use lzhuff::tools::report::{huffman_report, lz78_report};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> Result<(), lzhuff::Error> {
    // Available log levels are Error, Warn, Info, Debug, Trace
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Could not start the logger: {}", e);
    }

    let options = lzopts_init();

    //----- Figure how what we need to do and go do it
    let result = match options.op_mode {
        Mode::Huffman => huffman_report(&options).map(|_| ()),
        Mode::Lz78 => lz78_report(&options).map(|_| ()),
    };

    match &result {
        Ok(()) => info!("Done.\n"),
        Err(e) => error!("{}", e),
    }
    result
}
