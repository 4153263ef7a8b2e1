use std::process;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter, e.g. `SMALLSH_LOG=debug`.
pub const LOG_ENV: &str = "SMALLSH_LOG";

/// Command-line options.
#[derive(Debug, PartialEq, Eq)]
pub struct Options {
    pub emit_prompt: bool,
    pub verbose: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            emit_prompt: true,
            verbose: false,
        }
    }
}

impl Options {
    /// Parses the flags that follow the program name. Unknown flags are ignored.
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Options::default();
        for arg in args {
            match arg.as_ref() {
                "-h" => print_usage(),
                "-v" => options.verbose = true,
                "-p" => options.emit_prompt = false,
                _ => {}
            }
        }
        options
    }
}

pub fn print_usage() -> ! {
    println!("Usage: smallsh [-hvp]");
    println!("   -h   Print this help message");
    println!("   -v   Enable verbose mode");
    println!("   -p   Do not print a command prompt");
    process::exit(1);
}

/// Sends log events to standard error. `SMALLSH_LOG` wins over `-v`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

pub fn error(msg: &str) -> ! {
    eprintln!("smallsh: {}", msg);
    process::exit(1);
}
