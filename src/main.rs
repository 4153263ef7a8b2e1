mod builtins;
mod error;
mod exec;
mod jobs;
mod parser;
mod shell;
mod signals;
mod status;
mod utils;

use signals::BackgroundMode;
use std::env;
use tracing::{error, info};
use utils::Options;

fn main() {
    // Parse command-line arguments.
    let options = Options::parse(env::args().skip(1));
    utils::init_logging(options.verbose);

    // Install signal handlers.
    let mode = BackgroundMode::new();
    if let Err(e) = signals::install_signal_handlers(&mode) {
        error!(error = %e, "signals.install");
        utils::error(&e.to_string());
    }
    info!(pid = %nix::unistd::getpid(), prompt = options.emit_prompt, "smallsh started");

    // Run the main shell loop with the options.
    if let Err(e) = shell::run_shell(options.emit_prompt, &mode) {
        error!(error = %e, "shell.fatal");
        utils::error(&e.to_string());
    }
}
