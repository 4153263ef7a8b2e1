/*
 * mytstp.rs - Another handy routine for testing foreground-only mode
 *
 * usage: mytstp
 * Sends SIGTSTP to its parent (the shell that launched it) and exits.
 */

use nix::sys::signal::{self, Signal};
use nix::unistd::getppid;
use std::process;

fn main() {
    if let Err(err) = signal::kill(getppid(), Signal::SIGTSTP) {
        eprintln!("kill (tstp) error: {}", err);
        process::exit(1);
    }

    process::exit(0);
}
