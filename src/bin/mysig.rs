/*
 * mysig.rs - Another handy routine for testing signal termination
 *
 * usage: mysig <signo> [n]
 * Sleeps for [n] seconds (default 0) and sends signal <signo> to itself.
 */

use nix::sys::signal::{self, Signal};
use nix::unistd::getpid;
use std::env;
use std::process;
use std::thread;
use std::time::Duration;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <signo> [n]", args[0]);
        process::exit(0);
    }

    let signal = args[1]
        .parse::<i32>()
        .ok()
        .and_then(|signo| Signal::try_from(signo).ok())
        .unwrap_or_else(|| {
            eprintln!("Error: <signo> must be a valid signal number");
            process::exit(1);
        });

    let secs = match args.get(2) {
        Some(n) => n.parse::<u64>().unwrap_or_else(|_| {
            eprintln!("Error: [n] must be a positive integer");
            process::exit(1);
        }),
        None => 0,
    };

    thread::sleep(Duration::from_secs(secs));

    if let Err(err) = signal::kill(getpid(), signal) {
        eprintln!("kill ({}) error: {}", signal, err);
    }

    // Only reached when the signal is ignored or caught.
    process::exit(0);
}
