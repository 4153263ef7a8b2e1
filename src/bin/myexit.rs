/*
 * myexit.rs - A handy program for testing the status built-in
 *
 * usage: myexit <code>
 * Exits immediately with status <code>.
 */

use std::env;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <code>", args[0]);
        process::exit(0);
    }

    let code = args[1].parse::<i32>().unwrap_or_else(|_| {
        eprintln!("Error: <code> must be an integer");
        process::exit(1);
    });

    process::exit(code);
}
