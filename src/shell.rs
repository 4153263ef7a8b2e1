use crate::builtins::{handle_builtin, Builtin};
use crate::error::ShellError;
use crate::exec::execute_command;
use crate::parser::parse_command_line;
use crate::signals::BackgroundMode;
use crate::status::ExitRecord;
use nix::unistd::getpid;
use std::io::{self, Write};
use tracing::{debug, warn};

/// Global prompt string.
pub static PROMPT: &str = ": ";

/// Runs the main shell loop: prints the prompt (if enabled), reads input,
/// parses it, and evaluates commands.
///
/// - `emit_prompt`: if true, prints the command prompt.
/// - `mode`: foreground-only state shared with the SIGTSTP handler.
///
/// Returns on `exit` or end of input. An error means the shell cannot go on.
pub fn run_shell(emit_prompt: bool, mode: &BackgroundMode) -> Result<(), ShellError> {
    let shell_pid = getpid();
    // Status of the last foreground command, for `status`.
    let mut last_status = ExitRecord::default();

    loop {
        if emit_prompt {
            print!("{}", PROMPT);
            io::stdout().flush()?;
        }

        let mut cmdline = String::new();
        match io::stdin().read_line(&mut cmdline) {
            Ok(0) => break, // End-of-file (Ctrl-D)
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!(error = %e, "shell.read_line");
                eprintln!("Error reading input: {}", e);
                break;
            }
        }

        let command = match parse_command_line(&cmdline, shell_pid) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("smallsh: {}", e);
                continue;
            }
        };
        debug!(argv = ?command.argv, infile = ?command.infile, outfile = ?command.outfile,
            background = command.background, "shell.dispatch");

        match handle_builtin(&command, last_status) {
            Builtin::Exit => break,
            Builtin::Handled => {}
            Builtin::External => match execute_command(command, mode) {
                Ok(Some(record)) => last_status = record,
                Ok(None) => {}
                Err(e) if e.is_recoverable() => eprintln!("smallsh: {}", e),
                Err(e) => return Err(e),
            },
        }
        io::stdout().flush()?;
    }
    Ok(())
}
