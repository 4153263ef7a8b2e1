use crate::parser::Command;
use crate::status::ExitRecord;
use std::env;
use std::path::PathBuf;
use tracing::debug;

/// What the read-eval loop should do after looking at a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Builtin {
    /// Not a built-in; launch it as an external program.
    External,
    /// Built-in ran; read the next line.
    Handled,
    /// `exit`: leave the loop.
    Exit,
}

/// Checks if the command is a built-in command and, if so, executes it.
/// Supported built-ins are "exit", "cd" and "status". Redirections and `&`
/// are ignored for them.
pub fn handle_builtin(cmd: &Command, last_status: ExitRecord) -> Builtin {
    match cmd.argv.first().map(String::as_str) {
        Some("exit") => Builtin::Exit,
        Some("cd") => {
            change_dir(cmd.argv.get(1).map(PathBuf::from));
            Builtin::Handled
        }
        Some("status") => {
            println!("{}", last_status);
            Builtin::Handled
        }
        _ => Builtin::External,
    }
}

/// Changes to `target`, or to the home directory when it is omitted.
/// Only a failed explicit `target` is reported.
fn change_dir(target: Option<PathBuf>) {
    let explicit = target.is_some();
    let target = target.or_else(dirs_next::home_dir);
    let changed = match &target {
        Some(dir) => env::set_current_dir(dir).is_ok(),
        None => false,
    };
    debug!(dir = ?target, changed, "builtin.cd");
    if explicit && !changed {
        println!("Directory not found.");
    }
}
