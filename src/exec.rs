use crate::error::ShellError;
use crate::jobs::{reap_finished, report, wait_foreground};
use crate::parser::Command;
use crate::signals::{reset_child_signals, BackgroundMode};
use crate::status::ExitRecord;
use nix::fcntl::{open, OFlag};
use nix::libc::{self, STDIN_FILENO, STDOUT_FILENO};
use nix::sys::stat::Mode;
use nix::unistd::{close, dup2, execvp, fork, ForkResult};
use std::ffi::CString;
use std::io::{self, Write};
use std::os::unix::io::RawFd;
use tracing::debug;

/// Child exit status when a redirection file cannot be opened.
pub const EXIT_OPEN_FAILED: i32 = 1;
/// Child exit status when a redirection file cannot be put on fd 0/1.
pub const EXIT_DUP_FAILED: i32 = 2;
/// Child exit status when the program cannot be executed.
pub const EXIT_EXEC_FAILED: i32 = 127;

/// Executes an external command.
///
/// - Forks a child, which resets its signal dispositions, applies the
///   redirections and execs the program through `PATH`.
/// - A background request is honored only while `mode` allows it; the pid is
///   printed and never waited on here. Otherwise the parent blocks on the
///   child and returns its record.
/// - Finished background children are reaped and reported before returning.
///
/// Only a failed fork (or wait) is an error; everything that goes wrong in
/// the child ends up in the child's exit status.
pub fn execute_command(cmd: Command, mode: &BackgroundMode) -> Result<Option<ExitRecord>, ShellError> {
    // Built before forking so the child has nothing left to allocate.
    let argv = cmd
        .argv
        .iter()
        .map(|arg| CString::new(arg.as_str()))
        .collect::<Result<Vec<_>, _>>()?;

    // Anything still buffered would otherwise be written twice.
    io::stdout().flush()?;

    // SAFETY: the shell is single-threaded, and the child only performs
    // fd operations before exec or _exit.
    match unsafe { fork() }.map_err(ShellError::Fork)? {
        ForkResult::Child => {
            let code = run_child(&cmd, &argv);
            // SAFETY: skips atexit handlers and stdio buffers that belong to the parent.
            unsafe { libc::_exit(code) }
        }
        ForkResult::Parent { child } => {
            let background = cmd.background && mode.is_allowed();
            debug!(
                pid = %child,
                program = %cmd.program(),
                background,
                requested_background = cmd.background,
                "exec.spawn"
            );

            let status = if background {
                println!("background pid is {}", child);
                io::stdout().flush()?;
                None
            } else {
                let record = wait_foreground(child)?;
                debug!(pid = %child, status = %record, "exec.wait complete");
                Some(record)
            };

            report(&reap_finished()?);
            io::stdout().flush()?;
            Ok(status)
        }
    }
}

/// Everything the child does between fork and exec. Returns the exit status
/// to use when it cannot get as far as exec.
fn run_child(cmd: &Command, argv: &[CString]) -> i32 {
    if let Err(err) = reset_child_signals() {
        eprintln!("smallsh: cannot reset signal dispositions: {}", err);
    }

    if let Some(infile) = &cmd.infile {
        if let Err(code) = redirect(infile, OFlag::O_RDONLY, STDIN_FILENO, "input") {
            return code;
        }
    }

    if let Some(outfile) = &cmd.outfile {
        let flags = OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC;
        if let Err(code) = redirect(outfile, flags, STDOUT_FILENO, "output") {
            return code;
        }
    }

    match execvp(&argv[0], argv) {
        Ok(never) => match never {},
        Err(err) => {
            eprintln!("{}: {}", cmd.program(), err.desc());
            EXIT_EXEC_FAILED
        }
    }
}

/// Opens `path` and moves it onto `target`. Diagnostics go to standard
/// error only.
fn redirect(path: &str, flags: OFlag, target: RawFd, what: &str) -> Result<(), i32> {
    let fd = open(path, flags, Mode::from_bits_truncate(0o666)).map_err(|err| {
        eprintln!("cannot open {} for {}: {}", path, what, err.desc());
        EXIT_OPEN_FAILED
    })?;

    dup2(fd, target).map_err(|err| {
        eprintln!("unable to assign {} file {}: {}", what, path, err.desc());
        EXIT_DUP_FAILED
    })?;

    // open() may already have handed back `target` when it was closed.
    if fd != target {
        let _ = close(fd);
    }
    Ok(())
}
