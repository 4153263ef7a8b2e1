use crate::error::ShellError;
use nix::libc::STDOUT_FILENO;
use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};
use nix::unistd::write;
use signal_hook::consts::signal::SIGTSTP;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const ENTER_FOREGROUND_ONLY: &[u8] = b"\nEntering foreground-only mode (& is now ignored)\n";
const EXIT_FOREGROUND_ONLY: &[u8] = b"Exiting foreground-only mode\n";

/// Whether a trailing `&` is currently honored.
///
/// Cloning shares the same cell: the `SIGTSTP` handler owns one clone and
/// flips it, the launcher reads another.
#[derive(Clone, Debug)]
pub struct BackgroundMode {
    allowed: Arc<AtomicBool>,
}

impl BackgroundMode {
    pub fn new() -> Self {
        BackgroundMode {
            allowed: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed.load(Ordering::SeqCst)
    }

    /// Flips the mode and announces the new one on standard output.
    /// Returns whether background jobs are allowed afterwards.
    ///
    /// Runs inside the signal handler: only an atomic flip and a raw
    /// `write(2)`, no allocation and no locks.
    pub fn toggle(&self) -> bool {
        let was_allowed = self.allowed.fetch_xor(true, Ordering::SeqCst);
        let message = if was_allowed {
            ENTER_FOREGROUND_ONLY
        } else {
            EXIT_FOREGROUND_ONLY
        };
        let _ = write(STDOUT_FILENO, message);
        !was_allowed
    }
}

impl Default for BackgroundMode {
    fn default() -> Self {
        Self::new()
    }
}

/// Installs the shell's own signal dispositions:
/// - SIGINT: ignored for the shell's whole lifetime.
/// - SIGTSTP: toggles foreground-only mode on `mode`, with every other
///   signal blocked while the handler runs.
pub fn install_signal_handlers(mode: &BackgroundMode) -> Result<(), ShellError> {
    let ignore = SigAction::new(SigHandler::SigIgn, SaFlags::empty(), SigSet::all());
    // SAFETY: SIG_IGN carries no handler code.
    unsafe { sigaction(Signal::SIGINT, &ignore) }.map_err(signal_error)?;

    let handler_mode = mode.clone();
    // SAFETY: `toggle` only touches an atomic and calls write(2), both
    // async-signal-safe.
    unsafe {
        signal_hook::low_level::register(SIGTSTP, move || {
            handler_mode.toggle();
        })
    }
    .map_err(ShellError::Signal)?;

    block_all_during(Signal::SIGTSTP)
}

/// Reinstalls the current handler for `signal` with a full `sa_mask`.
/// signal-hook registers its trampoline with an empty mask.
fn block_all_during(signal: Signal) -> Result<(), ShellError> {
    let ignore = SigAction::new(SigHandler::SigIgn, SaFlags::empty(), SigSet::empty());
    // SAFETY: the handler put back is the one signal-hook just installed,
    // only the mask changes.
    unsafe {
        let current = sigaction(signal, &ignore).map_err(signal_error)?;
        let masked = SigAction::new(current.handler(), current.flags(), SigSet::all());
        sigaction(signal, &masked).map_err(signal_error)?;
    }
    Ok(())
}

fn signal_error(errno: nix::errno::Errno) -> ShellError {
    ShellError::Signal(io::Error::from(errno))
}

/// Signal dispositions for a freshly forked child, applied before any
/// redirection or exec.
/// - SIGINT: back to the default, so Ctrl-C kills the child.
/// - SIGPIPE: back to the default; the Rust runtime ignores it in the
///   shell and exec would otherwise keep that.
/// - SIGTSTP: ignored, so a terminal stop only toggles the shell's mode.
pub fn reset_child_signals() -> nix::Result<()> {
    let default = SigAction::new(SigHandler::SigDfl, SaFlags::empty(), SigSet::empty());
    let ignore = SigAction::new(SigHandler::SigIgn, SaFlags::empty(), SigSet::empty());
    // SAFETY: neither disposition installs handler code.
    unsafe {
        sigaction(Signal::SIGINT, &default)?;
        sigaction(Signal::SIGPIPE, &default)?;
        sigaction(Signal::SIGTSTP, &ignore)?;
    }
    Ok(())
}
