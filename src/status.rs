use nix::sys::wait::WaitStatus;
use nix::unistd::Pid;
use std::fmt;

/// How a child process ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitRecord {
    /// Normal termination with the given exit status.
    Exited(i32),
    /// Killed by the given signal number.
    Signaled(i32),
}

impl ExitRecord {
    /// Converts a wait status into the pid and record of a terminated child.
    /// Returns `None` for statuses that do not mean termination.
    pub fn from_wait_status(status: WaitStatus) -> Option<(Pid, ExitRecord)> {
        match status {
            WaitStatus::Exited(pid, code) => Some((pid, ExitRecord::Exited(code))),
            WaitStatus::Signaled(pid, signal, _) => Some((pid, ExitRecord::Signaled(signal as i32))),
            _ => None,
        }
    }
}

impl Default for ExitRecord {
    fn default() -> Self {
        ExitRecord::Exited(0)
    }
}

impl fmt::Display for ExitRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitRecord::Exited(code) => write!(f, "exit value {}", code),
            ExitRecord::Signaled(signo) => write!(f, "terminated by signal {}", signo),
        }
    }
}
