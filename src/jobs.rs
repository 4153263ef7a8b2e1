use crate::error::ShellError;
use crate::status::ExitRecord;
use nix::errno::Errno;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;
use tracing::debug;

/// A background child collected by the reaper.
#[derive(Debug, PartialEq, Eq)]
pub struct Reaped {
    pub pid: Pid,
    pub record: ExitRecord,
}

/// Collects every child that has already terminated, without blocking.
///
/// The shell keeps no job list: whatever the kernel reports as finished is
/// returned, in the order `waitpid` hands it out.
pub fn reap_finished() -> Result<Vec<Reaped>, ShellError> {
    let mut reaped = Vec::new();
    loop {
        match waitpid(Pid::from_raw(-1), Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::StillAlive) | Err(Errno::ECHILD) => break,
            Ok(status) => {
                if let Some((pid, record)) = ExitRecord::from_wait_status(status) {
                    debug!(pid = %pid, status = %record, "jobs.reap");
                    reaped.push(Reaped { pid, record });
                }
            }
            Err(Errno::EINTR) => continue,
            Err(err) => return Err(ShellError::Wait(err)),
        }
    }
    Ok(reaped)
}

/// Prints the completion notice for each reaped background child.
pub fn report(reaped: &[Reaped]) {
    for job in reaped {
        println!("child {} terminated", job.pid);
        println!("{}", job.record);
    }
}

/// Blocks until `pid` terminates and returns how it ended.
pub fn wait_foreground(pid: Pid) -> Result<ExitRecord, ShellError> {
    loop {
        match waitpid(pid, None) {
            Ok(status) => {
                if let Some((_, record)) = ExitRecord::from_wait_status(status) {
                    return Ok(record);
                }
            }
            // SIGTSTP arrives while the shell sits here.
            Err(Errno::EINTR) => continue,
            Err(err) => return Err(ShellError::Wait(err)),
        }
    }
}
