//! External command execution
//!
//! Detection shells out to `go` and `git` but only ever looks at captured
//! stdout plus a success flag, never at raw exit codes. The `CommandRunner`
//! trait is the seam tests use to substitute canned output.

use std::env;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Runs an external command and captures its output.
pub trait CommandRunner {
    /// Run `command` and return its captured stdout and whether it succeeded.
    fn capture(&self, command: &str) -> (String, bool);
}

/// Production runner: executes the command line through `sh -c`.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn capture(&self, command: &str) -> (String, bool) {
        let output = Command::new("sh").args(["-c", command]).output();

        match output {
            Ok(output) => (
                String::from_utf8_lossy(&output.stdout).to_string(),
                output.status.success(),
            ),
            Err(_) => (String::new(), false),
        }
    }
}

/// Scoped working-directory change.
///
/// Snapshots the current directory, changes into `path`, and restores the
/// snapshot on drop, including on early return and panic unwind.
pub struct DirGuard {
    previous: PathBuf,
}

impl DirGuard {
    pub fn change(path: &Path) -> io::Result<Self> {
        let previous = env::current_dir()?;
        env::set_current_dir(path)?;
        Ok(Self { previous })
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.previous);
    }
}

/// Scoped environment-variable change.
///
/// Snapshots the variable's prior value, sets the new one, and on drop
/// either restores the prior value or removes the variable if it was unset.
pub struct EnvGuard {
    key: &'static str,
    previous: Option<OsString>,
}

impl EnvGuard {
    pub fn set(key: &'static str, value: impl AsRef<Path>) -> Self {
        let previous = env::var_os(key);
        // SAFETY: command invocations are single-threaded; nothing reads the
        // environment concurrently while a guard is live.
        unsafe { env::set_var(key, value.as_ref()) };
        Self { key, previous }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // SAFETY: see EnvGuard::set.
        unsafe {
            match self.previous.take() {
                Some(value) => env::set_var(self.key, value),
                None => env::remove_var(self.key),
            }
        }
    }
}
