//! Open a file path or URL with the platform's preferred default
//! application.
//!
//! A single call picks the right opener for the host platform: `open`
//! on macOS, `cmd /c start` on Windows, `wslview` under WSL and an
//! `xdg-open` (co-located or system-wide) everywhere else.
//!
//! ```no_run
//! # async fn demo() -> Result<(), sys_open::OpenError> {
//! sys_open::open("https://example.com").await?;
//!
//! sys_open::OpenOptions::new()
//!     .wait(true)
//!     .app("firefox")
//!     .app_args(["-private"])
//!     .open("https://example.com")
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod command;
mod error;
mod platform;

pub use command::LaunchCommand;
pub use error::OpenError;
pub use platform::{Platform, PlatformContext};

use std::ffi::OsStr;
use std::process::Stdio;

use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};

/// Opens `target` with the platform's default handler.
///
/// Equivalent to `OpenOptions::new().open(target)`: returns as soon as
/// the opener has been spawned, without waiting for it to exit.
pub async fn open(target: impl AsRef<OsStr>) -> Result<Child, OpenError> {
    OpenOptions::new().open(target).await
}

/// Options controlling how a target is opened.
///
/// Builder in the style of `std::fs::OpenOptions`; the terminal
/// [`open`](OpenOptions::open) method launches the target.
#[derive(Clone, Debug, Default)]
pub struct OpenOptions {
    pub(crate) wait: bool,
    pub(crate) background: bool,
    pub(crate) url: bool,
    pub(crate) app: Option<String>,
    pub(crate) app_args: Vec<String>,
}

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the opened application to exit before returning, and
    /// surface its failure (stderr output or a positive exit code).
    ///
    /// This waits for the application to exit, not just for its window
    /// to close. On Windows an explicit [`app`](OpenOptions::app) is
    /// required for waiting to work. Without `wait`, the call drains
    /// the child's stdout once in the background and returns
    /// immediately; stderr and stdin stay piped until the child exits.
    pub fn wait(mut self, wait: bool) -> Self {
        self.wait = wait;
        self
    }

    /// macOS only: do not bring the opened application to the
    /// foreground.
    pub fn background(mut self, background: bool) -> Self {
        self.background = background;
        self
    }

    /// Percent-encode the target as a URI before launching it.
    ///
    /// Mostly useful to get double quotes through `cmd.exe` intact;
    /// not recommended for targets that are not URLs.
    pub fn url(mut self, url: bool) -> Self {
        self.url = url;
        self
    }

    /// Open the target with a specific application instead of the
    /// platform's default handler.
    ///
    /// The name is platform dependent (Chrome is `google chrome` on
    /// macOS, `google-chrome` on Linux, `chrome` on Windows); a full
    /// path also works, e.g. a `/mnt/c/...` path to a Windows binary
    /// under WSL.
    pub fn app(mut self, program: impl Into<String>) -> Self {
        self.app = Some(program.into());
        self
    }

    /// Extra arguments forwarded verbatim to the application chosen
    /// with [`app`](OpenOptions::app).
    pub fn app_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.app_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Opens `target` under the detected platform context.
    pub async fn open(&self, target: impl AsRef<OsStr>) -> Result<Child, OpenError> {
        let ctx = PlatformContext::detect();
        self.open_with_context(target, &ctx).await
    }

    /// Resolves the opener invocation for `target` under `ctx` without
    /// spawning anything.
    pub async fn command(
        &self,
        target: impl AsRef<OsStr>,
        ctx: &PlatformContext,
    ) -> Result<LaunchCommand, OpenError> {
        let target = target.as_ref().to_str().ok_or(OpenError::InvalidTarget)?;
        command::build_command(target, self, ctx).await
    }

    /// Opens `target` under an explicit, pre-sampled platform context.
    pub async fn open_with_context(
        &self,
        target: impl AsRef<OsStr>,
        ctx: &PlatformContext,
    ) -> Result<Child, OpenError> {
        let launch = self.command(target, ctx).await?;
        debug!(program = ?launch.program, args = ?launch.args, "launching opener");
        let mut child = spawn(&launch, ctx)?;

        if !self.wait {
            // One drain keeps the child from stalling on a full stdout
            // pipe; stderr and stdin stay piped, as they always have.
            if let Some(mut stdout) = child.stdout.take() {
                tokio::spawn(async move {
                    let mut sink = Vec::new();
                    let _ = stdout.read_to_end(&mut sink).await;
                });
            }
            return Ok(child);
        }

        let status = child.wait().await?;
        let mut stderr_buf = Vec::new();
        if let Some(mut stderr) = child.stderr.take() {
            stderr.read_to_end(&mut stderr_buf).await?;
        }
        if !stderr_buf.is_empty() {
            return Err(OpenError::Stderr(
                String::from_utf8_lossy(&stderr_buf).into_owned(),
            ));
        }
        match status.code() {
            Some(code) if code > 0 => Err(OpenError::ExitCode(code)),
            _ => Ok(child),
        }
    }
}

fn spawn(launch: &LaunchCommand, ctx: &PlatformContext) -> Result<Child, OpenError> {
    let mut command = std::process::Command::new(&launch.program);
    apply_args(&mut command, launch, ctx);
    let mut command = Command::from(command);
    command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    Ok(command.spawn()?)
}

#[cfg(windows)]
fn apply_args(command: &mut std::process::Command, launch: &LaunchCommand, ctx: &PlatformContext) {
    use std::os::windows::process::CommandExt;

    // Hand cmd.exe the assembled vector unchanged; the default quoting
    // would strip the quotes protecting `&` in the target.
    if ctx.platform == Platform::Windows {
        for arg in &launch.args {
            command.raw_arg(arg);
        }
    } else {
        command.args(&launch.args);
    }
}

#[cfg(not(windows))]
fn apply_args(command: &mut std::process::Command, launch: &LaunchCommand, _ctx: &PlatformContext) {
    command.args(&launch.args);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[tokio::test]
    async fn non_utf8_target_is_rejected_before_spawning() {
        use std::os::unix::ffi::OsStrExt;

        let target = OsStr::from_bytes(&[0x66, 0x6f, 0xff]);
        let err = open(target).await.unwrap_err();
        assert!(matches!(err, OpenError::InvalidTarget));
    }
}
