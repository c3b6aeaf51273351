use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};

/// Viewer bridging to the Windows-side default handler under WSL.
pub(crate) const WSL_VIEWER: &str = "wslview";

/// Well-known name of the opener helper expected to sit next to our
/// own executable, and of the system-wide fallback.
pub(crate) const XDG_OPEN: &str = "xdg-open";

/// The closed set of platform families the launcher distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Windows,
    /// Everything else; launched through a freedesktop-style opener.
    Unix,
}

impl Platform {
    /// Maps an `std::env::consts::OS`-style identifier onto a family.
    pub fn from_os(os: &str) -> Self {
        match os {
            "macos" => Self::MacOs,
            "windows" => Self::Windows,
            _ => Self::Unix,
        }
    }
}

/// Ambient state the command builder depends on.
///
/// [`PlatformContext::detect`] samples the environment once per call;
/// constructing a context by hand makes every platform branch
/// reachable from any host.
#[derive(Clone, Debug)]
pub struct PlatformContext {
    pub platform: Platform,
    /// Running in a Linux environment hosted by Windows.
    pub wsl: bool,
    /// Directory holding our own executable, when it can be resolved.
    pub exe_dir: Option<PathBuf>,
}

impl PlatformContext {
    pub fn detect() -> Self {
        let platform = Platform::from_os(std::env::consts::OS);
        let wsl = platform == Platform::Unix && is_wsl();
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        trace!(?platform, wsl, ?exe_dir, "detected platform context");
        Self {
            platform,
            wsl,
            exe_dir,
        }
    }

    /// A repackaged install whose original directory layout is gone;
    /// no co-located helper can exist there.
    pub(crate) fn is_bundled(&self) -> bool {
        match &self.exe_dir {
            None => true,
            Some(dir) => dir.as_os_str().is_empty() || dir == Path::new("/"),
        }
    }
}

/// `/proc/version` names the host kernel vendor on WSL.
fn is_wsl() -> bool {
    match std::fs::read_to_string("/proc/version") {
        Ok(version) => {
            let version = version.to_lowercase();
            version.contains("microsoft") || version.contains("wsl")
        }
        Err(_) => false,
    }
}

/// Picks the opener for [`Platform::Unix`] when the caller requested
/// no app and the environment is not WSL.
///
/// A regular-file `xdg-open` next to our own executable wins;
/// repackaged installs and missing helpers use the system one. A
/// failed probe is only an error if it is not "not found".
pub(crate) async fn resolve_fallback_opener(ctx: &PlatformContext) -> io::Result<OsString> {
    let local = match &ctx.exe_dir {
        Some(dir) if !ctx.is_bundled() => dir.join(XDG_OPEN),
        _ => return Ok(XDG_OPEN.into()),
    };
    match fs::metadata(&local).await {
        Ok(meta) if meta.is_file() => Ok(local.into_os_string()),
        Ok(_) => Ok(XDG_OPEN.into()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(XDG_OPEN.into()),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unix_ctx(exe_dir: Option<PathBuf>) -> PlatformContext {
        PlatformContext {
            platform: Platform::Unix,
            wsl: false,
            exe_dir,
        }
    }

    #[test]
    fn platform_families_cover_known_identifiers() {
        assert_eq!(Platform::from_os("macos"), Platform::MacOs);
        assert_eq!(Platform::from_os("windows"), Platform::Windows);
        assert_eq!(Platform::from_os("linux"), Platform::Unix);
        assert_eq!(Platform::from_os("freebsd"), Platform::Unix);
    }

    #[test]
    fn wsl_probe_does_not_panic() {
        let _ = is_wsl();
    }

    #[tokio::test]
    async fn missing_helper_resolves_to_system_opener() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = unix_ctx(Some(dir.path().to_path_buf()));
        let opener = resolve_fallback_opener(&ctx).await.unwrap();
        assert_eq!(opener, OsString::from(XDG_OPEN));
    }

    #[tokio::test]
    async fn co_located_helper_wins_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let helper = dir.path().join(XDG_OPEN);
        std::fs::write(&helper, "#!/bin/sh\n").unwrap();
        let ctx = unix_ctx(Some(dir.path().to_path_buf()));
        let opener = resolve_fallback_opener(&ctx).await.unwrap();
        assert_eq!(opener, helper.into_os_string());
    }

    #[tokio::test]
    async fn helper_must_be_a_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(XDG_OPEN)).unwrap();
        let ctx = unix_ctx(Some(dir.path().to_path_buf()));
        let opener = resolve_fallback_opener(&ctx).await.unwrap();
        assert_eq!(opener, OsString::from(XDG_OPEN));
    }

    #[tokio::test]
    async fn bundled_context_skips_the_probe() {
        for exe_dir in [None, Some(PathBuf::from("/")), Some(PathBuf::new())] {
            let ctx = unix_ctx(exe_dir);
            assert!(ctx.is_bundled());
            let opener = resolve_fallback_opener(&ctx).await.unwrap();
            assert_eq!(opener, OsString::from(XDG_OPEN));
        }
    }
}
