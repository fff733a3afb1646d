use anyhow::Result;

use crate::ui::prelude::*;

/// Added to the relaunched command line so an elevated child never relaunches again.
#[cfg_attr(not(windows), allow(dead_code))]
const NO_ELEVATE_FLAG: &str = "--no-elevate";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elevation {
    Elevated,
    NotElevated,
    /// The check itself failed
    #[cfg_attr(unix, allow(dead_code))]
    Unknown,
}

/// Anything short of a confirmed elevated state asks for a relaunch.
pub fn needs_relaunch(state: Elevation) -> bool {
    !matches!(state, Elevation::Elevated)
}

/// Restarts the current process with administrator rights unless it already has them.
///
/// On Unix this re-executes through sudo and does not return for a plain
/// user. On Windows the elevated copy is started through the UAC prompt and
/// this process exits; if the prompt is refused we keep running unelevated.
pub fn ensure_elevated() -> Result<()> {
    let state = current_elevation();
    emit(
        Level::Debug,
        "privileges.state",
        &format!("Elevation state: {:?}", state),
        None,
    );
    if needs_relaunch(state) {
        relaunch_elevated()?;
    }
    Ok(())
}

#[cfg(unix)]
fn current_elevation() -> Elevation {
    match sudo::check() {
        sudo::RunningAs::Root | sudo::RunningAs::Suid => Elevation::Elevated,
        sudo::RunningAs::User => Elevation::NotElevated,
    }
}

#[cfg(unix)]
fn relaunch_elevated() -> Result<()> {
    sudo::with_env(&["RUST_BACKTRACE", "RUST_LOG"])
        .map_err(|e| anyhow::anyhow!("Failed to escalate privileges: {}", e))?;
    Ok(())
}

#[cfg(windows)]
fn current_elevation() -> Elevation {
    windows::token_elevation()
}

#[cfg(windows)]
fn relaunch_elevated() -> Result<()> {
    let exe = std::env::current_exe()
        .map_err(|e| anyhow::anyhow!("Failed to get current executable: {}", e))?;
    let params = relaunch_parameters(std::env::args().skip(1));
    if windows::run_as_admin(&exe, &params) {
        std::process::exit(0);
    }
    emit(
        Level::Warn,
        "privileges.relaunch.failed",
        "Could not restart with administrator rights; continuing without them",
        None,
    );
    Ok(())
}

#[cfg(not(any(unix, windows)))]
fn current_elevation() -> Elevation {
    Elevation::Unknown
}

#[cfg(not(any(unix, windows)))]
fn relaunch_elevated() -> Result<()> {
    emit(
        Level::Warn,
        "privileges.unsupported",
        "Elevation is not supported on this platform",
        None,
    );
    Ok(())
}

/// Builds the Windows command line for the elevated copy.
#[cfg_attr(not(windows), allow(dead_code))]
fn relaunch_parameters(args: impl Iterator<Item = String>) -> String {
    args.chain(std::iter::once(NO_ELEVATE_FLAG.to_string()))
        .map(|arg| quote_windows_arg(&arg))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg_attr(not(windows), allow(dead_code))]
fn quote_windows_arg(arg: &str) -> String {
    if !arg.is_empty() && !arg.contains([' ', '\t', '"']) {
        return arg.to_string();
    }
    format!("\"{}\"", arg.replace('"', "\\\""))
}

#[cfg(windows)]
mod windows {
    use super::Elevation;
    use std::ffi::OsStr;
    use std::mem;
    use std::os::windows::ffi::OsStrExt;
    use std::path::Path;
    use std::ptr;
    use winapi::um::handleapi::CloseHandle;
    use winapi::um::processthreadsapi::{GetCurrentProcess, OpenProcessToken};
    use winapi::um::securitybaseapi::GetTokenInformation;
    use winapi::um::shellapi::ShellExecuteW;
    use winapi::um::winnt::{HANDLE, TOKEN_ELEVATION, TOKEN_QUERY, TokenElevation};
    use winapi::um::winuser::SW_SHOWNORMAL;

    fn wide(s: &OsStr) -> Vec<u16> {
        s.encode_wide().chain(std::iter::once(0)).collect()
    }

    pub fn token_elevation() -> Elevation {
        let mut token: HANDLE = ptr::null_mut();
        unsafe {
            if OpenProcessToken(GetCurrentProcess(), TOKEN_QUERY, &mut token) == 0 {
                return Elevation::Unknown;
            }
            let mut elevation: TOKEN_ELEVATION = mem::zeroed();
            let mut returned = 0u32;
            let ok = GetTokenInformation(
                token,
                TokenElevation,
                &mut elevation as *mut TOKEN_ELEVATION as *mut _,
                mem::size_of::<TOKEN_ELEVATION>() as u32,
                &mut returned,
            );
            CloseHandle(token);
            if ok == 0 {
                Elevation::Unknown
            } else if elevation.TokenIsElevated != 0 {
                Elevation::Elevated
            } else {
                Elevation::NotElevated
            }
        }
    }

    /// Starts `exe` through the "runas" verb. False when refused or failed.
    pub fn run_as_admin(exe: &Path, params: &str) -> bool {
        let verb = wide(OsStr::new("runas"));
        let file = wide(exe.as_os_str());
        let params = wide(OsStr::new(params));
        let result = unsafe {
            ShellExecuteW(
                ptr::null_mut(),
                verb.as_ptr(),
                file.as_ptr(),
                params.as_ptr(),
                ptr::null(),
                SW_SHOWNORMAL,
            )
        };
        // ShellExecuteW reports success with a value above 32
        result as isize > 32
    }
}
