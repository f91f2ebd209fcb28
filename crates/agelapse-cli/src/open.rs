use std::io;
use std::path::Path;
use std::process::Command;

/// Open a file with the desktop's default application.
pub fn open_path(path: &Path) -> io::Result<()> {
    let status = opener_command(path).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("opener exited with {status}")))
    }
}

#[cfg(target_os = "windows")]
fn opener_command(path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(path);
    cmd
}

#[cfg(target_os = "macos")]
fn opener_command(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn opener_command(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}
