use std::process::Command;

use tracing::info;

/// Start a fresh copy of the running executable with the same arguments.
pub fn relaunch_current_exe() -> std::io::Result<()> {
    let exe = std::env::current_exe()?;
    info!("Relaunching {}", exe.display());
    Command::new(exe).args(std::env::args_os().skip(1)).spawn()?;
    Ok(())
}
