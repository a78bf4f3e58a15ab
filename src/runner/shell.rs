//! Host shell selection.

use tokio::process::Command;

/// Shell binary and the flag that makes it run a single command line.
pub fn shell_program() -> (&'static str, &'static str) {
    if cfg!(windows) { ("cmd", "/C") } else { ("sh", "-c") }
}

/// Command that runs `line` through the host shell.
pub fn shell_command(line: &str) -> Command {
    let (shell, flag) = shell_program();
    let mut cmd = Command::new(shell);
    cmd.arg(flag);
    // cmd.exe does its own parsing; MSVC-style quoting would mangle the line.
    #[cfg(windows)]
    cmd.raw_arg(line);
    #[cfg(not(windows))]
    cmd.arg(line);
    cmd
}
