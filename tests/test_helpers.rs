#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;

/// Creates a `Command` for the `daybook` binary with a clean, non-interactive
/// environment storing its data in `data_dir`.
pub fn base_daybook_command(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("daybook").expect("daybook binary not built");
    configure_daybook_command(&mut cmd, data_dir);
    cmd
}

/// Applies the standard non-interactive environment to an existing `Command`.
pub fn configure_daybook_command(cmd: &mut Command, data_dir: &Path) {
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
        cmd.env("PATH", path);
    }
    if let Ok(tmpdir) = std::env::var("TMPDIR") {
        cmd.env("TMPDIR", tmpdir);
    }
    cmd.env("HOME", data_dir)
        .env("DAYBOOK_DIR", data_dir)
        // Fails loudly if a test reaches the editor unintentionally
        .env("DAYBOOK_EDITOR", "false");
}

/// Writes an executable editor script that appends `answer` to the file it is given.
#[cfg(unix)]
pub fn create_answering_editor(dir: &Path, answer: &str) -> String {
    use std::os::unix::fs::PermissionsExt;

    let script_path = dir.join("answering_editor.sh");
    let content = format!("#!/bin/sh\nprintf '%s\\n' '{}' >> \"$1\"\n", answer);
    fs::write(&script_path, content).expect("write editor script");
    let mut perms = fs::metadata(&script_path)
        .expect("editor script metadata")
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&script_path, perms).expect("make editor script executable");
    script_path.to_str().expect("utf-8 path").to_string()
}
