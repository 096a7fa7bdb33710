use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Writes a stand-in loudgain that appends its working directory and
/// arguments, one per line, to `log`, then exits with `exit_code`.
pub fn fake_loudgain(dir: &Path, log: &Path, exit_code: i32) -> PathBuf {
    let script = dir.join("loudgain");
    fs::write(
        &script,
        format!(
            "#!/bin/sh\n{{ echo \"cwd=$(pwd -P)\"; for a in \"$@\"; do echo \"arg=$a\"; done; echo ---; }} >> '{}'\nexit {}\n",
            log.display(),
            exit_code
        ),
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    script
}

pub fn touch(dir: &Path, names: &[&str]) {
    fs::create_dir_all(dir).unwrap();
    for name in names {
        fs::write(dir.join(name), b"").unwrap();
    }
}

/// Splits the log into one `Vec` of lines per invocation
pub fn read_calls(log: &Path) -> Vec<Vec<String>> {
    let content = fs::read_to_string(log).unwrap_or_default();
    content
        .split("---\n")
        .filter(|call| !call.is_empty())
        .map(|call| call.lines().map(str::to_owned).collect())
        .collect()
}
