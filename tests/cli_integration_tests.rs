//! End-to-end tests for the statcat binary
//!
//! Every command runs with an isolated working directory and HOME, and with
//! the config and debug environment variables cleared, so a developer's own
//! config files never leak into the results.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Sandbox {
    _root: TempDir,
    work: PathBuf,
    home: PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        let work = root.path().join("work");
        let home = root.path().join("home");
        fs::create_dir_all(&work).unwrap();
        fs::create_dir_all(&home).unwrap();
        Sandbox {
            _root: root,
            work,
            home,
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("statcat").unwrap();
        cmd.current_dir(&self.work)
            .env("HOME", &self.home)
            .env_remove("XDG_CONFIG_HOME")
            .env_remove("STATCAT_CFG")
            .env_remove("STATCAT_DEBUG")
            .env_remove("NO_COLOR");
        cmd
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.work.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_prints_contents_then_stat() {
    let sb = Sandbox::new();
    let file = sb.write("input.txt", "line1\nline2\n");

    let expected_head = format!("File '{}' contents\n  line1\n  line2\n\n", path_str(&file));
    sb.command()
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(expected_head))
        .stdout(predicate::str::contains("\x1b").not())
        .stdout(predicate::str::contains("Size:"));
}

#[test]
fn test_dry_run_shows_command_without_running_it() {
    let sb = Sandbox::new();
    let file = sb.write("input.txt", "line1\nline2\n");

    let expected = format!("File '{}' contents\n  line1\n  line2\n\n", path_str(&file));
    sb.command()
        .arg("--dry-run")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::diff(expected))
        .stderr(predicate::str::contains(format!("stat {}", path_str(&file))));
}

#[test]
fn test_missing_file_is_usage_error() {
    let sb = Sandbox::new();
    sb.command()
        .arg("does-not-exist.txt")
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::starts_with("statcat: "));
}

#[test]
fn test_directory_argument_is_usage_error() {
    let sb = Sandbox::new();
    sb.command().arg(&sb.home).assert().code(2).stdout("");
}

#[test]
fn test_unknown_flag_is_usage_error() {
    let sb = Sandbox::new();
    sb.command().arg("--bogus").assert().code(2).stdout("");
}

#[test]
fn test_invalid_color_flag_is_usage_error() {
    let sb = Sandbox::new();
    let file = sb.write("a.txt", "x\n");
    sb.command()
        .arg("--color=sometimes")
        .arg(&file)
        .assert()
        .code(2);
}

#[test]
fn test_help_and_version() {
    let sb = Sandbox::new();
    sb.command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--generate-cfg"));
    sb.command()
        .arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_reads_stdin() {
    let sb = Sandbox::new();
    sb.command()
        .arg("--dry-run")
        .write_stdin("from stdin\n")
        .assert()
        .success()
        .stdout("File '<stdin>' contents\n  from stdin\n\n")
        .stderr(predicate::str::contains("stat -"));
}

#[test]
fn test_dash_reads_stdin() {
    let sb = Sandbox::new();
    sb.command()
        .args(["--dry-run", "-"])
        .write_stdin("dash\n")
        .assert()
        .success()
        .stdout("File '<stdin>' contents\n  dash\n\n");
}

#[cfg(unix)]
#[test]
fn test_non_utf8_file_name() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let sb = Sandbox::new();
    let file = sb.work.join(OsStr::from_bytes(b"bad\xffname.txt"));
    fs::write(&file, "x\n").unwrap();

    sb.command()
        .arg("--dry-run")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("File '"))
        .stdout(predicate::str::contains("name.txt' contents\n  x\n"));
}

#[test]
fn test_crlf_input_keeps_carriage_returns() {
    let sb = Sandbox::new();
    let file = sb.write("dos.txt", "a\r\nb\r\n");

    sb.command()
        .arg("--dry-run")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::ends_with("  a\r\n  b\r\n\n"));
}

#[test]
fn test_quiet_suppresses_stdout() {
    let sb = Sandbox::new();
    let file = sb.write("a.txt", "secret\n");
    sb.command()
        .args(["-q", "--dry-run"])
        .arg(&file)
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("stat "));
}

#[test]
fn test_color_always_emits_escapes() {
    let sb = Sandbox::new();
    let file = sb.write("a.txt", "x\n");
    sb.command()
        .args(["--color=always", "--dry-run"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b["));
}

#[test]
fn test_bare_color_is_auto_and_off_when_piped() {
    let sb = Sandbox::new();
    let file = sb.write("a.txt", "x\n");
    sb.command()
        .args(["-c", "--dry-run"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b").not());
}

#[test]
fn test_embedded_escapes_stripped_when_color_off() {
    let sb = Sandbox::new();
    let file = sb.write("a.txt", "\x1b[31mred\x1b[0m\n");
    sb.command()
        .args(["--color=never", "--dry-run"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("  red\n"))
        .stdout(predicate::str::contains("\x1b").not());
}

#[test]
fn test_config_in_working_dir_is_applied() {
    let sb = Sandbox::new();
    sb.write(".statcat.toml", "dry_run = true\n");
    let file = sb.write("a.txt", "x\n");

    sb.command()
        .arg(&file)
        .assert()
        .success()
        .stderr(predicate::str::contains(format!("stat {}", path_str(&file))));
}

#[test]
fn test_command_line_overrides_config() {
    let sb = Sandbox::new();
    sb.write(".statcat.toml", "color = \"never\"\ndry_run = true\n");
    let file = sb.write("a.txt", "x\n");

    sb.command()
        .arg("--color=always")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b["));
}

#[test]
fn test_env_override_preempts_working_dir() {
    let sb = Sandbox::new();
    sb.write(".statcat.toml", "quiet = true\n");
    let custom = sb.write("custom/statcat.toml", "dry_run = true\n");
    let file = sb.write("a.txt", "x\n");

    sb.command()
        .env("STATCAT_CFG", &custom)
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("File '"));
}

#[test]
fn test_xdg_config_home_is_searched() {
    let sb = Sandbox::new();
    let xdg = sb.home.join("xdg");
    fs::create_dir_all(xdg.join("statcat")).unwrap();
    fs::write(xdg.join("statcat/config.toml"), "quiet = true\ndry_run = true\n").unwrap();
    let file = sb.write("a.txt", "x\n");

    sb.command()
        .env("XDG_CONFIG_HOME", &xdg)
        .arg(&file)
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_invalid_color_in_config_is_runtime_error() {
    let sb = Sandbox::new();
    sb.write(".statcat.toml", "color = \"sometimes\"\n");
    let file = sb.write("a.txt", "x\n");

    sb.command()
        .arg(&file)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("sometimes"));
}

#[test]
fn test_config_syntax_error() {
    let sb = Sandbox::new();
    sb.write(".statcat.toml", "dry_run = \n");
    let file = sb.write("a.txt", "x\n");

    sb.command()
        .arg(&file)
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains(".statcat.toml"));
}

#[test]
fn test_invalid_palette_entries_are_ignored() {
    let sb = Sandbox::new();
    let file = sb.write("a.txt", "x\n");

    sb.command()
        .args([
            "--dry-run",
            "--palette=footer=red",
            "--palette=header=not-a-color",
        ])
        .arg(&file)
        .assert()
        .success();
}

#[test]
fn test_generate_cfg_writes_defaults_once() {
    let sb = Sandbox::new();
    let target = sb.home.join(".config/statcat/config.toml");

    sb.command()
        .arg("--generate-cfg")
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("config.toml"));

    let written = fs::read_to_string(&target).unwrap();
    assert!(written.contains("color = \"auto\""));
    assert!(written.contains("[palette]"));

    sb.command()
        .arg("--generate-cfg")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_verbose_and_debug_diagnostics() {
    let sb = Sandbox::new();
    let file = sb.write("a.txt", "x\n");

    sb.command()
        .env("STATCAT_DEBUG", "1")
        .args(["-v", "--dry-run"])
        .arg(&file)
        .assert()
        .success()
        .stderr(predicate::str::contains("statcat: config: none found"))
        .stderr(predicate::str::contains("statcat: debug:"))
        .stderr(predicate::str::contains("[palette]"));
}
