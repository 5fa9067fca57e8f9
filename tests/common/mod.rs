//! Test utilities for libuci integration tests.
//!
//! [`ScriptBuilder`] generates a small `/bin/sh` script that plays the role
//! of a UCI engine with canned responses, so the whole stack (process
//! spawn, reader task, buffer, handshake, search parsing) is exercised
//! end-to-end without a real engine. Every command the script receives is
//! appended to a log file the tests can inspect afterwards.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use tempfile::TempDir;

/// A scripted fake engine on disk.
///
/// The temp directory lives as long as this value; keep it alive for the
/// duration of the test.
pub struct FakeEngine {
    _dir: TempDir,
    /// Path to the executable engine script.
    pub binary: PathBuf,
    log: PathBuf,
}

impl FakeEngine {
    /// Every command line the engine has received so far, in order.
    pub fn commands(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

/// Builder for scripted fake engines.
pub struct ScriptBuilder {
    id_name: String,
    declarations: Vec<String>,
    handshake_noise: Vec<String>,
    respond_ready: bool,
    exit_after_handshake: bool,
    go_lines: Vec<String>,
    stop_lines: Vec<String>,
}

impl ScriptBuilder {
    /// A fake engine that completes the handshake and answers `isready`,
    /// with no declared options and no search output.
    pub fn new() -> Self {
        Self {
            id_name: "Scripted 0.1".to_owned(),
            declarations: Vec::new(),
            handshake_noise: Vec::new(),
            respond_ready: true,
            exit_after_handshake: false,
            go_lines: Vec::new(),
            stop_lines: Vec::new(),
        }
    }

    /// Declare an option during the handshake.
    pub fn option(mut self, name: &str, option_type: &str, default: Option<&str>) -> Self {
        let mut declaration = format!("option name {name} type {option_type}");
        if let Some(default) = default {
            declaration.push_str(&format!(" default {default}"));
        }
        self.declarations.push(declaration);
        self
    }

    /// Emit an extra non-declaration line during the handshake.
    pub fn handshake_noise(mut self, line: &str) -> Self {
        self.handshake_noise.push(line.to_owned());
        self
    }

    /// Never answer `isready` (for timeout tests).
    pub fn silent_isready(mut self) -> Self {
        self.respond_ready = false;
        self
    }

    /// Exit immediately after `uciok` (for termination tests).
    pub fn exit_after_handshake(mut self) -> Self {
        self.exit_after_handshake = true;
        self
    }

    /// Lines to emit in response to any `go` command.
    pub fn on_go(mut self, lines: &[&str]) -> Self {
        self.go_lines = lines.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Lines to emit in response to `stop`.
    pub fn on_stop(mut self, lines: &[&str]) -> Self {
        self.stop_lines = lines.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Write the engine script to a temp directory and make it executable.
    pub fn build(self) -> FakeEngine {
        let dir = TempDir::new().expect("create temp dir");
        let log = dir.path().join("commands.log");
        fs::write(&log, "").expect("create command log");
        let binary = dir.path().join("engine.sh");

        let mut handshake = vec![format!("id name {}", self.id_name), "id author libuci tests".to_owned()];
        handshake.extend(self.handshake_noise);
        handshake.extend(self.declarations);
        handshake.push("uciok".to_owned());

        let mut script = String::from("#!/bin/sh\n");
        script.push_str(&format!("log='{}'\n", log.display()));
        script.push_str("while IFS= read -r line; do\n");
        script.push_str("  printf '%s\\n' \"$line\" >> \"$log\"\n");
        script.push_str("  case \"$line\" in\n");

        script.push_str("    uci)\n");
        script.push_str(&emit(&handshake));
        if self.exit_after_handshake {
            script.push_str("      exit 0\n");
        }
        script.push_str("      ;;\n");

        script.push_str("    isready)\n");
        if self.respond_ready {
            script.push_str(&emit(&["readyok".to_owned()]));
        } else {
            script.push_str("      :\n");
        }
        script.push_str("      ;;\n");

        if !self.go_lines.is_empty() {
            script.push_str("    go*)\n");
            script.push_str(&emit(&self.go_lines));
            script.push_str("      ;;\n");
        }

        if !self.stop_lines.is_empty() {
            script.push_str("    stop)\n");
            script.push_str(&emit(&self.stop_lines));
            script.push_str("      ;;\n");
        }

        script.push_str("    quit)\n      exit 0\n      ;;\n");
        script.push_str("    *)\n      ;;\n");
        script.push_str("  esac\ndone\nexit 0\n");

        fs::write(&binary, script).expect("write engine script");
        let mut perms = fs::metadata(&binary).expect("stat engine script").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&binary, perms).expect("chmod engine script");

        FakeEngine {
            _dir: dir,
            binary,
            log,
        }
    }
}

impl Default for ScriptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// One `printf` invocation emitting each line in order.
fn emit(lines: &[String]) -> String {
    let mut out = String::from("      printf '%s\\n'");
    for line in lines {
        assert!(!line.contains('\''), "scripted lines must not contain quotes");
        out.push_str(" '");
        out.push_str(line);
        out.push('\'');
    }
    out.push('\n');
    out
}
