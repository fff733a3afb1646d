use anyhow::Result;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

pub const LIST_DISK: &str = "\
Microsoft DiskPart version 10.0.22621.1

  0    476    0    Gpt
  1    14     14   Mbr
  2    931    100  Gpt
";

pub const LIST_PARTITION: &str = "\
  1    System    100
  2    Reserved  16
  3    Primary   475
";

pub const DETAIL_PARTITION: &str = "\
Partition 3
Type    : ebd0a0a2-b9e5-4433-87c0-68b6b72699c7
Hidden  : No
Volume Label : Windows
";

pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandOutput {
    /// The single JSON event expected on stdout.
    pub fn event(&self) -> Result<serde_json::Value> {
        let line = self
            .stdout
            .lines()
            .last()
            .ok_or_else(|| anyhow::anyhow!("no output; stderr: {}", self.stderr))?;
        Ok(serde_json::from_str(line)?)
    }
}

/// Scratch directory holding a fake partitioning utility and its config.
pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let env = Self {
            temp_dir: tempfile::tempdir()?,
        };
        fs::create_dir(env.script_dir())?;
        env.write_config("")?;
        Ok(env)
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn script_dir(&self) -> PathBuf {
        self.path().join("scripts")
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("config.toml")
    }

    pub fn utility_path(&self) -> PathBuf {
        self.path().join("fake-diskpart")
    }

    /// Copy of the last command script the utility received.
    pub fn last_script(&self) -> Result<String> {
        Ok(fs::read_to_string(self.path().join("last-script"))?)
    }

    /// Where the last command script lived while the utility ran.
    pub fn last_script_path(&self) -> Result<PathBuf> {
        let raw = fs::read_to_string(self.path().join("last-script-path"))?;
        Ok(PathBuf::from(raw.trim()))
    }

    /// Writes the config, always pointing command scripts at `script_dir`.
    pub fn write_config(&self, extra: &str) -> Result<()> {
        let contents = format!("script_dir = {:?}\n{}", self.script_dir(), extra);
        fs::write(self.config_path(), contents)?;
        Ok(())
    }

    /// Installs a utility that answers each command batch with a canned report.
    pub fn install_utility(&self) -> Result<()> {
        let body = format!(
            r#"case "$(cat "$2")" in
  *"detail partition"*) cat <<'EOF'
{DETAIL_PARTITION}EOF
  ;;
  *"list partition"*) cat <<'EOF'
{LIST_PARTITION}EOF
  ;;
  *"list disk"*) cat <<'EOF'
{LIST_DISK}EOF
  ;;
esac"#
        );
        self.install_script(&body)
    }

    /// Installs a utility that only complains on stderr.
    pub fn install_failing_utility(&self) -> Result<()> {
        self.install_script("echo 'Virtual Disk Service error: access denied' >&2")
    }

    fn install_script(&self, body: &str) -> Result<()> {
        let dir = self.path().display();
        let script = format!(
            "#!/bin/sh\ncp \"$2\" \"{dir}/last-script\"\necho \"$2\" > \"{dir}/last-script-path\"\n{body}\n"
        );
        let path = self.utility_path();
        fs::write(&path, script)?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        Ok(())
    }

    /// Runs the binary against this environment's utility and config.
    pub fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = Command::new(env!("CARGO_BIN_EXE_diskmenu"))
            .arg("--no-elevate")
            .arg("--no-color")
            .arg("--config")
            .arg(self.config_path())
            .arg("--utility")
            .arg(self.utility_path())
            .args(args)
            .output()?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }
}
