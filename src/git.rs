//! Subprocess-backed access to the upstream git repository
//!
//! Everything goes through the real `git` executable: clone, tag listing and
//! checkout. The pipeline only needs the three operations of [`VcsClient`],
//! so tests can drive it with a fake client and never touch a subprocess or
//! the network.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::echo::Echo;
use crate::error::{Result, VendorError};

/// The narrow revision-control capability the pipeline depends on
pub trait VcsClient {
    /// Clone the remote into the local path if absent, then fetch all tags.
    /// Safe to call on every run.
    fn ensure_local(&self) -> Result<()>;

    /// List all tag names in the local repository
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Move the local working tree to the snapshot of `tag`
    fn checkout(&self, tag: &str) -> Result<()>;
}

/// [`VcsClient`] backed by the `git` executable
pub struct GitCli {
    program: PathBuf,
    remote_url: String,
    local_path: PathBuf,
    echo: Echo,
}

impl GitCli {
    /// Locate `git` on PATH and bind it to one remote and local path
    ///
    /// A missing executable is fatal and reported as [`VendorError::ToolMissing`].
    pub fn locate(remote_url: &str, local_path: PathBuf, echo: Echo) -> Result<Self> {
        let program = which::which("git").map_err(|_| VendorError::ToolMissing {
            tool: "git".to_string(),
        })?;

        Ok(Self {
            program,
            remote_url: remote_url.to_string(),
            local_path,
            echo,
        })
    }

    /// Probe the executable once before any real work
    pub fn version(&self) -> Result<()> {
        self.run(&["version"])
    }

    fn run(&self, args: &[&str]) -> Result<()> {
        self.echo.run(&render_command("git", args));

        let status = self
            .command(args)
            .status()
            .map_err(|e| self.spawn_error(args, e))?;

        if !status.success() {
            return Err(VendorError::CommandFailed {
                command: render_command("git", args),
                code: status.code(),
            });
        }
        Ok(())
    }

    fn run_captured(&self, args: &[&str]) -> Result<Vec<u8>> {
        self.echo.run(&render_command("git", args));

        let output = self
            .command(args)
            .output()
            .map_err(|e| self.spawn_error(args, e))?;

        if !output.status.success() {
            return Err(VendorError::CommandFailed {
                command: render_command("git", args),
                code: output.status.code(),
            });
        }
        Ok(output.stdout)
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        cmd
    }

    fn spawn_error(&self, args: &[&str], err: std::io::Error) -> VendorError {
        // PATH lookup already succeeded, but the binary can still vanish
        // between runs of the same process.
        if err.kind() == std::io::ErrorKind::NotFound {
            VendorError::ToolMissing {
                tool: "git".to_string(),
            }
        } else {
            VendorError::CommandFailed {
                command: render_command("git", args),
                code: None,
            }
        }
    }

    fn local_path_str(&self) -> String {
        self.local_path.display().to_string()
    }
}

impl VcsClient for GitCli {
    fn ensure_local(&self) -> Result<()> {
        if !self.local_path.exists() {
            self.run(&["clone", &self.remote_url, &self.local_path_str()])?;
        }
        self.run(&["-C", &self.local_path_str(), "fetch", "--tags"])
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let stdout = self.run_captured(&["-C", &self.local_path_str(), "tag"])?;
        let listing = String::from_utf8_lossy(&stdout);

        Ok(listing
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    fn checkout(&self, tag: &str) -> Result<()> {
        let target = format!("tags/{tag}");
        self.run(&["-C", &self.local_path_str(), "checkout", &target])
    }
}

/// Render a command line for echo and error messages, quoting where needed
fn render_command(program: &str, args: &[&str]) -> String {
    let mut rendered = String::from(program);
    for arg in args {
        rendered.push(' ');
        rendered.push_str(&quote_arg(arg));
    }
    rendered
}

fn quote_arg(arg: &str) -> String {
    let needs_quoting = arg.is_empty()
        || arg
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '\'' | '"' | '$' | '`' | '\\'));

    if needs_quoting {
        format!("'{}'", arg.replace('\'', "'\\''"))
    } else {
        arg.to_string()
    }
}

/// Path of the upstream checkout under `work_dir`
pub fn checkout_dir(work_dir: &Path) -> PathBuf {
    work_dir.join(crate::config::CPYTHON_DIR_NAME)
}
