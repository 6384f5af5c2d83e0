use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};

use crate::model::{ChangedPath, Checkpoint, ResetMode};

use super::Vcs;
use super::parse::{LOG_FORMAT, parse_branch_list, parse_log, parse_status};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

struct GitOutput {
    success: bool,
    stdout: String,
    stderr: String,
}

/// `Vcs` backed by the `git` executable, run inside `root`.
#[derive(Clone, Debug)]
pub struct GitCli {
    root: PathBuf,
    timeout: Duration,
    remote: Option<String>,
    branch: Option<String>,
}

impl GitCli {
    pub fn new(root: &Path, timeout: Duration) -> Self {
        Self {
            root: root.to_path_buf(),
            timeout,
            remote: None,
            branch: None,
        }
    }

    pub fn with_pull_target(mut self, remote: Option<String>, branch: Option<String>) -> Self {
        self.remote = remote;
        self.branch = branch;
        self
    }

    /// Fails unless `root` is inside a git working tree.
    pub fn ensure_repository(&self) -> Result<()> {
        let out = self.run(&["rev-parse", "--is-inside-work-tree"])?;
        if !out.success || out.stdout.trim() != "true" {
            bail!("{} is not inside a git working tree", self.root.display());
        }
        Ok(())
    }

    fn has_commits(&self) -> Result<bool> {
        Ok(self.run(&["rev-parse", "--verify", "--quiet", "HEAD"])?.success)
    }

    fn run(&self, args: &[&str]) -> Result<GitOutput> {
        tracing::debug!(args = ?args, "git");
        let mut child = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context("spawn git")?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let start = Instant::now();
        let status = loop {
            if let Some(status) = child.try_wait().context("wait for git")? {
                break status;
            }
            if start.elapsed() > self.timeout {
                let _ = child.kill();
                let _ = child.wait();
                bail!(
                    "git {} timed out after {}s",
                    args.first().unwrap_or(&""),
                    self.timeout.as_secs()
                );
            }
            thread::sleep(POLL_INTERVAL);
        };

        Ok(GitOutput {
            success: status.success(),
            stdout: collect(stdout),
            stderr: collect(stderr),
        })
    }

    /// Runs git and returns stdout, turning a non-zero exit into an error carrying stderr.
    fn git(&self, args: &[&str]) -> Result<String> {
        let out = self.run(args)?;
        if !out.success {
            let detail = out.stderr.trim();
            let detail = if detail.is_empty() {
                out.stdout.trim()
            } else {
                detail
            };
            bail!("git {} failed: {}", args.join(" "), detail);
        }
        Ok(out.stdout)
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    let mut pipe = pipe?;
    Some(thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        buf
    }))
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

impl Vcs for GitCli {
    fn recent(&self, limit: usize) -> Result<Vec<Checkpoint>> {
        if !self.has_commits()? {
            return Ok(Vec::new());
        }
        let n = limit.to_string();
        let out = self.git(&["log", "-n", &n, LOG_FORMAT])?;
        parse_log(&out)
    }

    fn current(&self) -> Result<Checkpoint> {
        if !self.has_commits()? {
            bail!("the repository has no commits yet");
        }
        let out = self.git(&["log", "-n", "1", LOG_FORMAT, "HEAD"])?;
        parse_log(&out)?
            .into_iter()
            .next()
            .context("git log returned no HEAD commit")
    }

    fn lookup(&self, id: &str) -> Result<Option<Checkpoint>> {
        let rev = format!("{}^{{commit}}", id);
        if !self.run(&["rev-parse", "--verify", "--quiet", &rev])?.success {
            return Ok(None);
        }
        let out = self.git(&["log", "-n", "1", LOG_FORMAT, id])?;
        Ok(parse_log(&out)?.into_iter().next())
    }

    fn changed_paths(&self) -> Result<Vec<ChangedPath>> {
        let out = self.git(&["status", "--porcelain"])?;
        Ok(parse_status(&out))
    }

    fn reset(&self, target: &str, mode: ResetMode) -> Result<()> {
        self.git(&["reset", mode.flag(), target])?;
        Ok(())
    }

    fn stash(&self, message: &str) -> Result<()> {
        self.git(&["stash", "push", "--include-untracked", "-m", message])?;
        Ok(())
    }

    fn pull(&self) -> Result<String> {
        let mut args = vec!["pull"];
        if let Some(remote) = self.remote.as_deref() {
            args.push(remote);
            if let Some(branch) = self.branch.as_deref() {
                args.push(branch);
            }
        }
        let out = self.git(&args)?;
        Ok(out.trim().to_string())
    }

    fn create_branch(&self, name: &str, at: &str) -> Result<()> {
        self.git(&["branch", name, at])?;
        Ok(())
    }

    fn branches(&self) -> Result<Vec<String>> {
        let out = self.git(&["branch", "--list", "--format=%(refname:short)"])?;
        Ok(parse_branch_list(&out))
    }

    fn delete_branch(&self, name: &str, force: bool) -> Result<()> {
        let flag = if force { "-D" } else { "-d" };
        self.git(&["branch", flag, name])?;
        Ok(())
    }

    fn checkout_detached(&self, name: &str) -> Result<()> {
        self.git(&["checkout", "--detach", name])?;
        Ok(())
    }
}
