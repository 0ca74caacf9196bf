use std::io::Read as _;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::eval::fingerprint::fingerprint_props;
use crate::foundation::error::{ReelkitError, ReelkitResult};
use crate::render::backend::{RenderBackend, RenderJob, ensure_parent_dir};

static PROPS_FILE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Options for [`CommandBackend`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandBackendOpts {
    /// Renderer executable.
    pub program: PathBuf,
    /// Leading arguments, placed before the composition id.
    pub args: Vec<String>,
    /// Video codec passed as `--codec=<codec>`.
    pub codec: String,
    /// Directory for the temporary props file.
    pub props_dir: PathBuf,
}

impl Default for CommandBackendOpts {
    fn default() -> Self {
        Self {
            program: PathBuf::from("npx"),
            args: vec![
                "remotion".to_owned(),
                "render".to_owned(),
                "src/index.ts".to_owned(),
            ],
            codec: "h264".to_owned(),
            props_dir: std::env::temp_dir(),
        }
    }
}

/// Backend that hands the job to an external renderer process.
///
/// The process is invoked as
/// `<program> <args…> <composition-id> <output> --props=<file> --frames=<first>-<last> --codec=<codec>`
/// and must exit with status zero on success.
#[derive(Clone, Debug, Default)]
pub struct CommandBackend {
    opts: CommandBackendOpts,
}

impl CommandBackend {
    /// Create a backend with `opts`.
    pub fn new(opts: CommandBackendOpts) -> Self {
        Self { opts }
    }

    /// Options in use.
    pub fn opts(&self) -> &CommandBackendOpts {
        &self.opts
    }

    /// Write the job's resolved props to a file no other job shares.
    fn write_props_file(&self, job: &RenderJob) -> ReelkitResult<PathBuf> {
        let fp = fingerprint_props(job.props())?;
        let seq = PROPS_FILE_SEQ.fetch_add(1, Ordering::Relaxed);
        let path = self.opts.props_dir.join(format!(
            "reelkit-props-{:016x}{:016x}-{}-{seq}.json",
            fp.hi,
            fp.lo,
            std::process::id()
        ));
        ensure_parent_dir(&path)?;
        let json = serde_json::to_vec(&job.props().to_json()?)?;
        std::fs::write(&path, json).map_err(|e| {
            ReelkitError::backend(format!(
                "failed to write props file '{}': {e}",
                path.display()
            ))
        })?;
        Ok(path)
    }

    fn run(&self, job: &RenderJob, props_path: &std::path::Path) -> ReelkitResult<()> {
        let first = job.frames.start.0;
        let last = job.frames.end.0 - 1;

        let mut cmd = Command::new(&self.opts.program);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .args(&self.opts.args)
            .arg(job.composition().as_str())
            .arg(&job.output_path)
            .arg(format!("--props={}", props_path.display()))
            .arg(format!("--frames={first}-{last}"))
            .arg(format!("--codec={}", self.opts.codec));

        let mut child = cmd.spawn().map_err(|e| {
            ReelkitError::backend(format!(
                "failed to spawn renderer '{}': {e}",
                self.opts.program.display()
            ))
        })?;

        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| ReelkitError::backend("failed to open renderer stderr (unexpected)"))?;
        // Drain stderr while waiting on the child.
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok::<_, std::io::Error>(stderr_bytes)
        });

        let status = child
            .wait()
            .map_err(|e| ReelkitError::backend(format!("failed to wait for renderer: {e}")))?;
        let stderr_bytes = stderr_drain
            .join()
            .map_err(|_| ReelkitError::backend("renderer stderr drain thread panicked"))?
            .map_err(|e| ReelkitError::backend(format!("renderer stderr read failed: {e}")))?;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(ReelkitError::backend(format!(
                "renderer exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

impl RenderBackend for CommandBackend {
    fn name(&self) -> &'static str {
        "command"
    }

    #[tracing::instrument(skip(self, job), fields(composition = %job.composition()))]
    fn render(&self, job: &RenderJob) -> ReelkitResult<()> {
        if job.frames.is_empty() {
            return Err(ReelkitError::validation("render range must be non-empty"));
        }
        ensure_parent_dir(&job.output_path)?;
        let props_path = self.write_props_file(job)?;
        tracing::debug!(props = %props_path.display(), "spawning renderer");

        let result = self.run(job, &props_path);
        if let Err(e) = std::fs::remove_file(&props_path) {
            tracing::warn!(error = %e, "failed to remove props file");
        }
        result
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/command.rs"]
mod tests;
