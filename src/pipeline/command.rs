// src/pipeline/command.rs

use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::errors::{BuildwatchError, Result};

/// Run one external tool invocation to completion.
///
/// Stdout is logged at debug, stderr at warn (compilers put diagnostics
/// there). A spawn failure or non-zero exit becomes a `Compile` error
/// attributed to `pipeline`; the caller decides whether that is fatal.
pub async fn run_tool(pipeline: &str, program: &str, args: &[String]) -> Result<()> {
    info!(pipeline = %pipeline, %program, ?args, "running tool");

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd.spawn().map_err(|err| {
        BuildwatchError::compile(pipeline, format!("spawning {program}: {err}"))
    })?;

    if let Some(stdout) = child.stdout.take() {
        let name = pipeline.to_string();
        tokio::spawn(async move {
            let reader = BufReader::new(stdout);
            let mut lines = reader.lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!(pipeline = %name, "stdout: {}", line);
            }
        });
    }

    // Always consume stderr so buffers don't fill.
    if let Some(stderr) = child.stderr.take() {
        let name = pipeline.to_string();
        tokio::spawn(async move {
            let reader = BufReader::new(stderr);
            let mut lines = reader.lines();
            while let Ok(Some(line)) = lines.next_line().await {
                warn!(pipeline = %name, "stderr: {}", line);
            }
        });
    }

    let status = child.wait().await.map_err(|err| {
        BuildwatchError::compile(pipeline, format!("waiting for {program}: {err}"))
    })?;

    if !status.success() {
        let code = status.code().unwrap_or(-1);
        return Err(BuildwatchError::compile(
            pipeline,
            format!("{program} exited with code {code}"),
        ));
    }

    debug!(pipeline = %pipeline, %program, "tool finished");
    Ok(())
}
