use crate::domain::ports::Researcher;
use crate::utils::error::{EnrichError, Result};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Marker in agent output that means the account ran out of quota; the
/// reply is useless even with a zero exit code.
const QUOTA_MARKER: &str = "credit";

/// Research agent backed by the local `claude` CLI with web search enabled.
///
/// One request/response exchange per query, bounded by a hard wall-clock
/// timeout. Queries involve live web search, so the default is on the order
/// of minutes, not seconds.
pub struct ClaudeCli {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ClaudeCli {
    pub fn new(timeout: Duration) -> Self {
        Self::with_program(
            "claude",
            [
                "--print",
                "--allowed-tools",
                "WebSearch",
                "--permission-mode",
                "bypassPermissions",
                "--debug",
                "!hooks",
            ],
            timeout,
        )
    }

    fn with_program<I, S>(program: &str, args: I, timeout: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            timeout,
        }
    }

    async fn invoke(&self, query: &str) -> Result<std::process::Output> {
        // kill_on_drop：超時放棄等待時，也要把子行程殺掉
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| agent_error(format!("failed to launch agent: {}", e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(query.as_bytes())
                .await
                .map_err(|e| agent_error(format!("failed to write query: {}", e)))?;
            // Dropping stdin closes the pipe so the agent sees EOF.
        }

        match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(output) => output.map_err(|e| agent_error(format!("failed to collect output: {}", e))),
            Err(_) => Err(agent_error(format!("timeout after {:?}", self.timeout))),
        }
    }
}

#[async_trait]
impl Researcher for ClaudeCli {
    async fn research(&self, query: &str) -> Result<String> {
        let output = self.invoke(query).await?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        // 統一失敗條件：非零退出、空輸出、額度耗盡
        let reason = if !output.status.success() {
            Some(format!("non-zero exit ({})", output.status))
        } else if stdout.is_empty() {
            Some("empty output".to_string())
        } else if stdout.to_lowercase().contains(QUOTA_MARKER) {
            Some("quota marker in output".to_string())
        } else {
            None
        };

        if let Some(reason) = reason {
            tracing::warn!("⚠️  Research agent error: {}", reason);
            if !stderr.is_empty() {
                tracing::warn!("     stderr: {}", truncate(&stderr, 200));
            }
            if !stdout.is_empty() {
                tracing::warn!("     stdout: {}", truncate(&stdout, 200));
            }
            return Err(EnrichError::ResearchError { message: reason });
        }

        Ok(stdout)
    }
}

fn agent_error(message: String) -> EnrichError {
    tracing::warn!("⚠️  Research agent error: {}", message);
    EnrichError::ResearchError { message }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell(script: &str, timeout: Duration) -> ClaudeCli {
        ClaudeCli::with_program("sh", ["-c", script], timeout)
    }

    #[tokio::test]
    async fn test_successful_invocation_returns_trimmed_output() {
        let agent = shell(
            "cat >/dev/null; echo; echo 'https://example.com/report'; echo",
            Duration::from_secs(5),
        );

        let result = agent.research("find it").await.unwrap();
        assert_eq!(result, "https://example.com/report");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_failure() {
        let agent = shell("cat >/dev/null; echo output; exit 3", Duration::from_secs(5));
        assert!(agent.research("find it").await.is_err());
    }

    #[tokio::test]
    async fn test_empty_output_is_failure() {
        let agent = shell("cat >/dev/null; exit 0", Duration::from_secs(5));
        assert!(agent.research("find it").await.is_err());
    }

    #[tokio::test]
    async fn test_quota_marker_is_failure() {
        let agent = shell(
            "cat >/dev/null; echo 'You are out of credits.'",
            Duration::from_secs(5),
        );
        assert!(agent.research("find it").await.is_err());
    }

    #[tokio::test]
    async fn test_timeout_is_failure() {
        let agent = shell("sleep 30", Duration::from_millis(200));

        let started = std::time::Instant::now();
        assert!(agent.research("find it").await.is_err());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_missing_binary_is_failure() {
        let agent =
            ClaudeCli::with_program("definitely-not-a-real-binary", ["--print"], Duration::from_secs(1));
        assert!(agent.research("find it").await.is_err());
    }
}
