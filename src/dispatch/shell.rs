use std::process::{Command, Stdio};

use super::DispatchOutcome;
use crate::error::NavError;
use crate::{log_debug, log_debug_content};

/// Run `command` through `sh -c` and capture what it printed.
///
/// Blocks the caller until the command exits. stdout is returned on success,
/// stderr on a non-zero exit, and a spawn failure becomes error text.
pub fn run_shell(command: &str) -> DispatchOutcome {
    let output = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .output();
    let output = match output {
        Ok(output) => output,
        Err(err) => {
            log_debug(&format!("failed to spawn shell action: {err}"));
            return DispatchOutcome::Failed(NavError::ActionExecution(err.to_string()).to_string());
        }
    };

    if output.status.success() {
        let text = clean_output(&output.stdout);
        log_debug_content(&format!("shell action '{command}' -> {text:?}"));
        DispatchOutcome::Output(text)
    } else {
        let code = output
            .status
            .code()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".to_string());
        log_debug(&format!("shell action exited with {code}"));
        DispatchOutcome::Failed(clean_output(&output.stderr))
    }
}

/// Captured bytes as display text: escapes stripped, trailing whitespace dropped.
fn clean_output(bytes: &[u8]) -> String {
    let stripped = strip_ansi_escapes::strip(bytes);
    String::from_utf8_lossy(&stripped).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_returns_stdout() {
        assert_eq!(
            run_shell("echo hello"),
            DispatchOutcome::Output("hello".to_string())
        );
    }

    #[test]
    fn failure_returns_stderr() {
        assert_eq!(
            run_shell("echo oops >&2; exit 3"),
            DispatchOutcome::Failed("oops".to_string())
        );
    }

    #[test]
    fn unknown_command_reports_stderr_text() {
        let outcome = run_shell("definitely-not-a-real-command-panelnav");
        match outcome {
            DispatchOutcome::Failed(text) => assert!(text.contains("not found")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn ansi_escapes_are_stripped() {
        assert_eq!(
            run_shell("printf '\\033[1mbold\\033[0m\\n'"),
            DispatchOutcome::Output("bold".to_string())
        );
    }
}
