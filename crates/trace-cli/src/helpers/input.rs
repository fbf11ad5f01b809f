//! Input handling helpers for credentials and entry body reading.

use std::io::{self, IsTerminal, Read};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use dialoguer::{Input, Password};
use zeroize::Zeroizing;

use crate::constants::env_vars;

/// A username (or email) and password pair.
pub struct Credentials {
    pub username: String,
    pub password: Zeroizing<String>,
}

/// Credentials from `TRACE_USERNAME` and `TRACE_PASSWORD`, when both are set.
pub fn credentials_from_env() -> Option<Credentials> {
    let username = std::env::var(env_vars::USERNAME)
        .ok()
        .filter(|v| !v.trim().is_empty())?;
    let password = std::env::var(env_vars::PASSWORD)
        .ok()
        .filter(|v| !v.is_empty())?;
    Some(Credentials {
        username,
        password: Zeroizing::new(password),
    })
}

/// Prompt for credentials on the terminal.
///
/// `confirm` asks for the password twice, as registration does.
pub fn prompt_credentials(
    interactive: bool,
    user_label: &str,
    confirm: bool,
) -> anyhow::Result<Credentials> {
    if !interactive {
        return Err(anyhow::anyhow!(
            "No credentials provided and no TTY available. Set {} and {}.",
            env_vars::USERNAME,
            env_vars::PASSWORD
        ));
    }
    let username: String = Input::new()
        .with_prompt(user_label)
        .interact_text()
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", user_label.to_lowercase(), e))?;

    let mut prompt = Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    let password = prompt
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))?;

    Ok(Credentials {
        username,
        password: Zeroizing::new(password),
    })
}

/// Read entry body from --body flag, stdin, or $EDITOR.
///
/// `initial_body` seeds the editor so an existing entry can be revised.
/// Returns `None` when stdin was empty, leaving the body unchanged.
pub fn read_entry_body(
    no_input: bool,
    body: Option<String>,
    editor_override: Option<&str>,
    initial_body: &str,
) -> anyhow::Result<Option<String>> {
    if let Some(value) = body {
        return Ok(Some(value));
    }

    if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        let trimmed = buffer.trim_end();
        return Ok((!trimmed.is_empty()).then(|| trimmed.to_string()));
    }

    if no_input {
        return Err(anyhow::anyhow!(
            "--no-input requires --body or content from stdin"
        ));
    }

    read_body_from_editor(editor_override, initial_body).map(Some)
}

/// Open $EDITOR to compose entry body.
fn read_body_from_editor(
    editor_override: Option<&str>,
    initial_body: &str,
) -> anyhow::Result<String> {
    let editor = editor_override
        .map(|value| value.to_string())
        .or_else(|| std::env::var("EDITOR").ok())
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            anyhow::anyhow!("$EDITOR is not set; use --body or pipe content via stdin")
        })?;

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| anyhow::anyhow!("System time error: {}", e))?
        .as_nanos();
    let filename = format!("trace_entry_{}_{}.md", std::process::id(), nanos);
    let path = std::env::temp_dir().join(filename);

    std::fs::write(&path, initial_body)
        .map_err(|e| anyhow::anyhow!("Failed to create temp file: {}", e))?;

    // Editors are often configured with flags, e.g. "code --wait".
    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or_default();
    let status = Command::new(program)
        .args(parts)
        .arg(&path)
        .status()
        .map_err(|e| anyhow::anyhow!("Failed to launch editor: {}", e))?;
    if !status.success() {
        let _ = std::fs::remove_file(&path);
        return Err(anyhow::anyhow!("Editor exited with failure"));
    }

    let contents = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read editor output: {}", e));
    let _ = std::fs::remove_file(&path);
    Ok(contents?.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_flag_wins() {
        let body = read_entry_body(true, Some("From flag".into()), None, "old").unwrap();
        assert_eq!(body.as_deref(), Some("From flag"));
    }

    #[test]
    fn test_prompt_without_tty_fails() {
        let result = prompt_credentials(false, "Username", false);
        let err = result.err().unwrap();
        assert!(err.to_string().contains("TRACE_USERNAME"));
    }
}
