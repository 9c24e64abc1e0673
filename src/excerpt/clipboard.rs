use crate::error::{ExcerptError, Result};
use std::process::{Command, Output};

/// Reads text from the system clipboard in an OS-specific way.
/// - macOS: uses pbpaste
/// - Linux: uses xclip or xsel
/// - Windows: uses PowerShell's Get-Clipboard
pub fn read_from_clipboard() -> Result<String> {
    #[cfg(target_os = "macos")]
    {
        paste_macos()
    }

    #[cfg(target_os = "linux")]
    {
        paste_linux()
    }

    #[cfg(target_os = "windows")]
    {
        paste_windows()
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        Err(ExcerptError::Clipboard(
            "Clipboard not supported on this platform".to_string(),
        ))
    }
}

fn clipboard_text(tool: &str, output: Output) -> Result<String> {
    if !output.status.success() {
        return Err(ExcerptError::Clipboard(format!(
            "{} exited with error",
            tool
        )));
    }
    String::from_utf8(output.stdout)
        .map_err(|_| ExcerptError::Clipboard("Clipboard does not hold UTF-8 text".to_string()))
}

#[cfg(target_os = "macos")]
fn paste_macos() -> Result<String> {
    let output = Command::new("pbpaste")
        .output()
        .map_err(|e| ExcerptError::Clipboard(format!("Failed to run pbpaste: {}", e)))?;
    clipboard_text("pbpaste", output)
}

#[cfg(target_os = "linux")]
fn paste_linux() -> Result<String> {
    // Try xclip first, then xsel
    match Command::new("xclip")
        .args(["-selection", "clipboard", "-o"])
        .output()
    {
        Ok(output) => clipboard_text("xclip", output),
        Err(_) => {
            let output = Command::new("xsel")
                .args(["--clipboard", "--output"])
                .output()
                .map_err(|e| {
                    ExcerptError::Clipboard(format!(
                        "Failed to run xclip or xsel: {}. Install xclip or xsel.",
                        e
                    ))
                })?;
            clipboard_text("xsel", output)
        }
    }
}

#[cfg(target_os = "windows")]
fn paste_windows() -> Result<String> {
    let output = Command::new("powershell")
        .args(["-NoProfile", "-Command", "Get-Clipboard -Raw"])
        .output()
        .map_err(|e| ExcerptError::Clipboard(format!("Failed to run powershell: {}", e)))?;
    // PowerShell appends a CRLF and uses CRLF line endings throughout.
    let text = clipboard_text("powershell", output)?;
    Ok(normalize_line_endings(text.strip_suffix("\r\n").unwrap_or(&text)))
}

/// Books excerpts use `\n`; clipboards on some platforms hand back `\r\n`.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize_line_endings("a\r\nb\r\n"), "a\nb\n");
        assert_eq!(normalize_line_endings("a\nb"), "a\nb");
    }
}
