use crate::error::{CodepasteError, Result};
#[cfg(any(target_os = "macos", target_os = "linux", target_os = "windows"))]
use std::process::Command;

/// Somewhere to put copied text.
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// The OS clipboard, reached through the platform's copy tool.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        copy_to_clipboard(text)
    }
}

/// Clipboard held in memory, for tests and headless use.
#[derive(Debug, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
    available: bool,
}

impl Default for MemoryClipboard {
    fn default() -> Self {
        Self {
            contents: None,
            available: true,
        }
    }
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that refuses every copy, like a denied permission.
    pub fn unavailable() -> Self {
        Self {
            contents: None,
            available: false,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        if !self.available {
            return Err(CodepasteError::ClipboardUnavailable(
                "clipboard access denied".to_string(),
            ));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Copies text to the system clipboard in an OS-specific way.
/// - macOS: uses pbcopy
/// - Linux: uses xclip or xsel
/// - Windows: uses clip.exe
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        pipe_to(Command::new("pbcopy"), "pbcopy", text)
    }

    #[cfg(target_os = "linux")]
    {
        let mut xclip = Command::new("xclip");
        xclip.args(["-selection", "clipboard"]);
        match pipe_to(xclip, "xclip", text) {
            Ok(()) => Ok(()),
            Err(_) => {
                let mut xsel = Command::new("xsel");
                xsel.args(["--clipboard", "--input"]);
                pipe_to(xsel, "xsel", text)
            }
        }
    }

    #[cfg(target_os = "windows")]
    {
        pipe_to(Command::new("clip"), "clip", text)
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        let _ = text;
        Err(CodepasteError::ClipboardUnavailable(
            "clipboard not supported on this platform".to_string(),
        ))
    }
}

#[cfg(any(target_os = "macos", target_os = "linux", target_os = "windows"))]
fn pipe_to(mut command: Command, name: &str, text: &str) -> Result<()> {
    use std::io::Write;
    use std::process::Stdio;

    let unavailable = |what: &str, e: &dyn std::fmt::Display| {
        CodepasteError::ClipboardUnavailable(format!("{} {}: {}", what, name, e))
    };

    let mut child = command
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| unavailable("failed to spawn", &e))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| unavailable("failed to write to", &e))?;
    }

    let status = child
        .wait()
        .map_err(|e| unavailable("failed to wait for", &e))?;

    if status.success() {
        Ok(())
    } else {
        Err(CodepasteError::ClipboardUnavailable(format!(
            "{} exited with {}",
            name, status
        )))
    }
}
