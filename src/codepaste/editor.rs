use crate::error::{CodepasteError, Result};
use crate::model::Draft;
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

/// Formats a draft for the editor buffer.
/// Format: title\n\ncode
pub fn to_buffer(draft: &Draft) -> String {
    format!("{}\n\n{}", draft.title, draft.code)
}

/// Parses an editor buffer back into a draft.
/// First line is the title, one blank separator line is skipped, the rest is code.
pub fn from_buffer(buffer: &str) -> Draft {
    let (title, rest) = match buffer.split_once('\n') {
        Some((title, rest)) => (title, rest),
        None => (buffer, ""),
    };
    let code = match rest.split_once('\n') {
        Some((first, tail)) if first.trim().is_empty() => tail,
        _ => rest,
    };
    Draft::new(title.trim(), code.trim_end())
}

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(CodepasteError::Editor(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the user's editor and waits for it to close.
/// Returns the contents of the file after editing.
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();

    // $EDITOR may carry arguments, e.g. "code --wait".
    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or(editor.as_str());
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| {
            CodepasteError::Editor(format!("Failed to launch editor '{}': {}", editor, e))
        })?;

    if !status.success() {
        return Err(CodepasteError::Editor(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    fs::read_to_string(path).map_err(|e| CodepasteError::Editor(e.to_string()))
}

/// Opens the editor on a draft and returns the edited draft.
pub fn edit_draft(initial: &Draft) -> Result<Draft> {
    let temp_file = env::temp_dir().join(format!("codepaste_edit_{}.txt", std::process::id()));

    fs::write(&temp_file, to_buffer(initial)).map_err(|e| CodepasteError::Editor(e.to_string()))?;
    let result = open_in_editor(&temp_file);
    let _ = fs::remove_file(&temp_file);

    Ok(from_buffer(&result?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_buffer() {
        let draft = Draft::new("My Title", "let x = 1;");
        assert_eq!(to_buffer(&draft), "My Title\n\nlet x = 1;");
    }

    #[test]
    fn test_from_buffer_normal() {
        let draft = from_buffer("My Title\n\nfn a() {}\n    indented();\n");
        assert_eq!(draft.title, "My Title");
        assert_eq!(draft.code, "fn a() {}\n    indented();");
    }

    #[test]
    fn test_from_buffer_keeps_leading_indentation() {
        let draft = from_buffer("T\n\n    indented first line");
        assert_eq!(draft.code, "    indented first line");
    }

    #[test]
    fn test_from_buffer_no_blank_separator() {
        let draft = from_buffer("Title\ncode right away");
        assert_eq!(draft.title, "Title");
        assert_eq!(draft.code, "code right away");
    }

    #[test]
    fn test_from_buffer_title_only() {
        let draft = from_buffer("Only title");
        assert_eq!(draft.title, "Only title");
        assert_eq!(draft.code, "");
    }

    #[test]
    fn test_from_buffer_empty() {
        assert!(from_buffer("").is_blank());
    }

    #[test]
    fn test_roundtrip() {
        let original = Draft::new("Test Title", "line one\nline two");
        assert_eq!(from_buffer(&to_buffer(&original)), original);
    }
}
