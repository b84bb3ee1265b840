use chrono::{DateTime, Utc};
use codepaste::api::{CmdMessage, MessageLevel};
use codepaste::index::DisplaySnippet;
use codepaste::model::Snippet;
use colored::Colorize;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const PREVIEW_CHARS: usize = 50;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// One line per snippet: position, title with a code preview, age.
pub(super) fn render_snippet_list(snippets: &[DisplaySnippet]) -> String {
    if snippets.is_empty() {
        return "No snippets found.\n".to_string();
    }

    let mut output = String::new();
    for ds in snippets {
        let idx_str = format!("{:>4}. ", ds.position);

        let preview: String = ds
            .snippet
            .code
            .chars()
            .take(PREVIEW_CHARS)
            .map(|c| if c == '\n' || c == '\t' { ' ' } else { c })
            .collect();

        let fixed_width = idx_str.width() + TIME_WIDTH + 2;
        let available = LINE_WIDTH.saturating_sub(fixed_width);

        let title = truncate_to_width(&ds.snippet.title, available);
        let remaining = available.saturating_sub(title.width() + 1);
        let preview = if preview.trim().is_empty() || remaining < 4 {
            String::new()
        } else {
            truncate_to_width(preview.trim(), remaining)
        };

        let used = title.width() + if preview.is_empty() { 0 } else { preview.width() + 1 };
        let padding = " ".repeat(available.saturating_sub(used));

        let time_ago = ds
            .snippet
            .created_at
            .map(format_time_ago)
            .unwrap_or_default();

        let preview_part = if preview.is_empty() {
            String::new()
        } else {
            format!(" {}", preview.dimmed())
        };

        output.push_str(&format!(
            "{}{}{}{}  {:>width$}\n",
            idx_str.yellow(),
            title.bold(),
            preview_part,
            padding,
            time_ago.dimmed(),
            width = TIME_WIDTH
        ));
    }
    output
}

pub(super) fn render_full_snippet(snippet: &Snippet) -> String {
    format!(
        "{}\n{}\n{}\n",
        snippet.title.bold(),
        "--------------------------------".dimmed(),
        snippet.code
    )
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}
