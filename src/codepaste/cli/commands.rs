//! # CLI Layer
//!
//! This module is **one possible UI client** for codepaste, not the application
//! itself. It is the only place that knows about the terminal: it reads
//! arguments and stdin, launches the editor, prints, and picks the exit code.
//!
//! ## Flow
//!
//! Each invocation is a short session:
//!
//! 1. Resolve configuration; a missing base URL stops here.
//! 2. Refresh the store from the remote so positions match what the user saw.
//! 3. Raise the intents for the command, in order.
//! 4. Print the resulting notifications; any error means exit code 1.
//!
//! `config` is the exception: it never talks to the remote.

use super::render::{print_messages, render_full_snippet, render_snippet_list};
use super::setup::{Cli, Commands};
use codepaste::api::{CmdMessage, CmdResult, CodepasteApi, Intent};
use codepaste::client::http::HttpClient;
use codepaste::clipboard::SystemClipboard;
use codepaste::config::{config_dir, CodepasteConfig};
use codepaste::editor::edit_draft;
use codepaste::error::Result;
use codepaste::index::SnippetRef;
use codepaste::model::{Draft, DraftField, SnippetId};
use log::debug;
use std::io::{IsTerminal, Read};
use std::process::ExitCode;

struct AppContext {
    api: CodepasteApi<HttpClient, SystemClipboard>,
}

pub async fn run(cli: Cli) -> Result<ExitCode> {
    let Cli {
        command, base_url, ..
    } = cli;

    if let Some(Commands::Config { key, value }) = command {
        return handle_config(key, value);
    }

    let mut ctx = init_context(base_url)?;

    let refreshed = ctx.api.dispatch(Intent::Refresh).await;
    if refreshed.failed() {
        return Ok(report(&refreshed));
    }

    match command {
        None | Some(Commands::List { search: None }) => handle_list(&mut ctx, None).await,
        Some(Commands::List { search }) => handle_list(&mut ctx, search).await,
        Some(Commands::Search { term }) => handle_list(&mut ctx, Some(term)).await,
        Some(Commands::Add {
            title,
            code,
            no_editor,
        }) => handle_add(&mut ctx, title, code, no_editor).await,
        Some(Commands::View { reference }) => handle_view(&mut ctx, &reference).await,
        Some(Commands::Edit {
            reference,
            title,
            code,
        }) => handle_edit(&mut ctx, &reference, title, code).await,
        Some(Commands::Delete { reference }) => handle_delete(&mut ctx, &reference).await,
        Some(Commands::Copy { reference }) => handle_copy(&mut ctx, &reference).await,
        Some(Commands::Config { key, value }) => handle_config(key, value),
    }
}

fn init_context(base_url: Option<String>) -> Result<AppContext> {
    let dir = config_dir()?;
    let config = CodepasteConfig::load(&dir)?
        .with_process_env()?
        .with_base_url(base_url);
    let client = HttpClient::from_config(&config)?;
    debug!("using snippet API at {}", client.base_url());

    Ok(AppContext {
        api: CodepasteApi::new(client, SystemClipboard),
    })
}

fn resolve(ctx: &AppContext, reference: &str) -> Result<SnippetId> {
    let selector: SnippetRef = reference.parse()?;
    ctx.api.resolve(&selector)
}

/// Prints the notifications and maps failure to the exit code.
fn report(result: &CmdResult) -> ExitCode {
    print_messages(&result.messages);
    if result.failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn handle_list(ctx: &mut AppContext, search: Option<String>) -> Result<ExitCode> {
    let result = match search {
        Some(term) => ctx.api.dispatch(Intent::ChangeSearchQuery(term)).await,
        None => CmdResult::default().with_listed_snippets(ctx.api.visible()),
    };
    print!("{}", render_snippet_list(&result.listed_snippets));
    Ok(report(&result))
}

async fn handle_add(
    ctx: &mut AppContext,
    title: Vec<String>,
    code: Option<String>,
    no_editor: bool,
) -> Result<ExitCode> {
    let mut draft = Draft::new(title.join(" "), code.unwrap_or_default());

    if draft.code.is_empty() {
        if let Some(piped) = read_piped_stdin() {
            draft.code = piped;
        } else if !no_editor {
            draft = edit_draft(&draft)?;
        }
    }

    submit(ctx, draft).await
}

async fn handle_view(ctx: &mut AppContext, reference: &str) -> Result<ExitCode> {
    let id = resolve(ctx, reference)?;
    let result = ctx.api.dispatch(Intent::RequestFocus(id)).await;
    if let Some(snippet) = ctx.api.focused() {
        print!("{}", render_full_snippet(snippet));
    }
    Ok(report(&result))
}

async fn handle_edit(
    ctx: &mut AppContext,
    reference: &str,
    title: Option<String>,
    code: Option<String>,
) -> Result<ExitCode> {
    let id = resolve(ctx, reference)?;
    let started = ctx.api.dispatch(Intent::RequestEdit(id)).await;
    if started.failed() {
        return Ok(report(&started));
    }

    let original = ctx.api.draft().clone();
    let draft = if title.is_none() && code.is_none() {
        edit_draft(&original)?
    } else {
        Draft::new(
            title.unwrap_or_else(|| original.title.clone()),
            code.unwrap_or_else(|| original.code.clone()),
        )
    };

    if draft == original {
        ctx.api.dispatch(Intent::CancelEdit).await;
        print_messages(&[CmdMessage::warning("No changes, snippet left as is")]);
        return Ok(ExitCode::SUCCESS);
    }

    submit(ctx, draft).await
}

async fn handle_delete(ctx: &mut AppContext, reference: &str) -> Result<ExitCode> {
    let id = resolve(ctx, reference)?;
    let result = ctx.api.dispatch(Intent::RequestDelete(id)).await;
    Ok(report(&result))
}

async fn handle_copy(ctx: &mut AppContext, reference: &str) -> Result<ExitCode> {
    let id = resolve(ctx, reference)?;
    let focused = ctx.api.dispatch(Intent::RequestFocus(id)).await;
    if focused.failed() {
        return Ok(report(&focused));
    }
    let result = ctx.api.dispatch(Intent::CopyFocusedToClipboard).await;
    Ok(report(&result))
}

fn handle_config(key: Option<String>, value: Option<String>) -> Result<ExitCode> {
    let dir = config_dir()?;
    let mut config = CodepasteConfig::load(&dir)?;

    match (key, value) {
        (None, _) => {
            for (k, v) in config.list_all() {
                println!("{} = {}", k, v);
            }
        }
        (Some(k), None) => println!("{}", config.get(&k)?),
        (Some(k), Some(v)) => {
            config.set(&k, &v)?;
            config.save(&dir)?;
            print_messages(&[CmdMessage::success(format!("{} = {}", k, v))]);
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn submit(ctx: &mut AppContext, draft: Draft) -> Result<ExitCode> {
    ctx.api
        .dispatch(Intent::ChangeDraftField {
            field: DraftField::Title,
            value: draft.title,
        })
        .await;
    ctx.api
        .dispatch(Intent::ChangeDraftField {
            field: DraftField::Code,
            value: draft.code,
        })
        .await;
    let result = ctx.api.dispatch(Intent::SubmitDraft).await;
    Ok(report(&result))
}

/// Piped input, if any. Never blocks on an interactive terminal.
fn read_piped_stdin() -> Option<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return None;
    }
    let mut buffer = String::new();
    stdin.read_to_string(&mut buffer).ok()?;
    if buffer.trim().is_empty() {
        None
    } else {
        Some(buffer)
    }
}
