use std::sync::Arc;

use chat_widget::config::{DEFAULT_BASE_URL, WidgetConfig};
use chat_widget::error::{ConfigError, ResolveError};
use chat_widget::net::resolver::HttpRoomResolver;
use chat_widget::state::ui::ClickTarget;
use chat_widget::view::local_offset;
use chat_widget::view::terminal::TerminalView;
use chat_widget::widget::{WidgetHandle, spawn_widget};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Resolver(#[from] ResolveError),
    #[error("failed to read stdin: {0}")]
    Stdin(#[from] std::io::Error),
    #[error("chat widget task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Parser, Debug)]
#[command(name = "chat-widget", about = "One-to-one chat panel in the terminal")]
struct Cli {
    #[arg(long, env = "CHAT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Username of the viewer; without it the widget stays inert.
    #[arg(long, env = "CHAT_CURRENT_USER")]
    current_user: Option<String>,

    /// Value of the service's `sessionid` cookie.
    #[arg(long, env = "CHAT_SESSION_COOKIE")]
    session_cookie: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the conversation with a user.
    With {
        user_id: String,
        #[arg(long)]
        partner: Option<String>,
    },
    /// Reopen the most recent conversation.
    Latest,
}

const HELP: &str = "commands: /toggle, /with <id> [name], /room <id>, /dismiss, /quit; anything else is sent";

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = WidgetConfig::new(&cli.base_url, cli.current_user.as_deref())?
        .with_session_cookie(cli.session_cookie);

    let Some(viewer) = config.current_user.clone() else {
        tracing::info!("CHAT_CURRENT_USER not set; nothing to do");
        return Ok(());
    };

    let resolver = Arc::new(HttpRoomResolver::new(&config)?);
    let view = TerminalView::new(std::io::stdout(), viewer, local_offset());
    let Some((handle, task)) = spawn_widget(&config, resolver, view) else {
        return Ok(());
    };

    match cli.command {
        Some(Command::With { user_id, partner }) => handle.chat_with(user_id, partner),
        Some(Command::Latest) => handle.toggle(),
        None => {}
    }
    eprintln!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if !run_line(&handle, &line) {
            break;
        }
    }

    handle.shutdown();
    task.await?;
    Ok(())
}

/// Apply one stdin line. Returns `false` to quit.
fn run_line(handle: &WidgetHandle, line: &str) -> bool {
    let line = line.trim();
    let mut words = line.split_whitespace();
    match words.next() {
        Some("/quit") => return false,
        Some("/toggle") => handle.toggle(),
        Some("/dismiss") => handle.click(ClickTarget::Outside),
        Some("/with") => match words.next() {
            Some(user_id) => {
                let name = words.collect::<Vec<_>>().join(" ");
                handle.chat_with(user_id, (!name.is_empty()).then_some(name));
            }
            None => eprintln!("usage: /with <user_id> [name]"),
        },
        Some("/room") => match words.next() {
            Some(id) => handle.open_chat_room(id),
            None => eprintln!("usage: /room <id>"),
        },
        Some(cmd) if cmd.starts_with('/') => eprintln!("{HELP}"),
        _ => handle.send(line),
    }
    true
}
