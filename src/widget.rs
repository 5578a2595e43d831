//! Widget runtime: one task, one event loop.
//!
//! SYSTEM CONTEXT
//! ==============
//! `spawn_widget` wires the controller to the real resolver and WebSocket
//! transport and runs it on a single tokio task. UI input arrives through a
//! [`WidgetHandle`], room lookups run as short-lived tasks that post their
//! answer back, and socket activity arrives from the transport. The loop
//! applies all three in arrival order, so session state is only ever touched
//! from this task.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::WidgetConfig;
use crate::controller::{PanelController, ResolveKind, ResolveRequest, Resolved};
use crate::net::resolver::RoomResolver;
use crate::net::session::TransportSession;
use crate::net::socket::WsTransport;
use crate::net::transport::TransportSignal;
use crate::net::types::UserId;
use crate::state::ui::ClickTarget;
use crate::view::ConversationView;

/// UI input accepted by the widget loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetCommand {
    Toggle,
    ChatWith { user_id: UserId, partner_hint: Option<String> },
    OpenChatRoom(String),
    Click(ClickTarget),
    Send(String),
    Shutdown,
}

/// Cloneable entry point for driving a running widget from anywhere.
#[derive(Debug, Clone)]
pub struct WidgetHandle {
    commands: mpsc::UnboundedSender<WidgetCommand>,
}

impl WidgetHandle {
    pub fn toggle(&self) {
        self.dispatch(WidgetCommand::Toggle);
    }

    pub fn chat_with(&self, user_id: impl Into<UserId>, partner_hint: Option<String>) {
        self.dispatch(WidgetCommand::ChatWith { user_id: user_id.into(), partner_hint });
    }

    /// Open the panel on the room identified by `id`, as page scripts do.
    pub fn open_chat_room(&self, id: impl Into<String>) {
        self.dispatch(WidgetCommand::OpenChatRoom(id.into()));
    }

    pub fn click(&self, target: ClickTarget) {
        self.dispatch(WidgetCommand::Click(target));
    }

    pub fn send(&self, text: impl Into<String>) {
        self.dispatch(WidgetCommand::Send(text.into()));
    }

    pub fn shutdown(&self) {
        self.dispatch(WidgetCommand::Shutdown);
    }

    /// Whether the widget loop is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.commands.is_closed()
    }

    fn dispatch(&self, command: WidgetCommand) {
        if self.commands.send(command).is_err() {
            debug!("chat widget already stopped; command dropped");
        }
    }
}

/// Start the widget on the current tokio runtime.
///
/// Returns `None` without spawning anything when no current user is
/// configured: an anonymous viewer gets an inert widget. The join handle
/// yields the view back once the widget shuts down.
pub fn spawn_widget<V>(
    config: &WidgetConfig,
    resolver: Arc<dyn RoomResolver>,
    view: V,
) -> Option<(WidgetHandle, JoinHandle<V>)>
where
    V: ConversationView + 'static,
{
    let Some(user) = config.current_user.as_ref() else {
        info!("no current user; chat widget inert");
        return None;
    };
    info!(%user, endpoint = ?config.endpoint, "starting chat widget");

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (signal_tx, signal_rx) = mpsc::unbounded_channel();
    let (resolved_tx, resolved_rx) = mpsc::unbounded_channel();

    let transport = WsTransport::new(signal_tx, config.cookie_header());
    let session = TransportSession::new(transport, config.endpoint.clone());
    let controller = PanelController::new(session, view);

    let channels = Channels { commands: command_rx, signals: signal_rx, resolved: resolved_rx, resolved_tx };
    let task = tokio::spawn(run(controller, resolver, channels));

    Some((WidgetHandle { commands: command_tx }, task))
}

struct Channels {
    commands: mpsc::UnboundedReceiver<WidgetCommand>,
    signals: mpsc::UnboundedReceiver<TransportSignal>,
    resolved: mpsc::UnboundedReceiver<Resolved>,
    resolved_tx: mpsc::UnboundedSender<Resolved>,
}

async fn run<V: ConversationView>(
    mut controller: PanelController<WsTransport, V>,
    resolver: Arc<dyn RoomResolver>,
    mut channels: Channels,
) -> V {
    loop {
        tokio::select! {
            command = channels.commands.recv() => {
                // Every handle dropped counts as shutdown.
                let command = command.unwrap_or(WidgetCommand::Shutdown);
                if command == WidgetCommand::Shutdown {
                    controller.shutdown();
                    break;
                }
                if let Some(request) = apply(&mut controller, command) {
                    spawn_lookup(request, resolver.clone(), channels.resolved_tx.clone());
                }
            }
            Some(resolved) = channels.resolved.recv() => controller.on_resolved(resolved),
            Some(signal) = channels.signals.recv() => controller.on_signal(signal),
        }
    }
    controller.into_view()
}

fn apply<V: ConversationView>(
    controller: &mut PanelController<WsTransport, V>,
    command: WidgetCommand,
) -> Option<ResolveRequest> {
    match command {
        WidgetCommand::Toggle => controller.toggle(),
        WidgetCommand::ChatWith { user_id, partner_hint } => Some(controller.chat_with(user_id, partner_hint)),
        WidgetCommand::OpenChatRoom(id) => Some(controller.open_chat_room(&id)),
        WidgetCommand::Click(target) => {
            controller.click(target);
            None
        }
        WidgetCommand::Send(text) => {
            controller.send(&text);
            None
        }
        WidgetCommand::Shutdown => None,
    }
}

fn spawn_lookup(request: ResolveRequest, resolver: Arc<dyn RoomResolver>, reply: mpsc::UnboundedSender<Resolved>) {
    tokio::spawn(async move {
        let outcome = match &request.kind {
            ResolveKind::Latest => resolver.resolve_latest().await,
            ResolveKind::WithUser(user_id) => resolver.resolve_with_user(user_id).await.map(Some),
        };
        let _ = reply.send(Resolved { generation: request.generation, outcome });
    });
}
