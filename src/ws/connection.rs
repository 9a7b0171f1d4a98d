//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection: incoming
//! commands change the connection's channel set, and frames pushed into the
//! connection's queue by the channels are forwarded to the client.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::SubscriptionManager;
use crate::arena::Arena;
use crate::domain::Endpoint;
use crate::error::GatewayError;

/// Outcome of a subscribe or unsubscribe command.
#[derive(Debug, Default, Serialize)]
struct ChangeReport {
    /// Channels the command applied to.
    applied: Vec<String>,
    /// Names outside the catalog.
    unknown: Vec<String>,
    /// Channels the connection is attached to afterwards.
    channels: Vec<String>,
}

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Attaches to `initial_channels` before reading anything.
/// - Reads commands from the client and applies them.
/// - Forwards frames from the connection's queue to the client.
/// - Detaches from every channel when the socket closes.
pub async fn run_connection(
    socket: WebSocket,
    arena: Arc<Arena>,
    initial_channels: Vec<String>,
    queue_capacity: usize,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (endpoint, mut frame_rx) = Endpoint::with_capacity(queue_capacity);
    let subscriber = endpoint.id();
    let mut subs = SubscriptionManager::new();
    tracing::debug!(%subscriber, "ws connection opened");

    let initial = subscribe(&arena, &endpoint, &mut subs, &initial_channels).await;
    if !initial.unknown.is_empty() {
        let message = format!("unknown channels: {}", initial.unknown.join(","));
        if let Some(text) = WsMessage::error(String::new(), 1003, &message).to_text()
            && ws_tx.send(Message::text(text)).await.is_err()
        {
            arena.unsubscribe_all(subscriber);
            return;
        }
    }

    loop {
        tokio::select! {
            // Incoming message from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = handle_text_message(&text, &arena, &endpoint, &mut subs).await;
                        if let Some(resp_json) = response
                            && ws_tx.send(Message::text(resp_json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                    _ => {}
                }
            }
            // Frame pushed by a channel
            frame = frame_rx.recv() => {
                let Some(frame) = frame else { break };
                if ws_tx.send(Message::text(&*frame)).await.is_err() {
                    break;
                }
            }
        }
    }

    let detached = arena.unsubscribe_all(subscriber);
    tracing::debug!(%subscriber, detached, channels = subs.count(), "ws connection closed");
}

/// Handles a text message from the client, returning an optional JSON response.
async fn handle_text_message(
    text: &str,
    arena: &Arena,
    endpoint: &Endpoint,
    subs: &mut SubscriptionManager,
) -> Option<String> {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return WsMessage::error(String::new(), 400, "malformed JSON").to_text();
    };
    if msg.msg_type != WsMessageType::Command {
        return WsMessage::error(msg.id, 400, "expected a command").to_text();
    }
    let Ok(command) = serde_json::from_value::<WsCommand>(msg.payload) else {
        return WsMessage::error(msg.id, 404, "unknown command").to_text();
    };

    let report = match command {
        WsCommand::Subscribe { channels } => subscribe(arena, endpoint, subs, &channels).await,
        WsCommand::Unsubscribe { channels } => unsubscribe(arena, endpoint, subs, &channels),
    };
    let payload = serde_json::to_value(&report).unwrap_or_default();
    WsMessage::response(msg.id, payload).to_text()
}

async fn subscribe(
    arena: &Arena,
    endpoint: &Endpoint,
    subs: &mut SubscriptionManager,
    channels: &[String],
) -> ChangeReport {
    let mut report = ChangeReport::default();
    for name in channels {
        if subs.contains(name) {
            continue;
        }
        match arena.subscribe(name, endpoint.clone()).await {
            Err(GatewayError::UnknownChannel(_)) => report.unknown.push(name.clone()),
            // Still attached; the next publish will catch it up.
            Ok(()) | Err(_) => {
                subs.add(name);
                report.applied.push(name.clone());
            }
        }
    }
    report.channels = subs.names();
    report
}

fn unsubscribe(
    arena: &Arena,
    endpoint: &Endpoint,
    subs: &mut SubscriptionManager,
    channels: &[String],
) -> ChangeReport {
    let mut report = ChangeReport::default();
    for name in channels {
        match arena.unsubscribe(name, endpoint.id()) {
            Ok(_) => {
                if subs.remove(name) {
                    report.applied.push(name.clone());
                }
            }
            Err(_) => report.unknown.push(name.clone()),
        }
    }
    report.channels = subs.names();
    report
}
