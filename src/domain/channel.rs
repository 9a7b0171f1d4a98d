//! Named publish/subscribe channel with on-demand snapshot generation.
//!
//! A [`Channel`] owns an optional snapshot generator and a concurrent set of
//! subscriber [`Endpoint`]s. Mutators call [`Channel::publish`] while they
//! still hold the lock protecting the state the generator reads; the
//! generator runs synchronously, the payload is rendered to a JSON frame
//! once, and the frame is pushed into every subscriber's bounded queue.
//!
//! The channel never locks the source itself. It only guards its own
//! subscriber set, which may be mutated from any connection task.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use super::SubscriberId;
use crate::error::GatewayError;
use crate::ws::messages::WsMessageType;

/// A rendered JSON text frame shared by every subscriber of one publish.
pub type Frame = Arc<str>;

/// Snapshot generator: a pure projection from the locked source `S` into
/// the channel payload `P`.
pub type Generator<S, P> = fn(&S) -> Result<P, GatewayError>;

/// Delivery handle for one subscriber: an id plus the sending half of the
/// subscriber's bounded frame queue.
#[derive(Debug, Clone)]
pub struct Endpoint {
    id: SubscriberId,
    tx: mpsc::Sender<Frame>,
}

impl Endpoint {
    /// Wraps an existing queue sender.
    #[must_use]
    pub const fn new(id: SubscriberId, tx: mpsc::Sender<Frame>) -> Self {
        Self { id, tx }
    }

    /// Creates an endpoint with a fresh id and a queue holding at most
    /// `capacity` undelivered frames (minimum 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> (Self, mpsc::Receiver<Frame>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self::new(SubscriberId::new(), tx), rx)
    }

    /// Returns the subscriber id.
    #[must_use]
    pub const fn id(&self) -> SubscriberId {
        self.id
    }

    /// Pushes a frame without waiting. Returns `false` if the frame was
    /// dropped because the queue is full or the receiver is gone.
    pub fn deliver(&self, frame: Frame) -> bool {
        match self.tx.try_send(frame) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::warn!(subscriber = %self.id, "subscriber queue full, dropping frame");
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }
}

/// Wire envelope of a channel frame.
#[derive(Debug, Serialize)]
struct ChannelFrame<'a, P> {
    id: uuid::Uuid,
    #[serde(rename = "type")]
    msg_type: WsMessageType,
    timestamp: DateTime<Utc>,
    payload: FrameBody<'a, P>,
}

#[derive(Debug, Serialize)]
struct FrameBody<'a, P> {
    channel: &'static str,
    data: &'a P,
}

fn render_frame<P: Serialize>(channel: &'static str, data: &P) -> Result<Frame, GatewayError> {
    let frame = ChannelFrame {
        id: uuid::Uuid::new_v4(),
        msg_type: WsMessageType::Event,
        timestamp: Utc::now(),
        payload: FrameBody { channel, data },
    };
    Ok(Arc::from(serde_json::to_string(&frame)?))
}

/// Named feed with at most one generator and many subscribers.
///
/// `S` is the source the generator reads (the caller must hold the lock
/// protecting it for the duration of the call); `P` is the payload type.
/// Generators return owned payloads, so nothing in a frame aliases the
/// source once `publish` returns.
pub struct Channel<S, P> {
    name: &'static str,
    generator: Option<Generator<S, P>>,
    subscribers: DashMap<SubscriberId, Endpoint>,
}

impl<S, P> fmt::Debug for Channel<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.name)
            .field("has_generator", &self.generator.is_some())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<S, P: Serialize> Channel<S, P> {
    /// Creates a channel whose payload is produced by `generator`.
    #[must_use]
    pub fn new(name: &'static str, generator: Generator<S, P>) -> Self {
        Self {
            name,
            generator: Some(generator),
            subscribers: DashMap::new(),
        }
    }

    /// Creates a channel that only carries caller-supplied payloads.
    #[must_use]
    pub fn without_generator(name: &'static str) -> Self {
        Self {
            name,
            generator: None,
            subscribers: DashMap::new(),
        }
    }

    /// Returns the channel name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if a snapshot generator is registered.
    #[must_use]
    pub const fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    /// Returns the number of attached subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Runs the generator against `source` without delivering anything.
    /// Returns `None` for generator-less channels.
    ///
    /// # Errors
    ///
    /// Propagates the generator's error.
    pub fn snapshot(&self, source: &S) -> Result<Option<P>, GatewayError> {
        self.generator.map(|generate| generate(source)).transpose()
    }

    /// Attaches `endpoint` and immediately sends it the current snapshot,
    /// so late joiners start from the latest state.
    ///
    /// The endpoint stays attached even if the initial snapshot fails; it
    /// will receive the next successful publish.
    ///
    /// # Errors
    ///
    /// Returns the generator or rendering error of the initial snapshot.
    pub fn subscribe(&self, endpoint: Endpoint, source: &S) -> Result<(), GatewayError> {
        let initial = self.snapshot(source);
        self.subscribers.insert(endpoint.id(), endpoint.clone());
        tracing::debug!(channel = self.name, subscriber = %endpoint.id(), "subscriber attached");

        match initial {
            Ok(Some(payload)) => {
                endpoint.deliver(render_frame(self.name, &payload)?);
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(err) => {
                tracing::warn!(channel = self.name, error = %err, "initial snapshot failed");
                Err(err)
            }
        }
    }

    /// Detaches a subscriber. Returns `false` if it was not attached.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.subscribers.remove(&id).is_some()
    }

    /// Generates a fresh snapshot from `source` and fans it out.
    ///
    /// Returns the number of subscribers whose queue accepted the frame.
    /// With no subscribers the generator still runs but nothing is
    /// rendered or delivered.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NoGenerator`] on a generator-less channel,
    /// or the generator/rendering error. Nothing is delivered on error.
    pub fn publish(&self, source: &S) -> Result<usize, GatewayError> {
        let generate = self.generator.ok_or(GatewayError::NoGenerator(self.name))?;
        let payload = generate(source)?;
        self.fan_out(&payload)
    }

    /// Fans out a caller-supplied payload.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Serialization`] if the payload cannot be
    /// rendered.
    pub fn publish_payload(&self, payload: P) -> Result<usize, GatewayError> {
        self.fan_out(&payload)
    }

    /// Publishes and logs any failure instead of returning it. Subscribers
    /// keep their last good payload until the next successful publish.
    pub fn notify(&self, source: &S) {
        if let Err(err) = self.publish(source) {
            tracing::warn!(channel = self.name, error = %err, "snapshot publish skipped");
        }
    }

    fn fan_out(&self, payload: &P) -> Result<usize, GatewayError> {
        if self.subscribers.is_empty() {
            return Ok(0);
        }
        let frame = render_frame(self.name, payload)?;
        let delivered = self
            .subscribers
            .iter()
            .filter(|entry| entry.value().deliver(Arc::clone(&frame)))
            .count();
        tracing::trace!(channel = self.name, delivered, "frame published");
        Ok(delivered)
    }
}

/// Payload-erased view of a [`Channel`] reading source `S`, used by the
/// channel catalog to look channels up by name.
pub trait Feed<S>: Send + Sync {
    /// Channel name.
    fn name(&self) -> &'static str;

    /// Whether the channel has a snapshot generator.
    fn has_generator(&self) -> bool;

    /// Attaches an endpoint with initial sync; see [`Channel::subscribe`].
    ///
    /// # Errors
    ///
    /// Returns the initial snapshot error.
    fn attach(&self, endpoint: Endpoint, source: &S) -> Result<(), GatewayError>;

    /// Detaches an endpoint; see [`Channel::unsubscribe`].
    fn detach(&self, id: SubscriberId) -> bool;

    /// Number of attached subscribers.
    fn subscriber_count(&self) -> usize;
}

impl<S, P: Serialize> Feed<S> for Channel<S, P> {
    fn name(&self) -> &'static str {
        Channel::name(self)
    }

    fn has_generator(&self) -> bool {
        Channel::has_generator(self)
    }

    fn attach(&self, endpoint: Endpoint, source: &S) -> Result<(), GatewayError> {
        self.subscribe(endpoint, source)
    }

    fn detach(&self, id: SubscriberId) -> bool {
        self.unsubscribe(id)
    }

    fn subscriber_count(&self) -> usize {
        Channel::subscriber_count(self)
    }
}
