use airwave_core::{ChatMessage, MediaDescription, ParticipantId};
use airwave_session::{ReceiverBehavior, StationBehavior, StationContext};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;

/// What a station behavior saw, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum StationEvent {
    Connected(ParticipantId),
    Chat(ChatMessage),
    Left(ParticipantId),
}

#[derive(Clone, Default)]
pub struct RecordingStationBehavior {
    events: Arc<Mutex<Vec<StationEvent>>>,
}

impl RecordingStationBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_events(&self) -> Vec<StationEvent> {
        self.events.lock().await.clone()
    }

    /// Poll until the predicate holds or the timeout trips.
    pub async fn wait_for<F>(&self, timeout_ms: u64, predicate: F) -> bool
    where
        F: Fn(&[StationEvent]) -> bool,
    {
        let deadline = tokio::time::Instant::now() + Duration::from_millis(timeout_ms);
        loop {
            if predicate(&self.events.lock().await) {
                return true;
            }
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    pub async fn wait_until_connected(&self, listener: &ParticipantId, timeout_ms: u64) -> bool {
        self.wait_for(timeout_ms, |events| {
            events
                .iter()
                .any(|event| matches!(event, StationEvent::Connected(id) if id == listener))
        })
        .await
    }

    pub async fn wait_until_left(&self, listener: &ParticipantId, timeout_ms: u64) -> bool {
        self.wait_for(timeout_ms, |events| {
            events
                .iter()
                .any(|event| matches!(event, StationEvent::Left(id) if id == listener))
        })
        .await
    }

    pub async fn chats(&self) -> Vec<ChatMessage> {
        self.get_events()
            .await
            .into_iter()
            .filter_map(|event| match event {
                StationEvent::Chat(message) => Some(message),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl StationBehavior for RecordingStationBehavior {
    async fn on_listener_connected(&self, _ctx: &StationContext, listener: ParticipantId) {
        info!("[RecordingStation] listener {} connected", listener);
        self.events
            .lock()
            .await
            .push(StationEvent::Connected(listener));
    }

    async fn on_chat(&self, _ctx: &StationContext, message: ChatMessage) {
        info!(
            "[RecordingStation] chat from {}: {}",
            message.from, message.message
        );
        self.events.lock().await.push(StationEvent::Chat(message));
    }

    async fn on_listener_left(&self, _ctx: &StationContext, listener: ParticipantId) {
        info!("[RecordingStation] listener {} left", listener);
        self.events.lock().await.push(StationEvent::Left(listener));
    }
}

/// What a receiver behavior saw, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum ReceiverEvent {
    Connected,
    Metadata(MediaDescription),
    Chat(ChatMessage),
    Disconnected,
}

#[derive(Clone, Default)]
pub struct RecordingReceiverBehavior {
    events: Arc<Mutex<Vec<ReceiverEvent>>>,
}

impl RecordingReceiverBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_events(&self) -> Vec<ReceiverEvent> {
        self.events.lock().await.clone()
    }

    /// Poll until the predicate holds or the timeout trips.
    pub async fn wait_for<F>(&self, timeout_ms: u64, predicate: F) -> bool
    where
        F: Fn(&[ReceiverEvent]) -> bool,
    {
        let deadline = tokio::time::Instant::now() + Duration::from_millis(timeout_ms);
        loop {
            if predicate(&self.events.lock().await) {
                return true;
            }
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    pub async fn wait_until_connected(&self, timeout_ms: u64) -> bool {
        self.wait_for(timeout_ms, |events| {
            events
                .iter()
                .any(|event| matches!(event, ReceiverEvent::Connected))
        })
        .await
    }

    pub async fn wait_until_disconnected(&self, timeout_ms: u64) -> bool {
        self.wait_for(timeout_ms, |events| {
            events
                .iter()
                .any(|event| matches!(event, ReceiverEvent::Disconnected))
        })
        .await
    }

    pub async fn latest_metadata(&self) -> Option<MediaDescription> {
        self.get_events()
            .await
            .into_iter()
            .rev()
            .find_map(|event| match event {
                ReceiverEvent::Metadata(description) => Some(description),
                _ => None,
            })
    }

    pub async fn metadata_history(&self) -> Vec<MediaDescription> {
        self.get_events()
            .await
            .into_iter()
            .filter_map(|event| match event {
                ReceiverEvent::Metadata(description) => Some(description),
                _ => None,
            })
            .collect()
    }

    pub async fn chats(&self) -> Vec<ChatMessage> {
        self.get_events()
            .await
            .into_iter()
            .filter_map(|event| match event {
                ReceiverEvent::Chat(message) => Some(message),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl ReceiverBehavior for RecordingReceiverBehavior {
    async fn on_connected(&self) {
        info!("[RecordingReceiver] connected");
        self.events.lock().await.push(ReceiverEvent::Connected);
    }

    async fn on_metadata(&self, description: MediaDescription) {
        info!("[RecordingReceiver] now playing: {}", description.title);
        self.events
            .lock()
            .await
            .push(ReceiverEvent::Metadata(description));
    }

    async fn on_chat(&self, message: ChatMessage) {
        info!(
            "[RecordingReceiver] chat from {}: {}",
            message.from, message.message
        );
        self.events.lock().await.push(ReceiverEvent::Chat(message));
    }

    async fn on_disconnected(&self) {
        info!("[RecordingReceiver] disconnected");
        self.events.lock().await.push(ReceiverEvent::Disconnected);
    }
}
