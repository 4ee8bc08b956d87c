use crate::channel::{ChannelMultiplexer, ChatChannel};
use crate::negotiation::{CandidateAction, Negotiation};
use crate::station::station_behavior::StationBehavior;
use crate::station::station_command::StationCommand;
use crate::station::station_context::StationContext;
use crate::transport::{DirectTransport, SubChannel, TransportEvent, TransportFactory};
use airwave_core::{
    ChatMessage, MediaDescription, ParticipantId, Signal, SignalFrame, SignalingOutput,
};
use dashmap::DashMap;
use futures::{Stream, StreamExt};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

struct ListenerLink {
    negotiation: Negotiation,
    transport: Arc<dyn DirectTransport>,
}

/// The host endpoint. Answers every new logon with a targeted offer, walks
/// one negotiation per listener and feeds the connected ones chat and
/// metadata over their direct transports.
pub struct Station<S> {
    identity: ParticipantId,
    signals: S,
    signaling: Arc<dyn SignalingOutput>,
    transport_factory: Arc<dyn TransportFactory>,
    behavior: Box<dyn StationBehavior>,
    links: HashMap<ParticipantId, ListenerLink>,
    connected: Arc<DashMap<ParticipantId, ChannelMultiplexer>>,
    media: Option<MediaDescription>,
    command_rx: mpsc::Receiver<StationCommand>,
    transport_rx: mpsc::Receiver<TransportEvent>,
    transport_tx: mpsc::Sender<TransportEvent>,
}

/// Drives a spawned station. Dropping the handle winds the station down.
#[derive(Clone)]
pub struct StationHandle {
    identity: ParticipantId,
    context: StationContext,
    command_tx: mpsc::Sender<StationCommand>,
}

impl StationHandle {
    pub fn identity(&self) -> &ParticipantId {
        &self.identity
    }

    pub fn context(&self) -> &StationContext {
        &self.context
    }

    /// Replace the media description; every connected listener gets the new
    /// snapshot, every future listener gets it on connect.
    pub async fn set_media(&self, description: MediaDescription) {
        if self
            .command_tx
            .send(StationCommand::UpdateMedia(description))
            .await
            .is_err()
        {
            debug!("Station is gone, media update dropped");
        }
    }

    /// Broadcast a chat message authored by the station.
    pub async fn send_chat(&self, text: impl Into<String>) {
        if self
            .command_tx
            .send(StationCommand::Chat(text.into()))
            .await
            .is_err()
        {
            debug!("Station is gone, chat dropped");
        }
    }
}

impl<S> Station<S>
where
    S: Stream<Item = SignalFrame> + Send + Unpin + 'static,
{
    pub fn new(
        identity: ParticipantId,
        signals: S,
        signaling: Arc<dyn SignalingOutput>,
        transport_factory: Arc<dyn TransportFactory>,
        behavior: Box<dyn StationBehavior>,
        command_rx: mpsc::Receiver<StationCommand>,
    ) -> Self {
        let (transport_tx, transport_rx) = mpsc::channel(256);

        Self {
            identity,
            signals,
            signaling,
            transport_factory,
            behavior,
            links: HashMap::new(),
            connected: Arc::new(DashMap::new()),
            media: None,
            command_rx,
            transport_rx,
            transport_tx,
        }
    }

    /// Spawn the station onto the runtime and get the handle that drives it.
    pub fn spawn(
        identity: ParticipantId,
        signals: S,
        signaling: Arc<dyn SignalingOutput>,
        transport_factory: Arc<dyn TransportFactory>,
        behavior: Box<dyn StationBehavior>,
    ) -> StationHandle {
        let (command_tx, command_rx) = mpsc::channel(64);
        let station = Station::new(
            identity.clone(),
            signals,
            signaling,
            transport_factory,
            behavior,
            command_rx,
        );
        let context = station.context();

        tokio::spawn(station.run());

        StationHandle {
            identity,
            context,
            command_tx,
        }
    }

    fn context(&self) -> StationContext {
        StationContext::new(self.connected.clone())
    }

    pub async fn run(mut self) {
        info!("Station {} event loop started", self.identity);

        loop {
            let ctx = self.context();

            tokio::select! {
                frame = self.signals.next() => {
                    match frame {
                        Some(frame) => self.handle_frame(frame, &ctx).await,
                        None => {
                            info!("Signal stream ended. Shutting down station.");
                            break;
                        }
                    }
                }

                evt = self.transport_rx.recv() => {
                    match evt {
                        Some(evt) => self.handle_transport_event(evt, &ctx).await,
                        None => {
                            warn!("Transport channel closed unexpectedly");
                            break;
                        }
                    }
                }

                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(cmd) => self.handle_command(cmd, &ctx).await,
                        None => {
                            info!("Command channel closed. Shutting down station.");
                            break;
                        }
                    }
                }
            }
        }

        self.shutdown().await;
    }

    async fn handle_frame(&mut self, frame: SignalFrame, ctx: &StationContext) {
        let Some(signal) = frame.decode() else {
            debug!("Skipping {} frame on the signaling stream", frame.kind);
            return;
        };

        match signal {
            Signal::Logon { from } => self.handle_logon(from).await,
            Signal::Answer { to, from, answer } => {
                if to != self.identity {
                    return;
                }
                self.handle_answer(from, answer).await;
            }
            Signal::IceCandidate {
                to,
                from,
                candidate,
            } => {
                if to != self.identity {
                    return;
                }
                self.handle_candidate(from, candidate).await;
            }
            Signal::Logoff { from } => {
                info!("Listener {} logged off", from);
                self.drop_listener(&from, ctx).await;
            }
            // Our own published frames echo back through the relay, and
            // relay-level application kinds ride the same stream; none of
            // them drive the handshake.
            Signal::IdentityAssigned(_)
            | Signal::Offer { .. }
            | Signal::Chat(_)
            | Signal::MetadataUpdate(_) => {}
        }
    }

    async fn handle_logon(&mut self, listener: ParticipantId) {
        if listener == self.identity || self.links.contains_key(&listener) {
            debug!("Ignoring logon from {}", listener);
            return;
        }

        info!("Listener {} logged on, opening a transport", listener);

        let transport = match self
            .transport_factory
            .create(listener.clone(), self.transport_tx.clone())
            .await
        {
            Ok(transport) => transport,
            Err(e) => {
                error!("Failed to create transport for {}: {:?}", listener, e);
                return;
            }
        };

        let offer = match transport.create_offer().await {
            Ok(offer) => offer,
            Err(e) => {
                error!("Failed to create offer for {}: {:?}", listener, e);
                transport.close().await;
                return;
            }
        };

        let mut negotiation = Negotiation::new();
        negotiation.mark_offer_sent();

        self.links.insert(
            listener.clone(),
            ListenerLink {
                negotiation,
                transport,
            },
        );

        self.signaling
            .publish(Signal::Offer {
                to: listener,
                from: self.identity.clone(),
                offer,
            })
            .await;
    }

    async fn handle_answer(&mut self, from: ParticipantId, answer: Value) {
        let Some(link) = self.links.get_mut(&from) else {
            debug!("Stale answer from {}", from);
            return;
        };

        let Some(pending) = link.negotiation.accept_answer() else {
            debug!("Duplicate answer from {} ignored", from);
            return;
        };

        if let Err(e) = link.transport.apply_remote_answer(answer).await {
            error!("Failed to apply answer from {}: {:?}", from, e);
        }

        for candidate in pending {
            if let Err(e) = link.transport.add_ice_candidate(candidate).await {
                warn!("Failed to apply buffered candidate from {}: {:?}", from, e);
            }
        }
    }

    async fn handle_candidate(&mut self, from: ParticipantId, candidate: Value) {
        let Some(link) = self.links.get_mut(&from) else {
            debug!("Candidate for unknown negotiation with {}", from);
            return;
        };

        match link.negotiation.accept_candidate(candidate) {
            CandidateAction::Apply(candidate) => {
                if let Err(e) = link.transport.add_ice_candidate(candidate).await {
                    warn!("Failed to apply candidate from {}: {:?}", from, e);
                }
            }
            CandidateAction::Hold | CandidateAction::Discard => {}
        }
    }

    async fn handle_transport_event(&mut self, event: TransportEvent, ctx: &StationContext) {
        match event {
            TransportEvent::Connected(listener) => {
                let Some(link) = self.links.get_mut(&listener) else {
                    return;
                };
                if !link.negotiation.complete() {
                    return;
                }

                info!("Listener {} fully connected", listener);

                let mux = ChannelMultiplexer::new(link.transport.clone());
                self.connected.insert(listener.clone(), mux);

                if let Some(description) = self.media.clone() {
                    ctx.push_metadata_to(&listener, &description).await;
                }

                self.behavior.on_listener_connected(ctx, listener).await;
            }

            TransportEvent::ChannelMessage(listener, SubChannel::Chat, data) => {
                let mut message = match ChatChannel::decode(&data) {
                    Ok(message) => message,
                    Err(e) => {
                        warn!("Undecodable chat from {}: {}", listener, e);
                        return;
                    }
                };
                // The lane, not the payload, says who is talking.
                message.from = listener;

                self.behavior.on_chat(ctx, message.clone()).await;
                ctx.broadcast_chat(&message).await;
            }

            TransportEvent::ChannelMessage(listener, SubChannel::Metadata, _) => {
                warn!("Listener {} tried to push metadata, dropped", listener);
            }

            TransportEvent::Disconnected(listener) => {
                info!("Transport to {} went down", listener);
                self.drop_listener(&listener, ctx).await;
            }

            TransportEvent::CandidateGenerated(listener, candidate) => {
                self.signaling
                    .publish(Signal::IceCandidate {
                        to: listener,
                        from: self.identity.clone(),
                        candidate,
                    })
                    .await;
            }
        }
    }

    async fn handle_command(&mut self, cmd: StationCommand, ctx: &StationContext) {
        match cmd {
            StationCommand::UpdateMedia(description) => {
                self.media = Some(description.clone());
                ctx.push_metadata(&description).await;
            }
            StationCommand::Chat(text) => {
                let message = ChatMessage::new(self.identity.clone(), text);
                ctx.broadcast_chat(&message).await;
            }
        }
    }

    async fn drop_listener(&mut self, listener: &ParticipantId, ctx: &StationContext) {
        let was_connected = self.connected.remove(listener).is_some();

        if let Some(mut link) = self.links.remove(listener) {
            link.negotiation.close();
            link.transport.close().await;
        }

        if was_connected {
            self.behavior.on_listener_left(ctx, listener.clone()).await;
        }
    }

    async fn shutdown(&mut self) {
        for (_, mut link) in self.links.drain() {
            link.negotiation.close();
            link.transport.close().await;
        }
        self.connected.clear();

        info!("Station {} event loop finished", self.identity);
    }
}
