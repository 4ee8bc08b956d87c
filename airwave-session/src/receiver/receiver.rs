use crate::channel::{ChannelMultiplexer, ChatChannel, MetadataChannel};
use crate::negotiation::{CandidateAction, Negotiation};
use crate::receiver::receiver_behavior::ReceiverBehavior;
use crate::receiver::receiver_command::ReceiverCommand;
use crate::transport::{DirectTransport, SubChannel, TransportEvent, TransportFactory};
use airwave_core::{ChatMessage, ParticipantId, Signal, SignalFrame, SignalingOutput};
use futures::{Stream, StreamExt};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// The peer endpoint. Logs on, answers the one offer the station addresses
/// to it and, once connected, receives metadata snapshots and trades chat
/// over the direct transport.
pub struct Receiver<S> {
    identity: ParticipantId,
    signals: S,
    signaling: Arc<dyn SignalingOutput>,
    transport_factory: Arc<dyn TransportFactory>,
    behavior: Box<dyn ReceiverBehavior>,
    negotiation: Negotiation,
    host: Option<ParticipantId>,
    transport: Option<Arc<dyn DirectTransport>>,
    mux: Option<ChannelMultiplexer>,
    command_rx: mpsc::Receiver<ReceiverCommand>,
    transport_rx: mpsc::Receiver<TransportEvent>,
    transport_tx: mpsc::Sender<TransportEvent>,
}

/// Drives a spawned receiver. Dropping the handle winds the receiver down,
/// which also announces the logoff.
#[derive(Clone)]
pub struct ReceiverHandle {
    identity: ParticipantId,
    command_tx: mpsc::Sender<ReceiverCommand>,
}

impl ReceiverHandle {
    pub fn identity(&self) -> &ParticipantId {
        &self.identity
    }

    /// Fire and forget; silently dropped until the transport is up.
    pub async fn send_chat(&self, text: impl Into<String>) {
        if self
            .command_tx
            .send(ReceiverCommand::Chat(text.into()))
            .await
            .is_err()
        {
            debug!("Receiver is gone, chat dropped");
        }
    }

    /// Announce logoff and stop the receiver.
    pub async fn logoff(&self) {
        if self.command_tx.send(ReceiverCommand::Logoff).await.is_err() {
            debug!("Receiver already stopped");
        }
    }
}

impl<S> Receiver<S>
where
    S: Stream<Item = SignalFrame> + Send + Unpin + 'static,
{
    pub fn new(
        identity: ParticipantId,
        signals: S,
        signaling: Arc<dyn SignalingOutput>,
        transport_factory: Arc<dyn TransportFactory>,
        behavior: Box<dyn ReceiverBehavior>,
        command_rx: mpsc::Receiver<ReceiverCommand>,
    ) -> Self {
        let (transport_tx, transport_rx) = mpsc::channel(256);

        Self {
            identity,
            signals,
            signaling,
            transport_factory,
            behavior,
            negotiation: Negotiation::new(),
            host: None,
            transport: None,
            mux: None,
            command_rx,
            transport_rx,
            transport_tx,
        }
    }

    /// Spawn the receiver onto the runtime and get the handle that drives it.
    pub fn spawn(
        identity: ParticipantId,
        signals: S,
        signaling: Arc<dyn SignalingOutput>,
        transport_factory: Arc<dyn TransportFactory>,
        behavior: Box<dyn ReceiverBehavior>,
    ) -> ReceiverHandle {
        let (command_tx, command_rx) = mpsc::channel(64);
        let receiver = Receiver::new(
            identity.clone(),
            signals,
            signaling,
            transport_factory,
            behavior,
            command_rx,
        );

        tokio::spawn(receiver.run());

        ReceiverHandle {
            identity,
            command_tx,
        }
    }

    pub async fn run(mut self) {
        info!("Receiver {} event loop started", self.identity);

        self.signaling
            .publish(Signal::Logon {
                from: self.identity.clone(),
            })
            .await;

        loop {
            tokio::select! {
                frame = self.signals.next() => {
                    match frame {
                        Some(frame) => self.handle_frame(frame).await,
                        None => {
                            info!("Signal stream ended. Shutting down receiver.");
                            break;
                        }
                    }
                }

                evt = self.transport_rx.recv() => {
                    match evt {
                        Some(evt) => self.handle_transport_event(evt).await,
                        None => {
                            warn!("Transport channel closed unexpectedly");
                            break;
                        }
                    }
                }

                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(ReceiverCommand::Chat(text)) => self.send_chat(text).await,
                        Some(ReceiverCommand::Logoff) => {
                            info!("Receiver {} logging off", self.identity);
                            break;
                        }
                        None => {
                            info!("Command channel closed. Shutting down receiver.");
                            break;
                        }
                    }
                }
            }
        }

        self.shutdown().await;
    }

    async fn handle_frame(&mut self, frame: SignalFrame) {
        let Some(signal) = frame.decode() else {
            debug!("Skipping {} frame on the signaling stream", frame.kind);
            return;
        };

        match signal {
            Signal::Offer { to, from, offer } => {
                if to != self.identity {
                    return;
                }
                self.handle_offer(from, offer).await;
            }
            Signal::IceCandidate { to, candidate, .. } => {
                if to != self.identity {
                    return;
                }
                self.handle_candidate(candidate).await;
            }
            // Presence traffic, our own echoes and relay-level application
            // kinds; nothing a receiver reacts to.
            _ => {}
        }
    }

    async fn handle_offer(&mut self, host: ParticipantId, offer: Value) {
        if !self.negotiation.offer_acceptable() {
            debug!("Already negotiating, offer from {} ignored", host);
            return;
        }

        info!("Offer from station {}, answering", host);

        let transport = match self
            .transport_factory
            .create(host.clone(), self.transport_tx.clone())
            .await
        {
            Ok(transport) => transport,
            Err(e) => {
                error!("Failed to create transport: {:?}", e);
                return;
            }
        };

        if let Err(e) = transport.apply_remote_offer(offer).await {
            error!("Failed to apply offer: {:?}", e);
            transport.close().await;
            return;
        }

        let answer = match transport.create_answer().await {
            Ok(answer) => answer,
            Err(e) => {
                error!("Failed to create answer: {:?}", e);
                transport.close().await;
                return;
            }
        };

        self.transport = Some(transport);
        self.host = Some(host.clone());

        self.signaling
            .publish(Signal::Answer {
                to: host,
                from: self.identity.clone(),
                answer,
            })
            .await;

        let pending = self.negotiation.answer_published();
        if let Some(transport) = &self.transport {
            for candidate in pending {
                if let Err(e) = transport.add_ice_candidate(candidate).await {
                    warn!("Failed to apply buffered candidate: {:?}", e);
                }
            }
        }
    }

    async fn handle_candidate(&mut self, candidate: Value) {
        match self.negotiation.accept_candidate(candidate) {
            CandidateAction::Apply(candidate) => {
                let Some(transport) = &self.transport else {
                    warn!("Candidate ready but no transport, dropped");
                    return;
                };
                if let Err(e) = transport.add_ice_candidate(candidate).await {
                    warn!("Failed to apply candidate: {:?}", e);
                }
            }
            CandidateAction::Hold | CandidateAction::Discard => {}
        }
    }

    async fn handle_transport_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Connected(_) => {
                if !self.negotiation.complete() {
                    return;
                }
                let Some(transport) = &self.transport else {
                    return;
                };

                info!("Receiver {} connected to the station", self.identity);

                self.mux = Some(ChannelMultiplexer::new(transport.clone()));
                self.behavior.on_connected().await;
            }

            TransportEvent::ChannelMessage(_, SubChannel::Metadata, data) => {
                match MetadataChannel::decode(&data) {
                    Ok(description) => self.behavior.on_metadata(description).await,
                    Err(e) => warn!("Undecodable metadata snapshot: {}", e),
                }
            }

            TransportEvent::ChannelMessage(_, SubChannel::Chat, data) => {
                match ChatChannel::decode(&data) {
                    Ok(message) => self.behavior.on_chat(message).await,
                    Err(e) => warn!("Undecodable chat message: {}", e),
                }
            }

            TransportEvent::Disconnected(_) => {
                info!("Station link went down");
                self.negotiation.close();
                self.mux = None;
                if let Some(transport) = self.transport.take() {
                    transport.close().await;
                }
                self.behavior.on_disconnected().await;
            }

            TransportEvent::CandidateGenerated(_, candidate) => {
                let Some(host) = self.host.clone() else {
                    warn!("Local candidate with no station to send it to");
                    return;
                };
                self.signaling
                    .publish(Signal::IceCandidate {
                        to: host,
                        from: self.identity.clone(),
                        candidate,
                    })
                    .await;
            }
        }
    }

    async fn send_chat(&mut self, text: String) {
        let Some(mux) = &self.mux else {
            debug!("Chat before connect dropped");
            return;
        };

        mux.chat()
            .send(&ChatMessage::new(self.identity.clone(), text))
            .await;
    }

    async fn shutdown(&mut self) {
        // Courtesy to the station; nothing depends on it arriving.
        self.signaling
            .publish(Signal::Logoff {
                from: self.identity.clone(),
            })
            .await;

        self.negotiation.close();
        self.mux = None;
        if let Some(transport) = self.transport.take() {
            transport.close().await;
        }

        info!("Receiver {} event loop finished", self.identity);
    }
}
