use bytes::{Bytes, BytesMut};
use tracing::{debug, info, warn};

use seapack_registry::{PayloadType, TypeRegistry, ACK, BODY_REQUEST, NAV, POSITION_REQUEST, STRING_IMAGE};
use seapack_wire::{assemble, decode_ack, encode_ack, split, Header, NavFix, PoseTarget, WireError, HEADER_LEN};

use crate::config::LinkConfig;
use crate::counters::{Counters, LinkStats};
use crate::error::{LinkError, Result};
use crate::traits::{Clock, Consumer, Observer, Receipt, SystemClock, Transport};

/// An outgoing application message.
///
/// The variant set is closed: a field/type mismatch against a payload
/// layout cannot be constructed, so send-time failures reduce to unknown
/// topics and oversized envelopes.
#[derive(Debug, Clone)]
pub enum Outbound {
    /// World-frame pose request.
    PositionRequest(PoseTarget),
    /// Body-frame pose request.
    BodyRequest(PoseTarget),
    /// Navigation fix broadcast.
    Nav(NavFix),
    /// Raw byte blob.
    Blob(Bytes),
    /// General payload addressed by its external topic.
    General { topic: String, payload: Bytes },
}

impl Outbound {
    fn type_name(&self) -> &'static str {
        match self {
            Outbound::PositionRequest(_) => "position_request",
            Outbound::BodyRequest(_) => "body_request",
            Outbound::Nav(_) => "nav",
            Outbound::Blob(_) => "string_image",
            Outbound::General { .. } => "general",
        }
    }
}

/// The envelope pipeline pair for one acoustic link.
///
/// `send` assembles and publishes envelopes; `receive` splits, decodes,
/// dispatches, and acknowledges them. Both entry points take `&self` and
/// may be invoked concurrently; the sequence counters are the only shared
/// mutable state and move atomically.
pub struct Link<T, C, O> {
    config: LinkConfig,
    registry: TypeRegistry,
    transport: T,
    consumer: C,
    observer: O,
    clock: Box<dyn Clock + Send + Sync>,
    counters: Counters,
}

impl<T: Transport, C: Consumer, O: Observer> Link<T, C, O> {
    /// Create a link with the system wall clock.
    ///
    /// Fails only on registry conflicts in the config's general bindings,
    /// which is fatal at startup.
    pub fn new(
        config: LinkConfig,
        transport: T,
        consumer: C,
        observer: O,
    ) -> seapack_registry::Result<Self> {
        Self::with_clock(config, transport, consumer, observer, Box::new(SystemClock))
    }

    /// Create a link with an explicit time source.
    pub fn with_clock(
        config: LinkConfig,
        transport: T,
        consumer: C,
        observer: O,
        clock: Box<dyn Clock + Send + Sync>,
    ) -> seapack_registry::Result<Self> {
        let registry = config.build_registry()?;
        Ok(Self {
            config,
            registry,
            transport,
            consumer,
            observer,
            clock,
            counters: Counters::default(),
        })
    }

    /// Encode an outgoing message into an envelope and publish it.
    ///
    /// Returns the assigned message id. The outgoing counter moves exactly
    /// once per successful call and never on a failure path.
    pub fn send(&self, outbound: Outbound) -> Result<u16> {
        let ty = match &outbound {
            Outbound::General { topic, .. } => self.registry.resolve_by_topic(topic)?,
            named => self.registry.resolve_by_name(named.type_name())?,
        };

        let mut body = BytesMut::new();
        match &outbound {
            Outbound::PositionRequest(pose) | Outbound::BodyRequest(pose) => pose.encode(&mut body),
            Outbound::Nav(fix) => fix.encode(&mut body),
            Outbound::Blob(payload) | Outbound::General { payload, .. } => {
                body.extend_from_slice(payload);
            }
        }

        self.transmit(ty, &body)
    }

    /// Split, decode, and dispatch one received envelope.
    ///
    /// Every failure is local to the envelope: the error is reported and
    /// returned, and the pipeline stays ready for the next receipt. The
    /// incoming counter covers accepted envelopes only; an unknown type id
    /// leaves it untouched.
    pub fn receive(&self, raw: &[u8], source_address: u8) -> Result<()> {
        let (header, body) = match split(raw) {
            Ok(parts) => parts,
            Err(err) => {
                warn!(
                    name = %self.config.name,
                    length = raw.len(),
                    error = %err,
                    "dropping runt envelope"
                );
                return Err(err.into());
            }
        };

        let ty = match self.registry.resolve_by_id(header.type_id) {
            Ok(ty) => ty,
            Err(err) => {
                warn!(
                    name = %self.config.name,
                    type_id = header.type_id,
                    message_id = header.message_id,
                    length = raw.len(),
                    "dropping envelope of unknown type"
                );
                return Err(err.into());
            }
        };

        let received_at = self.clock.now();
        let transit = received_at - header.sent_at;
        let throughput = if transit > 0.0 {
            Some(raw.len() as f64 / transit)
        } else {
            if transit < 0.0 {
                warn!(
                    name = %self.config.name,
                    message_id = header.message_id,
                    sent_at = header.sent_at,
                    received_at,
                    "envelope arrived before it was sent; clocks disagree"
                );
            }
            None
        };

        let receive_count = self.counters.record_receipt();
        self.observer.receipt(&Receipt {
            sent_at: header.sent_at,
            received_at,
            length: raw.len(),
            throughput,
            receive_count,
        });

        if let Err(err) = self.dispatch(ty, body) {
            warn!(
                name = %self.config.name,
                payload_type = %ty.name,
                message_id = header.message_id,
                body_length = body.len(),
                error = %err,
                "dropping undecodable envelope"
            );
            return Err(err);
        }

        debug!(
            name = %self.config.name,
            payload_type = %ty.name,
            message_id = header.message_id,
            source = source_address,
            "received message"
        );

        // Acknowledgment confirms receipt, not downstream processing.
        // An ack itself is never acked, whatever the config says.
        if ty.id != ACK && self.config.requiring_ack.contains(&ty.name) {
            if let Err(err) = self.send_ack(header.message_id) {
                warn!(
                    name = %self.config.name,
                    message_id = header.message_id,
                    error = %err,
                    "failed sending ack"
                );
            }
        }

        Ok(())
    }

    /// Current sequence counter snapshot.
    pub fn stats(&self) -> LinkStats {
        self.counters.snapshot()
    }

    /// The link's configuration.
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// The link's type registry.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    fn transmit(&self, ty: &PayloadType, body: &[u8]) -> Result<u16> {
        // Admission check before the counter moves: failed sends must not
        // consume a message id.
        let size = HEADER_LEN + body.len();
        if size > self.config.max_envelope_len {
            return Err(WireError::EnvelopeTooLarge {
                size,
                max: self.config.max_envelope_len,
            }
            .into());
        }

        let message_id = self.counters.next_message_id();
        let header = Header::new(ty.id, message_id, self.clock.now());
        let envelope = assemble(&header, body, self.config.max_envelope_len)?;

        info!(
            name = %self.config.name,
            payload_type = %ty.name,
            message_id,
            address = self.config.target_address,
            length = envelope.len(),
            "sending message"
        );
        self.transport.publish(envelope, self.config.target_address);
        Ok(message_id)
    }

    fn send_ack(&self, message_id: u16) -> Result<u16> {
        let ty = self.registry.resolve_by_id(ACK)?;
        let mut body = BytesMut::new();
        encode_ack(message_id, &mut body);
        self.transmit(ty, &body)
    }

    fn dispatch(&self, ty: &PayloadType, body: &[u8]) -> Result<()> {
        match ty.id {
            POSITION_REQUEST => self.consumer.position_request(PoseTarget::decode(body)?),
            BODY_REQUEST => self.consumer.body_request(PoseTarget::decode(body)?),
            NAV => self.consumer.nav(NavFix::decode(body)?),
            STRING_IMAGE => self.consumer.blob(Bytes::copy_from_slice(body)),
            ACK => {
                let acked = decode_ack(body)?;
                info!(
                    name = %self.config.name,
                    message_id = acked,
                    "message delivered"
                );
                self.consumer.ack_confirmed(acked);
            }
            _ => match &ty.topic {
                Some(topic) => self.consumer.general(topic, Bytes::copy_from_slice(body)),
                None => return Err(LinkError::Unroutable(ty.name.clone())),
            },
        }
        Ok(())
    }
}
