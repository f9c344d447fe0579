//! Versioned binary codec for appearance settings, and the glue that moves them over a transport.
//!
//! Layout (little-endian), version 0:
//!
//! | field               | type |
//! |---------------------|------|
//! | version             | u16  |
//! | separate outlines   | bool |
//! | variant             | u8   |
//! | brush tint (%)      | u8   |
//! | brush colour r/g/b  | u8×3 |
//! | count               | u8   |
//! | scale (%)           | u16  |
//! | spread (%)          | u8   |
//! | feather             | bool |
//! | paint brush         | bool |

use crate::{
    AppearanceConfig, Error, LATEST_SETTINGS_VERSION, MAX_TAIL_COUNT, PeerId, PeerSettingsTable,
    Rgb, SETTINGS_PACKET_ID, TailConstants, TailVariant,
};
use byteorder::{ByteOrder, LittleEndian};
use std::sync::atomic::{AtomicBool, Ordering};

/// Encoded size of a version 0 packet.
pub const SETTINGS_PACKET_LEN: usize = 14;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SettingsPacket {
    pub version: u16,
    pub settings: AppearanceConfig,
    /// `true` when the payload could not be interpreted and `settings` is the caller's fallback.
    pub fallback: bool,
}

struct WireInput<'a> {
    bytes: &'a [u8],
    cursor: usize,
}

impl<'a> WireInput<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, cursor: 0 }
    }

    fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8], Error> {
        let end = self.cursor + len;
        if end > self.bytes.len() {
            return Err(Error::SettingsDecode {
                message: format!("unexpected end of packet reading {what} at byte {}", self.cursor),
            });
        }
        let out = &self.bytes[self.cursor..end];
        self.cursor = end;
        Ok(out)
    }

    fn read_u8(&mut self, what: &str) -> Result<u8, Error> {
        Ok(self.take(1, what)?[0])
    }

    fn read_bool(&mut self, what: &str) -> Result<bool, Error> {
        Ok(self.read_u8(what)? != 0)
    }

    fn read_u16(&mut self, what: &str) -> Result<u16, Error> {
        Ok(LittleEndian::read_u16(self.take(2, what)?))
    }
}

struct WireOutput {
    bytes: Vec<u8>,
}

impl WireOutput {
    fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    fn write_bool(&mut self, value: bool) {
        self.write_u8(value as u8);
    }

    fn write_u16(&mut self, value: u16) {
        let mut buf = [0u8; 2];
        LittleEndian::write_u16(&mut buf, value);
        self.bytes.extend_from_slice(&buf);
    }
}

/// Encodes and decodes appearance packets.
///
/// The unknown-version warning is emitted at most once per process, however many codecs decode.
#[derive(Clone, Debug)]
pub struct SettingsCodec {
    max_scale: u16,
}

static UNKNOWN_VERSION_WARNED: AtomicBool = AtomicBool::new(false);

/// Number of unknown-version warnings logged by this process so far (0 or 1).
pub fn unknown_version_warnings() -> u32 {
    u32::from(UNKNOWN_VERSION_WARNED.load(Ordering::Relaxed))
}

impl Default for SettingsCodec {
    fn default() -> Self {
        Self::new(&TailConstants::default())
    }
}

impl SettingsCodec {
    pub fn new(constants: &TailConstants) -> Self {
        Self::with_max_scale(constants.max_remote_scale)
    }

    pub fn with_max_scale(max_scale: u16) -> Self {
        Self { max_scale }
    }

    pub fn max_scale(&self) -> u16 {
        self.max_scale
    }

    pub fn encode(&self, settings: &AppearanceConfig) -> Vec<u8> {
        let mut out = WireOutput {
            bytes: Vec::with_capacity(SETTINGS_PACKET_LEN),
        };
        out.write_u16(LATEST_SETTINGS_VERSION);
        out.write_bool(settings.separate_outlines);
        out.write_u8(settings.variant.to_wire());
        out.write_u8(settings.brush_tint_percent.min(100));
        out.write_u8(settings.brush_color.r);
        out.write_u8(settings.brush_color.g);
        out.write_u8(settings.brush_color.b);
        out.write_u8(settings.count.clamp(1, MAX_TAIL_COUNT as u8));
        out.write_u16(settings.scale_percent.min(self.max_scale));
        out.write_u8(settings.spread_percent.min(100));
        out.write_bool(settings.feather);
        out.write_bool(settings.paint_brush);
        out.bytes
    }

    /// Decodes a packet, clamping every field into range.
    ///
    /// Packets from a newer version are not an error: `fallback` is returned with
    /// [`SettingsPacket::fallback`] set. Truncated packets are.
    pub fn decode(&self, bytes: &[u8], fallback: AppearanceConfig) -> Result<SettingsPacket, Error> {
        let mut input = WireInput::new(bytes);
        let version = input.read_u16("version")?;
        if version > LATEST_SETTINGS_VERSION {
            self.warn_unknown_version(version);
            return Ok(SettingsPacket {
                version,
                settings: fallback,
                fallback: true,
            });
        }

        let separate_outlines = input.read_bool("separate outlines")?;
        let variant = TailVariant::from_wire(input.read_u8("variant")?);
        let brush_tint_percent = input.read_u8("brush tint")?.min(100);
        let brush_color = Rgb::new(
            input.read_u8("brush colour")?,
            input.read_u8("brush colour")?,
            input.read_u8("brush colour")?,
        );
        let count = input.read_u8("count")?.clamp(1, MAX_TAIL_COUNT as u8);
        let scale_percent = input.read_u16("scale")?.min(self.max_scale);
        let spread_percent = input.read_u8("spread")?.min(100);
        let feather = input.read_bool("feather")?;
        let paint_brush = input.read_bool("paint brush")?;

        Ok(SettingsPacket {
            version,
            settings: AppearanceConfig {
                variant,
                scale_percent,
                count,
                spread_percent,
                separate_outlines,
                brush_tint_percent,
                brush_color,
                feather,
                paint_brush,
            },
            fallback: false,
        })
    }

    fn warn_unknown_version(&self, version: u16) {
        if UNKNOWN_VERSION_WARNED.swap(true, Ordering::Relaxed) {
            return;
        }
        log::warn!(
            "received tail settings packet version {version}, newer than supported version \
             {LATEST_SETTINGS_VERSION}; using defaults for peers that send it"
        );
    }
}

/// Host network layer.
pub trait Transport {
    /// Sends `payload` to every connected peer. Fire-and-forget.
    fn send(&mut self, packet_id: &str, payload: Vec<u8>);
}

/// Sends the local appearance to peers and records theirs as it arrives.
#[derive(Debug)]
pub struct SettingsExchange<'a> {
    codec: SettingsCodec,
    peers: &'a PeerSettingsTable,
}

impl<'a> SettingsExchange<'a> {
    pub fn new(codec: SettingsCodec, peers: &'a PeerSettingsTable) -> Self {
        Self { codec, peers }
    }

    pub fn codec(&self) -> &SettingsCodec {
        &self.codec
    }

    pub fn peers(&self) -> &'a PeerSettingsTable {
        self.peers
    }

    /// Call once the connection is established.
    pub fn on_ready<T: Transport + ?Sized>(&self, transport: &mut T, local: &AppearanceConfig) {
        self.send_local(transport, local);
    }

    /// Call whenever a local appearance setting changes.
    pub fn on_local_change<T: Transport + ?Sized>(
        &self,
        transport: &mut T,
        local: &AppearanceConfig,
    ) {
        self.send_local(transport, local);
    }

    fn send_local<T: Transport + ?Sized>(&self, transport: &mut T, local: &AppearanceConfig) {
        transport.send(SETTINGS_PACKET_ID, self.codec.encode(local));
    }

    /// Decodes a received packet and records it for `peer`.
    ///
    /// Packets that don't name a sender are dropped. Returns the stored settings.
    pub fn on_receive(
        &self,
        peer: Option<PeerId>,
        bytes: &[u8],
        fallback: AppearanceConfig,
    ) -> Result<Option<AppearanceConfig>, Error> {
        let Some(peer) = peer else {
            log::warn!("dropping tail settings packet without a sender");
            return Ok(None);
        };
        let packet = self.codec.decode(bytes, fallback)?;
        self.peers.upsert(peer, packet.settings);
        Ok(Some(packet.settings))
    }
}
