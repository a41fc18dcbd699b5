//! Decoded ethtool query results.
//!
//! This module contains strongly-typed structures for ioctl responses.

use std::fmt;

use super::bitset::{LinkModeSet, WAKE_MAGICSECURE, decode_wol_modes};
use super::wire::{EthtoolCoalesce, EthtoolLinkSettings, EthtoolWolinfo};
use super::{SOPASS_MAX, StringSetId};

// =============================================================================
// Common Types
// =============================================================================

/// Link speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Speed {
    /// No link, or the driver does not know.
    #[default]
    Unknown,
    /// Speed in Mb/s.
    Mbps(u32),
}

impl Speed {
    /// `SPEED_UNKNOWN` as the kernel writes it (-1).
    pub const UNKNOWN_U32: u32 = u32::MAX;
    /// `SPEED_UNKNOWN` truncated to 16 bits by older drivers.
    pub const UNKNOWN_U16: u32 = u16::MAX as u32;

    /// Parse from kernel value.
    pub fn from_u32(v: u32) -> Self {
        match v {
            0 | Self::UNKNOWN_U16 | Self::UNKNOWN_U32 => Speed::Unknown,
            mbps => Speed::Mbps(mbps),
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speed::Unknown => f.write_str("Unknown"),
            Speed::Mbps(v) => write!(f, "{}Mb/s", v),
        }
    }
}

/// Duplex mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Duplex {
    /// Half duplex.
    Half,
    /// Full duplex.
    Full,
    /// Unknown duplex.
    Unknown,
}

impl Duplex {
    /// Parse from kernel value.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0x00 => Some(Duplex::Half),
            0x01 => Some(Duplex::Full),
            0xff => Some(Duplex::Unknown),
            _ => None,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Duplex::Half => "Half",
            Duplex::Full => "Full",
            Duplex::Unknown => "Unknown",
        }
    }
}

/// Port type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Port {
    /// Twisted pair (RJ45).
    Tp,
    /// Attachment Unit Interface.
    Aui,
    /// Media Independent Interface.
    Mii,
    /// Fiber optic.
    Fibre,
    /// BNC connector.
    Bnc,
    /// Direct attach (copper SFP+).
    Da,
    /// No port.
    None,
    /// Other port type.
    Other,
}

impl Port {
    /// Parse from kernel value.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0x00 => Some(Port::Tp),
            0x01 => Some(Port::Aui),
            0x02 => Some(Port::Mii),
            0x03 => Some(Port::Fibre),
            0x04 => Some(Port::Bnc),
            0x05 => Some(Port::Da),
            0xef => Some(Port::None),
            0xff => Some(Port::Other),
            _ => None,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Port::Tp => "Twisted Pair",
            Port::Aui => "AUI",
            Port::Mii => "MII",
            Port::Fibre => "FIBRE",
            Port::Bnc => "BNC",
            Port::Da => "Direct Attach Copper",
            Port::None => "NONE",
            Port::Other => "Other",
        }
    }
}

/// Transceiver type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transceiver {
    /// Internal transceiver.
    Internal,
    /// External transceiver.
    External,
}

impl Transceiver {
    /// Parse from kernel value.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0x00 => Some(Transceiver::Internal),
            0x01 => Some(Transceiver::External),
            _ => None,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Transceiver::Internal => "Internal",
            Transceiver::External => "External",
        }
    }
}

/// MDI-X status (`ETH_TP_MDI*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MdiX {
    /// MDI (straight-through).
    Mdi,
    /// MDI-X (crossover).
    MdiX,
    /// Auto MDI-X.
    Auto,
}

impl MdiX {
    /// Parse from kernel value. 0 is `ETH_TP_MDI_INVALID`.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0x01 => Some(MdiX::Mdi),
            0x02 => Some(MdiX::MdiX),
            0x03 => Some(MdiX::Auto),
            _ => None,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            MdiX::Mdi => "off",
            MdiX::MdiX => "on",
            MdiX::Auto => "auto",
        }
    }
}

macro_rules! display_by_name {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.name())
                }
            }

            #[cfg(feature = "output")]
            impl serde::Serialize for $ty {
                fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                    s.serialize_str(self.name())
                }
            }
        )*
    };
}

display_by_name!(Duplex, Port, Transceiver, MdiX);

#[cfg(feature = "output")]
impl serde::Serialize for Speed {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Speed::Unknown => s.serialize_str("Unknown"),
            Speed::Mbps(v) => s.serialize_u32(*v),
        }
    }
}

// =============================================================================
// Link Settings
// =============================================================================

/// Link settings.
///
/// Contains speed, duplex, physical layer information and the three
/// link-mode masks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "output", derive(serde::Serialize))]
pub struct LinkSettings {
    /// Current speed.
    pub speed: Speed,
    /// Current duplex mode.
    pub duplex: Option<Duplex>,
    /// Autonegotiation enabled.
    pub autoneg: bool,
    /// Physical port type.
    pub port: Option<Port>,
    /// PHY address.
    pub phy_address: u8,
    /// Current MDI-X status.
    pub mdix: Option<MdiX>,
    /// MDI-X control setting.
    pub mdix_ctrl: Option<MdiX>,
    /// Transceiver type.
    pub transceiver: Option<Transceiver>,
    /// Supported link modes.
    pub supported: LinkModeSet,
    /// Advertised link modes.
    pub advertised: LinkModeSet,
    /// Link partner's advertised link modes.
    pub lp_advertised: LinkModeSet,
}

impl LinkSettings {
    /// Decode a negotiated response header and its three masks.
    pub fn from_masks(
        header: &EthtoolLinkSettings,
        supported: &[u32],
        advertised: &[u32],
        lp_advertised: &[u32],
    ) -> Self {
        Self {
            speed: Speed::from_u32(header.speed),
            duplex: Duplex::from_u8(header.duplex),
            autoneg: header.autoneg != 0,
            port: Port::from_u8(header.port),
            phy_address: header.phy_address,
            mdix: MdiX::from_u8(header.eth_tp_mdix),
            mdix_ctrl: MdiX::from_u8(header.eth_tp_mdix_ctrl),
            transceiver: Transceiver::from_u8(header.transceiver),
            supported: LinkModeSet::decode(supported),
            advertised: LinkModeSet::decode(advertised),
            lp_advertised: LinkModeSet::decode(lp_advertised),
        }
    }

    /// Supported port types.
    pub fn supported_ports(&self) -> &[&'static str] {
        &self.supported.ports
    }

    /// Supported link modes.
    pub fn supported_modes(&self) -> &[&'static str] {
        &self.supported.modes
    }

    /// Advertised link modes.
    pub fn advertised_modes(&self) -> &[&'static str] {
        &self.advertised.modes
    }

    /// Link modes advertised by the link partner.
    pub fn lp_advertised_modes(&self) -> &[&'static str] {
        &self.lp_advertised.modes
    }
}

// =============================================================================
// Coalesce
// =============================================================================

/// Interrupt coalescing parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "output", derive(serde::Serialize))]
pub struct Coalesce {
    /// RX coalesce microseconds.
    pub rx_usecs: u32,
    /// RX max frames before interrupt.
    pub rx_max_frames: u32,
    /// RX coalesce microseconds (irq context).
    pub rx_usecs_irq: u32,
    /// RX max frames (irq context).
    pub rx_max_frames_irq: u32,
    /// TX coalesce microseconds.
    pub tx_usecs: u32,
    /// TX max frames before interrupt.
    pub tx_max_frames: u32,
    /// TX coalesce microseconds (irq context).
    pub tx_usecs_irq: u32,
    /// TX max frames (irq context).
    pub tx_max_frames_irq: u32,
    /// Stats block update microseconds.
    pub stats_block_usecs: u32,
    /// Use adaptive RX coalescing.
    pub use_adaptive_rx: bool,
    /// Use adaptive TX coalescing.
    pub use_adaptive_tx: bool,
    /// Packet rate low threshold.
    pub pkt_rate_low: u32,
    pub rx_usecs_low: u32,
    pub rx_max_frames_low: u32,
    pub tx_usecs_low: u32,
    pub tx_max_frames_low: u32,
    /// Packet rate high threshold.
    pub pkt_rate_high: u32,
    pub rx_usecs_high: u32,
    pub rx_max_frames_high: u32,
    pub tx_usecs_high: u32,
    pub tx_max_frames_high: u32,
    /// Rate sample interval in seconds.
    pub rate_sample_interval: u32,
}

impl From<&EthtoolCoalesce> for Coalesce {
    fn from(c: &EthtoolCoalesce) -> Self {
        Self {
            rx_usecs: c.rx_coalesce_usecs,
            rx_max_frames: c.rx_max_coalesced_frames,
            rx_usecs_irq: c.rx_coalesce_usecs_irq,
            rx_max_frames_irq: c.rx_max_coalesced_frames_irq,
            tx_usecs: c.tx_coalesce_usecs,
            tx_max_frames: c.tx_max_coalesced_frames,
            tx_usecs_irq: c.tx_coalesce_usecs_irq,
            tx_max_frames_irq: c.tx_max_coalesced_frames_irq,
            stats_block_usecs: c.stats_block_coalesce_usecs,
            use_adaptive_rx: c.use_adaptive_rx_coalesce != 0,
            use_adaptive_tx: c.use_adaptive_tx_coalesce != 0,
            pkt_rate_low: c.pkt_rate_low,
            rx_usecs_low: c.rx_coalesce_usecs_low,
            rx_max_frames_low: c.rx_max_coalesced_frames_low,
            tx_usecs_low: c.tx_coalesce_usecs_low,
            tx_max_frames_low: c.tx_max_coalesced_frames_low,
            pkt_rate_high: c.pkt_rate_high,
            rx_usecs_high: c.rx_coalesce_usecs_high,
            rx_max_frames_high: c.rx_max_coalesced_frames_high,
            tx_usecs_high: c.tx_coalesce_usecs_high,
            tx_max_frames_high: c.tx_max_coalesced_frames_high,
            rate_sample_interval: c.rate_sample_interval,
        }
    }
}

// =============================================================================
// Wake-on-LAN
// =============================================================================

/// One supported Wake-on-LAN option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "output", derive(serde::Serialize))]
pub struct WolMode {
    /// Bit index in the `WAKE_*` mask.
    pub index: u32,
    /// Option name (`magic`, `phy`, ...).
    pub name: &'static str,
    /// Whether the option is currently enabled.
    pub enabled: bool,
}

/// Wake-on-LAN settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "output", derive(serde::Serialize))]
pub struct Wol {
    /// Supported options.
    pub modes: Vec<WolMode>,
    /// SecureOn password, when `magic_secure` is supported.
    pub sopass: Option<[u8; SOPASS_MAX]>,
}

impl Wol {
    /// Check if an option is supported.
    pub fn supports(&self, name: &str) -> bool {
        self.modes.iter().any(|m| m.name == name)
    }

    /// Check if an option is enabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.modes.iter().any(|m| m.name == name && m.enabled)
    }

    /// Names of the enabled options.
    pub fn enabled(&self) -> Vec<&'static str> {
        self.modes
            .iter()
            .filter(|m| m.enabled)
            .map(|m| m.name)
            .collect()
    }
}

impl From<&EthtoolWolinfo> for Wol {
    fn from(w: &EthtoolWolinfo) -> Self {
        Self {
            modes: decode_wol_modes(w.supported, w.wolopts),
            sopass: (w.supported & WAKE_MAGICSECURE != 0).then_some(w.sopass),
        }
    }
}

// =============================================================================
// Features
// =============================================================================

/// One named device feature.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "output", derive(serde::Serialize))]
pub struct FeatureEntry {
    /// Feature name (`tx-checksum-ipv4`, ...).
    pub name: String,
    /// Bit index in the feature blocks.
    pub index: u32,
    /// The device can toggle it.
    pub is_available: bool,
    /// Currently enabled.
    pub is_active: bool,
    /// Requested by the user.
    pub is_requested: bool,
    /// Fixed for the device lifetime.
    pub is_never_changed: bool,
}

/// Device features (offloads).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "output", derive(serde::Serialize), serde(transparent))]
pub struct Features {
    entries: Vec<FeatureEntry>,
}

impl Features {
    /// Wrap decoded entries, in bit-index order.
    pub fn new(entries: Vec<FeatureEntry>) -> Self {
        Self { entries }
    }

    /// Look up a feature by name.
    pub fn get(&self, name: &str) -> Option<&FeatureEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Check if a feature is currently active.
    pub fn is_active(&self, name: &str) -> bool {
        self.get(name).is_some_and(|e| e.is_active)
    }

    /// Check if a feature can be toggled.
    pub fn is_available(&self, name: &str) -> bool {
        self.get(name).is_some_and(|e| e.is_available)
    }

    /// Get all active feature names.
    pub fn active_features(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.is_active)
            .map(|e| e.name.as_str())
            .collect()
    }

    /// Iterate over all features.
    pub fn iter(&self) -> impl Iterator<Item = &FeatureEntry> {
        self.entries.iter()
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no features.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// String Sets
// =============================================================================

/// A string set from the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringSet {
    /// String set ID.
    pub id: StringSetId,
    /// Strings in the set, indexed by position.
    pub strings: Vec<String>,
}

impl StringSet {
    /// Get a string by index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(|s| s.as_str())
    }

    /// Number of strings.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
