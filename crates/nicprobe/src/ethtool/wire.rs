//! Kernel structure layouts for the ethtool ioctl commands.
//!
//! Every structure here mirrors `include/uapi/linux/ethtool.h` field for
//! field. Integers are in native byte order. Structures the kernel pads
//! carry the padding as a named field so that `IntoBytes` can be derived;
//! `ethtool_sset_info` is declared packed, its `data` word following
//! `sset_mask` without alignment.
//!
//! Variable-length commands (`GSTRINGS`, `GFEATURES`, `GLINKSETTINGS`) are
//! modelled as a fixed header plus a trailer of zeroed bytes that the
//! kernel fills in.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::{ETH_GSTRING_LEN, EthtoolCmd, SOPASS_MAX};
use crate::error::{Error, Result};

/// Fixed-layout structure exchanged with the kernel.
///
/// Implemented for every type with a zerocopy byte representation.
pub trait WireStruct: FromBytes + IntoBytes + Immutable + Sized {
    /// Size of this structure on the wire.
    const SIZE: usize = std::mem::size_of::<Self>();

    /// Serialize to a fresh buffer.
    fn encode(&self) -> Vec<u8> {
        IntoBytes::as_bytes(self).to_vec()
    }

    /// Serialize followed by `trailer_len` zero bytes.
    fn encode_with_trailer(&self, trailer_len: usize) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::SIZE + trailer_len);
        buf.extend_from_slice(IntoBytes::as_bytes(self));
        buf.resize(Self::SIZE + trailer_len, 0);
        buf
    }

    /// Parse from the start of `data`.
    fn decode(data: &[u8]) -> Result<Self> {
        Self::decode_with_trailer(data).map(|(value, _)| value)
    }

    /// Parse from the start of `data`, returning the bytes that follow.
    fn decode_with_trailer(data: &[u8]) -> Result<(Self, &[u8])> {
        Self::read_from_prefix(data).map_err(|_| Error::malformed(Self::SIZE, data.len()))
    }
}

impl<T: FromBytes + IntoBytes + Immutable> WireStruct for T {}

/// Decode `count` consecutive structures from the start of `data`.
pub fn decode_array<T: WireStruct>(data: &[u8], count: usize) -> Result<Vec<T>> {
    let needed = count
        .checked_mul(T::SIZE)
        .ok_or_else(|| Error::malformed(usize::MAX, data.len()))?;
    if data.len() < needed {
        return Err(Error::malformed(needed, data.len()));
    }
    data[..needed].chunks_exact(T::SIZE).map(T::decode).collect()
}

/// A request structure bound to one ethtool command.
pub trait EthtoolCommand: WireStruct {
    /// Command written at offset 0.
    const CMD: EthtoolCmd;

    /// The command word as found in the structure.
    fn cmd_word(&self) -> u32;

    /// Whether the kernel left the command word untouched.
    fn cmd_matches(&self) -> bool {
        EthtoolCmd::from_u32(self.cmd_word()) == Some(Self::CMD)
    }
}

macro_rules! ethtool_command {
    ($ty:ty, $cmd:expr) => {
        impl EthtoolCommand for $ty {
            const CMD: EthtoolCmd = $cmd;

            fn cmd_word(&self) -> u32 {
                self.cmd
            }
        }
    };
}

// =============================================================================
// Fixed-size commands
// =============================================================================

/// Generic single-word command (struct ethtool_value).
#[repr(C)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout,
)]
pub struct EthtoolValue {
    /// Command.
    pub cmd: u32,
    /// Value.
    pub data: u32,
}

impl EthtoolValue {
    /// Create a request for the given command.
    pub fn new(cmd: EthtoolCmd) -> Self {
        Self {
            cmd: cmd.code(),
            data: 0,
        }
    }
}

ethtool_command!(EthtoolValue, EthtoolCmd::Glink);

/// Interrupt coalescing parameters (struct ethtool_coalesce).
#[repr(C)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout,
)]
pub struct EthtoolCoalesce {
    pub cmd: u32,
    pub rx_coalesce_usecs: u32,
    pub rx_max_coalesced_frames: u32,
    pub rx_coalesce_usecs_irq: u32,
    pub rx_max_coalesced_frames_irq: u32,
    pub tx_coalesce_usecs: u32,
    pub tx_max_coalesced_frames: u32,
    pub tx_coalesce_usecs_irq: u32,
    pub tx_max_coalesced_frames_irq: u32,
    pub stats_block_coalesce_usecs: u32,
    pub use_adaptive_rx_coalesce: u32,
    pub use_adaptive_tx_coalesce: u32,
    pub pkt_rate_low: u32,
    pub rx_coalesce_usecs_low: u32,
    pub rx_max_coalesced_frames_low: u32,
    pub tx_coalesce_usecs_low: u32,
    pub tx_max_coalesced_frames_low: u32,
    pub pkt_rate_high: u32,
    pub rx_coalesce_usecs_high: u32,
    pub rx_max_coalesced_frames_high: u32,
    pub tx_coalesce_usecs_high: u32,
    pub tx_max_coalesced_frames_high: u32,
    pub rate_sample_interval: u32,
}

impl EthtoolCoalesce {
    /// Create a `GCOALESCE` request.
    pub fn new() -> Self {
        Self {
            cmd: EthtoolCmd::Gcoalesce.code(),
            ..Default::default()
        }
    }
}

ethtool_command!(EthtoolCoalesce, EthtoolCmd::Gcoalesce);

/// Wake-on-LAN configuration (struct ethtool_wolinfo).
#[repr(C)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout,
)]
pub struct EthtoolWolinfo {
    /// Command.
    pub cmd: u32,
    /// Supported `WAKE_*` options.
    pub supported: u32,
    /// Enabled `WAKE_*` options.
    pub wolopts: u32,
    /// SecureOn password.
    pub sopass: [u8; SOPASS_MAX],
    /// Tail padding to 4-byte alignment.
    pub pad: [u8; 2],
}

impl EthtoolWolinfo {
    /// Create a `GWOL` request.
    pub fn new() -> Self {
        Self {
            cmd: EthtoolCmd::Gwol.code(),
            ..Default::default()
        }
    }
}

ethtool_command!(EthtoolWolinfo, EthtoolCmd::Gwol);

/// String-set size query (struct ethtool_sset_info with one data word).
///
/// Packed: the kernel struct ends in a flexible `__u32 data[]` right after
/// the 64-bit mask, so one entry makes 20 bytes, not 24.
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable)]
pub struct EthtoolSsetInfo {
    /// Command.
    pub cmd: u32,
    /// Reserved, must be zero.
    pub reserved: u32,
    /// Requested sets on input, sets the kernel answered for on output.
    pub sset_mask: u64,
    /// Size of the single requested set.
    pub data: u32,
}

impl EthtoolSsetInfo {
    /// Create a `GSSET_INFO` request for the sets in `sset_mask`.
    pub fn new(sset_mask: u64) -> Self {
        Self {
            cmd: EthtoolCmd::GssetInfo.code(),
            reserved: 0,
            sset_mask,
            data: 0,
        }
    }

    /// Number of strings in `set`, or 0 if the kernel cleared its bit.
    pub fn count_for(&self, set_mask: u64) -> u32 {
        let mask = self.sset_mask;
        if mask & set_mask != 0 { self.data } else { 0 }
    }
}

ethtool_command!(EthtoolSsetInfo, EthtoolCmd::GssetInfo);

// =============================================================================
// Variable-length commands
// =============================================================================

/// String-set header (struct ethtool_gstrings), followed by
/// `len * ETH_GSTRING_LEN` bytes.
#[repr(C)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout,
)]
pub struct EthtoolGstrings {
    /// Command.
    pub cmd: u32,
    /// `ETH_SS_*` set id.
    pub string_set: u32,
    /// Number of strings.
    pub len: u32,
}

impl EthtoolGstrings {
    /// Create a `GSTRINGS` request for `len` strings of `string_set`.
    pub fn new(string_set: u32, len: u32) -> Self {
        Self {
            cmd: EthtoolCmd::Gstrings.code(),
            string_set,
            len,
        }
    }

    /// Size of the string trailer for `len` strings.
    pub fn trailer_len(len: u32) -> usize {
        len as usize * ETH_GSTRING_LEN
    }
}

ethtool_command!(EthtoolGstrings, EthtoolCmd::Gstrings);

/// Feature block (struct ethtool_get_features_block).
#[repr(C)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout,
)]
pub struct EthtoolFeaturesBlock {
    /// Features the device can toggle.
    pub available: u32,
    /// Features the user asked for.
    pub requested: u32,
    /// Features currently enabled.
    pub active: u32,
    /// Features fixed for the device lifetime.
    pub never_changed: u32,
}

/// Feature query header (struct ethtool_gfeatures), followed by `size`
/// [`EthtoolFeaturesBlock`]s.
#[repr(C)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout,
)]
pub struct EthtoolGfeatures {
    /// Command.
    pub cmd: u32,
    /// Number of blocks.
    pub size: u32,
}

impl EthtoolGfeatures {
    /// Create a `GFEATURES` request for `size` blocks.
    pub fn new(size: u32) -> Self {
        Self {
            cmd: EthtoolCmd::Gfeatures.code(),
            size,
        }
    }

    /// Blocks needed to cover `n_bits` features.
    pub fn blocks_for(n_bits: u32) -> u32 {
        n_bits.div_ceil(32)
    }
}

ethtool_command!(EthtoolGfeatures, EthtoolCmd::Gfeatures);

/// Link settings header (struct ethtool_link_settings), followed by
/// `3 * link_mode_masks_nwords` 32-bit words.
#[repr(C)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout,
)]
pub struct EthtoolLinkSettings {
    pub cmd: u32,
    pub speed: u32,
    pub duplex: u8,
    pub port: u8,
    pub phy_address: u8,
    pub autoneg: u8,
    pub mdio_support: u8,
    pub eth_tp_mdix: u8,
    pub eth_tp_mdix_ctrl: u8,
    /// Mask width in words; negative in a handshake reply.
    pub link_mode_masks_nwords: i8,
    pub transceiver: u8,
    pub master_slave_cfg: u8,
    pub master_slave_state: u8,
    pub rate_matching: u8,
    pub reserved: [u32; 7],
}

impl EthtoolLinkSettings {
    /// Create a `GLINKSETTINGS` request.
    ///
    /// `nwords == 0` is the handshake probe.
    pub fn new(nwords: i8) -> Self {
        Self {
            cmd: EthtoolCmd::GlinkSettings.code(),
            link_mode_masks_nwords: nwords,
            ..Default::default()
        }
    }

    /// Size of the mask trailer for `nwords` words per mask.
    pub fn trailer_len(nwords: usize) -> usize {
        nwords * 3 * 4
    }
}

ethtool_command!(EthtoolLinkSettings, EthtoolCmd::GlinkSettings);
