//! Decoding of ethtool bitmasks.
//!
//! The ioctl interface reports capability sets as arrays of 32-bit words:
//! bit `i` lives at bit `i % 32` of word `i / 32`. Masks may be shorter
//! than the tables they are decoded against; missing words read as zero.

use super::link_modes::{LinkModeBit, LinkModeKind, by_index};
use super::types::{FeatureEntry, WolMode};
use super::wire::EthtoolFeaturesBlock;

/// Check bit `index` in a word mask.
pub fn test_bit(mask: &[u32], index: u32) -> bool {
    mask.get((index / 32) as usize)
        .is_some_and(|word| word & (1 << (index % 32)) != 0)
}

/// Iterate over the known link-mode bits set in `mask`, in index order.
///
/// Set bits with no table entry are skipped.
pub fn set_link_modes(mask: &[u32]) -> impl Iterator<Item = &'static LinkModeBit> + '_ {
    mask.iter()
        .enumerate()
        .flat_map(|(word, &bits)| {
            (0..32u32)
                .filter(move |b| bits & (1 << b) != 0)
                .map(move |b| word as u32 * 32 + b)
        })
        .filter_map(by_index)
}

/// Link modes decoded from one mask.
///
/// Only port and speed/duplex names are kept. Autoneg, pause, backplane
/// and FEC bits are recognised but dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "output", derive(serde::Serialize))]
pub struct LinkModeSet {
    /// Port types (`TP`, `FIBRE`, ...).
    pub ports: Vec<&'static str>,
    /// Speed/duplex modes (`1000baseT/Full`, ...).
    pub modes: Vec<&'static str>,
}

impl LinkModeSet {
    /// Decode a link-mode mask.
    pub fn decode(mask: &[u32]) -> Self {
        let mut set = Self::default();
        for bit in set_link_modes(mask) {
            match bit.kind {
                LinkModeKind::Port => set.ports.push(bit.name),
                LinkModeKind::Mode => set.modes.push(bit.name),
                LinkModeKind::Other => {}
            }
        }
        set
    }

    /// Check if a port or mode name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.ports.contains(&name) || self.modes.contains(&name)
    }

    /// Check if no port or mode is set.
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty() && self.modes.is_empty()
    }
}

// =============================================================================
// Wake-on-LAN
// =============================================================================

/// `WAKE_*` option bits and their names.
pub static WAKE_OPTIONS: &[(u32, &str)] = &[
    (0, "phy"),
    (1, "ucast"),
    (2, "mcast"),
    (3, "bcast"),
    (4, "arp"),
    (5, "magic"),
    (6, "magic_secure"),
    (7, "filter"),
];

/// `WAKE_MAGICSECURE` bit.
pub const WAKE_MAGICSECURE: u32 = 1 << 6;

/// Decode the supported Wake-on-LAN options, flagging those in `wolopts`.
pub fn decode_wol_modes(supported: u32, wolopts: u32) -> Vec<WolMode> {
    let supported = [supported];
    let enabled = [wolopts];
    WAKE_OPTIONS
        .iter()
        .filter(|(index, _)| test_bit(&supported, *index))
        .map(|&(index, name)| WolMode {
            index,
            name,
            enabled: test_bit(&enabled, index),
        })
        .collect()
}

// =============================================================================
// Features
// =============================================================================

/// Decode feature blocks against the feature names.
///
/// Name `i` maps to bit `i % 32` of block `i / 32`. Names past the last
/// block decode with every flag cleared.
pub fn decode_features(names: &[String], blocks: &[EthtoolFeaturesBlock]) -> Vec<FeatureEntry> {
    fn column(
        blocks: &[EthtoolFeaturesBlock],
        f: impl Fn(&EthtoolFeaturesBlock) -> u32,
    ) -> Vec<u32> {
        blocks.iter().map(f).collect()
    }

    let available = column(blocks, |b| b.available);
    let requested = column(blocks, |b| b.requested);
    let active = column(blocks, |b| b.active);
    let never_changed = column(blocks, |b| b.never_changed);

    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let i = i as u32;
            FeatureEntry {
                name: name.clone(),
                index: i,
                is_available: test_bit(&available, i),
                is_requested: test_bit(&requested, i),
                is_active: test_bit(&active, i),
                is_never_changed: test_bit(&never_changed, i),
            }
        })
        .collect()
}
