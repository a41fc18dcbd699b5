//! Link-mode bit table.
//!
//! Bit positions come from `enum ethtool_link_mode_bit_indices` in
//! `include/uapi/linux/ethtool.h`. The table is immutable and shared by
//! every handle; [`by_index`] is built on first use.

use std::collections::HashMap;
use std::sync::LazyLock;

use self::LinkModeKind::{Mode, Other, Port};

/// What a link-mode bit describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkModeKind {
    /// Physical port type (TP, AUI, MII, FIBRE, BNC).
    Port,
    /// Speed/duplex/media combination.
    Mode,
    /// Autoneg, pause, backplane and FEC bits.
    Other,
}

/// A named link-mode bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkModeBit {
    /// Bit index across the whole mask.
    pub index: u32,
    /// ethtool display name.
    pub name: &'static str,
    /// Category.
    pub kind: LinkModeKind,
}

const fn bit(index: u32, name: &'static str, kind: LinkModeKind) -> LinkModeBit {
    LinkModeBit { index, name, kind }
}

/// All known link-mode bits, in index order.
pub static LINK_MODE_BITS: &[LinkModeBit] = &[
    bit(0, "10baseT/Half", Mode),
    bit(1, "10baseT/Full", Mode),
    bit(2, "100baseT/Half", Mode),
    bit(3, "100baseT/Full", Mode),
    bit(4, "1000baseT/Half", Mode),
    bit(5, "1000baseT/Full", Mode),
    bit(6, "Autoneg", Other),
    bit(7, "TP", Port),
    bit(8, "AUI", Port),
    bit(9, "MII", Port),
    bit(10, "FIBRE", Port),
    bit(11, "BNC", Port),
    bit(12, "10000baseT/Full", Mode),
    bit(13, "Pause", Other),
    bit(14, "Asym_Pause", Other),
    bit(15, "2500baseX/Full", Mode),
    bit(16, "Backplane", Other),
    bit(17, "1000baseKX/Full", Mode),
    bit(18, "10000baseKX4/Full", Mode),
    bit(19, "10000baseKR/Full", Mode),
    bit(20, "10000baseR_FEC", Mode),
    bit(21, "20000baseMLD2/Full", Mode),
    bit(22, "20000baseKR2/Full", Mode),
    bit(23, "40000baseKR4/Full", Mode),
    bit(24, "40000baseCR4/Full", Mode),
    bit(25, "40000baseSR4/Full", Mode),
    bit(26, "40000baseLR4/Full", Mode),
    bit(27, "56000baseKR4/Full", Mode),
    bit(28, "56000baseCR4/Full", Mode),
    bit(29, "56000baseSR4/Full", Mode),
    bit(30, "56000baseLR4/Full", Mode),
    bit(31, "25000baseCR/Full", Mode),
    bit(32, "25000baseKR/Full", Mode),
    bit(33, "25000baseSR/Full", Mode),
    bit(34, "50000baseCR2/Full", Mode),
    bit(35, "50000baseKR2/Full", Mode),
    bit(36, "100000baseKR4/Full", Mode),
    bit(37, "100000baseSR4/Full", Mode),
    bit(38, "100000baseCR4/Full", Mode),
    bit(39, "100000baseLR4_ER4/Full", Mode),
    bit(40, "50000baseSR2/Full", Mode),
    bit(41, "1000baseX/Full", Mode),
    bit(42, "10000baseCR/Full", Mode),
    bit(43, "10000baseSR/Full", Mode),
    bit(44, "10000baseLR/Full", Mode),
    bit(45, "10000baseLRM/Full", Mode),
    bit(46, "10000baseER/Full", Mode),
    bit(47, "2500baseT/Full", Mode),
    bit(48, "5000baseT/Full", Mode),
    bit(49, "FEC_NONE", Other),
    bit(50, "FEC_RS", Other),
    bit(51, "FEC_BASER", Other),
    bit(52, "50000baseKR/Full", Mode),
    bit(53, "50000baseSR/Full", Mode),
    bit(54, "50000baseCR/Full", Mode),
    bit(55, "50000baseLR_ER_FR/Full", Mode),
    bit(56, "50000baseDR/Full", Mode),
    bit(57, "100000baseKR2/Full", Mode),
    bit(58, "100000baseSR2/Full", Mode),
    bit(59, "100000baseCR2/Full", Mode),
    bit(60, "100000baseLR2_ER2_FR2/Full", Mode),
    bit(61, "100000baseDR2/Full", Mode),
    bit(62, "200000baseKR4/Full", Mode),
    bit(63, "200000baseSR4/Full", Mode),
    bit(64, "200000baseLR4_ER4_FR4/Full", Mode),
    bit(65, "200000baseDR4/Full", Mode),
    bit(66, "200000baseCR4/Full", Mode),
    bit(67, "100baseT1/Full", Mode),
    bit(68, "1000baseT1/Full", Mode),
];

static BY_INDEX: LazyLock<HashMap<u32, &'static LinkModeBit>> =
    LazyLock::new(|| LINK_MODE_BITS.iter().map(|b| (b.index, b)).collect());

/// Look up a bit by index.
pub fn by_index(index: u32) -> Option<&'static LinkModeBit> {
    BY_INDEX.get(&index).copied()
}
