//! Ethtool device queries over the `SIOCETHTOOL` ioctl.
//!
//! This module implements the legacy ioctl flavour of ethtool: every query
//! is a fixed-layout structure handed to the kernel through an `ifreq`
//! bound to an interface name, which the driver then rewrites in place.
//!
//! # Overview
//!
//! - [`wire`] - kernel structure layouts and the byte codec
//! - [`link_modes`] / [`bitset`] - decoding of capability bitmasks
//! - [`transport`] - the socket handle and error mapping
//! - [`Ethtool`] - one driver method per query
//!
//! # Example
//!
//! ```rust,no_run
//! use nicprobe::ethtool::Ethtool;
//!
//! # fn example() -> nicprobe::Result<()> {
//! let mut eth = Ethtool::open("eth0")?;
//!
//! println!("Link: {}", if eth.link_up()? { "up" } else { "down" });
//!
//! let settings = eth.link_settings()?;
//! println!("Speed: {}", settings.speed);
//! for mode in settings.supported_modes() {
//!     println!("  {}", mode);
//! }
//! # Ok(())
//! # }
//! ```

pub mod bitset;
mod commands;
pub mod link_modes;
pub mod transport;
mod types;
pub mod wire;

pub use bitset::LinkModeSet;
pub use commands::Ethtool;
pub use link_modes::{LinkModeBit, LinkModeKind};
pub use transport::{InterfaceHandle, Transport};
pub use types::*;

/// `SIOCETHTOOL` ioctl request number.
pub const SIOCETHTOOL: libc::c_ulong = 0x8946;

/// Length of one string-set slot.
pub const ETH_GSTRING_LEN: usize = 32;

/// Length of the Wake-on-LAN SecureOn password.
pub const SOPASS_MAX: usize = 6;

// =============================================================================
// Commands
// =============================================================================

/// Ethtool ioctl commands issued by this crate.
///
/// The discriminant is the command word written at offset 0 of every
/// request structure.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EthtoolCmd {
    /// Get Wake-on-LAN options.
    Gwol = 0x05,
    /// Get link status.
    Glink = 0x0a,
    /// Get interrupt coalescing parameters.
    Gcoalesce = 0x0e,
    /// Get a string set.
    Gstrings = 0x1b,
    /// Get string-set sizes.
    GssetInfo = 0x37,
    /// Get device features.
    Gfeatures = 0x3a,
    /// Get link settings (variable-length link-mode masks).
    GlinkSettings = 0x4c,
}

impl EthtoolCmd {
    /// The command word as sent to the kernel.
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Parse a command word.
    pub fn from_u32(v: u32) -> Option<Self> {
        match v {
            0x05 => Some(Self::Gwol),
            0x0a => Some(Self::Glink),
            0x0e => Some(Self::Gcoalesce),
            0x1b => Some(Self::Gstrings),
            0x37 => Some(Self::GssetInfo),
            0x3a => Some(Self::Gfeatures),
            0x4c => Some(Self::GlinkSettings),
            _ => None,
        }
    }

    /// Kernel constant name, used in logs and errors.
    pub fn name(self) -> &'static str {
        match self {
            Self::Gwol => "ETHTOOL_GWOL",
            Self::Glink => "ETHTOOL_GLINK",
            Self::Gcoalesce => "ETHTOOL_GCOALESCE",
            Self::Gstrings => "ETHTOOL_GSTRINGS",
            Self::GssetInfo => "ETHTOOL_GSSET_INFO",
            Self::Gfeatures => "ETHTOOL_GFEATURES",
            Self::GlinkSettings => "ETHTOOL_GLINKSETTINGS",
        }
    }
}

/// String sets (`ETH_SS_*`).
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringSetId {
    /// Self-test result names.
    Test = 0,
    /// Statistics names.
    Stats = 1,
    /// Driver private flags.
    PrivFlags = 2,
    /// Netdev feature names.
    Features = 4,
    /// Tunable names.
    Tunables = 6,
    /// PHY statistics names.
    PhyStats = 7,
}

impl StringSetId {
    /// Bit selecting this set in an `sset_mask`.
    pub fn mask(self) -> u64 {
        1u64 << (self as u32)
    }
}
