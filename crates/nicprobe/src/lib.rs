//! Network device capability queries for Linux.
//!
//! This crate reads what a network interface can do, and what it is
//! currently doing, through the classic `SIOCETHTOOL` ioctl: link state,
//! speed/duplex and link modes, interrupt coalescing, offload features and
//! Wake-on-LAN. Every call is synchronous and binds to a single interface
//! by name.
//!
//! # Features
//!
//! - `output` - JSON/text output formatting
//! - `full` - All features enabled
//!
//! # Example
//!
//! ```no_run
//! use nicprobe::{Ethtool, QuerySet};
//!
//! # fn main() -> nicprobe::Result<()> {
//! let mut eth = Ethtool::open("eth0")?;
//!
//! let features = eth.features()?;
//! for name in features.active_features() {
//!     println!("{}: on", name);
//! }
//!
//! // Run everything, keeping per-query failures
//! let report = eth.report(&QuerySet::all());
//! for (query, err) in report.failures() {
//!     eprintln!("{}: {}", query.name(), err);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Testing against a scripted kernel
//!
//! [`Ethtool`] is generic over [`ethtool::Transport`], so drivers can be
//! exercised without a real device by supplying a transport that writes
//! canned responses into the request buffer.

pub mod error;
pub mod ethtool;
pub mod report;
pub mod util;

#[cfg(feature = "output")]
pub mod output;

// Re-export common types at crate root for convenience
pub use error::{Error, Result};
pub use ethtool::Ethtool;
pub use report::{Capability, CapabilityReport, Query, QuerySet};
