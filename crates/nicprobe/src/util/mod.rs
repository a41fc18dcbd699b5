//! Shared utilities for nicprobe.

pub mod ifname;

pub use ifname::{IFNAMSIZ, to_ifr_name, validate};
