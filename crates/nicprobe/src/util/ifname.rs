//! Interface name utilities.

use crate::error::{Error, Result};

/// Maximum interface name length (including null terminator).
pub const IFNAMSIZ: usize = 16;

/// Validate an interface name.
pub fn validate(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidName("empty name".to_string()));
    }

    if name.len() >= IFNAMSIZ {
        return Err(Error::InvalidName(format!(
            "{}: name too long (max {} chars)",
            name,
            IFNAMSIZ - 1
        )));
    }

    if name.contains('/') || name.contains('\0') {
        return Err(Error::InvalidName(format!(
            "{}: name contains invalid characters",
            name.escape_debug()
        )));
    }

    if name.chars().any(|c| c.is_whitespace()) {
        return Err(Error::InvalidName(format!(
            "{:?}: name contains whitespace",
            name
        )));
    }

    Ok(())
}

/// Validate `name` and lay it out as a NUL-padded `ifr_name` buffer.
pub fn to_ifr_name(name: &str) -> Result<[u8; IFNAMSIZ]> {
    validate(name)?;
    let mut buf = [0u8; IFNAMSIZ];
    buf[..name.len()].copy_from_slice(name.as_bytes());
    Ok(buf)
}
