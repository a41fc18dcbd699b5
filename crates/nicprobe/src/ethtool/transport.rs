//! `SIOCETHTOOL` transport.
//!
//! A [`Transport`] executes one ethtool command against the interface it
//! is bound to. The command buffer is lent to the kernel for the duration
//! of the call and rewritten in place; callers decode it only after
//! `execute` returns `Ok`.

use std::io;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd, RawFd};

use tracing::debug;

use super::{EthtoolCmd, SIOCETHTOOL};
use crate::error::{Error, Result};
use crate::util::ifname::{IFNAMSIZ, to_ifr_name};

/// Executes ethtool commands for one interface.
///
/// Execution takes `&mut self`: a transport serves one caller at a time.
/// No retries and no timeouts are applied.
pub trait Transport {
    /// Name of the bound interface.
    fn ifname(&self) -> &str;

    /// Run `cmd` with `buf` as its request structure.
    ///
    /// On success `buf` holds the kernel's response. `EOPNOTSUPP` and
    /// `ENODEV` map to [`Error::NotSupported`] and [`Error::NoSuchDevice`];
    /// any other failure is returned as [`Error::Transport`].
    fn execute(&mut self, cmd: EthtoolCmd, buf: &mut [u8]) -> Result<()>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn ifname(&self) -> &str {
        (**self).ifname()
    }

    fn execute(&mut self, cmd: EthtoolCmd, buf: &mut [u8]) -> Result<()> {
        (**self).execute(cmd, buf)
    }
}

/// A datagram socket bound to one interface name.
///
/// The socket is closed when the handle is dropped.
#[derive(Debug)]
pub struct InterfaceHandle {
    fd: OwnedFd,
    name: [u8; IFNAMSIZ],
    ifname: String,
}

impl InterfaceHandle {
    /// Open a handle for `ifname`.
    ///
    /// Fails with [`Error::InvalidName`] if the name does not fit in
    /// `IFNAMSIZ - 1` bytes. The interface is not checked for existence
    /// until the first command.
    pub fn open(ifname: &str) -> Result<Self> {
        let name = to_ifr_name(ifname)?;

        // SAFETY: socket(2) takes no pointers; the result is checked below.
        let fd = unsafe { libc::socket(libc::AF_INET, libc::SOCK_DGRAM | libc::SOCK_CLOEXEC, 0) };
        if fd < 0 {
            return Err(Error::Io(io::Error::last_os_error()));
        }
        // SAFETY: fd was just returned by socket(2) and is owned by nobody else.
        let fd = unsafe { OwnedFd::from_raw_fd(fd) };

        debug!(ifname, "opened ethtool socket");

        Ok(Self {
            fd,
            name,
            ifname: ifname.to_string(),
        })
    }
}

impl Transport for InterfaceHandle {
    fn ifname(&self) -> &str {
        &self.ifname
    }

    fn execute(&mut self, cmd: EthtoolCmd, buf: &mut [u8]) -> Result<()> {
        if buf.len() < 4 {
            return Err(Error::malformed(4, buf.len()));
        }

        // SAFETY: ifreq is plain C data; all-zero is a valid value.
        let mut ifr: libc::ifreq = unsafe { std::mem::zeroed() };
        for (dst, &src) in ifr.ifr_name.iter_mut().zip(self.name.iter()) {
            *dst = src as libc::c_char;
        }
        ifr.ifr_ifru.ifru_data = buf.as_mut_ptr().cast::<libc::c_char>();

        debug!(ifname = %self.ifname, cmd = cmd.name(), len = buf.len(), "SIOCETHTOOL");

        // SAFETY: ifr is a valid ifreq whose data pointer covers buf, which
        // stays mutably borrowed until the call returns.
        let ret = unsafe { libc::ioctl(self.fd.as_raw_fd(), SIOCETHTOOL, &mut ifr) };
        if ret < 0 {
            let err = io::Error::last_os_error();
            debug!(ifname = %self.ifname, cmd = cmd.name(), error = %err, "SIOCETHTOOL failed");
            return Err(Error::from_os_error(err, cmd.name(), &self.ifname));
        }

        Ok(())
    }
}

impl AsRawFd for InterfaceHandle {
    fn as_raw_fd(&self) -> RawFd {
        self.fd.as_raw_fd()
    }
}
