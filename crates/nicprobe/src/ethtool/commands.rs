//! Ethtool command drivers.
//!
//! Each query builds its request structure, runs it through the
//! [`Transport`] and decodes the structure the kernel wrote back.

use tracing::{debug, trace, warn};

use super::bitset::decode_features;
use super::transport::{InterfaceHandle, Transport};
use super::types::{Coalesce, Features, LinkSettings, StringSet, Wol};
use super::wire::{
    EthtoolCoalesce, EthtoolCommand, EthtoolFeaturesBlock, EthtoolGfeatures, EthtoolGstrings,
    EthtoolLinkSettings, EthtoolSsetInfo, EthtoolValue, EthtoolWolinfo, WireStruct, decode_array,
};
use super::{ETH_GSTRING_LEN, EthtoolCmd, StringSetId};
use crate::error::{Error, Result};
use crate::report::{Capability, CapabilityReport, Query, QuerySet};

/// Ethtool query session for one interface.
///
/// Generic over the transport so drivers can run against a scripted
/// kernel; [`Ethtool::open`] binds the real `SIOCETHTOOL` socket.
#[derive(Debug)]
pub struct Ethtool<T: Transport = InterfaceHandle> {
    transport: T,
}

impl Ethtool<InterfaceHandle> {
    /// Open a session for `ifname`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use nicprobe::ethtool::Ethtool;
    ///
    /// let mut eth = Ethtool::open("eth0")?;
    /// let coalesce = eth.coalesce()?;
    /// println!("rx-usecs: {}", coalesce.rx_usecs);
    /// ```
    pub fn open(ifname: &str) -> Result<Self> {
        Ok(Self::with_transport(InterfaceHandle::open(ifname)?))
    }
}

impl<T: Transport> Ethtool<T> {
    /// Create a session over an existing transport.
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Name of the interface this session queries.
    pub fn ifname(&self) -> &str {
        self.transport.ifname()
    }

    /// Get the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Consume the session, returning the transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Run a fixed-size command and decode its response.
    fn fixed<S: EthtoolCommand>(&mut self, request: S) -> Result<S> {
        let mut buf = request.encode();
        self.transport.execute(S::CMD, &mut buf)?;
        S::decode(&buf)
    }

    fn not_supported(&self) -> Error {
        Error::NotSupported(self.ifname().to_string())
    }

    // =========================================================================
    // Single-shot queries
    // =========================================================================

    /// Check whether the link is up (`ETHTOOL_GLINK`).
    pub fn link_up(&mut self) -> Result<bool> {
        let value = self.fixed(EthtoolValue::new(EthtoolCmd::Glink))?;
        Ok(value.data != 0)
    }

    /// Get interrupt coalescing parameters (`ETHTOOL_GCOALESCE`).
    pub fn coalesce(&mut self) -> Result<Coalesce> {
        let raw = self.fixed(EthtoolCoalesce::new())?;
        Ok(Coalesce::from(&raw))
    }

    /// Get Wake-on-LAN settings (`ETHTOOL_GWOL`).
    pub fn wol(&mut self) -> Result<Wol> {
        let raw = self.fixed(EthtoolWolinfo::new())?;
        Ok(Wol::from(&raw))
    }

    // =========================================================================
    // String sets and features
    // =========================================================================

    /// Get the number of strings in a set (`ETHTOOL_GSSET_INFO`).
    ///
    /// Returns 0 when the driver does not provide the set.
    pub fn string_set_len(&mut self, set: StringSetId) -> Result<u32> {
        let info = self.fixed(EthtoolSsetInfo::new(set.mask()))?;
        Ok(info.count_for(set.mask()))
    }

    /// Get a string set (`ETHTOOL_GSSET_INFO` then `ETHTOOL_GSTRINGS`).
    ///
    /// Each name's position is its bit index in the matching bitmask
    /// responses.
    pub fn string_set(&mut self, set: StringSetId) -> Result<StringSet> {
        let len = self.string_set_len(set)?;
        trace!(ifname = %self.ifname(), ?set, len, "string set size");

        let request = EthtoolGstrings::new(set as u32, len);
        let mut buf = request.encode_with_trailer(EthtoolGstrings::trailer_len(len));
        self.transport.execute(EthtoolCmd::Gstrings, &mut buf)?;

        let (header, data) = EthtoolGstrings::decode_with_trailer(&buf)?;
        if header.len > len {
            return Err(Error::malformed(
                EthtoolGstrings::SIZE + EthtoolGstrings::trailer_len(header.len),
                buf.len(),
            ));
        }

        let strings = data
            .chunks_exact(ETH_GSTRING_LEN)
            .take(header.len as usize)
            .enumerate()
            .map(|(index, slot)| decode_gstring(index, slot))
            .collect::<Result<Vec<_>>>()?;

        Ok(StringSet { id: set, strings })
    }

    /// Get device features (`ETHTOOL_GFEATURES`), named by the features
    /// string set.
    pub fn features(&mut self) -> Result<Features> {
        let names = self.string_set(StringSetId::Features)?.strings;
        let blocks = EthtoolGfeatures::blocks_for(names.len() as u32);

        let request = EthtoolGfeatures::new(blocks);
        let mut buf =
            request.encode_with_trailer(blocks as usize * EthtoolFeaturesBlock::SIZE);
        self.transport.execute(EthtoolCmd::Gfeatures, &mut buf)?;

        let (header, data) = EthtoolGfeatures::decode_with_trailer(&buf)?;
        if header.size != blocks {
            // The kernel reports its own word count and copies at most
            // what was asked for.
            debug!(
                ifname = %self.ifname(),
                requested = blocks,
                reported = header.size,
                "feature block count differs"
            );
        }
        let filled = header.size.min(blocks) as usize;
        let blocks = decode_array::<EthtoolFeaturesBlock>(data, filled)?;

        Ok(Features::new(decode_features(&names, &blocks)))
    }

    // =========================================================================
    // Link settings
    // =========================================================================

    /// Get link settings (`ETHTOOL_GLINKSETTINGS`).
    ///
    /// The mask width is driver-specific, so this takes two round trips:
    /// a probe with zero mask words, answered with the negated width, then
    /// the real request sized for three masks of that width.
    pub fn link_settings(&mut self) -> Result<LinkSettings> {
        let mut probe = EthtoolLinkSettings::new(0).encode();
        self.transport.execute(EthtoolCmd::GlinkSettings, &mut probe)?;

        let reply = EthtoolLinkSettings::decode(&probe)?;
        let nwords = match reply.link_mode_masks_nwords.checked_neg() {
            Some(n) if reply.cmd_matches() && n > 0 => n,
            _ => {
                debug!(
                    ifname = %self.ifname(),
                    cmd = reply.cmd,
                    nwords = reply.link_mode_masks_nwords,
                    "link settings handshake refused"
                );
                return Err(self.not_supported());
            }
        };
        trace!(ifname = %self.ifname(), nwords, "link settings handshake");

        let words = nwords as usize;
        let request = EthtoolLinkSettings::new(nwords);
        let mut buf = request.encode_with_trailer(EthtoolLinkSettings::trailer_len(words));
        self.transport.execute(EthtoolCmd::GlinkSettings, &mut buf)?;

        let (reply, data) = EthtoolLinkSettings::decode_with_trailer(&buf)?;
        if !reply.cmd_matches() || reply.link_mode_masks_nwords <= 0 {
            return Err(self.not_supported());
        }
        let n = reply.link_mode_masks_nwords as usize;
        if n > words {
            warn!(
                ifname = %self.ifname(),
                requested = words,
                reported = n,
                "kernel reported more link mode words than allocated"
            );
            return Err(Error::malformed(
                EthtoolLinkSettings::SIZE + EthtoolLinkSettings::trailer_len(n),
                buf.len(),
            ));
        }

        let masks = decode_array::<u32>(data, 3 * n)?;
        let (supported, rest) = masks.split_at(n);
        let (advertised, lp_advertised) = rest.split_at(n);

        Ok(LinkSettings::from_masks(
            &reply,
            supported,
            advertised,
            lp_advertised,
        ))
    }

    // =========================================================================
    // Report
    // =========================================================================

    /// Run every query in `queries` and collect the results.
    ///
    /// A failing query is recorded in the report; it does not stop the
    /// others.
    pub fn report(&mut self, queries: &QuerySet) -> CapabilityReport {
        let mut report = CapabilityReport::new(self.ifname());

        for query in queries.iter() {
            let result = match query {
                Query::LinkUp => self.link_up().map(Capability::LinkUp),
                Query::Coalesce => self.coalesce().map(Capability::Coalesce),
                Query::Features => self.features().map(Capability::Features),
                Query::LinkSettings => self.link_settings().map(Capability::LinkSettings),
                Query::Wol => self.wol().map(Capability::Wol),
            };
            if let Err(ref e) = result {
                debug!(ifname = %self.ifname(), query = query.name(), error = %e, "query failed");
            }
            report.insert(query, result);
        }

        report
    }
}

/// Decode one NUL-terminated string-set slot.
///
/// Anything but printable ASCII before the terminator is rejected.
fn decode_gstring(index: usize, slot: &[u8]) -> Result<String> {
    let end = slot.iter().position(|&b| b == 0).unwrap_or(slot.len());
    let name = &slot[..end];
    if !name.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
        return Err(Error::InvalidString { index });
    }
    String::from_utf8(name.to_vec()).map_err(|_| Error::InvalidString { index })
}
