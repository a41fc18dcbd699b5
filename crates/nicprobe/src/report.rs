//! Capability reports.
//!
//! A report runs a chosen set of queries against one interface and keeps
//! every outcome, so a device that answers some queries and rejects
//! others still yields a useful result.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::ethtool::{Coalesce, Features, LinkSettings, Wol};

/// A capability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Query {
    /// Link up/down (`ETHTOOL_GLINK`).
    LinkUp,
    /// Interrupt coalescing (`ETHTOOL_GCOALESCE`).
    Coalesce,
    /// Offload features (`ETHTOOL_GFEATURES`).
    Features,
    /// Speed, duplex and link modes (`ETHTOOL_GLINKSETTINGS`).
    LinkSettings,
    /// Wake-on-LAN (`ETHTOOL_GWOL`).
    Wol,
}

impl Query {
    /// Every query, in report order.
    pub const ALL: [Query; 5] = [
        Query::LinkUp,
        Query::Coalesce,
        Query::Features,
        Query::LinkSettings,
        Query::Wol,
    ];

    /// Key used in reports.
    pub fn name(self) -> &'static str {
        match self {
            Query::LinkUp => "link_up",
            Query::Coalesce => "coalesce",
            Query::Features => "features",
            Query::LinkSettings => "link_settings",
            Query::Wol => "wol",
        }
    }

    /// Parse a report key.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.name() == name)
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// The queries a report should run.
///
/// # Example
///
/// ```
/// use nicprobe::{Query, QuerySet};
///
/// let queries = QuerySet::all().without(Query::Features);
/// assert!(queries.contains(Query::Wol));
/// assert!(!queries.contains(Query::Features));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuerySet {
    bits: u8,
}

impl QuerySet {
    /// Empty set.
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    /// Every query.
    pub fn all() -> Self {
        Query::ALL.into_iter().fold(Self::new(), Self::with)
    }

    /// Add a query.
    pub fn with(mut self, query: Query) -> Self {
        self.bits |= query.bit();
        self
    }

    /// Remove a query.
    pub fn without(mut self, query: Query) -> Self {
        self.bits &= !query.bit();
        self
    }

    /// Check if a query is selected.
    pub fn contains(&self, query: Query) -> bool {
        self.bits & query.bit() != 0
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Iterate over the selected queries in report order.
    pub fn iter(&self) -> impl Iterator<Item = Query> + '_ {
        Query::ALL.into_iter().filter(|q| self.contains(*q))
    }
}

impl Default for QuerySet {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<Query> for QuerySet {
    fn from_iter<I: IntoIterator<Item = Query>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::with)
    }
}

/// A decoded query result.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "output", derive(serde::Serialize), serde(untagged))]
pub enum Capability {
    LinkUp(bool),
    Coalesce(Coalesce),
    Features(Features),
    LinkSettings(LinkSettings),
    Wol(Wol),
}

/// Outcome of every query run against one interface.
#[derive(Debug)]
pub struct CapabilityReport {
    interface: String,
    entries: BTreeMap<Query, Result<Capability>>,
}

impl CapabilityReport {
    /// Create an empty report for `interface`.
    pub fn new(interface: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Record the outcome of a query, replacing any earlier one.
    pub fn insert(&mut self, query: Query, result: Result<Capability>) {
        self.entries.insert(query, result);
    }

    /// Interface the report was taken from.
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// Outcome of a query, if it was run.
    pub fn get(&self, query: Query) -> Option<&Result<Capability>> {
        self.entries.get(&query)
    }

    /// Iterate over all outcomes in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Query, &Result<Capability>)> {
        self.entries.iter().map(|(q, r)| (*q, r))
    }

    /// Successful results.
    pub fn successes(&self) -> impl Iterator<Item = (Query, &Capability)> {
        self.entries
            .iter()
            .filter_map(|(q, r)| r.as_ref().ok().map(|c| (*q, c)))
    }

    /// Failed queries with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (Query, &Error)> {
        self.entries
            .iter()
            .filter_map(|(q, r)| r.as_ref().err().map(|e| (*q, e)))
    }

    /// Check if every query that ran succeeded.
    pub fn is_complete(&self) -> bool {
        self.entries.values().all(|r| r.is_ok())
    }

    /// Number of queries run.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no query was run.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Link state, if queried successfully.
    pub fn link_up(&self) -> Option<bool> {
        match self.entries.get(&Query::LinkUp) {
            Some(Ok(Capability::LinkUp(up))) => Some(*up),
            _ => None,
        }
    }

    /// Coalescing parameters, if queried successfully.
    pub fn coalesce(&self) -> Option<&Coalesce> {
        match self.entries.get(&Query::Coalesce) {
            Some(Ok(Capability::Coalesce(c))) => Some(c),
            _ => None,
        }
    }

    /// Features, if queried successfully.
    pub fn features(&self) -> Option<&Features> {
        match self.entries.get(&Query::Features) {
            Some(Ok(Capability::Features(f))) => Some(f),
            _ => None,
        }
    }

    /// Link settings, if queried successfully.
    pub fn link_settings(&self) -> Option<&LinkSettings> {
        match self.entries.get(&Query::LinkSettings) {
            Some(Ok(Capability::LinkSettings(ls))) => Some(ls),
            _ => None,
        }
    }

    /// Wake-on-LAN settings, if queried successfully.
    pub fn wol(&self) -> Option<&Wol> {
        match self.entries.get(&Query::Wol) {
            Some(Ok(Capability::Wol(w))) => Some(w),
            _ => None,
        }
    }

    /// Collapse into the successful results, or the first error in
    /// report order.
    pub fn into_result(self) -> Result<BTreeMap<Query, Capability>> {
        self.entries
            .into_iter()
            .map(|(q, r)| r.map(|c| (q, c)))
            .collect()
    }
}
