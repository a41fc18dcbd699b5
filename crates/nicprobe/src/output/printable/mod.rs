//! Printable implementations for query results.

mod ethtool;
mod report;
