//! Printable implementations for decoded ethtool results.
//!
//! Text output follows the layout of the `ethtool` utility.

use std::io::Write;

use crate::ethtool::{Coalesce, Features, LinkSettings, Wol};
use crate::output::{OutputOptions, Printable, on_off};

/// Write a labelled list, one entry per line, aligned under the first.
fn write_list<W: Write>(w: &mut W, label: &str, items: &[&str]) -> std::io::Result<()> {
    write!(w, "\t{}:", label)?;
    if items.is_empty() {
        return writeln!(w, " Not reported");
    }
    let indent = label.len() + 2;
    for (i, item) in items.iter().enumerate() {
        if i == 0 {
            writeln!(w, " {}", item)?;
        } else {
            writeln!(w, "\t{:indent$}{}", "", item, indent = indent)?;
        }
    }
    Ok(())
}

impl Printable for LinkSettings {
    fn print_text<W: Write>(&self, w: &mut W, _opts: &OutputOptions) -> std::io::Result<()> {
        writeln!(w, "\tSupported ports: [ {} ]", self.supported_ports().join(" "))?;
        write_list(w, "Supported link modes", self.supported_modes())?;
        write_list(w, "Advertised link modes", self.advertised_modes())?;
        write_list(w, "Link partner advertised link modes", self.lp_advertised_modes())?;

        writeln!(w, "\tSpeed: {}", self.speed)?;
        match self.duplex {
            Some(duplex) => writeln!(w, "\tDuplex: {}", duplex)?,
            None => writeln!(w, "\tDuplex: Unknown")?,
        }
        match self.port {
            Some(port) => writeln!(w, "\tPort: {}", port)?,
            None => writeln!(w, "\tPort: Unknown")?,
        }
        writeln!(w, "\tPHYAD: {}", self.phy_address)?;
        if let Some(transceiver) = self.transceiver {
            writeln!(w, "\tTransceiver: {}", transceiver)?;
        }
        writeln!(w, "\tAuto-negotiation: {}", on_off(self.autoneg))?;

        if let Some(mdix) = self.mdix {
            write!(w, "\tMDI-X: {}", mdix)?;
            match self.mdix_ctrl {
                Some(ctrl) if ctrl != mdix => writeln!(w, " (forced {})", ctrl)?,
                _ => writeln!(w)?,
            }
        }

        Ok(())
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl Printable for Coalesce {
    fn print_text<W: Write>(&self, w: &mut W, opts: &OutputOptions) -> std::io::Result<()> {
        writeln!(
            w,
            "Adaptive RX: {}  TX: {}",
            on_off(self.use_adaptive_rx),
            on_off(self.use_adaptive_tx)
        )?;
        writeln!(w, "stats-block-usecs: {}", self.stats_block_usecs)?;
        writeln!(w, "sample-interval: {}", self.rate_sample_interval)?;
        writeln!(w, "pkt-rate-low: {}", self.pkt_rate_low)?;
        writeln!(w, "pkt-rate-high: {}", self.pkt_rate_high)?;
        writeln!(w)?;

        writeln!(w, "rx-usecs: {}", self.rx_usecs)?;
        writeln!(w, "rx-frames: {}", self.rx_max_frames)?;
        writeln!(w, "rx-usecs-irq: {}", self.rx_usecs_irq)?;
        writeln!(w, "rx-frames-irq: {}", self.rx_max_frames_irq)?;
        writeln!(w)?;

        writeln!(w, "tx-usecs: {}", self.tx_usecs)?;
        writeln!(w, "tx-frames: {}", self.tx_max_frames)?;
        writeln!(w, "tx-usecs-irq: {}", self.tx_usecs_irq)?;
        writeln!(w, "tx-frames-irq: {}", self.tx_max_frames_irq)?;

        if opts.details {
            writeln!(w)?;
            writeln!(w, "rx-usecs-low: {}", self.rx_usecs_low)?;
            writeln!(w, "rx-frames-low: {}", self.rx_max_frames_low)?;
            writeln!(w, "tx-usecs-low: {}", self.tx_usecs_low)?;
            writeln!(w, "tx-frames-low: {}", self.tx_max_frames_low)?;
            writeln!(w)?;
            writeln!(w, "rx-usecs-high: {}", self.rx_usecs_high)?;
            writeln!(w, "rx-frames-high: {}", self.rx_max_frames_high)?;
            writeln!(w, "tx-usecs-high: {}", self.tx_usecs_high)?;
            writeln!(w, "tx-frames-high: {}", self.tx_max_frames_high)?;
        }

        Ok(())
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl Printable for Features {
    fn print_text<W: Write>(&self, w: &mut W, opts: &OutputOptions) -> std::io::Result<()> {
        for entry in self.iter() {
            write!(w, "{}: {}", entry.name, on_off(entry.is_active))?;
            if !entry.is_available || entry.is_never_changed {
                write!(w, " [fixed]")?;
            } else if opts.details && entry.is_requested != entry.is_active {
                write!(w, " [requested {}]", on_off(entry.is_requested))?;
            }
            writeln!(w)?;
        }
        Ok(())
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Single-letter option codes used by `ethtool` for `WAKE_*` bits.
fn wol_letter(name: &str) -> char {
    match name {
        "phy" => 'p',
        "ucast" => 'u',
        "mcast" => 'm',
        "bcast" => 'b',
        "arp" => 'a',
        "magic" => 'g',
        "magic_secure" => 's',
        "filter" => 'f',
        _ => '?',
    }
}

impl Printable for Wol {
    fn print_text<W: Write>(&self, w: &mut W, _opts: &OutputOptions) -> std::io::Result<()> {
        let supported: String = self.modes.iter().map(|m| wol_letter(m.name)).collect();
        let enabled: String = self.enabled().into_iter().map(wol_letter).collect();

        // "d" means disabled
        let or_d = |s: &str| if s.is_empty() { "d".to_string() } else { s.to_string() };
        writeln!(w, "\tSupports Wake-on: {}", or_d(&supported))?;
        writeln!(w, "\tWake-on: {}", or_d(&enabled))?;

        if let Some(sopass) = self.sopass {
            let hex: Vec<String> = sopass.iter().map(|b| format!("{:02x}", b)).collect();
            writeln!(w, "\tSecureOn password: {}", hex.join(":"))?;
        }

        Ok(())
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
