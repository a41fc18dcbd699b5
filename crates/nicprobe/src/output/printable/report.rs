//! Printable implementation for CapabilityReport.

use std::io::Write;

use serde_json::json;

use crate::output::{OutputOptions, Printable};
use crate::report::{Capability, CapabilityReport, Query};

fn what(query: Query) -> &'static str {
    match query {
        Query::LinkUp => "link status",
        Query::Coalesce => "coalesce parameters",
        Query::Features => "device features",
        Query::LinkSettings => "link settings",
        Query::Wol => "wake-on-lan settings",
    }
}

impl CapabilityReport {
    fn print_section<W: Write>(
        &self,
        w: &mut W,
        query: Query,
        opts: &OutputOptions,
    ) -> std::io::Result<()> {
        match self.get(query) {
            None => Ok(()),
            Some(Err(e)) => writeln!(w, "\tCannot get {}: {}", what(query), e),
            Some(Ok(Capability::LinkUp(up))) => {
                writeln!(w, "\tLink detected: {}", if *up { "yes" } else { "no" })
            }
            Some(Ok(Capability::LinkSettings(ls))) => ls.print_text(w, opts),
            Some(Ok(Capability::Wol(wol))) => wol.print_text(w, opts),
            Some(Ok(Capability::Coalesce(c))) => c.print_text(w, opts),
            Some(Ok(Capability::Features(f))) => f.print_text(w, opts),
        }
    }
}

impl Printable for CapabilityReport {
    fn print_text<W: Write>(&self, w: &mut W, opts: &OutputOptions) -> std::io::Result<()> {
        let ifname = self.interface();

        writeln!(w, "Settings for {}:", ifname)?;
        for query in [Query::LinkSettings, Query::Wol, Query::LinkUp] {
            self.print_section(w, query, opts)?;
        }

        if self.get(Query::Coalesce).is_some() {
            writeln!(w)?;
            writeln!(w, "Coalesce parameters for {}:", ifname)?;
            self.print_section(w, Query::Coalesce, opts)?;
        }

        if self.get(Query::Features).is_some() {
            writeln!(w)?;
            writeln!(w, "Features for {}:", ifname)?;
            self.print_section(w, Query::Features, opts)?;
        }

        Ok(())
    }

    fn to_json(&self) -> serde_json::Value {
        let mut obj = json!({ "ifname": self.interface() });

        for (query, capability) in self.successes() {
            obj[query.name()] = serde_json::to_value(capability).unwrap_or_default();
        }

        let errors: serde_json::Map<String, serde_json::Value> = self
            .failures()
            .map(|(query, e)| {
                let mut err = json!({ "error": e.to_string() });
                if let Some(errno) = e.errno() {
                    err["errno"] = json!(errno);
                }
                (query.name().to_string(), err)
            })
            .collect();
        if !errors.is_empty() {
            obj["errors"] = serde_json::Value::Object(errors);
        }

        obj
    }
}
