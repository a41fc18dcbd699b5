//! Capability report integration tests.

use nicprobe::ethtool::EthtoolCmd;
use nicprobe::ethtool::wire::{EthtoolCoalesce, EthtoolFeaturesBlock, EthtoolValue, EthtoolWolinfo};
use nicprobe::{Capability, Ethtool, Query, QuerySet};

use crate::common::ScriptedTransport;

#[test]
fn test_report_keeps_partial_failures() {
    // Queries run in report order: link_up, coalesce, features,
    // link_settings, wol.
    let mut transport = ScriptedTransport::new("eth0")
        .reply(
            EthtoolCmd::Glink,
            EthtoolValue {
                data: 1,
                ..EthtoolValue::new(EthtoolCmd::Glink)
            },
        )
        .fail(EthtoolCmd::Gcoalesce, libc::EOPNOTSUPP)
        .feature_names(&["rx-checksum"])
        .feature_blocks(vec![EthtoolFeaturesBlock {
            available: 1,
            active: 1,
            requested: 1,
            never_changed: 0,
        }])
        // Driver predates GLINKSETTINGS: the probe comes back untouched.
        .then(EthtoolCmd::GlinkSettings, |_| Ok(()))
        .reply(
            EthtoolCmd::Gwol,
            EthtoolWolinfo {
                supported: 1 << 5,
                ..EthtoolWolinfo::new()
            },
        );

    let report = Ethtool::with_transport(&mut transport).report(&QuerySet::all());

    assert_eq!(report.interface(), "eth0");
    assert_eq!(report.len(), 5);
    assert!(!report.is_complete());

    assert_eq!(report.link_up(), Some(true));
    assert!(report.coalesce().is_none());
    assert!(report.features().unwrap().is_active("rx-checksum"));
    assert!(report.link_settings().is_none());
    assert!(report.wol().unwrap().supports("magic"));

    let failed: Vec<_> = report.failures().map(|(q, _)| q).collect();
    assert_eq!(failed, [Query::Coalesce, Query::LinkSettings]);
    assert!(report.failures().all(|(_, e)| e.is_not_supported()));

    assert_eq!(transport.remaining(), 0);
}

#[test]
fn test_report_runs_selected_queries_only() {
    let mut transport = ScriptedTransport::new("eth0").reply(EthtoolCmd::Gcoalesce, EthtoolCoalesce {
        rx_coalesce_usecs: 8,
        ..EthtoolCoalesce::new()
    });

    let queries = QuerySet::new().with(Query::Coalesce);
    let report = Ethtool::with_transport(&mut transport).report(&queries);

    assert_eq!(report.len(), 1);
    assert!(report.is_complete());
    assert!(report.get(Query::LinkUp).is_none());
    assert_eq!(transport.requests.len(), 1);

    let results = report.into_result().unwrap();
    match results.get(&Query::Coalesce) {
        Some(Capability::Coalesce(c)) => assert_eq!(c.rx_usecs, 8),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_empty_query_set_issues_no_commands() {
    let mut transport = ScriptedTransport::new("eth0");
    let report = Ethtool::with_transport(&mut transport).report(&QuerySet::new());

    assert!(report.is_empty());
    assert!(report.is_complete());
    assert!(transport.requests.is_empty());
}

#[cfg(feature = "output")]
#[test]
fn test_report_json_lists_errors() {
    use nicprobe::output::Printable;

    let mut transport = ScriptedTransport::new("eth0")
        .reply(EthtoolCmd::Glink, EthtoolValue::new(EthtoolCmd::Glink))
        .fail(EthtoolCmd::Gwol, libc::EOPNOTSUPP);

    let queries = QuerySet::new().with(Query::LinkUp).with(Query::Wol);
    let json = Ethtool::with_transport(&mut transport)
        .report(&queries)
        .to_json();

    assert_eq!(json["ifname"], "eth0");
    assert_eq!(json["link_up"], false);
    assert!(json["errors"]["wol"]["error"]
        .as_str()
        .unwrap()
        .contains("not supported"));
}
