//! Fixed-size query integration tests.
//!
//! Covers `GLINK`, `GCOALESCE` and `GWOL`, and how transport errors
//! surface through them.

use nicprobe::ethtool::wire::{EthtoolCoalesce, EthtoolValue, EthtoolWolinfo, WireStruct};
use nicprobe::ethtool::EthtoolCmd;
use nicprobe::{Error, Ethtool};

use crate::common::ScriptedTransport;

#[test]
fn test_link_up() {
    let mut transport = ScriptedTransport::new("eth0")
        .reply(
            EthtoolCmd::Glink,
            EthtoolValue {
                data: 1,
                ..EthtoolValue::new(EthtoolCmd::Glink)
            },
        )
        .reply(EthtoolCmd::Glink, EthtoolValue::new(EthtoolCmd::Glink));

    let mut eth = Ethtool::with_transport(&mut transport);
    assert!(eth.link_up().unwrap());
    assert!(!eth.link_up().unwrap());

    let request = EthtoolValue::decode(&transport.requests[0].1).unwrap();
    assert_eq!(request.cmd, 0x0a);
    assert_eq!(transport.requests[0].1.len(), EthtoolValue::SIZE);
}

#[test]
fn test_coalesce() {
    let response = EthtoolCoalesce {
        rx_coalesce_usecs: 3,
        rx_max_coalesced_frames: 64,
        tx_coalesce_usecs: 0,
        use_adaptive_rx_coalesce: 1,
        pkt_rate_high: 400_000,
        rate_sample_interval: 1,
        ..EthtoolCoalesce::new()
    };
    let mut transport = ScriptedTransport::new("eth0").reply(EthtoolCmd::Gcoalesce, response);

    let coalesce = Ethtool::with_transport(&mut transport).coalesce().unwrap();

    assert_eq!(coalesce.rx_usecs, 3);
    assert_eq!(coalesce.rx_max_frames, 64);
    assert_eq!(coalesce.tx_usecs, 0);
    assert!(coalesce.use_adaptive_rx);
    assert!(!coalesce.use_adaptive_tx);
    assert_eq!(coalesce.pkt_rate_high, 400_000);
    assert_eq!(coalesce.rate_sample_interval, 1);
    assert_eq!(transport.requests[0].1.len(), 92);
}

#[test]
fn test_wol() {
    let response = EthtoolWolinfo {
        supported: (1 << 0) | (1 << 5) | (1 << 6),
        wolopts: 1 << 5,
        sopass: [0x00, 0x11, 0x22, 0x33, 0x44, 0x55],
        ..EthtoolWolinfo::new()
    };
    let mut transport = ScriptedTransport::new("eth0").reply(EthtoolCmd::Gwol, response);

    let wol = Ethtool::with_transport(&mut transport).wol().unwrap();

    assert!(wol.supports("phy"));
    assert!(wol.supports("magic_secure"));
    assert!(!wol.supports("arp"));
    assert_eq!(wol.enabled(), ["magic"]);
    assert_eq!(wol.sopass, Some([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]));
}

#[test]
fn test_no_such_device() {
    let mut transport = ScriptedTransport::new("eth9").fail(EthtoolCmd::Glink, libc::ENODEV);

    let err = Ethtool::with_transport(&mut transport).link_up().unwrap_err();
    assert!(matches!(err, Error::NoSuchDevice(ref name) if name == "eth9"));
    assert!(err.is_not_found());
}

#[test]
fn test_not_supported() {
    let mut transport = ScriptedTransport::new("lo").fail(EthtoolCmd::Gcoalesce, libc::EOPNOTSUPP);

    let err = Ethtool::with_transport(&mut transport).coalesce().unwrap_err();
    assert!(matches!(err, Error::NotSupported(ref name) if name == "lo"));
}

#[test]
fn test_other_os_errors_pass_through() {
    let mut transport = ScriptedTransport::new("eth0").fail(EthtoolCmd::Gwol, libc::EPERM);

    let err = Ethtool::with_transport(&mut transport).wol().unwrap_err();
    match err {
        Error::Transport {
            command,
            ref ifname,
            ref source,
        } => {
            assert_eq!(command, "ETHTOOL_GWOL");
            assert_eq!(ifname, "eth0");
            assert_eq!(source.raw_os_error(), Some(libc::EPERM));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_session_reports_interface_name() {
    let transport = ScriptedTransport::new("enp3s0");
    let eth = Ethtool::with_transport(transport);
    assert_eq!(eth.ifname(), "enp3s0");
    assert_eq!(eth.into_transport().remaining(), 0);
}
