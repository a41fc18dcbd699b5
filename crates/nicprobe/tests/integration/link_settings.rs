//! Link settings integration tests.
//!
//! Tests for the `GLINKSETTINGS` handshake and mask decoding.

use nicprobe::ethtool::wire::{EthtoolLinkSettings, WireStruct};
use nicprobe::ethtool::{Duplex, EthtoolCmd, Port, Speed};
use nicprobe::{Error, Ethtool};
use zerocopy::IntoBytes;

use crate::common::{ScriptedTransport, words, write_at};

/// Answer the probe with `-nwords`.
fn handshake(transport: ScriptedTransport, nwords: i8) -> ScriptedTransport {
    transport.then(EthtoolCmd::GlinkSettings, move |buf| {
        let mut reply = EthtoolLinkSettings::decode(buf)?;
        reply.link_mode_masks_nwords = -nwords;
        write_at(buf, 0, reply.as_bytes());
        Ok(())
    })
}

fn nwords_of(request: &[u8]) -> i8 {
    EthtoolLinkSettings::decode(request)
        .unwrap()
        .link_mode_masks_nwords
}

#[test]
fn test_negotiates_three_words() {
    let header = EthtoolLinkSettings {
        speed: 10_000,
        duplex: 1,
        port: 3,
        autoneg: 0,
        phy_address: 2,
        ..EthtoolLinkSettings::new(3)
    };
    let masks = words(&[
        // supported: FIBRE, 10000baseT/Full | 10000baseSR/Full | 200000baseCR4/Full
        (1 << 10) | (1 << 12),
        1 << (43 - 32),
        1 << (66 - 64),
        // advertised: 10000baseT/Full
        1 << 12,
        0,
        0,
        // link partner: 200000baseCR4/Full
        0,
        0,
        1 << (66 - 64),
    ]);

    let mut transport = handshake(ScriptedTransport::new("eth0"), 3).then(
        EthtoolCmd::GlinkSettings,
        move |buf| {
            assert_eq!(buf.len(), EthtoolLinkSettings::SIZE + 36);
            write_at(buf, 0, header.as_bytes());
            write_at(buf, EthtoolLinkSettings::SIZE, &masks);
            Ok(())
        },
    );

    let settings = Ethtool::with_transport(&mut transport)
        .link_settings()
        .unwrap();

    assert_eq!(transport.requests.len(), 2);
    assert_eq!(nwords_of(&transport.requests[0].1), 0);
    assert_eq!(transport.requests[0].1.len(), EthtoolLinkSettings::SIZE);
    assert_eq!(nwords_of(&transport.requests[1].1), 3);

    assert_eq!(settings.speed, Speed::Mbps(10_000));
    assert_eq!(settings.duplex, Some(Duplex::Full));
    assert_eq!(settings.port, Some(Port::Fibre));
    assert!(!settings.autoneg);
    assert_eq!(settings.phy_address, 2);
    assert_eq!(settings.supported_ports(), ["FIBRE"]);
    assert_eq!(
        settings.supported_modes(),
        ["10000baseT/Full", "10000baseSR/Full", "200000baseCR4/Full"]
    );
    assert_eq!(settings.advertised_modes(), ["10000baseT/Full"]);
    assert_eq!(settings.lp_advertised_modes(), ["200000baseCR4/Full"]);
}

#[test]
fn test_non_negative_probe_reply_is_not_supported() {
    // Driver left the probe untouched: nwords stays 0.
    let mut transport = ScriptedTransport::new("eth0").then(EthtoolCmd::GlinkSettings, |_| Ok(()));

    let err = Ethtool::with_transport(&mut transport)
        .link_settings()
        .unwrap_err();

    assert!(matches!(err, Error::NotSupported(ref name) if name == "eth0"));
    assert_eq!(transport.requests.len(), 1);
}

#[test]
fn test_positive_probe_reply_is_not_supported() {
    let mut transport = ScriptedTransport::new("eth0").then(EthtoolCmd::GlinkSettings, |buf| {
        let mut reply = EthtoolLinkSettings::decode(buf)?;
        reply.link_mode_masks_nwords = 2;
        write_at(buf, 0, reply.as_bytes());
        Ok(())
    });

    let err = Ethtool::with_transport(&mut transport)
        .link_settings()
        .unwrap_err();
    assert!(err.is_not_supported());
    assert_eq!(transport.requests.len(), 1);
}

#[test]
fn test_probe_reply_with_wrong_command_is_not_supported() {
    let mut transport = ScriptedTransport::new("eth0").then(EthtoolCmd::GlinkSettings, |buf| {
        let mut reply = EthtoolLinkSettings::decode(buf)?;
        reply.cmd = 0x4d;
        reply.link_mode_masks_nwords = -2;
        write_at(buf, 0, reply.as_bytes());
        Ok(())
    });

    let err = Ethtool::with_transport(&mut transport)
        .link_settings()
        .unwrap_err();
    assert!(err.is_not_supported());
    assert_eq!(transport.requests.len(), 1);
}

#[test]
fn test_second_reply_wider_than_request_is_malformed() {
    let mut transport =
        handshake(ScriptedTransport::new("eth0"), 1).then(EthtoolCmd::GlinkSettings, |buf| {
            let reply = EthtoolLinkSettings::new(4);
            write_at(buf, 0, reply.as_bytes());
            Ok(())
        });

    let err = Ethtool::with_transport(&mut transport)
        .link_settings()
        .unwrap_err();
    assert!(matches!(err, Error::MalformedResponse { .. }));
}

#[test]
fn test_second_reply_negative_is_not_supported() {
    let mut transport =
        handshake(ScriptedTransport::new("eth0"), 2).then(EthtoolCmd::GlinkSettings, |buf| {
            let reply = EthtoolLinkSettings::new(-2);
            write_at(buf, 0, reply.as_bytes());
            Ok(())
        });

    let err = Ethtool::with_transport(&mut transport)
        .link_settings()
        .unwrap_err();
    assert!(err.is_not_supported());
    assert_eq!(transport.requests.len(), 2);
}

#[test]
fn test_unknown_speed_and_duplex() {
    let header = EthtoolLinkSettings {
        speed: u32::MAX,
        duplex: 0xff,
        port: 0xef,
        ..EthtoolLinkSettings::new(1)
    };
    let mut transport =
        handshake(ScriptedTransport::new("eth0"), 1).reply(EthtoolCmd::GlinkSettings, header);

    let settings = Ethtool::with_transport(&mut transport)
        .link_settings()
        .unwrap();
    assert_eq!(settings.speed, Speed::Unknown);
    assert_eq!(settings.duplex, Some(Duplex::Unknown));
    assert_eq!(settings.port, Some(Port::None));
    assert!(settings.supported.is_empty());
}

#[test]
fn test_handshake_error_passes_through() {
    let mut transport =
        ScriptedTransport::new("eth0").fail(EthtoolCmd::GlinkSettings, libc::EOPNOTSUPP);

    let err = Ethtool::with_transport(&mut transport)
        .link_settings()
        .unwrap_err();
    assert!(err.is_not_supported());
}
