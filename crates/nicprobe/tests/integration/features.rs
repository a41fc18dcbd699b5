//! Feature and string-set integration tests.

use nicprobe::ethtool::wire::{
    EthtoolFeaturesBlock, EthtoolGfeatures, EthtoolGstrings, EthtoolSsetInfo, WireStruct,
};
use nicprobe::ethtool::{ETH_GSTRING_LEN, EthtoolCmd, StringSetId};
use nicprobe::{Error, Ethtool};
use zerocopy::IntoBytes;

use crate::common::{ScriptedTransport, write_at};

#[test]
fn test_features_decode_against_names() {
    let mut transport = ScriptedTransport::new("eth0")
        .feature_names(&["tx-csum", "rx-csum", "tso"])
        .feature_blocks(vec![EthtoolFeaturesBlock {
            available: 0b010,
            requested: 0b110,
            active: 0b110,
            never_changed: 0b001,
        }]);

    let features = Ethtool::with_transport(&mut transport).features().unwrap();

    assert_eq!(features.len(), 3);
    let names: Vec<_> = features.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["tx-csum", "rx-csum", "tso"]);

    assert!(!features.is_available("tx-csum"));
    assert!(features.is_available("rx-csum"));
    assert!(!features.is_available("tso"));
    assert_eq!(features.active_features(), ["rx-csum", "tso"]);
    assert!(features.get("tx-csum").unwrap().is_never_changed);

    // GSSET_INFO asks for the features set only
    let (cmd, info) = &transport.requests[0];
    assert_eq!(*cmd, EthtoolCmd::GssetInfo);
    let info = EthtoolSsetInfo::decode(info).unwrap();
    let mask = info.sset_mask;
    assert_eq!(mask, StringSetId::Features.mask());

    // GSTRINGS sized for three names
    let (_, gstrings) = &transport.requests[1];
    assert_eq!(gstrings.len(), EthtoolGstrings::SIZE + 3 * ETH_GSTRING_LEN);
    assert_eq!(EthtoolGstrings::decode(gstrings).unwrap().string_set, 4);

    // GFEATURES asks for one block
    let (_, gfeatures) = &transport.requests[2];
    assert_eq!(EthtoolGfeatures::decode(gfeatures).unwrap().size, 1);
    assert_eq!(transport.remaining(), 0);
}

#[test]
fn test_features_spanning_blocks() {
    let names: Vec<String> = (0..40).map(|i| format!("feature-{}", i)).collect();
    let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();

    let mut transport = ScriptedTransport::new("eth0")
        .feature_names(&refs)
        .feature_blocks(vec![
            EthtoolFeaturesBlock::default(),
            EthtoolFeaturesBlock {
                active: 1 << 3,
                ..Default::default()
            },
        ]);

    let features = Ethtool::with_transport(&mut transport).features().unwrap();
    assert_eq!(features.active_features(), ["feature-35"]);
    assert_eq!(features.get("feature-35").unwrap().index, 35);
}

#[test]
fn test_kernel_reporting_more_blocks_decodes_requested_only() {
    let mut transport = ScriptedTransport::new("eth0")
        .feature_names(&["rx-gro"])
        .then(EthtoolCmd::Gfeatures, |buf| {
            write_at(buf, 0, EthtoolGfeatures::new(3).as_bytes());
            let block = EthtoolFeaturesBlock {
                active: 1,
                ..Default::default()
            };
            write_at(buf, EthtoolGfeatures::SIZE, block.as_bytes());
            Ok(())
        });

    let features = Ethtool::with_transport(&mut transport).features().unwrap();
    assert!(features.is_active("rx-gro"));
}

#[test]
fn test_empty_feature_set() {
    let mut transport = ScriptedTransport::new("eth0")
        .feature_names(&[])
        .feature_blocks(vec![]);

    let features = Ethtool::with_transport(&mut transport).features().unwrap();
    assert!(features.is_empty());
}

#[test]
fn test_string_set_unsupported_set_is_empty() {
    // Kernel clears the mask bit for sets the driver lacks.
    let mut transport = ScriptedTransport::new("eth0")
        .then(EthtoolCmd::GssetInfo, |buf| {
            write_at(buf, 0, EthtoolSsetInfo::new(0).as_bytes());
            Ok(())
        })
        .then(EthtoolCmd::Gstrings, |_| Ok(()));

    let set = Ethtool::with_transport(&mut transport)
        .string_set(StringSetId::PrivFlags)
        .unwrap();
    assert!(set.is_empty());
    assert_eq!(set.id, StringSetId::PrivFlags);
}

#[test]
fn test_string_set_trusts_shorter_returned_len() {
    let mut transport = ScriptedTransport::new("eth0")
        .then(EthtoolCmd::GssetInfo, |buf| {
            let mut info = EthtoolSsetInfo::new(StringSetId::Stats.mask());
            info.data = 3;
            write_at(buf, 0, info.as_bytes());
            Ok(())
        })
        .then(EthtoolCmd::Gstrings, |buf| {
            write_at(buf, 0, EthtoolGstrings::new(1, 2).as_bytes());
            write_at(buf, EthtoolGstrings::SIZE, b"rx_packets");
            write_at(buf, EthtoolGstrings::SIZE + ETH_GSTRING_LEN, b"tx_packets");
            write_at(buf, EthtoolGstrings::SIZE + 2 * ETH_GSTRING_LEN, b"stale");
            Ok(())
        });

    let set = Ethtool::with_transport(&mut transport)
        .string_set(StringSetId::Stats)
        .unwrap();
    assert_eq!(set.strings, ["rx_packets", "tx_packets"]);
    assert_eq!(set.get(1), Some("tx_packets"));
}

#[test]
fn test_string_set_longer_returned_len_is_malformed() {
    let mut transport = ScriptedTransport::new("eth0")
        .then(EthtoolCmd::GssetInfo, |buf| {
            let mut info = EthtoolSsetInfo::new(StringSetId::Stats.mask());
            info.data = 1;
            write_at(buf, 0, info.as_bytes());
            Ok(())
        })
        .then(EthtoolCmd::Gstrings, |buf| {
            write_at(buf, 0, EthtoolGstrings::new(1, 5).as_bytes());
            Ok(())
        });

    let err = Ethtool::with_transport(&mut transport)
        .string_set(StringSetId::Stats)
        .unwrap_err();
    assert!(matches!(err, Error::MalformedResponse { .. }));
}

#[test]
fn test_string_set_rejects_non_ascii_name() {
    let mut transport = ScriptedTransport::new("eth0")
        .then(EthtoolCmd::GssetInfo, |buf| {
            let mut info = EthtoolSsetInfo::new(StringSetId::Stats.mask());
            info.data = 2;
            write_at(buf, 0, info.as_bytes());
            Ok(())
        })
        .then(EthtoolCmd::Gstrings, |buf| {
            write_at(buf, EthtoolGstrings::SIZE, b"ok");
            write_at(buf, EthtoolGstrings::SIZE + ETH_GSTRING_LEN, &[0xff, 0xfe]);
            Ok(())
        });

    let err = Ethtool::with_transport(&mut transport)
        .string_set(StringSetId::Stats)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidString { index: 1 }));
}

#[test]
fn test_features_missing_string_set_fails_early() {
    let mut transport =
        ScriptedTransport::new("eth0").fail(EthtoolCmd::GssetInfo, libc::EOPNOTSUPP);

    let err = Ethtool::with_transport(&mut transport).features().unwrap_err();
    assert!(err.is_not_supported());
    assert_eq!(transport.requests.len(), 1);
}
