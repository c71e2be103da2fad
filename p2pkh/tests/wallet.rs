use std::sync::LazyLock;
use std::thread;

use bip32::{ExtendedPubKey, HARDENED_OFFSET};
use p2pkh::mnemonic::generate_mnemonic;
use p2pkh::{AddressError, Config, Network, Wallet, WalletError, Wif, WifError};
use proptest::prelude::*;

const PHRASE: &str = "romance trash engine during cliff verify tunnel memory vault chief fluid fox";

static MAINNET_ROOT: LazyLock<Wallet> = LazyLock::new(|| {
    let _ = env_logger::builder().is_test(true).try_init();
    Wallet::new(&Config::new(PHRASE, Network::Mainnet)).unwrap()
});

fn random_wallet(network: Network, path: &str) -> Wallet {
    let phrase = generate_mnemonic(128).unwrap();
    Wallet::new(&Config::new(phrase, network).with_path(path)).unwrap()
}

#[test]
fn mainnet_known_addresses() {
    let root = &*MAINNET_ROOT;
    assert_eq!(root.path(), "m/44'/0'/0'/0");
    assert_eq!(root.address_string(), "1QHTz6wMURLy8DT6aeGAVbF2UvtuWZKozr");

    let cases = [
        (0, "1MnyeMkdKFWyheVTbJhKmxa1NFoGb5kB1A"),
        (1, "1HzaSoLT8kM13M35HgRuigMUYGP2h8PMCv"),
        (2, "13WtMVbxkBNLejiTQkBNoYHwfq4Ka66yUE"),
    ];
    for (index, expected) in cases {
        let child = root.derive(index).unwrap();
        assert_eq!(child.path(), format!("m/44'/0'/0'/0/{index}"));
        assert_eq!(child.address_string(), expected);
    }
}

#[test]
fn testnet_known_addresses() {
    let root = Wallet::new(&Config::new(PHRASE, Network::Testnet)).unwrap();
    assert_eq!(root.path(), "m/44'/1'/0'/0");
    assert_eq!(root.address_string(), "mwcCopfa6QvrbRF6QErigaYPnTFsij1i5x");

    let child = root.derive(0).unwrap();
    assert_eq!(child.path(), "m/44'/1'/0'/0/0");
    assert_eq!(child.address_string(), "mouZ8gxQsiexTYihidSEiRmQGCm2AauaXF");
}

#[test]
fn explicit_path_matches_derive_chain() {
    let explicit =
        Wallet::new(&Config::new(PHRASE, Network::Mainnet).with_path("m/44'/0'/0'/0/1")).unwrap();
    assert_eq!(explicit.address_string(), "1HzaSoLT8kM13M35HgRuigMUYGP2h8PMCv");
    assert_eq!(explicit.public_key(), MAINNET_ROOT.derive(1).unwrap().public_key());
}

#[test]
fn rejects_bad_mnemonics() {
    for phrase in ["", "   ", "invalid invalid invalid invalid invalid"] {
        let err = Wallet::new(&Config::new(phrase, Network::Mainnet)).unwrap_err();
        assert!(
            matches!(err, WalletError::InvalidMnemonic(_)),
            "{phrase:?} gave {err:?}"
        );
    }
    // valid words, broken checksum
    let bad_checksum = ["abandon"; 12].join(" ");
    assert!(matches!(
        Wallet::new(&Config::new(bad_checksum, Network::Mainnet)),
        Err(WalletError::InvalidMnemonic(_))
    ));
}

#[test]
fn mnemonic_stays_on_root_only() {
    assert_eq!(MAINNET_ROOT.mnemonic(), PHRASE);
    let child = MAINNET_ROOT.derive(0).unwrap();
    assert_eq!(child.mnemonic(), "");
    assert_eq!(child.derive(0).unwrap().mnemonic(), "");
}

#[test]
fn derive_leaves_parent_untouched() {
    let before = MAINNET_ROOT.address_string();
    let _ = MAINNET_ROOT.derive(5).unwrap();
    assert_eq!(MAINNET_ROOT.address_string(), before);
    assert_eq!(MAINNET_ROOT.path(), "m/44'/0'/0'/0");
}

#[test]
fn child_keeps_network() {
    let root = random_wallet(Network::Testnet, "");
    let grandchild = root.derive(3).unwrap().derive(HARDENED_OFFSET).unwrap();
    assert_eq!(grandchild.network(), Network::Testnet);
    assert_eq!(grandchild.path(), "m/44'/1'/0'/0/3/0'");
    assert!(grandchild.extended_public_key().starts_with("tpub"));
}

#[test]
fn private_key_is_compressed_wif() {
    let main = random_wallet(Network::Mainnet, "m/44'/0'/0'/0/0");
    let wif = main.private_key();
    assert!(wif.starts_with('K') || wif.starts_with('L'), "{}", wif.as_str());
    assert_eq!(wif.len(), 52);

    let decoded: Wif = p2pkh::wif::decode_wif(&wif).unwrap();
    assert!(decoded.compressed);
    assert_eq!(decoded.params.network, Network::Mainnet);
    assert_eq!(decoded.secret_key, main.extended_key().private_key);

    let test = random_wallet(Network::Testnet, "");
    assert!(test.private_key().starts_with('c'));

    assert!(matches!(
        p2pkh::wif::decode_wif("not-a-key"),
        Err(WifError::Base58(_))
    ));
}

#[test]
fn address_string_length_is_variable_but_bounded() {
    for index in 0..20 {
        let len = MAINNET_ROOT.derive(index).unwrap().address_string().len();
        assert!((25..=34).contains(&len), "length {len}");
    }
}

#[test]
fn validate_address_distinguishes_network_from_garbage() {
    let main = &*MAINNET_ROOT;
    assert!(main.validate_address("1QHTz6wMURLy8DT6aeGAVbF2UvtuWZKozr").unwrap());
    assert!(main.validate_address("3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy").unwrap());

    // well-formed testnet address on a mainnet wallet
    assert!(!main.validate_address("mwcCopfa6QvrbRF6QErigaYPnTFsij1i5x").unwrap());

    let err = main.validate_address("InvalidBitcoinAddress").unwrap_err();
    assert!(matches!(err, WalletError::Decode(AddressError::Base58(_))));

    let testnet = Wallet::new(&Config::new(PHRASE, Network::Testnet)).unwrap();
    assert!(testnet.validate_address(&testnet.address_string()).unwrap());
    assert!(!testnet.validate_address(&main.address_string()).unwrap());
}

#[test]
fn validate_segwit_addresses() {
    const BC1: &str = "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4";
    const TB1: &str = "tb1qrp33g0q5c5txsp9arysrx4k6zdkfs4nce4xj0gdcccefvpysxf3q0sl5k7";

    let main = &*MAINNET_ROOT;
    assert!(main.validate_address(BC1).unwrap());
    assert!(!main.validate_address(TB1).unwrap());

    let testnet = Wallet::new(&Config::new(PHRASE, Network::Testnet)).unwrap();
    assert!(testnet.validate_address(TB1).unwrap());
    assert!(!testnet.validate_address(BC1).unwrap());

    // right prefix, broken checksum
    let err = main
        .validate_address("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t5")
        .unwrap_err();
    assert!(matches!(err, WalletError::Decode(AddressError::Bech32(_))));
}

#[test]
fn extended_public_key_roundtrip() {
    let w = random_wallet(Network::Mainnet, "m/44'/0'/0'/0/0");
    let xpub = w.extended_public_key();
    assert!(xpub.starts_with("xpub"), "{xpub}");

    let parsed = ExtendedPubKey::from_base58(&xpub).unwrap();
    assert_eq!(parsed.public_key.serialize(), w.public_key().serialize());
    assert_eq!(parsed.depth, 5);
}

#[test]
fn extended_private_key_prefixes() {
    assert!(MAINNET_ROOT.extended_private_key().starts_with("xprv"));
    let test = Wallet::new(&Config::new(PHRASE, Network::Testnet)).unwrap();
    assert!(test.extended_private_key().starts_with("tprv"));
}

#[test]
fn shared_across_threads() {
    let root = &*MAINNET_ROOT;
    let addresses: Vec<String> = thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|i| s.spawn(move || root.derive(i).unwrap().address_string()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for (i, address) in addresses.iter().enumerate() {
        assert_eq!(*address, root.derive(i as u32).unwrap().address_string());
    }
}

#[test]
fn rebuilding_is_deterministic() {
    let again = Wallet::new(&Config::new(PHRASE, Network::Mainnet)).unwrap();
    assert_eq!(again.public_key(), MAINNET_ROOT.public_key());
    assert_eq!(again.extended_key(), MAINNET_ROOT.extended_key());
    assert_eq!(
        again.extended_public_key(),
        MAINNET_ROOT.extended_public_key()
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn derive_is_deterministic_and_appends_index(index in any::<u32>()) {
        let a = MAINNET_ROOT.derive(index).unwrap();
        let b = MAINNET_ROOT.derive(index).unwrap();
        prop_assert_eq!(a.address(), b.address());
        prop_assert_eq!(a.extended_key(), b.extended_key());

        let reparsed: bip32::DerivationPath = a.path().parse().unwrap();
        prop_assert_eq!(reparsed, MAINNET_ROOT.derivation_path().child(index));
        if index < HARDENED_OFFSET {
            prop_assert_eq!(a.path(), format!("{}/{}", MAINNET_ROOT.path(), index));
        }
    }
}
