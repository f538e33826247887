//! End-to-end vectors: phrase → seed → keys → addresses.

use hdkit_wallet::{ChainSpec, HashGateway, Version, Wallet};

const PHRASE: &str =
    "denial adult elevator below success birth sheriff front acid chef debate start";
const ABANDON: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn wallet() -> Wallet {
    Wallet::default()
}

#[test]
fn test_seed() {
    assert_eq!(
        to_hex(&wallet().mnemonic_to_seed(PHRASE, "")),
        "25319dba10231984b2d243b6915ab9d2c1adb96e30fdd5f8ee15c79758e939984ce2cda3a8dc35bcec4dfd9abd129a6e95c809d01225651743919e17d1e932c8"
    );
    assert_eq!(
        to_hex(&wallet().mnemonic_to_seed(ABANDON, "")),
        "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
    );
}

#[test]
fn test_root_key_material() {
    assert_eq!(
        to_hex(&wallet().root_key_material(PHRASE, "").unwrap()),
        "ad58258c043e913fcbdf207dfdbf95ffd317192b2cffad0063eb864b7ce31a6e78af8520869c5c349d390bdb3f40387299e88839c4cce5d4aa9a082835aa34fb"
    );
}

#[test]
fn test_root_key() {
    let wallet = wallet();
    let seed = wallet.mnemonic_to_seed(PHRASE, "");
    assert_eq!(
        wallet.root_key(&seed, Version::MainnetPrivate).unwrap().to_string(),
        "xprv9s21ZrQH143K3G3gd4fbajvM6CoU7aL1Qk4H8tRkR5g6M9NqUmbvCeoWo23NtnHRdwaa3LySYiBbB48TbrYYnNDBc3AAmpJndeCQdeMxFbz"
    );
    assert_eq!(
        wallet.root_key(&seed, Version::MainnetPublic).unwrap().to_string(),
        "xpub661MyMwAqRbcFk89j6Cbwss5eEdxX33rmxyswGqMyRD5Dwhz2JvAkT7zeGpcVa3NZMtaMyt6f34dqo37wdrWx9Ai9qFcgnrsn93KJbPaanw"
    );
}

#[test]
fn test_master_fingerprint_and_public_key() {
    let wallet = wallet();
    let master = wallet.master_key_from_phrase(PHRASE, "").unwrap();
    assert_eq!(wallet.engine().fingerprint(&master).unwrap(), [115, 93, 68, 69]);
    assert_eq!(
        to_hex(master.public_key()),
        "028c5922309fed7cdd144ecd8269ad6aa9a06a3f5dbfafb267f409a0530b850c0d"
    );
}

#[test]
fn test_account() {
    let account = wallet().account(PHRASE, "m/44'/60'/0'/0/0").unwrap();
    assert_eq!(account.address, "0x4344Eb02Dd0275B724B988AF97758edeaD63cFEa");
    assert_eq!(
        account.private_key,
        "0xa912f04788a435a4c01ef7442809af626f9670426e2d1367421c34438af9b7a6"
    );
    assert_eq!(
        account.public_key,
        "0x0469de4780436611afed73aa8a01b504dc3b23dbaee7da635f74e9677aa8552de029a89a135bcfee832ee3ff2d51fff3b6db5dac247b05cb8f8e871e6694f0a72d"
    );
}

#[test]
fn test_web3_address() {
    let wallet = wallet();
    assert_eq!(
        wallet.web3_address(PHRASE, "m/44'/60'/0'/0/1").unwrap(),
        "0xA00e35E792f4C573179323A4B1283C91539a8055"
    );
    assert_eq!(
        wallet.web3_address(ABANDON, "m/44'/60'/0'/0/0").unwrap(),
        "0x9858EfFD232B4033E47d90003D41EC34EcaEda94"
    );
}

#[test]
fn test_extended_keys_at_change_level() {
    let wallet = wallet();
    assert_eq!(
        wallet.xprv(PHRASE, "m/44'/60'/0'/0").unwrap(),
        "xprvA2Lvvd3bSaqeQ7QUHNhyWDMTxPzAoCkbwqMUBGKunxZH8zSgtNaNnsymvHC5LArmV1a8RYWwZASDjhPLEv7QVMSGuo595e7MV1WzAKM293q"
    );
    assert_eq!(
        wallet.xpub(PHRASE, "m/44'/60'/0'/0").unwrap(),
        "xpub6FLHL8aVGxPwcbUwPQEysMJCWRpfCfUTK4H4yejXMJ6G1nmqRutdLgJFmbf41uX8Q4KvciXVcz7rJVhReJypoTc8ResE5xXYe6Fgtxj7AMC"
    );
    assert_eq!(
        wallet.xpub(PHRASE, "m/44'/60'/0'").unwrap(),
        "xpub6CkHdeBYqpSvT2u1V2A7qJqkUoV5A9Y4oi4ki5WGbW6jY9NhxTL2RxnC82njnc6nxnTyM1wgD6H8sUCkipZTNGVSG776c7Zod4haoHuvBCE"
    );
}

#[test]
fn test_address_from_extended_key() {
    let wallet = wallet();
    let xprv = "xprvA2Lvvd3bSaqeQ7QUHNhyWDMTxPzAoCkbwqMUBGKunxZH8zSgtNaNnsymvHC5LArmV1a8RYWwZASDjhPLEv7QVMSGuo595e7MV1WzAKM293q";
    let xpub = "xpub6FLHL8aVGxPwcbUwPQEysMJCWRpfCfUTK4H4yejXMJ6G1nmqRutdLgJFmbf41uX8Q4KvciXVcz7rJVhReJypoTc8ResE5xXYe6Fgtxj7AMC";
    assert_eq!(
        wallet.address_from_xprv(xprv, 0).unwrap(),
        "0x4344Eb02Dd0275B724B988AF97758edeaD63cFEa"
    );
    assert_eq!(
        wallet.address_from_xprv(xpub, 1).unwrap(),
        "0xA00e35E792f4C573179323A4B1283C91539a8055"
    );
}

#[test]
fn test_chain_presets() {
    let wallet = wallet();
    let master = wallet.master_key_from_phrase(ABANDON, "").unwrap();
    let cases = [
        ("bitcoin", "m/44'/0'/0'/0/0", "1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA"),
        ("bitcoin-p2sh", "m/49'/0'/0'/0/0", "37VucYSaXLCAsxYyAPfbSi9eh4iEcbShgf"),
        ("bitcoin-segwit", "m/84'/0'/0'/0/0", "bc1qcr8te4kr609gcawutmrza0j4xv80jy8z306fyu"),
        ("avalanche", "m/44'/9000'/0'/0/0", "avax1p9575chzhvcwvmvzaqh7yeld76r3af0ha56phl"),
        ("ethereum", "m/44'/60'/0'/0/0", "0x9858EfFD232B4033E47d90003D41EC34EcaEda94"),
    ];
    for (preset, path, expected) in cases {
        let chain = ChainSpec::preset(preset).unwrap();
        assert_eq!(
            wallet.derive_address(path, &master, &chain).unwrap(),
            expected,
            "{preset} at {path}"
        );
    }
}

#[test]
fn test_avax_address_from_private_key() {
    let wallet = wallet();
    let account = wallet.account(PHRASE, "m/44'/9000'/0'/0/0").unwrap();
    let private_key = hdkit_core::hex::decode(&account.private_key).unwrap();
    assert_eq!(
        wallet.avax_address(&private_key, "avax").unwrap(),
        "avax1fukjhvzlrvyu3dhv42yqzhjnrz4kvdm38q8p6x"
    );

    let compressed = wallet.gateway().public_key(&private_key, true).unwrap();
    let hash160 = wallet.gateway().hash160(&compressed);
    assert_eq!(
        wallet.avax_address_from_hash(&hash160, "avax").unwrap(),
        "avax1fukjhvzlrvyu3dhv42yqzhjnrz4kvdm38q8p6x"
    );
    assert!(wallet.avax_address_from_hash(&hash160, "").is_err());
}

#[test]
fn test_legacy_ethereum_vectors() {
    let wallet = wallet();
    let public_key = hdkit_core::hex::decode(
        "04e68acfc0253a10620dff706b0a1b1f1f5833ea3beb3bde2250d5f271f3563606672ebc45e0b7ea2e816ecb70ca03137b1c9476eec63d4632e990020b7b6fba39",
    )
    .unwrap();
    assert_eq!(
        wallet.ethereum_address(&public_key).unwrap(),
        "0x90F8bf6A479f320ead074411a4B0e7944Ea8c9C1"
    );

    let private_key = hdkit_core::hex::decode(
        "638a8089747e8d14d4cdcca0f512471741c2993e5e85c51a496f0d063e43631e",
    )
    .unwrap();
    let derived = wallet.gateway().public_key(&private_key, false).unwrap();
    assert_eq!(
        wallet.ethereum_address(&derived).unwrap(),
        "0x9dE86784F52894980bD7a1789e0931aFF3Adc9Ce"
    );
}
