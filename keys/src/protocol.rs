//!
//! Per-coin protocol parameters.
//!
//! Everything address generation needs to know about a coin lives in
//! one [`CoinProtocol`] value constructed by the caller and passed down
//! explicitly. Version bytes follow the mainnet conventions of each
//! chain; Zcash transparent addresses use two-byte versions.
//!

use crate::address_type::AddressType;
use serde::{Deserialize, Serialize};

/// Coin families sharing derivation behavior.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseCoin {
    Btc,
    Ltc,
    Eth,
    Dash,
    Zec,
}

impl BaseCoin {
    pub fn name(self) -> &'static str {
        match self {
            BaseCoin::Btc => "BTC",
            BaseCoin::Ltc => "LTC",
            BaseCoin::Eth => "ETH",
            BaseCoin::Dash => "DASH",
            BaseCoin::Zec => "ZEC",
        }
    }
}

/// Mainnet parameter set for one coin.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CoinProtocol {
    name: &'static str,
    base: BaseCoin,
    addr_types: &'static [AddressType],
    p2pkh_version: &'static [u8],
    p2sh_version: &'static [u8],
    wif_version: &'static [u8],
    bech32_hrp: Option<&'static str>,
    zaddr_version: &'static [u8],
    zaddr_width: usize,
}

use AddressType::{Bech32, Compressed, Ethereum, Legacy, Segwit, ZcashZ};

impl CoinProtocol {
    pub fn btc() -> Self {
        CoinProtocol {
            name: "btc",
            base: BaseCoin::Btc,
            addr_types: &[Legacy, Compressed, Segwit, Bech32],
            p2pkh_version: &[0x00],
            p2sh_version: &[0x05],
            wif_version: &[0x80],
            bech32_hrp: Some("bc"),
            zaddr_version: &[],
            zaddr_width: 0,
        }
    }

    pub fn bch() -> Self {
        CoinProtocol {
            name: "bch",
            addr_types: &[Legacy, Compressed],
            bech32_hrp: None,
            ..Self::btc()
        }
    }

    pub fn ltc() -> Self {
        CoinProtocol {
            name: "ltc",
            base: BaseCoin::Ltc,
            addr_types: &[Legacy, Compressed, Segwit, Bech32],
            p2pkh_version: &[0x30],
            p2sh_version: &[0x32],
            wif_version: &[0xb0],
            bech32_hrp: Some("ltc"),
            zaddr_version: &[],
            zaddr_width: 0,
        }
    }

    pub fn eth() -> Self {
        CoinProtocol {
            name: "eth",
            base: BaseCoin::Eth,
            addr_types: &[Ethereum],
            p2pkh_version: &[],
            p2sh_version: &[],
            wif_version: &[],
            bech32_hrp: None,
            zaddr_version: &[],
            zaddr_width: 0,
        }
    }

    pub fn etc() -> Self {
        CoinProtocol { name: "etc", ..Self::eth() }
    }

    pub fn dash() -> Self {
        CoinProtocol {
            name: "dash",
            base: BaseCoin::Dash,
            addr_types: &[Legacy, Compressed],
            p2pkh_version: &[0x4c],
            p2sh_version: &[0x10],
            wif_version: &[0xcc],
            bech32_hrp: None,
            zaddr_version: &[],
            zaddr_width: 0,
        }
    }

    pub fn zec() -> Self {
        CoinProtocol {
            name: "zec",
            base: BaseCoin::Zec,
            addr_types: &[Legacy, Compressed, ZcashZ],
            p2pkh_version: &[0x1c, 0xb8],
            p2sh_version: &[0x1c, 0xbd],
            wif_version: &[0x80],
            bech32_hrp: None,
            zaddr_version: &[0x16, 0x9a],
            zaddr_width: 95,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn base(&self) -> BaseCoin {
        self.base
    }

    /// BTC and its forks share seed-cooking behavior.
    pub fn is_btc_fork(&self) -> bool {
        self.base == BaseCoin::Btc
    }

    pub fn is_eth_family(&self) -> bool {
        self.base == BaseCoin::Eth
    }

    pub fn supports(&self, addr_type: AddressType) -> bool {
        self.addr_types.contains(&addr_type)
    }

    pub fn addr_types(&self) -> &'static [AddressType] {
        self.addr_types
    }

    pub fn p2pkh_version(&self) -> &'static [u8] {
        self.p2pkh_version
    }

    pub fn p2sh_version(&self) -> &'static [u8] {
        self.p2sh_version
    }

    pub fn wif_version(&self) -> &'static [u8] {
        self.wif_version
    }

    pub fn bech32_hrp(&self) -> Option<&'static str> {
        self.bech32_hrp
    }

    pub fn zaddr_version(&self) -> &'static [u8] {
        self.zaddr_version
    }

    pub fn zaddr_width(&self) -> usize {
        self.zaddr_width
    }
}
