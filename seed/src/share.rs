//!
//! XOR-based N-of-N seed splitting.
//!
//! A split derives `count - 1` shares by scrambling the parent seed
//! with a labeled context, then forms the last share as the XOR of the
//! parent with all derived shares, so the XOR of the full set restores
//! the parent exactly. An optional *master share* occupies index 1: its
//! reusable base seed is derived from the parent alone, while the seed
//! folded into the XOR is re-derived from the base per split label and
//! count, so one master share can participate in many unrelated splits.
//!

use crate::error::Error;
use crate::result::Result;
use crate::scramble::scramble_seed;
use crate::seed::{Seed, SeedId};
use crate::subseed::{IndexedMap, MAX_NONCE};
use std::fmt;

/// Highest supported share count.
pub const MAX_SHARE_COUNT: u16 = 1024;

/// Highest supported master share index.
pub const MAX_MASTER_IDX: u16 = 1024;

/// Split-type label baked into every share derivation context.
pub const SPLIT_LABEL: &str = "N-of-N";

const DEFAULT_ID_STR: &str = "default";

/// A reusable master share: the base seed is independent of any
/// particular split, the derived seed is what enters a split's XOR.
pub struct MasterShare {
    idx: u16,
    nonce: u16,
    base: Seed,
    derived: Seed,
}

impl MasterShare {
    /// Derive the master share of index `idx` from `parent`, then bind
    /// it to a split via (`id_str`, `count`).
    pub fn derive(parent: &Seed, idx: u16, id_str: &str, count: u16) -> Result<Self> {
        if idx == 0 || idx > MAX_MASTER_IDX {
            return Err(Error::MasterShareIndex(idx));
        }
        for nonce in 0..=MAX_NONCE {
            let data = Self::base_bytes(parent, idx, nonce);
            let id = SeedId::of(&data);
            if id == parent.id() {
                log::debug!("seed ID collision at master share {}, nonce {}", idx, nonce);
                continue;
            }
            let base = Seed::new(data)?;
            let derived = Self::derived_from_base(&base, id_str, count)?;
            return Ok(MasterShare { idx, nonce, base, derived });
        }
        Err(Error::NonceRangeExceeded("master share"))
    }

    /// Rebind an existing base seed to a split, for joining.
    pub fn derived_from_base(base: &Seed, id_str: &str, count: u16) -> Result<Seed> {
        let mut key = id_str.as_bytes().to_vec();
        key.push(b':');
        key.extend_from_slice(&count.to_be_bytes());
        let digest = scramble_seed(base.data(), &key);
        Seed::new(digest[..base.byte_len()].to_vec())
    }

    fn base_bytes(parent: &Seed, idx: u16, nonce: u16) -> Vec<u8> {
        let mut key = b"master_share:".to_vec();
        key.extend_from_slice(&idx.to_be_bytes());
        key.extend_from_slice(&nonce.to_be_bytes());
        let digest = scramble_seed(parent.data(), &key);
        digest[..parent.byte_len()].to_vec()
    }

    pub fn idx(&self) -> u16 {
        self.idx
    }

    pub fn nonce(&self) -> u16 {
        self.nonce
    }

    /// The split-independent seed the user actually stores.
    pub fn base(&self) -> &Seed {
        &self.base
    }

    /// The seed folded into this split's XOR.
    pub fn derived(&self) -> &Seed {
        &self.derived
    }
}

impl fmt::Debug for MasterShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MasterShare {{ idx: {}, id: {}, nonce: {} }}", self.idx, self.base.id(), self.nonce)
    }
}

/// A complete N-of-N share set for one parent seed.
pub struct SeedShareList {
    parent: Seed,
    id_str: String,
    count: u16,
    master: Option<MasterShare>,
    shares: IndexedMap,
    last: Seed,
    nonce_start: u16,
}

impl SeedShareList {
    /// Split `parent` into `count` shares under the label `id_str`
    /// (default `"default"`), optionally replacing share 1 with the
    /// master share of index `master_idx`.
    pub fn new(parent: Seed, count: u16, id_str: Option<&str>, master_idx: Option<u16>) -> Result<Self> {
        if count < 2 || count > MAX_SHARE_COUNT {
            return Err(Error::ShareCount(count as u32));
        }
        let id_str = id_str.unwrap_or(DEFAULT_ID_STR).to_string();
        let master = match master_idx {
            Some(idx) => Some(MasterShare::derive(&parent, idx, &id_str, count)?),
            None => None,
        };

        // Retry the entire split with a bumped starting nonce whenever
        // the computed last share collides with an existing ID.
        for nonce_start in 0..=MAX_NONCE {
            let mut shares = IndexedMap::default();
            let mut xored = parent.data().to_vec();
            if let Some(m) = &master {
                shares.insert(m.base().id(), 1, m.nonce())?;
                xor_into(&mut xored, m.derived().data())?;
            }
            let first_idx = shares.len() as u16 + 1;
            for idx in first_idx..count {
                let (id, nonce, data) =
                    Self::search_share_nonce(&parent, &id_str, count, idx, nonce_start, master_idx, &shares)?;
                shares.insert(id, idx as u32, nonce)?;
                xor_into(&mut xored, &data)?;
            }
            let last_id = SeedId::of(&xored);
            if last_id == parent.id() || shares.contains(&last_id) {
                log::debug!("last share ID collision ({}), restarting split at nonce {}", last_id, nonce_start + 1);
                continue;
            }
            shares.insert(last_id, count as u32, nonce_start)?;
            let last = Seed::new(xored)?;
            let list = SeedShareList { parent, id_str, count, master, shares, last, nonce_start };
            debug_assert_eq!(list.join().ok().map(|s| s.id()), Some(list.parent.id()));
            return Ok(list);
        }
        Err(Error::NonceRangeExceeded("split"))
    }

    fn search_share_nonce(
        parent: &Seed,
        id_str: &str,
        count: u16,
        idx: u16,
        nonce_start: u16,
        master_idx: Option<u16>,
        shares: &IndexedMap,
    ) -> Result<(SeedId, u16, Vec<u8>)> {
        for nonce in nonce_start..=MAX_NONCE {
            let data = share_bytes(parent, id_str, count, idx, nonce, master_idx);
            let id = SeedId::of(&data);
            if id == parent.id() || shares.contains(&id) {
                log::debug!("seed ID collision at share {}, nonce {}", idx, nonce);
                continue;
            }
            return Ok((id, nonce, data));
        }
        Err(Error::NonceRangeExceeded("share"))
    }

    pub fn count(&self) -> u16 {
        self.count
    }

    pub fn id_str(&self) -> &str {
        &self.id_str
    }

    pub fn nonce_start(&self) -> u16 {
        self.nonce_start
    }

    pub fn master(&self) -> Option<&MasterShare> {
        self.master.as_ref()
    }

    /// IDs of all shares in index order.
    pub fn ids(&self) -> Vec<SeedId> {
        (0..self.count as usize).filter_map(|pos| self.shares.at(pos)).map(|(id, _, _)| id).collect()
    }

    /// The share seed at 1-based index `idx`. For a master split,
    /// index 1 yields the *derived* seed; [`Self::master`] exposes the
    /// storable base.
    pub fn share(&self, idx: u16) -> Result<Seed> {
        if idx == 0 || idx > self.count {
            return Err(Error::ShareIndex(idx, self.count));
        }
        if idx == self.count {
            return Ok(self.last.clone());
        }
        if let Some(m) = &self.master {
            if idx == 1 {
                return Ok(m.derived().clone());
            }
        }
        let (id, _, nonce) = self.shares.at(idx as usize - 1).ok_or(Error::ShareIndex(idx, self.count))?;
        let data = share_bytes(&self.parent, &self.id_str, self.count, idx, nonce, self.master.as_ref().map(|m| m.idx()));
        if SeedId::of(&data) != id {
            return Err(Error::TableCorrupt(id));
        }
        Seed::new(data)
    }

    /// XOR all shares back together. Always reproduces the parent.
    pub fn join(&self) -> Result<Seed> {
        let shares = (1..=self.count).map(|idx| self.share(idx)).collect::<Result<Vec<_>>>()?;
        join_shares(&shares)
    }
}

impl fmt::Debug for SeedShareList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SeedShareList {{ parent: {}, label: {:?}, count: {}, nonce_start: {} }}",
            self.parent.id(),
            self.id_str,
            self.count,
            self.nonce_start
        )
    }
}

/// Join a complete share set by XOR. Shares must all have the parent's
/// length; for master splits the first element must be the *derived*
/// seed (see [`join_shares_with_master`]).
pub fn join_shares(shares: &[Seed]) -> Result<Seed> {
    let first = shares.first().ok_or(Error::NoShares)?;
    let mut buf = first.data().to_vec();
    for share in &shares[1..] {
        xor_into(&mut buf, share.data())?;
    }
    Seed::new(buf)
}

/// Join a master split given the stored master *base* seed and the
/// remaining shares. The base is first rebound to the split via its
/// label and total share count.
pub fn join_shares_with_master(master_base: &Seed, id_str: Option<&str>, others: &[Seed]) -> Result<Seed> {
    let count = others.len() as u32 + 1;
    if count < 2 || count > MAX_SHARE_COUNT as u32 {
        return Err(Error::ShareCount(count));
    }
    let derived = MasterShare::derived_from_base(master_base, id_str.unwrap_or(DEFAULT_ID_STR), count as u16)?;
    let mut shares = vec![derived];
    shares.extend(others.iter().cloned());
    join_shares(&shares)
}

fn share_bytes(parent: &Seed, id_str: &str, count: u16, idx: u16, nonce: u16, master_idx: Option<u16>) -> Vec<u8> {
    let mut key = format!("{}:{}:", SPLIT_LABEL, id_str).into_bytes();
    key.extend_from_slice(&count.to_be_bytes());
    key.extend_from_slice(&idx.to_be_bytes());
    key.extend_from_slice(&nonce.to_be_bytes());
    if let Some(midx) = master_idx {
        key.extend_from_slice(b":master:");
        key.extend_from_slice(&midx.to_be_bytes());
    }
    let digest = scramble_seed(parent.data(), &key);
    digest[..parent.byte_len()].to_vec()
}

fn xor_into(dst: &mut [u8], src: &[u8]) -> Result<()> {
    if dst.len() != src.len() {
        return Err(Error::LengthMismatch(dst.len(), src.len()));
    }
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= s;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use faster_hex::{hex_decode_fallback, hex_string};

    macro_rules! hex {
        ($str: literal) => {{
            let len = $str.as_bytes().len() / 2;
            let mut dst = vec![0; len];
            dst.resize(len, 0);
            hex_decode_fallback($str.as_bytes(), &mut dst);
            dst
        }};
    }

    fn seed256() -> Seed {
        Seed::new(hex!("00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff")).unwrap()
    }

    #[test]
    fn split_three_default() {
        let list = SeedShareList::new(seed256(), 3, None, None).unwrap();
        assert_eq!(list.nonce_start(), 0);
        assert_eq!(list.ids().iter().map(|id| id.to_string()).collect::<Vec<_>>(), ["661781D8", "D4C151BD", "B74D05CA"]);
        assert_eq!(hex_string(list.share(1).unwrap().data()), "095827dfe223651e7f01a705df8897e24642e955b242ccdab182f08d97ce2839");
        assert_eq!(hex_string(list.share(2).unwrap().data()), "0b349194e28bb446fb1883fdd7f63ba42767984de0860ced4ad13b41fe14d19d");
        assert_eq!(hex_string(list.share(3).unwrap().data()), "027d947844fdb72f0c808e43c4a342b96134532b1691a64073ca6177a507175b");
        assert_eq!(list.join().unwrap(), seed256());
    }

    #[test]
    fn split_four_labeled() {
        let list = SeedShareList::new(seed256(), 4, Some("alice&bob"), None).unwrap();
        assert_eq!(list.ids().iter().map(|id| id.to_string()).collect::<Vec<_>>(), ["3BF7B156", "7744052F", "0F5382FC", "513649DC"]);
        assert_eq!(hex_string(list.share(4).unwrap().data()), "e61c6bf51acaa9eb05bc8020b4dd693157021b9aa5956895a5da7f3999616e54");
        // Labels are full derivation contexts, not display strings.
        let other = SeedShareList::new(seed256(), 4, Some("alice&carol"), None).unwrap();
        assert_ne!(other.ids(), list.ids());
        assert_eq!(other.join().unwrap(), seed256());
    }

    #[test]
    fn split_with_master_share() {
        let list = SeedShareList::new(seed256(), 3, None, Some(5)).unwrap();
        let master = list.master().unwrap();
        assert_eq!(master.idx(), 5);
        assert_eq!(master.nonce(), 0);
        assert_eq!(master.base().id().to_string(), "E83BF3E3");
        assert_eq!(hex_string(master.base().data()), "0a6bb966e10443783663ca198ad9985a0ee36022eb63ecf3bdefa119c5a25adf");
        assert_eq!(hex_string(master.derived().data()), "4a1942db6052d14d1a459d3bc24ef7a90dab9914cc780d9f3dde92f6decdb6a6");
        // Index 1 resolves to the derived seed that enters the XOR.
        assert_eq!(list.share(1).unwrap(), *master.derived());
        assert_eq!(hex_string(list.share(2).unwrap().data()), "f789f476f37e9d4774a1c8e873399e1e9e67e2ce8e7649f9d833512a85b55990");
        assert_eq!(hex_string(list.share(3).unwrap().data()), "bd81949ed7792a7de67dff687daa874893dd59e9065b22116d74696797a501c9");
        assert_eq!(list.ids().iter().map(|id| id.to_string()).collect::<Vec<_>>(), ["E83BF3E3", "F3FD7649", "D5845457"]);
        assert_eq!(list.join().unwrap(), seed256());
    }

    #[test]
    fn join_from_collected_shares() {
        let list = SeedShareList::new(seed256(), 5, Some("backup"), None).unwrap();
        let shares = (1..=5).map(|i| list.share(i).unwrap()).collect::<Vec<_>>();
        assert_eq!(join_shares(&shares).unwrap(), seed256());
    }

    #[test]
    fn join_master_split_from_base() {
        let list = SeedShareList::new(seed256(), 3, None, Some(5)).unwrap();
        let base = list.master().unwrap().base().clone();
        let others = [list.share(2).unwrap(), list.share(3).unwrap()];
        assert_eq!(join_shares_with_master(&base, None, &others).unwrap(), seed256());
    }

    #[test]
    fn short_parent_round_trip() {
        let parent = Seed::new(hex!("00112233445566778899aabbccddeeff")).unwrap();
        for count in [2u16, 3, 7] {
            let list = SeedShareList::new(parent.clone(), count, None, None).unwrap();
            assert_eq!(list.join().unwrap(), parent);
            for idx in 1..=count {
                assert_eq!(list.share(idx).unwrap().byte_len(), 16);
            }
        }
    }

    #[test]
    fn share_ids_are_pairwise_distinct() {
        let list = SeedShareList::new(seed256(), 300, Some("distinct"), Some(7)).unwrap();
        let mut ids = std::collections::HashSet::new();
        ids.insert(seed256().id());
        for id in list.ids() {
            assert!(ids.insert(id), "duplicate ID {}", id);
        }
        assert_eq!(ids.len(), 301);
        assert_eq!(list.join().unwrap(), seed256());
    }

    #[test]
    fn parameter_validation() {
        assert!(matches!(SeedShareList::new(seed256(), 1, None, None), Err(Error::ShareCount(1))));
        assert!(matches!(SeedShareList::new(seed256(), 1025, None, None), Err(Error::ShareCount(1025))));
        assert!(matches!(SeedShareList::new(seed256(), 3, None, Some(0)), Err(Error::MasterShareIndex(0))));
        assert!(matches!(SeedShareList::new(seed256(), 3, None, Some(1025)), Err(Error::MasterShareIndex(1025))));
        let list = SeedShareList::new(seed256(), 3, None, None).unwrap();
        assert!(matches!(list.share(0), Err(Error::ShareIndex(0, 3))));
        assert!(matches!(list.share(4), Err(Error::ShareIndex(4, 3))));
    }

    #[test]
    fn join_rejects_mismatched_lengths() {
        let a = Seed::new(vec![1u8; 16]).unwrap();
        let b = Seed::new(vec![2u8; 32]).unwrap();
        assert!(matches!(join_shares(&[a, b]), Err(Error::LengthMismatch(16, 32))));
        assert!(matches!(join_shares(&[]), Err(Error::NoShares)));
    }
}
