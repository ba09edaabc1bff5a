//!
//! Subwallet seed derivation.
//!
//! Each subseed is addressed by a 1-based index and a length class and
//! is derived by scrambling the parent seed with the binary context
//! `index:u32be ∥ nonce:u16be ∥ length-flag:u8`. The nonce exists only
//! to step past seed ID collisions, so that every subseed ID is unique
//! within its family and distinct from the parent ID.
//!

use crate::error::Error;
use crate::result::Result;
use crate::scramble::scramble_seed;
use crate::seed::{Seed, SeedId};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Highest nonce tried before a derivation is declared failed.
pub const MAX_NONCE: u16 = 1000;

/// Highest addressable subseed index.
pub const MAX_SUBSEED_IDX: u32 = 1_000_000;

/// Default scan ceiling for [`SubSeedList::subseed_by_id`].
pub const DEFAULT_ID_SEARCH_CEILING: u32 = 1_000_000;

/// Length class of a derived subseed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum SubSeedLength {
    /// Same byte length as the parent seed.
    Long,
    /// Fixed 128-bit seed, for wallets that only ever need short seeds.
    Short,
}

impl SubSeedLength {
    fn flag(self) -> u8 {
        match self {
            SubSeedLength::Long => 0,
            SubSeedLength::Short => 1,
        }
    }

    fn byte_len(self, parent_len: usize) -> usize {
        match self {
            SubSeedLength::Long => parent_len,
            SubSeedLength::Short => 16,
        }
    }

    fn suffix(self) -> char {
        match self {
            SubSeedLength::Long => 'L',
            SubSeedLength::Short => 'S',
        }
    }
}

/// User-facing subseed address such as `29L` or `127S`. A bare number
/// parses as a long subseed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct SubSeedIdx {
    idx: u32,
    length: SubSeedLength,
}

impl SubSeedIdx {
    pub fn new(idx: u32, length: SubSeedLength) -> Result<Self> {
        if idx == 0 || idx > MAX_SUBSEED_IDX {
            return Err(Error::SubSeedIdxRange(idx as u64));
        }
        Ok(SubSeedIdx { idx, length })
    }

    pub fn idx(&self) -> u32 {
        self.idx
    }

    pub fn length(&self) -> SubSeedLength {
        self.length
    }
}

impl fmt::Display for SubSeedIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.idx, self.length.suffix())
    }
}

impl FromStr for SubSeedIdx {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || Error::SubSeedIdxSpec(s.to_string());
        let (digits, length) = match s.as_bytes().last() {
            Some(b'L' | b'l') => (&s[..s.len() - 1], SubSeedLength::Long),
            Some(b'S' | b's') => (&s[..s.len() - 1], SubSeedLength::Short),
            Some(_) => (s, SubSeedLength::Long),
            None => return Err(malformed()),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let idx: u64 = digits.parse().map_err(|_| malformed())?;
        if idx == 0 || idx > MAX_SUBSEED_IDX as u64 {
            return Err(Error::SubSeedIdxRange(idx));
        }
        SubSeedIdx::new(idx as u32, length)
    }
}

/// Ordered insert-only map from seed ID to derivation parameters, with
/// positional access. Position n holds the subseed of index n + 1.
#[derive(Default)]
pub(crate) struct IndexedMap {
    keys: Vec<SeedId>,
    map: HashMap<SeedId, (u32, u16)>,
}

impl IndexedMap {
    pub fn insert(&mut self, id: SeedId, idx: u32, nonce: u16) -> Result<()> {
        if self.map.insert(id, (idx, nonce)).is_some() {
            return Err(Error::DuplicateId(id));
        }
        self.keys.push(id);
        Ok(())
    }

    pub fn contains(&self, id: &SeedId) -> bool {
        self.map.contains_key(id)
    }

    pub fn get(&self, id: &SeedId) -> Option<(u32, u16)> {
        self.map.get(id).copied()
    }

    pub fn at(&self, pos: usize) -> Option<(SeedId, u32, u16)> {
        let id = *self.keys.get(pos)?;
        let (idx, nonce) = self.map.get(&id).copied()?;
        Some((id, idx, nonce))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn truncate(&mut self, len: usize) {
        for id in self.keys.drain(len..) {
            self.map.remove(&id);
        }
    }
}

/// A single derived subwallet seed with its derivation parameters.
pub struct SubSeed {
    seed: Seed,
    idx: u32,
    nonce: u16,
    length: SubSeedLength,
}

impl SubSeed {
    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    pub fn into_seed(self) -> Seed {
        self.seed
    }

    pub fn id(&self) -> SeedId {
        self.seed.id()
    }

    pub fn idx(&self) -> u32 {
        self.idx
    }

    pub fn nonce(&self) -> u16 {
        self.nonce
    }

    pub fn length(&self) -> SubSeedLength {
        self.length
    }

    pub fn ss_idx(&self) -> SubSeedIdx {
        SubSeedIdx { idx: self.idx, length: self.length }
    }
}

impl fmt::Debug for SubSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubSeed {{ id: {}, idx: {}, nonce: {} }}", self.id(), self.ss_idx(), self.nonce)
    }
}

/// Session-scoped cache of all subseeds derived from one parent seed.
///
/// Long and short subseeds of the same index are generated together, so
/// position k in either table always holds index k + 1. Generation is
/// incremental and idempotent; a failed extension rolls both tables
/// back to their previous state.
pub struct SubSeedList {
    parent: Seed,
    long: IndexedMap,
    short: IndexedMap,
}

impl SubSeedList {
    pub fn new(parent: Seed) -> Self {
        SubSeedList { parent, long: IndexedMap::default(), short: IndexedMap::default() }
    }

    pub fn parent_id(&self) -> SeedId {
        self.parent.id()
    }

    /// Number of subseed indices materialized so far.
    pub fn len(&self) -> u32 {
        self.long.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.long.len() == 0
    }

    /// Extend the tables through `last_idx`. Indices already generated
    /// are never recomputed.
    pub fn generate_up_to(&mut self, last_idx: u32) -> Result<()> {
        if last_idx == 0 || last_idx > MAX_SUBSEED_IDX {
            return Err(Error::SubSeedIdxRange(last_idx as u64));
        }
        self.extend(last_idx, None).map(|_| ())
    }

    /// Fetch the subseed at `ss_idx`, generating forward as needed.
    pub fn subseed(&mut self, ss_idx: SubSeedIdx) -> Result<SubSeed> {
        self.generate_up_to(ss_idx.idx())?;
        let table = match ss_idx.length() {
            SubSeedLength::Long => &self.long,
            SubSeedLength::Short => &self.short,
        };
        let (id, idx, nonce) = table.at(ss_idx.idx() as usize - 1).ok_or(Error::SubSeedIdxRange(ss_idx.idx() as u64))?;
        self.materialize(id, idx, nonce, ss_idx.length())
    }

    /// Scan for the subseed whose ID is `id`, generating forward up to
    /// `ceiling` indices (default 1,000,000) if it is not yet in the
    /// tables. Returns `None` when the scan completes without a match.
    pub fn subseed_by_id(&mut self, id: SeedId, ceiling: Option<u32>) -> Result<Option<SubSeed>> {
        let ceiling = ceiling.unwrap_or(DEFAULT_ID_SEARCH_CEILING).min(MAX_SUBSEED_IDX);
        for (table, length) in [(&self.long, SubSeedLength::Long), (&self.short, SubSeedLength::Short)] {
            if let Some((idx, nonce)) = table.get(&id) {
                return self.materialize(id, idx, nonce, length).map(Some);
            }
        }
        if self.len() >= ceiling {
            return Ok(None);
        }
        match self.extend(ceiling, Some(id))? {
            Some(ss_idx) => self.subseed(ss_idx).map(Some),
            None => Ok(None),
        }
    }

    fn derive_bytes(&self, idx: u32, nonce: u16, length: SubSeedLength) -> Vec<u8> {
        let mut key = Vec::with_capacity(7);
        key.extend_from_slice(&idx.to_be_bytes());
        key.extend_from_slice(&nonce.to_be_bytes());
        key.push(length.flag());
        let digest = scramble_seed(self.parent.data(), &key);
        digest[..length.byte_len(self.parent.byte_len())].to_vec()
    }

    fn materialize(&self, id: SeedId, idx: u32, nonce: u16, length: SubSeedLength) -> Result<SubSeed> {
        let data = self.derive_bytes(idx, nonce, length);
        if SeedId::of(&data) != id {
            return Err(Error::TableCorrupt(id));
        }
        Ok(SubSeed { seed: Seed::new(data)?, idx, nonce, length })
    }

    /// Generate indices `len + 1 ..= last_idx`, stopping early if
    /// `target` is produced. On any error both tables are rolled back.
    fn extend(&mut self, last_idx: u32, target: Option<SeedId>) -> Result<Option<SubSeedIdx>> {
        let mark = self.long.len();
        match self.extend_inner(last_idx, target) {
            Ok(found) => Ok(found),
            Err(e) => {
                self.long.truncate(mark);
                self.short.truncate(mark);
                Err(e)
            }
        }
    }

    fn extend_inner(&mut self, last_idx: u32, target: Option<SeedId>) -> Result<Option<SubSeedIdx>> {
        for idx in self.len() + 1..=last_idx {
            for length in [SubSeedLength::Long, SubSeedLength::Short] {
                let (id, nonce) = self.search_nonce(idx, length)?;
                match length {
                    SubSeedLength::Long => self.long.insert(id, idx, nonce)?,
                    SubSeedLength::Short => self.short.insert(id, idx, nonce)?,
                }
                if target == Some(id) {
                    return Ok(Some(SubSeedIdx { idx, length }));
                }
            }
        }
        Ok(None)
    }

    fn search_nonce(&self, idx: u32, length: SubSeedLength) -> Result<(SeedId, u16)> {
        for nonce in 0..=MAX_NONCE {
            let data = self.derive_bytes(idx, nonce, length);
            let id = SeedId::of(&data);
            if id == self.parent.id() || self.long.contains(&id) || self.short.contains(&id) {
                log::debug!("seed ID collision at subseed {}{}, nonce {}", idx, length.suffix(), nonce);
                continue;
            }
            return Ok((id, nonce));
        }
        Err(Error::NonceRangeExceeded("subseed"))
    }
}
