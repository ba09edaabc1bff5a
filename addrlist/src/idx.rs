//!
//! Address index lists and their range grammar.
//!

use crate::error::Error;
use crate::result::Result;

/// Highest valid address index (seven decimal digits).
pub const MAX_ADDR_IDX: u32 = 9_999_999;

/// Maximum number of entries in one list.
pub const MAX_IDX_ENTRIES: usize = 1_000_000;

/// A sorted, deduplicated list of 1-based address indices, parsed from
/// the range grammar `"1,5-9,100"`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AddrIdxList {
    idxs: Vec<u32>,
}

impl AddrIdxList {
    pub fn new(mut idxs: Vec<u32>) -> Result<Self> {
        for &idx in &idxs {
            check_idx(idx as u64)?;
        }
        idxs.sort_unstable();
        idxs.dedup();
        if idxs.is_empty() {
            return Err(Error::EmptyIdxList);
        }
        if idxs.len() > MAX_IDX_ENTRIES {
            return Err(Error::IdxListTooLong(idxs.len()));
        }
        Ok(AddrIdxList { idxs })
    }

    pub fn parse(spec: &str) -> Result<Self> {
        let mut idxs = std::collections::BTreeSet::new();
        for part in spec.split(',') {
            match part.split_once('-') {
                None => {
                    idxs.insert(parse_idx(part, spec)?);
                }
                Some((lo, hi)) => {
                    let lo = parse_idx(lo, spec)?;
                    let hi = parse_idx(hi, spec)?;
                    if lo > hi {
                        return Err(Error::MalformedIdxSpec(spec.to_string()));
                    }
                    for idx in lo..=hi {
                        idxs.insert(idx);
                        if idxs.len() > MAX_IDX_ENTRIES {
                            return Err(Error::IdxListTooLong(idxs.len()));
                        }
                    }
                }
            }
            if idxs.len() > MAX_IDX_ENTRIES {
                return Err(Error::IdxListTooLong(idxs.len()));
            }
        }
        Self::new(idxs.into_iter().collect())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u32> {
        self.idxs.iter()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.idxs
    }

    pub fn len(&self) -> usize {
        self.idxs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idxs.is_empty()
    }

    /// Render in the compact range grammar, e.g. `1-3,5,7-9`.
    pub fn to_spec(&self) -> String {
        format_ranges(&self.idxs)
    }
}

fn check_idx(idx: u64) -> Result<u32> {
    if idx == 0 || idx > MAX_ADDR_IDX as u64 {
        return Err(Error::IdxRange(idx));
    }
    Ok(idx as u32)
}

fn parse_idx(part: &str, spec: &str) -> Result<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::MalformedIdxSpec(spec.to_string()));
    }
    let idx: u64 = part.parse().map_err(|_| Error::MalformedIdxSpec(spec.to_string()))?;
    check_idx(idx)
}

/// Collapse a sorted index slice into the range grammar. Any
/// consecutive run becomes a `lo-hi` range.
pub fn format_ranges(idxs: &[u32]) -> String {
    if idxs.is_empty() {
        return "(no idxs)".to_string();
    }
    let mut parts: Vec<String> = Vec::new();
    let mut run_start = idxs[0];
    let mut prev = idxs[0];
    for &idx in &idxs[1..] {
        if idx != prev + 1 {
            push_run(&mut parts, run_start, prev);
            run_start = idx;
        }
        prev = idx;
    }
    push_run(&mut parts, run_start, prev);
    parts.join(",")
}

fn push_run(parts: &mut Vec<String>, lo: u32, hi: u32) {
    if lo == hi {
        parts.push(lo.to_string());
    } else {
        parts.push(format!("{}-{}", lo, hi));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_formatting() {
        assert_eq!(format_ranges(&[1, 2, 3, 5, 7, 8, 9]), "1-3,5,7-9");
        assert_eq!(format_ranges(&[1, 2]), "1-2");
        assert_eq!(format_ranges(&[4]), "4");
        assert_eq!(format_ranges(&[1, 2, 3, 4]), "1-4");
        assert_eq!(format_ranges(&[]), "(no idxs)");
    }

    #[test]
    fn spec_round_trip() {
        let list = AddrIdxList::parse("7-9,1,5,2,3").unwrap();
        assert_eq!(list.as_slice(), &[1, 2, 3, 5, 7, 8, 9]);
        assert_eq!(list.to_spec(), "1-3,5,7-9");
        assert_eq!(AddrIdxList::parse(&list.to_spec()).unwrap(), list);
    }

    #[test]
    fn duplicates_collapse() {
        let list = AddrIdxList::parse("5,1-6,2").unwrap();
        assert_eq!(list.as_slice(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn malformed_specs() {
        for spec in ["", "1,", "a", "3-1", "1--5", "-3", "0", "1,0x5"] {
            assert!(AddrIdxList::parse(spec).is_err(), "spec {spec:?} should fail");
        }
        assert!(matches!(AddrIdxList::parse("10000000"), Err(Error::IdxRange(10000000))));
        assert!(AddrIdxList::parse("9999999").is_ok());
    }

    #[test]
    fn overlapping_ranges_count_once_against_the_cap() {
        let spec = format!("1-600000,500000-{MAX_IDX_ENTRIES}");
        let list = AddrIdxList::parse(&spec).unwrap();
        assert_eq!(list.len(), MAX_IDX_ENTRIES);
        assert!(matches!(
            AddrIdxList::parse(&format!("1-{}", MAX_IDX_ENTRIES + 1)),
            Err(Error::IdxListTooLong(_))
        ));
    }

    #[test]
    fn empty_list_rejected() {
        assert!(matches!(AddrIdxList::new(vec![]), Err(Error::EmptyIdxList)));
    }
}
