//!
//! Deterministic password list generation.
//!
//! Passwords are the least significant digits of a chain private key
//! rendered in a base-58 or base-32 digit alphabet. Format, length and
//! label all enter the scramble key, so changing any of them yields an
//! unrelated password set.
//!

use crate::chain::HashChain;
use crate::chksum::list_checksum;
use crate::error::Error;
use crate::idx::AddrIdxList;
use crate::result::Result;
use coldgen_seed::{scramble_seed, Seed, SeedId};
use std::fmt;
use zeroize::Zeroize;

const B58_DIGITS: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
const B32_DIGITS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Password digit alphabets.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum PasswordFormat {
    B58,
    B32,
}

impl PasswordFormat {
    pub fn name(self) -> &'static str {
        match self {
            PasswordFormat::B58 => "b58",
            PasswordFormat::B32 => "b32",
        }
    }

    fn digits(self) -> &'static [u8] {
        match self {
            PasswordFormat::B58 => B58_DIGITS,
            PasswordFormat::B32 => B32_DIGITS,
        }
    }

    pub fn min_len(self) -> usize {
        match self {
            PasswordFormat::B58 => 8,
            PasswordFormat::B32 => 10,
        }
    }

    pub fn max_len(self) -> usize {
        match self {
            PasswordFormat::B58 => 36,
            PasswordFormat::B32 => 42,
        }
    }

    pub fn default_len(self) -> usize {
        match self {
            PasswordFormat::B58 => 20,
            PasswordFormat::B32 => 24,
        }
    }
}

impl fmt::Display for PasswordFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One generated password.
pub struct PasswordEntry {
    idx: u32,
    passwd: String,
}

impl PasswordEntry {
    pub fn idx(&self) -> u32 {
        self.idx
    }

    pub fn passwd(&self) -> &str {
        &self.passwd
    }
}

impl Drop for PasswordEntry {
    fn drop(&mut self) {
        self.passwd.zeroize();
    }
}

/// A deterministic password list for one master seed and one
/// (label, format, length) triple.
pub struct PasswordList {
    seed_id: SeedId,
    label: String,
    format: PasswordFormat,
    pw_len: usize,
    entries: Vec<PasswordEntry>,
    chksum: String,
}

impl PasswordList {
    pub fn generate(seed: &Seed, label: &str, format: PasswordFormat, pw_len: Option<usize>, idxs: &AddrIdxList) -> Result<Self> {
        let pw_len = pw_len.unwrap_or(format.default_len());
        if pw_len < format.min_len() || pw_len > format.max_len() {
            return Err(Error::PasswordLength(pw_len, format.name(), format.min_len(), format.max_len()));
        }
        let key = format!("{}:{}:{}", format, pw_len, label);
        let mut chain = HashChain::new(scramble_seed(seed.data(), key.as_bytes()).to_vec());
        let mut entries = Vec::with_capacity(idxs.len());
        for &idx in idxs.iter() {
            let mut sec = chain.key_at(idx);
            let passwd = make_passwd(&sec, format, pw_len);
            sec.zeroize();
            log::debug!("generated password {} for label {:?}", idx, label);
            entries.push(PasswordEntry { idx, passwd });
        }
        let chksum = list_checksum(entries.iter().map(|e| format!("{} {}", e.idx, e.passwd)));
        Ok(PasswordList { seed_id: seed.id(), label: label.to_string(), format, pw_len, entries, chksum })
    }

    pub fn seed_id(&self) -> SeedId {
        self.seed_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn format(&self) -> PasswordFormat {
        self.format
    }

    pub fn pw_len(&self) -> usize {
        self.pw_len
    }

    pub fn entries(&self) -> &[PasswordEntry] {
        &self.entries
    }

    pub fn chksum(&self) -> &str {
        &self.chksum
    }

    /// List identifier, e.g. `E54A22F6-foobar-b58-20[1-5]`.
    pub fn id_str(&self) -> String {
        let idxs: Vec<u32> = self.entries.iter().map(|e| e.idx).collect();
        format!("{}-{}-{}-{}[{}]", self.seed_id, self.label, self.format, self.pw_len, crate::idx::format_ranges(&idxs))
    }
}

impl fmt::Debug for PasswordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PasswordList {{ id: {}, entries: {} }}", self.id_str(), self.entries.len())
    }
}

/// Trailing `pw_len` digits of the key's integer value in the target
/// alphabet, left-padded with the zero digit when the rendition is
/// short.
fn make_passwd(sec: &[u8; 32], format: PasswordFormat, pw_len: usize) -> String {
    let digits = format.digits();
    let mut rendition = encode_base(sec, digits);
    while rendition.len() < pw_len {
        rendition.insert(0, digits[0] as char);
    }
    rendition.split_off(rendition.len() - pw_len)
}

/// Big-endian byte string to positional digits, integer semantics
/// (leading zero bytes contribute nothing).
fn encode_base(bytes: &[u8], alphabet: &'static [u8]) -> String {
    let base = alphabet.len() as u32;
    let mut num: Vec<u8> = bytes.to_vec();
    let mut digits: Vec<u8> = Vec::new();
    loop {
        let mut rem: u32 = 0;
        let mut quotient = Vec::with_capacity(num.len());
        for &b in &num {
            let acc = rem * 256 + b as u32;
            quotient.push((acc / base) as u8);
            rem = acc % base;
        }
        digits.push(alphabet[rem as usize]);
        let lead = quotient.iter().position(|&b| b != 0).unwrap_or(quotient.len());
        num = quotient.split_off(lead);
        if num.is_empty() {
            break;
        }
    }
    digits.reverse();
    String::from_utf8(digits).expect("alphabets are ASCII")
}
