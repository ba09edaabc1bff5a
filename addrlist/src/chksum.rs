//!
//! Human-comparable list checksums.
//!

use coldgen_seed::sha256d;

/// Checksum over the list's per-entry records: the records are joined
/// with single spaces and hashed with SHA-256d, and the first 16 hex
/// digits are rendered uppercase in blocks of four.
pub(crate) fn list_checksum<I>(records: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let joined = records.into_iter().collect::<Vec<_>>().join(" ");
    let digest = sha256d(joined.as_bytes());
    let hex = faster_hex::hex_string(&digest);
    let mut out = String::with_capacity(19);
    for (i, ch) in hex[..16].chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            out.push(' ');
        }
        out.push(ch.to_ascii_uppercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping() {
        let chksum = list_checksum(["1 addr".to_string()]);
        assert_eq!(chksum.len(), 19);
        assert_eq!(chksum.matches(' ').count(), 3);
        assert!(chksum.split(' ').all(|g| g.len() == 4 && g.chars().all(|c| c.is_ascii_hexdigit())));
    }
}
