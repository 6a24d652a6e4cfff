//! Assorted helpers shared by the aligners.

/// Copy of `aligned` with every `gap` symbol removed.
pub fn ungap(aligned: &[u8], gap: u8) -> Vec<u8> {
    aligned.iter().copied().filter(|&c| c != gap).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ungap_drops_only_the_gap_symbol() {
        assert_eq!(ungap(b"--CTT-A", b'-'), b"CTTA".to_vec());
        assert_eq!(ungap(b"A.C-", b'.'), b"AC-".to_vec());
        assert!(ungap(b"---", b'-').is_empty());
    }
}
