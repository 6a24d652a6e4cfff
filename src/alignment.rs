//! Alignment results.

use std::fmt;

/// Default symbol inserted into an aligned row opposite an insertion.
pub const GAP_SYMBOL: u8 = b'-';

/// Global (Needleman–Wunsch) or local (Smith–Waterman) alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlignMode {
    Global,
    Local,
}

impl AlignMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AlignMode::Global => "global",
            AlignMode::Local => "local",
        }
    }
}

/// Two gapped rows of equal length plus the score of the alignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alignment {
    pub aligned1: Vec<u8>,
    pub aligned2: Vec<u8>,
    pub score: i32,
}

impl Alignment {
    /// The empty alignment (e.g. a local alignment without a positive cell).
    pub fn empty() -> Self {
        Self {
            aligned1: Vec::new(),
            aligned2: Vec::new(),
            score: 0,
        }
    }

    /// Number of alignment columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.aligned1.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.aligned1.is_empty()
    }

    /// Row 1 with `gap` symbols removed.
    pub fn ungapped1(&self, gap: u8) -> Vec<u8> {
        crate::utils::ungap(&self.aligned1, gap)
    }

    /// Row 2 with `gap` symbols removed.
    pub fn ungapped2(&self, gap: u8) -> Vec<u8> {
        crate::utils::ungap(&self.aligned2, gap)
    }

    /// Both rows as text, replacing invalid UTF-8 lossily.
    pub fn rows(&self) -> (String, String) {
        (
            String::from_utf8_lossy(&self.aligned1).into_owned(),
            String::from_utf8_lossy(&self.aligned2).into_owned(),
        )
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (s1, s2) = self.rows();
        write!(f, "{s1}\n{s2}\nScore: {}", self.score)
    }
}

/// Best match of a multi-candidate search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchHit {
    /// Local alignment of the template window against the candidate window.
    pub alignment: Alignment,
    /// Position of the candidate in the caller's list.
    pub index: usize,
}

impl BatchHit {
    #[inline]
    pub fn score(&self) -> i32 {
        self.alignment.score
    }

    /// `true` if `self` should replace `current` as the running best:
    /// higher score wins, equal scores keep the lower original index.
    pub fn beats(&self, current: &BatchHit) -> bool {
        self.score() > current.score()
            || (self.score() == current.score() && self.index < current.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_two_rows_and_score() {
        let a = Alignment {
            aligned1: b"ATA".to_vec(),
            aligned2: b"A-A".to_vec(),
            score: 1,
        };
        assert_eq!(a.to_string(), "ATA\nA-A\nScore: 1");
        assert_eq!(a.len(), 3);
        assert_eq!(a.ungapped2(GAP_SYMBOL), b"AA".to_vec());
    }

    #[test]
    fn ties_prefer_lower_index() {
        let hit = |score, index| BatchHit {
            alignment: Alignment {
                score,
                ..Alignment::empty()
            },
            index,
        };
        assert!(hit(5, 9).beats(&hit(4, 0)));
        assert!(hit(5, 1).beats(&hit(5, 2)));
        assert!(!hit(5, 2).beats(&hit(5, 1)));
        assert!(!hit(3, 0).beats(&hit(4, 7)));
    }
}
