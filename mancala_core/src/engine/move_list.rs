use crate::logic::board::PITS_PER_SIDE;

// A side never has more candidate moves than it has pits.
const MAX_MOVES: usize = PITS_PER_SIDE;

/// Fixed-capacity list of pit indices, kept in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveList {
    pits: [usize; MAX_MOVES],
    count: usize,
}

impl Default for MoveList {
    fn default() -> Self {
        Self {
            pits: [0; MAX_MOVES],
            count: 0,
        }
    }
}

impl MoveList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pit: usize) {
        let Some(slot) = self.pits.get_mut(self.count) else {
            debug_assert!(false, "MoveList overflow! Max moves: {MAX_MOVES}");
            return;
        };
        *slot = pit;
        self.count += 1;
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        self.pits.get(0..self.count).unwrap_or(&[])
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, usize>> {
        self.as_slice().iter().copied()
    }

    #[must_use]
    pub fn first(&self) -> Option<usize> {
        self.as_slice().first().copied()
    }

    #[must_use]
    pub fn contains(&self, pit: usize) -> bool {
        self.as_slice().contains(&pit)
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<usize> {
        self.as_slice().to_vec()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = usize;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = usize;
    type IntoIter = std::iter::Take<std::array::IntoIter<usize, MAX_MOVES>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pits.into_iter().take(self.count)
    }
}
