use crate::engine::move_list::MoveList;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Playing pits owned by each side.
pub const PITS_PER_SIDE: usize = 6;
/// Twelve pits plus two stores.
pub const SLOT_COUNT: usize = 14;
/// Stones placed in every pit of a standard game.
pub const DEFAULT_STONES: u8 = 4;

pub const NORTH_STORE: usize = 6;
pub const SOUTH_STORE: usize = 13;

// Sowing order for each side: own pits, own store, opponent pits.
// The opponent store never appears, so it is skipped without consuming a stone.
const RING_LEN: usize = 13;
const SOUTH_RING: [usize; RING_LEN] = [0, 1, 2, 3, 4, 5, SOUTH_STORE, 7, 8, 9, 10, 11, 12];
const NORTH_RING: [usize; RING_LEN] = [7, 8, 9, 10, 11, 12, NORTH_STORE, 0, 1, 2, 3, 4, 5];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    South,
    North,
}

impl Side {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::South => Self::North,
            Self::North => Self::South,
        }
    }

    /// Slot index of this side's store.
    #[must_use]
    pub const fn store(self) -> usize {
        match self {
            Self::South => SOUTH_STORE,
            Self::North => NORTH_STORE,
        }
    }

    #[must_use]
    pub const fn first_pit(self) -> usize {
        match self {
            Self::South => 0,
            Self::North => 7,
        }
    }

    /// Slot indices of this side's six playing pits.
    #[must_use]
    pub const fn pits(self) -> Range<usize> {
        let first = self.first_pit();
        first..first + PITS_PER_SIDE
    }

    #[must_use]
    pub const fn owns_pit(self, index: usize) -> bool {
        let first = self.first_pit();
        index >= first && index < first + PITS_PER_SIDE
    }

    /// Sowing ring for moves made by this side.
    pub(crate) const fn ring(self) -> &'static [usize; RING_LEN] {
        match self {
            Self::South => &SOUTH_RING,
            Self::North => &NORTH_RING,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::South => "South",
            Self::North => "North",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Total stone count does not fit the per-slot counter.
    TooManyStones(u32),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyStones(total) => write!(
                f,
                "layout holds {total} stones, at most {} are supported",
                u8::MAX
            ),
        }
    }
}

impl std::error::Error for LayoutError {}

/// Flat 14-slot Kalah board.
///
/// Slots 0..=5 are South's pits, 6 is North's store, 7..=12 are North's pits
/// and 13 is South's store. Pit `i` faces pit `12 - i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    slots: [u8; SLOT_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard opening: four stones in each of the twelve pits, empty stores.
    #[must_use]
    pub const fn new() -> Self {
        let s = DEFAULT_STONES;
        Self {
            slots: [s, s, s, s, s, s, 0, s, s, s, s, s, s, 0],
        }
    }

    /// Opening with `stones` in every pit.
    ///
    /// # Errors
    /// `TooManyStones` when twelve pits of `stones` exceed `u8::MAX`.
    pub fn with_stones(stones: u8) -> Result<Self, LayoutError> {
        let s = stones;
        Self::from_layout([s, s, s, s, s, s, 0, s, s, s, s, s, s, 0])
    }

    /// Board from an explicit slot layout.
    ///
    /// The layout is taken as-is: a terminal layout is not finalized here.
    ///
    /// # Errors
    /// `TooManyStones` when the slots hold more than `u8::MAX` stones.
    pub fn from_layout(slots: [u8; SLOT_COUNT]) -> Result<Self, LayoutError> {
        let total: u32 = slots.iter().map(|&s| u32::from(s)).sum();
        if total > u32::from(u8::MAX) {
            return Err(LayoutError::TooManyStones(total));
        }
        Ok(Self { slots })
    }

    #[must_use]
    pub const fn slots(&self) -> &[u8; SLOT_COUNT] {
        &self.slots
    }

    /// Stones in slot `index`, or 0 for an index off the board.
    #[must_use]
    pub fn stones(&self, index: usize) -> u8 {
        self.slots.get(index).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn store(&self, side: Side) -> u8 {
        self.stones(side.store())
    }

    /// Stones still in play on `side`'s pits.
    #[must_use]
    pub fn pit_total(&self, side: Side) -> u32 {
        side.pits().map(|pit| u32::from(self.stones(pit))).sum()
    }

    /// Empties slot `index`, returning what it held.
    pub(crate) fn take(&mut self, index: usize) -> u8 {
        self.slots.get_mut(index).map_or(0, std::mem::take)
    }

    pub(crate) fn add(&mut self, index: usize, stones: u8) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot += stones;
        }
    }

    /// Stones on the whole board, stores included.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.slots.iter().map(|&s| u32::from(s)).sum()
    }

    /// Pit facing `pit` across the board.
    #[must_use]
    pub const fn opposite(pit: usize) -> usize {
        12 - pit
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.pit_total(Side::South) == 0 || self.pit_total(Side::North) == 0
    }

    /// End-of-game sweep: every pit empties into its owner's store.
    ///
    /// Does nothing on a board that is still in play. Running it again on an
    /// already swept board changes nothing, since every pit is empty.
    pub fn finalize(&mut self) {
        if !self.is_terminal() {
            return;
        }
        for side in [Side::South, Side::North] {
            // Total never exceeds u8::MAX, so neither does a store.
            let remaining: u8 = side.pits().map(|pit| self.take(pit)).sum();
            self.add(side.store(), remaining);
        }
    }

    /// Non-empty pits of `side` in ascending index order.
    #[must_use]
    pub fn legal_moves(&self, side: Side) -> MoveList {
        let mut moves = MoveList::new();
        for pit in side.pits() {
            if self.stones(pit) > 0 {
                moves.push(pit);
            }
        }
        moves
    }

    /// Winner by store count, `None` on a tie.
    #[must_use]
    pub fn leader(&self) -> Option<Side> {
        let south = self.store(Side::South);
        let north = self.store(Side::North);
        match south.cmp(&north) {
            std::cmp::Ordering::Greater => Some(Side::South),
            std::cmp::Ordering::Less => Some(Side::North),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // North's pits run right to left along the top row.
        write!(f, "    ")?;
        for pit in Side::North.pits().rev() {
            write!(f, "{:>3}", self.stones(pit))?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>3} {:>18} {:>3}",
            self.store(Side::North),
            "",
            self.store(Side::South)
        )?;
        write!(f, "    ")?;
        for pit in Side::South.pits() {
            write!(f, "{:>3}", self.stones(pit))?;
        }
        writeln!(f)
    }
}
