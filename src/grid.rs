//! Square grid storage and sizing rules.
//!
//! A [`Grid`] is the scratch surface for one transposition round: a square
//! of odd side length, stored row-major, blank wherever no pass has written
//! yet. The sizing rules live here too:
//!
//! - encode sizing picks the smallest odd side whose diamond holds the
//!   payload ([`size_for_payload`]),
//! - decode sizing takes the floor square root of the input length, lowered
//!   to odd ([`size_for_square`]),
//! - explicit sizes are validated for parity, range, and capacity.

use rand::Rng;
use thiserror::Error;

use crate::{BLANK, MAX_GRID_SIZE, MIN_GRID_SIZE};

/// Errors that can occur while sizing or allocating a grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid size {0} is even: the diamond needs an odd side length")]
    EvenSize(usize),

    #[error("grid size {0} is outside the supported range 3 to 99")]
    SizeOutOfRange(usize),

    #[error("grid of size {size} holds {capacity} characters, message needs {needed}")]
    TooSmall {
        size: usize,
        capacity: usize,
        needed: usize,
    },

    #[error("message of {0} characters exceeds the largest supported grid")]
    PayloadTooLong(usize),

    #[error("decode input of {0} characters is shorter than the smallest grid")]
    InputTooShort(usize),
}

/// Number of cells the diamond traversal touches for odd side length `size`.
pub fn diamond_capacity(size: usize) -> usize {
    size * size / 2 + 1
}

/// Smallest odd size whose diamond holds `len` characters.
pub fn size_for_payload(len: usize) -> Result<usize, GridError> {
    let mut size = MIN_GRID_SIZE;
    while diamond_capacity(size) < len {
        size += 2;
        if size > MAX_GRID_SIZE {
            return Err(GridError::PayloadTooLong(len));
        }
    }
    Ok(size)
}

/// Decode-path sizing: floor square root of `len`, lowered to odd.
///
/// The input must fill at least the smallest grid, so anything under 9
/// characters is rejected.
pub fn size_for_square(len: usize) -> Result<usize, GridError> {
    let root = integer_sqrt(len);
    let size = if root % 2 == 0 {
        root.saturating_sub(1)
    } else {
        root
    };
    if size < MIN_GRID_SIZE {
        return Err(GridError::InputTooShort(len));
    }
    Ok(size)
}

/// Validates an explicit, user-chosen grid size against a payload length.
pub fn check_explicit_size(size: usize, payload_len: usize) -> Result<(), GridError> {
    if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
        return Err(GridError::SizeOutOfRange(size));
    }
    if size % 2 == 0 {
        return Err(GridError::EvenSize(size));
    }
    let capacity = diamond_capacity(size);
    if capacity < payload_len {
        return Err(GridError::TooSmall {
            size,
            capacity,
            needed: payload_len,
        });
    }
    Ok(())
}

pub(crate) fn integer_sqrt(value: usize) -> usize {
    let mut root = 0;
    while (root + 1) * (root + 1) <= value {
        root += 1;
    }
    root
}

/// One round's transposition surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<char>,
}

impl Grid {
    /// Allocates a blank grid of an explicit, user-chosen size.
    pub fn with_explicit_size(size: usize, payload_len: usize) -> Result<Self, GridError> {
        check_explicit_size(size, payload_len)?;
        Ok(Self::blank(size))
    }

    /// Allocates a blank grid automatically sized for `payload_len`.
    pub fn with_auto_size(payload_len: usize) -> Result<Self, GridError> {
        Ok(Self::blank(size_for_payload(payload_len)?))
    }

    /// Allocates a blank grid for decoding `input_len` characters.
    pub fn with_square_size(input_len: usize) -> Result<Self, GridError> {
        Ok(Self::blank(size_for_square(input_len)?))
    }

    fn blank(size: usize) -> Self {
        Self {
            size,
            cells: vec![BLANK; size * size],
        }
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells the diamond traversal will touch.
    pub fn capacity(&self) -> usize {
        diamond_capacity(self.size)
    }

    /// Reads the cell at `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> char {
        self.cells[self.index(row, col)]
    }

    /// Writes the cell at `(row, col)`.
    pub fn set_cell(&mut self, row: usize, col: usize, ch: char) {
        let index = self.index(row, col);
        self.cells[index] = ch;
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.size && col < self.size,
            "cell ({}, {}) outside a {}x{} grid",
            row,
            col,
            self.size,
            self.size
        );
        row * self.size + col
    }

    /// Fills every still-blank cell from `filler`, in row-major order.
    pub fn fill_blanks_with<F>(&mut self, mut filler: F)
    where
        F: FnMut() -> char,
    {
        for cell in &mut self.cells {
            if *cell == BLANK {
                *cell = filler();
            }
        }
    }

    /// Fills every still-blank cell with a random letter A-Z.
    ///
    /// The noise comes from the caller's generator so a whole session can be
    /// replayed from a seed. Noise never includes the stop marker, which is
    /// what lets the final decode round treat the first marker it meets as
    /// genuine.
    pub fn fill_blanks_with_noise<R: Rng>(&mut self, rng: &mut R) {
        self.fill_blanks_with(|| (b'A' + rng.gen_range(0u8..26)) as char);
    }

    /// Rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_diamond_capacity_values() {
        assert_eq!(diamond_capacity(3), 5);
        assert_eq!(diamond_capacity(5), 13);
        assert_eq!(diamond_capacity(7), 25);
        assert_eq!(diamond_capacity(99), 4901);
    }

    #[test]
    fn test_size_for_payload_boundaries() {
        assert_eq!(size_for_payload(1), Ok(3));
        assert_eq!(size_for_payload(5), Ok(3));
        assert_eq!(size_for_payload(6), Ok(5));
        assert_eq!(size_for_payload(13), Ok(5));
        assert_eq!(size_for_payload(14), Ok(7));
        assert_eq!(size_for_payload(4901), Ok(99));
    }

    #[test]
    fn test_size_for_payload_over_ceiling() {
        assert_eq!(size_for_payload(4902), Err(GridError::PayloadTooLong(4902)));
    }

    #[test]
    fn test_size_for_square_rounds_down_to_odd() {
        assert_eq!(size_for_square(9), Ok(3));
        assert_eq!(size_for_square(15), Ok(3));
        assert_eq!(size_for_square(16), Ok(3)); // root 4 is even, lowered to 3
        assert_eq!(size_for_square(25), Ok(5));
        assert_eq!(size_for_square(48), Ok(5));
        assert_eq!(size_for_square(49), Ok(7));
    }

    #[test]
    fn test_size_for_square_too_short() {
        assert_eq!(size_for_square(0), Err(GridError::InputTooShort(0)));
        assert_eq!(size_for_square(8), Err(GridError::InputTooShort(8)));
    }

    #[test]
    fn test_explicit_size_even_rejected() {
        assert_eq!(
            Grid::with_explicit_size(4, 5).unwrap_err(),
            GridError::EvenSize(4)
        );
    }

    #[test]
    fn test_explicit_size_too_small_rejected() {
        assert_eq!(
            Grid::with_explicit_size(3, 6).unwrap_err(),
            GridError::TooSmall {
                size: 3,
                capacity: 5,
                needed: 6
            }
        );
    }

    #[test]
    fn test_explicit_size_out_of_range_rejected() {
        assert_eq!(
            Grid::with_explicit_size(101, 5).unwrap_err(),
            GridError::SizeOutOfRange(101)
        );
        assert_eq!(
            Grid::with_explicit_size(1, 1).unwrap_err(),
            GridError::SizeOutOfRange(1)
        );
    }

    #[test]
    fn test_explicit_size_accepts_exact_fit() {
        let grid = Grid::with_explicit_size(3, 5).unwrap();
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.capacity(), 5);
    }

    #[test]
    fn test_cells_start_blank() {
        let grid = Grid::with_auto_size(5).unwrap();
        assert_eq!(grid.size(), 3);
        assert!(grid.rows().all(|row| row.iter().all(|&ch| ch == BLANK)));
    }

    #[test]
    fn test_cell_round_trip() {
        let mut grid = Grid::with_auto_size(5).unwrap();
        grid.set_cell(1, 2, 'X');
        assert_eq!(grid.cell(1, 2), 'X');
        assert_eq!(grid.cell(2, 1), BLANK);
    }

    #[test]
    fn test_fill_blanks_preserves_written_cells() {
        let mut grid = Grid::with_auto_size(5).unwrap();
        grid.set_cell(0, 1, 'H');
        grid.fill_blanks_with(|| 'Q');

        assert_eq!(grid.cell(0, 1), 'H');
        assert_eq!(grid.cell(0, 0), 'Q');
        assert_eq!(grid.cell(2, 2), 'Q');
    }

    #[test]
    fn test_noise_is_letters_only() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let mut grid = Grid::with_auto_size(13).unwrap();
        grid.fill_blanks_with_noise(&mut rng);

        assert!(grid
            .rows()
            .all(|row| row.iter().all(|ch| ch.is_ascii_uppercase())));
    }

    #[test]
    fn test_noise_is_reproducible_from_seed() {
        let mut first = Grid::with_auto_size(13).unwrap();
        let mut second = Grid::with_auto_size(13).unwrap();

        let mut rng = ChaCha20Rng::seed_from_u64(7);
        first.fill_blanks_with_noise(&mut rng);
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        second.fill_blanks_with_noise(&mut rng);

        assert_eq!(first, second);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_out_of_bounds_cell_panics() {
        let grid = Grid::with_auto_size(5).unwrap();
        grid.cell(0, 3);
    }
}
