//! The diamond walk and the four grid passes built on it.
//!
//! Both directions of the cipher share one fixed visitation order, the
//! [`DiamondWalk`]. Encoding scatters the message along the walk and reads
//! the grid back row-major ([`write_diamond`] + [`read_scan`]); decoding
//! fills the grid row-major and re-runs the identical walk to collect the
//! characters in their original order ([`fill_scan`] + [`read_diamond`]).
//! That asymmetry is what makes the scan text look shuffled while staying
//! exactly reversible.

use crate::grid::{diamond_capacity, Grid};
use crate::message::Message;
use crate::STOP_MARKER;

/// The diamond visitation order for a grid of odd side length.
///
/// Cells are visited in concentric rings. Ring `r` runs an upper half-pass
/// from row `r` down past the horizontal midline, the column stepping away
/// from the center and back, then a lower half-pass climbing the right-hand
/// side from row `n-2-r` up to row `r+1`. Each ring is one cell narrower
/// than the last; the walk yields exactly `diamond_capacity(n)` positions.
#[derive(Debug, Clone)]
pub struct DiamondWalk {
    steps: std::vec::IntoIter<(usize, usize)>,
}

impl DiamondWalk {
    /// Builds the walk for a grid of odd side length `size`.
    pub fn new(size: usize) -> Self {
        Self {
            steps: diamond_positions(size).into_iter(),
        }
    }
}

impl Iterator for DiamondWalk {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<(usize, usize)> {
        self.steps.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.steps.size_hint()
    }
}

impl ExactSizeIterator for DiamondWalk {}

/// Generates the ring-by-ring cell order.
///
/// Offsets are signed because the half-pass bookkeeping briefly dips below
/// zero between rings; positions pushed are always in bounds.
fn diamond_positions(size: usize) -> Vec<(usize, usize)> {
    let total = diamond_capacity(size);
    let mut steps = Vec::with_capacity(total);

    let n = size as isize;
    let tip = n / 2;
    let mut ring = 0;
    let mut half_span = 1 + tip * 2;
    let mut upper_offset = 0;
    let mut lower_offset = tip - 1;

    while steps.len() < total {
        // Upper half-pass: rows ring..half_span, column stepping away from
        // the center and back as the row advances.
        for row in ring..half_span {
            let col = if row <= tip {
                let col = tip - upper_offset;
                upper_offset += 1;
                col
            } else {
                let col = tip - lower_offset;
                lower_offset -= 1;
                col
            };
            steps.push((row as usize, col as usize));
        }

        // Lower half-pass: back up the right-hand side.
        lower_offset = 1;
        let mut row = n - 2 - ring;
        while row > ring {
            steps.push((row as usize, (tip + lower_offset) as usize));
            lower_offset += if row > tip { 1 } else { -1 };
            row -= 1;
        }

        half_span -= 1;
        upper_offset = 0;
        ring += 1;
        lower_offset = tip - ring - 1;
    }

    steps
}

/// Scatters the message's working buffer into the grid along the diamond.
///
/// Stops when the message runs out; untouched cells stay blank.
pub fn write_diamond(grid: &mut Grid, message: &mut Message) {
    for (row, col) in DiamondWalk::new(grid.size()) {
        match message.next_char() {
            Some(ch) => grid.set_cell(row, col, ch),
            None => break,
        }
    }
}

/// Collects the grid's cells in diamond order.
///
/// With `stop_at_marker` set, the first stop marker met is appended to the
/// result and the walk ends there. Otherwise the full diamond is read,
/// markers included.
pub fn read_diamond(grid: &Grid, stop_at_marker: bool) -> String {
    let mut text = String::with_capacity(grid.capacity());
    for (row, col) in DiamondWalk::new(grid.size()) {
        let ch = grid.cell(row, col);
        text.push(ch);
        if stop_at_marker && ch == STOP_MARKER {
            break;
        }
    }
    text
}

/// Reads the whole grid in row-major scan order.
pub fn read_scan(grid: &Grid) -> String {
    let mut text = String::with_capacity(grid.size() * grid.size());
    for row in grid.rows() {
        text.extend(row.iter());
    }
    text
}

/// Fills the grid in row-major scan order from `text`.
///
/// Surplus characters beyond the grid are ignored; if `text` runs out early
/// the remaining cells stay blank.
pub fn fill_scan(grid: &mut Grid, text: &str) {
    let size = grid.size();
    let mut chars = text.chars();
    for row in 0..size {
        for col in 0..size {
            match chars.next() {
                Some(ch) => grid.set_cell(row, col, ch),
                None => return,
            }
        }
    }
}
