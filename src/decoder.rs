//! Decoding passes.
//!
//! Decoding runs the grid the other way around: the ciphertext fills a grid
//! in row-major scan order, and the diamond walk reads it back out in the
//! order the encoder originally wrote. One round of decoding:
//! 1. Size the grid from the working length (floor square root, lowered to odd)
//! 2. Fill the grid in scan order, ignoring any surplus characters
//! 3. Re-run the diamond walk to collect the original order
//! 4. On intermediate rounds, drop the tail beyond the largest perfect
//!    square, which is exactly the noise the matching encode round appended
//!
//! Only the final round stops at the stop marker; everything the earlier
//! rounds see, noise included, is payload to them.

use thiserror::Error;

use crate::grid::{self, Grid, GridError};
use crate::message::{Message, MessageError};
use crate::observe::RoundObserver;
use crate::traversal::{fill_scan, read_diamond};

/// Errors that can occur during decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("round count must be at least 1")]
    ZeroRounds,

    #[error("invalid message: {0}")]
    Message(#[from] MessageError),

    #[error("grid sizing failed: {0}")]
    Grid(#[from] GridError),
}

/// Decodes `cipher` in a single round, stopping at the stop marker.
pub fn decode(cipher: &str) -> Result<String, DecodeError> {
    decode_rounds(cipher, 1)
}

/// Single-round decode, reporting progress to `observer`.
pub fn decode_with_observer<O: RoundObserver>(
    cipher: &str,
    observer: &mut O,
) -> Result<String, DecodeError> {
    decode_rounds_with_observer(cipher, 1, observer)
}

/// Decodes `cipher` over `rounds` rounds.
pub fn decode_rounds(cipher: &str, rounds: usize) -> Result<String, DecodeError> {
    decode_rounds_with_observer(cipher, rounds, &mut ())
}

/// Multi-round decode, reporting each round to `observer`.
///
/// The returned text is the final round's diamond read, up to and including
/// the stop marker when one is found.
pub fn decode_rounds_with_observer<O: RoundObserver>(
    cipher: &str,
    rounds: usize,
    observer: &mut O,
) -> Result<String, DecodeError> {
    if rounds == 0 {
        return Err(DecodeError::ZeroRounds);
    }

    let mut message = Message::from_cipher(cipher)?;
    for round in 1..=rounds {
        let last = round == rounds;

        let mut grid = Grid::with_square_size(message.len())?;
        fill_scan(&mut grid, message.working());
        observer.on_grid_ready(&grid);

        let text = read_diamond(&grid, last);
        observer.on_round_result(round, &text);

        message.reset_output();
        message.push_output(&text);
        message.commit_round();

        if !last {
            let root = grid::integer_sqrt(message.len());
            message.truncate_working(root * root);
        }
    }

    Ok(message.working().to_string())
}
