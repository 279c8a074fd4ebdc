//! Encoding passes.
//!
//! One round of encoding:
//! 1. Size a fresh grid for the working text (automatically or explicitly)
//! 2. Scatter the text into the grid along the diamond walk
//! 3. Pack every untouched cell with random letters
//! 4. Read the whole grid back in row-major scan order
//!
//! Multi-round encoding chains the scan text of each round into the diamond
//! of the next, always auto-sizing, so the ciphertext grows as noise piles
//! up. The trailing stop marker the caller put on the plaintext is what the
//! final decode round later uses to find where the real text ends.

use rand::Rng;
use thiserror::Error;

use crate::grid::{Grid, GridError};
use crate::message::{Message, MessageError};
use crate::observe::RoundObserver;
use crate::traversal::{read_scan, write_diamond};

/// Errors that can occur during encoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("round count must be at least 1")]
    ZeroRounds,

    #[error("invalid message: {0}")]
    Message(#[from] MessageError),

    #[error("grid sizing failed: {0}")]
    Grid(#[from] GridError),
}

/// How the encode grid gets its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridSizing {
    /// Smallest odd size whose diamond holds the message.
    Auto,
    /// A caller-chosen size, validated against the message length.
    Explicit(usize),
}

/// Encodes `plaintext` in a single round.
pub fn encode<R: Rng>(
    plaintext: &str,
    sizing: GridSizing,
    rng: &mut R,
) -> Result<String, EncodeError> {
    encode_with_observer(plaintext, sizing, rng, &mut ())
}

/// Encodes `plaintext` in a single round, reporting progress to `observer`.
pub fn encode_with_observer<R: Rng, O: RoundObserver>(
    plaintext: &str,
    sizing: GridSizing,
    rng: &mut R,
    observer: &mut O,
) -> Result<String, EncodeError> {
    let mut message = Message::from_plaintext(plaintext)?;
    run_round(&mut message, sizing, 1, rng, observer)?;
    Ok(message.working().to_string())
}

/// Encodes `plaintext` over `rounds` auto-sized rounds.
pub fn encode_rounds<R: Rng>(
    plaintext: &str,
    rounds: usize,
    rng: &mut R,
) -> Result<String, EncodeError> {
    encode_rounds_with_observer(plaintext, rounds, rng, &mut ())
}

/// Multi-round encode, reporting each round to `observer`.
pub fn encode_rounds_with_observer<R: Rng, O: RoundObserver>(
    plaintext: &str,
    rounds: usize,
    rng: &mut R,
    observer: &mut O,
) -> Result<String, EncodeError> {
    if rounds == 0 {
        return Err(EncodeError::ZeroRounds);
    }

    let mut message = Message::from_plaintext(plaintext)?;
    for round in 1..=rounds {
        run_round(&mut message, GridSizing::Auto, round, rng, observer)?;
    }
    Ok(message.working().to_string())
}

/// One fill-noise-scan pass. Leaves the round's scan text as the message's
/// working buffer.
fn run_round<R: Rng, O: RoundObserver>(
    message: &mut Message,
    sizing: GridSizing,
    round: usize,
    rng: &mut R,
    observer: &mut O,
) -> Result<(), EncodeError> {
    let mut grid = match sizing {
        GridSizing::Auto => Grid::with_auto_size(message.len())?,
        GridSizing::Explicit(size) => Grid::with_explicit_size(size, message.len())?,
    };

    message.reset_cursor();
    write_diamond(&mut grid, message);
    grid.fill_blanks_with_noise(rng);
    observer.on_grid_ready(&grid);

    let cipher = read_scan(&grid);
    observer.on_round_result(round, &cipher);

    message.reset_output();
    message.push_output(&cipher);
    message.commit_round();
    Ok(())
}
