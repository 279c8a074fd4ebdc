//! # Rhombus - diamond-grid transposition cipher
//!
//! Rhombus scrambles text by scattering it into a square grid along a
//! diamond-shaped walk and reading the grid back in row-major scan order.
//! Decoding fills a grid from the scan text and re-runs the identical walk
//! to put the characters back in their original order.
//!
//! ## How a round works
//!
//! - The grid side is always odd; a grid of side `n` has a diamond of
//!   `n*n/2 + 1` cells (integer division).
//! - Encoding writes along the diamond, fills every leftover cell with
//!   random letters, and emits the whole grid as one scan line.
//! - Decoding sizes its grid from the floor square root of the input,
//!   lowered to odd, so round-introduced noise never confuses the layout.
//! - Multi-round operation feeds each round's output to the next; the
//!   ciphertext grows as noise accumulates.
//! - A trailing `.` on the plaintext marks where the real text ends. The
//!   final decode round stops at the first marker it meets; intermediate
//!   rounds treat everything as payload.
//!
//! ## Example
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//! use rhombus::{decode_rounds, encode_rounds};
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//!
//! // The trailing dot marks where the real text ends.
//! let cipher = encode_rounds("MEETATDAWN.", 2, &mut rng).unwrap();
//!
//! // Decoding with the same round count restores the message.
//! let decoded = decode_rounds(&cipher, 2).unwrap();
//! assert_eq!(decoded, "MEETATDAWN.");
//! ```
//!
//! ## Modules
//!
//! - [`message`]: input validation and the buffers carried across rounds
//! - [`grid`]: square grid storage and the three sizing rules
//! - [`traversal`]: the diamond walk and the four grid passes
//! - [`encoder`]: single and multi-round encoding
//! - [`decoder`]: single and multi-round decoding
//! - [`observe`]: hooks for showing per-round grids and outputs

/// Character marking the true end of a message.
pub const STOP_MARKER: char = '.';

/// Filler for grid cells no pass has written yet.
pub const BLANK: char = ' ';

/// Smallest supported grid side length.
pub const MIN_GRID_SIZE: usize = 3;

/// Largest supported grid side length.
pub const MAX_GRID_SIZE: usize = 99;

pub mod decoder;
pub mod encoder;
pub mod grid;
pub mod message;
pub mod observe;
pub mod traversal;

// Re-export commonly used items at the crate root
pub use decoder::{
    decode, decode_rounds, decode_rounds_with_observer, decode_with_observer, DecodeError,
};
pub use encoder::{
    encode, encode_rounds, encode_rounds_with_observer, encode_with_observer, EncodeError,
    GridSizing,
};
pub use grid::{
    check_explicit_size, diamond_capacity, size_for_payload, size_for_square, Grid, GridError,
};
pub use message::{Message, MessageError};
pub use observe::RoundObserver;
pub use traversal::{fill_scan, read_diamond, read_scan, write_diamond, DiamondWalk};
