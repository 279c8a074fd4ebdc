//! Rhombus - interactive diamond cipher.
//!
//! A menu-driven front end over the rhombus library: enter a message, pick a
//! grid size or a round count, and watch each round's grid and output as the
//! transposition runs.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use rhombus::{
    check_explicit_size, decode_rounds_with_observer, encode_rounds_with_observer,
    encode_with_observer, size_for_square, Grid, GridSizing, Message, RoundObserver,
};

/// Rhombus - diamond-grid transposition cipher
///
/// Walks you through encoding and decoding messages with the diamond
/// transposition, one menu at a time.
#[derive(Parser)]
#[command(name = "rhombus")]
#[command(version)]
#[command(about = "Interactive diamond-grid transposition cipher")]
struct Cli {
    /// Seed for the noise generator (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Plain output: no screen clearing, no display pauses
    #[arg(long)]
    plain: bool,
}

/// Menu the session is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    /// Top level: encrypt, decrypt, or quit.
    Main,
    /// Encrypt: enter a message, then single or multi round.
    Encrypt,
    /// Single-round encryption: grid size choice and run.
    EncryptSingle,
    /// Multi-round encryption: round count and run.
    EncryptMulti,
    /// Decrypt: ciphertext, round count, run.
    Decrypt,
}

/// Everything the menus collect before running an operation.
struct Session {
    plaintext: Option<String>,
    sizing: GridSizing,
    encode_rounds: usize,
    cipher: Option<String>,
    decode_rounds: usize,
}

impl Session {
    fn new() -> Self {
        Self {
            plaintext: None,
            sizing: GridSizing::Auto,
            encode_rounds: 1,
            cipher: None,
            decode_rounds: 1,
        }
    }
}

/// Terminal presentation knobs.
#[derive(Clone, Copy)]
struct Display {
    plain: bool,
}

impl Display {
    fn clear_screen(&self) {
        if !self.plain {
            print!("\x1B[2J\x1B[1;1H");
            let _ = io::stdout().flush();
        }
    }

    fn pause(&self, seconds: u64) {
        if !self.plain {
            thread::sleep(Duration::from_secs(seconds));
        }
    }
}

/// Prints each round's grid and output as it completes.
struct ConsoleObserver {
    display: Display,
    label: &'static str,
}

impl RoundObserver for ConsoleObserver {
    fn on_grid_ready(&mut self, grid: &Grid) {
        for row in grid.rows() {
            let cells: Vec<String> = row.iter().map(char::to_string).collect();
            println!("{}", cells.join(" "));
        }
    }

    fn on_round_result(&mut self, round: usize, text: &str) {
        println!("{} round {}: {}", self.label, round, text);
        self.display.pause(5);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let display = Display { plain: cli.plain };
    let mut rng = match cli.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut session = Session::new();
    let mut screen = Screen::Main;

    loop {
        display.clear_screen();
        let next = match screen {
            Screen::Main => main_screen(&mut input, display)?,
            Screen::Encrypt => encrypt_screen(&mut input, display, &mut session)?,
            Screen::EncryptSingle => {
                encrypt_single_screen(&mut input, display, &mut session, &mut rng)?
            }
            Screen::EncryptMulti => {
                encrypt_multi_screen(&mut input, display, &mut session, &mut rng)?
            }
            Screen::Decrypt => decrypt_screen(&mut input, display, &mut session)?,
        };
        match next {
            Some(s) => screen = s,
            None => break,
        }
    }

    println!("Goodbye.");
    Ok(())
}

fn main_screen(input: &mut impl BufRead, display: Display) -> Result<Option<Screen>> {
    println!("=== Diamond cipher ===");
    println!("1. Encrypt a message");
    println!("2. Decrypt a message");
    println!("3. Quit");

    Ok(match prompt_choice(input, display)? {
        1 => Some(Screen::Encrypt),
        2 => Some(Screen::Decrypt),
        3 => None,
        _ => {
            invalid_choice(display);
            Some(Screen::Main)
        }
    })
}

fn encrypt_screen(
    input: &mut impl BufRead,
    display: Display,
    session: &mut Session,
) -> Result<Option<Screen>> {
    println!("=== Encrypt ===");
    println!("1. Enter a message");
    println!("2. One-round encryption");
    println!("3. Multi-round encryption");
    println!("4. Back");

    Ok(Some(match prompt_choice(input, display)? {
        1 => {
            session.plaintext = Some(prompt_plaintext(input, display)?);
            Screen::Encrypt
        }
        2 => Screen::EncryptSingle,
        3 => Screen::EncryptMulti,
        4 => Screen::Main,
        _ => {
            invalid_choice(display);
            Screen::Encrypt
        }
    }))
}

fn encrypt_single_screen(
    input: &mut impl BufRead,
    display: Display,
    session: &mut Session,
    rng: &mut ChaCha20Rng,
) -> Result<Option<Screen>> {
    println!("=== One-round encryption ===");
    println!("1. Enter grid size");
    println!("2. Automatic grid size");
    println!("3. Print grid and encoded message");
    println!("4. Back");

    Ok(Some(match prompt_choice(input, display)? {
        1 => {
            match &session.plaintext {
                Some(text) => {
                    let size = prompt_grid_size(input, display, text.len())?;
                    session.sizing = GridSizing::Explicit(size);
                }
                None => no_message_yet(display),
            }
            Screen::EncryptSingle
        }
        2 => {
            session.sizing = GridSizing::Auto;
            println!("Grid size will fit the message.");
            Screen::EncryptSingle
        }
        3 => {
            match &session.plaintext {
                Some(text) => {
                    let mut observer = ConsoleObserver {
                        display,
                        label: "Encoded",
                    };
                    if let Err(err) = encode_with_observer(text, session.sizing, rng, &mut observer)
                    {
                        report_error(display, &err);
                    }
                }
                None => no_message_yet(display),
            }
            Screen::EncryptSingle
        }
        4 => Screen::Encrypt,
        _ => {
            invalid_choice(display);
            Screen::EncryptSingle
        }
    }))
}

fn encrypt_multi_screen(
    input: &mut impl BufRead,
    display: Display,
    session: &mut Session,
    rng: &mut ChaCha20Rng,
) -> Result<Option<Screen>> {
    println!("=== Multi-round encryption ===");
    println!("1. Enter round number");
    println!("2. Run rounds");
    println!("3. Back");

    Ok(Some(match prompt_choice(input, display)? {
        1 => {
            session.encode_rounds = prompt_rounds(input, display)?;
            Screen::EncryptMulti
        }
        2 => {
            match &session.plaintext {
                Some(text) => {
                    let mut observer = ConsoleObserver {
                        display,
                        label: "Encoded",
                    };
                    if let Err(err) = encode_rounds_with_observer(
                        text,
                        session.encode_rounds,
                        rng,
                        &mut observer,
                    ) {
                        report_error(display, &err);
                    }
                }
                None => no_message_yet(display),
            }
            Screen::EncryptMulti
        }
        3 => Screen::Encrypt,
        _ => {
            invalid_choice(display);
            Screen::EncryptMulti
        }
    }))
}

fn decrypt_screen(
    input: &mut impl BufRead,
    display: Display,
    session: &mut Session,
) -> Result<Option<Screen>> {
    println!("=== Decrypt ===");
    println!("1. Enter a message");
    println!("2. Enter round number");
    println!("3. Run rounds");
    println!("4. Back");

    Ok(Some(match prompt_choice(input, display)? {
        1 => {
            let cipher = prompt_cipher(input, display)?;
            println!("{cipher}");
            session.cipher = Some(cipher);
            Screen::Decrypt
        }
        2 => {
            session.decode_rounds = prompt_rounds(input, display)?;
            Screen::Decrypt
        }
        3 => {
            match &session.cipher {
                Some(text) => {
                    let mut observer = ConsoleObserver {
                        display,
                        label: "Decoded",
                    };
                    if let Err(err) =
                        decode_rounds_with_observer(text, session.decode_rounds, &mut observer)
                    {
                        report_error(display, &err);
                    }
                }
                None => no_message_yet(display),
            }
            Screen::Decrypt
        }
        4 => Screen::Main,
        _ => {
            invalid_choice(display);
            Screen::Decrypt
        }
    }))
}

/// Reads one trimmed line, or fails if stdin is closed.
fn read_line(input: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("failed to read input")?;
    if read == 0 {
        anyhow::bail!("input closed");
    }
    Ok(line.trim().to_string())
}

/// Prompts until `parse` accepts the input, showing each error in between.
fn prompt_until<T>(
    input: &mut impl BufRead,
    display: Display,
    prompt: &str,
    mut parse: impl FnMut(&str) -> Result<T, String>,
) -> Result<T> {
    loop {
        print!("{prompt}");
        io::stdout().flush()?;
        let line = read_line(input)?;
        match parse(&line) {
            Ok(value) => return Ok(value),
            Err(err) => {
                println!("Error: {err}");
                println!("Please try again.");
                display.pause(1);
            }
        }
    }
}

fn prompt_choice(input: &mut impl BufRead, display: Display) -> Result<usize> {
    prompt_until(input, display, "Choose an option: ", parse_positive)
}

fn prompt_rounds(input: &mut impl BufRead, display: Display) -> Result<usize> {
    prompt_until(input, display, "Enter the round number: ", parse_positive)
}

fn prompt_plaintext(input: &mut impl BufRead, display: Display) -> Result<String> {
    prompt_until(input, display, "Enter a message to encrypt: ", |line| {
        Message::from_plaintext(line)
            .map(|message| message.source().to_string())
            .map_err(|err| err.to_string())
    })
}

fn prompt_cipher(input: &mut impl BufRead, display: Display) -> Result<String> {
    prompt_until(input, display, "Enter a message to decrypt: ", |line| {
        let message = Message::from_cipher(line).map_err(|err| err.to_string())?;
        let text = message.source().to_string();
        if !is_perfect_square(text.len()) {
            return Err("the message must fill a whole square grid".to_string());
        }
        size_for_square(text.len()).map_err(|err| err.to_string())?;
        Ok(text)
    })
}

fn prompt_grid_size(
    input: &mut impl BufRead,
    display: Display,
    payload_len: usize,
) -> Result<usize> {
    prompt_until(input, display, "Enter a grid size: ", |line| {
        let size = parse_positive(line)?;
        check_explicit_size(size, payload_len).map_err(|err| err.to_string())?;
        Ok(size)
    })
}

fn parse_positive(line: &str) -> Result<usize, String> {
    let value: usize = line
        .parse()
        .map_err(|_| "input must be a number".to_string())?;
    if value == 0 {
        return Err("number must be greater than 0".to_string());
    }
    Ok(value)
}

fn is_perfect_square(len: usize) -> bool {
    let mut root = 0usize;
    while root * root < len {
        root += 1;
    }
    root * root == len
}

fn invalid_choice(display: Display) {
    println!("Invalid choice. Please try again.");
    display.pause(1);
}

fn no_message_yet(display: Display) {
    println!("Please enter a message first");
    display.pause(1);
}

fn report_error(display: Display, err: &dyn std::fmt::Display) {
    println!("Error: {err}");
    display.pause(1);
}
