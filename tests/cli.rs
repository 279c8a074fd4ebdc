use assert_cmd::Command;
use predicates::str::contains;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("rhombus").unwrap();
    cmd.args(["--plain", "--seed", "7"]);
    cmd
}

#[test]
fn quit_from_main_menu() {
    cmd()
        .write_stdin("3\n")
        .assert()
        .success()
        .stdout(contains("Diamond cipher"))
        .stdout(contains("Goodbye."));
}

#[test]
fn encode_single_round_auto_size() {
    // Enter message, pick automatic sizing, run, back out, quit.
    cmd()
        .write_stdin("1\n1\nHELLO\n2\n2\n3\n4\n4\n3\n")
        .assert()
        .success()
        .stdout(contains("One-round encryption"))
        .stdout(contains("Encoded round 1: "));
}

#[test]
fn encode_requires_message_first() {
    cmd()
        .write_stdin("1\n2\n3\n4\n4\n3\n")
        .assert()
        .success()
        .stdout(contains("Please enter a message first"));
}

#[test]
fn encode_rejects_even_grid_size() {
    // Grid size 4 is refused and the prompt repeats until 5 is given.
    cmd()
        .write_stdin("1\n1\nHELLO\n2\n1\n4\n5\n4\n4\n3\n")
        .assert()
        .success()
        .stdout(contains("Error: grid size 4 is even"))
        .stdout(contains("Please try again."));
}

#[test]
fn decode_known_cipher() {
    cmd()
        .write_stdin("2\n1\nQHQEOLQLQ\n2\n1\n3\n4\n3\n")
        .assert()
        .success()
        .stdout(contains("Decoded round 1: HELLO"));
}

#[test]
fn decode_prints_grid_rows() {
    cmd()
        .write_stdin("2\n1\nQHQEOLQLQ\n3\n4\n3\n")
        .assert()
        .success()
        .stdout(contains("Q H Q"))
        .stdout(contains("E O L"))
        .stdout(contains("Q L Q"));
}

#[test]
fn decode_rejects_non_square_input() {
    cmd()
        .write_stdin("2\n1\nABCDEFGHIJ\nQHQEOLQLQ\n4\n3\n")
        .assert()
        .success()
        .stdout(contains("must fill a whole square grid"));
}

#[test]
fn decode_rejects_invalid_characters() {
    cmd()
        .write_stdin("2\n1\nQHQ3OLQLQ\nQHQEOLQLQ\n4\n3\n")
        .assert()
        .success()
        .stdout(contains("invalid character '3'"));
}

#[test]
fn invalid_menu_choice_reprompts() {
    cmd()
        .write_stdin("9\n3\n")
        .assert()
        .success()
        .stdout(contains("Invalid choice. Please try again."));
}

#[test]
fn non_numeric_choice_reprompts() {
    cmd()
        .write_stdin("abc\n3\n")
        .assert()
        .success()
        .stdout(contains("Error: input must be a number"));
}

#[test]
fn multi_round_encode_runs_each_round() {
    cmd()
        .write_stdin("1\n1\nHELLOWORLD.\n3\n1\n2\n2\n3\n4\n3\n")
        .assert()
        .success()
        .stdout(contains("Encoded round 1: "))
        .stdout(contains("Encoded round 2: "));
}
