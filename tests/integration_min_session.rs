// Drives the compiled binary through a PTY: home screen, start a game,
// shoot once, then quit.
//
// Notes:
// - Requires a TTY; uses expectrl which allocates a pseudo terminal.
// - Unix-only and ignored by default.
// - Run manually via: `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn start_shoot_and_quit() -> Result<(), Box<dyn std::error::Error>> {
    let bin = assert_cmd::cargo::cargo_bin("typoslinger");
    let cmd = format!("{} --language en --seed 7 --no-save", bin.display());

    let mut p = spawn(cmd)?;
    std::thread::sleep(Duration::from_millis(200));

    // Enter starts the game, 3 shoots the third word ("road")
    p.send("\r")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("3")?;
    std::thread::sleep(Duration::from_millis(100));

    // ESC abandons to home, q quits
    p.send("\x1b")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("q")?;

    p.expect(Eof)?;
    Ok(())
}

#[test]
fn non_tty_stdin_is_rejected() {
    assert_cmd::Command::cargo_bin("typoslinger")
        .unwrap()
        .arg("--no-save")
        .write_stdin("")
        .assert()
        .failure();
}
