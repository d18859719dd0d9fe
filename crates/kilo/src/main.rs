//! A minimalist VT100/ANSI terminal text editor. Grounded in the classic
//! `kilo.c` (see `examples/original_source/Part-2/kilo.c`): raw mode on
//! entry, a redraw-then-read-key loop, raw mode restored on every exit
//! path including fatal errors.

use std::env;
use std::io::{self, Write};
use std::os::fd::AsRawFd;
use std::process::ExitCode;

mod append_buffer;
mod editor;
mod error;
mod file_io;
mod prompt;
mod render;
mod row;
mod search;
mod syntax;
mod terminal;

use editor::{Editor, Outcome};
use error::Result;

fn run() -> Result<()> {
    let stdin_fd = io::stdin().as_raw_fd();
    let orig_termios = terminal::enable_raw_mode(stdin_fd)?;

    let result = (|| -> Result<()> {
        let (rows, cols) = terminal::get_window_size()?;
        let mut ed = Editor::new(rows, cols);

        if let Some(filename) = env::args().nth(1) {
            ed.open(&filename)?;
        }

        ed.set_status_message("HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find".to_string());

        let mut stdin = io::stdin();
        let mut stdout = io::stdout();
        loop {
            render::refresh_screen(&mut ed, &mut stdout)?;
            match ed.process_keypress(&mut stdin, &mut stdout)? {
                Outcome::Continue => {}
                Outcome::Quit => break,
            }
        }

        stdout.write_all(b"\x1b[2J\x1b[H")?;
        stdout.flush()?;
        Ok(())
    })();

    // Restore the terminal regardless of whether the editor loop above
    // exited cleanly or with an error.
    terminal::disable_raw_mode(stdin_fd, &orig_termios)?;
    result
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Mirrors kilo.c's `die()`: clear the screen and home the cursor
            // before reporting, so a fatal error never leaves the terminal
            // mid-frame. Raw mode has already been restored by `run`.
            let _ = io::stdout().write_all(b"\x1b[2J\x1b[H");
            let _ = io::stdout().flush();
            eprintln!("kilo: {e}");
            ExitCode::FAILURE
        }
    }
}
