//! Raw-mode termios handling, window-size queries and escape-sequence
//! decoding. Generalized from the teacher's nix/libc-based raw mode setup
//! (see `enable_raw_mode`/`disable_raw_mode` there) to also cover the key
//! decoder and window-size fallback that the teacher's early snapshot
//! hadn't gotten to yet.

use std::io::{self, Read, Write};
use std::mem;
use std::os::fd::RawFd;

use libc::{c_ushort, STDOUT_FILENO, TIOCGWINSZ};
use nix::{
    ioctl_read_bad,
    libc::{VMIN, VTIME},
    sys::termios::{
        tcgetattr, tcsetattr, ControlFlags, InputFlags, LocalFlags, OutputFlags, SetArg, Termios,
    },
};

use crate::error::{Error, Result};

ioctl_read_bad!(read_winsize, TIOCGWINSZ, winsize);

#[derive(Debug)]
#[repr(C)]
struct winsize {
    ws_row: c_ushort,
    ws_col: c_ushort,
    ws_xpixel: c_ushort,
    ws_ypixel: c_ushort,
}

/// A logical key, decoded from one or more bytes read from stdin.
///
/// Printable bytes, control-key bytes (`ctrl(k) = k & 0x1f`) and the
/// `BACKSPACE`/ENTER bytes all travel as `Key::Char`, exactly like the
/// underlying C `enum editorKey`; only the multi-byte VT/xterm sequences
/// get their own variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(u8),
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Home,
    End,
    Delete,
}

pub const BACKSPACE: u8 = 0x7f;
pub const ESC: u8 = 0x1b;
pub const ENTER: u8 = b'\r';

pub const fn ctrl_key(b: u8) -> u8 {
    b & 0x1f
}

/// Enable raw mode on `fd`, returning the original termios so the caller can
/// restore it later. Disables the input/output/local flags and sets the
/// VMIN/VTIME pair listed in the spec: a `read` call returns after at most
/// 100ms even if no byte has arrived.
pub fn enable_raw_mode(fd: RawFd) -> Result<Termios> {
    let orig_termios = tcgetattr(fd)?;
    let mut raw = orig_termios.clone();

    raw.input_flags &= !(InputFlags::BRKINT
        | InputFlags::ICRNL
        | InputFlags::INPCK
        | InputFlags::ISTRIP
        | InputFlags::IXON);
    raw.output_flags &= !(OutputFlags::OPOST);
    raw.local_flags &=
        !(LocalFlags::ECHO | LocalFlags::ICANON | LocalFlags::IEXTEN | LocalFlags::ISIG);
    raw.control_flags |= ControlFlags::CS8;
    raw.control_chars[VMIN] = 0;
    raw.control_chars[VTIME] = 1;

    tcsetattr(fd, SetArg::TCSAFLUSH, &raw)?;
    Ok(orig_termios)
}

/// Restore the terminal attributes captured by `enable_raw_mode`. Called on
/// every exit path, normal or fatal.
pub fn disable_raw_mode(fd: RawFd, orig_termios: &Termios) -> Result<()> {
    tcsetattr(fd, SetArg::TCSAFLUSH, orig_termios)?;
    Ok(())
}

/// Query the terminal's size in `(rows, cols)`. Prefers `TIOCGWINSZ`; if
/// that ioctl fails or reports a zero width, falls back to moving the
/// cursor to the bottom-right corner and parsing the cursor-position
/// report (`ESC [ 6 n` -> `ESC [ rows ; cols R`).
pub fn get_window_size() -> Result<(usize, usize)> {
    unsafe {
        let mut size: winsize = mem::zeroed();
        if read_winsize(STDOUT_FILENO, &mut size).is_ok() && size.ws_col != 0 {
            return Ok((size.ws_row as usize, size.ws_col as usize));
        }
    }
    get_window_size_by_cursor_report()
}

fn get_window_size_by_cursor_report() -> Result<(usize, usize)> {
    let mut stdout = io::stdout();
    // Push the cursor as far down-right as the terminal allows, then ask
    // where it ended up.
    stdout.write_all(b"\x1b[999C\x1b[999B")?;
    stdout.write_all(b"\x1b[6n")?;
    stdout.flush()?;

    let mut buf = [0u8; 32];
    let mut i = 0;
    let mut stdin = io::stdin();
    while i < buf.len() - 1 {
        let mut b = 0u8;
        if stdin.read(std::slice::from_mut(&mut b))? != 1 {
            break;
        }
        if b == b'R' {
            break;
        }
        buf[i] = b;
        i += 1;
    }

    let reply = std::str::from_utf8(&buf[..i]).map_err(|_| Error::WindowSize)?;
    let rest = reply.strip_prefix("\x1b[").ok_or(Error::WindowSize)?;
    let mut parts = rest.splitn(2, ';');
    let rows: usize = parts.next().ok_or(Error::WindowSize)?.parse().map_err(|_| Error::WindowSize)?;
    let cols: usize = parts.next().ok_or(Error::WindowSize)?.parse().map_err(|_| Error::WindowSize)?;
    Ok((rows, cols))
}

/// Read one byte from `stdin`, blocking until a byte arrives or a read
/// timeout (VTIME) expires with nothing read.
fn read_byte(stdin: &mut impl Read) -> io::Result<Option<u8>> {
    let mut b = 0u8;
    match stdin.read(std::slice::from_mut(&mut b))? {
        1 => Ok(Some(b)),
        _ => Ok(None),
    }
}

/// Block until a key is available, then decode it. Escape sequences are
/// read non-blockingly after the initial ESC: if the following bytes don't
/// arrive within the VTIME window, the sequence decodes as a literal ESC.
pub fn read_key(stdin: &mut impl Read) -> io::Result<Key> {
    let b = loop {
        if let Some(b) = read_byte(stdin)? {
            break b;
        }
    };

    if b != ESC {
        return Ok(Key::Char(b));
    }

    let Some(b1) = read_byte(stdin)? else {
        return Ok(Key::Char(ESC));
    };
    let Some(b2) = read_byte(stdin)? else {
        return Ok(Key::Char(ESC));
    };

    if b1 == b'[' {
        if b2.is_ascii_digit() {
            let Some(b3) = read_byte(stdin)? else {
                return Ok(Key::Char(ESC));
            };
            if b3 == b'~' {
                return Ok(match b2 {
                    b'1' | b'7' => Key::Home,
                    b'3' => Key::Delete,
                    b'4' | b'8' => Key::End,
                    b'5' => Key::PageUp,
                    b'6' => Key::PageDown,
                    _ => Key::Char(ESC),
                });
            }
            return Ok(Key::Char(ESC));
        }
        return Ok(match b2 {
            b'A' => Key::ArrowUp,
            b'B' => Key::ArrowDown,
            b'C' => Key::ArrowRight,
            b'D' => Key::ArrowLeft,
            b'H' => Key::Home,
            b'F' => Key::End,
            _ => Key::Char(ESC),
        });
    } else if b1 == b'O' {
        return Ok(match b2 {
            b'H' => Key::Home,
            b'F' => Key::End,
            _ => Key::Char(ESC),
        });
    }

    Ok(Key::Char(ESC))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn decodes_plain_byte() {
        let mut c = Cursor::new(vec![b'a']);
        assert_eq!(read_key(&mut c).unwrap(), Key::Char(b'a'));
    }

    #[test]
    fn decodes_standard_arrow_mapping() {
        // ESC [ C is the xterm-standard sequence for the right arrow.
        let mut c = Cursor::new(vec![ESC, b'[', b'C']);
        assert_eq!(read_key(&mut c).unwrap(), Key::ArrowRight);
        let mut c = Cursor::new(vec![ESC, b'[', b'D']);
        assert_eq!(read_key(&mut c).unwrap(), Key::ArrowLeft);
    }

    #[test]
    fn decodes_home_end_variants() {
        for seq in [vec![ESC, b'[', b'H'], vec![ESC, b'O', b'H'], vec![ESC, b'[', b'1', b'~'], vec![ESC, b'[', b'7', b'~']] {
            let mut c = Cursor::new(seq);
            assert_eq!(read_key(&mut c).unwrap(), Key::Home);
        }
        for seq in [vec![ESC, b'[', b'F'], vec![ESC, b'O', b'F'], vec![ESC, b'[', b'4', b'~'], vec![ESC, b'[', b'8', b'~']] {
            let mut c = Cursor::new(seq);
            assert_eq!(read_key(&mut c).unwrap(), Key::End);
        }
    }

    #[test]
    fn decodes_page_and_delete_keys() {
        let mut c = Cursor::new(vec![ESC, b'[', b'5', b'~']);
        assert_eq!(read_key(&mut c).unwrap(), Key::PageUp);
        let mut c = Cursor::new(vec![ESC, b'[', b'6', b'~']);
        assert_eq!(read_key(&mut c).unwrap(), Key::PageDown);
        let mut c = Cursor::new(vec![ESC, b'[', b'3', b'~']);
        assert_eq!(read_key(&mut c).unwrap(), Key::Delete);
    }

    #[test]
    fn incomplete_escape_sequence_decodes_as_literal_esc() {
        let mut c = Cursor::new(vec![ESC]);
        assert_eq!(read_key(&mut c).unwrap(), Key::Char(ESC));
    }

    #[test]
    fn ctrl_key_masks_top_three_bits() {
        assert_eq!(ctrl_key(b'q'), 17);
        assert_eq!(ctrl_key(b's'), 19);
        assert_eq!(ctrl_key(b'f'), 6);
    }
}
