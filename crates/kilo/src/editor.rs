//! Editor state and the keypress dispatcher. Grounded in `kilo.c`'s global
//! `struct editorConfig E` and `editorProcessKeypress`/`editorMoveCursor`/
//! `editorScroll`/`editorRowInsertChar` family (see
//! `examples/original_source/Part-2/kilo.c`); the global `E` becomes an
//! owned `Editor` value threaded explicitly through every call instead of
//! living in a static.

use std::io::{self, Read, Write};
use std::path::Path;
use std::time::Instant;

use crate::file_io;
use crate::prompt;
use crate::row::Row;
use crate::search::{self, FindKey};
use crate::syntax::{self, Syntax};
use crate::terminal::{self, ctrl_key, Key};

pub const KILO_QUIT_TIMES: u8 = 3;

pub struct Editor {
    pub cx: usize,
    pub cy: usize,
    pub rx: usize,
    pub rowoff: usize,
    pub coloff: usize,
    pub screenrows: usize,
    pub screencols: usize,
    pub rows: Vec<Row>,
    pub dirty: usize,
    pub filename: Option<String>,
    pub syntax: Option<&'static Syntax>,
    pub statusmsg: String,
    pub statusmsg_time: Instant,
    pub quit_times: u8,
}

pub enum Outcome {
    Continue,
    Quit,
}

impl Editor {
    pub fn new(screenrows: usize, screencols: usize) -> Self {
        Self {
            cx: 0,
            cy: 0,
            rx: 0,
            rowoff: 0,
            coloff: 0,
            // The last screen row is reserved for the status bar and the
            // row above it for the message bar.
            screenrows: screenrows.saturating_sub(2),
            screencols,
            rows: Vec::new(),
            dirty: 0,
            filename: None,
            syntax: None,
            statusmsg: String::new(),
            statusmsg_time: Instant::now(),
            quit_times: KILO_QUIT_TIMES,
        }
    }

    pub fn open(&mut self, filename: &str) -> io::Result<()> {
        self.syntax = syntax::select_syntax(filename);
        self.rows = file_io::open(Path::new(filename))?;
        for i in 0..self.rows.len() {
            self.update_row(i);
        }
        self.filename = Some(filename.to_string());
        self.dirty = 0;
        Ok(())
    }

    pub fn set_status_message(&mut self, msg: String) {
        self.statusmsg = msg;
        self.statusmsg_time = Instant::now();
    }

    /// Recompute `render`/`hl` for row `at`, then cascade to the next row if
    /// its incoming multi-line-comment state changed.
    fn update_row(&mut self, at: usize) {
        let in_comment = if at == 0 { false } else { self.rows[at - 1].hl_open_comment };
        let changed = self.rows[at].update(self.syntax, in_comment);
        if changed && at + 1 < self.rows.len() {
            self.update_row(at + 1);
        }
    }

    fn insert_row(&mut self, at: usize, chars: Vec<u8>) {
        let at = at.min(self.rows.len());
        self.rows.insert(at, Row::new(at, chars));
        for row in &mut self.rows[at + 1..] {
            row.idx += 1;
        }
        self.update_row(at);
        self.dirty += 1;
    }

    fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            return;
        }
        self.rows.remove(at);
        for row in &mut self.rows[at..] {
            row.idx -= 1;
        }
        self.dirty += 1;
    }

    pub fn insert_char(&mut self, c: u8) {
        if self.cy == self.rows.len() {
            self.insert_row(self.rows.len(), Vec::new());
        }
        self.rows[self.cy].insert_char(self.cx, c);
        self.update_row(self.cy);
        self.cx += 1;
        self.dirty += 1;
    }

    pub fn insert_newline(&mut self) {
        if self.cx == 0 {
            self.insert_row(self.cy, Vec::new());
        } else {
            let cx = self.cx.min(self.rows[self.cy].chars.len());
            let tail = self.rows[self.cy].chars.split_off(cx);
            self.update_row(self.cy);
            self.insert_row(self.cy + 1, tail);
        }
        self.cy += 1;
        self.cx = 0;
    }

    pub fn delete_char(&mut self) {
        if self.cy == self.rows.len() || (self.cx == 0 && self.cy == 0) {
            return;
        }
        if self.cx > 0 {
            self.rows[self.cy].delete_char(self.cx - 1);
            self.update_row(self.cy);
            self.cx -= 1;
            self.dirty += 1;
        } else {
            let prev_len = self.rows[self.cy - 1].size();
            let tail = self.rows[self.cy].chars.clone();
            self.rows[self.cy - 1].append_string(&tail);
            self.update_row(self.cy - 1);
            self.delete_row(self.cy);
            self.cy -= 1;
            self.cx = prev_len;
        }
    }

    pub fn move_cursor(&mut self, key: Key) {
        match key {
            Key::ArrowLeft => {
                if self.cx != 0 {
                    self.cx -= 1;
                } else if self.cy > 0 {
                    self.cy -= 1;
                    self.cx = self.rows[self.cy].size();
                }
            }
            Key::ArrowRight => {
                if let Some(row) = self.rows.get(self.cy) {
                    if self.cx < row.size() {
                        self.cx += 1;
                    } else if self.cx == row.size() {
                        self.cy += 1;
                        self.cx = 0;
                    }
                }
            }
            Key::ArrowUp => {
                if self.cy > 0 {
                    self.cy -= 1;
                }
            }
            Key::ArrowDown => {
                if self.cy < self.rows.len() {
                    self.cy += 1;
                }
            }
            _ => {}
        }
        let rowlen = self.rows.get(self.cy).map_or(0, Row::size);
        if self.cx > rowlen {
            self.cx = rowlen;
        }
    }

    /// Clamp `rowoff`/`coloff` so the cursor stays inside the visible
    /// viewport, and recompute `rx` from `cx`.
    pub fn scroll(&mut self) {
        self.rx = self.rows.get(self.cy).map_or(0, |row| row.cx_to_rx(self.cx));

        if self.cy < self.rowoff {
            self.rowoff = self.cy;
        }
        if self.cy >= self.rowoff + self.screenrows {
            self.rowoff = self.cy - self.screenrows + 1;
        }
        if self.rx < self.coloff {
            self.coloff = self.rx;
        }
        if self.rx >= self.coloff + self.screencols {
            self.coloff = self.rx - self.screencols + 1;
        }
    }

    pub fn save(&mut self, stdin: &mut impl Read, stdout: &mut impl Write) -> io::Result<()> {
        if self.filename.is_none() {
            let name = prompt::prompt(
                self,
                stdin,
                stdout,
                "Save as: {} (ESC to cancel)",
                None::<fn(&mut Editor, &str, Key)>,
            )?;
            match name {
                Some(n) if !n.is_empty() => {
                    self.syntax = syntax::select_syntax(&n);
                    self.filename = Some(n);
                    for i in 0..self.rows.len() {
                        self.update_row(i);
                    }
                }
                _ => {
                    self.set_status_message("Save aborted".to_string());
                    return Ok(());
                }
            }
        }

        let filename = self.filename.clone().expect("filename set above");
        match file_io::save(Path::new(&filename), &self.rows) {
            Ok(n) => {
                self.dirty = 0;
                self.set_status_message(format!("{n} bytes written to disk"));
            }
            Err(e) => {
                self.set_status_message(format!("Can't save! I/O error: {e}"));
            }
        }
        Ok(())
    }

    pub fn find(&mut self, stdin: &mut impl Read, stdout: &mut impl Write) -> io::Result<()> {
        let saved = (self.cx, self.cy, self.coloff, self.rowoff);
        let mut search = search::Search::new();

        let query = prompt::prompt(
            self,
            stdin,
            stdout,
            "Search: {} (Use ESC/Arrows/Enter)",
            Some(|ed: &mut Editor, query: &str, key: Key| {
                if let Some(m) = search.step(&mut ed.rows, query, to_find_key(key)) {
                    ed.cy = m.row;
                    ed.cx = m.cx;
                    ed.rowoff = ed.rows.len();
                }
            }),
        )?;

        if query.is_none() {
            self.cx = saved.0;
            self.cy = saved.1;
            self.coloff = saved.2;
            self.rowoff = saved.3;
        }
        Ok(())
    }

    pub fn process_keypress(&mut self, stdin: &mut impl Read, stdout: &mut impl Write) -> io::Result<Outcome> {
        let key = terminal::read_key(stdin)?;

        match key {
            Key::Char(c) if c == terminal::ENTER => self.insert_newline(),
            Key::Char(c) if c == ctrl_key(b'q') => {
                if self.dirty != 0 && self.quit_times > 0 {
                    self.set_status_message(format!(
                        "WARNING!!! File has unsaved changes. Press Ctrl-Q {} more times to quit.",
                        self.quit_times
                    ));
                    self.quit_times -= 1;
                    return Ok(Outcome::Continue);
                }
                return Ok(Outcome::Quit);
            }
            Key::Char(c) if c == ctrl_key(b's') => self.save(stdin, stdout)?,
            Key::Home => self.cx = 0,
            Key::End => {
                if let Some(row) = self.rows.get(self.cy) {
                    self.cx = row.size();
                }
            }
            Key::Char(c) if c == ctrl_key(b'f') => self.find(stdin, stdout)?,
            Key::Char(c) if c == terminal::BACKSPACE || c == ctrl_key(b'h') => self.delete_char(),
            Key::Delete => {
                self.move_cursor(Key::ArrowRight);
                self.delete_char();
            }
            Key::PageUp | Key::PageDown => {
                if key == Key::PageUp {
                    self.cy = self.rowoff;
                } else {
                    self.cy = (self.rowoff + self.screenrows).saturating_sub(1).min(self.rows.len());
                }
                let dir = if key == Key::PageUp { Key::ArrowUp } else { Key::ArrowDown };
                for _ in 0..self.screenrows {
                    self.move_cursor(dir);
                }
            }
            Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight => self.move_cursor(key),
            Key::Char(c) if c == ctrl_key(b'l') || c == terminal::ESC => {}
            Key::Char(c) => self.insert_char(c),
        }

        self.quit_times = KILO_QUIT_TIMES;
        Ok(Outcome::Continue)
    }
}

fn to_find_key(key: Key) -> FindKey {
    match key {
        Key::Char(c) if c == terminal::ENTER => FindKey::Enter,
        Key::Char(c) if c == terminal::ESC => FindKey::Escape,
        Key::ArrowRight => FindKey::ArrowRight,
        Key::ArrowDown => FindKey::ArrowDown,
        Key::ArrowLeft => FindKey::ArrowLeft,
        Key::ArrowUp => FindKey::ArrowUp,
        _ => FindKey::Other,
    }
}
