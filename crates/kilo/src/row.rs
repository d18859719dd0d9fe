//! The row store: one logical line of the buffer, its tab-expanded render
//! form, and its per-byte highlight tags. Grounded in `kilo.c`'s `erow` /
//! `editorUpdateRow` / `editorRowCxToRx` / `editorRowRxToCx`
//! (`examples/original_source/Part-2/kilo.c`), translated from raw
//! `malloc`'d buffers into owned `Vec<u8>`s.

use crate::syntax::{highlight_row, Highlight, Syntax};

pub const TAB_STOP: usize = 8;

/// One logical line: `idx` is kept in sync with the row's position in the
/// owning `Vec<Row>` by every insert/delete in `crate::editor`.
pub struct Row {
    pub idx: usize,
    pub chars: Vec<u8>,
    pub render: Vec<u8>,
    pub hl: Vec<Highlight>,
    pub hl_open_comment: bool,
}

impl Row {
    pub fn new(idx: usize, chars: Vec<u8>) -> Self {
        let mut row = Self { idx, chars, render: Vec::new(), hl: Vec::new(), hl_open_comment: false };
        row.update(None, false);
        row
    }

    /// Rebuild `render` from `chars` (tab expansion) and re-run the
    /// highlighter. Returns whether `hl_open_comment` changed, so the
    /// caller knows whether to keep propagating to the next row.
    ///
    /// Incremental search paints `Highlight::Match` directly into `hl`
    /// after this runs and restores the snapshot it took beforehand; `update`
    /// itself never needs to know about matches.
    pub fn update(&mut self, syntax: Option<&Syntax>, in_comment_at_start: bool) -> bool {
        self.render = expand_tabs(&self.chars);
        let (hl, open) = highlight_row(&self.render, syntax, in_comment_at_start);
        self.hl = hl;
        let changed = self.hl_open_comment != open;
        self.hl_open_comment = open;
        changed
    }

    /// Convert a logical character index into a rendered column index,
    /// expanding tabs along the way.
    pub fn cx_to_rx(&self, cx: usize) -> usize {
        let mut rx = 0;
        for &c in &self.chars[..cx.min(self.chars.len())] {
            if c == b'\t' {
                rx += (TAB_STOP - 1) - (rx % TAB_STOP);
            }
            rx += 1;
        }
        rx
    }

    /// Inverse of `cx_to_rx`: the largest logical index whose rendered
    /// column does not exceed `rx`.
    pub fn rx_to_cx(&self, rx: usize) -> usize {
        let mut cur_rx = 0;
        for (cx, &c) in self.chars.iter().enumerate() {
            if c == b'\t' {
                cur_rx += (TAB_STOP - 1) - (cur_rx % TAB_STOP);
            }
            cur_rx += 1;
            if cur_rx > rx {
                return cx;
            }
        }
        self.chars.len()
    }

    pub fn size(&self) -> usize {
        self.chars.len()
    }

    /// Insert byte `c` at `at`, clamped to `[0, size]`.
    pub fn insert_char(&mut self, at: usize, c: u8) {
        let at = at.min(self.chars.len());
        self.chars.insert(at, c);
    }

    /// Remove the byte at `at`, a no-op if out of range.
    pub fn delete_char(&mut self, at: usize) {
        if at < self.chars.len() {
            self.chars.remove(at);
        }
    }

    pub fn append_string(&mut self, s: &[u8]) {
        self.chars.extend_from_slice(s);
    }
}

fn expand_tabs(chars: &[u8]) -> Vec<u8> {
    let mut render = Vec::with_capacity(chars.len());
    for &c in chars {
        if c == b'\t' {
            render.push(b' ');
            while render.len() % TAB_STOP != 0 {
                render.push(b' ');
            }
        } else {
            render.push(c);
        }
    }
    render
}
