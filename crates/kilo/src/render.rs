//! Screen drawing. Grounded in `kilo.c`'s `editorRefreshScreen`/
//! `editorDrawRows`/`editorDrawStatusBar`/`editorDrawMessageBar`: the same
//! hide-cursor/home/draw/reposition/show-cursor sequence, coalesced into
//! one `AppendBuffer` and written with a single `write`.

use std::io::{self, Write};

use crate::append_buffer::AppendBuffer;
use crate::editor::Editor;
use crate::row::Row;
use crate::syntax::Highlight;

const VERSION: &str = "0.0.1";
/// Status messages older than this are no longer shown, per the message
/// bar's fading behavior.
const STATUS_MESSAGE_LIFETIME_SECS: u64 = 5;

pub fn refresh_screen(ed: &mut Editor, out: &mut impl Write) -> io::Result<()> {
    ed.scroll();

    let mut ab = AppendBuffer::new();
    ab.push(b"\x1b[?25l");
    ab.push(b"\x1b[H");

    draw_rows(ed, &mut ab);
    draw_status_bar(ed, &mut ab);
    draw_message_bar(ed, &mut ab);

    let cursor = format!("\x1b[{};{}H", (ed.cy - ed.rowoff) + 1, (ed.rx - ed.coloff) + 1);
    ab.push(cursor.as_bytes());
    ab.push(b"\x1b[?25h");

    out.write_all(ab.as_bytes())?;
    out.flush()
}

fn draw_rows(ed: &Editor, ab: &mut AppendBuffer) {
    for y in 0..ed.screenrows {
        let filerow = y + ed.rowoff;
        if filerow >= ed.rows.len() {
            if ed.rows.is_empty() && y == ed.screenrows / 3 {
                draw_welcome(ed, ab);
            } else {
                ab.push(b"~");
            }
        } else {
            draw_row(&ed.rows[filerow], ed.coloff, ed.screencols, ab);
        }
        ab.push(b"\x1b[K");
        ab.push(b"\r\n");
    }
}

fn draw_welcome(ed: &Editor, ab: &mut AppendBuffer) {
    let full = format!("Kilo editor -- version {VERSION}");
    let msg = if full.len() > ed.screencols { &full[..ed.screencols] } else { full.as_str() };
    let padding = ed.screencols.saturating_sub(msg.len());
    let mut left = padding / 2;
    if left > 0 {
        ab.push(b"~");
        left -= 1;
    }
    for _ in 0..left {
        ab.push(b" ");
    }
    ab.push(msg.as_bytes());
}

fn draw_row(row: &Row, coloff: usize, screencols: usize, ab: &mut AppendBuffer) {
    if coloff >= row.render.len() {
        return;
    }
    let end = (coloff + screencols).min(row.render.len());
    let mut current_color: Option<u8> = None;

    for i in coloff..end {
        let c = row.render[i];
        let hl = row.hl[i];

        if c.is_ascii_control() {
            let sym = if c <= 26 { b'@' + c } else { b'?' };
            ab.push(b"\x1b[7m");
            ab.push_byte(sym);
            ab.push(b"\x1b[m");
            if let Some(color) = current_color {
                ab.push(format!("\x1b[{color}m").as_bytes());
            }
            continue;
        }

        if hl == Highlight::Normal {
            if current_color.is_some() {
                ab.push(b"\x1b[39m");
                current_color = None;
            }
            ab.push_byte(c);
        } else {
            let color = hl.color();
            if current_color != Some(color) {
                ab.push(format!("\x1b[{color}m").as_bytes());
                current_color = Some(color);
            }
            ab.push_byte(c);
        }
    }
    ab.push(b"\x1b[39m");
}

fn draw_status_bar(ed: &Editor, ab: &mut AppendBuffer) {
    ab.push(b"\x1b[7m");

    let name = ed.filename.as_deref().unwrap_or("[No Name]");
    let name_bytes = name.as_bytes();
    let truncated = &name_bytes[..name_bytes.len().min(20)];
    let name = String::from_utf8_lossy(truncated);

    let mut status =
        format!("{name} - {} lines{}", ed.rows.len(), if ed.dirty != 0 { " (modified)" } else { "" });
    let syntax_name = ed.syntax.map_or("no ft", |s| s.name);
    let rstatus = format!("{syntax_name} | {}/{}", ed.cy + 1, ed.rows.len());

    status.truncate(ed.screencols);
    ab.push(status.as_bytes());

    let mut len = status.len();
    while len < ed.screencols {
        if ed.screencols - len == rstatus.len() {
            ab.push(rstatus.as_bytes());
            break;
        }
        ab.push(b" ");
        len += 1;
    }
    ab.push(b"\x1b[m");
    ab.push(b"\r\n");
}

fn draw_message_bar(ed: &Editor, ab: &mut AppendBuffer) {
    ab.push(b"\x1b[K");
    if !ed.statusmsg.is_empty()
        && ed.statusmsg_time.elapsed().as_secs() < STATUS_MESSAGE_LIFETIME_SECS
    {
        let mut msg = ed.statusmsg.clone();
        msg.truncate(ed.screencols);
        ab.push(msg.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ed_with_rows(lines: &[&str], screenrows: usize, screencols: usize) -> Editor {
        let mut ed = Editor::new(screenrows + 2, screencols);
        ed.rows = lines.iter().enumerate().map(|(i, l)| Row::new(i, l.as_bytes().to_vec())).collect();
        ed
    }

    #[test]
    fn refresh_screen_emits_cursor_hide_home_and_show() {
        let mut ed = ed_with_rows(&["hello"], 5, 20);
        let mut out = Vec::new();
        refresh_screen(&mut ed, &mut out).unwrap();
        assert!(out.starts_with(b"\x1b[?25l\x1b[H"));
        assert!(out.ends_with(b"\x1b[?25h"));
    }

    #[test]
    fn status_bar_shows_no_name_placeholder_for_unnamed_buffer() {
        let ed = ed_with_rows(&["a"], 5, 40);
        let mut ab = AppendBuffer::new();
        draw_status_bar(&ed, &mut ab);
        let text = String::from_utf8_lossy(ab.as_bytes());
        assert!(text.contains("[No Name]"));
        assert!(text.contains("1 lines"));
    }

    #[test]
    fn status_bar_truncates_long_filenames_to_twenty_bytes() {
        let mut ed = ed_with_rows(&["a"], 5, 60);
        ed.filename = Some("a".repeat(40));
        let mut ab = AppendBuffer::new();
        draw_status_bar(&ed, &mut ab);
        let text = String::from_utf8_lossy(ab.as_bytes());
        assert!(text.contains(&"a".repeat(20)));
        assert!(!text.contains(&"a".repeat(21)));
    }

    #[test]
    fn message_bar_hides_message_older_than_five_seconds() {
        let mut ed = ed_with_rows(&["a"], 5, 40);
        ed.statusmsg = "hi there".to_string();
        ed.statusmsg_time = std::time::Instant::now() - std::time::Duration::from_secs(6);
        let mut ab = AppendBuffer::new();
        draw_message_bar(&ed, &mut ab);
        assert!(!String::from_utf8_lossy(ab.as_bytes()).contains("hi there"));
    }
}
