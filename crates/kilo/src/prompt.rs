//! The generic status-bar prompt. Grounded in `kilo.c`'s `editorPrompt`:
//! an edit loop over a growable buffer, redrawing the screen every
//! keystroke so the prompt text is visible, with an optional callback that
//! lets callers (incremental search) react to each keystroke without the
//! prompt needing to know anything about them.

use std::io::{self, Read, Write};

use crate::editor::Editor;
use crate::render;
use crate::terminal::{self, Key};

/// Run an interactive prompt. `prompt_fmt` must contain one `{}`, replaced
/// by the text typed so far, and is shown in the status bar. Returns
/// `Some(text)` on Enter with non-empty text, `None` on Escape.
pub fn prompt<F>(
    ed: &mut Editor,
    stdin: &mut impl Read,
    stdout: &mut impl Write,
    prompt_fmt: &str,
    mut callback: Option<F>,
) -> io::Result<Option<String>>
where
    F: FnMut(&mut Editor, &str, Key),
{
    let mut buf = String::new();

    loop {
        ed.set_status_message(prompt_fmt.replacen("{}", &buf, 1));
        render::refresh_screen(ed, stdout)?;

        let key = terminal::read_key(stdin)?;

        match key {
            Key::Char(c) if c == terminal::BACKSPACE || c == terminal::ctrl_key(b'h') => {
                buf.pop();
            }
            Key::Delete => {
                buf.pop();
            }
            Key::Char(c) if c == terminal::ESC => {
                ed.set_status_message(String::new());
                if let Some(cb) = callback.as_mut() {
                    cb(ed, &buf, key);
                }
                return Ok(None);
            }
            Key::Char(c) if c == terminal::ENTER => {
                if !buf.is_empty() {
                    ed.set_status_message(String::new());
                    if let Some(cb) = callback.as_mut() {
                        cb(ed, &buf, key);
                    }
                    return Ok(Some(buf));
                }
            }
            Key::Char(c) if !c.is_ascii_control() && c < 128 => {
                buf.push(c as char);
            }
            _ => {}
        }

        if let Some(cb) = callback.as_mut() {
            cb(ed, &buf, key);
        }
    }
}
