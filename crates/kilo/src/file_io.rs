//! Load/save of the row store. Grounded in `kilo.c`'s `editorOpen`/
//! `editorSave` (see `examples/original_source/Part-2/kilo.c`): `getline`'s
//! newline-splitting and trailing-`\r`/`\n` stripping on load, and a single
//! truncate-then-write on save (`O_TRUNC`, not write-temp-then-rename — see
//! the tradeoff note in DESIGN.md).

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use crate::row::Row;

/// Read `path` and split it into rows. An empty file yields zero rows, not
/// one empty row, matching `getline` returning `-1` immediately at EOF.
pub fn open(path: &Path) -> io::Result<Vec<Row>> {
    let contents = fs::read(path)?;
    Ok(split_lines(&contents))
}

fn split_lines(contents: &[u8]) -> Vec<Row> {
    if contents.is_empty() {
        return Vec::new();
    }
    let mut lines: Vec<&[u8]> = contents.split(|&b| b == b'\n').collect();
    if contents.ends_with(b"\n") {
        lines.pop();
    }
    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let line = if line.ends_with(b"\r") { &line[..line.len() - 1] } else { line };
            Row::new(i, line.to_vec())
        })
        .collect()
}

/// Write every row to `path`, one `\n`-terminated line each, truncating any
/// existing content. Returns the number of bytes written, for the status
/// message.
pub fn save(path: &Path, rows: &[Row]) -> io::Result<usize> {
    let mut buf = Vec::new();
    for row in rows {
        buf.extend_from_slice(&row.chars);
        buf.push(b'\n');
    }
    let mut file = OpenOptions::new().write(true).create(true).truncate(true).mode(0o644).open(path)?;
    file.write_all(&buf)?;
    Ok(buf.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn open_splits_on_newlines_and_strips_crlf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.txt");
        fs::write(&path, b"one\r\ntwo\nthree").unwrap();
        let rows = open(&path).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].chars, b"one");
        assert_eq!(rows[1].chars, b"two");
        assert_eq!(rows[2].chars, b"three");
    }

    #[test]
    fn open_on_empty_file_yields_no_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::File::create(&path).unwrap();
        assert!(open(&path).unwrap().is_empty());
    }

    #[test]
    fn trailing_newline_does_not_produce_a_spurious_empty_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.txt");
        fs::write(&path, b"one\ntwo\n").unwrap();
        assert_eq!(open(&path).unwrap().len(), 2);
    }

    #[test]
    fn save_writes_newline_terminated_rows_and_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        {
            let mut f = fs::File::create(&path).unwrap();
            f.write_all(b"stale content that must not survive").unwrap();
        }
        let rows = vec![Row::new(0, b"hello".to_vec()), Row::new(1, b"world".to_vec())];
        let n = save(&path, &rows).unwrap();
        let written = fs::read(&path).unwrap();
        assert_eq!(written, b"hello\nworld\n");
        assert_eq!(n, written.len());
    }
}
