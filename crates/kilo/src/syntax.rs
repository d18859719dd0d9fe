//! Syntax highlighting: the static language database and the single-pass
//! per-row scanner described in spec §4.4. Grounded directly in
//! `kilo.c`'s `editorUpdateSyntax`/`HLDB` (see
//! `examples/original_source/Part-2/kilo.c`), translated from the
//! `unsigned char *hl` byte array into a `Vec<Highlight>` and from the
//! `NULL`-terminated `char **keywords` into a `&'static [&'static str]`.

use std::path::Path;

/// Per-byte highlight classification, one tag per rendered byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Normal,
    Comment,
    MlComment,
    Keyword1,
    Keyword2,
    String,
    Number,
    Match,
}

impl Highlight {
    /// SGR foreground color code, per spec §4.6's color map.
    pub fn color(self) -> u8 {
        match self {
            Highlight::Number => 31,
            Highlight::Keyword2 => 32,
            Highlight::Keyword1 => 33,
            Highlight::Match => 34,
            Highlight::String => 35,
            Highlight::Comment | Highlight::MlComment => 36,
            Highlight::Normal => 39,
        }
    }
}

/// A language's syntax-highlighting configuration. Keywords ending in `|`
/// are "secondary" (rendered `Keyword2`); the trailing `|` is not part of
/// the matched text.
pub struct Syntax {
    pub name: &'static str,
    pub file_match: &'static [&'static str],
    pub keywords: &'static [&'static str],
    pub singleline_comment_start: &'static str,
    pub multiline_comment_start: &'static str,
    pub multiline_comment_end: &'static str,
    pub highlight_numbers: bool,
    pub highlight_strings: bool,
}

pub static HLDB: &[Syntax] = &[Syntax {
    name: "c",
    file_match: &[".c", ".h", ".cpp"],
    keywords: &[
        "switch", "if", "while", "for", "break", "continue", "return", "else", "struct", "union",
        "typedef", "static", "enum", "class", "case", "int|", "long|", "double|", "float|",
        "char|", "unsigned|", "signed|", "void|",
    ],
    singleline_comment_start: "//",
    multiline_comment_start: "/*",
    multiline_comment_end: "*/",
    highlight_numbers: true,
    highlight_strings: true,
}];

/// Select a syntax definition for `filename`: an entry matches if one of
/// its patterns starts with `.` and equals the filename's extension, or
/// does not start with `.` and appears as a substring of the filename.
/// First match in `HLDB` wins.
pub fn select_syntax(filename: &str) -> Option<&'static Syntax> {
    let ext = Path::new(filename).extension().and_then(|e| e.to_str()).map(|e| format!(".{e}"));
    HLDB.iter().find(|s| {
        s.file_match.iter().any(|pat| {
            if let Some(pat_ext) = pat.strip_prefix('.') {
                ext.as_deref().map(|e| &e[1..]) == Some(pat_ext)
            } else {
                filename.contains(pat)
            }
        })
    })
}

fn is_separator(c: u8) -> bool {
    c.is_ascii_whitespace() || c == 0 || b",.()+-/*=~%<>[];".contains(&c)
}

/// Scan `render` and produce its highlight tags, given the incoming
/// multi-line-comment state from the previous row. Returns `(hl,
/// hl_open_comment)`.
///
/// This is a straight byte-level port of `editorUpdateSyntax`: single
/// left-to-right pass, comment/string/number/keyword priority order, a
/// `prev_sep` flag driving keyword matches, all mirrored exactly.
pub fn highlight_row(
    render: &[u8],
    syntax: Option<&Syntax>,
    in_comment_at_start: bool,
) -> (Vec<Highlight>, bool) {
    let mut hl = vec![Highlight::Normal; render.len()];

    let Some(syntax) = syntax else {
        return (hl, false);
    };

    let scs = syntax.singleline_comment_start.as_bytes();
    let mcs = syntax.multiline_comment_start.as_bytes();
    let mce = syntax.multiline_comment_end.as_bytes();

    let mut prev_sep = true;
    let mut in_string: Option<u8> = None;
    let mut in_comment = in_comment_at_start;
    let mut i = 0;

    while i < render.len() {
        let c = render[i];
        let prev_hl = if i > 0 { hl[i - 1] } else { Highlight::Normal };

        if !scs.is_empty() && in_string.is_none() && !in_comment && render[i..].starts_with(scs) {
            for slot in &mut hl[i..] {
                *slot = Highlight::Comment;
            }
            break;
        }

        if !mcs.is_empty() && !mce.is_empty() && in_string.is_none() {
            if in_comment {
                hl[i] = Highlight::MlComment;
                if render[i..].starts_with(mce) {
                    for slot in &mut hl[i..i + mce.len()] {
                        *slot = Highlight::MlComment;
                    }
                    i += mce.len();
                    in_comment = false;
                    prev_sep = true;
                    continue;
                }
                i += 1;
                continue;
            } else if render[i..].starts_with(mcs) {
                for slot in &mut hl[i..i + mcs.len()] {
                    *slot = Highlight::MlComment;
                }
                i += mcs.len();
                in_comment = true;
                continue;
            }
        }

        if syntax.highlight_strings {
            if let Some(quote) = in_string {
                hl[i] = Highlight::String;
                if c == b'\\' && i + 1 < render.len() {
                    hl[i + 1] = Highlight::String;
                    i += 2;
                    continue;
                }
                if c == quote {
                    in_string = None;
                }
                prev_sep = true;
                i += 1;
                continue;
            } else if c == b'"' || c == b'\'' {
                in_string = Some(c);
                hl[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        if syntax.highlight_numbers
            && ((c.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
                || (c == b'.' && prev_hl == Highlight::Number))
        {
            hl[i] = Highlight::Number;
            prev_sep = false;
            i += 1;
            continue;
        }

        if prev_sep {
            let matched = syntax.keywords.iter().find_map(|kw| {
                let kw2 = kw.ends_with('|');
                let text = if kw2 { &kw[..kw.len() - 1] } else { kw };
                let klen = text.len();
                let text = text.as_bytes();
                if render[i..].starts_with(text)
                    && render.get(i + klen).copied().map_or(true, is_separator)
                {
                    Some((klen, kw2))
                } else {
                    None
                }
            });
            if let Some((klen, kw2)) = matched {
                let tag = if kw2 { Highlight::Keyword2 } else { Highlight::Keyword1 };
                for slot in &mut hl[i..i + klen] {
                    *slot = tag;
                }
                i += klen;
                prev_sep = false;
                continue;
            }
        }

        prev_sep = is_separator(c);
        i += 1;
    }

    (hl, in_comment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c_syntax() -> &'static Syntax {
        &HLDB[0]
    }

    #[test]
    fn selects_by_extension() {
        assert!(select_syntax("main.c").is_some());
        assert!(select_syntax("header.h").is_some());
        assert!(select_syntax("main.rs").is_none());
    }

    #[test]
    fn keyword_and_type_classes() {
        let (hl, open) = highlight_row(b"int a = 1;", Some(c_syntax()), false);
        assert_eq!(&hl[0..3], &[Highlight::Keyword2; 3]);
        assert_eq!(hl[8], Highlight::Number);
        assert!(!open);
    }

    #[test]
    fn single_line_comment_runs_to_end_of_row() {
        let (hl, _) = highlight_row(b"x; // comment", Some(c_syntax()), false);
        assert_eq!(hl[3], Highlight::Comment);
        assert_eq!(*hl.last().unwrap(), Highlight::Comment);
    }

    #[test]
    fn multiline_comment_propagates_open_state() {
        let (hl0, open0) = highlight_row(b"int a = 1; /*", Some(c_syntax()), false);
        assert!(open0);
        assert_eq!(hl0[0], Highlight::Keyword2);
        let (hl1, open1) = highlight_row(b"still comment", Some(c_syntax()), open0);
        assert!(hl1.iter().all(|&h| h == Highlight::MlComment));
        assert!(open1);
        let (hl2, open2) = highlight_row(b"still*/ int b;", Some(c_syntax()), open1);
        assert!(!open2);
        assert_eq!(&hl2[0..7], &[Highlight::MlComment; 7]);
        assert_eq!(hl2[8], Highlight::Keyword2);
    }

    #[test]
    fn string_escapes_do_not_end_the_string() {
        let (hl, _) = highlight_row(br#""a\"b""#, Some(c_syntax()), false);
        assert!(hl.iter().all(|&h| h == Highlight::String));
    }

    #[test]
    fn no_syntax_means_all_normal() {
        let (hl, open) = highlight_row(b"int a = 1;", None, false);
        assert!(hl.iter().all(|&h| h == Highlight::Normal));
        assert!(!open);
    }
}
