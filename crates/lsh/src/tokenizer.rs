//! Line tokenizing. Grounded in `lsh_split_line`: splits on the exact
//! delimiter set `" \t\r\n\x07"` (space, tab, CR, LF, BEL), not general
//! Unicode whitespace, and drops empty tokens the way repeated delimiters
//! would otherwise produce.

const DELIMITERS: [char; 5] = [' ', '\t', '\r', '\n', '\x07'];

pub fn tokenize(line: &str) -> Vec<String> {
    line.split(|c: char| DELIMITERS.contains(&c)).filter(|tok| !tok.is_empty()).map(str::to_string).collect()
}
