//! Incremental search. Grounded directly in `kilo.c`'s `editorFindCallback`
//! / `editorFind`: same last-match/direction state, same snapshot-and-restore
//! of the matched row's highlight array, same wraparound scan order. The
//! only change is byte-slice search instead of `strstr` and an explicit
//! `FindKey` enum instead of re-inspecting raw key codes.

use crate::row::Row;
use crate::syntax::Highlight;

/// The subset of key input the search prompt reacts to specially; anything
/// else (ordinary typing, backspace) is `Other` and just restarts the scan
/// from the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindKey {
    Enter,
    Escape,
    ArrowRight,
    ArrowDown,
    ArrowLeft,
    ArrowUp,
    Other,
}

pub struct Match {
    pub row: usize,
    pub cx: usize,
}

/// Search session state, owned by the prompt loop for the lifetime of one
/// `Ctrl-F` invocation.
#[derive(Default)]
pub struct Search {
    last_match: Option<usize>,
    direction: isize,
    saved_hl: Option<(usize, Vec<Highlight>)>,
}

impl Search {
    pub fn new() -> Self {
        Self { last_match: None, direction: 1, saved_hl: None }
    }

    /// Undo the highlight override from the previous step, if any. Called
    /// at the start of every step and again when the prompt exits, so a
    /// cancelled or finished search never leaves stray `Match` highlights
    /// behind.
    pub fn restore(&mut self, rows: &mut [Row]) {
        if let Some((idx, hl)) = self.saved_hl.take() {
            if let Some(row) = rows.get_mut(idx) {
                row.hl = hl;
            }
        }
    }

    /// Advance the search by one prompt keystroke. Returns the row/column to
    /// jump the cursor to on a hit, or `None` on miss, cancel or confirm.
    pub fn step(&mut self, rows: &mut [Row], query: &str, key: FindKey) -> Option<Match> {
        self.restore(rows);

        match key {
            FindKey::Enter | FindKey::Escape => {
                self.last_match = None;
                self.direction = 1;
                return None;
            }
            FindKey::ArrowRight | FindKey::ArrowDown => self.direction = 1,
            FindKey::ArrowLeft | FindKey::ArrowUp => self.direction = -1,
            FindKey::Other => {
                self.last_match = None;
                self.direction = 1;
            }
        }

        if query.is_empty() || rows.is_empty() {
            return None;
        }

        let n = rows.len() as isize;
        let mut current = self.last_match.map_or(rows.len() - 1, |m| m as isize as usize);
        for _ in 0..rows.len() {
            let signed = current as isize + self.direction;
            current = signed.rem_euclid(n) as usize;

            if let Some(pos) = find_bytes(&rows[current].render, query.as_bytes()) {
                self.last_match = Some(current);
                let row = &mut rows[current];
                let cx = row.rx_to_cx(pos);
                self.saved_hl = Some((current, row.hl.clone()));
                let end = (pos + query.len()).min(row.hl.len());
                for slot in &mut row.hl[pos..end] {
                    *slot = Highlight::Match;
                }
                return Some(Match { row: current, cx });
            }
        }
        None
    }
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(lines: &[&str]) -> Vec<Row> {
        lines.iter().enumerate().map(|(i, l)| Row::new(i, l.as_bytes().to_vec())).collect()
    }

    #[test]
    fn finds_first_match_on_typed_query() {
        let mut rs = rows(&["hello world", "goodbye world"]);
        let mut s = Search::new();
        let m = s.step(&mut rs, "world", FindKey::Other).unwrap();
        assert_eq!(m.row, 0);
        assert_eq!(m.cx, 6);
        assert_eq!(rs[0].hl[6], Highlight::Match);
    }

    #[test]
    fn arrow_down_advances_to_next_match_and_restores_previous_highlight() {
        let mut rs = rows(&["world", "world"]);
        let mut s = Search::new();
        s.step(&mut rs, "world", FindKey::Other).unwrap();
        let m = s.step(&mut rs, "world", FindKey::ArrowDown).unwrap();
        assert_eq!(m.row, 1);
        assert!(rs[0].hl.iter().all(|&h| h != Highlight::Match));
    }

    #[test]
    fn search_wraps_around_with_arrow_up() {
        let mut rs = rows(&["match", "nothing", "nothing"]);
        let mut s = Search::new();
        s.step(&mut rs, "match", FindKey::Other).unwrap();
        let m = s.step(&mut rs, "match", FindKey::ArrowUp).unwrap();
        assert_eq!(m.row, 0);
    }

    #[test]
    fn escape_clears_state_and_reports_no_match() {
        let mut rs = rows(&["hello world"]);
        let mut s = Search::new();
        s.step(&mut rs, "world", FindKey::Other).unwrap();
        assert!(s.step(&mut rs, "world", FindKey::Escape).is_none());
        assert!(rs[0].hl.iter().all(|&h| h != Highlight::Match));
    }

    #[test]
    fn empty_query_finds_nothing() {
        let mut rs = rows(&["hello world"]);
        let mut s = Search::new();
        assert!(s.step(&mut rs, "", FindKey::Other).is_none());
    }
}
