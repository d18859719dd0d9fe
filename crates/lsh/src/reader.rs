//! Prompt and line reading. Grounded in the classic `lsh_read_line`
//! (`examples/original_source/Part-1/main.c` and the rest of that tutorial's
//! `lsh_loop`): print the prompt, read one line, treat EOF the same as the
//! `exit` built-in.

use std::io::{self, Write};

/// Print the prompt and read one line of input. `Ok(None)` means EOF (stdin
/// closed), which the caller treats like an explicit `exit`.
pub fn read_line() -> io::Result<Option<String>> {
    print!("> ");
    io::stdout().flush()?;

    let mut line = String::new();
    let bytes_read = io::stdin().read_line(&mut line)?;
    if bytes_read == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
