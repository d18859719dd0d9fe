//! A minimal command shell. Grounded in the classic `lsh` tutorial (see
//! `examples/original_source/Part-1/main.c`'s `lsh_loop` and the rest of
//! that series): read a line, split it into whitespace-delimited tokens,
//! dispatch to a built-in or spawn an external process, repeat until
//! `exit` or EOF.

use std::process::ExitCode;

mod builtins;
mod executor;
mod reader;
mod tokenizer;

pub enum Status {
    Continue,
    Exit,
}

fn main() -> ExitCode {
    loop {
        let line = match reader::read_line() {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("lsh: {e}");
                return ExitCode::FAILURE;
            }
        };

        let args = tokenizer::tokenize(&line);
        if args.is_empty() {
            continue;
        }

        match executor::execute(&args) {
            Status::Continue => {}
            Status::Exit => break,
        }
    }
    ExitCode::SUCCESS
}
