//! Command execution. Grounded in `lsh_launch`'s fork/execvp/waitpid, but
//! replaced with `std::process::Command`'s spawn-and-wait: forking a
//! process that has already opened buffered stdio (as every `lsh_loop`
//! iteration here has) risks the child flushing or re-flushing the
//! parent's buffers, which `Command` avoids entirely by execing directly
//! with no intervening fork in the calling process.

use std::process::Command;

use crate::builtins;
use crate::Status;

pub fn execute(args: &[String]) -> Status {
    let Some(program) = args.first() else {
        return Status::Continue;
    };

    if let Some(builtin) = builtins::lookup(program) {
        return builtins::run(builtin, args);
    }

    match Command::new(program).args(&args[1..]).status() {
        Ok(status) => {
            if !status.success() {
                if let Some(code) = status.code() {
                    eprintln!("lsh: {program}: exited with status {code}");
                }
            }
        }
        Err(e) => eprintln!("lsh: {program}: {e}"),
    }
    Status::Continue
}
