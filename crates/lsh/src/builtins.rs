//! Built-in commands. Grounded in `lsh_cd`/`lsh_help`/`lsh_exit` and the
//! parallel `builtin_str`/`builtin_func` tables from the tutorial: a small
//! fixed dispatch table checked before falling back to `execvp`-style
//! process spawning.

use std::env;

use crate::Status;

pub enum Builtin {
    Cd,
    Help,
    Exit,
}

pub fn lookup(name: &str) -> Option<Builtin> {
    match name {
        "cd" => Some(Builtin::Cd),
        "help" => Some(Builtin::Help),
        "exit" => Some(Builtin::Exit),
        _ => None,
    }
}

pub fn run(builtin: Builtin, args: &[String]) -> Status {
    match builtin {
        Builtin::Cd => {
            match args.get(1) {
                None => eprintln!("lsh: expected argument to \"cd\""),
                Some(dir) => {
                    if let Err(e) = env::set_current_dir(dir) {
                        eprintln!("lsh: cd: {e}");
                    }
                }
            }
            Status::Continue
        }
        Builtin::Help => {
            println!("lsh: a minimal shell");
            println!("Type program names and arguments, then hit enter.");
            println!("Built in commands:");
            println!("  cd");
            println!("  help");
            println!("  exit");
            Status::Continue
        }
        Builtin::Exit => Status::Exit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cd_without_argument_reports_an_error_but_keeps_running() {
        assert!(matches!(run(Builtin::Cd, &["cd".to_string()]), Status::Continue));
    }

    #[test]
    fn exit_signals_the_loop_to_stop() {
        assert!(matches!(run(Builtin::Exit, &["exit".to_string()]), Status::Exit));
    }

    #[test]
    fn lookup_recognizes_the_three_builtins_and_nothing_else() {
        assert!(matches!(lookup("cd"), Some(Builtin::Cd)));
        assert!(matches!(lookup("help"), Some(Builtin::Help)));
        assert!(matches!(lookup("exit"), Some(Builtin::Exit)));
        assert!(lookup("ls").is_none());
    }
}
