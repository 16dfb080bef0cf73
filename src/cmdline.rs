use crate::environment::Environment;
use crate::interpreter;
use ansi_term::Colour::Red;
use linefeed::{DefaultTerminal, Interface, ReadResult, Terminal};
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Debug)]
pub enum Error {
    IO(std::io::Error),
    Interpreter(interpreter::Error),
    BadArgs(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IO(e) => write!(f, "io error: {}", e),
            Error::Interpreter(e) => write!(f, "{}", e),
            Error::BadArgs(usage) => write!(f, "{}", usage),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::IO(e)
    }
}

pub fn setup() -> std::io::Result<Interface<DefaultTerminal>> {
    let interface = linefeed::Interface::new("scm")?;
    interface.set_prompt("scm> ")?;
    if let Some(path) = history_path() {
        interface.load_history(path).ok();
    };
    Ok(interface)
}

fn history_path() -> Option<PathBuf> {
    match dirs::data_dir() {
        Some(mut path) => {
            path.push(".scm_history");
            Some(path)
        }
        None => None,
    }
}

pub fn save_history<T: Terminal>(interface: &Interface<T>) -> std::io::Result<()> {
    match history_path() {
        Some(path) => interface.save_history(path),
        None => Ok(()),
    }
}

fn report(e: &interpreter::Error) -> String {
    let message = format!("Error: {}", e);
    match atty::is(atty::Stream::Stdout) {
        true => Red.paint(message).to_string(),
        false => message,
    }
}

pub fn repl<T: Terminal>(interface: &Interface<T>, env: &Rc<Environment>) {
    loop {
        match interface.read_line() {
            Ok(ReadResult::Eof) => break,
            Ok(ReadResult::Signal(sig)) => {
                writeln!(interface, "Received signal {:?}", sig).ok();
            }
            Ok(ReadResult::Input(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                interface.add_history_unique(line.clone());
                match interpreter::rep(&line, env) {
                    Ok(output) => writeln!(interface, "{}", output).ok(),
                    Err(e) => writeln!(interface, "{}", report(&e)).ok(),
                };
            }
            Err(e) => {
                writeln!(interface, "Error: {}", e).ok();
                break;
            }
        }
    }
}

/// `args` as from `std::env::args`: with a file argument run that file,
/// otherwise start the interactive loop.
pub fn launch(args: Vec<String>, env: &Rc<Environment>) -> Result<(), Error> {
    match args.as_slice() {
        [_] => {
            let interface = setup()?;
            repl(&interface, env);
            save_history(&interface)?;
            Ok(())
        }
        [_, path] => {
            let output = interpreter::run_file(path, env).map_err(Error::Interpreter)?;
            println!("{}", output);
            Ok(())
        }
        _ => Err(Error::BadArgs(format!(
            "usage: {} [FILE]",
            args.first().map_or("scm", String::as_str)
        ))),
    }
}
