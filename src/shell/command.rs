//! Command dispatcher
//!
//! Turns a whitespace-separated command line into a verb and its arguments
//! and runs the matching [`FileSystem`] operation.

use std::fmt;

use tracing::debug;

use crate::error::Result;
use crate::fs::FileSystem;

/// Commands understood by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Ls,
    Find,
    Touch,
    Mkdir,
    Pwd,
    Cd,
    Rm,
    Cp,
    Mv,
    Symlink,
    Hardlink,
    Write,
    Read,
    Exit,
}

impl Verb {
    /// Every verb, in help order
    pub const ALL: [Verb; 14] = [
        Verb::Ls,
        Verb::Find,
        Verb::Touch,
        Verb::Mkdir,
        Verb::Pwd,
        Verb::Cd,
        Verb::Rm,
        Verb::Cp,
        Verb::Mv,
        Verb::Symlink,
        Verb::Hardlink,
        Verb::Write,
        Verb::Read,
        Verb::Exit,
    ];

    /// Look up a verb by its command name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|verb| verb.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Verb::Ls => "ls",
            Verb::Find => "find",
            Verb::Touch => "touch",
            Verb::Mkdir => "mkdir",
            Verb::Pwd => "pwd",
            Verb::Cd => "cd",
            Verb::Rm => "rm",
            Verb::Cp => "cp",
            Verb::Mv => "mv",
            Verb::Symlink => "symlink",
            Verb::Hardlink => "hardlink",
            Verb::Write => "write",
            Verb::Read => "read",
            Verb::Exit => "exit",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the driver should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print this text and read the next command
    Output(String),
    /// Stop the session
    Exit,
}

/// Run one command line against the filesystem
pub fn execute(fs: &mut FileSystem, line: &str) -> Result<Outcome> {
    let mut tokens = line.split_whitespace();
    let name = match tokens.next() {
        Some(name) => name,
        None => return Ok(Outcome::Output(String::new())),
    };
    let args: Vec<&str> = tokens.collect();

    let verb = match Verb::from_name(name) {
        Some(verb) => verb,
        None => return Ok(Outcome::Output(format!("Unrecognized command: {}\n", name))),
    };
    debug!("Dispatching {} with {} argument(s)", verb, args.len());

    let output = match verb {
        Verb::Ls => fs.ls(&args)?,
        Verb::Find => fs.find(&args)?,
        Verb::Touch => fs.touch(&args).map(|_| String::new())?,
        Verb::Mkdir => fs.mkdir(&args).map(|_| String::new())?,
        Verb::Pwd => fs.pwd(&args)?,
        Verb::Cd => fs.cd(&args).map(|_| String::new())?,
        Verb::Rm => fs.rm(&args).map(|_| String::new())?,
        Verb::Cp => fs.cp(&args)?,
        Verb::Mv => fs.mv(&args)?,
        Verb::Symlink => fs.symlink(&args).map(|_| String::new())?,
        Verb::Hardlink => fs.hardlink(&args).map(|_| String::new())?,
        Verb::Write => fs.write(&args).map(|_| String::new())?,
        Verb::Read => fs.read(&args)?,
        Verb::Exit => return Ok(Outcome::Exit),
    };

    Ok(Outcome::Output(output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn output(fs: &mut FileSystem, line: &str) -> String {
        match execute(fs, line).unwrap() {
            Outcome::Output(text) => text,
            Outcome::Exit => panic!("unexpected exit for {:?}", line),
        }
    }

    #[test]
    fn test_verb_names_round_trip() {
        for verb in Verb::ALL {
            assert_eq!(Verb::from_name(verb.name()), Some(verb));
        }
        assert_eq!(Verb::from_name("LS"), None);
    }

    #[test]
    fn test_unrecognized_command() {
        let mut fs = FileSystem::default();
        assert_eq!(output(&mut fs, "? ? ?"), "Unrecognized command: ?\n");
    }

    #[test]
    fn test_blank_line_is_a_no_op() {
        let mut fs = FileSystem::default();
        assert_eq!(output(&mut fs, "   "), "");
        assert_eq!(fs.len(), 1);
    }

    #[test]
    fn test_exit() {
        let mut fs = FileSystem::default();
        assert_eq!(execute(&mut fs, "exit").unwrap(), Outcome::Exit);
    }

    #[test]
    fn test_dispatch_mutations_and_queries() {
        let mut fs = FileSystem::default();
        assert_eq!(output(&mut fs, "mkdir d"), "");
        assert_eq!(output(&mut fs, "touch d/f"), "");
        assert_eq!(output(&mut fs, "write d/f 'hi'"), "");
        assert_eq!(output(&mut fs, "read d/f"), "'hi'\n");
        assert_eq!(output(&mut fs, "cd d"), "");
        assert_eq!(output(&mut fs, "pwd"), "/d/\n");
        assert_eq!(output(&mut fs, "ls"), "f\n");
        assert_eq!(output(&mut fs, "find f"), "f\n");
    }

    #[test]
    fn test_errors_propagate() {
        let mut fs = FileSystem::default();
        let err = execute(&mut fs, "cd").unwrap_err();
        assert!(matches!(err, Error::ImproperArguments(_)));
    }
}
