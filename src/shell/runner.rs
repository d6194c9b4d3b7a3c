//! Batch and interactive drivers
//!
//! A [`Shell`] feeds command lines to the dispatcher and writes their output.
//! Recoverable errors are printed and the session goes on; anything else
//! ends the session.

use std::io::{BufRead, Write};

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::fs::FileSystem;

use super::command::{execute, Outcome};

/// Greeting printed when an interactive session starts
pub const BANNER: &str = "Use the command `exit` to terminate the program.";

/// Command session over a filesystem
#[derive(Debug, Default)]
pub struct Shell {
    fs: FileSystem,
}

impl Shell {
    pub fn new(fs: FileSystem) -> Self {
        Self { fs }
    }

    pub fn fs(&self) -> &FileSystem {
        &self.fs
    }

    pub fn into_fs(self) -> FileSystem {
        self.fs
    }

    /// Run one command line. Returns `false` once the session should stop.
    pub fn run_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<bool> {
        match execute(&mut self.fs, line) {
            Ok(Outcome::Output(text)) => {
                out.write_all(text.as_bytes())?;
                Ok(true)
            }
            Ok(Outcome::Exit) => {
                debug!("Exit requested");
                Ok(false)
            }
            Err(e) if e.is_recoverable() => {
                debug!("Command {:?} failed: {}", line.trim(), e);
                writeln!(out, "{}", e)?;
                Ok(true)
            }
            Err(e) => {
                warn!("Command {:?} failed fatally: {}", line.trim(), e);
                Err(e)
            }
        }
    }

    /// Run a fixed list of commands, stopping early on `exit`
    pub fn run_batch<I, S, W>(&mut self, commands: I, out: &mut W) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        W: Write,
    {
        for command in commands {
            if !self.run_line(command.as_ref(), out)? {
                break;
            }
        }
        out.flush()?;
        Ok(())
    }

    /// Prompt for commands until `exit` or end of input
    pub fn run_interactive<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<()> {
        info!("Starting interactive session");
        writeln!(out, "{}", BANNER)?;

        loop {
            write!(out, "{} > ", self.fs.current_location())?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                break;
            }
            if !self.run_line(&line, out)? {
                break;
            }
        }

        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(commands: &[&str]) -> (Shell, String) {
        run_on(FileSystem::default(), commands)
    }

    fn run_on(fs: FileSystem, commands: &[&str]) -> (Shell, String) {
        let mut shell = Shell::new(fs);
        let mut out = Vec::new();
        shell.run_batch(commands, &mut out).unwrap();
        (shell, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_cd_dot_dot_returns_to_root() {
        let (_, out) = run(&["mkdir test1", "cd test1", "cd ..", "pwd"]);
        assert_eq!(out, "/\n");
    }

    #[test]
    fn test_touch_then_ls() {
        let (_, out) = run(&["touch test1 test2", "ls"]);
        assert_eq!(out, "test1\ntest2\n");
    }

    #[test]
    fn test_rm_non_empty_directory_reports_and_keeps_table() {
        let (shell, out) = run(&["mkdir test1", "touch test1/b", "rm test1"]);
        assert_eq!(out, "Directory /test1 isn't empty.\n");
        assert_eq!(shell.fs().len(), 3);
    }

    #[test]
    fn test_errors_do_not_stop_the_batch() {
        let (shell, out) = run(&["cd nowhere", "mkdir a", "mkdir a", "ls"]);
        assert_eq!(
            out,
            "Path nowhere does not exist.\nFilesystem item with name /a already exists.\n/a\n"
        );
        assert_eq!(shell.fs().len(), 2);
    }

    #[test]
    fn test_exit_stops_the_batch() {
        let (shell, out) = run(&["touch a", "exit", "touch b", "ls"]);
        assert_eq!(out, "");
        assert!(shell.fs().node("/b").is_none());
    }

    #[test]
    fn test_usage_messages() {
        let (_, out) = run(&["mv", "cp", "find", "rm", "read", "write", "symlink test", "hardlink test"]);
        assert_eq!(
            out,
            "Usage: mv source ... target\n\
             Usage: cp source ... target\n\
             Usage: find target\n\
             Must provide arguments.\n\
             Usage: read <file>\n\
             Usage: write <file> '<a_string>'\n\
             Usage: symlink [source_item] [link_name]\n\
             Usage: hardlink [source_item] [link_name]\n"
        );
    }

    #[test]
    fn test_mv_then_list() {
        let (shell, out) = run(&[
            "touch test1 test2",
            "mkdir test_dir",
            "mv test1 test2 test_dir",
            "ls",
            "ls test_dir",
        ]);
        assert_eq!(out, "/test_dir\ntest1\ntest2\n");
        assert_eq!(shell.fs().len(), 4);
    }

    #[test]
    fn test_mv_missing_paths() {
        let (_, out) = run(&["touch test1", "mv test1 test2"]);
        assert_eq!(out, "Path test2 does not exist.\n");

        let (_, out) = run(&["mkdir test2", "mv test1 test2"]);
        assert_eq!(out, "Path test1 does not exist.\n");
    }

    #[test]
    fn test_write_read_workflow() {
        let (_, out) = run(&[
            "touch test_file",
            "write test_file 'testing'",
            "write test_file 'testing'",
            "read test_file",
        ]);
        assert_eq!(out, "'testing''testing'\n");
    }

    #[test]
    fn test_out_of_disk_is_reported() {
        let (_, out) = run_on(FileSystem::new(1), &["touch test_file", "write test_file 'testing'"]);
        assert_eq!(out, "Out of virtual disk space.\n");
    }

    #[test]
    fn test_hardlink_survives_rm_and_move() {
        let (shell, out) = run(&[
            "mkdir a_dir b_dir",
            "touch a_dir/a_file",
            "write a_dir/a_file kept",
            "hardlink a_dir/a_file h",
            "mv a_dir/a_file b_dir",
            "read h",
        ]);
        // Moving does not carry content unless configured to
        assert_eq!(out, "\n");
        assert_eq!(shell.fs().node("/h").unwrap().link_target(), Some("/b_dir/a_file"));
    }

    #[test]
    fn test_rm_of_current_directory_keeps_session_usable() {
        let (shell, out) = run(&["mkdir a", "cd a", "rm .", "pwd", "ls", "cd ..", "touch x", "ls"]);
        assert_eq!(
            out,
            "Cannot remove the current directory or one of its parents.\n/a/\n/a\nx\n"
        );
        assert_eq!(shell.fs().current_location(), "");
    }

    #[test]
    fn test_interactive_session() {
        let input = Cursor::new("mkdir docs\ncd docs\npwd\nbogus\nexit\ntouch never\n");
        let mut shell = Shell::default();
        let mut out = Vec::new();
        shell.run_interactive(input, &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(
            out,
            format!(
                "{}\n >  > /docs > /docs/\n/docs > Unrecognized command: bogus\n/docs > ",
                BANNER
            )
        );
        assert!(shell.fs().node("/docs/never").is_none());
    }

    #[test]
    fn test_interactive_end_of_input() {
        let mut shell = Shell::default();
        let mut out = Vec::new();
        shell.run_interactive(Cursor::new("touch a\n"), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.ends_with(" >  > \n"));
        assert_eq!(shell.into_fs().len(), 2);
    }
}
