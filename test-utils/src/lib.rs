//! Helpers for driving the built `mython` binary in integration tests.
use std::{
    error::Error,
    io::{self, Write},
    path::Path,
    process::{Command, Output, Stdio},
    str,
};

const MYTHON_PATH: &str = "./target/debug/mython";

pub struct Expected<'a> {
    pub stdout: &'a str,
    pub stderr: &'a str,
}

impl<'a> Expected<'a> {
    fn assert_matches(self, output: &Output) -> Result<(), Box<dyn Error>> {
        assert_eq!(str::from_utf8(&output.stdout)?, self.stdout);
        assert_eq!(str::from_utf8(&output.stderr)?, self.stderr);
        Ok(())
    }
}

/// Run the interpreter on a source file and compare both output streams.
pub fn check_file(src_path: &Path, expected: Expected) -> Result<(), Box<dyn Error>> {
    let output = Command::new(MYTHON_PATH).arg(src_path).output()?;

    assert!(
        output.status.success(),
        "mython exited with status {:?}",
        output.status.code()
    );
    expected.assert_matches(&output)
}

/// Pipe source into the interpreter via standard input and compare both
/// output streams.
pub fn check_stdin(source: &str, expected: Expected) -> Result<(), Box<dyn Error>> {
    let mut child = Command::new(MYTHON_PATH)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    child
        .stdin
        .take()
        .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "no stdin handle"))?
        .write_all(source.as_bytes())?;

    let output = child.wait_with_output()?;
    assert!(
        output.status.success(),
        "mython exited with status {:?}",
        output.status.code()
    );
    expected.assert_matches(&output)
}
