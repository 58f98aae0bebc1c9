//! Colored terminal output for conversions
//!
//! Errors go to stderr and are always shown; everything else goes to stdout
//! and is suppressed in quiet mode.

use std::io::{self, Write};
use termcolor::{Buffer, BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Output manager for consistent colored terminal output
#[derive(Debug)]
pub struct OutputManager {
    stdout: BufferWriter,
    quiet: bool,
}

impl OutputManager {
    /// Create a new output manager
    pub fn new(quiet: bool) -> Self {
        Self {
            stdout: BufferWriter::stdout(ColorChoice::Auto),
            quiet,
        }
    }

    /// Print a success line (`✓`)
    pub fn success(&self, message: &str) -> io::Result<()> {
        self.stdout_line(|buf| {
            let spec = ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true).clone();
            tagged(buf, "✓", &spec, message)
        })
    }

    /// Print a progress line (`⋯`)
    pub fn progress(&self, message: &str) -> io::Result<()> {
        self.stdout_line(|buf| {
            tagged(buf, "⋯", ColorSpec::new().set_fg(Some(Color::Magenta)), message)
        })
    }

    /// Print an icon entry under the success line
    pub fn indent(&self, message: &str) -> io::Result<()> {
        self.stdout_line(|buf| writeln!(buf, "    {message}"))
    }

    /// Print an error line on stderr, even in quiet mode
    pub fn error(&self, message: &str) {
        let printed = stderr_line(|buf| {
            let spec = ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true).clone();
            tagged(buf, "✗", &spec, message)
        });
        if printed.is_err() {
            println!("✗ {message}");
        }
    }

    /// Print a recovery hint under an error (stderr)
    pub fn hint(&self, message: &str) {
        let _ = stderr_line(|buf| writeln!(buf, "    • {message}"));
    }

    fn stdout_line(&self, fill: impl FnOnce(&mut Buffer) -> io::Result<()>) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut buffer = self.stdout.buffer();
        fill(&mut buffer)?;
        self.stdout.print(&buffer)
    }
}

fn stderr_line(fill: impl FnOnce(&mut Buffer) -> io::Result<()>) -> io::Result<()> {
    let stderr = BufferWriter::stderr(ColorChoice::Auto);
    let mut buffer = stderr.buffer();
    fill(&mut buffer)?;
    stderr.print(&buffer)
}

/// `<tag> <message>` with only the tag colored.
fn tagged(buf: &mut Buffer, tag: &str, spec: &ColorSpec, message: &str) -> io::Result<()> {
    buf.set_color(spec)?;
    write!(buf, "{tag}")?;
    buf.reset()?;
    writeln!(buf, " {message}")
}
