//! Output streams, terminal capabilities and the pager.
//!
//! Everything that needs to know "is this a terminal?" asks an [`IoStreams`]
//! instead of poking at the environment, so the rendering code can be
//! driven from tests with plain byte buffers.

use crate::config::{ColorMode, Config};
use crossterm::style::{style, Color, Stylize};
use crossterm::tty::IsTty;
use std::io::{self, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Fallback when the terminal won't tell us its size
const DEFAULT_TERMINAL_WIDTH: usize = 80;

/// Decides whether colors get emitted at all
pub fn color_enabled(mode: ColorMode, stdout_tty: bool) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => stdout_tty,
    }
}

/// Palette handed to renderers. When disabled every method is the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    enabled: bool,
}

impl ColorScheme {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.enabled {
            style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn green(&self, text: &str) -> String {
        self.paint(text, Color::Green)
    }

    pub fn gray(&self, text: &str) -> String {
        self.paint(text, Color::DarkGrey)
    }

    pub fn blue(&self, text: &str) -> String {
        self.paint(text, Color::Blue)
    }
}

/// stdout plus what we know about the terminal behind it
///
/// Diagnostics don't come through here; they go to stderr via `tracing`.
pub struct IoStreams {
    out: Box<dyn Write + Send>,
    stdout_tty: bool,
    colors: ColorScheme,
    terminal_width: usize,
    pager: Option<String>,
}

impl IoStreams {
    /// The real process streams, configured from `config`
    pub fn system(config: &Config) -> Self {
        let stdout_tty = io::stdout().is_tty();
        let terminal_width = if stdout_tty {
            crossterm::terminal::size()
                .map(|(cols, _)| cols as usize)
                .unwrap_or(DEFAULT_TERMINAL_WIDTH)
        } else {
            0
        };

        Self {
            out: Box::new(io::stdout()),
            stdout_tty,
            colors: ColorScheme::new(color_enabled(config.color_mode(), stdout_tty)),
            terminal_width,
            pager: config.pager(),
        }
    }

    /// In-memory stdout: not a terminal, no color, no pager
    pub fn test() -> (Self, TestBuffer) {
        let out = TestBuffer::default();

        let streams = Self {
            out: Box::new(out.clone()),
            stdout_tty: false,
            colors: ColorScheme::new(false),
            terminal_width: 0,
            pager: None,
        };

        (streams, out)
    }

    pub fn is_stdout_tty(&self) -> bool {
        self.stdout_tty
    }

    pub fn set_stdout_tty(&mut self, tty: bool) {
        self.stdout_tty = tty;
    }

    pub fn colors(&self) -> ColorScheme {
        self.colors
    }

    pub fn set_color_enabled(&mut self, enabled: bool) {
        self.colors = ColorScheme::new(enabled);
    }

    /// Columns available for a table line. 0 means "don't truncate".
    pub fn terminal_width(&self) -> usize {
        self.terminal_width
    }

    pub fn set_terminal_width(&mut self, width: usize) {
        self.terminal_width = width;
    }

    pub fn set_pager(&mut self, pager: Option<String>) {
        self.pager = pager;
    }

    /// Route stdout through the pager until the guard is dropped
    ///
    /// Only pages when stdout is a terminal and a pager is configured. If the
    /// pager can't be started, output goes to stdout directly.
    pub fn start_pager(&mut self) -> PagerGuard<'_> {
        let command = match (&self.pager, self.stdout_tty) {
            (Some(command), true) => command.clone(),
            _ => return PagerGuard::direct(&mut *self.out),
        };

        match spawn_pager(&command) {
            Ok((child, stdin)) => {
                debug!("Started pager: {}", command);
                PagerGuard {
                    output: PagerOutput::Pager {
                        child,
                        stdin: Some(stdin),
                    },
                }
            }
            Err(e) => {
                warn!("Failed to start pager '{}': {}", command, e);
                PagerGuard::direct(&mut *self.out)
            }
        }
    }
}

fn spawn_pager(command: &str) -> io::Result<(Child, ChildStdin)> {
    let mut parts = command.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty pager command"))?;

    let mut cmd = Command::new(program);
    cmd.args(parts).stdin(Stdio::piped());

    // Same defaults git uses: quit if one screen, keep colors, no screen clear
    if std::env::var_os("LESS").is_none() {
        cmd.env("LESS", "FRX");
    }
    if std::env::var_os("LV").is_none() {
        cmd.env("LV", "-c");
    }

    let mut child = cmd.spawn()?;
    let stdin = child
        .stdin
        .take()
        .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "pager has no stdin"))?;

    Ok((child, stdin))
}

/// Scoped stdout. Writes go to the pager (or stdout) and the pager is
/// waited on when this drops, whichever way the caller exits.
pub struct PagerGuard<'a> {
    output: PagerOutput<'a>,
}

enum PagerOutput<'a> {
    Direct(&'a mut (dyn Write + Send)),
    Pager {
        child: Child,
        stdin: Option<ChildStdin>,
    },
}

impl<'a> PagerGuard<'a> {
    fn direct(out: &'a mut (dyn Write + Send)) -> Self {
        Self {
            output: PagerOutput::Direct(out),
        }
    }

    pub fn is_paging(&self) -> bool {
        matches!(self.output, PagerOutput::Pager { .. })
    }
}

impl Write for PagerGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.output {
            PagerOutput::Direct(out) => out.write(buf),
            PagerOutput::Pager { stdin, .. } => match stdin.as_mut() {
                // User quit the pager early. Nothing left to show, so swallow it.
                Some(pipe) => match pipe.write(buf) {
                    Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(buf.len()),
                    other => other,
                },
                None => Ok(buf.len()),
            },
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.output {
            PagerOutput::Direct(out) => out.flush(),
            PagerOutput::Pager { stdin, .. } => match stdin.as_mut() {
                Some(pipe) => match pipe.flush() {
                    Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                    other => other,
                },
                None => Ok(()),
            },
        }
    }
}

impl Drop for PagerGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            debug!("Flushing output failed: {}", e);
        }

        if let PagerOutput::Pager { child, stdin } = &mut self.output {
            // Closing stdin is what tells the pager we're done
            drop(stdin.take());
            if let Err(e) = child.wait() {
                warn!("Pager did not exit cleanly: {}", e);
            }
        }
    }
}

/// Shared in-memory sink for [`IoStreams::test`]
#[derive(Debug, Clone, Default)]
pub struct TestBuffer(Arc<Mutex<Vec<u8>>>);

impl TestBuffer {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(|p| p.into_inner());
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for TestBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_decision() {
        assert!(color_enabled(ColorMode::Always, false));
        assert!(!color_enabled(ColorMode::Never, true));
        assert!(color_enabled(ColorMode::Auto, true));
        assert!(!color_enabled(ColorMode::Auto, false));
    }

    #[test]
    fn test_disabled_scheme_is_plain() {
        let colors = ColorScheme::new(false);
        assert_eq!(colors.green("hi"), "hi");
        assert_eq!(colors.gray("hi"), "hi");
        assert_eq!(colors.blue("hi"), "hi");
    }

    #[test]
    fn test_enabled_scheme_matches_crossterm_styling() {
        let colors = ColorScheme::new(true);
        assert_eq!(colors.green("hi"), style("hi").with(Color::Green).to_string());
        assert!(colors.blue("hi").contains("hi"));
    }

    #[test]
    fn test_streams_capture_output() {
        let (mut io, out) = IoStreams::test();
        assert!(!io.is_stdout_tty());
        assert!(!io.colors().enabled());

        {
            let mut pager = io.start_pager();
            assert!(!pager.is_paging());
            write!(pager, "hello").unwrap();
        }

        assert_eq!(out.contents(), "hello");
    }

    #[test]
    fn test_pager_skipped_when_not_a_terminal() {
        let (mut io, out) = IoStreams::test();
        io.set_pager(Some("less".to_string()));

        let mut pager = io.start_pager();
        assert!(!pager.is_paging());
        pager.write_all(b"direct").unwrap();
        drop(pager);

        assert_eq!(out.contents(), "direct");
    }

    #[test]
    fn test_missing_pager_falls_back_to_stdout() {
        let (mut io, out) = IoStreams::test();
        io.set_stdout_tty(true);
        io.set_pager(Some("definitely-not-a-real-pager-binary".to_string()));

        let mut pager = io.start_pager();
        assert!(!pager.is_paging());
        pager.write_all(b"fallback").unwrap();
        drop(pager);

        assert_eq!(out.contents(), "fallback");
    }

    #[cfg(unix)]
    #[test]
    fn test_pager_process_is_waited_on_drop() {
        let (mut io, _) = IoStreams::test();
        io.set_stdout_tty(true);
        // `true` exits immediately without reading, so writes hit a closed pipe
        io.set_pager(Some("true".to_string()));

        let mut pager = io.start_pager();
        assert!(pager.is_paging());
        for _ in 0..1000 {
            pager.write_all(b"lots of output nobody reads\n").unwrap();
        }
        drop(pager);
    }
}
