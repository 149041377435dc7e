use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::sync::Once;
use thiserror::Error;

#[cfg(unix)]
const TTY_PATH: &str = "/dev/tty";
#[cfg(windows)]
const TTY_PATH: &str = "CONOUT$";

/// Large enough for a full redraw, so each frame reaches the tty in one write.
const FRAME_BUFFER_CAPACITY: usize = 64 * 1024;

pub type TtyTerminal = Terminal<CrosstermBackend<BufWriter<File>>>;

#[derive(Debug, Error)]
pub enum OpenTtyError {
    #[error("controlling terminal unavailable: {0}")]
    Open(#[source] io::Error),

    #[error("failed to prepare terminal: {0}")]
    Setup(#[source] io::Error),
}

/// Owns the controlling terminal while a screen runs. Stdout stays free for
/// the JSON result, so the UI is drawn straight to the terminal device.
///
/// Dropping the session restores the terminal; a panic hook does the same
/// when unwinding never reaches the drop.
pub struct TerminalSession {
    terminal: TtyTerminal,
    restored: bool,
}

impl TerminalSession {
    pub fn enter() -> Result<Self, OpenTtyError> {
        let mut tty = open_tty().map_err(OpenTtyError::Open)?;
        install_panic_hook();

        enable_raw_mode().map_err(OpenTtyError::Setup)?;
        if let Err(error) = execute!(tty, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(OpenTtyError::Setup(error));
        }
        let _ = execute!(tty, EnableBracketedPaste);
        let terminal = match Terminal::new(tty_backend(tty)) {
            Ok(terminal) => terminal,
            Err(error) => {
                restore_raw();
                return Err(OpenTtyError::Setup(error));
            }
        };

        Ok(Self {
            terminal,
            restored: false,
        })
    }

    pub fn terminal(&mut self) -> &mut TtyTerminal {
        &mut self.terminal
    }

    pub fn restore(mut self) -> io::Result<()> {
        self.restore_inner()
    }

    fn restore_inner(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        let _ = execute!(self.terminal.backend_mut(), DisableBracketedPaste);
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, Show)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(error) = self.restore_inner() {
            tracing::warn!(%error, "failed to restore terminal");
        }
    }
}

fn tty_backend<W: Write>(writer: W) -> CrosstermBackend<BufWriter<W>> {
    CrosstermBackend::new(BufWriter::with_capacity(FRAME_BUFFER_CAPACITY, writer))
}

fn open_tty() -> io::Result<File> {
    OpenOptions::new().read(true).write(true).open(TTY_PATH)
}

/// Best-effort restore through a fresh handle, for paths that cannot reach
/// the session.
fn restore_raw() {
    let _ = disable_raw_mode();
    if let Ok(mut tty) = open_tty() {
        let _ = execute!(tty, DisableBracketedPaste, LeaveAlternateScreen, Show);
    }
}

fn install_panic_hook() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            restore_raw();
            original_hook(panic_info);
        }));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::MainMenuModel;
    use crate::domain::Project;
    use ratatui::layout::Rect;
    use ratatui::{TerminalOptions, Viewport};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingWriter {
        writes: Arc<AtomicUsize>,
        bytes: Arc<AtomicUsize>,
    }

    impl Write for CountingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.bytes.fetch_add(buf.len(), Ordering::SeqCst);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn a_frame_reaches_the_tty_in_a_handful_of_writes() {
        let writes = Arc::new(AtomicUsize::new(0));
        let bytes = Arc::new(AtomicUsize::new(0));
        let writer = CountingWriter {
            writes: Arc::clone(&writes),
            bytes: Arc::clone(&bytes),
        };
        let options = TerminalOptions {
            viewport: Viewport::Fixed(Rect::new(0, 0, 100, 30)),
        };
        let mut terminal = Terminal::with_options(tty_backend(writer), options).unwrap();
        let model = MainMenuModel::new(
            vec![Project::new("alpha", "/p/a"), Project::new("beta", "/p/b")],
            vec!["claude".to_string(), "codex".to_string()],
            "claude",
        )
        .with_terminal_size(100, 30);

        terminal
            .draw(|frame| crate::ui::render_main_menu(frame, &model))
            .unwrap();

        assert!(bytes.load(Ordering::SeqCst) > 1000);
        assert!(
            writes.load(Ordering::SeqCst) <= 4,
            "{} writes for one frame",
            writes.load(Ordering::SeqCst)
        );
    }
}
