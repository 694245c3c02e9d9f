// ABOUTME: Confirmation gate guarding destructive operations
// ABOUTME: Proceeds on --force, refuses when non-interactive, otherwise asks a single y/N question

use std::io::{self, BufRead, IsTerminal, Write};
use tracing::debug;

use crate::error::{AuthError, AuthResult};

/// Execution context flags that decide how the gate behaves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfirmFlags {
    pub force: bool,
    pub no_input: bool,
}

/// Interactive input capability used by the gate
pub trait ConfirmInput {
    /// Whether a human can answer prompts
    fn is_interactive(&self) -> bool;

    /// Read one line; `Ok(None)` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Show the question to the user
    fn show_prompt(&mut self, prompt: &str) -> io::Result<()>;
}

/// Process stdin / stderr
#[derive(Debug, Default)]
pub struct TerminalInput;

impl ConfirmInput for TerminalInput {
    fn is_interactive(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line)),
        }
    }

    fn show_prompt(&mut self, prompt: &str) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "{}", prompt)?;
        stderr.flush()
    }
}

/// Decides whether a destructive action may proceed. Performs no mutation.
pub struct ConfirmationGate {
    flags: ConfirmFlags,
    input: Box<dyn ConfirmInput + Send>,
}

impl ConfirmationGate {
    pub fn new(flags: ConfirmFlags, input: Box<dyn ConfirmInput + Send>) -> Self {
        Self { flags, input }
    }

    /// Gate reading from the process terminal
    pub fn terminal(flags: ConfirmFlags) -> Self {
        Self::new(flags, Box::new(TerminalInput))
    }

    /// Whether prompts may be shown at all
    pub fn can_prompt(&self) -> bool {
        !self.flags.no_input && self.input.is_interactive()
    }

    /// Ask before `action` (e.g. "delete token for a@b.com")
    ///
    /// Returns `Ok(())` to proceed, `RefusingWithoutForce` when nobody can be
    /// asked, and `Cancelled` on anything but an explicit yes or when input ends.
    pub fn confirm(&mut self, action: &str) -> AuthResult<()> {
        if self.flags.force {
            debug!(action = action, "Confirmation skipped (--force)");
            return Ok(());
        }

        // Never prompt in non-interactive contexts
        if !self.can_prompt() {
            return Err(AuthError::RefusingWithoutForce {
                action: action.to_string(),
            });
        }

        let prompt = format!("Proceed to {}? [y/N]: ", action);
        if let Err(e) = self.input.show_prompt(&prompt) {
            debug!(error = %e, "Failed to show confirmation prompt");
        }

        let line = match self.input.read_line() {
            Ok(Some(line)) => line,
            Ok(None) => return Err(AuthError::Cancelled),
            Err(e) if is_closed_input(&e) => return Err(AuthError::Cancelled),
            Err(e) => return Err(AuthError::Io(e)),
        };

        let answer = line.trim().to_lowercase();
        if answer == "y" || answer == "yes" {
            Ok(())
        } else {
            debug!(action = action, "Confirmation declined");
            Err(AuthError::Cancelled)
        }
    }
}

fn is_closed_input(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::UnexpectedEof | io::ErrorKind::BrokenPipe
    )
}
