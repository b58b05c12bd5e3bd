//! Numbered console menu over any line-oriented input.

use std::io::{self, BufRead, Write};

use quantumvault_core::{CollapseEvent, Listing, Vault, VaultError};
use rand::Rng;

use super::{EVACUATION_NOTICE, EXIT_COLLAPSE, EXIT_IO_ERROR, EXIT_OK};

/// How a console session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleExit {
    /// Menu choice 5.
    Quit,
    /// Input closed before the user quit.
    EndOfInput,
    /// An object collapsed during analysis.
    Collapsed(CollapseEvent),
}

pub fn run(mut vault: Vault) -> i32 {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = session(&mut vault, stdin.lock(), stdout.lock());
    if let Err(e) = &result {
        eprintln!("console I/O error: {e}");
    }
    exit_code(&result)
}

/// Process status for a finished session.
pub fn exit_code(result: &io::Result<ConsoleExit>) -> i32 {
    match result {
        Ok(ConsoleExit::Quit | ConsoleExit::EndOfInput) => EXIT_OK,
        Ok(ConsoleExit::Collapsed(_)) => EXIT_COLLAPSE,
        Err(_) => EXIT_IO_ERROR,
    }
}

/// Drive the menu until quit, end of input, or collapse.
pub fn session<R, I, O>(vault: &mut Vault<R>, mut input: I, mut out: O) -> io::Result<ConsoleExit>
where
    R: Rng,
    I: BufRead,
    O: Write,
{
    loop {
        print_menu(&mut out)?;
        let Some(choice) = read_line(&mut input)? else {
            writeln!(out)?;
            return Ok(ConsoleExit::EndOfInput);
        };

        match choice.as_str() {
            "1" => match vault.add_random() {
                Ok(object) => writeln!(out, "Added -> {}", object.status_report())?,
                Err(e) => writeln!(out, "Error: {e}")?,
            },
            "2" => match vault.list() {
                Listing::Empty => writeln!(out, "Inventory is empty.")?,
                Listing::Reports(reports) => {
                    for line in reports {
                        writeln!(out, "{line}")?;
                    }
                }
            },
            "3" => {
                let Some(id) = prompt(&mut input, &mut out, "ID to analyze: ")? else {
                    return Ok(ConsoleExit::EndOfInput);
                };
                match vault.analyze(&id) {
                    Ok(report) => {
                        writeln!(out, "{}", report.outcome.message)?;
                        writeln!(out, "Analysis complete. {}", report.object)?;
                        if report.low_stability {
                            writeln!(out, "WARNING! {id} is at critical level!")?;
                        }
                    }
                    Err(VaultError::Collapse(event)) => {
                        writeln!(out, "{EVACUATION_NOTICE}")?;
                        writeln!(out, "{event}")?;
                        out.flush()?;
                        return Ok(ConsoleExit::Collapsed(event));
                    }
                    Err(e) => write_lookup_error(&mut out, &e)?,
                }
            }
            "4" => {
                let Some(id) = prompt(&mut input, &mut out, "ID to cool down: ")? else {
                    return Ok(ConsoleExit::EndOfInput);
                };
                match vault.emergency_cooldown(&id) {
                    Ok(report) => writeln!(out, "Cooldown applied. {}", report.object)?,
                    Err(e) => write_lookup_error(&mut out, &e)?,
                }
            }
            "5" => {
                writeln!(out, "Exiting safely...")?;
                return Ok(ConsoleExit::Quit);
            }
            _ => writeln!(out, "Invalid choice.")?,
        }
    }
}

fn print_menu<O: Write>(out: &mut O) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "QUANTUM VAULT CONTROL PANEL")?;
    writeln!(out, "1. Add new object (random)")?;
    writeln!(out, "2. List inventory")?;
    writeln!(out, "3. Analyze object (ID)")?;
    writeln!(out, "4. Emergency cooldown (ID, critical objects only)")?;
    writeln!(out, "5. Exit")?;
    write!(out, "Your choice: ")?;
    out.flush()
}

fn prompt<I: BufRead, O: Write>(
    input: &mut I,
    out: &mut O,
    label: &str,
) -> io::Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;
    read_line(input)
}

/// Next trimmed line, or `None` at end of input.
fn read_line<I: BufRead>(input: &mut I) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn write_lookup_error<O: Write>(out: &mut O, err: &VaultError) -> io::Result<()> {
    match err {
        VaultError::EmptyId | VaultError::NotFound(_) => writeln!(out, "Object not found."),
        VaultError::NotCritical(_) => writeln!(out, "This object cannot be cooled!"),
        other => writeln!(out, "Error: {other}"),
    }
}
