//! Pipe-friendly driver: one command per stdin line, one event per stdout line.
//!
//! ```text
//! add                              spawn a random object
//! add <variant> <id> <stab> <dgr>  add an explicit object (variant: data|dark|anti)
//! list                             list the inventory
//! summary                          total / critical counts
//! analyze <id>                     analyze by id
//! cooldown <id>                    emergency cooldown by id
//! # ...                            comment
//! ```

use std::fmt;
use std::io::{self, BufRead, Write};

use quantumvault_core::{
    CollapseEvent, Listing, QuantumObject, StatusReport, Variant, Vault, VaultError, create,
};
use rand::Rng;
use serde::Serialize;

use super::{EVACUATION_NOTICE, EXIT_COLLAPSE, EXIT_IO_ERROR, EXIT_OK};

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchCommand {
    Spawn,
    Add {
        variant: Variant,
        id: String,
        stability: f64,
        danger: i64,
    },
    List,
    Summary,
    Analyze(String),
    Cooldown(String),
}

/// One output record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BatchEvent {
    Added {
        object: StatusReport,
    },
    Empty,
    Listed {
        objects: Vec<StatusReport>,
    },
    Summary {
        total: usize,
        critical: usize,
    },
    Analyzed {
        message: String,
        low_stability: bool,
        object: StatusReport,
    },
    Cooled {
        object: StatusReport,
    },
    NotFound {
        id: String,
    },
    NotCritical {
        id: String,
    },
    Rejected {
        line: usize,
        error: String,
    },
    Collapse {
        id: String,
    },
}

impl fmt::Display for BatchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added { object } => write!(f, "added {object}"),
            Self::Empty => write!(f, "inventory is empty"),
            Self::Listed { objects } => {
                for (i, object) in objects.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{object}")?;
                }
                Ok(())
            }
            Self::Summary { total, critical } => {
                write!(f, "inventory: {total} objects, critical: {critical}")
            }
            Self::Analyzed {
                message,
                low_stability,
                object,
            } => {
                write!(f, "analyzed {object} ({message})")?;
                if *low_stability {
                    write!(f, " [LOW STABILITY]")?;
                }
                Ok(())
            }
            Self::Cooled { object } => write!(f, "cooled {object}"),
            Self::NotFound { id } => write!(f, "not found: {id}"),
            Self::NotCritical { id } => write!(f, "cannot cool {id}: not critical"),
            Self::Rejected { line, error } => write!(f, "line {line}: {error}"),
            Self::Collapse { id } => {
                let event = CollapseEvent::new(id.as_str());
                write!(f, "{EVACUATION_NOTICE}\n{event}")
            }
        }
    }
}

/// Parse one line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<BatchCommand>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or_default().to_ascii_lowercase();
    let args: Vec<&str> = parts.collect();

    let cmd = match (verb.as_str(), args.as_slice()) {
        ("add", []) => BatchCommand::Spawn,
        ("add", [variant, id, stability, danger]) => BatchCommand::Add {
            variant: variant.parse::<Variant>().map_err(|e| format!("{e}"))?,
            id: id.to_string(),
            stability: stability
                .parse::<f64>()
                .map_err(|_| format!("invalid stability '{stability}'"))?,
            danger: danger
                .parse::<i64>()
                .map_err(|_| format!("invalid danger level '{danger}'"))?,
        },
        ("add", _) => return Err("usage: add [<variant> <id> <stability> <danger>]".into()),
        ("list", []) => BatchCommand::List,
        ("summary", []) => BatchCommand::Summary,
        ("analyze", [id]) => BatchCommand::Analyze(id.to_string()),
        ("cooldown", [id]) => BatchCommand::Cooldown(id.to_string()),
        ("analyze" | "cooldown", _) => return Err(format!("usage: {verb} <id>")),
        _ => return Err(format!("unknown command '{line}'")),
    };
    Ok(Some(cmd))
}

/// Apply one command to the vault.
pub fn apply<R: Rng>(vault: &mut Vault<R>, cmd: BatchCommand, line: usize) -> BatchEvent {
    match cmd {
        BatchCommand::Spawn => match vault.add_random() {
            Ok(object) => BatchEvent::Added {
                object: object.snapshot(),
            },
            Err(e) => BatchEvent::Rejected {
                line,
                error: e.to_string(),
            },
        },
        BatchCommand::Add {
            variant,
            id,
            stability,
            danger,
        } => match create(variant, id, Some(stability), danger) {
            Ok(object) => BatchEvent::Added {
                object: vault.add(object).snapshot(),
            },
            Err(e) => BatchEvent::Rejected {
                line,
                error: e.to_string(),
            },
        },
        BatchCommand::List => match vault.list() {
            Listing::Empty => BatchEvent::Empty,
            Listing::Reports(_) => BatchEvent::Listed {
                objects: vault
                    .inventory()
                    .iter()
                    .map(QuantumObject::snapshot)
                    .collect(),
            },
        },
        BatchCommand::Summary => {
            let s = vault.summary();
            BatchEvent::Summary {
                total: s.total,
                critical: s.critical,
            }
        }
        BatchCommand::Analyze(id) => match vault.analyze(&id) {
            Ok(report) => BatchEvent::Analyzed {
                message: report.outcome.message.to_string(),
                low_stability: report.low_stability,
                object: report.object,
            },
            Err(e) => from_error(e, line),
        },
        BatchCommand::Cooldown(id) => match vault.emergency_cooldown(&id) {
            Ok(report) => BatchEvent::Cooled {
                object: report.object,
            },
            Err(e) => from_error(e, line),
        },
    }
}

fn from_error(err: VaultError, line: usize) -> BatchEvent {
    match err {
        VaultError::NotFound(id) => BatchEvent::NotFound { id },
        VaultError::NotCritical(id) => BatchEvent::NotCritical { id },
        VaultError::Collapse(event) => BatchEvent::Collapse { id: event.id },
        other => BatchEvent::Rejected {
            line,
            error: other.to_string(),
        },
    }
}

fn emit<O: Write>(out: &mut O, event: &BatchEvent, json: bool) -> io::Result<()> {
    if json {
        serde_json::to_writer(&mut *out, event)?;
        writeln!(out)
    } else {
        writeln!(out, "{event}")
    }
}

/// Run every input line. Returns `true` if the run ended in a collapse.
pub fn execute<R, I, O>(vault: &mut Vault<R>, input: I, mut out: O, json: bool) -> io::Result<bool>
where
    R: Rng,
    I: BufRead,
    O: Write,
{
    for (n, line) in input.lines().enumerate() {
        let line = line?;
        let event = match parse_line(&line) {
            Ok(None) => continue,
            Ok(Some(cmd)) => apply(vault, cmd, n + 1),
            Err(error) => {
                log::warn!("skipping line {}: {error}", n + 1);
                BatchEvent::Rejected { line: n + 1, error }
            }
        };
        emit(&mut out, &event, json)?;
        if matches!(event, BatchEvent::Collapse { .. }) {
            out.flush()?;
            return Ok(true);
        }
    }
    out.flush()?;
    Ok(false)
}

pub fn run(mut vault: Vault, json: bool) -> i32 {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = execute(&mut vault, stdin.lock(), stdout.lock(), json);
    if let Err(e) = &result {
        eprintln!("batch I/O error: {e}");
    }
    exit_code(&result)
}

/// Process status for a finished run: collapse is 1, I/O failure 2.
pub fn exit_code(result: &io::Result<bool>) -> i32 {
    match result {
        Ok(true) => EXIT_COLLAPSE,
        Ok(false) => EXIT_OK,
        Err(_) => EXIT_IO_ERROR,
    }
}
