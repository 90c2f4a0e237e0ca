//! Shell command grammar.
//!
//! Parsing is pure: numbers are validated here so the engine only ever sees
//! well-typed input.

use campkitchen_recipients::SpecialNeeds;
use campkitchen_stock::StockKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    StockAdd {
        kind: StockKind,
        name: String,
        quantity: f64,
        unit: String,
    },
    StockRemove {
        name: String,
    },
    StockList,
    StockLow,
    RecipientAdd {
        id: String,
        needs: SpecialNeeds,
        dependents: u32,
        name: String,
    },
    RecipientShow {
        id: String,
    },
    RecipientUpdate {
        id: String,
        dependents: u32,
    },
    RecipientsWithNeeds {
        needs: SpecialNeeds,
    },
    RecipientList,
    Distribute {
        recipient_id: String,
        portions: u32,
        note: Option<String>,
    },
    History {
        recipient_id: String,
    },
    Report(ReportKind),
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Stock,
    Recipients,
    Distributions,
    Nutrition,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,

    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("'{value}' is not a valid {what}")]
    InvalidNumber { what: &'static str, value: String },

    #[error("{0}")]
    InvalidValue(String),
}

const USAGE_STOCK_ADD: &str = "stock add <staple|protein|vegetable> <name> <qty> [unit]";
const USAGE_STOCK_REMOVE: &str = "stock remove <name>";
const USAGE_RECIPIENT_ADD: &str = "recipient add <id> <needs> <dependents> <name>";
const USAGE_RECIPIENT_UPDATE: &str = "recipient update <id> <dependents>";
const USAGE_DISTRIBUTE: &str = "distribute <id> <portions> [note]";
const USAGE_REPORT: &str = "report <stock|recipients|distributions|nutrition>";

pub const HELP: &str = "\
Commands:
  stock add <staple|protein|vegetable> <name> <qty> [unit]
  stock remove <name>
  stock list | stock low
  recipient add <id> <general|elderly|infant|sick> <dependents> <name>
  recipient show <id>
  recipient update <id> <dependents>
  recipient needs <general|elderly|infant|sick>
  recipient list
  distribute <id> <portions> [note]
  history <id>
  report <stock|recipients|distributions|nutrition>
  help | quit";

pub fn parse_command(line: &str) -> Result<ShellCommand, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((head, rest)) = tokens.split_first() else {
        return Err(ParseError::Empty);
    };

    match head.to_ascii_lowercase().as_str() {
        "stock" => parse_stock(rest),
        "recipient" | "recipients" => parse_recipient(rest),
        "distribute" => parse_distribute(rest),
        "history" => match rest {
            [id] => Ok(ShellCommand::History {
                recipient_id: (*id).to_string(),
            }),
            _ => Err(ParseError::Usage("history <id>")),
        },
        "report" => parse_report(rest),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}

fn parse_stock(args: &[&str]) -> Result<ShellCommand, ParseError> {
    match args {
        ["list"] => Ok(ShellCommand::StockList),
        ["low"] => Ok(ShellCommand::StockLow),
        ["remove", name @ ..] if !name.is_empty() => Ok(ShellCommand::StockRemove {
            name: name.join(" "),
        }),
        ["remove", ..] => Err(ParseError::Usage(USAGE_STOCK_REMOVE)),
        ["add", kind, tail @ ..] => {
            let kind: StockKind = kind
                .parse()
                .map_err(|e: campkitchen_core::DomainError| ParseError::InvalidValue(e.to_string()))?;
            let (name, quantity, unit) = split_name_quantity_unit(tail)?;
            Ok(ShellCommand::StockAdd {
                kind,
                name,
                quantity,
                unit,
            })
        }
        ["add"] => Err(ParseError::Usage(USAGE_STOCK_ADD)),
        _ => Err(ParseError::Usage("stock <add|remove|list|low> ...")),
    }
}

/// `<name words...> <qty> [unit]`. The unit is taken only when the token
/// before it is a number, so multi-word names need no quoting.
fn split_name_quantity_unit(tail: &[&str]) -> Result<(String, f64, String), ParseError> {
    match tail {
        [name @ .., qty, unit] if !name.is_empty() && qty.parse::<f64>().is_ok() => {
            let quantity = parse_quantity(qty)?;
            Ok((name.join(" "), quantity, (*unit).to_string()))
        }
        [name @ .., qty] if !name.is_empty() => {
            let quantity = parse_quantity(qty)?;
            Ok((name.join(" "), quantity, "kg".to_string()))
        }
        _ => Err(ParseError::Usage(USAGE_STOCK_ADD)),
    }
}

fn parse_recipient(args: &[&str]) -> Result<ShellCommand, ParseError> {
    match args {
        ["list"] => Ok(ShellCommand::RecipientList),
        ["show", id] => Ok(ShellCommand::RecipientShow {
            id: (*id).to_string(),
        }),
        ["needs", needs] => Ok(ShellCommand::RecipientsWithNeeds {
            needs: parse_needs(needs)?,
        }),
        ["update", id, dependents] => Ok(ShellCommand::RecipientUpdate {
            id: (*id).to_string(),
            dependents: parse_count("dependents count", dependents)?,
        }),
        ["update", ..] => Err(ParseError::Usage(USAGE_RECIPIENT_UPDATE)),
        ["add", id, needs, dependents, name @ ..] if !name.is_empty() => {
            Ok(ShellCommand::RecipientAdd {
                id: (*id).to_string(),
                needs: parse_needs(needs)?,
                dependents: parse_count("dependents count", dependents)?,
                name: name.join(" "),
            })
        }
        ["add", ..] => Err(ParseError::Usage(USAGE_RECIPIENT_ADD)),
        _ => Err(ParseError::Usage("recipient <add|show|update|needs|list> ...")),
    }
}

fn parse_distribute(args: &[&str]) -> Result<ShellCommand, ParseError> {
    match args {
        [id, portions, note @ ..] => Ok(ShellCommand::Distribute {
            recipient_id: (*id).to_string(),
            portions: parse_count("portion count", portions)?,
            note: (!note.is_empty()).then(|| note.join(" ")),
        }),
        _ => Err(ParseError::Usage(USAGE_DISTRIBUTE)),
    }
}

fn parse_report(args: &[&str]) -> Result<ShellCommand, ParseError> {
    let kind = match args {
        ["stock"] => ReportKind::Stock,
        ["recipients"] => ReportKind::Recipients,
        ["distributions"] => ReportKind::Distributions,
        ["nutrition"] => ReportKind::Nutrition,
        _ => return Err(ParseError::Usage(USAGE_REPORT)),
    };
    Ok(ShellCommand::Report(kind))
}

fn parse_needs(raw: &str) -> Result<SpecialNeeds, ParseError> {
    raw.parse()
        .map_err(|e: campkitchen_core::DomainError| ParseError::InvalidValue(e.to_string()))
}

fn parse_quantity(raw: &str) -> Result<f64, ParseError> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(ParseError::InvalidNumber {
            what: "quantity",
            value: raw.to_string(),
        }),
    }
}

fn parse_count(what: &'static str, raw: &str) -> Result<u32, ParseError> {
    raw.parse::<u32>().map_err(|_| ParseError::InvalidNumber {
        what,
        value: raw.to_string(),
    })
}
