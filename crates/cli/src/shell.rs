//! Line-oriented read-eval loop over the kitchen engine.

use std::io::{self, BufRead, Write};

use campkitchen_core::DomainResult;
use campkitchen_events::EventBus;
use campkitchen_kitchen::{InMemoryKitchen, KitchenEvent};
use campkitchen_recipients::Recipient;
use campkitchen_stock::{StockCategory, StockItem};

use crate::command::{HELP, ParseError, ReportKind, ShellCommand, parse_command};
use crate::format::{numbered_table, nutrition_summary};

const PROMPT: &str = "campkitchen> ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue(String),
    Quit,
}

pub struct Shell<B> {
    engine: InMemoryKitchen<B>,
    ansi: bool,
}

impl<B> Shell<B>
where
    B: EventBus<KitchenEvent>,
{
    pub fn new(engine: InMemoryKitchen<B>, ansi: bool) -> Self {
        Self { engine, ansi }
    }

    pub fn engine(&self) -> &InMemoryKitchen<B> {
        &self.engine
    }

    /// Run until `quit` or end of input. Bad lines print an error and
    /// re-prompt; only IO failures end the loop early.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        writeln!(output, "Camp kitchen ready. Type 'help' for commands.")?;
        write!(output, "{PROMPT}")?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            match self.handle_line(&line) {
                Flow::Quit => {
                    writeln!(output, "Goodbye.")?;
                    return Ok(());
                }
                Flow::Continue(text) if !text.is_empty() => writeln!(output, "{text}")?,
                Flow::Continue(_) => {}
            }
            write!(output, "{PROMPT}")?;
            output.flush()?;
        }
        writeln!(output)?;
        Ok(())
    }

    pub fn handle_line(&mut self, line: &str) -> Flow {
        match parse_command(line) {
            Ok(command) => self.execute(command),
            Err(ParseError::Empty) => Flow::Continue(String::new()),
            Err(err) => Flow::Continue(format!("error: {err}")),
        }
    }

    pub fn execute(&mut self, command: ShellCommand) -> Flow {
        if command == ShellCommand::Quit {
            return Flow::Quit;
        }
        match self.dispatch(command) {
            Ok(text) => Flow::Continue(text),
            Err(err) => {
                tracing::debug!(%err, "shell command rejected");
                Flow::Continue(format!("error: {err}"))
            }
        }
    }

    fn dispatch(&mut self, command: ShellCommand) -> DomainResult<String> {
        let ansi = self.ansi;
        let engine = &mut self.engine;
        let text = match command {
            ShellCommand::StockAdd {
                kind,
                name,
                quantity,
                unit,
            } => {
                let item = StockItem::new(name, quantity, unit, StockCategory::with_defaults(kind))?;
                let stored = engine.add_stock_item(item)?;
                format!(
                    "ok: {} ({} portions)",
                    stored.info(),
                    stored.compute_portions()
                )
            }
            ShellCommand::StockRemove { name } => {
                if engine.remove_stock_item(&name) {
                    format!("ok: removed {name}")
                } else {
                    format!("no stock item named '{name}'")
                }
            }
            ShellCommand::StockList => {
                let report = engine.stock_report();
                format!(
                    "{}\nTotal available portions: {}",
                    numbered_table("FOOD STOCK", &report.items),
                    report.total_available_portions
                )
            }
            ShellCommand::StockLow => {
                let report = engine.stock_report();
                numbered_table("LOW STOCK", &report.low_stock_names)
            }
            ShellCommand::RecipientAdd {
                id,
                needs,
                dependents,
                name,
            } => {
                let recipient = Recipient::new(name, id, needs, dependents)?;
                let line = recipient.info();
                engine.register_recipient(recipient)?;
                format!("ok: {line}")
            }
            ShellCommand::RecipientShow { id } => engine.recipient(&id)?.info(),
            ShellCommand::RecipientUpdate { id, dependents } => {
                let updated = engine.update_dependents(&id, dependents)?;
                format!("ok: {}", updated.info())
            }
            ShellCommand::RecipientsWithNeeds { needs } => {
                let rows: Vec<String> = engine
                    .recipients_with_needs(needs)
                    .iter()
                    .map(Recipient::info)
                    .collect();
                numbered_table(&format!("RECIPIENTS: {}", needs.as_str().to_uppercase()), &rows)
            }
            ShellCommand::RecipientList => {
                let report = engine.recipient_report();
                format!(
                    "{}\nTotal dependents: {}",
                    numbered_table("RECIPIENTS", &report.recipients),
                    report.total_dependents
                )
            }
            ShellCommand::Distribute {
                recipient_id,
                portions,
                note,
            } => {
                let record = engine.distribute_at(
                    &recipient_id,
                    portions,
                    note.as_deref(),
                    chrono::Utc::now(),
                )?;
                format!(
                    "ok: {}\nRemaining portions: {}",
                    record.info(),
                    engine.compute_available_portions()
                )
            }
            ShellCommand::History { recipient_id } => {
                let rows: Vec<String> = engine
                    .distributions_for(&recipient_id)?
                    .iter()
                    .map(|d| d.info())
                    .collect();
                numbered_table(&format!("DISTRIBUTIONS TO {recipient_id}"), &rows)
            }
            ShellCommand::Report(kind) => render_report(engine, kind, ansi),
            ShellCommand::Help => HELP.to_string(),
            ShellCommand::Quit => String::new(),
        };
        Ok(text)
    }
}

fn render_report<B>(engine: &InMemoryKitchen<B>, kind: ReportKind, ansi: bool) -> String
where
    B: EventBus<KitchenEvent>,
{
    match kind {
        ReportKind::Stock => {
            let r = engine.stock_report();
            format!(
                "{}\nItems: {} | Available portions: {} | Low stock: {}",
                numbered_table("STOCK REPORT", &r.items),
                r.total_items,
                r.total_available_portions,
                r.low_stock_count
            )
        }
        ReportKind::Recipients => {
            let r = engine.recipient_report();
            format!(
                "{}\nRecipients: {} | Dependents: {}",
                numbered_table("RECIPIENT REPORT", &r.recipients),
                r.total_recipients,
                r.total_dependents
            )
        }
        ReportKind::Distributions => {
            let r = engine.distribution_report();
            format!(
                "{}\nDistributions: {} | Portions handed out: {}",
                numbered_table("DISTRIBUTION REPORT", &r.distributions),
                r.total_distributions,
                r.total_portions_distributed
            )
        }
        ReportKind::Nutrition => nutrition_summary(&engine.nutrition_status(), ansi),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_demo_data;
    use campkitchen_events::NoopEventBus;
    use campkitchen_kitchen::{KitchenConfig, KitchenEngine};

    fn test_shell() -> Shell<NoopEventBus> {
        let mut engine = KitchenEngine::in_memory(KitchenConfig::default(), NoopEventBus);
        seed_demo_data(&mut engine).unwrap();
        Shell::new(engine, false)
    }

    fn text(flow: Flow) -> String {
        match flow {
            Flow::Continue(text) => text,
            Flow::Quit => panic!("Expected Continue, got Quit"),
        }
    }

    #[test]
    fn seeded_shell_reports_bottleneck() {
        let mut shell = test_shell();
        let out = text(shell.handle_line("stock list"));
        assert!(out.contains("Total available portions: 300"));
        assert!(out.contains("1. Chicken: 50.00 kg"));
    }

    #[test]
    fn distribute_debits_rice_and_reports_remaining() {
        let mut shell = test_shell();
        let out = text(shell.handle_line("distribute KRB-001 10"));
        assert!(out.starts_with("ok: Distribution DIST-"));
        assert_eq!(shell.engine().stock_item("Rice").unwrap().quantity(), 97.5);
    }

    #[test]
    fn domain_and_parse_errors_are_rendered_not_fatal() {
        let mut shell = test_shell();
        let out = text(shell.handle_line("distribute KRB-999 1"));
        assert!(out.starts_with("error: "));
        assert!(out.contains("KRB-999"));

        let out = text(shell.handle_line("distribute KRB-001 many"));
        assert!(out.starts_with("error: "));

        let out = text(shell.handle_line("recipient add KRB-001 general 2 Someone Else"));
        assert!(out.starts_with("error: "));
    }

    #[test]
    fn run_loop_stops_at_quit() {
        let mut shell = test_shell();
        let input = "report nutrition\n\nquit\nstock list\n";
        let mut output = Vec::new();
        shell.run(input.as_bytes(), &mut output).unwrap();

        let out = String::from_utf8(output).unwrap();
        assert!(out.contains("Survival estimate  : 11 days"));
        assert!(out.trim_end().ends_with("Goodbye."));
        assert!(!out.contains("FOOD STOCK"));
    }

    #[test]
    fn recipient_commands_round_trip_through_engine() {
        let mut shell = test_shell();
        text(shell.handle_line("recipient add KRB-004 sick 1 Dewi Lestari"));
        text(shell.handle_line("recipient update KRB-004 3"));

        let out = text(shell.handle_line("recipient show KRB-004"));
        assert!(out.contains("Dewi Lestari"));
        assert!(out.contains("Dependents: 3"));

        let out = text(shell.handle_line("recipient needs sick"));
        assert!(out.contains("1. [RECIPIENT] Dewi Lestari"));
    }
}
