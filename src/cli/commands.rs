//! Shell state and command dispatch. Commands are view glue: every
//! business rule lives in the engine, this layer only renders results.

use std::fmt::Write as _;
use std::fs;

use chrono::Local;

use crate::cli::output;
use crate::config::{Config, ConfigManager};
use crate::core::engine::BillingEngine;
use crate::core::errors::CliError;
use crate::core::services::{parse_amount, BillSplit, BillingService};
use crate::report;
use crate::storage::JsonStore;

/// Whether the loop keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// A quote the user computed but has not committed yet. `apply` only
/// works while one of these is held, mirroring the compute-then-confirm
/// flow of the engine contract.
struct PendingBill {
    amount: f64,
    split: BillSplit,
}

pub struct ShellContext {
    engine: BillingEngine,
    config: Config,
    pending: Option<PendingBill>,
}

impl ShellContext {
    pub fn new() -> Result<Self, CliError> {
        let manager = ConfigManager::with_base_dir(ConfigManager::default_base())
            .map_err(|err| CliError::Command(err.to_string()))?;
        let config = manager.load().unwrap_or_else(|err| {
            output::warning(format!("could not read config, using defaults: {err}"));
            Config::default()
        });

        let data_file = config
            .data_file
            .clone()
            .unwrap_or_else(JsonStore::default_location);
        let engine = BillingEngine::load(Box::new(JsonStore::new(data_file)));

        Ok(Self {
            engine,
            config,
            pending: None,
        })
    }

    #[cfg(test)]
    pub fn with_engine(engine: BillingEngine, config: Config) -> Self {
        Self {
            engine,
            config,
            pending: None,
        }
    }

    pub fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<LoopControl, CliError> {
        match command {
            "help" => {
                self.print_help();
                Ok(LoopControl::Continue)
            }
            "rooms" => {
                self.list_rooms();
                Ok(LoopControl::Continue)
            }
            "bill" => self.handle_bill(args),
            "apply" => self.handle_apply(),
            "edit" => self.handle_edit(args),
            "pay" => self.handle_pay(args),
            "reset" => self.handle_reset(args),
            "invoice" => self.handle_invoice(args),
            "save" => self.handle_save(),
            "exit" | "quit" => Ok(LoopControl::Exit),
            other => Err(CliError::Input(format!(
                "unknown command `{}`, try `help`",
                other
            ))),
        }
    }

    fn print_help(&self) {
        output::section("Commands");
        output::block(concat!(
            "  rooms                     list rooms and balances\n",
            "  bill <amount>             quote the split for a bill amount\n",
            "  apply                     commit the quoted split to all rooms\n",
            "  edit <room> [name=..] [laptops=..] [others=..]\n",
            "                            update room fields\n",
            "  pay <room> <amount>       record a payment against a room\n",
            "  reset <room>              zero a room's balance\n",
            "  invoice <room> [export]   render the invoice for the quoted bill\n",
            "  save                      retry persisting the current state\n",
            "  exit                      leave the shell",
        ));
    }

    fn list_rooms(&self) {
        output::section("Rooms");
        let mut table = String::new();
        let _ = writeln!(
            table,
            "  {:<6} {:<20} {:>8} {:>10} {:>12}",
            "room", "responsible", "laptops", "others", "balance"
        );
        for room in self.engine.rooms() {
            let _ = writeln!(
                table,
                "  {:<6} {:<20} {:>8} {:>10} {:>12.2}",
                room.id,
                room.responsible_name,
                room.laptop_count,
                room.no_laptop_count,
                room.accumulated_balance
            );
        }
        let _ = writeln!(
            table,
            "  {:<6} {:<20} {:>8} {:>10} {:>12.2}",
            "",
            "total",
            self.engine.ledger().total_with_laptop(),
            self.engine.ledger().total_students() - self.engine.ledger().total_with_laptop(),
            self.engine.ledger().total_balance()
        );
        output::block(table.trim_end());
    }

    fn handle_bill(&mut self, args: &[&str]) -> Result<LoopControl, CliError> {
        let [amount_text] = args else {
            return Err(CliError::Input("usage: bill <amount>".into()));
        };
        let amount = parse_amount(amount_text)?;
        let split = self.engine.compute_split(amount_text)?;

        output::success(format!(
            "per-student rate {:.2}, laptop surcharge {:.2}",
            split.student_share, split.laptop_share
        ));
        for room in self.engine.rooms() {
            if room.occupants() > 0 {
                output::info(format!(
                    "room {} would be charged {:.2}",
                    room.id,
                    BillingService::room_charge(room, &split)
                ));
            }
        }
        output::info("run `apply` to commit, or `bill` again to requote");
        self.pending = Some(PendingBill { amount, split });
        Ok(LoopControl::Continue)
    }

    fn handle_apply(&mut self) -> Result<LoopControl, CliError> {
        let Some(pending) = self.pending.take() else {
            return Err(CliError::Input("no quoted bill; run `bill <amount>` first".into()));
        };
        if self.engine.apply_split(&pending.split) {
            output::success(format!(
                "applied bill of {:.2} to all rooms",
                pending.amount
            ));
        } else {
            output::warning(
                "bill applied in memory but saving failed; run `save` to retry persisting",
            );
        }
        Ok(LoopControl::Continue)
    }

    fn handle_edit(&mut self, args: &[&str]) -> Result<LoopControl, CliError> {
        let Some((room_id, fields)) = args.split_first() else {
            return Err(CliError::Input(
                "usage: edit <room> [name=..] [laptops=..] [others=..]".into(),
            ));
        };
        let mut name = None;
        let mut laptops = None;
        let mut others = None;
        for field in fields {
            match field.split_once('=') {
                Some(("name", value)) => name = Some(value),
                Some(("laptops", value)) => laptops = Some(value),
                Some(("others", value)) => others = Some(value),
                _ => {
                    return Err(CliError::Input(format!(
                        "unrecognized field `{}` (expected name=, laptops=, others=)",
                        field
                    )))
                }
            }
        }
        if name.is_none() && laptops.is_none() && others.is_none() {
            return Err(CliError::Input("nothing to change".into()));
        }
        self.engine.update_room(room_id, name, laptops, others)?;
        output::success(format!("room {} updated", room_id));
        Ok(LoopControl::Continue)
    }

    fn handle_pay(&mut self, args: &[&str]) -> Result<LoopControl, CliError> {
        let [room_id, amount_text] = args else {
            return Err(CliError::Input("usage: pay <room> <amount>".into()));
        };
        let paid = self.engine.pay(room_id, amount_text)?;
        let balance = self
            .engine
            .room(room_id)
            .map(|room| room.accumulated_balance)
            .unwrap_or_default();
        output::success(format!(
            "paid {:.2} for room {}, balance now {:.2}",
            paid, room_id, balance
        ));
        Ok(LoopControl::Continue)
    }

    fn handle_reset(&mut self, args: &[&str]) -> Result<LoopControl, CliError> {
        let [room_id] = args else {
            return Err(CliError::Input("usage: reset <room>".into()));
        };
        self.engine.reset_balance(room_id)?;
        output::success(format!("room {} balance reset to 0.00", room_id));
        Ok(LoopControl::Continue)
    }

    fn handle_invoice(&mut self, args: &[&str]) -> Result<LoopControl, CliError> {
        let (room_id, export) = match args {
            [room_id] => (*room_id, false),
            [room_id, "export"] => (*room_id, true),
            _ => return Err(CliError::Input("usage: invoice <room> [export]".into())),
        };
        let Some(pending) = self.pending.as_ref() else {
            return Err(CliError::Input(
                "invoices render against a quoted bill; run `bill <amount>` first".into(),
            ));
        };
        let room = self
            .engine
            .room(room_id)
            .ok_or_else(|| CliError::Input(format!("room {} not found", room_id)))?;

        let now = Local::now().naive_local();
        let text = report::render_invoice(
            room,
            &pending.split,
            pending.amount,
            &self.config.invoice,
            now.date(),
        );
        if export {
            let file_name = report::invoice_file_name(room_id, now);
            fs::write(&file_name, &text)?;
            output::success(format!("invoice written to {}", file_name));
        } else {
            output::block(&text);
        }
        Ok(LoopControl::Continue)
    }

    fn handle_save(&mut self) -> Result<LoopControl, CliError> {
        if self.engine.save() {
            output::success("ledger saved");
            Ok(LoopControl::Continue)
        } else {
            Err(CliError::Command("saving failed again; state kept in memory".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoomLedger;
    use crate::storage::{JsonStore, LedgerStore};
    use tempfile::tempdir;

    fn context() -> (tempfile::TempDir, ShellContext) {
        let temp = tempdir().unwrap();
        let store = JsonStore::in_dir(temp.path());
        let mut ledger = RoomLedger::seeded();
        {
            let room = ledger.room_mut("13").unwrap();
            room.laptop_count = 2;
            room.no_laptop_count = 3;
        }
        store.save(&ledger).unwrap();
        let engine = BillingEngine::load(Box::new(store));
        (temp, ShellContext::with_engine(engine, Config::default()))
    }

    #[test]
    fn bill_then_apply_charges_rooms() {
        let (_temp, mut ctx) = context();
        ctx.dispatch("bill", &["100"]).unwrap();
        ctx.dispatch("apply", &[]).unwrap();
        assert!((ctx.engine.ledger().total_balance() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn bill_quotes_padded_amounts_at_full_value() {
        let (_temp, mut ctx) = context();
        ctx.dispatch("bill", &["  100  "]).unwrap();
        ctx.dispatch("apply", &[]).unwrap();
        assert!((ctx.engine.ledger().total_balance() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn apply_without_quote_is_an_input_error() {
        let (_temp, mut ctx) = context();
        assert!(matches!(
            ctx.dispatch("apply", &[]),
            Err(CliError::Input(_))
        ));
    }

    #[test]
    fn apply_consumes_the_quote() {
        let (_temp, mut ctx) = context();
        ctx.dispatch("bill", &["100"]).unwrap();
        ctx.dispatch("apply", &[]).unwrap();
        assert!(ctx.dispatch("apply", &[]).is_err());
    }

    #[test]
    fn edit_parses_key_value_fields() {
        let (_temp, mut ctx) = context();
        ctx.dispatch("edit", &["31", "name=Fares", "laptops=1"]).unwrap();
        let room = ctx.engine.room("31").unwrap();
        assert_eq!(room.responsible_name, "Fares");
        assert_eq!(room.laptop_count, 1);
    }

    #[test]
    fn unknown_command_reports_input_error() {
        let (_temp, mut ctx) = context();
        assert!(matches!(
            ctx.dispatch("frobnicate", &[]),
            Err(CliError::Input(_))
        ));
    }

    #[test]
    fn exit_terminates_the_loop() {
        let (_temp, mut ctx) = context();
        assert_eq!(ctx.dispatch("exit", &[]).unwrap(), LoopControl::Exit);
    }
}
