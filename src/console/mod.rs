//! # Console
//!
//! The counter terminal: shows the menu, edits one order at a time and hands
//! it to the restaurant at checkout.
//!
//! Reads commands line by line from any [`AsyncBufRead`] and writes to any
//! [`Write`], so a session can be scripted in tests. See [`Command`] for the
//! input syntax.

mod command;

pub use command::{Command, InvalidChoice};

use crate::lifecycle::{Restaurant, ServiceError};
use crate::model::{ItemId, MenuCatalog, Order, OrderError};
use std::io::Write;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

const HELP: &str = "\
Commands:
  ?          this help
  m          show the menu
  s          show your order
  c          check out
  0          quit
  <n>        add one of item n
  <n> <qty>  add qty of item n
  -<n>       remove item n
  -<n> <qty> remove qty of item n
";

pub struct Console<'a, R, W> {
    restaurant: &'a dyn Restaurant,
    input: R,
    output: W,
    order: Order,
}

impl<'a, R, W> Console<'a, R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(restaurant: &'a dyn Restaurant, input: R, output: W) -> Self {
        let order = restaurant.new_order();
        Self {
            restaurant,
            input,
            output,
            order,
        }
    }

    /// The order being built.
    pub fn order(&self) -> &Order {
        &self.order
    }

    /// Runs until the user quits or input ends.
    pub async fn run(&mut self) -> Result<(), ConsoleError> {
        writeln!(self.output, "Welcome to {}", self.restaurant.name())?;
        self.print_menu()?;

        let mut line = String::new();
        loop {
            write!(self.output, "Command [? for help]: ")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line).await? == 0 {
                writeln!(self.output)?;
                break;
            }
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command).await?,
                Err(e) => {
                    debug!(input = %e.0, "Unrecognized command");
                    writeln!(self.output, "{}", e)?;
                }
            }
        }

        if !self.order.is_empty() {
            info!(items = self.order.item_ids().len(), "Unfinished order discarded");
        }
        writeln!(self.output, "Thank you for visiting {}", self.restaurant.name())?;
        self.output.flush()?;
        Ok(())
    }

    async fn execute(&mut self, command: Command) -> Result<(), ConsoleError> {
        match command {
            Command::Help => write!(self.output, "{}", HELP)?,
            Command::Menu => self.print_menu()?,
            Command::Show => write!(self.output, "{}", self.order.receipt())?,
            Command::Checkout => self.checkout().await?,
            Command::Quit => {}
            Command::Add { id, quantity } => {
                let result = self.order.add_item(id, quantity);
                self.report_change(id, result)?;
            }
            Command::Remove { id, quantity } => {
                let result = match quantity {
                    Some(quantity) => self.order.remove_quantity(id, quantity),
                    None => self.order.remove_item(id),
                };
                self.report_change(id, result)?;
            }
        }
        Ok(())
    }

    fn report_change(&mut self, id: ItemId, result: Result<(), OrderError>) -> Result<(), ConsoleError> {
        match result {
            Ok(()) => {
                let name = self.item_name(id);
                let quantity = self.order.quantity_of(id);
                writeln!(self.output, "{} now {}", name, quantity)?;
            }
            Err(e) => writeln!(self.output, "{}", e)?,
        }
        Ok(())
    }

    async fn checkout(&mut self) -> Result<(), ConsoleError> {
        match self.restaurant.finalize_order(&mut self.order).await {
            Ok(number) => {
                write!(self.output, "{}", self.order.receipt())?;
                writeln!(self.output, "Your order number is {}", number)?;
                self.order = self.restaurant.new_order();
            }
            Err(ServiceError::Record { number, source }) => {
                warn!(%number, error = %source, "Receipt printed without a ledger record");
                write!(self.output, "{}", self.order.receipt())?;
                writeln!(
                    self.output,
                    "Your order number is {} (not recorded: {})",
                    number, source
                )?;
                self.order = self.restaurant.new_order();
            }
            Err(e) => writeln!(self.output, "{}", e)?,
        }
        Ok(())
    }

    fn item_name(&self, id: ItemId) -> String {
        self.order
            .catalog()
            .get(id)
            .map(|line| line.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    fn print_menu(&mut self) -> Result<(), ConsoleError> {
        write_menu(&mut self.output, &self.restaurant.menu())?;
        Ok(())
    }
}

/// Prints the menu, one numbered line per item.
pub fn write_menu(output: &mut impl Write, menu: &MenuCatalog) -> std::io::Result<()> {
    if menu.is_empty() {
        return writeln!(output, "The menu is empty");
    }
    for line in menu.lines() {
        writeln!(
            output,
            "{:>2}) {:<24.24} {:>6.2}",
            line.id, line.name, line.unit_price
        )?;
    }
    Ok(())
}
