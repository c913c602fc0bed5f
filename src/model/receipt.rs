//! Read-only receipt view of an order and its text rendering.
//!
//! The same text is printed at the counter and appended to the ledger, so each
//! rendering ends with a blank line to keep ledger records apart.

use crate::model::{ItemId, OrderNumber};
use chrono::{DateTime, Local};
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine {
    pub id: ItemId,
    pub name: String,
    pub quantity: u64,
    pub unit_price: f64,
    pub line_total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub number: Option<OrderNumber>,
    pub timestamp: Option<DateTime<Local>>,
    pub lines: Vec<ReceiptLine>,
    pub total: f64,
}

impl Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(number) = self.number {
            writeln!(f, "Order No. {}", number)?;
        }
        if let Some(timestamp) = self.timestamp {
            writeln!(f, "Received {}", timestamp.format("%Y-%m-%d %H:%M:%S"))?;
        }
        if self.lines.is_empty() {
            writeln!(f, "No items in order")?;
        } else {
            writeln!(f, "Item# {:<24.24} {:>4}  {:>8}", "Description", "Qnty", "Price")?;
            for line in &self.lines {
                writeln!(
                    f,
                    "{:>4}  {:<24.24} {:>4}  {:>8.2}",
                    line.id, line.name, line.quantity, line.line_total
                )?;
            }
            writeln!(f, "      {:<24.24}       {:>8.2}", "Total Price", self.total)?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Receipt {
        Receipt {
            number: Some(OrderNumber(7)),
            timestamp: Local.with_ymd_and_hms(2026, 10, 19, 12, 34, 56).single(),
            lines: vec![
                ReceiptLine {
                    id: ItemId(1),
                    name: "Pizza".to_string(),
                    quantity: 2,
                    unit_price: 250.0,
                    line_total: 500.0,
                },
                ReceiptLine {
                    id: ItemId(2),
                    name: "Salad".to_string(),
                    quantity: 1,
                    unit_price: 30.0,
                    line_total: 30.0,
                },
            ],
            total: 530.0,
        }
    }

    #[test]
    fn test_rendering_has_number_timestamp_and_total() {
        let text = sample().to_string();

        assert!(text.starts_with("Order No. 7\n"));
        assert!(text.contains("Received 2026-10-19 12:34:56\n"));
        assert!(text.contains("Pizza"));
        assert!(text.contains("500.00"));
        assert!(text.contains("530.00"));
    }

    #[test]
    fn test_rendering_is_terminated_by_blank_line() {
        let text = sample().to_string();
        assert!(text.ends_with("\n\n"));
        assert_eq!(text.matches("\n\n").count(), 1);
    }

    #[test]
    fn test_empty_unfinalized_receipt() {
        let receipt = Receipt {
            number: None,
            timestamp: None,
            lines: vec![],
            total: 0.0,
        };
        assert_eq!(receipt.to_string(), "No items in order\n\n");
    }
}
