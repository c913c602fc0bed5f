use crate::model::ItemId;
use std::str::FromStr;
use thiserror::Error;

/// One line of console input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Menu,
    Show,
    Checkout,
    Quit,
    /// `<n>` or `<n> <qty>`
    Add { id: ItemId, quantity: i64 },
    /// `-<n>` removes every unit, `-<n> <qty>` removes up to `qty`.
    Remove { id: ItemId, quantity: Option<i64> },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid choice: {0}")]
pub struct InvalidChoice(pub String);

impl FromStr for Command {
    type Err = InvalidChoice;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidChoice(line.trim().to_string());
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            return Err(invalid());
        };
        let second = words.next();
        if words.next().is_some() {
            return Err(invalid());
        }

        let keyword = match first.to_ascii_lowercase().as_str() {
            "?" | "h" | "help" => Some(Command::Help),
            "m" => Some(Command::Menu),
            "s" => Some(Command::Show),
            "c" => Some(Command::Checkout),
            "0" | "q" => Some(Command::Quit),
            _ => None,
        };
        if let Some(command) = keyword {
            return match second {
                None => Ok(command),
                Some(_) => Err(invalid()),
            };
        }

        let quantity = match second {
            Some(word) => Some(word.parse::<i64>().map_err(|_| invalid())?),
            None => None,
        };

        match first.strip_prefix('-') {
            Some(id) => {
                let id = id.parse::<u32>().map_err(|_| invalid())?;
                Ok(Command::Remove {
                    id: ItemId(id),
                    quantity,
                })
            }
            None => {
                let id = first.parse::<u32>().map_err(|_| invalid())?;
                Ok(Command::Add {
                    id: ItemId(id),
                    quantity: quantity.unwrap_or(1),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        assert_eq!("?".parse(), Ok(Command::Help));
        assert_eq!("m".parse(), Ok(Command::Menu));
        assert_eq!(" S ".parse(), Ok(Command::Show));
        assert_eq!("c".parse(), Ok(Command::Checkout));
        assert_eq!("0".parse(), Ok(Command::Quit));
        assert_eq!("q".parse(), Ok(Command::Quit));
    }

    #[test]
    fn test_add_and_remove() {
        assert_eq!(
            "3".parse(),
            Ok(Command::Add { id: ItemId(3), quantity: 1 })
        );
        assert_eq!(
            "3 4".parse(),
            Ok(Command::Add { id: ItemId(3), quantity: 4 })
        );
        assert_eq!(
            "-3".parse(),
            Ok(Command::Remove { id: ItemId(3), quantity: None })
        );
        assert_eq!(
            "-3 2".parse(),
            Ok(Command::Remove { id: ItemId(3), quantity: Some(2) })
        );
    }

    #[test]
    fn test_bad_quantities_still_parse_for_the_order_to_reject() {
        assert_eq!(
            "2 -1".parse(),
            Ok(Command::Add { id: ItemId(2), quantity: -1 })
        );
        assert_eq!(
            "2 0".parse(),
            Ok(Command::Add { id: ItemId(2), quantity: 0 })
        );
    }

    #[test]
    fn test_garbage_is_rejected() {
        for line in ["", "x", "m 2", "1 2 3", "1 two", "--1", "-", "1.5"] {
            assert_eq!(
                line.parse::<Command>(),
                Err(InvalidChoice(line.trim().to_string())),
                "line {:?}",
                line
            );
        }
    }
}
