use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Returns the one-letter code used in the input spreadsheet ("C" or "P").
    pub fn code(&self) -> &'static str {
        match self {
            OptionType::Call => "C",
            OptionType::Put => "P",
        }
    }
}

impl FromStr for OptionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "C" | "c" => Ok(OptionType::Call),
            "P" | "p" => Ok(OptionType::Put),
            other => Err(CoreError::InvalidInput(
                "callPut".to_string(),
                other.to_string(),
            )),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    /// Returns the one-letter code used in the input spreadsheet ("B" or "S").
    pub fn code(&self) -> &'static str {
        match self {
            TradeSide::Buy => "B",
            TradeSide::Sell => "S",
        }
    }
}

impl FromStr for TradeSide {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "B" | "b" => Ok(TradeSide::Buy),
            "S" | "s" => Ok(TradeSide::Sell),
            other => Err(CoreError::InvalidInput(
                "side".to_string(),
                other.to_string(),
            )),
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "Buy"),
            TradeSide::Sell => write!(f, "Sell"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_codes() {
        assert_eq!("C".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!("p".parse::<OptionType>().unwrap(), OptionType::Put);
        assert_eq!("B".parse::<TradeSide>().unwrap(), TradeSide::Buy);
        assert_eq!(" S ".parse::<TradeSide>().unwrap(), TradeSide::Sell);
    }

    #[test]
    fn rejects_unknown_codes() {
        assert!("X".parse::<OptionType>().is_err());
        assert!("".parse::<TradeSide>().is_err());
    }

    #[test]
    fn round_trips_codes() {
        assert_eq!(OptionType::Call.code(), "C");
        assert_eq!(TradeSide::Sell.code(), "S");
    }
}
