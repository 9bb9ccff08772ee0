use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeFrameError {
    #[error("Invalid amount for {:?}: {}", unit, message)]
    InvalidAmount {
        unit: TimeFrameUnit,
        message: String,
    },

    #[error("Invalid input: {}", message)]
    InvalidInput { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFrameUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

/// Bar aggregation interval.
///
/// `Display` renders the label the host platform uses for the interval
/// (`Minute`, `Minute5`, `Hour4`, `Daily`, ...). The file identity resolver
/// lower-cases that label when naming output files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeFrame {
    pub amount: u32,
    pub unit: TimeFrameUnit,
}

impl TimeFrame {
    pub fn new(amount: u32, unit: TimeFrameUnit) -> Result<Self, TimeFrameError> {
        Self::validate(amount, unit)?;
        Ok(Self { amount, unit })
    }

    fn validate(amount: u32, unit: TimeFrameUnit) -> Result<(), TimeFrameError> {
        match unit {
            _ if amount == 0 => Err(TimeFrameError::InvalidAmount {
                unit,
                message: "amount must be at least 1".into(),
            }),
            TimeFrameUnit::Day | TimeFrameUnit::Week | TimeFrameUnit::Month if amount != 1 => {
                Err(TimeFrameError::InvalidAmount {
                    unit,
                    message: "Day, Week and Month units can only be used with amount 1".into(),
                })
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = match self.unit {
            TimeFrameUnit::Minute => "Minute",
            TimeFrameUnit::Hour => "Hour",
            TimeFrameUnit::Day => "Daily",
            TimeFrameUnit::Week => "Weekly",
            TimeFrameUnit::Month => "Monthly",
        };
        if self.amount == 1 {
            write!(f, "{base}")
        } else {
            write!(f, "{base}{}", self.amount)
        }
    }
}

/// Parses the `--amount`/`--unit` pair the CLI accepts into a [`TimeFrame`].
pub fn parse_timeframe(amount: u32, unit: &str) -> Result<TimeFrame, TimeFrameError> {
    let unit = match unit.trim() {
        // "M" stays month before lower-casing so "m" can mean minute.
        "M" => TimeFrameUnit::Month,
        other => match other.to_lowercase().as_str() {
            "m" | "min" | "minute" => TimeFrameUnit::Minute,
            "h" | "hr" | "hour" => TimeFrameUnit::Hour,
            "d" | "day" => TimeFrameUnit::Day,
            "w" | "wk" | "week" => TimeFrameUnit::Week,
            "mo" | "month" => TimeFrameUnit::Month,
            _ => {
                return Err(TimeFrameError::InvalidInput {
                    message: format!("Invalid timeframe unit: {unit}"),
                });
            }
        },
    };
    TimeFrame::new(amount, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod timeframe_creation_tests {
        use super::*;

        #[test]
        fn test_valid_minute_timeframe() {
            let tf = TimeFrame::new(5, TimeFrameUnit::Minute).unwrap();
            assert_eq!(tf.amount, 5);
            assert!(matches!(tf.unit, TimeFrameUnit::Minute));
        }

        #[test]
        fn test_zero_amount_is_rejected() {
            assert!(TimeFrame::new(0, TimeFrameUnit::Minute).is_err());
            assert!(TimeFrame::new(0, TimeFrameUnit::Hour).is_err());
        }

        #[test]
        fn test_invalid_day_timeframe() {
            match TimeFrame::new(2, TimeFrameUnit::Day) {
                Err(TimeFrameError::InvalidAmount { unit, message }) => {
                    assert_eq!(unit, TimeFrameUnit::Day);
                    assert!(message.contains("amount 1"));
                }
                other => panic!("Expected InvalidAmount error, got {other:?}"),
            }
        }
    }

    mod label_tests {
        use super::*;

        #[test]
        fn test_single_unit_labels() {
            let label = |unit| TimeFrame::new(1, unit).unwrap().to_string();
            assert_eq!(label(TimeFrameUnit::Minute), "Minute");
            assert_eq!(label(TimeFrameUnit::Hour), "Hour");
            assert_eq!(label(TimeFrameUnit::Day), "Daily");
            assert_eq!(label(TimeFrameUnit::Week), "Weekly");
            assert_eq!(label(TimeFrameUnit::Month), "Monthly");
        }

        #[test]
        fn test_multiple_unit_labels() {
            assert_eq!(
                TimeFrame::new(5, TimeFrameUnit::Minute).unwrap().to_string(),
                "Minute5"
            );
            assert_eq!(
                TimeFrame::new(4, TimeFrameUnit::Hour).unwrap().to_string(),
                "Hour4"
            );
        }
    }

    #[test]
    fn test_parse_timeframe() {
        assert_eq!(
            parse_timeframe(5, "m").unwrap(),
            TimeFrame { amount: 5, unit: TimeFrameUnit::Minute }
        );
        assert_eq!(
            parse_timeframe(2, "h").unwrap(),
            TimeFrame { amount: 2, unit: TimeFrameUnit::Hour }
        );
        assert_eq!(
            parse_timeframe(1, "d").unwrap(),
            TimeFrame { amount: 1, unit: TimeFrameUnit::Day }
        );
        assert_eq!(parse_timeframe(1, "M").unwrap().unit, TimeFrameUnit::Month);

        assert!(parse_timeframe(2, "d").is_err()); // Day only supports amount=1
        assert!(parse_timeframe(5, "invalid").is_err());
    }
}
