// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

use anyhow::{Context, Result};
use clap::ValueEnum;
use subrank::{Direction, RunMode, Value};

/// How `--value` is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ValueKind {
    /// Integer, then float, then boolean, otherwise string
    #[default]
    Auto,
    Int,
    Float,
    Bool,
    #[value(name = "string")]
    Text,
}

pub fn parse_value(raw: &str, kind: ValueKind) -> Result<Value> {
    Ok(match kind {
        ValueKind::Int => Value::Int(
            raw.parse()
                .with_context(|| format!("'{raw}' is not an integer"))?,
        ),
        ValueKind::Float => Value::Float(
            raw.parse()
                .with_context(|| format!("'{raw}' is not a number"))?,
        ),
        ValueKind::Bool => Value::Bool(
            raw.parse()
                .with_context(|| format!("'{raw}' is not a boolean"))?,
        ),
        ValueKind::Text => Value::from(raw),
        ValueKind::Auto => {
            if let Ok(i) = raw.parse::<i64>() {
                Value::Int(i)
            } else if let Ok(f) = raw.parse::<f64>() {
                Value::Float(f)
            } else if let Ok(b) = raw.parse::<bool>() {
                Value::Bool(b)
            } else {
                Value::from(raw)
            }
        }
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    All,
    Materialized,
    Filtered,
    FilteredIds,
}

impl ModeArg {
    pub fn modes(self) -> Vec<RunMode> {
        match self {
            ModeArg::All => RunMode::ALL.to_vec(),
            ModeArg::Materialized => vec![RunMode::Materialized],
            ModeArg::Filtered => vec![RunMode::Filtered],
            ModeArg::FilteredIds => vec![RunMode::FilteredIds],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    Out,
    In,
    Both,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Out => Direction::Outgoing,
            DirectionArg::In => Direction::Incoming,
            DirectionArg::Both => Direction::Both,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_value_detection() {
        assert_eq!(parse_value("204984", ValueKind::Auto).unwrap(), Value::Int(204984));
        assert_eq!(parse_value("0.5", ValueKind::Auto).unwrap(), Value::Float(0.5));
        assert_eq!(parse_value("true", ValueKind::Auto).unwrap(), Value::Bool(true));
        assert_eq!(
            parse_value("Dark Star", ValueKind::Auto).unwrap(),
            Value::String("Dark Star".into())
        );
    }

    #[test]
    fn test_forced_kinds() {
        assert_eq!(
            parse_value("204984", ValueKind::Text).unwrap(),
            Value::String("204984".into())
        );
        assert!(parse_value("abc", ValueKind::Int).is_err());
        assert_eq!(parse_value("3", ValueKind::Float).unwrap(), Value::Float(3.0));
    }

    #[test]
    fn test_mode_expansion() {
        assert_eq!(ModeArg::All.modes().len(), 3);
        assert_eq!(ModeArg::FilteredIds.modes(), vec![RunMode::FilteredIds]);
    }
}
