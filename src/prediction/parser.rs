//! Free-text trade-call parsing
//!
//! Adviser calls arrive as short multilingual text blocks, one semantic
//! field per line, decorated with emoji and punctuation noise. Fields are
//! located by a static keyword table over the upper-cased text; numbers are
//! pulled out with a float-literal scanner.

use super::{AdviserPrediction, ParseError};
use crate::order::OrderSide;
use chrono::Utc;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

const BUY_KEYWORDS: &[&str] = &["BUY", "LONG"];
const SELL_KEYWORDS: &[&str] = &["SELL", "SHORT"];

/// Extractable prediction fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Open,
    TakeProfit,
    StopLoss,
}

/// Keyword table, matched by substring over upper-cased lines. New keyword
/// variants are additive entries here, not new branches.
const FIELD_KEYWORDS: &[(Field, &[&str])] = &[
    (Field::Open, &["OPEN", "ОТКРЫТИЕ", "ТОЧКА ВХОДА"]),
    (Field::TakeProfit, &["ЦЕЛИ", "TP", "ТЕЙК-ПРОФИТ"]),
    (Field::StopLoss, &["СТОП", "SL", "СТОП-ЛОСС"]),
];

/// Ordinal list markers stripped before number extraction
const ORDINAL_MARKERS: &[&str] = &[" 1-", " 2-", " 3-", " 4-"];

impl AdviserPrediction {
    /// Parse an adviser call into structured price sets.
    ///
    /// Deterministic: identical text yields identical fields (id and
    /// timestamp aside). Fails when the side or any price line is missing.
    pub fn parse(adviser: &str, text: &str) -> Result<Self, ParseError> {
        let upper = text.to_uppercase();

        let side = if SELL_KEYWORDS.iter().any(|kw| upper.contains(kw)) {
            OrderSide::Sell
        } else if BUY_KEYWORDS.iter().any(|kw| upper.contains(kw)) {
            OrderSide::Buy
        } else {
            return Err(ParseError::MissingSide);
        };

        let mut opens = None;
        let mut stop_losses = None;
        let mut take_profits = None;
        for line in upper.lines() {
            for (field, keywords) in FIELD_KEYWORDS {
                if keywords.iter().any(|kw| line.contains(kw)) {
                    // last matching line wins
                    let numbers = Some(extract_numbers(line));
                    match field {
                        Field::Open => opens = numbers,
                        Field::TakeProfit => take_profits = numbers,
                        Field::StopLoss => stop_losses = numbers,
                    }
                }
            }
        }

        Ok(Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            adviser: adviser.to_string(),
            side,
            opens: opens.ok_or(ParseError::MissingOpen)?,
            stop_losses: stop_losses.ok_or(ParseError::MissingStopLoss)?,
            take_profits: take_profits.ok_or(ParseError::MissingTakeProfit)?,
        })
    }
}

/// Extract every decimal/integer literal from a line, unsigned, ascending.
///
/// Equivalent to scanning for `[-+]?\d*\.?\d+` and taking absolute values,
/// after the ordinal markers are stripped.
fn extract_numbers(line: &str) -> Vec<Decimal> {
    let mut cleaned = line.to_string();
    for marker in ORDINAL_MARKERS {
        cleaned = cleaned.replace(marker, " ");
    }

    let chars: Vec<char> = cleaned.chars().collect();
    let mut numbers = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let mut j = i;
        if chars[j] == '+' || chars[j] == '-' {
            j += 1;
        }
        let int_start = j;
        while j < chars.len() && chars[j].is_ascii_digit() {
            j += 1;
        }
        let int_digits: String = chars[int_start..j].iter().collect();

        let mut frac_digits = String::new();
        if j < chars.len() && chars[j] == '.' && j + 1 < chars.len() && chars[j + 1].is_ascii_digit()
        {
            let frac_start = j + 1;
            let mut k = frac_start;
            while k < chars.len() && chars[k].is_ascii_digit() {
                k += 1;
            }
            frac_digits = chars[frac_start..k].iter().collect();
            j = k;
        }

        if int_digits.is_empty() && frac_digits.is_empty() {
            i += 1;
            continue;
        }

        let literal = if frac_digits.is_empty() {
            int_digits
        } else if int_digits.is_empty() {
            format!("0.{frac_digits}")
        } else {
            format!("{int_digits}.{frac_digits}")
        };
        if let Ok(value) = Decimal::from_str(&literal) {
            numbers.push(value);
        }
        i = j;
    }

    numbers.sort();
    numbers
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SOL_CALL: &str = "
    SOL | USDT = LONG

    Точка входа: 19.180
    Тейк-профит: 19.422 | 19.854
    Кредитное плечо: 50x
    Стоп-лосс: 18.609
    ";

    const LINK_CALL: &str = "
    🎈 #LINK/USDT - LONG📈

    🟢 Открытие - 6.342-6.153

    ✅ Цели - 1-6.411 2-6.475  3-6.529 4-6.611

    ♾ - Плечо - х20 (Cross)

    🔴 Стоп - 5.965
    ";

    #[test]
    fn test_parse_sol_call() {
        let prediction = AdviserPrediction::parse("adviser", SOL_CALL).unwrap();
        assert_eq!(prediction.side, OrderSide::Buy);
        assert_eq!(prediction.opens, vec![dec!(19.180)]);
        assert_eq!(prediction.take_profits, vec![dec!(19.422), dec!(19.854)]);
        assert_eq!(prediction.stop_losses, vec![dec!(18.609)]);
    }

    #[test]
    fn test_parse_link_call() {
        let prediction = AdviserPrediction::parse("adviser", LINK_CALL).unwrap();
        assert_eq!(prediction.side, OrderSide::Buy);
        // entry range is split into both bounds, ascending
        assert_eq!(prediction.opens, vec![dec!(6.153), dec!(6.342)]);
        assert_eq!(
            prediction.take_profits,
            vec![dec!(6.411), dec!(6.475), dec!(6.529), dec!(6.611)]
        );
        assert_eq!(prediction.stop_losses, vec![dec!(5.965)]);
    }

    #[test]
    fn test_parse_short_call() {
        let text = "ETH SHORT\nOpen: 2400\nSL: 2500\nTP: 2100";
        let prediction = AdviserPrediction::parse("adviser", text).unwrap();
        assert_eq!(prediction.side, OrderSide::Sell);
        assert_eq!(prediction.opens, vec![dec!(2400)]);
        assert_eq!(prediction.stop_losses, vec![dec!(2500)]);
        assert_eq!(prediction.take_profits, vec![dec!(2100)]);
    }

    #[test]
    fn test_missing_side() {
        let text = "Open: 2400\nSL: 2500\nTP: 2100";
        assert_eq!(
            AdviserPrediction::parse("adviser", text).unwrap_err(),
            ParseError::MissingSide
        );
    }

    #[test]
    fn test_missing_stop_loss() {
        let text = "BTC LONG\nOpen: 64000\nTP: 70000";
        assert_eq!(
            AdviserPrediction::parse("adviser", text).unwrap_err(),
            ParseError::MissingStopLoss
        );
    }

    #[test]
    fn test_missing_open() {
        let text = "BTC LONG\nSL: 60000\nTP: 70000";
        assert_eq!(
            AdviserPrediction::parse("adviser", text).unwrap_err(),
            ParseError::MissingOpen
        );
    }

    #[test]
    fn test_missing_take_profit() {
        let text = "BTC LONG\nOpen: 64000\nSL: 60000";
        assert_eq!(
            AdviserPrediction::parse("adviser", text).unwrap_err(),
            ParseError::MissingTakeProfit
        );
    }

    #[test]
    fn test_last_matching_line_wins() {
        let text = "BTC LONG\nOpen: 64000\nSL: 60000\nTP: 70000\nSL: 61000";
        let prediction = AdviserPrediction::parse("adviser", text).unwrap();
        assert_eq!(prediction.stop_losses, vec![dec!(61000)]);
    }

    #[test]
    fn test_extract_numbers_range() {
        assert_eq!(
            extract_numbers("ОТКРЫТИЕ - 6.342-6.153"),
            vec![dec!(6.153), dec!(6.342)]
        );
    }

    #[test]
    fn test_extract_numbers_strips_ordinals() {
        assert_eq!(
            extract_numbers("ЦЕЛИ - 1-6.411 2-6.475  3-6.529 4-6.611"),
            vec![dec!(6.411), dec!(6.475), dec!(6.529), dec!(6.611)]
        );
    }

    #[test]
    fn test_extract_numbers_bare_fraction_and_sign() {
        assert_eq!(extract_numbers("SL .75"), vec![dec!(0.75)]);
        assert_eq!(extract_numbers("SL -19.2"), vec![dec!(19.2)]);
    }

    #[test]
    fn test_extract_numbers_trailing_dot() {
        // the dot is not part of the number unless digits follow it
        assert_eq!(extract_numbers("TP 19."), vec![dec!(19)]);
    }
}
