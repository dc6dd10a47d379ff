//! Prompt text for the comparative summary

use crate::error::Result;
use crate::series::{PriceSeries, Symbol};

/// System instruction for the comparative summary
pub const COMPARISON_SYSTEM_PROMPT: &str = "You are a financial assistant that will retrieve two tables of financial market data and \
will summarize the comparative performance in text, in full detail with highlights for \
each stock and also a conclusion with a markdown output. BE VERY STRICT ON YOUR OUTPUT";

/// User message embedding both raw series, every row and every column
pub fn comparison_user_prompt(
    first_symbol: &Symbol,
    first: &PriceSeries,
    second_symbol: &Symbol,
    second: &PriceSeries,
) -> Result<String> {
    let first_data = serde_json::to_string(&first.to_columns())?;
    let second_data = serde_json::to_string(&second.to_columns())?;

    Ok(format!(
        "This is the {first_symbol} stock data: {first_data}, \
         this is {second_symbol} stock data: {second_data}"
    ))
}
