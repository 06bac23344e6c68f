//! Grounding context and system prompt assembly.
//!
//! Every figure the assistant may reference comes from a single portfolio
//! snapshot read at the start of the turn; the prompt never carries data the
//! store does not hold.

use folio_core::holdings::{Portfolio, PricedHolding};
use rust_decimal::Decimal;
use std::fmt::Write;

/// Marker injected when no portfolio has been uploaded yet.
pub const NO_PORTFOLIO_MARKER: &str = "No portfolio data available.";

/// Render the portfolio snapshot as plain-text grounding context.
pub fn portfolio_context(portfolio: Option<&Portfolio>) -> String {
    let Some(portfolio) = portfolio else {
        return NO_PORTFOLIO_MARKER.to_string();
    };

    let mut out = String::new();
    let _ = writeln!(out, "Total Investment: ₹{}", portfolio.total_investment);
    let _ = writeln!(out, "Current Value: ₹{}", portfolio.total_current_value);
    let _ = writeln!(
        out,
        "Total P&L: ₹{} ({}%)",
        signed(portfolio.total_pnl),
        signed(portfolio.total_pnl_percentage)
    );
    let _ = writeln!(out, "Number of Holdings: {}", portfolio.holdings.len());
    let _ = writeln!(out);
    let _ = writeln!(out, "Holdings Summary:");
    for holding in &portfolio.holdings {
        let _ = writeln!(out, "{}", holding_line(holding));
    }
    out.trim_end().to_string()
}

fn holding_line(holding: &PricedHolding) -> String {
    match holding.pnl_percentage {
        Some(pct) => format!(
            "- {}: {} shares @ ₹{}, P&L: {}%",
            holding.ticker_symbol,
            holding.quantity,
            holding.avg_buy_price,
            signed(pct)
        ),
        None => format!(
            "- {}: {} shares @ ₹{}, price unavailable",
            holding.ticker_symbol, holding.quantity, holding.avg_buy_price
        ),
    }
}

fn signed(value: Decimal) -> String {
    if value.is_sign_negative() {
        value.to_string()
    } else {
        format!("+{}", value)
    }
}

/// Assemble the system prompt for one chat turn.
pub fn system_preamble(portfolio_context: &str) -> String {
    format!(
        "You are a helpful Portfolio Assistant for an Indian stock market investor.\n\n\
PORTFOLIO DATA:\n{}\n\n\
GUIDELINES:\n\
- Answer only from the portfolio data above; never invent holdings or figures\n\
- Reference specific holdings when relevant\n\
- Format amounts in Indian style (₹ and lakhs/crores)\n\
- A holding marked \"price unavailable\" has no current valuation; say so instead of guessing\n\
- If no portfolio data is available, ask the user to upload a broker statement first",
        portfolio_context
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::holdings::RawHolding;
    use rust_decimal_macros::dec;

    fn sample_portfolio() -> Portfolio {
        let aapl = RawHolding {
            ticker_symbol: "AAPL".to_string(),
            stock_name: "Apple".to_string(),
            quantity: dec!(10),
            avg_buy_price: dec!(100),
            sector: None,
        };
        let ghost = RawHolding {
            ticker_symbol: "BADTICKER".to_string(),
            stock_name: "Ghost".to_string(),
            quantity: dec!(5),
            avg_buy_price: dec!(50),
            sector: None,
        };
        Portfolio::new(vec![
            PricedHolding::from_raw(&aapl, "AAPL".to_string(), Some(dec!(120))),
            PricedHolding::from_raw(&ghost, "BADTICKER".to_string(), None),
        ])
    }

    #[test]
    fn missing_portfolio_yields_marker() {
        assert_eq!(portfolio_context(None), NO_PORTFOLIO_MARKER);
    }

    #[test]
    fn context_carries_aggregates_and_holdings() {
        let context = portfolio_context(Some(&sample_portfolio()));
        assert!(context.contains("Total Investment: ₹1250"));
        assert!(context.contains("Current Value: ₹1200"));
        assert!(context.contains("Total P&L: ₹-50"));
        assert!(context.contains("- AAPL: 10 shares @ ₹100, P&L: +20"));
        assert!(context.contains("- BADTICKER: 5 shares @ ₹50, price unavailable"));
    }

    #[test]
    fn preamble_embeds_the_context() {
        let preamble = system_preamble(NO_PORTFOLIO_MARKER);
        assert!(preamble.contains("Portfolio Assistant"));
        assert!(preamble.contains(NO_PORTFOLIO_MARKER));
    }
}
