//! Pricing
//!
//! Aggregates derived from cart lines. Nothing here is cached: every call walks the lines.

use crate::{cart::CartLine, prices::Price};

/// Calculates the total number of units across a list of lines.
pub fn total_count(lines: &[CartLine]) -> u64 {
    lines.iter().map(|line| u64::from(line.quantity())).sum()
}

/// Calculates the total price of a list of lines.
///
/// An empty list totals to zero.
pub fn total_price(lines: &[CartLine]) -> Price {
    lines
        .iter()
        .fold(Price::ZERO, |acc, line| acc.saturating_add(line.line_total()))
}

#[cfg(test)]
mod tests {
    use crate::cart::{NewCartLine, ProductId};

    use super::*;

    fn line(id: &str, price: i64, quantity: u32) -> CartLine {
        let mut line = CartLine::from_new(NewCartLine::new(
            ProductId::from(id),
            id,
            Price::from_minor(price),
        ));

        for _ in 1..quantity {
            line.increment();
        }

        line
    }

    #[test]
    fn test_total_price() {
        let lines = [line("a", 100, 2), line("b", 250, 1)];

        assert_eq!(total_price(&lines), Price::from_minor(450));
    }

    #[test]
    fn test_total_price_empty() {
        assert_eq!(total_price(&[]), Price::ZERO);
    }

    #[test]
    fn test_total_count() {
        let lines = [line("a", 100, 2), line("b", 250, 3)];

        assert_eq!(total_count(&lines), 5);
        assert_eq!(total_count(&[]), 0);
    }
}
