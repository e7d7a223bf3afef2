//! Receipt text parser
//!
//! OCR output of a receipt lists item descriptions and prices on separate
//! lines. Prices are lines that are exactly `<digits>.<two digits>`; every
//! other line is an item, blank ones included, so a gap in the OCR output
//! keeps its slot. Items and prices are paired by position, padding
//! whichever list is shorter.

use regex::Regex;
use serde::Serialize;
use std::io::Write;

use crate::bills::NewItem;
use crate::receipt::error::ReceiptError;

/// One parsed receipt row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptLine {
    pub item: Option<String>,
    pub quantity: Option<u32>,
    pub price: Option<f64>,
}

impl ReceiptLine {
    /// Convert to a bill item. Rows without a price cannot be billed.
    pub fn to_new_item(&self) -> Option<NewItem> {
        let price = self.price?;
        let mut item = NewItem::new(self.item.clone().unwrap_or_default(), price);
        item.quantity = self.quantity;
        Some(item)
    }
}

/// Compiled patterns for receipt parsing
pub struct ReceiptParser {
    price: Regex,
    item: Regex,
}

impl ReceiptParser {
    pub fn new() -> Result<Self, ReceiptError> {
        Ok(Self {
            price: Regex::new(r"^\d+\.\d{2}$")?,
            item: Regex::new(r"^\s*(\d+)?\s*(.*?)\s*(\(\$?\d+\.\d{2}\))?$")?,
        })
    }

    pub fn parse(&self, text: &str) -> Vec<ReceiptLine> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        let mut item_lines = Vec::new();
        let mut prices = Vec::new();

        for line in text.lines().map(str::trim) {
            match line.parse::<f64>() {
                Ok(price) if self.price.is_match(line) => prices.push(price),
                _ => item_lines.push(line),
            }
        }

        tracing::debug!(
            items = item_lines.len(),
            prices = prices.len(),
            "Split receipt lines"
        );

        let rows = item_lines.len().max(prices.len());
        (0..rows)
            .map(|i| {
                let price = prices.get(i).copied();
                match item_lines.get(i).filter(|line| !line.is_empty()) {
                    Some(line) => {
                        let (name, quantity) = self.split_item(line);
                        ReceiptLine {
                            item: Some(name),
                            quantity: Some(quantity),
                            price,
                        }
                    }
                    None => ReceiptLine {
                        item: None,
                        quantity: None,
                        price,
                    },
                }
            })
            .collect()
    }

    /// Leading count becomes the quantity (default 1); a trailing
    /// `($x.yz)` unit price is dropped from the name.
    fn split_item(&self, line: &str) -> (String, u32) {
        match self.item.captures(line) {
            Some(caps) => {
                let quantity = caps
                    .get(1)
                    .and_then(|m| m.as_str().parse().ok())
                    .unwrap_or(1);
                let name = caps
                    .get(2)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default();
                (name, quantity)
            }
            None => (line.to_string(), 1),
        }
    }
}

/// Write rows as `Item,Quantity,Price` CSV
pub fn write_csv<W: Write>(lines: &[ReceiptLine], writer: W) -> Result<(), ReceiptError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Item", "Quantity", "Price"])?;

    for line in lines {
        wtr.write_record([
            line.item.clone().unwrap_or_default(),
            line.quantity.map(|q| q.to_string()).unwrap_or_default(),
            line.price.map(|p| format!("{:.2}", p)).unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<ReceiptLine> {
        ReceiptParser::new().unwrap().parse(text)
    }

    #[test]
    fn test_pairs_items_with_prices() {
        let lines = parse("2 Burger\nFries\n12.50\n3.25\n");

        assert_eq!(
            lines,
            vec![
                ReceiptLine {
                    item: Some("Burger".to_string()),
                    quantity: Some(2),
                    price: Some(12.5),
                },
                ReceiptLine {
                    item: Some("Fries".to_string()),
                    quantity: Some(1),
                    price: Some(3.25),
                },
            ]
        );
    }

    #[test]
    fn test_strips_unit_price_suffix() {
        let lines = parse("3 Soda ($1.50)\n4.50");
        assert_eq!(lines[0].item.as_deref(), Some("Soda"));
        assert_eq!(lines[0].quantity, Some(3));
        assert_eq!(lines[0].price, Some(4.5));
    }

    #[test]
    fn test_more_prices_than_items() {
        let lines = parse("Salad\n8.00\n1.99");
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            ReceiptLine {
                item: None,
                quantity: None,
                price: Some(1.99),
            }
        );
        assert!(lines[1].to_new_item().is_some());
    }

    #[test]
    fn test_more_items_than_prices() {
        let lines = parse("Salad\nThank you for visiting\n8.00");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].price, None);
        assert!(lines[1].to_new_item().is_none());
    }

    #[test]
    fn test_price_needs_two_decimals() {
        let lines = parse("Tip\n5\n2.5");
        assert!(lines.iter().all(|l| l.price.is_none()));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_blank_input() {
        assert!(parse("").is_empty());
        assert!(parse("\n  \n").is_empty());
    }

    #[test]
    fn test_blank_line_keeps_its_slot() {
        let lines = parse("Pizza\n\nSoda\n12.00\n3.00");

        assert_eq!(
            lines,
            vec![
                ReceiptLine {
                    item: Some("Pizza".to_string()),
                    quantity: Some(1),
                    price: Some(12.0),
                },
                ReceiptLine {
                    item: None,
                    quantity: None,
                    price: Some(3.0),
                },
                ReceiptLine {
                    item: Some("Soda".to_string()),
                    quantity: Some(1),
                    price: None,
                },
            ]
        );
    }

    #[test]
    fn test_surrounding_blank_lines_ignored() {
        let lines = parse("\n\nSalad\n8.00\n\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].item.as_deref(), Some("Salad"));
    }

    #[test]
    fn test_write_csv() {
        let lines = parse("2 Burger\n12.50\n1.00");
        let mut out = Vec::new();
        write_csv(&lines, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Item,Quantity,Price\nBurger,2,12.50\n,,1.00\n");
    }

    #[test]
    fn test_to_new_item_keeps_quantity() {
        let lines = parse("2 Burger\n12.50");
        let item = lines[0].to_new_item().unwrap();
        assert_eq!(item.name.as_deref(), Some("Burger"));
        assert_eq!(item.quantity, Some(2));
        assert_eq!(item.cost, 12.5);
    }
}
