//! HTML receipt rendering
//!
//! Turns an order into a single self-contained HTML page: a coffee cup
//! sized by the drink size, an optional whipped-cream topping, and an
//! itemised receipt. Output depends only on the order, so rendering the same
//! order twice yields identical bytes.

mod style;

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::Result;
use crate::order::{Decoration, Order, ValidatedOrder};

pub use style::stylesheet;

/// Markup for the whipped-cream topping
pub const WHIPPED_CREAM_ELEMENT: &str = r#"<div class="whipped-cream"></div>"#;

/// Placeholder shown when an order has no extras
pub const NO_EXTRAS: &str = "None";

/// Renders order receipts
#[derive(Debug, Clone, Copy, Default)]
pub struct ReceiptRenderer;

impl ReceiptRenderer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render an order and write it to `destination`
    ///
    /// Any existing file at `destination` is replaced. Presentation tags are
    /// resolved from the raw order without validation.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written
    pub fn render(&self, order: &Order, destination: impl AsRef<Path>) -> Result<PathBuf> {
        let validated = ValidatedOrder::from(order.clone());
        self.render_to(&validated, destination)
    }

    /// Write an already validated order to `destination`
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written
    pub fn render_to(&self, order: &ValidatedOrder, destination: impl AsRef<Path>) -> Result<PathBuf> {
        let destination = destination.as_ref();
        std::fs::write(destination, self.render_html(order))?;
        tracing::debug!(path = %destination.display(), "wrote receipt");
        Ok(destination.to_path_buf())
    }

    /// Render the receipt document
    #[must_use]
    pub fn render_html(&self, validated: &ValidatedOrder) -> String {
        let order = validated.order();
        let name = escape_html(order.name());

        let topping = match validated.decoration() {
            Decoration::WhippedCream => WHIPPED_CREAM_ELEMENT,
            Decoration::Plain => "",
        };

        let drink = escape_html(order.drink_type());
        let size = escape_html(order.size());
        let milk = escape_html(order.milk());
        let extras = if order.extras().is_empty() {
            NO_EXTRAS.to_string()
        } else {
            escape_html(&order.extras().join(", "))
        };

        let mut html = String::with_capacity(6 * 1024);
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("    <meta charset=\"UTF-8\">\n");
        html.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        let _ = writeln!(html, "    <title>Order for {name}</title>");
        html.push_str("    <style>\n");
        html.push_str(&stylesheet(validated.cup().dimensions()));
        html.push_str("    </style>\n</head>\n<body>\n");

        html.push_str("    <div class=\"container\">\n");
        html.push_str("        <div class=\"visual-area\">\n");
        html.push_str("            <div class=\"cup\">\n");
        html.push_str("                <div class=\"cup-handle\"></div>\n");
        let _ = writeln!(html, "                {topping}");
        html.push_str("            </div>\n");
        html.push_str("        </div>\n\n");

        html.push_str("        <div class=\"receipt\">\n");
        html.push_str("            <h2>Order Receipt</h2>\n");
        for (label, value) in [
            ("Customer", name.as_str()),
            ("Drink", drink.as_str()),
            ("Size", size.as_str()),
            ("Milk", milk.as_str()),
            ("Extras", extras.as_str()),
        ] {
            push_receipt_item(&mut html, label, value);
        }
        html.push_str("            <div class=\"receipt-total\">\n");
        html.push_str("                Status: Paid\n");
        html.push_str("            </div>\n");
        html.push_str("        </div>\n");
        html.push_str("    </div>\n</body>\n</html>\n");

        html
    }
}

fn push_receipt_item(html: &mut String, label: &str, value: &str) {
    let _ = write!(
        html,
        "            <div class=\"receipt-item\">\n                <span>{label}:</span>\n                <span>{value}</span>\n            </div>\n"
    );
}

/// Escape HTML special characters
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
