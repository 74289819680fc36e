//! Receipt stylesheet
//!
//! Palette and layout are fixed; only the cup dimensions vary per order.

use crate::order::CupDimensions;

const COFFEE: &str = "#8D6E63";
const COFFEE_RIM: &str = "#A1887F";
const COFFEE_EDGE: &str = "#6D4C41";
const CREAM: &str = "#FFF";
const CREAM_SHADOW: &str = "#EEE";
const PAPER: &str = "#fff8e1";
const BACKDROP: &str = "#f4f4f9";

/// Build the inline stylesheet for a cup of the given size
#[must_use]
pub fn stylesheet(cup: CupDimensions) -> String {
    let CupDimensions { height, width } = cup;

    format!(
        r"        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background-color: {BACKDROP};
            display: flex;
            justify-content: center;
            align-items: center;
            min-height: 100vh;
            margin: 0;
        }}
        .container {{
            background-color: white;
            padding: 40px;
            border-radius: 20px;
            box-shadow: 0 10px 25px rgba(0,0,0,0.1);
            text-align: center;
            display: flex;
            flex-direction: column;
            align-items: center;
            gap: 30px;
        }}
        .visual-area {{
            position: relative;
            height: 300px;
            display: flex;
            align-items: flex-end;
            justify-content: center;
            padding-top: 50px;
        }}
        .cup {{
            width: {width}px;
            height: {height}px;
            background-color: {COFFEE};
            border-radius: 0 0 15px 15px;
            position: relative;
            box-shadow: inset -10px 0 20px rgba(0,0,0,0.1);
            transition: all 0.3s ease;
        }}
        .cup::before {{
            content: '';
            position: absolute;
            top: -10px;
            left: 0;
            width: 100%;
            height: 20px;
            background-color: {COFFEE_RIM};
            border-radius: 50%;
            border: 2px solid {COFFEE_EDGE};
            box-sizing: border-box;
        }}
        .cup-handle {{
            position: absolute;
            top: 20px;
            right: -30px;
            width: 30px;
            height: 50px;
            border: 8px solid {COFFEE};
            border-left: none;
            border-radius: 0 20px 20px 0;
        }}
        .whipped-cream {{
            position: absolute;
            top: -30px;
            left: 50%;
            transform: translateX(-50%);
            width: {width}px;
            height: 50px;
            background-color: {CREAM};
            border-radius: 50% 50% 10% 10%;
            box-shadow: inset -5px -5px 10px {CREAM_SHADOW};
            z-index: 10;
        }}
        .whipped-cream::after {{
            content: '';
            position: absolute;
            top: -15px;
            left: 50%;
            width: 40px;
            height: 40px;
            background-color: {CREAM};
            border-radius: 50% 50% 50% 0;
            transform: translateX(-50%) rotate(45deg);
        }}
        .receipt {{
            text-align: left;
            background-color: {PAPER};
            padding: 20px;
            border: 1px dashed #ccc;
            width: 100%;
            max-width: 300px;
            box-sizing: border-box;
        }}
        .receipt h2 {{
            margin-top: 0;
            border-bottom: 1px solid #ccc;
            padding-bottom: 10px;
            font-size: 1.2em;
        }}
        .receipt-item {{
            display: flex;
            justify-content: space-between;
            margin: 5px 0;
        }}
        .receipt-total {{
            margin-top: 15px;
            padding-top: 10px;
            border-top: 1px solid #ccc;
            font-weight: bold;
            text-align: right;
        }}
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cup_rule_carries_dimensions() {
        let css = stylesheet(CupDimensions {
            height: 250,
            width: 140,
        });
        assert!(css.contains("width: 140px;\n            height: 250px;"));
    }
}
