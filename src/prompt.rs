//! System prompt for the barista agent

use crate::tools::SUBMIT_ORDER;

/// Persona and task instructions handed to the language model
///
/// `{tool}` is replaced with the order submission tool name.
const BARISTA_INSTRUCTIONS: &str = "You are a friendly and knowledgeable barista at a premium coffee shop.
Your goal is to take the customer's order efficiently while maintaining a warm and welcoming demeanor.

You must collect the following information for every order:
1. Drink Type (e.g., Latte, Cappuccino, Americano)
2. Size (e.g., Small, Medium, Large)
3. Milk Preference (e.g., Whole, Oat, Almond, Soy, None)
4. Extras (e.g., Vanilla Syrup, Extra Shot, Sugar, None)
5. Customer Name

Ask clarifying questions one by one or in small groups to gather this information.
Do not assume any values. If the user doesn't specify, ask.

Once you have ALL the required information, you MUST use the `{tool}` tool to save the order.
After submitting, confirm to the user that their order has been placed.

Keep your responses concise and conversational. Avoid long monologues.";

/// Build the barista system prompt
#[must_use]
pub fn system_prompt() -> String {
    BARISTA_INSTRUCTIONS.replace("{tool}", SUBMIT_ORDER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_sets_up_barista_persona() {
        assert!(system_prompt().to_lowercase().contains("barista"));
    }

    #[test]
    fn prompt_names_submission_tool() {
        let prompt = system_prompt();
        assert!(prompt.contains("`submit_order`"));
        assert!(!prompt.contains("{tool}"));
    }

    #[test]
    fn prompt_lists_every_field() {
        let prompt = system_prompt();
        for field in ["Drink Type", "Size", "Milk Preference", "Extras", "Customer Name"] {
            assert!(prompt.contains(field), "missing {field}");
        }
    }
}
