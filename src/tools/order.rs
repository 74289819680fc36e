//! Order submission tool for the LLM

use std::sync::Arc;

use serde::Deserialize;

use super::{FunctionDefinition, ToolDefinition};
use crate::order::Order;
use crate::recorder::OrderRecorder;
use crate::{Error, Result};

/// Name of the order submission tool
pub const SUBMIT_ORDER: &str = "submit_order";

/// Reply handed back to the model after a successful submission
pub const ORDER_SUBMITTED: &str = "Order submitted successfully.";

/// Tools the barista agent uses to place orders
#[derive(Debug, Clone)]
pub struct OrderTools {
    recorder: Arc<OrderRecorder>,
}

#[derive(Deserialize)]
struct SubmitOrderArgs {
    #[serde(rename = "drinkType")]
    drink_type: String,
    size: String,
    milk: String,
    #[serde(default)]
    extras: Vec<String>,
    name: String,
}

impl From<SubmitOrderArgs> for Order {
    fn from(args: SubmitOrderArgs) -> Self {
        Self::new(args.drink_type, args.size, args.milk, args.extras, args.name)
    }
}

impl OrderTools {
    #[must_use]
    pub const fn new(recorder: Arc<OrderRecorder>) -> Self {
        Self { recorder }
    }

    /// Return tool definitions for the order tools
    #[must_use]
    pub fn tool_definitions() -> Vec<ToolDefinition> {
        vec![ToolDefinition {
            tool_type: "function".to_owned(),
            function: FunctionDefinition {
                name: SUBMIT_ORDER.to_string(),
                description: Some(
                    "Submit the order to the system. Call only once every field has been collected from the customer.".to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "drinkType": {
                            "type": "string",
                            "description": "The type of coffee drink (e.g., Latte, Cappuccino)"
                        },
                        "size": {
                            "type": "string",
                            "description": "The size of the drink (Small, Medium, Large)"
                        },
                        "milk": {
                            "type": "string",
                            "description": "The type of milk (Whole, Oat, Almond, etc.)"
                        },
                        "extras": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "List of any extras (Syrups, etc.) or empty list if none"
                        },
                        "name": {
                            "type": "string",
                            "description": "The customer's name"
                        }
                    },
                    "required": ["drinkType", "size", "milk", "extras", "name"]
                })),
            },
        }]
    }

    /// Execute a named order tool
    ///
    /// # Errors
    ///
    /// Returns error if the tool is unknown, the arguments are malformed, or
    /// the order cannot be recorded
    pub async fn execute(&self, name: &str, arguments: &str) -> Result<String> {
        match name {
            SUBMIT_ORDER => self.submit(arguments).await,
            _ => Err(Error::Tool(format!("unknown order tool: {name}"))),
        }
    }

    async fn submit(&self, arguments: &str) -> Result<String> {
        let args: SubmitOrderArgs = serde_json::from_str(arguments)
            .map_err(|e| Error::Tool(format!("{SUBMIT_ORDER}: invalid arguments: {e}")))?;
        let order = Order::from(args);

        // Recording touches the filesystem; keep it off the async workers
        let recorder = Arc::clone(&self.recorder);
        let confirmation = tokio::task::spawn_blocking(move || recorder.record(order))
            .await
            .map_err(|e| Error::Tool(format!("{SUBMIT_ORDER}: recording task failed: {e}")))??;

        tracing::debug!(order_id = %confirmation.id, "{SUBMIT_ORDER} completed");

        Ok(ORDER_SUBMITTED.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::UnixTimestamps;
    use crate::storage::{ArtifactKind, MemoryOrderStore, OrderStore};

    fn tools() -> (OrderTools, Arc<MemoryOrderStore>) {
        let store = Arc::new(MemoryOrderStore::new());
        let recorder = OrderRecorder::new(store.clone(), Arc::new(UnixTimestamps::with_clock(|| 99)));
        (OrderTools::new(Arc::new(recorder)), store)
    }

    #[test]
    fn definition_describes_all_fields() {
        let defs = OrderTools::tool_definitions();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].function.name, SUBMIT_ORDER);

        let params = defs[0].function.parameters.as_ref().unwrap();
        let required: Vec<&str> = params["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(required, vec!["drinkType", "size", "milk", "extras", "name"]);
        assert_eq!(params["properties"]["extras"]["type"], "array");
    }

    #[tokio::test]
    async fn submit_order_records_the_order() {
        let (tools, store) = tools();

        let reply = tools
            .execute(
                SUBMIT_ORDER,
                r#"{"drinkType":"Latte","size":"Large","milk":"Oat","extras":["Sugar"],"name":"Bob"}"#,
            )
            .await
            .unwrap();

        assert_eq!(reply, ORDER_SUBMITTED);
        let id = crate::order::OrderId::new("99");
        assert!(store.read(&id, ArtifactKind::Record).unwrap().is_some());
        assert!(store.read(&id, ArtifactKind::Receipt).unwrap().is_some());
    }

    #[tokio::test]
    async fn missing_extras_defaults_to_empty() {
        let (tools, store) = tools();

        tools
            .execute(
                SUBMIT_ORDER,
                r#"{"drinkType":"Americano","size":"Small","milk":"None","name":"Cy"}"#,
            )
            .await
            .unwrap();

        let receipt = store
            .read(&crate::order::OrderId::new("99"), ArtifactKind::Receipt)
            .unwrap()
            .unwrap();
        assert!(String::from_utf8(receipt).unwrap().contains("<span>None</span>"));
    }

    #[tokio::test]
    async fn malformed_arguments_are_rejected() {
        let (tools, store) = tools();

        let err = tools
            .execute(SUBMIT_ORDER, r#"{"drinkType":"Latte"}"#)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Tool(ref msg) if msg.contains("invalid arguments")));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn unknown_tool_is_rejected() {
        let (tools, _) = tools();
        let err = tools.execute("refund_order", "{}").await.unwrap_err();
        assert!(matches!(err, Error::Tool(ref msg) if msg.contains("unknown order tool")));
    }
}
