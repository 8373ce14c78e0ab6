use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use typedecl_codegen::TypeScript;

use crate::users::User;

/// An amount and currency code, serialized as `"12.50 EUR"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money(pub String);

#[derive(Debug, Clone, Serialize, Deserialize, TypeScript)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[ts(literal = "order")]
    #[serde(rename = "type")]
    pub kind: String,
    #[ts(template = "ord-{number}")]
    pub reference: String,
    pub customer: User,
    pub lines: Vec<OrderLine>,
    pub total: Money,
    pub metadata: IndexMap<String, String>,
    pub note: Option<Box<str>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub sku: String,
    pub quantity: u32,
    pub unit_price: Money,
}

#[cfg(test)]
mod tests {
    use crate::DECLARATIONS;

    #[test]
    fn test_order_declaration() {
        assert!(DECLARATIONS.contains("type: \"order\"\n"));
        assert!(DECLARATIONS.contains("reference: `ord-${number}`\n"));
        assert!(DECLARATIONS.contains("total: `${number} ${string}`\n"));
        assert!(DECLARATIONS.contains("metadata: { [key: string]: string }\n"));
        assert!(DECLARATIONS.contains("note: string | null\n"));
        assert!(DECLARATIONS.contains("unit_price: `${number} ${string}`\n"));
    }
}
