//! Wire format of `POST /ventas`.

use serde::{Deserialize, Serialize};

use crate::ids::ItemId;
use crate::money::Money;
use crate::sale::{LineItem, Sale};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerPayload {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "telefono")]
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemPayload {
    #[serde(rename = "producto_id")]
    pub item_id: ItemId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio")]
    pub unit_price: Money,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
}

impl From<&LineItem> for LineItemPayload {
    fn from(item: &LineItem) -> Self {
        Self {
            item_id: item.item_id.clone(),
            name: item.name.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
        }
    }
}

/// Body sent to record a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalePayload {
    #[serde(rename = "cliente")]
    pub customer: CustomerPayload,
    #[serde(rename = "productos")]
    pub items: Vec<LineItemPayload>,
    pub total: Money,
}

impl From<&Sale> for SalePayload {
    /// Customer fields are sent trimmed; an absent phone is an empty string.
    fn from(sale: &Sale) -> Self {
        Self {
            customer: CustomerPayload {
                name: sale.customer.name.trim().to_string(),
                phone: sale.customer.phone().unwrap_or_default().to_string(),
            },
            items: sale.items().iter().map(LineItemPayload::from).collect(),
            total: sale.total(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogCache, CatalogItem};
    use serde_json::json;

    #[test]
    fn test_wire_shape() {
        let catalog = CatalogCache::from_items(vec![
            CatalogItem::new(1_i64, "Widget", Money::from_cents(1000)),
            CatalogItem::new("b-2".to_string(), "Gadget", Money::from_cents(250)),
        ]);
        let mut sale = Sale::new();
        sale.set_customer_name(" Ana ");
        sale.add_item(&catalog, &ItemId::Int(1));
        sale.add_item(&catalog, &ItemId::Text("b-2".to_string()));
        sale.set_quantity(&ItemId::Int(1), 3);

        let json = serde_json::to_value(SalePayload::from(&sale)).unwrap();
        assert_eq!(
            json,
            json!({
                "cliente": {"nombre": "Ana", "telefono": ""},
                "productos": [
                    {"producto_id": 1, "nombre": "Widget", "precio": 10.0, "cantidad": 3},
                    {"producto_id": "b-2", "nombre": "Gadget", "precio": 2.5, "cantidad": 1}
                ],
                "total": 32.5
            })
        );
    }
}
