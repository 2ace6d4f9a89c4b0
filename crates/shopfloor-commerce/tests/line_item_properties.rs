//! Invariants of the line-item set under arbitrary operation sequences.

use proptest::prelude::*;
use proptest::test_runner::Config;
use shopfloor_commerce::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Op {
    Add(i64),
    SetQuantity(i64, u32),
    Remove(i64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0_i64..8).prop_map(Op::Add),
        (0_i64..8, 0_u32..=10).prop_map(|(id, q)| Op::SetQuantity(id, q)),
        (0_i64..8).prop_map(Op::Remove),
    ]
}

/// Ids 0..6 are in the catalog; 6 and 7 are not.
fn catalog() -> CatalogCache {
    CatalogCache::from_items(
        (0_i64..6)
            .map(|id| CatalogItem::new(id, format!("item-{id}"), Money::from_cents(id * 137 + 5)))
            .collect(),
    )
}

fn expected_total(sale: &Sale) -> i64 {
    sale.items()
        .iter()
        .map(|i| i.unit_price.cents() * i64::from(i.quantity))
        .sum()
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn invariants_hold_after_every_operation(ops in prop::collection::vec(op(), 0..64)) {
        let catalog = catalog();
        let mut sale = Sale::new();

        for op in ops {
            match op {
                Op::Add(id) => {
                    let before = sale.items().get(&ItemId::Int(id)).cloned();
                    sale.add_item(&catalog, &ItemId::Int(id));
                    if let Some(before) = before {
                        // first add wins
                        prop_assert_eq!(sale.items().get(&ItemId::Int(id)), Some(&before));
                    }
                }
                Op::SetQuantity(id, q) => {
                    sale.set_quantity(&ItemId::Int(id), q);
                }
                Op::Remove(id) => {
                    sale.remove_item(&ItemId::Int(id));
                    prop_assert!(!sale.items().contains(&ItemId::Int(id)));
                    prop_assert!(!sale.remove_item(&ItemId::Int(id)));
                }
            }

            let ids: HashSet<_> = sale.items().iter().map(|i| i.item_id.clone()).collect();
            prop_assert_eq!(ids.len(), sale.items().len());
            prop_assert!(sale.items().iter().all(|i| i.quantity >= 1));
            prop_assert!(sale.items().iter().all(|i| catalog.get(&i.item_id).is_some()));
            prop_assert_eq!(sale.total().cents(), expected_total(&sale));
            prop_assert_eq!(sale.pricing().total, sale.total());
        }
    }

    #[test]
    fn repeated_adds_never_increment(id in 0_i64..6, times in 1_usize..20) {
        let catalog = catalog();
        let mut sale = Sale::new();
        for _ in 0..times {
            sale.add_item(&catalog, &ItemId::Int(id));
        }
        prop_assert_eq!(sale.items().len(), 1);
        prop_assert_eq!(sale.items().get(&ItemId::Int(id)).map(|i| i.quantity), Some(1));
    }
}
