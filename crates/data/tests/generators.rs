use proptest::prelude::*;

use factor_types::{Column, PanelTable, NANOS_PER_DAY};

/// Generates valid panel tables for property tests: unique dates per
/// identifier, finite values, non-empty identifiers.
pub fn valid_panel(max_rows_per_group: usize) -> impl Strategy<Value = PanelTable> {
    let group = prop::collection::vec(1.0f64..1000.0, 1..=max_rows_per_group);
    prop::collection::vec(group, 1..4).prop_map(|groups| {
        let mut identifiers = Vec::new();
        let mut dates_ns = Vec::new();
        let mut closes = Vec::new();

        for (g, values) in groups.iter().enumerate() {
            let name = format!("ASSET{g}");
            for (i, &value) in values.iter().enumerate() {
                identifiers.push(name.clone());
                dates_ns.push((i as i64 + 1) * NANOS_PER_DAY);
                closes.push(value);
            }
        }

        PanelTable::try_new(identifiers, dates_ns, vec![Column::new("close", closes)])
            .expect("generated panel is structurally valid")
    })
}
