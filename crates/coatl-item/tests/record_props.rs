//! Property tests for the item record form.
//!
//! Any graph, including ones with NaN or infinite coordinates, must come back
//! from its record unchanged once it has passed through JSON text.

use coatl_item::{BrowserItem, GraphItem, Item, ItemPayload, ItemRecord, Series};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn coord() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => (-1_000_000i32..1_000_000).prop_map(|n| f64::from(n) / 8.0),
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
    ]
}

fn series() -> impl Strategy<Value = Series> {
    ("[a-z]{0,6}", prop::collection::vec((coord(), coord()), 0..12)).prop_map(|(label, points)| {
        Series { label, points }
    })
}

fn graph() -> impl Strategy<Value = GraphItem> {
    ("[a-z]{1,8}", ".{0,12}", prop::collection::vec(series(), 0..4)).prop_map(
        |(name, title, series)| {
            let mut g = GraphItem::new(&name);
            g.set_title(title);
            for s in series {
                g.add_series(s);
            }
            g
        },
    )
}

fn same_coord(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
}

fn through_text(record: &ItemRecord) -> ItemRecord {
    let text = serde_json::to_string(record).unwrap();
    serde_json::from_str(&text).unwrap()
}

proptest! {
    #[test]
    fn prop_graph_record_survives_json_text(g in graph()) {
        let item = Item::from(g.clone());
        let back = Item::from_record(&through_text(&item.to_record().unwrap())).unwrap();
        let back = back.as_graph().unwrap();

        prop_assert_eq!(back.name(), g.name());
        prop_assert_eq!(back.title(), g.title());
        prop_assert_eq!(back.series().len(), g.series().len());
        for (got, want) in back.series().iter().zip(g.series()) {
            prop_assert_eq!(&got.label, &want.label);
            prop_assert_eq!(got.points.len(), want.points.len());
            for (&(gx, gy), &(wx, wy)) in got.points.iter().zip(&want.points) {
                prop_assert!(same_coord(gx, wx) && same_coord(gy, wy), "({gx}, {gy}) != ({wx}, {wy})");
            }
        }
    }

    #[test]
    fn prop_browser_record_survives_json_text(
        source in "[a-z]{0,8}\\.csv",
        reqs in prop::collection::btree_map("[a-z]{1,6}", "[0-9]\\.[0-9]", 0..4),
    ) {
        let mut b = BrowserItem::new("rows").with_source(source);
        for (package, version) in &reqs {
            b = b.with_requirement(package, version);
        }
        let item = Item::from(b);
        let back = Item::from_record(&through_text(&item.to_record().unwrap())).unwrap();
        prop_assert_eq!(back.dependencies(), reqs);
        prop_assert_eq!(back, item);
    }
}

#[test]
fn nan_gap_in_plot_reloads() {
    let g = GraphItem::new("gap").with_series(
        Series::new("temps")
            .with_point(0.0, 21.5)
            .with_point(1.0, f64::NAN)
            .with_point(2.0, 22.0),
    );
    let back = Item::from_record(&through_text(&Item::from(g).to_record().unwrap())).unwrap();
    let points = &back.as_graph().unwrap().series()[0].points;
    assert_eq!(points.len(), 3);
    assert!(points[1].1.is_nan());
    assert_eq!(points[2], (2.0, 22.0));
}
