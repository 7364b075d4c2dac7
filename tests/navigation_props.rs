use std::time::Duration;

use proptest::prelude::*;

use curvenav::navigation::travel_duration;
use curvenav::units::Density;
use curvenav::{BottomNavigation, Direction, ItemSpec, NavStyle};

fn build(direction: Direction, count: usize) -> BottomNavigation {
    let mut nav = BottomNavigation::new(NavStyle::default(), direction, Density::default());
    for i in 0..count {
        nav.attach(ItemSpec::new(format!("Item {i}"), "•"));
    }
    nav.measure(count as f32 * 10.0, 8.0);
    settle(&mut nav);
    nav
}

fn settle(nav: &mut BottomNavigation) {
    for _ in 0..400 {
        nav.tick(Duration::from_millis(10));
    }
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Ltr), Just(Direction::Rtl)]
}

proptest! {
    #[test]
    fn travel_duration_grows_by_a_tenth_of_a_second_per_cell(
        diff in 0usize..64,
        base_ms in 0u64..2_000,
    ) {
        let base = Duration::from_millis(base_ms);
        let here = travel_duration(diff, base);
        prop_assert_eq!(here, Duration::from_millis(diff as u64 * 100 + base_ms));
        prop_assert!(travel_duration(diff + 1, base) > here);
    }

    #[test]
    fn ids_follow_attachment_order(dir in direction(), count in 1usize..9) {
        let nav = build(dir, count);
        let ids: Vec<usize> = nav.items().iter().map(|i| i.id).collect();
        prop_assert_eq!(ids, (0..count).collect::<Vec<_>>());
        for id in 0..count {
            prop_assert_eq!(nav.get_item_position(id), Some(id));
        }
    }

    #[test]
    fn every_column_hit_tests_to_its_item(dir in direction(), count in 1usize..9) {
        let nav = build(dir, count);
        let mut columns: Vec<usize> = (0..count).map(|p| nav.visual_index(p)).collect();
        columns.sort_unstable();
        prop_assert_eq!(columns, (0..count).collect::<Vec<_>>());

        for (pos, cell) in nav.cells().iter().enumerate() {
            let x = nav.visual_index(pos) as f32 * 10.0 + 5.0;
            prop_assert!(cell.contains_x(x));
        }
    }

    #[test]
    fn exactly_one_cell_is_enabled_after_settling(
        dir in direction(),
        count in 2usize..8,
        taps in proptest::collection::vec(0usize..8, 1..6),
    ) {
        let mut nav = build(dir, count);
        for id in taps {
            nav.tap(id);
            settle(&mut nav);
        }
        let selected = nav.selected_id().expect("measure selects the first item");
        prop_assert!(!nav.is_animating());
        for (pos, cell) in nav.cells().iter().enumerate() {
            let enabled = nav.items()[pos].id == selected;
            prop_assert_eq!(cell.is_enabled_cell(), enabled);
            prop_assert_eq!(cell.progress(), if enabled { 1.0 } else { 0.0 });
        }
    }

    #[test]
    fn badge_text_is_kept_whole_on_the_item(n in 0u32..100_000) {
        let mut nav = build(Direction::Ltr, 3);
        let text = n.to_string();
        nav.set_badge_count(1, &text);

        prop_assert_eq!(nav.get_badge_count(1), text.as_str());
        prop_assert_eq!(nav.get_item_count(1), n as i64);

        let shown = nav.get_cell_by_id(1).expect("cell").badge_count().to_string();
        if text.len() < 4 {
            prop_assert_eq!(shown, text);
        } else {
            prop_assert_eq!(shown, format!("{}..", &text[..1]));
        }
    }
}
