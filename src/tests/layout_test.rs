use crate::geometry::Rect;
use crate::layout::{LayoutKind, LayoutParams, TiledClient, weighted_split};
use proptest::prelude::*;

const AREA: Rect = Rect::new(0, 0, 1200, 800);

fn tiled(weights: &[f32]) -> Vec<TiledClient> {
    weights
        .iter()
        .enumerate()
        .map(|(index, &weight)| TiledClient {
            window: index as u32 + 1,
            weight,
        })
        .collect()
}

fn params(master_count: usize) -> LayoutParams {
    LayoutParams {
        master_count,
        master_fraction: 0.55,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]
    #[test]
    fn should_split_extent_without_gaps(
        extent in 1i32..4000,
        weights in prop::collection::vec(0.25f32..4.0, 1..10)
    ) {
        let shares = weighted_split(extent, &weights);

        prop_assert_eq!(shares.len(), weights.len());
        prop_assert_eq!(shares.iter().sum::<i32>(), extent);
    }

    #[test]
    fn should_split_equal_weights_evenly(extent in 100i32..4000, count in 1usize..10) {
        let shares = weighted_split(extent, &vec![1.0; count]);
        let smallest = shares.iter().min().copied().unwrap_or(0);
        let largest = shares.iter().max().copied().unwrap_or(0);

        prop_assert!(largest - smallest <= 1);
    }

    #[test]
    fn should_fill_both_tile_columns(
        weights in prop::collection::vec(0.25f32..4.0, 1..10),
        master_count in 0usize..4
    ) {
        let clients = tiled(&weights);
        let rects = LayoutKind::Tile.new().arrange(&clients, AREA, &params(master_count));

        prop_assert_eq!(rects.len(), clients.len());
        let (master, stack) = rects.split_at(master_count.min(clients.len()));
        for column in [master, stack] {
            if let (Some(first), Some(last)) = (column.first(), column.last()) {
                prop_assert_eq!(first.y, AREA.y);
                prop_assert_eq!(last.bottom(), AREA.bottom());
                prop_assert_eq!(column.iter().map(|r| r.height).sum::<i32>(), AREA.height);
            }
        }
    }

    #[test]
    fn should_fill_both_bstack_rows(
        weights in prop::collection::vec(0.25f32..4.0, 2..10),
        master_count in 1usize..3
    ) {
        let clients = tiled(&weights);
        let rects = LayoutKind::Bstack.new().arrange(&clients, AREA, &params(master_count));

        let (master, stack) = rects.split_at(master_count.min(clients.len()));
        for row in [master, stack] {
            if !row.is_empty() {
                prop_assert_eq!(row.iter().map(|r| r.width).sum::<i32>(), AREA.width);
            }
        }
    }
}

#[test]
fn should_tile_three_clients_with_a_wide_master() {
    let clients = tiled(&[1.0, 1.0, 1.0]);
    let rects = LayoutKind::Tile.new().arrange(&clients, AREA, &params(1));

    assert_eq!(
        rects,
        vec![
            Rect::new(0, 0, 660, 800),
            Rect::new(660, 0, 540, 400),
            Rect::new(660, 400, 540, 400),
        ]
    );
}

#[test]
fn should_give_the_whole_width_to_masters_when_nothing_stacks() {
    let clients = tiled(&[1.0, 1.0]);
    let rects = LayoutKind::Tile.new().arrange(&clients, AREA, &params(2));

    assert_eq!(rects, vec![Rect::new(0, 0, 1200, 400), Rect::new(0, 400, 1200, 400)]);
}

#[test]
fn should_weight_stack_heights() {
    let clients = tiled(&[1.0, 3.0, 1.0]);
    let rects = LayoutKind::Tile.new().arrange(&clients, AREA, &params(1));

    assert_eq!(rects[1].height, 600);
    assert_eq!(rects[2].height, 200);
}

#[test]
fn should_stack_monocle_clients_on_top_of_each_other() {
    let clients = tiled(&[1.0, 2.0, 1.0]);
    let rects = LayoutKind::Monocle.new().arrange(&clients, AREA, &params(1));

    assert_eq!(rects, vec![AREA; 3]);
}

#[test]
fn should_share_one_deck_rectangle() {
    let clients = tiled(&[1.0, 1.0, 1.0, 1.0]);
    let rects = LayoutKind::Deck.new().arrange(&clients, AREA, &params(1));

    assert_eq!(rects[0], Rect::new(0, 0, 660, 800));
    assert!(rects[1..].iter().all(|&r| r == Rect::new(660, 0, 540, 800)));
}

#[test]
fn should_give_grid_extra_rows_to_the_last_columns() {
    let clients = tiled(&[1.0, 1.0, 1.0]);
    let rects = LayoutKind::Grid.new().arrange(&clients, AREA, &params(1));

    assert_eq!(
        rects,
        vec![
            Rect::new(0, 0, 600, 800),
            Rect::new(600, 0, 600, 400),
            Rect::new(600, 400, 600, 400),
        ]
    );
}

#[test]
fn should_use_two_grid_columns_for_five_clients() {
    let clients = tiled(&[1.0; 5]);
    let rects = LayoutKind::Grid.new().arrange(&clients, AREA, &params(1));

    assert!(rects.iter().all(|r| r.width == 600));
    assert_eq!(rects.iter().filter(|r| r.x == 0).count(), 2);
    assert_eq!(rects.iter().filter(|r| r.x == 600).count(), 3);
}

#[test]
fn should_leave_floating_layout_alone() {
    assert!(!LayoutKind::Floating.arranges());
    assert!(LayoutKind::Tile.arranges());
}

#[test]
fn should_number_monocle_symbol_from_one() {
    assert_eq!(LayoutKind::Monocle.symbol(3, 1, 2), "[2/3]");
    assert_eq!(LayoutKind::Deck.symbol(4, 1, 1), " D 3");
    assert_eq!(LayoutKind::Tile.symbol(4, 1, 1), "[]=");
}

#[test]
fn should_cycle_through_every_layout() {
    let mut layout = LayoutKind::Tile;
    for _ in 0..LayoutKind::ALL.len() {
        layout = layout.next();
    }

    assert_eq!(layout, LayoutKind::Tile);
}
