use super::{bare_config, map, single_head};
use crate::drag::{DragState, MoveDrag, ResizeDrag, Sector, find_sector, snap_position};
use crate::geometry::Rect;
use crate::state::Effect;
use proptest::prelude::*;

const AREA: Rect = Rect::new(0, 0, 1200, 800);

proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]
    #[test]
    fn should_find_a_sector_anywhere_inside(
        x in 0i32..300,
        y in 0i32..200
    ) {
        prop_assert!(find_sector(x, y, 300, 200, 2).is_some());
    }

    #[test]
    fn should_grow_from_the_bottom_right_with_the_pointer(
        x in 120i32..1000,
        y in 120i32..700
    ) {
        let origin = Rect::new(100, 100, 300, 200);
        let drag = ResizeDrag {
            window: 1,
            sector: Sector::BottomRight,
            origin,
            previous_size: None,
        };

        let step = drag.step(x, y, origin, 2);

        prop_assert_eq!((step.x, step.y), (100, 100));
        prop_assert_eq!(step.width, x - 100 - 4 + 1);
        prop_assert_eq!(step.height, y - 100 - 4 + 1);
    }
}

#[test]
fn should_pick_corners_and_edges_by_thirds() {
    assert_eq!(find_sector(0, 0, 300, 300, 2), Some(Sector::TopLeft));
    assert_eq!(find_sector(150, 10, 300, 300, 2), Some(Sector::Top));
    assert_eq!(find_sector(299, 0, 300, 300, 2), Some(Sector::TopRight));
    assert_eq!(find_sector(-2, 150, 300, 300, 2), Some(Sector::Left));
    assert_eq!(find_sector(299, 299, 300, 300, 2), Some(Sector::BottomRight));
    assert_eq!(find_sector(-3, 0, 300, 300, 2), None);
    assert_eq!(find_sector(0, 302, 300, 300, 2), None);
}

#[test]
fn should_split_the_centre_cell_by_the_nearest_edge() {
    assert_eq!(find_sector(110, 150, 300, 300, 0), Some(Sector::Left));
    assert_eq!(find_sector(190, 150, 300, 300, 0), Some(Sector::Right));
    assert_eq!(find_sector(150, 105, 300, 300, 0), Some(Sector::Top));
    assert_eq!(find_sector(150, 190, 300, 300, 0), Some(Sector::Bottom));
}

#[test]
fn should_warp_onto_the_grabbed_edge() {
    assert_eq!(Sector::Right.warp_offset(300, 200, 2), (301, 100));
    assert_eq!(Sector::TopLeft.warp_offset(300, 200, 2), (-2, -2));
    assert_eq!(Sector::Bottom.warp_offset(300, 200, 2), (150, 201));
}

#[test]
fn should_follow_the_pointer_offset_when_moving() {
    let drag = MoveDrag {
        window: 1,
        origin_x: 100,
        origin_y: 100,
        pointer_x: 10,
        pointer_y: 10,
    };

    assert_eq!(drag.target(30, 50), (120, 140));
    assert_eq!(drag.target(0, 0), (90, 90));
}

#[test]
fn should_keep_the_far_edge_when_resizing_from_the_top_left() {
    let origin = Rect::new(100, 100, 300, 200);
    let drag = ResizeDrag {
        window: 1,
        sector: Sector::TopLeft,
        origin,
        previous_size: None,
    };

    assert_eq!(drag.step(50, 60, origin, 2), Rect::new(50, 60, 350, 240));
}

#[test]
fn should_hold_an_edge_the_client_refused_to_move() {
    let origin = Rect::new(100, 100, 300, 200);
    let drag = ResizeDrag {
        window: 1,
        sector: Sector::Left,
        origin,
        previous_size: Some((300, 200)),
    };

    let step = drag.step(50, 150, origin, 2);

    assert_eq!(step.x, 100);
    assert_eq!(step.width, 350);
}

#[test]
fn should_snap_to_the_window_area_edges() {
    let moving = Rect::new(0, 0, 300, 200);

    assert_eq!(snap_position(moving, 2, (20, 300), &[], AREA, 32), (0, 300));
    assert_eq!(snap_position(moving, 2, (886, 300), &[], AREA, 32), (896, 300));
    assert_eq!(snap_position(moving, 2, (500, 580), &[], AREA, 32), (500, 596));
    assert_eq!(snap_position(moving, 2, (500, 300), &[], AREA, 32), (500, 300));
}

#[test]
fn should_snap_to_neighbouring_windows() {
    let moving = Rect::new(0, 0, 300, 200);
    let neighbour = Rect::new(500, 0, 300, 800);

    assert_eq!(snap_position(moving, 2, (810, 300), &[neighbour], AREA, 32), (804, 300));
}

#[test]
fn should_not_snap_without_a_snap_distance() {
    let moving = Rect::new(0, 0, 300, 200);

    assert_eq!(snap_position(moving, 2, (5, 300), &[], AREA, 0), (5, 300));
}

#[test]
fn should_float_a_tiled_client_dragged_past_the_snap_distance() {
    let mut state = single_head(bare_config());
    map(&mut state, 1);
    map(&mut state, 2);
    let start = state.client(2).map(|c| c.geometry).expect("managed");

    assert_eq!(state.begin_move(start.x + 10, start.y + 10), Some(2));
    assert!(matches!(state.drag, DragState::Moving(_)));

    state.drag_motion(start.x - 290, start.y + 110);

    let client = state.client(2).expect("managed");
    assert!(client.is_floating);
    assert_eq!((client.geometry.x, client.geometry.y), (start.x - 300, start.y + 100));

    state.end_drag();
    assert_eq!(state.drag, DragState::Idle);
}

#[test]
fn should_warp_to_the_grabbed_edge_when_a_resize_starts() {
    let mut state = single_head(bare_config());
    map(&mut state, 1);
    map(&mut state, 2);
    let start = state.client(2).map(|c| c.geometry).expect("managed");
    state.take_effects();

    // Two pixels in: on the inner side of the left border.
    let window = state.begin_resize(start.x + 2, start.y + start.height / 2);

    assert_eq!(window, Some(2));
    let warp = Effect::WarpToWindow {
        window: 2,
        x: -2,
        y: start.height / 2,
    };
    assert!(state.take_effects().contains(&warp));
}

#[test]
fn should_end_a_drag_when_the_window_vanishes() {
    let mut state = single_head(bare_config());
    map(&mut state, 1);
    state.begin_move(10, 10);

    state.take_effects();

    assert!(state.unmanage(1).is_some());

    assert_eq!(state.drag, DragState::Idle);
    assert!(!state.is_managed(1));
    assert!(state.take_effects().contains(&Effect::UngrabPointer));
}

#[test]
fn should_keep_dragging_when_another_window_vanishes() {
    let mut state = single_head(bare_config());
    map(&mut state, 1);
    map(&mut state, 2);
    state.begin_move(10, 10);
    let dragged = state.drag.window();
    let other = if dragged == Some(1) { 2 } else { 1 };
    state.take_effects();

    state.unmanage(other);

    assert_eq!(state.drag.window(), dragged);
    assert!(!state.take_effects().contains(&Effect::UngrabPointer));
}
