use super::SCREEN;
use crate::client::Client;
use crate::geometry::Rect;
use crate::size_hints::{
    Constraints, SizeHints, WM_SIZE_HINTS_LENGTH, apply_size_hints, flags, offset,
};
use proptest::prelude::*;

fn property(flags: u32, fields: &[(usize, u32)]) -> Vec<u32> {
    let mut values = vec![0; WM_SIZE_HINTS_LENGTH];
    values[offset::FLAGS] = flags;
    for &(index, value) in fields {
        values[index] = value;
    }
    values
}

fn constraints(honor_hints: bool) -> Constraints {
    Constraints {
        screen_width: SCREEN.width,
        screen_height: SCREEN.height,
        window_area: SCREEN,
        bar_height: 20,
        honor_hints,
    }
}

fn client_with(hints: SizeHints) -> Client {
    let mut client = Client::new(1, 0);
    client.geometry = Rect::new(0, 0, 100, 100);
    client.set_hints(hints);
    client
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]
    #[test]
    fn should_snap_sizes_to_increments(width in 50i32..1000, height in 50i32..700) {
        let hints = SizeHints::from_wm_normal_hints(&property(
            flags::P_RESIZE_INC | flags::P_BASE_SIZE,
            &[
                (offset::WIDTH_INC, 10),
                (offset::HEIGHT_INC, 20),
                (offset::BASE_WIDTH, 4),
                (offset::BASE_HEIGHT, 4),
            ],
        ));
        let client = client_with(hints);

        let (rect, _) = apply_size_hints(&client, Rect::new(0, 0, width, height), false, &constraints(true));

        prop_assert_eq!((rect.width - 4) % 10, 0);
        prop_assert_eq!((rect.height - 4) % 20, 0);
        prop_assert!(rect.width <= width && rect.height <= height);
    }
}

#[test]
fn should_ignore_short_properties() {
    assert_eq!(SizeHints::from_wm_normal_hints(&[0; 5]), SizeHints::default());
    assert_eq!(SizeHints::from_wm_normal_hints(&[]), SizeHints::default());
}

#[test]
fn should_use_the_minimum_as_base_and_the_base_as_minimum() {
    let from_min = SizeHints::from_wm_normal_hints(&property(
        flags::P_MIN_SIZE,
        &[(offset::MIN_WIDTH, 80), (offset::MIN_HEIGHT, 60)],
    ));
    assert_eq!((from_min.base_width, from_min.base_height), (80, 60));

    let from_base = SizeHints::from_wm_normal_hints(&property(
        flags::P_BASE_SIZE,
        &[(offset::BASE_WIDTH, 30), (offset::BASE_HEIGHT, 40)],
    ));
    assert_eq!((from_base.min_width, from_base.min_height), (30, 40));
}

#[test]
fn should_detect_fixed_size_windows() {
    let fixed = SizeHints::from_wm_normal_hints(&property(
        flags::P_MIN_SIZE | flags::P_MAX_SIZE,
        &[
            (offset::MIN_WIDTH, 100),
            (offset::MIN_HEIGHT, 50),
            (offset::MAX_WIDTH, 100),
            (offset::MAX_HEIGHT, 50),
        ],
    ));
    assert!(fixed.is_fixed());

    let growing = SizeHints::from_wm_normal_hints(&property(
        flags::P_MIN_SIZE | flags::P_MAX_SIZE,
        &[
            (offset::MIN_WIDTH, 100),
            (offset::MIN_HEIGHT, 50),
            (offset::MAX_WIDTH, 200),
            (offset::MAX_HEIGHT, 50),
        ],
    ));
    assert!(!growing.is_fixed());
    assert!(!SizeHints::default().is_fixed());
}

#[test]
fn should_decode_aspect_ratios() {
    let hints = SizeHints::from_wm_normal_hints(&property(
        flags::P_ASPECT,
        &[
            (offset::MIN_ASPECT_X, 2),
            (offset::MIN_ASPECT_Y, 1),
            (offset::MAX_ASPECT_X, 2),
            (offset::MAX_ASPECT_Y, 1),
        ],
    ));

    assert_eq!(hints.min_aspect, 0.5);
    assert_eq!(hints.max_aspect, 2.0);
}

#[test]
fn should_correct_increments_with_the_base_size() {
    let hints = SizeHints::from_wm_normal_hints(&property(
        flags::P_RESIZE_INC | flags::P_BASE_SIZE,
        &[
            (offset::WIDTH_INC, 10),
            (offset::HEIGHT_INC, 20),
            (offset::BASE_WIDTH, 4),
            (offset::BASE_HEIGHT, 4),
        ],
    ));
    let client = client_with(hints);

    let (rect, changed) =
        apply_size_hints(&client, Rect::new(0, 0, 305, 207), false, &constraints(true));

    assert_eq!(rect, Rect::new(0, 0, 304, 204));
    assert!(changed);
}

#[test]
fn should_clamp_to_the_maximum_and_keep_the_aspect() {
    let mut hints = SizeHints {
        max_width: 250,
        max_height: 250,
        ..SizeHints::default()
    };
    let client = client_with(hints);
    let (rect, _) = apply_size_hints(&client, Rect::new(0, 0, 400, 300), false, &constraints(true));
    assert_eq!((rect.width, rect.height), (250, 250));

    hints = SizeHints {
        min_aspect: 1.0,
        max_aspect: 1.0,
        ..SizeHints::default()
    };
    let client = client_with(hints);
    let (rect, _) = apply_size_hints(&client, Rect::new(0, 0, 400, 200), false, &constraints(true));
    assert_eq!((rect.width, rect.height), (200, 200));
}

#[test]
fn should_leave_hints_alone_when_not_honoured() {
    let hints = SizeHints {
        increment_width: 10,
        max_width: 250,
        ..SizeHints::default()
    };
    let client = client_with(hints);

    let (rect, _) = apply_size_hints(&client, Rect::new(0, 0, 405, 300), false, &constraints(false));

    assert_eq!(rect, Rect::new(0, 0, 405, 300));
}

#[test]
fn should_keep_windows_at_least_a_bar_high() {
    let client = client_with(SizeHints::default());

    let (rect, _) = apply_size_hints(&client, Rect::new(0, 0, 5, 0), false, &constraints(false));

    assert_eq!((rect.width, rect.height), (20, 20));
}

#[test]
fn should_pull_windows_back_into_the_window_area() {
    let client = client_with(SizeHints::default());

    let (rect, _) =
        apply_size_hints(&client, Rect::new(1500, 900, 100, 100), false, &constraints(false));

    assert_eq!((rect.x, rect.y), (1100, 700));
}

#[test]
fn should_report_an_unchanged_geometry() {
    let client = client_with(SizeHints::default());

    let (_, changed) =
        apply_size_hints(&client, Rect::new(0, 0, 100, 100), false, &constraints(false));

    assert!(!changed);
}
