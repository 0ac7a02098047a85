use super::{SCREEN, bare_config, dual_head, map, outer, single_head, window_info};
use crate::geometry::Rect;
use crate::layout::LayoutKind;
use crate::state::{ConfigureRequest, Effect};
use proptest::prelude::*;

/// Arranging layouts other than the starting tile layout. Selecting the
/// current layout again flips back to the previous one.
const ARRANGING: [LayoutKind; 4] = [
    LayoutKind::Monocle,
    LayoutKind::Bstack,
    LayoutKind::Grid,
    LayoutKind::Deck,
];

fn request_geometry(geometry: Rect) -> ConfigureRequest {
    ConfigureRequest {
        x: Some(geometry.x),
        y: Some(geometry.y),
        width: Some(geometry.width),
        height: Some(geometry.height),
        border_width: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]
    #[test]
    fn should_never_move_floating_clients_when_arranging(
        x in 0i32..500,
        y in 0i32..300,
        width in 50i32..600,
        height in 50i32..400,
        others in 1u32..6,
        layout in 0usize..ARRANGING.len()
    ) {
        let mut state = single_head(bare_config());
        map(&mut state, 1);
        prop_assert!(state.toggle_floating());
        let geometry = Rect::new(x, y, width, height);
        prop_assert!(state.configure_request(1, request_geometry(geometry)));

        for window in 2..2 + others {
            map(&mut state, window);
        }
        state.set_layout(Some(ARRANGING[layout]));
        state.arrange(None);

        let client = state.client(1).expect("managed");
        prop_assert!(client.is_floating);
        prop_assert_eq!(client.geometry, geometry);
    }
}

#[test]
fn should_tile_three_clients_into_master_and_stack() {
    let mut state = single_head(bare_config());
    for window in 1..=3 {
        map(&mut state, window);
    }

    // New clients go after the first tiled one.
    assert_eq!(state.tiled_clients(0), vec![1, 3, 2]);
    assert_eq!(outer(&state, 1), Rect::new(0, 0, 660, 800));
    assert_eq!(outer(&state, 3), Rect::new(660, 0, 540, 400));
    assert_eq!(outer(&state, 2), Rect::new(660, 400, 540, 400));
}

#[test]
fn should_cover_the_area_without_borders_in_monocle() {
    let mut state = single_head(bare_config());
    for window in 1..=3 {
        map(&mut state, window);
    }

    state.set_layout(Some(LayoutKind::Monocle));

    for window in 1..=3 {
        let client = state.client(window).expect("managed");
        assert_eq!(client.border_width, 0);
        assert_eq!(client.geometry, SCREEN);
    }
    // The most recent client, 3, is second in tiling order.
    assert_eq!(state.selected_monitor().layout_symbol, "[2/3]");
}

#[test]
fn should_strip_the_border_of_a_lone_tiled_client() {
    let mut state = single_head(bare_config());
    map(&mut state, 1);

    let client = state.client(1).expect("managed");
    assert_eq!(client.border_width, 0);
    assert_eq!(client.old_border_width, 2);
    assert_eq!(outer(&state, 1), SCREEN);

    map(&mut state, 2);

    assert_eq!(state.client(1).map(|c| c.border_width), Some(2));
    assert_eq!(state.client(2).map(|c| c.border_width), Some(2));
}

#[test]
fn should_refuse_master_fraction_with_a_single_client() {
    let mut state = single_head(bare_config());
    map(&mut state, 1);
    state.take_effects();

    assert!(!state.set_master_fraction(0.05));
    assert_eq!(state.selected_monitor().master_fraction(), 0.55);
    assert!(state.take_effects().is_empty());
}

#[test]
fn should_queue_map_and_configure_when_managing() {
    let mut state = single_head(bare_config());
    map(&mut state, 7);
    let effects = state.take_effects();

    assert!(effects.contains(&Effect::Map(7)));
    assert!(effects.contains(&Effect::Focus(7)));
    assert!(effects.iter().any(|effect| matches!(effect, Effect::Configure { window: 7, .. })));
    assert_eq!(state.selected_client(), Some(7));
}

#[test]
fn should_ignore_a_window_managed_twice() {
    let mut state = single_head(bare_config());
    map(&mut state, 1);
    map(&mut state, 1);

    assert_eq!(state.selected_monitor().clients, vec![1]);
    assert_eq!(state.selected_monitor().stack, vec![1]);
}

#[test]
fn should_leave_no_dangling_references_after_unmanage() {
    let mut state = single_head(bare_config());
    for window in 1..=3 {
        map(&mut state, window);
    }
    assert!(state.alt_tab.contains(3));

    let released = state.unmanage(3);

    assert_eq!(released.map(|client| client.window), Some(3));
    assert!(!state.is_managed(3));
    assert!(!state.alt_tab.contains(3));
    for monitor in &state.monitors {
        assert!(!monitor.clients.contains(&3));
        assert!(!monitor.stack.contains(&3));
        assert_ne!(monitor.selected, Some(3));
    }
    assert!(state.selected_client().is_some());
}

#[test]
fn should_return_nothing_when_unmanaging_an_unknown_window() {
    let mut state = single_head(bare_config());

    assert!(state.unmanage(42).is_none());
}

#[test]
fn should_float_transients_on_their_parents_tags() {
    let mut state = single_head(bare_config());
    map(&mut state, 1);
    state.tag(1 << 3);
    state.view(1 << 3);

    let mut info = window_info(2, "Dialog");
    info.transient_for = Some(1);
    state.manage(info);

    let client = state.client(2).expect("managed");
    assert!(client.is_floating);
    assert_eq!(client.tags, 1 << 3);
}

#[test]
fn should_float_fixed_size_windows() {
    let mut state = single_head(bare_config());
    let mut info = window_info(1, "Fixed");
    info.hints.min_width = 200;
    info.hints.max_width = 200;
    info.hints.min_height = 100;
    info.hints.max_height = 100;
    state.manage(info);

    let client = state.client(1).expect("managed");
    assert!(client.is_fixed);
    assert!(client.is_floating);
}

#[test]
fn should_zoom_the_selection_to_master_and_back() {
    let mut state = single_head(bare_config());
    for window in 1..=3 {
        map(&mut state, window);
    }
    assert_eq!(state.selected_client(), Some(3));

    assert!(state.zoom());
    assert_eq!(state.tiled_clients(0), vec![3, 1, 2]);
    assert_eq!(outer(&state, 3), Rect::new(0, 0, 660, 800));

    // Zooming the master promotes the next tiled client.
    assert!(state.zoom());
    assert_eq!(state.tiled_clients(0), vec![1, 3, 2]);
    assert_eq!(state.selected_client(), Some(1));
}

#[test]
fn should_push_the_selection_through_the_tiling_order() {
    let mut state = single_head(bare_config());
    for window in 1..=3 {
        map(&mut state, window);
    }

    assert!(state.push_down());
    assert_eq!(state.tiled_clients(0), vec![1, 2, 3]);

    // Wraps to the head.
    assert!(state.push_down());
    assert_eq!(state.tiled_clients(0), vec![3, 1, 2]);

    assert!(state.push_up());
    assert_eq!(state.tiled_clients(0), vec![1, 2, 3]);
    assert_eq!(state.selected_client(), Some(3));
}

#[test]
fn should_cycle_focus_through_the_stack() {
    let mut state = single_head(bare_config());
    for window in 1..=3 {
        map(&mut state, window);
    }

    assert!(state.focus_stack(1));
    assert_eq!(state.selected_client(), Some(2));
    assert!(state.focus_stack(1));
    assert_eq!(state.selected_client(), Some(1));
    assert!(state.focus_stack(-1));
    assert_eq!(state.selected_client(), Some(2));
}

#[test]
fn should_skip_excluded_classes_when_cycling() {
    let mut config = bare_config();
    config.rotation_excluded_classes = vec!["tray".to_string()];
    let mut state = single_head(config);
    map(&mut state, 1);
    state.manage(window_info(2, "stalonetray"));
    map(&mut state, 3);

    assert!(state.client(2).is_some_and(|client| client.rotation_excluded));
    assert_eq!(state.rotation_clients(0), vec![1, 3]);

    state.focus_stack(1);
    assert_eq!(state.selected_client(), Some(1));
}

#[test]
fn should_jump_back_and_forth_with_alt_tab() {
    let mut state = single_head(bare_config());
    for window in 1..=3 {
        map(&mut state, window);
    }

    assert!(state.alt_tab(None));
    assert_eq!(state.selected_client(), Some(2));
    assert!(state.alt_tab(None));
    assert_eq!(state.selected_client(), Some(3));
}

#[test]
fn should_keep_the_alt_tab_pair_when_the_target_is_hidden() {
    let mut state = single_head(bare_config());
    map(&mut state, 1);
    map(&mut state, 2);
    state.focus(Some(2));
    assert!(state.tag(1 << 1));
    assert_eq!(state.selected_client(), Some(1));
    assert_eq!((state.alt_tab.current(), state.alt_tab.other()), (Some(1), Some(2)));

    assert!(!state.alt_tab(None));

    assert_eq!(state.selected_client(), Some(1));
    assert_eq!((state.alt_tab.current(), state.alt_tab.other()), (Some(1), Some(2)));

    assert!(state.toggle_view(1 << 1));
    assert!(state.alt_tab(None));
    assert_eq!(state.selected_client(), Some(2));
}

#[test]
fn should_not_record_a_fallback_as_the_requested_focus() {
    let mut state = single_head(bare_config());
    map(&mut state, 1);
    map(&mut state, 2);
    state.focus(Some(2));
    assert!(state.tag(1 << 1));

    state.focus(Some(2));

    assert_eq!(state.selected_client(), Some(1));
    assert_eq!((state.alt_tab.current(), state.alt_tab.other()), (Some(1), Some(2)));
}

#[test]
fn should_refuse_alt_tab_without_history() {
    let mut state = single_head(bare_config());

    assert!(!state.alt_tab(None));
}

#[test]
fn should_toggle_floating_and_restore_the_saved_geometry() {
    let mut state = single_head(bare_config());
    map(&mut state, 1);
    map(&mut state, 2);
    let saved = state.client(2).map(|c| c.floating_geometry);

    assert!(state.toggle_floating());
    let client = state.client(2).expect("managed");
    assert!(client.is_floating);
    assert_eq!(Some(client.geometry), saved);
    assert_eq!(state.tiled_clients(0), vec![1]);

    assert!(state.toggle_floating());
    assert!(state.client(2).is_some_and(|c| !c.is_floating));
    assert_eq!(state.tiled_clients(0), vec![1, 2]);
}

#[test]
fn should_enter_and_leave_fullscreen() {
    let mut state = single_head(bare_config());
    map(&mut state, 1);
    map(&mut state, 2);

    assert!(state.toggle_fullscreen());
    let client = state.client(2).expect("managed");
    assert!(client.is_fullscreen);
    assert!(client.is_floating);
    assert_eq!(client.border_width, 0);
    assert_eq!(client.geometry, SCREEN);

    assert!(state.toggle_fullscreen());
    let client = state.client(2).expect("managed");
    assert!(!client.is_fullscreen);
    assert!(!client.is_floating);
    assert_eq!(client.border_width, 2);
    assert_eq!(outer(&state, 2), Rect::new(660, 0, 540, 800));
}

#[test]
fn should_weight_the_selected_stack_client() {
    let mut state = single_head(bare_config());
    for window in 1..=3 {
        map(&mut state, window);
    }

    assert!(state.set_client_weight(0.25));
    assert_eq!(state.client(3).map(|c| c.weight), Some(1.25));
    assert_eq!(outer(&state, 3).height, 444);
    assert_eq!(outer(&state, 2), Rect::new(660, 444, 540, 356));

    assert!(state.set_client_weight(0.0));
    assert_eq!(state.client(3).map(|c| c.weight), Some(1.0));
}

#[test]
fn should_refuse_weights_for_a_lone_master() {
    let mut state = single_head(bare_config());
    for window in 1..=3 {
        map(&mut state, window);
    }
    state.focus(Some(1));

    assert!(!state.set_client_weight(0.25));
    assert_eq!(state.client(1).map(|c| c.weight), Some(1.0));
}

#[test]
fn should_refuse_weights_outside_the_allowed_range() {
    let mut state = single_head(bare_config());
    for window in 1..=3 {
        map(&mut state, window);
    }

    assert!(!state.set_client_weight(3.5));
    assert!(!state.set_client_weight(-0.9));
    assert_eq!(state.client(3).map(|c| c.weight), Some(1.0));
}

#[test]
fn should_honour_configure_requests_of_floating_clients_only() {
    use crate::state::ConfigureRequest;

    let mut state = single_head(bare_config());
    map(&mut state, 1);
    map(&mut state, 2);
    state.take_effects();

    let request = ConfigureRequest {
        width: Some(100),
        height: Some(100),
        ..ConfigureRequest::default()
    };
    assert!(state.configure_request(2, request));
    assert_eq!(state.take_effects(), vec![Effect::NotifyGeometry(2)]);

    state.toggle_floating();
    state.take_effects();
    assert!(state.configure_request(2, request));
    let client = state.client(2).expect("managed");
    assert_eq!((client.geometry.width, client.geometry.height), (100, 100));

    assert!(!state.configure_request(99, request));
}

#[test]
fn should_send_a_client_to_the_next_monitor() {
    let mut state = dual_head(bare_config());
    map(&mut state, 1);

    assert!(state.tag_monitor(1));

    assert_eq!(state.client(1).map(|c| c.monitor), Some(1));
    assert_eq!(state.monitors[1].clients, vec![1]);
    assert!(state.monitors[0].clients.is_empty());
    assert_eq!(outer(&state, 1), Rect::new(1200, 0, 1200, 800));
}

#[test]
fn should_carry_the_pointer_to_the_focused_monitor() {
    let mut config = bare_config();
    config.transfer_pointer = true;
    let mut state = dual_head(config);
    state.take_effects();

    assert!(state.focus_monitor(1, Some((100, 100))));

    assert_eq!(state.selected_monitor, 1);
    assert_eq!(state.pointer_transfer, Some((1300, 100)));
    assert!(state.take_effects().contains(&Effect::WarpPointer { x: 1300, y: 100 }));
}

#[test]
fn should_ignore_the_enter_caused_by_a_pointer_transfer() {
    let mut config = bare_config();
    config.focus_follows_mouse = true;
    config.transfer_pointer = true;
    let mut state = dual_head(config);
    map(&mut state, 1);
    state.focus_monitor(1, Some((100, 100)));

    state.pointer_entered(Some(1), 0, 1300, 100);
    assert_eq!(state.selected_monitor, 1);

    state.pointer_entered(Some(1), 0, 50, 50);
    assert_eq!(state.selected_monitor, 0);
    assert_eq!(state.selected_client(), Some(1));
}

#[test]
fn should_pick_the_monitor_with_the_largest_overlap() {
    let state = dual_head(bare_config());

    assert_eq!(state.rect_to_monitor(Rect::new(1100, 0, 300, 100)), 1);
    assert_eq!(state.rect_to_monitor(Rect::new(900, 0, 400, 100)), 0);
    assert_eq!(state.monitor_at(1500, 10), 1);
}

#[test]
fn should_move_orphans_to_the_first_monitor_when_a_head_vanishes() {
    let mut state = dual_head(bare_config());
    state.select_monitor(1);
    map(&mut state, 1);
    assert_eq!(state.client(1).map(|c| c.monitor), Some(1));

    assert!(state.update_geometry(&[SCREEN], SCREEN));

    assert_eq!(state.monitors.len(), 1);
    assert_eq!(state.selected_monitor, 0);
    assert_eq!(state.client(1).map(|c| c.monitor), Some(0));
    assert_eq!(state.monitors[0].clients, vec![1]);
}

#[test]
fn should_add_a_monitor_for_a_new_head() {
    let mut state = single_head(bare_config());

    assert!(state.update_geometry(
        &[SCREEN, Rect::new(1200, 0, 1200, 800)],
        Rect::new(0, 0, 2400, 800)
    ));
    assert_eq!(state.monitors.len(), 2);
    assert_eq!(state.monitors[1].window_area, Rect::new(1200, 0, 1200, 800));
}

#[test]
fn should_release_every_client_on_quit() {
    let mut state = dual_head(bare_config());
    map(&mut state, 1);
    map(&mut state, 2);
    state.tag_monitor(1);

    let mut released: Vec<_> = state.release_all().into_iter().map(|c| c.window).collect();
    released.sort_unstable();

    assert_eq!(released, vec![1, 2]);
    assert!(state.clients.is_empty());
}

#[test]
fn should_carve_the_bar_out_of_the_window_area() {
    let mut config = bare_config();
    config.show_bar = true;
    config.top_bar = true;
    let state = single_head(config);

    assert_eq!(state.monitors[0].bar_y, 0);
    assert_eq!(state.monitors[0].window_area, Rect::new(0, 20, 1200, 780));
}

#[test]
fn should_show_tabs_for_more_than_one_monocle_client() {
    let mut config = bare_config();
    config.tab_mode = crate::monitor::TabMode::Auto;
    let mut state = single_head(config);
    map(&mut state, 1);
    map(&mut state, 2);

    state.set_layout(Some(LayoutKind::Monocle));
    assert_eq!(state.monitors[0].window_area, Rect::new(0, 20, 1200, 780));

    state.set_layout(Some(LayoutKind::Tile));
    assert_eq!(state.monitors[0].window_area, SCREEN);
}

#[test]
fn should_replace_a_missing_status_with_the_version() {
    let mut state = single_head(bare_config());

    state.set_status_text(Some("load 0.42".to_string()));
    assert_eq!(state.status_text, "load 0.42");

    state.set_status_text(None);
    assert!(state.status_text.starts_with("oxtile-"));
}

#[test]
fn should_restore_floating_geometry_and_borders_across_a_tiled_layout() {
    let mut state = single_head(bare_config());
    map(&mut state, 1);
    state.set_layout(Some(LayoutKind::Floating));
    let moved = Rect::new(100, 120, 400, 300);
    assert!(state.configure_request(1, request_geometry(moved)));
    assert_eq!(state.client(1).map(|c| c.geometry), Some(moved));

    state.set_layout(Some(LayoutKind::Tile));
    let tiled = state.client(1).expect("managed");
    assert_eq!(tiled.geometry, Rect::new(0, 0, 1200, 800));
    assert_eq!(tiled.border_width, 0);
    assert_eq!(tiled.floating_geometry, moved);

    state.set_layout(Some(LayoutKind::Floating));
    let floating = state.client(1).expect("managed");
    assert_eq!(floating.geometry, moved);
    assert_eq!(floating.border_width, 2);
}

#[test]
fn should_center_only_clients_placed_by_rules_under_a_floating_layout() {
    let mut state = single_head(bare_config());
    state.set_layout(Some(LayoutKind::Floating));
    map(&mut state, 1);

    let mut dialog = window_info(2, "Term");
    dialog.transient_for = Some(1);
    state.manage(dialog);

    let parent = state.client(1).expect("managed");
    assert!(parent.is_centered);
    assert_eq!((parent.geometry.x, parent.geometry.y), (450, 300));

    let transient = state.client(2).expect("managed");
    assert!(!transient.is_centered);
    assert_eq!((transient.geometry.x, transient.geometry.y), (10, 10));
}
