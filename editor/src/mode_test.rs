use super::*;

#[test]
fn default_mode_is_studio() {
    assert_eq!(Mode::default(), Mode::Studio);
}

#[test]
fn toggled_flips_both_ways() {
    assert_eq!(Mode::Studio.toggled(), Mode::View);
    assert_eq!(Mode::View.toggled(), Mode::Studio);
}

#[test]
fn only_studio_is_editable() {
    assert!(Mode::Studio.is_editable());
    assert!(!Mode::View.is_editable());
}

#[test]
fn view_mode_hides_every_affordance() {
    let a = Mode::View.affordances();
    assert!(!a.any());
    assert_eq!(a, Affordances::none());
}

#[test]
fn studio_mode_shows_every_affordance() {
    let a = Mode::Studio.affordances();
    assert!(a.add_row && a.delete_row && a.drag_handles);
    assert!(a.change_layout && a.row_height && a.save_load);
}
