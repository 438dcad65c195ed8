use super::*;
use crate::config::ColumnOptions;

fn populated(count: u32) -> Layout {
    let mut layout = Layout::with_selector_row();
    let id = layout.rows()[0].id();
    layout.set_column_count(id, count, &ColumnOptions::standard()).unwrap();
    layout
}

#[test]
fn starts_disarmed() {
    let autosave = Autosave::new();
    assert!(!autosave.is_armed());
    assert_eq!(autosave.target(), None);
    assert_eq!(autosave.request(&populated(2)), None);
}

#[test]
fn arm_and_disarm() {
    let mut autosave = Autosave::new();
    autosave.arm("home");
    assert_eq!(autosave.target(), Some("home"));
    autosave.disarm();
    assert!(!autosave.is_armed());
}

#[test]
fn request_carries_full_document() {
    let mut autosave = Autosave::new();
    autosave.arm("home");
    let request = autosave.request(&populated(3)).unwrap();
    assert_eq!(request, SaveRequest { name: "home".into(), body: r#"[{"columns":3}]"#.into() });
}

#[test]
fn disarmed_observer_ignores_changes() {
    let mut autosave = Autosave::new();
    let layout = populated(2);
    let change = LayoutChange::ColumnsSet { row: layout.rows()[0].id(), count: 2 };
    assert_eq!(autosave.on_change(&layout, &change), None);
}

#[test]
fn armed_observer_saves_on_change() {
    let mut autosave = Autosave::new();
    autosave.arm("home");
    let layout = populated(2);
    let change = LayoutChange::ColumnsSet { row: layout.rows()[0].id(), count: 2 };
    let Some(Action::Save(request)) = autosave.on_change(&layout, &change) else {
        panic!("expected a save");
    };
    assert_eq!(request.name, "home");
    assert_eq!(request.body, r#"[{"columns":2}]"#);
}

#[test]
fn wholesale_replace_is_not_saved() {
    let mut autosave = Autosave::new();
    autosave.arm("home");
    let layout = populated(2);
    assert_eq!(autosave.on_change(&layout, &LayoutChange::Replaced { rows: 1 }), None);
}
