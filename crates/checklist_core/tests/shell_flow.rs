use checklist_core::db::open_db_in_memory;
use checklist_core::{
    PreferencesStore, ShellError, SqliteTodoRepository, TodoChange, TodoService, TodoShell,
};
use rusqlite::Connection;
use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

fn shell<'conn>(
    conn: &'conn Connection,
    prefs_path: &Path,
) -> TodoShell<SqliteTodoRepository<'conn>> {
    let service = TodoService::new(SqliteTodoRepository::try_new(conn).unwrap());
    TodoShell::new(service, PreferencesStore::load(prefs_path).unwrap())
}

#[test]
fn add_sheet_is_gated_on_title() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db_in_memory().unwrap();
    let mut shell = shell(&conn, &dir.path().join("prefs.json"));

    assert!(!shell.is_sheet_shown());
    assert!(matches!(shell.submit_new_sheet(), Err(ShellError::NoSheetShown)));

    let form = shell.open_new_sheet();
    assert!(!form.can_submit());
    assert!(matches!(shell.submit_new_sheet(), Err(ShellError::EmptyTitle)));
    assert!(shell.is_sheet_shown());

    let form = shell.new_sheet_mut().unwrap();
    form.title = "Buy milk".to_string();
    let created = shell.submit_new_sheet().unwrap();

    assert!(!shell.is_sheet_shown());
    let rows = shell.rows().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, created.id);
    assert_eq!(rows[0].title, "Buy milk");
    assert_eq!(rows[0].description, None);
    assert!(!rows[0].is_complete);
}

#[test]
fn cancel_discards_the_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db_in_memory().unwrap();
    let mut shell = shell(&conn, &dir.path().join("prefs.json"));

    shell.open_new_sheet().title = "never saved".to_string();
    shell.cancel_new_sheet();

    assert!(!shell.is_sheet_shown());
    assert!(shell.rows().unwrap().is_empty());
    assert!(shell.open_new_sheet().title.is_empty());
}

#[test]
fn edit_goes_through_buffer_until_submit() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db_in_memory().unwrap();
    let mut shell = shell(&conn, &dir.path().join("prefs.json"));

    let form = shell.open_new_sheet();
    form.title = "draft".to_string();
    form.description = "first pass".to_string();
    let created = shell.submit_new_sheet().unwrap();

    let mut form = shell.begin_edit(0).unwrap();
    assert_eq!(form.target_id(), Some(created.id));
    assert_eq!(form.created_at(), Some(created.created_at));
    form.title = "final".to_string();
    form.is_complete = true;

    assert_eq!(shell.rows().unwrap()[0].title, "draft");

    shell.submit_edit(&form).unwrap();
    let row = &shell.rows().unwrap()[0];
    assert_eq!(row.title, "final");
    assert_eq!(row.description.as_deref(), Some("first pass"));
    assert!(row.is_complete);
    assert_eq!(row.created_at, created.created_at);

    form.title.clear();
    assert!(matches!(shell.submit_edit(&form), Err(ShellError::EmptyTitle)));
}

#[test]
fn edit_of_row_deleted_meanwhile_surfaces_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db_in_memory().unwrap();
    let mut shell = shell(&conn, &dir.path().join("prefs.json"));

    shell.open_new_sheet().title = "short lived".to_string();
    shell.submit_new_sheet().unwrap();
    let form = shell.begin_edit(0).unwrap();
    shell.delete_at(&[0]).unwrap();

    assert!(matches!(shell.submit_edit(&form), Err(ShellError::Store(_))));
}

#[test]
fn toggle_and_delete_by_position() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db_in_memory().unwrap();
    let mut shell = shell(&conn, &dir.path().join("prefs.json"));

    for title in ["one", "two", "three", "four"] {
        shell.open_new_sheet().title = title.to_string();
        shell.submit_new_sheet().unwrap();
    }

    assert!(shell.toggle_at(1).unwrap().is_complete);
    assert!(matches!(
        shell.toggle_at(9),
        Err(ShellError::PositionOutOfRange { position: 9, len: 4 })
    ));

    let removed = shell.delete_at(&[0, 2, 7]).unwrap();
    assert_eq!(removed.len(), 2);

    let titles = shell
        .rows()
        .unwrap()
        .into_iter()
        .map(|row| (row.title, row.is_complete))
        .collect::<Vec<_>>();
    assert_eq!(
        titles,
        vec![("two".to_string(), true), ("four".to_string(), false)]
    );
}

#[test]
fn shell_mutations_notify_subscribers() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db_in_memory().unwrap();
    let mut shell = shell(&conn, &dir.path().join("prefs.json"));

    let renders = Rc::new(Cell::new(0));
    let counter = Rc::clone(&renders);
    shell
        .service_mut()
        .subscribe(move |_: &TodoChange| counter.set(counter.get() + 1));

    shell.open_new_sheet().title = "render me".to_string();
    shell.submit_new_sheet().unwrap();
    shell.toggle_at(0).unwrap();
    shell.delete_at(&[0]).unwrap();
    shell.delete_at(&[0]).unwrap();

    assert_eq!(renders.get(), 3);
}

#[test]
fn dark_mode_persists_independently_of_records() {
    let dir = tempfile::tempdir().unwrap();
    let prefs_path = dir.path().join("prefs.json");
    let conn = open_db_in_memory().unwrap();

    {
        let mut shell = shell(&conn, &prefs_path);
        assert!(!shell.dark_mode());
        shell.set_dark_mode(true).unwrap();
        assert!(shell.dark_mode());
        assert!(shell.rows().unwrap().is_empty());
    }

    let other_conn = open_db_in_memory().unwrap();
    let shell = shell(&other_conn, &prefs_path);
    assert!(shell.dark_mode());
}

#[test]
fn corrupt_preferences_do_not_block_the_screen() {
    let dir = tempfile::tempdir().unwrap();
    let prefs_path = dir.path().join("prefs.json");
    std::fs::write(&prefs_path, br#"{"dark_mode": tru"#).unwrap();
    let conn = open_db_in_memory().unwrap();
    let mut shell = shell(&conn, &prefs_path);

    assert!(!shell.dark_mode());
    assert!(shell.rows().unwrap().is_empty());

    shell.set_dark_mode(true).unwrap();
    assert!(PreferencesStore::load(&prefs_path).unwrap().dark_mode());
}
