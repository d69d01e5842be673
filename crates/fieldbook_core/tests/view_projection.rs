use fieldbook_core::{
    apply, fields_for_view, page_matches_search, pages_for_view, visible_fields_by_id_for_view,
    visible_fields_for_view, Action, AppState, Book, FieldType, Tag, ValueData,
};
use std::collections::BTreeMap;
use uuid::Uuid;

fn state_with_book() -> (AppState, Uuid) {
    let mut state = AppState::default();
    let book = Book::new();
    let book_id = book.id;
    state.insert_book(book);
    (state, book_id)
}

fn add_field(state: &AppState, book_id: Uuid, field_type: FieldType, label: &str) -> (AppState, Uuid) {
    let field_id = Uuid::new_v4();
    let next = apply(
        state,
        &Action::AddBookField {
            book_id,
            field_id,
            field_type,
            label: label.to_string(),
        },
    )
    .unwrap();
    (next, field_id)
}

#[test]
fn single_text_field_scenario_end_to_end() {
    // Create book, add "Name", fill the page, search for it.
    let (state, book_id) = state_with_book();
    let (state, name_field) = add_field(&state, book_id, FieldType::Text, "Name");
    let page_id = state.book(book_id).unwrap().current_page_id.unwrap();

    let state = apply(
        &state,
        &Action::SetPageFieldValue {
            book_id,
            page_id,
            field_id: name_field,
            value: Some(ValueData::Text("Alice".to_string())),
        },
    )
    .unwrap();

    let book = state.book(book_id).unwrap();
    let view = book.table_view(book.current_table_view_id).unwrap();
    assert_eq!(fields_for_view(book, view), vec![name_field]);

    let mut searching = view.clone();
    searching.search = "ali".to_string();
    let rows = pages_for_view(book, &searching);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, page_id);

    searching.search = "bob".to_string();
    assert!(pages_for_view(book, &searching).is_empty());
}

#[test]
fn tag_search_matches_on_resolved_labels() {
    let (state, book_id) = state_with_book();
    let (state, status_field) = add_field(&state, book_id, FieldType::Tags, "Status");
    let page_id = state.book(book_id).unwrap().current_page_id.unwrap();

    let done = Tag::new("Done");
    let state = apply(
        &state,
        &Action::SetPageValueTags {
            book_id,
            page_id,
            field_id: status_field,
            tags: vec![done],
        },
    )
    .unwrap();

    let book = state.book(book_id).unwrap();
    let field = book.field(status_field).unwrap();
    let page = book.page(page_id).unwrap();

    assert!(page_matches_search(&[field], page, "don"));
    assert!(page_matches_search(&[field], page, "DONE"));
    assert!(!page_matches_search(&[field], page, "open"));
    // Empty search matches everything.
    assert!(page_matches_search(&[field], page, ""));
}

#[test]
fn reorder_is_reflected_by_views_without_own_ordering() {
    let (state, book_id) = state_with_book();
    let (state, first) = add_field(&state, book_id, FieldType::Text, "F1");
    let (state, second) = add_field(&state, book_id, FieldType::Tags, "F2");

    let state = apply(
        &state,
        &Action::SetBookFieldOrder {
            book_id,
            field_ids: vec![second, first],
        },
    )
    .unwrap();

    let book = state.book(book_id).unwrap();
    let view = book.table_view(book.current_table_view_id).unwrap();
    assert!(view.field_ids.is_empty());
    assert_eq!(fields_for_view(book, view), vec![second, first]);
}

#[test]
fn deleted_fields_disappear_from_projection_but_not_from_views() {
    let (state, book_id) = state_with_book();
    let (state, first) = add_field(&state, book_id, FieldType::Text, "Keep");
    let (state, second) = add_field(&state, book_id, FieldType::Text, "Drop");

    // Pin the view's own ordering, then delete one of the fields.
    let mut view = state
        .book(book_id)
        .unwrap()
        .table_view(state.book(book_id).unwrap().current_table_view_id)
        .cloned()
        .unwrap();
    view.field_ids = vec![second, first];
    let state = apply(&state, &Action::UpsertTableView { book_id, view }).unwrap();
    let state = apply(
        &state,
        &Action::DeleteBookField {
            book_id,
            field_id: second,
        },
    )
    .unwrap();

    let book = state.book(book_id).unwrap();
    let view = book.table_view(book.current_table_view_id).unwrap();
    // Lazy cleanup: the stale id stays on the view, projection filters it.
    assert_eq!(view.field_ids, vec![second, first]);
    assert_eq!(fields_for_view(book, view), vec![first]);
}

#[test]
fn visibility_map_filters_and_reshapes() {
    let (state, book_id) = state_with_book();
    let (state, shown) = add_field(&state, book_id, FieldType::Text, "Shown");
    let (state, hidden) = add_field(&state, book_id, FieldType::Text, "Hidden");
    let (state, unlisted) = add_field(&state, book_id, FieldType::Text, "Unlisted");

    let book = state.book(book_id).unwrap();
    let mut view = book.table_view(book.current_table_view_id).cloned().unwrap();
    // Only explicit `false` entries hide; unlisted fields stay visible.
    view.visible_fields = Some(BTreeMap::from([(shown, true), (hidden, false)]));

    assert_eq!(visible_fields_for_view(book, &view), vec![shown, unlisted]);
    assert_eq!(
        visible_fields_by_id_for_view(book, &view),
        BTreeMap::from([(shown, true), (unlisted, true)])
    );

    // No map at all: everything is visible.
    view.visible_fields = None;
    assert_eq!(
        visible_fields_for_view(book, &view),
        vec![shown, hidden, unlisted]
    );
}

#[test]
fn search_ignores_values_of_deleted_fields() {
    let (state, book_id) = state_with_book();
    let (state, field_id) = add_field(&state, book_id, FieldType::Text, "Name");
    let page_id = state.book(book_id).unwrap().current_page_id.unwrap();

    let state = apply(
        &state,
        &Action::SetPageFieldValue {
            book_id,
            page_id,
            field_id,
            value: Some(ValueData::Text("Alice".to_string())),
        },
    )
    .unwrap();
    let state = apply(&state, &Action::DeleteBookField { book_id, field_id }).unwrap();

    let book = state.book(book_id).unwrap();
    let mut view = book.table_view(book.current_table_view_id).cloned().unwrap();
    view.search = "ali".to_string();
    // The dead value still sits on the page but no longer matches anything.
    assert!(book.page(page_id).unwrap().values.contains_key(&field_id));
    assert!(pages_for_view(book, &view).is_empty());

    view.search = String::new();
    assert_eq!(pages_for_view(book, &view).len(), 1);
}
