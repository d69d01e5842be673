use fieldbook_core::{AppState, Book, Field, FieldType, PageView, TableView, Tag, Viewing};
use serde_json::Value;

#[test]
fn snapshot_blob_uses_the_persisted_field_names() {
    let mut state = AppState::default();
    let mut book = Book::new();
    let mut field = Field::new(FieldType::Tags, "Status");
    field.tags.push(Tag::new("Done"));
    field.table_column_width = Some(120);
    book.insert_field(field);
    state.insert_book(book);

    let encoded = serde_json::to_value(&state).unwrap();
    assert_eq!(encoded["viewing"], Value::String("books".to_string()));
    assert!(encoded["currentBookId"].is_string());
    assert!(encoded["booksById"].is_object());
    assert!(encoded["allBookIds"].is_array());

    let book_value = encoded["booksById"]
        .as_object()
        .unwrap()
        .values()
        .next()
        .unwrap();
    for key in [
        "currentPageId",
        "pagesById",
        "allFields",
        "fieldsById",
        "allTableViews",
        "tableViewsById",
        "currentTableViewId",
        "allPageViews",
        "pageViewsById",
        "currentPageViewId",
    ] {
        assert!(book_value.get(key).is_some(), "missing book key {key}");
    }

    let field_value = book_value["fieldsById"]
        .as_object()
        .unwrap()
        .values()
        .next()
        .unwrap();
    assert_eq!(field_value["type"], Value::String("tags".to_string()));
    assert_eq!(field_value["readOnly"], Value::Bool(false));
    assert_eq!(field_value["tableColumnWidth"], Value::from(120));

    let view_value = book_value["tableViewsById"]
        .as_object()
        .unwrap()
        .values()
        .next()
        .unwrap();
    assert_eq!(view_value["default"], Value::Bool(true));
    assert!(view_value.get("fieldIds").is_some());
    // Unset visibility map is an absent key, not null.
    assert!(view_value.get("visibleFields").is_none());
}

#[test]
fn snapshot_blob_round_trips() {
    let mut state = AppState::default();
    state.insert_book(Book::new());
    state.viewing = Viewing::Settings;

    let encoded = serde_json::to_string(&state).unwrap();
    let decoded: AppState = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, state);
}

#[test]
fn view_constructors_produce_well_formed_defaults() {
    let table = TableView::new();
    assert_eq!(table.name, "Table view");
    assert!(!table.is_default);
    assert!(table.filters.is_none());

    let page = PageView::new();
    assert_eq!(page.name, "Page view");
    assert!(page.visible_fields.is_none());
}

#[test]
fn current_page_follows_the_pointers() {
    let mut state = AppState::default();
    assert!(state.current_page().is_none());

    let book = Book::new();
    let page_id = book.current_page_id.unwrap();
    state.insert_book(book);

    assert_eq!(state.current_page().map(|page| page.id), Some(page_id));
}

#[test]
fn field_lookup_by_label_is_total() {
    let book = Book::new();
    assert!(book.field_id_by_label("anything").is_none());
}
