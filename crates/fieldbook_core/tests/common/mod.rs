use fieldbook_core::AppState;
use std::collections::BTreeSet;

/// Asserts every ordered id list matches the key set of its paired map,
/// across the whole state tree.
pub fn assert_consistent(state: &AppState) {
    let book_list: BTreeSet<_> = state.all_book_ids.iter().copied().collect();
    let book_keys: BTreeSet<_> = state.books_by_id.keys().copied().collect();
    assert_eq!(
        book_list.len(),
        state.all_book_ids.len(),
        "all_book_ids contains duplicates"
    );
    assert_eq!(book_list, book_keys, "book list/map mismatch");

    for book in state.books_by_id.values() {
        let field_list: BTreeSet<_> = book.all_fields.iter().copied().collect();
        let field_keys: BTreeSet<_> = book.fields_by_id.keys().copied().collect();
        assert_eq!(
            field_list.len(),
            book.all_fields.len(),
            "all_fields contains duplicates in book {}",
            book.id
        );
        assert_eq!(field_list, field_keys, "field list/map mismatch in book {}", book.id);

        let table_list: BTreeSet<_> = book.all_table_views.iter().copied().collect();
        let table_keys: BTreeSet<_> = book.table_views_by_id.keys().copied().collect();
        assert_eq!(table_list, table_keys, "table view list/map mismatch in book {}", book.id);

        let page_view_list: BTreeSet<_> = book.all_page_views.iter().copied().collect();
        let page_view_keys: BTreeSet<_> = book.page_views_by_id.keys().copied().collect();
        assert_eq!(
            page_view_list, page_view_keys,
            "page view list/map mismatch in book {}",
            book.id
        );
    }
}
