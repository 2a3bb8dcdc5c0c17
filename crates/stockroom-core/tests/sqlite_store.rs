use std::path::PathBuf;

use rust_decimal::Decimal;
use stockroom_core::storage::{
    InventoryStore, NewItem, NewTransaction, RequestContext, SearchField, SqliteStore,
    TransactionFilter, TransactionKind,
};
use stockroom_core::StockError;
use tempfile::TempDir;

struct TempStore {
    _dir: TempDir,
    path: PathBuf,
    store: SqliteStore,
}

impl TempStore {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("inventory.db");
        let store = SqliteStore::open(&path).expect("open should succeed");
        Self {
            _dir: dir,
            path,
            store,
        }
    }
}

fn widget() -> NewItem {
    NewItem::new("Widget")
        .with_category("Hardware")
        .with_quantity(10)
        .with_unit_price(Decimal::new(250, 2))
        .with_minimum_stock(5)
}

fn record(
    store: &mut SqliteStore,
    item_id: i64,
    kind: TransactionKind,
    quantity: i64,
) -> stockroom_core::Result<stockroom_core::storage::RecordedTransaction> {
    store.record_transaction(
        &RequestContext::default(),
        &NewTransaction::new(item_id, kind, quantity),
    )
}

#[test]
fn test_open_creates_file_and_reopens() {
    let mut temp = TempStore::new();
    assert!(temp.path.exists());
    let id = temp.store.create_item(&widget()).expect("create should succeed");
    let TempStore { _dir, path, store } = temp;
    store.close().expect("close should succeed");

    let reopened = SqliteStore::open(&path).expect("reopen should succeed");
    let item = reopened.get_item(id).expect("get should succeed");
    assert_eq!(item.map(|item| item.name), Some("Widget".to_string()));
}

#[test]
fn test_create_fetch_round_trip() {
    let mut temp = TempStore::new();
    let new_item = widget()
        .with_supplier("Acme")
        .with_supplier_contact("sales@acme.test")
        .with_barcode("0042")
        .with_location("Shelf B");
    let id = temp.store.create_item(&new_item).expect("create should succeed");

    let item = temp
        .store
        .get_item(id)
        .expect("get should succeed")
        .expect("item should exist");
    assert_eq!(item.id, id);
    assert_eq!(item.name, "Widget");
    assert_eq!(item.category.as_deref(), Some("Hardware"));
    assert_eq!(item.quantity, 10);
    assert_eq!(item.unit_price, Some(Decimal::new(250, 2)));
    assert_eq!(item.supplier.as_deref(), Some("Acme"));
    assert_eq!(item.supplier_contact.as_deref(), Some("sales@acme.test"));
    assert_eq!(item.minimum_stock, 5);
    assert_eq!(item.barcode.as_deref(), Some("0042"));
    assert_eq!(item.location.as_deref(), Some("Shelf B"));
}

#[test]
fn test_create_defaults_for_omitted_fields() {
    let mut temp = TempStore::new();
    let id = temp
        .store
        .create_item(&NewItem::new("Bolt"))
        .expect("create should succeed");

    let item = temp.store.get_item(id).unwrap().unwrap();
    assert_eq!(item.quantity, 0);
    assert_eq!(item.minimum_stock, 0);
    assert!(item.category.is_none());
    assert!(item.unit_price.is_none());
    assert!(item.is_low_stock());
}

#[test]
fn test_get_missing_item_is_none() {
    let temp = TempStore::new();
    assert!(temp.store.get_item(999).unwrap().is_none());
}

#[test]
fn test_duplicate_name_rejected_and_table_unchanged() {
    let mut temp = TempStore::new();
    temp.store.create_item(&widget()).unwrap();

    let err = temp
        .store
        .create_item(&NewItem::new("Widget").with_quantity(1))
        .unwrap_err();
    assert!(matches!(err, StockError::DuplicateName(name) if name == "Widget"));

    let items = temp.store.list_items().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 10);
}

#[test]
fn test_duplicate_name_ignores_case() {
    let mut temp = TempStore::new();
    let id = temp.store.create_item(&widget()).unwrap();

    let err = temp.store.create_item(&NewItem::new("WIDGET")).unwrap_err();
    assert!(matches!(err, StockError::DuplicateName(name) if name == "WIDGET"));

    // Re-casing the item's own name is not a collision
    assert!(temp
        .store
        .update_item(id, &NewItem::new("widget").with_quantity(10))
        .unwrap());
}

#[test]
fn test_huge_stock_value_reports_error_instead_of_panicking() {
    let mut temp = TempStore::new();
    temp.store
        .create_item(
            &NewItem::new("Bulk")
                .with_quantity(9_000_000_000_000_000_000)
                .with_unit_price(Decimal::new(10_000_000_000, 0)),
        )
        .unwrap();
    let items = temp.store.list_items().unwrap();

    assert!(matches!(
        stockroom_core::report::dashboard(&items),
        Err(StockError::Validation(_))
    ));
    assert_eq!(items[0].stock_value(), None);

    let big = temp
        .store
        .create_item(&NewItem::new("Pallet").with_quantity(1))
        .unwrap();
    record(&mut temp.store, big, TransactionKind::Adjustment, i64::MAX).unwrap();
    record(&mut temp.store, big, TransactionKind::Adjustment, i64::MAX).unwrap();
    let records = temp
        .store
        .list_transactions(&TransactionFilter::new())
        .unwrap();
    assert!(stockroom_core::report::transaction_summary(&records).is_err());
}

#[test]
fn test_create_rejects_empty_name() {
    let mut temp = TempStore::new();
    let err = temp.store.create_item(&NewItem::new("  ")).unwrap_err();
    assert!(matches!(err, StockError::Validation(_)));
    assert!(temp.store.list_items().unwrap().is_empty());
}

#[test]
fn test_list_items_ordered_by_id() {
    let mut temp = TempStore::new();
    let first = temp.store.create_item(&NewItem::new("Zinc")).unwrap();
    let second = temp.store.create_item(&NewItem::new("Anvil")).unwrap();

    let ids: Vec<i64> = temp.store.list_items().unwrap().iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![first, second]);
}

#[test]
fn test_widget_scenario() {
    let mut temp = TempStore::new();
    let id = temp.store.create_item(&widget()).unwrap();

    let recorded = record(&mut temp.store, id, TransactionKind::Out, 3).unwrap();
    assert_eq!(recorded.previous_quantity, 10);
    assert_eq!(recorded.new_quantity, 7);
    assert_eq!(temp.store.get_item(id).unwrap().unwrap().quantity, 7);

    let history = temp
        .store
        .list_transactions(&TransactionFilter::new().item(id))
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].kind, TransactionKind::Out);
    assert_eq!(history[0].quantity, 3);
    assert_eq!(history[0].item_name, "Widget");
    assert_eq!(history[0].user.as_deref(), Some("Guest"));

    let err = record(&mut temp.store, id, TransactionKind::Out, 20).unwrap_err();
    assert!(matches!(
        err,
        StockError::InsufficientStock {
            requested: 20,
            available: 7,
            ..
        }
    ));
    assert_eq!(temp.store.get_item(id).unwrap().unwrap().quantity, 7);
    assert_eq!(
        temp.store
            .list_transactions(&TransactionFilter::new())
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_in_adds_and_appends_one_row() {
    let mut temp = TempStore::new();
    let id = temp.store.create_item(&widget()).unwrap();

    let recorded = record(&mut temp.store, id, TransactionKind::In, 15).unwrap();
    assert_eq!(recorded.new_quantity, 25);
    assert_eq!(temp.store.get_item(id).unwrap().unwrap().quantity, 25);
    assert_eq!(
        temp.store
            .list_transactions(&TransactionFilter::new())
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_adjustment_sets_absolute_quantity() {
    let mut temp = TempStore::new();
    let id = temp.store.create_item(&widget()).unwrap();

    let recorded = record(&mut temp.store, id, TransactionKind::Adjustment, 4).unwrap();
    assert_eq!(recorded.previous_quantity, 10);
    assert_eq!(recorded.new_quantity, 4);
    assert_eq!(temp.store.get_item(id).unwrap().unwrap().quantity, 4);
}

#[test]
fn test_out_of_entire_stock_reaches_zero() {
    let mut temp = TempStore::new();
    let id = temp.store.create_item(&widget()).unwrap();

    let recorded = record(&mut temp.store, id, TransactionKind::Out, 10).unwrap();
    assert_eq!(recorded.new_quantity, 0);
}

#[test]
fn test_record_rejects_non_positive_quantity() {
    let mut temp = TempStore::new();
    let id = temp.store.create_item(&widget()).unwrap();

    for quantity in [0, -3] {
        let err = record(&mut temp.store, id, TransactionKind::In, quantity).unwrap_err();
        assert!(matches!(err, StockError::Validation(_)));
    }
    assert!(temp
        .store
        .list_transactions(&TransactionFilter::new())
        .unwrap()
        .is_empty());
}

#[test]
fn test_record_unknown_item_not_found() {
    let mut temp = TempStore::new();
    let err = record(&mut temp.store, 42, TransactionKind::In, 1).unwrap_err();
    assert!(matches!(err, StockError::NotFound(_)));
}

#[test]
fn test_record_uses_request_user_and_notes() {
    let mut temp = TempStore::new();
    let id = temp.store.create_item(&widget()).unwrap();

    temp.store
        .record_transaction(
            &RequestContext::new("ana"),
            &NewTransaction::new(id, TransactionKind::In, 2).with_notes("restock"),
        )
        .unwrap();

    let history = temp.store.list_transactions(&TransactionFilter::new()).unwrap();
    assert_eq!(history[0].user.as_deref(), Some("ana"));
    assert_eq!(history[0].notes.as_deref(), Some("restock"));
}

#[test]
fn test_history_newest_first_and_filters() {
    let mut temp = TempStore::new();
    let widget_id = temp.store.create_item(&widget()).unwrap();
    let bolt_id = temp
        .store
        .create_item(&NewItem::new("Bolt").with_quantity(100))
        .unwrap();

    let first = record(&mut temp.store, widget_id, TransactionKind::In, 1).unwrap();
    let second = record(&mut temp.store, bolt_id, TransactionKind::Out, 5).unwrap();
    let third = record(&mut temp.store, widget_id, TransactionKind::Out, 2).unwrap();

    let all = temp.store.list_transactions(&TransactionFilter::new()).unwrap();
    let ids: Vec<i64> = all.iter().map(|t| t.id).collect();
    assert_eq!(
        ids,
        vec![
            third.transaction_id,
            second.transaction_id,
            first.transaction_id
        ]
    );

    let widget_only = temp
        .store
        .list_transactions(&TransactionFilter::new().item(widget_id))
        .unwrap();
    assert_eq!(widget_only.len(), 2);
    assert!(widget_only.iter().all(|t| t.item_id == widget_id));

    let outs = temp
        .store
        .list_transactions(&TransactionFilter::new().kind(TransactionKind::Out))
        .unwrap();
    assert_eq!(outs.len(), 2);

    let limited = temp
        .store
        .list_transactions(&TransactionFilter::new().limit(1))
        .unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].id, third.transaction_id);
}

#[test]
fn test_update_replaces_fields() {
    let mut temp = TempStore::new();
    let id = temp.store.create_item(&widget()).unwrap();

    let mut replacement = NewItem::from(&temp.store.get_item(id).unwrap().unwrap());
    replacement.name = "Widget XL".to_string();
    replacement.location = Some("Bin 4".to_string());
    replacement.quantity = -2;

    assert!(temp.store.update_item(id, &replacement).unwrap());

    let item = temp.store.get_item(id).unwrap().unwrap();
    assert_eq!(item.name, "Widget XL");
    assert_eq!(item.location.as_deref(), Some("Bin 4"));
    assert_eq!(item.quantity, -2);
    assert_eq!(item.category.as_deref(), Some("Hardware"));
}

#[test]
fn test_update_unknown_id_returns_false() {
    let mut temp = TempStore::new();
    assert!(!temp.store.update_item(7, &NewItem::new("Ghost")).unwrap());
}

#[test]
fn test_update_to_existing_name_is_duplicate() {
    let mut temp = TempStore::new();
    temp.store.create_item(&widget()).unwrap();
    let bolt = temp.store.create_item(&NewItem::new("Bolt")).unwrap();

    let err = temp
        .store
        .update_item(bolt, &NewItem::new("Widget"))
        .unwrap_err();
    assert!(matches!(err, StockError::DuplicateName(_)));
    assert_eq!(temp.store.get_item(bolt).unwrap().unwrap().name, "Bolt");
}

#[test]
fn test_delete_removes_item_and_transactions() {
    let mut temp = TempStore::new();
    let id = temp.store.create_item(&widget()).unwrap();
    let other = temp.store.create_item(&NewItem::new("Bolt").with_quantity(3)).unwrap();
    record(&mut temp.store, id, TransactionKind::In, 5).unwrap();
    record(&mut temp.store, id, TransactionKind::Out, 2).unwrap();
    record(&mut temp.store, other, TransactionKind::Out, 1).unwrap();

    assert!(temp.store.delete_item(id).unwrap());

    assert!(temp.store.get_item(id).unwrap().is_none());
    assert!(temp
        .store
        .list_transactions(&TransactionFilter::new().item(id))
        .unwrap()
        .is_empty());
    assert_eq!(
        temp.store
            .list_transactions(&TransactionFilter::new())
            .unwrap()
            .len(),
        1
    );
    temp.store.check_integrity().expect("integrity should hold");
}

#[test]
fn test_delete_unknown_id_returns_false() {
    let mut temp = TempStore::new();
    assert!(!temp.store.delete_item(1).unwrap());
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let mut temp = TempStore::new();
    temp.store.create_item(&widget()).unwrap();
    temp.store
        .create_item(&NewItem::new("Wood Screw").with_supplier("Acme Fasteners"))
        .unwrap();
    temp.store
        .create_item(&NewItem::new("Hammer").with_category("hardware"))
        .unwrap();

    let by_name = temp.store.search_items("W", SearchField::Name).unwrap();
    assert_eq!(by_name.len(), 2);

    let by_category = temp
        .store
        .search_items("HARDWARE", SearchField::Category)
        .unwrap();
    assert_eq!(by_category.len(), 2);

    let by_supplier = temp.store.search_items("acme", SearchField::Supplier).unwrap();
    assert_eq!(by_supplier.len(), 1);
    assert_eq!(by_supplier[0].name, "Wood Screw");

    assert!(temp
        .store
        .search_items("nothing", SearchField::Barcode)
        .unwrap()
        .is_empty());
}

#[test]
fn test_search_treats_wildcards_literally() {
    let mut temp = TempStore::new();
    temp.store.create_item(&NewItem::new("50% off bin")).unwrap();
    temp.store.create_item(&NewItem::new("500 pack")).unwrap();
    temp.store.create_item(&NewItem::new("wire_nut")).unwrap();
    temp.store.create_item(&NewItem::new("wireXnut")).unwrap();

    let percent = temp.store.search_items("50%", SearchField::Name).unwrap();
    assert_eq!(percent.len(), 1);
    assert_eq!(percent[0].name, "50% off bin");

    let underscore = temp.store.search_items("e_n", SearchField::Name).unwrap();
    assert_eq!(underscore.len(), 1);
    assert_eq!(underscore[0].name, "wire_nut");
}

#[test]
fn test_search_input_is_not_sql() {
    let mut temp = TempStore::new();
    temp.store.create_item(&widget()).unwrap();

    let result = temp
        .store
        .search_items("'; DROP TABLE items; --", SearchField::Name)
        .unwrap();
    assert!(result.is_empty());
    assert_eq!(temp.store.list_items().unwrap().len(), 1);
}

#[test]
fn test_backup_copies_data_and_refuses_overwrite() {
    let mut temp = TempStore::new();
    temp.store.create_item(&widget()).unwrap();

    let backup_dir = tempfile::tempdir().unwrap();
    let destination = backup_dir.path().join("backup.db");
    temp.store.backup_to(&destination).expect("backup should succeed");

    let copy = SqliteStore::open(&destination).unwrap();
    assert_eq!(copy.list_items().unwrap().len(), 1);

    let err = temp.store.backup_to(&destination).unwrap_err();
    assert!(matches!(err, StockError::Validation(_)));
}

#[test]
fn test_open_rejects_newer_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch("PRAGMA user_version = 99;").unwrap();
    }

    let result = SqliteStore::open(&path);
    assert!(matches!(result, Err(StockError::Connection(_))));
}

#[test]
fn test_open_unwritable_path_is_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("inventory.db");

    let result = SqliteStore::open(&path);
    assert!(matches!(result, Err(StockError::Connection(_))));
}
