use chrono::NaiveDate;
use grocery_core::{GrocerySession, MemorySlotRepository, NewItem};

#[test]
fn download_writes_dated_pdf_for_current_list() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = GrocerySession::open(MemorySlotRepository::new());
    session.on_create_list("Weekly Shop");
    session.on_add_item(NewItem::new("Apples", "2 lbs", 1.99));
    session.on_add_item(NewItem::new("Milk", "1 gal", 3.49));

    let generated_at = NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(18, 30, 0)
        .unwrap();
    let response = session.on_download_pdf(dir.path(), generated_at);
    assert!(response.ok, "{}", response.message);

    let path = dir.path().join("grocery_list_weekly_shop_20261019.pdf");
    assert_eq!(response.id.as_deref(), Some(path.display().to_string().as_str()));
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.5"));
    let raw = String::from_utf8_lossy(&bytes);
    assert!(raw.contains("Total Spend: $5.48"));
    assert!(raw.contains("Apples"));
}

#[test]
fn download_without_current_list_fails_softly() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = GrocerySession::open(MemorySlotRepository::new());
    session.on_select_list("missing");

    let generated_at = NaiveDate::from_ymd_opt(2026, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let response = session.on_download_pdf(dir.path(), generated_at);
    assert!(!response.ok);
    assert!(response.message.contains("no list is selected"));
}
