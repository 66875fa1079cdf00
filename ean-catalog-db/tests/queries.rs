use ean_catalog_db::*;

fn seed(conn: &rusqlite::Connection) {
    for (id, name) in [(1, "Tools"), (2, "Food")] {
        insert_category(
            conn,
            &Category {
                id,
                name: name.to_string(),
            },
        )
        .unwrap();
    }
    insert_brand(
        conn,
        &Brand {
            id: 10,
            name: "Acme".to_string(),
        },
    )
    .unwrap();
    for (barcode, name, category_id) in [(111, "Widget", 1), (222, "Bread", 2), (333, "Hammer", 1)]
    {
        insert_barcode(
            conn,
            &BarcodeRecord {
                barcode,
                name: name.to_string(),
                category_id,
                brand_id: 10,
            },
        )
        .unwrap();
    }
}

#[test]
fn catalog_stats_on_empty_database() {
    let conn = open_memory().unwrap();
    assert_eq!(catalog_stats(&conn).unwrap(), CatalogStats::default());
}

#[test]
fn catalog_stats_counts_each_table() {
    let conn = open_memory().unwrap();
    seed(&conn);
    let stats = catalog_stats(&conn).unwrap();
    assert_eq!(stats.categories, 2);
    assert_eq!(stats.brands, 1);
    assert_eq!(stats.barcodes, 3);
}

#[test]
fn lookups_return_none_for_unknown_ids() {
    let conn = open_memory().unwrap();
    seed(&conn);
    assert_eq!(find_barcode(&conn, 999).unwrap(), None);
    assert_eq!(find_category(&conn, 99).unwrap(), None);
    assert_eq!(find_brand(&conn, 99).unwrap(), None);
}

#[test]
fn find_barcode_handles_full_width_ean13() {
    let conn = open_memory().unwrap();
    seed(&conn);
    let record = BarcodeRecord {
        barcode: 9_999_999_999_999,
        name: "Max".to_string(),
        category_id: 2,
        brand_id: 10,
    };
    insert_barcode(&conn, &record).unwrap();
    assert_eq!(find_barcode(&conn, record.barcode).unwrap(), Some(record));
}

#[test]
fn category_lookup_uses_index_after_build() {
    let conn = open_memory().unwrap();
    seed(&conn);
    create_indexes(&conn).unwrap();

    let plan: String = conn
        .query_row(
            "EXPLAIN QUERY PLAN SELECT barcode FROM ean WHERE category_id = 1",
            [],
            |row| row.get(3),
        )
        .unwrap();
    assert!(plan.contains("idx_ean_category"), "plan was: {plan}");
}
