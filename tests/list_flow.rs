use woodshed::filter::DateFilter;
use woodshed::store::SessionDb;
use woodshed::timeunit::{Day, Minutes};
use woodshed::list::SessionList;

fn day(y: i32, m: u32, d: u32) -> Day {
    Day::from_ymd(y, m, d).unwrap()
}

fn seed(db: &SessionDb, days: &[Day]) {
    for (i, d) in days.iter().enumerate() {
        db.insert(
            "piece",
            10 + i as i64,
            None,
            Minutes::from_millis(i as i64 * 3_600_000),
            *d,
        )
        .unwrap();
    }
}

#[test]
fn refresh_pages_and_clamps_a_stale_offset() {
    let dir = tempfile::tempdir().unwrap();
    let db = SessionDb::init(dir.path()).unwrap();
    let today = day(2025, 6, 15);

    let base = day(2025, 6, 1);
    let days: Vec<Day> = (0..100i64)
        .map(|i| Day::from_num_days(base.num_days_from_epoch() + i % 10))
        .collect();
    seed(&db, &days);

    let mut list = SessionList::new(13);
    // A remembered position from a larger, older result set.
    list.set_offset(666);
    let page = list.refresh_at(&db, today).unwrap();
    assert_eq!(page.total, 100);
    assert_eq!(page.offset, 87);
    assert_eq!(page.sessions.len(), 13);

    // The resolved range spans the first record through today.
    assert_eq!(page.range.start, base);
    assert_eq!(page.range.end, today);
}

#[test]
fn selection_survives_materialization_and_deletion() {
    let dir = tempfile::tempdir().unwrap();
    let db = SessionDb::init(dir.path()).unwrap();
    let today = day(2025, 6, 15);
    let d = day(2025, 6, 10);
    seed(&db, &[d, d, d, d, d]);

    let mut list = SessionList::new(10);
    let page = list.refresh_at(&db, today).unwrap();
    assert_eq!(page.total, 5);

    // Select everything, then deselect one concrete row.
    let kept = page.sessions[2].id;
    list.selection().select_all();
    list.selection().click(kept, |_| {}, || {});
    assert_eq!(list.selection().selected_count(), 4);

    let selected = list.selected_ids(&db, &page.range).unwrap();
    assert_eq!(selected.len(), 4);
    assert!(!selected.contains(&kept));

    assert_eq!(db.delete(&selected).unwrap(), 4);

    // A refresh resets selection and re-derives the count.
    let page = list.refresh_at(&db, today).unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.sessions[0].id, kept);
    assert!(!list.selection().is_active());
    assert_eq!(list.selected_ids(&db, &page.range).unwrap().len(), 0);
}

#[test]
fn filters_scope_the_result_set() {
    let dir = tempfile::tempdir().unwrap();
    let db = SessionDb::init(dir.path()).unwrap();
    let today = day(2025, 6, 15);
    seed(
        &db,
        &[day(2025, 5, 1), day(2025, 5, 20), day(2025, 6, 10)],
    );

    let mut list = SessionList::new(10);
    list.set_filter(DateFilter {
        from: Some(day(2025, 5, 15)),
        to_exclusive: Some(day(2025, 6, 1)),
    });
    let page = list.refresh_at(&db, today).unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.range.end, day(2025, 5, 31));
    assert_eq!(page.sessions[0].day, day(2025, 5, 20));

    // An inverted filter yields an empty result set, not an error.
    list.set_filter(DateFilter {
        from: Some(day(2025, 6, 1)),
        to_exclusive: Some(day(2025, 5, 1)),
    });
    let page = list.refresh_at(&db, today).unwrap();
    assert_eq!(page.total, 0);
    assert!(page.sessions.is_empty());
    assert!(page.range.is_empty());
}

#[test]
fn empty_store_resolves_to_a_single_day_range() {
    let dir = tempfile::tempdir().unwrap();
    let db = SessionDb::init(dir.path()).unwrap();
    let today = day(2025, 6, 15);

    let mut list = SessionList::new(10);
    let page = list.refresh_at(&db, today).unwrap();
    assert_eq!(page.total, 0);
    assert_eq!(page.range.start, today);
    assert_eq!(page.range.end, today);
    assert_eq!(page.offset, 0);
}
