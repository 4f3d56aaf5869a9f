use diesel::RunQueryDsl;
use diesel::sql_types::Integer;

mod common;

#[test]
fn test_pool_hands_out_working_connections() {
    let test_db = common::TestDb::new("test_pool_connections.db");

    // Two checkouts against the same file-backed database.
    let mut first = test_db.pool().get().unwrap();
    let second = test_db.pool().get();
    assert!(second.is_ok());

    #[derive(diesel::QueryableByName)]
    struct One {
        #[diesel(sql_type = Integer)]
        one: i32,
    }

    let row: One = diesel::sql_query("SELECT 1 AS one")
        .get_result(&mut first)
        .unwrap();
    assert_eq!(row.one, 1);
}
