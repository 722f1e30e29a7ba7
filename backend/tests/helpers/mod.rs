use actix_web::web;
use backend::db::Database;

/// Fresh in-memory database with the schema and seed rows in place.
pub fn test_db() -> web::Data<Database> {
    web::Data::new(Database::open_in_memory().expect("in-memory database"))
}
