pub(crate) const TABLE: &str = "request_items";

pub(crate) const CREATE_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS request_items (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    path     TEXT NOT NULL,
    raw_data TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_request_items_path ON request_items (path);
";

pub(crate) const INSERT_RECORD: &str = "INSERT INTO request_items (path, raw_data) VALUES (?1, ?2)";

pub(crate) const SELECT_BY_PATH: &str =
    "SELECT id, path, raw_data FROM request_items WHERE path = ?1 ORDER BY id";
