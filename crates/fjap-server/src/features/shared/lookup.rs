//! Row types for `(id, name)` dropdown queries
//!
//! Lookup SQL aliases its columns to `id` and `name` so every entity can use
//! the same record structs.

use fjap_common::LookupItem;

#[derive(Debug, sqlx::FromRow)]
pub struct IntLookupRow {
    pub id: i32,
    pub name: String,
}

impl From<IntLookupRow> for LookupItem {
    fn from(row: IntLookupRow) -> Self {
        LookupItem::new(row.id, row.name)
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct TextLookupRow {
    pub id: String,
    pub name: String,
}

impl From<TextLookupRow> for LookupItem {
    fn from(row: TextLookupRow) -> Self {
        LookupItem::new(row.id, row.name)
    }
}
