use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub owner_id: Uuid,
    pub name: String,
    pub sort_order: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// A single `sort_order` assignment inside a reorder batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagOrder {
    pub id: i64,
    pub sort_order: i32,
}
