/// One entry of a reorder request as received, before presence checks.
#[derive(Debug, Clone, Default)]
pub struct ReorderItemDto {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub sort_order: Option<i32>,
}
