use uuid::Uuid;

/// Generates a new record identifier.
///
/// UUIDv7 is time-ordered, so ids sort by creation like the millisecond
/// timestamps older collections used, without colliding when two records
/// are created within the same millisecond.
pub fn new_record_id() -> String {
    Uuid::now_v7().to_string()
}
