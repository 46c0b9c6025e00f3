use uuid::Uuid;

/// Source of unique task identifiers
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}
