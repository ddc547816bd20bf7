//! Value generation strategies.

/// Produces the next value to emit. No side effects assumed.
pub trait ValueGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Production default: a random UUID v4 string.
pub struct UuidGenerator;

impl ValueGenerator for UuidGenerator {
    fn generate(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Emits a fixed string. Used by tests and single-value deployments.
pub struct FixedGenerator {
    value: String,
}

impl FixedGenerator {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl ValueGenerator for FixedGenerator {
    fn generate(&self) -> String {
        self.value.clone()
    }
}
