use std::sync::atomic::{AtomicU32, Ordering};

/// Generates unique name prefixes for test isolation.
///
/// Each test gets a prefix of the form `test_{process_id}_{test_counter}_`,
/// applied to index names and document keys, so tests running in parallel
/// against one server never see each other's data.
#[derive(Debug, Clone)]
#[allow(dead_code)] // Only used when a server backend is enabled
pub struct TestIsolation {
    process_id: u32,
    test_counter: u32,
}

#[allow(dead_code)]
static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

#[allow(dead_code)]
impl TestIsolation {
    pub fn new() -> Self {
        Self {
            process_id: std::process::id(),
            test_counter: TEST_COUNTER.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn prefix(&self) -> String {
        format!("test_{}_{}_", self.process_id, self.test_counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_unique_prefixes() {
        let a = TestIsolation::new();
        let b = TestIsolation::new();

        assert_ne!(a.prefix(), b.prefix());
        assert!(a.prefix().starts_with("test_"));
    }
}
