use ais_crypto::utilities::generate_alphanumeric;
use uuid::Uuid;

/// Source of correlation ids and authorization nonces
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait RandomProvider: Send + Sync {
    fn correlation_id(&self) -> String;

    fn alphanumeric(&self, length: usize) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultRandomProvider;

impl RandomProvider for DefaultRandomProvider {
    fn correlation_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    fn alphanumeric(&self, length: usize) -> String {
        generate_alphanumeric(length)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_correlation_ids_are_unique_uuids() {
        let provider = DefaultRandomProvider;

        let first = provider.correlation_id();
        let second = provider.correlation_id();

        assert!(Uuid::parse_str(&first).is_ok());
        assert_ne!(first, second);
    }
}
