//! Specification pattern for in-memory predicate checks
//!
//! Search predicates are normally rendered to SQL, but the same rule can be
//! evaluated against an entity directly, which is what tests and callers
//! holding already-loaded rows use.

/// Core specification trait for filter rules
pub trait Specification<T>: Send + Sync {
    /// Check if the entity satisfies this specification
    fn is_satisfied_by(&self, entity: &T) -> bool;

    /// Keep the entities that satisfy this specification
    fn filter(&self, entities: Vec<T>) -> Vec<T> {
        entities
            .into_iter()
            .filter(|e| self.is_satisfied_by(e))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EvenSpec;

    impl Specification<i64> for EvenSpec {
        fn is_satisfied_by(&self, entity: &i64) -> bool {
            entity % 2 == 0
        }
    }

    #[test]
    fn test_filter_keeps_satisfying_entities() {
        assert_eq!(EvenSpec.filter(vec![1, 2, 3, 4]), vec![2, 4]);
        assert!(EvenSpec.filter(Vec::new()).is_empty());
    }
}
