use thiserror::Error;

use crate::constants::Value;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BagError {
    #[error("bag is full: cannot insert {value} (capacity {capacity})")]
    CapacityExceeded { value: Value, capacity: usize },

    #[error("invalid bag text: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let e = BagError::CapacityExceeded {
            value: 8,
            capacity: 20,
        };
        assert_eq!(e.to_string(), "bag is full: cannot insert 8 (capacity 20)");

        let e = BagError::Parse("missing '{'".to_owned());
        assert_eq!(e.to_string(), "invalid bag text: missing '{'");
    }
}
