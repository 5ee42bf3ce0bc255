use thiserror::Error;

/// Errors originating from the core viewport model.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid screen dimensions: {width}x{height} (both must be > 0)")]
    InvalidDimensions { width: u32, height: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_message_names_both_sides() {
        let err = CoreError::InvalidDimensions {
            width: 0,
            height: 600,
        };
        assert_eq!(err.to_string(), "invalid screen dimensions: 0x600 (both must be > 0)");
    }
}
