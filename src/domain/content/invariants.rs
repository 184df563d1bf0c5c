use super::entity::{ContentRef, MediaType};
use crate::domain::{DomainError, DomainResult};

/// Validates all ContentRef invariants
pub fn validate_content_ref(content: &ContentRef) -> DomainResult<()> {
    if content.id().is_blank() {
        return Err(DomainError::InvariantViolation(
            "content id must not be blank".to_string(),
        ));
    }

    match content.media_type() {
        MediaType::Movie if content.season().is_some() || content.episode().is_some() => {
            Err(DomainError::InvariantViolation(format!(
                "movie {} must not carry season/episode",
                content.id()
            )))
        }
        MediaType::Series if content.season().is_none() || content.episode().is_none() => {
            Err(DomainError::InvariantViolation(format!(
                "series {} must carry season and episode",
                content.id()
            )))
        }
        _ => Ok(()),
    }
}

// ContentRef invariants:
//
// 1. id is never blank once content reaches storage
// 2. movies never carry season/episode
// 3. series always carry both (defaulted to 1 at construction)
// 4. equal keys mean the same watchable unit

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_refs() {
        assert!(validate_content_ref(&ContentRef::movie(1u64)).is_ok());
        assert!(validate_content_ref(&ContentRef::series(1u64, None, None)).is_ok());
    }

    #[test]
    fn test_blank_id_fails() {
        assert!(validate_content_ref(&ContentRef::movie("  ")).is_err());
    }
}
