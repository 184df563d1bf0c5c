use super::entity::ProgressRecord;
use crate::domain::content::validate_content_ref;
use crate::domain::{DomainError, DomainResult};

/// Validates a record read back from storage.
///
/// Storage is user-writable, so anything loaded is checked before it drives
/// a resume prompt.
pub fn validate_progress_record(record: &ProgressRecord) -> DomainResult<()> {
    validate_content_ref(&record.content)?;

    if !record.current_time.is_finite() || record.current_time < 0.0 {
        return Err(DomainError::InvariantViolation(format!(
            "current time {} is not a non-negative number",
            record.current_time
        )));
    }
    if !record.duration.is_finite() || record.duration < 0.0 {
        return Err(DomainError::InvariantViolation(format!(
            "duration {} is not a non-negative number",
            record.duration
        )));
    }
    if !(0.0..=100.0).contains(&record.progress) {
        return Err(DomainError::ProgressOutOfRange(record.progress));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::ContentRef;
    use chrono::Utc;

    #[test]
    fn test_fresh_record_is_valid() {
        let record = ProgressRecord::new(ContentRef::movie(5u64), 60.0, 600.0, Utc::now());
        assert!(validate_progress_record(&record).is_ok());
    }

    #[test]
    fn test_tampered_percent_fails() {
        let mut record = ProgressRecord::new(ContentRef::movie(5u64), 60.0, 600.0, Utc::now());
        record.progress = 140.0;
        assert!(matches!(
            validate_progress_record(&record),
            Err(DomainError::ProgressOutOfRange(_))
        ));
    }

    #[test]
    fn test_negative_duration_fails() {
        let mut record = ProgressRecord::new(ContentRef::movie(5u64), 60.0, 600.0, Utc::now());
        record.duration = -1.0;
        assert!(validate_progress_record(&record).is_err());
    }
}
