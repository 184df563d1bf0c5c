use super::progress::{ProgressRecord, WatchThresholds};

/// Outcome of looking up saved progress before launching playback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResumeDecision {
    Restart,
    Resume { at_seconds: f64, percent: f64 },
}

impl ResumeDecision {
    pub fn should_prompt(&self) -> bool {
        matches!(self, ResumeDecision::Resume { .. })
    }

    /// Playback offset to use when the user accepts the prompt.
    pub fn offset_seconds(&self) -> f64 {
        match self {
            ResumeDecision::Restart => 0.0,
            ResumeDecision::Resume { at_seconds, .. } => *at_seconds,
        }
    }

    /// "Continue watching from 12:05 (50%)?"
    pub fn prompt_text(&self) -> Option<String> {
        match self {
            ResumeDecision::Restart => None,
            ResumeDecision::Resume { at_seconds, percent } => Some(format!(
                "Continue watching from {} ({}%)?",
                format_time(*at_seconds),
                percent.round() as u32
            )),
        }
    }
}

/// Pure decision over an optional stored record.
pub fn decide_resume(record: Option<&ProgressRecord>, thresholds: &WatchThresholds) -> ResumeDecision {
    let Some(record) = record else {
        return ResumeDecision::Restart;
    };

    if record.duration <= thresholds.resume_min_duration {
        return ResumeDecision::Restart;
    }
    if !thresholds.is_in_progress(record.progress) {
        return ResumeDecision::Restart;
    }

    ResumeDecision::Resume {
        at_seconds: record.current_time,
        percent: record.progress,
    }
}

/// `m:ss`, or `h:mm:ss` past the hour. Negative/NaN renders as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::ContentRef;
    use chrono::Utc;

    fn record_at(percent: f64) -> ProgressRecord {
        ProgressRecord::new(ContentRef::movie(42u64), percent * 10.0, 1000.0, Utc::now())
    }

    #[test]
    fn test_no_record_means_restart() {
        assert_eq!(decide_resume(None, &WatchThresholds::default()), ResumeDecision::Restart);
    }

    #[test]
    fn test_threshold_examples() {
        let thresholds = WatchThresholds::default();
        assert_eq!(decide_resume(Some(&record_at(0.5)), &thresholds), ResumeDecision::Restart);
        assert_eq!(
            decide_resume(Some(&record_at(50.0)), &thresholds),
            ResumeDecision::Resume {
                at_seconds: 500.0,
                percent: 50.0
            }
        );
        assert_eq!(decide_resume(Some(&record_at(97.0)), &thresholds), ResumeDecision::Restart);
    }

    #[test]
    fn test_boundaries_are_exclusive() {
        let thresholds = WatchThresholds::default();
        assert_eq!(decide_resume(Some(&record_at(1.0)), &thresholds), ResumeDecision::Restart);
        assert_eq!(decide_resume(Some(&record_at(95.0)), &thresholds), ResumeDecision::Restart);
    }

    #[test]
    fn test_short_media_never_resumes() {
        let record = ProgressRecord::new(ContentRef::movie(1u64), 5.0, 10.0, Utc::now());
        assert_eq!(
            decide_resume(Some(&record), &WatchThresholds::default()),
            ResumeDecision::Restart
        );
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(-4.0), "0:00");
        assert_eq!(format_time(65.9), "1:05");
        assert_eq!(format_time(725.0), "12:05");
        assert_eq!(format_time(3725.0), "1:02:05");
    }

    #[test]
    fn test_prompt_text_rounds_percent() {
        let decision = ResumeDecision::Resume {
            at_seconds: 725.0,
            percent: 49.6,
        };
        assert_eq!(
            decision.prompt_text().as_deref(),
            Some("Continue watching from 12:05 (50%)?")
        );
        assert_eq!(ResumeDecision::Restart.prompt_text(), None);
    }
}
