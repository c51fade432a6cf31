use followup_model::{FollowupStatus, Timeline};

/// Months of follow-up for a complete record (five years).
pub const COMPLETE_MONTHS: u32 = 60;
/// Months of follow-up for an adequate record (one year).
pub const ADEQUATE_MONTHS: u32 = 12;

/// Completeness label for a timeline.
///
/// A lost-to-follow-up flag on any time point outranks the month thresholds.
pub fn classify_status(timeline: &Timeline) -> FollowupStatus {
    if !timeline.has_observations() {
        return FollowupStatus::NoData;
    }
    if timeline.any_lost_to_followup() {
        return FollowupStatus::LostToFollowup;
    }
    match timeline.latest_followup.map(|latest| latest.month_offset) {
        Some(months) if months >= COMPLETE_MONTHS => FollowupStatus::Complete,
        Some(months) if months >= ADEQUATE_MONTHS => FollowupStatus::Adequate,
        Some(_) => FollowupStatus::Incomplete,
        None => FollowupStatus::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use followup_model::{Demographics, LatestFollowup, TimePointObservation};

    fn timeline(latest_month: Option<u32>, lost: bool) -> Timeline {
        let enrollment_date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        Timeline {
            subject_id: "1001".to_string(),
            demographics: Demographics::default(),
            enrollment_date,
            observations: vec![
                TimePointObservation::new("m1", 1).with_lost_to_followup(lost),
            ],
            latest_followup: latest_month.map(|month_offset| LatestFollowup {
                date: enrollment_date,
                month_offset,
                days_since_enrollment: 0,
            }),
        }
    }

    #[test]
    fn thresholds() {
        assert_eq!(classify_status(&timeline(Some(60), false)), FollowupStatus::Complete);
        assert_eq!(classify_status(&timeline(Some(59), false)), FollowupStatus::Adequate);
        assert_eq!(classify_status(&timeline(Some(12), false)), FollowupStatus::Adequate);
        assert_eq!(classify_status(&timeline(Some(3), false)), FollowupStatus::Incomplete);
        assert_eq!(classify_status(&timeline(None, false)), FollowupStatus::Unknown);
    }

    #[test]
    fn lost_flag_takes_priority() {
        assert_eq!(
            classify_status(&timeline(Some(120), true)),
            FollowupStatus::LostToFollowup
        );
    }

    #[test]
    fn no_time_points() {
        let mut empty = timeline(None, false);
        empty.observations.clear();
        assert_eq!(classify_status(&empty), FollowupStatus::NoData);
    }
}
