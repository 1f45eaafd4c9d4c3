/// 입찰 검증 순서 (첫 번째 실패에서 중단)
/// 0. 작업 가격 범위 존재 여부
/// 1. 가격 범위
/// 2. 마감일
/// 3. 본인 작업 입찰 여부
// region:    --- Imports
use super::model::{BidFieldErrors, BidForm};
use crate::job::model::Job;
use crate::session::SessionUser;
use thiserror::Error;

// endregion: --- Imports

// region:    --- Bid Rejection
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BidRejection {
    #[error("Job details are not available yet")]
    JobUnavailable,

    #[error("Please enter a valid price")]
    InvalidPrice,

    #[error("Price should be between ${min} and ${max}")]
    PriceOutOfRange { min: f64, max: f64 },

    #[error("Deadline should be before the job deadline")]
    DeadlineAfterJob,

    #[error("You cannot place a bid on your own job.")]
    OwnJob,
}

impl BidRejection {
    /// 인라인 필드 오류 갱신 (통과한 단계의 오류는 지움)
    pub fn apply_to(&self, errors: &mut BidFieldErrors) {
        match self {
            BidRejection::JobUnavailable => {}
            BidRejection::InvalidPrice | BidRejection::PriceOutOfRange { .. } => {
                errors.price = Some(self.to_string());
            }
            BidRejection::DeadlineAfterJob => {
                errors.price = None;
                errors.deadline = Some(self.to_string());
            }
            BidRejection::OwnJob => {
                errors.price = None;
                errors.deadline = None;
            }
        }
    }

    /// 필드가 아닌 모달 알림으로 표시되는 거절
    pub fn is_blocking(&self) -> bool {
        matches!(self, BidRejection::JobUnavailable | BidRejection::OwnJob)
    }
}

// endregion: --- Bid Rejection

// region:    --- Validation
/// 검증 통과 시 파싱된 가격 반환
pub fn validate_bid(job: &Job, form: &BidForm, session: &SessionUser) -> Result<f64, BidRejection> {
    let (min, max) = job.price_bounds().ok_or(BidRejection::JobUnavailable)?;
    let price = parse_price(&form.price)?;

    if price > max || price < min {
        return Err(BidRejection::PriceOutOfRange { min, max });
    }

    if form.deadline > job.deadline {
        return Err(BidRejection::DeadlineAfterJob);
    }

    if session.is(&job.buyer.email) {
        return Err(BidRejection::OwnJob);
    }

    Ok(price)
}

fn parse_price(input: &str) -> Result<f64, BidRejection> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .ok_or(BidRejection::InvalidPrice)
}

// endregion: --- Validation

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::model::{Buyer, Category};
    use chrono::{Duration, TimeZone, Utc};

    fn job() -> Job {
        Job {
            id: "j1".into(),
            title: "Landing page".into(),
            email: "a@x.com".into(),
            category: Category::WebDevelopment,
            min_price: Some(50.0),
            max_price: Some(200.0),
            description: String::new(),
            deadline: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
            total_bids: 0,
            buyer: Buyer {
                name: None,
                email: "a@x.com".into(),
                image: None,
            },
        }
    }

    fn form(price: &str, deadline_offset_days: i64) -> BidForm {
        BidForm {
            price: price.into(),
            comment: String::new(),
            deadline: job().deadline + Duration::days(deadline_offset_days),
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        let bidder = SessionUser::new("b@x.com");
        assert_eq!(validate_bid(&job(), &form("50", 0), &bidder), Ok(50.0));
        assert_eq!(validate_bid(&job(), &form("200", -1), &bidder), Ok(200.0));
    }

    #[test]
    fn price_message_interpolates_bounds() {
        let bidder = SessionUser::new("b@x.com");
        let err = validate_bid(&job(), &form("300", 0), &bidder).unwrap_err();
        assert_eq!(err.to_string(), "Price should be between $50 and $200");

        let err = validate_bid(&job(), &form("49.99", 0), &bidder).unwrap_err();
        assert_eq!(err.to_string(), "Price should be between $50 and $200");
    }

    #[test]
    fn price_is_checked_before_deadline_and_owner() {
        let owner = SessionUser::new("a@x.com");
        let err = validate_bid(&job(), &form("300", 4), &owner).unwrap_err();
        assert!(matches!(err, BidRejection::PriceOutOfRange { .. }));

        let err = validate_bid(&job(), &form("100", 4), &owner).unwrap_err();
        assert_eq!(err, BidRejection::DeadlineAfterJob);
    }

    #[test]
    fn own_job_is_rejected_case_insensitively() {
        let owner = SessionUser::new("A@X.com");
        let err = validate_bid(&job(), &form("100", 0), &owner).unwrap_err();
        assert_eq!(err, BidRejection::OwnJob);
        assert!(err.is_blocking());
    }

    #[test]
    fn unparsable_price_is_rejected() {
        let bidder = SessionUser::new("b@x.com");
        for input in ["", "abc", "NaN", "inf"] {
            let err = validate_bid(&job(), &form(input, 0), &bidder).unwrap_err();
            assert_eq!(err, BidRejection::InvalidPrice, "input {input:?}");
        }
    }

    #[test]
    fn passing_steps_clear_their_field_errors() {
        let mut errors = BidFieldErrors {
            price: Some("old".into()),
            deadline: Some("old".into()),
        };
        BidRejection::DeadlineAfterJob.apply_to(&mut errors);
        assert_eq!(errors.price, None);
        assert_eq!(
            errors.deadline.as_deref(),
            Some("Deadline should be before the job deadline")
        );

        BidRejection::OwnJob.apply_to(&mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn job_without_price_bounds_cannot_be_bid_on() {
        let mut job = job();
        job.min_price = None;
        let err = validate_bid(&job, &form("1000000", 0), &SessionUser::new("b@x.com")).unwrap_err();
        assert_eq!(err, BidRejection::JobUnavailable);
        assert!(err.is_blocking());
    }
}
