use crate::shared::errors::AppError;

// Wide bounds on purpose: the log contains silent-era shorts and
// entries added ahead of release.
const MIN_YEAR: i32 = 1888;
const MAX_YEAR: i32 = 2100;

pub struct Validator;

impl Validator {
    pub fn validate_title(title: &str) -> Result<(), AppError> {
        if title.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Title cannot be empty".to_string(),
            ));
        }
        if title.len() > 255 {
            return Err(AppError::ValidationError(
                "Title too long (max 255 characters)".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_rating(rating: f64) -> Result<(), AppError> {
        if !(0.0..=10.0).contains(&rating) {
            return Err(AppError::ValidationError(
                "Rating must be between 0 and 10".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_year(year: i32) -> Result<(), AppError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(AppError::ValidationError(format!(
                "Year must be between {} and {}",
                MIN_YEAR, MAX_YEAR
            )));
        }
        Ok(())
    }

    pub fn validate_duration(minutes: i32) -> Result<(), AppError> {
        if minutes <= 0 {
            return Err(AppError::ValidationError(
                "Duration must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
