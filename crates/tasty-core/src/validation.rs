//! Write-time validation rules for the restaurant catalog
//!
//! Every input type is checked before it reaches storage. Rules that need
//! stored state (the representative image rule) take the relevant facts as
//! arguments so storage can evaluate them inside its transaction.

use crate::error::{Result, TastyError};
use std::ops::RangeInclusive;
use tasty_types::{
    ArticleInput, CategoryInput, CuisineTypeInput, OwnedItemCreate, RegionInput,
    RestaurantImageInput, RestaurantInput, RestaurantMenuInput, ReviewImageInput, ReviewInput,
    SocialChannelInput, TagInput, UserCreate,
};

pub const REVIEW_RATING: RangeInclusive<i32> = 1..=5;
/// Restaurant rating holds three digits with two decimals
pub const MAX_RESTAURANT_RATING: f64 = 10.0;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Rejects blank values and values longer than `max` characters
pub fn check_text(field: &str, value: &str, max: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TastyError::validation(format!("{} must not be empty", field)));
    }
    check_max_len(field, value, max)
}

pub fn check_max_len(field: &str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(TastyError::validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

fn check_optional(field: &str, value: &Option<String>, max: usize) -> Result<()> {
    match value {
        Some(v) => check_max_len(field, v, max),
        None => Ok(()),
    }
}

pub fn check_review_rating(rating: i32) -> Result<()> {
    if !REVIEW_RATING.contains(&rating) {
        return Err(TastyError::validation(format!(
            "rating must be between {} and {}",
            REVIEW_RATING.start(),
            REVIEW_RATING.end()
        )));
    }
    Ok(())
}

/// Only one representative image per restaurant.
///
/// `other_representatives` counts representative images of the same
/// restaurant excluding the one being written.
pub fn check_single_representative(
    is_representative: bool,
    other_representatives: i64,
) -> Result<()> {
    if is_representative && other_representatives > 0 {
        return Err(representative_conflict());
    }
    Ok(())
}

pub fn representative_conflict() -> TastyError {
    TastyError::validation("Only one representative image can be set per restaurant")
}

impl Validate for RestaurantInput {
    fn validate(&self) -> Result<()> {
        check_text("name", &self.name, 100)?;
        check_optional("branch_name", &self.branch_name, 100)?;
        check_text("address", &self.address, 255)?;
        check_max_len("feature", &self.feature, 255)?;
        check_optional("phone", &self.phone, 16)?;

        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(TastyError::validation("latitude must be between -90 and 90"));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(TastyError::validation("longitude must be between -180 and 180"));
        }
        if !(0.0..MAX_RESTAURANT_RATING).contains(&self.rating) {
            return Err(TastyError::validation("rating must be between 0 and 9.99"));
        }
        Ok(())
    }
}

impl Validate for RestaurantImageInput {
    fn validate(&self) -> Result<()> {
        check_optional("name", &self.name, 100)?;
        check_text("image", &self.image, 100)
    }
}

impl Validate for RestaurantMenuInput {
    fn validate(&self) -> Result<()> {
        check_text("name", &self.name, 100)?;
        check_optional("image", &self.image, 100)
    }
}

impl Validate for ReviewInput {
    fn validate(&self) -> Result<()> {
        check_text("title", &self.title, 100)?;
        check_text("author", &self.author, 100)?;
        check_optional("profile_image", &self.profile_image, 100)?;
        check_text("content", &self.content, usize::MAX)?;
        check_review_rating(self.rating)
    }
}

impl Validate for ReviewImageInput {
    fn validate(&self) -> Result<()> {
        check_text("name", &self.name, 100)?;
        check_text("image", &self.image, 100)
    }
}

impl Validate for CuisineTypeInput {
    fn validate(&self) -> Result<()> {
        check_text("name", &self.name, 20)
    }
}

impl Validate for CategoryInput {
    fn validate(&self) -> Result<()> {
        check_text("name", &self.name, 20)
    }
}

impl Validate for RegionInput {
    fn validate(&self) -> Result<()> {
        check_text("sido", &self.sido, 20)?;
        check_text("sigungu", &self.sigungu, 20)?;
        check_text("eupmyeondong", &self.eupmyeondong, 20)
    }
}

impl Validate for TagInput {
    fn validate(&self) -> Result<()> {
        check_text("name", &self.name, 100)
    }
}

impl Validate for SocialChannelInput {
    fn validate(&self) -> Result<()> {
        check_text("name", &self.name, 100)
    }
}

impl Validate for ArticleInput {
    fn validate(&self) -> Result<()> {
        check_text("title", &self.title, 100)?;
        check_optional("preview_image", &self.preview_image, 100)
    }
}

impl Validate for UserCreate {
    fn validate(&self) -> Result<()> {
        if !self.email.contains('@') {
            return Err(TastyError::validation("email is not valid"));
        }
        if self.password.is_empty() {
            return Err(TastyError::validation("password must not be empty"));
        }
        Ok(())
    }
}

impl Validate for OwnedItemCreate {
    fn validate(&self) -> Result<()> {
        check_text("title", &self.title, 100)
    }
}
