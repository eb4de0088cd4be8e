use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Recommendation, RecommendationSource};
use crate::utils::validation::validate_not_empty;

#[derive(Debug, Deserialize, Validate)]
pub struct RecommendationRequest {
    #[validate(length(max = 2000), custom = "validate_not_empty")]
    pub requirements: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<Recommendation>,
    pub source: RecommendationSource,
}
