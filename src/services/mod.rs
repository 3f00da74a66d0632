pub mod providers;
pub mod recommendations;
pub mod search;

pub use providers::{HttpRecommendationClient, RecommendationService};
pub use recommendations::{RecommendationController, RecommendationSession};
pub use search::{SearchController, SearchEffect, SearchSession};
