use serde::{Deserialize, Serialize};

/// Identifier of a movie in the recommendation service's catalogue
pub type MovieId = i64;

/// A search hit, as returned by `/search`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub rating: Option<f64>,
}

/// A ranked recommendation, as returned by `/recommend`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecommendation {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub rating: Option<f64>,
    /// Cosine similarity to the selected movie, in `[0, 1]`
    #[serde(default)]
    pub similarity_score: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
}

impl MovieSummary {
    pub fn new(id: MovieId, title: impl Into<String>, rating: Option<f64>) -> Self {
        Self {
            id,
            title: title.into(),
            rating,
        }
    }

    /// Rating label such as `⭐8.8`
    pub fn rating_label(&self) -> Option<String> {
        self.rating.map(format_rating)
    }
}

impl MovieRecommendation {
    pub fn rating_label(&self) -> Option<String> {
        self.rating.map(format_rating)
    }

    /// Similarity as a whole percentage, rounded to nearest
    pub fn match_percent(&self) -> Option<u32> {
        self.similarity_score
            .map(|score| (score.clamp(0.0, 1.0) * 100.0).round() as u32)
    }

    /// Label such as `Match: 92%`
    pub fn match_label(&self) -> Option<String> {
        self.match_percent().map(|pct| format!("Match: {}%", pct))
    }

    /// Label such as `12,345 votes`
    pub fn votes_label(&self) -> Option<String> {
        self.vote_count
            .map(|count| format!("{} votes", group_thousands(count)))
    }
}

fn format_rating(rating: f64) -> String {
    format!("⭐{:.1}", rating)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
