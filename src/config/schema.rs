use serde::{Deserialize, Serialize};

pub const DEFAULT_GRADING_DELAY_MS: u64 = 850;
pub const DEFAULT_PROFILE_URL: &str = "https://quizdeck.example/profile?score={score}&unit={unit}";
pub const DEFAULT_GRADEBOOK_URL: &str =
    "https://quizdeck.example/gradebook?score={score}&unit={unit}";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// URL template for the profile view; {score} and {unit} are filled in
    #[serde(default)]
    pub profile_url: Option<String>,
    /// URL template for the gradebook view
    #[serde(default)]
    pub gradebook_url: Option<String>,
    /// Artificial delay before results appear, for perceived-loading effect
    #[serde(default)]
    pub grading_delay_ms: Option<u64>,
}

impl Config {
    pub fn profile_url(&self) -> &str {
        self.profile_url.as_deref().unwrap_or(DEFAULT_PROFILE_URL)
    }

    pub fn gradebook_url(&self) -> &str {
        self.gradebook_url
            .as_deref()
            .unwrap_or(DEFAULT_GRADEBOOK_URL)
    }

    pub fn grading_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.grading_delay_ms.unwrap_or(DEFAULT_GRADING_DELAY_MS))
    }
}
