//! Weekly coaching tips.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

token_enum! {
    pub enum TipCategory("tip category") {
        LearningStrategy => "learning_strategy",
        TimeManagement => "time_management",
        Portfolio => "portfolio",
        Networking => "networking",
    }
}

impl TipCategory {
    /// "learning_strategy" -> "Learning Strategy"
    pub fn title(&self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

token_enum! {
    /// Where a tip's text came from.
    pub enum TipSource("tip source") {
        Template => "template",
        External => "openai",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTip {
    pub tip_id: String,
    pub week: u32,
    pub category: TipCategory,
    pub title: String,
    pub content: String,
    pub source: TipSource,
    pub created_at: DateTime<Utc>,
}
