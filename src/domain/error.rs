use thiserror::Error;

/// Failures surfaced by feed aggregation and the derived views.
///
/// `Display` renders the public message each condition is contracted to
/// carry; diagnostic context lives in the named fields and is never shown to
/// clients.
#[derive(Debug, Clone, Error)]
pub enum FeedError {
    #[error("Unsupported language")]
    UnsupportedLanguage { language: String },
    #[error("No data available")]
    NoDataAvailable { language: String },
    #[error("{message}")]
    Upstream { language: String, message: String },
    #[error("Event parameter is required")]
    EventParameterRequired,
    #[error("No events found")]
    NoEventsFound,
    #[error("Unknown sport(s): {}", .tokens.join(", "))]
    UnknownSports { tokens: Vec<String> },
}

impl FeedError {
    pub fn unsupported_language(language: impl Into<String>) -> Self {
        Self::UnsupportedLanguage {
            language: language.into(),
        }
    }

    pub fn no_data(language: impl Into<String>) -> Self {
        Self::NoDataAvailable {
            language: language.into(),
        }
    }

    pub fn upstream(language: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            language: language.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_messages_match_the_surface_contract() {
        assert_eq!(
            FeedError::unsupported_language("fr-fr").to_string(),
            "Unsupported language"
        );
        assert_eq!(
            FeedError::no_data("en-gb").to_string(),
            "No data available"
        );
        assert_eq!(
            FeedError::upstream("de-de", "Network error").to_string(),
            "Network error"
        );
        assert_eq!(
            FeedError::EventParameterRequired.to_string(),
            "Event parameter is required"
        );
        assert_eq!(FeedError::NoEventsFound.to_string(), "No events found");
    }

    #[test]
    fn unknown_sports_lists_tokens_joined_by_comma() {
        let error = FeedError::UnknownSports {
            tokens: vec!["999".to_string(), "curling".to_string()],
        };
        assert_eq!(error.to_string(), "Unknown sport(s): 999, curling");
    }
}
