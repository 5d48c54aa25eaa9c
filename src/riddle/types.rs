/// A true/false question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Riddle {
    pub question: String,
    pub answer: bool,
}

impl Riddle {
    pub fn new(question: impl Into<String>, answer: bool) -> Self {
        Self {
            question: question.into(),
            answer,
        }
    }

    /// Scores a typed answer. Case and surrounding whitespace are ignored;
    /// anything that is not the correct word counts as wrong.
    pub fn is_correct(&self, typed: &str) -> bool {
        let expected = if self.answer { "true" } else { "false" };
        typed.trim().to_lowercase() == expected
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Transport failure or timeout.
    #[error("riddle provider unavailable: {0}")]
    Unavailable(String),
    /// The provider answered with something that is not a riddle.
    #[error("malformed riddle response: {0}")]
    Malformed(String),
}

/// Supplies riddles to the event engine.
#[cfg_attr(test, mockall::automock)]
pub trait RiddleProvider {
    fn fetch(&mut self) -> Result<Riddle, ProviderError>;
}

/// Decodes the HTML entities the trivia service embeds in its text.
pub fn decode_entities(text: &str) -> String {
    const ENTITIES: [(&str, &str); 12] = [
        ("&quot;", "\""),
        ("&#039;", "'"),
        ("&apos;", "'"),
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&eacute;", "é"),
        ("&Eacute;", "É"),
        ("&ouml;", "ö"),
        ("&uuml;", "ü"),
        ("&ldquo;", "\u{201c}"),
        ("&rdquo;", "\u{201d}"),
        ("&hellip;", "\u{2026}"),
    ];

    let mut decoded = text.to_string();
    for (entity, replacement) in ENTITIES {
        decoded = decoded.replace(entity, replacement);
    }
    // Last so "&amp;quot;" stays literal "&quot;"
    decoded.replace("&amp;", "&")
}
