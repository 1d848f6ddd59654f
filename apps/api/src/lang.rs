use serde::{Deserialize, Serialize};

/// Display language selector carried by extraction, generation and export
/// requests. Controls prompt wording, validation messages and section labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Lang {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh")]
    Zh,
}

impl Lang {
    pub fn is_zh(self) -> bool {
        self == Lang::Zh
    }

    /// Picks the localized variant of a message pair.
    pub fn pick<'a>(self, en: &'a str, zh: &'a str) -> &'a str {
        if self.is_zh() {
            zh
        } else {
            en
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_values() {
        assert_eq!(serde_json::from_str::<Lang>("\"en\"").unwrap(), Lang::En);
        assert_eq!(serde_json::from_str::<Lang>("\"zh\"").unwrap(), Lang::Zh);
    }

    #[test]
    fn defaults_to_english() {
        assert_eq!(Lang::default(), Lang::En);
    }
}
