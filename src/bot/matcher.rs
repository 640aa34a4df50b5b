use serde::{Deserialize, Serialize};

use super::Command;

/// Maps free text that is not a command to a command.
pub trait Matcher: Send + Sync {
    fn resolve(&self, text: &str) -> Option<Command>;
}

/// Built-in keyword set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeywordLanguage {
    #[default]
    #[serde(rename = "ru")]
    Russian,
    #[serde(rename = "en")]
    English,
}

/// Any of `keywords` appearing in a message selects `command`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keywords: Vec<String>,
    pub command: Command,
}

impl KeywordRule {
    pub fn new(keywords: &[&str], command: Command) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            command,
        }
    }

    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

/// Ordered keyword rules; the first rule with a matching keyword wins.
///
/// Keywords are substrings, so stems such as `координат` cover every
/// inflection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordMatcher {
    rules: Vec<KeywordRule>,
}

impl KeywordMatcher {
    pub fn new(rules: Vec<KeywordRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|r| KeywordRule {
                keywords: r.keywords.iter().map(|k| k.to_lowercase()).collect(),
                command: r.command,
            })
            .collect();
        Self { rules }
    }

    pub fn russian() -> Self {
        Self::new(vec![
            KeywordRule::new(&["масса"], Command::AvgMass),
            KeywordRule::new(&["координат", "точк"], Command::AvgCoords),
            KeywordRule::new(&["класс", "тип"], Command::ClassStats),
            KeywordRule::new(&["тяжел", "больш"], Command::HeavyMeteorites),
            KeywordRule::new(&["статистик"], Command::AdditionalStats),
        ])
    }

    pub fn english() -> Self {
        Self::new(vec![
            KeywordRule::new(&["mass", "weight"], Command::AvgMass),
            KeywordRule::new(&["coordinat", "location", "point"], Command::AvgCoords),
            KeywordRule::new(&["class", "type"], Command::ClassStats),
            KeywordRule::new(&["heav", "biggest", "largest"], Command::HeavyMeteorites),
            KeywordRule::new(&["statistic"], Command::AdditionalStats),
        ])
    }

    pub fn for_language(language: KeywordLanguage) -> Self {
        match language {
            KeywordLanguage::Russian => Self::russian(),
            KeywordLanguage::English => Self::english(),
        }
    }

    /// Custom rules when any are configured, the built-in set otherwise.
    pub fn from_config(language: KeywordLanguage, rules: &[KeywordRule]) -> Self {
        if rules.is_empty() {
            Self::for_language(language)
        } else {
            Self::new(rules.to_vec())
        }
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self::russian()
    }
}

impl Matcher for KeywordMatcher {
    fn resolve(&self, text: &str) -> Option<Command> {
        let lowered = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_russian_rules() {
        let m = KeywordMatcher::russian();
        assert_eq!(m.resolve("Какая средняя масса?"), Some(Command::AvgMass));
        assert_eq!(m.resolve("покажи КООРДИНАТЫ"), Some(Command::AvgCoords));
        assert_eq!(m.resolve("средняя точка падения"), Some(Command::AvgCoords));
        assert_eq!(m.resolve("какие классы есть"), Some(Command::ClassStats));
        assert_eq!(m.resolve("самые тяжелые"), Some(Command::HeavyMeteorites));
        assert_eq!(m.resolve("общая статистика"), Some(Command::AdditionalStats));
        assert_eq!(m.resolve("привет"), None);
    }

    #[test]
    fn test_first_rule_wins() {
        // "масса" and "класс" both appear; the mass rule comes first
        let m = KeywordMatcher::russian();
        assert_eq!(m.resolve("масса по классам"), Some(Command::AvgMass));
    }

    #[test]
    fn test_english_rules() {
        let m = KeywordMatcher::english();
        assert_eq!(m.resolve("What is the average MASS?"), Some(Command::AvgMass));
        assert_eq!(m.resolve("heaviest ones"), Some(Command::HeavyMeteorites));
        assert_eq!(m.resolve("hello"), None);
    }

    #[test]
    fn test_custom_rules_replace_builtin() {
        let rules = vec![KeywordRule {
            keywords: vec!["GEWICHT".to_string()],
            command: Command::AvgMass,
        }];
        let m = KeywordMatcher::from_config(KeywordLanguage::Russian, &rules);
        assert_eq!(m.resolve("Gewicht bitte"), Some(Command::AvgMass));
        assert_eq!(m.resolve("масса"), None);
    }

    #[test]
    fn test_from_config_without_rules_uses_language() {
        let m = KeywordMatcher::from_config(KeywordLanguage::English, &[]);
        assert_eq!(m, KeywordMatcher::english());
    }
}
