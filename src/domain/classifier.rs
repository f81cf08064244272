//! Visitor classification.
//!
//! Decides whether a visitor's self-reported identity string belongs to
//! an automated crawler. The heuristic is an unanchored, case-insensitive
//! substring match against a fixed signature set. Pure domain logic:
//! total over any input, deterministic, no I/O.

/// Crawler signature substrings, matched against the lowercased identity.
///
/// Generic tokens first, then named search-engine and preview bots.
const CRAWLER_SIGNATURES: &[&str] = &[
    "bot",
    "spider",
    "crawler",
    "googlebot",
    "bingbot",
    "slurp",
    "duckduckbot",
    "baiduspider",
    "yandexbot",
    "sogou",
    "exabot",
    "facebookexternalhit",
    "ia_archiver",
];

/// Classifies visitors as crawler or human from their identity string.
///
/// Construct once at startup; the signature set is immutable afterwards.
#[derive(Debug, Clone)]
pub struct VisitorClassifier {
    /// Lowercased signatures, built-in set plus any configured extras.
    signatures: Vec<String>,
}

impl VisitorClassifier {
    /// Create a classifier with the built-in signature set.
    pub fn new() -> Self {
        Self::with_extra_signatures(&[])
    }

    /// Create a classifier with extra signatures appended to the built-in
    /// set. Extras are lowercased so matching stays case-insensitive.
    pub fn with_extra_signatures(extra: &[String]) -> Self {
        let mut signatures: Vec<String> =
            CRAWLER_SIGNATURES.iter().map(|s| (*s).to_string()).collect();
        signatures.extend(extra.iter().map(|s| s.to_lowercase()));
        Self { signatures }
    }

    /// Classify an identity string.
    ///
    /// Returns true iff the lowercased identity contains at least one
    /// signature as a substring. Any input yields an answer, including
    /// the empty string (always false: signatures are non-empty).
    pub fn classify(&self, identity: &str) -> bool {
        let identity = identity.to_lowercase();
        self.signatures.iter().any(|sig| identity.contains(sig.as_str()))
    }

    /// Number of active signatures (built-in + extras).
    pub fn signature_count(&self) -> usize {
        self.signatures.len()
    }
}

impl Default for VisitorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_googlebot_is_crawler() {
        let classifier = VisitorClassifier::new();
        assert!(classifier.classify("Mozilla/5.0 (compatible; Googlebot/2.1)"));
    }

    #[test]
    fn test_desktop_browser_is_not_crawler() {
        let classifier = VisitorClassifier::new();
        assert!(!classifier.classify(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
        ));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let classifier = VisitorClassifier::new();
        assert!(classifier.classify("GOOGLEBOT"));
        assert!(classifier.classify("BaiduSpider/1.0"));
    }

    #[test]
    fn test_generic_bot_token_matches_anywhere() {
        let classifier = VisitorClassifier::new();
        assert!(classifier.classify("some-unknown-BOT/9.9"));
        assert!(classifier.classify("ia_archiver (alexa)"));
    }

    #[test]
    fn test_empty_identity_is_not_crawler() {
        let classifier = VisitorClassifier::new();
        assert!(!classifier.classify(""));
    }

    #[test]
    fn test_extra_signatures_extend_builtin_set() {
        let extra = vec!["HeadlessChrome".to_string()];
        let classifier = VisitorClassifier::with_extra_signatures(&extra);
        assert!(classifier.classify("Mozilla/5.0 headlesschrome/120.0"));
        // Built-in set still applies.
        assert!(classifier.classify("bingbot/2.0"));
        assert_eq!(classifier.signature_count(), CRAWLER_SIGNATURES.len() + 1);
    }
}
