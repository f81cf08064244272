//! Property-Based Tests — Domain Layer Invariants
//!
//! Uses `proptest` to verify that classification and quote derivation
//! maintain their invariants across random inputs.

use proptest::prelude::*;

use ticker_gate::domain::classifier::VisitorClassifier;
use ticker_gate::domain::quote::PriceQuote;

/// The built-in signature set, restated here as the behavioral contract.
const SIGNATURES: &[&str] = &[
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

// ── Classifier Properties ───────────────────────────────────

proptest! {
    /// Any identity embedding a signature, in any case, classifies as
    /// a crawler no matter what surrounds it.
    #[test]
    fn classify_true_when_signature_embedded(
        prefix in "[ -~]{0,30}",
        suffix in "[ -~]{0,30}",
        sig_idx in 0..SIGNATURES.len(),
        uppercase in any::<bool>(),
    ) {
        let sig = if uppercase {
            SIGNATURES[sig_idx].to_uppercase()
        } else {
            SIGNATURES[sig_idx].to_string()
        };
        let identity = format!("{prefix}{sig}{suffix}");
        prop_assert!(
            VisitorClassifier::new().classify(&identity),
            "expected crawler for {identity:?}"
        );
    }

    /// Identities containing no signature classify as human.
    #[test]
    fn classify_false_without_signatures(
        identity in "[A-Za-z0-9 ()/;.,_-]{0,60}",
    ) {
        let lower = identity.to_lowercase();
        prop_assume!(!SIGNATURES.iter().any(|s| lower.contains(s)));
        prop_assert!(!VisitorClassifier::new().classify(&identity));
    }

    /// Case never changes the verdict (printable-ASCII identities).
    #[test]
    fn classify_is_case_invariant(identity in "[ -~]{0,60}") {
        let classifier = VisitorClassifier::new();
        prop_assert_eq!(
            classifier.classify(&identity),
            classifier.classify(&identity.to_uppercase())
        );
    }

    /// Classification is deterministic: same input, same verdict.
    #[test]
    fn classify_is_deterministic(identity in "[ -~]{0,60}") {
        let classifier = VisitorClassifier::new();
        prop_assert_eq!(
            classifier.classify(&identity),
            classifier.classify(&identity)
        );
    }
}

// ── Quote Derivation Properties ─────────────────────────────

proptest! {
    /// The symbol is always the id uppercased in full, and the id and
    /// price pass through untouched.
    #[test]
    fn symbol_is_fully_uppercased_id(
        id in "[a-z0-9-]{1,16}",
        price in 0.0f64..1e9,
    ) {
        let quote = PriceQuote::from_asset_id(&id, price);
        prop_assert_eq!(&quote.symbol, &id.to_uppercase());
        prop_assert_eq!(&quote.id, &id);
        prop_assert_eq!(quote.price, price);
    }

    /// The name uppercases the first character and leaves the rest of
    /// the id untouched.
    #[test]
    fn name_uppercases_only_first_char(id in "[a-z][a-z0-9-]{0,15}") {
        let quote = PriceQuote::from_asset_id(&id, 1.0);
        prop_assert_eq!(quote.name.len(), id.len());
        prop_assert!(quote.name.starts_with(
            &id[..1].to_uppercase()
        ));
        prop_assert_eq!(&quote.name[1..], &id[1..]);
    }
}
