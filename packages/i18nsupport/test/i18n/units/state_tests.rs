/**
 * Translation State Tests
 *
 * Mapping between the abstract state and the native tokens of each dialect
 */

#[cfg(test)]
mod translation_state_tests {
    use i18nsupport::{DialectKind, I18nError, TranslationState};
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    const DIALECTS: [DialectKind; 3] = [DialectKind::Xliff, DialectKind::Xliff2, DialectKind::Xmb];

    mod native_tokens {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_round_trip_every_state_through_its_token() {
            for dialect in [DialectKind::Xliff, DialectKind::Xliff2] {
                for state in TranslationState::ALL {
                    let token = state.to_native(dialect).unwrap();
                    assert_eq!(TranslationState::from_native(Some(token), dialect), state);
                }
            }
        }

        #[test]
        fn should_write_distinct_tokens_per_state() {
            for dialect in [DialectKind::Xliff, DialectKind::Xliff2] {
                let tokens: HashSet<&str> = TranslationState::ALL
                    .iter()
                    .filter_map(|state| state.to_native(dialect))
                    .collect();
                assert_eq!(tokens.len(), TranslationState::ALL.len());
            }
        }

        #[test]
        fn should_write_no_token_for_xmb() {
            for state in TranslationState::ALL {
                assert_eq!(state.to_native(DialectKind::Xmb), None);
            }
        }

        #[test]
        fn should_use_initial_for_new_xliff2_segments() {
            assert_eq!(TranslationState::New.to_native(DialectKind::Xliff), Some("new"));
            assert_eq!(TranslationState::New.to_native(DialectKind::Xliff2), Some("initial"));
        }
    }

    mod lenient_reading {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_read_unknown_and_missing_tokens_as_new() {
            for dialect in DIALECTS {
                assert_eq!(TranslationState::from_native(None, dialect), TranslationState::New);
                assert_eq!(
                    TranslationState::from_native(Some("bogus"), dialect),
                    TranslationState::New
                );
            }
        }

        #[test]
        fn should_fold_xliff_review_states() {
            assert_eq!(
                TranslationState::from_native(Some("needs-review-translation"), DialectKind::Xliff),
                TranslationState::Translated
            );
            assert_eq!(
                TranslationState::from_native(Some("signed-off"), DialectKind::Xliff),
                TranslationState::Final
            );
            assert_eq!(
                TranslationState::from_native(Some("needs-translation"), DialectKind::Xliff),
                TranslationState::New
            );
            assert_eq!(
                TranslationState::from_native(Some("reviewed"), DialectKind::Xliff2),
                TranslationState::Translated
            );
        }
    }

    mod parsing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_parse_abstract_names() {
            for state in TranslationState::ALL {
                assert_eq!(state.to_string().parse::<TranslationState>().unwrap(), state);
            }
        }

        #[test]
        fn should_reject_unknown_names() {
            let err = "initial".parse::<TranslationState>().unwrap_err();
            assert!(matches!(err, I18nError::InvalidState(ref s) if s == "initial"));
        }

        #[test]
        fn should_serialize_lowercase() {
            assert_eq!(
                serde_json::to_string(&TranslationState::Translated).unwrap(),
                "\"translated\""
            );
        }
    }
}
