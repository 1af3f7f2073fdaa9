/**
 * Normalized Message Tests
 *
 * Display grammar, round trips through every dialect and marker numbering
 */

#[path = "../util/mod.rs"]
mod utils;

#[cfg(test)]
mod normalized_message_tests {
    use super::utils::*;
    use i18nsupport::xml::parse_fragment;
    use i18nsupport::{DialectKind, NormalizedMessage, Part, XmlDocument};
    use pretty_assertions::assert_eq;

    const DIALECTS: [DialectKind; 3] = [DialectKind::Xliff, DialectKind::Xliff2, DialectKind::Xmb];

    mod display_grammar {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_parse_all_part_kinds() {
            let message = display("Hi {{0}}, <b>see</b><br><ICU-Message-Ref_0/>");
            assert_eq!(
                message.parts(),
                &[
                    Part::Text("Hi ".to_string()),
                    Part::Placeholder(0),
                    Part::Text(", ".to_string()),
                    Part::TagStart("b".to_string()),
                    Part::Text("see".to_string()),
                    Part::TagEnd("b".to_string()),
                    Part::TagEmpty("br".to_string()),
                    Part::IcuRef(0),
                ]
            );
        }

        #[test]
        fn should_render_display_string_verbatim() {
            let s = "a <strange>b {{0}}</strange> c";
            assert_eq!(display(s).display_string(), s);
            assert_eq!(display(s).to_string(), s);
        }

        #[test]
        fn should_treat_unmatched_braces_and_angles_as_text() {
            let message = display("1 < 2 and {x}");
            assert_eq!(message.parts(), &[Part::Text("1 < 2 and {x}".to_string())]);
        }

        #[test]
        fn should_reject_mismatched_close() {
            let err = NormalizedMessage::parse_display("<b>x</i>").unwrap_err();
            assert_eq!(err.message, "unexpected close tag <i>");
            assert_eq!(err.tag.as_deref(), Some("i"));
        }

        #[test]
        fn should_reject_unterminated_tag() {
            let err = NormalizedMessage::parse_display("<b>x").unwrap_err();
            assert_eq!(err.tag.as_deref(), Some("b"));
        }

        #[test]
        fn should_refuse_to_serialize_hand_built_mismatch() {
            let message = NormalizedMessage::new(vec![
                Part::TagStart("b".to_string()),
                Part::Text("x".to_string()),
            ]);
            for dialect in DIALECTS {
                assert!(message.to_native_string(dialect).is_err());
            }
        }
    }

    mod round_trip_law {
        use super::*;
        use pretty_assertions::assert_eq;

        fn check(s: &str) {
            for dialect in DIALECTS {
                assert_eq!(round_trip(dialect, s), s, "dialect {:?}", dialect);
            }
        }

        #[test]
        fn should_round_trip_plain_text() {
            check("Hello world");
        }

        #[test]
        fn should_round_trip_text_with_xml_special_characters() {
            check("Tom & Jerry say \"hi\"");
        }

        #[test]
        fn should_round_trip_single_interpolation() {
            check("Hello {{0}}!");
        }

        #[test]
        fn should_round_trip_multiple_interpolations() {
            check("{{0}} of {{1}} items, {{2}} selected");
        }

        #[test]
        fn should_round_trip_simple_tag_pair() {
            check("Text <b>with</b> markup");
        }

        #[test]
        fn should_round_trip_unknown_tag_pair() {
            check("an <strange>unknown</strange> tag");
        }

        #[test]
        fn should_round_trip_nested_mixed_tags() {
            check("<p>deep <b>bold <i>{{0}} nested</i></b> and <a>link</a></p>");
        }

        #[test]
        fn should_round_trip_repeated_tags() {
            check("<b>one</b>, <b>two</b> and <b><b>three</b></b>");
        }

        #[test]
        fn should_round_trip_single_icu_reference() {
            check("<ICU-Message-Ref_0/>");
        }

        #[test]
        fn should_round_trip_multiple_icu_references() {
            check("a <ICU-Message-Ref_0/> b <ICU-Message-Ref_1/>");
        }

        #[test]
        fn should_round_trip_empty_tag() {
            check("first<br>second");
        }
    }

    mod numbering {
        use super::*;
        use pretty_assertions::assert_eq;

        fn marker_names(native: &str, attr: &str) -> Vec<String> {
            let mut doc = XmlDocument::new();
            parse_fragment(&mut doc, native)
                .unwrap()
                .into_iter()
                .filter_map(|node| doc.attr(node, attr).map(str::to_string))
                .collect()
        }

        #[test]
        fn should_number_interpolations_in_appearance_order() {
            for k in 1..=5 {
                let s = (0..k).map(|i| format!("{{{{{}}}}} ", i)).collect::<String>();
                let names = marker_names(&to_native(DialectKind::Xliff, &s), "id");
                let mut expected = vec!["INTERPOLATION".to_string()];
                expected.extend((1..k).map(|i| format!("INTERPOLATION_{}", i)));
                assert_eq!(names, expected);
            }
        }

        #[test]
        fn should_number_each_kind_separately() {
            let native = to_native(
                DialectKind::Xmb,
                "<b>a</b>{{0}}<b>b</b><br><ICU-Message-Ref_0/><br>{{1}}",
            );
            assert_eq!(
                marker_names(&native, "name"),
                vec![
                    "START_BOLD_TEXT",
                    "CLOSE_BOLD_TEXT",
                    "INTERPOLATION",
                    "START_BOLD_TEXT_1",
                    "CLOSE_BOLD_TEXT_1",
                    "LINE_BREAK",
                    "ICU",
                    "LINE_BREAK_1",
                    "INTERPOLATION_1",
                ]
            );
        }

        #[test]
        fn should_keep_placeholder_indices_in_order_of_appearance() {
            let message = parse_native(
                DialectKind::Xmb,
                "<ph name=\"INTERPOLATION\"/> und <ph name=\"INTERPOLATION_1\"/>",
            );
            assert_eq!(message.placeholder_indices(), vec![0, 1]);
        }

        #[test]
        fn should_produce_identical_output_for_identical_messages() {
            let s = "<i>{{0}}</i> <i>{{1}}</i>";
            for dialect in DIALECTS {
                assert_eq!(to_native(dialect, s), to_native(dialect, s));
            }
        }
    }

    mod icu {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_keep_raw_icu_message_as_single_text() {
            let message = parse_native(
                DialectKind::Xliff,
                "{VAR_PLURAL, plural, =0 {none} =1 {one} other {many}}",
            );
            assert!(message.is_icu_message());
            assert_eq!(message.parts().len(), 1);
        }

        #[test]
        fn should_not_tokenize_markers_inside_icu_message() {
            for (dialect, marker) in [
                (DialectKind::Xliff, "<x id=\"INTERPOLATION\"/>"),
                (DialectKind::Xliff2, "<ph id=\"0\" equiv=\"INTERPOLATION\" disp=\"{{0}}\"/>"),
                (DialectKind::Xmb, "<ph name=\"INTERPOLATION\"><ex>INTERPOLATION</ex></ph>"),
            ] {
                let native = format!("{{VAR_SELECT, select, male {{{}}} other {{x}}}}", marker);
                let message = parse_native(dialect, &native);
                assert!(message.is_icu_message());
                assert_eq!(message.placeholder_indices(), Vec::<usize>::new());
                assert_eq!(message.to_native_string(dialect).unwrap(), native);
            }
        }

        #[test]
        fn should_not_flag_text_with_icu_reference() {
            let message = display("You have <ICU-Message-Ref_0/>");
            assert!(!message.is_icu_message());
            assert_eq!(message.icu_ref_indices(), vec![0]);
        }
    }

    mod validation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_report_missing_icu_reference() {
            let source = display("<ICU-Message-Ref_0/> and {{0}}");
            let translation = display("und {{0}}");
            let report = translation.validate(&source);
            assert_eq!(
                report.errors,
                vec!["removed ICU message reference <ICU-Message-Ref_0/> from source".to_string()]
            );
        }
    }
}
