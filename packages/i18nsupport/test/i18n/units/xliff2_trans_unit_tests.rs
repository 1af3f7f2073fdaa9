/**
 * XLIFF 2.0 Trans-Unit Tests
 *
 * Segments, segment state and the <notes> container of <unit> records
 */

#[path = "../../util/mod.rs"]
mod utils;

#[cfg(test)]
mod xliff2_trans_unit_tests {
    use super::utils::*;
    use i18nsupport::xml::outer_xml;
    use i18nsupport::{
        I18nError, Note, SourceReference, TransUnit, TranslationState, Xliff2TransUnit,
    };
    use pretty_assertions::assert_eq;

    const GREETING: &str = "<unit id=\"greeting\">\
        <notes>\
        <note category=\"description\">Greeting</note>\
        <note category=\"meaning\">start page</note>\
        <note category=\"location\">src/app/app.component.html:3</note>\
        <note category=\"location\">src/app/other.component.html:10,12</note>\
        </notes>\
        <segment state=\"reviewed\">\
        <source>Hello <pc id=\"0\" equivStart=\"START_BOLD_TEXT\" equivEnd=\"CLOSE_BOLD_TEXT\" type=\"fmt\" dispStart=\"&lt;b&gt;\" dispEnd=\"&lt;/b&gt;\"><ph id=\"1\" equiv=\"INTERPOLATION\" disp=\"{{ name }}\"/></pc></source>\
        <target>Hallo <pc id=\"0\" equivStart=\"START_BOLD_TEXT\" equivEnd=\"CLOSE_BOLD_TEXT\" type=\"fmt\" dispStart=\"&lt;b&gt;\" dispEnd=\"&lt;/b&gt;\"><ph id=\"1\" equiv=\"INTERPOLATION\" disp=\"{{ name }}\"/></pc></target>\
        </segment>\
        </unit>";

    const BARE: &str = "<unit id=\"bare\"><segment><source>Hello</source></segment></unit>";

    fn outer(unit: &Xliff2TransUnit) -> String {
        let doc = unit.document().borrow();
        outer_xml(&doc, unit.element())
    }

    mod content {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_read_segment_content() {
            let (_file, unit) = xliff2_unit(GREETING);
            assert_eq!(
                unit.source_content_normalized().unwrap().unwrap().display_string(),
                "Hello <b>{{0}}</b>"
            );
            assert_eq!(
                unit.target_content_normalized().unwrap().unwrap().display_string(),
                "Hallo <b>{{0}}</b>"
            );
        }

        #[test]
        fn should_keep_reordered_placeholders_when_written_back() {
            let (_file, mut unit) = xliff2_unit(
                "<unit id=\"count\"><segment><source>\
                 <ph id=\"0\" equiv=\"INTERPOLATION\" disp=\"{{0}}\"/> of \
                 <ph id=\"1\" equiv=\"INTERPOLATION_1\" disp=\"{{1}}\"/>\
                 </source></segment></unit>",
            );
            unit.translate(display("{{1}} von {{0}}").into()).unwrap();
            assert_eq!(
                unit.target_content().unwrap(),
                "<ph id=\"0\" equiv=\"INTERPOLATION_1\" disp=\"{{1}}\"/> von \
                 <ph id=\"1\" equiv=\"INTERPOLATION\" disp=\"{{0}}\"/>"
            );
            assert_eq!(
                unit.target_content_normalized().unwrap().unwrap().display_string(),
                "{{1}} von {{0}}"
            );
        }

        #[test]
        fn should_create_target_inside_segment() {
            let (_file, mut unit) = xliff2_unit(BARE);
            unit.translate(display("Hallo").into()).unwrap();
            assert_eq!(
                outer(&unit),
                "<unit id=\"bare\"><segment state=\"translated\"><source>Hello</source>\
                 <target>Hallo</target></segment></unit>"
            );
        }

        #[test]
        fn should_create_segment_when_missing() {
            let (_file, mut unit) = xliff2_unit("<unit id=\"empty\"/>");
            unit.set_source_content("Hi").unwrap();
            unit.translate("Hallo".into()).unwrap();
            assert_eq!(
                outer(&unit),
                "<unit id=\"empty\"><segment state=\"translated\"><source>Hi</source>\
                 <target>Hallo</target></segment></unit>"
            );
        }

        #[test]
        fn should_report_missing_source_as_none() {
            let (_file, unit) = xliff2_unit("<unit id=\"empty\"/>");
            assert_eq!(unit.source_content(), None);
            assert_eq!(unit.source_content_normalized().unwrap(), None);
        }
    }

    mod state {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_map_segment_state() {
            let (_file, mut unit) = xliff2_unit(GREETING);
            assert_eq!(unit.state(), TranslationState::Translated);
            assert_eq!(unit.native_state().as_deref(), Some("reviewed"));
            unit.set_state(TranslationState::New);
            assert_eq!(unit.native_state().as_deref(), Some("initial"));
            unit.set_state(TranslationState::Final);
            assert_eq!(unit.state(), TranslationState::Final);
        }

        #[test]
        fn should_read_missing_state_as_new() {
            let (_file, unit) = xliff2_unit(BARE);
            assert_eq!(unit.state(), TranslationState::New);
        }
    }

    mod notes {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_read_reserved_categories() {
            let (_file, unit) = xliff2_unit(GREETING);
            assert_eq!(unit.description().as_deref(), Some("Greeting"));
            assert_eq!(unit.meaning().as_deref(), Some("start page"));
            assert!(unit.notes().is_empty());
        }

        #[test]
        fn should_set_notes_next_to_reserved_ones() {
            let (_file, mut unit) = xliff2_unit(GREETING);
            let notes = vec![Note::new("translator", "careful"), Note::new("", "no category")];
            unit.set_notes(&notes).unwrap();
            assert_eq!(unit.notes(), notes);
            assert_eq!(unit.description().as_deref(), Some("Greeting"));
            assert_eq!(unit.source_references().len(), 2);
        }

        #[test]
        fn should_reject_location_as_note_category() {
            let (_file, mut unit) = xliff2_unit(GREETING);
            let result = unit.set_notes(&[Note::new("location", "x.html:1")]);
            assert!(matches!(result, Err(I18nError::Validation { origin }) if origin == "location"));
            assert_eq!(unit.source_references().len(), 2);
        }

        #[test]
        fn should_create_notes_container_as_first_child() {
            let (_file, mut unit) = xliff2_unit(BARE);
            unit.set_description(Some("A greeting"));
            assert_eq!(
                outer(&unit),
                "<unit id=\"bare\"><notes><note category=\"description\">A greeting</note></notes>\
                 <segment><source>Hello</source></segment></unit>"
            );
        }

        #[test]
        fn should_remove_emptied_notes_container() {
            let (_file, mut unit) = xliff2_unit(BARE);
            unit.set_meaning(Some("m"));
            unit.set_notes(&[Note::new("dev", "d")]).unwrap();
            unit.set_meaning(None);
            unit.set_notes(&[]).unwrap();
            assert_eq!(outer(&unit), BARE);
        }
    }

    mod source_references {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_read_location_notes_and_ranges() {
            let (_file, unit) = xliff2_unit(GREETING);
            assert_eq!(
                unit.source_references(),
                vec![
                    SourceReference::new("src/app/app.component.html", 3),
                    SourceReference::new("src/app/other.component.html", 10),
                ]
            );
        }

        #[test]
        fn should_write_location_notes() {
            let (_file, mut unit) = xliff2_unit(BARE);
            unit.set_source_references(&[SourceReference::new("a.html", 7)]);
            assert_eq!(
                outer(&unit),
                "<unit id=\"bare\"><notes><note category=\"location\">a.html:7</note></notes>\
                 <segment><source>Hello</source></segment></unit>"
            );
            unit.set_source_references(&[]);
            assert_eq!(outer(&unit), BARE);
        }
    }

    mod synthesis {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_synthesize_scenarios() {
            let cases = [
                (false, true, "[[ Hello ]]", TranslationState::New, "initial"),
                (true, false, "[[ Hello ]]", TranslationState::Final, "final"),
                (false, false, "", TranslationState::New, "initial"),
            ];
            for (is_default_language, copy_content, target, state, token) in cases {
                let (_file, mut unit) = xliff2_unit(BARE);
                unit.use_source_as_target(is_default_language, copy_content).unwrap();
                assert_eq!(unit.target_content().unwrap(), target);
                assert_eq!(unit.state(), state);
                assert_eq!(unit.native_state().as_deref(), Some(token));
            }
        }

        #[test]
        fn should_clone_with_markup_kept_intact() {
            let (_file, unit) = xliff2_unit(GREETING);
            let target_file = xliff2_file("");
            let clone = unit.clone_with_source_as_target(true, false, &target_file).unwrap();
            assert_eq!(
                clone.target_content_normalized().unwrap().unwrap().display_string(),
                "[[ Hello <b>{{0}}</b> ]]"
            );
            assert_eq!(clone.state(), TranslationState::Final);
            assert_eq!(unit.state(), TranslationState::Translated);
        }
    }
}
