/**
 * XMB Message Parser Tests
 *
 * <ph name="…"><ex>…</ex></ph> markers in XMB masters and XTB bundles
 */

#[path = "../../util/mod.rs"]
mod utils;

#[cfg(test)]
mod xmb_parser_tests {
    use super::utils::*;
    use i18nsupport::i18n::parsers::message_parser::parse_native_string;
    use i18nsupport::{DialectKind, I18nError};
    use pretty_assertions::assert_eq;

    const XMB: DialectKind = DialectKind::Xmb;

    #[test]
    fn should_write_placeholders_for_all_marker_kinds() {
        assert_eq!(
            to_native(XMB, "{{0}}<br><ICU-Message-Ref_0/>"),
            "<ph name=\"INTERPOLATION\"><ex>INTERPOLATION</ex></ph>\
             <ph name=\"LINE_BREAK\"><ex>&lt;br&gt;</ex></ph>\
             <ph name=\"ICU\"><ex>ICU</ex></ph>"
        );
    }

    #[test]
    fn should_read_tag_name_from_example() {
        let native = "<ph name=\"START_TAG_MAT_ICON\"><ex>&lt;mat-icon&gt;</ex></ph>home\
                      <ph name=\"CLOSE_TAG_MAT_ICON\"><ex>&lt;/mat-icon&gt;</ex></ph>";
        assert_eq!(parse_native(XMB, native).display_string(), "<mat-icon>home</mat-icon>");
    }

    #[test]
    fn should_read_xtb_placeholders_without_examples() {
        let native = "<ph name=\"START_PARAGRAPH\"/>Hallo <ph name=\"INTERPOLATION\"/><ph name=\"CLOSE_PARAGRAPH\"/>";
        assert_eq!(parse_native(XMB, native).display_string(), "<p>Hallo {{0}}</p>");
    }

    #[test]
    fn should_ignore_placeholders_without_name() {
        assert_eq!(parse_native(XMB, "a<ph>b</ph>").display_string(), "ab");
    }

    #[test]
    fn should_reject_mismatched_tags() {
        let native = "<ph name=\"START_BOLD_TEXT\"/>x<ph name=\"CLOSE_ITALIC_TEXT\"/>";
        assert!(matches!(
            parse_native_string(XMB.rules(), native, None),
            Err(I18nError::Markup(_))
        ));
    }
}
