#![allow(dead_code)]
#![allow(unused_imports)]

/**
 * Test Utilities
 *
 * Builders for documents, trans-units and messages shared by the integration tests
 */
use i18nsupport::i18n::parsers::message_parser::{parse_native_string, to_native_string};
use i18nsupport::xml::parse_document;
use i18nsupport::{
    DialectKind, FileHandle, NodeId, NormalizedMessage, TranslationConfig, Xliff2TransUnit,
    XliffTransUnit, XmbTransUnit, XmlDocument,
};

pub const PREFIX: &str = "[[ ";
pub const SUFFIX: &str = " ]]";

pub fn display(s: &str) -> NormalizedMessage {
    NormalizedMessage::parse_display(s).unwrap()
}

/// display -> native -> normalized -> display
pub fn round_trip(dialect: DialectKind, s: &str) -> String {
    let native = to_native(dialect, s);
    parse_native_string(dialect.rules(), &native, None)
        .unwrap()
        .display_string()
}

pub fn to_native(dialect: DialectKind, s: &str) -> String {
    to_native_string(dialect.rules(), &display(s)).unwrap()
}

pub fn parse_native(dialect: DialectKind, native: &str) -> NormalizedMessage {
    parse_native_string(dialect.rules(), native, None).unwrap()
}

pub fn affix_config() -> TranslationConfig {
    TranslationConfig::new(PREFIX, SUFFIX)
}

pub fn file(xml: &str) -> FileHandle {
    FileHandle::new(parse_document(xml).unwrap().into_shared(), affix_config())
}

pub fn empty_file(root: &str) -> FileHandle {
    FileHandle::new(XmlDocument::with_root(root).into_shared(), affix_config())
}

/// First element named `name` in the document.
pub fn find(file: &FileHandle, name: &str) -> NodeId {
    let doc = file.document.borrow();
    let root = doc.root_element().unwrap();
    if doc.is_named(root, name) {
        return root;
    }
    doc.descendants_named(root, name)[0]
}

pub fn xliff_file(units: &str) -> FileHandle {
    file(&format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <xliff version=\"1.2\" xmlns=\"urn:oasis:names:tc:xliff:document:1.2\">\
         <file source-language=\"en\" datatype=\"plaintext\" original=\"ng2.template\">\
         <body>{}</body></file></xliff>",
        units
    ))
}

pub fn xliff_unit(unit: &str) -> (FileHandle, XliffTransUnit) {
    let file = xliff_file(unit);
    let element = find(&file, "trans-unit");
    let unit = XliffTransUnit::new(&file, element);
    (file, unit)
}

pub fn xliff2_file(units: &str) -> FileHandle {
    file(&format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <xliff version=\"2.0\" xmlns=\"urn:oasis:names:tc:xliff:document:2.0\" srcLang=\"en\">\
         <file id=\"ngi18n\" original=\"ng.template\">{}</file></xliff>",
        units
    ))
}

pub fn xliff2_unit(unit: &str) -> (FileHandle, Xliff2TransUnit) {
    let file = xliff2_file(unit);
    let element = find(&file, "unit");
    let unit = Xliff2TransUnit::new(&file, element);
    (file, unit)
}

pub fn xmb_file(messages: &str) -> FileHandle {
    file(&format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" ?><messagebundle>{}</messagebundle>",
        messages
    ))
}

pub fn xtb_file(translations: &str) -> FileHandle {
    file(&format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" ?><translationbundle lang=\"de\">{}</translationbundle>",
        translations
    ))
}

/// XMB unit, with an XTB bundle when `translations` is given.
pub fn xmb_unit(message: &str, translations: Option<&str>) -> (FileHandle, Option<FileHandle>, XmbTransUnit) {
    let master = xmb_file(message);
    let element = find(&master, "msg");
    let bundle = translations.map(xtb_file);
    let unit = XmbTransUnit::new(&master, element, bundle.as_ref().map(|b| b.document.clone()));
    (master, bundle, unit)
}
