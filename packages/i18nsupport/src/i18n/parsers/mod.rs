//! Message Parsers
//!
//! One `DialectRules` implementation per native dialect plus the shared
//! parse/serialize algorithm in `message_parser`.

pub mod message_parser;
pub mod xliff;
pub mod xliff2;
pub mod xmb;

pub use message_parser::{
    DialectRules, Marker, MarkerRequest, MarkerRole, MarkerTemplate, TagEncoding, TagMarkerKind,
};
pub use xliff::XliffMessageParser;
pub use xliff2::Xliff2MessageParser;
pub use xmb::XmbMessageParser;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    /// XLIFF 1.2
    Xliff,
    /// XLIFF 2.0
    Xliff2,
    /// XMB master file with an XTB translation bundle
    Xmb,
}

static XLIFF_RULES: XliffMessageParser = XliffMessageParser;
static XLIFF2_RULES: Xliff2MessageParser = Xliff2MessageParser;
static XMB_RULES: XmbMessageParser = XmbMessageParser;

impl DialectKind {
    pub fn rules(self) -> &'static dyn DialectRules {
        match self {
            DialectKind::Xliff => &XLIFF_RULES,
            DialectKind::Xliff2 => &XLIFF2_RULES,
            DialectKind::Xmb => &XMB_RULES,
        }
    }
}
