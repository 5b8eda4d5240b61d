//! Core modules for the survey client

pub mod api;
pub mod export;
pub mod i18n;
pub mod prefs;
pub mod result_view;
pub mod router;
pub mod share;
pub mod survey;

pub use api::{EvaluateRequest, HttpBackend, SurveyBackend};
pub use export::{
    copy_text, share as share_result, Clipboard, CommandClipboard, CommandShare, CommandSnapshotRenderer,
    Exporter, NativeShare, ShareData, ShareOutcome, SnapshotRenderer, SystemClipboard,
};
pub use i18n::{TranslationSource, TranslationStore};
pub use prefs::{initial_language, PreferenceStore, Preferences};
pub use result_view::{localize, ResultView, Section};
pub use router::Route;
pub use share::{build_share_link, decode_share_link, result_from_link};
pub use survey::{Progress, SurveyFlow};
