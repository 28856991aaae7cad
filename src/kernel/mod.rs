//! Headless plugin core (document state, status presenter, menu, window title).

pub mod action;
pub mod document;
pub mod extension;
pub mod locale;
pub mod menu;
pub mod path_style;
pub mod services;
pub mod status;
pub mod window_title;

pub use action::HostEvent;
pub use document::{ActiveDocument, ActiveDocumentState, NO_WORKSPACE};
pub use extension::{FilePathBar, Subscriptions, CONTEXT_KEY};
pub use locale::{detect_language, LabelKey, LocaleBundle, LocaleResolver};
pub use menu::{MenuAction, MenuBuilder, MenuEntry};
pub use path_style::{format_path, PathStyle};
pub use status::{status_text, PresenterState, StatusPresenter};
pub use window_title::{compose_title, update_title};
