//! User-facing affordances: toolbar buttons, the add-profile form, the
//! per-profile context menu, and transient notices.
//!
//! Everything here is a view-model. It reads the profile store and emits
//! intents to the command dispatcher; rendering is the embedder's job, and
//! nothing in this module mutates the store directly.

pub mod form;
pub mod menu;
pub mod notice;
pub mod toolbar;

pub use form::AddProfileForm;
pub use menu::{ContextMenu, MenuAction, MenuKey, PointerTarget};
pub use notice::{Notice, NoticeCenter, NoticeLevel};
pub use toolbar::{ButtonIcon, ProfileButton};
