//! Page-level pieces outside the archive container: locales, the language
//! switcher and the subscribe status banner.

mod lang_switch;
mod locale;
mod subscribe;

pub use lang_switch::{ClassSwap, LanguageSwitch};
pub use locale::{month_name, Lang};
pub use subscribe::SubscribeStatus;
