//! Language switch control group state.

use super::Lang;

/// Root class change produced by switching language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSwap {
    pub remove: String,
    pub add: String,
}

/// Tracks the active language; the page shows content tagged with it.
#[derive(Debug, Clone)]
pub struct LanguageSwitch {
    current: Lang,
}

impl Default for LanguageSwitch {
    fn default() -> Self {
        Self { current: Lang::En }
    }
}

impl LanguageSwitch {
    pub fn current(&self) -> Lang {
        self.current
    }

    /// Class applied to the document root for the active language.
    pub fn active_class(&self) -> String {
        active_class(self.current)
    }

    /// Switch language. Selecting the active language is a no-op.
    pub fn select(&mut self, lang: Lang) -> Option<ClassSwap> {
        if lang == self.current {
            return None;
        }
        let swap = ClassSwap {
            remove: active_class(self.current),
            add: active_class(lang),
        };
        self.current = lang;
        Some(swap)
    }

    /// Switch by a button's `data-lang` value; unknown codes are ignored.
    pub fn select_code(&mut self, code: &str) -> Option<ClassSwap> {
        let lang = code.parse().ok()?;
        self.select(lang)
    }
}

fn active_class(lang: Lang) -> String {
    format!("lang-active-{}", lang.code())
}
