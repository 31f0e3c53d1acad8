use std::sync::{LazyLock, PoisonError, RwLock};

/// What the formatter does with bound attributes whose value is falsy
/// (zero, empty, `None`; see [`crate::Truthy`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FalsyPolicy {
    /// Render every bound attribute.
    #[default]
    Keep,
    /// Omit attributes whose value is falsy.
    Skip,
}

impl FalsyPolicy {
    /// Whether an attribute with the given truthiness is rendered.
    pub const fn admits(self, truthy: bool) -> bool {
        match self {
            FalsyPolicy::Keep => true,
            FalsyPolicy::Skip => truthy,
        }
    }
}

/// Process-wide defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReprSettings {
    pub falsy: FalsyPolicy,
}

pub static GLOBAL_SETTINGS: LazyLock<RwLock<ReprSettings>> =
    LazyLock::new(|| RwLock::new(ReprSettings::default()));

pub fn configure(settings: ReprSettings) {
    *GLOBAL_SETTINGS
        .write()
        .unwrap_or_else(PoisonError::into_inner) = settings;
}

pub fn settings() -> ReprSettings {
    *GLOBAL_SETTINGS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Per-call overrides. Unset fields fall back to the type's layout, then to
/// the global settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReprOptions {
    pub falsy: Option<FalsyPolicy>,
}

impl ReprOptions {
    pub const fn new() -> Self {
        Self { falsy: None }
    }

    pub const fn skip_falsy(mut self) -> Self {
        self.falsy = Some(FalsyPolicy::Skip);
        self
    }

    pub const fn keep_falsy(mut self) -> Self {
        self.falsy = Some(FalsyPolicy::Keep);
        self
    }

    /// Resolve the effective falsy policy for a type whose layout carries
    /// `type_policy`.
    pub fn falsy_policy(&self, type_policy: Option<FalsyPolicy>) -> FalsyPolicy {
        self.falsy
            .or(type_policy)
            .unwrap_or_else(|| settings().falsy)
    }
}
