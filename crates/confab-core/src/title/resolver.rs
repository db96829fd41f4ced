//! Ordered title resolution.
//!
//! Each resolver looks at the [`TitleContext`] and either settles the title
//! or defers to the next one. The last resolver always settles, so the
//! result is never empty.

use confab_types::message::ChatMessage;
use confab_types::session::NEW_SESSION_TITLE;

use super::deriver::chat_title_from_message;

/// Everything the resolvers may consult.
#[derive(Debug, Clone, Copy)]
pub struct TitleContext<'a> {
    /// Title the session carries right now.
    pub current_title: &'a str,
    /// Title returned by the remote describer, if it was asked and answered.
    pub described: Option<&'a str>,
    /// First message in the session's history.
    pub first_message: Option<&'a ChatMessage>,
    /// Title recorded for this session in the metadata index.
    pub stored_title: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleResolution {
    Resolved(String),
    Continue,
}

pub trait TitleResolver: Sync {
    fn name(&self) -> &'static str;

    fn resolve(&self, ctx: &TitleContext<'_>) -> TitleResolution;
}

/// Whether `title` names the session, as opposed to being blank or the
/// placeholder.
pub(crate) fn usable(title: &str) -> bool {
    !title.is_empty() && title != NEW_SESSION_TITLE
}

/// Keeps a title the session already has.
pub struct ExistingTitle;

impl TitleResolver for ExistingTitle {
    fn name(&self) -> &'static str {
        "existing"
    }

    fn resolve(&self, ctx: &TitleContext<'_>) -> TitleResolution {
        if usable(ctx.current_title) {
            TitleResolution::Resolved(ctx.current_title.to_string())
        } else {
            TitleResolution::Continue
        }
    }
}

pub struct DescribedTitle;

impl TitleResolver for DescribedTitle {
    fn name(&self) -> &'static str {
        "described"
    }

    fn resolve(&self, ctx: &TitleContext<'_>) -> TitleResolution {
        match ctx.described {
            Some(title) if usable(title) => TitleResolution::Resolved(title.to_string()),
            _ => TitleResolution::Continue,
        }
    }
}

pub struct FirstMessageTitle;

impl TitleResolver for FirstMessageTitle {
    fn name(&self) -> &'static str {
        "first_message"
    }

    fn resolve(&self, ctx: &TitleContext<'_>) -> TitleResolution {
        let title = ctx
            .first_message
            .map(chat_title_from_message)
            .unwrap_or_default();
        if title.is_empty() {
            TitleResolution::Continue
        } else {
            TitleResolution::Resolved(title)
        }
    }
}

pub struct StoredMetadataTitle;

impl TitleResolver for StoredMetadataTitle {
    fn name(&self) -> &'static str {
        "stored_metadata"
    }

    fn resolve(&self, ctx: &TitleContext<'_>) -> TitleResolution {
        match ctx.stored_title {
            Some(title) if !title.is_empty() => TitleResolution::Resolved(title.to_string()),
            _ => TitleResolution::Continue,
        }
    }
}

pub struct PlaceholderTitle;

impl TitleResolver for PlaceholderTitle {
    fn name(&self) -> &'static str {
        "placeholder"
    }

    fn resolve(&self, _ctx: &TitleContext<'_>) -> TitleResolution {
        TitleResolution::Resolved(NEW_SESSION_TITLE.to_string())
    }
}

static TITLE_CHAIN: [&dyn TitleResolver; 5] = [
    &ExistingTitle,
    &DescribedTitle,
    &FirstMessageTitle,
    &StoredMetadataTitle,
    &PlaceholderTitle,
];

/// Run the resolver chain and return the first settled title.
pub fn resolve_title(ctx: &TitleContext<'_>) -> String {
    for resolver in TITLE_CHAIN {
        if let TitleResolution::Resolved(title) = resolver.resolve(ctx) {
            tracing::debug!(resolver = resolver.name(), %title, "Session title resolved");
            return title;
        }
    }
    NEW_SESSION_TITLE.to_string()
}
