//! Render-time context: an immutable, extensible property bag.
//!
//! Contexts are keyed by typed [`Property`] tokens rather than plain strings.
//! Each property carries its own default provider, invoked lazily when the
//! context has no entry for it. `set` never mutates; it returns a new context
//! whose unmodified entries are shared with the original.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

/// A typed context key with a default-value provider.
pub struct Property<T: 'static> {
    name: &'static str,
    default: fn() -> T,
}

impl<T> Property<T> {
    pub const fn new(name: &'static str, default: fn() -> T) -> Self {
        Self { name, default }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property").field("name", &self.name).finish()
    }
}

/// An immutable bag of render-time properties.
#[derive(Clone, Default)]
pub struct Context {
    entries: HashMap<&'static str, Arc<dyn Any + Send + Sync>>,
}

static DEFAULT: Lazy<Context> = Lazy::new(Context::new);

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide default context used by the context-less compose
    /// overload. It holds no entries, so every property resolves through its
    /// default provider.
    pub fn default_global() -> &'static Context {
        &DEFAULT
    }

    /// The stored value for `property`, or its default when absent.
    pub fn get<T: Clone + Send + Sync + 'static>(&self, property: &Property<T>) -> T {
        match self
            .entries
            .get(property.name)
            .and_then(|stored| stored.downcast_ref::<T>())
        {
            Some(value) => value.clone(),
            None => (property.default)(),
        }
    }

    pub fn contains<T>(&self, property: &Property<T>) -> bool {
        self.entries.contains_key(property.name)
    }

    /// A new context with `property` set; `self` is untouched and all other
    /// entries are shared.
    pub fn set<T: Send + Sync + 'static>(&self, property: &Property<T>, value: T) -> Context {
        let mut entries = self.entries.clone();
        entries.insert(property.name, Arc::new(value));
        Context { entries }
    }

    /// Start a multi-property extension; entries are cloned once no matter
    /// how many properties are set before [`ContextExtension::finish`].
    pub fn extend(&self) -> ContextExtension {
        ContextExtension {
            entries: self.entries.clone(),
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&'static str> = self.entries.keys().copied().collect();
        keys.sort_unstable();
        f.debug_struct("Context").field("keys", &keys).finish()
    }
}

/// In-progress extension of a [`Context`] with several properties at once.
pub struct ContextExtension {
    entries: HashMap<&'static str, Arc<dyn Any + Send + Sync>>,
}

impl ContextExtension {
    pub fn set<T: Send + Sync + 'static>(mut self, property: &Property<T>, value: T) -> Self {
        self.entries.insert(property.name, Arc::new(value));
        self
    }

    pub fn finish(self) -> Context {
        Context {
            entries: self.entries,
        }
    }
}

fn default_locale() -> String {
    "en-US".to_string()
}

fn default_time_zone() -> String {
    "UTC".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

/// BCP 47 language tag for locale-sensitive formatters.
pub static LOCALE: Property<String> = Property::new("locale", default_locale);

/// IANA time zone identifier.
pub static TIME_ZONE: Property<String> = Property::new("time-zone", default_time_zone);

/// ISO 4217 currency code.
pub static CURRENCY: Property<String> = Property::new("currency", default_currency);

#[cfg(test)]
mod tests {
    use super::*;

    static RETRIES: Property<i64> = Property::new("retries", || 3);

    #[test]
    fn absent_property_uses_default_provider() {
        let context = Context::new();
        assert_eq!(context.get(&LOCALE), "en-US");
        assert_eq!(context.get(&RETRIES), 3);
        assert!(!context.contains(&LOCALE));
    }

    #[test]
    fn set_returns_new_context_without_mutating() {
        let base = Context::new();
        let extended = base.set(&LOCALE, "de-DE".to_string());
        assert_eq!(extended.get(&LOCALE), "de-DE");
        assert_eq!(base.get(&LOCALE), "en-US");
        assert!(!base.contains(&LOCALE));
    }

    #[test]
    fn extend_sets_many_properties() {
        let context = Context::new()
            .extend()
            .set(&LOCALE, "fr-FR".to_string())
            .set(&CURRENCY, "EUR".to_string())
            .set(&RETRIES, 7)
            .finish();
        assert_eq!(context.get(&LOCALE), "fr-FR");
        assert_eq!(context.get(&CURRENCY), "EUR");
        assert_eq!(context.get(&RETRIES), 7);
        assert_eq!(context.get(&TIME_ZONE), "UTC");
    }

    #[test]
    fn unmodified_entries_are_shared() {
        let base = Context::new().set(&LOCALE, "ja-JP".to_string());
        let extended = base.set(&RETRIES, 1);
        assert_eq!(extended.get(&LOCALE), "ja-JP");
        assert_eq!(base.get(&RETRIES), 3);
    }
}
