use rand::seq::IndexedRandom;
use serde_json::Value;

const REDACTED: &str = "<redacted>";

/// Strategy for picking one pre-shared key out of the configured pool.
pub trait KeySelector: Send + Sync {
    fn choose(&self, pool: &[String]) -> Option<String>;
}

/// Uniform random choice.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomKeySelector;

impl KeySelector for RandomKeySelector {
    fn choose(&self, pool: &[String]) -> Option<String> {
        pool.choose(&mut rand::rng()).cloned()
    }
}

/// Picks a key for this invocation, or `None` when encryption is not requested.
pub fn select_static_key(selector: &dyn KeySelector, pool: &[String]) -> Option<String> {
    if pool.is_empty() {
        return None;
    }
    selector.choose(pool)
}

/// Overwrites `StaticKeyValue` and `Url` in every HLS static key provider,
/// touching only fields the template already declares. Returns the number of
/// providers updated.
pub fn apply_static_key_encryption(
    settings: &mut Value,
    static_key: &str,
    key_provider_url: &str,
) -> usize {
    let Some(groups) = settings.get_mut("OutputGroups").and_then(Value::as_array_mut) else {
        return 0;
    };

    let mut updated = 0;
    for group in groups {
        let Some(provider) = group
            .pointer_mut("/OutputGroupSettings/HlsGroupSettings/Encryption/StaticKeyProvider")
            .and_then(Value::as_object_mut)
        else {
            continue;
        };

        if let Some(value) = provider.get_mut("StaticKeyValue") {
            *value = Value::String(static_key.to_string());
        }
        if let Some(url) = provider.get_mut("Url") {
            *url = Value::String(key_provider_url.to_string());
        }
        updated += 1;
    }

    updated
}

/// Copy of `settings` with every HLS `StaticKeyValue` masked, for logging.
pub fn redact_static_keys(settings: &Value) -> Value {
    let mut redacted = settings.clone();
    if let Some(groups) = redacted.get_mut("OutputGroups").and_then(Value::as_array_mut) {
        for group in groups {
            if let Some(value) = group.pointer_mut(
                "/OutputGroupSettings/HlsGroupSettings/Encryption/StaticKeyProvider/StaticKeyValue",
            ) {
                *value = Value::String(REDACTED.to_string());
            }
        }
    }
    redacted
}
