use std::collections::BTreeMap;

/// Prefix shared by every pre-shared encryption key variable.
pub const STATIC_KEY_PREFIX: &str = "StaticKey";

#[derive(Debug, Clone, Copy)]
pub enum EnvKey {
    MediaConvertRole,
    Application,
    Region,
    KeyProviderUrl,
    DefaultJobPath,
    JobsPrefix,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::MediaConvertRole => "MediaConvertRole",
            EnvKey::Application => "Application",
            EnvKey::Region => "AWS_DEFAULT_REGION",
            EnvKey::KeyProviderUrl => "KeyProviderUrl",
            EnvKey::DefaultJobPath => "DefaultJobPath",
            EnvKey::JobsPrefix => "JobsPrefix",
        }
    }
}

/// Snapshot of the variables visible to one invocation.
#[derive(Debug, Clone, Default)]
pub struct EnvVars {
    vars: BTreeMap<String, String>,
}

impl EnvVars {
    pub fn from_process() -> Self {
        Self::from_iter(std::env::vars())
    }

    pub fn get(&self, key: EnvKey) -> Option<&str> {
        self.vars
            .get(key.as_str())
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn get_or(&self, key: EnvKey, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }

    /// Non-empty values of every `StaticKey*` variable, ordered by variable name.
    pub fn static_keys(&self) -> Vec<String> {
        self.vars
            .iter()
            .filter(|(name, value)| name.starts_with(STATIC_KEY_PREFIX) && !value.is_empty())
            .map(|(_, value)| value.clone())
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for EnvVars
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
