use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned team identifier. Opaque to the client; the backend may hand out
/// UUID strings or integers.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TeamId(String);

impl TeamId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TeamId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl<'de> Deserialize<'de> for TeamId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Int(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => TeamId(s),
            RawId::Int(n) => TeamId(n.to_string()),
        })
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub region: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

/// Editable team fields, also the request body for create and update.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamDraft {
    pub name: String,
    pub region: String,
    pub description: String,
}

impl TeamDraft {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Name of the first required field that is blank, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            Some("name")
        } else if self.region.trim().is_empty() {
            Some("region")
        } else {
            None
        }
    }
}

impl From<&Team> for TeamDraft {
    fn from(team: &Team) -> Self {
        Self {
            name: team.name.clone(),
            region: team.region.clone(),
            description: team.description.clone(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
