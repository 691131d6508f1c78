//! Member directory used to render names in notifications

use std::{collections::BTreeMap, fs, path::Path};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::state::MemberId;

/// A member as listed in the roster file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    #[serde(default)]
    pub nick: Option<String>,
}

impl Member {
    /// Nickname if set, account name otherwise
    pub fn display_name(&self) -> &str {
        self.nick.as_deref().unwrap_or(&self.name)
    }
}

/// Looks up members by id
pub trait MemberDirectory: Send + Sync {
    fn display_name(&self, id: MemberId) -> Option<String>;

    fn members(&self) -> Vec<Member>;

    fn contains(&self, id: MemberId) -> bool {
        self.display_name(id).is_some()
    }

    fn is_empty(&self) -> bool {
        self.members().is_empty()
    }
}

/// Display name for `id`, or the raw id when it cannot be resolved
pub fn display_name_or_id(directory: &dyn MemberDirectory, id: MemberId) -> String {
    directory.display_name(id).unwrap_or_else(|| id.to_string())
}

/// Directory backed by a JSON array of members
#[derive(Debug, Clone, Default)]
pub struct Roster {
    members: BTreeMap<MemberId, Member>,
}

impl Roster {
    /// A roster with nobody in it
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_members(members: impl IntoIterator<Item = Member>) -> Self {
        Self {
            members: members.into_iter().map(|member| (member.id, member)).collect(),
        }
    }

    /// Load a roster file such as `[{"id": 1, "name": "alice", "nick": "Al"}]`
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read roster from {}", path.display()))?;
        let members: Vec<Member> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse roster {}", path.display()))?;

        info!("Loaded {} members from {}", members.len(), path.display());
        Ok(Self::from_members(members))
    }
}

impl MemberDirectory for Roster {
    fn display_name(&self, id: MemberId) -> Option<String> {
        self.members.get(&id).map(|member| member.display_name().to_string())
    }

    fn members(&self) -> Vec<Member> {
        self.members.values().cloned().collect()
    }
}
