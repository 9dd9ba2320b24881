//! String identifiers for catalog entries and players.
//!
//! Every table row is addressed by a short snake_case key (`"goblin_warrior"`,
//! `"explosive_arrow"`). Each kind of key gets its own newtype so a skill id
//! can never be used to look up an item.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Key of a [`MonsterTemplate`](super::MonsterTemplate).
    MonsterId
);
string_id!(
    /// Key of a [`SkillDefinition`](super::SkillDefinition).
    SkillId
);
string_id!(
    /// Key of an [`EffectDefinition`](super::EffectDefinition).
    EffectId
);
string_id!(
    /// Key of an [`ItemDefinition`](super::ItemDefinition).
    ItemId
);
string_id!(
    /// Character class tag (`"warrior"`, `"mage"`, ...).
    ClassTag
);
string_id!(
    /// Chat-platform user id owning a character record.
    PlayerId
);
