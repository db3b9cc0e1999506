use crate::constants::fields;
use crate::document::Filter;
use crate::id::ObjectId;
use crate::model::PrefabRecord;
use crate::session::Caller;

/// Which prefabs a caller may list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    /// Ownership is not enforced.
    All,
    /// Ownership is enforced and nobody is signed in.
    Nothing,
    /// The owner's records, plus shared (ownerless) records for the administrator.
    Owned {
        owner: ObjectId,
        include_shared: bool,
    },
}

impl Visibility {
    pub fn resolve(caller: Option<&Caller>, authority_enabled: bool) -> Self {
        if !authority_enabled {
            return Self::All;
        }
        match caller {
            Some(caller) => Self::for_owner(caller.id, caller.is_administrator),
            None => Self::Nothing,
        }
    }

    pub fn for_owner(owner: ObjectId, is_administrator: bool) -> Self {
        Self::Owned {
            owner,
            include_shared: is_administrator,
        }
    }

    /// Store filter for this visibility. `None` means nothing is visible.
    pub fn filter(&self) -> Option<Filter> {
        match self {
            Self::All => Some(Filter::All),
            Self::Nothing => None,
            Self::Owned {
                owner,
                include_shared,
            } => {
                let owned = Filter::eq(fields::OWNER, owner.to_string());
                Some(if *include_shared {
                    Filter::or([owned, Filter::exists(fields::OWNER, false)])
                } else {
                    owned
                })
            }
        }
    }

    pub fn permits(&self, record: &PrefabRecord) -> bool {
        match self {
            Self::All => true,
            Self::Nothing => false,
            Self::Owned {
                owner,
                include_shared,
            } => match record.owner_id {
                Some(id) => id == *owner,
                None => *include_shared,
            },
        }
    }
}
