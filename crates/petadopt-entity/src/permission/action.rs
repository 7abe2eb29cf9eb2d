//! Actions on the pet resource, as checked by the ownership policy.

use serde::{Deserialize, Serialize};

/// Every action the pet endpoints perform.
///
/// The router binds each HTTP verb to a handler and each handler names
/// its action explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetAction {
    /// `GET /pets`.
    List,
    /// `GET /pets/{id}`.
    Retrieve,
    /// `POST /pets`.
    Create,
    /// `PUT /pets/{id}`.
    Update,
    /// `PATCH /pets/{id}`.
    PartialUpdate,
    /// `DELETE /pets/{id}`.
    Destroy,
    /// `GET /pets/my_pets`.
    MyPets,
    /// `GET /pets/available`.
    Available,
}

impl PetAction {
    /// Whether the action leaves stored data untouched.
    pub fn is_safe(&self) -> bool {
        matches!(
            self,
            Self::List | Self::Retrieve | Self::MyPets | Self::Available
        )
    }

    /// Whether the action requires an authenticated caller regardless of
    /// the read-access setting.
    pub fn requires_identity(&self) -> bool {
        !matches!(self, Self::List | Self::Retrieve | Self::Available)
    }

    /// Return the action as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "pet:list",
            Self::Retrieve => "pet:retrieve",
            Self::Create => "pet:create",
            Self::Update => "pet:update",
            Self::PartialUpdate => "pet:partial_update",
            Self::Destroy => "pet:destroy",
            Self::MyPets => "pet:my_pets",
            Self::Available => "pet:available",
        }
    }
}

impl std::fmt::Display for PetAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
