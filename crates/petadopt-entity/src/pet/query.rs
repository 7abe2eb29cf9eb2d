//! Pet list filtering and ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use petadopt_core::types::{SortDirection, SortField, UserId, sorting::parse_ordering};

use super::kind::PetStatus;
use super::model::Pet;

/// Columns a pet list may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetSortField {
    /// Pet name.
    Name,
    /// Pet age.
    Age,
    /// Creation time.
    CreatedAt,
}

impl PetSortField {
    /// Parse an ordering term. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "age" => Some(Self::Age),
            "created_at" => Some(Self::CreatedAt),
            _ => None,
        }
    }

    /// The SQL expression backing this field.
    ///
    /// Names order case-insensitively, by the bytes of their lowercase form.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Name => "LOWER(name) COLLATE \"C\"",
            Self::Age => "age",
            Self::CreatedAt => "created_at",
        }
    }

    fn compare(&self, a: &Pet, b: &Pet) -> Ordering {
        match self {
            Self::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            Self::Age => a.age.cmp(&b.age),
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
        }
    }
}

/// Criteria for listing pets.
///
/// Every search term must occur, case-insensitively, in at least one of
/// name, type, breed or status. An empty ordering means `created_at`
/// ascending. The pet ID always breaks remaining ties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PetFilter {
    /// Lowercased search terms.
    pub search_terms: Vec<String>,
    /// Restrict to pets owned by this user.
    pub owner_id: Option<UserId>,
    /// Restrict to pets with this status.
    pub status: Option<PetStatus>,
    /// Requested ordering.
    pub ordering: Vec<SortField<PetSortField>>,
}

impl PetFilter {
    /// Build a filter from the raw `search` and `ordering` query parameters.
    pub fn from_params(search: Option<&str>, ordering: Option<&str>) -> Self {
        Self {
            search_terms: search.map(split_search).unwrap_or_default(),
            ordering: ordering
                .map(|raw| parse_ordering(raw, PetSortField::parse))
                .unwrap_or_default(),
            ..Default::default()
        }
    }

    /// Restrict to one owner.
    pub fn owned_by(mut self, owner_id: UserId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    /// Restrict to one status.
    pub fn with_status(mut self, status: PetStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// The ordering to apply, falling back to the default.
    pub fn effective_ordering(&self) -> Vec<SortField<PetSortField>> {
        if self.ordering.is_empty() {
            vec![SortField::asc(PetSortField::CreatedAt)]
        } else {
            self.ordering.clone()
        }
    }

    /// Whether `pet` satisfies every criterion.
    pub fn matches(&self, pet: &Pet) -> bool {
        if let Some(owner_id) = self.owner_id {
            if pet.owner_id != Some(owner_id) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if pet.status != status {
                return false;
            }
        }
        if self.search_terms.is_empty() {
            return true;
        }
        let haystacks = [
            pet.name.to_lowercase(),
            pet.pet_type.as_str().to_lowercase(),
            pet.breed.to_lowercase(),
            pet.status.as_str().to_lowercase(),
        ];
        self.search_terms
            .iter()
            .all(|term| haystacks.iter().any(|h| h.contains(term.as_str())))
    }

    /// Compare two pets under the effective ordering.
    pub fn compare(&self, a: &Pet, b: &Pet) -> Ordering {
        for sort in self.effective_ordering() {
            let ord = sort.field.compare(a, b);
            let ord = match sort.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        a.id.cmp(&b.id)
    }

    /// Sort `pets` in place under the effective ordering.
    pub fn sort(&self, pets: &mut [Pet]) {
        pets.sort_by(|a, b| self.compare(a, b));
    }
}

/// Split a search string on whitespace and commas into lowercase terms.
pub fn split_search(raw: &str) -> Vec<String> {
    raw.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}
