//! Enumerated pet attributes.
//!
//! Values travel on the wire and in the database as their uppercase names
//! (`"DOG"`, `"AVAILABLE"`). Parsing accepts only those exact names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use petadopt_core::error::AppError;

macro_rules! define_choice {
    (
        $(#[$meta:meta])*
        $name:ident, $type_name:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
        #[sqlx(type_name = $type_name, rename_all = "UPPERCASE")]
        #[serde(rename_all = "UPPERCASE")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every declared value, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Return the wire representation.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| AppError::validation(format!("\"{s}\" is not a valid choice.")))
            }
        }
    };
}

define_choice! {
    /// Species of a pet.
    PetType, "pet_type" {
        /// Dog.
        Dog => "DOG",
        /// Cat.
        Cat => "CAT",
        /// Bird.
        Bird => "BIRD",
        /// Rabbit.
        Rabbit => "RABBIT",
        /// Anything else.
        Other => "OTHER",
    }
}

define_choice! {
    /// Pet gender.
    Gender, "pet_gender" {
        /// Male.
        Male => "MALE",
        /// Female.
        Female => "FEMALE",
    }
}

define_choice! {
    /// Pet size class.
    PetSize, "pet_size" {
        /// Small.
        Small => "SMALL",
        /// Medium.
        Medium => "MEDIUM",
        /// Large.
        Large => "LARGE",
    }
}

define_choice! {
    /// Adoption status of a pet.
    PetStatus, "pet_status" {
        /// Open for adoption.
        Available => "AVAILABLE",
        /// An adoption is in progress.
        Pending => "PENDING",
        /// Adopted.
        Adopted => "ADOPTED",
    }
}

impl Default for PetStatus {
    fn default() -> Self {
        Self::Available
    }
}
