// models/src/enums.rs

//! Enumerated domains of a participant record.
//!
//! Every enum serializes as its exact display label ("Active Drug", "61+", ...)
//! and parses back from that same label only. Matching is exact and
//! case-sensitive, so a filter value either names a member of the domain or
//! is rejected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

/// Declares a label-backed enum with `as_str`, `ALL`, `Display` and `FromStr`.
macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every member of the domain, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    other => Err(ValidationError::InvalidEnumValue {
                        field: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

labeled_enum! {
    /// Participant gender as recorded at enrolment.
    Gender {
        Male => "Male",
        Female => "Female",
        Other => "Other",
    }
}

labeled_enum! {
    /// Randomized treatment arm.
    Treatment {
        ActiveDrug => "Active Drug",
        Placebo => "Placebo",
        Comparator => "Comparator",
    }
}

labeled_enum! {
    /// Age bucket. Declaration order is the canonical reporting order.
    AgeGroup {
        From18To30 => "18-30",
        From31To45 => "31-45",
        From46To60 => "46-60",
        Over60 => "61+",
        Unknown => "Unknown",
    }
}

labeled_enum! {
    AeSeverity {
        Mild => "Mild",
        Moderate => "Moderate",
        Severe => "Severe",
    }
}

labeled_enum! {
    /// Investigator assessment of causality between an adverse event and the treatment.
    AeRelationship {
        NotRelated => "Not Related",
        Unlikely => "Unlikely",
        Possible => "Possible",
        Probable => "Probable",
        Definite => "Definite",
    }
}

labeled_enum! {
    WorkStatus {
        Employed => "Employed",
        Unemployed => "Unemployed",
        Retired => "Retired",
        Student => "Student",
        Disabled => "Disabled",
    }
}
