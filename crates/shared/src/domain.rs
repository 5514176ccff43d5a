use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ParseChoiceError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);
    };
}

id_newtype!(ProjectFolderId);

impl fmt::Display for ProjectFolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProjectFolderId {
    type Err = ParseChoiceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value
            .trim()
            .parse::<i64>()
            .map(ProjectFolderId)
            .map_err(|_| ParseChoiceError::new("projectId", value))
    }
}

/// A closed set of values offered by one of the article form's selection controls.
pub trait Choice: Copy + Sized + 'static {
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;
    fn label(self) -> &'static str;
}

/// Declares a closed set of form choices with their wire value and display label.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => ($wire:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl Choice for $name {
            const ALL: &'static [$name] = $name::ALL;

            fn as_str(self) -> &'static str {
                $name::as_str(self)
            }

            fn label(self) -> &'static str {
                $name::label(self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseChoiceError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($wire => Ok($name::$variant),)+
                    other => Err(ParseChoiceError::new($field, other)),
                }
            }
        }
    };
}

choice_enum! {
    ArticleType, "articleType" {
        Seo => ("seo", "SEO - Artikkel"),
        Student => ("student", "Studentoppgave"),
        Standard => ("standard", "Standard artikkel"),
        List => ("list", "Liste (F.eks top 5 reisemål)"),
    }
}

choice_enum! {
    Tone, "tone" {
        Formal => ("formal", "Formell"),
        Casual => ("casual", "Uformell"),
        Humorous => ("humorous", "Humoristisk"),
        Serious => ("serious", "Seriøs"),
        Optimistic => ("optimistic", "Optimistisk"),
    }
}

choice_enum! {
    ArticleLength, "length" {
        Short => ("short", "Kort (~500 ord)"),
        Medium => ("medium", "Middels (~1000 ord)"),
        Long => ("long", "Lang (~1500 ord)"),
    }
}

choice_enum! {
    /// Output language of the generated article.
    Language, "language" {
        Norwegian => ("Norsk", "Norsk"),
        Swedish => ("Svensk", "Svensk"),
        Danish => ("Dansk", "Dansk"),
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::Norwegian
    }
}

impl ArticleLength {
    pub fn estimated_words(self) -> u32 {
        match self {
            ArticleLength::Short => 500,
            ArticleLength::Medium => 1000,
            ArticleLength::Long => 1500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFolder {
    pub id: ProjectFolderId,
    pub name: String,
}
