//! Error types for the resolution engine
//!
//! Entry-scoped errors ([`ParseError`], [`ResolutionError`],
//! [`ValidationError`], wrapped by [`EntryError`]) never escape a resolution
//! pass; the builder turns them into notices. [`FatalError`] aborts a pass and
//! [`UniverseError`] reports a broken symbol universe description.

use crate::diagnostics::Related;
use crate::identifier::MemberCategory;
use crate::symbols::{ResolvedSymbol, SymbolId, SymbolKind};
use glue_manifest::ManifestError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed {category} identifier \"{identifier}\": expected {expected}")]
    MalformedIdentifier {
        identifier: String,
        category: MemberCategory,
        expected: &'static str,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("Failed to find type \"{type_name}\"{}. A dependency listed it in their GlueMeister config file (most likely cause of this error is obfuscation).", looking_for(.member, .member_kind))]
    TypeNotFound {
        type_name: String,
        member: Option<String>,
        category: MemberCategory,
        /// How the member is named in messages, e.g. "static method"
        member_kind: &'static str,
    },

    #[error("Failed to find {member_kind} \"{member}\" in type \"{owner}\". A dependency listed it in their GlueMeister config file (most likely cause of this error is obfuscation).")]
    MemberNotFound {
        owner: String,
        member: String,
        category: MemberCategory,
        member_kind: &'static str,
    },

    #[error("Failed to find {expected} \"{member}\" in type \"{owner}\". A member with this name is present, but it is a {actual}.")]
    KindMismatch {
        owner: String,
        member: String,
        expected: SymbolKind,
        actual: SymbolKind,
    },

    #[error("Symbol table returned handle {0} but cannot describe it")]
    StaleSymbol(SymbolId),
}

fn looking_for(member: &Option<String>, member_kind: &str) -> String {
    member.as_deref().map_or_else(String::new, |member| {
        format!(" containing the {member_kind} \"{member}\"")
    })
}

impl ResolutionError {
    /// Name the missing member as `member_kind` (e.g. "static field") in messages
    pub fn describing(self, member_kind: &'static str) -> Self {
        match self {
            ResolutionError::TypeNotFound {
                type_name,
                member,
                category,
                ..
            } => ResolutionError::TypeNotFound {
                type_name,
                member,
                category,
                member_kind,
            },
            ResolutionError::MemberNotFound {
                owner,
                member,
                category,
                ..
            } => ResolutionError::MemberNotFound {
                owner,
                member,
                category,
                member_kind,
            },
            other => other,
        }
    }
}

/// Why an accessibility check failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessViolation {
    /// The symbol itself is private
    PrivateMember,
    /// An enclosing type is not static
    EnclosingNotStatic,
    /// An enclosing type is not public
    EnclosingNotPublic,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Element {} is not accessible to GlueMeister. It has to be static!", .symbol.name())]
    NotStatic { symbol: ResolvedSymbol },

    #[error("Element {} cannot be used by GlueMeister. To ensure proper runtime behavior it has to be final!", .symbol.name())]
    NotFinal { symbol: ResolvedSymbol },

    #[error("{}", inaccessible_message(.symbol, .scope, .reason))]
    Inaccessible {
        symbol: ResolvedSymbol,
        /// Offending scope; the symbol itself for [`AccessViolation::PrivateMember`]
        scope: ResolvedSymbol,
        reason: AccessViolation,
    },
}

fn inaccessible_message(
    symbol: &ResolvedSymbol,
    scope: &ResolvedSymbol,
    reason: &AccessViolation,
) -> String {
    let name = symbol.name();
    match reason {
        AccessViolation::PrivateMember => format!(
            "Element {name} is not accessible to GlueMeister. The element has to have at least package local or public visibility."
        ),
        AccessViolation::EnclosingNotStatic => format!(
            "Element {name} is not accessible to GlueMeister. It is nested inside {} and this element has to be static. Currently it is not static.",
            scope.name()
        ),
        AccessViolation::EnclosingNotPublic => format!(
            "Element {name} is not accessible to GlueMeister. It is nested inside {} and this element has to be public.",
            scope.name()
        ),
    }
}

impl ValidationError {
    /// Symbol a diagnostic for this error should point at
    pub fn offending_symbol(&self) -> &ResolvedSymbol {
        match self {
            ValidationError::NotStatic { symbol } | ValidationError::NotFinal { symbol } => symbol,
            ValidationError::Inaccessible { scope, .. } => scope,
        }
    }
}

/// Anything that can go wrong with a single manifest entry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl EntryError {
    /// See [`ResolutionError::describing`]; other errors are unchanged.
    pub fn describing(self, member_kind: &'static str) -> Self {
        match self {
            EntryError::Resolution(err) => EntryError::Resolution(err.describing(member_kind)),
            other => other,
        }
    }

    /// What a diagnostic for this error relates to
    pub fn related(&self, identifier: &str) -> Related {
        match self {
            EntryError::Validation(err) => Related::Symbol(err.offending_symbol().clone()),
            EntryError::Resolution(ResolutionError::TypeNotFound { type_name, .. }) => {
                Related::Identifier(type_name.as_str().into())
            }
            EntryError::Parse(_) | EntryError::Resolution(_) => Related::Identifier(identifier.into()),
        }
    }
}

/// Errors that abort a whole resolution pass
#[derive(Error, Debug)]
pub enum FatalError {
    #[error("Failed to read config file. Something seems to be wrong with your project setup!")]
    ManifestUnreadable(#[from] ManifestError),
}

/// Errors raised while building a [`crate::universe::SymbolUniverse`]
#[derive(Error, Debug)]
pub enum UniverseError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse symbol universe: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Type \"{0}\" is declared more than once")]
    DuplicateType(String),

    #[error("Type \"{ty}\" extends unknown type \"{supertype}\"")]
    UnknownSupertype { ty: String, supertype: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_not_found_mentions_member() {
        let err = ResolutionError::TypeNotFound {
            type_name: "com.x.Y".to_string(),
            member: Some("Z".to_string()),
            category: MemberCategory::Field,
            member_kind: "field",
        };
        assert!(err
            .to_string()
            .starts_with("Failed to find type \"com.x.Y\" containing the field \"Z\"."));

        let err = ResolutionError::TypeNotFound {
            type_name: "com.x.Y".to_string(),
            member: None,
            category: MemberCategory::Type,
            member_kind: "type",
        };
        assert!(err.to_string().starts_with("Failed to find type \"com.x.Y\". "));
    }

    #[test]
    fn test_describing_renames_missing_member() {
        let err = ResolutionError::MemberNotFound {
            owner: "com.x.Y".to_string(),
            member: "create".to_string(),
            category: MemberCategory::Method,
            member_kind: "method",
        }
        .describing("static method");
        assert!(err
            .to_string()
            .starts_with("Failed to find static method \"create\" in type \"com.x.Y\"."));
    }

    #[test]
    fn test_kind_mismatch_display() {
        let err = ResolutionError::KindMismatch {
            owner: "com.x.Y".to_string(),
            member: "Z".to_string(),
            expected: SymbolKind::Method,
            actual: SymbolKind::Field,
        };
        assert_eq!(
            err.to_string(),
            "Failed to find method \"Z\" in type \"com.x.Y\". A member with this name is present, but it is a field."
        );
    }

    #[test]
    fn test_entry_error_related_identifier() {
        let err = EntryError::from(ParseError::MalformedIdentifier {
            identifier: "bad".to_string(),
            category: MemberCategory::Method,
            expected: MemberCategory::Method.expected_shape(),
        });
        assert_eq!(err.related("bad"), Related::Identifier("bad".into()));
    }
}
