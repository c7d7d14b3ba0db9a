//! Compact identifier parsing
//!
//! Manifest identifiers come in three shapes:
//!
//! - `pkg.Type` for types
//! - `pkg.Type::method` for methods
//! - `pkg.Type#field` for fields
//!
//! Owner names may themselves contain separators (nested types), so member
//! identifiers are always split at the rightmost separator.

use crate::errors::ParseError;
use crate::symbols::SymbolKind;
use glue_manifest::GlueableKind;
use serde::Serialize;
use std::fmt;

/// Which structural category an identifier refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberCategory {
    Type,
    Method,
    Field,
}

impl MemberCategory {
    /// Separator between owner and member, `None` for bare types
    pub fn separator(self) -> Option<&'static str> {
        match self {
            MemberCategory::Type => None,
            MemberCategory::Method => Some("::"),
            MemberCategory::Field => Some("#"),
        }
    }

    /// Symbol kind a resolved identifier of this category must have
    pub fn symbol_kind(self) -> SymbolKind {
        match self {
            MemberCategory::Type => SymbolKind::Type,
            MemberCategory::Method => SymbolKind::Method,
            MemberCategory::Field => SymbolKind::Field,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.symbol_kind().as_str()
    }

    /// Expected identifier shape, for error messages
    pub(crate) fn expected_shape(self) -> &'static str {
        match self {
            MemberCategory::Type => "a fully-qualified type name",
            MemberCategory::Method => "<type>::<method>",
            MemberCategory::Field => "<type>#<field>",
        }
    }
}

impl From<GlueableKind> for MemberCategory {
    fn from(kind: GlueableKind) -> Self {
        match kind {
            GlueableKind::StaticMethod | GlueableKind::InstanceMethod => MemberCategory::Method,
            GlueableKind::StaticField => MemberCategory::Field,
            GlueableKind::Interface | GlueableKind::AbstractClass | GlueableKind::Class => {
                MemberCategory::Type
            }
        }
    }
}

impl fmt::Display for MemberCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural parts of a manifest identifier, borrowed from the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedIdentifier<'a> {
    pub owner_type_name: &'a str,
    pub member_name: Option<&'a str>,
    pub category: MemberCategory,
}

/// Split `identifier` according to `category`.
pub fn parse(identifier: &str, category: MemberCategory) -> Result<ParsedIdentifier<'_>, ParseError> {
    let malformed = || ParseError::MalformedIdentifier {
        identifier: identifier.to_string(),
        category,
        expected: category.expected_shape(),
    };

    let Some(separator) = category.separator() else {
        if identifier.trim().is_empty() {
            return Err(malformed());
        }
        return Ok(ParsedIdentifier {
            owner_type_name: identifier,
            member_name: None,
            category,
        });
    };

    let (owner, member) = identifier.rsplit_once(separator).ok_or_else(malformed)?;
    if owner.is_empty() || member.is_empty() {
        return Err(malformed());
    }

    Ok(ParsedIdentifier {
        owner_type_name: owner,
        member_name: Some(member),
        category,
    })
}
