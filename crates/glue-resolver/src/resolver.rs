//! Symbol lookup for parsed identifiers
//!
//! Lookup is first-match on simple name among the owner's directly declared
//! members. Manifest identifiers carry no signatures, so overloads resolve to
//! whichever member the host enumerates first. Inherited members are not
//! searched: an identifier names the exact class a static member lives on.

use crate::errors::{EntryError, ResolutionError};
use crate::identifier::{self, MemberCategory, ParsedIdentifier};
use crate::symbols::{ResolvedSymbol, SymbolId, SymbolKind, SymbolTable};
use tracing::trace;

pub struct SymbolResolver<'t, T: SymbolTable + ?Sized> {
    table: &'t T,
}

impl<'t, T: SymbolTable + ?Sized> SymbolResolver<'t, T> {
    pub fn new(table: &'t T) -> Self {
        Self { table }
    }

    /// Parse and resolve `identifier` in one step.
    pub fn resolve_identifier(
        &self,
        identifier: &str,
        category: MemberCategory,
    ) -> Result<ResolvedSymbol, EntryError> {
        let parsed = identifier::parse(identifier, category)?;
        Ok(self.resolve(&parsed)?)
    }

    pub fn resolve(&self, parsed: &ParsedIdentifier<'_>) -> Result<ResolvedSymbol, ResolutionError> {
        let owner = self.table.find_type(parsed.owner_type_name).ok_or_else(|| {
            ResolutionError::TypeNotFound {
                type_name: parsed.owner_type_name.to_string(),
                member: parsed.member_name.map(str::to_string),
                category: parsed.category,
                member_kind: parsed.category.as_str(),
            }
        })?;

        let Some(member_name) = parsed.member_name else {
            return self.capture(owner);
        };

        let member = self
            .table
            .direct_members(owner)
            .into_iter()
            .filter_map(|id| self.table.describe(id).map(|info| (id, info)))
            .find(|(_, info)| info.name.as_ref() == member_name);

        let Some((member_id, info)) = member else {
            return Err(ResolutionError::MemberNotFound {
                owner: parsed.owner_type_name.to_string(),
                member: member_name.to_string(),
                category: parsed.category,
                member_kind: parsed.category.as_str(),
            });
        };

        let expected = parsed.category.symbol_kind();
        if info.kind != expected {
            return Err(ResolutionError::KindMismatch {
                owner: parsed.owner_type_name.to_string(),
                member: member_name.to_string(),
                expected,
                actual: info.kind,
            });
        }

        trace!(
            "Resolved {}{}{} to {}",
            parsed.owner_type_name,
            parsed.category.separator().unwrap_or_default(),
            member_name,
            member_id
        );
        self.capture(member_id)
    }

    /// Abstract methods visible on `ty`, declared or inherited, in host order.
    pub fn find_unimplemented_methods(&self, ty: &ResolvedSymbol) -> Result<Vec<ResolvedSymbol>, ResolutionError> {
        self.table
            .all_members(ty.id())
            .into_iter()
            .filter(|id| {
                self.table
                    .describe(*id)
                    .is_some_and(|info| info.kind == SymbolKind::Method && info.modifiers.is_abstract())
            })
            .map(|id| self.capture(id))
            .collect()
    }

    fn capture(&self, id: SymbolId) -> Result<ResolvedSymbol, ResolutionError> {
        ResolvedSymbol::capture(self.table, id).ok_or(ResolutionError::StaleSymbol(id))
    }
}
