//! Modifier and accessibility rules
//!
//! Each [`Rule`] is checked independently; call sites compose the rules they
//! need. Generated glue code lives in its own namespace, so anything it binds
//! to must be reachable from there.

use crate::errors::{AccessViolation, ValidationError};
use crate::symbols::{ResolvedSymbol, SymbolKind, SymbolTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Top-level, or marked static
    Static,
    /// Marked final
    Final,
    /// Reachable from outside its enclosing types
    Accessibility,
}

pub struct Validator<'t, T: SymbolTable + ?Sized> {
    table: &'t T,
}

impl<'t, T: SymbolTable + ?Sized> Validator<'t, T> {
    pub fn new(table: &'t T) -> Self {
        Self { table }
    }

    pub fn validate(&self, symbol: &ResolvedSymbol, rule: Rule) -> Result<(), ValidationError> {
        match rule {
            Rule::Static => self.verify_static(symbol),
            Rule::Final => verify_final(symbol),
            Rule::Accessibility => self.verify_accessibility(symbol),
        }
    }

    /// Apply `rules` in order; the first failure wins.
    pub fn validate_all(&self, symbol: &ResolvedSymbol, rules: &[Rule]) -> Result<(), ValidationError> {
        rules.iter().try_for_each(|rule| self.validate(symbol, *rule))
    }

    fn verify_static(&self, symbol: &ResolvedSymbol) -> Result<(), ValidationError> {
        if self.is_static(symbol) {
            Ok(())
        } else {
            Err(ValidationError::NotStatic {
                symbol: symbol.clone(),
            })
        }
    }

    fn verify_accessibility(&self, symbol: &ResolvedSymbol) -> Result<(), ValidationError> {
        let Some(mut scope) = self.enclosing(symbol) else {
            return Ok(());
        };
        if scope.kind() == SymbolKind::Namespace {
            return Ok(());
        }

        if symbol.modifiers().is_private() {
            return Err(ValidationError::Inaccessible {
                symbol: symbol.clone(),
                scope: symbol.clone(),
                reason: AccessViolation::PrivateMember,
            });
        }

        while scope.kind() != SymbolKind::Namespace {
            let violation = if !self.is_static(&scope) {
                Some(AccessViolation::EnclosingNotStatic)
            } else if !scope.modifiers().is_public() {
                Some(AccessViolation::EnclosingNotPublic)
            } else {
                None
            };

            if let Some(reason) = violation {
                return Err(ValidationError::Inaccessible {
                    symbol: symbol.clone(),
                    scope,
                    reason,
                });
            }

            match self.enclosing(&scope) {
                Some(next) => scope = next,
                None => return Ok(()),
            }
        }

        Ok(())
    }

    fn is_static(&self, symbol: &ResolvedSymbol) -> bool {
        symbol.modifiers().is_static()
            || self
                .enclosing(symbol)
                .map_or(true, |scope| scope.kind() == SymbolKind::Namespace)
    }

    // A scope the table cannot describe ends the walk like a missing one.
    fn enclosing(&self, symbol: &ResolvedSymbol) -> Option<ResolvedSymbol> {
        symbol
            .enclosing()
            .and_then(|id| ResolvedSymbol::capture(self.table, id))
    }
}

fn verify_final(symbol: &ResolvedSymbol) -> Result<(), ValidationError> {
    if symbol.modifiers().is_final() {
        Ok(())
    } else {
        Err(ValidationError::NotFinal {
            symbol: symbol.clone(),
        })
    }
}
