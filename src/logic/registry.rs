//! Name → bundle lookup (spec.md §6 `BuildTableau(logic-name, ...)`).

use crate::error::LogicError;
use crate::logic::{modal, propositional, quantified, LogicBundle};

/// Resolve a logic name (case-insensitive) to its freshly constructed
/// bundle. `G3, P3, GO, MH, NH, L3` are named in the original roster but
/// not implemented here (SPEC_FULL.md §3); they are simply absent arms,
/// not a partial/fallback match, so they surface as `UnknownLogic` like
/// any other typo rather than silently degrading to a related logic.
pub fn lookup(name: &str) -> Result<LogicBundle, LogicError> {
    match name.to_ascii_uppercase().as_str() {
        "CPL" => Ok(propositional::cpl()),
        "CFOL" => Ok(quantified::cfol()),
        "FDE" => Ok(propositional::fde()),
        "K3" => Ok(propositional::k3()),
        "LP" => Ok(propositional::lp()),
        "K3W" => Ok(propositional::k3w()),
        "B3E" => Ok(propositional::b3e()),
        "RM3" => Ok(propositional::rm3()),
        "K" => Ok(modal::k()),
        "D" => Ok(modal::d()),
        "T" => Ok(modal::t()),
        "S4" => Ok(modal::s4()),
        "S5" => Ok(modal::s5()),
        other => Err(LogicError::UnknownLogic(other.to_string())),
    }
}

/// Every logic name this crate registers, in roster order
/// (SPEC_FULL.md §3); used by the corpus/tests to iterate "every logic".
pub const ROSTER: &[&str] = &[
    "CPL", "CFOL", "FDE", "K3", "LP", "K3W", "B3E", "RM3", "K", "D", "T", "S4", "S5",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_logic_errors() {
        let err = lookup("GO").unwrap_err();
        assert!(matches!(err, LogicError::UnknownLogic(_)));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup("cpl").unwrap().name, "CPL");
    }

    #[test]
    fn roster_all_resolve() {
        for name in ROSTER {
            assert!(lookup(name).is_ok(), "{name} should resolve");
        }
    }
}
