//! Startup-resolved indicator registry.

use crate::error::IndicatorError;
use crate::humidity::{Hur, Rsds};
use crate::indicator::Indicator;
use crate::precip::{Cdd, Cwd, Prcptot, R10, R20, R95p, Rx1day, Rx5day, Sdii};
use crate::temperature::{Csdi, Dtr, Fd, Gdd, Id, Su, Tn10p, Tn90p, Tnn, Tx90p, Txx};

/// Returns the full indicator catalog.
///
/// The registry is a flat, swappable list: the driver resolves requested
/// ids against it at startup and fails fast on unknown names instead of
/// probing capabilities at call time.
pub fn registry() -> Vec<Box<dyn Indicator>> {
    vec![
        Box::new(Cdd),
        Box::new(Cwd),
        Box::new(R10),
        Box::new(R20),
        Box::new(R95p),
        Box::new(Rx1day),
        Box::new(Rx5day),
        Box::new(Sdii),
        Box::new(Prcptot),
        Box::new(Txx),
        Box::new(Tnn),
        Box::new(Fd),
        Box::new(Id),
        Box::new(Su),
        Box::new(Dtr),
        Box::new(Gdd),
        Box::new(Tx90p),
        Box::new(Tn90p),
        Box::new(Tn10p),
        Box::new(Csdi),
        Box::new(Hur),
        Box::new(Rsds),
    ]
}

/// Resolves a list of indicator ids against the catalog, preserving the
/// requested order.
///
/// # Errors
///
/// Returns [`IndicatorError::UnknownIndicator`] for the first id not in
/// the catalog.
pub fn resolve(ids: &[String]) -> Result<Vec<Box<dyn Indicator>>, IndicatorError> {
    let mut out = Vec::with_capacity(ids.len());
    for id in ids {
        let mut catalog = registry();
        let position = catalog
            .iter()
            .position(|ind| ind.id() == id)
            .ok_or_else(|| IndicatorError::UnknownIndicator { id: id.clone() })?;
        out.push(catalog.swap_remove(position));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_unique() {
        let catalog = registry();
        let mut ids: Vec<&str> = catalog.iter().map(|i| i.id()).collect();
        let n = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), n, "duplicate indicator ids in catalog");
    }

    #[test]
    fn catalog_covers_expected_ids() {
        let catalog = registry();
        let ids: Vec<&str> = catalog.iter().map(|i| i.id()).collect();
        for expected in [
            "cdd", "cwd", "r10", "r20", "r95p", "rx1day", "rx5day", "sdii", "pr", "txx", "tnn",
            "fd", "id", "su", "dtr", "gdd", "tx90p", "tn90p", "tn10p", "csdi", "hur", "rsds",
        ] {
            assert!(ids.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn resolve_preserves_order() {
        let resolved = resolve(&["txx".to_string(), "cdd".to_string()]).unwrap();
        assert_eq!(resolved[0].id(), "txx");
        assert_eq!(resolved[1].id(), "cdd");
    }

    #[test]
    fn resolve_unknown_id_fails() {
        let err = resolve(&["nope".to_string()]).err().unwrap();
        assert!(matches!(
            err,
            IndicatorError::UnknownIndicator { id } if id == "nope"
        ));
    }

    #[test]
    fn every_indicator_declares_variables() {
        for ind in registry() {
            assert!(
                !ind.variables().is_empty(),
                "{} declares no variables",
                ind.id()
            );
        }
    }
}
