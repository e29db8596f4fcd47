//! Content fingerprints for sweep inputs.

use crate::types::SweepKind;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Hex SHA-256 over the JSON form of the inputs, the sweep kind and the
/// engine version. Any input edit changes the fingerprint.
pub fn sweep_fingerprint<T: Serialize + ?Sized>(inputs: &T, kind: SweepKind) -> String {
    let mut hasher = Sha256::new();

    let inputs_json = serde_json::to_string(inputs).unwrap_or_default();
    hasher.update(inputs_json.as_bytes());

    let kind_json = serde_json::to_string(&kind).unwrap_or_default();
    hasher.update(kind_json.as_bytes());

    hasher.update(env!("CARGO_PKG_VERSION").as_bytes());

    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Inputs {
        reactor: &'static str,
        rate: f64,
    }

    #[test]
    fn stable_for_equal_inputs() {
        let a = Inputs { reactor: "R1", rate: 0.5 };
        let b = Inputs { reactor: "R1", rate: 0.5 };
        assert_eq!(
            sweep_fingerprint(&a, SweepKind::Sensitivity),
            sweep_fingerprint(&b, SweepKind::Sensitivity)
        );
    }

    #[test]
    fn differs_on_edit_and_kind() {
        let a = Inputs { reactor: "R1", rate: 0.5 };
        let b = Inputs { reactor: "R1", rate: 0.6 };
        let fa = sweep_fingerprint(&a, SweepKind::Sensitivity);
        assert_ne!(fa, sweep_fingerprint(&b, SweepKind::Sensitivity));
        assert_ne!(fa, sweep_fingerprint(&a, SweepKind::Scale));
        assert_eq!(fa.len(), 64);
    }
}
