use outbreak_core::{Capability, OutbreakError};

/// Collapse a set of provider errors into a uniform `OutbreakError` outcome.
///
/// Rules:
/// - If `attempted_any` is false → `Unsupported(capability)`.
/// - If exactly one provider failed → that provider's error, unchanged.
/// - Else → `AllProvidersFailed(errors)`.
pub fn collapse_errors(
    capability: Capability,
    attempted_any: bool,
    mut errors: Vec<OutbreakError>,
) -> OutbreakError {
    if !attempted_any {
        return OutbreakError::unsupported(capability.as_str());
    }
    if errors.len() == 1
        && let Some(only) = errors.pop()
    {
        return only;
    }
    OutbreakError::AllProvidersFailed(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_errors_unsupported_when_no_attempts() {
        let e = collapse_errors(Capability::Snapshot, false, vec![]);
        match e {
            OutbreakError::Unsupported { capability } => {
                assert_eq!(capability, Capability::Snapshot.as_str());
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn collapse_errors_single_failure_is_unwrapped() {
        let err = OutbreakError::http("p1", 404);
        let e = collapse_errors(Capability::History, true, vec![err.clone()]);
        assert_eq!(e, err);
        assert!(e.is_not_found());
    }

    #[test]
    fn collapse_errors_many_maps_to_all_failed() {
        let errors = vec![
            OutbreakError::http("p1", 404),
            OutbreakError::provider_timeout("p2", "snapshot"),
        ];
        let e = collapse_errors(Capability::Snapshot, true, errors.clone());
        match e {
            OutbreakError::AllProvidersFailed(es) => assert_eq!(es, errors),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn collapse_errors_all_not_found_stays_not_found() {
        let errors = vec![OutbreakError::http("p1", 404), OutbreakError::http("p2", 404)];
        assert!(collapse_errors(Capability::Snapshot, true, errors).is_not_found());
    }
}
