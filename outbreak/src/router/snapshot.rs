use outbreak_core::validate::validate_code;
use outbreak_core::{Capability, CountrySnapshot, OutbreakError};

use crate::Outbreak;
use crate::router::macros::outbreak_router_method;

impl Outbreak {
    outbreak_router_method! {
        /// Fetch the current snapshot for one country.
        ///
        /// Blank codes fail with `InvalidArg` before any connector is called. The
        /// code is trimmed before lookup.
        method: snapshot(code: &str) -> CountrySnapshot,
        accessor: as_snapshot_provider,
        capability: Capability::Snapshot,
        pre: {
            let code = validate_code(code)?;
        },
        call: snapshot(code)
    }

    /// Fetch snapshots for several countries concurrently.
    ///
    /// Returns `(snapshots, failures)`. Both lists keep the order of `codes`; one
    /// country failing never affects the others.
    pub async fn snapshots(
        &self,
        codes: &[&str],
    ) -> (Vec<CountrySnapshot>, Vec<(String, OutbreakError)>) {
        if codes.is_empty() {
            return (vec![], vec![]);
        }

        let tasks = codes.iter().map(|&code| async move {
            let res = self.snapshot(code).await;
            (code, res)
        });
        let results = futures::future::join_all(tasks).await;

        let mut ok: Vec<CountrySnapshot> = Vec::new();
        let mut failures: Vec<(String, OutbreakError)> = Vec::new();
        for (code, res) in results {
            match res {
                Ok(s) => ok.push(s),
                Err(e) => failures.push((code.to_string(), e)),
            }
        }
        (ok, failures)
    }
}
