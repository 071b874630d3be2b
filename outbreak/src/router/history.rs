use outbreak_core::validate::{validate_code, validate_days};
use outbreak_core::{Capability, HistoricalSeries, OutbreakError};

use crate::Outbreak;
use crate::router::macros::outbreak_router_method;

impl Outbreak {
    outbreak_router_method! {
        /// Fetch the last `days` days of cumulative counts for one country.
        ///
        /// `days == 0` and blank codes fail with `InvalidArg` before any connector
        /// is called.
        method: history(code: &str, days: u32) -> HistoricalSeries,
        accessor: as_history_provider,
        capability: Capability::History,
        pre: {
            let code = validate_code(code)?;
            let days = validate_days(days)?;
        },
        call: history(code, days)
    }

    outbreak_router_method! {
        /// Fetch the last `days` days of worldwide cumulative counts.
        method: global_history(days: u32) -> HistoricalSeries,
        accessor: as_global_history_provider,
        capability: Capability::GlobalHistory,
        pre: {
            let days = validate_days(days)?;
        },
        call: global_history(days)
    }

    /// Fetch histories for several countries concurrently.
    ///
    /// Returns `(series, failures)`, both in the order of `codes`.
    pub async fn histories(
        &self,
        codes: &[&str],
        days: u32,
    ) -> (Vec<HistoricalSeries>, Vec<(String, OutbreakError)>) {
        if codes.is_empty() {
            return (vec![], vec![]);
        }

        let tasks = codes.iter().map(|&code| async move {
            let res = self.history(code, days).await;
            (code, res)
        });
        let results = futures::future::join_all(tasks).await;

        let mut ok: Vec<HistoricalSeries> = Vec::new();
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
