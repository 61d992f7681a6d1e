// Path: crates/monitor/src/maintainers.rs
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use vigil_api::{cancellable, MaintainerSource};
use vigil_types::app::{AccountAddress, MaintainerVerdict};
use vigil_types::config::MonitorConfig;
use vigil_types::error::CheckError;

/// Audits whether the validator is in the maintainer set of every chain.
///
/// Unlike liveness there is no partial reading: any failed lookup aborts the audit.
pub struct MaintainerAuditor {
    source: Arc<dyn MaintainerSource>,
    validator: AccountAddress,
    except_chains: HashSet<String>,
}

impl MaintainerAuditor {
    pub fn new<I, S>(source: Arc<dyn MaintainerSource>, validator: AccountAddress, except_chains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            source,
            validator,
            except_chains: except_chains
                .into_iter()
                .map(|c| c.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn from_config(
        source: Arc<dyn MaintainerSource>,
        cfg: &MonitorConfig,
    ) -> Result<Self, CheckError> {
        Ok(Self::new(source, cfg.validator()?, &cfg.general.except_chains))
    }

    fn is_excepted(&self, chain: &str) -> bool {
        self.except_chains.contains(&chain.to_lowercase())
    }

    pub async fn audit(&self, cancel: &CancellationToken) -> Result<MaintainerVerdict, CheckError> {
        let chains = cancellable(cancel, self.source.chains()).await?;
        let mut per_chain = BTreeMap::new();
        let mut excepted = BTreeSet::new();
        for chain in chains {
            if self.is_excepted(&chain) {
                tracing::debug!(target: "maintainers", chain = %chain, "excepted");
                excepted.insert(chain.clone());
                per_chain.insert(chain, true);
                continue;
            }
            let maintainers = cancellable(cancel, self.source.chain_maintainers(&chain)).await?;
            let present = maintainers.contains(&self.validator);
            if !present {
                tracing::warn!(target: "maintainers", chain = %chain, "validator is not a maintainer");
            }
            per_chain.insert(chain, present);
        }
        let verdict = MaintainerVerdict::from_results(per_chain).with_excepted(excepted);
        tracing::info!(
            target: "maintainers",
            chains = verdict.per_chain.len(),
            status = verdict.status,
            "maintainer audit complete"
        );
        Ok(verdict)
    }
}

impl std::fmt::Debug for MaintainerAuditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaintainerAuditor")
            .field("validator", &self.validator)
            .field("except_chains", &self.except_chains)
            .finish_non_exhaustive()
    }
}
