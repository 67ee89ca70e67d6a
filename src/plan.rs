use std::collections::HashMap;

use async_trait::async_trait;
use eyre::{Context, ContextCompat};
use tracing::{info, instrument};

use crate::forge_utils::ContractSpec;
use crate::report::contract_deployment::ContractDeployment;

/// A constructor argument of a deployment unit. `AddressOf` names another
/// unit and resolves to that unit's deployed address, which also makes the
/// named unit a dependency of this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructorArg {
    Literal(String),
    AddressOf(String),
}

/// A named request to instantiate one contract with fixed constructor
/// arguments.
#[derive(Debug, Clone)]
pub struct DeploymentUnit {
    pub name: String,
    pub contract: ContractSpec,
    pub constructor_args: Vec<ConstructorArg>,
}

impl DeploymentUnit {
    pub fn new(name: impl ToString, contract: ContractSpec) -> Self {
        Self {
            name: name.to_string(),
            contract,
            constructor_args: vec![],
        }
    }

    pub fn with_constructor_arg(mut self, arg: ConstructorArg) -> Self {
        self.constructor_args.push(arg);
        self
    }

    fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.constructor_args.iter().filter_map(|arg| match arg {
            ConstructorArg::AddressOf(unit) => Some(unit.as_str()),
            ConstructorArg::Literal(_) => None,
        })
    }
}

/// The capability a plan needs from its surroundings: instantiate a named
/// contract with resolved constructor arguments and hand back the deployed
/// handle.
#[async_trait]
pub trait DeployEngine: Send + Sync {
    async fn instantiate(
        &self,
        unit: &DeploymentUnit,
        constructor_args: &[String],
    ) -> eyre::Result<ContractDeployment>;
}

/// Unit name to deployed handle. Only produced once every unit of a plan has
/// resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploymentResult {
    handles: HashMap<String, ContractDeployment>,
}

impl DeploymentResult {
    pub fn get(&self, unit: &str) -> Option<&ContractDeployment> {
        self.handles.get(unit)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// An explicit directed graph of deployment units. `AddressOf` constructor
/// arguments form the edges. Execution follows a topological order that
/// preserves declaration order among units whose dependencies are already
/// resolved.
#[derive(Debug, Clone, Default)]
pub struct DeploymentPlan {
    units: Vec<DeploymentUnit>,
}

impl DeploymentPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unit(mut self, unit: DeploymentUnit) -> Self {
        self.units.push(unit);
        self
    }

    pub fn units(&self) -> &[DeploymentUnit] {
        &self.units
    }

    pub fn execution_order(&self) -> eyre::Result<Vec<&DeploymentUnit>> {
        for (idx, unit) in self.units.iter().enumerate() {
            if self.units[..idx].iter().any(|other| other.name == unit.name) {
                eyre::bail!("duplicate deployment unit: {}", unit.name);
            }

            for dep in unit.dependencies() {
                if !self.units.iter().any(|other| other.name == dep) {
                    eyre::bail!(
                        "unit {} references unknown unit {dep}",
                        unit.name
                    );
                }
            }
        }

        let mut order = Vec::with_capacity(self.units.len());
        let mut resolved = vec![false; self.units.len()];

        while order.len() < self.units.len() {
            let next = (0..self.units.len()).find(|&idx| {
                !resolved[idx]
                    && self.units[idx].dependencies().all(|dep| {
                        self.units
                            .iter()
                            .zip(&resolved)
                            .any(|(unit, done)| *done && unit.name == dep)
                    })
            });

            let Some(idx) = next else {
                let remaining = self
                    .units
                    .iter()
                    .zip(&resolved)
                    .filter(|(_, done)| !**done)
                    .map(|(unit, _)| unit.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");

                eyre::bail!(
                    "dependency cycle between deployment units: {remaining}"
                );
            };

            resolved[idx] = true;
            order.push(&self.units[idx]);
        }

        Ok(order)
    }

    /// Sub-plan containing `unit` and its transitive dependencies, in the
    /// original declaration order.
    pub fn restricted_to(&self, unit: &str) -> eyre::Result<DeploymentPlan> {
        let mut keep: Vec<&str> = vec![];
        let mut pending = vec![unit];

        while let Some(name) = pending.pop() {
            if keep.contains(&name) {
                continue;
            }

            let found = self
                .units
                .iter()
                .find(|unit| unit.name == name)
                .with_context(|| format!("unknown deployment unit: {name}"))?;

            keep.push(name);
            pending.extend(found.dependencies());
        }

        Ok(DeploymentPlan {
            units: self
                .units
                .iter()
                .filter(|unit| keep.contains(&unit.name.as_str()))
                .cloned()
                .collect(),
        })
    }

    /// Runs every unit through the engine. Any failure fails the whole plan;
    /// partial results never escape.
    #[instrument(skip_all)]
    pub async fn execute<E>(&self, engine: &E) -> eyre::Result<DeploymentResult>
    where
        E: DeployEngine + ?Sized,
    {
        let order = self.execution_order()?;

        let mut result = DeploymentResult::default();

        for unit in order {
            let constructor_args = self.resolve_args(unit, &result)?;

            info!("Deploying {}", unit.name);

            let handle = engine
                .instantiate(unit, &constructor_args)
                .await
                .with_context(|| format!("deploying {}", unit.name))?;

            result.handles.insert(unit.name.clone(), handle);
        }

        Ok(result)
    }

    fn resolve_args(
        &self,
        unit: &DeploymentUnit,
        result: &DeploymentResult,
    ) -> eyre::Result<Vec<String>> {
        unit.constructor_args
            .iter()
            .map(|arg| match arg {
                ConstructorArg::Literal(value) => Ok(value.clone()),
                ConstructorArg::AddressOf(dep) => {
                    let handle = result.get(dep).with_context(|| {
                        format!(
                            "unit {} resolved before its dependency {dep}",
                            unit.name
                        )
                    })?;

                    Ok(format!("{:?}", handle.address))
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicU64, Ordering};

    use ethers::types::{Address, H256};
    use maplit::hashset;
    use tokio::sync::Mutex;

    use super::*;

    struct StubEngine {
        fail: HashSet<String>,
        next_address: AtomicU64,
        calls: Mutex<Vec<(String, Vec<String>)>>,
    }

    impl StubEngine {
        fn new() -> Self {
            Self::failing(hashset! {})
        }

        fn failing(fail: HashSet<String>) -> Self {
            Self {
                fail,
                next_address: AtomicU64::new(1),
                calls: Mutex::new(vec![]),
            }
        }

        async fn recorded_calls(&self) -> Vec<(String, Vec<String>)> {
            self.calls.lock().await.clone()
        }
    }

    #[async_trait]
    impl DeployEngine for StubEngine {
        async fn instantiate(
            &self,
            unit: &DeploymentUnit,
            constructor_args: &[String],
        ) -> eyre::Result<ContractDeployment> {
            self.calls
                .lock()
                .await
                .push((unit.name.clone(), constructor_args.to_vec()));

            if self.fail.contains(&unit.name) {
                eyre::bail!("instantiation failed for {}", unit.name);
            }

            let n = self.next_address.fetch_add(1, Ordering::SeqCst);

            Ok(ContractDeployment {
                address: Address::from_low_u64_be(n),
                transaction_hash: H256::from_low_u64_be(n),
            })
        }
    }

    fn unit(name: &str) -> DeploymentUnit {
        DeploymentUnit::new(name, ContractSpec::name(name))
    }

    fn two_unit_plan() -> DeploymentPlan {
        DeploymentPlan::new()
            .with_unit(unit("Token"))
            .with_unit(unit("Market"))
    }

    #[tokio::test]
    async fn both_units_resolve_in_declaration_order() {
        let engine = StubEngine::new();

        let result = two_unit_plan().execute(&engine).await.unwrap();

        assert_eq!(result.len(), 2);
        assert!(result.get("Token").is_some());
        assert!(result.get("Market").is_some());

        let calls = engine.recorded_calls().await;
        assert_eq!(calls[0].0, "Token");
        assert_eq!(calls[1].0, "Market");
    }

    #[tokio::test]
    async fn first_failure_aborts_the_whole_plan() {
        let engine = StubEngine::failing(hashset! { "Token".to_string() });

        let err = two_unit_plan().execute(&engine).await.unwrap_err();
        assert!(err.to_string().contains("Token"));

        // the second unit is never even attempted
        assert_eq!(engine.recorded_calls().await.len(), 1);
    }

    #[tokio::test]
    async fn address_references_order_execution_and_resolve() {
        // Market is declared first but depends on Token
        let plan = DeploymentPlan::new()
            .with_unit(unit("Market").with_constructor_arg(
                ConstructorArg::AddressOf("Token".to_string()),
            ))
            .with_unit(unit("Token"));

        let engine = StubEngine::new();
        let result = plan.execute(&engine).await.unwrap();

        let calls = engine.recorded_calls().await;
        assert_eq!(calls[0].0, "Token");
        assert_eq!(calls[1].0, "Market");

        let token_address = result.get("Token").unwrap().address;
        assert_eq!(calls[1].1, vec![format!("{token_address:?}")]);
    }

    #[tokio::test]
    async fn literal_args_pass_through_unchanged() {
        let plan = DeploymentPlan::new().with_unit(
            unit("Token").with_constructor_arg(ConstructorArg::Literal(
                "ArtBidex".to_string(),
            )),
        );

        let engine = StubEngine::new();
        plan.execute(&engine).await.unwrap();

        let calls = engine.recorded_calls().await;
        assert_eq!(calls[0].1, vec!["ArtBidex".to_string()]);
    }

    #[test]
    fn unknown_references_are_rejected() {
        let plan = DeploymentPlan::new().with_unit(
            unit("Market").with_constructor_arg(ConstructorArg::AddressOf(
                "Nowhere".to_string(),
            )),
        );

        let err = plan.execution_order().unwrap_err();
        assert!(err.to_string().contains("unknown unit Nowhere"));
    }

    #[test]
    fn cycles_are_rejected() {
        let plan = DeploymentPlan::new()
            .with_unit(unit("A").with_constructor_arg(
                ConstructorArg::AddressOf("B".to_string()),
            ))
            .with_unit(unit("B").with_constructor_arg(
                ConstructorArg::AddressOf("A".to_string()),
            ));

        let err = plan.execution_order().unwrap_err();
        assert!(err.to_string().contains("cycle"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let plan = DeploymentPlan::new()
            .with_unit(unit("Token"))
            .with_unit(unit("Token"));

        let err = plan.execution_order().unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn restriction_keeps_transitive_dependencies() {
        let plan = DeploymentPlan::new()
            .with_unit(unit("Token"))
            .with_unit(unit("Market").with_constructor_arg(
                ConstructorArg::AddressOf("Token".to_string()),
            ))
            .with_unit(unit("Auction"));

        let market_only = plan.restricted_to("Market").unwrap();
        let names: Vec<_> = market_only
            .units()
            .iter()
            .map(|unit| unit.name.as_str())
            .collect();
        assert_eq!(names, vec!["Token", "Market"]);

        let auction_only = plan.restricted_to("Auction").unwrap();
        assert_eq!(auction_only.units().len(), 1);

        assert!(plan.restricted_to("Nowhere").is_err());
    }

    #[tokio::test]
    async fn repeated_runs_are_independent() {
        let plan = two_unit_plan();

        let first_engine = StubEngine::new();
        let first = plan.execute(&first_engine).await.unwrap();

        let second_engine = StubEngine::new();
        let second = plan.execute(&second_engine).await.unwrap();

        assert!(!first.is_empty());
        assert_eq!(first, second);
        assert_eq!(first_engine.recorded_calls().await.len(), 2);
        assert_eq!(second_engine.recorded_calls().await.len(), 2);
    }
}
