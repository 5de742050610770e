//! CLI tool for deploying and interacting with the lending pool contracts.

use lending_pool_contracts::lending::lending_pool::LendingPool;
use lending_pool_contracts::lending::price_oracle::PriceOracle;
use lending_pool_contracts::tokens::{CollateralToken, PoolAssetToken};
use odra::casper_types::U256;
use odra::prelude::{Address, Addressable};
use odra::host::HostEnv;
use odra::schema::casper_contract_schema::NamedCLType;
use odra_cli::{
    deploy::DeployScript,
    scenario::{Args, Error, Scenario, ScenarioMetadata},
    CommandArg, ContractProvider, DeployedContractsContainer, DeployerExt,
    OdraCli,
};

/// $1.00 quoted with 8 decimals
const INITIAL_PRICE: u64 = 100_000_000;
const PRICE_DECIMALS: u8 = 8;

/// Deploys the pool asset and collateral tokens.
pub struct TokensDeployScript;

impl DeployScript for TokensDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use lending_pool_contracts::tokens::{CollateralTokenInitArgs, PoolAssetTokenInitArgs};

        let _asset = PoolAssetToken::load_or_deploy(
            &env,
            PoolAssetTokenInitArgs {
                name: String::from("Pool Dollar"),
                symbol: String::from("PUSD"),
                decimals: 18,
            },
            container,
            300_000_000_000
        )?;

        let _collateral = CollateralToken::load_or_deploy(
            &env,
            CollateralTokenInitArgs {
                name: String::from("Collateral Token"),
                symbol: String::from("COLL"),
                decimals: 18,
            },
            container,
            300_000_000_000
        )?;

        Ok(())
    }
}

/// Deploys the admin-fed price oracle for the collateral.
pub struct OracleDeployScript;

impl DeployScript for OracleDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use lending_pool_contracts::lending::price_oracle::PriceOracleInitArgs;

        let _oracle = PriceOracle::load_or_deploy(
            &env,
            PriceOracleInitArgs {
                price: U256::from(INITIAL_PRICE),
                decimals: PRICE_DECIMALS,
            },
            container,
            200_000_000_000
        )?;

        Ok(())
    }
}

/// Deploys the lending pool.
/// Requires the tokens and the oracle to be deployed first.
pub struct PoolDeployScript;

impl DeployScript for PoolDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use lending_pool_contracts::lending::lending_pool::LendingPoolInitArgs;

        let asset = container.contract_ref::<PoolAssetToken>(env)?;
        let collateral = container.contract_ref::<CollateralToken>(env)?;
        let oracle = container.contract_ref::<PriceOracle>(env)?;

        let _pool = LendingPool::load_or_deploy(
            &env,
            LendingPoolInitArgs {
                asset_token: asset.address().clone(),
                collateral_token: collateral.address().clone(),
                price_oracle: oracle.address().clone(),
                share_name: String::from("Pool Dollar Lender Share"),
                share_symbol: String::from("lPUSD"),
            },
            container,
            600_000_000_000
        )?;

        Ok(())
    }
}

/// Deploys the complete protocol (tokens + oracle + pool).
pub struct LendingDeployScript;

impl DeployScript for LendingDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        TokensDeployScript.deploy(env, container)?;
        OracleDeployScript.deploy(env, container)?;
        PoolDeployScript.deploy(env, container)?;

        Ok(())
    }
}

/// Scenario to supply the pool asset for lender shares.
pub struct DepositScenario;

impl Scenario for DepositScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new(
                "amount",
                "Amount of the pool asset to deposit",
                NamedCLType::U256,
            ),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut asset = container.contract_ref::<PoolAssetToken>(env)?;
        let mut pool = container.contract_ref::<LendingPool>(env)?;
        let amount = args.get_single::<U256>("amount")?;

        env.set_gas(50_000_000_000);
        asset.try_approve(pool.address().clone(), amount)?;

        env.set_gas(300_000_000_000);
        let shares = pool.try_deposit(amount, U256::zero())?;

        println!("Deposited {} for {} lender shares", amount, shares);
        Ok(())
    }
}

impl ScenarioMetadata for DepositScenario {
    const NAME: &'static str = "deposit";
    const DESCRIPTION: &'static str = "Approves and deposits the pool asset into the lending pool";
}

/// Scenario to publish a new collateral price.
pub struct SetPriceScenario;

impl Scenario for SetPriceScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new(
                "price",
                "Collateral price with 8 decimals",
                NamedCLType::U256,
            ),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut oracle = container.contract_ref::<PriceOracle>(env)?;
        let price = args.get_single::<U256>("price")?;

        env.set_gas(50_000_000_000);
        oracle.try_set_price(price)?;

        println!("Collateral price set to {}", price);
        Ok(())
    }
}

impl ScenarioMetadata for SetPriceScenario {
    const NAME: &'static str = "set-price";
    const DESCRIPTION: &'static str = "Sets the collateral price on the oracle (admin only)";
}

/// Scenario to liquidate an undercollateralized borrower.
pub struct LiquidateScenario;

impl Scenario for LiquidateScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new(
                "borrower",
                "Address of the borrower to liquidate",
                NamedCLType::Key,
            ),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut asset = container.contract_ref::<PoolAssetToken>(env)?;
        let mut pool = container.contract_ref::<LendingPool>(env)?;
        let borrower = args.get_single::<Address>("borrower")?;

        env.set_gas(100_000_000_000);
        pool.try_update()?;
        if !pool.can_liquidate(borrower) {
            println!("Account is healthy, nothing to liquidate");
            return Ok(());
        }

        // Headroom for interest accrued before the liquidation lands
        let owed = pool.debt_value(borrower);
        let allowance = owed + owed / U256::from(1_000);
        env.set_gas(50_000_000_000);
        asset.try_approve(pool.address().clone(), allowance)?;

        env.set_gas(400_000_000_000);
        pool.try_liquidate(borrower)?;

        println!("Liquidated borrower, repaid {}", owed);
        Ok(())
    }
}

impl ScenarioMetadata for LiquidateScenario {
    const NAME: &'static str = "liquidate";
    const DESCRIPTION: &'static str = "Repays a liquidatable account's debt and seizes its collateral";
}

/// Main function to run the CLI tool.
pub fn main() {
    OdraCli::new()
        .about("CLI tool for the lending pool smart contracts")
        // Deploy scripts
        .deploy(TokensDeployScript)
        .deploy(OracleDeployScript)
        .deploy(PoolDeployScript)
        .deploy(LendingDeployScript)
        // Contract references
        .contract::<PoolAssetToken>()
        .contract::<CollateralToken>()
        .contract::<PriceOracle>()
        .contract::<LendingPool>()
        // Scenarios
        .scenario(DepositScenario)
        .scenario(SetPriceScenario)
        .scenario(LiquidateScenario)
        .build()
        .run();
}
