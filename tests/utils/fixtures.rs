//! Full deployment of the commitment stack on a test environment
use crate::utils::constants::*;
use access_policy::{AccessPolicyContract, AccessPolicyContractClient, Scope, Subject, TriState};
use capability::{
    ROLE_LOCKED_ACCOUNT_ADMIN, ROLE_PLATFORM_OPERATOR, ROLE_RECLAIMER, ROLE_REWARD_ISSUER,
    ROLE_WHITELIST_ADMIN,
};
use commitment::{
    CommitmentConfig, CommitmentContract, CommitmentContractClient, Phase, ValueKind,
    PUBLIC_DURATION, WHITELIST_DURATION,
};
use fp_math::DECIMAL_ONE;
use reward_token::{RewardToken, RewardTokenClient, TokenConfig};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{Address, Env, String};
use vesting_ledger::{LedgerConfig, VestingLedger, VestingLedgerClient};

/// Deployment knobs
#[derive(Clone, Debug)]
pub struct DeploymentOptions {
    pub cap: u128,
    pub min_ticket: u128,
    pub native_rate: u128,
    pub penalty_fraction: u128,
    /// Deploy a successor native ledger and enable migration to it before locking starts.
    pub with_successor: bool,
}

impl Default for DeploymentOptions {
    fn default() -> Self {
        Self {
            cap: 1_000_000_000 * E,
            min_ticket: E,
            native_rate: DECIMAL_ONE,
            penalty_fraction: DECIMAL_ONE / 10,
            with_successor: false,
        }
    }
}

pub struct Deployment {
    pub env: Env,
    pub admin: Address,
    pub platform: Address,
    pub policy: AccessPolicyContractClient<'static>,
    pub reward: RewardTokenClient<'static>,
    pub native: Address,
    pub stable: Address,
    pub native_ledger: VestingLedgerClient<'static>,
    pub stable_ledger: VestingLedgerClient<'static>,
    pub successor: Option<VestingLedgerClient<'static>>,
    pub engine: CommitmentContractClient<'static>,
}

impl Deployment {
    pub fn new() -> Self {
        Self::with_options(DeploymentOptions::default())
    }

    pub fn with_options(options: DeploymentOptions) -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.budget().reset_unlimited();
        env.ledger().with_mut(|l| {
            l.timestamp = NOW;
            l.sequence_number = 10;
        });

        let policy = AccessPolicyContractClient::new(
            &env,
            &env.register_contract(None, AccessPolicyContract),
        );
        let admin = Address::generate(&env);
        policy.initialize(&admin);
        for role in [
            ROLE_WHITELIST_ADMIN,
            ROLE_LOCKED_ACCOUNT_ADMIN,
            ROLE_RECLAIMER,
            ROLE_PLATFORM_OPERATOR,
        ] {
            policy.set_user_role(
                &admin,
                &Subject::Account(admin.clone()),
                &role,
                &Scope::Global,
                &TriState::Allow,
            );
        }

        let engine = CommitmentContractClient::new(
            &env,
            &env.register_contract(None, CommitmentContract),
        );
        let reward = RewardTokenClient::new(&env, &env.register_contract(None, RewardToken));
        reward.initialize(&TokenConfig {
            policy: policy.address.clone(),
            name: String::from_str(&env, "Reward"),
            symbol: String::from_str(&env, "RWD"),
        });
        policy.set_user_role(
            &admin,
            &Subject::Account(engine.address.clone()),
            &ROLE_REWARD_ISSUER,
            &Scope::Object(reward.address.clone()),
            &TriState::Allow,
        );

        let issuer = Address::generate(&env);
        let native = env.register_stellar_asset_contract_v2(issuer.clone()).address();
        let stable = env.register_stellar_asset_contract_v2(issuer).address();
        let platform = Address::generate(&env);

        let ledger_config = |asset: &Address| LedgerConfig {
            policy: policy.address.clone(),
            asset_token: asset.clone(),
            reward_token: reward.address.clone(),
            lock_duration: LOCK_DURATION,
            penalty_fraction: options.penalty_fraction,
            penalty_disbursal: platform.clone(),
        };
        let native_ledger = deploy_ledger(&env, &ledger_config(&native));
        let stable_ledger = deploy_ledger(&env, &ledger_config(&stable));

        let successor = if options.with_successor {
            let successor = deploy_ledger(&env, &ledger_config(&native));
            successor.set_migration_source(&admin, &native_ledger.address);
            native_ledger.enable_migration(&admin, &successor.address);
            Some(successor)
        } else {
            None
        };

        native_ledger.set_controller(&admin, &engine.address);
        stable_ledger.set_controller(&admin, &engine.address);

        engine.initialize(&CommitmentConfig {
            policy: policy.address.clone(),
            reward_token: reward.address.clone(),
            native_token: native.clone(),
            stable_token: stable.clone(),
            native_ledger: native_ledger.address.clone(),
            stable_ledger: stable_ledger.address.clone(),
            platform_wallet: platform.clone(),
            start_date: START,
            cap: options.cap,
            min_ticket: options.min_ticket,
            native_rate: options.native_rate,
        });
        engine.amend_agreement(&admin, &String::from_str(&env, "ipfs:commitment-agreement"));

        Self {
            env,
            admin,
            platform,
            policy,
            reward,
            native,
            stable,
            native_ledger,
            stable_ledger,
            successor,
            engine,
        }
    }

    pub fn token(&self, kind: ValueKind) -> &Address {
        match kind {
            ValueKind::Native => &self.native,
            ValueKind::Stable => &self.stable,
        }
    }

    /// New contributor holding `amount` of the `kind` token
    pub fn contributor(&self, kind: ValueKind, amount: u128) -> Address {
        let who = Address::generate(&self.env);
        StellarAssetClient::new(&self.env, self.token(kind)).mint(&who, &(amount as i128));
        who
    }

    pub fn balance(&self, kind: ValueKind, who: &Address) -> u128 {
        TokenClient::new(&self.env, self.token(kind)).balance(who) as u128
    }

    pub fn reward_balance(&self, who: &Address) -> u128 {
        self.reward.balance(who) as u128
    }

    /// Lets `ledger` burn `who`'s reward on unlock
    pub fn approve_reward(&self, who: &Address, ledger: &Address, amount: u128) {
        self.reward.approve(who, ledger, &(amount as i128), &100_000);
    }

    pub fn phase_start(phase: Phase) -> u64 {
        match phase {
            Phase::Before => NOW,
            Phase::Whitelist => START,
            Phase::Public => START + WHITELIST_DURATION,
            Phase::Finished => START + WHITELIST_DURATION + PUBLIC_DURATION,
        }
    }

    pub fn go_to(&self, phase: Phase) {
        self.set_time(Self::phase_start(phase));
    }

    pub fn set_time(&self, timestamp: u64) {
        self.env.ledger().with_mut(|l| l.timestamp = timestamp);
    }
}

impl Default for Deployment {
    fn default() -> Self {
        Self::new()
    }
}

pub fn deploy_ledger(env: &Env, config: &LedgerConfig) -> VestingLedgerClient<'static> {
    let ledger = VestingLedgerClient::new(env, &env.register_contract(None, VestingLedger));
    ledger.initialize(config);
    ledger
}
