use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[derive(Clone)]
#[contracttype]
pub struct MintEvent {
    pub minter: Address,
    pub to: Address,
    pub amount: i128,
}

#[derive(Clone)]
#[contracttype]
pub struct ApproveEvent {
    pub amount: i128,
    pub expiration_ledger: u32,
}

pub fn minted(env: &Env, event: MintEvent) {
    env.events()
        .publish((symbol_short!("mint"), event.to.clone()), event);
}

pub fn transferred(env: &Env, from: &Address, to: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("transfer"), from.clone(), to.clone()), amount);
}

pub fn approved(env: &Env, from: &Address, spender: &Address, event: ApproveEvent) {
    env.events()
        .publish((symbol_short!("approve"), from.clone(), spender.clone()), event);
}

pub fn burned(env: &Env, from: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("burn"), from.clone()), amount);
}
