use soroban_sdk::{contracttype, Address, Symbol};

/// Setting stored for one `(subject, role, scope)` cell.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
#[repr(u32)]
pub enum TriState {
    Unset = 0,
    Allow = 1,
    Deny = 2,
}

/// Who an entry applies to.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum Subject {
    Everyone,
    Account(Address),
}

/// Which contract an entry applies to.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum Scope {
    Global,
    Object(Address),
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct RoleAssignment {
    pub subject: Subject,
    pub role: Symbol,
    pub scope: Scope,
    pub state: TriState,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubjectTier {
    Account,
    Everyone,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScopeTier {
    Object,
    Global,
}

/// Lookup order for `allowed`; the first cell that is not `Unset` decides.
pub const PRECEDENCE: [(SubjectTier, ScopeTier); 4] = [
    (SubjectTier::Account, ScopeTier::Object),
    (SubjectTier::Account, ScopeTier::Global),
    (SubjectTier::Everyone, ScopeTier::Object),
    (SubjectTier::Everyone, ScopeTier::Global),
];

#[contracttype]
pub enum DataKey {
    Initialized,
    Access(Subject, Symbol, Scope),
    // explicit accounts holding a non-Unset cell for (scope, role)
    Users(Scope, Symbol),
}
