//! Role table implementing the permission checker.

use std::collections::{HashMap, HashSet};

use alloy_primitives::Address;
use parking_lot::RwLock;

use crate::port::outbound::access::{AccessControl, Operation};

/// Grants operations to callers explicitly; everything else is denied.
#[derive(Default)]
pub struct RoleAccessControl {
    grants: RwLock<HashMap<Address, HashSet<Operation>>>,
}

impl RoleAccessControl {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&self, caller: Address, operation: Operation) {
        self.grants.write().entry(caller).or_default().insert(operation);
    }

    /// Grant every administrative operation to `caller`.
    pub fn grant_all(&self, caller: Address) {
        let mut grants = self.grants.write();
        grants.entry(caller).or_default().extend(Operation::ALL);
    }

    pub fn revoke(&self, caller: Address, operation: Operation) {
        if let Some(ops) = self.grants.write().get_mut(&caller) {
            ops.remove(&operation);
        }
    }
}

impl AccessControl for RoleAccessControl {
    fn is_allowed(&self, caller: Address, operation: Operation) -> bool {
        self.grants
            .read()
            .get(&caller)
            .is_some_and(|ops| ops.contains(&operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grants_are_per_operation() {
        let access = RoleAccessControl::new();
        let admin = Address::repeat_byte(1);
        access.grant(admin, Operation::SetTokenConfig);

        assert!(access.is_allowed(admin, Operation::SetTokenConfig));
        assert!(!access.is_allowed(admin, Operation::SetTrustedKeeper));

        access.revoke(admin, Operation::SetTokenConfig);
        assert!(!access.is_allowed(admin, Operation::SetTokenConfig));
    }

    #[test]
    fn grant_all_covers_every_operation() {
        let access = RoleAccessControl::new();
        let admin = Address::repeat_byte(1);
        access.grant_all(admin);
        assert!(Operation::ALL.iter().all(|op| access.is_allowed(admin, *op)));
    }
}
