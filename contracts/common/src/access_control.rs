//! Access Control Module
//!
//! Role-based permissions for the administrative surface of a vault:
//! retargeting the validator, maintaining the deposit floor and managing
//! roles themselves.
//!
//! ## Key Features
//!
//! - **Role-Based Access**: Admin and Operator roles ranked by priority
//! - **Permission Mapping**: Each permission names the least role allowed
//! - **Founding Admin**: The admin set at construction can never lose Admin

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use crate::types::EvmAddress;
use crate::{StakePoolError, StakePoolResult, Vec};

// ============================================================================
// Types
// ============================================================================

/// Vault roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum Role {
    /// Can do anything, including managing roles
    Admin,
    /// Can retarget the validator
    Operator,
}

impl Role {
    /// Get role priority (higher = more powerful)
    pub fn priority(&self) -> u8 {
        match self {
            Role::Admin => 100,
            Role::Operator => 50,
        }
    }
}

/// Permission types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Move the position to another validator slot
    SetValidator,
    /// Change the minimum deposit
    SetMinDeposit,
    /// Grant or revoke roles
    ManageRoles,
}

impl Permission {
    /// Get minimum role required for this permission
    pub fn min_role(&self) -> Role {
        match self {
            Permission::SetValidator => Role::Operator,
            Permission::SetMinDeposit | Permission::ManageRoles => Role::Admin,
        }
    }
}

/// Role assignment for an address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    /// Address with the role
    pub address: EvmAddress,
    /// Assigned role
    pub role: Role,
    /// Address that granted the role
    pub granted_by: EvmAddress,
}

/// Role-check capability consulted by privileged entry points
pub trait Authorizer {
    /// Returns true if `address` may exercise `permission`
    fn is_authorized(&self, address: &EvmAddress, permission: Permission) -> bool;
}

/// Access control state
#[derive(Debug, Clone)]
pub struct AccessControlState {
    /// Founding admin address
    pub founding_admin: EvmAddress,
    /// Role assignments
    pub roles: Vec<RoleAssignment>,
}

impl AccessControlState {
    /// Create new access control state with a founding admin
    pub fn new(founding_admin: EvmAddress) -> Self {
        let mut roles = Vec::new();
        roles.push(RoleAssignment {
            address: founding_admin,
            role: Role::Admin,
            granted_by: founding_admin,
        });

        Self {
            founding_admin,
            roles,
        }
    }
}

impl Authorizer for AccessControlState {
    fn is_authorized(&self, address: &EvmAddress, permission: Permission) -> bool {
        has_permission(self, address, permission)
    }
}

// ============================================================================
// Core Access Control Functions
// ============================================================================

/// Check if address has a specific role
pub fn has_role(state: &AccessControlState, address: &EvmAddress, role: Role) -> bool {
    state
        .roles
        .iter()
        .any(|r| r.address == *address && r.role == role)
}

/// Check if address has permission for action
pub fn has_permission(state: &AccessControlState, address: &EvmAddress, permission: Permission) -> bool {
    let min_priority = permission.min_role().priority();

    state
        .roles
        .iter()
        .any(|r| r.address == *address && r.role.priority() >= min_priority)
}

/// Require permission or fail with `Unauthorized`
pub fn require_permission<A: Authorizer + ?Sized>(
    authorizer: &A,
    caller: &EvmAddress,
    permission: Permission,
) -> StakePoolResult<()> {
    if !authorizer.is_authorized(caller, permission) {
        return Err(StakePoolError::Unauthorized { caller: *caller });
    }
    Ok(())
}

/// Grant a role to an address
///
/// Returns `false` if the grantee already held the role.
pub fn grant_role(
    state: &mut AccessControlState,
    granter: EvmAddress,
    grantee: EvmAddress,
    role: Role,
) -> StakePoolResult<bool> {
    if !has_permission(state, &granter, Permission::ManageRoles) {
        return Err(StakePoolError::AdminOnly);
    }

    if grantee == [0u8; 20] {
        return Err(StakePoolError::InvalidAddress {
            reason: "cannot grant a role to the zero address",
        });
    }

    if has_role(state, &grantee, role) {
        return Ok(false);
    }

    state.roles.push(RoleAssignment {
        address: grantee,
        role,
        granted_by: granter,
    });

    Ok(true)
}

/// Revoke a role from an address
///
/// Returns `false` if the target did not hold the role.
pub fn revoke_role(
    state: &mut AccessControlState,
    revoker: EvmAddress,
    target: EvmAddress,
    role: Role,
) -> StakePoolResult<bool> {
    // Can't strip the founding admin
    if target == state.founding_admin && role == Role::Admin {
        return Err(StakePoolError::InvalidOperation);
    }

    if !has_permission(state, &revoker, Permission::ManageRoles) {
        return Err(StakePoolError::AdminOnly);
    }

    let before = state.roles.len();
    state.roles.retain(|r| !(r.address == target && r.role == role));

    Ok(state.roles.len() != before)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> EvmAddress {
        [1u8; 20]
    }

    fn operator() -> EvmAddress {
        [2u8; 20]
    }

    fn outsider() -> EvmAddress {
        [3u8; 20]
    }

    #[test]
    fn test_founding_admin_has_all_permissions() {
        let state = AccessControlState::new(admin());

        assert!(has_role(&state, &admin(), Role::Admin));
        assert!(has_permission(&state, &admin(), Permission::SetValidator));
        assert!(has_permission(&state, &admin(), Permission::SetMinDeposit));
        assert!(has_permission(&state, &admin(), Permission::ManageRoles));
    }

    #[test]
    fn test_operator_only_sets_validator() {
        let mut state = AccessControlState::new(admin());
        assert!(grant_role(&mut state, admin(), operator(), Role::Operator).unwrap());

        assert!(has_permission(&state, &operator(), Permission::SetValidator));
        assert!(!has_permission(&state, &operator(), Permission::SetMinDeposit));
        assert!(!has_permission(&state, &operator(), Permission::ManageRoles));
    }

    #[test]
    fn test_grant_is_idempotent() {
        let mut state = AccessControlState::new(admin());
        assert!(grant_role(&mut state, admin(), operator(), Role::Operator).unwrap());
        assert!(!grant_role(&mut state, admin(), operator(), Role::Operator).unwrap());
        assert_eq!(state.roles.len(), 2);
    }

    #[test]
    fn test_non_admin_cannot_grant() {
        let mut state = AccessControlState::new(admin());
        grant_role(&mut state, admin(), operator(), Role::Operator).unwrap();

        let result = grant_role(&mut state, operator(), outsider(), Role::Operator);
        assert_eq!(result, Err(StakePoolError::AdminOnly));
    }

    #[test]
    fn test_revoke_role() {
        let mut state = AccessControlState::new(admin());
        grant_role(&mut state, admin(), operator(), Role::Operator).unwrap();

        assert!(revoke_role(&mut state, admin(), operator(), Role::Operator).unwrap());
        assert!(!has_permission(&state, &operator(), Permission::SetValidator));
        assert!(!revoke_role(&mut state, admin(), operator(), Role::Operator).unwrap());
    }

    #[test]
    fn test_founding_admin_cannot_be_revoked() {
        let mut state = AccessControlState::new(admin());
        let result = revoke_role(&mut state, admin(), admin(), Role::Admin);
        assert_eq!(result, Err(StakePoolError::InvalidOperation));
    }

    #[test]
    fn test_require_permission() {
        let state = AccessControlState::new(admin());
        assert!(require_permission(&state, &admin(), Permission::SetValidator).is_ok());
        assert_eq!(
            require_permission(&state, &outsider(), Permission::SetValidator),
            Err(StakePoolError::Unauthorized { caller: outsider() })
        );
    }
}
