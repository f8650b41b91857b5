//! Validator Resolver
//!
//! Looks up the current validator's key from the registry on every call.
//! Nothing is cached, so a migration takes effect on the very next request.

use std::rc::Rc;

use stakepool_common::{
    errors::{StakePoolError, StakePoolResult},
    interfaces::ValidatorRegistry,
    types::{NetUid, ValidatorKey, ValidatorUid},
};

/// Registry-backed resolver for validator slots
#[derive(Clone)]
pub struct ValidatorResolver {
    registry: Rc<dyn ValidatorRegistry>,
}

impl ValidatorResolver {
    pub fn new(registry: Rc<dyn ValidatorRegistry>) -> Self {
        Self { registry }
    }

    /// Resolve `uid` in subnet `netuid`, failing with `UnknownValidator`
    pub fn resolve(&self, netuid: NetUid, uid: ValidatorUid) -> StakePoolResult<ValidatorKey> {
        self.registry
            .get_hotkey(netuid, uid)
            .ok_or(StakePoolError::UnknownValidator { netuid, uid })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockSubtensor, HOTKEY_0, HOTKEY_1, NETUID};

    #[test]
    fn test_resolve_is_stable() {
        let mock = Rc::new(MockSubtensor::new([9u8; 32]));
        let resolver = ValidatorResolver::new(mock);

        assert_eq!(resolver.resolve(NETUID, 0), Ok(HOTKEY_0));
        assert_eq!(resolver.resolve(NETUID, 0), resolver.resolve(NETUID, 0));
        assert_eq!(resolver.resolve(NETUID, 1), Ok(HOTKEY_1));
    }

    #[test]
    fn test_unknown_slot() {
        let mock = Rc::new(MockSubtensor::new([9u8; 32]));
        let resolver = ValidatorResolver::new(mock);

        assert_eq!(
            resolver.resolve(NETUID, 77),
            Err(StakePoolError::UnknownValidator { netuid: NETUID, uid: 77 })
        );
        assert!(resolver.resolve(NETUID + 1, 0).is_err());
    }

    #[test]
    fn test_reads_live_registry() {
        let mock = Rc::new(MockSubtensor::new([9u8; 32]));
        let resolver = ValidatorResolver::new(mock.clone());

        mock.deregister(NETUID, 0);
        assert!(resolver.resolve(NETUID, 0).is_err());
    }
}
