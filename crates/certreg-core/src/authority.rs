//! Set-once authority gate.

use crate::error::{RegistryError, RegistryResult};
use crate::identity::Principal;

/// The designated authority that receives mint fees.
///
/// The only legal transition is `Unconfigured -> Configured`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthorityGate {
    #[default]
    Unconfigured,
    Configured(Principal),
}

impl AuthorityGate {
    /// Store `identity` as the authority. First writer wins, permanently.
    pub fn configure(&mut self, identity: Principal) -> RegistryResult<()> {
        if identity.is_null() {
            return Err(RegistryError::InvalidAuthorityIdentity);
        }
        match self {
            AuthorityGate::Configured(_) => Err(RegistryError::AlreadyConfigured),
            AuthorityGate::Unconfigured => {
                *self = AuthorityGate::Configured(identity);
                Ok(())
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, AuthorityGate::Configured(_))
    }

    pub fn authority(&self) -> Option<&Principal> {
        match self {
            AuthorityGate::Configured(identity) => Some(identity),
            AuthorityGate::Unconfigured => None,
        }
    }

    /// The configured authority, or `AuthorityNotVerified`.
    pub fn require(&self) -> RegistryResult<&Principal> {
        self.authority().ok_or(RegistryError::AuthorityNotVerified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configure_is_set_once() {
        let mut gate = AuthorityGate::default();
        assert!(!gate.is_configured());
        gate.configure(Principal::from("ST2TEST"))
            .expect("first configure should succeed");
        assert_eq!(
            gate.configure(Principal::from("ST3OTHER")),
            Err(RegistryError::AlreadyConfigured)
        );
        assert_eq!(
            gate.configure(Principal::from("ST2TEST")),
            Err(RegistryError::AlreadyConfigured)
        );
        assert_eq!(gate.authority(), Some(&Principal::from("ST2TEST")));
    }

    #[test]
    fn null_identity_is_rejected() {
        let mut gate = AuthorityGate::default();
        assert_eq!(
            gate.configure(Principal::null()),
            Err(RegistryError::InvalidAuthorityIdentity)
        );
        assert_eq!(gate, AuthorityGate::Unconfigured);
        assert_eq!(gate.require(), Err(RegistryError::AuthorityNotVerified));
    }
}
