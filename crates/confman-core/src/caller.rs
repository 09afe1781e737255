//! The caller capability.
//!
//! Operations never look users up themselves. The transport layer
//! authenticates a request and hands over something implementing [`Caller`];
//! the engine only asks it who it is and what role it holds.

use crate::{
  Error, Result,
  model::{Role, User},
};

/// A verified identity acting on the store.
pub trait Caller: Send + Sync {
  fn user_id(&self) -> i64;
  fn role(&self) -> Role;
}

impl Caller for User {
  fn user_id(&self) -> i64 { self.id }

  fn role(&self) -> Role { self.role }
}

/// Fail with [`Error::PermissionDenied`] unless the caller holds one of
/// `allowed`.
pub fn require_role(caller: &impl Caller, allowed: &[Role], action: &str) -> Result<()> {
  if allowed.contains(&caller.role()) {
    Ok(())
  } else {
    Err(Error::PermissionDenied(format!(
      "{} may not {action}",
      caller.role()
    )))
  }
}

pub fn require_chair(caller: &impl Caller, action: &str) -> Result<()> {
  require_role(caller, &[Role::Chair], action)
}
