use std::borrow::Cow;

use masterror::Error;

use crate::{event_bus::EventBusError, module_context::ModuleContext};

pub mod clock;

/// Errors that can occur while registering a module.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// Propagates failures originating from the event bus.
    #[error("module event bus interaction failed: {0}")]
    EventBus(#[from] EventBusError),
    /// Domain-specific registration failures surfaced by the module.
    #[error("module registration failed: {reason}")]
    Registration { reason: Cow<'static, str> },
}

impl ModuleError {
    /// Construct a registration error with the provided reason.
    pub fn registration(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::Registration {
            reason: reason.into(),
        }
    }
}

/// Lifecycle shared by modules attached to the UI tree.
///
/// [`register`](Module::register) is the mount point: modules cache typed event
/// senders from the [`ModuleContext`] and start any background work there.
/// [`unregister`](Module::unregister) must release everything `register`
/// acquired.
pub trait Module {
    type RegistrationData<'a>;

    fn register(
        &mut self,
        ctx: &ModuleContext,
        data: Self::RegistrationData<'_>,
    ) -> Result<(), ModuleError>;

    fn unregister(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_error_keeps_reason() {
        let err = ModuleError::registration("no runtime");
        assert_eq!(err.to_string(), "module registration failed: no runtime");
    }

    #[test]
    fn bus_errors_convert() {
        let err = ModuleError::from(EventBusError::Poisoned);
        assert!(matches!(err, ModuleError::EventBus(EventBusError::Poisoned)));
    }
}
