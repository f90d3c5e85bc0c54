// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings role: backend configuration fields.

use std::any::Any;
use std::fmt::Debug;

use crate::error::FerryError;

/// Upcasts to `Any` so a manager can recover its concrete settings type.
///
/// Call these through a deref (`(*boxed).as_any()`) so that a
/// `Box<dyn TransferSettings>` does not pick the box itself as `Self`.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;
    fn concrete_type_name(&self) -> &'static str;
}

impl<T: Any + Send> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn concrete_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }
}

/// Holds the configuration of one backend (paths, hosts, credentials).
///
/// Fields are addressed by name so that generic front-ends can fill them
/// without knowing the concrete type.
pub trait TransferSettings: AsAny + Debug + Send + Sync {
    /// Names of all settable fields, in display order.
    fn field_names(&self) -> &'static [&'static str];

    /// Current value of a field, or `None` if unset or unknown.
    fn get_field(&self, key: &str) -> Option<String>;

    /// Sets a field from its string form.
    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FerryError>;

    /// Checks that all required fields are present.
    fn validate(&self) -> Result<(), FerryError> {
        Ok(())
    }
}
