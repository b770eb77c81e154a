use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::evaluator::{Arguments, EvalResult};
use crate::functions::register_builtins;

/// a callable that reduces its (lazily evaluated) arguments to an expression
pub type Function = Arc<dyn Fn(&Arguments) -> EvalResult + Send + Sync>;

#[derive(Debug, PartialEq, Clone, thiserror::Error)]
pub enum RegistryError {
    #[error("function {0} is already registered")]
    AlreadyRegistered(String),
}

/// Maps call-site names, matched exactly, to their implementations.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, Function>,
}

impl FunctionRegistry {
    /// a registry holding the built-in arithmetic functions
    pub fn new() -> Self {
        let mut registry = Self::empty();
        register_builtins(&mut registry);
        registry
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: &str, function: F) -> Result<(), RegistryError>
    where
        F: Fn(&Arguments) -> EvalResult + Send + Sync + 'static,
    {
        if self.functions.contains_key(name) {
            return Err(RegistryError::AlreadyRegistered(name.to_string()));
        }
        debug!("registering function {}", name);
        self.functions.insert(name.to_string(), Arc::new(function));
        Ok(())
    }

    /// register `function`, overwriting whatever `name` pointed at before
    pub fn replace<F>(&mut self, name: &str, function: F) -> Option<Function>
    where
        F: Fn(&Arguments) -> EvalResult + Send + Sync + 'static,
    {
        debug!("replacing function {}", name);
        self.functions.insert(name.to_string(), Arc::new(function))
    }

    pub fn get(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expression;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_has_builtins() {
        let registry = FunctionRegistry::new();
        assert_eq!(registry.names(), ["ADD", "DIVIDE", "MINUS", "MULTIPLY"]);
        assert!(FunctionRegistry::empty().names().is_empty());
    }

    #[test]
    fn register_and_get() {
        let mut registry = FunctionRegistry::empty();
        registry
            .register("ONE", |_| Ok(Expression::Integer(1)))
            .unwrap();
        assert!(registry.contains("ONE"));
        assert!(!registry.contains("one"));

        let function = registry.get("ONE").unwrap();
        let out = function(&Arguments::new("ONE", &[], &registry));
        assert_eq!(out, Ok(Expression::Integer(1)));
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut registry = FunctionRegistry::new();
        assert_eq!(
            registry.register("ADD", |_| Ok(Expression::Integer(0))),
            Err(RegistryError::AlreadyRegistered("ADD".to_string()))
        );
    }

    #[test]
    fn replace_overwrites() {
        let mut registry = FunctionRegistry::new();
        assert!(registry
            .replace("ADD", |_| Ok(Expression::Integer(0)))
            .is_some());
        assert!(registry
            .replace("NEW", |_| Ok(Expression::Integer(0)))
            .is_none());
        let function = registry.get("ADD").unwrap();
        let out = function(&Arguments::new("ADD", &[], &registry));
        assert_eq!(out, Ok(Expression::Integer(0)));
    }

    #[test]
    fn shareable_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FunctionRegistry>();
    }
}
