use log::debug;

use crate::ast::Expression;
use crate::registry::FunctionRegistry;

#[derive(Debug, PartialEq, Clone, thiserror::Error)]
pub enum EvalError {
    #[error("unknown function {0}")]
    UnknownFunction(String),
    #[error("invalid number of args in call {function} expected {expected} found {found}")]
    Arity {
        function: String,
        expected: usize,
        found: usize,
    },
    #[error("argument {index} of {function} is not an integer: {found}")]
    TypeMismatch {
        function: String,
        index: usize,
        found: String,
    },
    #[error("division by zero")]
    DivisionByZero,
}

pub type EvalResult = Result<Expression, EvalError>;

/// The arguments of one call as its callee sees them.
///
/// Nothing is evaluated up front: a function asks for the arguments it
/// needs, when it needs them, so it may also skip some entirely.
pub struct Arguments<'a> {
    function: &'a str,
    args: &'a [Expression],
    registry: &'a FunctionRegistry,
}

impl<'a> Arguments<'a> {
    pub fn new(function: &'a str, args: &'a [Expression], registry: &'a FunctionRegistry) -> Self {
        Self {
            function,
            args,
            registry,
        }
    }

    pub fn function(&self) -> &str {
        self.function
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// the unevaluated subtree at `index`
    pub fn raw(&self, index: usize) -> Option<&'a Expression> {
        self.args.get(index)
    }

    /// fail with an arity error unless at least `count` arguments were given
    pub fn require(&self, count: usize) -> Result<(), EvalError> {
        if self.args.len() < count {
            return Err(EvalError::Arity {
                function: self.function.to_string(),
                expected: count,
                found: self.args.len(),
            });
        }
        Ok(())
    }

    pub fn evaluate(&self, index: usize) -> EvalResult {
        self.require(index + 1)?;
        evaluate(&self.args[index], self.registry)
    }

    pub fn integer(&self, index: usize) -> Result<i32, EvalError> {
        let value = self.evaluate(index)?;
        value.as_integer().ok_or_else(|| EvalError::TypeMismatch {
            function: self.function.to_string(),
            index,
            found: value.to_string(),
        })
    }
}

/// Reduces `expr` using the functions in `registry`.
///
/// Functions are looked up when the call is reached, not when the tree was
/// built, so anything registered in between is visible.
pub fn evaluate(expr: &Expression, registry: &FunctionRegistry) -> EvalResult {
    match expr {
        Expression::Integer(_) => Ok(expr.clone()),
        Expression::Call(name, args) => {
            let function = registry
                .get(name)
                .ok_or_else(|| EvalError::UnknownFunction(name.clone()))?;
            debug!("calling {} with {} args", name, args.len());
            function(&Arguments::new(name, args, registry))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use pretty_assertions::assert_eq;

    fn eval(input: &str, registry: &FunctionRegistry) -> EvalResult {
        evaluate(&Parser::default().parse_str(input).unwrap(), registry)
    }

    #[test]
    fn literal_is_terminal() {
        let registry = FunctionRegistry::empty();
        assert_eq!(eval("5", &registry), Ok(Expression::Integer(5)));
    }

    #[test]
    fn builtins_reduce_to_integers() {
        let registry = FunctionRegistry::new();
        assert_eq!(
            eval("ADD(1,MULTIPLY(2,3))", &registry),
            Ok(Expression::Integer(7))
        );
    }

    #[test]
    fn unknown_function() {
        let registry = FunctionRegistry::empty();
        assert_eq!(
            eval("ADD(1,2)", &registry),
            Err(EvalError::UnknownFunction("ADD".to_string()))
        );
    }

    #[test]
    fn names_are_case_sensitive() {
        let registry = FunctionRegistry::new();
        assert_eq!(
            eval("add(1,2)", &registry),
            Err(EvalError::UnknownFunction("add".to_string()))
        );
    }

    #[test]
    fn arguments_are_evaluated_on_demand() {
        let mut registry = FunctionRegistry::new();
        // picks one branch, so an unknown call in the other never runs
        registry
            .register("IF", |args| {
                args.require(3)?;
                if args.integer(0)? != 0 {
                    args.evaluate(1)
                } else {
                    args.evaluate(2)
                }
            })
            .unwrap();
        assert_eq!(eval("IF(1,10,BOOM(0))", &registry), Ok(Expression::Integer(10)));
        assert_eq!(eval("IF(0,BOOM(0),20)", &registry), Ok(Expression::Integer(20)));
        assert_eq!(
            eval("IF(1,BOOM(0),20)", &registry),
            Err(EvalError::UnknownFunction("BOOM".to_string()))
        );
    }

    #[test]
    fn type_mismatch() {
        let mut registry = FunctionRegistry::new();
        // hands back its argument without reducing it
        registry
            .register("QUOTE", |args| {
                args.require(1)?;
                Ok(args.raw(0).cloned().unwrap_or(Expression::Integer(0)))
            })
            .unwrap();
        assert_eq!(
            eval("QUOTE(ADD(1,2))", &registry),
            Ok(Expression::call(
                "ADD",
                vec![Expression::Integer(1), Expression::Integer(2)]
            ))
        );
        assert_eq!(
            eval("ADD(1,QUOTE(MINUS(3,2)))", &registry),
            Err(EvalError::TypeMismatch {
                function: "ADD".to_string(),
                index: 1,
                found: "MINUS(3,2)".to_string(),
            })
        );
    }

    #[test]
    fn arity_from_argument_access() {
        let registry = FunctionRegistry::empty();
        let args = [Expression::Integer(1)];
        let view = Arguments::new("F", &args, &registry);
        assert_eq!(view.len(), 1);
        assert_eq!(view.integer(0), Ok(1));
        assert_eq!(
            view.evaluate(1),
            Err(EvalError::Arity {
                function: "F".to_string(),
                expected: 2,
                found: 1,
            })
        );
    }
}
