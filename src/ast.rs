use std::fmt;

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Integer(i32),
    /// function name and its arguments, not yet evaluated
    Call(String, Vec<Expression>),
}

impl Expression {
    pub fn call(name: &str, args: Vec<Expression>) -> Self {
        Expression::Call(name.to_string(), args)
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Expression::Integer(value) => Some(*value),
            Expression::Call(..) => None,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Integer(value) => write!(f, "{}", value),
            Expression::Call(name, args) => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_call_syntax() {
        let expr = Expression::call(
            "ADD",
            vec![
                Expression::Integer(1),
                Expression::call(
                    "MULTIPLY",
                    vec![Expression::Integer(2), Expression::Integer(3)],
                ),
            ],
        );
        assert_eq!(expr.to_string(), "ADD(1,MULTIPLY(2,3))");
        assert_eq!(Expression::Integer(-7).to_string(), "-7");
    }

    #[test]
    fn as_integer() {
        assert_eq!(Expression::Integer(4).as_integer(), Some(4));
        assert_eq!(Expression::call("F", vec![]).as_integer(), None);
    }
}
