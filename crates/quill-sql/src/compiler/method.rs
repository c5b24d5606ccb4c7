use super::{Compiled, Compiler};
use quill_core::stmt::{Expr, ExprMethodCall, Value};
use quill_core::{Error, Result};

impl<'a> Compiler<'a> {
    /// String methods on a column expression. Anything else is rejected.
    pub(super) fn method_call(
        &mut self,
        expr: &Expr,
        call: &ExprMethodCall,
    ) -> Result<Compiled<'a>> {
        let Some(target) = call.target.as_deref() else {
            return Err(Error::unsupported_expression(expr));
        };

        let target = self.value(target)?;

        let sql = match (call.method.as_str(), &call.args[..]) {
            ("trim", []) => format!("ltrim(rtrim({target}))"),
            ("trim_start", []) => format!("ltrim({target})"),
            ("trim_end", []) => format!("rtrim({target})"),
            ("to_upper", []) => format!("ucase({target})"),
            ("to_lower", []) => format!("lcase({target})"),
            ("replace", [from, to]) => {
                let from = self.value(from)?;
                let to = self.value(to)?;
                format!("replace({target}, {from}, {to})")
            }
            // Substring indices are zero-based, SQL's are one-based.
            ("substring", [start]) => {
                let start = self.value(start)?;
                format!("substr({target}, {start} + 1)")
            }
            ("substring", [start, len]) => {
                let start = self.value(start)?;
                let len = self.value(len)?;
                format!("substr({target}, {start} + 1, {len})")
            }
            ("starts_with", [arg]) => self.like(expr, target, arg, "", "%")?,
            ("ends_with", [arg]) => self.like(expr, target, arg, "%", "")?,
            ("contains", [arg]) => self.like(expr, target, arg, "%", "%")?,
            _ => return Err(Error::unsupported_expression(expr)),
        };

        Ok(Compiled::Sql(sql))
    }

    /// Binds the pattern built from a constant string argument.
    fn like(
        &mut self,
        expr: &Expr,
        target: String,
        arg: &Expr,
        prefix: &str,
        suffix: &str,
    ) -> Result<String> {
        let pattern = match self.compile(arg)? {
            Compiled::Constant(Value::String(s)) => format!("{prefix}{s}{suffix}"),
            _ => return Err(Error::unsupported_expression(expr)),
        };

        let param = self.bind(Value::String(pattern));
        Ok(format!("({target} like {param})"))
    }
}
