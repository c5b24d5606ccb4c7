mod enumeration;
pub use enumeration::Enumeration;

mod eval;
pub use eval::{ConstEval, Evaluate};

mod expr;
pub use expr::Expr;

mod expr_binary_op;
pub use expr_binary_op::ExprBinaryOp;

mod expr_lazy;
pub use expr_lazy::ExprLazy;

mod expr_member;
pub use expr_member::ExprMember;

mod expr_method_call;
pub use expr_method_call::ExprMethodCall;

mod expr_new;
pub use expr_new::{ExprNew, ExprNewArray};

mod expr_unary_op;
pub use expr_unary_op::ExprUnaryOp;

mod op_binary;
pub use op_binary::BinaryOp;

mod op_unary;
pub use op_unary::UnaryOp;

mod primitive;
pub use primitive::Primitive;

mod record;
pub use record::Record;

mod ty;
pub use ty::Type;

mod value;
pub use value::Value;

mod value_enum;
pub use value_enum::ValueEnum;
