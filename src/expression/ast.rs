//! Expression tree, evaluation and canonical rendering.

use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
            Self::Pow => 4,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Add => " + ",
            Self::Sub => " - ",
            Self::Mul => " * ",
            Self::Div => " / ",
            Self::Pow => "^",
        }
    }

    fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
            Self::Pow => a.powf(b),
        }
    }
}

const NEG_PRECEDENCE: u8 = 3;
const ATOM_PRECEDENCE: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            "pi" => Some(Self::Pi),
            "e" => Some(Self::E),
            _ => None,
        }
    }

    fn value(self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "e",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Function {
    Log,
    Log2,
    Log10,
    Log1p,
    Exp,
    Sqrt,
    Cbrt,
    Abs,
    Floor,
    Ceil,
    Pow,
    Min,
    Max,
}

impl Function {
    /// Look up a function by its normalised (lowercase, unprefixed) name.
    pub fn lookup(name: &str) -> Option<Self> {
        let f = match name {
            "log" | "ln" => Self::Log,
            "log2" => Self::Log2,
            "log10" => Self::Log10,
            "log1p" => Self::Log1p,
            "exp" => Self::Exp,
            "sqrt" => Self::Sqrt,
            "cbrt" => Self::Cbrt,
            "abs" => Self::Abs,
            "floor" => Self::Floor,
            "ceil" => Self::Ceil,
            "pow" => Self::Pow,
            "min" => Self::Min,
            "max" => Self::Max,
            _ => return None,
        };
        Some(f)
    }

    pub fn arity(self) -> usize {
        match self {
            Self::Pow | Self::Min | Self::Max => 2,
            _ => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Log2 => "log2",
            Self::Log10 => "log10",
            Self::Log1p => "log1p",
            Self::Exp => "exp",
            Self::Sqrt => "sqrt",
            Self::Cbrt => "cbrt",
            Self::Abs => "abs",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
            Self::Pow => "pow",
            Self::Min => "min",
            Self::Max => "max",
        }
    }

    fn apply(self, args: &[f64]) -> f64 {
        let a = args[0];
        match self {
            Self::Log => a.ln(),
            Self::Log2 => a.log2(),
            Self::Log10 => a.log10(),
            Self::Log1p => a.ln_1p(),
            Self::Exp => a.exp(),
            Self::Sqrt => a.sqrt(),
            Self::Cbrt => a.cbrt(),
            Self::Abs => a.abs(),
            Self::Floor => a.floor(),
            Self::Ceil => a.ceil(),
            Self::Pow => a.powf(args[1]),
            Self::Min => a.min(args[1]),
            Self::Max => a.max(args[1]),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Number(f64),
    Variable,
    Constant(Constant),
    Neg(Box<Node>),
    Binary(BinaryOp, Box<Node>, Box<Node>),
    Call(Function, Vec<Node>),
}

impl Node {
    pub fn eval(&self, value: f64) -> f64 {
        match self {
            Node::Number(n) => *n,
            Node::Variable => value,
            Node::Constant(c) => c.value(),
            Node::Neg(inner) => -inner.eval(value),
            Node::Binary(op, lhs, rhs) => op.apply(lhs.eval(value), rhs.eval(value)),
            Node::Call(f, args) => {
                let args: Vec<f64> = args.iter().map(|a| a.eval(value)).collect();
                f.apply(&args)
            }
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Node::Binary(op, _, _) => op.precedence(),
            Node::Neg(_) => NEG_PRECEDENCE,
            _ => ATOM_PRECEDENCE,
        }
    }

    /// Write the node with the fewest parentheses that re-parse to the same tree.
    pub fn render(&self, variable: &str, out: &mut String) {
        match self {
            Node::Number(n) if n.is_infinite() => out.push_str("1e999"),
            Node::Number(n) => {
                let _ = write!(out, "{n}");
            }
            Node::Variable => out.push_str(variable),
            Node::Constant(c) => out.push_str(c.name()),
            Node::Neg(inner) => {
                out.push('-');
                inner.render_wrapped(variable, inner.precedence() < NEG_PRECEDENCE, out);
            }
            Node::Binary(op, lhs, rhs) => {
                let (wrap_lhs, wrap_rhs) = match op {
                    // right associative; the exponent may itself be a unary minus
                    BinaryOp::Pow => (
                        lhs.precedence() <= op.precedence(),
                        rhs.precedence() < NEG_PRECEDENCE,
                    ),
                    _ => (
                        lhs.precedence() < op.precedence(),
                        rhs.precedence() <= op.precedence(),
                    ),
                };
                lhs.render_wrapped(variable, wrap_lhs, out);
                out.push_str(op.symbol());
                rhs.render_wrapped(variable, wrap_rhs, out);
            }
            Node::Call(f, args) => {
                out.push_str(f.name());
                out.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    arg.render(variable, out);
                }
                out.push(')');
            }
        }
    }

    fn render_wrapped(&self, variable: &str, wrap: bool, out: &mut String) {
        if wrap {
            out.push('(');
            self.render(variable, out);
            out.push(')');
        } else {
            self.render(variable, out);
        }
    }
}
