//! Expression IR.

use crate::word::Word;

/// Unary operations.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UnaryOp {
    Not,
    Neg,
}

/// Binary operations.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    Eq,
    Ne,
    Ltu,
}

/// Expression tree node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr<W: Word> {
    /// Immediate at guest word width.
    Imm(W::Reg),
    /// Read of an SSA temporary.
    Tmp(u32),
    /// Read of guest state at a byte offset.
    Get { offset: u16, width: u8 },
    Unary {
        op: UnaryOp,
        expr: Box<Self>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Self>,
        right: Box<Self>,
    },
}

// These are factory methods, not trait implementations
#[allow(clippy::should_implement_trait)]
impl<W: Word> Expr<W> {
    /// Create an immediate expression.
    pub const fn imm(val: W::Reg) -> Self {
        Self::Imm(val)
    }

    /// Create an immediate from a u64, truncated to guest width.
    pub fn imm_u64(val: u64) -> Self {
        Self::Imm(W::from_u64(val))
    }

    /// Create a temporary read expression.
    #[must_use]
    pub const fn tmp(idx: u32) -> Self {
        Self::Tmp(idx)
    }

    /// Create a guest-state read expression.
    #[must_use]
    pub const fn get(offset: u16, width: u8) -> Self {
        Self::Get { offset, width }
    }

    /// Create a unary expression.
    pub fn unary(op: UnaryOp, expr: Self) -> Self {
        Self::Unary {
            op,
            expr: Box::new(expr),
        }
    }

    /// Create a binary expression.
    pub fn binary(op: BinaryOp, left: Self, right: Self) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create an addition expression.
    pub fn add(left: Self, right: Self) -> Self {
        Self::binary(BinaryOp::Add, left, right)
    }

    /// Create a subtraction expression.
    pub fn sub(left: Self, right: Self) -> Self {
        Self::binary(BinaryOp::Sub, left, right)
    }

    /// Create an equality comparison expression.
    pub fn eq(left: Self, right: Self) -> Self {
        Self::binary(BinaryOp::Eq, left, right)
    }

    /// Create an inequality comparison expression.
    pub fn ne(left: Self, right: Self) -> Self {
        Self::binary(BinaryOp::Ne, left, right)
    }

    /// Create an unsigned less-than comparison expression.
    pub fn ltu(left: Self, right: Self) -> Self {
        Self::binary(BinaryOp::Ltu, left, right)
    }

    /// Check if this expression is a constant immediate.
    pub const fn is_imm(&self) -> bool {
        matches!(self, Self::Imm(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::W64;

    #[test]
    fn test_expr_factories() {
        let e = Expr::<W64>::add(Expr::tmp(3), Expr::imm(16));
        let Expr::Binary { op, left, right } = e else {
            panic!("expected binary node");
        };
        assert_eq!(op, BinaryOp::Add);
        assert_eq!(*left, Expr::Tmp(3));
        assert!(right.is_imm());
    }

    #[test]
    fn test_imm_u64_truncates_on_w32() {
        use crate::word::W32;
        assert_eq!(Expr::<W32>::imm_u64(0x1_0000_0002), Expr::Imm(2));
    }
}
