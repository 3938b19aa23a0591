//! Expression parsing (precedence climbing).

use smol_str::SmolStr;
use text_size::TextRange;

use super::ast::*;
use super::lexer::TokenKind;
use super::parser::Parser;

impl Parser<'_> {
    pub(super) fn expr(&mut self) -> Expr {
        self.binary_expr(1)
    }

    fn binary_op(&self) -> Option<BinaryOp> {
        let op = match self.kind()? {
            TokenKind::Eq => BinaryOp::Eq,
            TokenKind::NotEq => BinaryOp::NotEq,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::LtEq => BinaryOp::LtEq,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::GtEq => BinaryOp::GtEq,
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::Caret => BinaryOp::Pow,
            TokenKind::Ident if self.at_any_binary_keyword() => {
                if self.at_keyword("and") {
                    BinaryOp::And
                } else {
                    BinaryOp::Or
                }
            }
            _ => return None,
        };
        Some(op)
    }

    fn binary_expr(&mut self, min_precedence: u8) -> Expr {
        let start = self.offset();
        let mut lhs = self.unary_expr();
        while let Some(op) = self.binary_op() {
            let precedence = op.precedence();
            if precedence < min_precedence {
                break;
            }
            self.bump();
            // `^` is right associative
            let next = if op == BinaryOp::Pow {
                precedence
            } else {
                precedence + 1
            };
            let rhs = self.binary_expr(next);
            lhs = Expr {
                id: self.alloc(),
                range: self.range_from(start),
                kind: ExprKind::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
            };
        }
        lhs
    }

    fn unary_expr(&mut self) -> Expr {
        let start = self.offset();
        let op = match self.kind() {
            Some(TokenKind::Minus) => Some(UnaryOp::Neg),
            Some(TokenKind::Plus) => Some(UnaryOp::Plus),
            _ => None,
        };
        let Some(op) = op else {
            return self.postfix_expr();
        };
        self.bump();
        let operand = self.unary_expr();
        Expr {
            id: self.alloc(),
            range: self.range_from(start),
            kind: ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
        }
    }

    fn postfix_expr(&mut self) -> Expr {
        let start = self.offset();
        let mut expr = self.primary_expr();
        loop {
            if self.at(TokenKind::Dot) && self.nth_kind(1) == Some(TokenKind::Ident) {
                self.bump();
                let Some(name) = self.ident("member name") else {
                    break;
                };
                let kind = if self.at(TokenKind::LParen) {
                    let args = self.arguments();
                    ExprKind::MethodCall {
                        receiver: Box::new(expr),
                        name,
                        args,
                    }
                } else {
                    ExprKind::Member {
                        receiver: Box::new(expr),
                        name,
                    }
                };
                expr = Expr {
                    id: self.alloc(),
                    range: self.range_from(start),
                    kind,
                };
            } else if self.at(TokenKind::LBracket) {
                self.bump();
                let mut indices = vec![self.expr()];
                while self.eat(TokenKind::Comma) {
                    indices.push(self.expr());
                }
                self.expect(TokenKind::RBracket, "`]`");
                expr = Expr {
                    id: self.alloc(),
                    range: self.range_from(start),
                    kind: ExprKind::Index {
                        base: Box::new(expr),
                        indices,
                    },
                };
            } else {
                break;
            }
        }
        expr
    }

    fn primary_expr(&mut self) -> Expr {
        let start = self.offset();
        let kind = match self.kind() {
            Some(TokenKind::Number) => {
                let text = self.bump().map(|t| SmolStr::new(t.text)).unwrap_or_default();
                ExprKind::Number(text)
            }
            Some(TokenKind::String) => {
                let text = self.bump().map(|t| unquote(t.text)).unwrap_or_default();
                ExprKind::Str(text)
            }
            Some(TokenKind::Hash) => {
                self.bump();
                match self.ident("field name") {
                    Some(name) => ExprKind::Field(name),
                    None => ExprKind::Missing,
                }
            }
            Some(TokenKind::Star) if self.nth_kind(1) == Some(TokenKind::Ident) => {
                self.bump();
                match self.ident("label") {
                    Some(name) => ExprKind::StarLabel(name),
                    None => ExprKind::Missing,
                }
            }
            Some(TokenKind::LParen) => {
                self.bump();
                let inner = self.expr();
                self.expect(TokenKind::RParen, "`)`");
                ExprKind::Paren(Box::new(inner))
            }
            Some(TokenKind::Ident) if self.at_keyword("new") && self.nth_kind(1) == Some(TokenKind::Ident) => {
                self.bump();
                match self.type_ref() {
                    Some(ty) => {
                        let args = if self.at(TokenKind::LParen) {
                            self.arguments()
                        } else {
                            Arguments::default()
                        };
                        ExprKind::New { ty, args }
                    }
                    None => ExprKind::Missing,
                }
            }
            Some(TokenKind::Ident) => match self.ident("expression") {
                Some(callee) if self.at(TokenKind::LParen) => {
                    let args = self.arguments();
                    ExprKind::Call { callee, args }
                }
                Some(name) => ExprKind::Variable(name),
                None => ExprKind::Missing,
            },
            _ => {
                self.error("expected expression");
                return Expr {
                    id: self.alloc(),
                    range: TextRange::empty(start),
                    kind: ExprKind::Missing,
                };
            }
        };
        Expr {
            id: self.alloc(),
            range: self.range_from(start),
            kind,
        }
    }
}

/// Strips the surrounding quotes and collapses doubled quotes.
fn unquote(text: &str) -> SmolStr {
    let inner = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text);
    SmolStr::from(inner.replace("\"\"", "\""))
}
