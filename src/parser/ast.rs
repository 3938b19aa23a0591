//! Typed AST for the BBj statement subset.
//!
//! Every node that can declare or reference something carries a [`NodeId`].
//! Ids are unique within one parse and allocated in source order, so they
//! double as a stable ordering key for bindings and diagnostics.

use smol_str::SmolStr;
use text_size::TextRange;

/// Identity of an AST node within its document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NodeId(u32);

impl NodeId {
    /// The id of the [`Program`] node.
    pub const ROOT: NodeId = NodeId(0);

    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// An identifier as written in the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ident {
    pub id: NodeId,
    pub text: SmolStr,
    pub range: TextRange,
}

/// A (possibly dotted) type name such as `BBjString` or `java.util.HashMap`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeRef {
    pub id: NodeId,
    pub segments: Vec<SmolStr>,
    pub range: TextRange,
}

impl TypeRef {
    /// Dotted names always refer to Java classes.
    pub fn is_qualified(&self) -> bool {
        self.segments.len() > 1
    }

    pub fn text(&self) -> SmolStr {
        if self.segments.len() == 1 {
            return self.segments[0].clone();
        }
        SmolStr::from(self.segments.join("."))
    }

    pub fn simple_name(&self) -> &str {
        self.segments.last().map(SmolStr::as_str).unwrap_or("")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub range: TextRange,
}

impl Program {
    pub fn id(&self) -> NodeId {
        NodeId::ROOT
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Statement {
    pub id: NodeId,
    pub range: TextRange,
    pub kind: StatementKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatementKind {
    Label(Ident),
    Rem,
    Assign(Assignment),
    Declare(DeclareStatement),
    Global(Vec<Ident>),
    Use(UseStatement),
    Class(ClassDecl),
    Field(FieldDecl),
    Method(MethodDecl),
    Procedure(ProcedureDecl),
    Jump(JumpStatement),
    Open(OpenStatement),
    KeyedFile(KeyedFileStatement),
    Print(Vec<Expr>),
    If(IfStatement),
    For(ForStatement),
    While(WhileStatement),
    Return(Option<Expr>),
    Terminate(TerminateVerb),
    Expr(Expr),
}

impl StatementKind {
    /// Child statement lists, in source order.
    pub fn children(&self) -> Vec<&[Statement]> {
        match self {
            StatementKind::Class(class) => vec![class.members.as_slice()],
            StatementKind::Method(method) => vec![method.body.as_slice()],
            StatementKind::Procedure(ProcedureDecl {
                body: ProcedureBody::Block(body),
                ..
            }) => vec![body.as_slice()],
            StatementKind::If(stmt) => {
                vec![stmt.then_branch.as_slice(), stmt.else_branch.as_slice()]
            }
            StatementKind::For(stmt) => vec![stmt.body.as_slice()],
            StatementKind::While(stmt) => vec![stmt.body.as_slice()],
            _ => Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Modifier {
    Public,
    Protected,
    Private,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub explicit_let: bool,
    pub target: AssignTarget,
    pub value: Expr,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssignTarget {
    Variable(Ident),
    /// `#name = ...` inside a class.
    Field(Ident),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclareStatement {
    pub auto: bool,
    pub ty: TypeRef,
    pub name: Ident,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UseStatement {
    /// `use java.util.HashMap`
    Java(TypeRef),
    /// `use ::lib/util.bbj::Helper`
    Bbj {
        path: Option<SmolStr>,
        class: Ident,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDecl {
    pub is_interface: bool,
    pub modifier: Option<Modifier>,
    pub name: Ident,
    pub extends: Vec<TypeRef>,
    pub implements: Vec<TypeRef>,
    pub members: Vec<Statement>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDecl {
    pub modifier: Option<Modifier>,
    pub is_static: bool,
    pub ty: TypeRef,
    pub name: Ident,
    pub init: Option<Expr>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDecl {
    pub modifier: Option<Modifier>,
    pub is_static: bool,
    /// Absent for constructors.
    pub return_type: Option<TypeRef>,
    pub name: Ident,
    pub params: Vec<Param>,
    pub body: Vec<Statement>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub id: NodeId,
    pub ty: Option<TypeRef>,
    pub name: Ident,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcedureDecl {
    pub is_public: bool,
    pub name: Ident,
    pub params: Vec<Param>,
    pub body: ProcedureBody,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProcedureBody {
    /// `def fnadd(a,b)=a+b`
    Expr(Expr),
    /// `def fnadd(a,b)` ... `fnend`
    Block(Vec<Statement>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JumpVerb {
    Goto,
    Gosub,
    SetErr,
    SetEsc,
}

impl JumpVerb {
    pub fn as_str(self) -> &'static str {
        match self {
            JumpVerb::Goto => "GOTO",
            JumpVerb::Gosub => "GOSUB",
            JumpVerb::SetErr => "SETERR",
            JumpVerb::SetEsc => "SETESC",
        }
    }
}

/// `goto x`, `gosub x`, `seterr x`, `setesc x` and `on n goto a,b,c`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JumpStatement {
    pub verb: JumpVerb,
    pub selector: Option<Expr>,
    pub targets: Vec<Ident>,
}

/// A `key=value` pair inside a verb's option list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatementOption {
    pub id: NodeId,
    pub key: Ident,
    pub value: Expr,
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenStatement {
    pub channel: Expr,
    pub options: Vec<StatementOption>,
    /// Range of the option list, empty when there are no options.
    pub options_range: TextRange,
    pub path: Option<Expr>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyedVerb {
    Mkeyed,
    Vkeyed,
    Xkeyed,
}

impl KeyedVerb {
    pub fn as_str(self) -> &'static str {
        match self {
            KeyedVerb::Mkeyed => "MKEYED",
            KeyedVerb::Vkeyed => "VKEYED",
            KeyedVerb::Xkeyed => "XKEYED",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyedFileStatement {
    pub verb: KeyedVerb,
    pub args: Vec<Expr>,
    /// Every `key=value` option after the positional arguments, including `MODE`.
    pub options: Vec<StatementOption>,
}

impl KeyedFileStatement {
    pub fn mode_options(&self) -> impl Iterator<Item = &StatementOption> {
        self.options
            .iter()
            .filter(|option| option.key.text.eq_ignore_ascii_case("mode"))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IfStatement {
    pub condition: Expr,
    pub then_branch: Vec<Statement>,
    pub else_branch: Vec<Statement>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForStatement {
    pub variable: Ident,
    pub from: Expr,
    pub to: Expr,
    pub step: Option<Expr>,
    pub body: Vec<Statement>,
    pub next_variable: Option<Ident>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WhileStatement {
    pub condition: Expr,
    pub body: Vec<Statement>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TerminateVerb {
    Bye,
    End,
    Stop,
    Release,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expr {
    pub id: NodeId,
    pub range: TextRange,
    pub kind: ExprKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprKind {
    Number(SmolStr),
    Str(SmolStr),
    Variable(Ident),
    /// `#name`
    Field(Ident),
    /// `fnadd(1,2)`, a built-in function such as `str(x)`, or a substring `a$(1,2)`.
    Call { callee: Ident, args: Arguments },
    MethodCall {
        receiver: Box<Expr>,
        name: Ident,
        args: Arguments,
    },
    Member { receiver: Box<Expr>, name: Ident },
    Index { base: Box<Expr>, indices: Vec<Expr> },
    New { ty: TypeRef, args: Arguments },
    Unary { op: UnaryOp, operand: Box<Expr> },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// `*next`, `*same`, `*escape` and friends.
    StarLabel(Ident),
    Paren(Box<Expr>),
    /// Placeholder produced during error recovery.
    Missing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Plus,
}

/// Call arguments; verb options such as `err=*next` are kept apart.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Arguments {
    pub positional: Vec<Expr>,
    pub options: Vec<StatementOption>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    /// Binding power; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            BinaryOp::Eq
            | BinaryOp::NotEq
            | BinaryOp::Lt
            | BinaryOp::LtEq
            | BinaryOp::Gt
            | BinaryOp::GtEq => 3,
            BinaryOp::Add | BinaryOp::Sub => 4,
            BinaryOp::Mul | BinaryOp::Div => 5,
            BinaryOp::Pow => 6,
        }
    }
}
