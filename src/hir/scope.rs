//! Scope computation.
//!
//! A single walk over a document's AST produces three things at once:
//!
//! - the [`ExportSet`]: top-level symbols other documents may see,
//! - the [`ScopeTree`]: nested module/class/procedure/block scopes,
//! - the [`ReferenceSite`]s: every identifier that needs linking, tagged with
//!   its enclosing scope and the resolution policy of its position.
//!
//! Scopes live in an arena and point to their parent by [`ScopeId`]; the tree
//! is rebuilt from scratch on every reparse, never patched.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use text_size::TextRange;

use super::names::NameProvider;
use super::symbols::{ExportSet, Symbol, SymbolKind, SymbolOrigin, Visibility};
use crate::base::DocumentId;
use crate::parser::*;
use crate::syntax::SyntaxFile;

// ============================================================================
// SCOPE TREE
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeId(u32);

impl ScopeId {
    pub const MODULE: ScopeId = ScopeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a symbol within its document's [`ScopeTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(u32);

impl SymbolId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Module,
    Class,
    Procedure,
    Block,
}

/// A lexical region and the symbols declared directly in it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scope {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    /// The AST node that opens this scope.
    pub owner: NodeId,
    pub range: TextRange,
    symbols: IndexMap<SmolStr, Vec<SymbolId>>,
}

impl Scope {
    /// Symbols declared here under `name`, in declaration order.
    pub fn lookup(&self, name: &str) -> &[SymbolId] {
        self.symbols.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn names(&self) -> impl Iterator<Item = &SmolStr> {
        self.symbols.keys()
    }

    pub fn symbol_ids(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.symbols.values().flatten().copied()
    }
}

/// The scopes and symbols of one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeTree {
    document: DocumentId,
    scopes: Vec<Scope>,
    symbols: Vec<Symbol>,
    by_owner: FxHashMap<NodeId, ScopeId>,
}

impl ScopeTree {
    fn new(document: DocumentId, range: TextRange) -> Self {
        Self {
            document,
            scopes: vec![Scope {
                kind: ScopeKind::Module,
                parent: None,
                owner: NodeId::ROOT,
                range,
                symbols: IndexMap::new(),
            }],
            symbols: Vec::new(),
            by_owner: FxHashMap::from_iter([(NodeId::ROOT, ScopeId::MODULE)]),
        }
    }

    pub fn document(&self) -> DocumentId {
        self.document
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Every scope, the module first, in creation order.
    pub fn scope_ids(&self) -> impl Iterator<Item = ScopeId> + use<> {
        (0..self.scopes.len() as u32).map(ScopeId)
    }

    /// The scope opened by `owner`, if any.
    pub fn scope_of(&self, owner: NodeId) -> Option<ScopeId> {
        self.by_owner.get(&owner).copied()
    }

    /// `id` followed by each enclosing scope up to the module.
    pub fn ancestors(&self, id: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(id), move |current| self.scope(*current).parent)
    }

    /// Symbols declared directly in `scope` under `name`.
    pub fn lookup_local(&self, scope: ScopeId, name: &str) -> impl Iterator<Item = &Symbol> {
        self.scope(scope)
            .lookup(name)
            .iter()
            .map(move |id| self.symbol(*id))
    }

    /// Symbols visible under `name` from `scope`, innermost scope first.
    pub fn visible<'a>(&'a self, scope: ScopeId, name: &'a str) -> impl Iterator<Item = &'a Symbol> {
        self.ancestors(scope)
            .flat_map(move |id| self.lookup_local(id, name))
    }

    fn alloc_scope(&mut self, kind: ScopeKind, parent: ScopeId, owner: NodeId, range: TextRange) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            kind,
            parent: Some(parent),
            owner,
            range,
            symbols: IndexMap::new(),
        });
        self.by_owner.insert(owner, id);
        id
    }

    fn declare(&mut self, scope: ScopeId, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.scopes[scope.index()]
            .symbols
            .entry(symbol.name.clone())
            .or_default()
            .push(id);
        self.symbols.push(symbol);
        id
    }
}

// ============================================================================
// REFERENCE SITES
// ============================================================================

/// Resolution policy of a reference position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// Variable read or write. BBj variables need no declaration, so these
    /// never report when unresolved.
    Variable,
    /// `#name` inside a class body.
    Field { class_has_supertype: bool },
    /// `fnname(...)` call.
    Procedure,
    /// Simple BBj or Java type name.
    Type,
    /// Target of `use ::file::Class`.
    BbjClassImport { path: Option<SmolStr> },
    /// Dotted Java name; resolved by the interop catalog only.
    JavaClass,
    /// Target of `goto`, `gosub`, `seterr`, `setesc` or an `err=` option.
    Label,
}

impl ReferenceKind {
    /// Symbol kinds a reference in this position may bind to.
    pub fn legal_kinds(&self) -> &'static [SymbolKind] {
        match self {
            ReferenceKind::Variable => &[SymbolKind::Variable, SymbolKind::Class, SymbolKind::ExternalClass],
            ReferenceKind::Field { .. } => &[SymbolKind::Field],
            ReferenceKind::Procedure => &[SymbolKind::Procedure],
            ReferenceKind::Type => &[SymbolKind::Class, SymbolKind::ExternalClass],
            ReferenceKind::BbjClassImport { .. } => &[SymbolKind::Class],
            ReferenceKind::JavaClass => &[SymbolKind::ExternalClass, SymbolKind::ExternalMember],
            ReferenceKind::Label => &[SymbolKind::Label],
        }
    }

    /// The symbol kind names are normalized as.
    pub fn name_kind(&self) -> SymbolKind {
        match self {
            ReferenceKind::Variable => SymbolKind::Variable,
            ReferenceKind::Field { .. } => SymbolKind::Field,
            ReferenceKind::Procedure => SymbolKind::Procedure,
            ReferenceKind::Type | ReferenceKind::BbjClassImport { .. } => SymbolKind::Class,
            ReferenceKind::JavaClass => SymbolKind::ExternalMember,
            ReferenceKind::Label => SymbolKind::Label,
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            ReferenceKind::Variable => "variable",
            ReferenceKind::Field { .. } => "field",
            ReferenceKind::Procedure => "procedure",
            ReferenceKind::Type | ReferenceKind::BbjClassImport { .. } => "class",
            ReferenceKind::JavaClass => "Java class",
            ReferenceKind::Label => "label",
        }
    }
}

/// A reference node awaiting linking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceSite {
    pub node: NodeId,
    /// Text as written.
    pub text: SmolStr,
    /// Canonical name.
    pub name: SmolStr,
    pub range: TextRange,
    pub kind: ReferenceKind,
    /// Innermost scope enclosing the reference.
    pub scope: ScopeId,
}

/// Everything scope computation produces for one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentScopes {
    pub exports: ExportSet,
    pub tree: ScopeTree,
    pub references: Vec<ReferenceSite>,
}

// ============================================================================
// COMPUTATION
// ============================================================================

/// Type names built into BBj; they are never linked.
const BUILTIN_TYPES: &[&str] = &[
    "void", "boolean", "byte", "char", "short", "int", "long", "float", "double",
];

/// Primitive Java types and the `BBj*` API types the runtime provides.
pub fn is_builtin_type(name: &str) -> bool {
    BUILTIN_TYPES.iter().any(|t| t.eq_ignore_ascii_case(name))
        || name.starts_with("BBj")
        || name.starts_with("BBJ")
}

/// Option keys whose value is a branch target (`err=handler`).
const BRANCH_OPTIONS: &[&str] = &["err", "end", "dom"];

/// Computes scopes, exports and reference sites for one parsed document.
pub fn compute_scopes(
    document: DocumentId,
    uri: &str,
    file: &SyntaxFile,
    names: &dyn NameProvider,
) -> DocumentScopes {
    let program = file.program();
    let mut builder = ScopeBuilder {
        names,
        document,
        tree: ScopeTree::new(document, program.range),
        exports: ExportSet::new(document, uri),
        references: Vec::new(),
        current: ScopeId::MODULE,
        class_has_supertype: false,
    };
    builder.statements(&program.statements);
    tracing::trace!(
        document = %document,
        scopes = builder.tree.scope_count(),
        symbols = builder.tree.symbols.len(),
        exports = builder.exports.len(),
        references = builder.references.len(),
        "computed scopes"
    );
    DocumentScopes {
        exports: builder.exports,
        tree: builder.tree,
        references: builder.references,
    }
}

struct ScopeBuilder<'a> {
    names: &'a dyn NameProvider,
    document: DocumentId,
    tree: ScopeTree,
    exports: ExportSet,
    references: Vec<ReferenceSite>,
    current: ScopeId,
    class_has_supertype: bool,
}

impl ScopeBuilder<'_> {
    // ------------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------------

    fn declare_in(
        &mut self,
        scope: ScopeId,
        text: &str,
        kind: SymbolKind,
        node: NodeId,
        range: TextRange,
        exported: bool,
    ) -> SymbolId {
        let visibility = if exported {
            Visibility::Exported
        } else {
            Visibility::Local
        };
        let symbol = Symbol {
            name: self.names.canonical_name(text, kind),
            kind,
            visibility,
            origin: SymbolOrigin::Document {
                document: self.document,
                node,
            },
            range,
            detail: None,
        };
        if exported {
            self.exports.push(symbol.clone());
        }
        self.tree.declare(scope, symbol)
    }

    fn declare_ident(&mut self, scope: ScopeId, ident: &Ident, kind: SymbolKind, exported: bool) -> SymbolId {
        self.declare_in(scope, &ident.text, kind, ident.id, ident.range, exported)
    }

    fn set_detail(&mut self, id: SymbolId, detail: SmolStr) {
        self.tree.symbols[id.index()].detail = Some(detail);
    }

    /// Nearest procedure or module scope; implicit declarations land here.
    fn hoist_target(&self) -> ScopeId {
        self.tree
            .ancestors(self.current)
            .find(|id| {
                matches!(
                    self.tree.scope(*id).kind,
                    ScopeKind::Procedure | ScopeKind::Module
                )
            })
            .unwrap_or(ScopeId::MODULE)
    }

    /// Is `name` already a variable within the current procedure?
    fn variable_visible(&self, name: &str) -> bool {
        for id in self.tree.ancestors(self.current) {
            if self
                .tree
                .lookup_local(id, name)
                .any(|s| s.kind == SymbolKind::Variable)
            {
                return true;
            }
            if matches!(
                self.tree.scope(id).kind,
                ScopeKind::Procedure | ScopeKind::Module
            ) {
                return false;
            }
        }
        false
    }

    /// Declares the variable on first assignment, references it afterwards.
    fn assign_variable(&mut self, ident: &Ident) {
        let name = self.names.canonical_name(&ident.text, SymbolKind::Variable);
        if self.variable_visible(&name) {
            self.reference(ident.id, &ident.text, ident.range, ReferenceKind::Variable);
        } else {
            let target = self.hoist_target();
            self.declare_ident(target, ident, SymbolKind::Variable, false);
        }
    }

    fn with_scope(&mut self, kind: ScopeKind, owner: NodeId, range: TextRange, f: impl FnOnce(&mut Self)) {
        let scope = self.tree.alloc_scope(kind, self.current, owner, range);
        let saved = std::mem::replace(&mut self.current, scope);
        f(self);
        self.current = saved;
    }

    fn params(&mut self, params: &[Param]) {
        for param in params {
            if let Some(ty) = &param.ty {
                self.type_ref(ty);
            }
            let scope = self.current;
            self.declare_ident(scope, &param.name, SymbolKind::Variable, false);
        }
    }

    // ------------------------------------------------------------------------
    // References
    // ------------------------------------------------------------------------

    fn reference(&mut self, node: NodeId, text: &str, range: TextRange, kind: ReferenceKind) {
        let name = self.names.canonical_name(text, kind.name_kind());
        self.references.push(ReferenceSite {
            node,
            text: SmolStr::new(text),
            name,
            range,
            kind,
            scope: self.current,
        });
    }

    fn type_ref(&mut self, ty: &TypeRef) {
        let text = ty.text();
        if ty.is_qualified() {
            self.references.push(ReferenceSite {
                node: ty.id,
                name: text.clone(),
                text,
                range: ty.range,
                kind: ReferenceKind::JavaClass,
                scope: self.current,
            });
        } else if !is_builtin_type(&text) {
            self.reference(ty.id, &text, ty.range, ReferenceKind::Type);
        }
    }

    fn label_ref(&mut self, ident: &Ident) {
        self.reference(ident.id, &ident.text, ident.range, ReferenceKind::Label);
    }

    fn options(&mut self, options: &[StatementOption]) {
        for option in options {
            let is_branch = BRANCH_OPTIONS
                .iter()
                .any(|k| option.key.text.eq_ignore_ascii_case(k));
            match &option.value.kind {
                ExprKind::Variable(target) if is_branch => self.label_ref(target),
                _ => self.expr(&option.value),
            }
        }
    }

    fn arguments(&mut self, args: &Arguments) {
        for arg in &args.positional {
            self.expr(arg);
        }
        self.options(&args.options);
    }

    fn expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Variable(ident) => {
                self.reference(ident.id, &ident.text, ident.range, ReferenceKind::Variable);
            }
            ExprKind::Field(ident) => {
                let kind = ReferenceKind::Field {
                    class_has_supertype: self.class_has_supertype,
                };
                self.reference(ident.id, &ident.text, ident.range, kind);
            }
            ExprKind::Call { callee, args } => {
                if is_procedure_name(&callee.text) {
                    self.reference(callee.id, &callee.text, callee.range, ReferenceKind::Procedure);
                } else if callee.text.ends_with('$') {
                    // substring of a string variable
                    self.reference(callee.id, &callee.text, callee.range, ReferenceKind::Variable);
                }
                self.arguments(args);
            }
            ExprKind::MethodCall { receiver, args, .. } => {
                self.expr(receiver);
                self.arguments(args);
            }
            ExprKind::Member { receiver, .. } => self.expr(receiver),
            ExprKind::Index { base, indices } => {
                self.expr(base);
                for index in indices {
                    self.expr(index);
                }
            }
            ExprKind::New { ty, args } => {
                self.type_ref(ty);
                self.arguments(args);
            }
            ExprKind::Unary { operand, .. } => self.expr(operand),
            ExprKind::Binary { lhs, rhs, .. } => {
                self.expr(lhs);
                self.expr(rhs);
            }
            ExprKind::Paren(inner) => self.expr(inner),
            ExprKind::Number(_) | ExprKind::Str(_) | ExprKind::StarLabel(_) | ExprKind::Missing => {}
        }
    }

    // ------------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------------

    fn statements(&mut self, statements: &[Statement]) {
        for statement in statements {
            self.statement(statement);
        }
    }

    fn block(&mut self, owner: NodeId, range: TextRange, statements: &[Statement]) {
        if statements.is_empty() {
            return;
        }
        self.with_scope(ScopeKind::Block, owner, range, |this| this.statements(statements));
    }

    fn at_module_level(&self) -> bool {
        self.current == ScopeId::MODULE
    }

    fn statement(&mut self, statement: &Statement) {
        match &statement.kind {
            StatementKind::Label(name) => {
                let target = self.hoist_target();
                let exported = target == ScopeId::MODULE;
                self.declare_ident(target, name, SymbolKind::Label, exported);
            }
            StatementKind::Rem | StatementKind::Terminate(_) => {}
            StatementKind::Assign(assign) => {
                self.expr(&assign.value);
                match &assign.target {
                    AssignTarget::Variable(ident) => self.assign_variable(ident),
                    AssignTarget::Field(ident) => {
                        let kind = ReferenceKind::Field {
                            class_has_supertype: self.class_has_supertype,
                        };
                        self.reference(ident.id, &ident.text, ident.range, kind);
                    }
                }
            }
            StatementKind::Declare(declare) => {
                self.type_ref(&declare.ty);
                let scope = self.current;
                self.declare_ident(scope, &declare.name, SymbolKind::Variable, false);
            }
            StatementKind::Global(globals) => {
                for name in globals {
                    self.declare_ident(ScopeId::MODULE, name, SymbolKind::Variable, true);
                }
            }
            StatementKind::Use(UseStatement::Java(ty)) => {
                let qualified = ty.text();
                self.references.push(ReferenceSite {
                    node: ty.id,
                    name: qualified.clone(),
                    text: qualified.clone(),
                    range: ty.range,
                    kind: ReferenceKind::JavaClass,
                    scope: self.current,
                });
                let id = self.declare_in(
                    ScopeId::MODULE,
                    &qualified,
                    SymbolKind::ExternalClass,
                    statement.id,
                    ty.range,
                    false,
                );
                self.set_detail(id, qualified);
            }
            StatementKind::Use(UseStatement::Bbj { path, class }) => {
                let kind = ReferenceKind::BbjClassImport { path: path.clone() };
                self.reference(class.id, &class.text, class.range, kind);
                let id = self.declare_in(
                    ScopeId::MODULE,
                    &class.text,
                    SymbolKind::Class,
                    statement.id,
                    class.range,
                    false,
                );
                if let Some(path) = path {
                    self.set_detail(id, path.clone());
                }
            }
            StatementKind::Class(class) => self.class(statement, class),
            StatementKind::Field(field) => {
                self.type_ref(&field.ty);
                if let Some(init) = &field.init {
                    self.expr(init);
                }
                let scope = self.current;
                self.declare_ident(scope, &field.name, SymbolKind::Field, false);
            }
            StatementKind::Method(method) => {
                if let Some(ty) = &method.return_type {
                    self.type_ref(ty);
                }
                let scope = self.current;
                self.declare_ident(scope, &method.name, SymbolKind::Procedure, false);
                self.with_scope(ScopeKind::Procedure, statement.id, statement.range, |this| {
                    this.params(&method.params);
                    this.statements(&method.body);
                });
            }
            StatementKind::Procedure(procedure) => {
                let scope = self.current;
                let exported = procedure.is_public && self.at_module_level();
                self.declare_ident(scope, &procedure.name, SymbolKind::Procedure, exported);
                self.with_scope(ScopeKind::Procedure, statement.id, statement.range, |this| {
                    this.params(&procedure.params);
                    match &procedure.body {
                        ProcedureBody::Expr(expr) => this.expr(expr),
                        ProcedureBody::Block(body) => this.statements(body),
                    }
                });
            }
            StatementKind::Jump(jump) => {
                if let Some(selector) = &jump.selector {
                    self.expr(selector);
                }
                for target in &jump.targets {
                    self.label_ref(target);
                }
            }
            StatementKind::Open(open) => {
                self.expr(&open.channel);
                self.options(&open.options);
                if let Some(path) = &open.path {
                    self.expr(path);
                }
            }
            StatementKind::KeyedFile(keyed) => {
                for arg in &keyed.args {
                    self.expr(arg);
                }
                self.options(&keyed.options);
            }
            StatementKind::Print(items) => {
                for item in items {
                    self.expr(item);
                }
            }
            StatementKind::If(stmt) => {
                self.expr(&stmt.condition);
                self.block(statement.id, statement.range, &stmt.then_branch);
                // the else branch gets its own scope, owned by its first statement
                if let Some(first) = stmt.else_branch.first() {
                    self.block(first.id, statement.range, &stmt.else_branch);
                }
            }
            StatementKind::For(stmt) => {
                self.expr(&stmt.from);
                self.expr(&stmt.to);
                if let Some(step) = &stmt.step {
                    self.expr(step);
                }
                self.assign_variable(&stmt.variable);
                self.block(statement.id, statement.range, &stmt.body);
                if let Some(next) = &stmt.next_variable {
                    self.reference(next.id, &next.text, next.range, ReferenceKind::Variable);
                }
            }
            StatementKind::While(stmt) => {
                self.expr(&stmt.condition);
                self.block(statement.id, statement.range, &stmt.body);
            }
            StatementKind::Return(value) => {
                if let Some(value) = value {
                    self.expr(value);
                }
            }
            StatementKind::Expr(expr) => self.expr(expr),
        }
    }

    fn class(&mut self, statement: &Statement, class: &ClassDecl) {
        for ty in class.extends.iter().chain(&class.implements) {
            self.type_ref(ty);
        }
        let exported = class.modifier == Some(Modifier::Public) && self.at_module_level();
        let scope = self.current;
        self.declare_ident(scope, &class.name, SymbolKind::Class, exported);

        let saved = std::mem::replace(&mut self.class_has_supertype, !class.extends.is_empty());
        self.with_scope(ScopeKind::Class, statement.id, statement.range, |this| {
            this.statements(&class.members);
        });
        self.class_has_supertype = saved;
    }
}

/// User-defined functions are named `fn...`; other calls are built-ins.
pub fn is_procedure_name(name: &str) -> bool {
    name.len() > 2 && name.as_bytes()[..2].eq_ignore_ascii_case(b"fn")
}
