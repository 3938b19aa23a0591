//! Recursive descent parser for the BBj statement subset
//!
//! BBj is line oriented: a statement ends at a newline or `;`. Block
//! statements (`class`, `method`, `def fn`, `for`, `while`, block `if`) collect
//! the statements up to their closing keyword. Errors are recorded and the
//! parser resynchronizes at the next statement boundary.

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::ast::*;
use super::lexer::{Lexer, Token, TokenKind};

/// Parse result containing the AST and any errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    pub program: Program,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Option keys recognized inside call argument lists (`new Foo(err=*next)`).
/// Keywords that only close a block; one met outside its block is an error.
const BLOCK_CLOSERS: &[&str] = &[
    "classend",
    "interfaceend",
    "methodend",
    "fnend",
    "wend",
    "next",
    "fi",
    "endif",
    "else",
];

const ARGUMENT_OPTION_KEYS: &[&str] = &["err", "end", "dom", "tim", "mode", "key", "ind", "siz"];

/// Parse BBj source code into an AST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input)
        .filter(|t| !t.kind.is_trivia())
        .collect();
    let mut parser = Parser::new(tokens, TextSize::of(input));
    let program = parser.parse_program();
    Parse {
        program,
        errors: parser.errors,
    }
}

/// The parser state
pub(super) struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    next_id: u32,
    len: TextSize,
    /// Inside the single-line form of `if`, where `else` ends a statement.
    inline_if_depth: u32,
    pub(super) errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: Vec<Token<'a>>, len: TextSize) -> Self {
        Self {
            tokens,
            pos: 0,
            // 0 is reserved for the program node
            next_id: 1,
            len,
            inline_if_depth: 0,
            errors: Vec::new(),
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    pub(super) fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    pub(super) fn kind(&self) -> Option<TokenKind> {
        self.current().map(|t| t.kind)
    }

    pub(super) fn nth_kind(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    pub(super) fn at(&self, kind: TokenKind) -> bool {
        self.kind() == Some(kind)
    }

    pub(super) fn at_keyword(&self, keyword: &str) -> bool {
        self.current().is_some_and(|t| t.is_keyword(keyword))
    }

    fn at_any_keyword(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.at_keyword(k))
    }

    pub(super) fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(super) fn at_statement_end(&self) -> bool {
        match self.kind() {
            None => true,
            Some(kind) if kind.is_statement_end() => true,
            Some(_) => self.inline_if_depth > 0 && self.at_keyword("else"),
        }
    }

    /// Start offset of the current token, or end of input.
    pub(super) fn offset(&self) -> TextSize {
        self.current().map(|t| t.offset).unwrap_or(self.len)
    }

    /// End offset of the previously consumed token.
    pub(super) fn prev_end(&self) -> TextSize {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.range().end(),
            None => TextSize::new(0),
        }
    }

    pub(super) fn range_from(&self, start: TextSize) -> TextRange {
        TextRange::new(start, self.prev_end().max(start))
    }

    fn current_range(&self) -> TextRange {
        match self.current() {
            Some(token) => token.range(),
            None => TextRange::empty(self.len),
        }
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    pub(super) fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    pub(super) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub(super) fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.at_keyword(keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub(super) fn expect(&mut self, kind: TokenKind, what: &str) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.error(format!("expected {what}"));
        false
    }

    pub(super) fn error(&mut self, message: impl Into<String>) {
        let range = self.current_range();
        self.errors.push(SyntaxError::new(message, range));
    }

    fn skip_to_statement_end(&mut self) {
        while !self.at_statement_end() {
            self.pos += 1;
        }
    }

    fn skip_to_line_end(&mut self) {
        while !self.at_eof() && !self.at(TokenKind::Newline) {
            self.pos += 1;
        }
    }

    pub(super) fn alloc(&mut self) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        id
    }

    pub(super) fn ident(&mut self, what: &str) -> Option<Ident> {
        if !self.at(TokenKind::Ident) {
            self.error(format!("expected {what}"));
            return None;
        }
        let token = self.bump()?;
        Some(Ident {
            id: self.alloc(),
            text: SmolStr::new(token.text),
            range: token.range(),
        })
    }

    /// `Name` or `java.util.Name`, with optional `[]` array suffixes.
    pub(super) fn type_ref(&mut self) -> Option<TypeRef> {
        let start = self.offset();
        if !self.at(TokenKind::Ident) {
            self.error("expected type name");
            return None;
        }
        let mut segments = Vec::new();
        while let Some(token) = self.bump() {
            segments.push(SmolStr::new(token.text));
            if self.at(TokenKind::Dot) && self.nth_kind(1) == Some(TokenKind::Ident) {
                self.pos += 1;
                continue;
            }
            break;
        }
        let range = self.range_from(start);
        while self.at(TokenKind::LBracket) && self.nth_kind(1) == Some(TokenKind::RBracket) {
            self.pos += 2;
        }
        Some(TypeRef {
            id: self.alloc(),
            segments,
            range,
        })
    }

    // =========================================================================
    // Program and blocks
    // =========================================================================

    fn parse_program(&mut self) -> Program {
        let (statements, _) = self.parse_block(&[]);
        Program {
            statements,
            range: TextRange::up_to(self.len),
        }
    }

    /// Parses statements until one of `terminators` starts a statement or
    /// input ends. The terminator is left unconsumed and returned.
    ///
    /// A block opened inside a single-line `if` runs to its own closer, so
    /// `else` does not end statements while the block is open.
    fn parse_block(&mut self, terminators: &[&str]) -> (Vec<Statement>, Option<SmolStr>) {
        let saved_depth = std::mem::replace(&mut self.inline_if_depth, 0);
        let mut statements = Vec::new();
        let found = loop {
            while self.at(TokenKind::Newline) || self.at(TokenKind::Semicolon) {
                self.pos += 1;
            }
            let Some(token) = self.current() else {
                break None;
            };
            if let Some(found) = terminators.iter().find(|t| token.is_keyword(t)) {
                break Some(SmolStr::new(found));
            }
            let before = self.pos;
            self.parse_statement_into(&mut statements);
            if self.pos == before {
                self.error("unexpected token");
                self.pos += 1;
            }
        };
        self.inline_if_depth = saved_depth;
        (statements, found)
    }

    fn close_block(&mut self, found: Option<SmolStr>, expected: &str) {
        if found.is_some() {
            self.pos += 1;
        } else {
            self.error(format!("missing {}", expected.to_ascii_uppercase()));
        }
    }

    fn parse_statement_into(&mut self, statements: &mut Vec<Statement>) {
        if let Some(label) = self.try_label() {
            statements.push(label);
            if self.at_statement_end() {
                return;
            }
        }
        let before = self.pos;
        if let Some(statement) = self.parse_statement() {
            statements.push(statement);
        }
        if !self.at_statement_end() {
            self.error("expected end of statement");
            self.skip_to_statement_end();
        }
        if self.pos == before && !self.at_eof() && !self.at_statement_end() {
            self.pos += 1;
        }
    }

    fn try_label(&mut self) -> Option<Statement> {
        if !(self.at(TokenKind::Ident) && self.nth_kind(1) == Some(TokenKind::Colon)) {
            return None;
        }
        let start = self.offset();
        let id = self.alloc();
        let name = self.ident("label")?;
        self.pos += 1;
        Some(Statement {
            id,
            range: self.range_from(start),
            kind: StatementKind::Label(name),
        })
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_statement(&mut self) -> Option<Statement> {
        if self.at_statement_end() {
            return None;
        }
        if let Some(closer) = self
            .current()
            .filter(|t| BLOCK_CLOSERS.iter().any(|k| t.is_keyword(k)))
            .map(|t| t.text.to_ascii_uppercase())
        {
            self.error(format!("unexpected {closer}"));
            self.pos += 1;
            return None;
        }
        let start = self.offset();
        let id = self.alloc();
        let keyword = self
            .current()
            .filter(|t| t.kind == TokenKind::Ident)
            .map(|t| t.text.to_ascii_lowercase());

        let kind = match keyword.as_deref() {
            Some("rem") => {
                self.skip_to_line_end();
                Some(StatementKind::Rem)
            }
            Some("let") => {
                self.pos += 1;
                self.assignment(true)
            }
            Some("declare") => self.declare(),
            Some("global") => self.global(),
            Some("use") => self.use_statement(),
            Some("class") | Some("interface") => self.class_decl(),
            Some("field") => self.field_decl(),
            Some("method") => self.method_decl(),
            Some("def") => self.procedure_decl(),
            Some("goto") => self.jump(JumpVerb::Goto),
            Some("gosub") => self.jump(JumpVerb::Gosub),
            Some("seterr") => self.jump(JumpVerb::SetErr),
            Some("setesc") => self.jump(JumpVerb::SetEsc),
            Some("on") => self.on_jump(),
            Some("open") => self.open(),
            Some("mkeyed") => self.keyed(KeyedVerb::Mkeyed),
            Some("vkeyed") => self.keyed(KeyedVerb::Vkeyed),
            Some("xkeyed") => self.keyed(KeyedVerb::Xkeyed),
            Some("print") => self.print(),
            Some("if") => self.if_statement(),
            Some("for") => self.for_statement(),
            Some("while") => self.while_statement(),
            Some("return") | Some("methodret") => {
                self.pos += 1;
                let value = if self.at_statement_end() {
                    None
                } else {
                    Some(self.expr())
                };
                Some(StatementKind::Return(value))
            }
            Some("bye") => self.terminate(TerminateVerb::Bye),
            Some("end") => self.terminate(TerminateVerb::End),
            Some("stop") => self.terminate(TerminateVerb::Stop),
            Some("release") => self.terminate(TerminateVerb::Release),
            _ => self.simple_statement(),
        }?;

        Some(Statement {
            id,
            range: self.range_from(start),
            kind,
        })
    }

    /// Implicit assignment, field assignment, or a bare expression.
    fn simple_statement(&mut self) -> Option<StatementKind> {
        let implicit_assign = self.at(TokenKind::Ident) && self.nth_kind(1) == Some(TokenKind::Eq);
        let field_assign = self.at(TokenKind::Hash)
            && self.nth_kind(1) == Some(TokenKind::Ident)
            && self.nth_kind(2) == Some(TokenKind::Eq);
        if implicit_assign || field_assign {
            return self.assignment(false);
        }
        if self.at_statement_end() {
            return None;
        }
        Some(StatementKind::Expr(self.expr()))
    }

    fn assignment(&mut self, explicit_let: bool) -> Option<StatementKind> {
        let target = if self.eat(TokenKind::Hash) {
            AssignTarget::Field(self.ident("field name")?)
        } else {
            AssignTarget::Variable(self.ident("variable name")?)
        };
        if !self.expect(TokenKind::Eq, "`=`") {
            return None;
        }
        let value = self.expr();
        Some(StatementKind::Assign(Assignment {
            explicit_let,
            target,
            value,
        }))
    }

    fn declare(&mut self) -> Option<StatementKind> {
        self.pos += 1;
        let auto = self.eat_keyword("auto");
        let ty = self.type_ref()?;
        let name = self.ident("variable name")?;
        Some(StatementKind::Declare(DeclareStatement { auto, ty, name }))
    }

    fn global(&mut self) -> Option<StatementKind> {
        self.pos += 1;
        let mut names = vec![self.ident("global name")?];
        while self.eat(TokenKind::Comma) {
            names.push(self.ident("global name")?);
        }
        Some(StatementKind::Global(names))
    }

    fn use_statement(&mut self) -> Option<StatementKind> {
        self.pos += 1;
        if !self.eat(TokenKind::ColonColon) {
            return Some(StatementKind::Use(UseStatement::Java(self.type_ref()?)));
        }
        let mut path = String::new();
        while !self.at_statement_end() && !self.at(TokenKind::ColonColon) {
            if let Some(token) = self.bump() {
                path.push_str(token.text);
            }
        }
        if !self.expect(TokenKind::ColonColon, "`::` after file path") {
            return None;
        }
        let class = self.ident("class name")?;
        let path = (!path.is_empty()).then(|| SmolStr::from(path));
        Some(StatementKind::Use(UseStatement::Bbj { path, class }))
    }

    fn modifier(&mut self) -> Option<Modifier> {
        if self.eat_keyword("public") {
            Some(Modifier::Public)
        } else if self.eat_keyword("protected") {
            Some(Modifier::Protected)
        } else if self.eat_keyword("private") {
            Some(Modifier::Private)
        } else {
            None
        }
    }

    fn type_list(&mut self) -> Vec<TypeRef> {
        let mut types = Vec::new();
        loop {
            match self.type_ref() {
                Some(ty) => types.push(ty),
                None => break,
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        types
    }

    fn class_decl(&mut self) -> Option<StatementKind> {
        let is_interface = self.at_keyword("interface");
        self.pos += 1;
        let modifier = self.modifier();
        let name = self.ident("class name")?;
        let mut extends = Vec::new();
        let mut implements = Vec::new();
        loop {
            if self.eat_keyword("extends") {
                extends.extend(self.type_list());
            } else if self.eat_keyword("implements") {
                implements.extend(self.type_list());
            } else {
                break;
            }
        }
        if !self.at_statement_end() {
            self.error("expected end of class header");
            self.skip_to_statement_end();
        }
        let closing = if is_interface { "interfaceend" } else { "classend" };
        let (members, found) = self.parse_block(&[closing]);
        self.close_block(found, closing);
        Some(StatementKind::Class(ClassDecl {
            is_interface,
            modifier,
            name,
            extends,
            implements,
            members,
        }))
    }

    fn field_decl(&mut self) -> Option<StatementKind> {
        self.pos += 1;
        let modifier = self.modifier();
        let is_static = self.eat_keyword("static");
        let ty = self.type_ref()?;
        self.eat(TokenKind::Hash);
        let name = self.ident("field name")?;
        let init = if self.eat(TokenKind::Eq) {
            Some(self.expr())
        } else {
            None
        };
        Some(StatementKind::Field(FieldDecl {
            modifier,
            is_static,
            ty,
            name,
            init,
        }))
    }

    fn method_decl(&mut self) -> Option<StatementKind> {
        self.pos += 1;
        let modifier = self.modifier();
        let is_static = self.eat_keyword("static");
        let (return_type, name) = if self.nth_kind(1) == Some(TokenKind::LParen) {
            (None, self.ident("method name")?)
        } else {
            let ty = self.type_ref()?;
            (Some(ty), self.ident("method name")?)
        };
        let params = self.params(true)?;
        let (body, found) = self.parse_block(&["methodend"]);
        self.close_block(found, "methodend");
        Some(StatementKind::Method(MethodDecl {
            modifier,
            is_static,
            return_type,
            name,
            params,
            body,
        }))
    }

    fn params(&mut self, typed: bool) -> Option<Vec<Param>> {
        let mut params = Vec::new();
        if !self.expect(TokenKind::LParen, "`(`") {
            return None;
        }
        if self.eat(TokenKind::RParen) {
            return Some(params);
        }
        loop {
            let id = self.alloc();
            let ty = if typed { Some(self.type_ref()?) } else { None };
            let name = self.ident("parameter name")?;
            params.push(Param { id, ty, name });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "`)`");
        Some(params)
    }

    fn procedure_decl(&mut self) -> Option<StatementKind> {
        self.pos += 1;
        let is_public = self.eat_keyword("public");
        let name = self.ident("function name")?;
        let params = if self.at(TokenKind::LParen) {
            self.params(false)?
        } else {
            Vec::new()
        };
        let body = if self.eat(TokenKind::Eq) {
            ProcedureBody::Expr(self.expr())
        } else {
            let (body, found) = self.parse_block(&["fnend"]);
            self.close_block(found, "fnend");
            ProcedureBody::Block(body)
        };
        Some(StatementKind::Procedure(ProcedureDecl {
            is_public,
            name,
            params,
            body,
        }))
    }

    fn jump(&mut self, verb: JumpVerb) -> Option<StatementKind> {
        self.pos += 1;
        let mut targets = Vec::new();
        // `seterr 0` switches the handler off
        if !(matches!(verb, JumpVerb::SetErr | JumpVerb::SetEsc) && self.eat(TokenKind::Number)) {
            targets.push(self.ident("label name")?);
        }
        Some(StatementKind::Jump(JumpStatement {
            verb,
            selector: None,
            targets,
        }))
    }

    fn on_jump(&mut self) -> Option<StatementKind> {
        self.pos += 1;
        let selector = self.expr();
        let verb = if self.eat_keyword("goto") {
            JumpVerb::Goto
        } else if self.eat_keyword("gosub") {
            JumpVerb::Gosub
        } else {
            self.error("expected GOTO or GOSUB");
            return None;
        };
        let mut targets = vec![self.ident("label name")?];
        while self.eat(TokenKind::Comma) {
            targets.push(self.ident("label name")?);
        }
        Some(StatementKind::Jump(JumpStatement {
            verb,
            selector: Some(selector),
            targets,
        }))
    }

    fn statement_option(&mut self) -> Option<StatementOption> {
        let start = self.offset();
        let id = self.alloc();
        let key = self.ident("option name")?;
        if !self.expect(TokenKind::Eq, "`=`") {
            return None;
        }
        let value = self.expr();
        Some(StatementOption {
            id,
            key,
            value,
            range: self.range_from(start),
        })
    }

    fn at_option(&self) -> bool {
        self.at(TokenKind::Ident) && self.nth_kind(1) == Some(TokenKind::Eq)
    }

    fn open(&mut self) -> Option<StatementKind> {
        self.pos += 1;
        if !self.expect(TokenKind::LParen, "`(` after OPEN") {
            return None;
        }
        let channel = self.expr();
        let mut options = Vec::new();
        let mut options_range = TextRange::empty(self.prev_end());
        while self.eat(TokenKind::Comma) {
            let option = self.statement_option()?;
            options_range = if options.is_empty() {
                option.range
            } else {
                options_range.cover(option.range)
            };
            options.push(option);
        }
        if !self.expect(TokenKind::RParen, "`)`") {
            return None;
        }
        let path = if self.at_statement_end() {
            None
        } else {
            Some(self.expr())
        };
        Some(StatementKind::Open(OpenStatement {
            channel,
            options,
            options_range,
            path,
        }))
    }

    fn keyed(&mut self, verb: KeyedVerb) -> Option<StatementKind> {
        self.pos += 1;
        let mut args = Vec::new();
        let mut options = Vec::new();
        loop {
            if self.at_option() {
                options.push(self.statement_option()?);
            } else {
                args.push(self.expr());
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Some(StatementKind::KeyedFile(KeyedFileStatement {
            verb,
            args,
            options,
        }))
    }

    fn print(&mut self) -> Option<StatementKind> {
        self.pos += 1;
        let mut items = Vec::new();
        while !self.at_statement_end() {
            let before = self.pos;
            items.push(self.expr());
            self.eat(TokenKind::Comma);
            if self.pos == before {
                self.error("unexpected token in PRINT");
                self.pos += 1;
            }
        }
        Some(StatementKind::Print(items))
    }

    fn if_statement(&mut self) -> Option<StatementKind> {
        self.pos += 1;
        let condition = self.expr();
        if !self.eat_keyword("then") {
            self.error("expected THEN");
            return None;
        }
        if self.at_eof() || self.at(TokenKind::Newline) {
            let (then_branch, found) = self.parse_block(&["else", "fi", "endif"]);
            let mut else_branch = Vec::new();
            let mut found = found;
            if found.as_deref() == Some("else") {
                self.pos += 1;
                let (branch, closing) = self.parse_block(&["fi", "endif"]);
                else_branch = branch;
                found = closing;
            }
            self.close_block(found, "fi");
            return Some(StatementKind::If(IfStatement {
                condition,
                then_branch,
                else_branch,
            }));
        }

        self.inline_if_depth += 1;
        let then_branch = self.inline_statements();
        let else_branch = if self.eat_keyword("else") {
            self.inline_statements()
        } else {
            Vec::new()
        };
        self.inline_if_depth -= 1;
        Some(StatementKind::If(IfStatement {
            condition,
            then_branch,
            else_branch,
        }))
    }

    /// Statements of a single-line `if` branch, separated by `;`.
    fn inline_statements(&mut self) -> Vec<Statement> {
        let mut statements = Vec::new();
        loop {
            self.parse_statement_into(&mut statements);
            if !self.eat(TokenKind::Semicolon) || self.at_eof() || self.at(TokenKind::Newline) {
                break;
            }
        }
        statements
    }

    fn for_statement(&mut self) -> Option<StatementKind> {
        self.pos += 1;
        let variable = self.ident("loop variable")?;
        if !self.expect(TokenKind::Eq, "`=`") {
            return None;
        }
        let from = self.expr();
        if !self.eat_keyword("to") {
            self.error("expected TO");
            return None;
        }
        let to = self.expr();
        let step = if self.eat_keyword("step") {
            Some(self.expr())
        } else {
            None
        };
        let (body, found) = self.parse_block(&["next"]);
        self.close_block(found, "next");
        let next_variable = if self.at(TokenKind::Ident) {
            self.ident("loop variable")
        } else {
            None
        };
        Some(StatementKind::For(ForStatement {
            variable,
            from,
            to,
            step,
            body,
            next_variable,
        }))
    }

    fn while_statement(&mut self) -> Option<StatementKind> {
        self.pos += 1;
        let condition = self.expr();
        let (body, found) = self.parse_block(&["wend"]);
        self.close_block(found, "wend");
        Some(StatementKind::While(WhileStatement { condition, body }))
    }

    fn terminate(&mut self, verb: TerminateVerb) -> Option<StatementKind> {
        self.pos += 1;
        Some(StatementKind::Terminate(verb))
    }

    // =========================================================================
    // Arguments
    // =========================================================================

    /// Parses `( ... )` after a callee; the current token must be `(`.
    pub(super) fn arguments(&mut self) -> Arguments {
        let mut args = Arguments::default();
        self.pos += 1;
        if self.eat(TokenKind::RParen) {
            return args;
        }
        loop {
            let is_option = self.at_option()
                && self.current().is_some_and(|t| {
                    ARGUMENT_OPTION_KEYS
                        .iter()
                        .any(|k| t.text.eq_ignore_ascii_case(k))
                });
            if is_option {
                match self.statement_option() {
                    Some(option) => args.options.push(option),
                    None => break,
                }
            } else {
                args.positional.push(self.expr());
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "`)`");
        args
    }

    pub(super) fn at_any_binary_keyword(&self) -> bool {
        self.at_any_keyword(&["and", "or"])
    }
}
