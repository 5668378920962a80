use symbol::ScopeId;
use symbol::ScopeTree;
use symbol::ScopeType;
use symbol::Symbol;
use syntax_js::ast::class_or_object::ClassMember;
use syntax_js::ast::class_or_object::ClassOrObjKey;
use syntax_js::ast::class_or_object::ClassOrObjVal;
use syntax_js::ast::class_or_object::ObjMember;
use syntax_js::ast::class_or_object::ObjMemberType;
use syntax_js::ast::expr::lit::LitArrElem;
use syntax_js::ast::expr::lit::LitTemplatePart;
use syntax_js::ast::expr::pat::Pat;
use syntax_js::ast::expr::Expr;
use syntax_js::ast::func::Func;
use syntax_js::ast::func::FuncBody;
use syntax_js::ast::node::Node;
use syntax_js::ast::node::NodeAssocData;
use syntax_js::ast::stmt::decl::VarDecl;
use syntax_js::ast::stmt::decl::VarDeclMode;
use syntax_js::ast::stmt::ForInOfLhs;
use syntax_js::ast::stmt::ForTripleStmtInit;
use syntax_js::ast::stmt::Stmt;
use syntax_js::ast::stx::TopLevel;

pub mod symbol;

/// Attached to each scope-introducing node by the declaration pass so the resolution pass walks
/// the same scopes.
#[derive(Clone, Copy, Debug)]
struct AssignedScope(ScopeId);

/// Attached to every name-bearing node that resolves to a program binding. Nodes without this
/// annotation are free names; the runtime falls through to its ambient context for them.
#[derive(Clone, Copy, Debug)]
pub struct ResolvedSymbol(pub Symbol);

pub fn resolved_symbol(assoc: &NodeAssocData) -> Option<Symbol> {
  assoc.get::<ResolvedSymbol>().map(|r| r.0)
}

/// Build the scope tree for a parsed program, assign every declared name a unique [`Symbol`],
/// and annotate every resolvable name-bearing node with [`ResolvedSymbol`].
///
/// Hoisting is modelled structurally: `var` declarators bind in the nearest closure (or global)
/// scope, function/class declarations and `let`/`const` bind in their immediate scope, and the
/// whole tree is declared before anything is resolved, so forward references resolve.
pub fn compute_symbols(top: &mut Node<TopLevel>) -> ScopeTree {
  let mut tree = ScopeTree::new(ScopeType::Global);
  let root = tree.root();
  {
    let mut pass = DeclPass { tree: &mut tree };
    for stmt in &mut top.stx.body {
      pass.stmt(stmt, root);
    }
  }
  {
    let mut pass = ResolvePass { tree: &tree };
    for stmt in &mut top.stx.body {
      pass.stmt(stmt, root);
    }
  }
  tree
}

struct DeclPass<'t> {
  tree: &'t mut ScopeTree,
}

impl<'t> DeclPass<'t> {
  fn stmt(&mut self, stmt: &mut Node<Stmt>, scope: ScopeId) {
    match &mut *stmt.stx {
      Stmt::Block(block) => {
        let child = self.tree.create_scope(scope, ScopeType::Block);
        block.assoc.set(AssignedScope(child));
        for stmt in &mut block.stx.body {
          self.stmt(stmt, child);
        }
      }
      Stmt::Break(_) | Stmt::Continue(_) | Stmt::Debugger(_) | Stmt::Empty(_) => {}
      Stmt::DoWhile(stmt) => {
        self.expr(&mut stmt.stx.condition, scope);
        self.stmt(&mut stmt.stx.body, scope);
      }
      Stmt::Expr(stmt) => self.expr(&mut stmt.stx.expr, scope),
      Stmt::ForIn(stmt) => {
        let child = self.tree.create_scope(scope, ScopeType::Block);
        stmt.assoc.set(AssignedScope(child));
        self.for_in_of_lhs(&mut stmt.stx.lhs, child);
        self.expr(&mut stmt.stx.rhs, child);
        for stmt in &mut stmt.stx.body.stx.body {
          self.stmt(stmt, child);
        }
      }
      Stmt::ForOf(stmt) => {
        let child = self.tree.create_scope(scope, ScopeType::Block);
        stmt.assoc.set(AssignedScope(child));
        self.for_in_of_lhs(&mut stmt.stx.lhs, child);
        self.expr(&mut stmt.stx.rhs, child);
        for stmt in &mut stmt.stx.body.stx.body {
          self.stmt(stmt, child);
        }
      }
      Stmt::ForTriple(stmt) => {
        let child = self.tree.create_scope(scope, ScopeType::Block);
        stmt.assoc.set(AssignedScope(child));
        match &mut stmt.stx.init {
          ForTripleStmtInit::None => {}
          ForTripleStmtInit::Expr(expr) => self.expr(expr, child),
          ForTripleStmtInit::Decl(decl) => self.var_decl(decl, child),
        }
        if let Some(cond) = &mut stmt.stx.cond {
          self.expr(cond, child);
        }
        if let Some(post) = &mut stmt.stx.post {
          self.expr(post, child);
        }
        for stmt in &mut stmt.stx.body.stx.body {
          self.stmt(stmt, child);
        }
      }
      Stmt::If(stmt) => {
        self.expr(&mut stmt.stx.test, scope);
        self.stmt(&mut stmt.stx.consequent, scope);
        if let Some(alternate) = &mut stmt.stx.alternate {
          self.stmt(alternate, scope);
        }
      }
      Stmt::Label(stmt) => self.stmt(&mut stmt.stx.statement, scope),
      Stmt::Return(stmt) => {
        if let Some(value) = &mut stmt.stx.value {
          self.expr(value, scope);
        }
      }
      Stmt::Switch(stmt) => {
        self.expr(&mut stmt.stx.test, scope);
        // All case clauses share one scope.
        let child = self.tree.create_scope(scope, ScopeType::Block);
        stmt.assoc.set(AssignedScope(child));
        for branch in &mut stmt.stx.branches {
          if let Some(case) = &mut branch.stx.case {
            self.expr(case, child);
          }
          for stmt in &mut branch.stx.body {
            self.stmt(stmt, child);
          }
        }
      }
      Stmt::Throw(stmt) => self.expr(&mut stmt.stx.value, scope),
      Stmt::Try(stmt) => {
        let wrapped = self.tree.create_scope(scope, ScopeType::Block);
        stmt.stx.wrapped.assoc.set(AssignedScope(wrapped));
        for stmt in &mut stmt.stx.wrapped.stx.body {
          self.stmt(stmt, wrapped);
        }
        if let Some(catch) = &mut stmt.stx.catch {
          // The catch scope starts at the parameter, not the braces.
          let child = self.tree.create_scope(scope, ScopeType::Block);
          catch.assoc.set(AssignedScope(child));
          if let Some(parameter) = &mut catch.stx.parameter {
            self.pat_declare(&mut parameter.stx.pat, child, child);
          }
          for stmt in &mut catch.stx.body {
            self.stmt(stmt, child);
          }
        }
        if let Some(finally) = &mut stmt.stx.finally {
          let child = self.tree.create_scope(scope, ScopeType::Block);
          finally.assoc.set(AssignedScope(child));
          for stmt in &mut finally.stx.body {
            self.stmt(stmt, child);
          }
        }
      }
      Stmt::While(stmt) => {
        self.expr(&mut stmt.stx.condition, scope);
        self.stmt(&mut stmt.stx.body, scope);
      }
      Stmt::With(stmt) => {
        self.expr(&mut stmt.stx.object, scope);
        self.stmt(&mut stmt.stx.body, scope);
      }
      Stmt::ClassDecl(decl) => {
        self.tree.declare(scope, &decl.stx.name.stx.name);
        if let Some(extends) = &mut decl.stx.extends {
          self.expr(extends, scope);
        }
        self.class_members(&mut decl.stx.members, scope);
      }
      Stmt::FunctionDecl(decl) => {
        self.tree.declare(scope, &decl.stx.name.stx.name);
        self.func(&mut decl.stx.function, scope);
      }
      Stmt::VarDecl(decl) => self.var_decl(decl, scope),
    }
  }

  fn var_decl(&mut self, decl: &mut Node<VarDecl>, scope: ScopeId) {
    let binding_scope = match decl.stx.mode {
      VarDeclMode::Var => self.tree.hoist_scope(scope),
      VarDeclMode::Let | VarDeclMode::Const => scope,
    };
    for declarator in &mut decl.stx.declarators {
      self.pat_declare(&mut declarator.pattern.stx.pat, binding_scope, scope);
      if let Some(initializer) = &mut declarator.initializer {
        self.expr(initializer, scope);
      }
    }
  }

  fn for_in_of_lhs(&mut self, lhs: &mut ForInOfLhs, scope: ScopeId) {
    match lhs {
      ForInOfLhs::Assign(_) => {}
      ForInOfLhs::Decl((mode, pattern)) => {
        let binding_scope = match mode {
          VarDeclMode::Var => self.tree.hoist_scope(scope),
          VarDeclMode::Let | VarDeclMode::Const => scope,
        };
        self.pat_declare(&mut pattern.stx.pat, binding_scope, scope);
      }
    }
  }

  /// Declare every name bound by a pattern into `binding_scope`; defaults are evaluated in
  /// `expr_scope`.
  fn pat_declare(&mut self, pat: &mut Node<Pat>, binding_scope: ScopeId, expr_scope: ScopeId) {
    match &mut *pat.stx {
      Pat::Id(id) => {
        self.tree.declare(binding_scope, &id.stx.name);
      }
      Pat::Arr(arr) => {
        for elem in arr.stx.elements.iter_mut().flatten() {
          self.pat_declare(&mut elem.target, binding_scope, expr_scope);
          if let Some(default_value) = &mut elem.default_value {
            self.expr(default_value, expr_scope);
          }
        }
        if let Some(rest) = &mut arr.stx.rest {
          self.pat_declare(rest, binding_scope, expr_scope);
        }
      }
      Pat::Obj(obj) => {
        for prop in &mut obj.stx.properties {
          if let ClassOrObjKey::Computed(key) = &mut prop.stx.key {
            self.expr(key, expr_scope);
          }
          self.pat_declare(&mut prop.stx.target, binding_scope, expr_scope);
          if let Some(default_value) = &mut prop.stx.default_value {
            self.expr(default_value, expr_scope);
          }
        }
        if let Some(rest) = &mut obj.stx.rest {
          self.tree.declare(binding_scope, &rest.stx.name);
        }
      }
    }
  }

  fn func(&mut self, func: &mut Node<Func>, scope: ScopeId) {
    let child = self.tree.create_scope(scope, ScopeType::Closure);
    func.assoc.set(AssignedScope(child));
    for param in &mut func.stx.parameters {
      self.pat_declare(&mut param.stx.pattern.stx.pat, child, child);
      if let Some(default_value) = &mut param.stx.default_value {
        self.expr(default_value, child);
      }
    }
    match &mut func.stx.body {
      FuncBody::Block(body) => {
        for stmt in body {
          self.stmt(stmt, child);
        }
      }
      FuncBody::Expression(expr) => self.expr(expr, child),
    }
  }

  fn class_members(&mut self, members: &mut [Node<ClassMember>], scope: ScopeId) {
    for member in members {
      if let ClassOrObjKey::Computed(key) = &mut member.stx.key {
        self.expr(key, scope);
      }
      match &mut member.stx.val {
        ClassOrObjVal::Getter(getter) => self.func(&mut getter.stx.func, scope),
        ClassOrObjVal::Setter(setter) => self.func(&mut setter.stx.func, scope),
        ClassOrObjVal::Method(method) => self.func(&mut method.stx.func, scope),
        ClassOrObjVal::Prop(Some(value)) => self.expr(value, scope),
        ClassOrObjVal::Prop(None) => {}
      }
    }
  }

  fn obj_members(&mut self, members: &mut [Node<ObjMember>], scope: ScopeId) {
    for member in members {
      match &mut member.stx.typ {
        ObjMemberType::Valued { key, val } => {
          if let ClassOrObjKey::Computed(key) = key {
            self.expr(key, scope);
          }
          match val {
            ClassOrObjVal::Getter(getter) => self.func(&mut getter.stx.func, scope),
            ClassOrObjVal::Setter(setter) => self.func(&mut setter.stx.func, scope),
            ClassOrObjVal::Method(method) => self.func(&mut method.stx.func, scope),
            ClassOrObjVal::Prop(Some(value)) => self.expr(value, scope),
            ClassOrObjVal::Prop(None) => {}
          }
        }
        ObjMemberType::Shorthand { .. } => {}
        ObjMemberType::Rest { val } => self.expr(val, scope),
      }
    }
  }

  fn expr(&mut self, expr: &mut Node<Expr>, scope: ScopeId) {
    match &mut *expr.stx {
      Expr::ArrowFunc(arrow) => self.func(&mut arrow.stx.func, scope),
      Expr::Binary(binary) => {
        self.expr(&mut binary.stx.left, scope);
        self.expr(&mut binary.stx.right, scope);
      }
      Expr::Call(call) => {
        self.expr(&mut call.stx.callee, scope);
        for arg in &mut call.stx.arguments {
          self.expr(&mut arg.stx.value, scope);
        }
      }
      Expr::Class(class) => {
        // The class name (if any) is visible inside the class body only.
        let child = self.tree.create_scope(scope, ScopeType::Block);
        class.assoc.set(AssignedScope(child));
        if let Some(name) = &class.stx.name {
          self.tree.declare(child, &name.stx.name);
        }
        if let Some(extends) = &mut class.stx.extends {
          self.expr(extends, child);
        }
        self.class_members(&mut class.stx.members, child);
      }
      Expr::ComputedMember(member) => {
        self.expr(&mut member.stx.object, scope);
        self.expr(&mut member.stx.member, scope);
      }
      Expr::Cond(cond) => {
        self.expr(&mut cond.stx.test, scope);
        self.expr(&mut cond.stx.consequent, scope);
        self.expr(&mut cond.stx.alternate, scope);
      }
      Expr::Func(func) => {
        // A function expression's name is bound inside its own scope.
        let child_holder = &mut func.stx.func;
        self.func(child_holder, scope);
        if let Some(name) = &func.stx.name {
          let child = child_holder.assoc.get::<AssignedScope>().unwrap().0;
          self.tree.declare(child, &name.stx.name);
        }
      }
      Expr::Id(_) | Expr::IdPat(_) => {}
      Expr::Member(member) => self.expr(&mut member.stx.left, scope),
      Expr::Super(_) | Expr::This(_) => {}
      Expr::Unary(unary) => self.expr(&mut unary.stx.argument, scope),
      Expr::UnaryPostfix(unary) => self.expr(&mut unary.stx.argument, scope),
      Expr::LitArr(arr) => {
        for elem in &mut arr.stx.elements {
          match elem {
            LitArrElem::Single(expr) | LitArrElem::Rest(expr) => self.expr(expr, scope),
            LitArrElem::Empty => {}
          }
        }
      }
      Expr::LitBool(_) | Expr::LitNull(_) | Expr::LitNum(_) | Expr::LitRegex(_)
      | Expr::LitStr(_) => {}
      Expr::LitObj(obj) => self.obj_members(&mut obj.stx.members, scope),
      Expr::LitTemplate(template) => {
        for part in &mut template.stx.parts {
          if let LitTemplatePart::Substitution(expr) = part {
            self.expr(expr, scope);
          }
        }
      }
      Expr::ArrPat(_) | Expr::ObjPat(_) => {}
    }
  }
}

struct ResolvePass<'t> {
  tree: &'t ScopeTree,
}

impl<'t> ResolvePass<'t> {
  fn resolve_name(&self, name: &str, assoc: &mut NodeAssocData, scope: ScopeId) {
    if let Some(symbol) = self.tree.find(scope, name) {
      assoc.set(ResolvedSymbol(symbol));
    }
  }

  fn assigned_scope(assoc: &NodeAssocData) -> ScopeId {
    assoc.get::<AssignedScope>().unwrap().0
  }

  fn stmt(&mut self, stmt: &mut Node<Stmt>, scope: ScopeId) {
    match &mut *stmt.stx {
      Stmt::Block(block) => {
        let child = Self::assigned_scope(&block.assoc);
        for stmt in &mut block.stx.body {
          self.stmt(stmt, child);
        }
      }
      Stmt::Break(_) | Stmt::Continue(_) | Stmt::Debugger(_) | Stmt::Empty(_) => {}
      Stmt::DoWhile(stmt) => {
        self.expr(&mut stmt.stx.condition, scope);
        self.stmt(&mut stmt.stx.body, scope);
      }
      Stmt::Expr(stmt) => self.expr(&mut stmt.stx.expr, scope),
      Stmt::ForIn(stmt) => {
        let child = Self::assigned_scope(&stmt.assoc);
        self.for_in_of_lhs(&mut stmt.stx.lhs, child);
        self.expr(&mut stmt.stx.rhs, child);
        for stmt in &mut stmt.stx.body.stx.body {
          self.stmt(stmt, child);
        }
      }
      Stmt::ForOf(stmt) => {
        let child = Self::assigned_scope(&stmt.assoc);
        self.for_in_of_lhs(&mut stmt.stx.lhs, child);
        self.expr(&mut stmt.stx.rhs, child);
        for stmt in &mut stmt.stx.body.stx.body {
          self.stmt(stmt, child);
        }
      }
      Stmt::ForTriple(stmt) => {
        let child = Self::assigned_scope(&stmt.assoc);
        match &mut stmt.stx.init {
          ForTripleStmtInit::None => {}
          ForTripleStmtInit::Expr(expr) => self.expr(expr, child),
          ForTripleStmtInit::Decl(decl) => self.var_decl(decl, child),
        }
        if let Some(cond) = &mut stmt.stx.cond {
          self.expr(cond, child);
        }
        if let Some(post) = &mut stmt.stx.post {
          self.expr(post, child);
        }
        for stmt in &mut stmt.stx.body.stx.body {
          self.stmt(stmt, child);
        }
      }
      Stmt::If(stmt) => {
        self.expr(&mut stmt.stx.test, scope);
        self.stmt(&mut stmt.stx.consequent, scope);
        if let Some(alternate) = &mut stmt.stx.alternate {
          self.stmt(alternate, scope);
        }
      }
      Stmt::Label(stmt) => self.stmt(&mut stmt.stx.statement, scope),
      Stmt::Return(stmt) => {
        if let Some(value) = &mut stmt.stx.value {
          self.expr(value, scope);
        }
      }
      Stmt::Switch(stmt) => {
        self.expr(&mut stmt.stx.test, scope);
        let child = Self::assigned_scope(&stmt.assoc);
        for branch in &mut stmt.stx.branches {
          if let Some(case) = &mut branch.stx.case {
            self.expr(case, child);
          }
          for stmt in &mut branch.stx.body {
            self.stmt(stmt, child);
          }
        }
      }
      Stmt::Throw(stmt) => self.expr(&mut stmt.stx.value, scope),
      Stmt::Try(stmt) => {
        let wrapped = Self::assigned_scope(&stmt.stx.wrapped.assoc);
        for stmt in &mut stmt.stx.wrapped.stx.body {
          self.stmt(stmt, wrapped);
        }
        if let Some(catch) = &mut stmt.stx.catch {
          let child = Self::assigned_scope(&catch.assoc);
          if let Some(parameter) = &mut catch.stx.parameter {
            self.pat(&mut parameter.stx.pat, child);
          }
          for stmt in &mut catch.stx.body {
            self.stmt(stmt, child);
          }
        }
        if let Some(finally) = &mut stmt.stx.finally {
          let child = Self::assigned_scope(&finally.assoc);
          for stmt in &mut finally.stx.body {
            self.stmt(stmt, child);
          }
        }
      }
      Stmt::While(stmt) => {
        self.expr(&mut stmt.stx.condition, scope);
        self.stmt(&mut stmt.stx.body, scope);
      }
      Stmt::With(stmt) => {
        self.expr(&mut stmt.stx.object, scope);
        self.stmt(&mut stmt.stx.body, scope);
      }
      Stmt::ClassDecl(decl) => {
        let name = decl.stx.name.stx.name.clone();
        self.resolve_name(&name, &mut decl.stx.name.assoc, scope);
        if let Some(extends) = &mut decl.stx.extends {
          self.expr(extends, scope);
        }
        self.class_members(&mut decl.stx.members, scope);
      }
      Stmt::FunctionDecl(decl) => {
        let name = decl.stx.name.stx.name.clone();
        self.resolve_name(&name, &mut decl.stx.name.assoc, scope);
        self.func(&mut decl.stx.function, scope);
      }
      Stmt::VarDecl(decl) => self.var_decl(decl, scope),
    }
  }

  fn var_decl(&mut self, decl: &mut Node<VarDecl>, scope: ScopeId) {
    for declarator in &mut decl.stx.declarators {
      self.pat(&mut declarator.pattern.stx.pat, scope);
      if let Some(initializer) = &mut declarator.initializer {
        self.expr(initializer, scope);
      }
    }
  }

  fn for_in_of_lhs(&mut self, lhs: &mut ForInOfLhs, scope: ScopeId) {
    match lhs {
      ForInOfLhs::Assign(pat) => self.pat(pat, scope),
      ForInOfLhs::Decl((_, pattern)) => self.pat(&mut pattern.stx.pat, scope),
    }
  }

  fn pat(&mut self, pat: &mut Node<Pat>, scope: ScopeId) {
    match &mut *pat.stx {
      Pat::Id(id) => {
        let name = id.stx.name.clone();
        self.resolve_name(&name, &mut id.assoc, scope);
      }
      Pat::Arr(arr) => {
        for elem in arr.stx.elements.iter_mut().flatten() {
          self.pat(&mut elem.target, scope);
          if let Some(default_value) = &mut elem.default_value {
            self.expr(default_value, scope);
          }
        }
        if let Some(rest) = &mut arr.stx.rest {
          self.pat(rest, scope);
        }
      }
      Pat::Obj(obj) => {
        for prop in &mut obj.stx.properties {
          if let ClassOrObjKey::Computed(key) = &mut prop.stx.key {
            self.expr(key, scope);
          }
          self.pat(&mut prop.stx.target, scope);
          if let Some(default_value) = &mut prop.stx.default_value {
            self.expr(default_value, scope);
          }
        }
        if let Some(rest) = &mut obj.stx.rest {
          let name = rest.stx.name.clone();
          self.resolve_name(&name, &mut rest.assoc, scope);
        }
      }
    }
  }

  fn func(&mut self, func: &mut Node<Func>, _scope: ScopeId) {
    let child = Self::assigned_scope(&func.assoc);
    for param in &mut func.stx.parameters {
      self.pat(&mut param.stx.pattern.stx.pat, child);
      if let Some(default_value) = &mut param.stx.default_value {
        self.expr(default_value, child);
      }
    }
    match &mut func.stx.body {
      FuncBody::Block(body) => {
        for stmt in body {
          self.stmt(stmt, child);
        }
      }
      FuncBody::Expression(expr) => self.expr(expr, child),
    }
  }

  fn class_members(&mut self, members: &mut [Node<ClassMember>], scope: ScopeId) {
    for member in members {
      if let ClassOrObjKey::Computed(key) = &mut member.stx.key {
        self.expr(key, scope);
      }
      match &mut member.stx.val {
        ClassOrObjVal::Getter(getter) => self.func(&mut getter.stx.func, scope),
        ClassOrObjVal::Setter(setter) => self.func(&mut setter.stx.func, scope),
        ClassOrObjVal::Method(method) => self.func(&mut method.stx.func, scope),
        ClassOrObjVal::Prop(Some(value)) => self.expr(value, scope),
        ClassOrObjVal::Prop(None) => {}
      }
    }
  }

  fn obj_members(&mut self, members: &mut [Node<ObjMember>], scope: ScopeId) {
    for member in members {
      match &mut member.stx.typ {
        ObjMemberType::Valued { key, val } => {
          if let ClassOrObjKey::Computed(key) = key {
            self.expr(key, scope);
          }
          match val {
            ClassOrObjVal::Getter(getter) => self.func(&mut getter.stx.func, scope),
            ClassOrObjVal::Setter(setter) => self.func(&mut setter.stx.func, scope),
            ClassOrObjVal::Method(method) => self.func(&mut method.stx.func, scope),
            ClassOrObjVal::Prop(Some(value)) => self.expr(value, scope),
            ClassOrObjVal::Prop(None) => {}
          }
        }
        ObjMemberType::Shorthand { id } => {
          // A shorthand property reads the binding of the same name.
          let name = id.stx.name.clone();
          self.resolve_name(&name, &mut id.assoc, scope);
        }
        ObjMemberType::Rest { val } => self.expr(val, scope),
      }
    }
  }

  fn expr(&mut self, expr: &mut Node<Expr>, scope: ScopeId) {
    match &mut *expr.stx {
      Expr::ArrowFunc(arrow) => self.func(&mut arrow.stx.func, scope),
      Expr::Binary(binary) => {
        self.expr(&mut binary.stx.left, scope);
        self.expr(&mut binary.stx.right, scope);
      }
      Expr::Call(call) => {
        self.expr(&mut call.stx.callee, scope);
        for arg in &mut call.stx.arguments {
          self.expr(&mut arg.stx.value, scope);
        }
      }
      Expr::Class(class) => {
        let child = Self::assigned_scope(&class.assoc);
        if let Some(name) = &mut class.stx.name {
          let text = name.stx.name.clone();
          self.resolve_name(&text, &mut name.assoc, child);
        }
        if let Some(extends) = &mut class.stx.extends {
          self.expr(extends, child);
        }
        self.class_members(&mut class.stx.members, child);
      }
      Expr::ComputedMember(member) => {
        self.expr(&mut member.stx.object, scope);
        self.expr(&mut member.stx.member, scope);
      }
      Expr::Cond(cond) => {
        self.expr(&mut cond.stx.test, scope);
        self.expr(&mut cond.stx.consequent, scope);
        self.expr(&mut cond.stx.alternate, scope);
      }
      Expr::Func(func_expr) => {
        let child = Self::assigned_scope(&func_expr.stx.func.assoc);
        if let Some(name) = &mut func_expr.stx.name {
          let text = name.stx.name.clone();
          self.resolve_name(&text, &mut name.assoc, child);
        }
        self.func(&mut func_expr.stx.func, scope);
      }
      Expr::Id(id) => {
        let name = id.stx.name.clone();
        self.resolve_name(&name, &mut id.assoc, scope);
      }
      Expr::IdPat(id) => {
        let name = id.stx.name.clone();
        self.resolve_name(&name, &mut id.assoc, scope);
      }
      Expr::Member(member) => self.expr(&mut member.stx.left, scope),
      Expr::Super(_) | Expr::This(_) => {}
      Expr::Unary(unary) => self.expr(&mut unary.stx.argument, scope),
      Expr::UnaryPostfix(unary) => self.expr(&mut unary.stx.argument, scope),
      Expr::LitArr(arr) => {
        for elem in &mut arr.stx.elements {
          match elem {
            LitArrElem::Single(expr) | LitArrElem::Rest(expr) => self.expr(expr, scope),
            LitArrElem::Empty => {}
          }
        }
      }
      Expr::LitBool(_) | Expr::LitNull(_) | Expr::LitNum(_) | Expr::LitRegex(_)
      | Expr::LitStr(_) => {}
      Expr::LitObj(obj) => self.obj_members(&mut obj.stx.members, scope),
      Expr::LitTemplate(template) => {
        for part in &mut template.stx.parts {
          if let LitTemplatePart::Substitution(expr) = part {
            self.expr(expr, scope);
          }
        }
      }
      Expr::ArrPat(_) | Expr::ObjPat(_) => {}
    }
  }
}
