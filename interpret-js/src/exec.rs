use crate::env::ContextFrame;
use crate::env::Environment;
use crate::error::EvalError;
use crate::heap::CallableKind;
use crate::heap::Heap;
use crate::heap::ObjectKind;
use crate::ops;
use crate::property::PropertyDescriptor;
use crate::value::JsString;
use crate::value::ObjectId;
use crate::value::Value;
use scope_js::resolved_symbol;
use std::sync::Arc;
use syntax_js::ast::class_or_object::ClassOrObjKey;
use syntax_js::ast::class_or_object::ClassOrObjVal;
use syntax_js::ast::class_or_object::ObjMemberType;
use syntax_js::ast::expr::lit::LitArrElem;
use syntax_js::ast::expr::lit::LitObjExpr;
use syntax_js::ast::expr::lit::LitTemplatePart;
use syntax_js::ast::expr::pat::Pat;
use syntax_js::ast::expr::BinaryExpr;
use syntax_js::ast::expr::CallArg;
use syntax_js::ast::expr::CallExpr;
use syntax_js::ast::expr::Expr;
use syntax_js::ast::expr::UnaryExpr;
use syntax_js::ast::expr::UnaryPostfixExpr;
use syntax_js::ast::node::Node;
use syntax_js::ast::node::NodeAssocData;
use syntax_js::ast::stmt::decl::VarDecl;
use syntax_js::ast::stmt::decl::VarDeclMode;
use syntax_js::ast::stmt::DoWhileStmt;
use syntax_js::ast::stmt::ForBody;
use syntax_js::ast::stmt::ForInOfLhs;
use syntax_js::ast::stmt::ForInStmt;
use syntax_js::ast::stmt::ForOfStmt;
use syntax_js::ast::stmt::ForTripleStmt;
use syntax_js::ast::stmt::ForTripleStmtInit;
use syntax_js::ast::stmt::IfStmt;
use syntax_js::ast::stmt::Stmt;
use syntax_js::ast::stmt::SwitchStmt;
use syntax_js::ast::stmt::TryStmt;
use syntax_js::ast::stmt::WhileStmt;
use syntax_js::ast::stx::TopLevel;
use syntax_js::operator::OperatorName;
use tracing::trace;

/// A completion record: the outcome of evaluating a statement.
///
/// The "empty" completion value is modelled explicitly as `None` so statement-list evaluation can
/// implement `UpdateEmpty` correctly (e.g. `1; if (true) {}` should evaluate to `1`). Program
/// exceptions are not a variant here; they unwind through `Result` as [`EvalError::Throw`] and
/// only `try`/`catch` stops them.
#[derive(Clone, Debug, PartialEq)]
pub enum Completion {
  Normal(Option<Value>),
  Return(Value),
  Break(Option<Value>),
  Continue(Option<Value>),
}

impl Completion {
  pub fn empty() -> Self {
    Completion::Normal(None)
  }

  pub fn normal(value: Value) -> Self {
    Completion::Normal(Some(value))
  }

  pub fn is_abrupt(&self) -> bool {
    !matches!(self, Completion::Normal(_))
  }

  /// Implements `UpdateEmpty(completion, value)`.
  pub fn update_empty(self, value: Option<Value>) -> Self {
    match self {
      Completion::Normal(None) => Completion::Normal(value),
      Completion::Break(None) => Completion::Break(value),
      Completion::Continue(None) => Completion::Continue(value),
      other => other,
    }
  }
}

/// Evaluator configuration.
#[derive(Clone, Copy, Default, Debug)]
pub struct InterpreterOptions {
  /// When set, AST constructs the evaluator does not implement evaluate to `undefined` instead
  /// of raising [`EvalError::Unsupported`].
  pub skip_unsupported: bool,
}

/// Tree-walking evaluator over an analysed program.
///
/// The interpreter borrows the AST for its lifetime; callables hold references into it. One
/// instance is owned by one execution flow; evaluation is synchronous and has no suspension
/// points.
pub struct Interpreter<'a> {
  top: &'a Node<TopLevel>,
  heap: Heap<'a>,
  env: Environment,
  contexts: Vec<ContextFrame>,
  options: InterpreterOptions,
  globals: ObjectId,
}

/// A resolved assignment target: either a binding or an object property whose base and key have
/// been evaluated exactly once (compound assignment and update expressions read and write the
/// same reference).
pub(crate) enum TargetRef<'a> {
  Binding {
    assoc: &'a NodeAssocData,
    name: &'a str,
  },
  Property {
    object: Value,
    key: JsString,
  },
}

impl<'a> Interpreter<'a> {
  pub fn new(top: &'a Node<TopLevel>, options: InterpreterOptions) -> Interpreter<'a> {
    let mut heap = Heap::new();
    let globals = heap.alloc(ObjectKind::Ordinary);
    Interpreter {
      top,
      heap,
      env: Environment::new(),
      contexts: vec![ContextFrame {
        this_value: Value::Object(globals),
        ambient: Some(globals),
      }],
      options,
      globals,
    }
  }

  pub fn heap(&self) -> &Heap<'a> {
    &self.heap
  }

  pub fn heap_mut(&mut self) -> &mut Heap<'a> {
    &mut self.heap
  }

  pub fn options(&self) -> InterpreterOptions {
    self.options
  }

  /// The outermost ambient record; `this` at the top level.
  pub fn globals(&self) -> ObjectId {
    self.globals
  }

  /// Bind a host value in the outermost ambient record.
  pub fn define_global(&mut self, name: &str, value: Value) {
    let globals = self.globals;
    self
      .heap
      .define_property(globals, Arc::from(name), PropertyDescriptor::data(value));
  }

  /// Push an additional ambient record; free names search records innermost-first.
  pub fn push_ambient(&mut self, record: ObjectId) {
    self.contexts.push(ContextFrame {
      this_value: Value::Object(record),
      ambient: Some(record),
    });
  }

  pub fn current_this(&self) -> Value {
    self.contexts.last().map(|f| f.this_value.clone()).unwrap_or(Value::Undefined)
  }

  pub(crate) fn push_context(&mut self, frame: ContextFrame) {
    self.contexts.push(frame);
  }

  pub(crate) fn pop_context(&mut self) {
    self.contexts.pop();
  }

  /// Evaluate the top-level script and yield its final expression value.
  pub fn run(&mut self) -> Result<Value, EvalError> {
    let top = self.top;
    let completion = self.eval_block_nodes(&top.stx.body)?;
    match completion {
      Completion::Normal(v) => Ok(v.unwrap_or(Value::Undefined)),
      Completion::Return(_) => Err(EvalError::Unsupported("return outside of function")),
      Completion::Break(_) | Completion::Continue(_) => {
        Err(EvalError::Unsupported("break or continue outside of loop"))
      }
    }
  }

  fn unsupported_value(&self, what: &'static str) -> Result<Value, EvalError> {
    if self.options.skip_unsupported {
      Ok(Value::Undefined)
    } else {
      Err(EvalError::Unsupported(what))
    }
  }

  fn unsupported_completion(&self, what: &'static str) -> Result<Completion, EvalError> {
    if self.options.skip_unsupported {
      Ok(Completion::empty())
    } else {
      Err(EvalError::Unsupported(what))
    }
  }

  pub(crate) fn unsupported_unit(&self, what: &'static str) -> Result<(), EvalError> {
    if self.options.skip_unsupported {
      Ok(())
    } else {
      Err(EvalError::Unsupported(what))
    }
  }

  // --- Hoisting -------------------------------------------------------------------------------

  /// Hoist then evaluate a statement list: (a) function declarations become callables bound to
  /// their names, (b) `var` declarators pre-bind to undefined.
  pub(crate) fn eval_block_nodes(&mut self, stmts: &'a [Node<Stmt>]) -> Result<Completion, EvalError> {
    self.hoist_decls(stmts)?;
    self.eval_stmt_list(stmts)
  }

  fn hoist_decls(&mut self, stmts: &'a [Node<Stmt>]) -> Result<(), EvalError> {
    for stmt in stmts {
      if let Stmt::FunctionDecl(decl) = &*stmt.stx {
        let name: JsString = Arc::from(decl.stx.name.stx.name.as_str());
        let func_id = self.materialize_function(
          &decl.stx.function,
          CallableKind::Function,
          Some(name),
        )?;
        self.bind_declaration(
          &decl.stx.name.assoc,
          &decl.stx.name.stx.name,
          Value::Object(func_id),
        )?;
      };
    }
    for stmt in stmts {
      self.hoist_vars_in_stmt(stmt)?;
    }
    Ok(())
  }

  fn hoist_var_pat(&mut self, pat: &'a Node<Pat>) -> Result<(), EvalError> {
    if let Pat::Id(id) = &*pat.stx {
      if let Some(symbol) = resolved_symbol(&id.assoc) {
        if !self.env.is_declared(symbol) {
          self.env.declare(symbol, Value::Undefined);
        };
      };
    };
    Ok(())
  }

  fn hoist_vars_in_var_decl(&mut self, decl: &'a Node<VarDecl>) -> Result<(), EvalError> {
    if decl.stx.mode != VarDeclMode::Var {
      return Ok(());
    };
    for declarator in &decl.stx.declarators {
      self.hoist_var_pat(&declarator.pattern.stx.pat)?;
    }
    Ok(())
  }

  fn hoist_vars_in_stmt(&mut self, stmt: &'a Node<Stmt>) -> Result<(), EvalError> {
    match &*stmt.stx {
      Stmt::VarDecl(decl) => self.hoist_vars_in_var_decl(decl)?,
      Stmt::Block(block) => {
        for stmt in &block.stx.body {
          self.hoist_vars_in_stmt(stmt)?;
        }
      }
      Stmt::If(stmt) => {
        self.hoist_vars_in_stmt(&stmt.stx.consequent)?;
        if let Some(alternate) = &stmt.stx.alternate {
          self.hoist_vars_in_stmt(alternate)?;
        };
      }
      Stmt::Try(stmt) => {
        for s in &stmt.stx.wrapped.stx.body {
          self.hoist_vars_in_stmt(s)?;
        }
        if let Some(catch) = &stmt.stx.catch {
          for s in &catch.stx.body {
            self.hoist_vars_in_stmt(s)?;
          }
        };
        if let Some(finally) = &stmt.stx.finally {
          for s in &finally.stx.body {
            self.hoist_vars_in_stmt(s)?;
          }
        };
      }
      Stmt::While(stmt) => self.hoist_vars_in_stmt(&stmt.stx.body)?,
      Stmt::DoWhile(stmt) => self.hoist_vars_in_stmt(&stmt.stx.body)?,
      Stmt::ForTriple(stmt) => {
        if let ForTripleStmtInit::Decl(decl) = &stmt.stx.init {
          self.hoist_vars_in_var_decl(decl)?;
        };
        for s in &stmt.stx.body.stx.body {
          self.hoist_vars_in_stmt(s)?;
        }
      }
      Stmt::ForIn(stmt) => {
        if let ForInOfLhs::Decl((VarDeclMode::Var, pattern)) = &stmt.stx.lhs {
          self.hoist_var_pat(&pattern.stx.pat)?;
        };
        for s in &stmt.stx.body.stx.body {
          self.hoist_vars_in_stmt(s)?;
        }
      }
      Stmt::ForOf(stmt) => {
        if let ForInOfLhs::Decl((VarDeclMode::Var, pattern)) = &stmt.stx.lhs {
          self.hoist_var_pat(&pattern.stx.pat)?;
        };
        for s in &stmt.stx.body.stx.body {
          self.hoist_vars_in_stmt(s)?;
        }
      }
      Stmt::Label(stmt) => self.hoist_vars_in_stmt(&stmt.stx.statement)?,
      Stmt::Switch(stmt) => {
        for branch in &stmt.stx.branches {
          for s in &branch.stx.body {
            self.hoist_vars_in_stmt(s)?;
          }
        }
      }
      // Nested function declarations hoist their own bodies on call.
      Stmt::FunctionDecl(_) => {}
      _ => {}
    }
    Ok(())
  }

  pub(crate) fn bind_declaration(
    &mut self,
    assoc: &NodeAssocData,
    name: &str,
    value: Value,
  ) -> Result<(), EvalError> {
    match resolved_symbol(assoc) {
      Some(symbol) => self.env.declare(symbol, value),
      // The scope analyser annotates every declaration it sees; an unannotated one means the
      // tree was not analysed, which is a caller contract violation. Fall back to the ambient
      // record rather than losing the binding.
      None => self.define_global(name, value),
    }
    Ok(())
  }

  // --- Statements -----------------------------------------------------------------------------

  fn eval_stmt_list(&mut self, stmts: &'a [Node<Stmt>]) -> Result<Completion, EvalError> {
    let mut last_value: Option<Value> = None;
    for stmt in stmts {
      let completion = self.eval_stmt(stmt)?;
      let completion = completion.update_empty(last_value.clone());
      match completion {
        Completion::Normal(v) => {
          if let Some(v) = v {
            last_value = Some(v);
          };
        }
        abrupt => return Ok(abrupt),
      }
    }
    Ok(Completion::Normal(last_value))
  }

  pub(crate) fn eval_stmt(&mut self, stmt: &'a Node<Stmt>) -> Result<Completion, EvalError> {
    match &*stmt.stx {
      Stmt::Empty(_) | Stmt::Debugger(_) => Ok(Completion::empty()),
      Stmt::Expr(stmt) => Ok(Completion::normal(self.eval_expr(&stmt.stx.expr)?)),
      Stmt::VarDecl(decl) => self.eval_var_decl(&decl.stx),
      Stmt::Block(block) => self.eval_block_nodes(&block.stx.body),
      Stmt::If(stmt) => self.eval_if(&stmt.stx),
      Stmt::Throw(stmt) => {
        let value = self.eval_expr(&stmt.stx.value)?;
        Err(EvalError::Throw(value))
      }
      Stmt::Try(stmt) => self.eval_try(&stmt.stx),
      Stmt::Return(stmt) => {
        let value = match &stmt.stx.value {
          Some(expr) => self.eval_expr(expr)?,
          None => Value::Undefined,
        };
        Ok(Completion::Return(value))
      }
      Stmt::Break(_) => Ok(Completion::Break(None)),
      Stmt::Continue(_) => Ok(Completion::Continue(None)),
      Stmt::While(stmt) => self.eval_while(&stmt.stx),
      Stmt::DoWhile(stmt) => self.eval_do_while(&stmt.stx),
      Stmt::ForTriple(stmt) => self.eval_for_triple(&stmt.stx),
      Stmt::ForIn(stmt) => self.eval_for_in(&stmt.stx),
      Stmt::ForOf(stmt) => self.eval_for_of(&stmt.stx),
      Stmt::Switch(stmt) => self.eval_switch(&stmt.stx),
      Stmt::Label(_) => self.unsupported_completion("labelled statement"),
      Stmt::With(_) => self.unsupported_completion("with statement"),
      Stmt::ClassDecl(decl) => {
        self.build_class(Some(&decl.stx.name), decl.stx.extends.as_ref(), &decl.stx.members)?;
        Ok(Completion::empty())
      }
      // Already installed by the hoisting pass.
      Stmt::FunctionDecl(_) => Ok(Completion::empty()),
    }
  }

  fn eval_var_decl(&mut self, decl: &'a VarDecl) -> Result<Completion, EvalError> {
    for declarator in &decl.declarators {
      let Pat::Id(id) = &*declarator.pattern.stx.pat.stx else {
        return self.unsupported_completion("destructuring declaration");
      };
      let value = match &declarator.initializer {
        Some(init) => self.eval_expr(init)?,
        // `var` bindings without an initializer were already hoisted to undefined.
        None if decl.mode == VarDeclMode::Var => continue,
        None => Value::Undefined,
      };
      self.bind_declaration(&id.assoc, &id.stx.name, value)?;
    }
    Ok(Completion::empty())
  }

  fn eval_if(&mut self, stmt: &'a IfStmt) -> Result<Completion, EvalError> {
    let test = self.eval_expr(&stmt.test)?;
    if ops::to_boolean(&test) {
      self.eval_stmt(&stmt.consequent)
    } else if let Some(alternate) = &stmt.alternate {
      self.eval_stmt(alternate)
    } else {
      Ok(Completion::empty())
    }
  }

  fn eval_try(&mut self, stmt: &'a TryStmt) -> Result<Completion, EvalError> {
    let mut result = self.eval_block_nodes(&stmt.wrapped.stx.body);

    if let Err(EvalError::Throw(thrown)) = &result {
      if let Some(catch) = &stmt.catch {
        let thrown = thrown.clone();
        result = (|| {
          if let Some(parameter) = &catch.stx.parameter {
            let Pat::Id(id) = &*parameter.stx.pat.stx else {
              return self.unsupported_completion("destructuring catch parameter");
            };
            self.bind_declaration(&id.assoc, &id.stx.name, thrown)?;
          };
          self.eval_block_nodes(&catch.stx.body)
        })();
      };
    };

    if let Some(finally) = &stmt.finally {
      // The finalizer always runs; its completion replaces the pending one only when it is
      // itself abrupt.
      let finally_result = self.eval_block_nodes(&finally.stx.body)?;
      if finally_result.is_abrupt() {
        return Ok(finally_result);
      };
    };

    result
  }

  fn eval_while(&mut self, stmt: &'a WhileStmt) -> Result<Completion, EvalError> {
    loop {
      let test = self.eval_expr(&stmt.condition)?;
      if !ops::to_boolean(&test) {
        break;
      };
      match self.eval_stmt(&stmt.body)? {
        Completion::Normal(_) | Completion::Continue(_) => {}
        Completion::Break(_) => break,
        other => return Ok(other),
      }
    }
    Ok(Completion::empty())
  }

  fn eval_do_while(&mut self, stmt: &'a DoWhileStmt) -> Result<Completion, EvalError> {
    loop {
      match self.eval_stmt(&stmt.body)? {
        Completion::Normal(_) | Completion::Continue(_) => {}
        Completion::Break(_) => break,
        other => return Ok(other),
      }
      let test = self.eval_expr(&stmt.condition)?;
      if !ops::to_boolean(&test) {
        break;
      };
    }
    Ok(Completion::empty())
  }

  fn eval_for_triple(&mut self, stmt: &'a ForTripleStmt) -> Result<Completion, EvalError> {
    match &stmt.init {
      ForTripleStmtInit::None => {}
      ForTripleStmtInit::Expr(expr) => {
        self.eval_expr(expr)?;
      }
      ForTripleStmtInit::Decl(decl) => {
        self.hoist_vars_in_var_decl(decl)?;
        self.eval_var_decl(&decl.stx)?;
      }
    }

    loop {
      if let Some(cond) = &stmt.cond {
        let test = self.eval_expr(cond)?;
        if !ops::to_boolean(&test) {
          break;
        };
      };

      match self.eval_for_body(&stmt.body.stx)? {
        Completion::Normal(_) | Completion::Continue(_) => {}
        Completion::Break(_) => break,
        other => return Ok(other),
      }

      if let Some(post) = &stmt.post {
        self.eval_expr(post)?;
      };
    }

    Ok(Completion::empty())
  }

  fn eval_for_body(&mut self, body: &'a ForBody) -> Result<Completion, EvalError> {
    self.eval_block_nodes(&body.body)
  }

  fn eval_for_in(&mut self, stmt: &'a ForInStmt) -> Result<Completion, EvalError> {
    let rhs = self.eval_expr(&stmt.rhs)?;
    let keys: Vec<JsString> = match &rhs {
      Value::Object(id) => self.enumerate_keys(*id),
      Value::String(s) => (0..s.chars().count())
        .map(|i| JsString::from(i.to_string().as_str()))
        .collect(),
      // null/undefined (and other primitives) enumerate nothing.
      _ => Vec::new(),
    };

    for key in keys {
      self.bind_for_lhs(&stmt.lhs, Value::String(key))?;
      match self.eval_for_body(&stmt.body.stx)? {
        Completion::Normal(_) | Completion::Continue(_) => {}
        Completion::Break(_) => break,
        other => return Ok(other),
      }
    }
    Ok(Completion::empty())
  }

  fn eval_for_of(&mut self, stmt: &'a ForOfStmt) -> Result<Completion, EvalError> {
    if stmt.await_ {
      return self.unsupported_completion("for-await loop");
    };
    let rhs = self.eval_expr(&stmt.rhs)?;
    let values = self.iterate_values(&rhs)?;

    for value in values {
      self.bind_for_lhs(&stmt.lhs, value)?;
      match self.eval_for_body(&stmt.body.stx)? {
        Completion::Normal(_) | Completion::Continue(_) => {}
        Completion::Break(_) => break,
        other => return Ok(other),
      }
    }
    Ok(Completion::empty())
  }

  fn bind_for_lhs(&mut self, lhs: &'a ForInOfLhs, value: Value) -> Result<(), EvalError> {
    match lhs {
      ForInOfLhs::Decl((_, pattern)) => {
        let Pat::Id(id) = &*pattern.stx.pat.stx else {
          return self.unsupported_unit("destructuring loop binding");
        };
        self.bind_declaration(&id.assoc, &id.stx.name, value)
      }
      ForInOfLhs::Assign(pat) => match &*pat.stx {
        Pat::Id(id) => self.assign_identifier(&id.assoc, &id.stx.name, value),
        _ => self.unsupported_unit("destructuring loop binding"),
      },
    }
  }

  fn eval_switch(&mut self, stmt: &'a SwitchStmt) -> Result<Completion, EvalError> {
    let discriminant = self.eval_expr(&stmt.test)?;

    for branch in &stmt.branches {
      self.hoist_decls(&branch.stx.body)?;
    }

    // Select the first strictly-equal case clause, or `default` if none matches.
    let mut default_idx: Option<usize> = None;
    let mut start_idx: Option<usize> = None;
    for (i, branch) in stmt.branches.iter().enumerate() {
      match &branch.stx.case {
        None => {
          if default_idx.is_none() {
            default_idx = Some(i);
          };
        }
        Some(case) => {
          let case_value = self.eval_expr(case)?;
          if ops::strict_equals(&discriminant, &case_value) {
            start_idx = Some(i);
            break;
          };
        }
      }
    }
    let Some(start_idx) = start_idx.or(default_idx) else {
      return Ok(Completion::empty());
    };

    // Fall through clause bodies until a break or other abrupt completion.
    let mut last_value: Option<Value> = None;
    for branch in stmt.branches.iter().skip(start_idx) {
      for stmt in &branch.stx.body {
        let completion = self.eval_stmt(stmt)?.update_empty(last_value.clone());
        match completion {
          Completion::Normal(v) => {
            if let Some(v) = v {
              last_value = Some(v);
            };
          }
          Completion::Break(v) => return Ok(Completion::Normal(v)),
          abrupt => return Ok(abrupt),
        }
      }
    }
    Ok(Completion::Normal(last_value))
  }

  // --- Identifiers and assignment targets -----------------------------------------------------

  fn ambient_records(&self) -> Vec<ObjectId> {
    self
      .contexts
      .iter()
      .rev()
      .filter_map(|frame| frame.ambient)
      .collect()
  }

  pub(crate) fn lookup_identifier_optional(
    &mut self,
    assoc: &NodeAssocData,
    name: &str,
  ) -> Result<Option<Value>, EvalError> {
    if let Some(symbol) = resolved_symbol(assoc) {
      if let Some(value) = self.env.get(symbol) {
        return Ok(Some(value.clone()));
      };
    };
    for record in self.ambient_records() {
      if self.has_property(record, name) {
        return Ok(Some(self.get_property(&Value::Object(record), name)?));
      };
    }
    Ok(None)
  }

  fn lookup_identifier(&mut self, assoc: &NodeAssocData, name: &str) -> Result<Value, EvalError> {
    self
      .lookup_identifier_optional(assoc, name)?
      .ok_or_else(|| EvalError::Reference(name.to_string()))
  }

  pub(crate) fn assign_identifier(
    &mut self,
    assoc: &NodeAssocData,
    name: &str,
    value: Value,
  ) -> Result<(), EvalError> {
    if let Some(symbol) = resolved_symbol(assoc) {
      self.env.set(symbol, value);
      return Ok(());
    };
    for record in self.ambient_records() {
      if self.has_property(record, name) {
        return self.set_property(&Value::Object(record), name, value);
      };
    }
    // Assignment to an undeclared name creates it on the outermost ambient record.
    self.define_global(name, value);
    Ok(())
  }

  fn resolve_target(&mut self, target: &'a Node<Expr>) -> Result<TargetRef<'a>, EvalError> {
    match &*target.stx {
      Expr::Id(id) => Ok(TargetRef::Binding {
        assoc: &id.assoc,
        name: &id.stx.name,
      }),
      Expr::IdPat(id) => Ok(TargetRef::Binding {
        assoc: &id.assoc,
        name: &id.stx.name,
      }),
      Expr::Member(member) => {
        let object = self.eval_expr(&member.stx.left)?;
        Ok(TargetRef::Property {
          object,
          key: Arc::from(member.stx.right.as_str()),
        })
      }
      Expr::ComputedMember(member) => {
        let object = self.eval_expr(&member.stx.object)?;
        let key_value = self.eval_expr(&member.stx.member)?;
        let key = ops::to_string(self, &key_value)?;
        Ok(TargetRef::Property { object, key })
      }
      _ => Err(EvalError::Unsupported("destructuring assignment")),
    }
  }

  fn read_target(&mut self, target: &TargetRef<'a>) -> Result<Value, EvalError> {
    match target {
      TargetRef::Binding { assoc, name } => self.lookup_identifier(assoc, name),
      TargetRef::Property { object, key } => {
        let object = object.clone();
        self.get_property(&object, key)
      }
    }
  }

  fn write_target(&mut self, target: &TargetRef<'a>, value: Value) -> Result<(), EvalError> {
    match target {
      TargetRef::Binding { assoc, name } => self.assign_identifier(assoc, name, value),
      TargetRef::Property { object, key } => {
        let object = object.clone();
        self.set_property(&object, key, value)
      }
    }
  }

  // --- Expressions ----------------------------------------------------------------------------

  pub(crate) fn eval_expr(&mut self, expr: &'a Node<Expr>) -> Result<Value, EvalError> {
    match &*expr.stx {
      Expr::LitStr(node) => Ok(Value::string(&node.stx.value)),
      Expr::LitNum(node) => Ok(Value::Number(node.stx.value.0)),
      Expr::LitBool(node) => Ok(Value::Bool(node.stx.value)),
      Expr::LitNull(_) => Ok(Value::Null),
      Expr::LitRegex(node) => {
        let regex = crate::heap::RegexValue {
          pattern: Arc::from(node.stx.pattern.as_str()),
          flags: crate::heap::RegexFlags::parse(&node.stx.flags),
        };
        Ok(Value::Object(self.heap.alloc(ObjectKind::Regex(regex))))
      }
      Expr::LitTemplate(node) => {
        let mut out = String::new();
        for part in &node.stx.parts {
          match part {
            LitTemplatePart::String(s) => out.push_str(s),
            LitTemplatePart::Substitution(expr) => {
              let value = self.eval_expr(expr)?;
              out.push_str(&ops::to_string(self, &value)?);
            }
          }
        }
        Ok(Value::string(out))
      }
      Expr::LitArr(node) => {
        let mut elements = Vec::with_capacity(node.stx.elements.len());
        for element in &node.stx.elements {
          match element {
            LitArrElem::Single(expr) => elements.push(self.eval_expr(expr)?),
            LitArrElem::Rest(expr) => {
              let spread = self.eval_expr(expr)?;
              elements.extend(self.iterate_values(&spread)?);
            }
            LitArrElem::Empty => elements.push(Value::Null),
          }
        }
        Ok(Value::Object(self.heap.alloc(ObjectKind::Array(elements))))
      }
      Expr::LitObj(node) => self.eval_obj_literal(&node.stx),
      Expr::Id(node) => self.lookup_identifier(&node.assoc, &node.stx.name),
      Expr::IdPat(node) => self.lookup_identifier(&node.assoc, &node.stx.name),
      Expr::This(_) => Ok(self.current_this()),
      Expr::Member(node) => {
        let object = self.eval_expr(&node.stx.left)?;
        if node.stx.optional_chaining && object.is_nullish() {
          return Ok(Value::Undefined);
        };
        self.get_property(&object, &node.stx.right)
      }
      Expr::ComputedMember(node) => {
        let object = self.eval_expr(&node.stx.object)?;
        if node.stx.optional_chaining && object.is_nullish() {
          return Ok(Value::Undefined);
        };
        let key_value = self.eval_expr(&node.stx.member)?;
        let key = ops::to_string(self, &key_value)?;
        self.get_property(&object, &key)
      }
      Expr::Call(node) => self.eval_call(&node.stx),
      Expr::Binary(node) => self.eval_binary(&node.stx),
      Expr::Cond(node) => {
        let test = self.eval_expr(&node.stx.test)?;
        if ops::to_boolean(&test) {
          self.eval_expr(&node.stx.consequent)
        } else {
          self.eval_expr(&node.stx.alternate)
        }
      }
      Expr::Unary(node) => self.eval_unary(&node.stx),
      Expr::UnaryPostfix(node) => self.eval_unary_postfix(&node.stx),
      Expr::Func(node) => {
        let name = node.stx.name.as_ref().map(|n| JsString::from(n.stx.name.as_str()));
        let id = self.materialize_function(&node.stx.func, CallableKind::Function, name.clone())?;
        // A named function expression can reference itself.
        if let Some(name_node) = &node.stx.name {
          self.bind_declaration(&name_node.assoc, &name_node.stx.name, Value::Object(id))?;
        };
        Ok(Value::Object(id))
      }
      Expr::ArrowFunc(node) => {
        let id = self.materialize_function(&node.stx.func, CallableKind::Arrow, None)?;
        Ok(Value::Object(id))
      }
      Expr::Class(node) => self.build_class(
        node.stx.name.as_ref(),
        node.stx.extends.as_ref(),
        &node.stx.members,
      ),
      Expr::Super(_) => self.unsupported_value("super reference"),
      Expr::ArrPat(_) | Expr::ObjPat(_) => self.unsupported_value("destructuring pattern"),
    }
  }

  fn eval_obj_literal(&mut self, node: &'a LitObjExpr) -> Result<Value, EvalError> {
    let id = self.heap.alloc(ObjectKind::Ordinary);
    for member in &node.members {
      match &member.stx.typ {
        ObjMemberType::Valued { key, val } => {
          let key: JsString = match key {
            ClassOrObjKey::Direct(key) => Arc::from(key.stx.key.as_str()),
            ClassOrObjKey::Computed(expr) => {
              let value = self.eval_expr(expr)?;
              ops::to_string(self, &value)?
            }
          };
          match val {
            ClassOrObjVal::Prop(Some(expr)) => {
              let value = self.eval_expr(expr)?;
              self
                .heap
                .define_property(id, key, PropertyDescriptor::data(value));
            }
            ClassOrObjVal::Prop(None) => {
              // Cannot be produced by the object literal grammar.
            }
            ClassOrObjVal::Method(method) => {
              let func = self.materialize_function(
                &method.stx.func,
                CallableKind::Method,
                Some(key.clone()),
              )?;
              self
                .heap
                .define_property(id, key, PropertyDescriptor::data(Value::Object(func)));
            }
            ClassOrObjVal::Getter(getter) => {
              let func = self.materialize_function(
                &getter.stx.func,
                CallableKind::Method,
                Some(key.clone()),
              )?;
              self.define_accessor(id, &key, Some(Value::Object(func)), None);
            }
            ClassOrObjVal::Setter(setter) => {
              let func = self.materialize_function(
                &setter.stx.func,
                CallableKind::Method,
                Some(key.clone()),
              )?;
              self.define_accessor(id, &key, None, Some(Value::Object(func)));
            }
          }
        }
        ObjMemberType::Shorthand { id: name } => {
          let value = self.lookup_identifier(&name.assoc, &name.stx.name)?;
          self.heap.define_property(
            id,
            Arc::from(name.stx.name.as_str()),
            PropertyDescriptor::data(value),
          );
        }
        ObjMemberType::Rest { val } => {
          // Spread copies the source's own enumerable properties.
          let source = self.eval_expr(val)?;
          if let Value::Object(source_id) = &source {
            for key in self.own_enumerable_keys(*source_id) {
              let value = self.get_property(&source, &key)?;
              self
                .heap
                .define_property(id, key, PropertyDescriptor::data(value));
            }
          };
        }
      }
    }
    Ok(Value::Object(id))
  }

  fn eval_args(&mut self, arguments: &'a [Node<CallArg>]) -> Result<Vec<Value>, EvalError> {
    let mut args = Vec::with_capacity(arguments.len());
    for arg in arguments {
      let value = self.eval_expr(&arg.stx.value)?;
      if arg.stx.spread {
        args.extend(self.iterate_values(&value)?);
      } else {
        args.push(value);
      };
    }
    Ok(args)
  }

  fn eval_call(&mut self, call: &'a CallExpr) -> Result<Value, EvalError> {
    // A member callee binds the object as the receiver; anything else runs with the current
    // context's receiver.
    let (callee, this_value) = match &*call.callee.stx {
      Expr::Member(member) => {
        let object = self.eval_expr(&member.stx.left)?;
        if member.stx.optional_chaining && object.is_nullish() {
          return Ok(Value::Undefined);
        };
        let callee = self.get_property(&object, &member.stx.right)?;
        (callee, object)
      }
      Expr::ComputedMember(member) => {
        let object = self.eval_expr(&member.stx.object)?;
        if member.stx.optional_chaining && object.is_nullish() {
          return Ok(Value::Undefined);
        };
        let key_value = self.eval_expr(&member.stx.member)?;
        let key = ops::to_string(self, &key_value)?;
        let callee = self.get_property(&object, &key)?;
        (callee, object)
      }
      Expr::Super(_) => return self.unsupported_value("super call"),
      _ => (self.eval_expr(&call.callee)?, self.current_this()),
    };

    if call.optional_chaining && callee.is_nullish() {
      return Ok(Value::Undefined);
    };

    let args = self.eval_args(&call.arguments)?;
    self.call_value(callee, this_value, &args)
  }

  fn eval_unary(&mut self, node: &'a UnaryExpr) -> Result<Value, EvalError> {
    match node.operator {
      OperatorName::Typeof => {
        // `typeof` on an undeclared identifier yields "undefined" rather than failing.
        let value = match &*node.argument.stx {
          Expr::Id(id) => self.lookup_identifier_optional(&id.assoc, &id.stx.name)?,
          Expr::IdPat(id) => self.lookup_identifier_optional(&id.assoc, &id.stx.name)?,
          _ => Some(self.eval_expr(&node.argument)?),
        };
        Ok(match value {
          Some(value) => Value::string(ops::type_of(self, &value)),
          None => Value::string("undefined"),
        })
      }
      OperatorName::LogicalNot => {
        let value = self.eval_expr(&node.argument)?;
        Ok(Value::Bool(!ops::to_boolean(&value)))
      }
      OperatorName::UnaryPlus => {
        let value = self.eval_expr(&node.argument)?;
        Ok(Value::Number(ops::to_number(self, &value)?))
      }
      OperatorName::UnaryNegation => {
        let value = self.eval_expr(&node.argument)?;
        Ok(Value::Number(-ops::to_number(self, &value)?))
      }
      OperatorName::BitwiseNot => {
        let value = self.eval_expr(&node.argument)?;
        Ok(Value::Number(!ops::to_int32(ops::to_number(self, &value)?) as f64))
      }
      OperatorName::Void => {
        self.eval_expr(&node.argument)?;
        Ok(Value::Undefined)
      }
      OperatorName::Delete => match &*node.argument.stx {
        Expr::Member(member) => {
          let object = self.eval_expr(&member.stx.left)?;
          Ok(Value::Bool(self.delete_property(&object, &member.stx.right)?))
        }
        Expr::ComputedMember(member) => {
          let object = self.eval_expr(&member.stx.object)?;
          let key_value = self.eval_expr(&member.stx.member)?;
          let key = ops::to_string(self, &key_value)?;
          Ok(Value::Bool(self.delete_property(&object, &key)?))
        }
        Expr::Id(_) | Expr::IdPat(_) => Ok(Value::Bool(false)),
        _ => {
          self.eval_expr(&node.argument)?;
          Ok(Value::Bool(true))
        }
      },
      OperatorName::New => self.eval_new(&node.argument),
      OperatorName::PrefixIncrement | OperatorName::PrefixDecrement => {
        let target = self.resolve_target(&node.argument)?;
        let current = self.read_target(&target)?;
        let n = ops::to_number(self, &current)?;
        let next = if node.operator == OperatorName::PrefixIncrement {
          n + 1.0
        } else {
          n - 1.0
        };
        self.write_target(&target, Value::Number(next))?;
        Ok(Value::Number(next))
      }
      OperatorName::Await => self.unsupported_value("await expression"),
      OperatorName::Yield => self.unsupported_value("yield expression"),
      _ => self.unsupported_value("unary operator"),
    }
  }

  fn eval_unary_postfix(&mut self, node: &'a UnaryPostfixExpr) -> Result<Value, EvalError> {
    let target = self.resolve_target(&node.argument)?;
    let current = self.read_target(&target)?;
    let n = ops::to_number(self, &current)?;
    let next = if node.operator == OperatorName::PostfixIncrement {
      n + 1.0
    } else {
      n - 1.0
    };
    self.write_target(&target, Value::Number(next))?;
    // Postfix yields the pre-value (after numeric conversion).
    Ok(Value::Number(n))
  }

  fn eval_new(&mut self, argument: &'a Node<Expr>) -> Result<Value, EvalError> {
    let (callee, args) = match &*argument.stx {
      Expr::Call(call) => {
        let callee = self.eval_expr(&call.stx.callee)?;
        let args = self.eval_args(&call.stx.arguments)?;
        (callee, args)
      }
      // `new C` without an argument list.
      _ => (self.eval_expr(argument)?, Vec::new()),
    };
    self.construct(&callee, &args)
  }

  fn eval_binary(&mut self, node: &'a BinaryExpr) -> Result<Value, EvalError> {
    match node.operator {
      OperatorName::Assignment => {
        let target = self.resolve_target(&node.left)?;
        let value = self.eval_expr(&node.right)?;
        self.write_target(&target, value.clone())?;
        Ok(value)
      }
      // Short-circuiting operators evaluate the right operand only when needed.
      OperatorName::LogicalAnd => {
        let left = self.eval_expr(&node.left)?;
        if !ops::to_boolean(&left) {
          return Ok(left);
        };
        self.eval_expr(&node.right)
      }
      OperatorName::LogicalOr => {
        let left = self.eval_expr(&node.left)?;
        if ops::to_boolean(&left) {
          return Ok(left);
        };
        self.eval_expr(&node.right)
      }
      OperatorName::NullishCoalescing => {
        let left = self.eval_expr(&node.left)?;
        if !left.is_nullish() {
          return Ok(left);
        };
        self.eval_expr(&node.right)
      }
      OperatorName::Comma => {
        self.eval_expr(&node.left)?;
        self.eval_expr(&node.right)
      }
      OperatorName::AssignmentLogicalAnd
      | OperatorName::AssignmentLogicalOr
      | OperatorName::AssignmentNullishCoalescing => {
        let target = self.resolve_target(&node.left)?;
        let current = self.read_target(&target)?;
        let should_assign = match node.operator {
          OperatorName::AssignmentLogicalAnd => ops::to_boolean(&current),
          OperatorName::AssignmentLogicalOr => !ops::to_boolean(&current),
          _ => current.is_nullish(),
        };
        if !should_assign {
          return Ok(current);
        };
        let value = self.eval_expr(&node.right)?;
        self.write_target(&target, value.clone())?;
        Ok(value)
      }
      operator if operator.is_assignment() => {
        let data_op = operator.compound_binary().unwrap();
        let target = self.resolve_target(&node.left)?;
        let current = self.read_target(&target)?;
        let right = self.eval_expr(&node.right)?;
        let value = ops::binary_op(self, data_op, &current, &right)?;
        self.write_target(&target, value.clone())?;
        Ok(value)
      }
      operator => {
        let left = self.eval_expr(&node.left)?;
        let right = self.eval_expr(&node.right)?;
        trace!(?operator, "binary operation");
        ops::binary_op(self, operator, &left, &right)
      }
    }
  }
}
