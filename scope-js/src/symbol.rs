use ahash::HashMap;

/// Unique identity of one declared binding. Every lexical occurrence of a name within the scope
/// that declares it resolves to the same symbol; distinct declarations get distinct symbols.
///
/// Downstream code treats this as an opaque key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Symbol(u32);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ScopeType {
  Global,
  /// A function body including its parameters. `var` declarations hoist to the nearest one.
  Closure,
  Block,
}

/// Handle into a [`ScopeTree`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ScopeId(u32);

struct ScopeData {
  parent: Option<ScopeId>,
  typ: ScopeType,
  symbols: HashMap<String, Symbol>,
}

/// The scope tree of one program, stored as an arena so handles stay `Copy` and can ride on AST
/// nodes as association data.
pub struct ScopeTree {
  scopes: Vec<ScopeData>,
  next_symbol: u32,
}

impl ScopeTree {
  pub fn new(root_typ: ScopeType) -> ScopeTree {
    ScopeTree {
      scopes: vec![ScopeData {
        parent: None,
        typ: root_typ,
        symbols: HashMap::default(),
      }],
      next_symbol: 0,
    }
  }

  pub fn root(&self) -> ScopeId {
    ScopeId(0)
  }

  pub fn create_scope(&mut self, parent: ScopeId, typ: ScopeType) -> ScopeId {
    let id = ScopeId(self.scopes.len() as u32);
    self.scopes.push(ScopeData {
      parent: Some(parent),
      typ,
      symbols: HashMap::default(),
    });
    id
  }

  fn data(&self, scope: ScopeId) -> &ScopeData {
    &self.scopes[scope.0 as usize]
  }

  pub fn typ(&self, scope: ScopeId) -> ScopeType {
    self.data(scope).typ
  }

  pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
    self.data(scope).parent
  }

  /// The scope `var` declarations in `scope` hoist to: the nearest enclosing closure, or the
  /// global scope.
  pub fn hoist_scope(&self, scope: ScopeId) -> ScopeId {
    let mut current = scope;
    loop {
      match self.typ(current) {
        ScopeType::Closure | ScopeType::Global => return current,
        ScopeType::Block => current = self.parent(current).unwrap(),
      }
    }
  }

  /// Declare `name` in `scope`. Redeclaration of the same name in the same scope yields the
  /// existing symbol (`var a; var a;` is one binding).
  pub fn declare(&mut self, scope: ScopeId, name: &str) -> Symbol {
    if let Some(existing) = self.data(scope).symbols.get(name) {
      return *existing;
    };
    let symbol = Symbol(self.next_symbol);
    self.next_symbol += 1;
    self.scopes[scope.0 as usize]
      .symbols
      .insert(name.to_string(), symbol);
    symbol
  }

  /// Resolve `name` from `scope` outward. `None` means the name is free and falls through to the
  /// runtime's ambient context.
  pub fn find(&self, scope: ScopeId, name: &str) -> Option<Symbol> {
    let mut current = Some(scope);
    while let Some(id) = current {
      if let Some(symbol) = self.data(id).symbols.get(name) {
        return Some(*symbol);
      };
      current = self.parent(id);
    }
    None
  }

  /// Number of symbols declared across the whole tree.
  pub fn symbol_count(&self) -> usize {
    self.next_symbol as usize
  }
}
