use crate::env::ContextFrame;
use crate::error::EvalError;
use crate::exec::Completion;
use crate::exec::Interpreter;
use crate::heap::CallableKind;
use crate::heap::ClassRecord;
use crate::heap::ObjectKind;
use crate::ops;
use crate::property::PropertyDescriptor;
use crate::property::PropertyKind;
use crate::value::JsString;
use crate::value::ObjectId;
use crate::value::Value;
use std::sync::Arc;
use syntax_js::ast::class_or_object::ClassMember;
use syntax_js::ast::class_or_object::ClassOrObjKey;
use syntax_js::ast::class_or_object::ClassOrObjVal;
use syntax_js::ast::expr::pat::ClassOrFuncName;
use syntax_js::ast::expr::pat::Pat;
use syntax_js::ast::expr::Expr;
use syntax_js::ast::func::Func;
use syntax_js::ast::func::FuncBody;
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::decl::ParamDecl;
use tracing::debug_span;

impl<'a> Interpreter<'a> {
  /// Build a callable value from a function/arrow/method node. Arrows capture the receiver of
  /// the creating activation; plain functions get a fresh `prototype` object so they are
  /// constructable.
  pub fn materialize_function(
    &mut self,
    func: &'a Node<Func>,
    kind: CallableKind,
    name: Option<JsString>,
  ) -> Result<ObjectId, EvalError> {
    let captured_this = match kind {
      CallableKind::Arrow => Some(self.current_this()),
      _ => None,
    };
    let id = self.heap_mut().alloc(ObjectKind::Function(crate::heap::UserFunction {
      kind,
      name,
      func,
      captured_this,
    }));
    if kind == CallableKind::Function {
      let proto = self.heap_mut().alloc(ObjectKind::Ordinary);
      self.heap_mut().define_property(
        proto,
        Arc::from("constructor"),
        PropertyDescriptor::hidden_data(Value::Object(id)),
      );
      self.heap_mut().define_property(
        id,
        Arc::from("prototype"),
        PropertyDescriptor::hidden_data(Value::Object(proto)),
      );
    };
    Ok(id)
  }

  /// Invoke a callable value with an explicit receiver.
  pub fn call_value(
    &mut self,
    callee: Value,
    this_value: Value,
    args: &[Value],
  ) -> Result<Value, EvalError> {
    let Value::Object(id) = &callee else {
      return Err(EvalError::Type(format!(
        "{} is not a function",
        ops::type_of(self, &callee)
      )));
    };
    enum Dispatch {
      User,
      Native(crate::heap::NativeCallFn),
      Class(JsString),
      NotCallable,
    }
    let dispatch = match &self.heap().cell(*id).kind {
      ObjectKind::Function(_) => Dispatch::User,
      ObjectKind::Native(native) => Dispatch::Native(native.call),
      ObjectKind::Class(class) => Dispatch::Class(class.name.clone()),
      _ => Dispatch::NotCallable,
    };
    match dispatch {
      Dispatch::User => self.call_user(*id, this_value, args),
      Dispatch::Native(call) => call(self, this_value, args),
      Dispatch::Class(name) => Err(EvalError::Type(format!(
        "Class constructor {name} cannot be invoked without 'new'"
      ))),
      Dispatch::NotCallable => Err(EvalError::Type("value is not a function".to_string())),
    }
  }

  fn call_user(
    &mut self,
    id: ObjectId,
    this_value: Value,
    args: &[Value],
  ) -> Result<Value, EvalError> {
    let ObjectKind::Function(user) = &self.heap().cell(id).kind else {
      unreachable!();
    };
    let func = user.func;
    let kind = user.kind;
    let captured_this = user.captured_this.clone();
    let name = user.name.clone();

    if func.stx.async_ {
      return Err(EvalError::Unsupported("async function"));
    };
    if func.stx.generator {
      return Err(EvalError::Unsupported("generator function"));
    };

    let _span = debug_span!(
      "call",
      function = name.as_deref().unwrap_or("<anonymous>")
    )
    .entered();

    // Arrows inherit the receiver captured at materialisation; everything else takes the
    // callsite's.
    let this_value = match kind {
      CallableKind::Arrow => captured_this.unwrap_or(Value::Undefined),
      _ => this_value,
    };

    self.push_context(ContextFrame {
      this_value,
      ambient: None,
    });
    let result = (|| {
      self.bind_parameters(&func.stx.parameters, args)?;
      match &func.stx.body {
        FuncBody::Expression(expr) => self.eval_expr(expr),
        FuncBody::Block(body) => {
          match self.eval_block_nodes(body)? {
            Completion::Return(value) => Ok(value),
            Completion::Normal(_) => Ok(Value::Undefined),
            Completion::Break(_) | Completion::Continue(_) => {
              Err(EvalError::Unsupported("break or continue outside of loop"))
            }
          }
        }
      }
    })();
    self.pop_context();
    result
  }

  fn bind_parameters(
    &mut self,
    parameters: &'a [Node<ParamDecl>],
    args: &[Value],
  ) -> Result<(), EvalError> {
    for (i, param) in parameters.iter().enumerate() {
      if param.stx.rest {
        return self.unsupported_unit("rest parameter");
      };
      let Pat::Id(id) = &*param.stx.pattern.stx.pat.stx else {
        return self.unsupported_unit("destructuring parameter");
      };
      let mut value = args.get(i).cloned().unwrap_or(Value::Undefined);
      if value == Value::Undefined {
        if let Some(default_value) = &param.stx.default_value {
          value = self.eval_expr(default_value)?;
        };
      };
      self.bind_declaration(&id.assoc, &id.stx.name, value)?;
    }
    Ok(())
  }

  /// `new`: allocate an instance wired to the constructor's prototype, run the constructor with
  /// the instance as receiver, and let an object-valued constructor return override the result.
  pub fn construct(&mut self, callee: &Value, args: &[Value]) -> Result<Value, EvalError> {
    let Value::Object(id) = callee else {
      return Err(EvalError::Type(format!(
        "{} is not a constructor",
        ops::type_of(self, callee)
      )));
    };
    enum Dispatch {
      Class,
      User(CallableKind),
      Native(&'static str, Option<crate::heap::NativeCallFn>),
      NotConstructable,
    }
    let dispatch = match &self.heap().cell(*id).kind {
      ObjectKind::Class(_) => Dispatch::Class,
      ObjectKind::Function(user) => Dispatch::User(user.kind),
      ObjectKind::Native(native) => Dispatch::Native(native.name, native.construct),
      _ => Dispatch::NotConstructable,
    };
    match dispatch {
      Dispatch::Class => self.construct_class(*id, args),
      Dispatch::User(kind) => {
        if kind != CallableKind::Function {
          return Err(EvalError::Type("value is not a constructor".to_string()));
        };
        let proto = match self.get_property(callee, "prototype")? {
          Value::Object(p) => Some(p),
          _ => None,
        };
        let instance = self.heap_mut().alloc_with_proto(ObjectKind::Ordinary, proto);
        let result = self.call_user(*id, Value::Object(instance), args)?;
        Ok(match result {
          Value::Object(_) => result,
          _ => Value::Object(instance),
        })
      }
      Dispatch::Native(name, construct) => match construct {
        Some(construct) => construct(self, Value::Undefined, args),
        None => Err(EvalError::Type(format!("{name} is not a constructor"))),
      },
      Dispatch::NotConstructable => {
        Err(EvalError::Type("value is not a constructor".to_string()))
      }
    }
  }

  fn construct_class(&mut self, class_id: ObjectId, args: &[Value]) -> Result<Value, EvalError> {
    let ObjectKind::Class(class) = &self.heap().cell(class_id).kind else {
      unreachable!();
    };
    let prototype = class.prototype;

    // Without an explicit constructor, a class constructs as its nearest ancestor with one
    // (arguments forwarded), or does nothing.
    let mut constructor = None;
    let mut current = Some(class_id);
    while let Some(id) = current {
      let ObjectKind::Class(class) = &self.heap().cell(id).kind else {
        break;
      };
      if let Some(ctor) = class.constructor {
        constructor = Some(ctor);
        break;
      };
      current = class.parent;
    }

    let instance = self
      .heap_mut()
      .alloc_with_proto(ObjectKind::Ordinary, Some(prototype));
    let result = match constructor {
      Some(ctor) => self.call_user(ctor, Value::Object(instance), args)?,
      None => Value::Undefined,
    };
    Ok(match result {
      Value::Object(_) => result,
      _ => Value::Object(instance),
    })
  }

  /// Synthesise a class value: instance methods on the prototype, statics on the class object,
  /// prototype chain linked to the parent's.
  pub fn build_class(
    &mut self,
    name: Option<&'a Node<ClassOrFuncName>>,
    extends: Option<&'a Node<Expr>>,
    members: &'a [Node<ClassMember>],
  ) -> Result<Value, EvalError> {
    let parent = match extends {
      Some(expr) => {
        let value = self.eval_expr(expr)?;
        match &value {
          Value::Object(id) if matches!(self.heap().cell(*id).kind, ObjectKind::Class(_)) => {
            Some(*id)
          }
          _ => {
            return Err(EvalError::Type(
              "Class extends value is not a constructor".to_string(),
            ));
          }
        }
      }
      None => None,
    };
    let parent_proto = parent.map(|p| match &self.heap().cell(p).kind {
      ObjectKind::Class(class) => class.prototype,
      _ => unreachable!(),
    });

    let class_name: JsString = name
      .map(|n| JsString::from(n.stx.name.as_str()))
      .unwrap_or_else(|| Arc::from(""));
    let prototype = self
      .heap_mut()
      .alloc_with_proto(ObjectKind::Ordinary, parent_proto);
    let class_id = self.heap_mut().alloc(ObjectKind::Class(ClassRecord {
      name: class_name.clone(),
      constructor: None,
      parent,
      prototype,
    }));
    self.heap_mut().define_property(
      prototype,
      Arc::from("constructor"),
      PropertyDescriptor::hidden_data(Value::Object(class_id)),
    );

    for member in members {
      let key: JsString = match &member.stx.key {
        ClassOrObjKey::Direct(key) => Arc::from(key.stx.key.as_str()),
        ClassOrObjKey::Computed(expr) => {
          let value = self.eval_expr(expr)?;
          ops::to_string(self, &value)?
        }
      };
      let target = if member.stx.static_ { class_id } else { prototype };
      match &member.stx.val {
        ClassOrObjVal::Method(method) => {
          if !member.stx.static_ && &*key == "constructor" {
            let ctor = self.materialize_function(
              &method.stx.func,
              CallableKind::Constructor,
              Some(class_name.clone()),
            )?;
            let ObjectKind::Class(class) = &mut self.heap_mut().cell_mut(class_id).kind else {
              unreachable!();
            };
            class.constructor = Some(ctor);
          } else {
            let func = self.materialize_function(
              &method.stx.func,
              CallableKind::Method,
              Some(key.clone()),
            )?;
            self.heap_mut().define_property(
              target,
              key,
              PropertyDescriptor::hidden_data(Value::Object(func)),
            );
          };
        }
        ClassOrObjVal::Getter(getter) => {
          let func = self.materialize_function(
            &getter.stx.func,
            CallableKind::Method,
            Some(key.clone()),
          )?;
          self.define_class_accessor(target, &key, Some(Value::Object(func)), None);
        }
        ClassOrObjVal::Setter(setter) => {
          let func = self.materialize_function(
            &setter.stx.func,
            CallableKind::Method,
            Some(key.clone()),
          )?;
          self.define_class_accessor(target, &key, None, Some(Value::Object(func)));
        }
        ClassOrObjVal::Prop(_) => {
          self.unsupported_unit("class field")?;
        }
      }
    }

    let class_value = Value::Object(class_id);
    if let Some(name_node) = name {
      self.bind_declaration(&name_node.assoc, &name_node.stx.name, class_value.clone())?;
    };
    Ok(class_value)
  }

  /// Class accessors merge like object-literal ones but are not enumerable.
  fn define_class_accessor(
    &mut self,
    id: ObjectId,
    key: &str,
    getter: Option<Value>,
    setter: Option<Value>,
  ) {
    self.define_accessor(id, key, getter, setter);
    if let Some(desc) = self.heap_mut().own_property_mut(id, key) {
      if matches!(desc.kind, PropertyKind::Accessor { .. }) {
        desc.enumerable = false;
      };
    };
  }
}
