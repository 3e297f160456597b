//! The global environment: one flat namespace for the whole run.

use std::collections::HashMap;

use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// The runtime value of this binding
    pub value: Value,
    /// Type keyword from the `var` declaration; never enforced
    pub declared: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Env {
    vars: HashMap<String, Binding>,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.vars.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.vars.get(name).map(|b| &b.value)
    }

    /// Binds `name`, replacing any previous value and declared type.
    pub fn define(&mut self, name: String, value: Value, declared: Option<String>) {
        self.vars.insert(name, Binding { value, declared });
    }

    /// All bindings sorted by name.
    pub fn vars_snapshot(&self) -> Vec<(String, Binding)> {
        let mut vars: Vec<(String, Binding)> = self
            .vars
            .iter()
            .map(|(k, b)| (k.clone(), b.clone()))
            .collect();
        vars.sort_by(|a, b| a.0.cmp(&b.0));
        vars
    }

    /// Names currently bound to function definitions, sorted.
    pub fn function_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .vars
            .iter()
            .filter(|(_, b)| matches!(b.value, Value::Function(_)))
            .map(|(k, _)| k.clone())
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn clear(&mut self) {
        self.vars.clear();
    }
}
