// module.rs

use hashbrown::HashMap;
use rustc_hash::FxBuildHasher;

use crate::bindings::Bindings;
use crate::errors::EvalError;
use crate::expr::TypedExpr;
use crate::state::EvalState;
use crate::value::Value;

/// An evaluated module: the top-level bindings its body produced.
#[derive(Debug)]
pub struct ModuleValue {
    name: String,
    members: HashMap<String, Value, FxBuildHasher>,
}

impl ModuleValue {
    /// Evaluate `body` in a fresh top-level scope; whatever it binds there
    /// becomes the module's members.
    #[tracing::instrument(level = "debug", skip(state, body), fields(items = body.len()))]
    pub fn load(state: &mut EvalState, name: &str, body: Vec<TypedExpr>) -> Result<Self, EvalError> {
        let mut bindings = Bindings::new();
        let mut outcome = Ok(());
        for item in body.iter() {
            if let Err(e) = item.eval(state, &mut bindings) {
                outcome = Err(e);
                break;
            }
        }

        let mut members = HashMap::with_hasher(FxBuildHasher);
        for (member, value) in bindings.into_top_level() {
            let resolved = match value {
                Value::Ref(r) => state.store.release(r),
                other => Some(other),
            };
            if let Some(resolved) = resolved {
                members.insert(member, resolved);
            }
        }
        outcome?;

        tracing::debug!(module = name, members = members.len(), "module loaded");
        Ok(Self {
            name: name.to_string(),
            members,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn access(&self, member: &str) -> Option<&Value> {
        self.members.get(member)
    }

    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(|s| s.as_str())
    }
}
