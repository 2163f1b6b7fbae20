//! Symbol mangling for code-generation backends.
//!
//! Grammar (every number is decimal and terminated by `_`, so no mangled
//! type is a prefix of another):
//!
//! ```text
//! type   := "Kt" | "Kb" | "Km" | "Kd" | "Ku" | "Kl" | "Kx"     nullary types
//!         | ("N" | "I" | "Q" | "R") width "_"                  Nat Int Ratio Real
//!         | "Zs" | "Za" | "Zu"                                 String ASCII UTF8
//!         | "Y" index "_"                                      pseudo
//!         | "A" len "_" type                                   array
//!         | "F" n "_" type type{n}                             function (result first)
//!         | "C" n "_" type type{n}                             closure
//!         | "S" n "_" type{n}                                  sum
//!         | "P" n "_" type{n}                                  product
//!         | "E" n "_" (len "_" name type){n}                   record
//! ```

use std::fmt::Write;

use crate::type_arena::{NumericKind, SemaType, TextKind, TypeArena, TypeId};

impl TypeArena {
    /// Stable, injective textual signature of a type.
    pub fn mangle(&self, id: TypeId) -> String {
        let mut out = String::new();
        self.mangle_into(id, &mut out);
        out
    }

    /// Symbol name for a function `name` of type `fn_type`, optionally
    /// scoped to `module`.
    pub fn mangle_function(&self, module: Option<&str>, name: &str, fn_type: TypeId) -> String {
        let mut out = String::from("_");
        if let Some(module) = module {
            let _ = write!(out, "m{}_{}", module.len(), module);
        }
        out.push('f');
        self.mangle_into(fn_type, &mut out);
        let _ = write!(out, "{}_{}", name.len(), name);
        out
    }

    fn mangle_into(&self, id: TypeId, out: &mut String) {
        // write! into a String cannot fail
        match self.get(id) {
            SemaType::Top => out.push_str("Kt"),
            SemaType::Bottom => out.push_str("Kb"),
            SemaType::Meta => out.push_str("Km"),
            SemaType::Module => out.push_str("Kd"),
            SemaType::Unit => out.push_str("Ku"),
            SemaType::Bool => out.push_str("Kl"),
            SemaType::Number => out.push_str("Kx"),
            SemaType::Numeric(n) => {
                let tag = match n.kind {
                    NumericKind::Nat => 'N',
                    NumericKind::Int => 'I',
                    NumericKind::Ratio => 'Q',
                    NumericKind::Real => 'R',
                };
                let _ = write!(out, "{tag}{}_", n.width);
            }
            SemaType::Text(kind) => out.push_str(match kind {
                TextKind::String => "Zs",
                TextKind::Ascii => "Za",
                TextKind::Utf8 => "Zu",
            }),
            SemaType::Pseudo { index, .. } => {
                let _ = write!(out, "Y{index}_");
            }
            SemaType::Array { element, len } => {
                let _ = write!(out, "A{len}_");
                self.mangle_into(*element, out);
            }
            SemaType::Function { result, params } => {
                let _ = write!(out, "F{}_", params.len());
                self.mangle_into(*result, out);
                for &p in params.iter() {
                    self.mangle_into(p, out);
                }
            }
            SemaType::Closure { function, closed } => {
                let _ = write!(out, "C{}_", closed.len());
                self.mangle_into(*function, out);
                for &c in closed.iter() {
                    self.mangle_into(c, out);
                }
            }
            SemaType::Sum(cases) => self.mangle_list('S', cases, out),
            SemaType::Product(components) => self.mangle_list('P', components, out),
            SemaType::Record(fields) => {
                let _ = write!(out, "E{}_", fields.len());
                for field in fields.iter() {
                    let _ = write!(out, "{}_{}", field.name.len(), field.name);
                    self.mangle_into(field.ty, out);
                }
            }
        }
    }

    fn mangle_list(&self, tag: char, ids: &[TypeId], out: &mut String) {
        let _ = write!(out, "{tag}{}_", ids.len());
        for &id in ids {
            self.mangle_into(id, out);
        }
    }
}
