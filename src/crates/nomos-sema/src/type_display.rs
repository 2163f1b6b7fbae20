//! Human-readable type names for diagnostics and debugging output.

use crate::type_arena::{SemaType, TypeArena, TypeId};

/// Name of `type_id` as shown in error messages.
pub fn display_type_id(type_id: TypeId, arena: &TypeArena) -> String {
    match arena.get(type_id) {
        SemaType::Top => "Top".to_string(),
        SemaType::Bottom => "Bottom".to_string(),
        SemaType::Meta => "Type".to_string(),
        SemaType::Module => "Module".to_string(),
        SemaType::Unit => "Unit".to_string(),
        SemaType::Bool => "Bool".to_string(),
        SemaType::Number => "Number".to_string(),
        SemaType::Numeric(n) if n.is_abstract() => n.kind.name().to_string(),
        SemaType::Numeric(n) => format!("{}{}", n.kind.name(), n.width),
        SemaType::Text(kind) => kind.name().to_string(),
        SemaType::Pseudo { index, .. } => format!("?{index}"),
        SemaType::Array { element, len } => {
            let element = display_operand(*element, arena);
            if *len == 0 {
                format!("[]{element}")
            } else {
                format!("[{len}]{element}")
            }
        }
        SemaType::Function { result, params } => {
            let result = display_operand(*result, arena);
            if params.is_empty() {
                return format!("() -> {result}");
            }
            let mut parts: Vec<String> = params.iter().map(|&p| display_operand(p, arena)).collect();
            parts.push(result);
            parts.join(" -> ")
        }
        SemaType::Closure { function, .. } => {
            format!("closure({})", display_type_id(*function, arena))
        }
        SemaType::Sum(cases) => join(cases.iter().copied(), " | ", arena),
        SemaType::Product(components) => join(components.iter().copied(), " & ", arena),
        SemaType::Record(fields) => {
            let parts: Vec<String> = fields
                .iter()
                .map(|f| format!("{}: {}", f.name, display_type_id(f.ty, arena)))
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
    }
}

fn join(ids: impl Iterator<Item = TypeId>, sep: &str, arena: &TypeArena) -> String {
    ids.map(|id| display_operand(id, arena))
        .collect::<Vec<_>>()
        .join(sep)
}

/// Parenthesise compound types that would otherwise read ambiguously.
fn display_operand(type_id: TypeId, arena: &TypeArena) -> String {
    let text = display_type_id(type_id, arena);
    match arena.get(type_id) {
        SemaType::Function { .. } | SemaType::Sum(_) | SemaType::Product(_) => format!("({text})"),
        _ => text,
    }
}

impl TypeArena {
    /// Human-readable name of a type, e.g. `Nat16`, `Int -> Bool`, `[4]Real64`.
    pub fn display(&self, id: TypeId) -> String {
        display_type_id(id, self)
    }
}
