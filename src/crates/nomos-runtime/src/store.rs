// store.rs
//
// Generational value storage. Bindings hold `ValueRef` handles into the
// store; releasing a slot bumps its generation so stale handles resolve to
// nothing instead of to whatever reuses the slot.

use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueRef {
    slot: u32,
    generation: u32,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    value: Option<Value>,
}

#[derive(Debug, Default)]
pub struct ValueStore {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl ValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, value: Value) -> ValueRef {
        self.live += 1;
        if let Some(slot) = self.free.pop() {
            let entry = &mut self.slots[slot as usize];
            entry.value = Some(value);
            return ValueRef {
                slot,
                generation: entry.generation,
            };
        }
        let slot = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        ValueRef {
            slot,
            generation: 0,
        }
    }

    /// The value behind `r`, or `None` once it has been released.
    pub fn get(&self, r: ValueRef) -> Option<&Value> {
        let entry = self.slots.get(r.slot as usize)?;
        if entry.generation != r.generation {
            return None;
        }
        entry.value.as_ref()
    }

    /// Free the slot behind `r`, returning its value. Stale handles are a
    /// no-op.
    pub fn release(&mut self, r: ValueRef) -> Option<Value> {
        let entry = self.slots.get_mut(r.slot as usize)?;
        if entry.generation != r.generation {
            return None;
        }
        let value = entry.value.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(r.slot);
        self.live -= 1;
        Some(value)
    }

    /// Number of values currently held.
    pub fn live_count(&self) -> usize {
        self.live
    }
}
