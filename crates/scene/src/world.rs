use crate::components::{Primitive, PrimitiveKind};
use crate::entity::PrimitiveId;
use foundation::handles::Handle;

#[derive(Debug)]
struct Slot {
    generation: u32,
    primitive: Option<Primitive>,
}

/// Model of everything currently drawn on the map.
///
/// The host map mirrors this set through add/remove render commands, so it is
/// the authority on which primitives exist. Freed slots are reused with a
/// bumped generation; a removed id never resolves again.
#[derive(Debug, Default)]
pub struct MapSurface {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl MapSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, primitive: Primitive) -> PrimitiveId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation += 1;
            slot.primitive = Some(primitive);
            return PrimitiveId(Handle::new(index, slot.generation));
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            primitive: Some(primitive),
        });
        PrimitiveId(Handle::new(index, 0))
    }

    /// Removes `id` and returns what it held, or `None` for stale ids.
    pub fn remove(&mut self, id: PrimitiveId) -> Option<Primitive> {
        let slot = self.slots.get_mut(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        let primitive = slot.primitive.take()?;
        self.free.push(id.index());
        self.live -= 1;
        Some(primitive)
    }

    pub fn get(&self, id: PrimitiveId) -> Option<&Primitive> {
        let slot = self.slots.get(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.primitive.as_ref()
    }

    pub fn contains(&self, id: PrimitiveId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn count(&self, kind: PrimitiveKind) -> usize {
        self.iter().filter(|(_, p)| p.kind() == kind).count()
    }

    /// Iterates live primitives in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (PrimitiveId, &Primitive)> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            slot.primitive
                .as_ref()
                .map(|p| (PrimitiveId(Handle::new(idx as u32, slot.generation)), p))
        })
    }
}
