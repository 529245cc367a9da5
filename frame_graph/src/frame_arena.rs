use crate::frame::{Frame, FrameId};

/// Slab of frame slots owned by the graph. Each slot carries a generation
/// counter that is bumped when the slot is vacated, so lookups through a
/// stale [`FrameId`] return `None` instead of the slot's new occupant.
#[derive(Clone, Debug, Default)]
pub(crate) struct FrameArena {
    slots: Vec<Slot>,
    free: Vec<usize>,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u64,
    frame: Option<Frame>,
}

impl FrameArena {
    pub(crate) fn insert(&mut self, frame: Frame) -> FrameId {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.frame = Some(frame);
                FrameId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len();
                self.slots.push(Slot {
                    generation: 0,
                    frame: Some(frame),
                });
                FrameId {
                    index,
                    generation: 0,
                }
            }
        }
    }

    pub(crate) fn get(&self, id: FrameId) -> Option<&Frame> {
        let slot = self.slots.get(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.frame.as_ref()
    }

    pub(crate) fn get_mut(&mut self, id: FrameId) -> Option<&mut Frame> {
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.frame.as_mut()
    }

    /// Vacates the slot and bumps its generation, invalidating every
    /// outstanding id for it. Returns the frame so the caller can keep
    /// walking its children.
    pub(crate) fn remove(&mut self, id: FrameId) -> Option<Frame> {
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation || slot.frame.is_none() {
            return None;
        }
        slot.generation += 1;
        self.free.push(id.index);
        slot.frame.take()
    }
}
