use glam::Vec3;

use crate::bomb::Bomb;
use crate::catcher::Catcher;
use ecs_core::components::{AgentId, BombId, EntityId, EntityRef, Pose};

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    /// World-wide spawn sequence; defines query order.
    seq: u64,
    val: Option<T>,
}

/// Slot storage with generation-checked handles.
///
/// Removing an entry bumps the slot generation, so stale handles resolve to
/// `None` instead of aliasing whatever reuses the slot.
#[derive(Debug)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }
}

impl<T> Arena<T> {
    pub fn insert_with(&mut self, seq: u64, f: impl FnOnce(EntityId) -> T) -> EntityId {
        let index = match self.free.pop() {
            Some(i) => i,
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    seq,
                    val: None,
                });
                (self.slots.len() - 1) as u32
            }
        };
        let slot = &mut self.slots[index as usize];
        let id = EntityId {
            index,
            generation: slot.generation,
        };
        slot.seq = seq;
        slot.val = Some(f(id));
        self.len += 1;
        id
    }

    fn slot(&self, id: EntityId) -> Option<&Slot<T>> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.slot(id).and_then(|s| s.val.as_ref())
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.val.as_mut())
    }

    #[inline]
    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)?;
        let val = slot.val.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        Some(val)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.val.as_ref().map(|v| {
                (
                    EntityId {
                        index: i as u32,
                        generation: s.generation,
                    },
                    v,
                )
            })
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.slots.iter_mut().enumerate().filter_map(|(i, s)| {
            let generation = s.generation;
            s.val.as_mut().map(|v| {
                (
                    EntityId {
                        index: i as u32,
                        generation,
                    },
                    v,
                )
            })
        })
    }

    /// Live handles, snapshotted so callers can mutate while walking them.
    pub fn ids(&self) -> Vec<EntityId> {
        self.iter().map(|(id, _)| id).collect()
    }

    fn iter_seq(&self) -> impl Iterator<Item = (u64, EntityId, &T)> {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.val.as_ref().map(|v| {
                (
                    s.seq,
                    EntityId {
                        index: i as u32,
                        generation: s.generation,
                    },
                    v,
                )
            })
        })
    }
}

/// Player agent: pose, liveness, and the optional catch controller.
#[derive(Debug)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub pose: Pose,
    pub dead: bool,
    pub catcher: Option<Catcher>,
}

/// A bomb scheduled for removal at `due_s`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PendingDespawn {
    pub bomb: BombId,
    pub due_s: f64,
}

#[derive(Default, Debug)]
pub struct WorldEcs {
    next_seq: u64,
    pub agents: Arena<Agent>,
    pub bombs: Arena<Bomb>,
    pub(crate) despawn_queue: Vec<PendingDespawn>,
}

impl WorldEcs {
    pub fn new() -> Self {
        Self::default()
    }

    fn bump_seq(&mut self) -> u64 {
        let s = self.next_seq;
        self.next_seq += 1;
        s
    }

    pub fn spawn_agent(&mut self, name: impl Into<String>, pose: Pose) -> AgentId {
        let seq = self.bump_seq();
        let name = name.into();
        let id = self.agents.insert_with(seq, |id| Agent {
            id: AgentId(id),
            name,
            pose,
            dead: false,
            catcher: None,
        });
        AgentId(id)
    }

    pub fn spawn_bomb_with(&mut self, f: impl FnOnce(BombId) -> Bomb) -> BombId {
        let seq = self.bump_seq();
        BombId(self.bombs.insert_with(seq, |id| f(BombId(id))))
    }

    #[inline]
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.0)
    }

    #[inline]
    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id.0)
    }

    #[inline]
    pub fn bomb(&self, id: BombId) -> Option<&Bomb> {
        self.bombs.get(id.0)
    }

    #[inline]
    pub fn bomb_mut(&mut self, id: BombId) -> Option<&mut Bomb> {
        self.bombs.get_mut(id.0)
    }

    pub fn agent_by_name(&self, name: &str) -> Option<AgentId> {
        self.agents
            .iter()
            .find(|(_, a)| a.name == name)
            .map(|(_, a)| a.id)
    }

    /// Everything whose position lies within `radius` of `center`, in spawn order.
    pub fn overlap_sphere(&self, center: Vec3, radius: f32) -> Vec<EntityRef> {
        let r2 = radius * radius;
        let mut hits: Vec<(u64, EntityRef)> = Vec::new();
        for (seq, id, a) in self.agents.iter_seq() {
            if a.pose.pos.distance_squared(center) <= r2 {
                hits.push((seq, EntityRef::Agent(AgentId(id))));
            }
        }
        for (seq, id, b) in self.bombs.iter_seq() {
            if b.pos.distance_squared(center) <= r2 {
                hits.push((seq, EntityRef::Bomb(BombId(id))));
            }
        }
        hits.sort_unstable_by_key(|(seq, _)| *seq);
        hits.into_iter().map(|(_, e)| e).collect()
    }

    /// Live agents within `radius` of `center`.
    pub fn agents_within(&self, center: Vec3, radius: f32) -> Vec<AgentId> {
        self.overlap_sphere(center, radius)
            .into_iter()
            .filter_map(|e| match e {
                EntityRef::Agent(a) => Some(a),
                EntityRef::Bomb(_) => None,
            })
            .filter(|a| self.agent(*a).is_some_and(|x| !x.dead))
            .collect()
    }

    /// Queue a bomb for removal; a second request for the same bomb is ignored.
    pub fn schedule_despawn(&mut self, bomb: BombId, due_s: f64) {
        if self.despawn_queue.iter().any(|p| p.bomb == bomb) {
            return;
        }
        self.despawn_queue.push(PendingDespawn { bomb, due_s });
    }

    pub fn pending_despawns(&self) -> &[PendingDespawn] {
        &self.despawn_queue
    }

    /// Remove bombs whose grace delay elapsed by `now_s`; returns removed ids.
    pub fn despawn_due(&mut self, now_s: f64) -> Vec<BombId> {
        let mut removed = Vec::new();
        let mut i = 0;
        while i < self.despawn_queue.len() {
            let p = self.despawn_queue[i];
            if p.due_s <= now_s {
                self.despawn_queue.swap_remove(i);
                if self.bombs.remove(p.bomb.0).is_some() {
                    removed.push(p.bomb);
                }
                continue;
            }
            i += 1;
        }
        removed
    }
}
