use crate::{
    DrawList, HairColorOverrideProvider, OwnerClass, OwnerId, RenderInputs, SettingsResolver,
    TailOwner, TailSet, TailVariant, TextureLookup, hair_gradient,
};
use glam::Vec2;
use std::collections::HashMap;

/// Tail state of every owner, keyed by owner id.
///
/// Hosts register owners as they appear (or let the first update create them) and deregister them
/// when the entity goes away.
#[derive(Clone, Debug, Default)]
pub struct TailRig {
    sets: HashMap<OwnerId, TailSet>,
}

impl TailRig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn contains(&self, id: OwnerId) -> bool {
        self.sets.contains_key(&id)
    }

    pub fn get(&self, id: OwnerId) -> Option<&TailSet> {
        self.sets.get(&id)
    }

    pub fn get_mut(&mut self, id: OwnerId) -> Option<&mut TailSet> {
        self.sets.get_mut(&id)
    }

    fn start_set<O: TailOwner + ?Sized>(owner: &O, resolver: &SettingsResolver<'_>) -> TailSet {
        let count = resolver.count(owner);
        log::debug!("registering tail owner {:?} with {count} tails", owner.owner_id());
        let mut set = TailSet::new(count);
        set.initialize_for_start(owner.entity_position(), owner.frame().facing);
        set
    }

    /// Creates the tail set for `owner`, placed off-screen behind it. Replaces any existing set.
    pub fn register<O: TailOwner + ?Sized>(
        &mut self,
        owner: &O,
        resolver: &SettingsResolver<'_>,
    ) -> &mut TailSet {
        let set = Self::start_set(owner, resolver);
        self.sets.entry(owner.owner_id()).insert_entry(set).into_mut()
    }

    pub fn deregister(&mut self, id: OwnerId) -> Option<TailSet> {
        let removed = self.sets.remove(&id);
        if removed.is_some() {
            log::debug!("deregistered tail owner {id:?}");
        }
        removed
    }

    pub fn get_or_create<O: TailOwner + ?Sized>(
        &mut self,
        owner: &O,
        resolver: &SettingsResolver<'_>,
    ) -> &mut TailSet {
        self.sets
            .entry(owner.owner_id())
            .or_insert_with(|| Self::start_set(owner, resolver))
    }

    /// Re-places `owner`'s tails behind it, e.g. on level start or respawn.
    pub fn start_owner<O: TailOwner + ?Sized>(&mut self, owner: &O, resolver: &SettingsResolver<'_>) {
        if !OwnerClass::classify(owner).is_supported() {
            return;
        }
        let position = owner.entity_position();
        let facing = owner.frame().facing;
        self.get_or_create(owner, resolver)
            .initialize_for_start(position, facing);
    }

    /// Shifts every node of `id`'s tails, e.g. when the host teleports the entity.
    pub fn move_owner_by(&mut self, id: OwnerId, amount: Vec2) {
        if let Some(set) = self.sets.get_mut(&id) {
            set.move_by(amount);
        }
    }

    /// Advances `owner`'s tails by `dt` seconds. Unsupported owners and owners without tails are
    /// skipped.
    pub fn update_owner<O: TailOwner + ?Sized>(
        &mut self,
        owner: &O,
        resolver: &SettingsResolver<'_>,
        dt: f32,
    ) {
        let class = OwnerClass::classify(owner);
        if !class.is_supported() {
            return;
        }
        let appearance = resolver.appearance_for_class(class);
        if appearance.variant == TailVariant::None {
            return;
        }
        let constants = resolver.settings().constants;
        let frame = owner.frame();
        self.get_or_create(owner, resolver)
            .update_frame(&frame, &appearance, &constants, dt);
    }

    /// Draws for `owner`'s tails in paint order. Empty when nothing should be drawn.
    pub fn render_owner<O: TailOwner + ?Sized>(
        &self,
        owner: &O,
        resolver: &SettingsResolver<'_>,
        textures: &dyn TextureLookup,
        overrides: Option<&dyn HairColorOverrideProvider>,
    ) -> DrawList {
        let class = OwnerClass::classify(owner);
        let Some(set) = self.sets.get(&owner.owner_id()) else {
            return DrawList::default();
        };
        if !class.is_supported() {
            return DrawList::default();
        }

        let settings = resolver.settings();
        let appearance = resolver.appearance_for_class(class);
        let gradient = hair_gradient(owner, class, settings, overrides);
        let frame = owner.frame();
        set.render_frame(&RenderInputs {
            anchor: frame.anchor,
            pose: frame.pose,
            appearance: &appearance,
            constants: &settings.constants,
            hair_gradient: &gradient,
            textures,
        })
    }
}
