//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Fetch the creature for `id` on behalf of round `round`
    LoadCreature { round: u64, id: u16 },
    /// Fetch the localized name for `id`
    LoadSpecies { round: u64, id: u16 },
    /// Download and decode a sprite image
    LoadSprite { round: u64, url: String },
    /// Fetch the autocomplete catalog of the first `limit` creatures
    LoadNameIndex { limit: u16 },
}
