//! Hash containers used by the caches, based on *hashbrown* and *foldhash*.

use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

/// A fixed hash seed, so iteration order only depends on the inserted keys.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x6E61_7669_6761_7465);

/// Fixed hash state based upon a random but fixed seed.
#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FoldHasher<'static>;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

/// A [`hashbrown::HashMap`] using [`FixedHashState`].
pub(crate) type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;

/// Creates an empty [`HashMap`], usable in `const` contexts.
#[inline]
pub(crate) const fn new_map<K, V>() -> HashMap<K, V> {
    hashbrown::HashMap::with_hasher(FixedHashState)
}
