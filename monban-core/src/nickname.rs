//! Random nickname generation
//!
//! New accounts get a generated handle of the form `adjective-noun-NNNN`,
//! e.g. `brisk-heron-0482`. The distribution is uniform over roughly 5.7
//! million combinations, which keeps collisions rare; registration still
//! collision-checks against the store and retries with a fresh draw.

use rand::{TryRngCore, rngs::OsRng};

const ADJECTIVES: &[&str] = &[
    "amber", "bold", "brisk", "calm", "clever", "crisp", "deft", "eager", "fleet", "gentle",
    "hardy", "keen", "lively", "lucid", "mellow", "nimble", "plucky", "quiet", "rapid", "sage",
    "spry", "stout", "swift", "vivid",
];

const NOUNS: &[&str] = &[
    "badger", "bison", "crane", "falcon", "gecko", "heron", "ibex", "jackal", "kestrel", "lemur",
    "lynx", "marten", "newt", "osprey", "otter", "petrel", "plover", "raven", "shrike", "stoat",
    "tapir", "teal", "vole", "wren",
];

/// Generate a random `adjective-noun-NNNN` nickname.
///
/// Each call draws independently; the caller is responsible for collision
/// checking against existing accounts.
pub fn generate_nickname() -> String {
    let mut bytes = [0u8; 6];
    OsRng.try_fill_bytes(&mut bytes).unwrap();

    let adjective = ADJECTIVES[usize::from(bytes[0]) % ADJECTIVES.len()];
    let noun = NOUNS[usize::from(bytes[1]) % NOUNS.len()];
    let suffix = u32::from(u16::from_be_bytes([bytes[2], bytes[3]])) % 10_000;

    format!("{adjective}-{noun}-{suffix:04}")
}
