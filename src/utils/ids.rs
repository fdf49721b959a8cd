use rand::Rng;

const ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Default length of generated ids.
pub const ID_LEN: usize = 8;

/// Generate a short random id for a new list entry (link, category, social).
///
/// Ids only need to be unique within one list; eight base-36 characters make a
/// collision inside a single page practically impossible.
pub fn new_id() -> String {
    let mut rng = rand::rng();
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// Generate an id that is not already in `taken`.
pub fn fresh_id<'a>(taken: impl Iterator<Item = &'a str> + Clone) -> String {
    loop {
        let id = new_id();
        if !taken.clone().any(|t| t == id) {
            return id;
        }
    }
}
