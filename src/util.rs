use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub fn short_name(id: &str) -> &str {
    id.rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(id)
}

pub fn stable_pair(id: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}
