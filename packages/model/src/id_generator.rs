use crc32fast::Hasher;

/// Derive a session seed from a timestamp and a discriminator using CRC32.
pub fn get_session_seed(timestamp_millis: i64, discriminator: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(&timestamp_millis.to_le_bytes());
    hasher.update(discriminator.as_bytes());
    format!("{:x}{:x}", timestamp_millis, hasher.finalize())
}

/// Sequential id generator for catalog entities within one editing session.
///
/// Ids look like `page-<seed>-<n>`. The counter only grows, so an id is
/// never handed out twice by the same generator, even after the entity
/// it named was deleted.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    /// Seed from the current wall-clock time.
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        Self::from_seed(get_session_seed(
            now.timestamp_millis(),
            &now.timestamp_subsec_nanos().to_string(),
        ))
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate next sequential id with the given kind prefix.
    pub fn new_id(&mut self, prefix: &str) -> String {
        self.count += 1;
        format!("{}-{}-{}", prefix, self.seed, self.count)
    }

    /// Next id for which `taken` is false.
    pub fn new_unique_id(&mut self, prefix: &str, taken: impl Fn(&str) -> bool) -> String {
        loop {
            let id = self.new_id(prefix);
            if !taken(&id) {
                return id;
            }
        }
    }

    pub fn issued(&self) -> u64 {
        self.count
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
