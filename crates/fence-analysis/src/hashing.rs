//! xxh3 hashing for parse-cache keys and evidence hashes.

use xxhash_rust::xxh3::xxh3_64;

/// Content hash used as the parse-cache key.
pub fn hash_content(bytes: &[u8]) -> u64 {
    xxh3_64(bytes)
}

/// Hash a sequence of canonical lines into 16 lowercase hex digits.
/// Lines are joined with `\n`, so `["a", "b"]` and `["a\nb"]` collide by
/// construction; callers never emit embedded newlines.
pub fn hash_lines<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut buf = String::new();
    for (i, line) in lines.into_iter().enumerate() {
        if i > 0 {
            buf.push('\n');
        }
        buf.push_str(line.as_ref());
    }
    format!("{:016x}", xxh3_64(buf.as_bytes()))
}
