//! Prime capacity sizing shared by both map variants.

/// Largest capacity either map will allocate. Keeps probe arithmetic
/// (`index + 2j - 1`) and doubling on growth inside `usize`.
pub const MAX_CAPACITY: usize = usize::MAX >> 3;

/// Trial division up to `sqrt(n)` over odd factors.
pub fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }
    if n < 2 || n % 2 == 0 {
        return false;
    }
    let mut factor = 3usize;
    while factor <= n / factor {
        if n % factor == 0 {
            return false;
        }
        factor += 2;
    }
    true
}

/// First odd prime `>= n`.
///
/// An even `n` is bumped to the next odd number, then odd candidates are
/// tested in steps of two. The result is the smallest prime `>= n` for
/// `n >= 3`; `0`, `1` and `2` all give 3. Callers that must keep a prime
/// target such as 2 check [`is_prime`] first.
///
/// Callers keep `n <= MAX_CAPACITY`; the gap to the next prime is far
/// below the headroom left above that bound.
pub fn next_prime(n: usize) -> usize {
    let mut candidate = if n % 2 == 0 { n + 1 } else { n };
    while !is_prime(candidate) {
        candidate += 2;
    }
    candidate
}
