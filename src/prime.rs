//! Prime bucket counts for both table variants

/// Returns true if `n` is prime, by trial division with odd factors up to `√n`
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }
    if n < 2 || n % 2 == 0 {
        return false;
    }

    let mut factor: usize = 3;
    // `factor <= n / factor` is `factor² <= n` without the overflow
    while factor <= n / factor {
        if n % factor == 0 {
            return false;
        }
        factor += 2;
    }
    true
}

/// Largest prime representable as a `usize`
#[cfg(target_pointer_width = "64")]
pub const LARGEST_PRIME: usize = 18_446_744_073_709_551_557;
/// Largest prime representable as a `usize`
#[cfg(target_pointer_width = "32")]
pub const LARGEST_PRIME: usize = 4_294_967_291;
/// Largest prime representable as a `usize`
#[cfg(target_pointer_width = "16")]
pub const LARGEST_PRIME: usize = 65_521;

/// Returns the smallest prime `>= n` after forcing `n` odd.
///
/// Because `n` is bumped to the next odd number first, the result is never 2:
/// `next_prime(0)`, `next_prime(1)` and `next_prime(2)` all return 3. Requests above
/// [`LARGEST_PRIME`] return [`LARGEST_PRIME`].
#[must_use]
pub fn next_prime(n: usize) -> usize {
    if n >= LARGEST_PRIME {
        return LARGEST_PRIME;
    }
    let mut candidate = if n % 2 == 0 { n.saturating_add(1) } else { n };
    // a prime no larger than `LARGEST_PRIME` is reached before the addition can overflow
    while !is_prime(candidate) {
        let Some(next) = candidate.checked_add(2) else {
            return LARGEST_PRIME;
        };
        candidate = next;
    }
    candidate
}

/// Capacity used by an explicit resize: `n` itself when already prime, otherwise
/// [`next_prime`]. Unlike construction, this keeps a requested capacity of 2.
#[must_use]
pub fn prime_capacity(n: usize) -> usize {
    if is_prime(n) { n } else { next_prime(n) }
}
