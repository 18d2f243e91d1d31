/// Returns `true` if `n` is prime.
///
/// Trial division is plenty here: the growth schedule only ever scans the
/// short gap between a doubled capacity and the next prime.
pub(crate) fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }
    if n < 2 || n % 2 == 0 {
        return false;
    }

    let mut divisor = 3;

    while divisor * divisor <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }

    true
}

/// Returns the smallest prime that is greater than or equal to `n`.
///
/// `n` needs to be at least 3; the even-to-odd advance below would step
/// over 2 otherwise.
pub(crate) fn next_prime(n: usize) -> usize {
    debug_assert!(n >= 3, "capacity hints are clamped before prime rounding");

    let mut candidate = if n % 2 == 0 { n + 1 } else { n };

    while !is_prime(candidate) {
        candidate += 2;
    }

    candidate
}
