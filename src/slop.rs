//! Slop engine - buries a canonical identity under equivalent clutter
//!
//! The transformation only ever adds terms that equal 0 and factors that
//! equal 1, so the output is mathematically identical to the input. There
//! is no runtime verification; the catalog tables are trusted.

use rand::Rng;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::random::{pick, shuffle};

/// Sentinel key meaning "pick any identity"
pub const RANDOM_KEY: &str = "random";

/// One generated restatement of an identity
#[derive(Debug, Clone, Serialize)]
pub struct SlopResult {
    pub name: String,
    pub original: String,
    pub slopped: String,
}

/// Generate a cluttered restatement of an identity.
///
/// `key` may be an identity key, the `"random"` sentinel, or anything
/// else - unknown keys fall back to a random identity rather than fail.
/// `level` controls how much clutter gets injected; it is a total
/// function over all integers (negative clamps to zero, huge clamps to
/// the pool sizes).
pub fn generate_slop<R: Rng + ?Sized>(
    catalog: &Catalog,
    key: &str,
    level: i32,
    rng: &mut R,
) -> SlopResult {
    let base = match catalog.get(key) {
        Some(identity) => identity,
        None => {
            if key != RANDOM_KEY {
                tracing::warn!("Unknown identity '{}', falling back to random", key);
            }
            pick(rng, catalog.identities()).expect("catalog always has built-in identities")
        }
    };
    tracing::debug!("Base identity: {} ({})", base.key, base.name);

    let zero_pool = catalog.zero_terms();
    let one_pool = catalog.one_factors();

    // Zero-term count gets a coin-flip bonus so even level 0 can differ
    // from the canonical form
    let bonus: i32 = rng.random_range(0..2);
    let num_zeros = level.saturating_add(bonus).clamp(0, zero_pool.len() as i32) as usize;
    let num_ones = (level / 2).clamp(0, one_pool.len() as i32) as usize;
    tracing::debug!("Injecting {} zero terms, {} one factors", num_zeros, num_ones);

    // Shuffle-then-take-prefix: no duplicates within one result
    let zeros = shuffle(rng, zero_pool);
    let ones = shuffle(rng, one_pool);

    // Pile zeros onto the left side, each on a random end of the running
    // expression
    let mut left = base.left.clone();
    for term in zeros.iter().take(num_zeros) {
        left = if rng.random_bool(0.5) {
            format!("{left} + {term}")
        } else {
            format!("{term} + {left}")
        };
    }

    // Wrap the right side in one-factors, parenthesizing each time
    let mut right = base.right.clone();
    for factor in ones.iter().take(num_ones) {
        right = if rng.random_bool(0.5) {
            format!("{factor} \\cdot \\left({right}\\right)")
        } else {
            format!("\\left({right}\\right) \\cdot {factor}")
        };
    }

    // At level 3+ the right side sometimes gets one extra zero term,
    // drawn with replacement - it may repeat one already used on the left
    if level >= 3 && rng.random_bool(0.5) {
        if let Some(term) = pick(rng, zero_pool) {
            right = format!("{right} + {term}");
        }
    }

    SlopResult {
        name: base.name.clone(),
        original: base.latex.clone(),
        slopped: format!("{left} = {right}"),
    }
}

/// Swap the first standalone occurrence of each known constant token for
/// a fancier equivalent spelling. Opt-in, applied after `generate_slop`.
///
/// Tokens adjacent to other digits are left alone so multi-digit numbers
/// never get mangled. Replacements are brace-wrapped so they stay a
/// single group wherever the token sat (exponents, fraction parts).
pub fn embellish<R: Rng + ?Sized>(markup: &str, catalog: &Catalog, rng: &mut R) -> String {
    let mut edits: Vec<(usize, usize, String)> = Vec::new();

    for &(token, forms) in catalog.alternate_forms() {
        if let Some(pos) = find_token(markup, token) {
            if let Some(form) = pick(rng, forms) {
                edits.push((
                    pos,
                    pos + token.len(),
                    format!("{{\\left({form}\\right)}}"),
                ));
            }
        }
    }

    // Apply right-to-left so earlier offsets stay valid and inserted text
    // is never rescanned
    edits.sort_by(|a, b| b.0.cmp(&a.0));
    let mut out = markup.to_string();
    for (start, end, replacement) in edits {
        out.replace_range(start..end, &replacement);
    }
    out
}

/// First occurrence of `token` that is not glued to a digit (or, for
/// command tokens, to more letters)
fn find_token(haystack: &str, token: &str) -> Option<usize> {
    let bytes = haystack.as_bytes();
    let mut search_from = 0;

    while let Some(rel) = haystack[search_from..].find(token) {
        let pos = search_from + rel;
        let end = pos + token.len();

        let prev_ok = pos == 0 || {
            let c = bytes[pos - 1];
            !c.is_ascii_digit() && c != b'\\'
        };
        let next_ok = end == haystack.len() || {
            let c = bytes[end];
            !c.is_ascii_digit() && !(token.starts_with('\\') && c.is_ascii_alphabetic())
        };

        if prev_ok && next_ok {
            return Some(pos);
        }
        search_from = pos + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catalog() -> Catalog {
        Catalog::builtin()
    }

    fn split_sides(slopped: &str) -> (&str, &str) {
        // No catalog snippet contains " = ", so the first one is the
        // equation separator
        let mut parts = slopped.splitn(2, " = ");
        (parts.next().unwrap(), parts.next().unwrap())
    }

    #[test]
    fn test_original_always_canonical() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(3);
        for identity in catalog.identities() {
            for level in 0..=5 {
                let result = generate_slop(&catalog, &identity.key, level, &mut rng);
                assert_eq!(result.original, identity.latex);
                assert_eq!(result.name, identity.name);
            }
        }
    }

    #[test]
    fn test_identity_at_level_zero() {
        let catalog = catalog();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = generate_slop(&catalog, "identity", 0, &mut rng);
            assert_eq!(result.original, r"1 \cdot x = x");

            let (left, right) = split_sides(&result.slopped);
            // Zero one-factors at level 0
            assert_eq!(right, "x");

            // Left is canonical or has exactly one zero-term affix
            if left != r"1 \cdot x" {
                let affixed = catalog.zero_terms().iter().any(|t| {
                    left == format!(r"{t} + 1 \cdot x") || left == format!(r"1 \cdot x + {t}")
                });
                assert!(affixed, "unexpected left side: {left}");
            }
        }
    }

    #[test]
    fn test_no_duplicate_zero_terms_on_left() {
        let catalog = catalog();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = generate_slop(&catalog, "pythagoras", 5, &mut rng);
            let (left, _) = split_sides(&result.slopped);

            for term in catalog.zero_terms() {
                assert!(
                    left.matches(term).count() <= 1,
                    "zero term repeated on left: {term}"
                );
            }
        }
    }

    #[test]
    fn test_no_duplicate_one_factors_on_right() {
        let catalog = catalog();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = generate_slop(&catalog, "golden", 8, &mut rng);
            let (_, right) = split_sides(&result.slopped);

            // Strip the optional trailing zero term first; it may contain
            // text that collides with a factor (e.g. "e^0 - 1" vs "e^0")
            let mut right = right.to_string();
            for term in catalog.zero_terms() {
                if let Some(stripped) = right.strip_suffix(&format!(" + {term}")) {
                    right = stripped.to_string();
                    break;
                }
            }

            for factor in catalog.one_factors() {
                assert!(
                    right.matches(factor).count() <= 1,
                    "one factor repeated on right: {factor}"
                );
            }
        }
    }

    #[test]
    fn test_negative_level_is_canonical() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(11);
        for level in [-1, -4, i32::MIN] {
            let result = generate_slop(&catalog, "euler", level, &mut rng);
            assert_eq!(result.slopped, result.original);
        }
    }

    #[test]
    fn test_huge_level_clamps_to_pools() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(13);
        let result = generate_slop(&catalog, "zeta2", 1000, &mut rng);
        let (left, _) = split_sides(&result.slopped);

        let injected: usize = catalog
            .zero_terms()
            .iter()
            .map(|t| left.matches(t).count())
            .sum();
        assert_eq!(injected, catalog.zero_terms().len());
    }

    #[test]
    fn test_unknown_key_falls_back() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(17);
        let known: Vec<&str> = catalog.identities().iter().map(|i| i.name.as_str()).collect();

        let result = generate_slop(&catalog, "not-a-real-key", 2, &mut rng);
        assert!(known.contains(&result.name.as_str()));
        assert!(result.slopped.contains(" = "));
    }

    #[test]
    fn test_random_sentinel() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(19);
        let known: Vec<&str> = catalog.identities().iter().map(|i| i.name.as_str()).collect();

        for _ in 0..20 {
            let result = generate_slop(&catalog, RANDOM_KEY, 3, &mut rng);
            assert!(known.contains(&result.name.as_str()));
        }
    }

    #[test]
    fn test_left_side_reduces_to_canonical() {
        let catalog = catalog();

        // Longest-first so no snippet is clobbered by a substring of another
        let mut terms: Vec<&str> = catalog.zero_terms().to_vec();
        terms.sort_by_key(|t| std::cmp::Reverse(t.len()));

        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            for identity in catalog.identities() {
                let result = generate_slop(&catalog, &identity.key, 4, &mut rng);
                let (left, _) = split_sides(&result.slopped);

                let mut reduced = left.to_string();
                for term in &terms {
                    reduced = reduced.replace(term, "0");
                }
                loop {
                    if let Some(s) = reduced.strip_prefix("0 + ") {
                        reduced = s.to_string();
                    } else if let Some(s) = reduced.strip_suffix(" + 0") {
                        reduced = s.to_string();
                    } else {
                        break;
                    }
                }
                assert_eq!(reduced, identity.left);
            }
        }
    }

    #[test]
    fn test_embellish_swaps_constants() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(23);

        let fancy = embellish(r"1 \cdot x", &catalog, &mut rng);
        assert_ne!(fancy, r"1 \cdot x");
        assert!(fancy.starts_with(r"{\left("));
        assert!(fancy.ends_with(r"\right)} \cdot x"));
    }

    #[test]
    fn test_embellish_skips_digit_runs() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(29);

        // "22" and "791" must never be split apart
        let markup = r"\frac{22}{7} - \frac{x}{791}";
        assert_eq!(embellish(markup, &catalog, &mut rng), markup);
    }

    #[test]
    fn test_embellish_handles_pi_token() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(31);

        let fancy = embellish(r"\pi + x", &catalog, &mut rng);
        assert!(fancy.ends_with(" + x"));
        assert!(fancy.starts_with(r"{\left("));
    }

    #[test]
    fn test_find_token_boundaries() {
        assert_eq!(find_token("1 + x", "1"), Some(0));
        assert_eq!(find_token("x + 1", "1"), Some(4));
        assert_eq!(find_token("791", "1"), None);
        assert_eq!(find_token("12", "1"), None);
        assert_eq!(find_token(r"\pi^2", r"\pi"), Some(0));
        assert_eq!(find_token(r"x^{1/n}", "1"), Some(3));
    }
}
