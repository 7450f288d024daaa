//! Term catalog - curated identities and equivalence-preserving clutter
//!
//! Four static tables:
//! - Canonical identities (the formulas worth burying)
//! - Zero terms: expressions that evaluate to 0 (safe to add anywhere)
//! - One factors: expressions that evaluate to 1 (safe to multiply anywhere)
//! - Alternate forms: fancier spellings of specific constants
//!
//! The tables are data, not logic. Nothing mutates them after startup.

use serde::{Deserialize, Serialize};

/// A canonical identity: `left = right`, known to be universally true
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityDef {
    pub key: String,
    pub name: String,
    pub latex: String,
    pub left: String,
    pub right: String,
}

/// Built-in identities as (key, name, latex, left, right)
const BUILTIN_IDENTITIES: &[(&str, &str, &str, &str, &str)] = &[
    (
        "euler",
        "Euler's Identity",
        r"e^{i\pi} + 1 = 0",
        r"e^{i\pi} + 1",
        "0",
    ),
    (
        "pythagoras",
        "Pythagorean Theorem",
        r"a^2 + b^2 = c^2",
        r"a^2 + b^2",
        r"c^2",
    ),
    (
        "quadratic",
        "Quadratic Formula",
        r"x = \frac{-b \pm \sqrt{b^2 - 4ac}}{2a}",
        "x",
        r"\frac{-b \pm \sqrt{b^2 - 4ac}}{2a}",
    ),
    (
        "gaussian",
        "Gaussian Integral",
        r"\int_{-\infty}^{\infty} e^{-x^2} dx = \sqrt{\pi}",
        r"\int_{-\infty}^{\infty} e^{-x^2} dx",
        r"\sqrt{\pi}",
    ),
    (
        "zeta2",
        "Basel Problem",
        r"\sum_{n=1}^{\infty} \frac{1}{n^2} = \frac{\pi^2}{6}",
        r"\sum_{n=1}^{\infty} \frac{1}{n^2}",
        r"\frac{\pi^2}{6}",
    ),
    (
        "golden",
        "Golden Ratio",
        r"\varphi = \frac{1 + \sqrt{5}}{2}",
        r"\varphi",
        r"\frac{1 + \sqrt{5}}{2}",
    ),
    (
        "identity",
        "Multiplicative Identity",
        r"1 \cdot x = x",
        r"1 \cdot x",
        "x",
    ),
];

/// Expressions that evaluate to exactly 0
const ZERO_TERMS: &[&str] = &[
    r"\sin^2(\theta) + \cos^2(\theta) - 1",
    r"\lim_{n \to \infty} \frac{1}{n}",
    r"\int_0^0 f(x)\,dx",
    r"\ln(1)",
    r"e^0 - 1",
    r"\zeta(2) - \frac{\pi^2}{6}",
    r"\sum_{k=1}^{n} 0",
    r"\lim_{x \to 0} x",
    r"\frac{d}{dx}(C)",
    r"\Im(1)",
    r"\Re(i) \cdot \Im(i)",
    r"\binom{n}{n+1}",
    r"\lfloor 0.5 \rfloor",
    r"(-1)^2 - 1",
    r"\Gamma(1) - 1",
];

/// Expressions that evaluate to exactly 1
const ONE_FACTORS: &[&str] = &[
    r"e^0",
    r"\Gamma(2)",
    r"\sin^2(\alpha) + \cos^2(\alpha)",
    r"\frac{\pi}{\pi}",
    r"\lim_{n \to \infty} \left(1 + \frac{1}{n}\right)^0",
    r"\left|e^{i\theta}\right|",
    r"\det(I)",
    r"\prod_{k=1}^{n} 1",
    r"\gcd(1, n)",
    r"\lcm(1, 1)",
    r"(-1)^2",
    r"\left(\frac{1}{2}\right)^0",
    r"\sum_{k=0}^{\infty} \frac{(-1)^k}{k!} \cdot (-1)",
    r"\frac{\Gamma(n+1)}{n!}",
];

/// Fancier spellings of specific constants, keyed by the literal token
const ALTERNATE_FORMS: &[(&str, &[&str])] = &[
    (
        "1",
        &[
            r"\sum_{k=0}^{\infty} \frac{1}{2^{k+1}}",
            r"\lim_{n \to \infty} \left(1 + \frac{1}{n}\right)^{1/n}",
            r"\int_0^1 1\,dx",
            r"\Gamma(2)",
            r"e^{\ln(1) + 0}",
        ],
    ),
    (
        r"\pi",
        &[
            r"4 \arctan(1)",
            r"2 \arcsin(1)",
            r"\frac{22}{7} - \frac{1}{791}",
            r"\lim_{n \to \infty} n \sin\left(\frac{\pi}{n}\right)",
        ],
    ),
    (
        "2",
        &[
            r"\sum_{k=0}^{1} 1",
            r"\int_0^2 1\,dx",
            r"e^{\ln(2)}",
        ],
    ),
];

/// Read-only identity collection, built once at startup.
///
/// Built-in entries always come first; user-supplied extras from the
/// catalog manifest are appended after them.
#[derive(Debug, Clone)]
pub struct Catalog {
    identities: Vec<IdentityDef>,
    builtin_count: usize,
}

impl Catalog {
    /// Catalog with only the built-in identities
    pub fn builtin() -> Self {
        let identities: Vec<IdentityDef> = BUILTIN_IDENTITIES
            .iter()
            .map(|&(key, name, latex, left, right)| IdentityDef {
                key: key.to_string(),
                name: name.to_string(),
                latex: latex.to_string(),
                left: left.to_string(),
                right: right.to_string(),
            })
            .collect();
        let builtin_count = identities.len();
        Catalog {
            identities,
            builtin_count,
        }
    }

    /// Built-ins plus user extras. Duplicate keys are skipped, never overridden.
    pub fn with_extras(extras: Vec<IdentityDef>) -> Self {
        let mut catalog = Self::builtin();
        for extra in extras {
            if catalog.get(&extra.key).is_some() {
                tracing::warn!("Skipping duplicate identity key '{}'", extra.key);
                continue;
            }
            catalog.identities.push(extra);
        }
        catalog
    }

    /// Look up an identity by key
    pub fn get(&self, key: &str) -> Option<&IdentityDef> {
        self.identities.iter().find(|i| i.key == key)
    }

    /// All identities, built-ins first
    pub fn identities(&self) -> &[IdentityDef] {
        &self.identities
    }

    /// Whether the identity at `index` came from a user manifest
    pub fn is_extra(&self, index: usize) -> bool {
        index >= self.builtin_count
    }

    /// The full zero-term pool
    pub fn zero_terms(&self) -> &'static [&'static str] {
        ZERO_TERMS
    }

    /// The full one-factor pool
    pub fn one_factors(&self) -> &'static [&'static str] {
        ONE_FACTORS
    }

    /// Alternate spellings table: (token, forms)
    pub fn alternate_forms(&self) -> &'static [(&'static str, &'static [&'static str])] {
        ALTERNATE_FORMS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let catalog = Catalog::builtin();
        let euler = catalog.get("euler").unwrap();
        assert_eq!(euler.name, "Euler's Identity");
        assert_eq!(euler.latex, r"e^{i\pi} + 1 = 0");
        assert!(catalog.get("not-a-real-key").is_none());
    }

    #[test]
    fn test_pool_sizes() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.identities().len(), 7);
        assert_eq!(catalog.zero_terms().len(), 15);
        assert_eq!(catalog.one_factors().len(), 14);
        assert_eq!(catalog.alternate_forms().len(), 3);
    }

    #[test]
    fn test_latex_matches_sides() {
        let catalog = Catalog::builtin();
        for identity in catalog.identities() {
            assert_eq!(
                identity.latex,
                format!("{} = {}", identity.left, identity.right)
            );
        }
    }

    #[test]
    fn test_extras_merge_and_dedup() {
        let extra = IdentityDef {
            key: "derangement".to_string(),
            name: "Derangement Limit".to_string(),
            latex: r"\lim_{n \to \infty} \frac{!n}{n!} = \frac{1}{e}".to_string(),
            left: r"\lim_{n \to \infty} \frac{!n}{n!}".to_string(),
            right: r"\frac{1}{e}".to_string(),
        };
        let dup = IdentityDef {
            key: "euler".to_string(),
            name: "Shadowed".to_string(),
            latex: "a = a".to_string(),
            left: "a".to_string(),
            right: "a".to_string(),
        };

        let catalog = Catalog::with_extras(vec![extra, dup]);
        assert_eq!(catalog.identities().len(), 8);
        assert!(catalog.get("derangement").is_some());
        assert_eq!(catalog.get("euler").unwrap().name, "Euler's Identity");
        assert!(catalog.is_extra(7));
        assert!(!catalog.is_extra(0));
    }
}
