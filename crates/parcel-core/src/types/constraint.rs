//! Version constraints and their textual grammar.
//!
//! A constraint string takes one of four shapes:
//!
//! | shape                | example          | meaning                   |
//! |----------------------|------------------|---------------------------|
//! | exact                | `1.2`, `=1.2`    | exactly 1.2               |
//! | single bound         | `>=1.2`, `<2.0`  | one-sided range           |
//! | explicit range       | `>1.0 <=2.0`     | lower bound + upper bound |
//! | inclusive range      | `1.0 - 2.0`      | same as `>=1.0 <=2.0`     |
//!
//! Each production is parsed by its own function so syntax, range and version
//! token failures stay distinguishable.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::version::{Version, VersionError};

/// Comparison operator for version constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Exact,     // =1.0
    Greater,   // >1.0
    GreaterEq, // >=1.0
    Less,      // <1.0
    LessEq,    // <=1.0
}

/// Single operator + version term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Comparator {
    pub op: Op,
    pub version: Version,
}

/// Predicate over versions: an exact match, or a lower bound and/or an
/// upper bound.
///
/// Equality is structural, so `"1.0"` and `"=1.0"` compare equal while
/// `">=1.0 <=2.0"` and `"1.0 - 2.0"` do too. Every value renders as text
/// that parses back to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionConstraint {
    terms: Terms,
}

/// At least one bound is always present, each on its own side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Terms {
    Exact(Version),
    Lower(Comparator),
    Upper(Comparator),
    Range { lower: Comparator, upper: Comparator },
}

impl Op {
    /// Textual operator, `=` for exact
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Exact => "=",
            Op::Greater => ">",
            Op::GreaterEq => ">=",
            Op::Less => "<",
            Op::LessEq => "<=",
        }
    }

    /// Whether `candidate.cmp(bound)` satisfies this operator
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            Op::Exact => ordering == Ordering::Equal,
            Op::Greater => ordering == Ordering::Greater,
            Op::GreaterEq => ordering != Ordering::Less,
            Op::Less => ordering == Ordering::Less,
            Op::LessEq => ordering != Ordering::Greater,
        }
    }

    pub fn is_lower_bound(self) -> bool {
        matches!(self, Op::Greater | Op::GreaterEq)
    }

    pub fn is_upper_bound(self) -> bool {
        matches!(self, Op::Less | Op::LessEq)
    }

    /// Split a leading operator off a term; no operator means exact
    fn split_prefix(term: &str) -> (Op, &str) {
        // Two-character operators must be tried before their one-character prefixes
        const OPERATORS: [(&str, Op); 5] = [
            (">=", Op::GreaterEq),
            ("<=", Op::LessEq),
            (">", Op::Greater),
            ("<", Op::Less),
            ("=", Op::Exact),
        ];

        OPERATORS
            .iter()
            .find_map(|(symbol, op)| term.strip_prefix(symbol).map(|rest| (*op, rest)))
            .unwrap_or((Op::Exact, term))
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Comparator {
    pub fn new(op: Op, version: Version) -> Self {
        Self { op, version }
    }

    /// Check if a version satisfies this term
    pub fn matches(&self, version: &Version) -> bool {
        self.op.holds(version.cmp(&self.version))
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.version)
    }
}

impl VersionConstraint {
    /// Constraint matching exactly `version`
    pub fn exact(version: Version) -> Self {
        Self::from_terms(Terms::Exact(version))
    }

    /// Constraint with a lower bound only (`>` or `>=`)
    pub fn at_least(op: Op, version: Version) -> Option<Self> {
        op.is_lower_bound()
            .then(|| Self::from_terms(Terms::Lower(Comparator::new(op, version))))
    }

    /// Constraint with an upper bound only (`<` or `<=`)
    pub fn at_most(op: Op, version: Version) -> Option<Self> {
        op.is_upper_bound()
            .then(|| Self::from_terms(Terms::Upper(Comparator::new(op, version))))
    }

    /// Two-sided constraint; `None` if an operator is on the wrong side or
    /// the lower version exceeds the upper one
    pub fn between(lower: Comparator, upper: Comparator) -> Option<Self> {
        let valid = lower.op.is_lower_bound()
            && upper.op.is_upper_bound()
            && lower.version <= upper.version;
        valid.then(|| Self::from_terms(Terms::Range { lower, upper }))
    }

    fn from_terms(terms: Terms) -> Self {
        Self { terms }
    }

    /// Check if a version matches every present term
    pub fn matches(&self, version: &Version) -> bool {
        match self.terms {
            Terms::Exact(exact) => *version == exact,
            Terms::Lower(bound) | Terms::Upper(bound) => bound.matches(version),
            Terms::Range { lower, upper } => lower.matches(version) && upper.matches(version),
        }
    }

    /// Parse a constraint string
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        ConstraintParser { input }.parse()
    }
}

impl FromStr for VersionConstraint {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.terms {
            Terms::Exact(version) => write!(f, "{}", version),
            Terms::Lower(bound) | Terms::Upper(bound) => write!(f, "{}", bound),
            Terms::Range { lower, upper } => write!(f, "{} {}", lower, upper),
        }
    }
}

/// Separator between range terms; ASCII only
fn is_space(c: char) -> bool {
    c.is_ascii_whitespace()
}

/// Recursive-descent parser over the four constraint productions
struct ConstraintParser<'a> {
    input: &'a str,
}

impl<'a> ConstraintParser<'a> {
    fn parse(&self) -> Result<VersionConstraint, VersionError> {
        if self.input.is_empty() || self.input.trim_matches(is_space) != self.input {
            return Err(self.syntax_error());
        }

        // Version tokens never contain '-', so any hyphen is the range separator
        if let Some((lower, upper)) = self.input.split_once('-') {
            return self.inclusive_range(
                lower.trim_end_matches(is_space),
                upper.trim_start_matches(is_space),
            );
        }

        if let Some((lower, upper)) = self.input.split_once(is_space) {
            return self.explicit_range(lower, upper.trim_start_matches(is_space));
        }

        self.single(self.input)
    }

    /// `<version1> - <version2>`
    fn inclusive_range(
        &self,
        lower: &str,
        upper: &str,
    ) -> Result<VersionConstraint, VersionError> {
        let lower = self.version_token(lower)?;
        let upper = self.version_token(upper)?;
        self.range(
            Comparator::new(Op::GreaterEq, lower),
            Comparator::new(Op::LessEq, upper),
        )
    }

    /// `<cmp1><version1> <cmp2><version2>`
    fn explicit_range(&self, lower: &str, upper: &str) -> Result<VersionConstraint, VersionError> {
        let lower = self.comparator(lower)?;
        let upper = self.comparator(upper)?;
        if !lower.op.is_lower_bound() || !upper.op.is_upper_bound() {
            return Err(self.syntax_error());
        }
        self.range(lower, upper)
    }

    /// `<version>`, `=<version>` or `<cmp><version>`
    fn single(&self, term: &str) -> Result<VersionConstraint, VersionError> {
        let comparator = self.comparator(term)?;
        let Comparator { op, version } = comparator;
        let constraint = match op {
            Op::Exact => Some(VersionConstraint::exact(version)),
            op if op.is_lower_bound() => VersionConstraint::at_least(op, version),
            op => VersionConstraint::at_most(op, version),
        };
        constraint.ok_or_else(|| self.syntax_error())
    }

    fn comparator(&self, term: &str) -> Result<Comparator, VersionError> {
        let (op, version) = Op::split_prefix(term);
        Ok(Comparator::new(op, self.version_token(version)?))
    }

    /// A version token is a non-empty run of digits and dots; its
    /// `major.minor` shape is checked by `Version` itself
    fn version_token(&self, token: &str) -> Result<Version, VersionError> {
        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
            return Err(self.syntax_error());
        }
        token.parse()
    }

    fn range(
        &self,
        lower: Comparator,
        upper: Comparator,
    ) -> Result<VersionConstraint, VersionError> {
        if lower.version > upper.version {
            return Err(VersionError::InvalidConstraintRange {
                input: self.input.to_string(),
                lower: lower.version,
                upper: upper.version,
            });
        }
        VersionConstraint::between(lower, upper).ok_or_else(|| self.syntax_error())
    }

    fn syntax_error(&self) -> VersionError {
        VersionError::InvalidConstraintSyntax {
            input: self.input.to_string(),
        }
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn version_strategy() -> impl Strategy<Value = Version> {
        (0u64..20, 0u64..20)
            .prop_filter("0.0 is not a version", |(major, minor)| *major != 0 || *minor != 0)
            .prop_map(|(major, minor)| Version::new(major, minor).unwrap())
    }

    proptest! {
        #[test]
        fn exact_matches_only_itself(a in version_strategy(), b in version_strategy()) {
            let constraint = VersionConstraint::exact(a);
            prop_assert!(constraint.matches(&a));
            prop_assert_eq!(constraint.matches(&b), a == b);
        }

        #[test]
        fn inclusive_range_is_closed_interval(
            lo in version_strategy(),
            hi in version_strategy(),
            candidate in version_strategy(),
        ) {
            prop_assume!(lo <= hi);

            let hyphen = VersionConstraint::parse(&format!("{} - {}", lo, hi)).unwrap();
            let explicit = VersionConstraint::parse(&format!(">={} <={}", lo, hi)).unwrap();
            prop_assert_eq!(hyphen, explicit);
            prop_assert_eq!(hyphen.matches(&candidate), lo <= candidate && candidate <= hi);
        }

        #[test]
        fn inverted_ranges_are_rejected(lo in version_strategy(), hi in version_strategy()) {
            prop_assume!(lo > hi);

            let result = VersionConstraint::parse(&format!(">{} <{}", lo, hi));
            let is_range_error = matches!(result, Err(VersionError::InvalidConstraintRange { .. }));
            prop_assert!(is_range_error);
        }

        #[test]
        fn display_reparses_to_same_constraint(
            lo in version_strategy(),
            hi in version_strategy(),
            strict_lower in any::<bool>(),
            strict_upper in any::<bool>(),
        ) {
            prop_assume!(lo <= hi);

            let text = format!(
                "{}{} {}{}",
                if strict_lower { ">" } else { ">=" },
                lo,
                if strict_upper { "<" } else { "<=" },
                hi
            );
            let constraint = VersionConstraint::parse(&text).unwrap();
            prop_assert_eq!(VersionConstraint::parse(&constraint.to_string()).unwrap(), constraint);
        }
    }
}
