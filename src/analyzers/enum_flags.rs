//! Flags-enum checks: value decomposition into named members,
//! undefined-flag detection, duplicate values, and the zero-value member
//! convention.
//!
//! All four checks consume the same declaration-ordered member snapshot
//! and report in source-position order.

use log::debug;

use crate::core::cancellation::CancellationToken;
use crate::core::errors::Result;
use crate::core::{sort_findings, Finding, FindingKind};
use crate::semantic::enums::{EnumMember, EnumSnapshot, InitializerKind};

/// Runs every enum check applicable to the snapshot.
///
/// The flags checks require the bitwise-flags contract; duplicate-value
/// detection applies to every enum.
pub fn analyze_enum(snapshot: &EnumSnapshot, token: &CancellationToken) -> Result<Vec<Finding>> {
    let mut findings = Vec::new();

    if snapshot.has_flags_attribute {
        check_zero_value_member(snapshot, &mut findings);
        check_undefined_flags(snapshot, token, &mut findings)?;
        check_combination_of_names(snapshot, token, &mut findings)?;
    }

    check_duplicate_values(snapshot, token, &mut findings)?;

    sort_findings(&mut findings);
    Ok(findings)
}

/// A flags enum should declare a `None`-style member with value 0. An
/// enum with no members at all is missing that member too.
fn check_zero_value_member(snapshot: &EnumSnapshot, findings: &mut Vec<Finding>) {
    if !snapshot.contains_value(0) {
        findings.push(Finding::new(
            FindingKind::DeclareEnumMemberWithZeroValue,
            snapshot.identifier_span,
        ));
    }
}

/// Flags composite values carrying bits no declared member covers.
///
/// All-bits-set sentinel members are conventionally exempt, so values at
/// the storage kind's maximum are skipped.
fn check_undefined_flags(
    snapshot: &EnumSnapshot,
    token: &CancellationToken,
    findings: &mut Vec<Finding>,
) -> Result<()> {
    for member in &snapshot.members {
        token.ensure()?;

        let Some(value) = member.value else {
            continue;
        };

        if !snapshot.storage.fits(value) || value == snapshot.storage.max_value() {
            continue;
        }

        if !member.has_composite_value() {
            continue;
        }

        for bit in member.value_bits() {
            if !snapshot.contains_value(bit) {
                debug!(
                    "enum {}: member {} carries undefined flag {}",
                    snapshot.name, member.name, bit
                );
                findings.push(
                    Finding::new(
                        FindingKind::CompositeEnumValueContainsUndefinedFlag,
                        member.span,
                    )
                    .with_arg(bit.to_string()),
                );
            }
        }
    }

    Ok(())
}

/// Flags composite values spelled as numbers when a bitwise-OR of
/// earlier-declared member names reproduces them exactly.
fn check_combination_of_names(
    snapshot: &EnumSnapshot,
    token: &CancellationToken,
    findings: &mut Vec<Finding>,
) -> Result<()> {
    // Decomposition reasons over every prior value; one unresolved member
    // poisons the whole scan.
    if !snapshot.all_values_resolved() {
        return Ok(());
    }

    for (position, member) in snapshot.members.iter().enumerate() {
        token.ensure()?;

        let Some(value) = member.value else {
            continue;
        };

        if !member.has_composite_value() {
            continue;
        }

        let Some(initializer) = &member.initializer else {
            continue;
        };

        if !initializer.spells_out_a_number() {
            continue;
        }

        if let Some(parts) = decompose(&snapshot.members[..position], value) {
            if parts.len() > 1 {
                findings.push(Finding::new(
                    FindingKind::DeclareEnumValueAsCombinationOfNames,
                    initializer.span,
                ));
            }
        }
    }

    Ok(())
}

/// Greedy declaration-order decomposition of `target` into prior members.
///
/// Walks `prior` in declaration order and takes every member whose value
/// is a non-zero subset of the target bits not yet covered, stopping once
/// the accumulated mask reproduces the target exactly. Declaration order
/// is deliberate: it mirrors the operand order of the bitwise-OR
/// expression a reader would write, even where a different ordering would
/// also succeed.
pub fn decompose<'a>(prior: &'a [EnumMember], target: u64) -> Option<Vec<&'a EnumMember>> {
    let mut accumulated = 0u64;
    let mut parts = Vec::new();

    for member in prior {
        let Some(value) = member.value else {
            continue;
        };

        if value == 0 {
            continue;
        }

        let remaining = target & !accumulated;

        if value & remaining == value {
            parts.push(member);
            accumulated |= value;

            if accumulated == target {
                return Some(parts);
            }
        }
    }

    None
}

/// Reports the redundant half of each adjacent pair of members sharing a
/// value.
///
/// When exactly one side lacks an explicit initializer, that side is the
/// accident and gets reported. When both are explicit, the later-declared
/// member is reported unless it is a direct name reference to the earlier
/// one (intentional aliasing).
fn check_duplicate_values(
    snapshot: &EnumSnapshot,
    token: &CancellationToken,
    findings: &mut Vec<Finding>,
) -> Result<()> {
    for pair in snapshot.members.windows(2) {
        token.ensure()?;

        let [earlier, later] = pair else {
            continue;
        };

        let (Some(earlier_value), Some(later_value)) = (earlier.value, later.value) else {
            continue;
        };

        if earlier_value != later_value {
            continue;
        }

        match (&earlier.initializer, &later.initializer) {
            (None, Some(_)) => findings.push(duplicate_finding(earlier)),
            (Some(_), None) => findings.push(duplicate_finding(later)),
            (Some(_), Some(later_init)) => {
                if let InitializerKind::NameReference(name) = &later_init.kind {
                    if *name == earlier.name {
                        continue;
                    }
                }
                findings.push(Finding::new(FindingKind::DuplicateEnumValue, later_init.span));
            }
            // Two implicit successors cannot collide.
            (None, None) => {}
        }
    }

    Ok(())
}

fn duplicate_finding(member: &EnumMember) -> Finding {
    Finding::new(FindingKind::DuplicateEnumValue, member.span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::Error;
    use crate::core::Span;
    use crate::semantic::enums::{Initializer, IntegralKind};
    use pretty_assertions::assert_eq;

    fn member(name: &str, ordinal: usize, value: u64) -> EnumMember {
        let start = ordinal as u32 * 10;
        EnumMember {
            name: name.to_string(),
            ordinal,
            value: Some(value),
            initializer: Some(Initializer {
                kind: InitializerKind::NumericLiteral,
                span: Span::new(start + 4, start + 6),
            }),
            span: Span::new(start, start + 6),
        }
    }

    fn implicit_member(name: &str, ordinal: usize, value: u64) -> EnumMember {
        EnumMember {
            initializer: None,
            ..member(name, ordinal, value)
        }
    }

    fn alias_member(name: &str, ordinal: usize, value: u64, target: &str) -> EnumMember {
        let mut m = member(name, ordinal, value);
        m.initializer = Some(Initializer {
            kind: InitializerKind::NameReference(target.to_string()),
            span: m.initializer.unwrap().span,
        });
        m
    }

    fn flags_enum(members: Vec<EnumMember>) -> EnumSnapshot {
        EnumSnapshot {
            name: "Options".to_string(),
            storage: IntegralKind::I32,
            has_flags_attribute: true,
            members,
            identifier_span: Span::new(0, 7),
        }
    }

    fn kinds(findings: &[Finding]) -> Vec<FindingKind> {
        findings.iter().map(|f| f.kind).collect()
    }

    #[test]
    fn composite_of_prior_members_is_reported() {
        // A = 1, B = 2, C = 3: C decomposes to A | B.
        let snapshot = flags_enum(vec![
            member("None", 0, 0),
            member("A", 1, 1),
            member("B", 2, 2),
            member("C", 3, 3),
        ]);
        let findings = analyze_enum(&snapshot, &CancellationToken::none()).unwrap();
        assert_eq!(
            kinds(&findings),
            vec![FindingKind::DeclareEnumValueAsCombinationOfNames]
        );
        assert_eq!(findings[0].span, Span::new(34, 36));
    }

    #[test]
    fn single_bit_members_do_not_decompose() {
        let snapshot = flags_enum(vec![
            member("None", 0, 0),
            member("A", 1, 1),
            member("B", 2, 2),
        ]);
        let findings = analyze_enum(&snapshot, &CancellationToken::none()).unwrap();
        assert!(findings.is_empty());
    }

    #[test]
    fn decomposition_requires_exact_cover() {
        // A = 1, B = 2, C = 7: bit 4 has no member, so no decomposition;
        // the undefined-flag check reports bit 4 instead.
        let snapshot = flags_enum(vec![
            member("None", 0, 0),
            member("A", 1, 1),
            member("B", 2, 2),
            member("C", 3, 7),
        ]);
        let findings = analyze_enum(&snapshot, &CancellationToken::none()).unwrap();
        assert_eq!(
            kinds(&findings),
            vec![FindingKind::CompositeEnumValueContainsUndefinedFlag]
        );
        assert_eq!(findings[0].args, vec!["4".to_string()]);
    }

    #[test]
    fn decomposition_uses_strictly_prior_members_only() {
        // C = 3 declared before B = 2: only A precedes C, so C does not
        // decompose into more than one name.
        let snapshot = flags_enum(vec![
            member("None", 0, 0),
            member("A", 1, 1),
            member("C", 2, 3),
            member("B", 3, 2),
        ]);
        let findings = analyze_enum(&snapshot, &CancellationToken::none()).unwrap();
        assert!(kinds(&findings)
            .iter()
            .all(|k| *k != FindingKind::DeclareEnumValueAsCombinationOfNames));
    }

    #[test]
    fn greedy_overshoot_is_preserved() {
        // A = 3, B = 1, C = 2, D = 3: the greedy scan takes A (covers the
        // target alone, single element, not reportable) instead of
        // backtracking to B | C. The declaration-order limitation is
        // intentional.
        let members = vec![
            member("A", 0, 3),
            member("B", 1, 1),
            member("C", 2, 2),
        ];
        let parts = decompose(&members, 3).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].name, "A");
    }

    #[test]
    fn decomposed_subset_ors_back_to_target() {
        let members = vec![
            member("A", 0, 1),
            member("B", 1, 4),
            member("C", 2, 8),
        ];
        let parts = decompose(&members, 13).unwrap();
        let reassembled = parts
            .iter()
            .fold(0u64, |acc, m| acc | m.value.unwrap_or_default());
        assert_eq!(reassembled, 13);
        assert_eq!(parts.len(), 3);
    }

    #[test]
    fn missing_zero_member_is_reported() {
        let snapshot = flags_enum(vec![member("A", 0, 1), member("B", 1, 2)]);
        let findings = analyze_enum(&snapshot, &CancellationToken::none()).unwrap();
        assert_eq!(
            kinds(&findings),
            vec![FindingKind::DeclareEnumMemberWithZeroValue]
        );
        assert_eq!(findings[0].span, snapshot.identifier_span);
    }

    #[test]
    fn all_ones_sentinel_is_exempt_from_undefined_flags() {
        let mut snapshot = flags_enum(vec![
            member("None", 0, 0),
            member("A", 1, 1),
            member("All", 2, i32::MAX as u64),
        ]);
        snapshot.storage = IntegralKind::I32;
        let findings = analyze_enum(&snapshot, &CancellationToken::none()).unwrap();
        assert!(kinds(&findings)
            .iter()
            .all(|k| *k != FindingKind::CompositeEnumValueContainsUndefinedFlag));
    }

    #[test]
    fn duplicate_reports_exactly_the_later_member() {
        let snapshot = flags_enum(vec![
            member("None", 0, 0),
            member("A", 1, 1),
            member("B", 2, 1),
        ]);
        let findings = analyze_enum(&snapshot, &CancellationToken::none()).unwrap();
        let duplicates: Vec<&Finding> = findings
            .iter()
            .filter(|f| f.kind == FindingKind::DuplicateEnumValue)
            .collect();
        assert_eq!(duplicates.len(), 1);
        // B's initializer span, not A's.
        assert_eq!(duplicates[0].span, Span::new(24, 26));
    }

    #[test]
    fn empty_flags_enum_is_missing_its_zero_member() {
        let snapshot = flags_enum(Vec::new());
        let findings = analyze_enum(&snapshot, &CancellationToken::none()).unwrap();
        assert_eq!(
            kinds(&findings),
            vec![FindingKind::DeclareEnumMemberWithZeroValue]
        );
        assert_eq!(findings[0].span, snapshot.identifier_span);
    }

    #[test]
    fn name_reference_alias_is_not_a_duplicate() {
        let snapshot = flags_enum(vec![
            member("None", 0, 0),
            member("A", 1, 1),
            alias_member("Alias", 2, 1, "A"),
        ]);
        let findings = analyze_enum(&snapshot, &CancellationToken::none()).unwrap();
        assert!(kinds(&findings)
            .iter()
            .all(|k| *k != FindingKind::DuplicateEnumValue));
    }

    #[test]
    fn forward_name_reference_is_still_a_duplicate() {
        // Aliasing only reads backwards: Alias = A before A is declared
        // leaves the later explicit member reported.
        let snapshot = flags_enum(vec![
            member("None", 0, 0),
            alias_member("Alias", 1, 1, "A"),
            member("A", 2, 1),
        ]);
        let findings = analyze_enum(&snapshot, &CancellationToken::none()).unwrap();
        let duplicates: Vec<&Finding> = findings
            .iter()
            .filter(|f| f.kind == FindingKind::DuplicateEnumValue)
            .collect();
        assert_eq!(duplicates.len(), 1);
        // A's initializer span.
        assert_eq!(duplicates[0].span, Span::new(24, 26));
    }

    #[test]
    fn implicit_member_loses_to_explicit_duplicate() {
        // A (implicit) and B = 0 share a value; A is the accident.
        let snapshot = flags_enum(vec![
            implicit_member("A", 0, 0),
            member("B", 1, 0),
        ]);
        let findings = analyze_enum(&snapshot, &CancellationToken::none()).unwrap();
        let duplicates: Vec<&Finding> = findings
            .iter()
            .filter(|f| f.kind == FindingKind::DuplicateEnumValue)
            .collect();
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].span, Span::new(0, 6));
    }

    #[test]
    fn duplicates_apply_without_the_flags_contract() {
        let mut snapshot = flags_enum(vec![member("A", 0, 5), member("B", 1, 5)]);
        snapshot.has_flags_attribute = false;
        let findings = analyze_enum(&snapshot, &CancellationToken::none()).unwrap();
        assert_eq!(kinds(&findings), vec![FindingKind::DuplicateEnumValue]);
    }

    #[test]
    fn findings_arrive_in_source_order() {
        // Zero-member finding sits on the identifier (position 0); the
        // duplicate sits later. Source order, not rule order.
        let snapshot = flags_enum(vec![
            member("A", 1, 1),
            member("B", 2, 1),
        ]);
        let findings = analyze_enum(&snapshot, &CancellationToken::none()).unwrap();
        assert_eq!(
            kinds(&findings),
            vec![
                FindingKind::DeclareEnumMemberWithZeroValue,
                FindingKind::DuplicateEnumValue,
            ]
        );
        assert!(findings[0].span.start <= findings[1].span.start);
    }

    #[test]
    fn unresolved_values_suppress_decomposition() {
        let mut snapshot = flags_enum(vec![
            member("A", 0, 1),
            member("B", 1, 2),
            member("C", 2, 3),
        ]);
        snapshot.members[1].value = None;
        let findings = analyze_enum(&snapshot, &CancellationToken::none()).unwrap();
        assert!(kinds(&findings)
            .iter()
            .all(|k| *k != FindingKind::DeclareEnumValueAsCombinationOfNames));
    }

    #[test]
    fn cancellation_aborts_the_member_scan() {
        let snapshot = flags_enum(vec![member("None", 0, 0), member("A", 1, 1)]);
        let token = CancellationToken::new();
        token.cancel();
        assert!(matches!(
            analyze_enum(&snapshot, &token),
            Err(Error::Cancelled)
        ));
    }
}
